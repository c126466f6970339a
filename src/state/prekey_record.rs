use crate::curve::{PrivateKey, PublicKey};
use crate::error::SignalError;
use crate::ffi;
use crate::handle::{NativeHandleType, OwnedHandle};

unsafe impl NativeHandleType for signal_ffi::SignalPreKeyRecord {
    const NAME: &'static str = "pre_key_record";

    unsafe fn destroy_raw(raw: *mut Self) -> *mut signal_ffi::SignalFfiError {
        unsafe { signal_ffi::signal_pre_key_record_destroy(raw) }
    }

    unsafe fn clone_raw(
        out: *mut *mut Self,
        raw: *const Self,
    ) -> *mut signal_ffi::SignalFfiError {
        unsafe { signal_ffi::signal_pre_key_record_clone(out, raw) }
    }
}

/// A prekey record owned by the native library, with the same ownership
/// discipline as [`SignedPreKeyRecord`](crate::SignedPreKeyRecord).
pub struct PreKeyRecord {
    handle: OwnedHandle<signal_ffi::SignalPreKeyRecord>,
}

impl PreKeyRecord {
    pub fn new(
        id: u32,
        public_key: &PublicKey,
        private_key: &PrivateKey,
    ) -> Result<Self, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_pre_key_record_new(
                out,
                id,
                public_key.as_ptr(),
                private_key.as_ptr(),
            )
        })
        .map(|handle| Self { handle })
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_pre_key_record_deserialize(out, ffi::borrowed(bytes))
        })
        .map(|handle| Self { handle })
    }

    pub fn try_clone(&self) -> Result<Self, SignalError> {
        self.handle.try_clone().map(|handle| Self { handle })
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SignalError> {
        ffi::invoke_bytes(|out| unsafe {
            signal_ffi::signal_pre_key_record_serialize(out, self.handle.as_ptr())
        })
    }

    pub fn id(&self) -> Result<u32, SignalError> {
        ffi::invoke(|out| unsafe {
            signal_ffi::signal_pre_key_record_get_id(out, self.handle.as_ptr())
        })
    }

    /// Returns a new owned key handle with its own independent lifecycle.
    pub fn public_key(&self) -> Result<PublicKey, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_pre_key_record_get_public_key(out, self.handle.as_ptr())
        })
        .map(PublicKey::from_handle)
    }

    /// Returns a new owned key handle with its own independent lifecycle.
    pub fn private_key(&self) -> Result<PrivateKey, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_pre_key_record_get_private_key(out, self.handle.as_ptr())
        })
        .map(PrivateKey::from_handle)
    }

    /// Hands the raw native pointer to another owner; no destructor runs
    /// here afterwards.
    pub fn into_raw(self) -> *mut signal_ffi::SignalPreKeyRecord {
        self.handle.into_raw()
    }

    /// # Safety
    ///
    /// A non-null `raw` must be an exclusively-owned live native record.
    pub unsafe fn from_raw(
        raw: *mut signal_ffi::SignalPreKeyRecord,
    ) -> Result<Self, SignalError> {
        unsafe { OwnedHandle::from_raw(raw) }.map(|handle| Self { handle })
    }
}
