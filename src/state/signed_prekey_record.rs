use chrono::{DateTime, Utc};

use crate::curve::{PrivateKey, PublicKey};
use crate::error::SignalError;
use crate::ffi;
use crate::handle::{NativeHandleType, OwnedHandle};

unsafe impl NativeHandleType for signal_ffi::SignalSignedPreKeyRecord {
    const NAME: &'static str = "signed_pre_key_record";

    unsafe fn destroy_raw(raw: *mut Self) -> *mut signal_ffi::SignalFfiError {
        unsafe { signal_ffi::signal_signed_pre_key_record_destroy(raw) }
    }

    unsafe fn clone_raw(
        out: *mut *mut Self,
        raw: *const Self,
    ) -> *mut signal_ffi::SignalFfiError {
        unsafe { signal_ffi::signal_signed_pre_key_record_clone(out, raw) }
    }
}

/// A signed prekey record owned by the native library.
///
/// The wrapper is the sole owner of the allocation: dropping it destroys
/// the native record, [`try_clone`](Self::try_clone) allocates an
/// independent copy, and [`into_raw`](Self::into_raw) transfers ownership
/// out without destroying.
pub struct SignedPreKeyRecord {
    handle: OwnedHandle<signal_ffi::SignalSignedPreKeyRecord>,
}

impl std::fmt::Debug for SignedPreKeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedPreKeyRecord").finish_non_exhaustive()
    }
}

impl SignedPreKeyRecord {
    /// Builds a record from its parts. The timestamp is truncated to
    /// millisecond precision at the boundary.
    pub fn new(
        id: u32,
        timestamp: DateTime<Utc>,
        public_key: &PublicKey,
        private_key: &PrivateKey,
        signature: &[u8],
    ) -> Result<Self, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_signed_pre_key_record_new(
                out,
                id,
                timestamp.timestamp_millis() as u64,
                public_key.as_ptr(),
                private_key.as_ptr(),
                ffi::borrowed(signature),
            )
        })
        .map(|handle| Self { handle })
    }

    /// Derives the public key from `private_key`, then builds the record.
    pub fn from_private_key(
        id: u32,
        timestamp: DateTime<Utc>,
        private_key: &PrivateKey,
        signature: &[u8],
    ) -> Result<Self, SignalError> {
        let public_key = private_key.public_key()?;
        Self::new(id, timestamp, &public_key, private_key, signature)
    }

    /// Parses a previously serialized record into a fresh allocation.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_signed_pre_key_record_deserialize(out, ffi::borrowed(bytes))
        })
        .map(|handle| Self { handle })
    }

    /// Independent native copy; the original stays valid and separately
    /// destroyable.
    pub fn try_clone(&self) -> Result<Self, SignalError> {
        self.handle.try_clone().map(|handle| Self { handle })
    }

    /// Canonical byte encoding; round-trips through
    /// [`deserialize`](Self::deserialize).
    pub fn serialize(&self) -> Result<Vec<u8>, SignalError> {
        ffi::invoke_bytes(|out| unsafe {
            signal_ffi::signal_signed_pre_key_record_serialize(out, self.handle.as_ptr())
        })
    }

    pub fn signature(&self) -> Result<Vec<u8>, SignalError> {
        ffi::invoke_bytes(|out| unsafe {
            signal_ffi::signal_signed_pre_key_record_get_signature(out, self.handle.as_ptr())
        })
    }

    pub fn id(&self) -> Result<u32, SignalError> {
        ffi::invoke(|out| unsafe {
            signal_ffi::signal_signed_pre_key_record_get_id(out, self.handle.as_ptr())
        })
    }

    /// Creation time, exact to the millisecond the record was built with.
    pub fn timestamp(&self) -> Result<DateTime<Utc>, SignalError> {
        let millis = ffi::invoke(|out| unsafe {
            signal_ffi::signal_signed_pre_key_record_get_timestamp(out, self.handle.as_ptr())
        })?;
        DateTime::from_timestamp_millis(millis as i64)
            .ok_or(SignalError::TimestampOutOfRange(millis))
    }

    /// Returns a new owned key handle with its own independent lifecycle.
    pub fn public_key(&self) -> Result<PublicKey, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_signed_pre_key_record_get_public_key(out, self.handle.as_ptr())
        })
        .map(PublicKey::from_handle)
    }

    /// Returns a new owned key handle with its own independent lifecycle.
    pub fn private_key(&self) -> Result<PrivateKey, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_signed_pre_key_record_get_private_key(out, self.handle.as_ptr())
        })
        .map(PrivateKey::from_handle)
    }

    /// Hands the raw native pointer to another owner; no destructor runs
    /// here afterwards.
    pub fn into_raw(self) -> *mut signal_ffi::SignalSignedPreKeyRecord {
        self.handle.into_raw()
    }

    /// # Safety
    ///
    /// A non-null `raw` must be an exclusively-owned live native record.
    pub unsafe fn from_raw(
        raw: *mut signal_ffi::SignalSignedPreKeyRecord,
    ) -> Result<Self, SignalError> {
        unsafe { OwnedHandle::from_raw(raw) }.map(|handle| Self { handle })
    }
}
