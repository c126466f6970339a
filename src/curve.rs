//! Key handles: the public/private collaborators of the record types,
//! wrapped with the same ownership discipline.

use crate::error::SignalError;
use crate::ffi;
use crate::handle::{NativeHandleType, OwnedHandle};

unsafe impl NativeHandleType for signal_ffi::SignalPublicKey {
    const NAME: &'static str = "publickey";

    unsafe fn destroy_raw(raw: *mut Self) -> *mut signal_ffi::SignalFfiError {
        unsafe { signal_ffi::signal_publickey_destroy(raw) }
    }

    unsafe fn clone_raw(
        out: *mut *mut Self,
        raw: *const Self,
    ) -> *mut signal_ffi::SignalFfiError {
        unsafe { signal_ffi::signal_publickey_clone(out, raw) }
    }
}

unsafe impl NativeHandleType for signal_ffi::SignalPrivateKey {
    const NAME: &'static str = "privatekey";

    unsafe fn destroy_raw(raw: *mut Self) -> *mut signal_ffi::SignalFfiError {
        unsafe { signal_ffi::signal_privatekey_destroy(raw) }
    }

    unsafe fn clone_raw(
        out: *mut *mut Self,
        raw: *const Self,
    ) -> *mut signal_ffi::SignalFfiError {
        unsafe { signal_ffi::signal_privatekey_clone(out, raw) }
    }
}

/// Public half of a key pair, owned natively.
pub struct PublicKey {
    handle: OwnedHandle<signal_ffi::SignalPublicKey>,
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey").finish_non_exhaustive()
    }
}

impl PublicKey {
    pub fn deserialize(bytes: &[u8]) -> Result<Self, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_publickey_deserialize(out, ffi::borrowed(bytes))
        })
        .map(Self::from_handle)
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SignalError> {
        ffi::invoke_bytes(|out| unsafe {
            signal_ffi::signal_publickey_serialize(out, self.handle.as_ptr())
        })
    }

    pub fn try_clone(&self) -> Result<Self, SignalError> {
        self.handle.try_clone().map(Self::from_handle)
    }

    /// Hands the raw native pointer to another owner; no destructor runs
    /// here afterwards.
    pub fn into_raw(self) -> *mut signal_ffi::SignalPublicKey {
        self.handle.into_raw()
    }

    /// # Safety
    ///
    /// A non-null `raw` must be an exclusively-owned live native public
    /// key.
    pub unsafe fn from_raw(raw: *mut signal_ffi::SignalPublicKey) -> Result<Self, SignalError> {
        unsafe { OwnedHandle::from_raw(raw) }.map(Self::from_handle)
    }

    pub(crate) fn from_handle(handle: OwnedHandle<signal_ffi::SignalPublicKey>) -> Self {
        Self { handle }
    }

    pub(crate) fn as_ptr(&self) -> *const signal_ffi::SignalPublicKey {
        self.handle.as_ptr()
    }
}

/// Private half of a key pair, owned natively.
pub struct PrivateKey {
    handle: OwnedHandle<signal_ffi::SignalPrivateKey>,
}

impl PrivateKey {
    /// Fresh key material from the native generator.
    pub fn generate() -> Result<Self, SignalError> {
        OwnedHandle::construct(|out| unsafe { signal_ffi::signal_privatekey_generate(out) })
            .map(Self::from_handle)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_privatekey_deserialize(out, ffi::borrowed(bytes))
        })
        .map(Self::from_handle)
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SignalError> {
        ffi::invoke_bytes(|out| unsafe {
            signal_ffi::signal_privatekey_serialize(out, self.handle.as_ptr())
        })
    }

    /// Derives the matching public key as a new owned handle.
    pub fn public_key(&self) -> Result<PublicKey, SignalError> {
        OwnedHandle::construct(|out| unsafe {
            signal_ffi::signal_privatekey_get_public_key(out, self.handle.as_ptr())
        })
        .map(PublicKey::from_handle)
    }

    pub fn try_clone(&self) -> Result<Self, SignalError> {
        self.handle.try_clone().map(Self::from_handle)
    }

    /// Hands the raw native pointer to another owner; no destructor runs
    /// here afterwards.
    pub fn into_raw(self) -> *mut signal_ffi::SignalPrivateKey {
        self.handle.into_raw()
    }

    /// # Safety
    ///
    /// A non-null `raw` must be an exclusively-owned live native private
    /// key.
    pub unsafe fn from_raw(raw: *mut signal_ffi::SignalPrivateKey) -> Result<Self, SignalError> {
        unsafe { OwnedHandle::from_raw(raw) }.map(Self::from_handle)
    }

    pub(crate) fn from_handle(handle: OwnedHandle<signal_ffi::SignalPrivateKey>) -> Self {
        Self { handle }
    }

    pub(crate) fn as_ptr(&self) -> *const signal_ffi::SignalPrivateKey {
        self.handle.as_ptr()
    }
}
