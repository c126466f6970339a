//! Generic ownership core shared by every native resource type.

use std::mem;
use std::ptr::NonNull;

use crate::error::SignalError;
use crate::ffi;

/// The destroy/clone entry points governing one native resource type.
///
/// # Safety
///
/// `destroy_raw` must release an allocation produced by the matching
/// constructor entry points exactly once; `clone_raw` must write a new,
/// independent allocation through `out`.
pub(crate) unsafe trait NativeHandleType {
    const NAME: &'static str;

    unsafe fn destroy_raw(raw: *mut Self) -> *mut signal_ffi::SignalFfiError;
    unsafe fn clone_raw(out: *mut *mut Self, raw: *const Self)
    -> *mut signal_ffi::SignalFfiError;
}

/// Exclusive owner of one native allocation.
///
/// Dropping it runs the native destructor, and there is no other path to
/// destruction, so a handle is live for exactly as long as it can be named.
pub(crate) struct OwnedHandle<T: NativeHandleType> {
    raw: NonNull<T>,
}

impl<T: NativeHandleType> OwnedHandle<T> {
    /// Adopts a raw native pointer, rejecting null.
    ///
    /// # Safety
    ///
    /// A non-null `raw` must be an exclusively-owned live allocation of
    /// this resource type.
    pub(crate) unsafe fn from_raw(raw: *mut T) -> Result<Self, SignalError> {
        NonNull::new(raw)
            .map(|raw| Self { raw })
            .ok_or(SignalError::NullHandle)
    }

    /// Runs a constructor entry point and adopts the handle it writes.
    pub(crate) fn construct(
        call: impl FnOnce(*mut *mut T) -> *mut signal_ffi::SignalFfiError,
    ) -> Result<Self, SignalError> {
        let raw = ffi::invoke(call)?;
        unsafe { Self::from_raw(raw) }
    }

    pub(crate) fn as_ptr(&self) -> *const T {
        self.raw.as_ptr()
    }

    /// Releases ownership without destroying, for handing the resource to
    /// another owner. The counterpart of canceling an automatic finalizer.
    pub(crate) fn into_raw(self) -> *mut T {
        let raw = self.raw.as_ptr();
        mem::forget(self);
        raw
    }

    /// New independent allocation with equal content.
    pub(crate) fn try_clone(&self) -> Result<Self, SignalError> {
        Self::construct(|out| unsafe { T::clone_raw(out, self.as_ptr()) })
    }
}

impl<T: NativeHandleType> Drop for OwnedHandle<T> {
    fn drop(&mut self) {
        let err = unsafe { T::destroy_raw(self.raw.as_ptr()) };
        if let Err(err) = ffi::check(err) {
            log::warn!("failed to destroy native {} handle: {err}", T::NAME);
        }
    }
}
