//! Call-adapter plumbing shared by every wrapped resource.
//!
//! Native calls return an error pointer (null means success) and write
//! results through out-parameters. Buffers coming back are native-owned:
//! the bytes are copied into the caller's memory and the native allocation
//! is released immediately. Input slices cross as (pointer, length) views;
//! the borrows taken at each call site keep them alive until the call
//! returns.

use std::mem::MaybeUninit;
use std::slice;

use crate::error::SignalError;

/// Translates an entry point's error return, taking ownership of it.
pub(crate) fn check(raw: *mut signal_ffi::SignalFfiError) -> Result<(), SignalError> {
    if raw.is_null() {
        Ok(())
    } else {
        Err(unsafe { SignalError::from_raw(raw) })
    }
}

/// Runs an entry point that writes its result through an out-parameter.
pub(crate) fn invoke<T>(
    call: impl FnOnce(*mut T) -> *mut signal_ffi::SignalFfiError,
) -> Result<T, SignalError> {
    let mut out = MaybeUninit::<T>::uninit();
    check(call(out.as_mut_ptr()))?;
    Ok(unsafe { out.assume_init() })
}

/// Runs an entry point producing a native-owned buffer and copies the bytes
/// out.
pub(crate) fn invoke_bytes(
    call: impl FnOnce(*mut signal_ffi::SignalOwnedBuffer) -> *mut signal_ffi::SignalFfiError,
) -> Result<Vec<u8>, SignalError> {
    let buffer = invoke(call)?;
    Ok(unsafe { read_owned_buffer(buffer) })
}

/// The mandatory copy-then-release step for a native-owned buffer.
///
/// # Safety
///
/// `buffer` must have been written by an entry point and not released
/// before.
pub(crate) unsafe fn read_owned_buffer(buffer: signal_ffi::SignalOwnedBuffer) -> Vec<u8> {
    let bytes = if buffer.base.is_null() {
        Vec::new()
    } else {
        unsafe { slice::from_raw_parts(buffer.base, buffer.length) }.to_vec()
    };
    unsafe { signal_ffi::signal_free_buffer(buffer.base, buffer.length) };
    bytes
}

/// (pointer, length) view of a caller slice for the duration of one call.
pub(crate) fn borrowed(bytes: &[u8]) -> signal_ffi::SignalBorrowedBuffer {
    signal_ffi::SignalBorrowedBuffer {
        base: bytes.as_ptr(),
        length: bytes.len(),
    }
}
