use std::mem::MaybeUninit;

use signal_ffi::SignalErrorCode;
use thiserror::Error;

use crate::ffi;

/// Failures surfaced from the native layer.
///
/// The native code and message come through unchanged, so callers can tell
/// malformed input from allocation failure without inspecting native
/// representations.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("native operation failed: {message} (code {code})")]
    NativeOperation { code: u32, message: String },
    #[error("malformed record data: {message} (code {code})")]
    Deserialization { code: u32, message: String },
    #[error("null native handle")]
    NullHandle,
    #[error("timestamp out of range: {0}ms")]
    TimestampOutOfRange(u64),
}

impl SignalError {
    /// Decodes a native error object and releases it.
    ///
    /// # Safety
    ///
    /// `raw` must be a live error pointer returned by an entry point, not
    /// read or released before, and not used again afterwards.
    pub(crate) unsafe fn from_raw(raw: *mut signal_ffi::SignalFfiError) -> Self {
        let code = unsafe { signal_ffi::signal_error_get_type(raw) };
        let message = unsafe {
            let mut out = MaybeUninit::<signal_ffi::SignalOwnedBuffer>::uninit();
            signal_ffi::signal_error_get_message(out.as_mut_ptr(), raw);
            ffi::read_owned_buffer(out.assume_init())
        };
        unsafe { signal_ffi::signal_error_free(raw) };

        let message = String::from_utf8_lossy(&message).into_owned();
        if code == SignalErrorCode::ProtobufError as u32
            || code == SignalErrorCode::InvalidKey as u32
        {
            Self::Deserialization { code, message }
        } else {
            Self::NativeOperation { code, message }
        }
    }
}
