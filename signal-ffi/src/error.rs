use crate::buffer::SignalOwnedBuffer;

/// Stable error discriminants crossing the boundary.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalErrorCode {
    UnknownError = 1,
    InvalidState = 2,
    InternalError = 3,
    NullParameter = 4,
    InvalidArgument = 5,
    ProtobufError = 10,
    InvalidKey = 11,
}

/// Opaque error object returned from entry points.
///
/// Callers read it with [`signal_error_get_type`] and
/// [`signal_error_get_message`] and release it with [`signal_error_free`].
pub struct SignalFfiError {
    code: SignalErrorCode,
    message: String,
}

impl SignalFfiError {
    pub(crate) fn raise(code: SignalErrorCode, message: impl Into<String>) -> *mut SignalFfiError {
        Box::into_raw(Box::new(Self {
            code,
            message: message.into(),
        }))
    }

    pub(crate) fn null_parameter(name: &str) -> *mut SignalFfiError {
        Self::raise(SignalErrorCode::NullParameter, format!("null parameter: {name}"))
    }
}

/// Returns the error's stable discriminant.
///
/// # Safety
///
/// `err` must be null or a live error object from this library.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_error_get_type(err: *const SignalFfiError) -> u32 {
    match unsafe { err.as_ref() } {
        Some(err) => err.code as u32,
        None => SignalErrorCode::UnknownError as u32,
    }
}

/// Writes the error's UTF-8 message into an owned buffer.
///
/// # Safety
///
/// `out` must be valid for writes; `err` must be null or a live error
/// object from this library.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_error_get_message(
    out: *mut SignalOwnedBuffer,
    err: *const SignalFfiError,
) {
    let Some(out) = (unsafe { out.as_mut() }) else {
        return;
    };
    let message = unsafe { err.as_ref() }
        .map(|err| err.message.clone())
        .unwrap_or_default();
    *out = SignalOwnedBuffer::from_vec(message.into_bytes());
}

/// Releases an error object.
///
/// # Safety
///
/// `err` must be null or a live error object not released before.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_error_free(err: *mut SignalFfiError) {
    if !err.is_null() {
        drop(unsafe { Box::from_raw(err) });
    }
}
