//! C-ABI entry points, one per operation.
//!
//! Shared contract: every pointer argument must stay live for the duration
//! of the call; out-parameters must be valid for writes; handle arguments
//! must come from this library and not have been destroyed. A non-null
//! return is an error object the caller owns and must release with
//! [`signal_error_free`](crate::error::signal_error_free) after reading it.
//! Null required arguments are rejected with `NullParameter` rather than
//! dereferenced.

use std::ptr;

use rand::{TryRngCore, rngs::OsRng};

use crate::buffer::{SignalBorrowedBuffer, SignalOwnedBuffer};
use crate::curve::{CurveError, KeyPair, PrivateKey, PublicKey};
use crate::error::{SignalErrorCode, SignalFfiError};
use crate::record::{PreKeyRecord, RecordError, SignedPreKeyRecord};

unsafe fn write_handle<T>(out: *mut *mut T, value: T) -> *mut SignalFfiError {
    if out.is_null() {
        return SignalFfiError::null_parameter("out");
    }
    unsafe { out.write(Box::into_raw(Box::new(value))) };
    ptr::null_mut()
}

unsafe fn write_value<T>(out: *mut T, value: T) -> *mut SignalFfiError {
    if out.is_null() {
        return SignalFfiError::null_parameter("out");
    }
    unsafe { out.write(value) };
    ptr::null_mut()
}

fn record_error(err: RecordError) -> *mut SignalFfiError {
    SignalFfiError::raise(SignalErrorCode::ProtobufError, err.to_string())
}

fn key_error(err: CurveError) -> *mut SignalFfiError {
    SignalFfiError::raise(SignalErrorCode::InvalidKey, err.to_string())
}

// --- private keys ---

/// Allocates a fresh private key from the operating system RNG.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_privatekey_generate(
    out: *mut *mut PrivateKey,
) -> *mut SignalFfiError {
    let key = PrivateKey::generate(&mut OsRng.unwrap_err());
    unsafe { write_handle(out, key) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_privatekey_deserialize(
    out: *mut *mut PrivateKey,
    data: SignalBorrowedBuffer,
) -> *mut SignalFfiError {
    match PrivateKey::deserialize(unsafe { data.as_slice() }) {
        Ok(key) => unsafe { write_handle(out, key) },
        Err(err) => key_error(err),
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_privatekey_serialize(
    out: *mut SignalOwnedBuffer,
    key: *const PrivateKey,
) -> *mut SignalFfiError {
    let Some(key) = (unsafe { key.as_ref() }) else {
        return SignalFfiError::null_parameter("key");
    };
    unsafe { write_value(out, SignalOwnedBuffer::from_vec(key.serialize())) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_privatekey_get_public_key(
    out: *mut *mut PublicKey,
    key: *const PrivateKey,
) -> *mut SignalFfiError {
    let Some(key) = (unsafe { key.as_ref() }) else {
        return SignalFfiError::null_parameter("key");
    };
    unsafe { write_handle(out, key.public_key()) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_privatekey_clone(
    out: *mut *mut PrivateKey,
    key: *const PrivateKey,
) -> *mut SignalFfiError {
    let Some(key) = (unsafe { key.as_ref() }) else {
        return SignalFfiError::null_parameter("key");
    };
    unsafe { write_handle(out, key.clone()) }
}

/// Releases a private key. Must be called at most once per handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_privatekey_destroy(key: *mut PrivateKey) -> *mut SignalFfiError {
    if !key.is_null() {
        drop(unsafe { Box::from_raw(key) });
    }
    ptr::null_mut()
}

// --- public keys ---

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_publickey_deserialize(
    out: *mut *mut PublicKey,
    data: SignalBorrowedBuffer,
) -> *mut SignalFfiError {
    match PublicKey::deserialize(unsafe { data.as_slice() }) {
        Ok(key) => unsafe { write_handle(out, key) },
        Err(err) => key_error(err),
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_publickey_serialize(
    out: *mut SignalOwnedBuffer,
    key: *const PublicKey,
) -> *mut SignalFfiError {
    let Some(key) = (unsafe { key.as_ref() }) else {
        return SignalFfiError::null_parameter("key");
    };
    unsafe { write_value(out, SignalOwnedBuffer::from_vec(key.serialize())) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_publickey_clone(
    out: *mut *mut PublicKey,
    key: *const PublicKey,
) -> *mut SignalFfiError {
    let Some(key) = (unsafe { key.as_ref() }) else {
        return SignalFfiError::null_parameter("key");
    };
    unsafe { write_handle(out, key.clone()) }
}

/// Releases a public key. Must be called at most once per handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_publickey_destroy(key: *mut PublicKey) -> *mut SignalFfiError {
    if !key.is_null() {
        drop(unsafe { Box::from_raw(key) });
    }
    ptr::null_mut()
}

// --- signed prekey records ---

/// Allocates a record combining all fields. `timestamp` is epoch
/// milliseconds.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_new(
    out: *mut *mut SignedPreKeyRecord,
    id: u32,
    timestamp: u64,
    public_key: *const PublicKey,
    private_key: *const PrivateKey,
    signature: SignalBorrowedBuffer,
) -> *mut SignalFfiError {
    let Some(public_key) = (unsafe { public_key.as_ref() }) else {
        return SignalFfiError::null_parameter("public_key");
    };
    let Some(private_key) = (unsafe { private_key.as_ref() }) else {
        return SignalFfiError::null_parameter("private_key");
    };
    let key_pair = KeyPair::new(public_key.clone(), private_key.clone());
    let signature = unsafe { signature.as_slice() }.to_vec();
    unsafe {
        write_handle(
            out,
            SignedPreKeyRecord::new(id, timestamp, key_pair, signature),
        )
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_deserialize(
    out: *mut *mut SignedPreKeyRecord,
    data: SignalBorrowedBuffer,
) -> *mut SignalFfiError {
    match SignedPreKeyRecord::deserialize(unsafe { data.as_slice() }) {
        Ok(record) => unsafe { write_handle(out, record) },
        Err(err) => record_error(err),
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_clone(
    out: *mut *mut SignedPreKeyRecord,
    record: *const SignedPreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_handle(out, record.clone()) }
}

/// Releases a record. Must be called at most once per handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_destroy(
    record: *mut SignedPreKeyRecord,
) -> *mut SignalFfiError {
    if !record.is_null() {
        drop(unsafe { Box::from_raw(record) });
    }
    ptr::null_mut()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_serialize(
    out: *mut SignalOwnedBuffer,
    record: *const SignedPreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_value(out, SignalOwnedBuffer::from_vec(record.serialize())) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_get_signature(
    out: *mut SignalOwnedBuffer,
    record: *const SignedPreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe {
        write_value(
            out,
            SignalOwnedBuffer::from_vec(record.signature().to_vec()),
        )
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_get_id(
    out: *mut u32,
    record: *const SignedPreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_value(out, record.id()) }
}

/// Writes the record's creation time as epoch milliseconds.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_get_timestamp(
    out: *mut u64,
    record: *const SignedPreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_value(out, record.timestamp()) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_get_public_key(
    out: *mut *mut PublicKey,
    record: *const SignedPreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_handle(out, record.key_pair().public_key.clone()) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_signed_pre_key_record_get_private_key(
    out: *mut *mut PrivateKey,
    record: *const SignedPreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_handle(out, record.key_pair().private_key.clone()) }
}

// --- prekey records ---

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_pre_key_record_new(
    out: *mut *mut PreKeyRecord,
    id: u32,
    public_key: *const PublicKey,
    private_key: *const PrivateKey,
) -> *mut SignalFfiError {
    let Some(public_key) = (unsafe { public_key.as_ref() }) else {
        return SignalFfiError::null_parameter("public_key");
    };
    let Some(private_key) = (unsafe { private_key.as_ref() }) else {
        return SignalFfiError::null_parameter("private_key");
    };
    let key_pair = KeyPair::new(public_key.clone(), private_key.clone());
    unsafe { write_handle(out, PreKeyRecord::new(id, key_pair)) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_pre_key_record_deserialize(
    out: *mut *mut PreKeyRecord,
    data: SignalBorrowedBuffer,
) -> *mut SignalFfiError {
    match PreKeyRecord::deserialize(unsafe { data.as_slice() }) {
        Ok(record) => unsafe { write_handle(out, record) },
        Err(err) => record_error(err),
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_pre_key_record_clone(
    out: *mut *mut PreKeyRecord,
    record: *const PreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_handle(out, record.clone()) }
}

/// Releases a record. Must be called at most once per handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_pre_key_record_destroy(
    record: *mut PreKeyRecord,
) -> *mut SignalFfiError {
    if !record.is_null() {
        drop(unsafe { Box::from_raw(record) });
    }
    ptr::null_mut()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_pre_key_record_serialize(
    out: *mut SignalOwnedBuffer,
    record: *const PreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_value(out, SignalOwnedBuffer::from_vec(record.serialize())) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_pre_key_record_get_id(
    out: *mut u32,
    record: *const PreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_value(out, record.id()) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_pre_key_record_get_public_key(
    out: *mut *mut PublicKey,
    record: *const PreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_handle(out, record.key_pair().public_key.clone()) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn signal_pre_key_record_get_private_key(
    out: *mut *mut PrivateKey,
    record: *const PreKeyRecord,
) -> *mut SignalFfiError {
    let Some(record) = (unsafe { record.as_ref() }) else {
        return SignalFfiError::null_parameter("record");
    };
    unsafe { write_handle(out, record.key_pair().private_key.clone()) }
}
