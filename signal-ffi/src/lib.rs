//! Native side of the key-record boundary, exposed through C-ABI entry
//! points (`signal_*`).
//!
//! Every fallible entry point returns `*mut SignalFfiError` (null means
//! success) and writes its result through an out-pointer. Handle types are
//! opaque to callers and cross the boundary only as raw pointers; byte
//! payloads cross as [`SignalBorrowedBuffer`] (caller-owned input) or
//! [`SignalOwnedBuffer`] (callee-allocated output, released with
//! [`signal_free_buffer`]).

pub mod buffer;
pub mod curve;
pub mod error;
pub mod record;

mod api;
mod proto;

pub use api::*;
pub use buffer::{SignalBorrowedBuffer, SignalOwnedBuffer, signal_free_buffer};
pub use error::{
    SignalErrorCode, SignalFfiError, signal_error_free, signal_error_get_message,
    signal_error_get_type,
};

/// Opaque handle names as they appear in the C interface.
pub type SignalPublicKey = curve::PublicKey;
pub type SignalPrivateKey = curve::PrivateKey;
pub type SignalPreKeyRecord = record::PreKeyRecord;
pub type SignalSignedPreKeyRecord = record::SignedPreKeyRecord;
