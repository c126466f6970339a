//! Safe handles over the `signal_ffi` key-record resources.
//!
//! Every wrapper type owns exactly one native allocation. Dropping the
//! wrapper destroys the allocation; duplication goes through the native
//! clone entry points (`try_clone`); `into_raw`/`from_raw` transfer
//! ownership across the boundary without destroying. Use-after-destroy and
//! double-free are rejected at compile time by move semantics.

pub mod curve;
pub mod error;
pub mod state;

mod ffi;
mod handle;

pub use curve::{PrivateKey, PublicKey};
pub use error::SignalError;
pub use state::prekey_record::PreKeyRecord;
pub use state::signed_prekey_record::SignedPreKeyRecord;
