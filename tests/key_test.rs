use libsignal_native::{PrivateKey, PublicKey, SignalError};

#[test]
fn keys_round_trip_through_serialization() {
    let private_key = PrivateKey::generate().unwrap();
    let public_key = private_key.public_key().unwrap();

    let public_bytes = public_key.serialize().unwrap();
    assert_eq!(public_bytes.len(), 33);
    assert_eq!(public_bytes[0], 0x05);
    let restored = PublicKey::deserialize(&public_bytes).unwrap();
    assert_eq!(restored.serialize().unwrap(), public_bytes);

    let private_bytes = private_key.serialize().unwrap();
    assert_eq!(private_bytes.len(), 32);
    let restored = PrivateKey::deserialize(&private_bytes).unwrap();
    assert_eq!(
        restored.public_key().unwrap().serialize().unwrap(),
        public_bytes
    );
}

#[test]
fn derived_public_key_is_stable() {
    let private_key = PrivateKey::generate().unwrap();
    assert_eq!(
        private_key.public_key().unwrap().serialize().unwrap(),
        private_key.public_key().unwrap().serialize().unwrap()
    );
}

#[test]
fn cloned_keys_outlive_their_source() {
    let private_key = PrivateKey::generate().unwrap();
    let clone = private_key.try_clone().unwrap();
    let expected = private_key.serialize().unwrap();
    drop(private_key);
    assert_eq!(clone.serialize().unwrap(), expected);
}

#[test]
fn malformed_key_bytes_surface_native_context() {
    // Wrong type byte.
    let mut bytes = vec![0x04];
    bytes.extend_from_slice(&[0u8; 32]);
    let err = PublicKey::deserialize(&bytes).unwrap_err();
    match err {
        SignalError::Deserialization { code, message } => {
            assert_ne!(code, 0);
            assert!(message.contains("bad key type"));
        }
        other => panic!("expected a deserialization error, got {other}"),
    }

    // Wrong length.
    assert!(matches!(
        PrivateKey::deserialize(&[1, 2, 3]),
        Err(SignalError::Deserialization { .. })
    ));
}

#[test]
fn ownership_transfer_round_trips() {
    let private_key = PrivateKey::generate().unwrap();
    let expected = private_key.serialize().unwrap();

    let raw = private_key.into_raw();
    let adopted = unsafe { PrivateKey::from_raw(raw) }.unwrap();
    assert_eq!(adopted.serialize().unwrap(), expected);

    let err = unsafe { PublicKey::from_raw(std::ptr::null_mut()) }.unwrap_err();
    assert!(matches!(err, SignalError::NullHandle));
}
