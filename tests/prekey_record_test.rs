use libsignal_native::{PreKeyRecord, PrivateKey, SignalError};

#[test]
fn round_trips_through_serialization() {
    let private_key = PrivateKey::generate().unwrap();
    let public_key = private_key.public_key().unwrap();

    let record = PreKeyRecord::new(11, &public_key, &private_key).unwrap();
    assert_eq!(record.id().unwrap(), 11);

    let restored = PreKeyRecord::deserialize(&record.serialize().unwrap()).unwrap();
    assert_eq!(restored.id().unwrap(), 11);
    assert_eq!(
        restored.public_key().unwrap().serialize().unwrap(),
        public_key.serialize().unwrap()
    );
    assert_eq!(
        restored.private_key().unwrap().serialize().unwrap(),
        private_key.serialize().unwrap()
    );
}

#[test]
fn clone_survives_destroying_the_original() {
    let private_key = PrivateKey::generate().unwrap();
    let public_key = private_key.public_key().unwrap();

    let record = PreKeyRecord::new(5, &public_key, &private_key).unwrap();
    let clone = record.try_clone().unwrap();
    drop(record);

    assert_eq!(clone.id().unwrap(), 5);
    assert_eq!(
        clone.public_key().unwrap().serialize().unwrap(),
        public_key.serialize().unwrap()
    );
}

#[test]
fn malformed_bytes_fail_to_deserialize() {
    assert!(matches!(
        PreKeyRecord::deserialize(&[0xff, 0xff, 0xff]),
        Err(SignalError::Deserialization { .. })
    ));
}

#[test]
fn ownership_transfer_round_trips() {
    let private_key = PrivateKey::generate().unwrap();
    let public_key = private_key.public_key().unwrap();

    let record = PreKeyRecord::new(2, &public_key, &private_key).unwrap();
    let raw = record.into_raw();
    let adopted = unsafe { PreKeyRecord::from_raw(raw) }.unwrap();
    assert_eq!(adopted.id().unwrap(), 2);
}
