use chrono::{DateTime, Utc};
use libsignal_native::{PrivateKey, PublicKey, SignalError, SignedPreKeyRecord};

fn key_pair() -> (PublicKey, PrivateKey) {
    let private_key = PrivateKey::generate().expect("generate private key");
    let public_key = private_key.public_key().expect("derive public key");
    (public_key, private_key)
}

fn serialized(key: &PublicKey) -> Vec<u8> {
    key.serialize().expect("serialize public key")
}

#[test]
fn end_to_end_example() {
    let (public_key, private_key) = key_pair();
    let timestamp: DateTime<Utc> = "2023-01-01T00:00:00.500Z".parse().unwrap();

    let record =
        SignedPreKeyRecord::new(42, timestamp, &public_key, &private_key, &[0x01, 0x02, 0x03])
            .expect("construct record");
    assert_eq!(record.id().unwrap(), 42);
    assert_eq!(record.timestamp().unwrap(), timestamp);
    assert_eq!(record.signature().unwrap(), vec![0x01, 0x02, 0x03]);

    let restored = SignedPreKeyRecord::deserialize(&record.serialize().unwrap())
        .expect("deserialize record");
    assert_eq!(restored.id().unwrap(), 42);
    assert_eq!(restored.timestamp().unwrap(), timestamp);
    assert_eq!(restored.signature().unwrap(), vec![0x01, 0x02, 0x03]);
    assert_eq!(
        serialized(&restored.public_key().unwrap()),
        serialized(&public_key)
    );
}

#[test]
fn round_trip_preserves_every_field() {
    let (public_key, private_key) = key_pair();
    let timestamp = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
    let signature = vec![0xab; 64];

    let record =
        SignedPreKeyRecord::new(7, timestamp, &public_key, &private_key, &signature).unwrap();
    let restored = SignedPreKeyRecord::deserialize(&record.serialize().unwrap()).unwrap();

    assert_eq!(restored.id().unwrap(), record.id().unwrap());
    assert_eq!(restored.timestamp().unwrap(), record.timestamp().unwrap());
    assert_eq!(restored.signature().unwrap(), record.signature().unwrap());
    assert_eq!(
        serialized(&restored.public_key().unwrap()),
        serialized(&record.public_key().unwrap())
    );
    assert_eq!(
        restored.private_key().unwrap().serialize().unwrap(),
        record.private_key().unwrap().serialize().unwrap()
    );
}

#[test]
fn clone_is_independent_of_the_original() {
    let (public_key, private_key) = key_pair();
    let timestamp = DateTime::from_timestamp_millis(1_000).unwrap();
    let record =
        SignedPreKeyRecord::new(3, timestamp, &public_key, &private_key, &[9, 9, 9]).unwrap();

    let clone = record.try_clone().unwrap();
    assert_eq!(clone.id().unwrap(), record.id().unwrap());
    assert_eq!(clone.timestamp().unwrap(), record.timestamp().unwrap());
    assert_eq!(clone.signature().unwrap(), record.signature().unwrap());

    // Destroying the clone must leave the original fully usable.
    drop(clone);
    assert_eq!(record.id().unwrap(), 3);
    assert_eq!(record.signature().unwrap(), vec![9, 9, 9]);
}

#[test]
fn derivation_from_private_key_matches_explicit_construction() {
    let (public_key, private_key) = key_pair();
    let timestamp = DateTime::from_timestamp_millis(555).unwrap();

    let derived =
        SignedPreKeyRecord::from_private_key(21, timestamp, &private_key, &[4, 5]).unwrap();
    let explicit =
        SignedPreKeyRecord::new(21, timestamp, &public_key, &private_key, &[4, 5]).unwrap();

    assert_eq!(
        serialized(&derived.public_key().unwrap()),
        serialized(&private_key.public_key().unwrap())
    );
    assert_eq!(derived.id().unwrap(), explicit.id().unwrap());
    assert_eq!(derived.timestamp().unwrap(), explicit.timestamp().unwrap());
    assert_eq!(derived.signature().unwrap(), explicit.signature().unwrap());
    assert_eq!(derived.serialize().unwrap(), explicit.serialize().unwrap());
}

#[test]
fn timestamp_truncates_to_milliseconds() {
    let (public_key, private_key) = key_pair();

    // 999,999,999ns into the last second of the year: must floor to .999,
    // never round up into the next second.
    let timestamp = DateTime::from_timestamp(1_672_531_199, 999_999_999).unwrap();
    let record = SignedPreKeyRecord::new(1, timestamp, &public_key, &private_key, &[1]).unwrap();
    assert_eq!(
        record.timestamp().unwrap(),
        DateTime::from_timestamp_millis(1_672_531_199_999).unwrap()
    );

    // A value already on a millisecond boundary reads back unchanged.
    let exact = DateTime::from_timestamp_millis(1_672_531_200_500).unwrap();
    let record = SignedPreKeyRecord::new(2, exact, &public_key, &private_key, &[1]).unwrap();
    assert_eq!(record.timestamp().unwrap(), exact);
}

#[test]
fn malformed_bytes_fail_to_deserialize() {
    let err = SignedPreKeyRecord::deserialize(&[0xde, 0xad, 0xbe, 0xef]).unwrap_err();
    match err {
        SignalError::Deserialization { code, message } => {
            assert_ne!(code, 0);
            assert!(!message.is_empty());
        }
        other => panic!("expected a deserialization error, got {other}"),
    }

    // An empty payload decodes as a structure with no fields, which is
    // still not a record.
    assert!(matches!(
        SignedPreKeyRecord::deserialize(&[]),
        Err(SignalError::Deserialization { .. })
    ));
}

#[test]
fn ownership_transfer_round_trips() {
    let (public_key, private_key) = key_pair();
    let timestamp = DateTime::from_timestamp_millis(42).unwrap();
    let record =
        SignedPreKeyRecord::new(8, timestamp, &public_key, &private_key, &[7]).unwrap();

    // Ownership leaves the wrapper, crosses as a raw pointer, and is
    // re-adopted; exactly one destroy runs, at the end of this scope.
    let raw = record.into_raw();
    let adopted = unsafe { SignedPreKeyRecord::from_raw(raw) }.unwrap();
    assert_eq!(adopted.id().unwrap(), 8);
    assert_eq!(adopted.signature().unwrap(), vec![7]);
}

#[test]
fn from_raw_rejects_null() {
    let err = unsafe { SignedPreKeyRecord::from_raw(std::ptr::null_mut()) }.unwrap_err();
    assert!(matches!(err, SignalError::NullHandle));
}
