use prost::Message;

// Storage structures matching libsignal's record encodings. The wire layout
// is the round-trip contract of the serialize/deserialize entry points.

#[derive(Clone, Message)]
pub struct SignedPreKeyRecordStructure {
    #[prost(uint32, optional, tag = "1")]
    pub id: Option<u32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub public_key: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub private_key: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub signature: Option<Vec<u8>>,
    // Epoch milliseconds.
    #[prost(uint64, optional, tag = "5")]
    pub timestamp: Option<u64>,
}

#[derive(Clone, Message)]
pub struct PreKeyRecordStructure {
    #[prost(uint32, optional, tag = "1")]
    pub id: Option<u32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub public_key: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub private_key: Option<Vec<u8>>,
}
