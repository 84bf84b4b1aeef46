use soroban_sdk::{contracttype, BytesN};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Bridge,
    Signers,
    IsSigner(BytesN<32>),
    SignaturesRequired,
    Operation(BytesN<32>),
    Votes(BytesN<32>),
}

/// Discriminates governed actions. The discriminant is folded into the
/// operation key, so add and remove rounds for the same target never merge.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum OpType {
    AddSigner = 0,
    RemoveSigner = 1,
    IncreaseCap = 2,
    SetPermissions = 3,
}

/// An in-flight operation, keyed by the hash of its type and parameters.
/// The voter set lives separately under `DataKey::Votes` and is only
/// queryable per address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Operation {
    pub op_type: OpType,
    pub target: Option<BytesN<32>>,
    pub vote_count: u32,
}
