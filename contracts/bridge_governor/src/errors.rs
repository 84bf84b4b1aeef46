use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GovernorError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidSigner = 4,
    AlreadySigner = 5,
    NotASigner = 6,
    TooFewSigners = 7,
    AlreadyVoted = 8,
}
