#![no_std]

mod bridge;
mod errors;
mod events;
mod governor;
mod types;


pub use crate::bridge::{Bridge, BridgeClient};
pub use crate::errors::GovernorError;
pub use crate::governor::{BridgeGovernor, BridgeGovernorClient, MIN_SIGNERS};
pub use crate::types::{DataKey, OpType, Operation};
