use soroban_sdk::{contractclient, Env};

/// The external bridge capability the governor administers. The governor
/// invokes an entry point once the matching proposal reaches quorum and
/// treats the returned status code as opaque.
#[contractclient(name = "BridgeClient")]
pub trait Bridge {
    fn increase_cap(env: Env, amount: i128) -> u32;

    fn set_permissions(env: Env, request_enabled: bool, release_enabled: bool) -> u32;
}
