use soroban_sdk::{symbol_short, BytesN, Env};

pub(crate) fn signer_added(env: &Env, signer: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("signer"), symbol_short!("added")), signer.clone());
}

pub(crate) fn signer_removed(env: &Env, signer: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("signer"), symbol_short!("removed")), signer.clone());
}
