use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Bytes, BytesN, Env, Vec};

use crate::bridge::BridgeClient;
use crate::errors::GovernorError;
use crate::events;
use crate::types::{DataKey, OpType, Operation};

// The signer set may never shrink below this size.
pub const MIN_SIGNERS: u32 = 3;

#[contract]
pub struct BridgeGovernor;

#[contractimpl]
impl BridgeGovernor {
    pub fn initialize(
        env: Env,
        initial_signers: Vec<BytesN<32>>,
        creator: BytesN<32>,
        bridge: Address,
    ) {
        if env.storage().instance().has(&DataKey::Owner) {
            panic_with_error!(&env, GovernorError::AlreadyInitialized);
        }

        if initial_signers.len() < MIN_SIGNERS {
            panic_with_error!(&env, GovernorError::TooFewSigners);
        }

        let zero = Self::zero_principal(&env);
        for signer in initial_signers.iter() {
            if signer == zero || signer == creator {
                panic_with_error!(&env, GovernorError::InvalidSigner);
            }
        }

        env.storage().instance().set(&DataKey::Owner, &creator);
        env.storage().instance().set(&DataKey::Bridge, &bridge);

        // Duplicate entries are not rejected: each one occupies a slot in
        // the backing sequence while overwriting the same membership flag,
        // and the initial quorum counts both slots.
        let mut signers: Vec<BytesN<32>> = Vec::new(&env);
        for signer in initial_signers.iter() {
            signers.push_back(signer.clone());
            env.storage().instance().set(&DataKey::IsSigner(signer), &true);
        }
        env.storage().instance().set(&DataKey::Signers, &signers);
        Self::recompute_quorum(&env, signers.len());
    }

    // The vote that reaches quorum applies the change in the same call.
    pub fn add_signer(env: Env, caller: BytesN<32>, target: BytesN<32>) {
        Self::require_initialized(&env);
        Self::require_signer(&env, &caller);
        Self::require_valid_target(&env, &target);

        if Self::signer_flag(&env, &target) {
            panic_with_error!(&env, GovernorError::AlreadySigner);
        }

        let key = Self::add_signer_key(env.clone(), target.clone());
        if Self::record_vote(&env, &key, &caller, OpType::AddSigner, Some(target.clone())) {
            let mut signers = Self::signer_list(&env);
            signers.push_back(target.clone());
            env.storage().instance().set(&DataKey::Signers, &signers);
            env.storage()
                .instance()
                .set(&DataKey::IsSigner(target.clone()), &true);
            Self::recompute_quorum(&env, signers.len());
            events::signer_added(&env, &target);
        }
    }

    // Fails on every vote, not just the triggering one, if removal would
    // breach the floor.
    pub fn remove_signer(env: Env, caller: BytesN<32>, target: BytesN<32>) {
        Self::require_initialized(&env);
        Self::require_signer(&env, &caller);
        Self::require_valid_target(&env, &target);

        if !Self::signer_flag(&env, &target) {
            panic_with_error!(&env, GovernorError::NotASigner);
        }

        if Self::signer_list(&env).len() <= MIN_SIGNERS {
            panic_with_error!(&env, GovernorError::TooFewSigners);
        }

        let key = Self::remove_signer_key(env.clone(), target.clone());
        if Self::record_vote(&env, &key, &caller, OpType::RemoveSigner, Some(target.clone())) {
            env.storage()
                .instance()
                .remove(&DataKey::IsSigner(target.clone()));

            // Swap the last entry into the vacated slot; signer ordering is
            // not part of the contract surface.
            let mut signers = Self::signer_list(&env);
            if let Some(idx) = signers.first_index_of(target.clone()) {
                let last = signers.get_unchecked(signers.len() - 1);
                signers.set(idx, last);
                signers.pop_back_unchecked();
            }
            env.storage().instance().set(&DataKey::Signers, &signers);
            Self::recompute_quorum(&env, signers.len());
            events::signer_removed(&env, &target);
        }
    }

    pub fn increase_cap(env: Env, caller: BytesN<32>, amount: i128) {
        Self::require_initialized(&env);
        Self::require_signer(&env, &caller);

        let key = Self::increase_cap_key(env.clone(), amount);
        if Self::record_vote(&env, &key, &caller, OpType::IncreaseCap, None) {
            // The bridge's status code is its own concern.
            let _ = BridgeClient::new(&env, &Self::bridge(env.clone())).increase_cap(&amount);
        }
    }

    pub fn set_permissions(
        env: Env,
        caller: BytesN<32>,
        request_enabled: bool,
        release_enabled: bool,
    ) {
        Self::require_initialized(&env);
        Self::require_signer(&env, &caller);

        let key = Self::set_permissions_key(env.clone(), request_enabled, release_enabled);
        if Self::record_vote(&env, &key, &caller, OpType::SetPermissions, None) {
            let _ = BridgeClient::new(&env, &Self::bridge(env.clone()))
                .set_permissions(&request_enabled, &release_enabled);
        }
    }

    // Strict majority of the current signer count.
    pub fn required_signatures(count: u32) -> u32 {
        count / 2 + 1
    }

    // Operation keys

    pub fn add_signer_key(env: Env, target: BytesN<32>) -> BytesN<32> {
        let payload = Bytes::from_array(&env, &target.to_array());
        Self::operation_key(&env, OpType::AddSigner, &payload)
    }

    pub fn remove_signer_key(env: Env, target: BytesN<32>) -> BytesN<32> {
        let payload = Bytes::from_array(&env, &target.to_array());
        Self::operation_key(&env, OpType::RemoveSigner, &payload)
    }

    pub fn increase_cap_key(env: Env, amount: i128) -> BytesN<32> {
        let payload = Bytes::from_array(&env, &amount.to_be_bytes());
        Self::operation_key(&env, OpType::IncreaseCap, &payload)
    }

    pub fn set_permissions_key(
        env: Env,
        request_enabled: bool,
        release_enabled: bool,
    ) -> BytesN<32> {
        let payload = Bytes::from_array(&env, &[request_enabled as u8, release_enabled as u8]);
        Self::operation_key(&env, OpType::SetPermissions, &payload)
    }

    // Read surface

    pub fn owner(env: Env) -> BytesN<32> {
        Self::require_initialized(&env);
        env.storage().instance().get(&DataKey::Owner).unwrap()
    }

    pub fn bridge(env: Env) -> Address {
        Self::require_initialized(&env);
        env.storage().instance().get(&DataKey::Bridge).unwrap()
    }

    pub fn min_signers() -> u32 {
        MIN_SIGNERS
    }

    pub fn signatures_required(env: Env) -> u32 {
        Self::require_initialized(&env);
        env.storage()
            .instance()
            .get(&DataKey::SignaturesRequired)
            .unwrap()
    }

    pub fn signer_count(env: Env) -> u32 {
        Self::require_initialized(&env);
        Self::signer_list(&env).len()
    }

    pub fn get_signers(env: Env) -> Vec<BytesN<32>> {
        Self::require_initialized(&env);
        Self::signer_list(&env)
    }

    pub fn is_signer(env: Env, signer: BytesN<32>) -> bool {
        Self::require_initialized(&env);
        Self::signer_flag(&env, &signer)
    }

    pub fn get_operation(env: Env, key: BytesN<32>) -> Option<Operation> {
        Self::require_initialized(&env);
        env.storage().instance().get(&DataKey::Operation(key))
    }

    pub fn vote_count(env: Env, key: BytesN<32>) -> u32 {
        Self::require_initialized(&env);
        env.storage()
            .instance()
            .get(&DataKey::Operation(key))
            .map(|op: Operation| op.vote_count)
            .unwrap_or(0)
    }

    pub fn voted_for(env: Env, key: BytesN<32>, signer: BytesN<32>) -> bool {
        Self::require_initialized(&env);
        let voters: Vec<BytesN<32>> = env
            .storage()
            .instance()
            .get(&DataKey::Votes(key))
            .unwrap_or(Vec::new(&env));
        voters.contains(&signer)
    }

    // Internals

    // Merges the caller's vote into the round identified by `key`. Returns
    // true when the live quorum is met, in which case the ledger entry is
    // purged and the caller applies the effect in the same invocation.
    fn record_vote(
        env: &Env,
        key: &BytesN<32>,
        caller: &BytesN<32>,
        op_type: OpType,
        target: Option<BytesN<32>>,
    ) -> bool {
        let mut op: Operation = env
            .storage()
            .instance()
            .get(&DataKey::Operation(key.clone()))
            .unwrap_or(Operation {
                op_type,
                target,
                vote_count: 0,
            });

        let mut voters: Vec<BytesN<32>> = env
            .storage()
            .instance()
            .get(&DataKey::Votes(key.clone()))
            .unwrap_or(Vec::new(env));

        if voters.contains(caller) {
            panic_with_error!(env, GovernorError::AlreadyVoted);
        }

        voters.push_back(caller.clone());
        op.vote_count += 1;

        // Always the live threshold, never one snapshotted at round start:
        // a membership change completing mid-round moves the bar for every
        // pending operation, detected on its next incoming vote.
        let required: u32 = env
            .storage()
            .instance()
            .get(&DataKey::SignaturesRequired)
            .unwrap();

        if op.vote_count >= required {
            env.storage()
                .instance()
                .remove(&DataKey::Operation(key.clone()));
            env.storage().instance().remove(&DataKey::Votes(key.clone()));
            true
        } else {
            env.storage()
                .instance()
                .set(&DataKey::Operation(key.clone()), &op);
            env.storage()
                .instance()
                .set(&DataKey::Votes(key.clone()), &voters);
            false
        }
    }

    fn operation_key(env: &Env, op_type: OpType, payload: &Bytes) -> BytesN<32> {
        let mut data = Bytes::new(env);
        data.push_back(op_type as u8);
        data.append(payload);
        env.crypto().sha256(&data).to_bytes()
    }

    fn recompute_quorum(env: &Env, signer_count: u32) {
        env.storage().instance().set(
            &DataKey::SignaturesRequired,
            &Self::required_signatures(signer_count),
        );
    }

    fn require_initialized(env: &Env) {
        if !env.storage().instance().has(&DataKey::Owner) {
            panic_with_error!(env, GovernorError::NotInitialized);
        }
    }

    fn require_signer(env: &Env, caller: &BytesN<32>) {
        if !Self::signer_flag(env, caller) {
            panic_with_error!(env, GovernorError::Unauthorized);
        }
    }

    fn require_valid_target(env: &Env, target: &BytesN<32>) {
        let owner: BytesN<32> = env.storage().instance().get(&DataKey::Owner).unwrap();
        if *target == Self::zero_principal(env) || *target == owner {
            panic_with_error!(env, GovernorError::InvalidSigner);
        }
    }

    fn signer_flag(env: &Env, signer: &BytesN<32>) -> bool {
        env.storage()
            .instance()
            .has(&DataKey::IsSigner(signer.clone()))
    }

    fn signer_list(env: &Env) -> Vec<BytesN<32>> {
        env.storage().instance().get(&DataKey::Signers).unwrap()
    }

    fn zero_principal(env: &Env) -> BytesN<32> {
        BytesN::from_array(env, &[0u8; 32])
    }
}
