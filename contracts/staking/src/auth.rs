//! Who may modify a locking position.
//!
//! Two disjoint grants exist:
//! - a delegate-created position is controlled by its delegate creator alone,
//!   even after the ownership token changes hands;
//! - a directly-created position (creator == the engine) follows the current
//!   owner as reported by the registry.

use locking_registry::{LockingPosition, LockingRegistryClient};
use soroban_sdk::{Address, Env};

use crate::creators;

/// Evaluate the dual authorization rule for `caller` against `lock_id`.
pub fn can_modify(env: &Env, caller: &Address, lock_id: u64, position: &LockingPosition) -> bool {
    // Delegate branch: allow-listed creator acting on its own position.
    if creators::is_allowed(env, caller) && position.creator == *caller {
        return true;
    }

    // Direct branch: current registry owner of an engine-created position.
    if position.creator != env.current_contract_address() {
        return false;
    }
    let registry: Address = match crate::read_registry(env) {
        Ok(addr) => addr,
        Err(_) => return false,
    };
    match LockingRegistryClient::new(env, &registry).try_owner_of(&lock_id) {
        Ok(Ok(owner)) => owner == *caller,
        _ => false,
    }
}
