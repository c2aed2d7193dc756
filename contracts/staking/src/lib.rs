#![no_std]

//! Token locking and voting-power engine.
//!
//! Users lock stake tokens for 14–730 days against a position held in the
//! external [`locking_registry`] contract, may pause and resume the countdown,
//! add to the locked amount, extend the duration, and exit early through a
//! penalized fast unlock.  Positions are created either directly by their
//! owner or by an allow-listed delegate contract, and the two kinds follow
//! different modification rules (see [`auth`]).

pub mod auth;
pub mod creators;
pub mod events;
pub mod reward_math;

use locking_registry::{LockingPosition, LockingRegistryClient};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

use reward_math::{
    FAST_UNLOCK_DURATION, MAX_LOCKING_DURATION, MIN_LOCKING_AMOUNT, MIN_LOCKING_DURATION,
};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const TREASURY: Symbol = symbol_short!("TREASURY");
const EMERGENCY_EXIT: Symbol = symbol_short!("EMRG_EXIT");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidArgument = 4,
    NotFound = 5,
    /// The requested transition would break the position state machine:
    /// unlock before maturity or while paused, pause of an already-paused or
    /// expired position, resume of a live one, a duration pushed past the
    /// 730-day maximum, or a fast unlock with three or fewer days remaining.
    InvariantViolation = 6,
    TransferFailed = 7,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingEngine;

#[contractimpl]
impl StakingEngine {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the engine.
    ///
    /// * `stake_token` – SAC address of the token users lock.
    ///
    /// The registry and treasury collaborators are bound afterwards via
    /// `initialize_locking_position` and `initialize_dao_treasury`.
    pub fn initialize(env: Env, admin: Address, stake_token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        // EMERGENCY_EXIT starts false; unwrap_or(false) handles the absent key.

        events::publish_initialized(&env, admin, stake_token);

        Ok(())
    }

    /// One-time binding of the locking-position registry collaborator.
    pub fn initialize_locking_position(
        env: Env,
        caller: Address,
        registry: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if env.storage().instance().has(&REGISTRY) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&REGISTRY, &registry);

        events::publish_registry_set(&env, registry);

        Ok(())
    }

    /// One-time binding of the DAO treasury that receives penalties from
    /// directly-created positions.
    pub fn initialize_dao_treasury(
        env: Env,
        caller: Address,
        treasury: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if env.storage().instance().has(&TREASURY) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&TREASURY, &treasury);

        events::publish_treasury_set(&env, treasury);

        Ok(())
    }

    // ── Locking ─────────────────────────────────────────────────────────────

    /// Lock `amount` tokens for `owner` over `duration_days`.
    ///
    /// When `caller` is an allow-listed delegate it becomes the position's
    /// creator and may lock on behalf of any owner; otherwise the caller must
    /// be the owner and the engine itself is recorded as creator.  Tokens are
    /// pulled from the caller.
    pub fn lock_amount(
        env: Env,
        caller: Address,
        owner: Address,
        amount: i128,
        duration_days: u64,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if amount < MIN_LOCKING_AMOUNT {
            return Err(ContractError::InvalidArgument);
        }
        if !(MIN_LOCKING_DURATION..=MAX_LOCKING_DURATION).contains(&duration_days) {
            return Err(ContractError::InvalidArgument);
        }

        let creator = if creators::is_allowed(&env, &caller) {
            caller.clone()
        } else {
            if caller != owner {
                return Err(ContractError::Unauthorized);
            }
            env.current_contract_address()
        };

        let registry = read_registry(&env)?;

        // Pull tokens from the caller into the engine.
        Self::transfer_in(&env, &caller, amount)?;
        let lock_id = LockingRegistryClient::new(&env, &registry).create_locking_position(
            &creator,
            &owner,
            &amount,
            &duration_days,
        );

        events::publish_amount_locked(&env, lock_id, owner, amount, duration_days);

        Ok(lock_id)
    }

    /// Add `delta` tokens to an existing position.
    ///
    /// Disallowed once fewer than 14 days remain, so reward weighting cannot
    /// be gamed right before unlock.  Duration fields are untouched.
    pub fn increase_locking_amount(
        env: Env,
        caller: Address,
        lock_id: u64,
        delta: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if delta <= 0 {
            return Err(ContractError::InvalidArgument);
        }

        let registry = read_registry(&env)?;
        let position = Self::read_position(&env, &registry, lock_id)?;
        Self::require_authorized(&env, &caller, lock_id, &position)?;

        let today = reward_math::current_day(env.ledger().timestamp());
        let remaining = reward_math::remaining_duration(
            position.exp_date,
            position.paused_locking_duration,
            today,
        );
        if remaining < MIN_LOCKING_DURATION {
            return Err(ContractError::InvariantViolation);
        }

        Self::transfer_in(&env, &caller, delta)?;

        LockingRegistryClient::new(&env, &registry).modify_locking_position(
            &lock_id,
            &position.amount.saturating_add(delta),
            &position.exp_date,
            &position.paused_locking_duration,
        );

        events::publish_locking_amount_increased(&env, lock_id, delta);

        Ok(())
    }

    /// Push a position's maturity further out by `extend_days`.
    ///
    /// A paused position keeps its frozen remainder and simply grows it; a
    /// live one is re-anchored at `max(exp_date, today)` first, so extending
    /// an expired-but-unclaimed position counts from today.
    pub fn extend_locking_duration(
        env: Env,
        caller: Address,
        lock_id: u64,
        extend_days: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if extend_days == 0 {
            return Err(ContractError::InvalidArgument);
        }

        let registry = read_registry(&env)?;
        let position = Self::read_position(&env, &registry, lock_id)?;
        Self::require_authorized(&env, &caller, lock_id, &position)?;

        let today = reward_math::current_day(env.ledger().timestamp());
        let client = LockingRegistryClient::new(&env, &registry);

        if position.paused_locking_duration != 0 {
            let new_paused = position.paused_locking_duration.saturating_add(extend_days);
            if new_paused > MAX_LOCKING_DURATION {
                return Err(ContractError::InvariantViolation);
            }
            client.modify_locking_position(
                &lock_id,
                &position.amount,
                &position.exp_date,
                &new_paused,
            );
        } else {
            let base = position.exp_date.max(today);
            let new_exp = base.saturating_add(extend_days);
            if new_exp - today > MAX_LOCKING_DURATION {
                return Err(ContractError::InvariantViolation);
            }
            client.modify_locking_position(&lock_id, &position.amount, &new_exp, &0u64);
        }

        events::publish_locking_duration_extended(&env, lock_id, extend_days);

        Ok(())
    }

    // ── Pause / resume ──────────────────────────────────────────────────────

    /// Freeze the remaining countdown of a live, unexpired position.
    ///
    /// `exp_date` is left stale and is ignored until `resume_countdown`.
    pub fn pause_remaining_locking_duration(
        env: Env,
        caller: Address,
        lock_id: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let registry = read_registry(&env)?;
        let position = Self::read_position(&env, &registry, lock_id)?;
        Self::require_authorized(&env, &caller, lock_id, &position)?;

        if position.paused_locking_duration != 0 {
            return Err(ContractError::InvariantViolation);
        }
        let today = reward_math::current_day(env.ledger().timestamp());
        if position.exp_date <= today {
            return Err(ContractError::InvariantViolation);
        }

        let remaining = position.exp_date - today;
        LockingRegistryClient::new(&env, &registry).modify_locking_position(
            &lock_id,
            &position.amount,
            &position.exp_date,
            &remaining,
        );

        events::publish_remaining_duration_paused(&env, lock_id, remaining);

        Ok(())
    }

    /// Restart the countdown of a paused position from today.
    pub fn resume_countdown(env: Env, caller: Address, lock_id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let registry = read_registry(&env)?;
        let position = Self::read_position(&env, &registry, lock_id)?;
        Self::require_authorized(&env, &caller, lock_id, &position)?;

        if position.paused_locking_duration == 0 {
            return Err(ContractError::InvariantViolation);
        }

        let today = reward_math::current_day(env.ledger().timestamp());
        let new_exp = today.saturating_add(position.paused_locking_duration);
        LockingRegistryClient::new(&env, &registry).modify_locking_position(
            &lock_id,
            &position.amount,
            &new_exp,
            &0u64,
        );

        events::publish_countdown_resumed(&env, lock_id, new_exp);

        Ok(())
    }

    // ── Unlocking ───────────────────────────────────────────────────────────

    /// Return the locked amount to the current owner and delete the position.
    ///
    /// Requires a live, matured countdown; paused positions never mature.
    pub fn unlock(env: Env, caller: Address, lock_id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let registry = read_registry(&env)?;
        let position = Self::read_position(&env, &registry, lock_id)?;
        Self::require_authorized(&env, &caller, lock_id, &position)?;

        let today = reward_math::current_day(env.ledger().timestamp());
        if position.paused_locking_duration != 0 || position.exp_date > today {
            return Err(ContractError::InvariantViolation);
        }

        let client = LockingRegistryClient::new(&env, &registry);
        let owner = client
            .try_owner_of(&lock_id)
            .map_err(|_| ContractError::NotFound)?
            .map_err(|_| ContractError::NotFound)?;

        // Delete before the outbound transfer (checks-effects-interactions).
        client.remove_locking_position(&lock_id);

        Self::transfer_out(&env, &owner, position.amount)?;

        events::publish_amount_unlocked(&env, lock_id);

        Ok(())
    }

    /// Start a penalized early exit: deduct the penalty from principal, force
    /// the countdown live, and set maturity three days out.  Irreversible.
    ///
    /// The penalty goes to the DAO treasury for directly-created positions
    /// and back to the delegate creator otherwise.  Returns the penalty.
    pub fn initiate_fast_unlock(
        env: Env,
        caller: Address,
        lock_id: u64,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let registry = read_registry(&env)?;
        let position = Self::read_position(&env, &registry, lock_id)?;
        Self::require_authorized(&env, &caller, lock_id, &position)?;

        let today = reward_math::current_day(env.ledger().timestamp());
        let remaining = reward_math::remaining_duration(
            position.exp_date,
            position.paused_locking_duration,
            today,
        );
        if remaining <= FAST_UNLOCK_DURATION {
            return Err(ContractError::InvariantViolation);
        }

        let emergency_exit = Self::get_emergency_exit_enabled(env.clone());
        let penalty = reward_math::penalty(position.amount, remaining, emergency_exit);

        // Deduct from principal and open the fixed 3-day window, overriding
        // any prior pause.
        LockingRegistryClient::new(&env, &registry).modify_locking_position(
            &lock_id,
            &(position.amount - penalty),
            &today.saturating_add(FAST_UNLOCK_DURATION),
            &0u64,
        );

        if penalty > 0 {
            let recipient = if position.creator == env.current_contract_address() {
                env.storage()
                    .instance()
                    .get(&TREASURY)
                    .ok_or(ContractError::NotInitialized)?
            } else {
                position.creator
            };
            Self::transfer_out(&env, &recipient, penalty)?;
        }

        events::publish_fast_unlock_initiated(&env, lock_id, penalty);

        Ok(penalty)
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn get_locking_position(env: Env, lock_id: u64) -> Result<LockingPosition, ContractError> {
        let registry = read_registry(&env)?;
        Self::read_position(&env, &registry, lock_id)
    }

    /// Days left on a position, paused or live.
    pub fn get_remaining_duration(env: Env, lock_id: u64) -> Result<u64, ContractError> {
        let registry = read_registry(&env)?;
        let position = Self::read_position(&env, &registry, lock_id)?;
        let today = reward_math::current_day(env.ledger().timestamp());
        Ok(reward_math::remaining_duration(
            position.exp_date,
            position.paused_locking_duration,
            today,
        ))
    }

    /// Current voting power of a position (1:1 while live, boosted while
    /// paused).
    pub fn get_voting_power(env: Env, lock_id: u64) -> Result<i128, ContractError> {
        let registry = read_registry(&env)?;
        let position = Self::read_position(&env, &registry, lock_id)?;
        Ok(reward_math::voting_power(
            position.amount,
            position.paused_locking_duration,
        ))
    }

    /// Penalty a fast unlock would charge right now.
    pub fn get_penalty(env: Env, lock_id: u64) -> Result<i128, ContractError> {
        let registry = read_registry(&env)?;
        let position = Self::read_position(&env, &registry, lock_id)?;
        let today = reward_math::current_day(env.ledger().timestamp());
        let remaining = reward_math::remaining_duration(
            position.exp_date,
            position.paused_locking_duration,
            today,
        );
        Ok(reward_math::penalty(
            position.amount,
            remaining,
            Self::get_emergency_exit_enabled(env.clone()),
        ))
    }

    pub fn is_allowed_creator(env: Env, creator: Address) -> bool {
        creators::is_allowed(&env, &creator)
    }

    pub fn get_emergency_exit_enabled(env: Env) -> bool {
        env.storage().instance().get(&EMERGENCY_EXIT).unwrap_or(false)
    }

    pub fn get_dao_treasury(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TREASURY)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_locking_registry(env: Env) -> Result<Address, ContractError> {
        read_registry(&env)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin functions ─────────────────────────────────────────────────────

    /// Allow `creator` to open and manage positions on behalf of users.
    pub fn add_creator(env: Env, caller: Address, creator: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !creators::add(&env, &creator) {
            return Err(ContractError::InvalidArgument);
        }

        events::publish_creator_added(&env, creator);

        Ok(())
    }

    /// Revoke delegate-creator rights.  Existing positions created by
    /// `creator` keep it as their creator but become unmodifiable until the
    /// allowlisting is restored.
    pub fn remove_creator(
        env: Env,
        caller: Address,
        creator: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !creators::remove(&env, &creator) {
            return Err(ContractError::InvalidArgument);
        }

        events::publish_creator_removed(&env, creator);

        Ok(())
    }

    /// Toggle the process-wide penalty waiver for fast unlocks.
    pub fn set_emergency_exit_enabled(
        env: Env,
        caller: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&EMERGENCY_EXIT, &enabled);

        events::publish_emergency_exit_set(&env, enabled);

        Ok(())
    }

    // ── Admin transfer (two-step) ───────────────────────────────────────────

    /// Propose a new admin address.  The new admin must call `accept_admin`
    /// to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept a pending admin transfer.  Only the proposed admin may call.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidArgument)?;
        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidArgument)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Guard: revert unless `caller` passes the dual authorization rule.
    fn require_authorized(
        env: &Env,
        caller: &Address,
        lock_id: u64,
        position: &LockingPosition,
    ) -> Result<(), ContractError> {
        if !auth::can_modify(env, caller, lock_id, position) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Fresh read of a position; absent ids surface as `NotFound`.
    fn read_position(
        env: &Env,
        registry: &Address,
        lock_id: u64,
    ) -> Result<LockingPosition, ContractError> {
        LockingRegistryClient::new(env, registry)
            .try_get_locking_position(&lock_id)
            .map_err(|_| ContractError::NotFound)?
            .map_err(|_| ContractError::NotFound)
    }

    /// Pull `amount` stake tokens from `from` into the engine.
    fn transfer_in(env: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
        let stake_token: Address = env
            .storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let result = token::Client::new(env, &stake_token).try_transfer(
            from,
            &env.current_contract_address(),
            &amount,
        );
        match result {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }

    /// Send `amount` stake tokens from the engine to `to`.
    fn transfer_out(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        let stake_token: Address = env
            .storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let result = token::Client::new(env, &stake_token).try_transfer(
            &env.current_contract_address(),
            to,
            &amount,
        );
        match result {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }
}

/// Bound registry address; `NotInitialized` until
/// `initialize_locking_position` has run.
pub(crate) fn read_registry(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&REGISTRY)
        .ok_or(ContractError::NotInitialized)
}

// ── Tests ────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_auth;
