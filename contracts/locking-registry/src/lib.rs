#![no_std]

//! Canonical store for token locking positions.
//!
//! The registry persists every [`LockingPosition`] together with an NFT-like
//! `lock_id -> owner` map, and nothing else: invariant maintenance (duration
//! bounds, pause/live exclusivity, minimum amounts) is the staking engine's
//! responsibility.  All mutations are gated to the engine bound at
//! `initialize`; ownership transfers are gated to the current owner.
//!
//! Deploying the store as its own contract keeps position records and lock-id
//! assignments stable across upgrades of the engine's executable logic.

pub mod events;

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const ENGINE: Symbol = symbol_short!("ENGINE");
const INITIALIZED: Symbol = symbol_short!("INIT");
const LOCK_CTR: Symbol = symbol_short!("LOCK_CTR");

// Per-position persistent storage uses tuple keys:  (prefix, lock_id)
const POSITION: Symbol = symbol_short!("POS");
const OWNER: Symbol = symbol_short!("OWNER");

/// Seconds in one ledger day.  Durations and expiry dates are whole days.
pub const SECONDS_PER_DAY: u64 = 86_400;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RegistryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotFound = 4,
    InvalidArgument = 5,
}

// ── Types ────────────────────────────────────────────────────────────────────

/// A single locking position.
///
/// Exactly one of `exp_date` / `paused_locking_duration` is meaningful at a
/// time: while `paused_locking_duration == 0` the countdown is live and
/// `exp_date` (a day number, `timestamp / 86_400`) governs maturity; while it
/// is nonzero the countdown is frozen and `exp_date` is stale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockingPosition {
    /// Account that opened the position: the staking engine itself for a
    /// direct user lock, or an allow-listed delegate contract.
    pub creator: Address,
    /// Locked token quantity.
    pub amount: i128,
    /// Day number at which the lock matures (countdown live).
    pub exp_date: u64,
    /// Frozen remaining days (countdown paused); zero when live.
    pub paused_locking_duration: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct LockingRegistry;

#[contractimpl]
impl LockingRegistry {
    /// One-time binding of the staking engine allowed to mutate the store.
    pub fn initialize(env: Env, engine: Address) -> Result<(), RegistryError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(RegistryError::AlreadyInitialized);
        }

        env.storage().instance().set(&ENGINE, &engine);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, engine);

        Ok(())
    }

    // ── Engine-gated mutations ──────────────────────────────────────────────

    /// Allocate a new position with `exp_date = today + duration_days` and a
    /// live countdown.  Returns the new lock id (1-based, monotonic).
    pub fn create_locking_position(
        env: Env,
        creator: Address,
        owner: Address,
        amount: i128,
        duration_days: u64,
    ) -> Result<u64, RegistryError> {
        Self::require_engine(&env)?;

        if amount <= 0 || duration_days == 0 {
            return Err(RegistryError::InvalidArgument);
        }

        let today = env.ledger().timestamp() / SECONDS_PER_DAY;
        let position = LockingPosition {
            creator,
            amount,
            exp_date: today.saturating_add(duration_days),
            paused_locking_duration: 0,
        };

        let lock_id = Self::next_lock_id(&env);
        env.storage()
            .persistent()
            .set(&position_key(lock_id), &position);
        env.storage().persistent().set(&owner_key(lock_id), &owner);

        Ok(lock_id)
    }

    /// Overwrite the mutable fields of an existing position in place.
    pub fn modify_locking_position(
        env: Env,
        lock_id: u64,
        amount: i128,
        exp_date: u64,
        paused_locking_duration: u64,
    ) -> Result<(), RegistryError> {
        Self::require_engine(&env)?;

        let mut position: LockingPosition = env
            .storage()
            .persistent()
            .get(&position_key(lock_id))
            .ok_or(RegistryError::NotFound)?;

        position.amount = amount;
        position.exp_date = exp_date;
        position.paused_locking_duration = paused_locking_duration;

        env.storage()
            .persistent()
            .set(&position_key(lock_id), &position);

        Ok(())
    }

    /// Delete a position and its ownership entry.  Subsequent reads of the
    /// same id fail with `NotFound`; ids are never reused.
    pub fn remove_locking_position(env: Env, lock_id: u64) -> Result<(), RegistryError> {
        Self::require_engine(&env)?;

        if !env.storage().persistent().has(&position_key(lock_id)) {
            return Err(RegistryError::NotFound);
        }

        env.storage().persistent().remove(&position_key(lock_id));
        env.storage().persistent().remove(&owner_key(lock_id));

        Ok(())
    }

    // ── Ownership transfer ──────────────────────────────────────────────────

    /// Transfer ownership of a position to a new account.
    ///
    /// The position record itself (creator included) is untouched, so a
    /// delegate-created position stays under its delegate's control after the
    /// transfer while a direct position follows its new owner.
    pub fn transfer_position(
        env: Env,
        current_owner: Address,
        lock_id: u64,
        new_owner: Address,
    ) -> Result<(), RegistryError> {
        current_owner.require_auth();

        let owner: Address = env
            .storage()
            .persistent()
            .get(&owner_key(lock_id))
            .ok_or(RegistryError::NotFound)?;
        if owner != current_owner {
            return Err(RegistryError::Unauthorized);
        }

        env.storage()
            .persistent()
            .set(&owner_key(lock_id), &new_owner);

        events::publish_position_transferred(&env, lock_id, current_owner, new_owner);

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn get_locking_position(env: Env, lock_id: u64) -> Result<LockingPosition, RegistryError> {
        env.storage()
            .persistent()
            .get(&position_key(lock_id))
            .ok_or(RegistryError::NotFound)
    }

    pub fn owner_of(env: Env, lock_id: u64) -> Result<Address, RegistryError> {
        env.storage()
            .persistent()
            .get(&owner_key(lock_id))
            .ok_or(RegistryError::NotFound)
    }

    /// Total number of positions ever created.
    pub fn get_lock_count(env: Env) -> u64 {
        env.storage().instance().get(&LOCK_CTR).unwrap_or(0)
    }

    pub fn get_engine(env: Env) -> Result<Address, RegistryError> {
        env.storage()
            .instance()
            .get(&ENGINE)
            .ok_or(RegistryError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    /// Guard: only the bound engine may mutate the store.  The engine
    /// authenticates as the invoking contract, so `require_auth` passes
    /// without a signature when the call arrives cross-contract.
    fn require_engine(env: &Env) -> Result<(), RegistryError> {
        let engine: Address = env
            .storage()
            .instance()
            .get(&ENGINE)
            .ok_or(RegistryError::NotInitialized)?;
        engine.require_auth();
        Ok(())
    }

    /// Allocate and return the next lock id (1-based, monotonically increasing).
    fn next_lock_id(env: &Env) -> u64 {
        let current: u64 = env.storage().instance().get(&LOCK_CTR).unwrap_or(0u64);
        let next = current.saturating_add(1);
        env.storage().instance().set(&LOCK_CTR, &next);
        next
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn position_key(lock_id: u64) -> (Symbol, u64) {
    (POSITION, lock_id)
}

fn owner_key(lock_id: u64) -> (Symbol, u64) {
    (OWNER, lock_id)
}

// ── Tests ────────────────────────────────────────────────────────────────────
