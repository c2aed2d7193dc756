use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the engine is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub timestamp: u64,
}

/// Fired when tokens are locked into a new position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmountLockedEvent {
    pub lock_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub duration_days: u64,
    pub timestamp: u64,
}

/// Fired when a matured position is unlocked and deleted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmountUnlockedEvent {
    pub lock_id: u64,
    pub timestamp: u64,
}

/// Fired when a fast unlock starts its 3-day emergency window.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FastUnlockInitiatedEvent {
    pub lock_id: u64,
    pub penalty: i128,
    pub timestamp: u64,
}

/// Fired when additional tokens are added to a position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockingAmountIncreasedEvent {
    pub lock_id: u64,
    pub delta: i128,
    pub timestamp: u64,
}

/// Fired when a position's duration is extended.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockingDurationExtendedEvent {
    pub lock_id: u64,
    pub extend_days: u64,
    pub timestamp: u64,
}

/// Fired when a position's countdown is frozen.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemainingLockingDurationPausedEvent {
    pub lock_id: u64,
    pub paused_locking_duration: u64,
    pub timestamp: u64,
}

/// Fired when a paused position's countdown restarts.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CountdownResumedEvent {
    pub lock_id: u64,
    pub exp_date: u64,
    pub timestamp: u64,
}

/// Fired when a delegate creator is added to the allowlist.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatorAddedEvent {
    pub creator: Address,
    pub timestamp: u64,
}

/// Fired when a delegate creator is removed from the allowlist.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatorRemovedEvent {
    pub creator: Address,
    pub timestamp: u64,
}

/// Fired when the emergency-exit flag changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyExitSetEvent {
    pub enabled: bool,
    pub timestamp: u64,
}

/// Fired when the registry collaborator is bound.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistrySetEvent {
    pub registry: Address,
    pub timestamp: u64,
}

/// Fired when the DAO treasury is bound.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasurySetEvent {
    pub treasury: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, stake_token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_amount_locked(
    env: &Env,
    lock_id: u64,
    owner: Address,
    amount: i128,
    duration_days: u64,
) {
    env.events().publish(
        (symbol_short!("LOCKED"), owner.clone()),
        AmountLockedEvent {
            lock_id,
            owner,
            amount,
            duration_days,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_amount_unlocked(env: &Env, lock_id: u64) {
    env.events().publish(
        (symbol_short!("UNLOCKED"), lock_id),
        AmountUnlockedEvent {
            lock_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fast_unlock_initiated(env: &Env, lock_id: u64, penalty: i128) {
    env.events().publish(
        (symbol_short!("FAST_UNLK"), lock_id),
        FastUnlockInitiatedEvent {
            lock_id,
            penalty,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_locking_amount_increased(env: &Env, lock_id: u64, delta: i128) {
    env.events().publish(
        (symbol_short!("AMT_INCR"), lock_id),
        LockingAmountIncreasedEvent {
            lock_id,
            delta,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_locking_duration_extended(env: &Env, lock_id: u64, extend_days: u64) {
    env.events().publish(
        (symbol_short!("DUR_EXT"), lock_id),
        LockingDurationExtendedEvent {
            lock_id,
            extend_days,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_remaining_duration_paused(env: &Env, lock_id: u64, paused_locking_duration: u64) {
    env.events().publish(
        (symbol_short!("DUR_PAUSE"), lock_id),
        RemainingLockingDurationPausedEvent {
            lock_id,
            paused_locking_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_countdown_resumed(env: &Env, lock_id: u64, exp_date: u64) {
    env.events().publish(
        (symbol_short!("RESUMED"), lock_id),
        CountdownResumedEvent {
            lock_id,
            exp_date,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_creator_added(env: &Env, creator: Address) {
    env.events().publish(
        (symbol_short!("CRTR_ADD"), creator.clone()),
        CreatorAddedEvent {
            creator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_creator_removed(env: &Env, creator: Address) {
    env.events().publish(
        (symbol_short!("CRTR_REM"), creator.clone()),
        CreatorRemovedEvent {
            creator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_exit_set(env: &Env, enabled: bool) {
    env.events().publish(
        (symbol_short!("EMRG_SET"),),
        EmergencyExitSetEvent {
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_registry_set(env: &Env, registry: Address) {
    env.events().publish(
        (symbol_short!("REG_SET"),),
        RegistrySetEvent {
            registry,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_treasury_set(env: &Env, treasury: Address) {
    env.events().publish(
        (symbol_short!("TRSY_SET"),),
        TreasurySetEvent {
            treasury,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
