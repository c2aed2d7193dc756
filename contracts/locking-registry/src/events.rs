use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the registry is bound to its staking engine.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub engine: Address,
    pub timestamp: u64,
}

/// Fired when ownership of a position moves to a new account.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionTransferredEvent {
    pub lock_id: u64,
    pub from: Address,
    pub to: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, engine: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            engine,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_position_transferred(env: &Env, lock_id: u64, from: Address, to: Address) {
    env.events().publish(
        (symbol_short!("POS_XFER"), lock_id),
        PositionTransferredEvent {
            lock_id,
            from,
            to,
            timestamp: env.ledger().timestamp(),
        },
    );
}
