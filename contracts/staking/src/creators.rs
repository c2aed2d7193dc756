use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage key constants ───────────────────────────────────────────────────

/// Per-creator persistent flag:  (prefix, creator_address) -> bool
const ALLOWED: Symbol = symbol_short!("ALW_CRTR");

// ── Storage helpers ─────────────────────────────────────────────────────────

fn creator_key(creator: &Address) -> (Symbol, Address) {
    (ALLOWED, creator.clone())
}

/// Whether `creator` is on the delegate-creator allowlist.
pub fn is_allowed(env: &Env, creator: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&creator_key(creator))
        .unwrap_or(false)
}

/// Add `creator` to the allowlist.  Returns `false` if already present.
pub fn add(env: &Env, creator: &Address) -> bool {
    if is_allowed(env, creator) {
        return false;
    }
    env.storage().persistent().set(&creator_key(creator), &true);
    true
}

/// Remove `creator` from the allowlist.  Returns `false` if absent.
pub fn remove(env: &Env, creator: &Address) -> bool {
    if !is_allowed(env, creator) {
        return false;
    }
    env.storage().persistent().remove(&creator_key(creator));
    true
}
