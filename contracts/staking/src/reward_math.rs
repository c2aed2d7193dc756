//! Pure arithmetic for the locking engine: remaining-duration resolution,
//! the fast-unlock penalty, and the paused-position voting-power boost.
//!
//! Everything here is stateless and integer-only.  Amounts are `i128`
//! (token base units), durations are `u64` whole-day counts, and division
//! truncates toward zero.

/// Seconds in one ledger day.  All durations are evaluated at day granularity.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Smallest amount a position may be created with.
pub const MIN_LOCKING_AMOUNT: i128 = 10;

/// Shortest allowed lock, in days.  Also the floor below which a position can
/// no longer receive amount increases.
pub const MIN_LOCKING_DURATION: u64 = 14;

/// Longest allowed lock, in days (two years).
pub const MAX_LOCKING_DURATION: u64 = 730;

/// Length of the mandatory wait after a fast unlock, in days.
pub const FAST_UNLOCK_DURATION: u64 = 3;

/// Convert a ledger timestamp to a day number.
pub fn current_day(timestamp: u64) -> u64 {
    timestamp / SECONDS_PER_DAY
}

/// Days left on a position.
///
/// While paused the frozen value governs; while live the countdown is
/// `exp_date - today`, clamped at zero for matured-but-unclaimed positions.
pub fn remaining_duration(exp_date: u64, paused_locking_duration: u64, today: u64) -> u64 {
    if paused_locking_duration != 0 {
        paused_locking_duration
    } else {
        exp_date.saturating_sub(today)
    }
}

/// Principal deduction for unlocking `remaining_days` early.
///
/// `amount * (remaining_days - 3) / (MAX_LOCKING_DURATION * 2)`, floored.
/// Waived entirely while the emergency exit is enabled.  Callers enforce
/// `remaining_days > FAST_UNLOCK_DURATION`; shorter remainders yield zero.
pub fn penalty(amount: i128, remaining_days: u64, emergency_exit_enabled: bool) -> i128 {
    if emergency_exit_enabled || remaining_days <= FAST_UNLOCK_DURATION {
        return 0;
    }
    let weight = (remaining_days - FAST_UNLOCK_DURATION) as i128;
    amount.saturating_mul(weight) / ((MAX_LOCKING_DURATION * 2) as i128)
}

/// Voting power of a position.
///
/// A live position counts 1:1; a paused one is boosted by
/// `amount * paused_days / 365` in exchange for the frozen liquidity.
pub fn voting_power(amount: i128, paused_remaining_days: u64) -> i128 {
    if paused_remaining_days == 0 {
        return amount;
    }
    amount.saturating_add(amount.saturating_mul(paused_remaining_days as i128) / 365)
}

// ── Tests ────────────────────────────────────────────────────────────────────
