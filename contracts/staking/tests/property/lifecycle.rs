//! Env-backed properties of the position state machine.

use proptest::prelude::*;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

use locking_registry::{LockingRegistry, LockingRegistryClient};
use staking::reward_math::{MAX_LOCKING_DURATION, MIN_LOCKING_DURATION, SECONDS_PER_DAY};
use staking::{StakingEngine, StakingEngineClient};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingEngineClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let issuer = Address::generate(&env);
    let stake_token = env.register_stellar_asset_contract_v2(issuer).address();

    let engine_id = env.register(StakingEngine, ());
    let engine = StakingEngineClient::new(&env, &engine_id);

    let registry_id = env.register(LockingRegistry, ());
    LockingRegistryClient::new(&env, &registry_id).initialize(&engine_id);

    let admin = Address::generate(&env);
    engine.initialize(&admin, &stake_token);
    engine.initialize_locking_position(&admin, &registry_id);
    engine.initialize_dao_treasury(&admin, &Address::generate(&env));

    (env, engine, stake_token)
}

fn set_day(env: &Env, day: u64) {
    env.ledger().set_timestamp(day * SECONDS_PER_DAY);
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Remaining duration stays within [0, 730] after lock, pause, resume,
    /// extension, and elapsed time in any combination.
    #[test]
    fn prop_remaining_duration_always_in_bounds(
        amount in 10i128..1_000_000i128,
        duration in MIN_LOCKING_DURATION..=MAX_LOCKING_DURATION,
        elapsed in 0u64..800u64,
        pause in any::<bool>(),
        extend in 0u64..100u64,
    ) {
        let (env, engine, stake_token) = setup();
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &amount);

        set_day(&env, 10);
        let lock_id = engine.lock_amount(&user, &user, &amount, &duration);
        prop_assert!(engine.get_remaining_duration(&lock_id) <= MAX_LOCKING_DURATION);

        set_day(&env, 10 + elapsed);
        if pause {
            // Only a live, unexpired position can be paused.
            let _ = engine.try_pause_remaining_locking_duration(&user, &lock_id);
        }
        if extend > 0 {
            let _ = engine.try_extend_locking_duration(&user, &lock_id, &extend);
        }

        let remaining = engine.get_remaining_duration(&lock_id);
        prop_assert!(remaining <= MAX_LOCKING_DURATION,
            "remaining {} exceeds maximum", remaining);
    }

    /// Pause then resume with no time passage restores `exp_date` exactly.
    #[test]
    fn prop_pause_resume_identity(
        amount in 10i128..1_000_000i128,
        duration in MIN_LOCKING_DURATION..=MAX_LOCKING_DURATION,
        lock_day in 0u64..10_000u64,
        wait in 0u64..14u64,
    ) {
        let (env, engine, stake_token) = setup();
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &amount);

        set_day(&env, lock_day);
        let lock_id = engine.lock_amount(&user, &user, &amount, &duration);
        let before = engine.get_locking_position(&lock_id).exp_date;

        // `wait < MIN_LOCKING_DURATION <= duration`, so the position is
        // still live and unexpired when paused.
        set_day(&env, lock_day + wait);
        engine.pause_remaining_locking_duration(&user, &lock_id);
        engine.resume_countdown(&user, &lock_id);

        prop_assert_eq!(engine.get_locking_position(&lock_id).exp_date, before);
    }

    /// A fast unlock conserves value: the deducted penalty plus the reduced
    /// principal equals the original amount, and the 3-day window opens.
    #[test]
    fn prop_fast_unlock_conserves_value(
        amount in 10i128..1_000_000_000i128,
        duration in MIN_LOCKING_DURATION..=MAX_LOCKING_DURATION,
    ) {
        let (env, engine, stake_token) = setup();
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &amount);

        set_day(&env, 100);
        let lock_id = engine.lock_amount(&user, &user, &amount, &duration);

        let penalty = engine.initiate_fast_unlock(&user, &lock_id);
        let position = engine.get_locking_position(&lock_id);

        prop_assert_eq!(position.amount + penalty, amount);
        prop_assert_eq!(position.exp_date, 103);
        prop_assert_eq!(position.paused_locking_duration, 0);
        prop_assert!(2 * penalty < amount);
    }
}
