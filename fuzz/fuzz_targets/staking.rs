#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};

use locking_registry::{LockingRegistry, LockingRegistryClient};
use staking::{StakingEngine, StakingEngineClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Lock { amount: u32, duration: u16 },
    Unlock { lock_id: u8 },
    FastUnlock { lock_id: u8 },
    Increase { lock_id: u8, delta: u32 },
    Extend { lock_id: u8, days: u16 },
    Pause { lock_id: u8 },
    Resume { lock_id: u8 },
    AdvanceDays { days: u8 },
    ToggleEmergencyExit,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
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

    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &1_000_000_000i128);
        users.push(user);
    }

    let mut emergency = false;
    let mut day = 0u64;

    // Drive arbitrary action sequences looking for unguarded arithmetic and
    // state-machine panics; rejected transitions surface as Err, never traps.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Lock { amount, duration } => {
                let _ = engine.try_lock_amount(
                    caller,
                    caller,
                    &(amount as i128),
                    &(duration as u64),
                );
            }
            FuzzAction::Unlock { lock_id } => {
                let _ = engine.try_unlock(caller, &(lock_id as u64));
            }
            FuzzAction::FastUnlock { lock_id } => {
                let _ = engine.try_initiate_fast_unlock(caller, &(lock_id as u64));
            }
            FuzzAction::Increase { lock_id, delta } => {
                let _ = engine.try_increase_locking_amount(
                    caller,
                    &(lock_id as u64),
                    &(delta as i128),
                );
            }
            FuzzAction::Extend { lock_id, days } => {
                let _ = engine.try_extend_locking_duration(
                    caller,
                    &(lock_id as u64),
                    &(days as u64),
                );
            }
            FuzzAction::Pause { lock_id } => {
                let _ = engine.try_pause_remaining_locking_duration(caller, &(lock_id as u64));
            }
            FuzzAction::Resume { lock_id } => {
                let _ = engine.try_resume_countdown(caller, &(lock_id as u64));
            }
            FuzzAction::AdvanceDays { days } => {
                day += days as u64;
                env.ledger().set_timestamp(day * 86_400);
            }
            FuzzAction::ToggleEmergencyExit => {
                emergency = !emergency;
                let _ = engine.try_set_emergency_exit_enabled(&admin, &emergency);
            }
        }
    }
});
