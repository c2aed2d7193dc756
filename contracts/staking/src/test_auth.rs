extern crate std;

use soroban_sdk::{testutils::Address as _, token::Client as TokenClient, Address};

use crate::test::{mint_stake, set_day, setup, Setup};
use crate::ContractError;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Allow-list a fresh delegate and fund it for locking on behalf of users.
fn register_delegate(s: &Setup) -> Address {
    let delegate = Address::generate(&s.env);
    s.engine.add_creator(&s.admin, &delegate);
    mint_stake(&s.env, &s.stake_token, &delegate, 1_000_000);
    delegate
}

// ── Delegate-created positions ────────────────────────────────────────────────

#[test]
fn test_delegate_locks_on_behalf_of_owner() {
    let s = setup();
    let delegate = register_delegate(&s);

    let alice = Address::generate(&s.env);
    set_day(&s.env, 0);

    let lock_id = s.engine.lock_amount(&delegate, &alice, &100, &100);

    let position = s.engine.get_locking_position(&lock_id);
    assert_eq!(position.creator, delegate);
    assert_eq!(s.registry.owner_of(&lock_id), alice);
}

#[test]
fn test_owner_cannot_modify_delegate_position() {
    let s = setup();
    let delegate = register_delegate(&s);

    let alice = Address::generate(&s.env);
    set_day(&s.env, 0);
    let lock_id = s.engine.lock_amount(&delegate, &alice, &100, &100);

    // Alice owns the position token but the delegate holds control.
    let result = s.engine.try_extend_locking_duration(&alice, &lock_id, &10);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    let result = s.engine.try_pause_remaining_locking_duration(&alice, &lock_id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    s.engine.extend_locking_duration(&delegate, &lock_id, &10);
    assert_eq!(s.engine.get_locking_position(&lock_id).exp_date, 110);
}

#[test]
fn test_delegate_keeps_control_after_ownership_transfer() {
    let s = setup();
    let delegate = register_delegate(&s);

    let alice = Address::generate(&s.env);
    let bob = Address::generate(&s.env);
    set_day(&s.env, 0);
    let lock_id = s.engine.lock_amount(&delegate, &alice, &100, &100);

    s.registry.transfer_position(&alice, &lock_id, &bob);

    let result = s.engine.try_extend_locking_duration(&bob, &lock_id, &10);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    s.engine.extend_locking_duration(&delegate, &lock_id, &10);
}

#[test]
fn test_delegate_cannot_touch_foreign_positions() {
    let s = setup();
    let delegate = register_delegate(&s);
    let other_delegate = register_delegate(&s);

    let alice = Address::generate(&s.env);
    set_day(&s.env, 0);
    let lock_id = s.engine.lock_amount(&delegate, &alice, &100, &100);

    // Allow-listed, but not this position's creator.
    let result = s
        .engine
        .try_extend_locking_duration(&other_delegate, &lock_id, &10);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_removed_delegate_loses_control() {
    let s = setup();
    let delegate = register_delegate(&s);

    let alice = Address::generate(&s.env);
    set_day(&s.env, 0);
    let lock_id = s.engine.lock_amount(&delegate, &alice, &100, &100);

    s.engine.remove_creator(&s.admin, &delegate);

    let result = s.engine.try_extend_locking_duration(&delegate, &lock_id, &10);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_delegate_penalty_routes_to_delegate() {
    let s = setup();
    let delegate = register_delegate(&s);

    let alice = Address::generate(&s.env);
    set_day(&s.env, 0);
    let lock_id = s.engine.lock_amount(&delegate, &alice, &100_000, &730);

    let before = TokenClient::new(&s.env, &s.stake_token).balance(&delegate);
    let penalty = s.engine.initiate_fast_unlock(&delegate, &lock_id);
    assert!(penalty > 0);

    let after = TokenClient::new(&s.env, &s.stake_token).balance(&delegate);
    assert_eq!(after - before, penalty);
    // Nothing reaches the treasury for delegate-created positions.
    assert_eq!(
        TokenClient::new(&s.env, &s.stake_token).balance(&s.treasury),
        0
    );
}

// ── Direct positions ──────────────────────────────────────────────────────────

#[test]
fn test_direct_position_follows_ownership() {
    let s = setup();

    let alice = Address::generate(&s.env);
    let bob = Address::generate(&s.env);
    mint_stake(&s.env, &s.stake_token, &alice, 100);
    set_day(&s.env, 0);

    let lock_id = s.engine.lock_amount(&alice, &alice, &100, &100);
    s.registry.transfer_position(&alice, &lock_id, &bob);

    // Control moved with the ownership token.
    let result = s.engine.try_extend_locking_duration(&alice, &lock_id, &10);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    s.engine.extend_locking_duration(&bob, &lock_id, &10);
}

#[test]
fn test_stranger_cannot_modify_direct_position() {
    let s = setup();

    let alice = Address::generate(&s.env);
    let mallory = Address::generate(&s.env);
    mint_stake(&s.env, &s.stake_token, &alice, 100);
    set_day(&s.env, 0);

    let lock_id = s.engine.lock_amount(&alice, &alice, &100, &100);

    set_day(&s.env, 100);
    let result = s.engine.try_unlock(&mallory, &lock_id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Creator allowlist administration ──────────────────────────────────────────

#[test]
fn test_add_creator_requires_admin() {
    let s = setup();

    let intruder = Address::generate(&s.env);
    let result = s.engine.try_add_creator(&intruder, &intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_add_and_remove_creator() {
    let s = setup();

    let delegate = Address::generate(&s.env);
    assert!(!s.engine.is_allowed_creator(&delegate));

    s.engine.add_creator(&s.admin, &delegate);
    assert!(s.engine.is_allowed_creator(&delegate));

    // Duplicate addition is rejected.
    let result = s.engine.try_add_creator(&s.admin, &delegate);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidArgument),
        _ => unreachable!("Expected InvalidArgument error"),
    }

    s.engine.remove_creator(&s.admin, &delegate);
    assert!(!s.engine.is_allowed_creator(&delegate));

    // Removing an absent creator is rejected.
    let result = s.engine.try_remove_creator(&s.admin, &delegate);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidArgument),
        _ => unreachable!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_set_emergency_exit_requires_admin() {
    let s = setup();

    let intruder = Address::generate(&s.env);
    let result = s.engine.try_set_emergency_exit_enabled(&intruder, &true);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    s.engine.set_emergency_exit_enabled(&s.admin, &true);
    assert!(s.engine.get_emergency_exit_enabled());
}

// ── Admin transfer (two-step) ─────────────────────────────────────────────────

#[test]
fn test_two_step_admin_transfer() {
    let s = setup();

    let new_admin = Address::generate(&s.env);
    s.engine.propose_admin(&s.admin, &new_admin);
    assert_eq!(s.engine.get_pending_admin(), Some(new_admin.clone()));

    // Only the proposed admin may accept.
    let stranger = Address::generate(&s.env);
    let result = s.engine.try_accept_admin(&stranger);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    s.engine.accept_admin(&new_admin);
    assert_eq!(s.engine.get_admin(), new_admin);
    assert_eq!(s.engine.get_pending_admin(), None);

    // The old admin is out.
    let result = s.engine.try_set_emergency_exit_enabled(&s.admin, &true);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_cancel_admin_transfer() {
    let s = setup();

    let new_admin = Address::generate(&s.env);
    s.engine.propose_admin(&s.admin, &new_admin);
    s.engine.cancel_admin_transfer(&s.admin);

    assert_eq!(s.engine.get_pending_admin(), None);
    let result = s.engine.try_accept_admin(&new_admin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidArgument),
        _ => unreachable!("Expected InvalidArgument error"),
    }
}
