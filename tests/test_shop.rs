mod common;

use invader_shop::compute::move_player_right;
use invader_shop::error::ShopError;
use invader_shop::shop::*;

use common::make_state;

#[test]
fn keys_map_to_upgrades() {
    assert_eq!(Upgrade::from_key('1'), Some(Upgrade::Health));
    assert_eq!(Upgrade::from_key('2'), Some(Upgrade::Speed));
    assert_eq!(Upgrade::from_key('3'), Some(Upgrade::BulletPower));
    assert_eq!(Upgrade::from_key('4'), None);
    assert_eq!(Upgrade::from_key(CLOSE_KEY), None);
    for upgrade in Upgrade::ALL {
        assert_eq!(Upgrade::from_key(upgrade.key()), Some(upgrade));
    }
}

#[test]
fn health_upgrade() {
    let s = purchase(&make_state(), Upgrade::Health).unwrap();
    assert_eq!(s.player.health, 4);
    assert_eq!(s.currency, 50);
}

#[test]
fn speed_upgrade_makes_the_player_faster() {
    let s = purchase(&make_state(), Upgrade::Speed).unwrap();
    assert_eq!(s.player.speed, 6);
    assert_eq!(s.currency, 50);
    assert_eq!(move_player_right(&s).player.rect.x, 381);
}

#[test]
fn bullet_power_is_paid_for_but_changes_nothing() {
    let before = make_state();
    let s = purchase(&before, Upgrade::BulletPower).unwrap();
    assert_eq!(s.currency, 50);
    assert_eq!(s.player, before.player);
}

#[test]
fn exact_balance_is_enough() {
    let mut s = make_state();
    s.currency = 50;
    let s2 = purchase(&s, Upgrade::Health).unwrap();
    assert_eq!(s2.currency, 0);
}

#[test]
fn purchase_rejected_when_short() {
    let mut s = make_state();
    s.currency = 40;
    let err = purchase(&s, Upgrade::Health).unwrap_err();
    assert_eq!(
        err,
        ShopError::InsufficientFunds {
            upgrade: Upgrade::Health,
            cost: 50,
            available: 40,
        }
    );
    assert_eq!(err.to_string(), "cannot afford +1 health: costs 50, have 40");
    assert_eq!(s.currency, 40);
    assert_eq!(s.player.health, 3);
}

#[test]
fn spending_down_to_zero_then_rejecting() {
    let mut s = make_state();
    for upgrade in [Upgrade::Health, Upgrade::Speed] {
        s = purchase(&s, upgrade).unwrap();
    }
    assert_eq!(s.currency, 0);
    assert!(purchase(&s, Upgrade::BulletPower).is_err());
    assert_eq!(s.player.health, 4);
    assert_eq!(s.player.speed, 6);
}
