//! Upgrades bought with currency between fights.

use std::fmt;

use crate::config::UPGRADE_COST;
use crate::entities::GameState;
use crate::error::ShopError;

/// Key that leaves the shop.
pub const CLOSE_KEY: char = 'q';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upgrade {
    /// One more point of health.
    Health,
    /// One more world unit per frame of sideways movement.
    Speed,
    /// Reserved slot: it is paid for but changes nothing yet.
    BulletPower,
}

impl Upgrade {
    pub const ALL: [Upgrade; 3] = [Upgrade::Health, Upgrade::Speed, Upgrade::BulletPower];

    pub fn from_key(key: char) -> Option<Upgrade> {
        match key {
            '1' => Some(Upgrade::Health),
            '2' => Some(Upgrade::Speed),
            '3' => Some(Upgrade::BulletPower),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Upgrade::Health => '1',
            Upgrade::Speed => '2',
            Upgrade::BulletPower => '3',
        }
    }

    pub fn cost(self) -> u32 {
        UPGRADE_COST
    }
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Upgrade::Health => "+1 health",
            Upgrade::Speed => "+1 speed",
            Upgrade::BulletPower => "bullet power",
        };
        f.write_str(label)
    }
}

/// Buy `upgrade`, or explain why not.  A rejected purchase leaves the state as it was.
pub fn purchase(state: &GameState, upgrade: Upgrade) -> Result<GameState, ShopError> {
    let cost = upgrade.cost();
    if state.currency < cost {
        return Err(ShopError::InsufficientFunds {
            upgrade,
            cost,
            available: state.currency,
        });
    }

    let mut next = state.clone();
    next.currency -= cost;
    match upgrade {
        Upgrade::Health => next.player.health += 1,
        Upgrade::Speed => next.player.speed += 1,
        // TODO: give bullets a damage value once enemies carry hit points.
        Upgrade::BulletPower => {}
    }
    log::info!("bought {upgrade} for {cost}, {} left", next.currency);
    Ok(next)
}
