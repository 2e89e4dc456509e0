//! Player-vs-enemy resolution
//!
//! Contact is judged first: touching an enemy inside the parry window is a
//! perfect parry, any other touch is a missed parry that costs health.
//! Enemies that only overlap the attack hitbox take a ranged hit. Every
//! outcome knocks the enemy away; the kill reward is paid later, when the
//! entity pool reports the enemy gone.

use glam::Vec2;

use super::collision::{Rect, push_direction};
use super::entities::{ActorKind, Despawn, Enemy};
use super::player::Player;
use crate::consts::*;
use crate::sim::animation::Direction;

/// How an enemy was dealt with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    PerfectParry,
    MissedParry,
    RangedHit,
}

impl Strike {
    pub fn force(self) -> f32 {
        match self {
            Strike::PerfectParry => PARRY_FORCE,
            Strike::MissedParry => MISSED_PARRY_FORCE,
            Strike::RangedHit => RANGED_HIT_FORCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub enemy_id: u32,
    pub strike: Strike,
    pub knockback: Vec2,
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatReport {
    pub resolutions: Vec<Resolution>,
    /// Zero or negative
    pub health_delta: i32,
}

impl CombatReport {
    pub fn count(&self, strike: Strike) -> usize {
        self.resolutions.iter().filter(|r| r.strike == strike).count()
    }
}

/// Attack hitbox in front of the player, only while attacking
pub fn attack_hitbox(player: &Player) -> Option<Rect> {
    if !player.attack.is_attacking() {
        return None;
    }

    let body = player.bounds();
    let hitbox = match player.facing {
        Direction::Right => Rect::new(body.right(), body.top(), ATTACK_RANGE, body.h),
        Direction::Left => Rect::new(body.left() - ATTACK_RANGE, body.top(), ATTACK_RANGE, body.h),
        Direction::Up => Rect::new(body.left(), body.top() - ATTACK_RANGE, body.h, ATTACK_RANGE),
        Direction::Down => Rect::new(body.left(), body.bottom(), body.h, ATTACK_RANGE),
    };
    Some(hitbox)
}

/// Resolve contact and ranged hits for this tick.
///
/// Enemies already flying from an earlier knockback are left alone.
pub fn resolve(player: &Player, enemies: &mut [Enemy]) -> CombatReport {
    let mut report = CombatReport::default();

    let body = player.bounds();
    let center = player.center();
    let facing = player.facing.unit();
    let parrying = player.attack.in_parry_window();
    let hitbox = attack_hitbox(player);

    for enemy in enemies.iter_mut().filter(|e| !e.knocked_back) {
        let bounds = enemy.bounds();

        let (strike, direction) = if bounds.intersects(&body) {
            let direction = push_direction(center, enemy.center(), facing);
            if parrying {
                (Strike::PerfectParry, direction)
            } else {
                (Strike::MissedParry, direction)
            }
        } else if hitbox.is_some_and(|h| h.intersects(&bounds)) {
            (Strike::RangedHit, facing)
        } else {
            continue;
        };

        enemy.apply_knockback(direction, strike.force());
        if strike == Strike::MissedParry {
            report.health_delta -= MISSED_PARRY_DAMAGE;
        }
        log::debug!("{:?} on enemy {}", strike, enemy.id);

        report.resolutions.push(Resolution {
            enemy_id: enemy.id,
            strike,
            knockback: enemy.knockback,
        });
    }

    report
}

/// Score for enemies the player knocked out of the field
pub fn kill_rewards(despawns: &[Despawn]) -> u64 {
    despawns
        .iter()
        .filter(|d| d.kind == ActorKind::Enemy && d.by_player)
        .map(|_| ENEMY_REWARD)
        .sum()
}
