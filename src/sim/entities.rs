//! Falling actors: collectibles, enemies and pills
//!
//! Each kind has its own motion rule. Removal is reported back as
//! [`Despawn`] records so the caller can score player kills without
//! diffing the pool.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Pill colors offered at the pill threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PillKind {
    /// Turns the depth axis on
    Red,
    /// Keeps the game flat and resets depth
    Blue,
}

/// Green glyph worth points when touched
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub id: u32,
    /// Top-left position
    pub pos: Vec3,
    pub speed: f32,
    pub glyph: char,
    pub points: u64,
}

impl Collectible {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, COLLECTIBLE_WIDTH, COLLECTIBLE_HEIGHT)
    }
}

/// Red glyph that hurts on contact unless parried
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    /// Top-left position
    pub pos: Vec3,
    pub speed: f32,
    pub knocked_back: bool,
    pub knockback: Vec2,
    pub decay: f32,
    /// Knocked away by the player (parry, missed parry or ranged hit)
    pub destroyed_by_player: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec3, speed: f32) -> Self {
        Self {
            id,
            pos,
            speed,
            knocked_back: false,
            knockback: Vec2::ZERO,
            decay: KNOCKBACK_DECAY,
            destroyed_by_player: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Send the enemy flying; it will not fall again
    pub fn apply_knockback(&mut self, direction: Vec2, force: f32) {
        self.knocked_back = true;
        self.destroyed_by_player = true;
        self.knockback = direction * force;
    }

    fn update(&mut self) -> Option<DespawnReason> {
        if self.knocked_back {
            self.pos.x += self.knockback.x;
            self.pos.y += self.knockback.y;
            self.knockback *= self.decay;

            let out_of_bounds = self.pos.x < -OFFSCREEN_MARGIN
                || self.pos.x > FIELD_WIDTH + OFFSCREEN_MARGIN
                || self.pos.y < -OFFSCREEN_MARGIN
                || self.pos.y > SCREEN_HEIGHT + OFFSCREEN_MARGIN;
            // A spent knockback that never left the field still counts as a kill
            let spent = self.knockback.length() < KNOCKBACK_REST_SPEED;
            (out_of_bounds || spent).then_some(DespawnReason::KnockedOut)
        } else {
            self.pos.y += self.speed;
            (self.pos.y > FLOOR_Y).then_some(DespawnReason::FellOut)
        }
    }
}

/// Capsule that toggles the depth axis
#[derive(Debug, Clone, PartialEq)]
pub struct Pill {
    pub id: u32,
    /// Top-left position
    pub pos: Vec3,
    pub speed: f32,
    pub kind: PillKind,
}

impl Pill {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PILL_WIDTH, PILL_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Collectible,
    Enemy,
    Pill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DespawnReason {
    /// Fell past the floor line
    FellOut,
    /// Knocked out of the field by the player
    KnockedOut,
}

/// An actor removed during [`EntityPool::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Despawn {
    pub id: u32,
    pub kind: ActorKind,
    pub reason: DespawnReason,
    pub by_player: bool,
}

/// What the player picked up this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pickups {
    pub collectibles: Vec<Collectible>,
    pub pill: Option<PillKind>,
}

impl Pickups {
    pub fn points(&self) -> u64 {
        self.collectibles.iter().map(|c| c.points).sum()
    }
}

/// All falling actors (each list sorted by id)
#[derive(Debug, Clone, Default)]
pub struct EntityPool {
    pub collectibles: Vec<Collectible>,
    pub enemies: Vec<Enemy>,
    pub pills: Vec<Pill>,
    next_id: u32,
}

impl EntityPool {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        // Default-constructed pools start at 0; keep ids non-zero
        self.next_id = self.next_id.max(1);
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Collectible falling at `drop_speed`
    pub fn spawn_collectible(&mut self, x: f32, y: f32, glyph: char, drop_speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.collectibles.push(Collectible {
            id,
            pos: Vec3::new(x, y, 0.0),
            speed: drop_speed,
            glyph,
            points: COLLECTIBLE_POINTS,
        });
        id
    }

    /// Enemy falling one unit faster than `drop_speed`
    pub fn spawn_enemy(&mut self, x: f32, y: f32, drop_speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(
            id,
            Vec3::new(x, y, 0.0),
            drop_speed + ENEMY_EXTRA_SPEED,
        ));
        id
    }

    /// Pill falling a little slower than `drop_speed`
    pub fn spawn_pill(&mut self, x: f32, y: f32, kind: PillKind, drop_speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.pills.push(Pill {
            id,
            pos: Vec3::new(x, y, 0.0),
            speed: drop_speed + PILL_SPEED_OFFSET,
            kind,
        });
        id
    }

    /// Move every actor one tick and drop the ones that left the field
    pub fn update(&mut self) -> Vec<Despawn> {
        let mut removed = Vec::new();

        self.collectibles.retain_mut(|c| {
            c.pos.y += c.speed;
            let gone = c.pos.y > FLOOR_Y;
            if gone {
                removed.push(Despawn {
                    id: c.id,
                    kind: ActorKind::Collectible,
                    reason: DespawnReason::FellOut,
                    by_player: false,
                });
            }
            !gone
        });

        self.enemies.retain_mut(|e| match e.update() {
            Some(reason) => {
                removed.push(Despawn {
                    id: e.id,
                    kind: ActorKind::Enemy,
                    reason,
                    by_player: e.destroyed_by_player,
                });
                false
            }
            None => true,
        });

        self.pills.retain_mut(|p| {
            p.pos.y += p.speed;
            let gone = p.pos.y > FLOOR_Y;
            if gone {
                removed.push(Despawn {
                    id: p.id,
                    kind: ActorKind::Pill,
                    reason: DespawnReason::FellOut,
                    by_player: false,
                });
            }
            !gone
        });

        removed
    }

    /// Remove collectibles and pills touching `body`.
    /// Taking any pill clears every pending pill.
    pub fn collect(&mut self, body: &Rect) -> Pickups {
        let mut pickups = Pickups::default();

        let mut kept = Vec::with_capacity(self.collectibles.len());
        for c in self.collectibles.drain(..) {
            if c.bounds().intersects(body) {
                pickups.collectibles.push(c);
            } else {
                kept.push(c);
            }
        }
        self.collectibles = kept;

        if let Some(pill) = self.pills.iter().find(|p| p.bounds().intersects(body)) {
            pickups.pill = Some(pill.kind);
            self.pills.clear();
        }

        pickups
    }

    pub fn clear(&mut self) {
        self.collectibles.clear();
        self.enemies.clear();
        self.pills.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.collectibles.is_empty() && self.enemies.is_empty() && self.pills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.collectibles.len() + self.enemies.len() + self.pills.len()
    }
}
