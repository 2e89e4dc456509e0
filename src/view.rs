//! Render boundary
//!
//! The simulation never draws. [`scene`] flattens a session into sprites,
//! each an opaque frame (or glyph) plus an integer top-left position, in
//! back-to-front order. Outside of play the field is empty.

use serde::Serialize;

use crate::sim::animation::Frame;
use crate::sim::entities::PillKind;
use crate::sim::round::GamePhase;
use crate::sim::state::GameState;

/// Glyph drawn for every enemy
pub const ENEMY_GLYPH: char = 'X';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Player,
    Collectible,
    Enemy,
    Pill,
}

/// What to blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visual {
    Frame(Frame),
    /// Text glyph (green for collectibles, red for enemies)
    Glyph(char),
    Pill(PillKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub visual: Visual,
    /// Top-left corner in screen pixels
    pub x: i32,
    pub y: i32,
    /// Uniform scale (depth mode shrinks the player)
    pub scale: f32,
}

impl Sprite {
    fn at(kind: SpriteKind, visual: Visual, x: f32, y: f32) -> Self {
        Self {
            kind,
            visual,
            x: x.round() as i32,
            y: y.round() as i32,
            scale: 1.0,
        }
    }
}

/// Sprites for the current tick; the player is drawn last
pub fn scene(state: &GameState) -> Vec<Sprite> {
    if state.phase() != GamePhase::Playing {
        return Vec::new();
    }

    let pool = &state.pool;
    let mut sprites = Vec::with_capacity(pool.len() + 1);

    sprites.extend(pool.collectibles.iter().map(|c| {
        Sprite::at(SpriteKind::Collectible, Visual::Glyph(c.glyph), c.pos.x, c.pos.y)
    }));
    sprites.extend(
        pool.enemies
            .iter()
            .map(|e| Sprite::at(SpriteKind::Enemy, Visual::Glyph(ENEMY_GLYPH), e.pos.x, e.pos.y)),
    );
    sprites.extend(
        pool.pills
            .iter()
            .map(|p| Sprite::at(SpriteKind::Pill, Visual::Pill(p.kind), p.pos.x, p.pos.y)),
    );

    let player = &state.player;
    let body = player.bounds();
    let frame = player.animator.frame(&state.frames);
    let mut sprite = Sprite::at(SpriteKind::Player, Visual::Frame(frame), body.left(), body.top());
    sprite.scale = player.scale;
    sprites.push(sprite);

    sprites
}
