//! Fixed timestep simulation tick
//!
//! One call = one input sample + one full pass:
//! player -> combat -> pickups -> falling actors -> round director.

use super::combat::{self, Strike};
use super::entities::{ActorKind, PillKind};
use super::input::InputSnapshot;
use super::player::AttackState;
use super::round::GamePhase;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &InputSnapshot) {
    state.events.clear();
    state.time_ticks += 1;

    // Idle/demo mode - the autopilot plays
    let input = if input.idle_mode {
        autopilot(state)
    } else {
        *input
    };

    match state.director.phase {
        GamePhase::Menu => {
            if input.activate {
                state.start_game();
            }
        }
        GamePhase::RoundComplete | GamePhase::GameOver => {
            if input.confirm {
                state.confirm();
            }
        }
        GamePhase::Playing => {
            if input.back_to_menu {
                state.back_to_menu();
            } else {
                play(state, &input);
            }
        }
    }
}

fn play(state: &mut GameState, input: &InputSnapshot) {
    let ctx = state.player_context();
    state.player.update(input, ctx, &state.frames);

    // Contact parries and ranged hits
    let report = combat::resolve(&state.player, &mut state.pool.enemies);
    if report.health_delta < 0 {
        state.player.take_damage(-report.health_delta);
    }
    for resolution in &report.resolutions {
        let enemy_id = resolution.enemy_id;
        state.events.push(match resolution.strike {
            Strike::PerfectParry => GameEvent::PerfectParry { enemy_id },
            Strike::MissedParry => GameEvent::MissedParry {
                enemy_id,
                health: state.player.health,
            },
            Strike::RangedHit => GameEvent::RangedHit { enemy_id },
        });
    }

    // Pickups
    let pickups = state.pool.collect(&state.player.bounds());
    state.director.award(pickups.points());
    for c in &pickups.collectibles {
        state.keys_collected += 1;
        state.events.push(GameEvent::Collected {
            glyph: c.glyph,
            points: c.points,
        });
    }
    if let Some(kind) = pickups.pill {
        state.set_depth_mode(kind == PillKind::Red);
        state.director.record_pill(kind);
        state.events.push(GameEvent::PillTaken(kind));
    }

    // Falling and knocked-back motion
    let despawns = state.pool.update();
    state.director.award(combat::kill_rewards(&despawns));
    for d in despawns
        .iter()
        .filter(|d| d.kind == ActorKind::Enemy && d.by_player)
    {
        log::debug!("Enemy {} destroyed (+{})", d.id, ENEMY_REWARD);
        state.events.push(GameEvent::EnemyDestroyed {
            enemy_id: d.id,
            reward: ENEMY_REWARD,
        });
    }

    // Round flow
    match state.director.evaluate(state.player.health) {
        Some(GamePhase::GameOver) => {
            state.events.push(GameEvent::GameOver {
                score: state.director.score,
            });
            return;
        }
        Some(GamePhase::RoundComplete) => {
            state.events.push(GameEvent::RoundComplete {
                round: state.director.round,
            });
            return;
        }
        _ => {}
    }

    if state.director.offer_pills(&mut state.pool) {
        state.events.push(GameEvent::PillsOffered);
    }
    state
        .director
        .spawn_wave(&mut state.rng, &mut state.pool, state.character_set.glyphs());
    state.director.advance_ramp();
}

/// Demo input: starts and confirms screens, chases pills and glyphs,
/// swings at nearby enemies and hops now and then.
pub fn autopilot(state: &GameState) -> InputSnapshot {
    let mut input = InputSnapshot::default();

    match state.director.phase {
        GamePhase::Menu => {
            input.activate = true;
            return input;
        }
        GamePhase::RoundComplete | GamePhase::GameOver => {
            input.confirm = true;
            return input;
        }
        GamePhase::Playing => {}
    }

    let player = &state.player;
    let center = player.center();

    // Pills first, then the lowest glyph (closest to being lost)
    let target_x = state
        .pool
        .pills
        .first()
        .map(|p| p.bounds().center().x)
        .or_else(|| {
            state
                .pool
                .collectibles
                .iter()
                .filter(|c| c.pos.y > 0.0)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|c| c.bounds().center().x)
        });

    if let Some(x) = target_x {
        let dx = x - center.x;
        if dx < -PLAYER_SPEED {
            input.left = true;
        } else if dx > PLAYER_SPEED {
            input.right = true;
        }
    }

    let threatened = state
        .pool
        .enemies
        .iter()
        .filter(|e| !e.knocked_back)
        .any(|e| e.center().distance(center) < ATTACK_RANGE);
    if threatened && player.attack == AttackState::Idle {
        input.attack = true;
    }

    // Edge-triggered jumps need a released tick in between
    input.up = player.on_ground && state.time_ticks % 90 == 0;

    input
}
