//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod animation;
pub mod collision;
pub mod combat;
pub mod entities;
pub mod input;
pub mod player;
pub mod round;
pub mod state;
pub mod tick;

pub use animation::{Direction, Frame, FrameSetId, FrameSources, FrameTable, ImageHandle, Side};
pub use collision::Rect;
pub use combat::{CombatReport, Strike};
pub use entities::{ActorKind, Despawn, DespawnReason, EntityPool, PillKind};
pub use input::InputSnapshot;
pub use player::{AttackState, JumpState, MotionMode, Player};
pub use round::{GamePhase, RoundDirector};
pub use state::{GameEvent, GameState, Snapshot};
pub use tick::{autopilot, tick};
