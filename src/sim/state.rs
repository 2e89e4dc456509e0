//! Session state
//!
//! `GameState` is the single owner of everything the simulation mutates:
//! player, falling actors, round bookkeeping, the seeded RNG and the
//! session-wide mode flags (depth mode, character set).

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::FrameTable;
use super::entities::{EntityPool, PillKind};
use super::player::{Player, PlayerContext};
use super::round::{GamePhase, RoundDirector};
use crate::consts::*;
use crate::settings::{CharacterSet, Settings};

/// Things that happened during a tick, for UI and audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    Collected { glyph: char, points: u64 },
    PerfectParry { enemy_id: u32 },
    MissedParry { enemy_id: u32, health: i32 },
    RangedHit { enemy_id: u32 },
    EnemyDestroyed { enemy_id: u32, reward: u64 },
    PillsOffered,
    PillTaken(PillKind),
    RoundComplete { round: u32 },
    RoundStarted { round: u32 },
    GameOver { score: u64 },
    ReturnedToMenu,
}

/// HUD-level view of the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub round: u32,
    pub health: i32,
    pub drop_speed: f32,
    pub depth_mode: bool,
    pub character_set: CharacterSet,
    pub keys_collected: u64,
    pub player_pos: Vec3,
    pub actors: usize,
    pub time_ticks: u64,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub director: RoundDirector,
    pub player: Player,
    /// Falling actors (sorted by id)
    pub pool: EntityPool,
    /// Pseudo-3D depth axis, switched by the pills
    pub depth_mode: bool,
    /// Glyph pool for collectibles; Math grants flight
    pub character_set: CharacterSet,
    /// Frame sets, resolved once at startup
    pub frames: FrameTable,
    /// Collectibles picked up this game
    pub keys_collected: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
}

impl GameState {
    /// New session on the menu screen
    pub fn new(seed: u64, frames: FrameTable) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            director: RoundDirector::new(),
            player: Player::spawn(FIELD_WIDTH / 2.0),
            pool: EntityPool::new(),
            depth_mode: false,
            character_set: CharacterSet::default(),
            frames,
            keys_collected: 0,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    pub fn from_settings(settings: &Settings, frames: FrameTable) -> Self {
        let mut state = Self::new(settings.seed, frames);
        state.character_set = settings.character_set;
        state
    }

    pub fn phase(&self) -> GamePhase {
        self.director.phase
    }

    /// Flags the player controller reads
    pub fn player_context(&self) -> PlayerContext {
        PlayerContext {
            flight_enabled: self.character_set.allows_flight(),
            depth_mode: self.depth_mode,
        }
    }

    pub fn set_character_set(&mut self, set: CharacterSet) {
        if self.character_set != set {
            log::info!("Character set -> {}", set.as_str());
            self.character_set = set;
        }
    }

    /// Switching depth off also drops the player back to the front plane
    pub fn set_depth_mode(&mut self, enabled: bool) {
        self.depth_mode = enabled;
        if !enabled {
            self.player.reset_depth();
        }
    }

    /// Menu -> Playing
    pub fn start_game(&mut self) {
        self.director.start_game();
        self.player = Player::spawn(FIELD_WIDTH / 2.0);
        self.pool.clear();
        self.depth_mode = false;
        self.keys_collected = 0;
        self.events.push(GameEvent::GameStarted);
    }

    /// Confirmation on the RoundComplete or GameOver screen
    pub fn confirm(&mut self) {
        match self.director.confirm() {
            Some(GamePhase::Playing) => {
                self.player.health = MAX_HEALTH;
                self.pool.clear();
                self.events.push(GameEvent::RoundStarted {
                    round: self.director.round,
                });
            }
            Some(GamePhase::GameOver) => {
                self.events.push(GameEvent::GameOver {
                    score: self.director.score,
                });
            }
            Some(GamePhase::Menu) => {
                self.pool.clear();
                self.events.push(GameEvent::ReturnedToMenu);
            }
            Some(GamePhase::RoundComplete) | None => {}
        }
    }

    /// Escape from a running game
    pub fn back_to_menu(&mut self) {
        if self.director.phase == GamePhase::Menu {
            return;
        }
        self.director.back_to_menu();
        self.pool.clear();
        self.events.push(GameEvent::ReturnedToMenu);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.director.phase,
            score: self.director.score,
            round: self.director.round,
            health: self.player.health,
            drop_speed: self.director.drop_speed,
            depth_mode: self.depth_mode,
            character_set: self.character_set,
            keys_collected: self.keys_collected,
            player_pos: self.player.pos,
            actors: self.pool.len(),
            time_ticks: self.time_ticks,
        }
    }
}
