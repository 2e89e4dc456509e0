//! Round lifecycle
//!
//! Menu -> Playing -> RoundComplete -> Playing ... -> GameOver -> Menu.
//! The director also owns spawn cadence, the drop-speed difficulty and the
//! one-shot pill offer. It never touches the player; health comes in as a
//! parameter and entity spawning goes through the pool.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{EntityPool, PillKind};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for activation
    #[default]
    Menu,
    Playing,
    /// Round target reached, waiting for confirmation
    RoundComplete,
    GameOver,
}

/// Difficulty, score and round bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct RoundDirector {
    pub phase: GamePhase,
    pub score: u64,
    /// 1-based
    pub round: u32,
    /// Score when the current round started
    round_base: u64,
    /// Shared fall speed for every spawned actor
    pub drop_speed: f32,
    /// Playing ticks since the game started (drives the ambient ramp)
    game_ticks: u64,
    spawn_timer: u32,
    /// Pills already spawned this round
    pub pill_offered: bool,
    /// A pill was taken at some point this game
    pub pill_taken: bool,
}

impl Default for RoundDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundDirector {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            round: 1,
            round_base: 0,
            drop_speed: BASE_DROP_SPEED,
            game_ticks: 0,
            spawn_timer: 0,
            pill_offered: false,
            pill_taken: false,
        }
    }

    /// Menu -> Playing with everything reset
    pub fn start_game(&mut self) {
        *self = Self {
            phase: GamePhase::Playing,
            ..Self::new()
        };
        log::info!("Game started: round 1, drop speed {:.1}", self.drop_speed);
    }

    /// Score gained since the current round began
    pub fn round_score(&self) -> u64 {
        self.score - self.round_base
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Ambient difficulty ramp, once per playing tick
    pub fn advance_ramp(&mut self) {
        self.game_ticks += 1;
        if self.game_ticks % RAMP_INTERVAL == 0 {
            // Round steps may already have pushed past the cap; never pull it back
            if self.drop_speed < MAX_DROP_SPEED {
                self.drop_speed = (self.drop_speed + RAMP_STEP).min(MAX_DROP_SPEED);
                log::debug!("Drop speed ramped to {:.1}", self.drop_speed);
            }
        }
    }

    /// Count the spawn timer up and release a wave once it passes the
    /// interval. Returns the number of actors spawned.
    pub fn spawn_wave(&mut self, rng: &mut Pcg32, pool: &mut EntityPool, glyphs: &[char]) -> usize {
        self.spawn_timer += 1;
        if self.spawn_timer <= SPAWN_INTERVAL {
            return 0;
        }
        self.spawn_timer = 0;

        let count = rng.random_range(1..=MAX_COLLECTIBLES_PER_SPAWN);
        for _ in 0..count {
            let x = rng.random_range(0..=(FIELD_WIDTH - 20.0) as i32) as f32;
            let y = rng.random_range(-50..=-10) as f32;
            let glyph = match glyphs.len() {
                0 => '?',
                n => glyphs[rng.random_range(0..n)],
            };
            pool.spawn_collectible(x, y, glyph, self.drop_speed);
        }

        let mut spawned = count as usize;
        if rng.random::<f64>() > ENEMY_SPAWN_ROLL {
            let x = rng.random_range(0..=(FIELD_WIDTH - 30.0) as i32) as f32;
            let y = rng.random_range(-50..=-10) as f32;
            pool.spawn_enemy(x, y, self.drop_speed);
            spawned += 1;
        }
        spawned
    }

    /// Spawn the red/blue pair once the pill threshold is crossed.
    /// Returns true on the tick the pair appears.
    pub fn offer_pills(&mut self, pool: &mut EntityPool) -> bool {
        if self.pill_offered || self.score < PILL_SCORE_THRESHOLD {
            return false;
        }
        self.pill_offered = true;
        pool.spawn_pill(FIELD_WIDTH / 3.0, PILL_SPAWN_Y, PillKind::Red, self.drop_speed);
        pool.spawn_pill(FIELD_WIDTH * 2.0 / 3.0, PILL_SPAWN_Y, PillKind::Blue, self.drop_speed);
        log::info!("Pill choice offered in round {}", self.round);
        true
    }

    pub fn record_pill(&mut self, kind: PillKind) {
        self.pill_taken = true;
        log::info!("{:?} pill taken in round {}", kind, self.round);
    }

    /// End-of-tick checks while playing. Game over wins over round
    /// completion. Returns the new phase when one was entered.
    pub fn evaluate(&mut self, health: i32) -> Option<GamePhase> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        if health <= 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over in round {} with score {}", self.round, self.score);
        } else if self.round_score() >= ROUND_SCORE_TARGET {
            self.phase = GamePhase::RoundComplete;
            log::info!("Round {} complete with score {}", self.round, self.score);
        } else {
            return None;
        }
        Some(self.phase)
    }

    /// Confirmation on a RoundComplete or GameOver screen
    pub fn confirm(&mut self) -> Option<GamePhase> {
        match self.phase {
            GamePhase::RoundComplete => {
                // From the final round on, a pill taken earlier in the game is
                // the only way forward; without one the game ends here.
                if self.round >= FINAL_ROUND && !self.pill_taken {
                    self.phase = GamePhase::GameOver;
                    log::info!("Round {} passed without a pill: game over", self.round);
                } else {
                    self.next_round();
                }
                Some(self.phase)
            }
            GamePhase::GameOver => {
                self.phase = GamePhase::Menu;
                log::info!("Back to menu");
                Some(self.phase)
            }
            GamePhase::Menu | GamePhase::Playing => None,
        }
    }

    /// Abandon the current game
    pub fn back_to_menu(&mut self) {
        if self.phase != GamePhase::Menu {
            self.phase = GamePhase::Menu;
            log::info!("Left game in round {} with score {}", self.round, self.score);
        }
    }

    fn next_round(&mut self) {
        self.round += 1;
        self.round_base = self.score;
        self.drop_speed += ROUND_SPEED_STEP;
        self.spawn_timer = 0;
        self.pill_offered = false;
        self.phase = GamePhase::Playing;
        log::info!(
            "Round {} started: drop speed {:.1}",
            self.round,
            self.drop_speed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn playing() -> RoundDirector {
        let mut director = RoundDirector::new();
        director.start_game();
        director
    }

    #[test]
    fn test_start_game_resets() {
        let mut director = playing();
        director.score = 500;
        director.round = 3;
        director.drop_speed = 7.0;
        director.pill_taken = true;
        director.start_game();
        assert_eq!(director.phase, GamePhase::Playing);
        assert_eq!(director.score, 0);
        assert_eq!(director.round, 1);
        assert_eq!(director.drop_speed, BASE_DROP_SPEED);
        assert!(!director.pill_taken);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pool = EntityPool::new();
        let mut director = playing();
        let glyphs = ['a', 'b'];

        for _ in 0..SPAWN_INTERVAL {
            assert_eq!(director.spawn_wave(&mut rng, &mut pool, &glyphs), 0);
        }
        let spawned = director.spawn_wave(&mut rng, &mut pool, &glyphs);
        assert!((1..=4).contains(&spawned));
        assert_eq!(pool.len(), spawned);
        assert!((1..=3).contains(&pool.collectibles.len()));
        for c in &pool.collectibles {
            assert!(glyphs.contains(&c.glyph));
            assert!(c.pos.x >= 0.0 && c.pos.x <= FIELD_WIDTH - 20.0);
            assert!(c.pos.y >= -50.0 && c.pos.y <= -10.0);
            assert_eq!(c.speed, director.drop_speed);
        }
        // Timer restarted
        assert_eq!(director.spawn_wave(&mut rng, &mut pool, &glyphs), 0);
    }

    #[test]
    fn test_round_complete_at_target() {
        let mut director = playing();
        director.award(ROUND_SCORE_TARGET - 1);
        assert_eq!(director.evaluate(100), None);
        director.award(1);
        assert_eq!(director.evaluate(100), Some(GamePhase::RoundComplete));
        // Only fires once
        assert_eq!(director.evaluate(100), None);
    }

    #[test]
    fn test_game_over_wins_over_round_complete() {
        let mut director = playing();
        director.award(ROUND_SCORE_TARGET);
        assert_eq!(director.evaluate(0), Some(GamePhase::GameOver));
    }

    #[test]
    fn test_next_round_keeps_score() {
        let mut director = playing();
        director.award(ROUND_SCORE_TARGET);
        director.evaluate(100);
        assert_eq!(director.confirm(), Some(GamePhase::Playing));
        assert_eq!(director.round, 2);
        assert_eq!(director.score, ROUND_SCORE_TARGET);
        assert_eq!(director.round_score(), 0);
        assert_eq!(director.drop_speed, BASE_DROP_SPEED + ROUND_SPEED_STEP);
        // The carried-over score does not complete round 2 on its own
        assert_eq!(director.evaluate(100), None);
    }

    #[test]
    fn test_final_round_requires_pill() {
        let mut director = playing();
        for _ in 1..FINAL_ROUND {
            director.award(ROUND_SCORE_TARGET);
            director.evaluate(100);
            director.confirm();
        }
        assert_eq!(director.round, FINAL_ROUND);
        director.award(ROUND_SCORE_TARGET);
        director.evaluate(100);
        assert_eq!(director.confirm(), Some(GamePhase::GameOver));
        assert_eq!(director.round, FINAL_ROUND);

        assert_eq!(director.confirm(), Some(GamePhase::Menu));
        assert_eq!(director.confirm(), None);
    }

    #[test]
    fn test_pill_taken_unlocks_later_rounds() {
        let mut director = playing();
        director.round = FINAL_ROUND;
        director.record_pill(PillKind::Blue);
        director.award(ROUND_SCORE_TARGET);
        director.evaluate(100);
        assert_eq!(director.confirm(), Some(GamePhase::Playing));
        assert_eq!(director.round, FINAL_ROUND + 1);
    }

    #[test]
    fn test_pills_offered_once_per_round() {
        let mut director = playing();
        let mut pool = EntityPool::new();
        director.award(PILL_SCORE_THRESHOLD - 1);
        assert!(!director.offer_pills(&mut pool));
        director.award(1);
        assert!(director.offer_pills(&mut pool));
        assert_eq!(pool.pills.len(), 2);
        assert_eq!(pool.pills[0].kind, PillKind::Red);
        assert_eq!(pool.pills[0].pos.x, FIELD_WIDTH / 3.0);
        assert_eq!(pool.pills[1].kind, PillKind::Blue);
        assert!(!director.offer_pills(&mut pool));
        assert_eq!(pool.pills.len(), 2);
    }

    #[test]
    fn test_ramp_is_capped() {
        let mut director = playing();
        for _ in 0..RAMP_INTERVAL - 1 {
            director.advance_ramp();
        }
        assert_eq!(director.drop_speed, BASE_DROP_SPEED);
        director.advance_ramp();
        assert_eq!(director.drop_speed, BASE_DROP_SPEED + RAMP_STEP);

        for _ in 0..RAMP_INTERVAL * 100 {
            director.advance_ramp();
        }
        assert_eq!(director.drop_speed, MAX_DROP_SPEED);
    }

    #[test]
    fn test_ramp_never_lowers_round_speed() {
        let mut director = playing();
        for _ in 0..RAMP_INTERVAL * 20 {
            director.advance_ramp();
        }
        assert_eq!(director.drop_speed, MAX_DROP_SPEED);

        director.award(ROUND_SCORE_TARGET);
        director.evaluate(100);
        director.confirm();
        let stepped = director.drop_speed;
        assert_eq!(stepped, MAX_DROP_SPEED + ROUND_SPEED_STEP);

        for _ in 0..RAMP_INTERVAL * 2 {
            director.advance_ramp();
            assert!(director.drop_speed >= stepped);
        }
        assert_eq!(director.drop_speed, stepped);
    }
}
