//! Player controller
//!
//! Owns the player's physics integration, the jump/wall-jump machine, the
//! attack/parry timer and frame selection. `Player::update` is a pure
//! per-tick transform of the current state and one input snapshot.

use glam::{Vec2, Vec3};

use super::animation::{Animator, Direction, FrameSetId, FrameTable, Pose, Side};
use super::collision::Rect;
use super::input::InputSnapshot;
use crate::consts::*;
use crate::depth_scale;

/// Movement model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionMode {
    /// Gravity, jumps and walls. The mode every game runs in.
    #[default]
    SideView,
    /// Free four-way movement without gravity. No input mapping selects it;
    /// it is only entered through [`Player::set_motion_mode`].
    TopDown,
}

/// Attack timer. Always cycles Idle -> Attacking -> Cooldown -> Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackState {
    #[default]
    Idle,
    /// Ticks since the attack started (1 on the tick it was triggered)
    Attacking { elapsed: u32 },
    Cooldown { remaining: u32 },
}

impl AttackState {
    pub fn is_attacking(&self) -> bool {
        matches!(self, AttackState::Attacking { .. })
    }

    /// Elapsed ticks while attacking
    pub fn elapsed(&self) -> Option<u32> {
        match self {
            AttackState::Attacking { elapsed } => Some(*elapsed),
            _ => None,
        }
    }

    /// Contact during the first `PARRY_WINDOW` ticks of an attack is a parry
    pub fn in_parry_window(&self) -> bool {
        self.elapsed().is_some_and(|e| e <= PARRY_WINDOW)
    }

    fn advance(self) -> Self {
        match self {
            AttackState::Idle => AttackState::Idle,
            AttackState::Attacking { elapsed } => {
                let elapsed = elapsed + 1;
                if elapsed >= ATTACK_DURATION {
                    AttackState::Cooldown {
                        remaining: ATTACK_COOLDOWN,
                    }
                } else {
                    AttackState::Attacking { elapsed }
                }
            }
            AttackState::Cooldown { remaining } => {
                if remaining <= 1 {
                    AttackState::Idle
                } else {
                    AttackState::Cooldown {
                        remaining: remaining - 1,
                    }
                }
            }
        }
    }
}

/// Derived jump state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpState {
    Grounded,
    Airborne,
    WallContact(Side),
}

/// Session flags the controller reads each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerContext {
    /// Active character set grants flight
    pub flight_enabled: bool,
    /// Pseudo-3D depth axis is live
    pub depth_mode: bool,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position; z is depth (0 = front)
    pub pos: Vec3,
    /// Gravity-integrated vertical velocity
    pub vy: f32,
    /// Horizontal impulse (wall jumps), decays geometrically
    pub vx: f32,
    /// Depth change applied this tick
    pub vz: f32,
    pub motion_mode: MotionMode,
    pub on_ground: bool,
    /// Wall being slid along, if any
    pub wall: Option<Side>,
    /// Mid-air jumps remaining
    pub jumps_left: u8,
    pub attack: AttackState,
    pub facing: Direction,
    pub animator: Animator,
    pub health: i32,
    /// Visual/body scale from depth (1.0 outside depth mode)
    pub scale: f32,
    /// Thrusting upward in flight mode this tick
    pub flying: bool,
    /// A facing input was held this tick
    moving: bool,
    /// Up was held last tick (jumps are edge-triggered)
    prev_up: bool,
}

impl Player {
    /// New player standing on the floor at horizontal position `x`
    pub fn spawn(x: f32) -> Self {
        let half = PLAYER_SIZE / 2.0;
        Self {
            pos: Vec3::new(x, FLOOR_Y - half, 0.0),
            vy: 0.0,
            vx: 0.0,
            vz: 0.0,
            motion_mode: MotionMode::SideView,
            on_ground: true,
            wall: None,
            jumps_left: MAX_JUMPS,
            attack: AttackState::Idle,
            facing: Direction::Down,
            animator: Animator::new(FrameSetId::Idle(Direction::Down)),
            health: MAX_HEALTH,
            scale: 1.0,
            flying: false,
            moving: false,
            prev_up: false,
        }
    }

    pub fn half_width(&self) -> f32 {
        PLAYER_SIZE * self.scale / 2.0
    }

    pub fn half_height(&self) -> f32 {
        PLAYER_SIZE * self.scale / 2.0
    }

    /// Body bounds in screen space
    pub fn bounds(&self) -> Rect {
        let size = PLAYER_SIZE * self.scale;
        Rect::from_center(self.pos.truncate(), size, size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos.truncate()
    }

    pub fn jump_state(&self) -> JumpState {
        match (self.on_ground, self.wall) {
            (true, _) => JumpState::Grounded,
            (false, Some(side)) => JumpState::WallContact(side),
            (false, None) => JumpState::Airborne,
        }
    }

    pub fn set_motion_mode(&mut self, mode: MotionMode) {
        if self.motion_mode != mode {
            log::debug!("Player motion mode {:?} -> {:?}", self.motion_mode, mode);
            self.motion_mode = mode;
            self.vy = 0.0;
            self.vx = 0.0;
            self.wall = None;
        }
    }

    /// Drop back to the front plane (depth mode switched off)
    pub fn reset_depth(&mut self) {
        self.pos.z = 0.0;
        self.vz = 0.0;
        self.scale = 1.0;
    }

    /// Apply damage, clamping at zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.health = (self.health - amount).max(0);
        self.health
    }

    /// Advance one tick
    pub fn update(&mut self, input: &InputSnapshot, ctx: PlayerContext, frames: &FrameTable) {
        self.update_depth(input, ctx);

        match self.motion_mode {
            MotionMode::SideView => self.update_side_view(input, ctx),
            MotionMode::TopDown => self.update_top_down(input),
        }

        self.update_facing(input);
        self.update_attack(input);

        let pose = self.pose();
        self.animator.apply(frames, self.facing, pose);

        self.prev_up = input.up;
    }

    fn update_depth(&mut self, input: &InputSnapshot, ctx: PlayerContext) {
        if !ctx.depth_mode {
            self.vz = 0.0;
            self.scale = 1.0;
            return;
        }

        self.vz = 0.0;
        if input.forward {
            self.vz -= DEPTH_SPEED;
        }
        if input.backward {
            self.vz += DEPTH_SPEED;
        }
        self.pos.z = (self.pos.z + self.vz).clamp(0.0, MAX_DEPTH);
        self.scale = depth_scale(self.pos.z);
    }

    fn update_side_view(&mut self, input: &InputSnapshot, ctx: PlayerContext) {
        let half_w = self.half_width();
        let half_h = self.half_height();

        if input.left && self.pos.x - half_w > 0.0 {
            self.pos.x -= PLAYER_SPEED;
        }
        if input.right && self.pos.x + half_w < FIELD_WIDTH {
            self.pos.x += PLAYER_SPEED;
        }

        self.flying = false;
        if ctx.flight_enabled {
            if input.up {
                self.vy = FLIGHT_LIFT;
                self.on_ground = false;
                self.flying = true;
            }
        } else if input.up && !self.prev_up {
            self.jump();
        }

        // Horizontal impulse
        if self.vx.abs() > IMPULSE_REST {
            self.pos.x += self.vx;
            self.vx *= IMPULSE_DECAY;
        } else {
            self.vx = 0.0;
        }

        if self.pos.x - half_w < 0.0 {
            self.pos.x = half_w;
            self.vx = 0.0;
        } else if self.pos.x + half_w > FIELD_WIDTH {
            self.pos.x = FIELD_WIDTH - half_w;
            self.vx = 0.0;
        }

        // Wall slide: airborne and pushing into a field edge
        self.wall = None;
        if !self.on_ground {
            if input.left && self.pos.x - half_w <= 0.0 {
                self.wall = Some(Side::Left);
            } else if input.right && self.pos.x + half_w >= FIELD_WIDTH {
                self.wall = Some(Side::Right);
            }
            if self.wall.is_some() {
                self.vy = self.vy.min(WALL_SLIDE_MAX_VY);
            }
        }

        if !self.flying {
            self.vy += GRAVITY;
        }
        self.pos.y += self.vy;

        if self.pos.y + half_h >= FLOOR_Y {
            self.pos.y = FLOOR_Y - half_h;
            self.vy = 0.0;
            self.on_ground = true;
            self.wall = None;
            self.jumps_left = MAX_JUMPS;
        } else {
            self.on_ground = false;
        }
    }

    /// Rising edge of up: ground jump, wall jump or air jump
    fn jump(&mut self) {
        match self.jump_state() {
            JumpState::Grounded => {
                self.vy = JUMP_STRENGTH;
                self.on_ground = false;
            }
            JumpState::WallContact(side) => {
                self.vy = (JUMP_STRENGTH * WALL_JUMP_FACTOR).trunc();
                // Push away from the wall
                self.vx = -side.sign() * WALL_JUMP_IMPULSE;
                self.wall = None;
            }
            JumpState::Airborne => {
                if self.jumps_left > 0 {
                    self.jumps_left -= 1;
                    self.vy = JUMP_STRENGTH;
                }
            }
        }
    }

    fn update_top_down(&mut self, input: &InputSnapshot) {
        let half_w = self.half_width();
        let half_h = self.half_height();

        if input.left && self.pos.x - half_w > 0.0 {
            self.pos.x -= PLAYER_SPEED;
        }
        if input.right && self.pos.x + half_w < FIELD_WIDTH {
            self.pos.x += PLAYER_SPEED;
        }
        if input.up && self.pos.y - half_h > 0.0 {
            self.pos.y -= PLAYER_SPEED;
        }
        if input.down && self.pos.y + half_h < FLOOR_Y {
            self.pos.y += PLAYER_SPEED;
        }
        self.flying = false;
        self.wall = None;
    }

    fn update_facing(&mut self, input: &InputSnapshot) {
        let top_down = self.motion_mode == MotionMode::TopDown;
        let facing = if input.left {
            Some(Direction::Left)
        } else if input.right {
            Some(Direction::Right)
        } else if input.up {
            Some(Direction::Up)
        } else if top_down && input.down {
            Some(Direction::Down)
        } else {
            None
        };

        self.moving = facing.is_some();
        if let Some(facing) = facing {
            self.facing = facing;
        }
    }

    fn update_attack(&mut self, input: &InputSnapshot) {
        if self.attack == AttackState::Idle && input.attack_requested() {
            log::debug!("Attack started facing {:?}", self.facing);
            self.attack = AttackState::Attacking { elapsed: 0 };
        }
        self.attack = self.attack.advance();
    }

    fn pose(&self) -> Pose {
        let side_view = self.motion_mode == MotionMode::SideView;
        if let AttackState::Attacking { elapsed } = self.attack {
            Pose::Attacking { elapsed }
        } else if side_view && self.flying && !self.on_ground {
            Pose::Flying
        } else if side_view && !self.on_ground && self.wall.is_none() {
            Pose::Airborne
        } else if self.moving {
            Pose::Moving
        } else {
            Pose::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> FrameTable {
        FrameTable::placeholder()
    }

    fn run(player: &mut Player, input: InputSnapshot, ticks: u32) {
        let table = frames();
        for _ in 0..ticks {
            player.update(&input, PlayerContext::default(), &table);
        }
    }

    fn held(f: impl FnOnce(&mut InputSnapshot)) -> InputSnapshot {
        let mut input = InputSnapshot::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_idle_on_ground_is_stable() {
        let mut player = Player::spawn(500.0);
        let start = player.pos;
        run(&mut player, InputSnapshot::default(), 100);
        assert_eq!(player.pos, start);
        assert!(player.on_ground);
        assert_eq!(player.animator.set, FrameSetId::Idle(Direction::Down));
        assert!(player.animator.index < 2);
    }

    #[test]
    fn test_ground_jump_and_landing() {
        let mut player = Player::spawn(500.0);
        let floor_y = player.pos.y;
        let jump = held(|i| i.up = true);
        run(&mut player, jump, 1);
        assert!(!player.on_ground);
        // Jump velocity plus one tick of gravity
        assert_eq!(player.vy, JUMP_STRENGTH + GRAVITY);
        assert_eq!(player.jumps_left, MAX_JUMPS);

        // Holding up does not re-trigger; eventually lands
        run(&mut player, jump, 60);
        assert!(player.on_ground);
        assert_eq!(player.pos.y, floor_y);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn test_air_jumps_consume_budget() {
        let mut player = Player::spawn(500.0);
        let up = held(|i| i.up = true);
        let none = InputSnapshot::default();

        run(&mut player, up, 1);
        run(&mut player, none, 1);
        run(&mut player, up, 1);
        assert_eq!(player.jumps_left, MAX_JUMPS - 1);
        run(&mut player, none, 1);
        run(&mut player, up, 1);
        assert_eq!(player.jumps_left, 0);

        // Budget exhausted: rising edge does nothing
        let vy_before = player.vy;
        run(&mut player, none, 1);
        run(&mut player, up, 1);
        assert_eq!(player.jumps_left, 0);
        assert_eq!(player.vy, vy_before + 2.0 * GRAVITY);

        // Budget restored on landing
        run(&mut player, none, 120);
        assert!(player.on_ground);
        assert_eq!(player.jumps_left, MAX_JUMPS);
    }

    #[test]
    fn test_horizontal_clamp_at_edges() {
        let mut player = Player::spawn(30.0);
        run(&mut player, held(|i| i.left = true), 10);
        assert_eq!(player.pos.x, player.half_width());

        let mut player = Player::spawn(FIELD_WIDTH - 30.0);
        run(&mut player, held(|i| i.right = true), 10);
        assert_eq!(player.pos.x, FIELD_WIDTH - player.half_width());
    }

    #[test]
    fn test_wall_slide_and_wall_jump() {
        let mut player = Player::spawn(PLAYER_SIZE / 2.0);
        player.pos.y = 200.0;
        player.on_ground = false;
        player.vy = 10.0;

        let push_left = held(|i| i.left = true);
        run(&mut player, push_left, 1);
        assert_eq!(player.jump_state(), JumpState::WallContact(Side::Left));
        assert!(player.vy <= WALL_SLIDE_MAX_VY + GRAVITY);

        let wall_jump = held(|i| {
            i.left = true;
            i.up = true;
        });
        let x_before = player.pos.x;
        run(&mut player, wall_jump, 1);
        // Pushed right, away from the left wall
        assert!(player.pos.x > x_before);
        assert!(player.vx > 0.0);
        assert_eq!(player.vy, (JUMP_STRENGTH * WALL_JUMP_FACTOR).trunc() + GRAVITY);
        assert_eq!(player.jumps_left, MAX_JUMPS);
    }

    #[test]
    fn test_impulse_decays_to_rest() {
        let mut player = Player::spawn(500.0);
        player.vx = 10.0;
        run(&mut player, InputSnapshot::default(), 1);
        assert!((player.vx - 8.5).abs() < 1e-5);
        run(&mut player, InputSnapshot::default(), 40);
        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn test_flight_overrides_gravity() {
        let table = frames();
        let ctx = PlayerContext {
            flight_enabled: true,
            depth_mode: false,
        };
        let mut player = Player::spawn(500.0);
        let start_y = player.pos.y;
        let up = held(|i| i.up = true);
        for _ in 0..5 {
            player.update(&up, ctx, &table);
        }
        assert_eq!(player.vy, FLIGHT_LIFT);
        assert_eq!(player.pos.y, start_y + 5.0 * FLIGHT_LIFT);
        assert_eq!(player.animator.set, FrameSetId::Fly);
        // Flight never spends the jump budget
        assert_eq!(player.jumps_left, MAX_JUMPS);
    }

    #[test]
    fn test_attack_cycle() {
        let mut player = Player::spawn(500.0);
        let attack = held(|i| i.pointer_primary = true);
        run(&mut player, attack, 1);
        assert_eq!(player.attack, AttackState::Attacking { elapsed: 1 });
        assert!(player.attack.in_parry_window());

        run(&mut player, attack, ATTACK_DURATION - 2);
        assert_eq!(
            player.attack,
            AttackState::Attacking {
                elapsed: ATTACK_DURATION - 1
            }
        );

        // Held attack cannot restart during cooldown
        run(&mut player, attack, 1);
        assert_eq!(
            player.attack,
            AttackState::Cooldown {
                remaining: ATTACK_COOLDOWN
            }
        );
        run(&mut player, attack, ATTACK_COOLDOWN - 1);
        assert_eq!(player.attack, AttackState::Cooldown { remaining: 1 });
        run(&mut player, attack, 1);
        assert_eq!(player.attack, AttackState::Idle);
        run(&mut player, attack, 1);
        assert_eq!(player.attack, AttackState::Attacking { elapsed: 1 });
    }

    #[test]
    fn test_attack_keeps_physics_running() {
        let mut player = Player::spawn(500.0);
        run(&mut player, held(|i| i.up = true), 1);
        let y = player.pos.y;
        run(&mut player, held(|i| i.attack = true), 1);
        assert!(player.attack.is_attacking());
        assert!(player.pos.y < y);
        assert!(matches!(player.animator.set, FrameSetId::Attack(_)));
    }

    #[test]
    fn test_facing_persists_without_input() {
        let mut player = Player::spawn(500.0);
        run(&mut player, held(|i| i.left = true), 3);
        assert_eq!(player.facing, Direction::Left);
        assert_eq!(player.animator.set, FrameSetId::Movement(Direction::Left));
        run(&mut player, InputSnapshot::default(), 3);
        assert_eq!(player.facing, Direction::Left);
        assert_eq!(player.animator.set, FrameSetId::Idle(Direction::Left));
    }

    #[test]
    fn test_airborne_shows_jump_frame() {
        let mut player = Player::spawn(500.0);
        let jump_right = held(|i| {
            i.right = true;
            i.up = true;
        });
        run(&mut player, jump_right, 1);
        run(&mut player, InputSnapshot::default(), 2);
        assert_eq!(player.animator.set, FrameSetId::Jump(Side::Right));
    }

    #[test]
    fn test_depth_axis() {
        let table = frames();
        let ctx = PlayerContext {
            flight_enabled: false,
            depth_mode: true,
        };
        let mut player = Player::spawn(500.0);
        let back = held(|i| i.backward = true);
        for _ in 0..100 {
            player.update(&back, ctx, &table);
        }
        assert_eq!(player.pos.z, MAX_DEPTH);
        assert!((player.scale - DEPTH_MIN_SCALE).abs() < 1e-6);
        // Smaller body rests lower on the floor line
        assert_eq!(player.pos.y + player.half_height(), FLOOR_Y);

        let fwd = held(|i| i.forward = true);
        player.update(&fwd, ctx, &table);
        assert_eq!(player.pos.z, MAX_DEPTH - DEPTH_SPEED);
        assert_eq!(player.vz, -DEPTH_SPEED);

        player.reset_depth();
        assert_eq!(player.pos.z, 0.0);
        assert_eq!(player.scale, 1.0);
    }

    #[test]
    fn test_top_down_mode_moves_freely() {
        let mut player = Player::spawn(500.0);
        player.set_motion_mode(MotionMode::TopDown);
        let y = player.pos.y;
        run(&mut player, held(|i| i.up = true), 10);
        assert_eq!(player.pos.y, y - 10.0 * PLAYER_SPEED);
        assert_eq!(player.vy, 0.0);

        run(&mut player, held(|i| i.down = true), 100);
        assert_eq!(player.pos.y + player.half_height(), FLOOR_Y);
        assert_eq!(player.facing, Direction::Down);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut player = Player::spawn(500.0);
        assert_eq!(player.take_damage(30), 70);
        assert_eq!(player.take_damage(500), 0);
        assert_eq!(player.health, 0);
    }
}
