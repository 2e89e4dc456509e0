//! Frame-set lookup and animation selection
//!
//! Frame sets are resolved once, when the [`FrameTable`] is built: empty
//! slots get placeholder frames, single frames are mirrored into a pair,
//! and missing right-facing movement frames mirror the left ones. After
//! that every lookup is an exhaustive match on [`FrameSetId`] and every set
//! holds at least two frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ATTACK_FRAME_TICKS, IDLE_ANIM_TICKS, MOVE_ANIM_TICKS};

/// Facing direction. There is no neutral facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// Screen-space unit vector (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
        }
    }

    /// Side used by two-sided frame sets (jump, attack)
    pub fn jump_side(self) -> Side {
        match self {
            Direction::Right => Side::Right,
            _ => Side::Left,
        }
    }

    pub fn attack_side(self) -> Side {
        match self {
            Direction::Left => Side::Left,
            _ => Side::Right,
        }
    }
}

/// Horizontal side (walls, two-sided frame sets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Opaque image handle owned by the asset collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

impl ImageHandle {
    /// Solid-rectangle stand-in for images that failed to load
    pub const PLACEHOLDER: ImageHandle = ImageHandle(u32::MAX);
}

/// One displayable frame: an image, optionally mirrored horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    pub image: ImageHandle,
    pub flip_x: bool,
}

impl Frame {
    pub fn new(image: ImageHandle) -> Self {
        Self {
            image,
            flip_x: false,
        }
    }

    pub fn mirrored(self) -> Self {
        Self {
            image: self.image,
            flip_x: !self.flip_x,
        }
    }
}

/// Key into the frame table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameSetId {
    Movement(Direction),
    Idle(Direction),
    Jump(Side),
    Attack(Side),
    /// Both arms extended, shown while flying
    Fly,
}

/// Raw images handed over by the asset loader; any slot may be empty
#[derive(Debug, Clone, Default)]
pub struct FrameSources {
    /// Indexed by [`Direction::index`]. An empty right slot mirrors the left one.
    pub movement: [Vec<ImageHandle>; 4],
    /// Explicit idle images per facing
    pub idle: [Vec<ImageHandle>; 4],
    /// Forward-facing idle pair, used for the `Down` facing when no explicit idle exists
    pub idle_neutral: Vec<ImageHandle>,
    /// Indexed by [`Side::index`]
    pub jump: [Vec<ImageHandle>; 2],
    pub attack: [Vec<ImageHandle>; 2],
    pub fly: Vec<ImageHandle>,
}

/// Resolved frame sets, each with at least two frames
#[derive(Debug, Clone)]
pub struct FrameTable {
    movement: [Vec<Frame>; 4],
    idle: [Vec<Frame>; 4],
    jump: [Vec<Frame>; 2],
    attack: [Vec<Frame>; 2],
    fly: Vec<Frame>,
}

/// Guarantee at least two frames: placeholders for empty sets, mirror singles
fn ensure_pair(images: &[ImageHandle]) -> Vec<Frame> {
    match images {
        [] => {
            let placeholder = Frame::new(ImageHandle::PLACEHOLDER);
            vec![placeholder, placeholder.mirrored()]
        }
        [only] => {
            let frame = Frame::new(*only);
            vec![frame, frame.mirrored()]
        }
        many => many.iter().copied().map(Frame::new).collect(),
    }
}

impl FrameTable {
    pub fn build(sources: &FrameSources) -> Self {
        let movement = Self::resolve_movement(&sources.movement);

        let idle = Direction::ALL.map(|dir| {
            let explicit = &sources.idle[dir.index()];
            if !explicit.is_empty() {
                ensure_pair(&explicit[..explicit.len().min(2)])
            } else if dir == Direction::Down && !sources.idle_neutral.is_empty() {
                let neutral = &sources.idle_neutral;
                ensure_pair(&neutral[..neutral.len().min(2)])
            } else {
                movement[dir.index()][..2].to_vec()
            }
        });

        let table = Self {
            jump: [ensure_pair(&sources.jump[0]), ensure_pair(&sources.jump[1])],
            attack: [
                ensure_pair(&sources.attack[0]),
                ensure_pair(&sources.attack[1]),
            ],
            fly: ensure_pair(&sources.fly),
            movement,
            idle,
        };

        let placeholders = table.placeholder_count();
        if placeholders > 0 {
            log::warn!("Frame table built with {placeholders} placeholder frames");
        }
        table
    }

    /// Table made entirely of placeholder frames
    pub fn placeholder() -> Self {
        Self::build(&FrameSources::default())
    }

    fn resolve_movement(sources: &[Vec<ImageHandle>; 4]) -> [Vec<Frame>; 4] {
        let left = Direction::Left.index();
        // First frame of any non-empty set, for directions with nothing loaded
        let donor = Direction::ALL
            .iter()
            .find_map(|d| sources[d.index()].first().copied());

        Direction::ALL.map(|dir| {
            let raw = &sources[dir.index()];
            if dir == Direction::Right && raw.is_empty() && !sources[left].is_empty() {
                return ensure_pair(&sources[left])
                    .into_iter()
                    .map(Frame::mirrored)
                    .collect();
            }
            if raw.is_empty() {
                return match donor {
                    Some(image) => ensure_pair(&[image]),
                    None => ensure_pair(&[]),
                };
            }
            ensure_pair(raw)
        })
    }

    /// Frames for a set; never fewer than two
    pub fn set(&self, id: FrameSetId) -> &[Frame] {
        match id {
            FrameSetId::Movement(dir) => &self.movement[dir.index()],
            FrameSetId::Idle(dir) => &self.idle[dir.index()],
            FrameSetId::Jump(side) => &self.jump[side.index()],
            FrameSetId::Attack(side) => &self.attack[side.index()],
            FrameSetId::Fly => &self.fly,
        }
    }

    fn all_sets(&self) -> impl Iterator<Item = &Vec<Frame>> {
        self.movement
            .iter()
            .chain(self.idle.iter())
            .chain(self.jump.iter())
            .chain(self.attack.iter())
            .chain(std::iter::once(&self.fly))
    }

    fn placeholder_count(&self) -> usize {
        self.all_sets()
            .flatten()
            .filter(|f| f.image == ImageHandle::PLACEHOLDER)
            .count()
    }
}

/// What the player body is doing this tick, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Attacking { elapsed: u32 },
    Flying,
    Airborne,
    Moving,
    Idle,
}

/// How the frame index advances inside the selected set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Advance one frame every N ticks, wrapping
    Every(u32),
    /// Show a fixed index (wrapped to the set length)
    Pinned(usize),
}

/// Map facing + pose to a frame set and its cadence
pub fn select_frame_set(facing: Direction, pose: Pose) -> (FrameSetId, Cadence) {
    match pose {
        Pose::Attacking { elapsed } => (
            FrameSetId::Attack(facing.attack_side()),
            Cadence::Pinned((elapsed / ATTACK_FRAME_TICKS) as usize),
        ),
        Pose::Flying => (FrameSetId::Fly, Cadence::Every(MOVE_ANIM_TICKS)),
        Pose::Airborne => (FrameSetId::Jump(facing.jump_side()), Cadence::Pinned(0)),
        Pose::Moving => (FrameSetId::Movement(facing), Cadence::Every(MOVE_ANIM_TICKS)),
        Pose::Idle => (FrameSetId::Idle(facing), Cadence::Every(IDLE_ANIM_TICKS)),
    }
}

/// Active frame set, index and cadence timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animator {
    pub set: FrameSetId,
    pub index: usize,
    pub timer: u32,
}

impl Animator {
    pub fn new(set: FrameSetId) -> Self {
        Self {
            set,
            index: 0,
            timer: 0,
        }
    }

    /// Select the set for this tick and advance within it
    pub fn apply(&mut self, table: &FrameTable, facing: Direction, pose: Pose) {
        let (set, cadence) = select_frame_set(facing, pose);
        if set != self.set {
            self.set = set;
            self.index = 0;
            self.timer = 0;
        }

        let len = table.set(set).len();
        match cadence {
            Cadence::Every(ticks) => {
                self.timer += 1;
                if self.timer >= ticks.max(1) {
                    self.timer = 0;
                    self.index = (self.index + 1) % len;
                }
            }
            Cadence::Pinned(index) => {
                self.index = index % len;
                self.timer = 0;
            }
        }
    }

    pub fn frame(&self, table: &FrameTable) -> Frame {
        let frames = table.set(self.set);
        frames[self.index % frames.len()]
    }
}
