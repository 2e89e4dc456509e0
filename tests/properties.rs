//! Per-tick invariants over arbitrary input streams

use glam::Vec2;
use proptest::prelude::*;

use wormwood::consts::*;
use wormwood::sim::{
    AttackState, EntityPool, FrameTable, GamePhase, GameState, InputSnapshot, tick,
};

fn snapshot_from(bits: [bool; 10]) -> InputSnapshot {
    InputSnapshot {
        left: bits[0],
        right: bits[1],
        up: bits[2],
        down: bits[3],
        forward: bits[4],
        backward: bits[5],
        attack: bits[6],
        pointer_primary: bits[7],
        activate: bits[8],
        confirm: bits[9],
        ..Default::default()
    }
}

fn input_streams() -> impl Strategy<Value = Vec<InputSnapshot>> {
    prop::collection::vec(any::<[bool; 10]>().prop_map(snapshot_from), 1..600)
}

fn valid_attack_step(prev: AttackState, next: AttackState) -> bool {
    match (prev, next) {
        (AttackState::Idle, AttackState::Idle) => true,
        (AttackState::Idle, AttackState::Attacking { elapsed }) => elapsed == 1,
        (AttackState::Attacking { elapsed: a }, AttackState::Attacking { elapsed: b }) => {
            b == a + 1 && b < ATTACK_DURATION
        }
        (AttackState::Attacking { elapsed }, AttackState::Cooldown { remaining }) => {
            elapsed + 1 == ATTACK_DURATION && remaining == ATTACK_COOLDOWN
        }
        (AttackState::Cooldown { remaining: a }, AttackState::Cooldown { remaining: b }) => {
            b + 1 == a
        }
        (AttackState::Cooldown { remaining }, AttackState::Idle) => remaining == 1,
        _ => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn player_invariants_hold_every_tick(seed in any::<u64>(), inputs in input_streams()) {
        let mut state = GameState::new(seed, FrameTable::placeholder());
        let mut score = 0;
        let mut round = 1;
        let mut drop_speed = BASE_DROP_SPEED;

        for input in &inputs {
            let phase_before = state.phase();
            let attack_before = state.player.attack;
            let was_grounded = state.player.on_ground;

            tick(&mut state, input);

            let player = &state.player;
            let half = player.half_width();
            prop_assert!(player.pos.x >= half && player.pos.x <= FIELD_WIDTH - half);
            prop_assert!(player.pos.y + player.half_height() <= FLOOR_Y);
            prop_assert!(player.jumps_left <= MAX_JUMPS);
            prop_assert!((0..=MAX_HEALTH).contains(&player.health));
            prop_assert!((0.0..=MAX_DEPTH).contains(&player.pos.z));

            if phase_before == GamePhase::Playing {
                prop_assert!(
                    valid_attack_step(attack_before, player.attack),
                    "{:?} -> {:?}", attack_before, player.attack
                );
                if player.on_ground && !was_grounded {
                    prop_assert_eq!(player.jumps_left, MAX_JUMPS);
                }
            }

            if phase_before != GamePhase::Menu {
                prop_assert!(state.director.score >= score);
                prop_assert!(state.director.round >= round);
                prop_assert!(state.director.drop_speed >= drop_speed);
            }
            score = state.director.score;
            round = state.director.round;
            drop_speed = state.director.drop_speed;

            prop_assert!(state.director.drop_speed >= BASE_DROP_SPEED);
            prop_assert!(state.director.round <= FINAL_ROUND || state.director.pill_taken);
        }
    }

    #[test]
    fn knockback_speed_strictly_decays(
        angle in 0.0f32..std::f32::consts::TAU,
        force in 1.0f32..60.0,
        x in 100.0f32..900.0,
        y in 50.0f32..450.0,
    ) {
        let mut pool = EntityPool::new();
        pool.spawn_enemy(x, y, 2.0);
        pool.enemies[0].apply_knockback(Vec2::from_angle(angle), force);

        let mut last = pool.enemies[0].knockback.length();
        for _ in 0..1_000 {
            let removed = pool.update();
            if !removed.is_empty() {
                prop_assert!(removed[0].by_player);
                return Ok(());
            }
            let speed = pool.enemies[0].knockback.length();
            prop_assert!(speed < last);
            last = speed;
        }
        prop_assert!(false, "knocked-back enemy never left the field");
    }
}
