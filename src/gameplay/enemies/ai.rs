//! Enemy behavior: the four-state machine and its steering.

use bevy::prelude::*;

use super::{AiState, AttackClock, Enemy, EnemyKind, EnemyParams, PatrolRoute, enemy_params};
use crate::gameplay::player::Player;

/// Chase speed relative to base speed.
const CHASE_SPEED_MULTIPLIER: f32 = 1.5;

/// Retreat speed relative to base speed.
const RETREAT_SPEED_MULTIPLIER: f32 = 0.7;

/// A chasing enemy gives up past detection range times this.
const DISENGAGE_MULTIPLIER: f32 = 1.5;

/// A retreating enemy is home once this close to its patrol origin.
const PATROL_HOME_DISTANCE: f32 = 2.0;

/// A patrolling enemy advances its route once this close to the
/// current waypoint.
const WAYPOINT_REACHED_DISTANCE: f32 = 0.5;

// === Transitions ===

/// Evaluates one state transition from the distance thresholds.
///
/// Pure: steering and the attack clock are applied separately, after
/// the new state is known.
#[must_use]
pub fn next_state(
    state: AiState,
    params: &EnemyParams,
    distance_to_player: f32,
    distance_to_origin: f32,
) -> AiState {
    match state {
        AiState::Patrol => {
            if distance_to_player <= params.detection_range {
                AiState::Chase
            } else {
                AiState::Patrol
            }
        }
        AiState::Chase => {
            if distance_to_player <= params.attack_range {
                AiState::Attack
            } else if distance_to_player > params.detection_range * DISENGAGE_MULTIPLIER {
                AiState::Retreat
            } else {
                AiState::Chase
            }
        }
        AiState::Attack => {
            if distance_to_player > params.attack_range {
                AiState::Chase
            } else {
                AiState::Attack
            }
        }
        AiState::Retreat => {
            if distance_to_player <= params.detection_range {
                AiState::Chase
            } else if distance_to_origin <= PATROL_HOME_DISTANCE {
                AiState::Patrol
            } else {
                AiState::Retreat
            }
        }
    }
}

// === Behavior ===

/// Advances one enemy by one frame: transition, then the new state's
/// behavior.
pub(crate) fn advance_enemy(
    transform: &mut Transform,
    state: &mut AiState,
    route: &mut PatrolRoute,
    clock: &mut AttackClock,
    kind: EnemyKind,
    player_position: Vec3,
    delta: f32,
    now: f32,
) {
    let params = enemy_params(kind);
    let distance_to_player = transform.translation.distance(player_position);
    let distance_to_origin = transform.translation.distance(route.origin());

    *state = next_state(*state, &params, distance_to_player, distance_to_origin);

    match *state {
        AiState::Patrol => {
            let target = route.target();
            steer_toward(transform, target, params.speed, delta);
            if horizontal_distance(transform.translation, target) < WAYPOINT_REACHED_DISTANCE {
                route.advance();
            }
        }
        AiState::Chase => {
            steer_toward(
                transform,
                player_position,
                params.speed * CHASE_SPEED_MULTIPLIER,
                delta,
            );
        }
        AiState::Attack => {
            // Swing timing only; contact damage is resolved in the
            // collision pass.
            if clock
                .last_attack_at
                .is_none_or(|last| now - last >= params.attack_cooldown)
            {
                clock.last_attack_at = Some(now);
            }
        }
        AiState::Retreat => {
            steer_toward(
                transform,
                route.origin(),
                params.speed * RETREAT_SPEED_MULTIPLIER,
                delta,
            );
        }
    }
}

/// Walks the transform toward the target on the horizontal plane and
/// turns to face it. Vertical position is left alone — enemies stay on
/// their ground height.
fn steer_toward(transform: &mut Transform, target: Vec3, speed: f32, delta: f32) {
    let mut to_target = target - transform.translation;
    to_target.y = 0.0;
    let distance = to_target.length();
    if distance < f32::EPSILON {
        return;
    }

    let direction = to_target / distance;
    transform.translation += direction * (speed * delta);

    let face = Vec3::new(target.x, transform.translation.y, target.z);
    transform.look_at(face, Vec3::Y);
}

fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

// === Systems ===

/// Runs every enemy's behavior machine against the player's position.
/// Runs in `GameSet::Ai`, after player movement has settled this frame.
pub(super) fn update_enemies(
    time: Res<Time>,
    player: Single<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemies: Query<
        (
            &mut Transform,
            &mut AiState,
            &mut PatrolRoute,
            &mut AttackClock,
            &EnemyKind,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let delta = time.delta_secs();
    let now = time.elapsed_secs();
    let player_position = player.translation;

    for (mut transform, mut state, mut route, mut clock, kind) in &mut enemies {
        advance_enemy(
            &mut transform,
            &mut state,
            &mut route,
            &mut clock,
            *kind,
            player_position,
            delta,
            now,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DELTA: f32 = 1.0 / 60.0;

    fn grunt() -> EnemyParams {
        enemy_params(EnemyKind::Grunt)
    }

    // === Transition table ===

    #[test]
    fn patrol_holds_outside_detection_range() {
        let params = grunt();
        let state = next_state(
            AiState::Patrol,
            &params,
            params.detection_range + 1.0,
            100.0,
        );
        assert_eq!(state, AiState::Patrol);
    }

    #[test]
    fn patrol_switches_to_chase_inside_detection_range() {
        let params = grunt();
        let state = next_state(
            AiState::Patrol,
            &params,
            params.detection_range - 1.0,
            100.0,
        );
        assert_eq!(state, AiState::Chase);
    }

    #[test]
    fn chase_switches_to_attack_inside_attack_range() {
        let params = grunt();
        let state = next_state(AiState::Chase, &params, params.attack_range - 1.0, 100.0);
        assert_eq!(state, AiState::Attack);
    }

    #[test]
    fn chase_disengages_past_one_and_a_half_detection_range() {
        let params = grunt();
        let state = next_state(
            AiState::Chase,
            &params,
            params.detection_range * 1.5 + 1.0,
            100.0,
        );
        assert_eq!(state, AiState::Retreat);
    }

    #[test]
    fn chase_holds_between_attack_and_disengage_range() {
        let params = grunt();
        let state = next_state(AiState::Chase, &params, params.detection_range, 100.0);
        assert_eq!(state, AiState::Chase);
    }

    #[test]
    fn attack_falls_back_to_chase_out_of_range() {
        let params = grunt();
        let state = next_state(AiState::Attack, &params, params.attack_range + 1.0, 100.0);
        assert_eq!(state, AiState::Chase);
    }

    #[test]
    fn retreat_reengages_inside_detection_range() {
        let params = grunt();
        let state = next_state(
            AiState::Retreat,
            &params,
            params.detection_range - 1.0,
            100.0,
        );
        assert_eq!(state, AiState::Chase);
    }

    #[test]
    fn retreat_resumes_patrol_near_origin() {
        let params = grunt();
        let state = next_state(AiState::Retreat, &params, 100.0, 1.5);
        assert_eq!(state, AiState::Patrol);
    }

    #[test]
    fn retreat_holds_when_far_from_both() {
        let params = grunt();
        let state = next_state(AiState::Retreat, &params, 100.0, 50.0);
        assert_eq!(state, AiState::Retreat);
    }

    // === Behaviors ===

    fn make_enemy(position: Vec3, radius: f32) -> (Transform, AiState, PatrolRoute, AttackClock) {
        (
            Transform::from_translation(position),
            AiState::default(),
            PatrolRoute::circle(position, radius),
            AttackClock::default(),
        )
    }

    #[test]
    fn grunt_outside_detection_patrols_for_ten_simulated_seconds() {
        let spawn = Vec3::new(0.0, 1.0, 0.0);
        let player = Vec3::new(30.0, 2.0, 0.0) + spawn;
        let (mut transform, mut state, mut route, mut clock) = make_enemy(spawn, 5.0);

        let mut now = 0.0;
        for _ in 0..600 {
            advance_enemy(
                &mut transform,
                &mut state,
                &mut route,
                &mut clock,
                EnemyKind::Grunt,
                player,
                DELTA,
                now,
            );
            assert_eq!(state, AiState::Patrol);
            now += DELTA;
        }
        // Never swung at anyone either.
        assert_eq!(clock.last_attack_at, None);
    }

    #[test]
    fn patrolling_enemy_walks_its_route() {
        let spawn = Vec3::new(0.0, 1.0, 0.0);
        let player = Vec3::new(100.0, 2.0, 0.0);
        let (mut transform, mut state, mut route, mut clock) = make_enemy(spawn, 5.0);

        // Enemy starts at the circle center; the route begins at
        // (radius, 0) relative to spawn. Walk long enough to consume
        // the first waypoint.
        let mut now = 0.0;
        for _ in 0..600 {
            advance_enemy(
                &mut transform,
                &mut state,
                &mut route,
                &mut clock,
                EnemyKind::Grunt,
                player,
                DELTA,
                now,
            );
            now += DELTA;
        }
        assert!(route.current > 0, "route never advanced");
        // Stays on its ground height.
        assert!((transform.translation.y - spawn.y).abs() < 1e-4);
    }

    #[test]
    fn chase_within_attack_range_starts_attacking() {
        let spawn = Vec3::new(0.0, 1.0, 0.0);
        let player = Vec3::new(3.0, 2.0, 0.0);
        let (mut transform, mut state, mut route, mut clock) = make_enemy(spawn, 5.0);
        state = AiState::Chase;

        advance_enemy(
            &mut transform,
            &mut state,
            &mut route,
            &mut clock,
            EnemyKind::Grunt,
            player,
            DELTA,
            0.0,
        );
        assert_eq!(state, AiState::Attack);
    }

    #[test]
    fn attack_clock_records_once_per_cooldown_window() {
        let spawn = Vec3::new(0.0, 1.0, 0.0);
        // Within grunt attack range (4) and staying there.
        let player = Vec3::new(3.0, 1.0, 0.0);
        let (mut transform, mut state, mut route, mut clock) = make_enemy(spawn, 5.0);
        state = AiState::Attack;

        let mut recorded = Vec::new();
        let mut now = 0.0;
        // Two full cooldown windows of frames.
        for _ in 0..120 {
            let before = clock.last_attack_at;
            advance_enemy(
                &mut transform,
                &mut state,
                &mut route,
                &mut clock,
                EnemyKind::Grunt,
                player,
                DELTA,
                now,
            );
            if clock.last_attack_at != before {
                recorded.push(now);
            }
            now += DELTA;
        }

        // One swing at t=0, one when the 1s cooldown elapses. Not one
        // per frame.
        assert_eq!(recorded.len(), 2);
        assert!((recorded[1] - recorded[0] - grunt().attack_cooldown).abs() <= DELTA + 1e-4);
    }

    #[test]
    fn chasing_enemy_closes_on_the_player() {
        let spawn = Vec3::new(0.0, 1.0, 0.0);
        let player = Vec3::new(10.0, 2.0, 0.0);
        let (mut transform, mut state, mut route, mut clock) = make_enemy(spawn, 5.0);

        let before = transform.translation.distance(player);
        advance_enemy(
            &mut transform,
            &mut state,
            &mut route,
            &mut clock,
            EnemyKind::Scout,
            player,
            DELTA,
            0.0,
        );
        assert_eq!(state, AiState::Chase);
        assert!(transform.translation.distance(player) < before);
    }

    #[test]
    fn retreating_enemy_heads_home_and_resumes_patrol() {
        let spawn = Vec3::new(0.0, 1.0, 0.0);
        let player = Vec3::new(200.0, 2.0, 0.0);
        let (mut transform, mut state, mut route, mut clock) = make_enemy(spawn, 5.0);
        *(&mut state) = AiState::Retreat;
        transform.translation = Vec3::new(0.0, 1.0, 12.0);

        let mut now = 0.0;
        for _ in 0..3600 {
            advance_enemy(
                &mut transform,
                &mut state,
                &mut route,
                &mut clock,
                EnemyKind::Grunt,
                player,
                DELTA,
                now,
            );
            now += DELTA;
            if state == AiState::Patrol {
                break;
            }
        }
        assert_eq!(state, AiState::Patrol);
    }
}
