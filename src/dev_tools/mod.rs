//! Development tools — only included with `cargo run --features dev`.
//!
//! Debug overlays, test harness keys, and inspector setup go here.
//! This module is stripped from release builds.

use bevy::prelude::*;

use crate::gameplay::combat::{apply_hit_flash, strike};
use crate::gameplay::enemies::{AiState, Enemy, EnemyAssets};
use crate::gameplay::player::Player;
use crate::gameplay::Health;
use crate::{GameSet, GameState};

/// Damage dealt per debug-hurt key press.
const DEBUG_STRIKE_DAMAGE: f32 = 25.0;

/// H strikes the enemy nearest to the player: exercises the damage,
/// flash, forced-retreat, and death-report pipeline without waiting on
/// product wiring for weapon hits.
fn debug_hurt_nearest(
    keyboard: Res<ButtonInput<KeyCode>>,
    assets: Option<Res<EnemyAssets>>,
    mut commands: Commands,
    player: Single<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemies: Query<(Entity, &Transform, &mut Health, &mut AiState), With<Enemy>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyH) {
        return;
    }
    let Some(assets) = assets else {
        return;
    };

    let player_position = player.translation;
    let nearest = enemies.iter_mut().min_by(|(_, a, ..), (_, b, ..)| {
        let da = a.translation.distance_squared(player_position);
        let db = b.translation.distance_squared(player_position);
        da.total_cmp(&db)
    });

    if let Some((entity, _, mut health, mut state)) = nearest {
        strike(&mut health, &mut state, DEBUG_STRIKE_DAMAGE);
        apply_hit_flash(&mut commands, entity, &assets);
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        debug_hurt_nearest
            .in_set(GameSet::Input)
            .run_if(in_state(GameState::InGame)),
    );
}
