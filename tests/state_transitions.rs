//! Tests for game state transitions and round setup.

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use neon_arena::GameState;
use neon_arena::gameplay::enemies::Enemy;
use neon_arena::gameplay::player::Player;
use pretty_assertions::assert_eq;

fn create_game_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.add_plugins(InputPlugin);
    app.add_plugins(TransformPlugin);
    app.init_resource::<Assets<Mesh>>();
    app.init_resource::<Assets<StandardMaterial>>();
    app.add_plugins(neon_arena::plugin);
    app
}

#[test]
fn game_initializes_in_loading_state() {
    let mut app = create_game_app();
    app.update();
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::Loading);
}

#[test]
fn loading_auto_advances_into_the_arena() {
    let mut app = create_game_app();

    // One frame to queue the transition, one to apply it.
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::InGame);
}

#[test]
fn entering_the_arena_stands_up_the_round() {
    let mut app = create_game_app();
    app.update();
    app.update();
    app.update();

    let players = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .iter(app.world())
        .count();
    assert_eq!(players, 1);

    let enemies = app
        .world_mut()
        .query_filtered::<Entity, With<Enemy>>()
        .iter(app.world())
        .count();
    assert_eq!(enemies, 3, "expected the opening garrison");
}
