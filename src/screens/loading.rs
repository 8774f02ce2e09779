//! Loading screen plugin.
//!
//! There is no menu flow: the arena is a single-session game that starts
//! as soon as the shell has spun up, so loading advances straight into
//! `InGame`.

use bevy::prelude::*;

use crate::GameState;
use crate::theme::widget;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Loading), setup_loading_screen)
        .add_systems(
            Update,
            check_loading_complete.run_if(in_state(GameState::Loading)),
        );
}

fn setup_loading_screen(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Loading Screen"),
        DespawnOnExit(GameState::Loading),
        children![widget::header("Loading...")],
    ));
}

fn check_loading_complete(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loading_advances_to_ingame() {
        let mut app = crate::testing::create_base_test_app();
        app.add_plugins(plugin);

        // First update runs check_loading_complete, second applies the
        // queued transition.
        app.update();
        app.update();

        let state = app.world().resource::<State<GameState>>();
        assert_eq!(*state.get(), GameState::InGame);
    }
}
