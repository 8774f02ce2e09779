//! Screen plugins for each game state.

mod loading;

use bevy::prelude::*;

pub(crate) fn plugin(app: &mut App) {
    app.add_plugins(loading::plugin);
}
