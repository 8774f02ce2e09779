//! Neon Arena game library.
//!
//! A first-person arena shooter: a static walled arena, three weapon
//! archetypes, and waves of patrolling enemies driven by a four-state
//! behavior machine. Game logic is hand-integrated each frame; the
//! physics crate contributes colliders and spatial queries only.

pub mod gameplay;
pub mod screens;
pub mod theme;
pub mod third_party;

#[cfg(feature = "dev")]
pub mod dev_tools;

#[cfg(test)]
pub mod testing;

use bevy::prelude::*;

/// Primary game states.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Initial loading state.
    #[default]
    Loading,
    /// Active gameplay state.
    InGame,
}

/// Per-frame system ordering.
///
/// The chain encodes the frame contract: player physics runs before enemy
/// behavior, which runs before spawning, which precedes collision
/// arbitration. Collision tests read positions written earlier in the
/// same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Keyboard/mouse handling: movement flags, jump, dodge, weapon input.
    Input,
    /// Player velocity integration and ground clamping.
    Movement,
    /// Enemy state machine evaluation and steering.
    Ai,
    /// Time-gated perimeter spawning.
    Spawning,
    /// Contact damage and obstacle unstick.
    Collision,
    /// Timed effects: flash/marker lifetimes, death reporting.
    Effects,
    /// HUD refresh.
    Ui,
}

/// Run condition: gameplay systems only run while a round is active.
pub fn gameplay_running(state: Option<Res<State<GameState>>>) -> bool {
    state.is_some_and(|state| *state.get() == GameState::InGame)
}

/// Root plugin: states, system-set ordering, and all domain plugins.
pub fn plugin(app: &mut App) {
    app.init_state::<GameState>();

    app.configure_sets(
        Update,
        (
            GameSet::Input,
            GameSet::Movement,
            GameSet::Ai,
            GameSet::Spawning,
            GameSet::Collision,
            GameSet::Effects,
            GameSet::Ui,
        )
            .chain(),
    );

    app.add_plugins((screens::plugin, third_party::plugin, gameplay::plugin));

    #[cfg(feature = "dev")]
    app.add_plugins(dev_tools::plugin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn game_state_default_is_loading() {
        assert_eq!(GameState::default(), GameState::Loading);
    }

    #[test]
    fn game_states_are_distinct() {
        assert_ne!(GameState::Loading, GameState::InGame);
    }

    #[test]
    fn gameplay_running_requires_state() {
        assert!(!gameplay_running(None));
    }
}
