//! In-game HUD: health/stamina bars, ammo counter, score, reload
//! indicator, crosshair, and the controls overlay.
//!
//! The HUD polls player components and the arsenal every frame; nothing
//! here feeds back into the simulation.

use bevy::prelude::*;

use crate::gameplay::player::{Player, Score, Stamina};
use crate::gameplay::weapons::{Arsenal, weapon_stats};
use crate::gameplay::Health;
use crate::theme::palette;
use crate::{GameSet, GameState, gameplay_running};

// === Layout Constants ===

const BAR_WIDTH: f32 = 260.0;
const BAR_HEIGHT: f32 = 16.0;
const HUD_MARGIN: f32 = 20.0;

// === Components ===

/// Marker for the health bar fill node.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HealthBarFill;

/// Marker for the stamina bar fill node.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct StaminaBarFill;

/// Marker for the ammo counter text.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AmmoText;

/// Marker for the score text.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ScoreText;

/// Marker for the reload indicator text.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ReloadIndicator;

// === Spawning ===

/// Spawns the full overlay on entering `InGame`.
fn spawn_hud(mut commands: Commands) {
    // Bottom-left: vitals
    commands.spawn((
        Name::new("Vitals Panel"),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_MARGIN),
            bottom: Val::Px(HUD_MARGIN),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(palette::PANEL_BACKGROUND),
        DespawnOnExit(GameState::InGame),
        children![
            bar("Health Bar", palette::HEALTH_BAR_BG, bar_fill(HealthBarFill, palette::HEALTH_BAR_FILL)),
            bar("Stamina Bar", palette::STAMINA_BAR_BG, bar_fill(StaminaBarFill, palette::STAMINA_BAR_FILL)),
        ],
    ));

    // Bottom-right: weapon readout
    commands.spawn((
        Name::new("Weapon Panel"),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(HUD_MARGIN),
            bottom: Val::Px(HUD_MARGIN),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::FlexEnd,
            row_gap: Val::Px(4.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(palette::PANEL_BACKGROUND),
        DespawnOnExit(GameState::InGame),
        children![
            (
                Name::new("Ammo Counter"),
                AmmoText,
                Text::new(""),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::AMMO_TEXT),
            ),
            (
                Name::new("Reload Indicator"),
                ReloadIndicator,
                Text::new("RELOADING..."),
                TextFont::from_font_size(palette::FONT_SIZE_BODY),
                TextColor(palette::RELOAD_TEXT),
                Visibility::Hidden,
            ),
        ],
    ));

    // Top-left: score
    commands.spawn((
        Name::new("Score Display"),
        ScoreText,
        Text::new("Score: 0"),
        TextFont::from_font_size(palette::FONT_SIZE_HUD),
        TextColor(palette::SCORE_TEXT),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_MARGIN),
            top: Val::Px(HUD_MARGIN),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));

    // Center: crosshair
    commands.spawn((
        Name::new("Crosshair"),
        Text::new("+"),
        TextFont::from_font_size(palette::FONT_SIZE_CROSSHAIR),
        TextColor(palette::CROSSHAIR),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));

    // Top-right: controls overlay
    commands.spawn((
        Name::new("Controls Overlay"),
        Text::new(
            "WASD move | Shift sprint | Space jump | E dodge\n\
             Click fire | R reload | 1/2/3 weapons | Esc release mouse",
        ),
        TextFont::from_font_size(palette::FONT_SIZE_SMALL),
        TextColor(palette::BODY_TEXT),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(HUD_MARGIN),
            top: Val::Px(HUD_MARGIN),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));
}

/// Builds one backdrop bar with a fill child.
fn bar(
    name: &'static str,
    backdrop: Color,
    fill: impl Bundle,
) -> impl Bundle {
    (
        Name::new(name),
        Node {
            width: Val::Px(BAR_WIDTH),
            height: Val::Px(BAR_HEIGHT),
            ..default()
        },
        BackgroundColor(backdrop),
        children![fill],
    )
}

fn bar_fill(marker: impl Component, color: Color) -> impl Bundle {
    (
        marker,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(color),
    )
}

// === Update Systems ===

fn update_health_bar(
    player: Single<&Health, With<Player>>,
    mut fill: Single<&mut Node, With<HealthBarFill>>,
) {
    fill.width = Val::Percent(player.ratio() * 100.0);
}

fn update_stamina_bar(
    player: Single<&Stamina, With<Player>>,
    mut fill: Single<&mut Node, With<StaminaBarFill>>,
) {
    fill.width = Val::Percent(player.ratio() * 100.0);
}

fn update_ammo_counter(arsenal: Res<Arsenal>, mut text: Single<&mut Text, With<AmmoText>>) {
    let kind = arsenal.current();
    let slot = arsenal.slot(kind);
    let stats = weapon_stats(kind);
    **text = Text::new(format!(
        "{}  {} / {}",
        kind.display_name(),
        slot.ammo,
        stats.max_ammo
    ));
}

fn update_reload_indicator(
    arsenal: Res<Arsenal>,
    mut visibility: Single<&mut Visibility, With<ReloadIndicator>>,
) {
    **visibility = if arsenal.slot(arsenal.current()).is_reloading() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}

fn update_score(player: Single<&Score, With<Player>>, mut text: Single<&mut Text, With<ScoreText>>) {
    **text = Text::new(format!("Score: {}", player.0));
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<HealthBarFill>()
        .register_type::<StaminaBarFill>()
        .register_type::<AmmoText>()
        .register_type::<ScoreText>()
        .register_type::<ReloadIndicator>();

    app.add_systems(OnEnter(GameState::InGame), spawn_hud);

    app.add_systems(
        Update,
        (
            update_health_bar,
            update_stamina_bar,
            update_ammo_counter,
            update_reload_indicator,
            update_score,
        )
            .in_set(GameSet::Ui)
            .run_if(gameplay_running),
    );
}
