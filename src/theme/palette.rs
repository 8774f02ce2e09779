//! Color constants and font size tokens for consistent UI theming.

#![allow(dead_code)] // Constants populated ahead of use across multiple phases.

use bevy::prelude::*;

// === Text Colors ===

/// Header/title text color (white).
pub const HEADER_TEXT: Color = Color::WHITE;

/// Body/subtitle text color (light gray).
pub const BODY_TEXT: Color = Color::srgb(0.7, 0.7, 0.7);

/// Score display text color (yellow-gold).
pub const SCORE_TEXT: Color = Color::srgb(1.0, 0.85, 0.0);

/// Ammo counter text color.
pub const AMMO_TEXT: Color = Color::srgb(0.925, 0.925, 0.925);

/// Reload indicator text color (alarm orange).
pub const RELOAD_TEXT: Color = Color::srgb(1.0, 0.55, 0.1);

/// Crosshair color.
pub const CROSSHAIR: Color = Color::srgba(1.0, 1.0, 1.0, 0.85);

// === HUD Bars ===

/// Health bar backdrop (dark red, shows "missing" HP).
pub const HEALTH_BAR_BG: Color = Color::srgb(0.35, 0.05, 0.05);

/// Health bar fill (green).
pub const HEALTH_BAR_FILL: Color = Color::srgb(0.1, 0.9, 0.1);

/// Stamina bar backdrop.
pub const STAMINA_BAR_BG: Color = Color::srgb(0.05, 0.1, 0.25);

/// Stamina bar fill (cyan-blue).
pub const STAMINA_BAR_FILL: Color = Color::srgb(0.2, 0.6, 1.0);

/// Panel behind HUD clusters (dark, semi-transparent).
pub const PANEL_BACKGROUND: Color = Color::srgba(0.05, 0.05, 0.08, 0.6);

// === Arena Colors ===

pub const GROUND: Color = Color::srgb(0.16, 0.16, 0.2);
pub const WALL: Color = Color::srgb(0.25, 0.25, 0.32);
pub const PLATFORM: Color = Color::srgb(0.3, 0.3, 0.38);
pub const OBSTACLE: Color = Color::srgb(0.35, 0.32, 0.28);

// === Entity Colors ===

pub const GRUNT: Color = Color::srgb(0.85, 0.35, 0.15);
pub const HEAVY: Color = Color::srgb(0.6, 0.1, 0.1);
pub const SCOUT: Color = Color::srgb(0.75, 0.85, 0.2);

/// Emissive flash shown the frame an enemy is hit.
pub const HIT_FLASH: Color = Color::srgb(1.0, 1.0, 1.0);

/// Hit marker puff at the raycast impact point.
pub const HIT_MARKER: Color = Color::srgb(1.0, 0.9, 0.4);

/// Muzzle flash light color.
pub const MUZZLE_FLASH: Color = Color::srgb(1.0, 0.8, 0.3);

// === Quadrant Point Lights ===

pub const QUADRANT_NE: Color = Color::srgb(1.0, 0.2, 0.4);
pub const QUADRANT_NW: Color = Color::srgb(0.2, 0.4, 1.0);
pub const QUADRANT_SE: Color = Color::srgb(0.2, 1.0, 0.5);
pub const QUADRANT_SW: Color = Color::srgb(0.9, 0.2, 1.0);

// === Font Size Tokens ===

pub const FONT_SIZE_HEADER: f32 = 64.0;
pub const FONT_SIZE_LABEL: f32 = 32.0;
pub const FONT_SIZE_HUD: f32 = 28.0;
pub const FONT_SIZE_CROSSHAIR: f32 = 26.0;
pub const FONT_SIZE_BODY: f32 = 16.0;
pub const FONT_SIZE_SMALL: f32 = 14.0;
