//! Weapon catalog, firing gates, and reload timing.
//!
//! The catalog is a closed enum with a `const` stats table; per-weapon
//! mutable state (ammo, reload) lives in slots owned by the [`Arsenal`]
//! resource. Slots are never recreated, so a reload in progress always
//! completes on the weapon that started it — switching away does not
//! move or cancel it.

mod fire;

pub use fire::{HitMarker, Lifetime, MuzzleFlash};

use bevy::prelude::*;

use crate::gameplay::cursor_locked;
use crate::{GameSet, GameState, gameplay_running};

// === Catalog ===

/// The three weapon archetypes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum WeaponKind {
    Pistol,
    Shotgun,
    Rifle,
}

impl WeaponKind {
    /// All weapons, in slot order.
    pub const ALL: &[Self] = &[Self::Pistol, Self::Shotgun, Self::Rifle];

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pistol => "Pistol",
            Self::Shotgun => "Shotgun",
            Self::Rifle => "Rifle",
        }
    }
}

/// Stats for a weapon. All values are compile-time constants.
#[derive(Debug, Clone, Copy)]
pub struct WeaponStats {
    pub damage: f32,
    pub range: f32,
    /// Minimum seconds between shots.
    pub fire_rate: f32,
    pub max_ammo: u32,
    /// Seconds a reload takes.
    pub reload_time: f32,
}

/// Look up stats for a weapon.
#[must_use]
pub const fn weapon_stats(kind: WeaponKind) -> WeaponStats {
    match kind {
        WeaponKind::Pistol => WeaponStats {
            damage: 25.0,
            range: 50.0,
            fire_rate: 0.5,
            max_ammo: 12,
            reload_time: 1.5,
        },
        WeaponKind::Shotgun => WeaponStats {
            damage: 60.0,
            range: 20.0,
            fire_rate: 1.0,
            max_ammo: 6,
            reload_time: 2.5,
        },
        WeaponKind::Rifle => WeaponStats {
            damage: 35.0,
            range: 80.0,
            fire_rate: 0.15,
            max_ammo: 30,
            reload_time: 2.0,
        },
    }
}

// === Slots ===

/// Mutable per-weapon state: remaining ammo and the running reload, if
/// any.
#[derive(Debug, Clone, Reflect)]
pub struct WeaponSlot {
    pub ammo: u32,
    reload: Option<Timer>,
}

impl WeaponSlot {
    #[must_use]
    fn full(kind: WeaponKind) -> Self {
        Self {
            ammo: weapon_stats(kind).max_ammo,
            reload: None,
        }
    }

    #[must_use]
    pub const fn is_reloading(&self) -> bool {
        self.reload.is_some()
    }

    /// Advances a running reload; completion refills the magazine.
    fn tick_reload(&mut self, kind: WeaponKind, delta: std::time::Duration) {
        if let Some(timer) = self.reload.as_mut() {
            timer.tick(delta);
            if timer.is_finished() {
                self.ammo = weapon_stats(kind).max_ammo;
                self.reload = None;
            }
        }
    }
}

// === Arsenal ===

/// The player's weapons: one slot per catalog entry, the active
/// selection, and the shared shot clock used for rate limiting.
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct Arsenal {
    current: WeaponKind,
    last_fire_at: Option<f32>,
    slots: [WeaponSlot; 3],
}

impl Default for Arsenal {
    fn default() -> Self {
        Self {
            current: WeaponKind::Pistol,
            last_fire_at: None,
            slots: [
                WeaponSlot::full(WeaponKind::Pistol),
                WeaponSlot::full(WeaponKind::Shotgun),
                WeaponSlot::full(WeaponKind::Rifle),
            ],
        }
    }
}

impl Arsenal {
    #[must_use]
    pub const fn current(&self) -> WeaponKind {
        self.current
    }

    #[must_use]
    pub fn slot(&self, kind: WeaponKind) -> &WeaponSlot {
        &self.slots[kind as usize]
    }

    fn slot_mut(&mut self, kind: WeaponKind) -> &mut WeaponSlot {
        &mut self.slots[kind as usize]
    }

    /// Selects a weapon. Neither weapon's ammo or reload state is
    /// touched; a reload running on the previous selection keeps going.
    pub fn switch_to(&mut self, kind: WeaponKind) {
        self.current = kind;
    }

    /// Whether a trigger pull at game time `now` would release a shot:
    /// the active weapon must be idle (not reloading), loaded, and past
    /// the rate limit.
    #[must_use]
    pub fn can_fire(&self, now: f32) -> bool {
        let slot = self.slot(self.current);
        if slot.is_reloading() || slot.ammo == 0 {
            return false;
        }
        self.last_fire_at
            .is_none_or(|last| now - last >= weapon_stats(self.current).fire_rate)
    }

    /// Releases a shot at game time `now` if the gates allow: spends one
    /// round and stamps the shot clock. Returns whether a shot was
    /// released — hit resolution is the fire system's job.
    pub fn fire(&mut self, now: f32) -> bool {
        if !self.can_fire(now) {
            return false;
        }
        self.last_fire_at = Some(now);
        let current = self.current;
        self.slot_mut(current).ammo -= 1;
        true
    }

    /// Begins reloading the active weapon. Silently does nothing if a
    /// reload is already running or the magazine is full.
    pub fn start_reload(&mut self) {
        let current = self.current;
        let stats = weapon_stats(current);
        let slot = self.slot_mut(current);
        if slot.is_reloading() || slot.ammo == stats.max_ammo {
            return;
        }
        slot.reload = Some(Timer::from_seconds(stats.reload_time, TimerMode::Once));
    }

    /// Advances every slot's reload. Reloads tick no matter which
    /// weapon is selected.
    pub fn tick_reloads(&mut self, delta: std::time::Duration) {
        for kind in WeaponKind::ALL {
            self.slot_mut(*kind).tick_reload(*kind, delta);
        }
    }
}

// === Systems ===

/// Ticks reload timers on every slot.
fn advance_reloads(time: Res<Time>, mut arsenal: ResMut<Arsenal>) {
    arsenal.tick_reloads(time.delta());
}

/// Digit keys select a weapon, R starts a reload.
fn handle_weapon_input(keyboard: Res<ButtonInput<KeyCode>>, mut arsenal: ResMut<Arsenal>) {
    if keyboard.just_pressed(KeyCode::Digit1) {
        arsenal.switch_to(WeaponKind::Pistol);
    }
    if keyboard.just_pressed(KeyCode::Digit2) {
        arsenal.switch_to(WeaponKind::Shotgun);
    }
    if keyboard.just_pressed(KeyCode::Digit3) {
        arsenal.switch_to(WeaponKind::Rifle);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        arsenal.start_reload();
    }
}

fn reset_arsenal(mut commands: Commands) {
    commands.insert_resource(Arsenal::default());
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<WeaponKind>().init_resource::<Arsenal>();

    app.add_systems(OnEnter(GameState::InGame), (reset_arsenal, fire::setup_fx_assets));

    app.add_systems(
        Update,
        (
            advance_reloads,
            (handle_weapon_input, fire::fire_weapon).run_if(cursor_locked),
        )
            .chain()
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );

    app.add_systems(
        Update,
        fire::despawn_expired
            .in_set(GameSet::Effects)
            .run_if(gameplay_running),
    );
}
