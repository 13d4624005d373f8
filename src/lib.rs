//! Click & Hide: a headless idle-clicker progression engine.
//!
//! The core is UI-agnostic: a view layer (terminal, window, test harness)
//! feeds timestamps and the two input verbs `attempt_click` /
//! `attempt_purchase` into a [`game::Game`] value and renders read-only
//! snapshots back out. All validation (click cooldown, affordability)
//! happens here, never in the view.

pub mod achievements;
pub mod autoplay;
pub mod game;
pub mod player;
pub mod save;
pub mod shop;
pub mod time;

mod simulator;
