//! Scripted input source for demo mode.
//!
//! The pilot clicks at a fixed interval and then buys the cheapest
//! affordable item until nothing is affordable, going through exactly the
//! same `attempt_click` / `attempt_purchase` verbs as a human player.
//! There is no private path into the state.

use crate::game::Game;
use crate::time::elapsed_at_least;

/// What the pilot did in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveOutcome {
    pub clicked: bool,
    pub purchases: u32,
}

pub struct AutoPilot {
    click_interval: f64,
    last_click: f64,
}

impl AutoPilot {
    /// `clicks_per_sec` is the attempted rate; the account's own cooldown
    /// still applies on top.
    pub fn new(clicks_per_sec: f64, now: f64) -> Self {
        Self {
            click_interval: 1.0 / clicks_per_sec.max(0.001),
            last_click: now,
        }
    }

    /// Run one frame of scripted play against `game`.
    pub fn drive(&mut self, game: &mut Game, now: f64) -> DriveOutcome {
        let mut outcome = DriveOutcome::default();

        if elapsed_at_least(now, self.last_click, self.click_interval) {
            outcome.clicked = game.attempt_click(now).accepted;
            self.last_click = now;
        }

        // Greedy: cheapest first, repeat while anything is affordable.
        while let Some(id) = game.shop.cheapest_affordable(&game.player) {
            match game.attempt_purchase(id, now) {
                Ok(result) if result.success => outcome.purchases += 1,
                _ => break,
            }
        }

        outcome
    }
}
