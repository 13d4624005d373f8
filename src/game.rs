//! The game context: one value owning the player, the shop, the
//! achievement engine and the save gateway.
//!
//! All mutation funnels through the two input verbs and the per-frame
//! `update`, in a fixed order: input → state mutation → achievement
//! evaluation → persistence flush. The view layer only ever reads.

use tracing::{info, warn};

use crate::achievements::{Achievements, Notification, Snapshot};
use crate::player::{ClickResult, Player, MONEY_START};
use crate::save::{apply_save, SaveGateway};
use crate::shop::{PurchaseResult, Shop, ShopError};

pub struct Game {
    pub player: Player,
    pub shop: Shop,
    pub achievements: Achievements,
    save: SaveGateway,
}

impl Game {
    /// Build a game over `save`, restoring a prior session if a record
    /// exists. An unreadable record starts a fresh game; it never blocks
    /// startup. Time gates are not part of the record, so they stay
    /// anchored at `now` and a loaded game cannot instantly fire a click
    /// or an income tick.
    pub fn new(save: SaveGateway, now: f64) -> Self {
        let mut game = Self {
            player: Player::new(now),
            shop: Shop::new(),
            achievements: Achievements::new(),
            save,
        };

        match game.save.load() {
            Ok(Some(data)) => {
                apply_save(
                    &data,
                    &mut game.player,
                    &mut game.shop,
                    &mut game.achievements,
                );
                info!(
                    money = game.player.money,
                    total_clicks = game.player.total_clicks,
                    "save loaded"
                );
            }
            Ok(None) => info!("no save found, starting a new game"),
            Err(e) => warn!(error = %e, "could not read save, starting a new game"),
        }

        game
    }

    /// Manual click, as sent by the view layer. Validation (the cooldown)
    /// happens here, never in the view.
    pub fn attempt_click(&mut self, now: f64) -> ClickResult {
        let result = self.player.click(now);
        if result.accepted {
            self.after_mutation(now);
        }
        result
    }

    /// Purchase attempt for shop item `id`. Affordability is checked
    /// here; the view never pre-filters. An unknown id is a caller bug
    /// and leaves all state untouched.
    pub fn attempt_purchase(&mut self, id: usize, now: f64) -> Result<PurchaseResult, ShopError> {
        let result = self.shop.purchase(id, &mut self.player)?;
        if result.success {
            self.after_mutation(now);
        }
        Ok(result)
    }

    /// Per-frame update: apply passive income if its tick is due, then
    /// evaluate achievements and flush if anything was credited.
    pub fn update(&mut self, now: f64) {
        let credited = self.player.apply_auto_income(now);
        if credited > 0.0 {
            self.after_mutation(now);
        }
    }

    /// Discard all progress and the save file. Explicit action only.
    pub fn new_game(&mut self, now: f64) {
        self.player.reset(MONEY_START, now);
        self.shop.reset_all();
        self.achievements.reset();
        if let Err(e) = self.save.delete() {
            warn!(error = %e, "could not remove old save");
        }
        self.flush();
        info!("new game started");
    }

    /// Live unlock toasts for the view; expired ones drop on poll.
    pub fn pending_notifications(&mut self, now: f64) -> &[Notification] {
        self.achievements.pending_notifications(now)
    }

    /// Read-only snapshot of the fields achievements are judged on.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            money: self.player.money,
            total_clicks: self.player.total_clicks,
            upgrades_bought: self.player.upgrades_bought,
        }
    }

    fn after_mutation(&mut self, now: f64) {
        let snapshot = self.snapshot();
        self.achievements.evaluate(&snapshot, now);
        self.flush();
    }

    /// Write-through save. Failure is reported and play continues with
    /// the in-memory state as the source of truth.
    fn flush(&mut self) {
        if let Err(e) = self.save.save(&self.player, &self.shop, &self.achievements) {
            warn!(error = %e, "could not write save, progress kept in memory");
        }
    }
}
