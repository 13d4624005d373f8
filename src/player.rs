//! Player account: money balance, income rates and the time gates that
//! feed them. All operations take an explicit `now` timestamp so the
//! account never reads ambient time.

use thiserror::Error;

use crate::time::elapsed_at_least;

/// Starting balance for a fresh game.
pub const MONEY_START: f64 = 0.0;

/// Minimum seconds between two accepted clicks. Caps click-spam from
/// key/mouse auto-repeat; a gated click is a normal outcome, not an error.
pub const EARN_COOLDOWN: f64 = 0.2;

/// Seconds between passive-income credits. One credit per elapsed full
/// interval, never pro-rated.
pub const AUTO_INCOME_INTERVAL: f64 = 1.0;

/// Outcome of a manual click attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickResult {
    pub accepted: bool,
    pub new_money: f64,
}

/// A debit was attempted for more than the current balance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("insufficient funds: need {needed}, have {available}")]
pub struct InsufficientFunds {
    pub needed: f64,
    pub available: f64,
}

/// The player and their progress.
#[derive(Clone, Debug)]
pub struct Player {
    /// Current balance. Invariant: never negative.
    pub money: f64,
    /// Accepted manual clicks, all-time.
    pub total_clicks: u64,
    /// Money credited per accepted click.
    pub click_income: f64,
    /// Money credited per passive-income tick.
    pub auto_income: f64,
    /// Timestamp of the last accepted click.
    pub last_click_time: f64,
    /// Timestamp of the last passive-income credit.
    pub last_auto_time: f64,
    /// Successful purchases across all shop items.
    pub upgrades_bought: u32,
}

impl Player {
    pub fn new(now: f64) -> Self {
        Self {
            money: MONEY_START,
            total_clicks: 0,
            click_income: 1.0,
            auto_income: 0.0,
            last_click_time: now,
            last_auto_time: now,
            upgrades_bought: 0,
        }
    }

    /// Restore the initial state. Used only for an explicit new game.
    pub fn reset(&mut self, money: f64, now: f64) {
        self.money = money;
        self.total_clicks = 0;
        self.click_income = 1.0;
        self.auto_income = 0.0;
        self.last_click_time = now;
        self.last_auto_time = now;
        self.upgrades_bought = 0;
    }

    /// Credit `click_income` if the cooldown has elapsed.
    ///
    /// A gated click mutates nothing and reports `accepted: false`.
    pub fn click(&mut self, now: f64) -> ClickResult {
        if !elapsed_at_least(now, self.last_click_time, EARN_COOLDOWN) {
            return ClickResult {
                accepted: false,
                new_money: self.money,
            };
        }
        self.credit(self.click_income);
        self.total_clicks += 1;
        self.last_click_time = now;
        ClickResult {
            accepted: true,
            new_money: self.money,
        }
    }

    /// Credit `auto_income` once if a full interval has elapsed since the
    /// last credit, and advance the gate to `now`.
    ///
    /// Exactly one credit per open gate regardless of how far past the
    /// interval `now` is; a long idle period does not catch up. Returns
    /// the credited amount (0.0 while gated), so repeated calls within
    /// the same sub-second window never double-credit.
    pub fn apply_auto_income(&mut self, now: f64) -> f64 {
        if !elapsed_at_least(now, self.last_auto_time, AUTO_INCOME_INTERVAL) {
            return 0.0;
        }
        self.credit(self.auto_income);
        self.last_auto_time = now;
        self.auto_income
    }

    pub fn can_afford(&self, amount: f64) -> bool {
        self.money >= amount
    }

    /// Remove `amount` from the balance. Fails without mutating anything
    /// if the balance is short; the shop checks affordability first, so a
    /// failure here indicates a caller bug.
    pub fn debit(&mut self, amount: f64) -> Result<(), InsufficientFunds> {
        if amount > self.money {
            return Err(InsufficientFunds {
                needed: amount,
                available: self.money,
            });
        }
        self.money -= amount;
        Ok(())
    }

    /// Add to the balance, clamping at zero afterwards.
    pub fn credit(&mut self, amount: f64) {
        self.money = (self.money + amount).max(0.0);
    }
}

/// Format a money amount with thousands separators (e.g. 1234567 → "1,234,567").
pub fn format_money(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_money(-n));
    }
    let int_part = n.floor() as u64;
    let frac = n - int_part as f64;

    let s = int_part.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let result: String = result.chars().rev().collect();

    if frac > 0.05 {
        format!("{}.{}", result, (frac * 10.0).round() as u8)
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_credits_income() {
        let mut player = Player::new(0.0);
        let result = player.click(1.0);
        assert!(result.accepted);
        assert!((player.money - 1.0).abs() < 0.001);
        assert_eq!(player.total_clicks, 1);
    }

    #[test]
    fn click_within_cooldown_is_rejected() {
        let mut player = Player::new(0.0);
        assert!(player.click(1.0).accepted);
        let result = player.click(1.1); // 0.1s later, cooldown is 0.2s
        assert!(!result.accepted);
        assert!((player.money - 1.0).abs() < 0.001);
        assert_eq!(player.total_clicks, 1);
    }

    #[test]
    fn click_at_exact_cooldown_boundary_is_accepted() {
        let mut player = Player::new(0.0);
        player.click(1.0);
        assert!(player.click(1.2).accepted);
        assert_eq!(player.total_clicks, 2);
    }

    #[test]
    fn click_respects_click_income() {
        let mut player = Player::new(0.0);
        player.click_income = 5.0;
        player.click(1.0);
        assert!((player.money - 5.0).abs() < 0.001);
    }

    #[test]
    fn auto_income_gated_below_one_second() {
        let mut player = Player::new(0.0);
        player.auto_income = 3.0;
        assert!((player.apply_auto_income(0.5) - 0.0).abs() < 0.001);
        assert!((player.money - 0.0).abs() < 0.001);
    }

    #[test]
    fn auto_income_credits_once_per_interval() {
        let mut player = Player::new(0.0);
        player.auto_income = 3.0;
        assert!((player.apply_auto_income(1.0) - 3.0).abs() < 0.001);
        assert!((player.money - 3.0).abs() < 0.001);
        // Same window: no double credit
        assert!((player.apply_auto_income(1.2) - 0.0).abs() < 0.001);
        assert!((player.money - 3.0).abs() < 0.001);
        // Next interval opens relative to the last credit
        assert!((player.apply_auto_income(2.0) - 3.0).abs() < 0.001);
        assert!((player.money - 6.0).abs() < 0.001);
    }

    #[test]
    fn auto_income_does_not_catch_up_after_idle() {
        let mut player = Player::new(0.0);
        player.auto_income = 1.0;
        // An hour idle still credits a single tick
        let credited = player.apply_auto_income(3600.0);
        assert!((credited - 1.0).abs() < 0.001);
        assert!((player.money - 1.0).abs() < 0.001);
    }

    #[test]
    fn debit_fails_when_short() {
        let mut player = Player::new(0.0);
        player.money = 10.0;
        let err = player.debit(15.0).unwrap_err();
        assert!((err.needed - 15.0).abs() < 0.001);
        assert!((err.available - 10.0).abs() < 0.001);
        assert!((player.money - 10.0).abs() < 0.001);
    }

    #[test]
    fn debit_exact_balance_succeeds() {
        let mut player = Player::new(0.0);
        player.money = 15.0;
        assert!(player.debit(15.0).is_ok());
        assert!((player.money - 0.0).abs() < 0.001);
    }

    #[test]
    fn credit_clamps_at_zero() {
        let mut player = Player::new(0.0);
        player.credit(-5.0);
        assert!((player.money - 0.0).abs() < 0.001);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut player = Player::new(0.0);
        player.money = 500.0;
        player.total_clicks = 42;
        player.click_income = 10.0;
        player.auto_income = 25.0;
        player.upgrades_bought = 7;
        player.reset(MONEY_START, 100.0);
        assert!((player.money - MONEY_START).abs() < 0.001);
        assert_eq!(player.total_clicks, 0);
        assert!((player.click_income - 1.0).abs() < 0.001);
        assert!((player.auto_income - 0.0).abs() < 0.001);
        assert_eq!(player.upgrades_bought, 0);
        assert!((player.last_click_time - 100.0).abs() < 0.001);
    }

    #[test]
    fn format_money_basic() {
        assert_eq!(format_money(0.0), "0");
        assert_eq!(format_money(123.0), "123");
        assert_eq!(format_money(1234.0), "1,234");
        assert_eq!(format_money(1234567.0), "1,234,567");
    }

    #[test]
    fn format_money_with_fraction() {
        assert_eq!(format_money(12.5), "12.5");
    }
}
