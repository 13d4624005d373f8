//! The shop: a fixed, ordered catalog of upgrades with escalating prices.
//!
//! A purchase is a single-step transaction: debit, bump the owned count,
//! escalate the price, route the income to the matching rate on the
//! player. Nothing mutates on an unaffordable attempt.

use thiserror::Error;

use crate::player::Player;

/// Price escalation per purchase; the new cost is floored to a whole amount.
const COST_GROWTH: f64 = 1.15;

/// Which income rate a purchase feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncomeKind {
    /// Adds to the money earned per accepted click.
    Click,
    /// Adds to the money earned per passive-income tick.
    Auto,
}

impl IncomeKind {
    /// Wire name used in the save record.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeKind::Click => "click",
            IncomeKind::Auto => "auto",
        }
    }

    pub fn parse(s: &str) -> Option<IncomeKind> {
        match s {
            "click" => Some(IncomeKind::Click),
            "auto" => Some(IncomeKind::Auto),
            _ => None,
        }
    }
}

/// One purchasable upgrade.
#[derive(Clone, Debug)]
pub struct ShopItem {
    pub name: &'static str,
    /// Current price; grows by 15% (floored) per purchase, never shrinks.
    pub cost: f64,
    /// Price at catalog creation, restored on a new game.
    pub base_cost: f64,
    /// Income added to the matching rate per unit bought. Fixed.
    pub base_income: f64,
    pub kind: IncomeKind,
    /// Units purchased so far.
    pub amount: u32,
}

/// Catalog definition: (name, base cost, income per unit, kind).
/// Display order is definition order.
const ITEM_TABLE: &[(&str, f64, f64, IncomeKind)] = &[
    ("Ratón", 15.0, 1.0, IncomeKind::Click),
    ("Apuntes (+1/s)", 50.0, 1.0, IncomeKind::Auto),
    ("Libro (+5/s)", 100.0, 5.0, IncomeKind::Auto),
    ("Pizarra (+10/s)", 200.0, 10.0, IncomeKind::Auto),
    ("Móbil (+25/s)", 500.0, 25.0, IncomeKind::Auto),
    ("Tablet (+50/s)", 1000.0, 50.0, IncomeKind::Auto),
    ("Ordenador (+100/s)", 2500.0, 100.0, IncomeKind::Auto),
    ("Fibra Óptica (+200/s)", 7500.0, 200.0, IncomeKind::Auto),
    ("Servidor (+500/s)", 10000.0, 500.0, IncomeKind::Auto),
];

/// A purchase referenced an id outside the catalog: a caller bug (stale
/// UI reference); the catalog and player are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("unknown shop item id {0}")]
    UnknownItem(usize),
}

/// Outcome of a purchase attempt on a valid item id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PurchaseResult {
    pub success: bool,
    /// Price after the attempt (unchanged when `success` is false).
    pub new_cost: f64,
    pub kind: IncomeKind,
}

pub struct Shop {
    pub items: Vec<ShopItem>,
}

impl Shop {
    pub fn new() -> Self {
        let items = ITEM_TABLE
            .iter()
            .map(|&(name, cost, income, kind)| ShopItem {
                name,
                cost,
                base_cost: cost,
                base_income: income,
                kind,
                amount: 0,
            })
            .collect();
        Self { items }
    }

    /// Read-only view in display order.
    pub fn list(&self) -> &[ShopItem] {
        &self.items
    }

    /// Try to buy item `id` for `player`.
    ///
    /// An unaffordable item is a normal outcome (`success: false`, no
    /// mutation); an unknown id is an error. On success the debit, count,
    /// price escalation, income routing and purchase counter all update
    /// before returning, so no observer sees a half-applied purchase.
    pub fn purchase(
        &mut self,
        id: usize,
        player: &mut Player,
    ) -> Result<PurchaseResult, ShopError> {
        let item = self.items.get_mut(id).ok_or(ShopError::UnknownItem(id))?;

        if !player.can_afford(item.cost) || player.debit(item.cost).is_err() {
            return Ok(PurchaseResult {
                success: false,
                new_cost: item.cost,
                kind: item.kind,
            });
        }

        item.amount += 1;
        item.cost = (item.cost * COST_GROWTH).floor();

        match item.kind {
            IncomeKind::Click => player.click_income += item.base_income,
            IncomeKind::Auto => player.auto_income += item.base_income,
        }
        player.upgrades_bought += 1;

        Ok(PurchaseResult {
            success: true,
            new_cost: item.cost,
            kind: item.kind,
        })
    }

    /// The cheapest item the player can currently afford, ties broken by
    /// catalog order. The deterministic selection policy for automated
    /// play and test harnesses.
    pub fn cheapest_affordable(&self, player: &Player) -> Option<usize> {
        let mut best: Option<(f64, usize)> = None;
        for (i, item) in self.items.iter().enumerate() {
            if !player.can_afford(item.cost) {
                continue;
            }
            let better = match best {
                Some((cost, _)) => item.cost < cost,
                None => true,
            };
            if better {
                best = Some((item.cost, i));
            }
        }
        best.map(|(_, i)| i)
    }

    /// Restore every item to its base cost with nothing owned. Used only
    /// alongside `Player::reset` for an explicit new game.
    pub fn reset_all(&mut self) {
        for item in &mut self.items {
            item.cost = item.base_cost;
            item.amount = 0;
        }
    }
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_cost_follows_repeated_floor_growth(
            id in 0usize..9,
            buys in 1usize..30,
        ) {
            let mut shop = Shop::new();
            let mut player = Player::new(0.0);
            player.money = 1e15;
            let mut expected = shop.items[id].cost;
            for _ in 0..buys {
                shop.purchase(id, &mut player).unwrap();
                expected = (expected * 1.15).floor();
            }
            prop_assert!((shop.items[id].cost - expected).abs() < 0.001,
                "expected {}, got {}", expected, shop.items[id].cost);
        }

        #[test]
        fn prop_cost_never_decreases(
            id in 0usize..9,
            buys in 1usize..50,
        ) {
            let mut shop = Shop::new();
            let mut player = Player::new(0.0);
            player.money = 1e18;
            let mut prev = shop.items[id].cost;
            for _ in 0..buys {
                shop.purchase(id, &mut player).unwrap();
                prop_assert!(shop.items[id].cost >= prev);
                prev = shop.items[id].cost;
            }
        }

        #[test]
        fn prop_purchase_never_drives_money_negative(
            id in 0usize..9,
            money in 0.0f64..20000.0,
        ) {
            let mut shop = Shop::new();
            let mut player = Player::new(0.0);
            player.money = money;
            shop.purchase(id, &mut player).unwrap();
            prop_assert!(player.money >= 0.0);
        }

        #[test]
        fn prop_failed_purchase_is_a_noop(
            id in 0usize..9,
        ) {
            let mut shop = Shop::new();
            let mut player = Player::new(0.0);
            player.money = shop.items[id].cost - 0.5;
            let before_cost = shop.items[id].cost;
            let result = shop.purchase(id, &mut player).unwrap();
            prop_assert!(!result.success);
            prop_assert!((shop.items[id].cost - before_cost).abs() < f64::EPSILON);
            prop_assert_eq!(shop.items[id].amount, 0);
            prop_assert_eq!(player.upgrades_bought, 0);
        }

        #[test]
        fn prop_upgrades_bought_counts_successes(
            ids in proptest::collection::vec(0usize..9, 1..20),
        ) {
            let mut shop = Shop::new();
            let mut player = Player::new(0.0);
            player.money = 200.0;
            let mut successes = 0u32;
            for id in ids {
                if shop.purchase(id, &mut player).unwrap().success {
                    successes += 1;
                }
            }
            prop_assert_eq!(player.upgrades_bought, successes);
        }
    }
}
