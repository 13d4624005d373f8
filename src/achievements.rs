//! Achievement engine: data-driven milestones with one-shot unlocks and
//! short-lived notification toasts.
//!
//! Conditions are plain data evaluated against a state snapshot, so the
//! threshold table can be swapped without touching the engine and the
//! save layer can persist unlocks by name.

use tracing::info;

/// Total seconds a notification stays visible.
pub const NOTIFICATION_DURATION: f64 = 3.0;

/// Seconds of the entrance and exit animation inside the lifetime.
pub const NOTIFICATION_SLIDE: f64 = 0.4;

/// Read-only view of the progression state used to evaluate milestones.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub money: f64,
    pub total_clicks: u64,
    pub upgrades_bought: u32,
}

/// Milestone predicate, kept as data rather than a closure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Condition {
    TotalClicksAtLeast(u64),
    MoneyAtLeast(f64),
    UpgradesBoughtAtLeast(u32),
}

impl Condition {
    pub fn is_met(&self, snapshot: &Snapshot) -> bool {
        match self {
            Condition::TotalClicksAtLeast(n) => snapshot.total_clicks >= *n,
            Condition::MoneyAtLeast(n) => snapshot.money >= *n,
            Condition::UpgradesBoughtAtLeast(n) => snapshot.upgrades_bought >= *n,
        }
    }
}

/// One milestone. `unlocked` transitions false→true exactly once and
/// never reverts.
#[derive(Clone, Debug)]
pub struct Achievement {
    pub name: &'static str,
    pub desc: &'static str,
    pub condition: Condition,
    pub unlocked: bool,
}

impl Achievement {
    pub fn new(name: &'static str, desc: &'static str, condition: Condition) -> Self {
        Self {
            name,
            desc,
            condition,
            unlocked: false,
        }
    }
}

/// Transient toast bound to a single unlock event. Not persisted.
#[derive(Clone, Debug)]
pub struct Notification {
    pub achievement_name: &'static str,
    pub created_at: f64,
}

/// Where a live notification is in its entrance/hold/exit cycle, with the
/// animation progress in 0.0..=1.0. Data for any view; the engine only
/// cares about expiry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NotificationPhase {
    SlidingIn(f64),
    Holding,
    SlidingOut(f64),
}

impl Notification {
    pub fn is_live(&self, now: f64) -> bool {
        now - self.created_at < NOTIFICATION_DURATION
    }

    pub fn phase(&self, now: f64) -> NotificationPhase {
        let elapsed = now - self.created_at;
        if elapsed < NOTIFICATION_SLIDE {
            NotificationPhase::SlidingIn(elapsed / NOTIFICATION_SLIDE)
        } else if elapsed < NOTIFICATION_DURATION - NOTIFICATION_SLIDE {
            NotificationPhase::Holding
        } else {
            let progress =
                (elapsed - (NOTIFICATION_DURATION - NOTIFICATION_SLIDE)) / NOTIFICATION_SLIDE;
            NotificationPhase::SlidingOut(progress.min(1.0))
        }
    }
}

/// The reference milestone table.
fn default_table() -> Vec<Achievement> {
    vec![
        Achievement::new(
            "PRIMER CLICK",
            "Haz tu primer click.",
            Condition::TotalClicksAtLeast(1),
        ),
        Achievement::new(
            "AHORRADOR",
            "Alcanza $1,000.",
            Condition::MoneyAtLeast(1_000.0),
        ),
        Achievement::new(
            "MILLONARIO",
            "Alcanza $1,000,000.",
            Condition::MoneyAtLeast(1_000_000.0),
        ),
        Achievement::new(
            "PRIMERA MEJORA",
            "Compra al menos una mejora.",
            Condition::UpgradesBoughtAtLeast(1),
        ),
    ]
}

pub struct Achievements {
    achievements: Vec<Achievement>,
    notifications: Vec<Notification>,
}

impl Achievements {
    pub fn new() -> Self {
        Self::with_table(default_table())
    }

    /// Build the engine over a custom milestone table.
    pub fn with_table(achievements: Vec<Achievement>) -> Self {
        Self {
            achievements,
            notifications: Vec::new(),
        }
    }

    pub fn list(&self) -> &[Achievement] {
        &self.achievements
    }

    /// Check every still-locked milestone against `snapshot`; unlock the
    /// ones that pass and enqueue one notification each. Already-unlocked
    /// milestones are skipped, so repeated calls are idempotent. Returns
    /// how many unlocked this call.
    pub fn evaluate(&mut self, snapshot: &Snapshot, now: f64) -> usize {
        let mut unlocked = 0;
        for achievement in &mut self.achievements {
            if achievement.unlocked || !achievement.condition.is_met(snapshot) {
                continue;
            }
            achievement.unlocked = true;
            self.notifications.push(Notification {
                achievement_name: achievement.name,
                created_at: now,
            });
            info!(achievement = achievement.name, "achievement unlocked");
            unlocked += 1;
        }
        unlocked
    }

    /// Currently live notifications, oldest first. Expired ones are
    /// dropped as a side effect, so polling once per frame keeps the
    /// queue from growing; without an intervening unlock the returned
    /// set only ever shrinks.
    pub fn pending_notifications(&mut self, now: f64) -> &[Notification] {
        self.notifications.retain(|n| n.is_live(now));
        &self.notifications
    }

    /// Names of every unlocked milestone, for the save record.
    pub fn unlocked_names(&self) -> Vec<String> {
        self.achievements
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.name.to_string())
            .collect()
    }

    /// Mark the named milestones as unlocked without notifying, so a
    /// loaded game does not replay its toasts. Unknown names are ignored.
    pub fn restore_unlocked(&mut self, names: &[String]) {
        for achievement in &mut self.achievements {
            if names.iter().any(|n| n == achievement.name) {
                achievement.unlocked = true;
            }
        }
    }

    /// Lock everything again and clear pending toasts. New game only.
    pub fn reset(&mut self) {
        for achievement in &mut self.achievements {
            achievement.unlocked = false;
        }
        self.notifications.clear();
    }
}

impl Default for Achievements {
    fn default() -> Self {
        Self::new()
    }
}
