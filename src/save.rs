//! Save/load for the clicker.
//!
//! The record is a single JSON document, fully overwritten on every save
//! (write-through, no versioning). Reads are forgiving: a missing file is
//! a fresh game, a malformed file is discarded with a warning, and fields
//! absent from an otherwise valid record keep their in-memory defaults.
//! Persistence failures never end the session; the in-memory state stays
//! authoritative.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::achievements::Achievements;
use crate::player::Player;
use crate::shop::Shop;

/// Default save file, in the working directory.
pub const SAVE_FILE: &str = "savegame.json";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save data could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Player fields of the save record. Every field is optional on read so a
/// partial record restores what it has and leaves the rest at defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PlayerSave {
    pub money: Option<f64>,
    pub total_clicks: Option<u64>,
    pub click_income: Option<f64>,
    pub auto_income: Option<f64>,
}

/// One catalog entry of the save record, in catalog order. `name`,
/// `base_income` and `tipo` are written for the record; only `cost` and
/// `amount` are applied on load; the live catalog definition is
/// authoritative for the rest.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ItemSave {
    pub name: String,
    pub cost: Option<f64>,
    pub base_income: Option<f64>,
    pub tipo: String,
    pub amount: Option<u32>,
}

/// The durable save record.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SaveData {
    pub player: PlayerSave,
    pub shop: Vec<ItemSave>,
    /// Names of unlocked achievements. Absent in older records, in which
    /// case everything starts locked.
    pub achievements: Vec<String>,
}

/// Build the save record from the live state.
pub fn extract_save(player: &Player, shop: &Shop, achievements: &Achievements) -> SaveData {
    SaveData {
        player: PlayerSave {
            money: Some(player.money),
            total_clicks: Some(player.total_clicks),
            click_income: Some(player.click_income),
            auto_income: Some(player.auto_income),
        },
        shop: shop
            .list()
            .iter()
            .map(|item| ItemSave {
                name: item.name.to_string(),
                cost: Some(item.cost),
                base_income: Some(item.base_income),
                tipo: item.kind.as_str().to_string(),
                amount: Some(item.amount),
            })
            .collect(),
        achievements: achievements.unlocked_names(),
    }
}

/// Restore the live state from a save record.
///
/// Shop entries apply positionally: entry *i* goes to catalog item *i*; a
/// shorter saved list leaves the trailing items at their defaults and
/// extra entries are ignored. The balance is clamped non-negative in case
/// the record was edited by hand.
pub fn apply_save(
    data: &SaveData,
    player: &mut Player,
    shop: &mut Shop,
    achievements: &mut Achievements,
) {
    if let Some(money) = data.player.money {
        player.money = money.max(0.0);
    }
    if let Some(total_clicks) = data.player.total_clicks {
        player.total_clicks = total_clicks;
    }
    if let Some(click_income) = data.player.click_income {
        player.click_income = click_income;
    }
    if let Some(auto_income) = data.player.auto_income {
        player.auto_income = auto_income;
    }

    for (item, saved) in shop.items.iter_mut().zip(&data.shop) {
        if let Some(cost) = saved.cost {
            item.cost = cost;
        }
        if let Some(amount) = saved.amount {
            item.amount = amount;
        }
    }

    achievements.restore_unlocked(&data.achievements);
}

/// Owns the save file path and the read/write policy around it.
pub struct SaveGateway {
    path: PathBuf,
}

impl SaveGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the full record and overwrite the save file. Writes to a
    /// temp file first, then renames, so a crash mid-write cannot leave a
    /// truncated record behind.
    pub fn save(
        &self,
        player: &Player,
        shop: &Shop,
        achievements: &Achievements,
    ) -> Result<(), SaveError> {
        let data = extract_save(player, shop, achievements);
        let json = serde_json::to_string_pretty(&data)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read the save record if one exists.
    ///
    /// No file is `Ok(None)`, and the caller starts fresh. A file that does
    /// not parse is also `Ok(None)` after a warning: a corrupt save must
    /// never block game start. Other I/O failures are reported.
    pub fn load(&self) -> Result<Option<SaveData>, SaveError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&json) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "save file is malformed, starting fresh"
                );
                Ok(None)
            }
        }
    }

    /// Remove the save file. Missing file is fine.
    pub fn delete(&self) -> Result<(), SaveError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
