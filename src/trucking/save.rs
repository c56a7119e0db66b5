//! Semi Trucker save/load.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current format. Bump it whenever a field is added.
//! - `MIN_COMPATIBLE_VERSION`: oldest format that still loads. Only bump it
//!   for breaking changes (a field removed or its meaning changed). Older
//!   but compatible saves load with missing fields defaulted.

use serde::{Deserialize, Serialize};

use super::error::SaveError;
use super::state::{Business, JobStats, PlayerData};

const SAVE_VERSION: u32 = 1;

const MIN_COMPATIBLE_VERSION: u32 = 1;

/// localStorage key.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "stTruckerSave";

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: PlayerSave,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct PlayerSave {
    money: u64,
    last_time: u64,
    jobs: Vec<JobSave>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct JobSave {
    /// Business tier index (0=HotDog .. 6=Military).
    business: u8,
    amount: u32,
    managed: bool,
    time: Option<u64>,
}

fn extract_save(data: &PlayerData) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: PlayerSave {
            money: data.money,
            last_time: data.last_time,
            jobs: data
                .jobs
                .iter()
                .map(|(id, stats)| JobSave {
                    business: id.index() as u8,
                    amount: stats.amount,
                    managed: stats.managed,
                    time: stats.time,
                })
                .collect(),
        },
    }
}

/// Rows naming an unknown business are dropped.
fn apply_save(save: &PlayerSave) -> PlayerData {
    let mut data = PlayerData::new_player(save.last_time);
    data.money = save.money;
    data.jobs.clear();
    for row in &save.jobs {
        match Business::from_index(row.business) {
            Ok(id) => {
                data.jobs.insert(
                    id,
                    JobStats {
                        amount: row.amount,
                        managed: row.managed,
                        time: row.time,
                    },
                );
            }
            Err(e) => log::warn!("skipping save row: {e}"),
        }
    }
    data
}

pub fn encode(data: &PlayerData) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&extract_save(data))?)
}

/// Parse a stored save. Exact inverse of [`encode`].
pub fn decode(json: &str) -> Result<PlayerData, SaveError> {
    let save_data: SaveData = serde_json::from_str(json)?;

    if save_data.version < MIN_COMPATIBLE_VERSION {
        return Err(SaveError::TooOld {
            saved: save_data.version,
            min_compatible: MIN_COMPATIBLE_VERSION,
        });
    }
    if save_data.version < SAVE_VERSION {
        log::info!(
            "migrating save data (saved={}, current={})",
            save_data.version,
            SAVE_VERSION
        );
    }

    Ok(apply_save(&save_data.game))
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Stamp the save time and write to localStorage. Failures are logged and ignored.
#[cfg(target_arch = "wasm32")]
pub fn save_game(data: &mut PlayerData, now_ms: u64) {
    data.last_time = now_ms;
    let json = match encode(data) {
        Ok(j) => j,
        Err(e) => {
            log::warn!("failed to serialize save: {e}");
            return;
        }
    };

    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            log::warn!("failed to write localStorage: {e:?}");
        }
    }
}

/// Load from localStorage, or start a fresh player when nothing usable is stored.
#[cfg(target_arch = "wasm32")]
pub fn load_game(now_ms: u64) -> (PlayerData, bool) {
    let fresh = || (PlayerData::new_player(now_ms), false);
    let storage = match get_storage() {
        Some(s) => s,
        None => return fresh(),
    };

    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return fresh(),
    };

    match decode(&json) {
        Ok(data) => (data, true),
        Err(e) => {
            log::warn!("discarding save data: {e}");
            let _ = storage.remove_item(STORAGE_KEY);
            fresh()
        }
    }
}
