//! Persisted watchlist of coin ids.
//!
//! One JSON file under `~/.coinwatch/`, read once at startup and rewritten
//! whole after every mutation. Writes go through a `.tmp` rename so a crash
//! mid-write can't corrupt the file. A missing or unparseable file just
//! means an empty watchlist; persistence failures are logged, never fatal.

use std::fs;
use std::path::PathBuf;

use cli_log::{debug, warn};

use crate::config::{WATCHLIST_DIR, WATCHLIST_FILE};

#[derive(Debug)]
pub struct Watchlist {
    ids: Vec<String>,
    path: Option<PathBuf>,
}

impl Watchlist {
    /// Load the watchlist from the default location.
    pub fn load() -> Self {
        match default_path() {
            Some(path) => Self::load_from(path),
            None => {
                warn!("Could not determine home directory, watchlist will not persist");
                Self { ids: Vec::new(), path: None }
            }
        }
    }

    /// Load the watchlist from an explicit file path.
    pub fn load_from(path: PathBuf) -> Self {
        let ids = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<String>>(&contents) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!("Ignoring corrupt watchlist file {}: {e}", path.display());
                    Vec::new()
                }
            },
            Err(_) => Vec::new(), // first run, nothing saved yet
        };

        let mut watchlist = Self { ids, path: Some(path) };
        watchlist.dedup();
        watchlist
    }

    /// Toggle membership: remove the id if present, append it otherwise.
    /// The whole set is persisted after every mutation.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.to_string());
        }
        self.save();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn dedup(&mut self) {
        let mut seen = Vec::with_capacity(self.ids.len());
        self.ids.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(id.clone());
                true
            }
        });
    }

    fn save(&self) {
        let Some(ref path) = self.path else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create watchlist directory: {e}");
                return;
            }
        }

        let json = match serde_json::to_string_pretty(&self.ids) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize watchlist: {e}");
                return;
            }
        };

        // Write to a temp file, then rename over the real one
        let tmp_path = path.with_extension("tmp");
        if let Err(e) = fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, path)) {
            warn!("Failed to save watchlist to {}: {e}", path.display());
        } else {
            debug!("Saved {} watchlist ids to {}", self.ids.len(), path.display());
        }
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(WATCHLIST_DIR).join(WATCHLIST_FILE))
}
