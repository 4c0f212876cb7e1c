//! Board profiles and the registry that supplies pin lists to the schemas.
//!
//! The schemas never read a global "selected board". Callers hand a
//! [`BoardRegistry`] to the block builders, which query it once per pin
//! dropdown.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::BoardError;

/// Pin capabilities of one hardware board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardProfile {
    /// Short identifier, e.g. `"uno"`.
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub digital_pins: Vec<String>,
    #[serde(default)]
    pub analog_pins: Vec<String>,
}

/// Source of the pin identifiers for the currently selected board.
pub trait BoardRegistry {
    fn selected(&self) -> &BoardProfile;

    /// Ordered digital pin identifiers of the selected board.
    fn digital_pins(&self) -> Vec<String> {
        self.selected().digital_pins.clone()
    }
}

impl BoardRegistry for BoardProfile {
    fn selected(&self) -> &BoardProfile {
        self
    }
}

fn pin_range(prefix: &str, start: u32, end: u32) -> Vec<String> {
    (start..=end).map(|n| format!("{}{}", prefix, n)).collect()
}

fn profile(name: &str, description: &str, digital_max: u32, analog_max: u32) -> BoardProfile {
    let analog = pin_range("A", 0, analog_max);
    let mut digital = pin_range("", 0, digital_max);
    // Analog pins double as digital I/O on these boards.
    digital.extend(analog.iter().cloned());
    BoardProfile {
        name: name.to_string(),
        description: description.to_string(),
        digital_pins: digital,
        analog_pins: analog,
    }
}

/// Profiles shipped with the crate, in display order.
pub fn builtin_boards() -> &'static [BoardProfile] {
    static BOARDS: Lazy<Vec<BoardProfile>> = Lazy::new(|| {
        vec![
            profile("uno", "Arduino Uno", 13, 5),
            profile("nano", "Arduino Nano", 13, 5),
            profile("mega", "Arduino Mega 2560", 53, 15),
            profile("leonardo", "Arduino Leonardo", 13, 5),
        ]
    });
    &BOARDS
}

/// Named collection of board profiles with one of them selected.
#[derive(Debug, Clone)]
pub struct BoardCatalog {
    boards: IndexMap<String, BoardProfile>,
    selected: String,
}

impl Default for BoardCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardCatalog {
    pub const DEFAULT_BOARD: &'static str = "uno";

    /// Catalog of the built-in boards with [`Self::DEFAULT_BOARD`] selected.
    pub fn new() -> Self {
        let boards = builtin_boards()
            .iter()
            .map(|b| (b.name.clone(), b.clone()))
            .collect();
        Self {
            boards,
            selected: Self::DEFAULT_BOARD.to_string(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.boards.keys().map(|k| k.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&BoardProfile> {
        self.boards.get(name)
    }

    /// Add or replace a profile. Returns the replaced one.
    pub fn insert(&mut self, board: BoardProfile) -> Option<BoardProfile> {
        self.boards.insert(board.name.clone(), board)
    }

    pub fn select(&mut self, name: &str) -> Result<(), BoardError> {
        if !self.boards.contains_key(name) {
            return Err(BoardError::UnknownBoard(name.to_string()));
        }
        self.selected = name.to_string();
        Ok(())
    }

    /// Load a single JSON profile and add it to the catalog.
    pub fn load_file(&mut self, path: impl AsRef<Utf8Path>) -> Result<String, BoardError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let board: BoardProfile = serde_json::from_str(&text)?;
        let name = board.name.clone();
        tracing::info!(board = %name, path = %path, "loaded board profile");
        self.insert(board);
        Ok(name)
    }

    /// Load every `*.json` profile below `dir`. Files that fail to parse and
    /// entries that cannot be walked (unreadable directories, symlink loops)
    /// are skipped with a warning; the names of loaded boards are returned.
    /// Only a failure on `dir` itself is an error.
    pub fn load_dir(&mut self, dir: impl AsRef<Utf8Path>) -> Result<Vec<String>, BoardError> {
        let mut paths: Vec<Utf8PathBuf> = Vec::new();
        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable board directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                continue;
            };
            if path.extension() == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = Vec::new();
        for path in paths {
            match self.load_file(&path) {
                Ok(name) => loaded.push(name),
                Err(BoardError::Json(err)) => {
                    tracing::warn!(path = %path, error = %err, "skipping invalid board profile");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(loaded)
    }
}

impl BoardRegistry for BoardCatalog {
    fn selected(&self) -> &BoardProfile {
        // `select` only accepts known names and profiles are never removed.
        match self.boards.get(&self.selected) {
            Some(board) => board,
            None => &builtin_boards()[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uno_pins_include_analog_aliases() {
        let uno = &builtin_boards()[0];
        assert_eq!(uno.name, "uno");
        assert_eq!(uno.digital_pins.first().map(String::as_str), Some("0"));
        assert_eq!(uno.digital_pins.len(), 20);
        assert!(uno.digital_pins.contains(&"A5".to_string()));
    }

    #[test]
    fn mega_has_more_pins_than_uno() {
        let catalog = BoardCatalog::new();
        let uno = catalog.get("uno").unwrap();
        let mega = catalog.get("mega").unwrap();
        assert!(mega.digital_pins.len() > uno.digital_pins.len());
        assert_eq!(mega.analog_pins.last().map(String::as_str), Some("A15"));
    }

    #[test]
    fn select_unknown_board_fails() {
        let mut catalog = BoardCatalog::new();
        assert!(matches!(catalog.select("esp32"), Err(BoardError::UnknownBoard(_))));
        assert_eq!(catalog.selected().name, "uno");
        catalog.select("mega").unwrap();
        assert_eq!(catalog.selected().name, "mega");
    }
}
