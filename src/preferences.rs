// Improvement potential: Write JSON files atomically (temp file + rename).

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::warn;


pub const SEEK_VARIANT: &str = "seek_variant";
pub const SEEK_MINUTES: &str = "seek_min";
pub const SEEK_INCREMENT: &str = "seek_inc";
pub const SEEK_BYOYOMI: &str = "seek_byo";
pub const SEEK_DAY: &str = "seek_day";
pub const SEEK_RATED: &str = "seek_rated";
pub const SEEK_RATING_MIN: &str = "seek_rating_min";
pub const SEEK_RATING_MAX: &str = "seek_rating_max";
pub const SEEK_CHESS960: &str = "seek_chess960";
pub const SEEK_LEVEL: &str = "seek_level";
pub const SEEK_RANDOM_MOVER: &str = "seek_rmplay";
pub const LOBBY_TAB: &str = "lobby_tab";
pub const AUTO_RATING_MIN: &str = "auto_rating_min";
pub const AUTO_RATING_MAX: &str = "auto_rating_max";

// Key/value cache of the user's last choices. Values are strings, like in browser storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

// Reads a value, falling back to `default` when it's missing or cannot be parsed.
pub fn get_or<T: FromStr>(store: &dyn PreferenceStore, key: &str, default: T) -> T {
    store.get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

pub fn set_value<T: ToString>(store: &mut dyn PreferenceStore, key: &str, value: T) {
    store.set(key, value.to_string());
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> { self.values.get(key).cloned() }
    fn set(&mut self, key: &str, value: String) { self.values.insert(key.to_owned(), value); }
}

// Preferences persisted as a flat JSON object. Every `set` rewrites the file; write failures are
// logged and the in-memory value is kept.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    // A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_owned();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        Ok(JsonFileStore { path, values })
    }

    pub fn path(&self) -> &Path { &self.path }

    fn flush(&self) -> io::Result<()> {
        let contents = serde_json::to_string_pretty(&self.values)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        std::fs::write(&self.path, contents)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> { self.values.get(key).cloned() }

    fn set(&mut self, key: &str, value: String) {
        if self.values.get(key) == Some(&value) {
            return;
        }
        self.values.insert(key.to_owned(), value);
        if let Err(err) = self.flush() {
            warn!("Cannot save preferences to {}: {}", self.path.display(), err);
        }
    }
}
