//! High score persistence
//!
//! A single integer, stored as its decimal text. In the browser it lives in
//! LocalStorage; natively in a small file.

use std::io;
use std::path::PathBuf;

/// LocalStorage key for the high score
pub const STORAGE_KEY: &str = "ss_high_v1";

/// Key-value collaborator holding the high score
pub trait ScoreStore {
    /// Stored high score; missing or unreadable values read as 0
    fn load(&self) -> u64;
    /// Persist a new high score (fire-and-forget)
    fn save(&mut self, score: u64);
}

/// Parse stored text the way a lenient integer reader would: leading
/// digits count, anything else reads as 0.
pub fn parse_score(text: &str) -> u64 {
    let digits: &str = {
        let trimmed = text.trim_start();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    digits.parse().unwrap_or(0)
}

/// In-memory store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u64>,
    /// Number of writes performed
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            writes: 0,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        self.value = Some(score);
        self.writes += 1;
    }
}

/// File-backed store for native builds
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Write the score, reporting I/O failures
    pub fn try_save(&self, score: u64) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, score.to_string())
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> u64 {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let score = parse_score(&text);
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        match self.try_save(score) {
            Ok(()) => log::info!("High score {} saved", score),
            Err(e) => log::warn!("Failed to save high score to {}: {}", self.path.display(), e),
        }
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStore {
    fn load(&self) -> u64 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(text)) = storage.get_item(STORAGE_KEY) {
                let score = parse_score(&text);
                log::info!("Loaded high score {}", score);
                return score;
            }
        }
        log::info!("No high score found, starting fresh");
        0
    }

    fn save(&mut self, score: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(STORAGE_KEY, &score.to_string()).is_ok() {
                    log::info!("High score {} saved", score);
                } else {
                    log::warn!("LocalStorage rejected the high score");
                }
            }
            None => log::warn!("LocalStorage unavailable, high score not saved"),
        }
    }
}
