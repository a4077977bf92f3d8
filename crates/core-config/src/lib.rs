//! Configuration loading and parsing.
//!
//! `quill.toml` is looked up in the working directory first, then in the
//! platform config dir (`<config_dir>/quill/quill.toml`). The binary may pass
//! an explicit override. A missing file or a parse error yields defaults;
//! unknown fields are ignored so older binaries tolerate newer files.
//!
//! Values that depend on the window (typewriter row) are resolved by
//! `Config::apply_context` and re-resolved after every resize. The raw parsed
//! value is kept so a later resize can clamp again from the original.

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "quill.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    pub line_numbers: bool,
    pub tab_width: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            tab_width: 4,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UndoConfig {
    pub depth: usize,
    pub coalesce_inserts: bool,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            depth: 100,
            coalesce_inserts: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TypewriterConfig {
    pub enabled: bool,
    /// Fraction of the text area height where the cursor row is held.
    pub position: f32,
    pub focus_lines: usize,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            position: 0.66,
            focus_lines: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AutosaveConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StatusConfig {
    pub message_ttl_ms: u64,
    pub error_ttl_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            message_ttl_ms: 3000,
            error_ttl_ms: 5000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CursorConfig {
    /// Blink half-period; 0 keeps the cursor steady.
    pub blink_ms: u64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self { blink_ms: 530 }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub editor: EditorConfig,
    pub undo: UndoConfig,
    pub typewriter: TypewriterConfig,
    pub autosave: AutosaveConfig,
    pub status: StatusConfig,
    pub cursor: CursorConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    /// Typewriter fraction clamped into `[0, 1]`.
    pub effective_typewriter_position: f32,
    /// Window row the typewriter holds the cursor on for the last context.
    pub effective_typewriter_row: u16,
}

/// Best-effort config path: working directory, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::from_file(ConfigFile::default(), None));
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config::from_file(file, Some(content)))
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::from_file(ConfigFile::default(), None))
        }
    }
}

impl Config {
    pub fn from_file(file: ConfigFile, raw: Option<String>) -> Self {
        let position = file.typewriter.position;
        let clamped = clamp_position(position);
        if clamped != position {
            info!(
                target: "config",
                raw = f64::from(position),
                clamped = f64::from(clamped),
                "typewriter_position_clamped"
            );
        }
        Self {
            raw,
            file,
            effective_typewriter_position: clamped,
            effective_typewriter_row: 0,
        }
    }

    /// Resolve window-dependent values for a text area of `text_rows` rows.
    /// Returns the typewriter row.
    pub fn apply_context(&mut self, text_rows: u16) -> u16 {
        let clamped = clamp_position(self.file.typewriter.position);
        self.effective_typewriter_position = clamped;
        let row = if text_rows == 0 {
            0
        } else {
            ((f32::from(text_rows) * clamped).floor() as u16).min(text_rows - 1)
        };
        self.effective_typewriter_row = row;
        row
    }

    /// Re-resolve after a resize. `Some(row)` when the typewriter row moved.
    pub fn recompute_after_resize(&mut self, text_rows: u16) -> Option<u16> {
        let prev = self.effective_typewriter_row;
        let row = self.apply_context(text_rows);
        (row != prev).then_some(row)
    }

    pub fn message_ttl(&self) -> Duration {
        Duration::from_millis(self.file.status.message_ttl_ms)
    }

    pub fn error_ttl(&self) -> Duration {
        Duration::from_millis(self.file.status.error_ttl_ms)
    }

    /// `None` when blinking is disabled.
    pub fn blink_interval(&self) -> Option<Duration> {
        (self.file.cursor.blink_ms > 0).then(|| Duration::from_millis(self.file.cursor.blink_ms))
    }

    /// `None` when auto-save is disabled.
    pub fn autosave_interval(&self) -> Option<Duration> {
        let a = &self.file.autosave;
        (a.enabled && a.interval_secs > 0).then(|| Duration::from_secs(a.interval_secs))
    }
}

fn clamp_position(raw: f32) -> f32 {
    if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
}
