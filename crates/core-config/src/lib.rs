//! Configuration loading and parsing.
//!
//! Parses `lens.toml` (or an override path provided by the binary). Every
//! field has a default, unknown fields are ignored and a file that fails to
//! parse falls back to the defaults with a warning, so a broken config never
//! prevents the editor from starting.
//!
//! Raw values are kept as parsed; `Config::apply_context` derives the
//! effective values for the current terminal size and logs every clamp under
//! the `config` target. The raw values are retained so a resize can re-clamp.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

/// Terminal geometry the effective values are derived against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_columns: u16,
    pub viewport_rows: u16,
}

impl ConfigContext {
    pub fn new(viewport_columns: u16, viewport_rows: u16) -> Self {
        Self {
            viewport_columns,
            viewport_rows,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    /// Terminal rows not available to buffer lines (headline, ruler, cursor
    /// marker, keyword and rot13 rows).
    #[serde(default = "ViewConfig::default_reserved_rows")]
    pub reserved_rows: u16,
    #[serde(default = "ViewConfig::default_table_cell_width")]
    pub table_cell_width: u16,
    /// Byte bound of the incremental search pattern.
    #[serde(default = "ViewConfig::default_search_pattern_max")]
    pub search_pattern_max: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            reserved_rows: Self::default_reserved_rows(),
            table_cell_width: Self::default_table_cell_width(),
            search_pattern_max: Self::default_search_pattern_max(),
        }
    }
}

impl ViewConfig {
    const fn default_reserved_rows() -> u16 {
        6
    }
    const fn default_table_cell_width() -> u16 {
        16
    }
    const fn default_search_pattern_max() -> usize {
        80
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    /// File opened when no path is given on the command line.
    #[serde(default = "EditorConfig::default_file")]
    pub default_file: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_file: Self::default_file(),
        }
    }
}

impl EditorConfig {
    fn default_file() -> PathBuf {
        PathBuf::from("e.txt")
    }
}

/// Extra character-variant groups for the rotate-variant command. Each
/// string is one cycle, e.g. `"oöôò"`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct VariantsConfig {
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub variants: VariantsConfig,
}

/// Values after clamping against the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveView {
    pub reserved_rows: u16,
    pub table_cell_width: u16,
    pub search_pattern_max: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,
    pub file: ConfigFile,
    pub effective: Option<EffectiveView>,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("lens.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("lens").join("lens.toml");
    }
    PathBuf::from("lens.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                effective: None,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp the raw view values against the terminal and store the result.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> EffectiveView {
        let raw = &self.file.view;
        let max_reserved = ctx.viewport_rows.saturating_sub(1);
        let reserved_rows = raw.reserved_rows.min(max_reserved);
        if reserved_rows != raw.reserved_rows {
            info!(
                target: "config",
                raw = raw.reserved_rows,
                clamped = reserved_rows,
                viewport_rows = ctx.viewport_rows,
                "reserved_rows_clamped"
            );
        }
        let table_cell_width = raw.table_cell_width.max(2);
        if table_cell_width != raw.table_cell_width {
            info!(target: "config", raw = raw.table_cell_width, clamped = table_cell_width, "table_cell_width_clamped");
        }
        let search_pattern_max = raw.search_pattern_max.max(1);
        if search_pattern_max != raw.search_pattern_max {
            info!(target: "config", raw = raw.search_pattern_max, clamped = search_pattern_max, "search_pattern_max_clamped");
        }
        let effective = EffectiveView {
            reserved_rows,
            table_cell_width,
            search_pattern_max,
        };
        self.effective = Some(effective);
        effective
    }

    /// Re-clamp after a terminal resize. Returns the new values when they
    /// changed.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<EffectiveView> {
        let prev = self.effective;
        let current = self.apply_context(ctx);
        (prev != Some(current)).then_some(current)
    }
}
