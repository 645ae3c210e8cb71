use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::theme::{apply_overrides, Theme, ThemeOverrides};

const DEFAULT_PREVIEW_CHARS: usize = 80;
const DEFAULT_EDITOR_ROWS: usize = 6;

/// Rendering knobs shared by both modals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    /// Max chars of an item's source text quoted in the walker document.
    pub preview_chars: usize,
    /// Max visible rows of the inline editor.
    pub editor_rows: usize,
    /// Highlight lines that differ between ours and theirs.
    pub diff_marks: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
            editor_rows: DEFAULT_EDITOR_ROWS,
            diff_marks: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PickConfig {
    pub theme: Theme,
    /// `[colors]` from the file, reapplied whenever the theme changes.
    pub colors: ThemeOverrides,
    pub ui: UiOptions,
}

impl PickConfig {
    /// Switch to a built-in theme, keeping the file's color overrides.
    pub fn set_theme(&mut self, name: &str) {
        self.theme = Theme::from_name(name);
        apply_overrides(&mut self.theme, &self.colors);
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    colors: Option<ThemeOverrides>,
    #[serde(default)]
    preview_chars: Option<usize>,
    #[serde(default)]
    editor_rows: Option<usize>,
    #[serde(default)]
    diff_marks: Option<bool>,
}

pub fn config_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("mpick");
    path.push("config.toml");
    path
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load config from `path` (or `~/.config/mpick/config.toml`), falling back
/// to defaults when the file is missing or malformed.
pub fn load_config(path: Option<&Path>) -> PickConfig {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);

    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return PickConfig::default(),
    };

    match toml::from_str::<ConfigFile>(&contents) {
        Ok(file) => from_file(file),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed config");
            PickConfig::default()
        }
    }
}

fn from_file(file: ConfigFile) -> PickConfig {
    let colors = file.colors.unwrap_or_default();
    let mut theme = Theme::from_name(file.theme.as_deref().unwrap_or("one-dark"));
    apply_overrides(&mut theme, &colors);

    let defaults = UiOptions::default();
    PickConfig {
        theme,
        colors,
        ui: UiOptions {
            preview_chars: file
                .preview_chars
                .filter(|&n| n > 0)
                .unwrap_or(defaults.preview_chars),
            editor_rows: file
                .editor_rows
                .filter(|&n| n > 0)
                .unwrap_or(defaults.editor_rows),
            diff_marks: file.diff_marks.unwrap_or(defaults.diff_marks),
        },
    }
}
