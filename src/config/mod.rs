use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editor::tools::DEFAULT_BRUSH_RADIUS;
use crate::editor::{ZoomLimits, DEFAULT_HISTORY_LIMIT, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN};
use crate::geometry::Color;

const APP_DIR: &str = "deskedit";
const APP_CONFIG_FILE: &str = "config.json";
const MAX_CANVAS_SIDE: u32 = 16_384;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory: XDG_CONFIG_HOME, APPDATA and HOME are all unset")]
    MissingHomeDirectory,
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Editor settings from `config.json`. Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Color,
    pub brush_color: Color,
    pub brush_radius: u32,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub history_limit: usize,
    pub debug_logging: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: Color::from_argb(0xFF1E_1E1E),
            brush_color: Color::from_argb(0xFFFF_0000),
            brush_radius: DEFAULT_BRUSH_RADIUS,
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            history_limit: DEFAULT_HISTORY_LIMIT,
            debug_logging: false,
        }
    }
}

impl EditorConfig {
    /// Clamps values that would leave the editor unusable.
    pub fn sanitized(mut self) -> Self {
        self.canvas_width = self.canvas_width.clamp(1, MAX_CANVAS_SIDE);
        self.canvas_height = self.canvas_height.clamp(1, MAX_CANVAS_SIDE);
        self.brush_radius = self.brush_radius.max(1);
        self.history_limit = self.history_limit.max(1);
        let limits = ZoomLimits::new(self.zoom_min, self.zoom_max);
        self.zoom_min = limits.min();
        self.zoom_max = limits.max();
        self
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.zoom_min, self.zoom_max)
    }
}

/// Loads the user config. A missing file yields defaults; an unreadable or
/// invalid one is returned as an error so the caller can log it once logging
/// is up.
pub fn load_editor_config() -> ConfigResult<EditorConfig> {
    let path = app_config_path(APP_DIR, APP_CONFIG_FILE, &config_env_dirs())?;
    load_editor_config_or_default(&path)
}

pub fn load_editor_config_or_default(path: &Path) -> ConfigResult<EditorConfig> {
    if !path.exists() {
        return Ok(EditorConfig::default());
    }
    load_editor_config_from(path)
}

pub fn load_editor_config_from(path: &Path) -> ConfigResult<EditorConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: EditorConfig =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(config.sanitized())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEnvDirs {
    pub xdg_config_home: Option<PathBuf>,
    pub app_data: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

pub fn config_env_dirs() -> ConfigEnvDirs {
    ConfigEnvDirs {
        xdg_config_home: std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        app_data: std::env::var_os("APPDATA").map(PathBuf::from),
        home: std::env::var_os("HOME").map(PathBuf::from),
    }
}

pub fn app_config_path(
    app_dir: &str,
    file_name: &str,
    dirs: &ConfigEnvDirs,
) -> ConfigResult<PathBuf> {
    let mut path = config_root(dirs)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn non_empty(path: Option<&PathBuf>) -> Option<&PathBuf> {
    path.filter(|path| !path.as_os_str().is_empty())
}

fn config_root(dirs: &ConfigEnvDirs) -> ConfigResult<PathBuf> {
    if let Some(xdg) = non_empty(dirs.xdg_config_home.as_ref()) {
        return Ok(xdg.clone());
    }
    if let Some(app_data) = non_empty(dirs.app_data.as_ref()) {
        return Ok(app_data.clone());
    }

    let home = non_empty(dirs.home.as_ref()).ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
