use color_eyre::{Result, eyre::WrapErr};
use directories::ProjectDirs;
use forms::{FormSchema, create_user_schema};
use lazy_static::lazy_static;
use ratatui::style::Color;
use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{info, warn};

/// Background colors cycled through by the submission cards.
pub const DEFAULT_CARD_PALETTE: [&str; 9] = [
    "#a31545", "#6d1b7b", "#2196f3", "#6fbf73", "#ff9800", "#8561c5", "#00bcd4", "#4dabf5",
    "#00bcd4",
];

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default = "default_palette")]
    pub card_palette: Vec<String>,
    /// Replaces the built-in create-user table.
    #[serde(default)]
    pub form: Option<FormSchema>,
}

fn default_tick_rate() -> f64 {
    4.0
}

fn default_frame_rate() -> f64 {
    30.0
}

fn default_palette() -> Vec<String> {
    DEFAULT_CARD_PALETTE.iter().map(|c| c.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            tick_rate: default_tick_rate(),
            frame_rate: default_frame_rate(),
            log_level: None,
            card_palette: default_palette(),
            form: None,
        }
    }
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    /// Load `config.json5` and `config.toml` from `config_dir` (or the default
    /// config dir), then `QUILL_*` environment variables on top.
    pub fn new(config_dir: Option<&Path>) -> Result<Self> {
        let data_dir = get_data_dir();
        let config_dir = config_dir.map(Path::to_path_buf).unwrap_or_else(get_config_dir);
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().into_owned())?
            .set_default("config_dir", config_dir.to_string_lossy().into_owned())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            info!(dir = %config_dir.display(), "no configuration file found, using defaults");
        }
        builder = builder.add_source(
            config::Environment::with_prefix(PROJECT_NAME.as_str()).try_parsing(true),
        );

        let cfg: Self = builder
            .build()?
            .try_deserialize()
            .wrap_err("invalid configuration")?;
        Ok(cfg)
    }

    /// The configured field table, or the built-in create-user form.
    pub fn schema(&self) -> Result<FormSchema> {
        let schema = match &self.form {
            Some(form) => form.clone().validated()?,
            None => create_user_schema()?,
        };
        Ok(schema)
    }

    /// Parsed card colors; unparsable entries are skipped.
    pub fn palette(&self) -> Vec<Color> {
        let colors = parse_palette(&self.card_palette);
        if colors.is_empty() {
            parse_palette(&default_palette())
        } else {
            colors
        }
    }
}

fn parse_palette(entries: &[String]) -> Vec<Color> {
    entries
        .iter()
        .filter_map(|entry| match Color::from_str(entry) {
            Ok(color) => Some(color),
            Err(_) => {
                warn!(color = %entry, "ignoring unknown card color");
                None
            }
        })
        .collect()
}

/// `QUILL_DATA`, else the platform data dir, else `./.data`.
pub fn get_data_dir() -> PathBuf {
    DATA_FOLDER
        .clone()
        .unwrap_or_else(|| platform_dir(ProjectDirs::data_local_dir, ".data"))
}

/// `QUILL_CONFIG`, else the platform config dir, else `./.config`.
pub fn get_config_dir() -> PathBuf {
    CONFIG_FOLDER
        .clone()
        .unwrap_or_else(|| platform_dir(ProjectDirs::config_local_dir, ".config"))
}

fn platform_dir(pick: fn(&ProjectDirs) -> &Path, fallback: &str) -> PathBuf {
    ProjectDirs::from("org", "quill", env!("CARGO_PKG_NAME"))
        .map(|dirs| pick(&dirs).to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(fallback))
}
