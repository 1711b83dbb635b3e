use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub test: TestConfig,
    #[serde(default)]
    pub questions: QuestionsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

// ============================================================================
// Test Config
// ============================================================================

#[derive(Debug, Deserialize, Clone)]
pub struct TestConfig {
    /// Countdown for each question, in ticks
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u32,
    /// Length of one tick in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Points awarded per correct answer
    #[serde(default = "default_points_per_correct")]
    pub points_per_correct: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            countdown_secs: default_countdown_secs(),
            tick_ms: default_tick_ms(),
            points_per_correct: default_points_per_correct(),
        }
    }
}

impl TestConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn default_countdown_secs() -> u32 {
    300
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_points_per_correct() -> u32 {
    10
}

// ============================================================================
// Questions Config
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuestionsConfig {
    /// JSON question bank replacing the built-in one
    #[serde(default)]
    pub path: Option<String>,
    /// Category used when none is given on the command line
    #[serde(default = "default_category")]
    pub default_category: String,
}

impl Default for QuestionsConfig {
    fn default() -> Self {
        Self {
            path: None,
            default_category: default_category(),
        }
    }
}

fn default_category() -> String {
    "cardiology".into()
}

// ============================================================================
// UI Config
// ============================================================================

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusStyleConfig {
    /// Emojis and symbols
    #[default]
    Emoji,
    /// Plain text labels
    Text,
}

#[derive(Debug, Deserialize)]
pub struct UiConfig {
    /// Brand shown in the page header
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub status_style: StatusStyleConfig,
    /// Where notepad contents are saved on exit
    #[serde(default)]
    pub notes_path: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            status_style: StatusStyleConfig::default(),
            notes_path: None,
        }
    }
}

fn default_title() -> String {
    "CLINICAL SCHOLAR".into()
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            return Config::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config.toml: {:#}", e);
                Config::default()
            }
        }
    }

    /// Load an explicitly requested config file; errors are reported
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.test.tick_ms == 0 {
            bail!("test.tick_ms must be greater than zero");
        }
        Ok(())
    }
}
