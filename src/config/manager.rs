use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use super::env::EnvSource;
use crate::format::mask_api_key;
use crate::fs::atomic_write;
use crate::merge::{MergeRequest, SortOrder, headers::MAX_LEVEL};
use crate::paths;

pub const DEFAULT_CLAUDE_CODE_PATH: &str = "claude";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";

/// Translation backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Local Claude Code CLI
    #[default]
    #[value(name = "claude-code")]
    #[serde(rename = "claude-code")]
    ClaudeCode,
    /// OpenAI chat completions API
    #[value(name = "openai")]
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic messages API
    #[value(name = "anthropic")]
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl ProviderKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude-code",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    pub const fn default_model(self) -> &'static str {
        match self {
            Self::ClaudeCode => "sonnet",
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-5-haiku-20241022",
        }
    }

    /// Parses a provider name as written in config files and `LLM_PROVIDER`.
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name.trim(), false).map_err(|_| {
            anyhow::anyhow!(
                "Invalid provider '{name}'. Must be one of: claude-code, openai, anthropic"
            )
        })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defaults for `doc merge` in the `[merge]` table of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeDefaults {
    /// Sort order name; unknown names fall back to filename ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toc_depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_level: Option<usize>,
}

impl MergeDefaults {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies these defaults on top of a fresh request.
    ///
    /// # Errors
    ///
    /// Returns an error if `toc_depth` or `base_level` is outside 1..=6.
    pub fn apply(&self, request: &mut MergeRequest) -> Result<()> {
        if let Some(order) = &self.order {
            request.order = SortOrder::from_name_or_default(order);
        }
        if let Some(separator) = &self.separator {
            request.separator.clone_from(separator);
        }
        if let Some(depth) = self.toc_depth {
            request.toc_depth = check_level("merge.toc_depth", depth)?;
        }
        if let Some(level) = self.base_level {
            request.base_level = check_level("merge.base_level", level)?;
        }
        Ok(())
    }
}

fn check_level(key: &str, value: usize) -> Result<usize> {
    if (1..=MAX_LEVEL).contains(&value) {
        Ok(value)
    } else {
        bail!("Invalid value for '{key}' in config file: {value} (must be between 1 and {MAX_LEVEL})")
    }
}

/// The configuration file structure.
///
/// Corresponds to `~/.config/doc/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_code_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "MergeDefaults::is_empty")]
    pub merge: MergeDefaults,
}

/// Keys accepted by `doc config set`.
pub const SETTABLE_KEYS: &[&str] = &[
    "provider",
    "openai_api_key",
    "anthropic_api_key",
    "claude_code_path",
    "openai_model",
    "anthropic_model",
    "claude_model",
    "openai_endpoint",
];

impl ConfigFile {
    /// A config file populated with every built-in default.
    pub fn with_defaults() -> Self {
        Self {
            provider: Some(ProviderKind::default().to_string()),
            claude_code_path: Some(DEFAULT_CLAUDE_CODE_PATH.to_string()),
            openai_model: Some(ProviderKind::OpenAi.default_model().to_string()),
            anthropic_model: Some(ProviderKind::Anthropic.default_model().to_string()),
            claude_model: Some(ProviderKind::ClaudeCode.default_model().to_string()),
            ..Self::default()
        }
    }

    /// Sets one flat key.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or invalid provider names.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim().to_string();
        let slot = match key.trim() {
            "provider" => {
                ProviderKind::parse(&value)?;
                &mut self.provider
            }
            "openai_api_key" => &mut self.openai_api_key,
            "anthropic_api_key" => &mut self.anthropic_api_key,
            "claude_code_path" => &mut self.claude_code_path,
            "openai_model" => &mut self.openai_model,
            "anthropic_model" => &mut self.anthropic_model,
            "claude_model" => &mut self.claude_model,
            "openai_endpoint" => &mut self.openai_endpoint,
            other => bail!(
                "Unknown configuration key '{other}'\n\nValid keys: {}",
                SETTABLE_KEYS.join(", ")
            ),
        };
        *slot = Some(value);
        Ok(())
    }
}

/// Parses a `key=value` argument of `doc config set`.
pub fn parse_assignment(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Invalid format '{pair}'. Use key=value format."))
}

/// Resolved translation settings after layering defaults, the config file and
/// the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub provider: ProviderKind,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub claude_code_path: String,
    pub openai_model: String,
    pub anthropic_model: String,
    pub claude_model: String,
    pub openai_endpoint: String,
}

impl ResolvedConfig {
    /// Model used by the selected provider.
    pub fn model(&self) -> &str {
        match self.provider {
            ProviderKind::ClaudeCode => &self.claude_model,
            ProviderKind::OpenAi => &self.openai_model,
            ProviderKind::Anthropic => &self.anthropic_model,
        }
    }

    /// Renders the settings as TOML-like lines with secrets masked.
    pub fn display_lines(&self) -> Vec<String> {
        let secret = |v: &Option<String>| mask_api_key(v.as_deref().unwrap_or_default());
        vec![
            format!("provider = \"{}\"", self.provider),
            format!("claude_code_path = \"{}\"", self.claude_code_path),
            format!("openai_model = \"{}\"", self.openai_model),
            format!("anthropic_model = \"{}\"", self.anthropic_model),
            format!("claude_model = \"{}\"", self.claude_model),
            format!("openai_endpoint = \"{}\"", self.openai_endpoint),
            format!("openai_api_key = \"{}\"", secret(&self.openai_api_key)),
            format!("anthropic_api_key = \"{}\"", secret(&self.anthropic_api_key)),
        ]
    }
}

/// Resolves translation settings.
///
/// Priority (highest first): environment (including `.env`), config file,
/// built-in defaults.
///
/// # Errors
///
/// Returns an error if the provider name is not recognized.
pub fn resolve_config(config_file: &ConfigFile, env: &EnvSource) -> Result<ResolvedConfig> {
    let pick = |var: &str, file: &Option<String>, default: &str| {
        env.get(var)
            .or_else(|| file.clone().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| default.to_string())
    };
    let pick_opt = |var: &str, file: &Option<String>| {
        env.get(var).or_else(|| file.clone().filter(|v| !v.is_empty()))
    };

    let provider = ProviderKind::parse(&pick(
        "LLM_PROVIDER",
        &config_file.provider,
        ProviderKind::default().as_str(),
    ))?;

    Ok(ResolvedConfig {
        provider,
        openai_api_key: pick_opt("OPENAI_API_KEY", &config_file.openai_api_key),
        anthropic_api_key: pick_opt("ANTHROPIC_API_KEY", &config_file.anthropic_api_key),
        claude_code_path: pick(
            "CLAUDE_CODE_PATH",
            &config_file.claude_code_path,
            DEFAULT_CLAUDE_CODE_PATH,
        ),
        openai_model: pick(
            "OPENAI_MODEL",
            &config_file.openai_model,
            ProviderKind::OpenAi.default_model(),
        ),
        anthropic_model: pick(
            "ANTHROPIC_MODEL",
            &config_file.anthropic_model,
            ProviderKind::Anthropic.default_model(),
        ),
        claude_model: pick(
            "CLAUDE_MODEL",
            &config_file.claude_model,
            ProviderKind::ClaudeCode.default_model(),
        ),
        openai_endpoint: pick(
            "OPENAI_ENDPOINT",
            &config_file.openai_endpoint,
            DEFAULT_OPENAI_ENDPOINT,
        ),
    })
}

/// Manages loading and saving the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/doc/config.toml`
    /// or `~/.config/doc/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.is_file()
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is reported and ignored.
    pub fn load_or_default(&self) -> ConfigFile {
        if !self.exists() {
            return ConfigFile::default();
        }
        self.load().unwrap_or_else(|err| {
            warn!("{err:#}");
            ConfigFile::default()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("nested").join("config.toml"))
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let mut config = ConfigFile::with_defaults();
        config.openai_api_key = Some("sk-test".to_string());
        config.merge.order = Some("size".to_string());

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert_eq!(manager.load_or_default(), ConfigFile::default());
    }

    #[test]
    fn test_load_or_default_ignores_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));
        fs::write(manager.config_path(), "provider = [").unwrap();

        assert!(manager.load().is_err());
        assert_eq!(manager.load_or_default(), ConfigFile::default());
    }

    #[test]
    fn test_parse_flat_keys_and_merge_table() {
        let config: ConfigFile = toml::from_str(
            r#"
            provider = "openai"
            openai_model = "gpt-4o"

            [merge]
            order = "modified"
            toc_depth = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.as_deref(), Some("openai"));
        assert_eq!(config.openai_model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.merge.order.as_deref(), Some("modified"));
        assert_eq!(config.merge.toc_depth, Some(2));
    }

    #[test]
    fn test_set_known_keys() {
        let mut config = ConfigFile::default();
        config.set("provider", "openai").unwrap();
        config.set("openai_api_key", " sk-abc ").unwrap();

        assert_eq!(config.provider.as_deref(), Some("openai"));
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-abc"));
    }

    #[test]
    fn test_set_rejects_unknown_key_and_provider() {
        let mut config = ConfigFile::default();
        let err = config.set("colour", "blue").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));

        let err = config.set("provider", "gemini").unwrap_err();
        assert!(err.to_string().contains("Invalid provider"));
        assert!(config.provider.is_none());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("provider=openai").unwrap(), ("provider", "openai"));
        assert_eq!(parse_assignment("k = a=b").unwrap(), ("k", "a=b"));
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = resolve_config(&ConfigFile::default(), &EnvSource::default()).unwrap();

        assert_eq!(resolved.provider, ProviderKind::ClaudeCode);
        assert_eq!(resolved.claude_code_path, "claude");
        assert_eq!(resolved.model(), "sonnet");
        assert_eq!(resolved.openai_model, "gpt-4o-mini");
        assert_eq!(resolved.openai_endpoint, DEFAULT_OPENAI_ENDPOINT);
        assert!(resolved.openai_api_key.is_none());
    }

    #[test]
    fn test_resolve_rejects_unknown_provider() {
        let config = ConfigFile {
            provider: Some("gemini".to_string()),
            ..ConfigFile::default()
        };
        assert!(resolve_config(&config, &EnvSource::default()).is_err());
    }

    #[test]
    fn test_display_lines_mask_secrets() {
        let config = ConfigFile {
            openai_api_key: Some("sk-1234567890abcd".to_string()),
            ..ConfigFile::default()
        };
        let resolved = resolve_config(&config, &EnvSource::default()).unwrap();
        let lines = resolved.display_lines();

        assert!(lines.contains(&"openai_api_key = \"sk-1...abcd\"".to_string()));
        assert!(lines.contains(&"anthropic_api_key = \"(not set)\"".to_string()));
    }

    #[test]
    fn test_merge_defaults_apply() {
        let defaults = MergeDefaults {
            order: Some("bogus".to_string()),
            separator: Some("\n***\n".to_string()),
            toc_depth: Some(4),
            base_level: None,
        };
        let mut request = MergeRequest::new("docs");
        request.order = SortOrder::Size;
        defaults.apply(&mut request).unwrap();

        assert_eq!(request.order, SortOrder::Filename);
        assert_eq!(request.separator, "\n***\n");
        assert_eq!(request.toc_depth, 4);
        assert_eq!(request.base_level, 2);
    }

    #[test]
    fn test_merge_defaults_reject_out_of_range() {
        let defaults = MergeDefaults {
            base_level: Some(9),
            ..MergeDefaults::default()
        };
        let mut request = MergeRequest::new("docs");
        assert!(defaults.apply(&mut request).is_err());
    }
}
