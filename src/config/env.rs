//! Environment variable lookup with `.env` file fallback.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

/// Variables read from the process environment, backed by a `.env` file.
///
/// Process variables always win; a `.env` entry only fills keys that are unset
/// or empty in the environment. Nothing is written back into the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    dotenv: HashMap<String, String>,
    process: bool,
}

impl EnvSource {
    /// Reads the real environment plus `.env` in the working directory.
    pub fn from_process() -> Self {
        Self {
            dotenv: load_dotenv(Path::new(".env")),
            process: true,
        }
    }

    /// An isolated source containing only `pairs`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            dotenv: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            process: false,
        }
    }

    /// Returns the non-empty value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        if self.process
            && let Ok(value) = std::env::var(key)
            && !value.is_empty()
        {
            return Some(value);
        }
        self.dotenv.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Parses `KEY=VALUE` lines from a dotenv file. Missing files yield nothing.
pub fn load_dotenv(path: &Path) -> HashMap<String, String> {
    fs::read_to_string(path)
        .map(|content| {
            debug!(path = %path.display(), "loaded dotenv file");
            parse_dotenv(&content)
        })
        .unwrap_or_default()
}

fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = ['"', '\'']
                .into_iter()
                .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
                .unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}
