//! Configuration file management and provider settings.

mod env;
mod manager;

pub use env::{EnvSource, load_dotenv};
pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_CLAUDE_CODE_PATH, DEFAULT_OPENAI_ENDPOINT, MergeDefaults,
    ProviderKind, ResolvedConfig, SETTABLE_KEYS, parse_assignment, resolve_config,
};
