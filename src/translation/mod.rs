mod claude_code;
mod error;
mod language;
mod models;
mod openai;
mod prompt;
mod provider;

pub use claude_code::{ClaudeCodeProvider, find_executable};
pub use error::TranslateError;
pub use language::{
    SUPPORTED_LANGUAGES, language_name, print_languages, similar_codes, validate_language,
};
pub use models::{
    CLAUDE_CODE_ALIASES, ModelInfo, Tier, estimate_cost, find_model, models_for, print_models,
};
pub use openai::OpenAiProvider;
pub use provider::{Provider, TranslationRequest};
