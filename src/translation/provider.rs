use tracing::{debug, info};

use super::claude_code::ClaudeCodeProvider;
use super::error::TranslateError;
use super::language::language_name;
use super::openai::OpenAiProvider;
use super::prompt::{standalone_prompt, system_prompt, user_prompt};
use crate::config::{ProviderKind, ResolvedConfig};

/// A document to translate.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub content: String,
    pub target_language: String,
    pub instruction: Option<String>,
}

impl TranslationRequest {
    fn language(&self) -> &str {
        language_name(&self.target_language).unwrap_or(&self.target_language)
    }
}

/// A configured translation backend.
pub enum Provider {
    ClaudeCode(ClaudeCodeProvider),
    OpenAi(OpenAiProvider),
    Anthropic,
}

impl Provider {
    /// Builds the provider selected in `config`.
    ///
    /// # Errors
    ///
    /// Fails when the selected provider's API key is missing or the Claude
    /// Code executable cannot be found.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, TranslateError> {
        match config.provider {
            ProviderKind::ClaudeCode => Ok(Self::ClaudeCode(ClaudeCodeProvider::new(
                &config.claude_code_path,
                &config.claude_model,
            )?)),
            ProviderKind::OpenAi => {
                let api_key = config
                    .openai_api_key
                    .as_deref()
                    .ok_or(TranslateError::MissingApiKey {
                        provider: "OpenAI",
                        env_var: "OPENAI_API_KEY",
                        key: "openai_api_key",
                    })?;
                Ok(Self::OpenAi(OpenAiProvider::new(
                    &config.openai_endpoint,
                    api_key,
                    &config.openai_model,
                )?))
            }
            ProviderKind::Anthropic => {
                if config.anthropic_api_key.is_none() {
                    return Err(TranslateError::MissingApiKey {
                        provider: "Anthropic",
                        env_var: "ANTHROPIC_API_KEY",
                        key: "anthropic_api_key",
                    });
                }
                Ok(Self::Anthropic)
            }
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::ClaudeCode(_) => "Claude Code CLI",
            Self::OpenAi(_) => "OpenAI API",
            Self::Anthropic => "Anthropic Claude API",
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Self::ClaudeCode(p) => Some(p.model()),
            Self::OpenAi(p) => Some(p.model()),
            Self::Anthropic => None,
        }
    }

    /// Translates the request and returns the provider's output verbatim.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let language = request.language();
        let code = request.target_language.as_str();
        let instruction = request.instruction.as_deref();

        info!(
            provider = self.name(),
            model = self.model().unwrap_or("-"),
            target = code,
            "translating document"
        );
        debug!(bytes = request.content.len(), "document size");

        match self {
            Self::ClaudeCode(provider) => {
                let prompt = standalone_prompt(language, code, instruction, &request.content);
                provider.run(&prompt).await
            }
            Self::OpenAi(provider) => {
                let user = user_prompt(language, code, instruction, &request.content);
                provider.complete(&system_prompt(), &user).await
            }
            Self::Anthropic => Err(TranslateError::Unsupported("Anthropic")),
        }
    }
}
