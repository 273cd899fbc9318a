//! Known models per provider, with pricing for `doc models`.

use crate::config::ProviderKind;
use crate::ui::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Premium,
    Balanced,
    Economy,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::Balanced => "balanced",
            Self::Economy => "economy",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// USD per million input tokens.
    pub input_cost: f64,
    /// USD per million output tokens.
    pub output_cost: f64,
    pub context_window: u32,
    pub tier: Tier,
}

const fn model(
    id: &'static str,
    name: &'static str,
    input_cost: f64,
    output_cost: f64,
    context_window: u32,
    tier: Tier,
) -> ModelInfo {
    ModelInfo {
        id,
        name,
        input_cost,
        output_cost,
        context_window,
        tier,
    }
}

const OPENAI_MODELS: &[ModelInfo] = &[
    model("gpt-4", "GPT-4", 30.0, 60.0, 8_192, Tier::Premium),
    model("gpt-4-turbo", "GPT-4 Turbo", 10.0, 30.0, 128_000, Tier::Balanced),
    model("gpt-4o", "GPT-4o", 2.5, 10.0, 128_000, Tier::Balanced),
    model("gpt-4o-mini", "GPT-4o Mini", 0.15, 0.6, 128_000, Tier::Economy),
    model("gpt-3.5-turbo", "GPT-3.5 Turbo", 0.5, 1.5, 16_000, Tier::Economy),
];

const ANTHROPIC_MODELS: &[ModelInfo] = &[
    model("claude-3-opus-20240229", "Claude 3 Opus", 15.0, 75.0, 200_000, Tier::Premium),
    model("claude-3-sonnet-20240229", "Claude 3 Sonnet", 3.0, 15.0, 200_000, Tier::Balanced),
    model("claude-3-5-sonnet-20241022", "Claude 3.5 Sonnet", 3.0, 15.0, 200_000, Tier::Balanced),
    model("claude-3-haiku-20240307", "Claude 3 Haiku", 0.25, 1.25, 200_000, Tier::Economy),
    model("claude-3-5-haiku-20241022", "Claude 3.5 Haiku", 0.8, 4.0, 200_000, Tier::Economy),
];

/// Model aliases accepted by `claude --model`.
pub const CLAUDE_CODE_ALIASES: &[&str] = &["opus", "sonnet", "haiku"];

/// Catalog entries for API providers. Claude Code only takes aliases.
pub const fn models_for(provider: ProviderKind) -> &'static [ModelInfo] {
    match provider {
        ProviderKind::OpenAi => OPENAI_MODELS,
        ProviderKind::Anthropic => ANTHROPIC_MODELS,
        ProviderKind::ClaudeCode => &[],
    }
}

pub fn find_model(provider: ProviderKind, id: &str) -> Option<&'static ModelInfo> {
    models_for(provider).iter().find(|m| m.id == id)
}

/// Rough cost in USD, assuming four characters per token.
#[allow(clippy::cast_precision_loss)]
pub fn estimate_cost(model: &ModelInfo, input_chars: usize, output_chars: usize) -> f64 {
    let input_tokens = input_chars as f64 / 4.0;
    let output_tokens = output_chars as f64 / 4.0;
    (input_tokens * model.input_cost + output_tokens * model.output_cost) / 1_000_000.0
}

/// Prints the catalog for one provider, or all of them.
pub fn print_models(provider: Option<ProviderKind>) {
    let providers = provider.map_or_else(
        || vec![ProviderKind::ClaudeCode, ProviderKind::OpenAi, ProviderKind::Anthropic],
        |p| vec![p],
    );

    for (i, provider) in providers.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_provider(provider);
    }
}

fn print_provider(provider: ProviderKind) {
    let default = provider.default_model();
    println!("{}", Style::header(provider));

    if provider == ProviderKind::ClaudeCode {
        for alias in CLAUDE_CODE_ALIASES {
            let marker = if *alias == default {
                format!(" {}", Style::default_marker())
            } else {
                String::new()
            };
            println!("  {}{marker}", Style::value(alias));
        }
        return;
    }

    for m in models_for(provider) {
        let marker = if m.id == default {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!("  {}{marker}", Style::value(m.id));
        println!(
            "    {}",
            Style::secondary(format!(
                "{} | {} | ${:.2}/${:.2} per 1M tokens | {}k context",
                m.name,
                m.tier.as_str(),
                m.input_cost,
                m.output_cost,
                m.context_window / 1000
            ))
        );
    }
}
