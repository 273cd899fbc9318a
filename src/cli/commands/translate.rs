use anyhow::Result;
use std::io::{self, Write};
use std::time::Instant;
use tracing::debug;

use crate::cli::exit::ConfigError;
use crate::config::{ConfigManager, EnvSource, ResolvedConfig, resolve_config};
use crate::format::format_duration;
use crate::input::InputReader;
use crate::translation::{Provider, TranslationRequest, estimate_cost, find_model, validate_language};
use crate::ui::Spinner;

pub struct TranslateOptions {
    pub lang: String,
    pub instruction: Option<String>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    validate_language(&options.lang)?;

    let config = load_resolved_config().map_err(ConfigError)?;
    debug!(provider = %config.provider, model = config.model(), "resolved configuration");

    let content = InputReader::read_stdin()?;
    let provider = Provider::from_config(&config)?;

    let request = TranslationRequest {
        content,
        target_language: options.lang,
        instruction: options.instruction,
    };

    let started = Instant::now();
    let spinner = Spinner::new(&format!("Translating with {}...", provider.name()));
    let translated = provider.translate(&request).await;
    spinner.stop();
    let translated = translated?;

    debug!(elapsed = %format_duration(started.elapsed()), "translation finished");
    if let Some(model) = find_model(config.provider, config.model()) {
        let cost = estimate_cost(model, request.content.len(), translated.len());
        debug!(model = model.id, "estimated cost: ${cost:.4}");
    }

    let mut stdout = io::stdout().lock();
    write!(stdout, "{translated}")?;
    if !translated.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(())
}

fn load_resolved_config() -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default();
    resolve_config(&file_config, &EnvSource::from_process())
}
