//! `doc merge` command handler.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::cli::args::MergeArgs;
use crate::cli::exit::ConfigError;
use crate::config::{ConfigManager, MergeDefaults};
use crate::merge::{MergeOutcome, MergeRequest, Merger, NoopObserver};
use crate::ui::SpinnerObserver;

/// Builds the request: built-in defaults, then `[merge]` config, then flags.
pub fn build_request(args: &MergeArgs, defaults: &MergeDefaults) -> Result<MergeRequest> {
    let mut request = MergeRequest::new(&args.directory);
    defaults.apply(&mut request).map_err(ConfigError)?;

    if let Some(output) = args.output_path() {
        request.output.clone_from(output);
    }
    if let Some(order) = args.order {
        request.order = order;
    }
    if let Some(separator) = &args.separator {
        request.separator.clone_from(separator);
    }
    if let Some(depth) = args.toc_depth {
        request.toc_depth = usize::from(depth);
    }
    if let Some(level) = args.base_level {
        request.base_level = usize::from(level);
    }

    request.recursive = args.recursive;
    request.include.clone_from(&args.include);
    request.exclude.clone_from(&args.exclude);
    request.include_metadata = args.include_meta;
    request.generate_toc = !args.no_toc;
    request.adjust_headers = !args.no_adjust_headers;
    request.dry_run = args.dry_run;
    request.invocation = Some(invocation());

    Ok(request)
}

pub fn run_merge(args: &MergeArgs) -> Result<()> {
    let defaults = ConfigManager::new()
        .map_err(ConfigError)?
        .load_or_default()
        .merge;
    let request = build_request(args, &defaults)?;
    debug!(?request, "merge request");

    if request.dry_run {
        if let MergeOutcome::DryRun(manifest) = Merger::new(&request, &NoopObserver).run()? {
            println!("{manifest}");
        }
        return Ok(());
    }

    let observer = SpinnerObserver::new();
    Merger::new(&request, &observer).run()?;
    Ok(())
}

/// The command line as typed, with the program path reduced to its name.
fn invocation() -> String {
    let mut args = std::env::args();
    let program = args
        .next()
        .as_deref()
        .and_then(|p| Path::new(p).file_name())
        .map_or_else(|| "doc".to_string(), |n| n.to_string_lossy().into_owned());
    std::iter::once(program).chain(args).collect::<Vec<_>>().join(" ")
}
