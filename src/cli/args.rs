use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ProviderKind;
use crate::merge::SortOrder;

#[derive(Parser, Debug)]
#[command(name = "doc")]
#[command(about = "Translate documents with LLMs and merge markdown directories")]
#[command(
    after_help = "Examples:\n  cat README.md | doc ja\n  cat guide.md | doc en \"keep technical terms\"\n  doc merge ./docs -r --order custom"
)]
#[command(version)]
pub struct Args {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Target language code (ISO 639-1, e.g., ja, en, zh)
    pub lang: Option<String>,

    /// Extra instruction for the translator
    pub instruction: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge the markdown files in a directory into one document
    Merge(MergeArgs),
    /// List supported language codes
    Languages,
    /// List known models per provider
    Models {
        /// Only show this provider
        #[arg(value_enum)]
        provider: Option<ProviderKind>,
    },
    /// Show or edit the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set one or more values (KEY=VALUE)
    Set {
        #[arg(required = true, value_name = "KEY=VALUE")]
        pairs: Vec<String>,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct MergeArgs {
    /// Directory containing markdown files
    pub directory: PathBuf,

    /// Output file (takes precedence over --output)
    #[arg(value_name = "OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// Output file [default: merged.md]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// File ordering
    #[arg(long, value_enum)]
    pub order: Option<SortOrder>,

    /// Only merge files whose name matches this glob (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Skip files whose name matches this glob (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Add generation metadata and source comments
    #[arg(long)]
    pub include_meta: bool,

    /// Do not generate a table of contents
    #[arg(long)]
    pub no_toc: bool,

    /// Deepest header level listed in the table of contents [default: 3]
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub toc_depth: Option<u8>,

    /// Keep header levels as written
    #[arg(long, conflicts_with = "adjust_headers")]
    pub no_adjust_headers: bool,

    /// Shift header levels under the document title (default)
    #[arg(long)]
    pub adjust_headers: bool,

    /// Level that top-level headers are shifted to [default: 2]
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub base_level: Option<u8>,

    /// Text inserted between files [default: "\n\n---\n\n"]
    #[arg(long)]
    pub separator: Option<String>,

    /// List the files that would be merged without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl MergeArgs {
    /// The positional output wins over `--output`.
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.output_file.as_ref().or(self.output.as_ref())
    }
}
