//! Command line argument parsing for the Rephrase CLI using clap.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{RephraseError, Result};
use crate::lexicon::selection::{AdjectiveSource, ResourceSelection, SynonymSource};
use crate::rewrite::RewriteConfig;
use crate::transform::config::TransformationConfig;
use crate::transform::pipeline::Policy;

/// Rephrase - rewrite English text with synonyms, emphasis and sentence
/// structure variation
#[derive(Parser, Debug, Clone)]
#[command(name = "rephrase")]
#[command(about = "Rewrite English text with synonyms, emphasis and structure variation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RephraseArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "FILE", env = "REPHRASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Directory holding the tagging model and lexicons (fetched on first use)
    #[arg(long, value_name = "DIR", env = "REPHRASE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl RephraseArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// POS-naive synonym substitution and emphasis
    Basic(TransformArgs),

    /// Context-aware synonym substitution and emphasis
    Contextual(TransformArgs),

    /// Clause reordering, voice changes and varied sentence beginnings
    Structure(TransformArgs),

    /// Structure variation followed by context-aware substitution
    #[command(alias = "advanced")]
    Combined(TransformArgs),

    /// Rewrite text through the model server
    Humanize(HumanizeArgs),

    /// Rewrite a document paragraph by paragraph
    Document(DocumentArgs),

    /// Rewrite every matching document in a directory
    Batch(BatchArgs),
}

impl Command {
    /// The local policy a text command runs, if any.
    pub fn policy(&self) -> Option<Policy> {
        match self {
            Command::Basic(_) => Some(Policy::Basic),
            Command::Contextual(_) => Some(Policy::Contextual),
            Command::Structure(_) => Some(Policy::Structure),
            Command::Combined(_) => Some(Policy::Combined),
            _ => None,
        }
    }
}

/// Where the text comes from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Text to transform (read from stdin when omitted)
    #[arg(value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl InputArgs {
    /// The argument text, the file content, or stdin.
    pub fn read_text(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.input {
            return fs::read_to_string(path).map_err(|e| {
                RephraseError::invalid_argument(format!("cannot read {}: {e}", path.display()))
            });
        }
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    }
}

/// Transformation percentages and switches
#[derive(Args, Debug, Clone, Default)]
pub struct PercentArgs {
    /// Share of words replaced with synonyms (0-100)
    #[arg(long, value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub percent_synonyms: Option<u8>,

    /// Chance to emphasize an adjective (0-100)
    #[arg(long, value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub percent_adjectives: Option<u8>,

    /// Chance to reorder the clauses of a sentence (0-100)
    #[arg(long, value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub percent_reorder: Option<u8>,

    /// Chance to change the voice of a sentence (0-100)
    #[arg(long, value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub percent_voice: Option<u8>,

    /// Chance to vary the beginning of a sentence (0-100)
    #[arg(long, value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub percent_beginning: Option<u8>,

    /// Transform quoted spans too
    #[arg(long)]
    pub include_quotes: bool,

    /// Do not filter synonym candidates by part of speech
    #[arg(long)]
    pub no_pos_filtering: bool,
}

impl PercentArgs {
    /// Override `config` with the flags that were given.
    pub fn apply(&self, mut config: TransformationConfig) -> TransformationConfig {
        if let Some(p) = self.percent_synonyms {
            config = config.with_percent_synonyms(p);
        }
        if let Some(p) = self.percent_adjectives {
            config = config.with_percent_adjectives(p);
        }
        if let Some(p) = self.percent_reorder {
            config = config.with_percent_reorder(p);
        }
        if let Some(p) = self.percent_voice {
            config = config.with_percent_voice_change(p);
        }
        if let Some(p) = self.percent_beginning {
            config = config.with_percent_beginning_vary(p);
        }
        if self.include_quotes {
            config = config.with_ignore_quotes(false);
        }
        if self.no_pos_filtering {
            config = config.with_pos_filtering(false);
        }
        config
    }
}

/// Lexical resource choice
#[derive(Args, Debug, Clone, Default)]
pub struct ResourceArgs {
    /// Synonym list: primary, secondary or custom
    #[arg(long, value_name = "LIST")]
    pub synonyms: Option<SynonymSource>,

    /// Adjective list: default or custom
    #[arg(long, value_name = "LIST")]
    pub adjectives: Option<AdjectiveSource>,

    /// Only replace common words
    #[arg(long)]
    pub common_words: bool,

    /// Custom synonym list: a JSON file or an http(s) URL
    #[arg(long, value_name = "FILE_OR_URL")]
    pub custom_synonyms: Option<String>,

    /// Custom adjective list: a JSON file or an http(s) URL
    #[arg(long, value_name = "FILE_OR_URL")]
    pub custom_adjectives: Option<String>,
}

impl ResourceArgs {
    /// Override `selection` with the flags that were given.
    ///
    /// Loading a custom list selects it unless another list was named.
    pub fn apply(&self, mut selection: ResourceSelection) -> ResourceSelection {
        if self.custom_synonyms.is_some() {
            selection = selection.with_synonyms(SynonymSource::Custom);
        }
        if self.custom_adjectives.is_some() {
            selection = selection.with_adjectives(AdjectiveSource::Custom);
        }
        if let Some(synonyms) = self.synonyms {
            selection = selection.with_synonyms(synonyms);
        }
        if let Some(adjectives) = self.adjectives {
            selection = selection.with_adjectives(adjectives);
        }
        if self.common_words {
            selection = selection.with_common_words_only(true);
        }
        selection
    }
}

/// Model server settings
#[derive(Args, Debug, Clone, Default)]
pub struct RewriteArgs {
    /// Model server URL
    #[arg(long, value_name = "URL", env = "REPHRASE_URL")]
    pub url: Option<String>,

    /// Model name
    #[arg(long, value_name = "MODEL", env = "REPHRASE_MODEL")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl RewriteArgs {
    /// Override `config` with the flags that were given.
    pub fn apply(&self, mut config: RewriteConfig) -> RewriteConfig {
        if let Some(url) = &self.url {
            config = config.with_url(url.clone());
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            config = config.with_max_tokens(max_tokens);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_secs(timeout);
        }
        config
    }
}

/// Arguments for the text transformation commands
#[derive(Parser, Debug, Clone)]
pub struct TransformArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub percents: PercentArgs,

    #[command(flatten)]
    pub resources: ResourceArgs,
}

/// Arguments for humanizing through the model server
#[derive(Parser, Debug, Clone)]
pub struct HumanizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the rewrite as it is generated
    #[arg(long)]
    pub stream: bool,

    /// Run a basic substitution pass before the rewrite
    #[arg(long)]
    pub pre_pass: bool,

    #[command(flatten)]
    pub rewrite: RewriteArgs,

    #[command(flatten)]
    pub percents: PercentArgs,

    #[command(flatten)]
    pub resources: ResourceArgs,
}

/// How each paragraph of a document is rewritten
#[derive(Args, Debug, Clone)]
pub struct RewriterArgs {
    /// Local policy: basic, contextual, structure or combined
    #[arg(short, long, value_name = "POLICY", conflicts_with = "ai")]
    pub policy: Option<Policy>,

    /// Rewrite paragraphs through the model server instead
    #[arg(long)]
    pub ai: bool,

    #[command(flatten)]
    pub percents: PercentArgs,

    #[command(flatten)]
    pub resources: ResourceArgs,

    #[command(flatten)]
    pub rewrite: RewriteArgs,
}

/// Arguments for rewriting one document
#[derive(Parser, Debug, Clone)]
pub struct DocumentArgs {
    /// Document to rewrite (.json, .txt or .md)
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    #[command(flatten)]
    pub rewriter: RewriterArgs,
}

/// Arguments for rewriting a directory of documents
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// Directory to process
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Glob pattern relative to DIR (`*`, `?`, `[...]`, `**`)
    #[arg(long, default_value = "*.txt")]
    pub pattern: String,

    #[command(flatten)]
    pub rewriter: RewriterArgs,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
