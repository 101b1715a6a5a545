//! Command implementations for the Rephrase CLI.

use std::io::{self, Write};
use std::sync::Arc;

use futures::StreamExt;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::RephraseConfig;
use crate::document::batch::process_directory;
use crate::document::processor::{DocumentProcessor, LogProgress};
use crate::document::rewriter::{OracleRewriter, TextRewriter};
use crate::error::Result;
use crate::lexicon::selection::ResourceSelection;
use crate::rewrite::ollama::OllamaClient;
use crate::rewrite::{RewriteOracle, RewriteRequest, collect_stream};
use crate::session::Session;
use crate::transform::config::TransformationConfig;
use crate::transform::pipeline::Policy;

/// Execute a CLI command.
pub fn execute_command(args: RephraseArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_command(args))
}

async fn run_command(args: RephraseArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Basic(transform)
        | Command::Contextual(transform)
        | Command::Structure(transform)
        | Command::Combined(transform) => {
            let policy = args.command.policy().unwrap_or_default();
            transform_text(policy, transform, &config, &args).await
        }
        Command::Humanize(humanize) => humanize_text(humanize, &config, &args).await,
        Command::Document(document) => rewrite_document(document, &config, &args).await,
        Command::Batch(batch) => rewrite_directory(batch, &config, &args).await,
    }
}

/// The configuration file, or defaults when none was given.
pub fn load_config(args: &RephraseArgs) -> Result<RephraseConfig> {
    match &args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            RephraseConfig::load_from_file(path)
        }
        None => Ok(RephraseConfig::default()),
    }
}

/// Transformation parameters for `policy` before flag overrides.
///
/// Without a configuration file the basic policy starts from its own,
/// higher synonym share.
pub fn base_transformation(
    policy: Policy,
    config: &RephraseConfig,
    args: &RephraseArgs,
) -> TransformationConfig {
    if policy == Policy::Basic && args.config.is_none() {
        TransformationConfig::basic()
    } else {
        config.transformation
    }
}

/// Build a session and load the custom lists named on the command line.
async fn build_session(args: &RephraseArgs, resources: &ResourceArgs) -> Result<Session> {
    let mut session = match &args.data_dir {
        Some(dir) => Session::open(dir).await?,
        None => Session::bundled()?,
    };

    if let Some(source) = &resources.custom_synonyms {
        if is_url(source) {
            session.store_mut().custom_synonyms_from_url(source).await?;
        } else {
            session.store_mut().custom_synonyms_from_file(source)?;
        }
    }
    if let Some(source) = &resources.custom_adjectives {
        if is_url(source) {
            session.store_mut().custom_adjectives_from_url(source).await?;
        } else {
            session.store_mut().custom_adjectives_from_file(source)?;
        }
    }
    Ok(session)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn rng_for(args: &RephraseArgs) -> StdRng {
    match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

async fn transform_text(
    policy: Policy,
    transform: &TransformArgs,
    config: &RephraseConfig,
    args: &RephraseArgs,
) -> Result<()> {
    let text = transform.input.read_text()?;
    let transformation = transform
        .percents
        .apply(base_transformation(policy, config, args));
    let selection = transform.resources.apply(config.resources);
    let session = build_session(args, &transform.resources).await?;

    let mut rng = rng_for(args);
    let output = session.transform_with_rng(policy, &text, &transformation, &selection, &mut rng)?;

    output_result(
        &format!("Transformed with the {policy} policy"),
        &TransformResult {
            policy: policy.to_string(),
            input: text,
            output,
            seed: args.seed,
        },
        args,
    )
}

async fn humanize_text(
    humanize: &HumanizeArgs,
    config: &RephraseConfig,
    args: &RephraseArgs,
) -> Result<()> {
    let text = humanize.input.read_text()?;
    let rewrite = humanize.rewrite.apply(config.rewrite.clone());
    let client = OllamaClient::new(&rewrite)?;

    let prepared = if humanize.pre_pass {
        let transformation = humanize
            .percents
            .apply(base_transformation(Policy::Basic, config, args));
        let selection = humanize.resources.apply(config.resources);
        let session = build_session(args, &humanize.resources).await?;
        session.basic_with_rng(&text, &transformation, &selection, &mut rng_for(args))?
    } else {
        text
    };

    info!("Sending {} bytes to {} ({})", prepared.len(), client.base_url(), rewrite.model);
    let request = RewriteRequest::humanize(&prepared, &rewrite);

    if humanize.stream && args.output_format == OutputFormat::Human {
        // Chunks go straight to the terminal as they arrive.
        let mut chunks = client.rewrite_stream(&request).await?;
        let mut stdout = io::stdout().lock();
        while let Some(chunk) = chunks.next().await {
            stdout.write_all(chunk?.as_bytes())?;
            stdout.flush()?;
        }
        writeln!(stdout)?;
        return Ok(());
    }

    let output = if humanize.stream {
        collect_stream(client.rewrite_stream(&request).await?).await?
    } else {
        client.rewrite(&request).await?
    };

    output_result(
        "Humanized text",
        &HumanizeResult {
            model: rewrite.model,
            output,
        },
        args,
    )
}

/// The paragraph rewriter chosen by `--policy` / `--ai`.
async fn build_rewriter(
    rewriter: &RewriterArgs,
    config: &RephraseConfig,
    args: &RephraseArgs,
) -> Result<Arc<dyn TextRewriter>> {
    if rewriter.ai {
        let rewrite = rewriter.rewrite.apply(config.rewrite.clone());
        let client = OllamaClient::new(&rewrite)?;
        return Ok(Arc::new(OracleRewriter::new(Arc::new(client), rewrite)));
    }

    let policy = rewriter.policy.unwrap_or(config.policy);
    let transformation = rewriter
        .percents
        .apply(base_transformation(policy, config, args));
    let selection: ResourceSelection = rewriter.resources.apply(config.resources);
    let session = build_session(args, &rewriter.resources).await?;

    let pipeline = session.pipeline_rewriter(policy, transformation, &selection)?;
    let pipeline = match args.seed {
        Some(seed) => pipeline.with_seed(seed),
        None => pipeline,
    };
    Ok(Arc::new(pipeline))
}

async fn rewrite_document(
    document: &DocumentArgs,
    config: &RephraseConfig,
    args: &RephraseArgs,
) -> Result<()> {
    let rewriter = build_rewriter(&document.rewriter, config, args).await?;
    let processor = DocumentProcessor::new(rewriter);
    let report = processor.process(&document.path, &LogProgress).await?;

    output_result("Document rewritten", &report, args)
}

async fn rewrite_directory(
    batch: &BatchArgs,
    config: &RephraseConfig,
    args: &RephraseArgs,
) -> Result<()> {
    let rewriter = build_rewriter(&batch.rewriter, config, args).await?;
    let processor = DocumentProcessor::new(rewriter);
    let report = process_directory(&processor, &batch.dir, &batch.pattern, &LogProgress).await?;

    output_result("Directory processed", &report, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> RephraseArgs {
        RephraseArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_base_transformation() {
        let args = parse(&["rephrase", "basic", "x"]);
        let config = RephraseConfig::default();
        assert_eq!(
            base_transformation(Policy::Basic, &config, &args),
            TransformationConfig::basic()
        );
        assert_eq!(
            base_transformation(Policy::Combined, &config, &args),
            TransformationConfig::default()
        );
    }

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rephrase.json");
        fs::write(&path, r#"{"policy": "structure", "transformation": {"percent_reorder": 0}}"#)
            .unwrap();

        let args = parse(&["rephrase", "--config", path.to_str().unwrap(), "basic", "x"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.policy, Policy::Structure);
        assert_eq!(base_transformation(Policy::Basic, &config, &args).percent_reorder, 0);
    }

    #[test]
    fn test_input_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "From a file.").unwrap();

        let args = parse(&["rephrase", "structure", "--input", path.to_str().unwrap()]);
        if let Command::Structure(transform) = &args.command {
            assert_eq!(transform.input.read_text().unwrap(), "From a file.");
        } else {
            panic!("Expected Structure command");
        }
    }

    #[test]
    fn test_document_command_writes_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "The ball was thrown by John.\n\nShort.\n").unwrap();

        let args = parse(&[
            "rephrase",
            "--seed",
            "5",
            "--format",
            "json",
            "document",
            path.to_str().unwrap(),
            "--policy",
            "basic",
            "--percent-synonyms",
            "0",
            "--percent-adjectives",
            "0",
        ]);
        execute_command(args).unwrap();

        let written = fs::read_to_string(dir.path().join("notes_edited.txt")).unwrap();
        assert_eq!(written, "The ball was thrown by John.\n\nShort.\n");
    }

    #[test]
    fn test_missing_custom_list_fails() {
        let args = parse(&[
            "rephrase",
            "basic",
            "Some text here.",
            "--custom-synonyms",
            "/nonexistent/synonyms.json",
        ]);
        assert!(execute_command(args).is_err());
    }
}
