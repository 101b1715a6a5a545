//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, RephraseArgs};
use crate::document::batch::DirectoryReport;
use crate::document::processor::DocumentReport;
use crate::error::Result;

/// Result of a text transformation.
#[derive(Debug, Serialize)]
pub struct TransformResult {
    pub policy: String,
    pub input: String,
    pub output: String,
    pub seed: Option<u64>,
}

/// Result of a humanizing rewrite.
#[derive(Debug, Serialize)]
pub struct HumanizeResult {
    pub model: String,
    pub output: String,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput: Serialize {
    /// Print the result for a person reading the terminal.
    fn print_human(&self, args: &RephraseArgs) -> Result<()> {
        output_generic_human(&serde_json::to_value(self)?, args)
    }
}

impl HumanOutput for TransformResult {
    fn print_human(&self, _args: &RephraseArgs) -> Result<()> {
        println!("{}", self.output);
        Ok(())
    }
}

impl HumanOutput for HumanizeResult {
    fn print_human(&self, _args: &RephraseArgs) -> Result<()> {
        println!("{}", self.output);
        Ok(())
    }
}

impl HumanOutput for DocumentReport {
    fn print_human(&self, args: &RephraseArgs) -> Result<()> {
        println!("Output: {}", self.output.display());
        println!(
            "Paragraphs: {} ({} rewritten, {} empty, {} failed)",
            self.paragraphs,
            self.rewritten,
            self.skipped,
            self.failures.len()
        );
        if args.verbosity() > 1 {
            for failure in &self.failures {
                println!("  paragraph {}: {}", failure.index + 1, failure.error);
            }
        }
        Ok(())
    }
}

impl HumanOutput for DirectoryReport {
    fn print_human(&self, args: &RephraseArgs) -> Result<()> {
        println!(
            "Documents: {} succeeded, {} failed, {} total",
            self.processed(),
            self.failures.len(),
            self.total
        );
        for document in &self.documents {
            println!(
                "  {} → {} ({} failed paragraph(s))",
                document.input.display(),
                document.output.display(),
                document.failures.len()
            );
        }
        for failure in &self.failures {
            println!("  {}: {}", failure.path.display(), failure.error);
        }
        if args.verbosity() > 1 {
            for document in self.documents.iter().filter(|d| !d.failures.is_empty()) {
                for failure in &document.failures {
                    println!(
                        "  {} paragraph {}: {}",
                        document.input.display(),
                        failure.index + 1,
                        failure.error
                    );
                }
            }
        }
        Ok(())
    }
}

/// Output a result in the specified format.
pub fn output_result<T: HumanOutput>(message: &str, result: &T, args: &RephraseArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &RephraseArgs) -> Result<()> {
    if args.verbosity() > 1 {
        eprintln!("{message}");
    }
    result.print_human(args)
}

fn output_generic_human(value: &serde_json::Value, _args: &RephraseArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                println!("{key}: {}", format_value(val));
            }
        }
        _ => println!("{}", format_value(value)),
    }
    Ok(())
}

fn output_json<T: Serialize>(result: &T, args: &RephraseArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}
