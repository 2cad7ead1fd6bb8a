//! # Classify Subcommand
//!
//! Classifies one submission and prints the result as JSON on stdout.
//!
//! Exit codes: 0 on success, 1 when the answers are missing or unusable,
//! 2 when the rule file fails to load. Every failure still prints a JSON
//! `{"error": ...}` object, so callers only ever parse stdout as JSON.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::{json, Map, Value};

use prisk_engine::{classify_traced, ClassificationResult, EvaluationTrace};

/// Arguments for the `prisk classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Rule repository file (JSON, or YAML by extension).
    #[arg(long, default_value = crate::DEFAULT_RULES_PATH)]
    pub rules: PathBuf,

    /// Answers as an inline JSON object, or a path to a JSON file.
    #[arg(long)]
    pub answers: Option<String>,

    /// Include the evaluation trace in the output.
    #[arg(long)]
    pub explain: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Serialize)]
struct Explained<'a> {
    result: &'a ClassificationResult,
    trace: &'a EvaluationTrace,
}

/// Execute the classify subcommand, writing JSON to `out`.
pub fn run_classify(args: &ClassifyArgs, out: &mut impl Write) -> Result<u8> {
    let answers = match args.answers.as_deref().map(read_answers) {
        None => return print_error(out, "no answers supplied (use --answers)", 1),
        Some(Err(e)) => return print_error(out, &format!("{e:#}"), 1),
        Some(Ok(answers)) => answers,
    };

    let loaded = match prisk_rules::load_path(&args.rules) {
        Ok(loaded) => loaded,
        Err(e) => return print_error(out, &e.to_string(), 2),
    };
    tracing::info!(
        rules = %args.rules.display(),
        digest = %loaded.digest,
        "rule repository loaded"
    );

    let (result, trace) = classify_traced(&loaded.rules, &answers);
    let value = if args.explain {
        serde_json::to_value(Explained {
            result: &result,
            trace: &trace,
        })?
    } else {
        serde_json::to_value(&result)?
    };
    write_json(out, &value, args.pretty)?;
    Ok(0)
}

/// Parse `--answers`: inline JSON when it looks like an object, otherwise
/// a file path.
pub fn read_answers(raw: &str) -> Result<Map<String, Value>> {
    let text = if raw.trim_start().starts_with('{') {
        raw.to_string()
    } else {
        let path = Path::new(raw);
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answers file {}", path.display()))?
    };
    let value: Value = serde_json::from_str(&text).context("answers are not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("answers must be a JSON object, got {}", kind(&other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn print_error(out: &mut impl Write, message: &str, code: u8) -> Result<u8> {
    tracing::error!("{message}");
    write_json(out, &json!({ "error": message }), false)?;
    Ok(code)
}

fn write_json(out: &mut impl Write, value: &Value, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
