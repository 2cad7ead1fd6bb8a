//! # Check Subcommand
//!
//! Loads a rule repository the way the server does and reports what it
//! contains. Conditions that do not parse are not fatal at load time, so
//! this is the place to catch them before a deploy.
//!
//! The report also lists every answer field the conditions read, which is
//! the questionnaire surface the rule file depends on.
//!
//! Exit codes: 0 when the file loads with every condition valid, 1 when
//! some condition is invalid, 2 when the file does not load.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

/// Arguments for the `prisk check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rule repository file (JSON, or YAML by extension).
    #[arg(long, default_value = crate::DEFAULT_RULES_PATH)]
    pub rules: PathBuf,
}

/// Execute the check subcommand, writing a report to `out`.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let loaded = match prisk_rules::load_path(&args.rules) {
        Ok(loaded) => loaded,
        Err(e) => {
            writeln!(out, "FAIL {}: {e}", args.rules.display())?;
            return Ok(2);
        }
    };
    let rules = &loaded.rules;

    writeln!(out, "rules file:  {}", args.rules.display())?;
    if let Some(label) = &rules.version {
        writeln!(out, "version:     {label}")?;
    }
    writeln!(out, "digest:      {}", loaded.digest)?;
    writeln!(out, "precedence:  {}", rules.precedence.levels().join(" > "))?;
    writeln!(out, "rules:       {}", rules.rules.len())?;
    writeln!(out, "constraints: {}", rules.constraints.len())?;
    let fields: Vec<String> = rules.referenced_fields().into_iter().collect();
    writeln!(out, "fields read: {}", fields.join(", "))?;

    let errors = rules.syntax_errors();
    for (label, error) in &errors {
        writeln!(out, "invalid condition in {label}: {error}")?;
    }
    if errors.is_empty() {
        writeln!(out, "OK")?;
        Ok(0)
    } else {
        writeln!(out, "FAIL {} invalid condition(s)", errors.len())?;
        Ok(1)
    }
}
