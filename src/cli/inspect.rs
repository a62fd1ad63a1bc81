use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use avrfix::{Config, Finding, Rules, Template};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
#[command(about = "Check data rows for missing columns and unconverged values")]
pub struct Command {
    /// The template to inspect (defaults to the configured path)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl Command {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: Config) -> anyhow::Result<ExitCode> {
        let config = super::resolve(config, self.file);
        let rules = Rules::from(&config);

        let template = Template::load(config.path(), &rules)
            .with_context(|| format!("cannot load {}", config.path().display()))?;
        let findings = template.inspect();

        match self.output {
            OutputFormat::Table => output_table(&findings),
            OutputFormat::Json => output_json(&findings)?,
            OutputFormat::Summary => output_summary(&findings),
        }

        if findings.is_empty() {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::from(super::NEEDS_ATTENTION))
        }
    }
}

fn output_table(findings: &[Finding]) {
    if findings.is_empty() {
        println!("{}", "✅ All data rows are well-formed.".success());
        return;
    }

    println!("{:<6} {:<10} Issue", "Line", "Id");
    for finding in findings {
        println!(
            "{:<6} {:<10} {}",
            finding.line,
            finding.id.as_deref().unwrap_or("–"),
            finding.kind
        );
    }
    println!();
    println!(
        "{}",
        format!("⚠️  {} issues found", findings.len()).warning()
    );
}

fn output_json(findings: &[Finding]) -> anyhow::Result<()> {
    use serde_json::json;

    let output = json!({
        "count": findings.len(),
        "findings": findings,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_summary(findings: &[Finding]) {
    let rows: std::collections::BTreeSet<_> = findings.iter().map(|f| f.line).collect();
    println!("issues={} rows={}", findings.len(), rows.len());
}
