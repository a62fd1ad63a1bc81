use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use avrfix::{Config, Report, Rules, Template};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, clap::Parser)]
#[command(about = "Report what a fix would change without writing")]
pub struct Command {
    /// The template to check (defaults to the configured path)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: Config) -> anyhow::Result<ExitCode> {
        let config = super::resolve(config, self.file);
        let rules = Rules::from(&config);

        let mut template = Template::load(config.path(), &rules)
            .with_context(|| format!("cannot load {}", config.path().display()))?;
        let report = template.fix(&rules);

        match self.output {
            OutputFormat::Json => println!("{}", to_json(&report)?),
            OutputFormat::Table if self.quiet => output_quiet(&report),
            OutputFormat::Table => output_table(&report),
        }

        if report.is_clean() {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::from(super::NEEDS_ATTENTION))
        }
    }
}

fn to_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn output_quiet(report: &Report) {
    println!(
        "lines={} data={} moved={} filled={} changed={}",
        report.lines,
        report.data_rows,
        report.rows_moved,
        report.placeholders_filled,
        report.changed_lines.len()
    );
}

fn output_table(report: &Report) {
    const MAX_LINE_DISPLAY: usize = 20;

    println!("Line counts");
    println!("{}", "───────────".dim());

    let rows = [
        ("Comment", report.comments),
        ("Header", report.headers),
        ("Data", report.data_rows),
        ("Other", report.other),
    ];
    if is_narrow() {
        for (kind, count) in rows {
            println!("{kind}: {count}");
        }
        println!("Total: {}", report.lines);
    } else {
        println!("{:<10} Count", "Kind");
        for (kind, count) in rows {
            println!("{kind:<10} {count}");
        }
        println!("Total      {}", report.lines);
    }

    println!();

    if report.unextracted > 0 {
        println!(
            "{}",
            format!(
                "⚠️  {} data rows have no quoted description or required value",
                report.unextracted
            )
            .warning()
        );
    }

    if report.is_clean() {
        println!("Pending changes: {} ✅", "0".success());
        return;
    }

    println!(
        "Pending changes: {} ⚠️",
        report.changed_lines.len().to_string().warning()
    );
    println!("  • {} descriptions to move", report.rows_moved);
    println!("  • {} placeholders to fill", report.placeholders_filled);
    for line in report.changed_lines.iter().take(MAX_LINE_DISPLAY) {
        println!("  - line {line}");
    }
    if report.changed_lines.len() > MAX_LINE_DISPLAY {
        println!(
            "  - ... and {} more lines",
            report.changed_lines.len() - MAX_LINE_DISPLAY
        );
    }
    println!("{}", "Run 'avr-fix' to apply.".dim());
}

#[cfg(test)]
mod tests {
    use std::{fs, process::ExitCode};

    use tempfile::tempdir;

    use super::{Command, OutputFormat, to_json};
    use avrfix::{Config, Document, Rules};

    /// `ExitCode` has no `PartialEq`, so codes are compared by their debug form.
    fn code(code: ExitCode) -> String {
        format!("{code:?}")
    }

    const PENDING: &str = r#"{ id: "1-1", description: "a", unit: "-", required: "No", proposedGuaranteed: "x", remarks: "" }"#;
    const CONVERGED: &str = r#"{ id: "1-1", description: "", unit: "-", required: "a", proposedGuaranteed: "x", remarks: "" }"#;

    fn check_with(content: &str, output: OutputFormat, quiet: bool) -> ExitCode {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("avr.cjs");
        fs::write(&path, content).unwrap();

        let command = Command {
            file: Some(path.clone()),
            output,
            quiet,
        };
        let result = command.run(Config::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        result
    }

    fn check(content: &str) -> ExitCode {
        check_with(content, OutputFormat::Table, true)
    }

    #[test]
    fn pending_changes_need_attention() {
        assert_eq!(code(check(PENDING)), code(ExitCode::from(2)));
    }

    #[test]
    fn converged_template_passes() {
        assert_eq!(code(check(CONVERGED)), code(ExitCode::SUCCESS));
    }

    #[test]
    fn table_output_reports_the_same_exit_code() {
        let pending = check_with(PENDING, OutputFormat::Table, false);
        assert_eq!(code(pending), code(ExitCode::from(2)));

        let converged = check_with(CONVERGED, OutputFormat::Table, false);
        assert_eq!(code(converged), code(ExitCode::SUCCESS));
    }

    #[test]
    fn json_output_describes_pending_changes() {
        let result = check_with(PENDING, OutputFormat::Json, false);
        assert_eq!(code(result), code(ExitCode::from(2)));

        let rules = Rules::default();
        let (_, report) = Document::parse(PENDING, &rules).rewrite(&rules);
        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert_eq!(json["lines"], 1);
        assert_eq!(json["data_rows"], 1);
        assert_eq!(json["rows_moved"], 1);
        assert_eq!(json["placeholders_filled"], 0);
        assert_eq!(json["changed_lines"], serde_json::json!([1]));
    }
}
