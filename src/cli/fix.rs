use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use avrfix::{Config, Report, Rules, Template};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Default, clap::Parser)]
pub struct Command {
    /// The template to rewrite (defaults to the configured path)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Show what would be changed without making changes
    #[arg(long)]
    dry_run: bool,

    /// Suppress output
    #[arg(long, short)]
    quiet: bool,
}

impl Command {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: Config) -> anyhow::Result<ExitCode> {
        let config = super::resolve(config, self.file);
        let rules = Rules::from(&config);

        let mut template = Template::load(config.path(), &rules)
            .with_context(|| format!("cannot load {}", config.path().display()))?;
        let report = template.fix(&rules);

        if self.dry_run {
            if !self.quiet {
                print_dry_run(&report, rules.placeholder());
            }
            return Ok(ExitCode::SUCCESS);
        }

        if !template.flush()? {
            tracing::info!("{} is already up to date", template.path().display());
        }

        if !self.quiet {
            write_completion(&mut io::stdout().lock(), rules.placeholder())?;
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn write_completion(out: &mut impl Write, placeholder: &str) -> io::Result<()> {
    writeln!(out, "{}", "✅ AVR template data fixed!".success())?;
    writeln!(out, "- Moved text from DESCRIPTION to REQUIRED for data rows")?;
    writeln!(out, "- Set proposedGuaranteed to '{placeholder}'")
}

fn print_dry_run(report: &Report, placeholder: &str) {
    if report.is_clean() {
        println!("{}", "✅ Nothing to change.".success());
        return;
    }

    println!(
        "Would rewrite {} of {} data rows:",
        report.changed_lines.len(),
        report.data_rows
    );
    println!("  • {} descriptions moved to REQUIRED", report.rows_moved);
    println!(
        "  • {} proposedGuaranteed values set to '{placeholder}'",
        report.placeholders_filled
    );
    let lines: Vec<_> = report.changed_lines.iter().map(ToString::to_string).collect();
    println!("{}", format!("Lines: {}", lines.join(", ")).dim());
}

#[cfg(test)]
mod tests {
    use std::{fs, process::ExitCode};

    use tempfile::tempdir;

    use super::{Command, write_completion};
    use avrfix::Config;

    const INPUT: &str = concat!(
        "module.exports = [\n",
        "  // Section 1: GENERAL\n",
        "  { id: \"1-0\", description: \"GENERAL\" },\n",
        "  { id: \"1-1\", description: \"Watchdog\", unit: \"-\", required: \"Yes\", proposedGuaranteed: \"\", remarks: \"\" },\n",
        "];\n",
    );

    const OUTPUT: &str = concat!(
        "module.exports = [\n",
        "  // Section 1: GENERAL\n",
        "  { id: \"1-0\", description: \"GENERAL\" },\n",
        "  { id: \"1-1\", description: \"\", unit: \"-\", required: \"Watchdog\", proposedGuaranteed: \"Harus diisi oleh vendor\", remarks: \"\" },\n",
        "];\n",
    );

    #[test]
    fn fix_rewrites_file_in_place() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("avr-template-data.cjs");
        fs::write(&path, INPUT).unwrap();

        let command = Command {
            file: Some(path.clone()),
            dry_run: false,
            quiet: true,
        };
        command.run(Config::default()).expect("fix should succeed");

        assert_eq!(fs::read_to_string(&path).unwrap(), OUTPUT);
    }

    #[test]
    fn fix_twice_is_stable() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("avr-template-data.cjs");
        fs::write(&path, INPUT).unwrap();

        for _ in 0..2 {
            let command = Command {
                file: Some(path.clone()),
                dry_run: false,
                quiet: true,
            };
            command.run(Config::default()).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), OUTPUT);
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("avr-template-data.cjs");
        fs::write(&path, INPUT).unwrap();

        let command = Command {
            file: Some(path.clone()),
            dry_run: true,
            quiet: true,
        };
        command.run(Config::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), INPUT);
    }

    #[test]
    fn missing_file_fails_without_creating_it() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("avr-template-data.cjs");

        let command = Command {
            file: Some(path.clone()),
            dry_run: false,
            quiet: true,
        };
        let error = command.run(Config::default()).unwrap_err();

        assert!(error.to_string().starts_with("cannot load"));
        assert!(!path.exists());
    }

    #[test]
    fn completion_message_names_the_placeholder() {
        let mut out = Vec::new();
        write_completion(&mut out, "Harus diisi oleh vendor").unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("✅ AVR template data fixed!"));
        assert_eq!(
            lines[1],
            "- Moved text from DESCRIPTION to REQUIRED for data rows"
        );
        assert_eq!(
            lines[2],
            "- Set proposedGuaranteed to 'Harus diisi oleh vendor'"
        );
    }

    #[test]
    fn default_command_fixes_the_configured_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("avr-template-data.cjs");
        fs::write(&path, INPUT).unwrap();

        let mut config = Config::default();
        config.set_path(path.clone());
        let result = Command::default().run(config).unwrap();

        assert_eq!(format!("{result:?}"), format!("{:?}", ExitCode::SUCCESS));
        assert_eq!(fs::read_to_string(&path).unwrap(), OUTPUT);
    }
}
