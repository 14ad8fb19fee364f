//! simapro-import CLI - Convert raw LCI CSV data into a SimaPro import CSV
//!
//! ```bash
//! simapro-import --source raw_lci.csv --modules A1,A2,A3 --destination import.csv
//! simapro-import -s raw_lci.csv -d import.csv            # keep every module
//! simapro-import -s raw_lci.csv -d import.csv --dry-run  # count only, write nothing
//! ```
//!
//! Arguments may also come from the environment (or a `.env` file):
//! `SIMAPRO_IMPORT_SOURCE`, `SIMAPRO_IMPORT_MODULES`, `SIMAPRO_IMPORT_DESTINATION`.

use clap::Parser;
use simapro_import::error::ImportResult;
use simapro_import::{logging, run_import, ImportOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simapro-import")]
#[command(about = "Convert raw LCI CSV to SimaPro import format", long_about = None)]
struct Cli {
    /// Path to the raw LCI CSV file
    #[arg(short, long, env = "SIMAPRO_IMPORT_SOURCE")]
    source: PathBuf,

    /// Comma-separated lifecycle modules to include (e.g. A1,A2).
    /// If omitted, all modules from the input are included.
    #[arg(short, long, env = "SIMAPRO_IMPORT_MODULES")]
    modules: Option<String>,

    /// Path to write the SimaPro import CSV
    #[arg(short, long, env = "SIMAPRO_IMPORT_DESTINATION")]
    destination: PathBuf,

    /// Convert and report, but do not write the destination
    #[arg(long)]
    dry_run: bool,

    /// Log progress to stderr (overrides RUST_LOG with `info`)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_options(self) -> ImportOptions {
        ImportOptions {
            source: self.source,
            destination: self.destination,
            modules: self.modules,
            dry_run: self.dry_run,
        }
    }
}

/// Run the conversion and produce the stdout line.
fn run(options: &ImportOptions) -> ImportResult<String> {
    let summary = run_import(options)?;
    let verb = if options.dry_run { "Would export" } else { "Exported" };

    Ok(format!(
        "{} {} rows to {}",
        verb,
        summary.rows_exported,
        options.destination.display()
    ))
}

/// Exit status and message for a finished run.
///
/// Status 0 prints to stdout; 1 prints the bare error text to stderr.
fn outcome(result: ImportResult<String>) -> (i32, String) {
    match result {
        Ok(line) => (0, line),
        Err(e) => (1, e.to_string()),
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let options = cli.into_options();

    match outcome(run(&options)) {
        (0, line) => println!("{}", line),
        (code, message) => {
            eprintln!("{}", message);
            std::process::exit(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "simapro-import",
            "-s",
            "raw.csv",
            "-m",
            "A1,A2",
            "-d",
            "out.csv",
        ])
        .unwrap();

        let options = cli.into_options();
        assert_eq!(options.source, PathBuf::from("raw.csv"));
        assert_eq!(options.destination, PathBuf::from("out.csv"));
        assert_eq!(options.modules.as_deref(), Some("A1,A2"));
        assert!(!options.dry_run);
    }

    #[test]
    fn test_long_flags_and_dry_run() {
        let cli = Cli::try_parse_from([
            "simapro-import",
            "--source",
            "raw.csv",
            "--destination",
            "out.csv",
            "--dry-run",
        ])
        .unwrap();

        let options = cli.into_options();
        assert!(options.dry_run);
        assert_eq!(options.modules, None);
    }

    const STEEL: &str = "Amount,Unit,Activity,Category,Stages\n1.5,kg,Steel,Material,\"A1, A2\"\n";

    fn options_in(dir: &std::path::Path, source: &str, args: &[&str]) -> ImportOptions {
        let src = dir.join("raw_lci.csv");
        std::fs::write(&src, source).unwrap();
        let dest = dir.join("import.csv");

        let mut argv = vec![
            "simapro-import".to_string(),
            "-s".to_string(),
            src.display().to_string(),
            "-d".to_string(),
            dest.display().to_string(),
        ];
        argv.extend(args.iter().map(|a| a.to_string()));

        Cli::try_parse_from(argv).unwrap().into_options()
    }

    #[test]
    fn test_success_line() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), STEEL, &[]);

        let (code, line) = outcome(run(&options));

        assert_eq!(code, 0);
        assert_eq!(
            line,
            format!("Exported 2 rows to {}", dir.path().join("import.csv").display())
        );
        assert!(options.destination.exists());
    }

    #[test]
    fn test_dry_run_line() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), STEEL, &["-m", "A2", "--dry-run"]);

        let (code, line) = outcome(run(&options));

        assert_eq!(code, 0);
        assert!(line.starts_with("Would export 1 rows to "));
        assert!(!options.destination.exists());
    }

    #[test]
    fn test_missing_columns_exit_one() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), "Amount,Unit,Activity\n1,kg,Steel\n", &[]);

        let (code, message) = outcome(run(&options));

        assert_eq!(code, 1);
        assert_eq!(message, "Missing required column(s): Category, Stages");
    }

    #[test]
    fn test_no_match_exit_one() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), STEEL, &["--modules", "B1"]);

        let (code, message) = outcome(run(&options));

        assert_eq!(code, 1);
        assert_eq!(message, "No records matched the module filter");
        assert!(!options.destination.exists());
    }

    #[test]
    fn test_malformed_source_exit_one() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(
            dir.path(),
            "Amount,Unit,Activity,Category,Stages\n1,kg,\"Steel,Material,A1\n",
            &[],
        );

        let (code, message) = outcome(run(&options));

        assert_eq!(code, 1);
        assert!(message.starts_with("Error reading source file"));
        assert!(!options.destination.exists());
    }
}
