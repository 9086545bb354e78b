mod debug_report;

use aocvp::{Options, convert_readers};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT: &str = "aoc_view_points.json";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    helper: PathBuf,
    run_log: PathBuf,
    output: PathBuf,
    options: Options,
    summary: bool,
    color: bool,
}

fn run(config: &CliConfig) -> aocvp::Result<()> {
    let helper = BufReader::new(File::open(&config.helper)?);
    let run_log = BufReader::new(File::open(&config.run_log)?);
    let conversion = convert_readers(helper, run_log, &config.options)?;

    std::fs::write(&config.output, conversion.document.to_json_pretty()?)?;
    tracing::info!(output = %config.output.display(), "view points written");

    if config.summary {
        debug_report::print_summary(&config.output, &conversion, config.color);
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut helper: Option<PathBuf> = None;
    let mut run_log: Option<PathBuf> = None;
    let mut output = PathBuf::from(DEFAULT_OUTPUT);
    let mut options = Options::default();
    let mut summary = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| format!("error: {flag} expects a value"));
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("aocvp {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--summary" => summary = true,
            "-ah" => helper = Some(PathBuf::from(value("-ah")?)),
            "-ao" => run_log = Some(PathBuf::from(value("-ao")?)),
            "-o" => output = PathBuf::from(value("-o")?),
            "-sd" => options.start_date = Some(value("-sd")?),
            "-r" => options.reference_name = value("-r")?,
            "-t" => options.test_name = value("-t")?,
            _ => return Err(format!("error: unknown argument '{arg}'\n\n{}", help_text())),
        }
    }

    let helper = helper.ok_or_else(|| format!("error: missing helper file (-ah)\n\n{}", help_text()))?;
    let run_log = run_log.ok_or_else(|| format!("error: missing run log (-ao)\n\n{}", help_text()))?;

    Ok(CliConfig { helper, run_log, output, options, summary, color })
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "aocvp {version}

Convert AOC helper and run-log output into a view-point JSON document.

Usage:
  aocvp -ah <helper.hlp> -ao <run.out> [OPTIONS]

Options:
  -ah <file>                 AOC helper file (required).
  -ao <file>                 AOC run log (required).
  -o <file>                  Output JSON file. Default: {default_output}
  -sd <date>                 Start date written into the view point context.
  -r <name>                  Reference tracker name. Default: REF
  -t <name>                  Test tracker name. Default: TST
  --summary                  Print a summary of the conversion.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Logging goes to stderr; set RUST_LOG (e.g. RUST_LOG=aocvp=debug) to adjust.

Exit codes:
  0  Success.
  1  Conversion or I/O error.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        default_output = DEFAULT_OUTPUT
    )
}
