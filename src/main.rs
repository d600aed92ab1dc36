//! sgf-editor -- rewrite game-solver SGF records under a board symmetry.
//!
//! Reads an `.sgf` file, applies the requested opcode sequence to every move
//! coordinate, `RZ` board, and `equal_loss` field, optionally migrates the
//! legacy `R:`/`G:`/`B:` RZone lines, and writes the result next to the
//! input (or to `--output`).

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record};

use sgf_editor::symmetry::Transform;
use sgf_editor::{rewrite_transcript, RewriteOptions};

#[derive(Parser)]
#[command(name = "sgf-editor")]
#[command(about = "Apply board symmetries to solver SGF records", long_about = None)]
#[command(after_help = "example: clockwise rotate 90 and then horizontally flip\n\n    \
    > sgf-editor game.sgf -t 31")]
struct Cli {
    /// Input SGF file
    sgf_path: PathBuf,

    /// Output file name (default: <input>_transformed.sgf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Opcode digits applied left to right:
    /// 0 none, 1 horizontal flip, 2 vertical flip,
    /// 3 rotate 90, 4 rotate 180, 5 rotate 270 (clockwise)
    #[arg(short, long, value_parser = parse_transform)]
    transform: Option<Transform>,

    /// Convert RZone from the old R:/G:/B: lines to RZ[..][..][..]
    #[arg(long, alias = "rz")]
    rzone: bool,

    /// Worker threads for node rewriting
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Write rewrite statistics as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn parse_transform(s: &str) -> Result<Transform, sgf_editor::symmetry::SymmetryError> {
    s.parse()
}

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Resolves the output path: `--output` with `.sgf` appended if missing,
/// otherwise `<input stem>_transformed.sgf` beside the input.
fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) if path.extension() == Some(OsStr::new("sgf")) => path.to_path_buf(),
        Some(path) => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".sgf");
            PathBuf::from(name)
        }
        None => {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            input.with_file_name(format!("{}_transformed.sgf", stem))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if cli.sgf_path.extension() != Some(OsStr::new("sgf")) {
        bail!("not a sgf file: {}", cli.sgf_path.display());
    }

    let text = fs::read_to_string(&cli.sgf_path)
        .with_context(|| format!("failed to read {}", cli.sgf_path.display()))?;

    let options = RewriteOptions {
        transform: cli.transform.clone().unwrap_or_default(),
        migrate_legacy: cli.rzone,
        threads: cli.threads,
    };
    let rewritten = rewrite_transcript(&text, &options)
        .with_context(|| format!("failed to rewrite {}", cli.sgf_path.display()))?;

    let out_path = output_path(&cli.sgf_path, cli.output.as_deref());
    fs::write(&out_path, &rewritten.text)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    log::info!("wrote {}", out_path.display());

    if let Some(report) = &cli.report {
        let json = serde_json::to_string_pretty(&rewritten.stats)?;
        fs::write(report, json).with_context(|| format!("failed to write {}", report.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_beside_input() {
        assert_eq!(
            output_path(Path::new("games/g1.sgf"), None),
            PathBuf::from("games/g1_transformed.sgf")
        );
    }

    #[test]
    fn explicit_output_gets_sgf_extension() {
        assert_eq!(
            output_path(Path::new("g1.sgf"), Some(Path::new("out/rot"))),
            PathBuf::from("out/rot.sgf")
        );
        assert_eq!(
            output_path(Path::new("g1.sgf"), Some(Path::new("out/rot.sgf"))),
            PathBuf::from("out/rot.sgf")
        );
    }

    #[test]
    fn cli_parses_transform_digits() {
        let cli = Cli::try_parse_from(["sgf-editor", "g.sgf", "-t", "13", "--rzone"]).unwrap();
        assert_eq!(cli.transform.unwrap().to_string(), "13");
        assert!(cli.rzone);
        assert!(Cli::try_parse_from(["sgf-editor", "g.sgf", "-t", "7"]).is_err());
    }
}
