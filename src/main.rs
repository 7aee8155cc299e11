//! imosum - prints imohash digests of files, in the style of md5sum.

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use imohash::manifest::{self, CheckSummary};
use imohash::{DEFAULT_SAMPLE_SIZE, DEFAULT_SAMPLE_THRESHOLD, ImoHasher, SampleConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Prints the imohash of files; directories are processed recursively.
#[derive(Parser, Debug)]
#[command(name = "imosum", version, about)]
struct Args {
    /// Read digests from the FILEs and check them
    #[arg(short = 'c', long = "check")]
    check: bool,

    /// Size of each sample window in bytes (0 hashes whole files)
    #[arg(long, env = "IMOSUM_SAMPLE_SIZE", default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,

    /// Files shorter than this many bytes are hashed in full
    #[arg(long, env = "IMOSUM_SAMPLE_THRESHOLD", default_value_t = DEFAULT_SAMPLE_THRESHOLD)]
    sample_threshold: usize,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Files or directories
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.paths.is_empty() {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("imosum: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn print_usage() {
    println!("imosum - Prints the imohash from the file system");
    println!("USAGE: imosum [-c] path1 path2...");
    println!("If directories are provided, all files within them will be processed.");
    println!("Pass -c to read hashes from the FILEs and check them.");
}

/// Returns `Ok(false)` when check mode found failures.
fn run(args: &Args) -> Result<bool> {
    let config = SampleConfig::new(args.sample_size, args.sample_threshold);
    debug!(?config, check = args.check, "starting");

    let hasher = ImoHasher::new(config);
    let mut out = io::stdout().lock();
    let mut summary = CheckSummary::default();

    for path in &args.paths {
        for_each_file(path, |file| {
            if args.check {
                summary.merge(check_manifest(&hasher, file, &mut out)?);
            } else {
                let digest = hasher.sum_file(file)?;
                writeln!(out, "{}", manifest::format_line(&digest, file))?;
            }
            Ok(())
        })?;
    }

    Ok(summary.is_success())
}

/// Calls `f` on `path`, or on every non-directory under it, in file-name order.
fn for_each_file<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(&Path) -> Result<()>,
{
    let metadata =
        fs::metadata(path).with_context(|| format!("cannot stat '{}'", path.display()))?;
    if !metadata.is_dir() {
        return f(path);
    }

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("cannot walk '{}'", path.display()))?;
        if !entry.file_type().is_dir() {
            f(entry.path())?;
        }
    }
    Ok(())
}

fn check_manifest<W: Write>(hasher: &ImoHasher, path: &Path, out: &mut W) -> Result<CheckSummary> {
    let file = File::open(path)
        .with_context(|| format!("cannot open manifest '{}'", path.display()))?;

    let mut write_error = None;
    let summary = manifest::check(hasher, BufReader::new(file), |outcome| {
        if write_error.is_some() {
            return;
        }
        if let Err(err) = writeln!(out, "{}: {}", outcome.path.display(), outcome.status.as_str()) {
            write_error = Some(err);
        }
    })
    .with_context(|| format!("cannot read manifest '{}'", path.display()))?;

    if let Some(err) = write_error {
        return Err(err.into());
    }

    for warning in [summary.mismatch_warning(), summary.malformed_warning()]
        .into_iter()
        .flatten()
    {
        eprintln!("imosum: WARNING: {}", warning);
    }

    Ok(summary)
}
