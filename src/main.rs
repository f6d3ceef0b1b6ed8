use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use tracing::Level;

use symhuff::config::DEFAULT_BUFFER_SIZE;
use symhuff::io_utils::{extension_error, simple_cli_error, symhuff_cli_error};
use symhuff::{
    compare_files, compress_file, compressed_path, decompress_file, decompressed_path,
    reconstructed_path, Config, FileComparison, Phase, PhaseHook, PhaseTimings,
};

/// Compress files by Huffman coding fixed-width byte symbols.
#[derive(Parser)]
#[command(name = "symhuff", version)]
struct Cli {
    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true, default_value = "warn")]
    log_level: Level,
    /// I/O buffer size in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress INPUT using symbols of WIDTH bytes
    #[command(alias = "c")]
    Compress {
        input: PathBuf,
        width: usize,
        /// Container path (defaults to INPUT.hc)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Decompress the new container and compare SHA-256 digests
        #[arg(long)]
        verify: bool,
        /// Print a JSON report on stdout
        #[arg(long)]
        json: bool,
        /// Show a spinner with the current phase
        #[arg(long)]
        progress: bool,
        /// Print per-phase timings
        #[arg(long)]
        timings: bool,
    },
    /// Decompress a .hc container
    #[command(alias = "d")]
    Decompress {
        input: PathBuf,
        /// Output path (defaults to NAME_uncompressed.EXT)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        progress: bool,
        #[arg(long)]
        timings: bool,
    },
    /// Compare two files by SHA-256 digest
    Verify {
        left: PathBuf,
        right: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

/// Collects timings and drives the optional spinner.
struct CliHook {
    timings: PhaseTimings,
    spinner: Option<ProgressBar>,
}

impl CliHook {
    fn new(progress: bool) -> Self {
        let spinner = progress.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });
        Self {
            timings: PhaseTimings::new(),
            spinner,
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
    }
}

impl PhaseHook for CliHook {
    fn phase_started(&mut self, phase: Phase) {
        if let Some(bar) = &self.spinner {
            bar.set_message(phase.label());
        }
    }

    fn phase_finished(&mut self, phase: Phase, elapsed: Duration) {
        self.timings.phase_finished(phase, elapsed);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn init_logging(level: Level) {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    // A subscriber may already be installed when embedded; logging is best effort.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let buffer_size = cli.buffer_size;
    match cli.command {
        Command::Compress {
            input,
            width,
            output,
            verify,
            json,
            progress,
            timings,
        } => {
            let output = output.unwrap_or_else(|| compressed_path(&input));
            let config = Config {
                symbol_width: width,
                buffer_size,
            };
            let start = Instant::now();
            let mut hook = CliHook::new(progress);
            let result = compress_file(&input, &output, &config, &mut hook);
            hook.finish();
            let report = result.map_err(|e| symhuff_cli_error("compression failed", e))?;

            let comparison = if verify {
                Some(verify_round_trip(&input, &output, &config)?)
            } else {
                None
            };
            let elapsed = start.elapsed();

            if json {
                let out_json = serde_json::json!({
                    "output": output,
                    "report": report,
                    "ratio": report.ratio(),
                    "elapsed_ms": elapsed.as_millis(),
                    "verification": comparison,
                });
                println!("{}", serde_json::to_string_pretty(&out_json)?);
            } else {
                eprintln!(
                    "Compressed {} -> {} bytes ({:.2}% of original, saved {:.2}%) in {:.2?}",
                    report.input_bytes,
                    report.output_bytes,
                    report.ratio() * 100.0,
                    report.savings_percent(),
                    elapsed
                );
                eprintln!("Wrote {}", output.display());
                if let Some(cmp) = &comparison {
                    print_comparison(cmp);
                }
            }
            if timings {
                hook.timings.report();
            }
            if comparison.is_some_and(|cmp| !cmp.matches) {
                return Err(simple_cli_error("verification failed: reconstructed file differs").into());
            }
        }

        Command::Decompress {
            input,
            output,
            json,
            progress,
            timings,
        } => {
            let output = match output {
                Some(path) => path,
                None => decompressed_path(&input).map_err(|_| extension_error(&input))?,
            };
            let config = Config {
                buffer_size,
                ..Config::default()
            };
            let start = Instant::now();
            let mut hook = CliHook::new(progress);
            let result = decompress_file(&input, &output, &config, &mut hook);
            hook.finish();
            let report = result.map_err(|e| symhuff_cli_error("decompression failed", e))?;
            let elapsed = start.elapsed();

            if json {
                let out_json = serde_json::json!({
                    "output": output,
                    "report": report,
                    "elapsed_ms": elapsed.as_millis(),
                });
                println!("{}", serde_json::to_string_pretty(&out_json)?);
            } else {
                eprintln!(
                    "Decompressed {} -> {} bytes in {:.2?}",
                    report.input_bytes, report.output_bytes, elapsed
                );
                eprintln!("Wrote {}", output.display());
            }
            if timings {
                hook.timings.report();
            }
        }

        Command::Verify { left, right, json } => {
            let cmp = compare_files(&left, &right)
                .map_err(|e| symhuff_cli_error("hashing failed", e))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cmp)?);
            } else {
                print_comparison(&cmp);
            }
            if !cmp.matches {
                return Err(simple_cli_error("files differ").into());
            }
        }
    }
    Ok(())
}

/// Decompress `container` next to itself and hash it against `original`.
fn verify_round_trip(
    original: &Path,
    container: &Path,
    config: &Config,
) -> Result<FileComparison, Box<dyn std::error::Error>> {
    let restored = reconstructed_path(container);
    if let (Ok(a), Ok(b)) = (original.canonicalize(), restored.canonicalize()) {
        if a == b {
            return Err(simple_cli_error(
                "verification would overwrite the input; choose another --output",
            )
            .into());
        }
    }
    decompress_file(container, &restored, config, &mut symhuff::NoopHook)
        .map_err(|e| symhuff_cli_error("verification decompress failed", e))?;
    let cmp = compare_files(original, &restored)
        .map_err(|e| symhuff_cli_error("hashing failed", e))?;
    Ok(cmp)
}

fn print_comparison(cmp: &FileComparison) {
    eprintln!("SHA-256 left:  {}", cmp.left);
    eprintln!("SHA-256 right: {}", cmp.right);
    eprintln!("{}", if cmp.matches { "match" } else { "MISMATCH" });
}
