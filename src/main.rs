use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use stub_image::config;
use stub_image::output;
use stub_image::pipeline::{self, PipelineError, StubEvent, StubOptions, StubReport};
use stub_image::scan::ReadMode;

/// Shared flags for commands that write stubs.
#[derive(Args, Clone)]
struct StubArgs {
    /// Stop starting new items after the first failure
    #[arg(long)]
    fail_fast: bool,

    /// Hand files to the renderer as streams instead of buffers
    #[arg(long)]
    stream: bool,
}

#[derive(Parser)]
#[command(name = "stub-image")]
#[command(about = "Replace JPEG and PNG images with same-size placeholder stubs")]
#[command(long_about = "\
Replace JPEG and PNG images with same-size placeholder stubs

Every image under the source directory is rewritten into the output
directory at the same relative path. The stub keeps the original format and
pixel dimensions, is filled with light gray (#e5e5e5), and carries its own
size (\"640x480\") centered in dark gray.

  images/                        result/
  ├── 001-dawn.jpg   (1600x900)  ├── 001-dawn.jpg   gray, \"1600x900\"
  ├── logo.png       (24x24)     ├── logo.png       gray, no label (too small)
  └── anim.gif                   └── (fails: File type not supported)

Run 'stub-image gen-config' to generate a documented stub-image.toml.")]
#[command(version)]
struct Cli {
    /// Source image directory
    #[arg(long, default_value = "images", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "result", global = true)]
    output: PathBuf,

    /// Config file (defaults are used when it does not exist)
    #[arg(long, default_value = "stub-image.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Remove the output directory
    Clean,
    /// Write stubs for every source image into the output directory
    Stub(StubArgs),
    /// Run clean then stub (the default)
    Build(StubArgs),
    /// Print a stock stub-image.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Command::Build(StubArgs {
        fail_fast: false,
        stream: false,
    }));

    match command {
        Command::Clean => {
            let removed = pipeline::clean(&cli.output)?;
            println!("{}", output::format_clean(&cli.output, removed));
        }
        Command::Stub(args) => {
            let options = stub_options(&cli.config, &args)?;
            init_thread_pool(&options.config.processing);
            println!(
                "==> Stubbing {} → {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = run_with_printer(|tx| {
                pipeline::stub(&cli.source, &cli.output, &options, Some(tx))
            })?;
            finish(&report)?;
        }
        Command::Build(args) => {
            let options = stub_options(&cli.config, &args)?;
            init_thread_pool(&options.config.processing);
            println!("==> Cleaning {}", cli.output.display());
            println!(
                "==> Stubbing {} → {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = run_with_printer(|tx| {
                pipeline::build(&cli.source, &cli.output, &options, Some(tx))
            })?;
            finish(&report)?;
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and fold the command-line flags into it.
fn stub_options(config_path: &Path, args: &StubArgs) -> Result<StubOptions, config::ConfigError> {
    let mut config = config::load_config(config_path)?;
    if args.fail_fast {
        config.processing.fail_fast = true;
    }
    Ok(StubOptions {
        config,
        read_mode: if args.stream {
            ReadMode::Stream
        } else {
            ReadMode::Buffer
        },
    })
}

/// Run a task while a printer thread drains its events to stdout.
fn run_with_printer<F>(task: F) -> Result<StubReport, PipelineError>
where
    F: FnOnce(Sender<StubEvent>) -> Result<StubReport, PipelineError>,
{
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_stub_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = task(tx);
    if printer.join().is_err() {
        log::error!("output thread panicked");
    }
    result
}

/// Print the summary; any failed item makes the run fail.
fn finish(report: &StubReport) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    output::print_report(report);
    if report.is_success() {
        Ok(())
    } else {
        Err(format!("{} item(s) failed", report.failures.len()).into())
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Users can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
