/// WBXML command-line tool: inspect, validate, decode, and trace `.wbxml`
/// messages.
///
/// # Command overview
///
/// ```text
/// wbxml <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print the document header and the decoded message tree
///   validate   Check that a file decodes to exactly one message
///   decode     Print the decoded message as a tree or JSON
///   events     Dump the parse events the token source emits
///   help       Print help information
///
/// Global options:
///   --vocab <FILE>       JSON code page tables for the dialect
///   --strict             Reject tokens missing from the vocabulary
///   --separator <C>      Split property text into values on this character
///   -v, --verbose        Log decoder activity to stderr
///   -h, --help           Print help
///   -V, --version        Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                  |
/// |------|------------------------------------------|
/// | 0    | Success                                  |
/// | 1    | Error (I/O failure, invalid message, ...) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
/// `RUST_LOG` overrides the log filter chosen by `--verbose`.
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use wbxml_decoder::DecoderConfig;

mod cmd_decode;
mod cmd_events;
mod cmd_inspect;
mod cmd_validate;
mod vocab;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Decode WBXML messages into their record / property tree.
#[derive(Parser)]
#[command(name = "wbxml", version, about = "WBXML message decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    decoder: DecoderArgs,

    /// Log decoder activity (headers, element decisions) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Flags shared by every command that decodes a file.
#[derive(clap::Args)]
pub struct DecoderArgs {
    /// JSON file with the dialect's tag and attribute code pages.
    ///
    /// Without it every token decodes to an `UNKNOWN_<page>_<token>` name.
    #[arg(long, global = true)]
    pub vocab: Option<PathBuf>,

    /// Treat tokens missing from the vocabulary as errors.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Split property text on this character into multiple values.
    #[arg(long, global = true)]
    pub separator: Option<char>,
}

impl DecoderArgs {
    /// Build the decoder configuration these flags describe.
    ///
    /// # Errors
    ///
    /// Returns an error if the vocabulary file cannot be read or parsed.
    pub fn config(&self) -> Result<DecoderConfig> {
        let code_pages = match &self.vocab {
            Some(path) => vocab::load(path)?,
            None => wbxml_wire::CodePages::new(),
        };
        Ok(DecoderConfig {
            strict_vocabulary: self.strict,
            value_separator: self.separator,
            ..DecoderConfig::with_code_pages(code_pages)
        })
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the document header and the decoded message tree.
    Inspect(InspectArgs),
    /// Check that a file decodes to exactly one well-formed message.
    Validate(ValidateArgs),
    /// Print the decoded message as an indented tree or as JSON.
    Decode(DecodeArgs),
    /// Dump the parse events emitted for a file, one per line.
    Events(EventsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `wbxml inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the `.wbxml` file to inspect.
    pub file: PathBuf,
}

/// Arguments for `wbxml validate`.
///
/// Attempts a full decode and reports either a set of success checkmarks
/// or a diagnostic error. Exits with code 1 on any failure.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the `.wbxml` file to validate.
    pub file: PathBuf,
}

/// Arguments for `wbxml decode`.
///
/// ```text
/// ┌───────────────┬────────────────────────────────────────────┐
/// │ Flag          │ Values / default                           │
/// ├───────────────┼────────────────────────────────────────────┤
/// │ --format      │ tree (default) | json                      │
/// │ -o / --output │ write to file instead of stdout            │
/// └───────────────┴────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the `.wbxml` file to decode.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Tree,
    Json,
}

/// Arguments for `wbxml events`.
///
/// Parses the file with an event recorder instead of the message builder,
/// so the stream is printed even when it would not assemble into a
/// message.
#[derive(clap::Args)]
pub struct EventsArgs {
    /// Path to the `.wbxml` file to trace.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Inspect(args) => cmd_inspect::run(args, &cli.decoder),
        Commands::Validate(args) => cmd_validate::run(args, &cli.decoder),
        Commands::Decode(args) => cmd_decode::run(args, &cli.decoder),
        Commands::Events(args) => cmd_events::run(args, &cli.decoder),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
