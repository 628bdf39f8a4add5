/// Implementation of `wbxml decode`.
///
/// Decodes a file and writes the message to stdout or to `-o <file>`.
///
/// ```text
/// ┌────────┬───────────────────────────────────────────────────────────┐
/// │ Format │ Output                                                    │
/// ├────────┼───────────────────────────────────────────────────────────┤
/// │ tree   │ indented record / property tree (default)                 │
/// │ json   │ {"type": ..., "properties": [...], "records": [...]}     │
/// └────────┴───────────────────────────────────────────────────────────┘
/// ```
use std::fs::{self, File};
use std::io::{self, Write as _};

use anyhow::{Context, Result};
use wbxml_decoder::PrimitiveDecoder;
use wbxml_types::Primitive;

use crate::{DecodeArgs, DecoderArgs, OutputFormat};

/// Run the `wbxml decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not decode, or the
/// output cannot be written.
pub fn run(args: &DecodeArgs, decoder_args: &DecoderArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;

    let primitive = PrimitiveDecoder::with_config(decoder_args.config()?)
        .decode(file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let rendered = render(&primitive, args.format)?;

    if let Some(path) = &args.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(rendered.as_bytes())
            .context("cannot write to stdout")?;
    }

    Ok(())
}

fn render(primitive: &Primitive, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tree => Ok(primitive.to_string()),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(primitive).context("cannot serialize message")?;
            json.push('\n');
            Ok(json)
        }
    }
}
