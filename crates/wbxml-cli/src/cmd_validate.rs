/// Implementation of `wbxml validate`.
///
/// Attempts a full decode and reports either a series of success
/// checkmarks (`✓`) or a diagnostic failure line (`✗`). The main
/// dispatcher turns the returned `Err` into exit code 1.
///
/// # Success output
///
/// ```text
/// ✓ Header: valid (WBXML v1.3, UTF-8)
/// ✓ Body: one message of type "Msg"
/// ✓ Structure: 2 properties, 1 child record
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Malformed: input ended at offset 17 with 1 unclosed element(s)
/// ✗ Malformed: unexpected end of input at offset 9
/// ✗ Structure: property started outside any record
/// ✗ I/O: Connection reset by peer (os error 104)
/// ```
use std::error::Error as _;
use std::fs::File;

use anyhow::{Context, Result, anyhow};
use wbxml_decoder::{DecodeError, ParserError, PrimitiveDecoder};

use crate::{DecoderArgs, ValidateArgs};

/// Run the `wbxml validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or fails to decode.
pub fn run(args: &ValidateArgs, decoder_args: &DecoderArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;

    let mut decoder = PrimitiveDecoder::with_config(decoder_args.config()?);
    match decoder.decode(file) {
        Ok(primitive) => {
            if let Some(header) = decoder.source().header() {
                println!(
                    "✓ Header: valid (WBXML v{}.{}, {})",
                    header.version_major(),
                    header.version_minor(),
                    header.charset.name()
                );
            }
            println!("✓ Body: one message of type {:?}", primitive.primitive_type());
            let properties = primitive.properties().len();
            let records = primitive.records().len();
            println!(
                "✓ Structure: {properties} propert{}, {records} child record{}",
                if properties == 1 { "y" } else { "ies" },
                if records == 1 { "" } else { "s" }
            );
            Ok(())
        }
        Err(e) => {
            println!("✗ {}", diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

/// One-line description of a decode failure, naming its category and the
/// innermost cause.
fn diagnostic(err: &DecodeError) -> String {
    match err {
        DecodeError::Io(e) => format!("I/O: {e}"),
        DecodeError::Parser(ParserError::Malformed(inner)) => format!("Malformed: {inner}"),
        DecodeError::Parser(ParserError::Structure(inner)) => {
            let mut detail = inner.to_string();
            let mut source = inner.source();
            while let Some(cause) = source {
                detail = cause.to_string();
                source = cause.source();
            }
            format!("Structure: {detail}")
        }
    }
}
