/// Implementation of `wbxml inspect`.
///
/// Decodes a file and prints its header followed by the message tree.
///
/// # Output format
///
/// ```text
/// Header: WBXML v1.3, public id 0x01 (unknown), charset UTF-8, string table 12 bytes
/// ---
/// Msg
///   status = "ok"
///   Child
/// ```
use std::fs;

use anyhow::{Context, Result};
use wbxml_decoder::PrimitiveDecoder;
use wbxml_wire::{PublicId, WbxmlHeader};

use crate::{DecoderArgs, InspectArgs};

/// Run the `wbxml inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode.
pub fn run(args: &InspectArgs, decoder_args: &DecoderArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut decoder = PrimitiveDecoder::with_config(decoder_args.config()?);
    let primitive = decoder
        .decode_bytes(&bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if let Some(header) = decoder.source().header() {
        println!("Header: {}", header_line(header));
    }
    println!("---");
    print!("{primitive}");
    Ok(())
}

pub(crate) fn header_line(header: &WbxmlHeader) -> String {
    let public_id = match &header.public_id {
        PublicId::Known(PublicId::UNKNOWN) => "0x01 (unknown)".to_string(),
        PublicId::Known(id) => format!("0x{id:02X}"),
        PublicId::Literal(s) => format!("{s:?}"),
    };
    format!(
        "WBXML v{}.{}, public id {public_id}, charset {}, string table {} byte{}",
        header.version_major(),
        header.version_minor(),
        header.charset.name(),
        header.string_table.len(),
        if header.string_table.len() == 1 { "" } else { "s" }
    )
}
