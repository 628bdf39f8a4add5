/// Implementation of `wbxml events`.
///
/// Runs the token source into an [`EventRecorder`] and prints every event
/// it received, one per line. Events emitted before a parse error are
/// still printed, followed by the error.
///
/// ```text
/// document_start
/// record_start("Msg")
/// property_start
/// property_name("status")
/// property_values(["ok"])
/// property_end
/// record_end
/// document_end
/// ```
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use wbxml_decoder::{EventRecorder, TokenSource, WbxmlTokenSource};

use crate::{DecoderArgs, EventsArgs};

/// Run the `wbxml events` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the token source
/// fails partway through.
pub fn run(args: &EventsArgs, decoder_args: &DecoderArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;

    let mut source = WbxmlTokenSource::new(decoder_args.config()?);
    let mut recorder = EventRecorder::new();
    let result = source.parse(&mut BufReader::new(file), &mut recorder);

    for event in recorder.events() {
        println!("{event}");
    }

    result.with_context(|| format!("failed to tokenize {}", args.file.display()))
}
