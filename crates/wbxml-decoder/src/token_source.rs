use std::io::{self, Read};

use crate::error::TokenError;
use crate::event::{ContentSink, ParseEvent};

/// Converts an input byte stream into [`ContentSink`] events.
///
/// `parse` emits the complete event sequence for one message before
/// returning. The sink is lent for the duration of the call rather than
/// stored, so a decoder can own both the source and the sink.
pub trait TokenSource {
    /// Forget anything retained from a previous parse.
    fn reset(&mut self);

    /// Read one message from `input`, pushing events into `sink`.
    ///
    /// # Errors
    ///
    /// Any [`TokenError`]. A sink rejection is returned as
    /// [`TokenError::Rejected`]; transport failures as [`TokenError::Io`].
    fn parse(&mut self, input: &mut dyn Read, sink: &mut dyn ContentSink) -> Result<(), TokenError>;
}

/// A token source that replays a fixed event script.
///
/// The input is read to the end and discarded before the script is
/// replayed, so transport failures surface exactly as they would from a
/// real source. Useful for driving a decoder with event sequences that no
/// byte encoding can produce.
#[derive(Clone, Debug, Default)]
pub struct ReplaySource {
    events: Vec<ParseEvent>,
}

impl ReplaySource {
    #[must_use]
    pub fn new(events: Vec<ParseEvent>) -> Self {
        Self { events }
    }

    #[must_use]
    pub fn events(&self) -> &[ParseEvent] {
        &self.events
    }
}

impl TokenSource for ReplaySource {
    fn reset(&mut self) {}

    fn parse(&mut self, input: &mut dyn Read, sink: &mut dyn ContentSink) -> Result<(), TokenError> {
        io::copy(input, &mut io::sink())?;
        for event in &self.events {
            event.apply(sink)?;
        }
        Ok(())
    }
}
