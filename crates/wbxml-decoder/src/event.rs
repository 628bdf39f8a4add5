use std::fmt;

use crate::error::ProtocolError;

/// Receiver of structural parse events, invoked in document order.
///
/// A token source turns bytes into calls on this trait; an implementation
/// turns the calls into whatever it builds. Events for one property arrive
/// as a group:
///
/// ```text
/// property_start
/// property_name(name)
/// (property_param_type(type) property_param_value(value))*
/// property_values(values)
/// property_end
/// ```
///
/// Returning an error aborts the parse; the token source hands the error
/// back to its caller unchanged.
pub trait ContentSink {
    /// Discard any in-progress state.
    fn reset(&mut self);

    fn document_start(&mut self) -> Result<(), ProtocolError>;
    fn document_end(&mut self) -> Result<(), ProtocolError>;

    fn record_start(&mut self, record_type: &str) -> Result<(), ProtocolError>;
    fn record_end(&mut self) -> Result<(), ProtocolError>;

    fn property_start(&mut self) -> Result<(), ProtocolError>;
    fn property_name(&mut self, name: &str) -> Result<(), ProtocolError>;
    fn property_param_type(&mut self, param_type: &str) -> Result<(), ProtocolError>;
    fn property_param_value(&mut self, value: &str) -> Result<(), ProtocolError>;
    fn property_values(&mut self, values: Vec<String>) -> Result<(), ProtocolError>;
    fn property_end(&mut self) -> Result<(), ProtocolError>;
}

/// One call of the [`ContentSink`] contract, as data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseEvent {
    DocumentStart,
    DocumentEnd,
    RecordStart(String),
    RecordEnd,
    PropertyStart,
    PropertyName(String),
    PropertyParamType(String),
    PropertyParamValue(String),
    PropertyValues(Vec<String>),
    PropertyEnd,
}

impl ParseEvent {
    /// Deliver this event to `sink`.
    ///
    /// # Errors
    ///
    /// Whatever the sink rejects the event with.
    pub fn apply(&self, sink: &mut dyn ContentSink) -> Result<(), ProtocolError> {
        match self {
            Self::DocumentStart => sink.document_start(),
            Self::DocumentEnd => sink.document_end(),
            Self::RecordStart(t) => sink.record_start(t),
            Self::RecordEnd => sink.record_end(),
            Self::PropertyStart => sink.property_start(),
            Self::PropertyName(n) => sink.property_name(n),
            Self::PropertyParamType(t) => sink.property_param_type(t),
            Self::PropertyParamValue(v) => sink.property_param_value(v),
            Self::PropertyValues(vs) => sink.property_values(vs.clone()),
            Self::PropertyEnd => sink.property_end(),
        }
    }
}

impl fmt::Display for ParseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DocumentStart => write!(f, "document_start"),
            Self::DocumentEnd => write!(f, "document_end"),
            Self::RecordStart(t) => write!(f, "record_start({t:?})"),
            Self::RecordEnd => write!(f, "record_end"),
            Self::PropertyStart => write!(f, "property_start"),
            Self::PropertyName(n) => write!(f, "property_name({n:?})"),
            Self::PropertyParamType(t) => write!(f, "property_param_type({t:?})"),
            Self::PropertyParamValue(v) => write!(f, "property_param_value({v:?})"),
            Self::PropertyValues(vs) => write!(f, "property_values({vs:?})"),
            Self::PropertyEnd => write!(f, "property_end"),
        }
    }
}

/// A sink that accepts everything and keeps a log of what it was sent.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<ParseEvent>,
}

impl EventRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[ParseEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<ParseEvent> {
        self.events
    }

    fn push(&mut self, event: ParseEvent) -> Result<(), ProtocolError> {
        self.events.push(event);
        Ok(())
    }
}

impl ContentSink for EventRecorder {
    fn reset(&mut self) {
        self.events.clear();
    }

    fn document_start(&mut self) -> Result<(), ProtocolError> {
        self.push(ParseEvent::DocumentStart)
    }

    fn document_end(&mut self) -> Result<(), ProtocolError> {
        self.push(ParseEvent::DocumentEnd)
    }

    fn record_start(&mut self, record_type: &str) -> Result<(), ProtocolError> {
        self.push(ParseEvent::RecordStart(record_type.to_owned()))
    }

    fn record_end(&mut self) -> Result<(), ProtocolError> {
        self.push(ParseEvent::RecordEnd)
    }

    fn property_start(&mut self) -> Result<(), ProtocolError> {
        self.push(ParseEvent::PropertyStart)
    }

    fn property_name(&mut self, name: &str) -> Result<(), ProtocolError> {
        self.push(ParseEvent::PropertyName(name.to_owned()))
    }

    fn property_param_type(&mut self, param_type: &str) -> Result<(), ProtocolError> {
        self.push(ParseEvent::PropertyParamType(param_type.to_owned()))
    }

    fn property_param_value(&mut self, value: &str) -> Result<(), ProtocolError> {
        self.push(ParseEvent::PropertyParamValue(value.to_owned()))
    }

    fn property_values(&mut self, values: Vec<String>) -> Result<(), ProtocolError> {
        self.push(ParseEvent::PropertyValues(values))
    }

    fn property_end(&mut self) -> Result<(), ProtocolError> {
        self.push(ParseEvent::PropertyEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_into_recorder_is_lossless() {
        let script = vec![
            ParseEvent::DocumentStart,
            ParseEvent::RecordStart("Msg".into()),
            ParseEvent::PropertyStart,
            ParseEvent::PropertyName("status".into()),
            ParseEvent::PropertyValues(vec!["ok".into()]),
            ParseEvent::PropertyEnd,
            ParseEvent::RecordEnd,
            ParseEvent::DocumentEnd,
        ];

        let mut recorder = EventRecorder::new();
        for event in &script {
            event.apply(&mut recorder).unwrap();
        }
        assert_eq!(recorder.events(), script.as_slice());

        recorder.reset();
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn display_reads_like_calls() {
        assert_eq!(ParseEvent::RecordStart("Msg".into()).to_string(), "record_start(\"Msg\")");
        assert_eq!(
            ParseEvent::PropertyValues(vec!["a".into(), "b".into()]).to_string(),
            "property_values([\"a\", \"b\"])"
        );
    }
}
