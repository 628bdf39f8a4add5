#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wbxml_decoder::{ContentSink, ParseEvent, PrimitiveContentHandler};

#[derive(Debug, Arbitrary)]
enum FuzzEvent {
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

impl From<FuzzEvent> for ParseEvent {
    fn from(e: FuzzEvent) -> Self {
        match e {
            FuzzEvent::DocumentStart => ParseEvent::DocumentStart,
            FuzzEvent::DocumentEnd => ParseEvent::DocumentEnd,
            FuzzEvent::RecordStart(t) => ParseEvent::RecordStart(t),
            FuzzEvent::RecordEnd => ParseEvent::RecordEnd,
            FuzzEvent::PropertyStart => ParseEvent::PropertyStart,
            FuzzEvent::PropertyName(n) => ParseEvent::PropertyName(n),
            FuzzEvent::PropertyParamType(t) => ParseEvent::PropertyParamType(t),
            FuzzEvent::PropertyParamValue(v) => ParseEvent::PropertyParamValue(v),
            FuzzEvent::PropertyValues(vs) => ParseEvent::PropertyValues(vs),
            FuzzEvent::PropertyEnd => ParseEvent::PropertyEnd,
        }
    }
}

// Fuzz target: arbitrary event sequences into the content handler.
//
// Delivers events until the first rejection. The handler must never
// panic, and a primitive is only available after an accepted
// document_end.
fuzz_target!(|events: Vec<FuzzEvent>| {
    let mut handler = PrimitiveContentHandler::new();
    let mut last_accepted = None;

    for event in events {
        let event = ParseEvent::from(event);
        if event.apply(&mut handler).is_err() {
            break;
        }
        last_accepted = Some(event);
    }

    if handler.primitive().is_ok() {
        assert_eq!(last_accepted, Some(ParseEvent::DocumentEnd));
    }

    handler.reset();
    assert!(handler.primitive().is_err());
});
