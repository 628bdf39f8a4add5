#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wbxml_decoder::{ParseEvent, PrimitiveDecoder, ReplaySource};
use wbxml_types::{Primitive, Property, Record};

const MAX_DEPTH: usize = 32;

#[derive(Debug, Arbitrary)]
struct FuzzProperty {
    name: String,
    params: Vec<(String, String)>,
    first_value: String,
    more_values: Vec<String>,
}

#[derive(Debug, Arbitrary)]
enum FuzzNode {
    Property(FuzzProperty),
    Record(FuzzRecord),
}

#[derive(Debug, Arbitrary)]
struct FuzzRecord {
    record_type: String,
    children: Vec<FuzzNode>,
}

/// Names must be non-empty for the tree to be well formed.
fn non_empty(name: &str) -> String {
    if name.is_empty() {
        "x".to_string()
    } else {
        name.to_string()
    }
}

fn values(p: &FuzzProperty) -> Vec<String> {
    std::iter::once(p.first_value.clone())
        .chain(p.more_values.iter().cloned())
        .collect()
}

fn model(spec: &FuzzRecord, depth: usize) -> Record {
    let mut record = Record::new(non_empty(&spec.record_type)).unwrap();
    for child in &spec.children {
        match child {
            FuzzNode::Property(p) => {
                let mut builder = Property::builder();
                builder.set_name(non_empty(&p.name));
                for (param_type, value) in &p.params {
                    builder.push_param(param_type.as_str(), value.as_str());
                }
                builder.set_values(values(p));
                record.add_property(builder.build().unwrap());
            }
            FuzzNode::Record(r) if depth < MAX_DEPTH => {
                record.add_record(model(r, depth + 1));
            }
            FuzzNode::Record(_) => {}
        }
    }
    record
}

fn push_record(spec: &FuzzRecord, depth: usize, out: &mut Vec<ParseEvent>) {
    out.push(ParseEvent::RecordStart(non_empty(&spec.record_type)));
    for child in &spec.children {
        match child {
            FuzzNode::Property(p) => {
                out.push(ParseEvent::PropertyStart);
                out.push(ParseEvent::PropertyName(non_empty(&p.name)));
                for (param_type, value) in &p.params {
                    out.push(ParseEvent::PropertyParamType(param_type.clone()));
                    out.push(ParseEvent::PropertyParamValue(value.clone()));
                }
                out.push(ParseEvent::PropertyValues(values(p)));
                out.push(ParseEvent::PropertyEnd);
            }
            FuzzNode::Record(r) if depth < MAX_DEPTH => push_record(r, depth + 1, out),
            FuzzNode::Record(_) => {}
        }
    }
    out.push(ParseEvent::RecordEnd);
}

// Fuzz target: arbitrary record/property tree → balanced events → decode.
//
// Any tree flattened into its event sequence must replay into a Primitive
// equal to the tree, with properties and child records in input order.
fuzz_target!(|root: FuzzRecord| {
    let mut events = vec![ParseEvent::DocumentStart];
    push_record(&root, 0, &mut events);
    events.push(ParseEvent::DocumentEnd);

    let decoded = PrimitiveDecoder::with_source(ReplaySource::new(events))
        .decode(std::io::empty())
        .expect("well-formed event sequence must decode");

    assert_eq!(decoded, Primitive::from_root(model(&root, 0)));
});
