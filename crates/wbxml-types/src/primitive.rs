use std::fmt;

use crate::property::Property;
use crate::record::Record;

/// A fully decoded protocol message.
///
/// A `Primitive` is the root record of a decoded document, frozen: it has
/// read accessors only, so once a decoder hands one out nothing can change
/// it. The only way to obtain one is [`Primitive::from_root`], which takes
/// ownership of a finished record tree.
///
/// ```text
/// Primitive (type "Login-Request")
/// ├── properties: [UserID = "alice", ClientID = "x1"]
/// └── records
///     └── Record (type "Capabilities")
///         └── properties: [Protocol = "IMPS1.3"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Primitive {
  root: Record,
}

impl Primitive {
  /// Freeze a finished record tree into a primitive.
  #[must_use]
  pub fn from_root(root: Record) -> Self {
    Self { root }
  }

  /// The message kind (the root record's type).
  #[must_use]
  pub fn primitive_type(&self) -> &str {
    self.root.record_type()
  }

  #[must_use]
  pub fn properties(&self) -> &[Property] {
    self.root.properties()
  }

  #[must_use]
  pub fn records(&self) -> &[Record] {
    self.root.records()
  }

  #[must_use]
  pub fn property(&self, name: &str) -> Option<&Property> {
    self.root.property(name)
  }

  #[must_use]
  pub fn property_value(&self, name: &str) -> Option<&str> {
    self.root.property_value(name)
  }

  #[must_use]
  pub fn record(&self, record_type: &str) -> Option<&Record> {
    self.root.record(record_type)
  }

  pub fn records_of_type<'a>(&'a self, record_type: &'a str) -> impl Iterator<Item = &'a Record> {
    self.root.records_of_type(record_type)
  }

  /// The root as a plain record, for code that walks trees generically.
  #[must_use]
  pub fn as_record(&self) -> &Record {
    &self.root
  }

  #[must_use]
  pub fn into_record(self) -> Record {
    self.root
  }
}

/// Indented tree rendering, two spaces per level:
///
/// ```text
/// Msg
///   status = "ok"
///   Name;LANGUAGE=en = "Ada", "Lovelace"
///   Child
///     flag = ""
/// ```
///
/// Properties of a record are listed before its child records.
impl fmt::Display for Primitive {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_record(f, &self.root, 0)
  }
}

fn write_record(f: &mut fmt::Formatter<'_>, record: &Record, depth: usize) -> fmt::Result {
  let indent = "  ".repeat(depth);
  writeln!(f, "{indent}{}", record.record_type())?;

  for prop in record.properties() {
    write!(f, "{indent}  {}", prop.name())?;
    for param in prop.params() {
      write!(f, ";{}={}", param.param_type, param.value)?;
    }
    write!(f, " =")?;
    for (i, value) in prop.values().iter().enumerate() {
      let sep = if i == 0 { " " } else { ", " };
      write!(f, "{sep}{value:?}")?;
    }
    writeln!(f)?;
  }

  for child in record.records() {
    write_record(f, child, depth + 1)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prop(name: &str, params: &[(&str, &str)], values: &[&str]) -> Property {
    let mut builder = Property::builder();
    builder.set_name(name);
    for (t, v) in params {
      builder.push_param(*t, *v);
    }
    builder.set_values(values.iter().map(|v| (*v).to_string()).collect());
    builder.build().unwrap()
  }

  fn sample() -> Primitive {
    let mut child = Record::new("Child").unwrap();
    child.add_property(prop("flag", &[], &[""]));

    let mut root = Record::new("Msg").unwrap();
    root
      .add_property(prop("status", &[], &["ok"]))
      .add_property(prop("Name", &[("LANGUAGE", "en")], &["Ada", "Lovelace"]))
      .add_record(child);
    Primitive::from_root(root)
  }

  #[test]
  fn accessors_delegate_to_root() {
    let primitive = sample();
    assert_eq!(primitive.primitive_type(), "Msg");
    assert_eq!(primitive.properties().len(), 2);
    assert_eq!(primitive.property_value("status"), Some("ok"));
    assert_eq!(primitive.property("Name").unwrap().param("LANGUAGE"), Some("en"));
    assert_eq!(primitive.records_of_type("Child").count(), 1);
    assert_eq!(primitive.record("Child").unwrap().property_value("flag"), Some(""));
  }

  #[test]
  fn display_renders_tree() {
    let expected = "Msg\n  status = \"ok\"\n  Name;LANGUAGE=en = \"Ada\", \"Lovelace\"\n  Child\n    flag = \"\"\n";
    assert_eq!(sample().to_string(), expected);
  }

  #[test]
  fn into_record_returns_root() {
    let record = sample().into_record();
    assert_eq!(record.record_type(), "Msg");
    assert_eq!(record.records().len(), 1);
  }

  #[cfg(feature = "serde")]
  #[test]
  fn serializes_as_root_record() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["type"], "Msg");
    assert_eq!(json["properties"][1]["params"][0]["type"], "LANGUAGE");
    assert_eq!(json["records"][0]["properties"][0]["values"][0], "");
  }
}
