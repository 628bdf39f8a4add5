use crate::error::ModelError;
use crate::property::Property;

/// A nested structural unit, analogous to an XML element that contains
/// other elements.
///
/// Records own their children outright: there are no parent pointers and
/// no sharing, so the tree is acyclic by construction. Properties and child
/// records are kept in separate lists, each in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Record {
  #[cfg_attr(feature = "serde", serde(rename = "type"))]
  record_type: String,
  #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
  properties: Vec<Property>,
  #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
  records: Vec<Record>,
}

impl Record {
  /// Create an empty record of the given type.
  ///
  /// # Errors
  ///
  /// [`ModelError::EmptyRecordType`] if `record_type` is empty.
  pub fn new(record_type: impl Into<String>) -> Result<Self, ModelError> {
    let record_type = record_type.into();
    if record_type.is_empty() {
      return Err(ModelError::EmptyRecordType);
    }
    Ok(Self {
      record_type,
      properties: Vec::new(),
      records: Vec::new(),
    })
  }

  #[must_use]
  pub fn record_type(&self) -> &str {
    &self.record_type
  }

  #[must_use]
  pub fn properties(&self) -> &[Property] {
    &self.properties
  }

  #[must_use]
  pub fn records(&self) -> &[Record] {
    &self.records
  }

  pub fn add_property(&mut self, property: Property) -> &mut Self {
    self.properties.push(property);
    self
  }

  pub fn add_record(&mut self, record: Record) -> &mut Self {
    self.records.push(record);
    self
  }

  /// First property with the given name.
  #[must_use]
  pub fn property(&self, name: &str) -> Option<&Property> {
    self.properties.iter().find(|p| p.name() == name)
  }

  /// First value of the first property with the given name.
  #[must_use]
  pub fn property_value(&self, name: &str) -> Option<&str> {
    self.property(name).map(Property::value)
  }

  /// First child record of the given type.
  #[must_use]
  pub fn record(&self, record_type: &str) -> Option<&Record> {
    self.records.iter().find(|r| r.record_type == record_type)
  }

  pub fn records_of_type<'a>(&'a self, record_type: &'a str) -> impl Iterator<Item = &'a Record> {
    self
      .records
      .iter()
      .filter(move |r| r.record_type == record_type)
  }

  /// True when the record has neither properties nor children.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.properties.is_empty() && self.records.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prop(name: &str, value: &str) -> Property {
    let mut builder = Property::builder();
    builder.set_name(name).set_values(vec![value.into()]);
    builder.build().unwrap()
  }

  #[test]
  fn rejects_empty_type() {
    assert_eq!(Record::new(""), Err(ModelError::EmptyRecordType));
  }

  #[test]
  fn preserves_insertion_order() {
    let mut user = Record::new("User").unwrap();
    user
      .add_property(prop("UserID", "alice"))
      .add_property(prop("Status", "online"))
      .add_property(prop("UserID", "shadowed"));

    let names: Vec<_> = user.properties().iter().map(Property::name).collect();
    assert_eq!(names, ["UserID", "Status", "UserID"]);
    assert_eq!(user.property_value("UserID"), Some("alice"));
  }

  #[test]
  fn child_lookup() {
    let mut list = Record::new("ContactList").unwrap();
    list
      .add_record(Record::new("User").unwrap())
      .add_record(Record::new("Group").unwrap())
      .add_record(Record::new("User").unwrap());

    assert_eq!(list.records_of_type("User").count(), 2);
    assert!(list.record("Group").is_some());
    assert!(list.record("Missing").is_none());
    assert!(!list.is_empty());
    assert!(list.records()[1].is_empty());
  }
}
