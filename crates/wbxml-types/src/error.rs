/// Structural errors raised while building message model nodes.
///
/// These reject attachments that would leave the tree in a state no
/// decoder should produce: nameless properties, untyped records, or a
/// property with no value at all.
///
/// ```text
/// ┌─────────────────────┬───────────────────────────────────────────┐
/// │ Variant             │ Cause                                     │
/// ├─────────────────────┼───────────────────────────────────────────┤
/// │ EmptyRecordType     │ Record or Primitive created with ""       │
/// │ UnnamedProperty     │ property built before its name was set    │
/// │ EmptyPropertyName   │ property name set to ""                   │
/// │ MissingValues       │ property built with an empty value list   │
/// └─────────────────────┴───────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
  #[error("record type must not be empty")]
  EmptyRecordType,

  #[error("property has no name")]
  UnnamedProperty,

  #[error("property name must not be empty")]
  EmptyPropertyName,

  /// Every property carries at least one value (possibly the empty string).
  #[error("property {property} has no values")]
  MissingValues { property: String },
}
