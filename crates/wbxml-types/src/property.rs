use crate::error::ModelError;

/// A qualifier on a property, such as an encoding or language tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyParam {
  #[cfg_attr(feature = "serde", serde(rename = "type"))]
  pub param_type: String,
  pub value: String,
}

/// A named value (or ordered value list) attached to a record.
///
/// Properties are only created through [`PropertyBuilder::build`], which
/// guarantees a non-empty name and at least one value. Parameters keep the
/// order in which they were added.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Property {
  name: String,
  #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
  params: Vec<PropertyParam>,
  values: Vec<String>,
}

impl Property {
  #[must_use]
  pub fn builder() -> PropertyBuilder {
    PropertyBuilder::default()
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[must_use]
  pub fn params(&self) -> &[PropertyParam] {
    &self.params
  }

  #[must_use]
  pub fn values(&self) -> &[String] {
    &self.values
  }

  /// The first value. Every property has one.
  #[must_use]
  pub fn value(&self) -> &str {
    &self.values[0]
  }

  /// Value of the first parameter of the given type.
  #[must_use]
  pub fn param(&self, param_type: &str) -> Option<&str> {
    self
      .params
      .iter()
      .find(|p| p.param_type == param_type)
      .map(|p| p.value.as_str())
  }
}

/// Incremental construction of a [`Property`].
///
/// The decoder feeds name, parameters and values as separate events, so
/// the pieces arrive one at a time. Nothing is validated until
/// [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct PropertyBuilder {
  name: Option<String>,
  params: Vec<PropertyParam>,
  values: Option<Vec<String>>,
}

impl PropertyBuilder {
  pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
    self.name = Some(name.into());
    self
  }

  pub fn push_param(
    &mut self,
    param_type: impl Into<String>,
    value: impl Into<String>,
  ) -> &mut Self {
    self.params.push(PropertyParam {
      param_type: param_type.into(),
      value: value.into(),
    });
    self
  }

  pub fn set_values(&mut self, values: Vec<String>) -> &mut Self {
    self.values = Some(values);
    self
  }

  #[must_use]
  pub fn has_name(&self) -> bool {
    self.name.is_some()
  }

  #[must_use]
  pub fn has_values(&self) -> bool {
    self.values.is_some()
  }

  /// Finish the property.
  ///
  /// # Errors
  ///
  /// - [`ModelError::UnnamedProperty`] if no name was set.
  /// - [`ModelError::EmptyPropertyName`] if the name is empty.
  /// - [`ModelError::MissingValues`] if no values, or an empty list, were set.
  pub fn build(self) -> Result<Property, ModelError> {
    let name = self.name.ok_or(ModelError::UnnamedProperty)?;
    if name.is_empty() {
      return Err(ModelError::EmptyPropertyName);
    }

    let values = match self.values {
      Some(values) if !values.is_empty() => values,
      _ => return Err(ModelError::MissingValues { property: name }),
    };

    Ok(Property {
      name,
      params: self.params,
      values,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_in_order() {
    let mut builder = Property::builder();
    builder
      .set_name("Name")
      .push_param("LANGUAGE", "en")
      .push_param("ENCODING", "b")
      .set_values(vec!["Ada".into(), "Lovelace".into()]);
    let prop = builder.build().unwrap();

    assert_eq!(prop.name(), "Name");
    assert_eq!(prop.value(), "Ada");
    assert_eq!(prop.values(), ["Ada", "Lovelace"]);
    assert_eq!(prop.params()[0].param_type, "LANGUAGE");
    assert_eq!(prop.param("ENCODING"), Some("b"));
    assert_eq!(prop.param("CHARSET"), None);
  }

  #[test]
  fn rejects_unnamed() {
    let mut builder = Property::builder();
    builder.set_values(vec!["x".into()]);
    assert_eq!(builder.build(), Err(ModelError::UnnamedProperty));
  }

  #[test]
  fn rejects_empty_name() {
    let mut builder = Property::builder();
    builder.set_name("").set_values(vec!["x".into()]);
    assert_eq!(builder.build(), Err(ModelError::EmptyPropertyName));
  }

  #[test]
  fn rejects_missing_and_empty_value_lists() {
    let mut builder = Property::builder();
    builder.set_name("Status");
    assert!(!builder.has_values());
    assert_eq!(
      builder.clone().build(),
      Err(ModelError::MissingValues {
        property: "Status".into()
      })
    );

    builder.set_values(Vec::new());
    assert!(matches!(
      builder.build(),
      Err(ModelError::MissingValues { .. })
    ));
  }

  #[test]
  fn empty_string_is_a_value() {
    let mut builder = Property::builder();
    builder.set_name("Note").set_values(vec![String::new()]);
    assert_eq!(builder.build().unwrap().value(), "");
  }
}
