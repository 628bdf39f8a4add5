use std::collections::HashMap;

/// An attribute start token: the attribute name plus an optional leading
/// fragment of its value (e.g. name `href`, prefix `http://`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrStart {
    pub name: String,
    pub value_prefix: String,
}

/// Vocabulary tables mapping `(page, token)` to names.
///
/// WBXML does not carry element or attribute names on the wire; a dialect
/// assigns them per code page. Tag and attribute code pages are switched
/// independently, so they are kept in separate tables. Token keys for tags
/// are the identity without flag bits (0x05..=0x3F).
///
/// No vocabulary is built in. Callers register the names of the dialect
/// they decode.
#[derive(Clone, Debug, Default)]
pub struct CodePages {
    tags: HashMap<(u8, u8), String>,
    attr_starts: HashMap<(u8, u8), AttrStart>,
    attr_values: HashMap<(u8, u8), String>,
}

impl CodePages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag name. The flag bits of `token` are ignored.
    pub fn insert_tag(&mut self, page: u8, token: u8, name: impl Into<String>) -> &mut Self {
        self.tags.insert((page, token & 0x3F), name.into());
        self
    }

    pub fn insert_attr_start(
        &mut self,
        page: u8,
        token: u8,
        name: impl Into<String>,
        value_prefix: impl Into<String>,
    ) -> &mut Self {
        self.attr_starts.insert(
            (page, token),
            AttrStart {
                name: name.into(),
                value_prefix: value_prefix.into(),
            },
        );
        self
    }

    pub fn insert_attr_value(
        &mut self,
        page: u8,
        token: u8,
        value: impl Into<String>,
    ) -> &mut Self {
        self.attr_values.insert((page, token), value.into());
        self
    }

    #[must_use]
    pub fn tag(&self, page: u8, token: u8) -> Option<&str> {
        self.tags.get(&(page, token & 0x3F)).map(String::as_str)
    }

    #[must_use]
    pub fn attr_start(&self, page: u8, token: u8) -> Option<&AttrStart> {
        self.attr_starts.get(&(page, token))
    }

    #[must_use]
    pub fn attr_value(&self, page: u8, token: u8) -> Option<&str> {
        self.attr_values.get(&(page, token)).map(String::as_str)
    }

    /// Total number of registered entries across all three tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len() + self.attr_starts.len() + self.attr_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Synthetic name for a token missing from the vocabulary.
#[must_use]
pub fn unknown_name(page: u8, token: u8) -> String {
    format!("UNKNOWN_{page:02X}_{token:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lookup_ignores_flag_bits() {
        let mut pages = CodePages::new();
        pages.insert_tag(0, 0x05, "Msg");
        assert_eq!(pages.tag(0, 0xC5), Some("Msg"));
        assert_eq!(pages.tag(1, 0x05), None);
    }

    #[test]
    fn attribute_tables_are_separate() {
        let mut pages = CodePages::new();
        pages
            .insert_attr_start(0, 0x05, "href", "http://")
            .insert_attr_value(0, 0x85, ".com");
        assert_eq!(pages.attr_start(0, 0x05).unwrap().value_prefix, "http://");
        assert_eq!(pages.attr_value(0, 0x85), Some(".com"));
        assert_eq!(pages.attr_value(0, 0x05), None);
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn unknown_names_are_stable() {
        assert_eq!(unknown_name(1, 0x0A), "UNKNOWN_01_0A");
    }
}
