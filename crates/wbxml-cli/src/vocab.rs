/// Loading of `--vocab` files.
///
/// A vocabulary file lists the code page entries of one WBXML dialect:
///
/// ```json
/// {
///   "tags": [
///     { "page": 0, "token": 5, "name": "Msg" }
///   ],
///   "attr_starts": [
///     { "page": 0, "token": 5, "name": "TYPE", "prefix": "home-" }
///   ],
///   "attr_values": [
///     { "page": 0, "token": 133, "value": "phone" }
///   ]
/// }
/// ```
///
/// Every section is optional. Tag tokens are given without the attribute
/// and content flag bits.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use wbxml_wire::CodePages;

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Vocabulary {
    #[serde(default)]
    tags: Vec<TagEntry>,
    #[serde(default)]
    attr_starts: Vec<AttrStartEntry>,
    #[serde(default)]
    attr_values: Vec<AttrValueEntry>,
}

#[derive(serde::Deserialize)]
struct TagEntry {
    page: u8,
    token: u8,
    name: String,
}

#[derive(serde::Deserialize)]
struct AttrStartEntry {
    page: u8,
    token: u8,
    name: String,
    #[serde(default)]
    prefix: String,
}

#[derive(serde::Deserialize)]
struct AttrValueEntry {
    page: u8,
    token: u8,
    value: String,
}

/// Read a vocabulary file into code page tables.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON of the
/// shape above, or assigns a token outside the range its table allows.
pub fn load(path: &Path) -> Result<CodePages> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("cannot read vocabulary {}", path.display()))?;
    let vocab: Vocabulary = serde_json::from_str(&src)
        .with_context(|| format!("invalid vocabulary {}", path.display()))?;
    build(vocab)
}

fn build(vocab: Vocabulary) -> Result<CodePages> {
    let mut pages = CodePages::new();

    for tag in vocab.tags {
        if tag.token > 0x3F {
            bail!("tag {:?}: token 0x{:02X} has flag bits set", tag.name, tag.token);
        }
        pages.insert_tag(tag.page, tag.token, tag.name);
    }
    for start in vocab.attr_starts {
        if start.token >= 0x80 {
            bail!(
                "attribute {:?}: start token 0x{:02X} must be below 0x80",
                start.name,
                start.token
            );
        }
        pages.insert_attr_start(start.page, start.token, start.name, start.prefix);
    }
    for value in vocab.attr_values {
        if value.token < 0x80 {
            bail!(
                "attribute value {:?}: token 0x{:02X} must be 0x80 or above",
                value.value,
                value.token
            );
        }
        pages.insert_attr_value(value.page, value.token, value.value);
    }

    tracing::debug!(entries = pages.len(), "loaded vocabulary");
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<CodePages> {
        build(serde_json::from_str(json)?)
    }

    #[test]
    fn loads_all_sections() {
        let pages = parse(
            r#"{
                "tags": [{ "page": 1, "token": 5, "name": "Msg" }],
                "attr_starts": [{ "page": 0, "token": 6, "name": "TYPE", "prefix": "home-" }],
                "attr_values": [{ "page": 0, "token": 133, "value": "phone" }]
            }"#,
        )
        .unwrap();

        assert_eq!(pages.tag(1, 0x05), Some("Msg"));
        assert_eq!(pages.attr_start(0, 0x06).unwrap().value_prefix, "home-");
        assert_eq!(pages.attr_value(0, 0x85), Some("phone"));
    }

    #[test]
    fn sections_are_optional() {
        assert!(parse("{}").unwrap().is_empty());
    }

    #[test]
    fn rejects_flagged_tag_tokens() {
        let err = parse(r#"{ "tags": [{ "page": 0, "token": 69, "name": "Msg" }] }"#).unwrap_err();
        assert!(err.to_string().contains("flag bits"));
    }

    #[test]
    fn rejects_unknown_sections() {
        assert!(parse(r#"{ "tag": [] }"#).is_err());
    }
}
