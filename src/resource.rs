// 📄 Content Rows - the per-locale text side of a merge
//
// A Resource is an ordered list of rows. Order is positional: rows are matched
// against schema positions, never by key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One content row: field name → text
///
/// A row can also be a placeholder ("no row supplied here"). Reading a field
/// from a placeholder, or a field the row lacks, yields the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: Option<HashMap<String, String>>,
}

impl Row {
    /// An empty but present row
    pub fn new() -> Self {
        Row {
            fields: Some(HashMap::new()),
        }
    }

    /// A placeholder row (absent)
    pub fn placeholder() -> Self {
        Row { fields: None }
    }

    /// Build a row from (field, text) pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Row {
            fields: Some(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Builder: set a field
    pub fn with(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields
            .get_or_insert_with(HashMap::new)
            .insert(field.into(), text.into());
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.fields.is_none()
    }

    /// Field text, or "" when missing
    pub fn get(&self, field: &str) -> &str {
        self.fields
            .as_ref()
            .and_then(|f| f.get(field))
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Default for Row {
    fn default() -> Self {
        Row::new()
    }
}

/// Ordered content rows for one schema node in one locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource {
    pub content: Vec<Row>,
}

impl Resource {
    pub fn new(content: Vec<Row>) -> Self {
        Resource { content }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.content
    }

    /// Rows after any leading placeholders
    pub fn without_leading_placeholders(&self) -> &[Row] {
        let skip = self
            .content
            .iter()
            .take_while(|r| r.is_placeholder())
            .count();
        &self.content[skip..]
    }
}

impl From<Vec<Row>> for Resource {
    fn from(content: Vec<Row>) -> Self {
        Resource::new(content)
    }
}

impl FromIterator<Row> for Resource {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Resource::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_read_as_empty() {
        let row = Row::new().with("title", "Hello");
        assert_eq!(row.get("title"), "Hello");
        assert_eq!(row.get("body"), "");
        assert_eq!(Row::placeholder().get("title"), "");
    }

    #[test]
    fn test_leading_placeholders_only() {
        let res = Resource::new(vec![
            Row::placeholder(),
            Row::placeholder(),
            Row::new().with("text", "a"),
            Row::placeholder(),
        ]);
        let rest = res.without_leading_placeholders();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[0].get("text"), "a");
        assert!(rest[1].is_placeholder());
        assert_eq!(res.len(), 4);
    }

    #[test]
    fn test_json_null_is_placeholder() {
        let res: Resource = serde_json::from_str(r#"[null, {"text": "a"}, {}]"#).unwrap();
        assert!(res.content[0].is_placeholder());
        assert_eq!(res.content[1].get("text"), "a");
        assert!(!res.content[2].is_placeholder());
    }
}
