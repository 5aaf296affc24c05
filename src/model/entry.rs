//! List entries produced by a content source.

use serde::Deserialize;

/// One row of a list pane plus the text shown for it in the detail view.
///
/// Both fields are markup strings (see [`crate::view_state::markup`]).
/// Entries are immutable; a pane's entries are replaced wholesale when the
/// content source regenerates them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    summary: String,
    #[serde(default)]
    detail: String,
}

impl Entry {
    /// Create an entry from its summary line and detail text.
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Summary markup, folded into the list pane.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Detail markup, shown in the detail view while this entry is selected.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructor_values() {
        let entry = Entry::new("Head: <color_green>OK</color>", "No injuries.");
        assert_eq!(entry.summary(), "Head: <color_green>OK</color>");
        assert_eq!(entry.detail(), "No injuries.");
    }

    #[test]
    fn detail_defaults_to_empty_when_deserialized_without_it() {
        let entry: Entry = serde_json::from_str(r#"{"summary":"Torso"}"#).unwrap();
        assert_eq!(entry.summary(), "Torso");
        assert_eq!(entry.detail(), "");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Entry, _> =
            serde_json::from_str(r#"{"summary":"Torso","colour":"red"}"#);
        assert!(result.is_err());
    }
}
