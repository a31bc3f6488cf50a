//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization, and table rendering for lists.

use serde_json::Value;
use tabled::builder::Builder;

use crate::{Resource, ResourceKind};

/// Trait for human-readable key-value output.
///
/// Implemented by resources to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl<K: ResourceKind> PrettyPrint for Resource<K> {
    fn pretty_print(&self) -> String {
        let header = match self.identifier() {
            Some(identifier) => format!("{} {}", K::NAME, display_value(identifier)),
            None => format!("{} (unsaved)", K::NAME),
        };
        let divider = "─".repeat(header.chars().count().max(30));
        let width = self.attributes().keys().map(String::len).max().unwrap_or(0);

        let mut lines = vec![header, divider];
        for (key, value) in self.attributes() {
            lines.push(format!("{key:<width$}  {}", display_value(value)));
        }

        lines.join("\n")
    }
}

/// Render resources as a table.
///
/// Columns are the attributes of the first resource, in order; attributes
/// missing from later resources render as empty cells.
pub fn table<K: ResourceKind>(resources: &[Resource<K>]) -> String {
    let Some(first) = resources.first() else {
        return format!("No {} found", K::PATH);
    };

    let columns: Vec<String> = first.attributes().keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(columns.clone());

    for resource in resources {
        builder.push_record(
            columns
                .iter()
                .map(|column| resource.get(column).map(display_value).unwrap_or_default()),
        );
    }

    builder.build().to_string()
}

/// Strings print bare, null prints empty, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Character, EnginnClient};
    use serde_json::json;

    fn character(attributes: Value) -> Resource<Character> {
        let project = EnginnClient::new("token", "http://localhost")
            .unwrap()
            .project("abc");
        Resource::new(project.child_scope(), attributes.as_object().unwrap().clone())
    }

    #[test]
    fn test_resource_pretty_print_format() {
        let output = character(json!({ "id": 42, "name": "Rocky", "notes": null })).pretty_print();

        assert!(output.starts_with("Character 42"));
        assert!(output.contains("name  Rocky"));
        assert!(output.contains("notes"));
    }

    #[test]
    fn test_unsaved_pretty_print() {
        let output = character(json!({ "name": "Rocky" })).pretty_print();
        assert!(output.starts_with("Character (unsaved)"));
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let rows = vec![
            character(json!({ "id": 1, "name": "Indiana" })),
            character(json!({ "id": 2, "name": "Jones" })),
        ];
        let output = table(&rows);

        assert!(output.contains("name"));
        assert!(output.contains("Indiana"));
        assert!(output.contains("Jones"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(table::<Character>(&[]), "No characters found");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("x")), "x");
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
    }
}
