//! Generate editor toolbox XML from a [`BlockRegistry`].
//!
//! The output is a single `<category>` listing every registered block in
//! registration order. Value inputs get a shadow block so a freshly dragged
//! block already carries a sensible default expression: `math_number` for
//! numeric inputs, `text` for everything else.

use crate::model::{BlockSchema, FieldKind, GroupKind, TypeCheck};
use crate::registry::BlockRegistry;

/// Generate the toolbox XML for `registry` under a category named `category`.
pub fn generate_toolbox_xml(registry: &BlockRegistry, category: &str) -> String {
    let mut out = String::with_capacity(512);
    out.push_str("<xml id=\"toolbox\" style=\"display: none\">\n");
    indent(&mut out, 1);
    out.push_str(&format!("<category name=\"{}\"", xml_escape_attr(category)));
    if let Some(hue) = registry.common_hue() {
        out.push_str(&format!(" colour=\"{}\"", hue.0));
    }
    out.push_str(">\n");
    for schema in registry.schemas() {
        write_block(&mut out, schema, 2);
    }
    indent(&mut out, 1);
    out.push_str("</category>\n");
    out.push_str("</xml>\n");
    out
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

/// Escape an attribute value for XML.
fn xml_escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_block(out: &mut String, schema: &BlockSchema, level: usize) {
    let inputs: Vec<(&str, &TypeCheck)> = schema
        .groups
        .iter()
        .filter_map(|g| match &g.kind {
            GroupKind::Value(def) => match &def.kind {
                FieldKind::ValueInput(check) => Some((def.key.as_str(), check)),
                FieldKind::Dropdown(_) => None,
            },
            GroupKind::Dummy => None,
        })
        .collect();

    indent(out, level);
    let block_type = xml_escape_attr(&schema.block_type);
    if inputs.is_empty() {
        out.push_str(&format!("<block type=\"{}\"/>\n", block_type));
        return;
    }
    out.push_str(&format!("<block type=\"{}\">\n", block_type));
    for (name, check) in inputs {
        write_shadow_input(out, name, check, level + 1);
    }
    indent(out, level);
    out.push_str("</block>\n");
}

fn write_shadow_input(out: &mut String, name: &str, check: &TypeCheck, level: usize) {
    let numeric = matches!(check, TypeCheck::OneOf(types) if types.iter().any(|t| t.is_numeric()));
    indent(out, level);
    out.push_str(&format!("<value name=\"{}\">\n", xml_escape_attr(name)));
    indent(out, level + 1);
    if numeric {
        out.push_str("<shadow type=\"math_number\"><field name=\"NUM\">0</field></shadow>\n");
    } else {
        out.push_str("<shadow type=\"text\"><field name=\"TEXT\"></field></shadow>\n");
    }
    indent(out, level);
    out.push_str("</value>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_attribute_text() {
        assert_eq!(xml_escape_attr("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn empty_registry_has_empty_category() {
        let xml = generate_toolbox_xml(&BlockRegistry::new(), "LCD");
        assert!(xml.contains("<category name=\"LCD\">"));
        assert!(!xml.contains("<block"));
    }
}
