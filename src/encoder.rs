//! Writing [`Rda`] trees as strings.
//!
//! A tree of dimension 0 is written as its bare scalar value. Anything deeper
//! gets a header (the delimiters in use, the escape character, then the
//! primary delimiter again) followed by the payload.
//!
//! Trailing placeholders are never written. A node whose children are all
//! placeholders writes its own scalar instead, so a tree that was grown by
//! reading past its end encodes the same as before.
//!
//! Formatted output puts every child after the first on its own line, with
//! indentation growing for nodes that have more than one child, and quotes
//! every scalar. Indentation is relative to the node being encoded.

use crate::escape::escape;
use crate::options::RdaOptions;
use crate::Rda;

/// Encodes `node` with its header.
pub(crate) fn encode(node: &Rda, options: &RdaOptions) -> String {
    let dimension = node.dimension();
    if dimension == 0 {
        return node.scalar_value().to_string();
    }

    let encoding = node.encoding_ref();
    let delimiters = encoding.delimiters_in_use(node.level(), dimension);
    let escape_char = encoding.escape_char();

    let mut output = String::new();
    output.extend(delimiters);
    output.push(escape_char);
    if let Some(&primary) = delimiters.first() {
        output.push(primary);
    }
    if options.formatted {
        output.push_str(options.line_break.as_str());
        output.push(' ');
    }

    PayloadWriter::new(delimiters, escape_char, options).write_root(node, &mut output);
    output
}

/// Encodes the payload of `node` alone.
pub(crate) fn payload(node: &Rda, options: &RdaOptions) -> String {
    let encoding = node.encoding_ref();
    let delimiters = encoding.delimiters_in_use(node.level(), node.dimension());

    let mut output = String::new();
    PayloadWriter::new(delimiters, encoding.escape_char(), options).write_root(node, &mut output);
    output
}

struct PayloadWriter<'a> {
    // Scalars are escaped against every delimiter of the encoded subtree.
    delimiters: &'a [char],
    escape_char: char,
    options: &'a RdaOptions,
    indent_unit: String,
}

impl<'a> PayloadWriter<'a> {
    fn new(delimiters: &'a [char], escape_char: char, options: &'a RdaOptions) -> Self {
        PayloadWriter {
            delimiters,
            escape_char,
            options,
            indent_unit: " ".repeat(options.indent),
        }
    }

    fn write_root(&self, node: &Rda, output: &mut String) {
        self.write_node(node, 0, true, "", output);
    }

    fn write_node(&self, node: &Rda, depth: usize, is_root: bool, indent: &str, output: &mut String) {
        let Some(last) = node.last_non_placeholder_index() else {
            if let Some(value) = &node.scalar {
                output.push_str(&escape(
                    value,
                    self.delimiters,
                    self.escape_char,
                    self.options.formatted,
                ));
            }
            return;
        };

        let child_indent = if node.len() == 1 {
            String::new()
        } else {
            format!("{indent}{}", self.indent_unit)
        };

        for (index, child) in node.children[..=last].iter().enumerate() {
            if self.options.formatted {
                if index > 0 {
                    output.push_str(self.options.line_break.as_str());
                    output.push_str(indent);
                } else if node.len() > 1 && !is_root {
                    output.push_str(&self.indent_unit);
                }
            }
            if index > 0 {
                if let Some(&delimiter) = self.delimiters.get(depth) {
                    output.push(delimiter);
                }
            }
            self.write_node(child, depth + 1, false, &child_indent, output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LineBreak;

    #[test]
    fn test_scalar_has_no_header() {
        let rda = Rda::from_scalar("a|b");
        assert_eq!(encode(&rda, &RdaOptions::new()), "a|b");
        assert_eq!(encode(&rda, &RdaOptions::formatted()), "a|b");
    }

    #[test]
    fn test_trailing_placeholders_omitted() {
        let mut rda = Rda::new();
        rda.set_value(0, "a").unwrap();
        rda.get_rda(5).unwrap();
        assert_eq!(encode(&rda, &RdaOptions::new()), "|\\|a");
    }

    #[test]
    fn test_interior_placeholder_is_empty_section() {
        let mut rda = Rda::new();
        rda.set_value(0, "a").unwrap();
        rda.set_value(2, "c").unwrap();
        assert_eq!(encode(&rda, &RdaOptions::new()), "|\\|a||c");
    }

    #[test]
    fn test_escapes_against_all_levels() {
        let mut rda = Rda::new();
        rda.set_value_at(&[0, 0], "x;y|z").unwrap();
        rda.set_value_at(&[0, 1], "w").unwrap();
        assert_eq!(encode(&rda, &RdaOptions::new()), "|;\\|x\\;y\\|z;w");
    }

    #[test]
    fn test_subtree_uses_its_own_levels() {
        let rda = Rda::parse("|;,\\|a,b;c|d");
        let child = rda.child(0).unwrap();
        assert_eq!(encode(child, &RdaOptions::new()), ";,\\;a,b;c");
        assert_eq!(payload(child, &RdaOptions::new()), "a,b;c");
    }

    #[test]
    fn test_formatted_sections() {
        let rda = Rda::parse("|;\\|SEC0|SEC1||SEC3");
        assert_eq!(
            encode(&rda, &RdaOptions::formatted()),
            "|;\\|\r\n \"SEC0\"\r\n|\"SEC1\"\r\n|\"\"\r\n|\"SEC3\""
        );
    }

    #[test]
    fn test_formatted_nested_indent() {
        let rda = Rda::parse("|;,\\|a,b;c|d");
        let options = RdaOptions::formatted().with_line_break(LineBreak::Lf);
        assert_eq!(
            encode(&rda, &options),
            "|;,\\|\n     \"a\"\n    ,\"b\"\n  ;\"c\"\n|\"d\""
        );
    }

    #[test]
    fn test_formatted_root_children_are_indented() {
        let rda = Rda::parse("|;,\\|a,b;c|d");
        assert_eq!(
            encode(&rda, &RdaOptions::formatted()),
            "|;,\\|\r\n     \"a\"\r\n    ,\"b\"\r\n  ;\"c\"\r\n|\"d\""
        );
        let single = Rda::parse("|;\\|a;b");
        assert_eq!(
            encode(&single, &RdaOptions::formatted()),
            "|;\\|\r\n   \"a\"\r\n;\"b\""
        );
    }

    #[test]
    fn test_formatted_custom_indent() {
        let rda = Rda::parse("|;\\|a;b|c");
        let options = RdaOptions::formatted()
            .with_indent(4)
            .with_line_break(LineBreak::Lf);
        assert_eq!(encode(&rda, &options), "|;\\|\n     \"a\"\n    ;\"b\"\n|\"c\"");
    }
}
