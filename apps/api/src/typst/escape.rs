//! Typst literal builders.
//!
//! Every user-supplied value that reaches a composed document passes through
//! one of these functions. They are total: any input yields a valid literal,
//! and an empty input yields an empty literal rather than an omitted field.

use crate::models::answers::AnswerSet;

/// How a single record field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Quoted string literal. Always emitted, empty string if unanswered.
    Text,
    /// Comma-separated answer rendered as an array of strings.
    List,
    /// Quoted string literal, omitted from the record when empty.
    OptionalText,
}

/// One field of a repeatable record: `name` in the Typst dictionary,
/// read from answer key `{prefix}{index}_{suffix}`.
#[derive(Debug, Clone, Copy)]
pub struct RecordField {
    pub name: &'static str,
    pub suffix: &'static str,
    pub kind: FieldKind,
}

/// A repeatable section with a fixed maximum cardinality.
///
/// The first field is the probe: an index whose probe answer is blank is
/// skipped entirely.
#[derive(Debug, Clone, Copy)]
pub struct RecordGroup {
    pub param: &'static str,
    pub prefix: &'static str,
    pub max_count: usize,
    pub fields: &'static [RecordField],
}

const fn text(name: &'static str) -> RecordField {
    RecordField {
        name,
        suffix: name,
        kind: FieldKind::Text,
    }
}

pub const EXPERIENCE: RecordGroup = RecordGroup {
    param: "experience",
    prefix: "exp",
    max_count: 3,
    fields: &[
        text("title"),
        text("company"),
        text("location"),
        text("dates"),
        RecordField {
            name: "responsibilities",
            suffix: "responsibilities",
            kind: FieldKind::List,
        },
    ],
};

pub const CERTIFICATIONS: RecordGroup = RecordGroup {
    param: "certifications",
    prefix: "cert",
    max_count: 3,
    fields: &[
        text("name"),
        text("issuer"),
        RecordField {
            name: "date",
            suffix: "date",
            kind: FieldKind::OptionalText,
        },
    ],
};

pub const EDUCATION: RecordGroup = RecordGroup {
    param: "education",
    prefix: "edu",
    max_count: 2,
    fields: &[
        text("degree"),
        text("institution"),
        text("location"),
        text("year"),
    ],
};

/// Quoted string literal. Backslashes are escaped before quotes.
pub fn escape_scalar(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    out.push_str(&s.replace('\\', "\\\\").replace('"', "\\\""));
    out.push('"');
    out
}

/// `"a, , b"` → `("a", "b")`. Blank items are dropped.
pub fn format_list(comma_separated: &str) -> String {
    let items: Vec<String> = comma_separated
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(escape_scalar)
        .collect();

    match items.len() {
        0 => "()".to_string(),
        // `("x")` is a parenthesized string in Typst, not an array
        1 => format!("({},)", items[0]),
        _ => format!("({})", items.join(", ")),
    }
}

/// Wraps free text in a content block.
///
/// Escapes the block delimiters, backslashes, and the characters that would
/// switch markup into code (`#`), math (`$`), references (`@`), comments
/// (`//`, `/*`) or unterminated emphasis and raw spans (`*`, `_`, `` ` ``).
/// Quotes are plain text inside markup and stay as they are.
pub fn format_block(text: &str) -> String {
    let text = text.trim();
    let mut out = String::with_capacity(text.len() + 2);
    out.push('[');

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' | '[' | ']' | '#' | '$' | '@' | '*' | '_' | '`' => {
                out.push('\\');
                out.push(c);
            }
            '/' if matches!(chars.peek(), Some('/') | Some('*')) => out.push_str("\\/"),
            _ => out.push(c),
        }
    }

    out.push(']');
    out
}

/// Builds the array literal for a repeatable section.
///
/// Indices `1..=max_count` are evaluated independently: a blank probe skips
/// that index only, and present indices keep their own answers (no
/// renumbering, no stop-on-first-gap).
pub fn format_record_group(
    prefix: &str,
    answers: &AnswerSet,
    max_count: usize,
    fields: &[RecordField],
) -> String {
    let Some(probe) = fields.first() else {
        return "()".to_string();
    };

    let mut out = String::from("(\n");
    let mut emitted = 0;
    for index in 1..=max_count {
        let key = |suffix: &str| format!("{prefix}{index}_{suffix}");

        if answers.get(&key(probe.suffix)).trim().is_empty() {
            continue;
        }

        out.push_str("  (\n");
        for field in fields {
            let value = answers.get(&key(field.suffix));
            let literal = match field.kind {
                FieldKind::Text => escape_scalar(value),
                FieldKind::List => format_list(value),
                FieldKind::OptionalText if value.trim().is_empty() => continue,
                FieldKind::OptionalText => escape_scalar(value.trim()),
            };
            out.push_str(&format!("    {}: {},\n", field.name, literal));
        }
        out.push_str("  ),\n");
        emitted += 1;
    }

    if emitted == 0 {
        return "()".to_string();
    }
    out.push(')');
    out
}

/// Convenience wrapper over a static group definition.
pub fn format_group(group: &RecordGroup, answers: &AnswerSet) -> String {
    format_record_group(group.prefix, answers, group.max_count, group.fields)
}
