//! Balanced-delimiter extraction of `#let name(...) = { ... }` definitions.
//!
//! Function bodies nest braces arbitrarily and may carry braces inside string
//! literals, so the end of a definition is found by scanning with depth
//! counters rather than pattern matching. A definition that never balances is
//! rejected; a truncated definition is never returned.

use thiserror::Error;

/// Where and why a scan gave up. Offsets are byte offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("header '#let {0}(' not found")]
    HeaderNotFound(String),

    #[error("parameter list never closes (from byte {offset})")]
    UnclosedParameters { offset: usize },

    #[error("expected '=' after the parameter list at byte {offset}")]
    MissingAssignment { offset: usize },

    #[error("expected '{{' to open the body at byte {offset}")]
    MissingBody { offset: usize },

    #[error("body brace opened at byte {offset} is never closed")]
    UnbalancedBody { offset: usize },
}

impl ExtractError {
    pub fn offset(&self) -> Option<usize> {
        match self {
            ExtractError::HeaderNotFound(_) => None,
            ExtractError::UnclosedParameters { offset }
            | ExtractError::MissingAssignment { offset }
            | ExtractError::MissingBody { offset }
            | ExtractError::UnbalancedBody { offset } => Some(*offset),
        }
    }
}

/// Returns the exact text of `#let {name}(...) = { ... }`, from the `#let`
/// through the brace that closes the body.
pub fn extract_function<'a>(source: &'a str, name: &str) -> Result<&'a str, ExtractError> {
    let header = format!("#let {name}(");
    let start = source
        .find(&header)
        .ok_or_else(|| ExtractError::HeaderNotFound(name.to_string()))?;
    let bytes = source.as_bytes();

    let params_start = start + header.len();
    let mut pos = scan_balanced(bytes, params_start, b'(', b')')
        .ok_or(ExtractError::UnclosedParameters { offset: params_start })?;

    pos = skip_whitespace(source, pos);
    if bytes.get(pos) != Some(&b'=') {
        return Err(ExtractError::MissingAssignment { offset: pos });
    }
    pos = skip_whitespace(source, pos + 1);
    if bytes.get(pos) != Some(&b'{') {
        return Err(ExtractError::MissingBody { offset: pos });
    }

    let end = scan_balanced(bytes, pos + 1, b'{', b'}')
        .ok_or(ExtractError::UnbalancedBody { offset: pos })?;

    Ok(&source[start..end])
}

/// Secondary match for first-party templates that end each definition with a
/// banner line followed by `// EXAMPLE USAGE` or `// CUSTOMIZATION INSTRUCTIONS`.
///
/// Returns everything from the header through the last line consisting only
/// of `}` before that banner.
pub fn extract_with_marker<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    let start = source.find(&format!("#let {name}("))?;
    let tail = &source[start..];

    let mut offset = 0;
    let mut prev_banner = false;
    let mut marker_at = None;
    for line in tail.split_inclusive('\n') {
        let trimmed = line.trim();
        if prev_banner
            && (trimmed.starts_with("// EXAMPLE USAGE")
                || trimmed.starts_with("// CUSTOMIZATION INSTRUCTIONS"))
        {
            marker_at = Some(offset);
            break;
        }
        prev_banner = trimmed.starts_with("// ====");
        offset += line.len();
    }

    let region = &tail[..marker_at?];
    let mut end = None;
    let mut offset = 0;
    for line in region.split_inclusive('\n') {
        if line.trim() == "}" {
            end = Some(offset + line.find('}')? + 1);
        }
        offset += line.len();
    }

    end.map(|end| &tail[..end])
}

/// Scans from `pos` (just past an `open` byte) until depth returns to zero.
/// Returns the index one past the matching `close`.
///
/// String literals (`"` or `'`) suspend depth tracking; a backslash inside a
/// string escapes the following byte. Comments outside strings are skipped,
/// except `//` directly after `:` which is a URL scheme. Block comments nest.
fn scan_balanced(bytes: &[u8], mut pos: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;

    while pos < bytes.len() {
        let b = bytes[pos];

        if let Some(q) = quote {
            if b == b'\\' {
                pos += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            pos += 1;
            continue;
        }

        match b {
            b'"' | b'\'' => quote = Some(b),
            b'/' if bytes.get(pos + 1) == Some(&b'/') && (pos == 0 || bytes[pos - 1] != b':') => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                }
                continue;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                pos = skip_block_comment(bytes, pos + 2)?;
                continue;
            }
            _ if b == open => depth += 1,
            _ if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + 1);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Returns the index one past the `*/` that closes a block comment opened
/// just before `pos`, or `None` if the comment never closes.
fn skip_block_comment(bytes: &[u8], mut pos: usize) -> Option<usize> {
    let mut depth = 1usize;
    while pos + 1 < bytes.len() {
        match (bytes[pos], bytes[pos + 1]) {
            (b'/', b'*') => {
                depth += 1;
                pos += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                pos += 2;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => pos += 1,
        }
    }
    None
}

fn skip_whitespace(source: &str, pos: usize) -> usize {
    let rest = &source[pos..];
    pos + (rest.len() - rest.trim_start().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"// header comment
#let greet(name: "") = {
  let x = (a: 1)
  if name != "" { [Hello #name] } else { [Hello] }
}

#greet(name: "x")
"#;

    #[test]
    fn test_extracts_nested_braces() {
        let def = extract_function(SIMPLE, "greet").unwrap();
        assert!(def.starts_with("#let greet("));
        assert!(def.ends_with("else { [Hello] }\n}"));
        assert!(!def.contains("#greet(name"));
    }

    #[test]
    fn test_brace_inside_string_does_not_count() {
        let src = "#let f(a: 1) = {\n  let open = \"{\"\n  let close = \"}}\"\n  open + close\n}\ntrailing }";
        let def = extract_function(src, "f").unwrap();
        assert!(def.contains("let open = \"{\""));
        assert!(def.ends_with("open + close\n}"));
    }

    #[test]
    fn test_escaped_quote_keeps_string_open() {
        let src = "#let f() = {\n  let s = \"a \\\" } b\"\n  s\n}\nafter";
        let def = extract_function(src, "f").unwrap();
        assert!(def.ends_with("  s\n}"));
    }

    #[test]
    fn test_escaped_backslash_closes_string() {
        let src = "#let f() = {\n  let s = \"path\\\\\"\n  s\n}";
        assert_eq!(extract_function(src, "f").unwrap(), src);
    }

    #[test]
    fn test_single_quote_strings() {
        let src = "#let f() = {\n  let s = '}'\n  s\n}";
        assert_eq!(extract_function(src, "f").unwrap(), src);
    }

    #[test]
    fn test_paren_inside_default_string() {
        let src = "#let f(sep: \")\", n: (1, 2)) = {\n  sep\n}";
        assert_eq!(extract_function(src, "f").unwrap(), src);
    }

    #[test]
    fn test_comments_are_skipped() {
        let src = "#let f() = {\n  // don't close } here\n  /* or { here */\n  link(\"https://x.io\")\n  [see https://y.io]\n}";
        assert_eq!(extract_function(src, "f").unwrap(), src);
    }

    #[test]
    fn test_nested_block_comment_hides_brace() {
        let src = "#let f() = {\n  /* outer /* inner */ } */\n  1\n}\nafter }";
        let def = extract_function(src, "f").unwrap();
        assert!(def.ends_with("  1\n}"));
        assert!(!def.contains("after"));
    }

    #[test]
    fn test_unclosed_nested_comment_is_rejected() {
        let src = "#let f() = {\n  /* outer /* inner */ }\n";
        let err = extract_function(src, "f").unwrap_err();
        assert_eq!(err, ExtractError::UnbalancedBody { offset: 11 });
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            extract_function(SIMPLE, "other"),
            Err(ExtractError::HeaderNotFound("other".to_string()))
        );
    }

    #[test]
    fn test_header_requires_exact_name() {
        let src = "#let greet_all() = { 1 }";
        assert!(extract_function(src, "greet").is_err());
    }

    #[test]
    fn test_unbalanced_body_is_rejected() {
        let src = "#let f() = {\n  if true { [x] }\n";
        let err = extract_function(src, "f").unwrap_err();
        assert_eq!(err, ExtractError::UnbalancedBody { offset: 11 });
    }

    #[test]
    fn test_unclosed_parameters() {
        let err = extract_function("#let f(a: (1, 2) = { }", "f").unwrap_err();
        assert!(matches!(err, ExtractError::UnclosedParameters { .. }));
    }

    #[test]
    fn test_missing_assignment() {
        let err = extract_function("#let f(a)\n  { }", "f").unwrap_err();
        assert_eq!(err, ExtractError::MissingAssignment { offset: 12 });
    }

    #[test]
    fn test_missing_body_brace() {
        let err = extract_function("#let f(a) = [content]", "f").unwrap_err();
        assert_eq!(err, ExtractError::MissingBody { offset: 12 });
        assert_eq!(err.offset(), Some(12));
    }

    #[test]
    fn test_marker_fallback() {
        // An apostrophe in markup opens a string for the primary scanner
        let src = "#let f() = {\n  [Driver's License]\n  if true {\n    1\n  }\n}\n\n// ============================================\n// EXAMPLE USAGE\n// #show: f.with()\n";
        assert!(extract_function(src, "f").is_err());

        let def = extract_with_marker(src, "f").unwrap();
        assert!(def.starts_with("#let f() = {"));
        assert!(def.ends_with("    1\n  }\n}"));
    }

    #[test]
    fn test_marker_fallback_requires_banner() {
        let src = "#let f() = {\n  1\n}\n// EXAMPLE USAGE\n";
        assert_eq!(extract_with_marker(src, "f"), None);
    }
}
