//! Template registry and on-disk template reader.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info};

use crate::typst::extractor::{extract_function, extract_with_marker};
use crate::typst::RenderError;

/// The six resume layouts. Every variant has exactly one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Modern,
    Classic,
    Professional,
    Simple,
    Bold,
    Creative,
}

/// File and exposed function backing a template family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub file_name: &'static str,
    pub function_name: &'static str,
    /// Only the Professional family renders a LinkedIn line.
    pub takes_linkedin: bool,
}

const DESCRIPTORS: [TemplateDescriptor; 6] = [
    TemplateDescriptor {
        id: TemplateId::Modern,
        file_name: "modern-template.typ",
        function_name: "modern_resume",
        takes_linkedin: false,
    },
    TemplateDescriptor {
        id: TemplateId::Classic,
        file_name: "classic-resume.typ",
        function_name: "classic_resume",
        takes_linkedin: false,
    },
    TemplateDescriptor {
        id: TemplateId::Professional,
        file_name: "professional-resume.typ",
        function_name: "professional_resume",
        takes_linkedin: true,
    },
    TemplateDescriptor {
        id: TemplateId::Simple,
        file_name: "simple-resume.typ",
        function_name: "simple_resume",
        takes_linkedin: false,
    },
    TemplateDescriptor {
        id: TemplateId::Bold,
        file_name: "bold-resume.typ",
        function_name: "bold_resume",
        takes_linkedin: false,
    },
    TemplateDescriptor {
        id: TemplateId::Creative,
        file_name: "creative-resume.typ",
        function_name: "creative_resume",
        takes_linkedin: false,
    },
];

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::Modern,
        TemplateId::Classic,
        TemplateId::Professional,
        TemplateId::Simple,
        TemplateId::Bold,
        TemplateId::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Modern => "Modern",
            TemplateId::Classic => "Classic",
            TemplateId::Professional => "Professional",
            TemplateId::Simple => "Simple",
            TemplateId::Bold => "Bold",
            TemplateId::Creative => "Creative",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|id| id.as_str()).collect()
    }

    pub fn descriptor(self) -> &'static TemplateDescriptor {
        // DESCRIPTORS is declared in ALL order
        &DESCRIPTORS[self as usize]
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RenderError::UnknownTemplate {
                given: s.to_string(),
            })
    }
}

/// Directory of `.typ` templates. Files are read per request; nothing is cached.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    /// Opens the store and checks that every descriptor's file exists and
    /// yields its function definition. Fails on the first broken template.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let store = Self { root: root.into() };

        for id in TemplateId::ALL {
            let descriptor = id.descriptor();
            let source = store.read(descriptor.file_name)?;

            if let Err(e) = extract_function(&source, descriptor.function_name) {
                if extract_with_marker(&source, descriptor.function_name).is_none() {
                    return Err(RenderError::TemplateCorrupt {
                        file: descriptor.file_name.to_string(),
                        function: descriptor.function_name.to_string(),
                        offset: e.offset().unwrap_or(0),
                        context: e.to_string(),
                    });
                }
            }
            debug!("Template {id} validated ({})", descriptor.file_name);
        }

        info!(
            "Template store ready at {} ({} templates)",
            store.root.display(),
            TemplateId::ALL.len()
        );
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn unchecked(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read(&self, file_name: &str) -> Result<String, RenderError> {
        read_template(&self.root, file_name)
    }
}

/// Reads `root/file_name` and normalizes it for the compiler.
pub fn read_template(root: &Path, file_name: &str) -> Result<String, RenderError> {
    let path = root.join(file_name);
    let raw = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RenderError::TemplateNotFound {
            file: file_name.to_string(),
            path: path.clone(),
        },
        _ => RenderError::TemplateIo {
            file: file_name.to_string(),
            source: e,
        },
    })?;

    debug!("Read template {} ({} bytes)", path.display(), raw.len());
    Ok(normalize(&raw))
}

/// BOM stripped, NBSP → space, CRLF/CR → LF, authoring `\s` markers removed.
pub fn normalize(raw: &str) -> String {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let text = text
        .replace('\u{a0}', " ")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
            }
            Some('\\') => {
                chars.next();
                out.push_str("\\\\");
            }
            _ => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped_templates() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
    }

    #[test]
    fn test_parse_known_ids() {
        for name in ["Modern", "Classic", "Professional", "Simple", "Bold", "Creative"] {
            let id: TemplateId = name.parse().unwrap();
            assert_eq!(id.as_str(), name);
            assert_eq!(id.descriptor().id, id);
        }
    }

    #[test]
    fn test_unknown_id_lists_all_names() {
        let err = "modern".parse::<TemplateId>().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, RenderError::UnknownTemplate { .. }));
        assert!(message.contains("'modern'"));
        assert!(message.contains("Modern, Classic, Professional, Simple, Bold, Creative"));
    }

    #[test]
    fn test_descriptor_naming_convention() {
        assert_eq!(TemplateId::Modern.descriptor().file_name, "modern-template.typ");
        assert_eq!(TemplateId::Simple.descriptor().function_name, "simple_resume");
        let with_linkedin: Vec<_> = TemplateId::ALL
            .into_iter()
            .filter(|id| id.descriptor().takes_linkedin)
            .collect();
        assert_eq!(with_linkedin, vec![TemplateId::Professional]);
    }

    #[test]
    fn test_normalize_cleans_invisible_characters() {
        let raw = "\u{feff}#let f() = {\r\n  [a\u{a0}b]\r}\r\n";
        assert_eq!(normalize(raw), "#let f() = {\n  [a b]\n}\n");
    }

    #[test]
    fn test_normalize_strips_authoring_markers_only() {
        assert_eq!(normalize(r"let x\s = 1"), "let x = 1");
        assert_eq!(normalize(r#""a\\s" \n"#), r#""a\\s" \n"#);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_template(dir.path(), "nope.typ").unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound { ref file, .. } if file == "nope.typ"));
    }

    #[test]
    fn test_read_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.typ"), "\u{feff}a\r\nb").unwrap();
        assert_eq!(read_template(dir.path(), "t.typ").unwrap(), "a\nb");
    }

    #[test]
    fn test_open_validates_shipped_templates() {
        let store = TemplateStore::open(shipped_templates()).unwrap();
        assert_eq!(store.root(), shipped_templates().as_path());
    }

    #[test]
    fn test_open_fails_when_a_template_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_open_fails_on_corrupt_template() {
        let dir = tempfile::tempdir().unwrap();
        for id in TemplateId::ALL {
            let d = id.descriptor();
            let body = if id == TemplateId::Bold {
                format!("#let {}() = {{\n  [unclosed\n", d.function_name)
            } else {
                format!("#let {}(body) = {{\n  body\n}}\n", d.function_name)
            };
            std::fs::write(dir.path().join(d.file_name), body).unwrap();
        }
        let err = TemplateStore::open(dir.path()).unwrap_err();
        match err {
            RenderError::TemplateCorrupt { file, .. } => assert_eq!(file, "bold-resume.typ"),
            other => panic!("expected TemplateCorrupt, got {other:?}"),
        }
    }
}
