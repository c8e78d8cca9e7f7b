// Typst document generation.
// Template store + balanced extractor + literal builders feed the composer;
// the compiler adapter turns the composed source into a PDF.

pub mod compiler;
pub mod composer;
pub mod escape;
pub mod extractor;
pub mod template_store;

use std::path::PathBuf;

use thiserror::Error;

pub use compiler::{CompileError, DocumentCompiler, TypstCli};
pub use composer::{compose, ComposedMarkup};
pub use template_store::{TemplateId, TemplateStore};

/// Structural failures while turning answers into Typst source.
///
/// Only `UnknownTemplate` can come from a request. The rest are deployment or
/// template-authoring defects.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown template '{given}'. Available: {}", TemplateId::names().join(", "))]
    UnknownTemplate { given: String },

    #[error("Template file '{file}' not found at {}", .path.display())]
    TemplateNotFound { file: String, path: PathBuf },

    #[error("Failed to read template file '{file}': {source}")]
    TemplateIo {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Could not extract the definition of '{function}' in {file} (scan stopped at byte {offset})"
    )]
    TemplateCorrupt {
        file: String,
        function: String,
        offset: usize,
        context: String,
    },
}
