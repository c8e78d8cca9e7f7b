//! Markup Composer: template definition + generated `#show` invocation.
//!
//! Output is a pure function of the template file on disk and the answers;
//! the same inputs always produce byte-identical source.

use tracing::{debug, warn};

use crate::models::answers::AnswerSet;
use crate::typst::escape::{
    escape_scalar, format_block, format_group, format_list, RecordGroup, CERTIFICATIONS,
    EDUCATION, EXPERIENCE,
};
use crate::typst::extractor::{extract_function, extract_with_marker};
use crate::typst::template_store::{TemplateDescriptor, TemplateId, TemplateStore};
use crate::typst::RenderError;

/// Answers a generated resume should not be missing. Absence is logged, not fatal.
pub const REQUIRED_KEYS: [&str; 1] = ["name"];

/// Bytes of template source kept on either side of a failed scan.
const CONTEXT_BEFORE: usize = 200;
const CONTEXT_AFTER: usize = 500;

/// How one template parameter is filled from the answers.
#[derive(Debug, Clone, Copy)]
enum Param {
    Scalar(&'static str),
    Block(&'static str),
    List(&'static str),
    Group(&'static RecordGroup),
}

impl Param {
    fn name(self) -> &'static str {
        match self {
            Param::Scalar(key) | Param::Block(key) | Param::List(key) => key,
            Param::Group(group) => group.param,
        }
    }

    fn literal(self, answers: &AnswerSet) -> String {
        match self {
            Param::Scalar(key) => escape_scalar(answers.get(key)),
            Param::Block(key) => format_block(answers.get(key)),
            Param::List(key) => format_list(answers.get(key)),
            Param::Group(group) => format_group(group, answers),
        }
    }
}

/// Parameters shared by every template family, in signature order.
const SHARED_PARAMS: [Param; 14] = [
    Param::Scalar("name"),
    Param::Scalar("trade"),
    Param::Scalar("phone"),
    Param::Scalar("email"),
    Param::Scalar("location"),
    Param::Scalar("license"),
    Param::Block("summary"),
    Param::List("technical_skills"),
    Param::List("safety_certs"),
    Param::Group(&EXPERIENCE),
    Param::Group(&CERTIFICATIONS),
    Param::Group(&EDUCATION),
    Param::Scalar("safety_record"),
    Param::List("achievements"),
];

const LINKEDIN: Param = Param::Scalar("linkedin");

/// A complete, self-contained Typst document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMarkup(String);

impl ComposedMarkup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Builds the Typst source for `template_id` filled with `answers`.
pub fn compose(
    store: &TemplateStore,
    template_id: &str,
    answers: &AnswerSet,
) -> Result<ComposedMarkup, RenderError> {
    let id: TemplateId = template_id.parse()?;
    let descriptor = id.descriptor();

    let source = store.read(descriptor.file_name)?;
    let definition = find_definition(&source, descriptor)?;

    let missing = answers.missing(&REQUIRED_KEYS);
    if !missing.is_empty() {
        warn!("Composing {id} resume without answers for: {}", missing.join(", "));
    }

    let invocation = invocation_clause(descriptor, answers);
    debug!(
        "Composed {id} resume: {} bytes definition, {} bytes invocation",
        definition.len(),
        invocation.len()
    );

    Ok(ComposedMarkup(format!("{definition}\n\n{invocation}")))
}

/// Primary balanced scan, then the banner-anchored fallback.
fn find_definition<'a>(
    source: &'a str,
    descriptor: &TemplateDescriptor,
) -> Result<&'a str, RenderError> {
    let function = descriptor.function_name;
    let err = match extract_function(source, function) {
        Ok(definition) => return Ok(definition),
        Err(err) => err,
    };

    if let Some(definition) = extract_with_marker(source, function) {
        warn!(
            "Balanced scan of {} failed ({err}); using banner-anchored definition",
            descriptor.file_name
        );
        return Ok(definition);
    }

    let anchor = err
        .offset()
        .or_else(|| source.find(&format!("#let {function}(")))
        .unwrap_or(0);

    Err(RenderError::TemplateCorrupt {
        file: descriptor.file_name.to_string(),
        function: function.to_string(),
        offset: anchor,
        context: context_around(source, anchor),
    })
}

fn invocation_clause(descriptor: &TemplateDescriptor, answers: &AnswerSet) -> String {
    let mut clause = format!("#show: {}.with(\n", descriptor.function_name);

    let linkedin = descriptor.takes_linkedin.then_some(LINKEDIN);
    for param in SHARED_PARAMS.iter().copied().chain(linkedin) {
        clause.push_str(&format!("  {}: {},\n", param.name(), param.literal(answers)));
    }

    clause.push_str(")\n");
    clause
}

fn context_around(source: &str, offset: usize) -> String {
    let mut start = offset.saturating_sub(CONTEXT_BEFORE);
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (offset + CONTEXT_AFTER).min(source.len());
    while !source.is_char_boundary(end) {
        end += 1;
    }
    source[start..end].to_string()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn shipped_store() -> TemplateStore {
        TemplateStore::unchecked(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates"))
    }

    fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn ravi() -> AnswerSet {
        answers(&[
            ("name", "Ravi Kumar"),
            ("trade", "Electrician"),
            ("technical_skills", "Wiring, Panel Upgrades"),
        ])
    }

    #[test]
    fn test_simple_end_to_end() {
        let store = shipped_store();
        let out = compose(&store, "Simple", &ravi()).unwrap().into_string();

        let source = store.read("simple-resume.typ").unwrap();
        let definition = extract_function(&source, "simple_resume").unwrap();

        assert!(out.starts_with(definition));
        assert!(out.contains("#show: simple_resume.with(\n"));
        assert!(out.contains("  name: \"Ravi Kumar\",\n"));
        assert!(out.contains("  trade: \"Electrician\",\n"));
        assert!(out.contains("  technical_skills: (\"Wiring\", \"Panel Upgrades\"),\n"));
        assert!(out.ends_with(")\n"));
    }

    #[test]
    fn test_every_parameter_present_even_when_unanswered() {
        let out = compose(&shipped_store(), "Modern", &AnswerSet::new()).unwrap();
        let out = out.as_str();
        for line in [
            "  name: \"\",",
            "  license: \"\",",
            "  summary: [],",
            "  safety_certs: (),",
            "  experience: (),",
            "  certifications: (),",
            "  education: (),",
            "  safety_record: \"\",",
            "  achievements: (),",
        ] {
            assert!(out.contains(line), "missing `{line}`");
        }
        assert!(!out.contains("linkedin:"));
    }

    #[test]
    fn test_linkedin_only_for_professional() {
        let data = answers(&[("linkedin", "linkedin.com/in/ravi")]);
        let out = compose(&shipped_store(), "Professional", &data).unwrap();
        assert!(out
            .as_str()
            .contains("  linkedin: \"linkedin.com/in/ravi\",\n)\n"));

        let out = compose(&shipped_store(), "Bold", &data).unwrap();
        assert!(!out.as_str().contains("linkedin"));
    }

    #[test]
    fn test_composition_is_deterministic() {
        let store = shipped_store();
        let mut data = ravi();
        data.insert("exp1_title", "Lineman");
        data.insert("exp2_title", "Helper");
        data.insert("cert1_name", "OSHA 30");
        data.insert("summary", "Ten years [field] work");
        for template in TemplateId::names() {
            let first = compose(&store, template, &data).unwrap();
            let second = compose(&store, template, &data).unwrap();
            assert_eq!(first, second, "{template} output differs between runs");
        }
    }

    #[test]
    fn test_parameter_order_is_fixed() {
        let out = compose(&shipped_store(), "Classic", &ravi()).unwrap();
        let out = out.as_str();
        let positions: Vec<usize> = SHARED_PARAMS
            .iter()
            .map(|p| out.find(&format!("\n  {}: ", p.name())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_unknown_template() {
        let err = compose(&shipped_store(), "Nonexistent", &AnswerSet::new()).unwrap_err();
        assert!(matches!(err, RenderError::UnknownTemplate { ref given } if given == "Nonexistent"));
        let message = err.to_string();
        for name in ["Modern", "Classic", "Professional", "Simple", "Bold", "Creative"] {
            assert!(message.contains(name));
        }
    }

    #[test]
    fn test_missing_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::unchecked(dir.path());
        let err = compose(&store, "Bold", &AnswerSet::new()).unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_corrupt_template_reports_offset_and_context() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("creative-resume.typ"),
            "// creative\n#let creative_resume(name: \"\") = {\n  if name != \"\" {\n",
        )
        .unwrap();
        let store = TemplateStore::unchecked(dir.path());

        let err = compose(&store, "Creative", &AnswerSet::new()).unwrap_err();
        match err {
            RenderError::TemplateCorrupt {
                file,
                function,
                offset,
                context,
            } => {
                assert_eq!(file, "creative-resume.typ");
                assert_eq!(function, "creative_resume");
                assert_eq!(offset, 45);
                assert!(context.contains("#let creative_resume("));
            }
            other => panic!("expected TemplateCorrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_header_missing_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bold-resume.typ"), "#let other() = { }").unwrap();
        let store = TemplateStore::unchecked(dir.path());
        let err = compose(&store, "Bold", &AnswerSet::new()).unwrap_err();
        assert!(matches!(err, RenderError::TemplateCorrupt { offset: 0, .. }));
    }

    #[test]
    fn test_fallback_definition_is_used() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("simple-resume.typ"),
            "#let simple_resume(body) = {\n  [Driver's License]\n  body\n}\n\n// ========\n// EXAMPLE USAGE\n",
        )
        .unwrap();
        let store = TemplateStore::unchecked(dir.path());
        let out = compose(&store, "Simple", &ravi()).unwrap();
        assert!(out
            .as_str()
            .starts_with("#let simple_resume(body) = {\n  [Driver's License]\n  body\n}\n\n#show:"));
    }

    #[test]
    fn test_user_text_cannot_escape_literals() {
        let data = answers(&[
            ("name", "Bob\", evil: \"x"),
            ("summary", "] #read(\"/etc/passwd\") ["),
        ]);
        let out = compose(&shipped_store(), "Simple", &data).unwrap();
        assert!(out.as_str().contains("  name: \"Bob\\\", evil: \\\"x\",\n"));
        assert!(out
            .as_str()
            .contains("  summary: [\\] \\#read(\"/etc/passwd\") \\[],\n"));
    }
}
