//! Answer recording and question sequencing.

use crate::flow::questions::Catalog;
use crate::models::answers::AnswerSet;

/// Answer that declines the current question.
const SKIP: &str = "skip";

/// Skipping one of these questions skips the rest of its optional section.
const SKIP_AHEAD: [(&str, &str); 4] = [
    ("exp2_title", "cert1_name"),
    ("cert1_name", "edu1_degree"),
    ("cert2_name", "edu1_degree"),
    ("edu2_degree", "safety_record"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Next { index: usize, prompt: &'static str },
    Complete { index: usize, message: &'static str },
}

impl Step {
    pub fn index(&self) -> usize {
        match self {
            Step::Next { index, .. } | Step::Complete { index, .. } => *index,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Step::Complete { .. })
    }

    pub fn text(&self) -> &'static str {
        match self {
            Step::Next { prompt, .. } => *prompt,
            Step::Complete { message, .. } => *message,
        }
    }
}

pub fn is_skip(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(SKIP)
}

/// What to ask at `index` without recording anything.
pub fn step_at(catalog: &Catalog, index: usize) -> Step {
    match catalog.questions.get(index) {
        Some(question) => Step::Next {
            index,
            prompt: question.prompt,
        },
        None => Step::Complete {
            index,
            message: catalog.completion_message,
        },
    }
}

/// Records `answer` for the question at `index` and returns what comes next.
///
/// A skip is never stored. An index already past the end leaves `answers`
/// untouched.
pub fn advance(catalog: &Catalog, index: usize, answer: &str, answers: &mut AnswerSet) -> Step {
    let Some(question) = catalog.questions.get(index) else {
        return step_at(catalog, index);
    };

    let next = if is_skip(answer) {
        SKIP_AHEAD
            .iter()
            .find(|(from, _)| *from == question.key)
            .and_then(|(_, to)| catalog.position(to))
            .unwrap_or(index + 1)
    } else {
        answers.insert(question.key, answer.trim());
        index + 1
    };

    step_at(catalog, next)
}
