// Conversational resume builder: scripted questions, answer capture,
// and PDF generation from the collected answers.

pub mod controller;
pub mod handlers;
pub mod questions;
