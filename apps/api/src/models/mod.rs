pub mod answers;
pub mod resume;
