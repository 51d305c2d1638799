pub mod check;
pub mod summarize;
