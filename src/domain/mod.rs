pub mod change;
pub mod prompt;
