pub mod demo;
pub mod json;

/// Result of a command that completed without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Equal,
    Different,
}
