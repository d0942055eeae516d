//! Error types surfaced by the bar APIs.

use bossbar_domain::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum BarError {
    /// Percent, progress or duration outside its allowed range.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),
}
