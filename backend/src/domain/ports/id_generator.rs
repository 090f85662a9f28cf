//! Driven port for random identifier generation.

/// Source of candidate identifiers.
///
/// Output must be ASCII alphanumeric and exactly `length` characters long.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// Produce a candidate identifier.
    fn generate(&self, length: usize) -> String;
}
