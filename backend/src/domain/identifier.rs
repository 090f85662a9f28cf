//! Random identifier generation.
//!
//! Identifiers are drawn uniformly from the 62-symbol alphanumeric alphabet.
//! They are short, so callers must insert with insert-if-absent semantics and
//! retry on collision.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::domain::ports::IdGenerator;

/// Length of generated identity identifiers.
pub const USER_ID_LENGTH: usize = 4;
/// Length of generated short-link identifiers.
pub const SHORT_ID_LENGTH: usize = 6;
/// Attempts made before giving up on finding an unused identifier.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 32;

/// Draw `length` characters uniformly from `[0-9A-Za-z]`.
pub fn random_alphanumeric<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// [`IdGenerator`] backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphanumericIdGenerator;

impl IdGenerator for AlphanumericIdGenerator {
    fn generate(&self, length: usize) -> String {
        random_alphanumeric(&mut rand::thread_rng(), length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;

    #[rstest]
    #[case(USER_ID_LENGTH)]
    #[case(SHORT_ID_LENGTH)]
    #[case(0)]
    fn produces_requested_length(#[case] length: usize) {
        let id = AlphanumericIdGenerator.generate(length);
        assert_eq!(id.len(), length);
        assert!(id.bytes().all(|byte| byte.is_ascii_alphanumeric()));
    }

    #[rstest]
    fn seeded_rng_is_deterministic() {
        let first = random_alphanumeric(&mut SmallRng::seed_from_u64(7), SHORT_ID_LENGTH);
        let second = random_alphanumeric(&mut SmallRng::seed_from_u64(7), SHORT_ID_LENGTH);
        assert_eq!(first, second);
    }

    #[rstest]
    fn draws_cover_the_whole_alphabet() {
        let mut rng = SmallRng::seed_from_u64(42);
        let sample = random_alphanumeric(&mut rng, 20_000);
        assert!(sample.bytes().any(|b| b.is_ascii_digit()));
        assert!(sample.bytes().any(|b| b.is_ascii_lowercase()));
        assert!(sample.bytes().any(|b| b.is_ascii_uppercase()));
        let distinct: std::collections::HashSet<u8> = sample.bytes().collect();
        assert_eq!(distinct.len(), 62);
    }
}
