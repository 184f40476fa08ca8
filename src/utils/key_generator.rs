//! Short key generation.
//!
//! Keys are fixed-length strings drawn uniformly from a 62-symbol alphanumeric
//! alphabet. No uniqueness check is performed here: the same key may be
//! produced twice, and callers must live with that.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Symbols a short key is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every generated short key.
pub const SHORT_KEY_LENGTH: usize = 6;

/// Source of short keys.
///
/// Implementations must be safe to call from many requests at once.
///
/// # Implementations
///
/// - [`RandomKeyGenerator`] - process-wide seeded PRNG
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait KeyGenerator: Send + Sync {
    /// Produces a key of exactly `length` characters from [`ALPHABET`].
    fn generate(&self, length: usize) -> String;
}

/// Key generator backed by a single shared, mutex-guarded PRNG.
///
/// The generator is constructed once at startup and injected into the
/// mapping service; every call advances the shared state.
pub struct RandomKeyGenerator {
    rng: Mutex<StdRng>,
}

impl RandomKeyGenerator {
    /// Seeds the PRNG from the current wall-clock time.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();

        Self::with_seed(seed)
    }

    /// Seeds the PRNG with an explicit value. Same seed, same key sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl KeyGenerator for RandomKeyGenerator {
    fn generate(&self, length: usize) -> String {
        // A panic while holding the lock cannot leave the RNG in a bad state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        (0..length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
