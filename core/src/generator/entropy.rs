use rand::rngs::{SmallRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Randomness behind deck shuffles.
///
/// `Secure` is what a host should use whenever it can get seed material from a
/// cryptographic source, `Fallback` exists for hosts that only have a general purpose
/// generator at hand. `Seeded` replays a known seed, it is as predictable as the seed.
#[derive(Clone, Debug)]
pub enum Entropy {
    Secure(StdRng),
    Fallback(SmallRng),
    Seeded(StdRng),
}

impl Entropy {
    pub fn secure(seed: [u8; 32]) -> Self {
        Self::Secure(StdRng::from_seed(seed))
    }

    pub fn fallback(seed: u64) -> Self {
        Self::Fallback(SmallRng::seed_from_u64(seed))
    }

    /// Deterministic source, for tests and replaying a known seed. Never reported as secure.
    pub fn from_seed(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Uses the cryptographic seed when there is one, otherwise asks for a weaker seed.
    pub fn prefer_secure(
        secure_seed: Option<[u8; 32]>,
        fallback_seed: impl FnOnce() -> u64,
    ) -> Self {
        match secure_seed {
            Some(seed) => Self::secure(seed),
            None => {
                log::warn!(
                    "No cryptographic entropy available, shuffling with a fallback generator"
                );
                Self::fallback(fallback_seed())
            }
        }
    }

    pub const fn is_secure(&self) -> bool {
        matches!(self, Self::Secure(_))
    }
}

impl RngCore for Entropy {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Secure(rng) | Self::Seeded(rng) => rng.next_u32(),
            Self::Fallback(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Self::Secure(rng) | Self::Seeded(rng) => rng.next_u64(),
            Self::Fallback(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        match self {
            Self::Secure(rng) | Self::Seeded(rng) => rng.fill_bytes(dst),
            Self::Fallback(rng) => rng.fill_bytes(dst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_the_cryptographic_seed() {
        let entropy = Entropy::prefer_secure(Some([7; 32]), || unreachable!());
        assert!(entropy.is_secure());

        let entropy = Entropy::prefer_secure(None, || 42);
        assert!(!entropy.is_secure());
    }

    #[test]
    fn replayed_seeds_are_not_secure() {
        assert!(!Entropy::from_seed(42).is_secure());
        assert!(Entropy::secure([0; 32]).is_secure());
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Entropy::from_seed(9);
        let mut b = Entropy::from_seed(9);

        assert_eq!(a.next_u64(), b.next_u64());
        assert_eq!(a.next_u32(), b.next_u32());
    }
}
