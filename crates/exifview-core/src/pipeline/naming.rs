//! Random names for stored uploads.
//!
//! Names are drawn from a uniform, non-cryptographic PRNG. Nothing enforces
//! uniqueness: two uploads drawing the same name overwrite each other unless
//! collision checking is switched on, and even then concurrent uploads race.

use rand::Rng;
use std::path::Path;

/// Length of the random part of a stored name.
pub const NAME_LEN: usize = 16;

/// Symbols a stored name is drawn from.
pub const NAME_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Draws before giving up on finding an unused name.
const MAX_NAME_ATTEMPTS: usize = 8;

/// Generates stored file names.
pub struct NameGenerator {
    regenerate_on_collision: bool,
}

impl NameGenerator {
    pub fn new(regenerate_on_collision: bool) -> Self {
        Self {
            regenerate_on_collision,
        }
    }

    /// Draw a random 16-character `[a-z0-9]` string.
    pub fn random_stem<R: Rng + ?Sized>(rng: &mut R) -> String {
        (0..NAME_LEN)
            .map(|_| NAME_ALPHABET[rng.gen_range(0..NAME_ALPHABET.len())] as char)
            .collect()
    }

    /// Produce a file name for `dir` ending in the validated `extension`.
    pub fn generate(&self, dir: &Path, extension: &str) -> String {
        let mut rng = rand::thread_rng();
        let mut name = format!("{}{}", Self::random_stem(&mut rng), extension);
        if !self.regenerate_on_collision {
            return name;
        }

        for attempt in 1..MAX_NAME_ATTEMPTS {
            if !dir.join(&name).exists() {
                break;
            }
            tracing::debug!(attempt, name = %name, "Generated name already taken, drawing again");
            name = format!("{}{}", Self::random_stem(&mut rng), extension);
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_valid_stem(stem: &str) -> bool {
        stem.len() == NAME_LEN
            && stem
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    }

    #[test]
    fn test_stem_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(is_valid_stem(&NameGenerator::random_stem(&mut rng)));
        }
    }

    #[test]
    fn test_generate_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let name = NameGenerator::new(false).generate(dir.path(), ".jpeg");
        let stem = name.strip_suffix(".jpeg").unwrap();
        assert!(is_valid_stem(stem));
        assert!(!name.contains('/') && !name.contains('\\') && !name.contains(".."));
    }

    #[test]
    fn test_alphabet_is_covered() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 36];
        for _ in 0..200 {
            for b in NameGenerator::random_stem(&mut rng).bytes() {
                let idx = NAME_ALPHABET.iter().position(|&a| a == b).unwrap();
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_regenerate_on_collision_returns_unused_name() {
        let dir = tempfile::tempdir().unwrap();
        let generator = NameGenerator::new(true);
        let first = generator.generate(dir.path(), ".jpg");
        std::fs::write(dir.path().join(&first), b"x").unwrap();

        let second = generator.generate(dir.path(), ".jpg");
        assert!(!dir.path().join(&second).exists());
    }
}
