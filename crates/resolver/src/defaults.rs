use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::hash::{Hash, Hasher};

/// Deterministic generator for schema-valid scalar defaults.
///
/// Every value is a pure function of `(seed, scalar type name, field path)`:
/// the three are hashed into an rng seed, so a given field in a given query
/// resolves to the same value on every call and every run. Changing the
/// session seed changes all generated values at once.
#[derive(Debug, Clone, Copy)]
pub struct DefaultValueGenerator {
    seed: u64,
}

/// Plain words used to build readable string defaults.
const WORDS: &[&str] = &[
    "alder", "basin", "cedar", "delta", "ember", "fjord", "garnet", "harbor",
    "iris", "juniper", "krill", "lumen", "maple", "nectar", "onyx", "prairie",
    "quartz", "reef", "sable", "tundra", "umber", "vale", "willow", "zephyr",
];

impl DefaultValueGenerator {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// A seeded rng scoped to one (type, path) pair. Public so callers can
    /// derive their own deterministic values (e.g. baseline person mocks).
    #[must_use]
    pub fn rng(&self, type_name: &str, path: &str) -> StdRng {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.seed.hash(&mut hasher);
        type_name.hash(&mut hasher);
        path.hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }

    /// A built-in default for a scalar type, or `None` when the scalar has
    /// no generatable default (custom scalars must be mocked).
    #[must_use]
    pub fn scalar(&self, type_name: &str, path: &str) -> Option<serde_json::Value> {
        let mut rng = self.rng(type_name, path);
        match type_name {
            "String" => Some(json!(self.word_pair(&mut rng))),
            "ID" => Some(json!(hex_token(&mut rng, 16))),
            "Int" => Some(json!(rng.random_range(0..=1000))),
            "Float" => {
                let scaled: i64 = rng.random_range(0..=100_000);
                #[allow(clippy::cast_precision_loss)]
                let value = scaled as f64 / 100.0;
                Some(json!(value))
            }
            "Boolean" => Some(json!(rng.random::<bool>())),
            _ if is_date_like(type_name) => Some(json!(iso_timestamp(&mut rng))),
            _ => None,
        }
    }

    /// A deterministic pick from an enum's declared values.
    #[must_use]
    pub fn enum_value<'a>(
        &self,
        values: impl ExactSizeIterator<Item = &'a str>,
        type_name: &str,
        path: &str,
    ) -> Option<String> {
        let len = values.len();
        if len == 0 {
            return None;
        }
        let mut rng = self.rng(type_name, path);
        let index = rng.random_range(0..len);
        values.into_iter().nth(index).map(ToOwned::to_owned)
    }

    /// A lowercase word from the built-in list.
    #[must_use]
    pub fn word(&self, scope: &str, path: &str) -> &'static str {
        let mut rng = self.rng(scope, path);
        WORDS[rng.random_range(0..WORDS.len())]
    }

    fn word_pair(&self, rng: &mut StdRng) -> String {
        let first = WORDS[rng.random_range(0..WORDS.len())];
        let second = WORDS[rng.random_range(0..WORDS.len())];
        format!("{first}-{second}")
    }
}

/// Scalar names treated as timestamps.
fn is_date_like(type_name: &str) -> bool {
    matches!(type_name, "DateTime" | "Date" | "Time")
        || type_name.ends_with("Time")
        || type_name.ends_with("Date")
        || type_name.ends_with("Timestamp")
}

fn hex_token(rng: &mut StdRng, len: usize) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    (0..len)
        .map(|_| HEX[rng.random_range(0..HEX.len())] as char)
        .collect()
}

/// A schema-valid ISO-8601 timestamp with day clamped to 28 so every
/// month/day combination is real.
fn iso_timestamp(rng: &mut StdRng) -> String {
    let year = rng.random_range(2020..=2024);
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=28);
    let hour = rng.random_range(0..24);
    let minute = rng.random_range(0..60);
    let second = rng.random_range(0..60);
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_output() {
        let generator = DefaultValueGenerator::new(7);
        assert_eq!(
            generator.scalar("String", "currentUser.name"),
            generator.scalar("String", "currentUser.name"),
        );
    }

    #[test]
    fn different_paths_different_output() {
        let generator = DefaultValueGenerator::new(7);
        assert_ne!(
            generator.scalar("ID", "a.id"),
            generator.scalar("ID", "b.id"),
        );
    }

    #[test]
    fn different_seeds_different_output() {
        let a = DefaultValueGenerator::new(1);
        let b = DefaultValueGenerator::new(2);
        assert_ne!(a.scalar("Int", "x"), b.scalar("Int", "x"));
    }

    #[test]
    fn unknown_scalar_has_no_default() {
        let generator = DefaultValueGenerator::new(0);
        assert_eq!(generator.scalar("JSONCString", "x"), None);
    }

    #[test]
    fn date_like_scalars_format_as_iso() {
        let generator = DefaultValueGenerator::new(0);
        let value = generator.scalar("DateTime", "signature.date").unwrap();
        let text = value.as_str().unwrap();
        assert_eq!(text.len(), 20);
        assert!(text.ends_with('Z'));
        assert_eq!(&text[4..5], "-");
    }
}
