//! Randomized input fixtures
//!
//! Every scenario invocation draws fresh values from a `Fixtures` generator.
//! A seed makes a run reproducible; without one the generator is seeded from
//! system entropy.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Tax id that is deliberately not 14 digits long
pub const INVALID_CNPJ: &str = "12345";

/// Fruit price the API must reject
pub const NEGATIVE_FRUIT_VALUE: i64 = -15;

const CNPJ_MIN: u64 = 10_000_000_000_000;
const CNPJ_MAX: u64 = 99_999_999_999_999;

const LAST_NAMES: &[&str] = &[
    "Abbott", "Bauch", "Bernier", "Carroll", "Collins", "Dach", "Fadel", "Gislason", "Hahn",
    "Hermiston", "Jacobs", "Kessler", "Kuhn", "Lind", "Marquardt", "Mohr", "Nolan", "O'Kon",
    "Pfeffer", "Quigley", "Reichel", "Schaden", "Stokes", "Torphy", "Veum", "Wolff",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "and Sons", "Ltda", "S.A."];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Place", "Way", "Boulevard",
];

const FRUITS: &[&str] = &[
    "apple", "apricot", "avocado", "banana", "blackberry", "blueberry", "cherry", "coconut",
    "fig", "grape", "guava", "kiwi", "lemon", "lime", "mango", "melon", "orange", "papaya",
    "passionfruit", "peach", "pear", "pineapple", "plum", "pomegranate", "raspberry",
    "strawberry", "tangerine", "watermelon",
];

/// Source of per-scenario fixture values
#[derive(Debug)]
pub struct Fixtures {
    rng: StdRng,
}

impl Fixtures {
    /// Create a generator, deterministic when `seed` is given
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn pick(&mut self, items: &'static [&'static str]) -> &'static str {
        // Lists are non-empty constants
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    /// Company name such as "Kessler LLC" or "Hahn, Veum and Lind"
    pub fn company_name(&mut self) -> String {
        match self.rng.gen_range(0..3) {
            0 => format!("{} {}", self.pick(LAST_NAMES), self.pick(COMPANY_SUFFIXES)),
            1 => format!("{} - {}", self.pick(LAST_NAMES), self.pick(LAST_NAMES)),
            _ => format!(
                "{}, {} and {}",
                self.pick(LAST_NAMES),
                self.pick(LAST_NAMES),
                self.pick(LAST_NAMES)
            ),
        }
    }

    /// 14-digit numeric tax id with a non-zero leading digit
    pub fn cnpj(&mut self) -> String {
        self.rng.gen_range(CNPJ_MIN..=CNPJ_MAX).to_string()
    }

    /// Street address such as "4821 Quigley Avenue"
    pub fn street_address(&mut self) -> String {
        let digits = self.rng.gen_range(3..=5u32);
        let number = self.rng.gen_range(10u32.pow(digits - 1)..10u32.pow(digits));
        format!(
            "{} {} {}",
            number,
            self.pick(LAST_NAMES),
            self.pick(STREET_SUFFIXES)
        )
    }

    /// Fruit name
    pub fn fruit(&mut self) -> String {
        self.pick(FRUITS).to_string()
    }

    /// Fruit price in [0, 100]
    pub fn fruit_value(&mut self) -> i64 {
        self.rng.gen_range(0..=100)
    }
}
