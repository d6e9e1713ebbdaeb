//! # Identifier Generation
//!
//! Replacement identifiers have the shape `{prefix}-{seed}-{suffix}`:
//!
//! ```text
//! scoped-id-panel-x3Kf_9aLq0-ZtPwB
//! └──┬────┘ └─┬─┘ └──────┬───────┘
//!  prefix   seed   16 random chars
//! ```
//!
//! The suffix only needs to make collisions within one page practically
//! impossible. It is not a secret and is not meant to resist guessing.
//!
//! Generation is deliberately non-deterministic: asking twice for the same seed
//! gives two different identifiers. Consistency within a rewrite comes from the
//! [`IdMap`](crate::scope::IdMap), not from the generator.

use crate::error::{Result, ScopeError};
use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;
use uuid::Uuid;

pub const DEFAULT_PREFIX: &str = "scoped-id";

/// Length of the random part of each generated identifier.
pub const SUFFIX_LENGTH: usize = 16;

// 64 symbols, so each random byte maps onto it with a 6-bit mask
const ALPHABET: &[u8; 64] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// The namespace prepended to every generated identifier.
///
/// A prefix must start with an ASCII letter or an underscore, so generated
/// values stay valid as HTML ids and CSS selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix(String);

impl Prefix {
    /// Strict constructor: rejects an invalid prefix.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        match prefix.chars().next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => Ok(Self(prefix)),
            _ => Err(ScopeError::InvalidPrefix(prefix)),
        }
    }

    /// Lenient constructor used for configuration values: an invalid prefix is
    /// replaced by [`DEFAULT_PREFIX`] and reported as a warning.
    pub fn or_default(prefix: &str) -> (Self, Option<Message>) {
        match Self::new(prefix) {
            Ok(prefix) => (prefix, None),
            Err(err) => {
                warn!(prefix, fallback = DEFAULT_PREFIX, "invalid id prefix");
                let message = Message::warning(format!("{}; using {:?}", err, DEFAULT_PREFIX));
                (Self::default(), Some(message))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Self(DEFAULT_PREFIX.to_string())
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Prefix {
    type Error = ScopeError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Prefix> for String {
    fn from(prefix: Prefix) -> Self {
        prefix.0
    }
}

/// Source of replacement identifiers.
pub trait IdGenerator {
    fn generate(&self, seed: &str, prefix: &Prefix) -> String;
}

/// The production generator: a random URL-safe suffix per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self, seed: &str, prefix: &Prefix) -> String {
        format!("{}-{}-{}", prefix, seed, random_suffix())
    }
}

/// Draws [`SUFFIX_LENGTH`] symbols from the URL-safe alphabet.
pub fn random_suffix() -> String {
    let bits = random_bits(Uuid::new_v4().as_u128());
    (0..SUFFIX_LENGTH)
        .map(|i| ALPHABET[((bits >> (6 * i)) & 63) as usize] as char)
        .collect()
}

/// The 122 random bits of a v4 UUID, packed low. The 4 version bits (76..80)
/// and 2 variant bits (62..64) are fixed and dropped.
fn random_bits(uuid: u128) -> u128 {
    let high = uuid >> 80;
    let middle = (uuid >> 64) & 0xfff;
    let low = uuid & ((1 << 62) - 1);
    (high << 74) | (middle << 62) | low
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use std::cell::Cell;

    /// Deterministic generator: `{prefix}-{seed}-1`, `{prefix}-{seed}-2`, ...
    /// The counter is shared across seeds, so every call yields a fresh value.
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        counter: Cell<usize>,
    }

    impl SequentialIds {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> usize {
            self.counter.get()
        }
    }

    impl IdGenerator for SequentialIds {
        fn generate(&self, seed: &str, prefix: &Prefix) -> String {
            let n = self.counter.get() + 1;
            self.counter.set(n);
            format!("{}-{}-{}", prefix, seed, n)
        }
    }
}
