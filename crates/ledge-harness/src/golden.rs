// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Golden hash files and trail comparison.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::record::HASH_DOMAIN;

/// Recorded hash trail of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Golden {
    /// Scenario label at record time.
    pub scenario: String,
    /// Hash domain separator; must match [`HASH_DOMAIN`].
    pub hash_domain: String,
    /// Hash algorithm name.
    pub hash_alg: String,
    /// Hex-encoded hash after each tick.
    pub hashes_hex: Vec<String>,
}

impl Golden {
    /// Wraps a fresh hash trail.
    pub fn new(scenario: &str, hashes: Vec<String>) -> Self {
        Self {
            scenario: scenario.to_string(),
            hash_domain: HASH_DOMAIN.to_string(),
            hash_alg: "BLAKE3".to_string(),
            hashes_hex: hashes,
        }
    }

    /// Reads a golden file.
    pub fn load(path: &Path) -> Result<Self> {
        let f = File::open(path)
            .with_context(|| format!("failed to open golden file {}", path.display()))?;
        let golden: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("failed to parse golden file {}", path.display()))?;
        if golden.hash_domain != HASH_DOMAIN {
            bail!(
                "golden hash domain {} does not match {HASH_DOMAIN}",
                golden.hash_domain
            );
        }
        Ok(golden)
    }

    /// Writes the golden file, pretty-printed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let f = File::create(path)
            .with_context(|| format!("failed to create golden file {}", path.display()))?;
        serde_json::to_writer_pretty(f, self)?;
        Ok(())
    }

    /// Compares a fresh trail against the recorded one.
    pub fn verify(&self, hashes: &[String]) -> Result<(), Divergence> {
        match first_divergence(&self.hashes_hex, hashes) {
            Some(d) => Err(d),
            None => Ok(()),
        }
    }
}

/// Where two hash trails part ways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// Hashes differ at a 1-based tick.
    Hash {
        /// First differing tick.
        tick: usize,
        /// Hash from the reference trail.
        expected: String,
        /// Hash from the trail under test.
        actual: String,
    },
    /// One trail is a strict prefix of the other.
    Length {
        /// Reference length.
        expected: usize,
        /// Length under test.
        actual: usize,
    },
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash {
                tick,
                expected,
                actual,
            } => write!(
                f,
                "hash mismatch at tick {tick}\nexpected: {expected}\nactual:   {actual}"
            ),
            Self::Length { expected, actual } => {
                write!(f, "length mismatch: expected {expected} ticks, got {actual}")
            }
        }
    }
}

impl std::error::Error for Divergence {}

/// First point at which `actual` stops matching `expected`.
pub fn first_divergence(expected: &[String], actual: &[String]) -> Option<Divergence> {
    if let Some((i, (e, a))) = expected
        .iter()
        .zip(actual)
        .enumerate()
        .find(|(_, (e, a))| e != a)
    {
        return Some(Divergence::Hash {
            tick: i + 1,
            expected: e.clone(),
            actual: a.clone(),
        });
    }
    if expected.len() == actual.len() {
        None
    } else {
        Some(Divergence::Length {
            expected: expected.len(),
            actual: actual.len(),
        })
    }
}
