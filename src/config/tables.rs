//! Lookup-table primitives shared by every rate section.
//!
//! Two shapes cover all the banded and count-based pricing rules:
//!
//! - [`BandTable`]: an ordered list of `{key, aliases, value}` entries matched
//!   against a free-form band string (`"10k-50k"`, `"Real Estate"`, ...).
//! - [`PerUnit`]: "first N included, then `rate` per extra unit".
//!
//! The fallback of a band table is always its lowest-valued entry. Unknown or
//! missing band strings therefore bias a quote toward under-billing, and that
//! policy is enforced here rather than in each calculator.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One row of a [`BandTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandEntry {
    pub key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub value: f64,
}

impl BandEntry {
    pub fn new(key: &str, value: f64) -> Self {
        Self {
            key: key.to_string(),
            aliases: Vec::new(),
            value,
        }
    }

    pub fn aka(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    fn matches(&self, needle: &str) -> bool {
        normalize_band_key(&self.key) == needle
            || self.aliases.iter().any(|a| normalize_band_key(a) == needle)
    }
}

/// Result of resolving a band string.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLookup {
    /// Canonical key of the entry that supplied `value`.
    pub key: Option<String>,
    pub value: f64,
    /// True when the input did not match and the lowest entry was used.
    pub fallback: bool,
}

/// Ordered band → value table with a guaranteed lowest-cost fallback.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandTable {
    entries: Vec<BandEntry>,
}

impl BandTable {
    pub fn new(entries: Vec<BandEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BandEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest-valued entry (first one wins on ties).
    pub fn lowest(&self) -> Option<&BandEntry> {
        self.entries.iter().fold(None, |best: Option<&BandEntry>, e| match best {
            Some(b) if b.value <= e.value => Some(b),
            _ => Some(e),
        })
    }

    /// Resolve a raw band string to a value.
    ///
    /// `None`, blank strings, and unknown strings all resolve to [`Self::lowest`].
    /// An empty table resolves to `0.0` (validation rejects empty tables, so
    /// that only happens for configs that skipped `validate`).
    pub fn resolve(&self, raw: Option<&str>) -> BandLookup {
        let needle = raw.map(normalize_band_key).filter(|s| !s.is_empty());

        if let Some(needle) = &needle {
            if let Some(entry) = self.entries.iter().find(|e| e.matches(needle)) {
                return BandLookup {
                    key: Some(entry.key.clone()),
                    value: entry.value,
                    fallback: false,
                };
            }
            debug!(band = %needle, "unknown band, using lowest-cost entry");
        }

        match self.lowest() {
            Some(entry) => BandLookup {
                key: Some(entry.key.clone()),
                value: entry.value,
                fallback: true,
            },
            None => BandLookup {
                key: None,
                value: 0.0,
                fallback: true,
            },
        }
    }
}

/// "First `included` units are free, then `rate` per extra unit."
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerUnit {
    pub included: u32,
    pub rate: f64,
}

impl PerUnit {
    pub const fn new(included: u32, rate: f64) -> Self {
        Self { included, rate }
    }

    pub fn extra_units(&self, count: u32) -> u32 {
        count.saturating_sub(self.included)
    }

    pub fn charge(&self, count: u32) -> f64 {
        self.extra_units(count) as f64 * self.rate
    }
}

/// Canonical form used when comparing band strings.
///
/// Case-folded, with `$`, `,` and whitespace/underscore separators collapsed so
/// `"$10K - $50K"`, `"10k-50k"` and `"10K_50K"` all compare equal. `<`, `+`
/// and `.` are significant (`"<10k"`, `"2000+"`).
pub fn normalize_band_key(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '<' | '+' | '.')))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
