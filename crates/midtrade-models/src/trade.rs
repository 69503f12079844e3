use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// COW encodes an unrecorded flow as -9.
pub const UNKNOWN_FLOW: f64 = -9.0;

/// Volume of a dyad whose flows are both unknown (-9 + -9).
pub const UNKNOWN_COMBINED: f64 = 2.0 * UNKNOWN_FLOW;

/// One dyad-year row of the COW dyadic trade dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    /// `importer1`
    pub country1: String,
    /// `importer2`
    pub country2: String,
    pub year: i32,
    /// Imports of `country1` from `country2`.
    pub flow1: f64,
    /// Imports of `country2` from `country1`.
    pub flow2: f64,
}

impl TradeRecord {
    pub fn volume(&self) -> f64 {
        self.flow1 + self.flow2
    }

    pub fn has_unknown_flow(&self) -> bool {
        self.flow1 == UNKNOWN_FLOW || self.flow2 == UNKNOWN_FLOW
    }

    pub fn has_zero_flow(&self) -> bool {
        self.flow1 == 0.0 || self.flow2 == 0.0
    }

    /// The other endpoint if `country` is part of this dyad.
    pub fn counterpart(&self, country: &str) -> Option<&str> {
        if self.country1 == country {
            Some(&self.country2)
        } else if self.country2 == country {
            Some(&self.country1)
        } else {
            None
        }
    }
}

/// Pairwise trade volume between countries, keyed both ways.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TradeMatrix {
    entries: BTreeMap<String, BTreeMap<String, f64>>,
}

impl TradeMatrix {
    /// A matrix with an empty partner map for every listed country.
    pub fn with_countries<'a, I>(countries: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        Self {
            entries: countries
                .into_iter()
                .map(|c| (c.clone(), BTreeMap::new()))
                .collect(),
        }
    }

    /// Store `volume` for both orderings of the pair.
    pub fn insert_symmetric(&mut self, x: &str, y: &str, volume: f64) {
        self.entries
            .entry(x.to_string())
            .or_default()
            .insert(y.to_string(), volume);
        self.entries
            .entry(y.to_string())
            .or_default()
            .insert(x.to_string(), volume);
    }

    pub fn volume(&self, x: &str, y: &str) -> Option<f64> {
        self.entries.get(x).and_then(|p| p.get(y)).copied()
    }

    pub fn partners(&self, country: &str) -> Option<&BTreeMap<String, f64>> {
        self.entries.get(country)
    }

    pub fn countries(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, f64>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unordered pairs with a recorded value, each reported once.
    pub fn pairs(&self) -> impl Iterator<Item = (&String, &String, f64)> {
        self.entries.iter().flat_map(|(x, partners)| {
            partners
                .iter()
                .filter(move |(y, _)| x < *y)
                .map(move |(y, v)| (x, y, *v))
        })
    }
}

/// Each country's partner volumes as a fraction of its total volume.
///
/// An empty partner map marks a country with no trade at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TradeShareMatrix {
    entries: BTreeMap<String, BTreeMap<String, f64>>,
}

impl TradeShareMatrix {
    pub fn insert_country(&mut self, country: &str, shares: BTreeMap<String, f64>) {
        self.entries.insert(country.to_string(), shares);
    }

    pub fn share(&self, country: &str, partner: &str) -> Option<f64> {
        self.entries.get(country).and_then(|p| p.get(partner)).copied()
    }

    pub fn shares(&self, country: &str) -> Option<&BTreeMap<String, f64>> {
        self.entries.get(country)
    }

    pub fn countries(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, f64>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
