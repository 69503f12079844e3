use serde::{Deserialize, Serialize};

/// Which side of a dispute a country fought on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    /// Lowercase label used in file names and log fields.
    pub fn label(self) -> &'static str {
        match self {
            Side::A => "a",
            Side::B => "b",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// One participant row of the MIDB dispute dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisputeRecord {
    pub dispute_id: i64,
    pub start_year: i32,
    /// Three-letter state abbreviation (`stabb`).
    pub country: String,
    /// True if the country was on the dispute at its outset.
    pub originator: bool,
    pub side: Side,
}

/// Participants of one dispute, split by side.
///
/// Lists keep dataset order and never hold duplicates. Each combatant list
/// contains its side's instigators.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConflictRoster {
    pub instigators_a: Vec<String>,
    pub instigators_b: Vec<String>,
    pub combatants_a: Vec<String>,
    pub combatants_b: Vec<String>,
}

impl ConflictRoster {
    pub fn instigators(&self, side: Side) -> &[String] {
        match side {
            Side::A => &self.instigators_a,
            Side::B => &self.instigators_b,
        }
    }

    pub fn combatants(&self, side: Side) -> &[String] {
        match side {
            Side::A => &self.combatants_a,
            Side::B => &self.combatants_b,
        }
    }

    /// Record a participant row. Originators land in both the instigator and
    /// combatant lists of their side.
    pub fn add(&mut self, country: &str, side: Side, originator: bool) {
        let (instigators, combatants) = match side {
            Side::A => (&mut self.instigators_a, &mut self.combatants_a),
            Side::B => (&mut self.instigators_b, &mut self.combatants_b),
        };
        push_unique(combatants, country);
        if originator {
            push_unique(instigators, country);
        }
    }
}

fn push_unique(list: &mut Vec<String>, country: &str) {
    if !list.iter().any(|c| c == country) {
        list.push(country.to_string());
    }
}

/// A dispute resolved from the dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conflict {
    pub id: i64,
    pub start_year: i32,
    pub roster: ConflictRoster,
}

impl Conflict {
    /// Trade data is taken from the year before the dispute started.
    pub fn trade_year(&self) -> i32 {
        self.start_year - 1
    }
}
