use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dispute::Side;
use crate::join_model::{JoinModels, JoinSample};
use crate::trade::{TradeMatrix, TradeShareMatrix};

/// Category a country takes in a side's network.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Instigator,
    /// Fought on the side without starting the dispute.
    Combatant,
    /// Only a trade partner of the side.
    Partner,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeView {
    pub country: String,
    pub role: NodeRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeView {
    pub from: String,
    pub to: String,
    pub volume: f64,
}

/// Node and edge lists of a rendered network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NetworkView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SideNetworks {
    /// Every country in the side's trade matrix.
    pub trade: NetworkView,
    /// The trade network with non-combatants removed.
    pub combatants: NetworkView,
}

/// Everything computed for one side of a conflict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SideReport {
    pub side: Side,
    pub instigators: Vec<String>,
    pub combatants: Vec<String>,
    /// Combatants plus every country they traded with in the trade year.
    pub trade_partners: BTreeSet<String>,
    /// `None` when the side had fewer than two countries to relate.
    pub trade_matrix: Option<TradeMatrix>,
    pub trade_shares: Option<TradeShareMatrix>,
    pub samples: Vec<JoinSample>,
    pub models: JoinModels,
    pub networks: Option<SideNetworks>,
    /// Files written by the renderer, empty until rendered.
    #[serde(default)]
    pub rendered: Vec<PathBuf>,
}

/// Analysis of a single dispute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConflictReport {
    pub conflict_id: i64,
    pub start_year: i32,
    pub trade_year: i32,
    pub sides: Vec<SideReport>,
}

impl ConflictReport {
    pub fn side(&self, side: Side) -> Option<&SideReport> {
        self.sides.iter().find(|s| s.side == side)
    }
}
