use std::collections::BTreeMap;

use midtrade_models::{EdgeView, NetworkView, NodeRole, NodeView, TradeMatrix};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// A country in a side's network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub country: String,
    pub role: NodeRole,
}

impl std::fmt::Display for NetworkNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.country)
    }
}

/// Undirected trade network. Edges carry the pair's trade volume but their
/// presence alone is what gets drawn.
#[derive(Debug, Clone)]
pub struct TradeNetwork {
    graph: UnGraph<NetworkNode, f64>,
}

impl TradeNetwork {
    /// One node per country in the matrix, one edge per pair with a non-zero
    /// recorded volume.
    pub fn from_matrix(
        matrix: &TradeMatrix,
        instigators: &[String],
        combatants: &[String],
    ) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut index: BTreeMap<&str, NodeIndex> = BTreeMap::new();

        for country in matrix.countries() {
            let role = if instigators.contains(country) {
                NodeRole::Instigator
            } else if combatants.contains(country) {
                NodeRole::Combatant
            } else {
                NodeRole::Partner
            };
            let node = graph.add_node(NetworkNode {
                country: country.clone(),
                role,
            });
            index.insert(country.as_str(), node);
        }

        for (x, y, volume) in matrix.pairs() {
            if volume == 0.0 {
                continue;
            }
            if let (Some(&a), Some(&b)) = (index.get(x.as_str()), index.get(y.as_str())) {
                graph.add_edge(a, b, volume);
            }
        }

        Self { graph }
    }

    /// Rebuild a network from its report form.
    pub fn from_view(view: &NetworkView) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut index: BTreeMap<&str, NodeIndex> = BTreeMap::new();

        for node in &view.nodes {
            let idx = graph.add_node(NetworkNode {
                country: node.country.clone(),
                role: node.role,
            });
            index.insert(node.country.as_str(), idx);
        }
        for edge in &view.edges {
            let from = index.get(edge.from.as_str());
            let to = index.get(edge.to.as_str());
            if let (Some(&a), Some(&b)) = (from, to) {
                graph.add_edge(a, b, edge.volume);
            }
        }

        Self { graph }
    }

    /// The subnetwork of countries that fought on the side. Edges touching a
    /// removed country go with it.
    pub fn combatants_only(&self) -> Self {
        let graph = self.graph.filter_map(
            |_, node| (node.role != NodeRole::Partner).then(|| node.clone()),
            |_, volume| Some(*volume),
        );
        Self { graph }
    }

    pub fn graph(&self) -> &UnGraph<NetworkNode, f64> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, country: &str) -> bool {
        self.graph.node_weights().any(|n| n.country == country)
    }

    pub fn connected(&self, x: &str, y: &str) -> bool {
        let find = |c: &str| self.graph.node_indices().find(|i| self.graph[*i].country == c);
        match (find(x), find(y)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn view(&self) -> NetworkView {
        let nodes = self
            .graph
            .node_weights()
            .map(|n| NodeView {
                country: n.country.clone(),
                role: n.role,
            })
            .collect();
        let edges = self
            .graph
            .edge_references()
            .map(|e| EdgeView {
                from: self.graph[e.source()].country.clone(),
                to: self.graph[e.target()].country.clone(),
                volume: *e.weight(),
            })
            .collect();
        NetworkView { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sample_matrix() -> TradeMatrix {
        let countries = codes(&["AUH", "GMY", "ITA", "RUS", "UKG"]);
        let mut matrix = TradeMatrix::with_countries(&countries);
        matrix.insert_symmetric("AUH", "GMY", 90.0);
        matrix.insert_symmetric("AUH", "ITA", 30.0);
        matrix.insert_symmetric("GMY", "RUS", 60.0);
        matrix.insert_symmetric("ITA", "RUS", 0.0);
        matrix
    }

    #[test]
    fn nodes_are_tagged_by_role() {
        let network =
            TradeNetwork::from_matrix(&sample_matrix(), &codes(&["AUH"]), &codes(&["AUH", "GMY"]));
        let view = network.view();
        let roles: BTreeMap<&str, NodeRole> =
            view.nodes.iter().map(|n| (n.country.as_str(), n.role)).collect();

        assert_eq!(roles["AUH"], NodeRole::Instigator);
        assert_eq!(roles["GMY"], NodeRole::Combatant);
        assert_eq!(roles["ITA"], NodeRole::Partner);
        assert_eq!(view.nodes.len(), 5);
    }

    #[test]
    fn zero_volume_pairs_have_no_edge() {
        let network = TradeNetwork::from_matrix(&sample_matrix(), &[], &[]);
        assert_eq!(network.edge_count(), 3);
        assert!(network.connected("AUH", "GMY"));
        assert!(!network.connected("ITA", "RUS"));
        assert!(network.contains("UKG"));
    }

    #[test]
    fn combatant_subgraph_drops_partners_and_their_edges() {
        let network =
            TradeNetwork::from_matrix(&sample_matrix(), &codes(&["AUH"]), &codes(&["AUH", "GMY"]));
        let combatants = network.combatants_only();

        assert_eq!(combatants.node_count(), 2);
        assert_eq!(combatants.edge_count(), 1);
        assert!(combatants.connected("AUH", "GMY"));
        assert!(!combatants.contains("RUS"));
        assert!(!combatants.contains("ITA"));
    }

    #[test]
    fn view_rebuilds_the_same_network() {
        let network =
            TradeNetwork::from_matrix(&sample_matrix(), &codes(&["AUH"]), &codes(&["AUH", "GMY"]));
        let rebuilt = TradeNetwork::from_view(&network.view());

        assert_eq!(rebuilt.view(), network.view());
        assert!(rebuilt.connected("GMY", "RUS"));
    }
}
