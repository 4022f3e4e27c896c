//! Undirected cell-to-cell connection graph.
//!
//! Only connected cells appear as nodes; removing a cell also drops any
//! neighbor left without connections, so the node set is always the set
//! of cells with degree at least one.

use petgraph::algo::kosaraju_scc;
use petgraph::graphmap::UnGraphMap;
use protocell_core::types::CellId;

#[derive(Debug, Clone, Default)]
pub struct Tissue {
    graph: UnGraphMap<CellId, ()>,
}

impl Tissue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect two distinct cells if neither is at `max_per_cell` yet.
    /// Returns true if a new connection was made.
    pub fn connect(&mut self, a: CellId, b: CellId, max_per_cell: usize) -> bool {
        if a == b || self.are_connected(a, b) {
            return false;
        }
        if self.degree(a) >= max_per_cell || self.degree(b) >= max_per_cell {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    pub fn are_connected(&self, a: CellId, b: CellId) -> bool {
        self.graph.contains_edge(a, b)
    }

    pub fn degree(&self, id: CellId) -> usize {
        if self.graph.contains_node(id) {
            self.graph.neighbors(id).count()
        } else {
            0
        }
    }

    pub fn neighbors(&self, id: CellId) -> Vec<CellId> {
        if !self.graph.contains_node(id) {
            return Vec::new();
        }
        let mut out: Vec<CellId> = self.graph.neighbors(id).collect();
        out.sort();
        out
    }

    /// Drop a cell and all its connections. Returns how many connections went.
    pub fn remove_cell(&mut self, id: CellId) -> usize {
        if !self.graph.contains_node(id) {
            return 0;
        }
        let neighbors: Vec<CellId> = self.graph.neighbors(id).collect();
        self.graph.remove_node(id);
        for n in &neighbors {
            if self.graph.neighbors(*n).next().is_none() {
                self.graph.remove_node(*n);
            }
        }
        neighbors.len()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Connected cells (degree at least one).
    pub fn cell_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Every connection once, as `(lower, higher)` id pairs in sorted order.
    pub fn connections(&self) -> Vec<(CellId, CellId)> {
        let mut edges: Vec<(CellId, CellId)> = self
            .graph
            .all_edges()
            .map(|(a, b, _)| if a < b { (a, b) } else { (b, a) })
            .collect();
        edges.sort();
        edges
    }

    /// Number of separate connected clusters.
    pub fn cluster_count(&self) -> usize {
        kosaraju_scc(&self.graph).len()
    }

    pub fn clear(&mut self) {
        self.graph.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_is_symmetric_and_unique() {
        let mut t = Tissue::new();
        assert!(t.connect(CellId(1), CellId(2), 8));
        assert!(!t.connect(CellId(2), CellId(1), 8));
        assert!(t.are_connected(CellId(2), CellId(1)));
        assert_eq!(t.connection_count(), 1);
    }

    #[test]
    fn self_connection_refused() {
        let mut t = Tissue::new();
        assert!(!t.connect(CellId(1), CellId(1), 8));
        assert_eq!(t.cell_count(), 0);
    }

    #[test]
    fn degree_cap_is_enforced() {
        let mut t = Tissue::new();
        assert!(t.connect(CellId(1), CellId(2), 2));
        assert!(t.connect(CellId(1), CellId(3), 2));
        assert!(!t.connect(CellId(1), CellId(4), 2));
        assert_eq!(t.degree(CellId(1)), 2);
    }

    #[test]
    fn removing_a_cell_drops_orphaned_neighbors() {
        let mut t = Tissue::new();
        t.connect(CellId(1), CellId(2), 8);
        t.connect(CellId(1), CellId(3), 8);
        t.connect(CellId(3), CellId(4), 8);

        assert_eq!(t.remove_cell(CellId(1)), 2);
        assert_eq!(t.connections(), vec![(CellId(3), CellId(4))]);
        assert_eq!(t.cell_count(), 2);
        assert_eq!(t.degree(CellId(2)), 0);
        assert_eq!(t.remove_cell(CellId(99)), 0);
    }

    #[test]
    fn clusters_are_counted() {
        let mut t = Tissue::new();
        t.connect(CellId(1), CellId(2), 8);
        t.connect(CellId(2), CellId(3), 8);
        t.connect(CellId(7), CellId(8), 8);
        assert_eq!(t.cluster_count(), 2);
        assert_eq!(t.neighbors(CellId(2)), vec![CellId(1), CellId(3)]);
    }
}
