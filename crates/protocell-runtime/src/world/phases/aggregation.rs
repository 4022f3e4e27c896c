use super::super::World;
use crate::events::{FormationOrigin, SimEvent};
use protocell_core::spatial::SpatialIndex;
use protocell_core::types::{CellId, OrganismId};
use tracing::{info, trace};

impl World {
    /// Let neighboring cells stick together. Each unordered pair within
    /// `connect_distance` gets one roll, weighted by the substrate under
    /// its midpoint and the two cells' kinds.
    pub(in crate::world) fn adhesion_phase(&mut self) {
        let distance = self.config.aggregation.connect_distance;
        let chance = self.config.aggregation.connect_chance;
        let cap = self.config.aggregation.max_connections_per_cell;
        let ids: Vec<CellId> = self
            .cells
            .values()
            .filter(|c| c.is_alive())
            .map(|c| c.id)
            .collect();

        for a in ids {
            let Some(position) = self.cells.get(&a).map(|c| c.position) else {
                continue;
            };
            let mut near = self.index.query(position, distance, Some(a));
            near.retain(|b| *b > a);
            near.sort_unstable();

            for b in near {
                let (Some(ca), Some(cb)) = (self.cells.get(&a), self.cells.get(&b)) else {
                    continue;
                };
                if !ca.is_alive() || !cb.is_alive() || self.tissue.are_connected(a, b) {
                    continue;
                }
                let adhesion = self.substrate.sample(&ca.position.midpoint(&cb.position));
                let affinity = 0.5 * (ca.kind.adhesion_factor() + cb.kind.adhesion_factor());
                let p = (chance * adhesion * affinity).clamp(0.0, 1.0);

                if !self.rng.chance(p) || !self.tissue.connect(a, b, cap) {
                    continue;
                }
                trace!(%a, %b, "cells connected");
                self.join(a, b);
            }
        }
    }

    /// Reconcile ownership after `a` and `b` connected.
    fn join(&mut self, a: CellId, b: CellId) {
        let owner = |id: CellId| self.cells.get(&id).and_then(|c| c.organism);
        match (owner(a), owner(b)) {
            (None, None) => {
                let organism = self.new_organism();
                self.adopt(organism, a);
                self.adopt(organism, b);
                self.record(SimEvent::OrganismFormed {
                    organism,
                    origin: FormationOrigin::Connection,
                    members: 2,
                });
                info!(%organism, "organism formed by connection");
            }
            (Some(organism), None) => self.adopt(organism, b),
            (None, Some(organism)) => self.adopt(organism, a),
            (Some(x), Some(y)) if x != y => {
                self.merge(x, y);
            }
            _ => {}
        }
    }

    fn adopt(&mut self, organism: OrganismId, cell: CellId) {
        let Some(o) = self.organisms.get_mut(&organism) else {
            return;
        };
        o.add_cell(cell);
        if let Some(c) = self.cells.get_mut(&cell) {
            c.organism = Some(organism);
        }
    }

    /// Merge every pair of organisms whose centroids lie within touching
    /// distance. Returns the number of merges.
    pub fn resolve_collisions(&mut self) -> usize {
        let touch = self.config.aggregation.touch_distance;
        let min_radius = self.config.aggregation.min_bounding_radius;
        let ids: Vec<OrganismId> = self.organisms.keys().copied().collect();
        let mut merges = 0;

        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                let (Some(oa), Some(ob)) = (self.organisms.get(&a), self.organisms.get(&b)) else {
                    continue;
                };
                let (Some(ca), Some(cb)) = (oa.centroid(&self.cells), ob.centroid(&self.cells)) else {
                    continue;
                };
                let reach = touch.max(
                    oa.bounding_radius(&self.cells, min_radius)
                        + ob.bounding_radius(&self.cells, min_radius),
                );
                if ca.distance_to(&cb) <= reach && self.merge(a, b).is_some() {
                    merges += 1;
                }
            }
        }
        merges
    }
}
