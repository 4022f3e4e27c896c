use super::super::World;
use crate::events::SimEvent;
use protocell_core::types::{CellId, OrganismId};
use tracing::info;

impl World {
    /// Purge dead cells from the pool, their organism and the tissue, then
    /// drop organisms left without a live member.
    pub(in crate::world) fn cleanup_phase(&mut self) {
        let dead: Vec<CellId> = self
            .cells
            .values()
            .filter(|c| !c.is_alive())
            .map(|c| c.id)
            .collect();
        for id in dead {
            if let Some(cell) = self.cells.remove(&id) {
                if let Some(organism) = cell.organism.and_then(|o| self.organisms.get_mut(&o)) {
                    organism.remove_cell(id);
                }
            }
            self.tissue.remove_cell(id);
        }

        let empty: Vec<OrganismId> = self
            .organisms
            .values()
            .filter(|o| o.is_dead(&self.cells))
            .map(|o| o.id)
            .collect();
        for organism in empty {
            self.organisms.remove(&organism);
            self.record(SimEvent::OrganismDied { organism });
            info!(%organism, "organism died");
        }
    }
}
