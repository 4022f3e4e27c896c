use super::super::World;
use protocell_core::spatial::SpatialIndex;
use protocell_core::types::{CellId, DeathCause, Mood};
use tracing::trace;

impl World {
    /// Predatory cells of aggressive organisms bite every foreign cell in
    /// reach. A victim drained to zero dies of predation.
    pub(in crate::world) fn predation_phase(&mut self) {
        let radius = self.config.aggregation.bite_radius;
        let bite = self.config.aggregation.bite_energy;
        let max_energy = self.config.cell.max_energy;

        let hunters: Vec<CellId> = self
            .cells
            .values()
            .filter(|c| c.is_alive() && c.mood() == Mood::Predatory)
            .filter(|c| {
                c.organism
                    .and_then(|o| self.organisms.get(&o))
                    .is_some_and(|o| o.is_aggressive())
            })
            .map(|c| c.id)
            .collect();

        for hunter in hunters {
            let Some((position, pack)) = self
                .cells
                .get(&hunter)
                .filter(|c| c.is_alive())
                .map(|c| (c.position, c.organism))
            else {
                continue;
            };
            let mut prey = self.index.query(position, radius, Some(hunter));
            prey.sort_unstable();

            for victim in prey {
                let Some(target) = self.cells.get_mut(&victim) else {
                    continue;
                };
                if !target.is_alive() || target.organism == pack {
                    continue;
                }
                let taken = target.drain(bite);
                let drained = target.energy() <= 0.0;
                if let Some(h) = self.cells.get_mut(&hunter) {
                    h.gain(taken, max_energy);
                }
                trace!(%hunter, %victim, taken, "bite");
                if drained {
                    self.kill_cell(victim, DeathCause::Predation);
                }
            }
        }
    }
}
