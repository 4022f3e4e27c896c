use super::super::World;
use crate::events::SimEvent;
use protocell_core::types::{Mood, OrganismId};
use tracing::{debug, info};

impl World {
    /// Daily organism update: hormone drift, aggression, reproduction waves.
    pub(in crate::world) fn organism_phase(&mut self) {
        let max_energy = self.config.cell.max_energy;
        let ids: Vec<OrganismId> = self.organisms.keys().copied().collect();

        for id in ids {
            let Some(organism) = self.organisms.get_mut(&id) else {
                continue;
            };
            let was_aggressive = organism.is_aggressive();
            let wave = organism.daily_update(
                &self.cells,
                &self.config.organism,
                max_energy,
                self.rng.as_mut(),
            );
            if organism.is_aggressive() != was_aggressive {
                debug!(organism = %id, aggressive = !was_aggressive, "aggression changed");
            }

            let Some(wave) = wave else {
                continue;
            };
            for cell_id in &wave.members {
                if let Some(cell) = self.cells.get_mut(cell_id) {
                    cell.force_mood(Mood::Dividing);
                    cell.gain(wave.energy_boost, max_energy);
                }
            }
            self.record(SimEvent::ReproductionWave {
                organism: id,
                members: wave.members.len(),
            });
            info!(organism = %id, cells = wave.members.len(), "reproduction wave");
        }
    }
}
