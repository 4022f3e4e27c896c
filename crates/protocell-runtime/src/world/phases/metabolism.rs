use super::super::World;
use crate::events::{FormationOrigin, SimEvent};
use protocell_agents::cell::{Cell, CellAction, DivisionPlan};
use protocell_core::types::{CellId, FoodId};
use tracing::{debug, trace};

impl World {
    /// Age every live cell, roll its mood and carry out the action.
    /// Children are returned instead of inserted so that no cell born
    /// today is processed today.
    pub(in crate::world) fn metabolism_phase(&mut self) -> Vec<DivisionPlan> {
        let max_energy = self.config.cell.max_energy;
        let ids: Vec<CellId> = self.cells.keys().copied().collect();
        let mut births = Vec::new();

        for id in ids {
            let aggressive = self
                .cells
                .get(&id)
                .and_then(|c| c.organism)
                .and_then(|o| self.organisms.get(&o))
                .is_some_and(|o| o.is_aggressive());
            let Some(cell) = self.cells.get_mut(&id) else {
                continue;
            };
            if !cell.is_alive() {
                continue;
            }
            if let Some(cause) = cell.age_one_day(&self.config.cell) {
                self.note_death(id, cause);
                continue;
            }

            cell.evaluate_mood(aggressive, &self.config, self.rng.as_mut());
            match cell.perform_mood_action(&self.config, self.rng.as_mut()) {
                CellAction::Idle => {}
                CellAction::Forage { radius } => self.feed(id, radius),
                CellAction::Divide(plan) => births.push(plan),
            }

            if let Some(cause) = self.cells.get_mut(&id).and_then(|c| c.settle(max_energy)) {
                self.note_death(id, cause);
            }
        }
        births
    }

    /// Feed a cell from the nearest non-empty patch within `radius`.
    fn feed(&mut self, id: CellId, radius: f64) {
        let max_energy = self.config.cell.max_energy;
        let Some(cell) = self.cells.get(&id) else {
            return;
        };
        let position = cell.position;
        let room = (max_energy - cell.energy()).max(0.0);

        let nearest: Option<FoodId> = self
            .food
            .values()
            .filter(|f| !f.is_exhausted())
            .map(|f| (f.id, f.position.distance_squared(&position)))
            .filter(|(_, d)| *d <= radius * radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(food, _)| food);
        let Some(food) = nearest else {
            return;
        };

        let wanted = self.config.food.energy_per_feed.min(room);
        let eaten = self.food.get_mut(&food).map_or(0.0, |f| f.consume(wanted));
        if let Some(cell) = self.cells.get_mut(&id) {
            cell.gain(eaten, max_energy);
        }
        trace!(cell = %id, %food, eaten, "fed");
    }

    /// Insert the children planned during metabolism. A child joins its
    /// parent's organism; an orphan parent founds a new one for the child.
    pub(in crate::world) fn insert_children(&mut self, births: Vec<DivisionPlan>) {
        let cap = self.config.aggregation.max_connections_per_cell;

        for plan in births {
            let id = CellId(self.next_cell);
            self.next_cell += 1;
            let mut child = Cell::from_plan(id, &plan, &self.config.cell, self.rng.as_mut());
            // offsets near a face would otherwise land outside the world
            child.reflect(&self.config.world.bounds);

            let inherited = plan.organism.filter(|o| self.organisms.contains_key(o));
            let organism = match inherited {
                Some(o) => o,
                None => self.new_organism(),
            };
            child.organism = Some(organism);
            self.cells.insert(id, child);
            if let Some(o) = self.organisms.get_mut(&organism) {
                o.add_cell(id);
            }
            if inherited.is_some() {
                self.tissue.connect(plan.parent, id, cap);
            }

            self.counters.spawned += 1;
            self.counters.divisions += 1;
            self.record(SimEvent::CellDivided {
                parent: plan.parent,
                child: id,
                kind: plan.kind,
                organism: Some(organism),
            });
            if inherited.is_none() {
                self.record(SimEvent::OrganismFormed {
                    organism,
                    origin: FormationOrigin::Division,
                    members: 1,
                });
            }
            debug!(parent = %plan.parent, child = %id, %organism, "cell divided");
        }
    }
}
