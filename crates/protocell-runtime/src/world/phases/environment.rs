use super::super::World;
use crate::events::SimEvent;
use protocell_core::config::FoodMode;
use protocell_core::types::FoodId;
use tracing::debug;

impl World {
    /// Regrow food patches, or clear away exhausted ones when food depletes.
    pub(in crate::world) fn environment_phase(&mut self) {
        match self.config.food.mode {
            FoodMode::Regenerating => {
                let regen = self.config.food.regen_per_day;
                for patch in self.food.values_mut() {
                    patch.regenerate(regen);
                }
            }
            FoodMode::Depleting => {
                let exhausted: Vec<FoodId> = self
                    .food
                    .values()
                    .filter(|f| f.is_exhausted())
                    .map(|f| f.id)
                    .collect();
                for food in exhausted {
                    self.food.remove(&food);
                    self.record(SimEvent::FoodExhausted { food });
                    debug!(%food, "food patch exhausted");
                }
            }
        }
    }
}
