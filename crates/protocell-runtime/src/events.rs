//! Day-tagged lifecycle events.

use protocell_agents::organism::AbsorptionReason;
use protocell_core::types::*;
use serde::Serialize;
use std::fmt;

/// How an organism came into being.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationOrigin {
    /// Initial seeding or an explicit spawn command.
    Seeded,
    /// Two unowned cells connected.
    Connection,
    /// An orphan cell divided.
    Division,
}

/// Something that happened in the world.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    CellSpawned {
        cell: CellId,
        kind: CellKind,
        organism: Option<OrganismId>,
    },
    CellDivided {
        parent: CellId,
        child: CellId,
        kind: CellKind,
        organism: Option<OrganismId>,
    },
    CellDied {
        cell: CellId,
        cause: DeathCause,
    },
    OrganismFormed {
        organism: OrganismId,
        origin: FormationOrigin,
        members: usize,
    },
    OrganismAbsorbed {
        absorber: OrganismId,
        absorbed: OrganismId,
        transferred: usize,
        reason: AbsorptionReason,
    },
    OrganismDied {
        organism: OrganismId,
    },
    ReproductionWave {
        organism: OrganismId,
        members: usize,
    },
    FoodExhausted {
        food: FoodId,
    },
    SimulationReset,
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::CellSpawned { cell, kind, organism } => match organism {
                Some(o) => write!(f, "{cell} ({kind}) spawned in {o}"),
                None => write!(f, "{cell} ({kind}) spawned"),
            },
            SimEvent::CellDivided { parent, child, kind, .. } => {
                write!(f, "{parent} divided -> {child} ({kind})")
            }
            SimEvent::CellDied { cell, cause } => write!(f, "{cell} died ({cause})"),
            SimEvent::OrganismFormed { organism, origin, members } => {
                let how = match origin {
                    FormationOrigin::Seeded => "seeded",
                    FormationOrigin::Connection => "formed by connection",
                    FormationOrigin::Division => "formed by division",
                };
                write!(f, "{organism} {how} with {members} cells")
            }
            SimEvent::OrganismAbsorbed { absorber, absorbed, transferred, .. } => {
                write!(f, "{absorber} absorbed {absorbed} ({transferred} cells)")
            }
            SimEvent::OrganismDied { organism } => write!(f, "{organism} died"),
            SimEvent::ReproductionWave { organism, members } => {
                write!(f, "{organism} reproduction wave ({members} cells)")
            }
            SimEvent::FoodExhausted { food } => write!(f, "{food} exhausted"),
            SimEvent::SimulationReset => f.write_str("simulation reset"),
        }
    }
}

/// An event with the simulated day it happened on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEvent {
    pub day: Day,
    #[serde(flatten)]
    pub event: SimEvent,
}

impl fmt::Display for DayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Day {}] {}", self.day, self.event)
    }
}

/// Ordered queue of events not yet handed to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pending: Vec<DayEvent>,
    recorded: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, day: Day, event: SimEvent) {
        self.pending.push(DayEvent { day, event });
        self.recorded += 1;
    }

    /// Take every pending event in the order they were recorded.
    pub fn drain(&mut self) -> Vec<DayEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[DayEvent] {
        &self.pending
    }

    /// Events recorded since the log was created or cleared.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.recorded = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_render_with_day_tag() {
        let e = DayEvent {
            day: 12,
            event: SimEvent::CellDivided {
                parent: CellId(3),
                child: CellId(9),
                kind: CellKind::Motive,
                organism: Some(OrganismId(1)),
            },
        };
        assert_eq!(e.to_string(), "[Day 12] Cell#3 divided -> Cell#9 (motive)");
    }

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut log = EventLog::new();
        log.push(1, SimEvent::OrganismDied { organism: OrganismId(2) });
        log.push(1, SimEvent::FoodExhausted { food: FoodId(4) });
        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].event, SimEvent::OrganismDied { organism: OrganismId(2) });
        assert!(log.pending().is_empty());
        assert_eq!(log.recorded(), 2);
    }

    #[test]
    fn events_serialize_flat() {
        let e = DayEvent {
            day: 3,
            event: SimEvent::CellDied { cell: CellId(5), cause: DeathCause::OldAge },
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["day"], 3);
        assert_eq!(json["type"], "cell_died");
        assert_eq!(json["cause"], "old_age");
        assert_eq!(json["cell"], 5);
    }
}
