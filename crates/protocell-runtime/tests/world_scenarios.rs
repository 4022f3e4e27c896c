//! End-to-end day-tick scenarios driven through the public world API.

use protocell_core::prelude::*;
use protocell_runtime::prelude::*;

fn world_with(config: SimConfig, seed: u64) -> World {
    WorldBuilder::new()
        .with_config(config)
        .with_seed(seed)
        .unpopulated()
        .build()
        .unwrap()
}

/// Default config with random connections switched off.
fn isolated() -> SimConfig {
    let mut config = SimConfig::default();
    config.aggregation.connect_chance = 0.0;
    config.food.patch_count = 0;
    config
}

#[test]
fn energy_is_clamped_after_every_tick() {
    let mut world = WorldBuilder::new().with_seed(8).build().unwrap();
    for _ in 0..4 {
        world.spawn_random_organism();
    }
    let max = world.config().cell.max_energy;

    for _ in 0..300 {
        world.advance_motion(0.5);
        world.step_day();
        for cell in world.cells().values().filter(|c| c.is_alive()) {
            assert!((0.0..=max).contains(&cell.energy()), "{} at {}", cell.id, cell.energy());
        }
    }
}

#[test]
fn organisms_with_no_live_members_never_survive_a_tick() {
    let mut world = WorldBuilder::new().with_seed(21).build().unwrap();
    for _ in 0..3 {
        world.spawn_random_organism();
    }
    for _ in 0..400 {
        world.step_day();
        for organism in world.organisms().values() {
            assert!(!organism.is_dead(world.cells()), "{} is dead but registered", organism.id);
            for member in organism.members() {
                assert_eq!(world.cell(member).and_then(|c| c.organism), Some(organism.id));
            }
        }
        for cell in world.cells().values() {
            if let Some(owner) = cell.organism {
                assert!(world.organism(owner).is_some_and(|o| o.contains(cell.id)));
            }
        }
    }
}

#[test]
fn forced_division_grows_the_organism() {
    let mut config = isolated();
    config.division.probability = 1.0;
    let mut world = world_with(config, 4);
    let organism = world.spawn_organism_at(Vec3::ZERO, 6).unwrap();
    let max = world.config().cell.max_energy;
    world.drain_events();

    let before = world.cells().len();
    for _ in 0..10 {
        let ids: Vec<CellId> = world.cells().keys().copied().collect();
        for id in ids {
            let cell = world.cell_mut(id).unwrap();
            cell.set_energy(max, max);
            cell.force_mood(Mood::Dividing);
        }
        world.step_day();
        if world.cells().len() > before {
            break;
        }
    }
    assert!(world.cells().len() > before);

    let divisions: Vec<(CellId, CellId)> = world
        .drain_events()
        .into_iter()
        .filter_map(|e| match e.event {
            SimEvent::CellDivided { parent, child, .. } => Some((parent, child)),
            _ => None,
        })
        .collect();
    assert!(!divisions.is_empty());
    for (parent, child) in divisions {
        let parent_owner = world.cell(parent).unwrap().organism;
        assert_eq!(parent_owner, Some(organism));
        assert_eq!(world.cell(child).unwrap().organism, parent_owner);
    }
}

#[test]
fn aggressive_three_absorbs_passive_ten() {
    let mut world = world_with(isolated(), 6);
    let aggressive = world.spawn_organism_at(Vec3::new(-10.0, 0.0, 0.0), 3).unwrap();
    let passive = world.spawn_organism_at(Vec3::new(10.0, 0.0, 0.0), 10).unwrap();
    world.organism_mut(aggressive).unwrap().set_aggressive(true);

    // pull every cell in close so the two spheres certainly touch
    let ids: Vec<CellId> = world.cells().keys().copied().collect();
    for (i, id) in ids.into_iter().enumerate() {
        world.cell_mut(id).unwrap().position = Vec3::new(i as f64 * 2.0, 0.0, 0.0);
    }

    world.resolve_collisions();

    assert_eq!(world.organisms().len(), 1);
    let survivor = world.organism(aggressive).unwrap();
    assert_eq!(survivor.member_count(), 13);
    assert!(world.organism(passive).is_none());
}

#[test]
fn absorbing_a_missing_organism_is_a_no_op() {
    let mut world = world_with(isolated(), 9);
    let a = world.spawn_organism_at(Vec3::ZERO, 5).unwrap();
    let b = world.spawn_organism_at(Vec3::new(300.0, 0.0, 0.0), 3).unwrap();
    let mut expected: Vec<CellId> = world
        .organism(a)
        .unwrap()
        .members()
        .chain(world.organism(b).unwrap().members())
        .collect();
    expected.sort();

    assert_eq!(world.absorb(a, b), Some(3));
    assert_eq!(world.absorb(a, b), None);

    let members: Vec<CellId> = world.organism(a).unwrap().members().collect();
    assert_eq!(members, expected);
}

#[test]
fn starved_cell_leaves_pool_organism_and_index() {
    let mut world = world_with(isolated(), 12);
    let organism = world.spawn_organism_at(Vec3::ZERO, 4).unwrap();
    let victim = world.organism(organism).unwrap().members().next().unwrap();
    let position = world.cell(victim).unwrap().position;
    world.cell_mut(victim).unwrap().set_energy(0.1, 120.0);

    world.step_day();
    assert!(world.cell(victim).is_none());
    assert!(!world.organism(organism).unwrap().contains(victim));
    assert_eq!(world.tissue().degree(victim), 0);

    world.step_day();
    assert!(!world.index().query(position, 200.0, None).contains(&victim));
}

#[test]
fn cells_bounce_off_world_faces() {
    let mut world = world_with(isolated(), 2);
    world.spawn_organism_at(Vec3::ZERO, 8);
    let ids: Vec<CellId> = world.cells().keys().copied().collect();
    for (i, id) in ids.iter().enumerate() {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        world.cell_mut(*id).unwrap().velocity = Vec3::new(60.0 * sign, -55.0 * sign, 45.0);
    }
    let bounds = world.config().world.bounds;

    for _ in 0..2000 {
        world.advance_motion(0.25);
        for cell in world.cells().values() {
            assert!(bounds.contains(&cell.position), "{} escaped to {:?}", cell.id, cell.position);
            assert!(cell.velocity.is_finite());
        }
    }
}

#[test]
fn newborn_and_spawned_cells_stay_inside_the_world() {
    let mut config = isolated();
    config.division.probability = 1.0;
    config.world.day_length_secs = 1.0;
    let mut sim = Simulation::from_world(world_with(config, 17));
    let bounds = sim.world().config().world.bounds;
    let max = sim.world().config().cell.max_energy;

    let organism = sim.spawn_organism_at(Vec3::new(410.0, 190.0, 0.0), 8).unwrap();
    for cell in &sim.snapshot().cells {
        assert!(bounds.contains(&cell.position), "spawned {} at {:?}", cell.id, cell.position);
    }

    let ids: Vec<CellId> = sim.world().organism(organism).unwrap().members().collect();
    for id in ids {
        let cell = sim.world_mut().cell_mut(id).unwrap();
        cell.position = Vec3::new(419.0, 199.0, 0.0);
        cell.velocity = Vec3::ZERO;
        cell.set_energy(max, max);
        cell.force_mood(Mood::Dividing);
    }

    let report = sim.frame(std::time::Duration::from_secs(1));
    assert_eq!(report.days_run, 1);
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e.event, SimEvent::CellDivided { .. })));
    for cell in &sim.snapshot().cells {
        assert!(bounds.contains(&cell.position), "newborn {} at {:?}", cell.id, cell.position);
    }
}

#[test]
fn same_seed_same_history() {
    let run = |seed| {
        let mut world = WorldBuilder::new().with_seed(seed).build().unwrap();
        for _ in 0..150 {
            world.advance_motion(1.0);
            world.step_day();
        }
        (world.stats(), world.snapshot().to_json().unwrap())
    };
    assert_eq!(run(42), run(42));
}
