//! Show population statistics.

use anyhow::Result;
use colored::Colorize;
use protocell::prelude::*;

pub fn run(config: SimConfig, days: u64) -> Result<()> {
    let mut sim = Simulation::new(config)?;
    sim.run_days(days);
    print_stats(&sim);
    Ok(())
}

pub fn print_stats(sim: &Simulation) {
    let snapshot = sim.snapshot();
    let stats = &snapshot.stats;

    println!("{}", "Protocell World Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Population".blue().bold());
    println!("  Day:               {}", stats.day.to_string().cyan());
    println!("  Live cells:        {}", stats.cells_alive.to_string().cyan());
    println!("  Organisms:         {}", stats.organisms_alive.to_string().cyan());
    println!("  Food patches:      {}", stats.food_patches.to_string().cyan());
    println!();

    println!("{}", "Tissue".blue().bold());
    println!("  Connections:       {}", stats.connections.to_string().cyan());
    println!(
        "  Clusters:          {}",
        sim.world().tissue().cluster_count().to_string().cyan()
    );
    let owned = snapshot.cells.iter().filter(|c| c.organism.is_some()).count();
    println!("  Owned cells:       {}/{}", owned, snapshot.cells.len());
    println!();

    println!("{}", "History".blue().bold());
    println!("  Spawned:           {}", stats.total_spawned.to_string().green());
    println!("  Divisions:         {}", stats.total_divisions.to_string().green());
    println!("  Deaths:            {}", stats.total_deaths.to_string().red());
    println!("  Absorptions:       {}", stats.total_absorptions.to_string().yellow());
    println!();

    if !snapshot.organisms.is_empty() {
        println!("{}", "Organisms".blue().bold());
        for o in &snapshot.organisms {
            let flag = if o.aggressive { "aggressive".red() } else { "calm".green() };
            println!(
                "  {:<14} {:>4} cells  hormone {:.3}  {}",
                o.id.to_string(),
                o.member_count,
                o.hormone,
                flag
            );
        }
        println!();
    }

    println!("{}", "═".repeat(40).dimmed());
}
