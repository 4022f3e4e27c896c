//! Run the simulation and stream its events.

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use protocell::prelude::*;
use std::time::Duration;

use super::stats::print_stats;

pub struct RunOptions {
    pub days: u64,
    pub frame_ms: u64,
    pub spawn: usize,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(config: SimConfig, options: RunOptions) -> Result<()> {
    let frame = Duration::from_millis(options.frame_ms.max(1));
    let mut sim = Simulation::new(config)?;
    for _ in 0..options.spawn {
        sim.spawn_random_organism();
    }

    if !options.json {
        println!(
            "{} Running {} days ({} ms frames)...",
            "→".blue(),
            options.days.to_string().cyan(),
            options.frame_ms
        );
    }

    let pb = if options.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(options.days)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} days")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    // events from the initial seeding and spawn commands
    let mut pending = sim.drain_events();
    let mut days_run = 0;
    loop {
        for event in &pending {
            emit(&pb, event, &options)?;
        }
        if days_run >= options.days {
            break;
        }
        let report = sim.frame(frame);
        days_run += report.days_run;
        pb.inc(report.days_run);
        pending = report.events;
    }
    pb.finish_and_clear();

    if !options.json {
        println!("{} Simulation complete!", "✓".green().bold());
        println!();
        print_stats(&sim);
    }
    Ok(())
}

fn emit(pb: &ProgressBar, event: &DayEvent, options: &RunOptions) -> Result<()> {
    if options.json {
        println!("{}", serde_json::to_string(event)?);
    } else if !options.quiet {
        pb.println(format!("  {} {}", format!("[Day {}]", event.day).dimmed(), paint(&event.event)));
    }
    Ok(())
}

fn paint(event: &SimEvent) -> ColoredString {
    let line = event.to_string();
    match event {
        SimEvent::CellSpawned { .. } | SimEvent::CellDivided { .. } => line.green(),
        SimEvent::CellDied { .. } | SimEvent::OrganismDied { .. } => line.red(),
        SimEvent::OrganismFormed { .. } | SimEvent::ReproductionWave { .. } => line.cyan(),
        SimEvent::OrganismAbsorbed { .. } => line.yellow(),
        SimEvent::FoodExhausted { .. } => line.dimmed(),
        SimEvent::SimulationReset => line.bold(),
    }
}
