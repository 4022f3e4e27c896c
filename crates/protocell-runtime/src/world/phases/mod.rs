//! Day-tick phases, each an `impl World` block.

mod aggregation;
mod cleanup;
mod environment;
mod metabolism;
mod organism;
mod predation;
