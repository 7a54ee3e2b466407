//! A small molecular-dynamics engine for interacting Lennard-Jones particles
//! in two dimensions.
//!
//! [A primer on molecular dynamics](https://www.owlposting.com/p/a-primer-on-molecular-dynamics)
//! [A summary paper](https://arxiv.org/pdf/1401.1181)
//!
//! Two simulation modes are provided:
//!
//! - [`MultiParticleModel`]: many molecules in a resizable container, with
//!   solid/liquid/gas phase presets, a stochastic thermostat, and a pressure
//!   gauge fed by wall impulses.
//! - [`DualAtomModel`]: one optionally pinned atom plus one free atom, with a
//!   bonding state machine and decomposed attractive/repulsive force
//!   read-outs.
//!
//! All quantities are in normalized units: distances in particle diameters
//! (the substance's sigma), energies in units of the substance's epsilon,
//! atom mass 1. Rendering, input handling, and persistence are external
//! concerns; the engine exposes a single mutating `step(dt)` per model plus
//! a small command surface, and read-only state for display.

pub mod bonding;
pub mod data_set;
pub mod dynamics;
pub mod forces;
pub mod geometry;
pub mod phase;
pub mod state;
pub mod substance;

#[cfg(test)]
mod tests;

pub use bonding::BondState;
pub use data_set::MoleculeDataSet;
pub use phase::Phase;
pub use state::{DualAtomModel, MultiParticleModel, SimConfig};
pub use substance::{Substance, SubstanceDescriptor};

/// Upper bound on molecules in container mode. The pair loop is O(n²) with no
/// spatial partitioning, which is fine at this scale and not beyond it.
pub const MAX_MOLECULES: usize = 500;

// Normalized temperature set points for the phase presets.
pub const SOLID_TEMPERATURE: f64 = 0.15;
pub const LIQUID_TEMPERATURE: f64 = 0.34;
pub const GAS_TEMPERATURE: f64 = 1.0;

/// Errors from recoverable engine operations, e.g. phase placement running
/// out of room. Carries a description; callers log or surface it and the
/// simulation continues with prior state.
#[derive(Debug)]
pub struct SimError {
    pub descrip: String,
}

impl SimError {
    pub fn new(descrip: &str) -> Self {
        Self {
            descrip: descrip.to_owned(),
        }
    }
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.descrip)
    }
}

impl std::error::Error for SimError {}
