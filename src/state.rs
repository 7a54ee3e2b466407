//! The two top-level simulation models and their command surfaces.
//!
//! [`MultiParticleModel`] drives many molecules in a container;
//! [`DualAtomModel`] drives a single pair for inspecting the interaction
//! itself. Both expose one mutating `step(dt)` and a handful of commands;
//! everything else is read-only state for a front end to display.

use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    bonding::{BondState, BondTracker},
    data_set::MoleculeDataSet,
    dynamics::{self, container::Container, thermostat::Thermostat},
    forces::{decompose_lj, force_lj, SIGMA_TO_R_MIN},
    phase::{self, Phase},
    substance::{self, Substance},
    SimError, SOLID_TEMPERATURE,
};

// Interaction-strength multiplier bounds for the adjustable substance.
const MIN_SCALED_EPSILON: f64 = 0.1;
const MAX_SCALED_EPSILON: f64 = 10.0;

/// Initial conditions for the container mode. All lengths are in particle
/// diameters.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub substance: Substance,
    pub n_molecules: usize,
    pub container_width: f64,
    pub container_height: f64,
    /// RNG seed; a fixed seed reproduces a run exactly.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            substance: Substance::Argon,
            n_molecules: 100,
            container_width: 24.0,
            container_height: 24.0,
            seed: 0,
        }
    }
}

/// Many molecules of one substance in a resizable container, with phase
/// presets, a thermostat, and a pressure gauge.
pub struct MultiParticleModel {
    pub data: MoleculeDataSet,
    pub container: Container,
    pub thermostat: Thermostat,
    rng: StdRng,
}

impl MultiParticleModel {
    /// Build the model and place its molecules as a solid. Fails only if the
    /// requested count cannot be placed in the requested container.
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut data =
            MoleculeDataSet::new(config.substance, config.n_molecules, SOLID_TEMPERATURE);
        let container = Container::new(config.container_width, config.container_height);

        phase::set_phase(&mut data, &container, Phase::Solid, &mut rng)?;

        Ok(Self {
            data,
            container,
            thermostat: Thermostat::default(),
            rng,
        })
    }

    /// Advance the simulation by `dt`.
    pub fn step(&mut self, dt: f64) {
        dynamics::step(
            &mut self.data,
            &mut self.container,
            &self.thermostat,
            &mut self.rng,
            dt,
        );
    }

    /// Swap the substance, keeping the molecule count. The new molecules are
    /// placed as a solid. On failure the old data set is kept.
    pub fn set_substance(&mut self, substance: Substance) -> Result<(), SimError> {
        let mut data =
            MoleculeDataSet::new(substance, self.data.n_molecules(), SOLID_TEMPERATURE);
        phase::set_phase(&mut data, &self.container, Phase::Solid, &mut self.rng)?;

        log::info!("substance set to {substance:?}");
        self.data = data;
        Ok(())
    }

    /// Rearrange the current molecules into a phase preset. On failure the
    /// current arrangement is kept and the error returned.
    pub fn set_phase(&mut self, phase: Phase) -> Result<(), SimError> {
        phase::set_phase(&mut self.data, &self.container, phase, &mut self.rng)
            .inspect_err(|e| log::warn!("phase change failed: {e}"))
    }

    pub fn set_target_temperature(&mut self, temperature: f64) {
        self.data.temperature_set_point = temperature.max(0.0);
    }

    /// Begin a gradual container resize toward `height`.
    pub fn resize_container(&mut self, height: f64) {
        self.container.resize_to(height);
    }

    /// Interaction-strength multiplier, clamped to a sane range. Most useful
    /// with the adjustable substance but applies to any.
    pub fn set_scaled_epsilon(&mut self, scale: f64) {
        self.data.scaled_epsilon = scale.clamp(MIN_SCALED_EPSILON, MAX_SCALED_EPSILON);
    }

    /// Add one molecule at the top of the container, moving inward at the
    /// thermal speed for the current set point. Fails when the system is
    /// full or no spot clears the minimum separation.
    pub fn inject_molecule(&mut self) -> Result<(), SimError> {
        if self.data.n_molecules() >= crate::MAX_MOLECULES {
            return Err(SimError::new("molecule limit reached"));
        }

        let spot = phase::injection_spot(&self.data, &self.container, &mut self.rng)
            .ok_or_else(|| SimError::new("no open spot to inject a molecule"))?;

        let t = self.data.temperature_set_point;
        let m = self.data.descriptor.geometry.mass;
        let speed = (t / m).sqrt().max(0.3);
        let velocity = DVec2::new(0.0, -speed);

        self.data.push_molecule(spot, velocity);
        Ok(())
    }

    pub fn temperature(&self) -> f64 {
        self.data.measured_temperature
    }

    pub fn pressure(&self) -> f64 {
        self.data.measured_pressure
    }

    pub fn n_molecules(&self) -> usize {
        self.data.n_molecules()
    }

    /// Absolute atom positions for display, one entry per atom.
    pub fn atom_positions(&self) -> &[DVec2] {
        &self.data.atom_positions
    }
}

/// A single pair of atoms, possibly of different substances, for inspecting
/// the interaction between them: one atom optionally pinned in place, the
/// other free, with a bond tracker and decomposed force read-outs.
///
/// Lengths are normalized to the pair's own sigma, so the equilibrium
/// separation is always σ·2^(1/6) with σ = 1.
pub struct DualAtomModel {
    pub fixed_substance: Substance,
    pub movable_substance: Substance,

    pub fixed_position: DVec2,
    pub fixed_velocity: DVec2,
    pub movable_position: DVec2,
    pub movable_velocity: DVec2,

    /// When pinned, the fixed atom ignores forces and never moves.
    pub pinned: bool,

    /// Pair well depth relative to the same-species mean. Like pairs are
    /// exactly 1; tabulated unlike pairs deviate from it.
    epsilon: f64,
    tracker: BondTracker,
    fixed_accel: DVec2,
    movable_accel: DVec2,
}

impl DualAtomModel {
    pub fn new(fixed: Substance, movable: Substance) -> Self {
        let epsilon = pair_epsilon_normalized(fixed, movable);

        Self {
            fixed_substance: fixed,
            movable_substance: movable,
            fixed_position: DVec2::ZERO,
            fixed_velocity: DVec2::ZERO,
            movable_position: DVec2::new(2.0, 0.0),
            movable_velocity: DVec2::ZERO,
            pinned: true,
            epsilon,
            tracker: BondTracker::new(SIGMA_TO_R_MIN),
            fixed_accel: DVec2::ZERO,
            movable_accel: DVec2::ZERO,
        }
    }

    /// Swap one or both substances. Resets any bond; pair strength is looked
    /// up fresh.
    pub fn set_substances(&mut self, fixed: Substance, movable: Substance) {
        self.fixed_substance = fixed;
        self.movable_substance = movable;
        self.epsilon = pair_epsilon_normalized(fixed, movable);
        self.tracker.set_pair(SIGMA_TO_R_MIN);
        log::info!("atom pair set to {fixed:?}/{movable:?}");
    }

    /// Advance the pair by `dt` and feed the bond tracker.
    pub fn step(&mut self, dt: f64) {
        assert!(dt.is_finite() && dt > 0.0, "non-positive or non-finite dt");

        self.movable_velocity += self.movable_accel * (dt / 2.0);
        self.movable_position += self.movable_velocity * dt;
        if !self.pinned {
            self.fixed_velocity += self.fixed_accel * (dt / 2.0);
            self.fixed_position += self.fixed_velocity * dt;
        }

        self.compute_accelerations();

        self.movable_velocity += self.movable_accel * (dt / 2.0);
        if !self.pinned {
            self.fixed_velocity += self.fixed_accel * (dt / 2.0);
        }

        // While a bond is forming, bleed off the oscillation energy so the
        // pair settles into the well.
        if let Some(damping) = self.tracker.damping() {
            self.movable_velocity *= damping;
            if !self.pinned {
                self.fixed_velocity *= damping;
            }
        }

        let relative_speed = (self.movable_velocity - self.fixed_velocity).length();
        self.tracker.evaluate(self.separation(), relative_speed);
    }

    fn compute_accelerations(&mut self) {
        let diff = self.fixed_position - self.movable_position;
        let r = diff.length();
        let f = force_lj(diff / r.max(f64::MIN_POSITIVE), r, 1.0, self.epsilon);

        // Atom mass 1 on both sides; force is acceleration.
        self.movable_accel = f;
        self.fixed_accel = if self.pinned { DVec2::ZERO } else { -f };
    }

    /// Move the free atom directly, e.g. from a drag gesture. Motion stops
    /// and any bond is released so the atom can be pulled away.
    pub fn set_movable_atom_position(&mut self, position: DVec2) {
        self.movable_position = position;
        self.movable_velocity = DVec2::ZERO;
        self.movable_accel = DVec2::ZERO;
        self.tracker.release();
        self.tracker.evaluate(self.separation(), 0.0);
    }

    /// Pin or unpin the fixed atom. Unpinning lets both atoms move.
    pub fn pin_atom(&mut self, pinned: bool) {
        self.pinned = pinned;
        if pinned {
            self.fixed_velocity = DVec2::ZERO;
            self.fixed_accel = DVec2::ZERO;
        }
    }

    /// Command a bond release; the pair enters the escape state.
    pub fn release_bond(&mut self) {
        self.tracker.release();
    }

    pub fn bond_state(&self) -> BondState {
        self.tracker.state
    }

    pub fn separation(&self) -> f64 {
        self.fixed_position.distance(self.movable_position)
    }

    /// Repulsive and attractive force magnitudes at the current separation,
    /// for display. Net force magnitude is their difference.
    pub fn force_components(&self) -> (f64, f64) {
        decompose_lj(self.separation(), 1.0, self.epsilon)
    }
}

/// Pair well depth normalized so a like pair is exactly 1. Tabulated unlike
/// pairs keep their measured deviation from the same-species mean.
fn pair_epsilon_normalized(a: Substance, b: Substance) -> f64 {
    let mean_self = 0.5 * (a.epsilon_self() + b.epsilon_self());
    substance::epsilon(a, b) / mean_self
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pair_strength_is_unity() {
        assert!((pair_epsilon_normalized(Substance::Argon, Substance::Argon) - 1.0).abs() < 1e-12);
        let ne_ar = pair_epsilon_normalized(Substance::Neon, Substance::Argon);
        assert!(ne_ar > 0.0 && (ne_ar - 1.0).abs() > 1e-3);
    }

    #[test]
    fn pinned_atom_never_moves() {
        let mut model = DualAtomModel::new(Substance::Argon, Substance::Argon);
        for _ in 0..2_000 {
            model.step(0.01);
            assert_eq!(model.fixed_position, DVec2::ZERO);
        }
    }

    #[test]
    fn drag_releases_the_bond() {
        let mut model = DualAtomModel::new(Substance::Argon, Substance::Argon);
        for _ in 0..2_000 {
            model.step(0.02);
        }
        assert_eq!(model.bond_state(), BondState::Bonded);

        model.set_movable_atom_position(DVec2::new(10.0, 0.0));
        assert_eq!(model.bond_state(), BondState::Unbonded);
        assert_eq!(model.movable_velocity, DVec2::ZERO);
    }

    #[test]
    fn force_components_cross_at_equilibrium() {
        let mut model = DualAtomModel::new(Substance::Argon, Substance::Argon);
        model.movable_position = DVec2::new(SIGMA_TO_R_MIN, 0.0);
        let (rep, attr) = model.force_components();
        assert!((rep - attr).abs() < 1e-9);

        model.movable_position = DVec2::new(0.9, 0.0);
        let (rep, attr) = model.force_components();
        assert!(rep > attr, "repulsion dominates inside the minimum");
    }
}
