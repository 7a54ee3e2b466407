//! The canonical simulation state: per-molecule parallel arrays plus the
//! derived per-atom position array.
//!
//! The data set is rebuilt wholesale when the substance or molecule count
//! changes, and mutated in place every step otherwise. Atom positions are
//! always reconstructed from molecule state via the resolved updater; they
//! are never integrated independently.

use glam::DVec2;

use crate::{
    geometry::AtomPositionUpdater,
    substance::{Substance, SubstanceDescriptor},
    MAX_MOLECULES,
};

#[derive(Clone, Debug)]
pub struct MoleculeDataSet {
    pub descriptor: SubstanceDescriptor,
    /// Updater strategy, resolved once at construction.
    pub updater: AtomPositionUpdater,

    // Per-molecule parallel arrays, index 0..n_molecules.
    pub com_positions: Vec<DVec2>,
    pub velocities: Vec<DVec2>,
    pub accelerations: Vec<DVec2>,
    pub rotation_angles: Vec<f64>,
    pub rotation_rates: Vec<f64>,
    pub rotational_accelerations: Vec<f64>,

    /// Derived: length == n_molecules * atoms_per_molecule, rebuilt each
    /// step from COM position + rotation.
    pub atom_positions: Vec<DVec2>,

    pub temperature_set_point: f64,
    pub measured_temperature: f64,
    pub measured_pressure: f64,
    /// Interaction-strength multiplier applied to the normalized epsilon.
    pub scaled_epsilon: f64,
}

impl MoleculeDataSet {
    pub fn new(substance: Substance, n_molecules: usize, temperature_set_point: f64) -> Self {
        let n = n_molecules.min(MAX_MOLECULES);
        let descriptor = SubstanceDescriptor::new(substance);
        let apm = descriptor.atoms_per_molecule;

        let mut ds = Self {
            updater: AtomPositionUpdater::for_atom_count(apm),
            descriptor,
            com_positions: vec![DVec2::ZERO; n],
            velocities: vec![DVec2::ZERO; n],
            accelerations: vec![DVec2::ZERO; n],
            rotation_angles: vec![0.0; n],
            rotation_rates: vec![0.0; n],
            rotational_accelerations: vec![0.0; n],
            atom_positions: vec![DVec2::ZERO; n * apm],
            temperature_set_point,
            measured_temperature: temperature_set_point,
            measured_pressure: 0.0,
            scaled_epsilon: 1.0,
        };
        ds.update_atom_positions();
        ds
    }

    pub fn n_molecules(&self) -> usize {
        self.com_positions.len()
    }

    pub fn atoms_per_molecule(&self) -> usize {
        self.descriptor.atoms_per_molecule
    }

    /// Whether molecules carry rotational state. Monatomic species have no
    /// rotational degree of freedom.
    pub fn rotates(&self) -> bool {
        self.atoms_per_molecule() > 1
    }

    /// Translational + rotational degrees of freedom of the whole set.
    pub fn degrees_of_freedom(&self) -> usize {
        let per_molecule = if self.rotates() { 3 } else { 2 };
        per_molecule * self.n_molecules()
    }

    /// Rebuild the derived atom-position array from molecule state.
    pub fn update_atom_positions(&mut self) {
        self.updater.update(
            &self.descriptor.geometry,
            &self.com_positions,
            &self.rotation_angles,
            &mut self.atom_positions,
        );
        debug_assert_eq!(
            self.atom_positions.len(),
            self.n_molecules() * self.atoms_per_molecule()
        );
    }

    /// Instantaneous kinetic energy, translational + rotational.
    pub fn kinetic_energy(&self) -> f64 {
        let m = self.descriptor.geometry.mass;
        let i = self.descriptor.geometry.inertia;

        let trans: f64 = self
            .velocities
            .iter()
            .map(|v| 0.5 * m * v.length_squared())
            .sum();
        let rot: f64 = self
            .rotation_rates
            .iter()
            .map(|w| 0.5 * i * w * w)
            .sum();
        trans + rot
    }

    /// Temperature from kinetic energy over degrees of freedom; this is what
    /// the thermostat and the read-only view see.
    pub fn measure_temperature(&mut self) -> f64 {
        let dof = self.degrees_of_freedom();
        if dof == 0 {
            self.measured_temperature = 0.0;
            return 0.0;
        }
        self.measured_temperature = 2.0 * self.kinetic_energy() / dof as f64;
        self.measured_temperature
    }

    /// Append one molecule with the given state. Caller is responsible for
    /// overlap checks; this only maintains the parallel-array invariant.
    pub fn push_molecule(&mut self, position: DVec2, velocity: DVec2) {
        self.com_positions.push(position);
        self.velocities.push(velocity);
        self.accelerations.push(DVec2::ZERO);
        self.rotation_angles.push(0.0);
        self.rotation_rates.push(0.0);
        self.rotational_accelerations.push(0.0);
        self.atom_positions
            .resize(self.com_positions.len() * self.atoms_per_molecule(), DVec2::ZERO);
        self.update_atom_positions();
    }
}
