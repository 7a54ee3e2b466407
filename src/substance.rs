//! Lennard-Jones parameters per substance and substance pair, plus the
//! immutable per-substance descriptor shared by every molecule of a data set.
//!
//! Parameter sources: same-species epsilon/sigma are published effective LJ
//! values (epsilon as well depth over k_B, in Kelvin; sigma in picometers).
//! The engine itself runs in normalized units (sigma = 1, epsilon = 1); the
//! physical values here feed display metadata and cross-species interactions
//! in the dual-atom mode.

use crate::geometry::RigidGeometry;

// Valid parameter ranges. The adjustable substance moves within these, and
// untabulated pairs fall back to the midpoint of each.
pub const MIN_EPSILON: f64 = 20.0; // K
pub const MAX_EPSILON: f64 = 450.0; // K
pub const MIN_SIGMA: f64 = 228.0; // pm
pub const MAX_SIGMA: f64 = 468.0; // pm

// Same-species parameters.
const NEON_EPSILON: f64 = 32.8;
const NEON_SIGMA: f64 = 308.0;
const ARGON_EPSILON: f64 = 111.84;
const ARGON_SIGMA: f64 = 362.8;
const OXYGEN_EPSILON: f64 = 113.0;
const OXYGEN_SIGMA: f64 = 365.0;
const WATER_EPSILON: f64 = 200.0;
const WATER_SIGMA: f64 = 444.0;

// Tabulated unlike pairs (measured, not combining-rule output).
const NEON_ARGON_EPSILON: f64 = 60.56;
const NEON_ARGON_SIGMA: f64 = 335.4;
const NEON_OXYGEN_EPSILON: f64 = 60.9;
const NEON_OXYGEN_SIGMA: f64 = 336.5;
const ARGON_OXYGEN_EPSILON: f64 = 112.4;
const ARGON_OXYGEN_SIGMA: f64 = 363.9;

// Atomic masses, Da.
const NEON_MASS: f64 = 20.18;
const ARGON_MASS: f64 = 39.95;
const OXYGEN_MASS: f64 = 16.0;
const WATER_MOLECULE_MASS: f64 = 18.015;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Substance {
    Neon,
    Argon,
    /// Diatomic O₂.
    Oxygen,
    /// Rigid triatomic, water-like geometry.
    Water,
    /// Monatomic with a user-adjustable interaction strength.
    Adjustable,
}

impl Substance {
    pub fn atoms_per_molecule(&self) -> usize {
        match self {
            Self::Neon | Self::Argon | Self::Adjustable => 1,
            Self::Oxygen => 2,
            Self::Water => 3,
        }
    }

    /// Well depth for a same-species pair, K over k_B. The adjustable
    /// substance has no fixed value; its default is the range midpoint.
    pub fn epsilon_self(&self) -> f64 {
        match self {
            Self::Neon => NEON_EPSILON,
            Self::Argon => ARGON_EPSILON,
            Self::Oxygen => OXYGEN_EPSILON,
            Self::Water => WATER_EPSILON,
            Self::Adjustable => 0.5 * (MIN_EPSILON + MAX_EPSILON),
        }
    }

    /// Zero-crossing distance for a same-species pair, pm.
    pub fn sigma_self(&self) -> f64 {
        match self {
            Self::Neon => NEON_SIGMA,
            Self::Argon => ARGON_SIGMA,
            Self::Oxygen => OXYGEN_SIGMA,
            Self::Water => WATER_SIGMA,
            Self::Adjustable => 0.5 * (MIN_SIGMA + MAX_SIGMA),
        }
    }

    pub fn molecule_mass(&self) -> f64 {
        match self {
            Self::Neon => NEON_MASS,
            Self::Argon => ARGON_MASS,
            Self::Oxygen => 2.0 * OXYGEN_MASS,
            Self::Water => WATER_MOLECULE_MASS,
            Self::Adjustable => ARGON_MASS,
        }
    }
}

/// Well depth for an arbitrary pair, symmetric in its arguments.
///
/// Known unlike pairs return tabulated values. Any pair involving the
/// adjustable substance, or any untabulated pair, returns the midpoint of
/// the valid epsilon range; this is a documented recoverable default, not
/// an error. A user-configured well depth for the adjustable substance does
/// not flow through this table: it lives on the [`SubstanceDescriptor`]
/// built via [`SubstanceDescriptor::with_epsilon`], and engine-side strength
/// is the data set's scaled-epsilon multiplier.
pub fn epsilon(a: Substance, b: Substance) -> f64 {
    use Substance::*;

    if a == b {
        return a.epsilon_self();
    }

    match (a, b) {
        (Neon, Argon) | (Argon, Neon) => NEON_ARGON_EPSILON,
        (Neon, Oxygen) | (Oxygen, Neon) => NEON_OXYGEN_EPSILON,
        (Argon, Oxygen) | (Oxygen, Argon) => ARGON_OXYGEN_EPSILON,
        _ => 0.5 * (MIN_EPSILON + MAX_EPSILON),
    }
}

/// Zero-crossing distance for an arbitrary pair, symmetric in its arguments.
/// Fallback behavior matches [`epsilon`].
pub fn sigma(a: Substance, b: Substance) -> f64 {
    use Substance::*;

    if a == b {
        return a.sigma_self();
    }

    match (a, b) {
        (Neon, Argon) | (Argon, Neon) => NEON_ARGON_SIGMA,
        (Neon, Oxygen) | (Oxygen, Neon) => NEON_OXYGEN_SIGMA,
        (Argon, Oxygen) | (Oxygen, Argon) => ARGON_OXYGEN_SIGMA,
        _ => 0.5 * (MIN_SIGMA + MAX_SIGMA),
    }
}

/// Immutable per-substance data shared read-only by every molecule of a data
/// set. Built once per substance selection; behavior downstream varies by
/// this data, not by type.
#[derive(Clone, Debug)]
pub struct SubstanceDescriptor {
    pub substance: Substance,
    pub atoms_per_molecule: usize,
    /// K over k_B; display/metadata value. Engine-side interaction strength
    /// is the data set's scaled-epsilon multiplier.
    pub epsilon: f64,
    /// pm; display/metadata value.
    pub sigma: f64,
    /// Display radius, pm.
    pub radius: f64,
    pub geometry: RigidGeometry,
}

impl SubstanceDescriptor {
    pub fn new(substance: Substance) -> Self {
        Self::with_epsilon(substance, substance.epsilon_self())
    }

    /// For the adjustable substance: a descriptor with a caller-chosen well
    /// depth, clamped to the valid range. Other substances ignore the
    /// override and use their tabulated value.
    pub fn with_epsilon(substance: Substance, eps: f64) -> Self {
        let epsilon = match substance {
            Substance::Adjustable => eps.clamp(MIN_EPSILON, MAX_EPSILON),
            _ => substance.epsilon_self(),
        };
        let sigma = substance.sigma_self();

        Self {
            substance,
            atoms_per_molecule: substance.atoms_per_molecule(),
            epsilon,
            sigma,
            radius: sigma / 2.0,
            geometry: RigidGeometry::for_substance(substance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Substance; 5] = [
        Substance::Neon,
        Substance::Argon,
        Substance::Oxygen,
        Substance::Water,
        Substance::Adjustable,
    ];

    #[test]
    fn pair_lookup_is_symmetric() {
        for a in ALL {
            for b in ALL {
                assert_eq!(epsilon(a, b), epsilon(b, a), "{a:?}/{b:?}");
                assert_eq!(sigma(a, b), sigma(b, a), "{a:?}/{b:?}");
            }
        }
    }

    #[test]
    fn untabulated_pairs_fall_back_to_midpoint() {
        // Water has no tabulated unlike pairs; the adjustable substance never
        // does. Both must resolve to the range midpoints, not an error.
        let eps_mid = 0.5 * (MIN_EPSILON + MAX_EPSILON);
        let sig_mid = 0.5 * (MIN_SIGMA + MAX_SIGMA);

        assert_eq!(epsilon(Substance::Water, Substance::Neon), eps_mid);
        assert_eq!(sigma(Substance::Water, Substance::Argon), sig_mid);
        assert_eq!(epsilon(Substance::Adjustable, Substance::Argon), eps_mid);
        assert_eq!(sigma(Substance::Adjustable, Substance::Oxygen), sig_mid);
    }

    #[test]
    fn known_pairs_return_tabulated_values() {
        assert_eq!(epsilon(Substance::Neon, Substance::Argon), 60.56);
        assert_eq!(epsilon(Substance::Argon, Substance::Argon), 111.84);
        assert_eq!(sigma(Substance::Neon, Substance::Neon), 308.0);
    }

    #[test]
    fn adjustable_epsilon_is_clamped() {
        let d = SubstanceDescriptor::with_epsilon(Substance::Adjustable, 1.0e6);
        assert_eq!(d.epsilon, MAX_EPSILON);
        let d = SubstanceDescriptor::with_epsilon(Substance::Adjustable, 0.0);
        assert_eq!(d.epsilon, MIN_EPSILON);
    }
}
