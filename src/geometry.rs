//! Rigid molecule geometry: fixed atom offsets relative to a molecule's
//! center of mass and orientation, plus the updater that reconstructs
//! absolute atom positions from molecule state.
//!
//! Offsets are computed once per substance at descriptor construction and
//! shared read-only; there is no lazily-built global table. All lengths are
//! in normalized units (same-species sigma = 1).

use glam::DVec2;

use crate::substance::Substance;

// Diatomic bond length, in diameters. The two atoms overlap slightly, as
// bonded atoms do.
pub const DIATOMIC_BOND_LENGTH: f64 = 0.9;

// Triatomic (water-like) internal geometry: O-H bond length in diameters and
// the H-O-H angle. The angle matches the measured water value.
pub const TRIATOMIC_BOND_LENGTH: f64 = 0.3;
pub const TRIATOMIC_BOND_ANGLE: f64 = 104.52 * std::f64::consts::PI / 180.0;

// Relative site masses for the triatomic species (O and H), normalized below
// so each molecule's total is atoms_per_molecule.
const M_O: f64 = 15.999;
const M_H: f64 = 1.008;

/// Precomputed, immutable rigid-body data for one substance. Atom offsets
/// are body-frame, centered so the mass-weighted sum is zero; rotating by
/// the molecule's angle and translating by its center of mass yields
/// absolute atom positions.
#[derive(Clone, Debug)]
pub struct RigidGeometry {
    /// Body-frame atom offsets, COM-centered.
    pub offsets: Vec<DVec2>,
    /// Per-atom masses; sum equals atoms-per-molecule.
    pub atom_masses: Vec<f64>,
    /// Indices into `offsets` of the Lennard-Jones interaction sites. Water
    /// carries a single site on the oxygen; other species interact at every
    /// atom.
    pub lj_sites: Vec<usize>,
    /// Total molecule mass.
    pub mass: f64,
    /// Rotational inertia about the COM; zero for monatomic species, which
    /// carry no rotational state.
    pub inertia: f64,
}

impl RigidGeometry {
    pub fn for_substance(substance: Substance) -> Self {
        match substance.atoms_per_molecule() {
            1 => Self::monatomic(),
            2 => Self::diatomic(),
            3 => Self::triatomic(),
            n => unreachable!("unsupported atom count: {n}"),
        }
    }

    fn monatomic() -> Self {
        Self {
            offsets: vec![DVec2::ZERO],
            atom_masses: vec![1.0],
            lj_sites: vec![0],
            mass: 1.0,
            inertia: 0.0,
        }
    }

    fn diatomic() -> Self {
        let half = 0.5 * DIATOMIC_BOND_LENGTH;
        let offsets = vec![DVec2::new(-half, 0.0), DVec2::new(half, 0.0)];
        let atom_masses = vec![1.0, 1.0];
        let inertia = inertia_about_com(&offsets, &atom_masses);

        Self {
            offsets,
            atom_masses,
            lj_sites: vec![0, 1],
            mass: 2.0,
            inertia,
        }
    }

    fn triatomic() -> Self {
        // O at the origin, hydrogens symmetric about the +x bisector, then
        // shift everything so the COM lands at the origin.
        let half_angle = 0.5 * TRIATOMIC_BOND_ANGLE;
        let r = TRIATOMIC_BOND_LENGTH;

        let o = DVec2::ZERO;
        let h0 = DVec2::new(r * half_angle.cos(), r * half_angle.sin());
        let h1 = DVec2::new(r * half_angle.cos(), -r * half_angle.sin());

        let scale = 3.0 / (M_O + 2.0 * M_H);
        let atom_masses = vec![M_O * scale, M_H * scale, M_H * scale];

        let com = (o * atom_masses[0] + h0 * atom_masses[1] + h1 * atom_masses[2]) / 3.0;
        let offsets = vec![o - com, h0 - com, h1 - com];
        let inertia = inertia_about_com(&offsets, &atom_masses);

        Self {
            offsets,
            atom_masses,
            lj_sites: vec![0], // O only; the hydrogens carry no LJ term
            mass: 3.0,
            inertia,
        }
    }

    pub fn atoms_per_molecule(&self) -> usize {
        self.offsets.len()
    }
}

/// I = Σ m·|r|² about the COM (2D: scalar, about the out-of-plane axis).
fn inertia_about_com(offsets: &[DVec2], masses: &[f64]) -> f64 {
    offsets
        .iter()
        .zip(masses)
        .map(|(r, m)| m * r.length_squared())
        .sum()
}

/// Rotate a body-frame vector by a molecule's orientation.
#[inline]
pub fn rotate(v: DVec2, sin: f64, cos: f64) -> DVec2 {
    DVec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Strategy for reconstructing absolute atom positions from molecule state.
/// Resolved once at data-set construction; no per-step dispatch on atom
/// count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomPositionUpdater {
    Monatomic,
    Diatomic,
    Triatomic,
}

impl AtomPositionUpdater {
    pub fn for_atom_count(atoms_per_molecule: usize) -> Self {
        match atoms_per_molecule {
            1 => Self::Monatomic,
            2 => Self::Diatomic,
            3 => Self::Triatomic,
            n => unreachable!("unsupported atom count: {n}"),
        }
    }

    /// Rebuild `atom_positions` from molecule COM positions and rotation
    /// angles. The derived array is never integrated on its own.
    ///
    /// Invoking an updater variant against a geometry with a different atom
    /// count is a programming error and asserts.
    pub fn update(
        &self,
        geometry: &RigidGeometry,
        com_positions: &[DVec2],
        rotation_angles: &[f64],
        atom_positions: &mut [DVec2],
    ) {
        let apm = geometry.atoms_per_molecule();
        assert_eq!(
            apm,
            match self {
                Self::Monatomic => 1,
                Self::Diatomic => 2,
                Self::Triatomic => 3,
            },
            "atom-position updater invoked against a mismatched geometry"
        );
        assert_eq!(atom_positions.len(), com_positions.len() * apm);

        match self {
            Self::Monatomic => {
                atom_positions.copy_from_slice(com_positions);
            }
            Self::Diatomic | Self::Triatomic => {
                for (i, (&com, &angle)) in
                    com_positions.iter().zip(rotation_angles).enumerate()
                {
                    let (sin, cos) = angle.sin_cos();
                    for (k, &offset) in geometry.offsets.iter().enumerate() {
                        atom_positions[i * apm + k] = com + rotate(offset, sin, cos);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diatomic_bond_length_invariant_under_rotation() {
        let geom = RigidGeometry::for_substance(Substance::Oxygen);
        let updater = AtomPositionUpdater::Diatomic;

        let coms = [DVec2::new(3.0, -1.5), DVec2::new(-7.25, 0.1)];
        let mut atoms = vec![DVec2::ZERO; 4];

        for i in 0..64 {
            let angle = i as f64 * std::f64::consts::TAU / 64.0;
            updater.update(&geom, &coms, &[angle, angle + 1.0], &mut atoms);

            for m in 0..2 {
                let d = atoms[2 * m].distance(atoms[2 * m + 1]);
                assert!(
                    (d - DIATOMIC_BOND_LENGTH).abs() < 1e-12,
                    "bond length {d} at angle {angle}"
                );
            }
        }
    }

    #[test]
    fn triatomic_offsets_are_com_centered() {
        let geom = RigidGeometry::for_substance(Substance::Water);

        let weighted: DVec2 = geom
            .offsets
            .iter()
            .zip(&geom.atom_masses)
            .map(|(r, m)| *r * *m)
            .sum();
        assert!(weighted.length() < 1e-12);
        assert!(geom.inertia > 0.0);
        assert!((geom.atom_masses.iter().sum::<f64>() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn monatomic_updater_is_identity() {
        let geom = RigidGeometry::for_substance(Substance::Argon);
        let coms = [DVec2::new(1.0, 2.0), DVec2::new(-4.0, 0.5)];
        let mut atoms = vec![DVec2::ZERO; 2];

        AtomPositionUpdater::Monatomic.update(&geom, &coms, &[0.3, 0.7], &mut atoms);
        assert_eq!(atoms[0], coms[0]);
        assert_eq!(atoms[1], coms[1]);
    }

    #[test]
    #[should_panic(expected = "mismatched geometry")]
    fn mismatched_updater_asserts() {
        let geom = RigidGeometry::for_substance(Substance::Argon);
        let mut atoms = vec![DVec2::ZERO; 2];
        AtomPositionUpdater::Diatomic.update(&geom, &[DVec2::ZERO], &[0.0], &mut atoms);
    }
}
