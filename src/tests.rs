//! End-to-end scenarios driving the public model APIs.

use glam::DVec2;

use crate::{
    bonding::BondState,
    forces::SIGMA_TO_R_MIN,
    phase::Phase,
    state::{DualAtomModel, MultiParticleModel, SimConfig},
    substance::Substance,
    MAX_MOLECULES,
};

fn small_config(substance: Substance, n: usize) -> SimConfig {
    SimConfig {
        substance,
        n_molecules: n,
        container_width: 20.0,
        container_height: 20.0,
        seed: 1234,
    }
}

/// A free argon atom released from rest at twice the equilibrium range must
/// be captured, settle, and end up bonded near the potential minimum.
#[test]
fn free_atom_bonds_at_equilibrium_separation() {
    let mut model = DualAtomModel::new(Substance::Argon, Substance::Argon);
    model.movable_position = DVec2::new(2.0, 0.0);

    for _ in 0..1_000 {
        model.step(0.02);
    }

    assert_eq!(model.bond_state(), BondState::Bonded);
    let sep = model.separation();
    assert!(
        (sep - SIGMA_TO_R_MIN).abs() < 0.05 * SIGMA_TO_R_MIN,
        "settled at {sep}, expected near {SIGMA_TO_R_MIN}"
    );
}

/// Solid placement of a monatomic species: nothing overlaps, nothing is
/// lost, and the arrangement survives integration.
#[test]
fn solid_neon_keeps_its_molecules_apart() {
    let mut model = MultiParticleModel::new(&small_config(Substance::Neon, 50)).unwrap();

    let min_sep = |m: &MultiParticleModel| {
        let ps = &m.data.com_positions;
        let mut min = f64::MAX;
        for i in 0..ps.len() {
            for j in (i + 1)..ps.len() {
                min = min.min(ps[i].distance(ps[j]));
            }
        }
        min
    };

    assert_eq!(model.n_molecules(), 50);
    assert!(min_sep(&model) > 0.9, "placed too close: {}", min_sep(&model));

    for _ in 0..500 {
        model.step(0.005);
    }
    assert_eq!(model.n_molecules(), 50);
    // A cold solid stays condensed, not interpenetrating.
    assert!(min_sep(&model) > 0.7, "collapsed to {}", min_sep(&model));
    for p in &model.data.com_positions {
        assert!(p.x >= 0.0 && p.x <= 20.0 && p.y >= 0.0 && p.y <= 20.0);
    }
}

/// Halving the container height is gradual and monotone, never overshoots,
/// and keeps every molecule inside throughout.
#[test]
fn container_compression_is_gradual_and_contained() {
    let mut model = MultiParticleModel::new(&small_config(Substance::Argon, 40)).unwrap();
    model.set_phase(Phase::Gas).unwrap();

    model.resize_container(10.0);

    let mut prev_height = model.container.height;
    for _ in 0..20_000 {
        model.step(0.005);
        let h = model.container.height;
        assert!(h <= prev_height, "height rose during compression");
        assert!(h >= 10.0, "height overshot the target");
        prev_height = h;

        for p in &model.data.com_positions {
            assert!(p.y <= model.container.height, "molecule above the ceiling");
        }
    }
    assert_eq!(model.container.height, 10.0);
    assert_eq!(model.n_molecules(), 40);
}

#[test]
fn phase_changes_conserve_molecule_count() {
    let mut model = MultiParticleModel::new(&small_config(Substance::Neon, 60)).unwrap();

    for phase in [Phase::Gas, Phase::Liquid, Phase::Solid, Phase::Gas] {
        model.set_phase(phase).unwrap();
        assert_eq!(model.n_molecules(), 60);
    }
}

/// Identical seeds reproduce identical trajectories.
#[test]
fn runs_are_deterministic_for_a_fixed_seed() {
    let config = small_config(Substance::Argon, 30);
    let mut a = MultiParticleModel::new(&config).unwrap();
    let mut b = MultiParticleModel::new(&config).unwrap();

    for _ in 0..200 {
        a.step(0.005);
        b.step(0.005);
    }
    assert_eq!(a.data.com_positions, b.data.com_positions);
    assert_eq!(a.data.velocities, b.data.velocities);
}

#[test]
fn injection_grows_the_system_up_to_the_limit() {
    let mut model = MultiParticleModel::new(&small_config(Substance::Neon, 10)).unwrap();

    model.inject_molecule().unwrap();
    assert_eq!(model.n_molecules(), 11);

    let mut config = small_config(Substance::Neon, MAX_MOLECULES);
    config.container_width = 40.0;
    config.container_height = 40.0;
    let mut full = MultiParticleModel::new(&config).unwrap();
    assert!(full.inject_molecule().is_err());
}

/// Gas in a container under sustained stepping registers pressure on the
/// wall gauge.
#[test]
fn gas_registers_wall_pressure() {
    let mut model = MultiParticleModel::new(&small_config(Substance::Argon, 40)).unwrap();
    model.set_phase(Phase::Gas).unwrap();

    for _ in 0..5_000 {
        model.step(0.005);
    }
    assert!(model.pressure() > 0.0, "no wall impulses after 5000 steps");
}

/// Multi-atom molecules keep their rigid internal geometry through dynamics.
#[test]
fn oxygen_bond_length_is_rigid_through_integration() {
    let mut model = MultiParticleModel::new(&small_config(Substance::Oxygen, 20)).unwrap();
    model.set_phase(Phase::Liquid).unwrap();

    for _ in 0..1_000 {
        model.step(0.005);
    }

    let atoms = model.atom_positions();
    for m in 0..20 {
        let d = atoms[2 * m].distance(atoms[2 * m + 1]);
        assert!(
            (d - crate::geometry::DIATOMIC_BOND_LENGTH).abs() < 1e-9,
            "molecule {m} bond length {d}"
        );
    }
}
