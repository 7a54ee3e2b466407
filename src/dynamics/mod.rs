//! Force evaluation and velocity-Verlet integration for the container mode.
//!
//! Each step is the standard two-stage scheme: half-kick from the stored
//! accelerations, drift, force recomputation, second half-kick. Rotation uses
//! the same scheme with scalar angular state; in 2D torque and angular
//! velocity are scalars about the out-of-plane axis.

pub mod container;
pub mod thermostat;

use glam::DVec2;
use rand::rngs::StdRng;

use crate::{
    data_set::MoleculeDataSet,
    forces::{force_lj, force_lj_mag, CUTOFF_DISTANCE},
    geometry::rotate,
};
use container::{Container, WALL_RANGE, WALL_SIGMA};
use thermostat::Thermostat;

/// Downward acceleration applied to every molecule in container mode. Small
/// relative to the interaction forces; enough for a condensed phase to pool
/// at the floor instead of drifting.
pub const GRAVITY: f64 = 0.045;

/// Safety margin for the post-drift position clamp. The soft walls normally
/// keep molecules inside; the clamp only catches a molecule that crossed a
/// wall within a single step.
const POSITION_MARGIN: f64 = 0.05;

/// Advance the whole system by `dt`.
pub fn step(
    data: &mut MoleculeDataSet,
    cont: &mut Container,
    thermostat: &Thermostat,
    rng: &mut StdRng,
    dt: f64,
) {
    assert!(dt.is_finite() && dt > 0.0, "non-positive or non-finite dt");

    cont.step_resize(dt);

    // First half-kick and drift.
    for i in 0..data.n_molecules() {
        data.velocities[i] += data.accelerations[i] * (dt / 2.0);
        data.com_positions[i] += data.velocities[i] * dt;
    }
    if data.rotates() {
        for i in 0..data.n_molecules() {
            data.rotation_rates[i] += data.rotational_accelerations[i] * (dt / 2.0);
            data.rotation_angles[i] += data.rotation_rates[i] * dt;
        }
    }
    clamp_into_container(data, cont);
    data.update_atom_positions();

    compute_accelerations(data, cont, dt);

    // Second half-kick.
    for i in 0..data.n_molecules() {
        data.velocities[i] += data.accelerations[i] * (dt / 2.0);
    }
    if data.rotates() {
        for i in 0..data.n_molecules() {
            data.rotation_rates[i] += data.rotational_accelerations[i] * (dt / 2.0);
        }
    }

    thermostat.step(data, rng);

    data.measured_pressure = cont.finish_step(dt);
    data.measure_temperature();
}

/// Recompute translational and rotational accelerations from scratch:
/// pairwise Lennard-Jones forces, gravity, and wall repulsion. Wall contacts
/// register their impulses on the container's pressure gauge.
pub fn compute_accelerations(data: &mut MoleculeDataSet, cont: &mut Container, dt: f64) {
    let n = data.n_molecules();
    let m = data.descriptor.geometry.mass;
    let inertia = data.descriptor.geometry.inertia;
    let ε = data.scaled_epsilon;

    let mut forces = vec![DVec2::ZERO; n];
    let mut torques = vec![0.0; n];

    pair_forces(data, ε, &mut forces, &mut torques);

    for i in 0..n {
        let wall = wall_force(data.com_positions[i], cont);
        if wall != DVec2::ZERO {
            cont.on_wall_impact(wall.length() * dt);
            forces[i] += wall;
        }

        data.accelerations[i] = forces[i] / m + DVec2::new(0.0, -GRAVITY);
        data.rotational_accelerations[i] = if inertia > 0.0 {
            torques[i] / inertia
        } else {
            0.0
        };
    }
}

/// Pairwise LJ contribution. Pairs are culled on COM separation before any
/// site work; interaction sites then contribute forces at their own
/// positions, which is where torque comes from for multi-atom molecules.
fn pair_forces(data: &MoleculeDataSet, ε: f64, forces: &mut [DVec2], torques: &mut [f64]) {
    let n = data.n_molecules();
    let sites = &data.descriptor.geometry.lj_sites;
    let offsets = &data.descriptor.geometry.offsets;
    let monatomic = data.atoms_per_molecule() == 1;

    for i in 0..n {
        for j in (i + 1)..n {
            let com_i = data.com_positions[i];
            let com_j = data.com_positions[j];
            if com_i.distance(com_j) > CUTOFF_DISTANCE {
                continue;
            }

            if monatomic {
                let diff = com_j - com_i;
                let r = diff.length();
                let f = force_lj(diff / r.max(f64::MIN_POSITIVE), r, 1.0, ε);
                forces[i] += f;
                forces[j] -= f;
                continue;
            }

            let (sin_i, cos_i) = data.rotation_angles[i].sin_cos();
            let (sin_j, cos_j) = data.rotation_angles[j].sin_cos();

            for &a in sites {
                let arm_i = rotate(offsets[a], sin_i, cos_i);
                let pos_a = com_i + arm_i;
                for &b in sites {
                    let arm_j = rotate(offsets[b], sin_j, cos_j);
                    let pos_b = com_j + arm_j;

                    let diff = pos_b - pos_a;
                    let r = diff.length();
                    let f = force_lj(diff / r.max(f64::MIN_POSITIVE), r, 1.0, ε);

                    forces[i] += f;
                    torques[i] += arm_i.perp_dot(f);
                    forces[j] -= f;
                    torques[j] += arm_j.perp_dot(-f);
                }
            }
        }
    }
}

/// Repulsive force from the four walls on a molecule at `pos`. Zero outside
/// [`WALL_RANGE`]; the LJ kernel is cut at its minimum, so the wall never
/// attracts.
fn wall_force(pos: DVec2, cont: &Container) -> DVec2 {
    let mut f = DVec2::ZERO;

    let pushes = [
        (pos.x, DVec2::X),                     // left wall
        (cont.width - pos.x, DVec2::NEG_X),    // right wall
        (pos.y, DVec2::Y),                     // floor
        (cont.height - pos.y, DVec2::NEG_Y),   // ceiling
    ];
    for (d, inward) in pushes {
        if d < WALL_RANGE {
            f += inward * force_lj_mag(d, WALL_SIGMA, 1.0);
        }
    }
    f
}

fn clamp_into_container(data: &mut MoleculeDataSet, cont: &Container) {
    for p in &mut data.com_positions {
        p.x = p.x.clamp(POSITION_MARGIN, cont.width - POSITION_MARGIN);
        p.y = p.y.clamp(POSITION_MARGIN, cont.height - POSITION_MARGIN);
    }
}
