//! Phase presets: reposition the whole system into a solid, liquid, or gas
//! arrangement and re-draw velocities at the matching temperature.
//!
//! Placement works scratch-then-commit: candidate positions are built in a
//! separate buffer and the data set is only touched once a full placement
//! exists. A failed placement leaves the simulation exactly as it was.

use glam::DVec2;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::{
    data_set::MoleculeDataSet,
    dynamics::container::Container,
    forces::SIGMA_TO_R_MIN,
    SimError, GAS_TEMPERATURE, LIQUID_TEMPERATURE, SOLID_TEMPERATURE,
};

// Placement margin from the walls, inside the wall-force range.
const MARGIN: f64 = 0.8;

// Minimum center separation for gas placement, in diameters. Multi-atom
// molecules get extra clearance for their rotating arms.
const GAS_MIN_SEPARATION_MONATOMIC: f64 = 1.2;
const GAS_MIN_SEPARATION_MULTI: f64 = 1.5;

/// Random candidates per molecule before falling back to a grid scan.
const PLACEMENT_ATTEMPTS: usize = 500;

/// Grid-scan resolution for the placement fallback.
const SCAN_STEP: f64 = 0.25;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
}

impl Phase {
    /// Normalized temperature set point for the preset.
    pub fn temperature(self) -> f64 {
        match self {
            Self::Solid => SOLID_TEMPERATURE,
            Self::Liquid => LIQUID_TEMPERATURE,
            Self::Gas => GAS_TEMPERATURE,
        }
    }
}

/// Rearrange all molecules into the given phase and re-draw velocities at its
/// temperature. On failure (not enough room) the data set is left unchanged
/// and the error is returned for the caller to surface.
pub fn set_phase(
    data: &mut MoleculeDataSet,
    cont: &Container,
    phase: Phase,
    rng: &mut StdRng,
) -> Result<(), SimError> {
    let n = data.n_molecules();
    let pad = site_extent(data);

    let positions = match phase {
        // Equilibrium spacing, light jitter so the lattice is not perfectly
        // degenerate.
        Phase::Solid => place_lattice(n, cont, SIGMA_TO_R_MIN + pad, 0.03, rng)?,
        // Looser, noisier lattice; the dynamics melt it within a few steps.
        Phase::Liquid => place_lattice(n, cont, 1.25 * SIGMA_TO_R_MIN + pad, 0.15, rng)?,
        Phase::Gas => place_gas(n, cont, gas_min_separation(data) + pad, rng)?,
    };

    data.com_positions = positions;
    data.temperature_set_point = phase.temperature();
    draw_velocities(data, phase.temperature(), rng);

    for a in &mut data.accelerations {
        *a = DVec2::ZERO;
    }
    for (angle, alpha) in data
        .rotation_angles
        .iter_mut()
        .zip(&mut data.rotational_accelerations)
    {
        *angle = rng.random_range(0.0..std::f64::consts::TAU);
        *alpha = 0.0;
    }
    data.update_atom_positions();
    data.measure_temperature();

    log::info!("phase set to {phase:?}, {n} molecules");
    Ok(())
}

/// Sample velocities from the Maxwell-Boltzmann distribution at
/// `temperature`, then remove the net drift so the system has no bulk motion.
pub fn draw_velocities(data: &mut MoleculeDataSet, temperature: f64, rng: &mut StdRng) {
    let m = data.descriptor.geometry.mass;
    let inertia = data.descriptor.geometry.inertia;
    let scale = (temperature / m).sqrt();

    for v in &mut data.velocities {
        let nx: f64 = rng.sample(StandardNormal);
        let ny: f64 = rng.sample(StandardNormal);
        *v = DVec2::new(nx * scale, ny * scale);
    }

    let n = data.velocities.len();
    if n > 0 {
        let drift: DVec2 = data.velocities.iter().sum::<DVec2>() / n as f64;
        for v in &mut data.velocities {
            *v -= drift;
        }
    }

    if data.rotates() && inertia > 0.0 {
        let w_scale = (temperature / inertia).sqrt();
        for w in &mut data.rotation_rates {
            let nw: f64 = rng.sample(StandardNormal);
            *w = nw * w_scale;
        }
    } else {
        for w in &mut data.rotation_rates {
            *w = 0.0;
        }
    }
}

/// Rows of molecules filled bottom-up, centered horizontally, each jittered
/// by up to `jitter` per axis.
fn place_lattice(
    n: usize,
    cont: &Container,
    spacing: f64,
    jitter: f64,
    rng: &mut StdRng,
) -> Result<Vec<DVec2>, SimError> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let usable_width = cont.width - 2.0 * MARGIN;
    let cols = (usable_width / spacing).floor() as usize;
    if cols == 0 {
        return Err(SimError::new("container too narrow for lattice placement"));
    }
    let rows = n.div_ceil(cols);
    if MARGIN + rows as f64 * spacing > cont.height {
        return Err(SimError::new("container too short for lattice placement"));
    }

    let x0 = 0.5 * (cont.width - (cols.min(n) as f64 - 1.0) * spacing);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let row = i / cols;
        let col = i % cols;
        // Offset alternate rows by half a spacing, close-packed style.
        let stagger = if row % 2 == 1 { 0.5 * spacing } else { 0.0 };
        let base = DVec2::new(
            x0 + col as f64 * spacing + stagger,
            MARGIN + row as f64 * spacing,
        );
        out.push(base + jitter_vec(jitter, rng));
    }
    Ok(out)
}

fn gas_min_separation(data: &MoleculeDataSet) -> f64 {
    if data.atoms_per_molecule() == 1 {
        GAS_MIN_SEPARATION_MONATOMIC
    } else {
        GAS_MIN_SEPARATION_MULTI
    }
}

/// Worst-case reach of a molecule's interaction sites past its COM, doubled
/// for a pair. COM separations are padded by this so no two sites can start
/// deep inside each other's repulsive core at any orientation.
fn site_extent(data: &MoleculeDataSet) -> f64 {
    let geo = &data.descriptor.geometry;
    2.0 * geo
        .lj_sites
        .iter()
        .map(|&i| geo.offsets[i].length())
        .fold(0.0, f64::max)
}

/// Uniformly random positions with a minimum separation. Each molecule gets
/// a bounded number of random candidates; if they all collide, an exhaustive
/// grid scan finds a spot if one exists at all.
fn place_gas(
    n: usize,
    cont: &Container,
    min_sep: f64,
    rng: &mut StdRng,
) -> Result<Vec<DVec2>, SimError> {
    let mut placed: Vec<DVec2> = Vec::with_capacity(n);

    'molecule: for _ in 0..n {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let cand = DVec2::new(
                rng.random_range(MARGIN..cont.width - MARGIN),
                rng.random_range(MARGIN..cont.height - MARGIN),
            );
            if clears(cand, &placed, min_sep) {
                placed.push(cand);
                continue 'molecule;
            }
        }

        match grid_scan(&placed, cont, min_sep) {
            Some(spot) => placed.push(spot),
            None => {
                return Err(SimError::new(
                    "no room left to place molecules at gas separation",
                ))
            }
        }
    }
    Ok(placed)
}

/// One open spot for injecting a single molecule into a running system.
/// Candidates are drawn along the top edge first, so injected molecules enter
/// from above; if the whole edge is occupied, the grid-scan fallback looks
/// anywhere.
pub(crate) fn injection_spot(
    data: &MoleculeDataSet,
    cont: &Container,
    rng: &mut StdRng,
) -> Option<DVec2> {
    let min_sep = gas_min_separation(data) + site_extent(data);
    let placed = &data.com_positions;

    for _ in 0..PLACEMENT_ATTEMPTS {
        let cand = DVec2::new(
            rng.random_range(MARGIN..cont.width - MARGIN),
            cont.height - MARGIN,
        );
        if clears(cand, placed, min_sep) {
            return Some(cand);
        }
    }
    grid_scan(placed, cont, min_sep)
}

/// Deterministic sweep from the lower-left corner; first clear cell wins.
fn grid_scan(placed: &[DVec2], cont: &Container, min_sep: f64) -> Option<DVec2> {
    let mut y = MARGIN;
    while y <= cont.height - MARGIN {
        let mut x = MARGIN;
        while x <= cont.width - MARGIN {
            let cand = DVec2::new(x, y);
            if clears(cand, placed, min_sep) {
                return Some(cand);
            }
            x += SCAN_STEP;
        }
        y += SCAN_STEP;
    }
    None
}

fn clears(cand: DVec2, placed: &[DVec2], min_sep: f64) -> bool {
    placed.iter().all(|p| p.distance(cand) >= min_sep)
}

fn jitter_vec(jitter: f64, rng: &mut StdRng) -> DVec2 {
    if jitter == 0.0 {
        return DVec2::ZERO;
    }
    DVec2::new(
        rng.random_range(-jitter..jitter),
        rng.random_range(-jitter..jitter),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Substance;
    use rand::SeedableRng;

    #[test]
    fn gas_placement_respects_minimum_separation() {
        let mut data = MoleculeDataSet::new(Substance::Neon, 60, 0.0);
        let cont = Container::new(25.0, 25.0);
        let mut rng = StdRng::seed_from_u64(42);

        set_phase(&mut data, &cont, Phase::Gas, &mut rng).unwrap();

        for i in 0..60 {
            for j in (i + 1)..60 {
                let d = data.com_positions[i].distance(data.com_positions[j]);
                assert!(d >= GAS_MIN_SEPARATION_MONATOMIC, "pair {i},{j} at {d}");
            }
        }
        assert_eq!(data.temperature_set_point, GAS_TEMPERATURE);
    }

    #[test]
    fn solid_placement_preserves_count_and_stays_inside() {
        let mut data = MoleculeDataSet::new(Substance::Argon, 50, 0.0);
        let cont = Container::new(20.0, 20.0);
        let mut rng = StdRng::seed_from_u64(1);

        set_phase(&mut data, &cont, Phase::Solid, &mut rng).unwrap();

        assert_eq!(data.n_molecules(), 50);
        for p in &data.com_positions {
            assert!(p.x > 0.0 && p.x < 20.0 && p.y > 0.0 && p.y < 20.0);
        }
        // Neighbors sit near the potential minimum.
        let d = data.com_positions[0].distance(data.com_positions[1]);
        assert!((d - SIGMA_TO_R_MIN).abs() < 0.1, "lattice spacing {d}");
    }

    #[test]
    fn failed_placement_leaves_state_untouched() {
        let mut data = MoleculeDataSet::new(Substance::Neon, 100, 0.0);
        let cont = Container::new(4.0, 4.0);
        let mut rng = StdRng::seed_from_u64(9);

        let before = data.com_positions.clone();
        let result = set_phase(&mut data, &cont, Phase::Gas, &mut rng);

        assert!(result.is_err());
        assert_eq!(data.com_positions, before);
        assert_eq!(data.n_molecules(), 100);
    }

    #[test]
    fn velocities_redrawn_near_phase_temperature() {
        let mut data = MoleculeDataSet::new(Substance::Argon, 200, 0.0);
        let cont = Container::new(40.0, 40.0);
        let mut rng = StdRng::seed_from_u64(5);

        set_phase(&mut data, &cont, Phase::Gas, &mut rng).unwrap();

        let t = data.measured_temperature;
        assert!(
            (t - GAS_TEMPERATURE).abs() < 0.15,
            "measured {t}, expected near {GAS_TEMPERATURE}"
        );
    }
}
