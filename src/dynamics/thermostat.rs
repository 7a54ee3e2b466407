//! Stochastic velocity thermostat.
//!
//! Each step, every velocity component is partially damped toward zero and
//! re-excited with Gaussian noise scaled so the ensemble relaxes to the
//! set-point temperature:
//!
//! v' = γ·v + N(0,1)·sqrt(T·(1/m)·(1 − γ²))
//!
//! With γ close to 1 the coupling is weak and the natural dynamics dominate;
//! the relaxation time is roughly 1/(1 − γ) steps. Rotation rates get the
//! same treatment with 1/I in place of 1/m.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::data_set::MoleculeDataSet;

/// Set points below this are treated as a quench to absolute zero: pure
/// damping, no noise. Gaussian excitation at tiny temperatures leaves a
/// jittering residue that never visually settles.
pub const NEAR_ZERO_THRESHOLD: f64 = 0.01;

#[derive(Clone, Debug)]
pub struct Thermostat {
    /// Per-axis damping factors. Slightly unequal so a perfectly symmetric
    /// initial condition does not stay symmetric forever.
    pub gamma_x: f64,
    pub gamma_y: f64,
    pub gamma_rot: f64,

    /// Asymmetric quench factors used below [`NEAR_ZERO_THRESHOLD`]. The
    /// faster axis pulls the system out of cold drift patterns.
    pub quench_gamma_x: f64,
    pub quench_gamma_y: f64,
}

impl Default for Thermostat {
    fn default() -> Self {
        Self {
            gamma_x: 0.9999,
            gamma_y: 0.99985,
            gamma_rot: 0.9999,
            quench_gamma_x: 0.992,
            quench_gamma_y: 0.999,
        }
    }
}

impl Thermostat {
    /// Apply one thermostat step to every molecule. `data`'s set point is the
    /// target temperature; masses and inertia come from its geometry.
    pub fn step(&self, data: &mut MoleculeDataSet, rng: &mut StdRng) {
        let target = data.temperature_set_point;
        let m = data.descriptor.geometry.mass;
        let inertia = data.descriptor.geometry.inertia;

        if target < NEAR_ZERO_THRESHOLD {
            for v in &mut data.velocities {
                v.x *= self.quench_gamma_x;
                v.y *= self.quench_gamma_y;
            }
            for w in &mut data.rotation_rates {
                *w *= self.quench_gamma_x;
            }
            return;
        }

        let noise_x = (target * (1.0 - self.gamma_x * self.gamma_x) / m).sqrt();
        let noise_y = (target * (1.0 - self.gamma_y * self.gamma_y) / m).sqrt();

        for v in &mut data.velocities {
            let nx: f64 = rng.sample(StandardNormal);
            let ny: f64 = rng.sample(StandardNormal);
            v.x = self.gamma_x * v.x + nx * noise_x;
            v.y = self.gamma_y * v.y + ny * noise_y;
        }

        if data.rotates() && inertia > 0.0 {
            let noise_rot =
                (target * (1.0 - self.gamma_rot * self.gamma_rot) / inertia).sqrt();
            for w in &mut data.rotation_rates {
                let n: f64 = rng.sample(StandardNormal);
                *w = self.gamma_rot * *w + n * noise_rot;
            }
        }
    }
}
