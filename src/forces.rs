#![allow(non_snake_case)]

//! Lennard-Jones force and potential kernels.
//!
//! \[ V_{LJ}(r) = 4 \epsilon \left[\left(\frac{\sigma}{r}\right)^{12}
//!     - \left(\frac{\sigma}{r}\right)^{6}\right] \]
//!
//! The force is the negative gradient:
//! F(r) = 24·ε/σ·[2(σ/r)^13 − (σ/r)^7], repulsive (positive, outward) below
//! the potential minimum at σ·2^(1/6) and attractive above it.

use glam::DVec2;

/// Separation below which the force input is clamped. Prevents the r^-13
/// singularity from producing non-finite output for degenerate (coincident)
/// configurations; such configurations are clamped, never rejected.
pub const MIN_DISTANCE: f64 = 0.1;

/// Pair separations beyond this contribute zero force. The r^-7 falloff
/// makes the attractive tail negligible well before this.
pub const CUTOFF_DISTANCE: f64 = 6.0;

/// Separation at the potential minimum for a given sigma: σ·2^(1/6).
pub const SIGMA_TO_R_MIN: f64 = 1.122_462_048_309_373;

/// Lennard-Jones potential at separation `r`.
pub fn V_lj(r: f64, σ: f64, ε: f64) -> f64 {
    let r = r.max(MIN_DISTANCE);
    if r > CUTOFF_DISTANCE {
        return 0.0;
    }

    let sr = σ / r;
    let sr6 = sr.powi(6);
    let sr12 = sr6 * sr6;

    4. * ε * (sr12 - sr6)
}

/// Scalar Lennard-Jones force magnitude at separation `r`. Positive is
/// repulsive (along the separation direction, pushing the pair apart).
pub fn force_lj_mag(r: f64, σ: f64, ε: f64) -> f64 {
    let r = r.max(MIN_DISTANCE);
    if r > CUTOFF_DISTANCE {
        return 0.0;
    }

    let sr = σ / r;
    let sr6 = sr.powi(6);
    let sr12 = sr6 * sr6;

    24. * ε * (2. * sr12 - sr6) / r
}

/// Lennard-Jones force vector on the atom at the origin of `dir`, where
/// `dir` is the unit vector from that atom toward its partner.
pub fn force_lj(dir: DVec2, r: f64, σ: f64, ε: f64) -> DVec2 {
    -dir * force_lj_mag(r, σ, ε)
}

/// The two terms of the LJ force split by sign, for display: repulsive
/// magnitude 48ε·σ¹²/r¹³ and attractive magnitude 24ε·σ⁶/r⁷. The net force
/// magnitude is `repulsive - attractive`.
pub fn decompose_lj(r: f64, σ: f64, ε: f64) -> (f64, f64) {
    let r = r.max(MIN_DISTANCE);
    let sr = σ / r;
    let sr6 = sr.powi(6);
    let sr12 = sr6 * sr6;

    let repulsive = 48. * ε * sr12 / r;
    let attractive = 24. * ε * sr6 / r;
    (repulsive, attractive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_is_zero_at_potential_minimum() {
        let r_min = SIGMA_TO_R_MIN;
        assert!(force_lj_mag(r_min, 1.0, 1.0).abs() < 1e-12);

        // Repulsive inside the minimum, attractive outside.
        assert!(force_lj_mag(1.0, 1.0, 1.0) > 0.0);
        assert!(force_lj_mag(1.5, 1.0, 1.0) < 0.0);
    }

    #[test]
    fn coincident_centers_are_clamped_not_nan() {
        let f = force_lj_mag(0.0, 1.0, 1.0);
        assert!(f.is_finite());
        assert!(f > 0.0);

        let v = force_lj(DVec2::X, 0.0, 1.0, 1.0);
        assert!(v.x.is_finite() && v.y.is_finite());
    }

    #[test]
    fn cutoff_zeroes_the_tail() {
        assert_eq!(force_lj_mag(CUTOFF_DISTANCE + 0.1, 1.0, 1.0), 0.0);
        assert_eq!(V_lj(CUTOFF_DISTANCE + 0.1, 1.0, 1.0), 0.0);
    }

    #[test]
    fn decomposition_sums_to_net_force() {
        for r in [0.9, 1.0, SIGMA_TO_R_MIN, 1.5, 2.0, 3.0] {
            let (rep, attr) = decompose_lj(r, 1.0, 1.0);
            assert!(rep >= 0.0 && attr >= 0.0);
            assert!(
                ((rep - attr) - force_lj_mag(r, 1.0, 1.0)).abs() < 1e-9,
                "r = {r}"
            );
        }
    }
}
