//! The rectangular container: soft-walled bounds, rate-limited resizing, and
//! the wall-impulse pressure gauge.

use crate::forces::SIGMA_TO_R_MIN;

/// Effective sigma of the wall-particle interaction. Walls are soft; a
/// molecule approaching a wall sees a purely repulsive ramp switched off at
/// the potential minimum.
pub const WALL_SIGMA: f64 = 0.5;

/// Distance from a wall inside which the wall force acts.
pub const WALL_RANGE: f64 = WALL_SIGMA * SIGMA_TO_R_MIN;

/// Height change per unit simulated time while resizing. Resizes are gradual
/// so the contents can respond instead of tunneling through a teleported
/// wall.
pub const RESIZE_RATE: f64 = 2.0;

/// Number of recent steps the pressure gauge averages over. Instantaneous
/// wall impulses are extremely spiky; a single step usually records zero.
pub const PRESSURE_WINDOW: usize = 128;

/// Rectangular simulation region with its lower-left corner at the origin.
#[derive(Clone, Debug)]
pub struct Container {
    pub width: f64,
    pub height: f64,
    /// Height the container is resizing toward. Equal to `height` when not
    /// resizing.
    pub target_height: f64,

    /// Sum of wall-impulse magnitudes registered during the current step.
    impulse_accum: f64,
    /// Per-step impulse sums, a fixed-size ring.
    impulse_window: Vec<f64>,
    window_idx: usize,
    window_filled: usize,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            target_height: height,
            impulse_accum: 0.0,
            impulse_window: vec![0.0; PRESSURE_WINDOW],
            window_idx: 0,
            window_filled: 0,
        }
    }

    /// Begin a gradual resize toward `height`. Takes effect over subsequent
    /// steps at [`RESIZE_RATE`].
    pub fn resize_to(&mut self, height: f64) {
        self.target_height = height.max(WALL_RANGE * 4.0);
    }

    pub fn current_height(&self) -> f64 {
        self.height
    }

    pub fn is_resizing(&self) -> bool {
        self.height != self.target_height
    }

    /// Advance the height toward the target by at most one rate-limited
    /// increment. Monotone: the height never passes the target.
    pub fn step_resize(&mut self, dt: f64) {
        let max_step = RESIZE_RATE * dt;
        let gap = self.target_height - self.height;
        if gap.abs() <= max_step {
            self.height = self.target_height;
        } else {
            self.height += max_step * gap.signum();
        }
    }

    /// Register the magnitude of one wall impulse (|F|·dt) for the current
    /// step. Called by the force loop for every molecule-wall contact.
    pub fn on_wall_impact(&mut self, impulse: f64) {
        self.impulse_accum += impulse;
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    /// Close out the current step: bank its impulse sum into the ring and
    /// return the updated moving-average pressure, impulse per time per unit
    /// of wall length.
    pub fn finish_step(&mut self, dt: f64) -> f64 {
        self.impulse_window[self.window_idx] = self.impulse_accum;
        self.window_idx = (self.window_idx + 1) % PRESSURE_WINDOW;
        self.window_filled = (self.window_filled + 1).min(PRESSURE_WINDOW);
        self.impulse_accum = 0.0;

        let sum: f64 = self.impulse_window[..self.window_filled].iter().sum();
        sum / (self.window_filled as f64 * dt * self.perimeter())
    }
}
