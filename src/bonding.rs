//! Bond formation and release between the two atoms of the dual-atom mode.
//!
//! The tracker is a small state machine fed once per step with the pair's
//! separation and relative speed. It never moves atoms itself; while a bond
//! is forming it asks the integrator to damp the relative motion so the pair
//! can settle into the potential well instead of oscillating through it
//! forever.

/// Capture band: an unbonded pair this close, moving slowly, starts bonding.
pub const CAPTURE_DISTANCE: f64 = 2.5;

/// Relative speed below which capture is allowed.
pub const CAPTURE_SPEED: f64 = 0.8;

/// Relative tolerance around the equilibrium separation that counts as
/// settled.
pub const SETTLE_TOLERANCE: f64 = 0.02;

/// Consecutive settled steps required before a forming bond is final.
pub const SETTLE_STEPS: u32 = 25;

/// Velocity retention per step while a bond is forming. Dissipates the
/// oscillation energy a captured atom arrives with.
pub const BONDING_DAMPING: f64 = 0.92;

/// Separation past which a released (or overstretched) pair is unbonded.
pub const ESCAPE_DISTANCE: f64 = 3.0;

/// Steps after a release during which re-capture is suppressed, so the
/// escaping atom is not immediately grabbed back.
pub const RELEASE_COOLDOWN: u32 = 50;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BondState {
    Unbonded,
    /// Captured and settling toward the equilibrium separation.
    Bonding,
    Bonded,
    /// Released; waiting for the pair to separate past the escape distance.
    AllowingEscape,
}

#[derive(Clone, Debug)]
pub struct BondTracker {
    pub state: BondState,
    /// Equilibrium separation of the active pair, σ·2^(1/6) for its sigma.
    r_eq: f64,
    settled_steps: u32,
    cooldown: u32,
}

impl BondTracker {
    pub fn new(r_eq: f64) -> Self {
        Self {
            state: BondState::Unbonded,
            r_eq,
            settled_steps: 0,
            cooldown: 0,
        }
    }

    /// Reset for a new pair with a different equilibrium separation. Any
    /// existing bond is discarded.
    pub fn set_pair(&mut self, r_eq: f64) {
        self.r_eq = r_eq;
        self.state = BondState::Unbonded;
        self.settled_steps = 0;
        self.cooldown = 0;
    }

    pub fn r_eq(&self) -> f64 {
        self.r_eq
    }

    /// Command a release. Only meaningful while bonding or bonded; otherwise
    /// a no-op.
    pub fn release(&mut self) {
        if matches!(self.state, BondState::Bonding | BondState::Bonded) {
            self.state = BondState::AllowingEscape;
            self.cooldown = RELEASE_COOLDOWN;
            self.settled_steps = 0;
        }
    }

    /// Extra velocity damping the integrator should apply this step, if any.
    pub fn damping(&self) -> Option<f64> {
        match self.state {
            BondState::Bonding => Some(BONDING_DAMPING),
            _ => None,
        }
    }

    /// Advance the machine one step from the pair's current separation and
    /// relative speed.
    pub fn evaluate(&mut self, separation: f64, relative_speed: f64) -> BondState {
        match self.state {
            BondState::Unbonded => {
                if self.capture_allowed(separation, relative_speed) {
                    self.state = BondState::Bonding;
                    self.settled_steps = 0;
                }
            }
            BondState::Bonding => {
                if separation > ESCAPE_DISTANCE {
                    // Capture failed; the atom got away.
                    self.state = BondState::Unbonded;
                } else if (separation - self.r_eq).abs() <= SETTLE_TOLERANCE * self.r_eq {
                    self.settled_steps += 1;
                    if self.settled_steps >= SETTLE_STEPS {
                        self.state = BondState::Bonded;
                    }
                } else {
                    self.settled_steps = 0;
                }
            }
            BondState::Bonded => {
                // A bonded pair torn past the escape distance, e.g. by the
                // user dragging the atom away, gets an implicit release; the
                // escape state then unbonds it on the next evaluation.
                if separation > ESCAPE_DISTANCE {
                    self.state = BondState::AllowingEscape;
                    self.cooldown = RELEASE_COOLDOWN;
                }
            }
            BondState::AllowingEscape => {
                if separation > ESCAPE_DISTANCE {
                    self.state = BondState::Unbonded;
                } else if self.cooldown > 0 {
                    self.cooldown -= 1;
                } else if self.capture_allowed(separation, relative_speed) {
                    // Never got away; it falls back in.
                    self.state = BondState::Bonding;
                    self.settled_steps = 0;
                }
            }
        }
        self.state
    }

    fn capture_allowed(&self, separation: f64, relative_speed: f64) -> bool {
        separation <= CAPTURE_DISTANCE && relative_speed <= CAPTURE_SPEED
    }
}
