/***************************************/
/*             Constants               */
/***************************************/

/// Floors per tick while far from the target.
pub const CRUISE_VELOCITY: f64 = 0.2;

/// Floors per tick once closer than `APPROACH_DISTANCE`.
pub const APPROACH_VELOCITY: f64 = 0.1;

pub const APPROACH_DISTANCE: f64 = 5.0;

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Owns one elevator's continuous position.
 *
 * A move is started with `start`, advanced once per tick with `advance`, and
 * cancelled with `stop` once `has_arrived` reports the target. The velocity
 * is chosen from the distance left at every step, so a long move slows down
 * when it gets within `APPROACH_DISTANCE` of the target.
 */
#[derive(Debug, Clone)]
pub struct PositionAnimator {
    position: f64,
    target: u32,
    active: bool,
}

impl PositionAnimator {
    pub fn new() -> PositionAnimator {
        PositionAnimator {
            position: 0.0,
            target: 0,
            active: false,
        }
    }

    pub fn start(&mut self, target: u32) {
        self.target = target;
        self.active = true;
    }

    /// Moves one step toward the target without overshooting it.
    /// Does nothing unless a move is in progress.
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }

        let target = self.target as f64;
        let velocity = self.velocity();

        if self.position < target {
            self.position += velocity;
            if self.position > target {
                self.position = target;
            }
        } else if self.position > target {
            self.position -= velocity;
            if self.position < target {
                self.position = target;
            }
        }
    }

    /// Exact comparison, the clamp in `advance` lands on the target.
    pub fn has_arrived(&self) -> bool {
        self.active && self.position == self.target as f64
    }

    /// Cancels the running move. Returns true only for the call that actually
    /// ended a move, so an arrival is reported exactly once.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    pub fn velocity(&self) -> f64 {
        if (self.position - self.target as f64).abs() < APPROACH_DISTANCE {
            APPROACH_VELOCITY
        } else {
            CRUISE_VELOCITY
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for PositionAnimator {
    fn default() -> Self {
        PositionAnimator::new()
    }
}
