use crate::elevator::animator::PositionAnimator;
use crate::shared::{Behaviour, ElevatorSnapshot, Passenger, SimTime};
use log::{debug, warn};

/**
 * Drives one elevator through its pickup -> dropoff -> dispatch cycle.
 *
 * The `ElevatorFSM` keeps the cycle as an explicit `Phase` and moves between
 * phases only through `handle_event`. Moves are carried out by the owned
 * `PositionAnimator`; dwell times are deadlines on the virtual clock that the
 * coordinator checks every tick.
 *
 * # Fields
 * - `id`:              Index of the elevator in the bank.
 * - `animator`:        Continuous position and running move.
 * - `phase`:           Where in the cycle the elevator is.
 * - `pickup_floor`:    1-indexed floor of an assigned passenger not yet picked up.
 * - `is_idle`:         False only while a move is running.
 * - `dwell_time_ms`:   Boarding and alighting time.
 *
 */

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Parked, or between a delivery and the next dispatch.
    Idle,
    MovingToPickup(Passenger),
    Boarding { passenger: Passenger, until: SimTime },
    MovingToDropoff(Passenger),
    Alighting { until: SimTime },
    Parking,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Assigned(Passenger),
    Park,
    Arrived,
    DwellElapsed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Continue,
    /// Passenger left the car; the elevator needs a new dispatch.
    Delivered,
    /// Reached the ground floor with nothing to do.
    Parked,
}

pub struct ElevatorFSM {
    id: usize,
    animator: PositionAnimator,
    phase: Phase,
    pickup_floor: Option<u32>,
    is_idle: bool,
    dwell_time_ms: u64,
}

impl ElevatorFSM {
    pub fn new(id: usize, dwell_time_ms: u64) -> ElevatorFSM {
        ElevatorFSM {
            id,
            animator: PositionAnimator::new(),
            phase: Phase::Idle,
            pickup_floor: None,
            is_idle: true,
            dwell_time_ms,
        }
    }

    pub fn handle_event(&mut self, event: Event, now: SimTime) -> Outcome {
        match (self.phase, event) {
            (Phase::Idle, Event::Assigned(passenger)) => {
                debug!(
                    "Elevator {} assigned passenger {} -> {}",
                    self.id, passenger.from, passenger.to
                );
                self.pickup_floor = Some(passenger.from);
                self.move_to_floor(passenger.pickup_position());
                self.phase = Phase::MovingToPickup(passenger);
                Outcome::Continue
            }

            (Phase::Idle, Event::Park) => {
                debug!("Elevator {} parking", self.id);
                self.move_to_floor(0);
                self.phase = Phase::Parking;
                Outcome::Continue
            }

            (Phase::MovingToPickup(passenger), Event::Arrived) => {
                debug!("Elevator {} boarding at floor {}", self.id, passenger.from);
                self.phase = Phase::Boarding {
                    passenger,
                    until: now.after_millis(self.dwell_time_ms),
                };
                Outcome::Continue
            }

            (Phase::Boarding { passenger, .. }, Event::DwellElapsed) => {
                self.move_to_floor(passenger.dropoff_position());
                self.phase = Phase::MovingToDropoff(passenger);
                Outcome::Continue
            }

            (Phase::MovingToDropoff(passenger), Event::Arrived) => {
                debug!("Elevator {} alighting at floor {}", self.id, passenger.to);
                self.phase = Phase::Alighting {
                    until: now.after_millis(self.dwell_time_ms),
                };
                Outcome::Continue
            }

            (Phase::Alighting { .. }, Event::DwellElapsed) => {
                self.phase = Phase::Idle;
                Outcome::Delivered
            }

            (Phase::Parking, Event::Arrived) => {
                debug!("Elevator {} parked", self.id);
                self.phase = Phase::Idle;
                Outcome::Parked
            }

            (phase, event) => {
                warn!(
                    "Elevator {} ignored {:?} while in {:?}",
                    self.id, event, phase
                );
                Outcome::Continue
            }
        }
    }

    /// One animation step for a running move.
    pub fn advance(&mut self) {
        self.animator.advance();
    }

    /// Ends the running move if it reached its target and feeds the arrival
    /// to the state machine.
    pub fn check_arrival(&mut self, now: SimTime) -> Outcome {
        if !self.animator.has_arrived() || !self.animator.stop() {
            return Outcome::Continue;
        }

        self.is_idle = true;
        self.pickup_floor = None;
        self.handle_event(Event::Arrived, now)
    }

    /// Ends a dwell whose deadline has passed.
    pub fn check_dwell(&mut self, now: SimTime) -> Outcome {
        match self.dwell_until() {
            Some(until) if until <= now => self.handle_event(Event::DwellElapsed, now),
            _ => Outcome::Continue,
        }
    }

    pub fn dwell_until(&self) -> Option<SimTime> {
        match self.phase {
            Phase::Boarding { until, .. } | Phase::Alighting { until } => Some(until),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id: self.id,
            position: self.animator.position(),
            target_floor: self.animator.target(),
            behaviour: self.behaviour(),
            pickup_floor: self.pickup_floor,
        }
    }

    pub fn behaviour(&self) -> Behaviour {
        if self.is_idle {
            Behaviour::Idle
        } else {
            Behaviour::Moving
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn position(&self) -> f64 {
        self.animator.position()
    }

    #[cfg(test)]
    pub fn target_floor(&self) -> u32 {
        self.animator.target()
    }

    pub fn pickup_floor(&self) -> Option<u32> {
        self.pickup_floor
    }

    pub fn is_idle(&self) -> bool {
        self.is_idle
    }

    #[cfg(test)]
    pub fn is_moving(&self) -> bool {
        self.animator.is_active()
    }

    pub fn is_parked(&self) -> bool {
        self.phase == Phase::Idle && !self.animator.is_active()
    }

    fn move_to_floor(&mut self, target: u32) {
        self.is_idle = false;
        self.animator.start(target);
    }
}
