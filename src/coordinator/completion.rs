/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::ElevatorFSM;
use crate::shared::{Report, SimTime};
use log::info;

/***************************************/
/*             Public API              */
/***************************************/

/// True iff no elevator has a move in progress.
pub fn is_all_idle(elevators: &[ElevatorFSM]) -> bool {
    elevators.iter().all(|elevator| elevator.is_idle())
}

/**
 * Counts deliveries and records when the simulation finished.
 *
 * `finish_time` is written by the first park that finds every elevator idle
 * and is never changed afterwards.
 */
#[derive(Debug, Clone)]
pub struct CompletionTracker {
    start_time: SimTime,
    finish_time: Option<SimTime>,
    delivered_count: u64,
}

impl CompletionTracker {
    pub fn new(start_time: SimTime) -> CompletionTracker {
        CompletionTracker {
            start_time,
            finish_time: None,
            delivered_count: 0,
        }
    }

    pub fn on_delivery(&mut self, count: u64) -> Report {
        if count > 0 {
            self.delivered_count += count;
            info!("Delivered {} passenger(s) so far", self.delivered_count);
        }
        self.report()
    }

    pub fn on_park(&mut self, all_idle: bool, now: SimTime) -> Report {
        if all_idle && self.finish_time.is_none() {
            info!(
                "All elevators idle at {}, {} passenger(s) delivered",
                now, self.delivered_count
            );
            self.finish_time = Some(now);
        }
        self.report()
    }

    pub fn report(&self) -> Report {
        Report {
            start_time: self.start_time,
            finish_time: self.finish_time,
            elapsed: self
                .finish_time
                .map(|finish| SimTime(finish.since(self.start_time))),
            delivered_count: self.delivered_count,
        }
    }

    #[cfg(test)]
    pub fn finish_time(&self) -> Option<SimTime> {
        self.finish_time
    }
}
