/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/

/// A point in simulated time, in milliseconds since the simulation started.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub fn after_millis(self, ms: u64) -> SimTime {
        SimTime(self.0 + ms)
    }

    /// Milliseconds from `earlier` to `self`, zero if `earlier` is later.
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0 % 1000;
        let total_secs = self.0 / 1000;
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            total_secs / 3600,
            (total_secs % 3600) / 60,
            total_secs % 60,
            ms
        )
    }
}

/**
 * Virtual clock driving the scheduler.
 *
 * Every tick stands for one animation frame of `frame_ms` milliseconds. Dwell
 * delays are expressed against this clock, so a run never waits on the wall
 * clock unless the caller paces ticks itself.
 */
#[derive(Clone, Debug)]
pub struct VirtualClock {
    now: SimTime,
    frame_ms: u64,
    ticks: u64,
}

impl VirtualClock {
    pub fn new(frame_ms: u64) -> VirtualClock {
        VirtualClock {
            now: SimTime::ZERO,
            frame_ms,
            ticks: 0,
        }
    }

    pub fn advance(&mut self) {
        self.now = self.now.after_millis(self.frame_ms);
        self.ticks += 1;
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
