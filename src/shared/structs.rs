/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::clock::SimTime;

/***************************************/
/*       Public data structures        */
/***************************************/

/// A pickup/dropoff request. Floors are 1-indexed, floor N sits at position N - 1.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passenger {
    pub from: u32,
    pub to: u32,
}

impl Passenger {
    pub fn new(from: u32, to: u32) -> Passenger {
        Passenger { from, to }
    }

    pub fn pickup_position(&self) -> u32 {
        self.from.saturating_sub(1)
    }

    pub fn dropoff_position(&self) -> u32 {
        self.to.saturating_sub(1)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
}

/// Observable state of one elevator at the end of a tick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorSnapshot {
    pub id: usize,
    pub position: f64,
    #[serde(rename = "targetFloor")]
    pub target_floor: u32,
    pub behaviour: Behaviour,
    #[serde(rename = "pickupFloor")]
    pub pickup_floor: Option<u32>,
}

/// Everything a renderer needs to draw one tick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub time: SimTime,
    pub n_floors: u32,
    pub elevators: Vec<ElevatorSnapshot>,
    /// Indexed by position (floor N at index N - 1).
    pub waiting: Vec<bool>,
}

impl Frame {
    pub fn is_waiting(&self, floor: u32) -> bool {
        floor >= 1 && self.waiting.get(floor as usize - 1).copied().unwrap_or(false)
    }
}

/// Progress counters pushed to the report sink on every delivery and park.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Report {
    #[serde(rename = "startTime")]
    pub start_time: SimTime,
    #[serde(rename = "finishTime")]
    pub finish_time: Option<SimTime>,
    pub elapsed: Option<SimTime>,
    #[serde(rename = "deliveredCount")]
    pub delivered_count: u64,
}

/// One pop from the passenger queue.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Position of the passenger in the input list.
    pub passenger: usize,
    pub elevator: usize,
    pub time: SimTime,
}
