/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::collections::VecDeque;
use std::time::Instant;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::SimulationConfig;
use crate::coordinator::completion::{is_all_idle, CompletionTracker};
use crate::display::{RenderSink, ReportSink};
use crate::elevator::{ElevatorFSM, Event, Outcome, Phase};
use crate::passengers::validate_passengers;
use crate::shared::{Assignment, ConfigurationError, Frame, Passenger, Report, VirtualClock};

/***************************************/
/*               Enums                 */
/***************************************/
enum Tick {
    Frame,
    Terminate,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Dispatches queued passengers to the elevator bank and runs the tick loop.
 *
 * The passenger queue is owned here and popped only by `process_queue`, so
 * no two elevators can take the same passenger. Dispatch is strictly FIFO:
 * whichever elevator asks first gets the oldest passenger, wherever it is.
 *
 * # Fields
 * - `elevators`:       The fixed elevator bank, indexed by id.
 * - `queue`:           Unassigned passengers with their input index.
 * - `clock`:           Virtual clock, one frame per tick.
 * - `tracker`:         Delivery count and finish time.
 * - `assignments`:     Every queue pop, in order.
 * - `n_floors`:        Floors in the building.
 * - `started`:         Set once `start_all` has run.
 * - `render_sink`:     Receives one frame per tick.
 * - `report_sink`:     Receives progress on deliveries and parks.
 */
pub struct Coordinator {
    elevators: Vec<ElevatorFSM>,
    queue: VecDeque<(usize, Passenger)>,
    clock: VirtualClock,
    tracker: CompletionTracker,
    assignments: Vec<Assignment>,
    n_floors: u32,
    started: bool,

    // Presentation
    render_sink: Box<dyn RenderSink>,
    report_sink: Box<dyn ReportSink>,
}

impl Coordinator {
    pub fn new(
        config: &SimulationConfig,
        passengers: Vec<Passenger>,
        render_sink: Box<dyn RenderSink>,
        report_sink: Box<dyn ReportSink>,
    ) -> Result<Coordinator, ConfigurationError> {
        config.validate()?;
        validate_passengers(&passengers, config.n_floors)?;

        let elevators = (0..config.n_elevators as usize)
            .map(|id| ElevatorFSM::new(id, config.dwell_time_ms))
            .collect();
        let clock = VirtualClock::new(config.frame_time_ms);
        let tracker = CompletionTracker::new(clock.now());

        Ok(Coordinator {
            elevators,
            queue: passengers.into_iter().enumerate().collect(),
            clock,
            tracker,
            assignments: Vec::new(),
            n_floors: config.n_floors,
            started: false,
            render_sink,
            report_sink,
        })
    }

    /// Sends the initial report and dispatches every elevator once.
    pub fn start_all(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        info!(
            "Starting {} elevator(s) over {} floors with {} passenger(s) queued",
            self.elevators.len(),
            self.n_floors,
            self.queue.len()
        );
        let report = self.tracker.on_delivery(0);
        self.report_sink.update(&report);

        for id in 0..self.elevators.len() {
            self.process_queue(id);
        }
    }

    /// Gives the oldest queued passenger to elevator `id`, or parks it when
    /// the queue is empty. An elevator that is busy keeps its current work and
    /// the queue is left untouched.
    pub fn process_queue(&mut self, id: usize) {
        if self.elevators[id].phase() != Phase::Idle {
            debug!("Elevator {} is busy, not dispatching", id);
            return;
        }

        let now = self.clock.now();
        match self.queue.pop_front() {
            Some((index, passenger)) => {
                debug!(
                    "Passenger {} ({} -> {}) to elevator {}",
                    index, passenger.from, passenger.to, id
                );
                self.assignments.push(Assignment {
                    passenger: index,
                    elevator: id,
                    time: now,
                });
                self.elevators[id].handle_event(Event::Assigned(passenger), now);
            }
            None => {
                self.elevators[id].handle_event(Event::Park, now);
            }
        }
    }

    /// Runs one scheduler tick.
    pub fn step(&mut self) {
        if !self.started {
            self.start_all();
        }

        self.clock.advance();
        let now = self.clock.now();

        // Resume finished dwells
        for id in 0..self.elevators.len() {
            let outcome = self.elevators[id].check_dwell(now);
            self.handle_outcome(id, outcome);
        }

        // Advance every running move
        for elevator in self.elevators.iter_mut() {
            elevator.advance();
        }

        let frame = self.frame();
        self.render_sink.draw(&frame);

        // Finish moves that reached their target
        for id in 0..self.elevators.len() {
            let outcome = self.elevators[id].check_arrival(now);
            self.handle_outcome(id, outcome);
        }
    }

    /// Steps until every elevator is parked and the queue is empty. Returns
    /// the number of ticks run.
    pub fn run_until_settled(&mut self) -> u64 {
        let first_tick = self.clock.ticks();
        while !self.is_settled() {
            self.step();
        }
        self.clock.ticks() - first_tick
    }

    /// Paces ticks with `ticker` until settled or told to terminate.
    pub fn run(&mut self, ticker: cbc::Receiver<Instant>, terminate_rx: cbc::Receiver<()>) -> Report {
        while !self.is_settled() {
            match self.wait_for_tick(&ticker, &terminate_rx) {
                Tick::Frame => self.step(),
                Tick::Terminate => {
                    info!("Coordinator terminated at {}", self.clock.now());
                    break;
                }
            }
        }
        self.tracker.report()
    }

    pub fn is_settled(&self) -> bool {
        self.started && self.queue.is_empty() && self.elevators.iter().all(|e| e.is_parked())
    }

    pub fn frame(&self) -> Frame {
        let mut waiting = vec![false; self.n_floors as usize];
        for elevator in &self.elevators {
            if let Some(floor) = elevator.pickup_floor() {
                if let Some(flag) = waiting.get_mut(floor as usize - 1) {
                    *flag = true;
                }
            }
        }

        Frame {
            tick: self.clock.ticks(),
            time: self.clock.now(),
            n_floors: self.n_floors,
            elevators: self.elevators.iter().map(|e| e.snapshot()).collect(),
            waiting,
        }
    }

    pub fn report(&self) -> Report {
        self.tracker.report()
    }

    #[cfg(test)]
    pub fn elevators(&self) -> &[ElevatorFSM] {
        &self.elevators
    }

    #[cfg(test)]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    #[cfg(test)]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub fn now(&self) -> crate::shared::SimTime {
        self.clock.now()
    }

    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    #[cfg(test)]
    pub fn is_all_idle(&self) -> bool {
        is_all_idle(&self.elevators)
    }

    fn handle_outcome(&mut self, id: usize, outcome: Outcome) {
        match outcome {
            Outcome::Continue => {}
            Outcome::Delivered => {
                self.process_queue(id);
                let report = self.tracker.on_delivery(1);
                self.report_sink.update(&report);
            }
            Outcome::Parked => {
                let all_idle = is_all_idle(&self.elevators);
                let report = self.tracker.on_park(all_idle, self.clock.now());
                self.report_sink.update(&report);
            }
        }
    }

    fn wait_for_tick(&self, ticker: &cbc::Receiver<Instant>, terminate_rx: &cbc::Receiver<()>) -> Tick {
        cbc::select! {
            recv(ticker) -> _ => Tick::Frame,
            recv(terminate_rx) -> _ => Tick::Terminate,
        }
    }
}
