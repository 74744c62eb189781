/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::trace;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Frame, Report};

/***************************************/
/*             Public API              */
/***************************************/

/// Receives one frame per scheduler tick. Purely observational.
pub trait RenderSink {
    fn draw(&mut self, frame: &Frame);
}

/// Receives the progress counters on every delivery and every park.
pub trait ReportSink {
    fn update(&mut self, report: &Report);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    Frame(Frame),
    Report(Report),
}

/// Forwards frames and reports to a display thread.
///
/// A disconnected receiver is not an error for the core, events are dropped.
#[derive(Clone)]
pub struct ChannelSink {
    event_tx: cbc::Sender<DisplayEvent>,
}

impl ChannelSink {
    pub fn new(event_tx: cbc::Sender<DisplayEvent>) -> ChannelSink {
        ChannelSink { event_tx }
    }

    fn send(&self, event: DisplayEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("Display channel closed, dropping event");
        }
    }
}

impl RenderSink for ChannelSink {
    fn draw(&mut self, frame: &Frame) {
        self.send(DisplayEvent::Frame(frame.clone()));
    }
}

impl ReportSink for ChannelSink {
    fn update(&mut self, report: &Report) {
        self.send(DisplayEvent::Report(report.clone()));
    }
}

/// Discards everything. Used for headless runs.
pub struct NoopSink;

impl RenderSink for NoopSink {
    fn draw(&mut self, _frame: &Frame) {}
}

impl ReportSink for NoopSink {
    fn update(&mut self, _report: &Report) {}
}
