use crate::config::DisplayConfig;
use crate::display::sink::DisplayEvent;
use crate::shared::{Frame, Report};
use crossbeam_channel as cbc;
use log::{debug, info};
use std::fmt::Write as _;
use std::io::Write;

/**
 * # Terminal Display
 * Presentation side of the simulation, running on its own thread.
 *
 * Frames and reports arrive over a crossbeam channel from the coordinator.
 * Frames are drawn as an ASCII building, one row per floor from the top;
 * reports are written as one status line each. The loop ends when the
 * coordinator drops its sender.
 *
 * # Fields
 *
 * - `event_rx`:        Receiver for frames and reports.
 * - `draw_frames`:     Whether frames are drawn at all.
 * - `draw_every`:      Only every Nth frame is drawn.
 * - `clear_screen`:    Redraw in place instead of scrolling.
 * - `frames_seen`:     Frames received so far.
 * - `last_report`:     Most recent report, repeated under every drawing.
 */

pub struct TerminalDisplay {
    event_rx: cbc::Receiver<DisplayEvent>,
    draw_frames: bool,
    draw_every: u64,
    clear_screen: bool,
    frames_seen: u64,
    last_report: Option<Report>,
}

impl TerminalDisplay {
    pub fn new(config: &DisplayConfig, event_rx: cbc::Receiver<DisplayEvent>) -> TerminalDisplay {
        TerminalDisplay {
            event_rx,
            draw_frames: config.enabled,
            draw_every: config.draw_every.max(1),
            clear_screen: config.realtime,
            frames_seen: 0,
            last_report: None,
        }
    }

    pub fn run(mut self) {
        let stdout = std::io::stdout();

        for event in self.event_rx.iter() {
            match event {
                DisplayEvent::Frame(frame) => {
                    self.frames_seen += 1;
                    if !self.draw_frames || self.frames_seen % self.draw_every != 0 {
                        continue;
                    }

                    let mut out = String::new();
                    if self.clear_screen {
                        out.push_str("\x1B[2J\x1B[H");
                    }
                    out.push_str(&render_frame(&frame));
                    if let Some(report) = &self.last_report {
                        out.push_str(&render_report(report));
                        out.push('\n');
                    }

                    let mut handle = stdout.lock();
                    let _ = handle.write_all(out.as_bytes());
                    let _ = handle.flush();
                }
                DisplayEvent::Report(report) => {
                    info!("{}", render_report(&report));
                    self.last_report = Some(report);
                }
            }
        }

        debug!("Display closed after {} frames", self.frames_seen);
    }
}

/// Draws the building top floor first. A car sits on the floor its position
/// rounds to; floors with a passenger waiting for pickup are marked.
pub fn render_frame(frame: &Frame) -> String {
    let mut out = String::new();

    for floor in (1..=frame.n_floors).rev() {
        let _ = write!(out, "Floor {:>3} |", floor);
        for elevator in &frame.elevators {
            let car_floor = elevator.position.round() as u32 + 1;
            if car_floor == floor {
                out.push_str("[#]");
            } else {
                out.push_str(" . ");
            }
        }
        out.push('|');
        if frame.is_waiting(floor) {
            out.push_str(" Waiting");
        }
        out.push('\n');
    }

    out
}

pub fn render_report(report: &Report) -> String {
    let mut line = format!("Start: {}", report.start_time);
    if let (Some(finish), Some(elapsed)) = (report.finish_time, report.elapsed) {
        let _ = write!(line, " | Finish: {} | Elapsed: {}", finish, elapsed);
    }
    let _ = write!(line, " | Delivered: {}", report.delivered_count);
    line
}
