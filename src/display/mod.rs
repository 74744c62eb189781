pub mod sink;
pub mod terminal;

pub use sink::ChannelSink;
pub use sink::DisplayEvent;
pub use sink::NoopSink;
pub use sink::RenderSink;
pub use sink::ReportSink;
pub use terminal::TerminalDisplay;
