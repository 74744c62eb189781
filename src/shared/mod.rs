pub mod clock;
pub mod error;
pub mod macros;
pub mod structs;

pub use clock::SimTime;
pub use clock::VirtualClock;
pub use error::ConfigurationError;
pub use structs::Assignment;
pub use structs::Behaviour;
pub use structs::ElevatorSnapshot;
pub use structs::Frame;
pub use structs::Passenger;
pub use structs::Report;
