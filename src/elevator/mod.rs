pub mod animator;
pub mod fsm;
pub mod fsm_tests;

#[cfg(test)]
pub use animator::PositionAnimator;
pub use fsm::ElevatorFSM;
pub use fsm::Event;
pub use fsm::Outcome;
pub use fsm::Phase;
