pub mod completion;
pub mod coordinator;

#[cfg(test)]
pub use completion::CompletionTracker;
pub use coordinator::Coordinator;
