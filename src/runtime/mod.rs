pub mod event;
pub mod runner;
pub mod scheduler;

pub use runner::FormRunner;
