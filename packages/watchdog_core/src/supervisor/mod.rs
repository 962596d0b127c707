pub mod engine;
mod machine;
mod runner;
pub mod types;

pub use engine::{SupervisorEngine, TransitionResult};
pub use runner::Supervisor;
pub use types::{ApplyStatus, Phase, SupervisorEvent, SupervisorSnapshot};
