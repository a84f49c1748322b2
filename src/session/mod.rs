mod backend;
mod controller;
pub mod fsm;

pub use backend::{GenerateBackend, HttpBackend};
pub use controller::{GenerationMetadata, PreviewHandle, PreviewStore, SessionController};
pub use fsm::{SessionEvent, SessionState, SessionStateMachine};
