use crate::{Error, Result};
use tracing::info;

/// UI-facing lifecycle of a single generation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Submitting,
    DisplayingResult,
    DisplayingError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Submit,
    Succeeded,
    Failed,
}

/// Explicit state machine for the session. State only changes through
/// `transition`, never as a side effect of display logic.
#[derive(Debug, Default)]
pub struct SessionStateMachine {
    state: SessionState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> SessionState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == SessionState::Submitting
    }

    pub fn transition(&mut self, event: SessionEvent) -> Result<()> {
        let old_state = self.state;

        let new_state = match (self.state, event) {
            // A new submit is always accepted from either display state
            (
                SessionState::Idle | SessionState::DisplayingResult | SessionState::DisplayingError,
                SessionEvent::Submit,
            ) => SessionState::Submitting,
            (SessionState::Submitting, SessionEvent::Succeeded) => SessionState::DisplayingResult,
            (SessionState::Submitting, SessionEvent::Failed) => SessionState::DisplayingError,
            _ => {
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.state),
                    event: format!("{event:?}"),
                });
            }
        };

        info!(
            "Session state transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }
}
