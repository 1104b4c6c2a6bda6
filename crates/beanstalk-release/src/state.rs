//! Release workflow states and transitions.

use beanstalk_core::Error;
use derive_more::Display;

/// Where a release workflow run currently is.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum WorkflowState {
    #[display("idle")]
    Idle,
    #[display("fetching environments")]
    FetchingEnvironments,
    #[display("awaiting environment choice")]
    AwaitingEnvironmentChoice,
    #[display("awaiting release note")]
    AwaitingReleaseNote,
    #[display("confirming")]
    Confirming,
    #[display("releasing")]
    Releasing,
    #[display("done")]
    Done,
    #[display("errored: {message}")]
    Errored { message: String },
}

impl WorkflowState {
    /// `Done` and `Errored` accept no further events.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Done | WorkflowState::Errored { .. })
    }
}

/// Inputs that move the workflow between states.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum WorkflowEvent {
    /// The deploy command was invoked.
    #[display("start")]
    Start,
    /// Environments and remote heads are both available.
    #[display("environments fetched ({count})")]
    EnvironmentsFetched { count: usize },
    #[display("environment chosen")]
    EnvironmentChosen,
    #[display("selection cancelled")]
    SelectionCancelled,
    #[display("note entered")]
    NoteEntered,
    #[display("note cancelled")]
    NoteCancelled,
    #[display("confirmed")]
    Confirmed,
    #[display("declined")]
    Declined,
    #[display("released")]
    Released,
    #[display("failed")]
    Failed { message: String },
}

/// The release workflow as an explicit state machine.
#[derive(Debug, Clone)]
pub struct ReleaseMachine {
    state: WorkflowState,
}

impl Default for ReleaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseMachine {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Apply `event`, returning the new state.
    ///
    /// Events that make no sense in the current state are rejected and
    /// leave the state unchanged.
    pub fn handle(&mut self, event: WorkflowEvent) -> Result<&WorkflowState, Error> {
        use WorkflowEvent as E;
        use WorkflowState as S;

        let next = match (&self.state, event) {
            (state, E::Failed { message }) if !state.is_terminal() => S::Errored { message },
            (S::Idle, E::Start) => S::FetchingEnvironments,
            (S::FetchingEnvironments, E::EnvironmentsFetched { count: 0 }) => S::Errored {
                message: Error::NoEnvironments.to_string(),
            },
            (S::FetchingEnvironments, E::EnvironmentsFetched { .. }) => {
                S::AwaitingEnvironmentChoice
            }
            (S::AwaitingEnvironmentChoice, E::EnvironmentChosen) => S::AwaitingReleaseNote,
            (S::AwaitingEnvironmentChoice, E::SelectionCancelled) => S::Idle,
            (S::AwaitingReleaseNote, E::NoteEntered) => S::Confirming,
            (S::AwaitingReleaseNote, E::NoteCancelled) => S::Idle,
            (S::Confirming, E::Confirmed) => S::Releasing,
            (S::Confirming, E::Declined) => S::Idle,
            (S::Releasing, E::Released) => S::Done,
            (state, event) => {
                return Err(Error::InvalidTransition {
                    state: state.to_string(),
                    event: event.to_string(),
                });
            }
        };

        self.state = next;
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: Vec<WorkflowEvent>) -> ReleaseMachine {
        let mut machine = ReleaseMachine::new();
        for event in events {
            machine.handle(event).unwrap();
        }
        machine
    }

    #[test]
    fn test_happy_path() {
        let machine = run(vec![
            WorkflowEvent::Start,
            WorkflowEvent::EnvironmentsFetched { count: 2 },
            WorkflowEvent::EnvironmentChosen,
            WorkflowEvent::NoteEntered,
            WorkflowEvent::Confirmed,
            WorkflowEvent::Released,
        ]);
        assert_eq!(machine.state(), &WorkflowState::Done);
    }

    #[test]
    fn test_no_environments_errors() {
        let machine = run(vec![
            WorkflowEvent::Start,
            WorkflowEvent::EnvironmentsFetched { count: 0 },
        ]);
        assert!(matches!(machine.state(), WorkflowState::Errored { .. }));
    }

    #[test]
    fn test_cancellations_return_to_idle() {
        let machine = run(vec![
            WorkflowEvent::Start,
            WorkflowEvent::EnvironmentsFetched { count: 1 },
            WorkflowEvent::SelectionCancelled,
        ]);
        assert_eq!(machine.state(), &WorkflowState::Idle);

        let machine = run(vec![
            WorkflowEvent::Start,
            WorkflowEvent::EnvironmentsFetched { count: 1 },
            WorkflowEvent::EnvironmentChosen,
            WorkflowEvent::NoteEntered,
            WorkflowEvent::Declined,
        ]);
        assert_eq!(machine.state(), &WorkflowState::Idle);
    }

    #[test]
    fn test_failure_from_any_non_terminal_state() {
        let machine = run(vec![
            WorkflowEvent::Start,
            WorkflowEvent::EnvironmentsFetched { count: 1 },
            WorkflowEvent::EnvironmentChosen,
            WorkflowEvent::Failed {
                message: "boom".to_string(),
            },
        ]);
        assert_eq!(
            machine.state(),
            &WorkflowState::Errored {
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_terminal_states_reject_events() {
        let mut machine = run(vec![
            WorkflowEvent::Start,
            WorkflowEvent::Failed {
                message: "boom".to_string(),
            },
        ]);

        let err = machine
            .handle(WorkflowEvent::Failed {
                message: "again".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert!(machine.state().is_terminal());
    }

    #[test]
    fn test_out_of_order_event_is_rejected() {
        let mut machine = ReleaseMachine::new();
        let err = machine.handle(WorkflowEvent::Confirmed).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition { state, event } if state == "idle" && event == "confirmed"
        ));
        assert_eq!(machine.state(), &WorkflowState::Idle);
    }
}
