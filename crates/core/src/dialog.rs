//! Open/close state of the summarizer dialog.

/// Dialog visibility. Starts [`Closed`](DialogState::Closed) and can be
/// reopened any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

/// Inputs that move the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// The floating trigger button.
    TriggerActivated,
    CloseActivated,
    BackdropActivated,
    EscapePressed,
    /// The summarize action finished, successfully or not.
    ActionCompleted,
}

impl DialogState {
    pub fn transition(self, event: DialogEvent) -> DialogState {
        match (self, event) {
            (_, DialogEvent::TriggerActivated) => DialogState::Open,
            (
                DialogState::Open,
                DialogEvent::CloseActivated
                | DialogEvent::BackdropActivated
                | DialogEvent::EscapePressed
                | DialogEvent::ActionCompleted,
            ) => DialogState::Closed,
            (DialogState::Closed, _) => DialogState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_initial_state_closed() {
        assert_eq!(DialogState::default(), DialogState::Closed);
    }

    #[rstest]
    #[case(DialogEvent::CloseActivated)]
    #[case(DialogEvent::BackdropActivated)]
    #[case(DialogEvent::EscapePressed)]
    #[case(DialogEvent::ActionCompleted)]
    fn test_open_closes(#[case] event: DialogEvent) {
        assert_eq!(DialogState::Open.transition(event), DialogState::Closed);
    }

    #[rstest]
    #[case(DialogEvent::CloseActivated)]
    #[case(DialogEvent::EscapePressed)]
    #[case(DialogEvent::ActionCompleted)]
    fn test_closed_ignores_close_events(#[case] event: DialogEvent) {
        assert_eq!(DialogState::Closed.transition(event), DialogState::Closed);
    }

    #[test]
    fn test_reusable() {
        let mut state = DialogState::default();
        for _ in 0..3 {
            state = state.transition(DialogEvent::TriggerActivated);
            assert!(state.is_open());
            state = state.transition(DialogEvent::EscapePressed);
            assert!(!state.is_open());
        }
    }
}
