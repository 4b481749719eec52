use crate::gesture::{GestureEvent, GestureKind};

/// Exclusive arbitration between the pan and pinch recognizers.
///
/// The first recognizer to report a non-end event in a touch sequence wins;
/// events from the other recognizer are dropped until the winner ends.
#[derive(Debug, Clone, Default)]
pub struct GestureRace {
    winner: Option<GestureKind>,
}

impl GestureRace {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recognizer currently holding the touch sequence.
    pub fn winner(&self) -> Option<GestureKind> {
        self.winner
    }

    /// Decide whether `event` may reach the camera, updating the winner.
    pub fn admit(&mut self, event: &GestureEvent) -> bool {
        let kind = event.kind();
        match self.winner {
            None if event.is_end() => false,
            None => {
                tracing::trace!(?kind, "gesture race won");
                self.winner = Some(kind);
                true
            }
            Some(winner) if winner == kind => {
                if event.is_end() {
                    self.winner = None;
                }
                true
            }
            Some(winner) => {
                tracing::trace!(?kind, ?winner, "gesture dropped: race lost");
                false
            }
        }
    }

    /// Forget the current winner, e.g. when every contact has lifted.
    pub fn reset(&mut self) {
        self.winner = None;
    }
}
