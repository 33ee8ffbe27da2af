use crate::error::{EngineError, EngineResult};

/// Engine lifecycle.
///
/// ```text
/// Uninitialized -> Constructed -> Running <-> Stopping -> Destroyed
///                       \__________________________________/
/// ```
/// `Constructed -> Destroyed` covers an engine dropped before `init`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EngineState {
    Uninitialized,
    Constructed,
    Running,
    Stopping,
    Destroyed,
}

impl EngineState {
    pub fn can_transition_to(self, next: EngineState) -> bool {
        use EngineState::*;
        matches!(
            (self, next),
            (Uninitialized, Constructed)
                | (Constructed, Running)
                | (Constructed, Destroyed)
                | (Running, Stopping)
                | (Stopping, Running)
                | (Stopping, Destroyed)
        )
    }
}

/// Tracks the lifecycle state and every state entered so far.
#[derive(Debug, Clone)]
pub struct LoopController {
    state: EngineState,
    history: Vec<EngineState>,
}

impl Default for LoopController {
    fn default() -> Self {
        Self {
            state: EngineState::Uninitialized,
            history: Vec::new(),
        }
    }
}

impl LoopController {
    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// States entered, in order. The initial `Uninitialized` is not listed.
    pub fn history(&self) -> &[EngineState] {
        &self.history
    }

    /// Moves to `next`, rejecting transitions the lifecycle does not allow.
    pub fn transition(&mut self, next: EngineState) -> EngineResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        log::debug!("engine state: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.state == EngineState::Destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EngineState::*;

    #[test]
    fn normal_lifecycle_is_recorded() {
        let mut lc = LoopController::default();
        for s in [Constructed, Running, Stopping, Destroyed] {
            lc.transition(s).unwrap();
        }
        assert_eq!(lc.history(), &[Constructed, Running, Stopping, Destroyed]);
        assert!(lc.is_destroyed());
    }

    #[test]
    fn stopping_can_resume() {
        let mut lc = LoopController::default();
        for s in [Constructed, Running, Stopping, Running, Stopping, Destroyed] {
            lc.transition(s).unwrap();
        }
        assert_eq!(lc.history().len(), 6);
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        let mut lc = LoopController::default();
        let err = lc.transition(Running).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidTransition { from: Uninitialized, to: Running }
        ));
        assert_eq!(lc.state(), Uninitialized);
        assert!(lc.history().is_empty());

        lc.transition(Constructed).unwrap();
        lc.transition(Destroyed).unwrap();
        assert!(lc.transition(Running).is_err());
        assert!(lc.transition(Destroyed).is_err());
    }

    #[test]
    fn transition_table() {
        let all = [Uninitialized, Constructed, Running, Stopping, Destroyed];
        let allowed: Vec<_> = all
            .iter()
            .flat_map(|&a| all.iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| a.can_transition_to(b))
            .collect();
        assert_eq!(
            allowed,
            vec![
                (Uninitialized, Constructed),
                (Constructed, Running),
                (Constructed, Destroyed),
                (Running, Stopping),
                (Stopping, Running),
                (Stopping, Destroyed),
            ]
        );
    }
}
