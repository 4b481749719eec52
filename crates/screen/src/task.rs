/// Lifecycle of the periodic animation callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    /// Nothing to animate.
    #[default]
    Idle,
    /// Frames advance the active transition.
    Running,
    /// The owning screen was torn down; the task never runs again until remounted.
    Cancelled,
}

/// The animation task owned by a screen.
///
/// Starts when a transition begins, stops itself when the transition
/// completes, and is cancelled when the screen unmounts.
#[derive(Debug, Clone, Default)]
pub struct AnimationTask {
    state: TaskState,
    frames: u64,
}

impl AnimationTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TaskState::Running
    }

    /// Frames run since the task was created.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Schedule the task. Returns false if it has been cancelled.
    pub fn start(&mut self) -> bool {
        match self.state {
            TaskState::Cancelled => false,
            _ => {
                self.state = TaskState::Running;
                true
            }
        }
    }

    /// Count one frame.
    pub fn tick(&mut self) {
        self.frames += 1;
    }

    /// Stop after the work is done.
    pub fn finish(&mut self) {
        if self.state == TaskState::Running {
            self.state = TaskState::Idle;
        }
    }

    pub fn cancel(&mut self) {
        self.state = TaskState::Cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_finish_cycle() {
        let mut task = AnimationTask::new();
        assert_eq!(task.state(), TaskState::Idle);
        assert!(task.start());
        assert!(task.is_running());
        task.tick();
        task.finish();
        assert_eq!(task.state(), TaskState::Idle);
        assert_eq!(task.frames(), 1);
    }

    #[test]
    fn cancelled_task_cannot_restart() {
        let mut task = AnimationTask::new();
        task.start();
        task.cancel();
        assert!(!task.start());
        assert_eq!(task.state(), TaskState::Cancelled);
    }

    #[test]
    fn finish_does_not_revive_cancelled() {
        let mut task = AnimationTask::new();
        task.cancel();
        task.finish();
        assert_eq!(task.state(), TaskState::Cancelled);
    }
}
