/// Minimal finite-state-machine container.
///
/// `S` is the state type (usually an enum). The machine remembers the
/// current state and how long it has been in it. Transition rules live with
/// whoever drives the machine (see [`UiBridge`](crate::ui::UiBridge)).
pub struct StateMachine<S> {
    pub state: S,
    /// Seconds spent in the current state. Reset to 0.0 on each transition.
    pub elapsed: f32,
}

impl<S> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            elapsed: 0.0,
        }
    }

    /// Transition to `next` if it is a different variant from the current
    /// state (compared by discriminant). Returns whether a transition happened.
    pub fn go(&mut self, next: S) -> bool {
        if std::mem::discriminant(&self.state) == std::mem::discriminant(&next) {
            return false;
        }
        self.state = next;
        self.elapsed = 0.0;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}
