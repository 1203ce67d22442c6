#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Success,
    Rejected,
    HardFailure,
}

/// Identifies one submission. Replies carrying an old ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Submission state shared by the sign-in and sign-up forms.
#[derive(Debug, Clone)]
pub struct FormState {
    phase: Phase,
    errors: Vec<String>,
    generation: u64,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            errors: Vec::new(),
            generation: 0,
        }
    }
}

impl FormState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Start a submission. `None` while one is already in flight or after
    /// the form has finished.
    pub fn begin_submit(&mut self) -> Option<Ticket> {
        match self.phase {
            Phase::Idle | Phase::Rejected => {
                self.errors.clear();
                self.phase = Phase::Submitting;
                Some(Ticket(self.generation))
            }
            Phase::Submitting | Phase::Success | Phase::HardFailure => None,
        }
    }

    /// Back to a blank idle form; any in-flight reply becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle;
        self.errors.clear();
    }

    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        self.phase == Phase::Submitting && ticket.0 == self.generation
    }

    pub(crate) fn reject(&mut self, errors: Vec<String>) {
        self.errors = errors;
        self.phase = Phase::Rejected;
    }

    pub(crate) fn finish(&mut self, phase: Phase) {
        self.phase = phase;
    }
}
