//! Evaluation context configuration

/// Configuration for evaluation.
///
/// This is passed through evaluation calls and controls tracing and the
/// optional bound on the continuation stack.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    /// Maximum continuation-stack depth; `None` leaves it unbounded
    pub max_stack_depth: Option<usize>,

    /// Whether to trace evaluation (for debugging)
    pub trace: bool,
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that fails with `StackOverflow` once more than
    /// `max_depth` continuation frames are pending.
    pub fn with_max_stack_depth(max_depth: usize) -> Self {
        Self {
            max_stack_depth: Some(max_depth),
            ..Default::default()
        }
    }

    /// Enable or disable per-step tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
