/// How the decoder reacts to a field whose wire type differs from the one
/// its plan expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    /// Fail with [`DecodeError::TypeMismatch`](crate::DecodeError::TypeMismatch).
    #[default]
    Strict,
    /// Log a warning and skip the value.
    ///
    /// Scalars fall back to their kind's default, message fields keep their
    /// prior value, and repeated fields drop the offending element.
    Resilient,
}

/// Per-codec decode settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub mismatch: MismatchPolicy,
    /// Maximum number of nested sub-items (messages and subtype arms).
    pub max_depth: usize,
}

impl DecodeOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mismatch_policy(mut self, mismatch: MismatchPolicy) -> Self {
        self.mismatch = mismatch;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn resilient() -> Self {
        Self::default().with_mismatch_policy(MismatchPolicy::Resilient)
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            mismatch: MismatchPolicy::Strict,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
