//! Fresh names for type variables.

/// Monotonic source of globally unique variable names.
///
/// Each environment owns one, so independent runs never share a counter
/// and tests can reset it for deterministic output.
#[derive(Clone, Debug, Default)]
pub struct NameContext {
    next: u64,
}

impl NameContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context whose first fresh name uses `start`.
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }

    /// Allocate a fresh name derived from `base`: `a` becomes `a_0`, `a_1`, …
    pub fn fresh(&mut self, base: &str) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}_{}", base, n)
    }

    /// The number the next fresh name will carry.
    pub fn counter(&self) -> u64 {
        self.next
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}
