//! Open windows laid out on an absolute minute axis.
//!
//! # Time Model
//! Minutes are counted from the midnight starting the evaluation day, so
//! the previous day's windows have negative offsets.
//!
//! # Precedence
//! Blocked periods (holidays) override open windows. A minute is open iff:
//! - It falls within at least one open window, AND
//! - It does NOT fall within any blocked period.

/// A minute interval `[start, end)` on the absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub start: i64,
    pub end: i64,
}

impl Window {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, minute: i64) -> bool {
        minute >= self.start && minute < self.end
    }
}

/// Open windows and blocked periods, resolved into disjoint open intervals.
#[derive(Debug, Clone, Default)]
pub(crate) struct Timeline {
    windows: Vec<Window>,
    blocked: Vec<Window>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_window(&mut self, start: i64, end: i64) {
        if end > start {
            self.windows.push(Window::new(start, end));
        }
    }

    pub fn add_blocked(&mut self, start: i64, end: i64) {
        self.blocked.push(Window::new(start, end));
    }

    /// Open intervals: windows minus blocked periods, sorted, with
    /// touching or overlapping intervals merged.
    pub fn resolve(&self) -> Vec<Window> {
        let mut pieces: Vec<Window> = self.windows.clone();
        for blocked in &self.blocked {
            pieces = pieces
                .into_iter()
                .flat_map(|w| subtract(w, blocked))
                .collect();
        }
        pieces.sort_by_key(|w| w.start);

        let mut merged: Vec<Window> = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match merged.last_mut() {
                Some(last) if piece.start <= last.end => last.end = last.end.max(piece.end),
                _ => merged.push(piece),
            }
        }
        merged
    }
}

/// `window` minus `blocked`: zero, one or two pieces.
fn subtract(window: Window, blocked: &Window) -> Vec<Window> {
    if blocked.end <= window.start || blocked.start >= window.end {
        return vec![window];
    }
    let mut out = Vec::with_capacity(2);
    if blocked.start > window.start {
        out.push(Window::new(window.start, blocked.start));
    }
    if blocked.end < window.end {
        out.push(Window::new(blocked.end, window.end));
    }
    out
}
