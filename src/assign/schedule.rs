/// Committed work windows for one candidate. Windows are half-open
/// `[start, end)` day intervals, so a task may begin the day another ends.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    busy: Vec<(u32, u32)>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `[start, start + duration)` overlaps no committed window.
    /// Read-only; committing is a separate step.
    pub fn is_available(&self, start: u32, duration: u32) -> bool {
        let end = match start.checked_add(duration) {
            Some(end) => end,
            None => return false,
        };
        !self
            .busy
            .iter()
            .any(|&(busy_start, busy_end)| start < busy_end && end > busy_start)
    }

    /// Record a window. Callers check [`is_available`](Self::is_available)
    /// first; overlapping commits are not rejected here.
    pub fn commit(&mut self, start: u32, duration: u32) {
        self.busy.push((start, start.saturating_add(duration)));
    }

    pub fn windows(&self) -> &[(u32, u32)] {
        &self.busy
    }

    pub fn len(&self) -> usize {
        self.busy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.busy.is_empty()
    }
}
