//! Transient notification stack (toasts)

use std::time::{Duration, Instant};

/// Timing and layout knobs for the toast stack.
#[derive(Clone, Copy, Debug)]
pub struct ToastTuning {
    /// Rows between the newest toast and the bottom edge.
    pub base_offset: u16,
    /// Rows between stacked toasts.
    pub step_offset: u16,
    pub default_duration: Duration,
    /// Delay between the hide transition starting and the entry detaching.
    pub remove_delay: Duration,
}

impl Default for ToastTuning {
    fn default() -> Self {
        Self {
            base_offset: 2,
            step_offset: 2,
            default_duration: Duration::from_millis(2200),
            remove_delay: Duration::from_millis(400),
        }
    }
}

#[derive(Clone, Debug)]
struct ToastEntry {
    message: String,
    created_at: Instant,
    duration: Duration,
    /// Set once the entry has started its hide transition.
    leaving_since: Option<Instant>,
}

/// Render-ready view of one toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastView {
    pub message: String,
    /// Rows above the bottom edge of the frame.
    pub row_offset: u16,
    pub leaving: bool,
}

/// Ordered stack of auto-dismissing messages. Position 0 is the newest entry
/// sitting at the base offset; older entries stack above it. An entry keeps
/// its slot while its hide transition plays and frees it when detached.
///
/// Time never comes from a clock in here; the event loop feeds `tick`.
pub struct ToastStack {
    entries: Vec<ToastEntry>,
    tuning: ToastTuning,
}

impl ToastStack {
    pub fn new(tuning: ToastTuning) -> Self {
        Self { entries: Vec::new(), tuning }
    }

    /// Appends a toast. Empty or whitespace-only messages are rejected.
    pub fn show(&mut self, message: &str, duration: Option<Duration>, now: Instant) -> bool {
        if message.trim().is_empty() {
            return false;
        }
        self.entries.push(ToastEntry {
            message: message.to_string(),
            created_at: now,
            duration: duration.unwrap_or(self.tuning.default_duration),
            leaving_since: None,
        });
        true
    }

    /// Advances entry lifecycles: visible entries past their duration start
    /// leaving, leaving entries past the remove delay are detached (which
    /// repositions everything after them).
    pub fn tick(&mut self, now: Instant) {
        for entry in &mut self.entries {
            if entry.leaving_since.is_none() && now >= entry.created_at + entry.duration {
                // The transition starts when the display duration elapsed,
                // not when the tick happened to observe it.
                entry.leaving_since = Some(entry.created_at + entry.duration);
            }
        }
        let remove_delay = self.tuning.remove_delay;
        self.entries
            .retain(|e| !matches!(e.leaving_since, Some(t) if now >= t + remove_delay));
    }

    /// Current entries with their computed offsets, newest first.
    pub fn views(&self) -> Vec<ToastView> {
        let len = self.entries.len();
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let position = (len - 1 - idx) as u16;
                ToastView {
                    message: entry.message.clone(),
                    row_offset: self.tuning.base_offset + position * self.tuning.step_offset,
                    leaving: entry.leaving_since.is_some(),
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> ToastStack {
        ToastStack::new(ToastTuning::default())
    }

    #[test]
    fn empty_message_is_rejected() {
        let mut toasts = stack();
        let now = Instant::now();
        assert!(!toasts.show("", None, now));
        assert!(!toasts.show("   ", None, now));
        assert!(toasts.is_empty());
    }

    #[test]
    fn newest_toast_sits_at_base_offset() {
        let mut toasts = stack();
        let now = Instant::now();
        toasts.show("first", None, now);
        toasts.show("second", None, now);
        toasts.show("third", None, now);

        let views = toasts.views();
        assert_eq!(views.len(), 3);
        // Insertion order in the vec, newest has position 0.
        assert_eq!(views[0].message, "first");
        assert_eq!(views[0].row_offset, 2 + 2 * 2);
        assert_eq!(views[2].message, "third");
        assert_eq!(views[2].row_offset, 2);
    }

    #[test]
    fn removing_the_middle_toast_reindexes_the_rest() {
        let mut toasts = stack();
        let now = Instant::now();
        toasts.show("a", Some(Duration::from_millis(5000)), now);
        toasts.show("b", Some(Duration::from_millis(1000)), now);
        toasts.show("c", Some(Duration::from_millis(5000)), now);

        // "b" expires and finishes its hide transition.
        let later = now + Duration::from_millis(1000) + Duration::from_millis(400);
        toasts.tick(later);

        let views = toasts.views();
        assert_eq!(views.len(), 2);
        // Remaining entries occupy positions {0, 1}: "c" (newest) at the
        // base, "a" one step above.
        assert_eq!(views[0].message, "a");
        assert_eq!(views[0].row_offset, 2 + 2);
        assert_eq!(views[1].message, "c");
        assert_eq!(views[1].row_offset, 2);
    }

    #[test]
    fn leaving_toast_keeps_its_slot_until_detached() {
        let mut toasts = stack();
        let now = Instant::now();
        toasts.show("old", Some(Duration::from_millis(100)), now);
        toasts.show("new", Some(Duration::from_millis(5000)), now);

        // Past duration but within the remove delay: still occupying a slot.
        let mid = now + Duration::from_millis(200);
        toasts.tick(mid);
        let views = toasts.views();
        assert_eq!(views.len(), 2);
        assert!(views[0].leaving);
        assert_eq!(views[1].row_offset, 2);

        // Past the remove delay: detached and the survivor repositioned.
        toasts.tick(mid + Duration::from_millis(400));
        let views = toasts.views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].message, "new");
        assert_eq!(views[0].row_offset, 2);
    }

    #[test]
    fn multiple_toasts_stay_visible_concurrently() {
        let mut toasts = stack();
        let now = Instant::now();
        for i in 0..4 {
            toasts.show(&format!("toast {i}"), None, now);
        }
        toasts.tick(now + Duration::from_millis(100));
        assert_eq!(toasts.views().len(), 4);
    }
}
