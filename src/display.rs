//! Presentation helpers for timer ticks.
//!
//! Everything here is a pure function of a [`TickEvent`] or [`TimerState`], so
//! hosts can render the countdown, progress and controls without touching the
//! engine.

use crate::timer::{TickEvent, TimerState};

/// Base window title.
pub const APP_TITLE: &str = "Focus Flow";

/// Formats remaining seconds as `MM:SS`, flooring partial seconds.
///
/// Negative and non-finite values render as `00:00`.
///
/// ```rust
/// use focus_flow::display::format_countdown;
///
/// assert_eq!(format_countdown(1500.0), "25:00");
/// assert_eq!(format_countdown(59.9), "00:59");
/// assert_eq!(format_countdown(-4.0), "00:00");
/// ```
pub fn format_countdown(remaining_seconds: f64) -> String {
    let safe = if remaining_seconds.is_finite() {
        remaining_seconds.max(0.0)
    } else {
        0.0
    };
    let whole = safe.floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// Fraction of the session already elapsed, in `[0, 1]`.
pub fn progress(remaining_seconds: f64, total_seconds: u32) -> f64 {
    let total = f64::from(total_seconds.max(1));
    let remaining = remaining_seconds.max(0.0);
    (1.0 - remaining / total).clamp(0.0, 1.0)
}

/// Progress for a tick. Idle sessions always show no progress.
pub fn tick_progress(tick: &TickEvent) -> f64 {
    if tick.state == TimerState::Idle {
        return 0.0;
    }
    progress(tick.remaining_seconds, tick.total_seconds)
}

/// Window title for a tick.
pub fn window_title(tick: &TickEvent) -> String {
    match tick.state {
        TimerState::Running => {
            format!("{} • {}", APP_TITLE, format_countdown(tick.remaining_seconds))
        }
        TimerState::Complete => format!("{} • Done!", APP_TITLE),
        TimerState::Idle | TimerState::Paused => APP_TITLE.to_string(),
    }
}

/// Renders a fixed-width text progress bar.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

/// Which timer controls are available in a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    /// Start (or restart) is allowed.
    pub can_start: bool,
    /// Pause is allowed.
    pub can_pause: bool,
    /// Resume is allowed.
    pub can_resume: bool,
    /// The duration may be edited.
    pub can_edit_duration: bool,
    /// Label for the start control.
    pub start_label: &'static str,
}

impl Controls {
    /// Controls for `state`.
    pub fn for_state(state: TimerState) -> Self {
        let running = state == TimerState::Running;
        let paused = state == TimerState::Paused;
        Self {
            can_start: !(running || paused),
            can_pause: running,
            can_resume: paused,
            can_edit_duration: !running,
            start_label: if state == TimerState::Complete {
                "Restart Focus"
            } else {
                "Start Focus"
            },
        }
    }
}
