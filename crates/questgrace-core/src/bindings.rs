//! Tracker UI binding values.
//!
//! The quest tracker window queries three named bindings; the names and
//! the color strings are part of the replicated UI contract.

pub const BINDING_WARNING: &str = "staywithinwarning";
pub const BINDING_TIME_LEFT: &str = "staywithintimeleft";
pub const BINDING_TIME_COLOR: &str = "staywithintimecolor";

/// Countdown color above the hot threshold.
pub const COLOR_NORMAL: &str = "255,255,0";
/// Countdown color at or below the hot threshold.
pub const COLOR_URGENT: &str = "255,30,30";

/// Countdown text: one decimal place, floored at zero.
pub fn format_time_left(secs: f64) -> String {
    format!("{:.1}", secs.max(0.0))
}

/// Cached binding values between tracker queries.
///
/// The time-left query is the one that recomputes; warning and color read
/// what it last produced, mirroring the order the tracker polls in.
#[derive(Debug)]
pub(crate) struct TrackerBindings {
    pub(crate) time_left: f64,
    pub(crate) color: &'static str,
}

impl TrackerBindings {
    pub(crate) fn new() -> Self {
        Self {
            time_left: 0.0,
            color: COLOR_NORMAL,
        }
    }

    /// Record a freshly computed remaining time and select the color.
    /// Returns true when the countdown crossed to exactly zero with this
    /// update, which is the moment to force the objective to re-evaluate.
    pub(crate) fn update(&mut self, remaining: f64, hot_secs: f64) -> bool {
        let had_time = self.time_left > 0.0;
        self.time_left = remaining.max(0.0);
        self.color = if self.time_left > hot_secs {
            COLOR_NORMAL
        } else {
            COLOR_URGENT
        };
        had_time && self.time_left == 0.0
    }

    pub(crate) fn reset(&mut self) {
        self.time_left = 0.0;
        self.color = COLOR_NORMAL;
    }
}
