//! Remaining-seconds to display string rendering

/// Placeholder for the days component
pub const DAYS_TOKEN: &str = "%%D%%";
/// Placeholder for the hours component
pub const HOURS_TOKEN: &str = "%%H%%";
/// Placeholder for the minutes component
pub const MINUTES_TOKEN: &str = "%%M%%";
/// Placeholder for the seconds component
pub const SECONDS_TOKEN: &str = "%%S%%";

/// Inline emphasis wrapped around every rendered component
pub const EMPHASIS_OPEN: &str = "<b>";
pub const EMPHASIS_CLOSE: &str = "</b>";

/// Upper wraparound bound for the days field. Large enough that multi-year
/// countdowns never wrap.
pub const DAYS_WRAP: u64 = 100_000;

/// The four display components of a remaining-seconds value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeComponents {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeComponents {
    /// Split a remaining-seconds value into wrapped components
    pub fn from_seconds(secs: u64) -> Self {
        Self {
            days: (secs / 86_400) % DAYS_WRAP,
            hours: (secs / 3_600) % 24,
            minutes: (secs / 60) % 60,
            seconds: secs % 60,
        }
    }

    /// Total seconds represented by the components
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

fn render_component(value: u64, zero_pad: bool) -> String {
    let digits = value.to_string();
    if zero_pad && digits.len() < 2 {
        format!("{EMPHASIS_OPEN}0{digits}{EMPHASIS_CLOSE}")
    } else {
        format!("{EMPHASIS_OPEN}{digits}{EMPHASIS_CLOSE}")
    }
}

/// Render `secs` into `template`, replacing every placeholder occurrence.
///
/// Tokens the formatter does not know are left in the output as written.
pub fn format_remaining(secs: u64, template: &str, zero_pad: bool) -> String {
    let parts = TimeComponents::from_seconds(secs);

    template
        .replace(DAYS_TOKEN, &render_component(parts.days, zero_pad))
        .replace(HOURS_TOKEN, &render_component(parts.hours, zero_pad))
        .replace(MINUTES_TOKEN, &render_component(parts.minutes, zero_pad))
        .replace(SECONDS_TOKEN, &render_component(parts.seconds, zero_pad))
}
