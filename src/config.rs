//! Configuration and CLI argument handling

use std::time::Duration;

use clap::{Parser, ValueEnum};

pub const DEFAULT_BACK_COLOR: &str = "white";
pub const DEFAULT_FORE_COLOR: &str = "black";
pub const DEFAULT_DISPLAY_FORMAT: &str =
    "%%D%% Days, %%H%% Hours, %%M%% Minutes, %%S%% Seconds.";
pub const DEFAULT_STEP: i64 = -1;
pub const DEFAULT_REMAINING_TIME: i64 = 300;
pub const DEFAULT_REDIRECT_PAGE: &str = "task_c1.php";

/// Where rendered frames are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal line, rewritten in place on a tty
    Text,
    /// The `cntdwn` span markup, one per line
    Html,
    /// One JSON frame record per line
    Json,
}

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "countdown-widget")]
#[command(about = "A countdown display that redirects when time runs out")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Background color of the display surface
    #[arg(long)]
    pub back_color: Option<String>,

    /// Foreground color of the display surface
    #[arg(long)]
    pub fore_color: Option<String>,

    /// Display template using %%D%%, %%H%%, %%M%% and %%S%%
    #[arg(long)]
    pub display_format: Option<String>,

    /// Keep ticking after the first render
    #[arg(long, allow_hyphen_values = true)]
    pub count_active: Option<String>,

    /// Message shown when the countdown expires
    #[arg(long)]
    pub finish_message: Option<String>,

    /// Seconds applied per tick (rounded up; 0 renders once)
    #[arg(long, allow_hyphen_values = true)]
    pub count_stepper: Option<String>,

    /// Pad single-digit components with a leading zero
    #[arg(long, allow_hyphen_values = true)]
    pub leading_zero: Option<String>,

    /// Starting number of seconds
    #[arg(long, allow_hyphen_values = true)]
    pub remaining_time: Option<String>,

    /// Target navigated to when the countdown expires
    #[arg(long)]
    pub redirect_page: Option<String>,

    /// Output format for rendered frames
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Program used to open the redirect target (e.g. xdg-open)
    #[arg(long)]
    pub open_with: Option<String>,

    /// Block on the expiry notification until Enter is pressed
    #[arg(long)]
    pub wait_ack: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Collect the countdown values given on the command line.
    ///
    /// Values that do not parse are treated as not given.
    pub fn settings(&self) -> CountdownSettings {
        CountdownSettings {
            back_color: self.back_color.clone(),
            fore_color: self.fore_color.clone(),
            display_format: self.display_format.clone(),
            count_active: self.count_active.as_deref().and_then(parse_flag),
            finish_message: self.finish_message.clone(),
            count_stepper: self.count_stepper.as_deref().and_then(parse_number),
            leading_zero: self.leading_zero.as_deref().and_then(parse_flag),
            remaining_time: self.remaining_time.as_deref().and_then(parse_number),
            redirect_page: self.redirect_page.clone(),
        }
    }
}

/// Lenient numeric value; `None` for anything that is not a finite number
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lenient boolean value; `None` for anything unrecognised
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Raw countdown values; `None` means the value was not supplied
#[derive(Debug, Clone, Default)]
pub struct CountdownSettings {
    pub back_color: Option<String>,
    pub fore_color: Option<String>,
    pub display_format: Option<String>,
    pub count_active: Option<bool>,
    pub finish_message: Option<String>,
    pub count_stepper: Option<f64>,
    pub leading_zero: Option<bool>,
    pub remaining_time: Option<f64>,
    pub redirect_page: Option<String>,
}

/// Resolved countdown configuration, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownConfig {
    pub back_color: String,
    pub fore_color: String,
    pub display_format: String,
    pub active: bool,
    pub finish_message: String,
    pub step: i64,
    pub zero_pad: bool,
    pub initial_remaining: i64,
    pub redirect_target: String,
}

impl CountdownConfig {
    /// Resolve settings, substituting defaults for anything missing.
    ///
    /// The step is rounded up and the starting time rounded down. Non-finite
    /// numbers count as missing. A step of zero disables ticking.
    pub fn from_settings(settings: CountdownSettings) -> Self {
        let step = settings
            .count_stepper
            .filter(|s| s.is_finite())
            .map(|s| s.ceil() as i64)
            .unwrap_or(DEFAULT_STEP);

        let initial_remaining = settings
            .remaining_time
            .filter(|t| t.is_finite())
            .map(|t| t.floor() as i64)
            .unwrap_or(DEFAULT_REMAINING_TIME);

        Self {
            back_color: settings
                .back_color
                .unwrap_or_else(|| DEFAULT_BACK_COLOR.to_string()),
            fore_color: settings
                .fore_color
                .unwrap_or_else(|| DEFAULT_FORE_COLOR.to_string()),
            display_format: settings
                .display_format
                .unwrap_or_else(|| DEFAULT_DISPLAY_FORMAT.to_string()),
            active: settings.count_active.unwrap_or(true) && step != 0,
            finish_message: settings.finish_message.unwrap_or_default(),
            step,
            zero_pad: settings.leading_zero.unwrap_or(true),
            initial_remaining,
            redirect_target: settings
                .redirect_page
                .unwrap_or_else(|| DEFAULT_REDIRECT_PAGE.to_string()),
        }
    }

    /// Delay between ticks, or `None` when the countdown renders only once.
    ///
    /// The 10ms shortfall per step loosely compensates for timer drift.
    pub fn tick_period(&self) -> Option<Duration> {
        if !self.active {
            return None;
        }
        let millis = self
            .step
            .unsigned_abs()
            .saturating_sub(1)
            .saturating_mul(1000)
            .saturating_add(990);
        Some(Duration::from_millis(millis))
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self::from_settings(CountdownSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CountdownConfig::default();
        assert_eq!(config.back_color, "white");
        assert_eq!(config.fore_color, "black");
        assert_eq!(config.display_format, DEFAULT_DISPLAY_FORMAT);
        assert!(config.active);
        assert_eq!(config.finish_message, "");
        assert_eq!(config.step, -1);
        assert!(config.zero_pad);
        assert_eq!(config.initial_remaining, 300);
        assert_eq!(config.redirect_target, "task_c1.php");
    }

    #[test]
    fn test_step_rounds_up() {
        let config = CountdownConfig::from_settings(CountdownSettings {
            count_stepper: Some(-2.5),
            ..Default::default()
        });
        assert_eq!(config.step, -2);
        assert_eq!(config.tick_period(), Some(Duration::from_millis(1990)));
    }

    #[test]
    fn test_small_negative_step_becomes_idle() {
        let config = CountdownConfig::from_settings(CountdownSettings {
            count_stepper: Some(-0.4),
            ..Default::default()
        });
        assert_eq!(config.step, 0);
        assert!(!config.active);
        assert_eq!(config.tick_period(), None);
    }

    #[test]
    fn test_non_finite_values_fall_back() {
        let config = CountdownConfig::from_settings(CountdownSettings {
            count_stepper: Some(f64::NAN),
            remaining_time: Some(f64::INFINITY),
            ..Default::default()
        });
        assert_eq!(config.step, DEFAULT_STEP);
        assert_eq!(config.initial_remaining, DEFAULT_REMAINING_TIME);
    }

    #[test]
    fn test_remaining_time_floors() {
        let config = CountdownConfig::from_settings(CountdownSettings {
            remaining_time: Some(12.9),
            ..Default::default()
        });
        assert_eq!(config.initial_remaining, 12);
    }

    #[test]
    fn test_inactive_has_no_period() {
        let config = CountdownConfig::from_settings(CountdownSettings {
            count_active: Some(false),
            ..Default::default()
        });
        assert_eq!(config.step, -1);
        assert_eq!(config.tick_period(), None);
    }

    #[test]
    fn test_unit_step_period() {
        assert_eq!(
            CountdownConfig::default().tick_period(),
            Some(Duration::from_millis(990))
        );
    }

    #[test]
    fn test_cli_flags_map_to_settings() {
        let config = Config::try_parse_from([
            "countdown-widget",
            "--count-stepper",
            "-3",
            "--remaining-time",
            "5",
            "--leading-zero",
            "false",
            "--redirect-page",
            "k1.php",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(config.output, OutputFormat::Json);
        let resolved = CountdownConfig::from_settings(config.settings());
        assert_eq!(resolved.step, -3);
        assert_eq!(resolved.initial_remaining, 5);
        assert!(!resolved.zero_pad);
        assert_eq!(resolved.redirect_target, "k1.php");
        assert_eq!(resolved.back_color, DEFAULT_BACK_COLOR);
    }

    #[test]
    fn test_malformed_cli_values_fall_back() {
        let config = Config::try_parse_from([
            "countdown-widget",
            "--remaining-time",
            "abc",
            "--count-active",
            "maybe",
            "--count-stepper",
            "-x",
            "--leading-zero",
            "",
        ])
        .unwrap();

        let settings = config.settings();
        assert_eq!(settings.remaining_time, None);
        assert_eq!(settings.count_active, None);
        assert_eq!(settings.count_stepper, None);

        let resolved = CountdownConfig::from_settings(settings);
        assert_eq!(resolved.initial_remaining, 300);
        assert!(resolved.active);
        assert_eq!(resolved.step, -1);
        assert!(resolved.zero_pad);
    }

    #[test]
    fn test_lenient_parsers() {
        assert_eq!(parse_number(" -2.5 "), Some(-2.5));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_flag("yes"), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("perhaps"), None);
    }
}
