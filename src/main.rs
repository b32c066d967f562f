//! Countdown Widget - a self-rescheduling countdown display
//!
//! This is the main entry point for the countdown-widget application.

use std::io::Write;
use tracing::{error, info, warn};

use countdown_widget::{
    config::{Config, CountdownConfig, OutputFormat},
    display::{stdout_surface, SurfaceStyle},
    services::{navigate, notify_user},
    state::{ExpiryEvent, TickerOutcome},
    tasks::Ticker,
    utils::{shutdown_signal, until_stopped},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries frames
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!("countdown_widget={}", config.log_level()))
        .init();

    let countdown = CountdownConfig::from_settings(config.settings());
    info!(
        "Configuration: remaining={}s, step={}, active={}, redirect={}",
        countdown.initial_remaining, countdown.step, countdown.active, countdown.redirect_target
    );

    let surface = stdout_surface(config.output, SurfaceStyle::from_config(&countdown));
    let handle = Ticker::new(countdown, surface).spawn();
    let canceller = handle.canceller();

    let finished = handle.finished();
    tokio::pin!(finished);

    let outcome = tokio::select! {
        outcome = &mut finished => outcome,
        signal = shutdown_signal() => {
            match signal {
                Ok(_) => canceller.cancel(),
                Err(e) => warn!("Stop signal handling failed: {}", e),
            }
            finished.await
        }
    };
    let outcome = outcome.map_err(anyhow::Error::msg)?;

    match outcome {
        TickerOutcome::Expired(event) => {
            match until_stopped(on_expiry(&config, &event), shutdown_signal()).await {
                Some(result) => result?,
                None => {
                    info!("Stopped during expiry actions");
                    // a pending stdin read would otherwise hold the runtime open
                    std::process::exit(130);
                }
            }
        }
        TickerOutcome::Idle => info!("Countdown rendered once and stopped"),
        TickerOutcome::Cancelled => info!("Countdown cancelled"),
    }

    info!("Countdown finished");
    Ok(())
}

/// Notify the user, then report the redirect and navigate to it
async fn on_expiry(config: &Config, event: &ExpiryEvent) -> anyhow::Result<()> {
    if let Err(e) = notify_user(&event.message, config.wait_ack).await {
        warn!("Notification failed: {}", e);
    }

    let mut stdout = std::io::stdout();
    match config.output {
        OutputFormat::Json => {
            serde_json::to_writer(&mut stdout, event)?;
            writeln!(stdout)?;
        }
        OutputFormat::Text | OutputFormat::Html => {
            writeln!(stdout, "Redirecting to {}", event.redirect_target)?;
        }
    }
    stdout.flush()?;

    if let Err(e) = navigate(&event.redirect_target, config.open_with.as_deref()).await {
        error!("Failed to navigate to {}: {}", event.redirect_target, e);
    }

    Ok(())
}
