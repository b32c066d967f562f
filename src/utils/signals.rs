//! Signal handling for stopping the countdown early

use std::future::Future;

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{info, warn};

/// Wait for a stop signal (SIGTERM, SIGINT)
pub async fn shutdown_signal() -> Result<i32, String> {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])
    .map_err(|e| format!("Failed to create signal handler: {}", e))?;

    match signals.next().await {
        Some(signal) => {
            info!("Received signal: {}", signal);
            Ok(signal)
        }
        None => Err("Signal stream closed".to_string()),
    }
}

/// Run `work` until it completes or `stop` reports a signal.
///
/// Returns `None` when stopped. A failing `stop` only disables stopping.
pub async fn until_stopped<W, S>(work: W, stop: S) -> Option<W::Output>
where
    W: Future,
    S: Future<Output = Result<i32, String>>,
{
    tokio::pin!(work);

    tokio::select! {
        output = &mut work => Some(output),
        signal = stop => match signal {
            Ok(_) => None,
            Err(e) => {
                warn!("Stop signal handling failed: {}", e);
                Some(work.await)
            }
        },
    }
}
