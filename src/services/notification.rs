//! User notification on countdown expiry

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Show the expiry message on stderr, optionally blocking until Enter
pub async fn notify_user(message: &str, wait_for_ack: bool) -> Result<(), String> {
    info!("Notifying user: {}", message);
    eprintln!();
    eprintln!("{}", message);

    if wait_for_ack {
        eprintln!("Press Enter to continue...");
        let mut stdin = BufReader::new(tokio::io::stdin());
        wait_for_enter(&mut stdin).await?;
    }

    Ok(())
}

/// Wait for one line (or end of input) from `reader`
pub async fn wait_for_enter<R>(reader: &mut R) -> Result<(), String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .await
        .map_err(|e| format!("Failed to read acknowledgement: {}", e))?;

    debug!("Acknowledged notification ({} bytes)", read);
    Ok(())
}
