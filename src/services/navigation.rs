//! Navigation to the redirect target after expiry

use tokio::process::Command;
use tracing::{debug, info};

/// Navigate to `target`, launching it with `opener` when one is given
pub async fn navigate(target: &str, opener: Option<&str>) -> Result<(), String> {
    info!("Redirecting to {}", target);

    match opener {
        Some(program) => open_target(program, target).await,
        None => {
            debug!("No opener configured, redirect is reported only");
            Ok(())
        }
    }
}

/// Run `program target` and wait for it to exit successfully
pub async fn open_target(program: &str, target: &str) -> Result<(), String> {
    debug!("Opening {} with {}", target, program);

    let output = Command::new(program)
        .arg(target)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", program, stderr.trim()));
    }

    info!("Opened {} with {}", target, program);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_navigate_without_opener() {
        assert!(navigate("task_c1.php", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_opener_reports_error() {
        let err = open_target("countdown-widget-no-such-opener", "k1.php")
            .await
            .unwrap_err();
        assert!(err.contains("Failed to execute"), "{}", err);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_abandoned_opener_does_not_block() {
        let started = std::time::Instant::now();
        let result = tokio::time::timeout(
            std::time::Duration::from_millis(200),
            open_target("sleep", "30"),
        )
        .await;
        assert!(result.is_err());
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_opener_receives_target() {
        assert!(open_target("true", "k1.php").await.is_ok());
        let err = open_target("false", "k1.php").await.unwrap_err();
        assert!(err.starts_with("false failed"), "{}", err);
    }
}
