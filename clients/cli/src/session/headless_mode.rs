//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::dashboard::Page;
use log::warn;
use std::error::Error;
use std::path::Path;
use tokio::sync::Mutex;

/// Runs the pollers until Ctrl+C
///
/// This function handles:
/// 1. Console event logging
/// 2. Writing the page snapshot after every poll cycle
/// 3. Ctrl+C shutdown handling
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting(&session);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
                if let Some(output) = &session.output {
                    if let Err(e) = write_snapshot(&session.page, output).await {
                        warn!("Failed to write {}: {}", output.display(), e);
                    }
                }
            }
            _ = &mut ctrl_c => {
                break;
            }
        }
    }

    // Wait for the pollers to finish
    print_session_shutdown();
    session.poller.shutdown().await;
    print_session_exit_success();

    Ok(())
}

/// Write the current page document to `path`.
pub async fn write_snapshot(page: &Mutex<Page>, path: &Path) -> std::io::Result<()> {
    let document = page.lock().await.document();
    tokio::fs::write(path, document).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::RegionId;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_snapshot_writes_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.html");

        let mut page = Page::new();
        page.require_mut(RegionId::RecommendedRpc)
            .unwrap()
            .set_text("aptoslabs");
        let page = Mutex::new(page);

        write_snapshot(&page, &path).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#"<span id="recommended-rpc">aptoslabs</span>"#));
    }
}
