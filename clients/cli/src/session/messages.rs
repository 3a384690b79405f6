//! Console lines printed around a watch session

use super::SessionData;

const BOLD_CYAN: &str = "\x1b[1;36m";
const BOLD_GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

fn tagged(color: &str, tag: &str, msg: &str) -> String {
    format!("{}[{}]{} {}", color, tag, RESET, msg)
}

/// What the session polls and where its snapshots go.
fn starting_lines(session: &SessionData) -> Vec<String> {
    let mut lines = vec![format!(
        "Watching {} (status every {}s, incidents every {}s)",
        session.base_url,
        session.status_interval.as_secs(),
        session.incidents_interval.as_secs()
    )];
    if let Some(output) = &session.output {
        lines.push(format!("Writing page snapshots to {}", output.display()));
    }
    lines
}

pub fn print_session_starting(session: &SessionData) {
    for line in starting_lines(session) {
        println!("{}", tagged(BOLD_CYAN, "INFO", &line));
    }
}

pub fn print_session_shutdown() {
    println!("{}", tagged(BOLD_CYAN, "INFO", "Stopping pollers..."));
}

pub fn print_session_exit_success() {
    println!("{}", tagged(BOLD_GREEN, "DONE", "Guardian dashboard stopped"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::session::setup_session;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_starting_lines_describe_schedule_and_output() {
        let mut config = DashboardConfig::default();
        config.base_url = "http://127.0.0.1:9".to_string();
        config.status_interval_secs = 5;

        let session = setup_session(&config, Some(PathBuf::from("dashboard.html"))).unwrap();
        assert_eq!(
            starting_lines(&session),
            [
                "Watching http://127.0.0.1:9 (status every 5s, incidents every 20s)",
                "Writing page snapshots to dashboard.html",
            ]
        );
        session.poller.shutdown().await;
    }

    #[test]
    fn test_tagged_wraps_tag_in_color() {
        assert_eq!(
            tagged(BOLD_GREEN, "DONE", "bye"),
            "\x1b[1;32m[DONE]\x1b[0m bye"
        );
    }
}
