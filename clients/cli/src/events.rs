//! Event System
//!
//! Records emitted by the poll loops after every cycle

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Worker {
    /// Loop polling the aggregate status endpoint.
    #[strum(serialize = "status")]
    StatusPoller,
    /// Loop polling the open-incidents endpoint.
    #[strum(serialize = "incidents")]
    IncidentsPoller,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn status_poller_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::StatusPoller, msg, event_type, log_level)
    }

    pub fn incidents_poller_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::IncidentsPoller, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.worker, self.msg
        )
    }
}

/// Event sending shared by both poll loops
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send an event; a closed receiver is not an error for the loops.
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_worker_and_message() {
        let event = Event::incidents_poller_with_level(
            "2 open incidents".to_string(),
            EventType::Refresh,
            LogLevel::Info,
        );
        let line = event.to_string();
        assert!(line.starts_with("Refresh ["));
        assert!(line.ends_with("incidents: 2 open incidents"));
    }

    #[test]
    fn test_success_and_info_events_always_display() {
        let success = Event::status_poller_with_level(
            "recovered".to_string(),
            EventType::Success,
            LogLevel::Debug,
        );
        let warn = Event::status_poller_with_level(
            "HTTP 500".to_string(),
            EventType::Error,
            LogLevel::Warn,
        );
        assert!(success.should_display());
        assert!(warn.should_display());
    }

    #[tokio::test]
    async fn test_send_event_ignores_closed_receiver() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        EventSender::new(sender)
            .send_event(Event::status_poller_with_level(
                "dropped".to_string(),
                EventType::Refresh,
                LogLevel::Debug,
            ))
            .await;
    }
}
