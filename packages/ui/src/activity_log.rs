//! In-app history of what the console did: loads that failed, mutations that
//! went through, sign-ins and expiries. Shown by
//! [`ActivityLogPanel`](crate::ActivityLogPanel).

use dashboard::TabId;
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Most severe first, the order of the panel's filter chips.
    pub const ALL: [LogLevel; 4] = [LogLevel::Error, LogLevel::Warning, LogLevel::Success, LogLevel::Info];

    pub fn class(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "Info",
            LogLevel::Success => "Done",
            LogLevel::Warning => "Warnings",
            LogLevel::Error => "Errors",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    /// Dashboard tab that was open when this happened.
    pub tab: Option<TabId>,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
    /// Only entries of this level are listed when set.
    pub filter: Option<LogLevel>,
    current_tab: Option<TabId>,
}

/// Entries kept before the oldest are dropped.
const MAX_ENTRIES: usize = 200;

impl ActivityLog {
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            timestamp: current_time(),
            level,
            message: message.into(),
            tab: self.current_tab,
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    /// Stamp later entries with `tab`. `None` outside the dashboard.
    pub fn set_tab(&mut self, tab: Option<TabId>) {
        self.current_tab = tab;
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(LogLevel::Error) > 0
    }

    /// Clicking the active chip again shows everything.
    pub fn toggle_filter(&mut self, level: LogLevel) {
        self.filter = if self.filter == Some(level) { None } else { Some(level) };
    }

    /// Entries to list, newest first.
    pub fn shown(&self) -> Vec<LogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| self.filter.is_none_or(|level| e.level == level))
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.filter = None;
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = ActivityLog::default();
        for i in 0..(MAX_ENTRIES + 5) {
            log.push(LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries[0].message, "entry 5");
        assert!(!log.has_errors());

        log.push(LogLevel::Error, "Failed to load users");
        assert!(log.has_errors());
    }

    #[test]
    fn test_entries_remember_their_tab() {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Success, "Welcome back");
        log.set_tab(Some(TabId::Users));
        log.push(LogLevel::Error, "Failed to load users: Network error: offline");
        log.set_tab(Some(TabId::Feedback));
        log.push(LogLevel::Info, "Feedback marked Resolved");
        log.set_tab(None);
        log.push(LogLevel::Info, "Signed out");

        let tabs: Vec<_> = log.entries.iter().map(|e| e.tab).collect();
        assert_eq!(tabs, vec![None, Some(TabId::Users), Some(TabId::Feedback), None]);
    }

    #[test]
    fn test_level_filter_and_counts() {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Error, "first failure");
        log.push(LogLevel::Success, "User deleted");
        log.push(LogLevel::Error, "second failure");
        assert_eq!(log.count(LogLevel::Error), 2);
        assert_eq!(log.count(LogLevel::Warning), 0);

        let messages = |log: &ActivityLog| log.shown().into_iter().map(|e| e.message).collect::<Vec<_>>();
        assert_eq!(messages(&log), vec!["second failure", "User deleted", "first failure"]);

        log.toggle_filter(LogLevel::Error);
        assert_eq!(messages(&log), vec!["second failure", "first failure"]);

        log.toggle_filter(LogLevel::Error);
        assert_eq!(log.filter, None);
        assert_eq!(log.shown().len(), 3);

        log.toggle_filter(LogLevel::Success);
        log.clear();
        assert!(log.entries.is_empty());
        assert_eq!(log.filter, None);
    }
}
