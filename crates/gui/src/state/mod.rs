pub mod settings;

use std::collections::VecDeque;

use plm_client::{Direction, LoadOutcome, SearchResult};
use plm_model::{ChildSummary, ObjectId};
use serde::Serialize;

pub use settings::{AppSettings, UiSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message shown to the user in a modal window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Candidates offered after a navigation step with several targets
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChoice {
    pub direction: Direction,
    pub candidates: Vec<ChildSummary>,
}

/// Panel state: everything the view renders besides the host documents
#[derive(Debug, Default)]
pub struct PanelState {
    /// Search box contents
    pub search_input: String,
    /// Last search or list result; `None` before the first query
    pub result: Option<SearchResult>,
    /// Row picked in the result tree, target of "Load in current document"
    pub selected_row: Option<ObjectId>,
    pub pending_choice: Option<PendingChoice>,
    pub last_loaded: Option<LoadOutcome>,
    /// Supersystem and subsystem load into the active document instead of a new one
    pub navigate_in_current: bool,
    /// Show settings window
    pub show_settings_window: bool,
    notices: VecDeque<Notice>,
}

impl PanelState {
    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push_back(Notice {
            level,
            text: text.into(),
        });
    }

    /// Notice currently on screen
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn clear_notices(&mut self) {
        self.notices.clear();
    }
}
