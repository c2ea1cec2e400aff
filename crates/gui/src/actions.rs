//! User actions.
//!
//! Every button of the panel maps to one method here. Failures never escape:
//! each [`PlmError`] becomes a modal [`Notice`](crate::state::Notice) and the
//! method returns `None`/`false`. Remote writes that succeeded before a later
//! local failure stay in place.

use std::path::Path;

use plm_client::{
    CadHost, Direction, LoadMode, LoadOutcome, Navigation, Placement, PlmError, Result, SearchResult, Session,
    Transport, UploadAction, UploadOutcome,
};
use plm_model::ObjectId;

use crate::i18n::t;
use crate::state::{NoticeLevel, PanelState, PendingChoice};

/// Session plus the state the view renders
pub struct Panel<T, H> {
    pub session: Session<T, H>,
    pub state: PanelState,
}

impl<T: Transport, H: CadHost> Panel<T, H> {
    pub fn new(session: Session<T, H>) -> Self {
        Self {
            session,
            state: PanelState::default(),
        }
    }

    /// Search by the contents of the search box
    pub fn search(&mut self) -> bool {
        tracing::info!("Search: {:?}", self.state.search_input);
        let result = self.session.search(&self.state.search_input);
        self.show_result(result, "msg.no_objects_named")
    }

    pub fn find_all(&mut self) -> bool {
        tracing::info!("Find all");
        let result = self.session.find_all();
        self.show_result(result, "msg.no_objects")
    }

    pub fn select_row(&mut self, id: Option<ObjectId>) {
        self.state.selected_row = id;
    }

    /// Per-row Load: the object replaces the active document
    pub fn load(&mut self, id: &str) -> Option<LoadOutcome> {
        self.load_with(id, LoadMode::NewDocument)
    }

    /// Add the selected result row to the active document
    pub fn load_in_current(&mut self) -> Option<LoadOutcome> {
        let Some(id) = self.state.selected_row.clone() else {
            self.state.notify(NoticeLevel::Warning, t("msg.no_row_selected"));
            return None;
        };
        self.load_with(&id, LoadMode::SameDocument)
    }

    /// Upload the selected native object
    pub fn save(&mut self) -> Option<UploadOutcome> {
        let result = self.session.upload();
        let outcome = self.report(result)?;
        let verb = match outcome.action {
            UploadAction::Created => t("msg.created"),
            UploadAction::Updated => t("msg.updated"),
        };
        self.state.notify(NoticeLevel::Info, format!("{verb}: {}", outcome.id));
        if let Some(warning) = &outcome.warning {
            self.state.notify(NoticeLevel::Warning, warning.clone());
        }
        Some(outcome)
    }

    pub fn supersystem(&mut self) -> Option<Navigation> {
        self.navigate(Direction::Up)
    }

    pub fn subsystem(&mut self) -> Option<Navigation> {
        self.navigate(Direction::Down)
    }

    /// Load the candidate picked after an ambiguous navigation step
    pub fn choose(&mut self, id: &str) -> Option<LoadOutcome> {
        self.state.pending_choice = None;
        self.load_with(id, self.navigation_mode())
    }

    pub fn cancel_choice(&mut self) {
        self.state.pending_choice = None;
    }

    /// Bring a BREP file into the active document, or open it as a new one.
    pub fn import_brep(&mut self, path: &Path) -> bool {
        tracing::info!("Importing {}", path.display());
        let host = self.session.host_mut();
        let result = match host.active_document() {
            Ok(doc) => host.import_file(&doc, path, &Placement::default()).map(|_| ()),
            Err(PlmError::NoActiveDocument) => host.open_file(path).map(|_| ()),
            Err(e) => Err(e),
        };
        self.report(result).is_some()
    }

    /// Switch supersystem, subsystem and choice loads between a new document and the active one
    pub fn set_navigate_in_current(&mut self, in_current: bool) {
        self.state.navigate_in_current = in_current;
    }

    fn navigation_mode(&self) -> LoadMode {
        if self.state.navigate_in_current {
            LoadMode::SameDocument
        } else {
            LoadMode::NewDocument
        }
    }

    fn show_result(&mut self, result: Result<SearchResult>, empty_key: &str) -> bool {
        let Some(result) = self.report(result) else {
            return false;
        };
        tracing::info!("{} objects, {} roots", result.objects.len(), result.tree.roots.len());
        if result.objects.is_empty() {
            self.state.notify(NoticeLevel::Info, t(empty_key));
        }
        self.state.selected_row = None;
        self.state.result = Some(result);
        true
    }

    fn load_with(&mut self, id: &str, mode: LoadMode) -> Option<LoadOutcome> {
        let result = self.session.load(id, mode);
        let outcome = self.report(result)?;
        self.state.last_loaded = Some(outcome.clone());
        Some(outcome)
    }

    fn navigate(&mut self, direction: Direction) -> Option<Navigation> {
        self.state.pending_choice = None;
        let mode = self.navigation_mode();
        let result = match direction {
            Direction::Up => self.session.ascend(mode),
            Direction::Down => self.session.descend(mode),
        };
        let navigation = self.report(result)?;
        match &navigation {
            Navigation::Loaded(outcome) => self.state.last_loaded = Some(outcome.clone()),
            Navigation::Empty(Direction::Down) => self.state.notify(NoticeLevel::Info, t("msg.no_subsystems")),
            Navigation::Empty(Direction::Up) => self.state.notify(NoticeLevel::Info, t("msg.no_supersystems")),
            Navigation::Choose { direction, candidates } => {
                self.state.pending_choice = Some(PendingChoice {
                    direction: *direction,
                    candidates: candidates.clone(),
                });
            }
        }
        Some(navigation)
    }

    /// Turn a failure into a notice.
    fn report<R>(&mut self, result: Result<R>) -> Option<R> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let level = notice_level(&e);
                if level == NoticeLevel::Error {
                    tracing::error!("{e}");
                } else {
                    tracing::warn!("{e}");
                }
                self.state.notify(level, e.to_string());
                None
            }
        }
    }
}

/// Missing user input is a warning; everything else is an error.
fn notice_level(err: &PlmError) -> NoticeLevel {
    match err {
        PlmError::EmptySearch | PlmError::NoActiveDocument | PlmError::NoSelection | PlmError::NoCurrentObject => {
            NoticeLevel::Warning
        }
        _ => NoticeLevel::Error,
    }
}
