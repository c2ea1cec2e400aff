//! JSON command protocol for driving the panel without a window.
//!
//! Each command is one button press. A failed action answers with
//! `success: false` and the text of the notice it raised.

use std::path::PathBuf;

use plm_client::{CadHost, LoadOutcome, Navigation, Transport, UploadAction};
use serde::{Deserialize, Serialize};

use crate::actions::Panel;

/// A panel command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PanelCommand {
    /// Type `name` into the search box and press Search
    Search { name: String },
    FindAll,
    /// Per-row Load
    Load { id: String },
    /// Pick a row in the result tree
    SelectRow { id: String },
    /// Load the selected row, or `id` when given, into the active document
    LoadInCurrent {
        #[serde(default)]
        id: Option<String>,
    },
    Save,
    Supersystem,
    Subsystem,
    /// Answer a pending choice
    Choose { id: String },
    /// Toggle "Navigate in current document"
    SetNavigationMode { in_current: bool },
    ImportBrep { path: PathBuf },
    DismissNotices,
    /// Report the panel state
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the panel.
pub fn execute_command<T: Transport, H: CadHost>(panel: &mut Panel<T, H>, cmd: PanelCommand) -> CommandResponse {
    match cmd {
        PanelCommand::Search { name } => {
            panel.state.search_input = name;
            if panel.search() {
                result_summary(panel)
            } else {
                failed(panel)
            }
        }

        PanelCommand::FindAll => {
            if panel.find_all() {
                result_summary(panel)
            } else {
                failed(panel)
            }
        }

        PanelCommand::Load { id } => match panel.load(&id) {
            Some(outcome) => CommandResponse::ok_with_data(loaded_json(&outcome)),
            None => failed(panel),
        },

        PanelCommand::SelectRow { id } => {
            panel.select_row(Some(id.clone()));
            CommandResponse::ok_with_data(serde_json::json!({ "selected": id }))
        }

        PanelCommand::LoadInCurrent { id } => {
            if let Some(id) = id {
                panel.select_row(Some(id));
            }
            match panel.load_in_current() {
                Some(outcome) => CommandResponse::ok_with_data(loaded_json(&outcome)),
                None => failed(panel),
            }
        }

        PanelCommand::Save => match panel.save() {
            Some(outcome) => {
                let action = match outcome.action {
                    UploadAction::Created => "created",
                    UploadAction::Updated => "updated",
                };
                CommandResponse::ok_with_data(serde_json::json!({
                    "id": outcome.id,
                    "action": action,
                    "warning": outcome.warning,
                }))
            }
            None => failed(panel),
        },

        PanelCommand::Supersystem => match panel.supersystem() {
            Some(navigation) => CommandResponse::ok_with_data(navigation_json(&navigation)),
            None => failed(panel),
        },

        PanelCommand::Subsystem => match panel.subsystem() {
            Some(navigation) => CommandResponse::ok_with_data(navigation_json(&navigation)),
            None => failed(panel),
        },

        PanelCommand::Choose { id } => {
            if panel.state.pending_choice.is_none() {
                return CommandResponse::err("No choice is pending");
            }
            match panel.choose(&id) {
                Some(outcome) => CommandResponse::ok_with_data(loaded_json(&outcome)),
                None => failed(panel),
            }
        }

        PanelCommand::SetNavigationMode { in_current } => {
            panel.set_navigate_in_current(in_current);
            CommandResponse::ok_with_data(serde_json::json!({ "in_current": in_current }))
        }

        PanelCommand::ImportBrep { path } => {
            if panel.import_brep(&path) {
                CommandResponse::ok()
            } else {
                failed(panel)
            }
        }

        PanelCommand::DismissNotices => {
            panel.state.clear_notices();
            CommandResponse::ok()
        }

        PanelCommand::Inspect => {
            let state = &panel.state;
            CommandResponse::ok_with_data(serde_json::json!({
                "search_input": state.search_input,
                "tree": state.result.as_ref().map(|r| &r.tree),
                "selected_row": state.selected_row,
                "pending_choice": state.pending_choice.as_ref().map(|c| &c.candidates),
                "last_loaded": state.last_loaded.as_ref().map(loaded_json),
                "navigate_in_current": state.navigate_in_current,
                "history": panel.session.history().iter().collect::<Vec<_>>(),
                "notices": state.notices().collect::<Vec<_>>(),
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json<T: Transport, H: CadHost>(panel: &mut Panel<T, H>, json: &str) -> Result<CommandResponse, String> {
    let cmd: PanelCommand = serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(panel, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch<T: Transport, H: CadHost>(
    panel: &mut Panel<T, H>,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<PanelCommand> = serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds.into_iter().map(|cmd| execute_command(panel, cmd)).collect())
}

fn failed<T, H>(panel: &Panel<T, H>) -> CommandResponse {
    let text = panel
        .state
        .notices()
        .last()
        .map(|n| n.text.clone())
        .unwrap_or_else(|| "Action failed".to_string());
    CommandResponse::err(text)
}

fn result_summary<T, H>(panel: &Panel<T, H>) -> CommandResponse {
    match &panel.state.result {
        Some(result) => CommandResponse::ok_with_data(serde_json::json!({
            "count": result.objects.len(),
            "tree": result.tree,
        })),
        None => CommandResponse::ok(),
    }
}

fn loaded_json(outcome: &LoadOutcome) -> serde_json::Value {
    serde_json::json!({
        "id": outcome.id,
        "name": outcome.name,
        "document": outcome.document,
    })
}

fn navigation_json(navigation: &Navigation) -> serde_json::Value {
    match navigation {
        Navigation::Loaded(outcome) => serde_json::json!({ "loaded": loaded_json(outcome) }),
        Navigation::Empty(direction) => serde_json::json!({ "empty": direction }),
        Navigation::Choose { direction, candidates } => serde_json::json!({
            "choose": candidates,
            "direction": direction,
        }),
    }
}
