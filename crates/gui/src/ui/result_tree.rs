//! Result tree panel: the hierarchy of the last search with a Load button per row

use egui::Ui;
use plm_model::{ObjectId, TreeNode};

use crate::app::AppPanel;
use crate::i18n::t;

enum RowAction {
    Select(ObjectId),
    Load(ObjectId),
}

pub fn show(ui: &mut Ui, panel: &mut AppPanel) {
    ui.heading(t("tree.results"));
    ui.separator();

    let Some(result) = &panel.state.result else {
        ui.weak(t("tree.not_searched"));
        return;
    };
    if result.tree.is_empty() {
        ui.weak(t("tree.no_results"));
        return;
    }

    // Render from a borrow, apply the clicked action afterwards
    let mut action = None;
    egui::ScrollArea::vertical()
        .id_salt("result_tree_scroll")
        .show(ui, |ui| {
            for (index, node) in result.tree.roots.iter().enumerate() {
                show_node(ui, node, &format!("{index}"), panel.state.selected_row.as_deref(), &mut action);
            }
        });

    match action {
        Some(RowAction::Select(id)) => panel.select_row(Some(id)),
        Some(RowAction::Load(id)) => {
            panel.load(&id);
        }
        None => {}
    }
}

fn show_node(ui: &mut Ui, node: &TreeNode, path: &str, selected: Option<&str>, action: &mut Option<RowAction>) {
    let header = |ui: &mut Ui, action: &mut Option<RowAction>| {
        let is_selected = node.id.is_some() && node.id.as_deref() == selected;
        let label = match &node.id {
            Some(id) => format!("{}  ({id})", node.name),
            None => node.name.clone(),
        };
        if ui.selectable_label(is_selected, label).clicked() {
            if let Some(id) = &node.id {
                *action = Some(RowAction::Select(id.clone()));
            }
        }
        if ui
            .add_enabled(node.id.is_some(), egui::Button::new(t("btn.load")).small())
            .clicked()
        {
            if let Some(id) = &node.id {
                *action = Some(RowAction::Load(id.clone()));
            }
        }
    };

    if node.children.is_empty() {
        ui.horizontal(|ui| header(ui, action));
        return;
    }

    // the path keeps ids unique when a child appears under several parents
    let id = ui.make_persistent_id(("result_node", path));
    egui::collapsing_header::CollapsingState::load_with_default_open(ui.ctx(), id, true)
        .show_header(ui, |ui| header(ui, action))
        .body(|ui| {
            for (index, child) in node.children.iter().enumerate() {
                show_node(ui, child, &format!("{path}/{index}"), selected, action);
            }
        });
}
