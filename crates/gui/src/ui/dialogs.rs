//! Modal windows: notices and the navigation candidate picker

use plm_client::Direction;

use crate::app::AppPanel;
use crate::i18n::t;
use crate::state::{NoticeLevel, PanelState};

/// Show the oldest pending notice until it is acknowledged.
pub fn notice_window(ctx: &egui::Context, state: &mut PanelState) {
    let Some(notice) = state.current_notice() else {
        return;
    };
    let (title, color) = match notice.level {
        NoticeLevel::Info => (t("notice.info"), egui::Color32::from_rgb(200, 200, 200)),
        NoticeLevel::Warning => (t("notice.warning"), egui::Color32::from_rgb(230, 190, 80)),
        NoticeLevel::Error => (t("notice.error"), egui::Color32::from_rgb(230, 90, 80)),
    };
    let text = notice.text.clone();

    let mut dismissed = false;
    egui::Window::new(title)
        .id(egui::Id::new("notice_window"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(text).color(color));
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button(t("notice.ok")).clicked() {
                    dismissed = true;
                }
            });
        });
    if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.dismiss_notice();
    }
}

pub fn choice_window(ctx: &egui::Context, panel: &mut AppPanel) {
    let Some(choice) = &panel.state.pending_choice else {
        return;
    };
    let title = match choice.direction {
        Direction::Up => t("choose.up"),
        Direction::Down => t("choose.down"),
    };

    let mut picked = None;
    let mut cancelled = false;
    egui::Window::new(title)
        .id(egui::Id::new("choice_window"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            for candidate in &choice.candidates {
                if ui.button(format!("{}  ({})", candidate.name, candidate.id)).clicked() {
                    picked = Some(candidate.id.clone());
                }
            }
            ui.separator();
            if ui.button(t("choose.cancel")).clicked() {
                cancelled = true;
            }
        });

    if let Some(id) = picked {
        panel.choose(&id);
    } else if cancelled {
        panel.cancel_choice();
    }
}
