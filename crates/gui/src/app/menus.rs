//! Menu bar and settings window

use eframe::egui;

use crate::i18n::{t, Lang};
use crate::state::AppSettings;

use super::AppPanel;

pub fn file_menu(ui: &mut egui::Ui, panel: &mut AppPanel) {
    if ui.button(t("btn.import_brep")).clicked() {
        ui.close_menu();
        if let Some(path) = rfd::FileDialog::new()
            .set_title(t("dialog.import_title"))
            .add_filter("BREP", &["brep", "brp"])
            .pick_file()
        {
            panel.import_brep(&path);
        }
    }
}

pub fn settings_menu(ui: &mut egui::Ui, panel: &mut AppPanel) {
    if ui.button(t("menu.settings")).clicked() {
        panel.state.show_settings_window = true;
        ui.close_menu();
    }
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, panel: &mut AppPanel, settings: &mut AppSettings) {
    if !panel.state.show_settings_window {
        return;
    }
    let mut open = true;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            show_server_settings(ui, settings);
            show_ui_settings(ui, settings);
            show_settings_buttons(ui, panel, settings);
        });
    if !open || !panel.state.show_settings_window {
        settings.save();
        panel.state.show_settings_window = false;
    }
}

fn show_server_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.server"));
    egui::Grid::new("server_settings").num_columns(2).show(ui, |ui| {
        ui.label(t("settings.host"));
        ui.text_edit_singleline(&mut settings.client.host);
        ui.end_row();

        ui.label(t("settings.port"));
        ui.add(egui::DragValue::new(&mut settings.client.port).range(1..=u16::MAX));
        ui.end_row();

        ui.label(t("settings.author"));
        ui.text_edit_singleline(&mut settings.client.author);
        ui.end_row();
    });
    ui.weak(t("settings.restart"));
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.language"));
        ui.selectable_value(&mut settings.ui.language, Lang::Ru, "Русский");
        ui.selectable_value(&mut settings.ui.language, Lang::En, "English");
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, panel: &mut AppPanel, settings: &mut AppSettings) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.reset")).clicked() {
            *settings = AppSettings::default();
        }
        if ui.button(t("settings.close")).clicked() {
            panel.state.show_settings_window = false;
        }
    });
}
