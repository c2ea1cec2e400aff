use egui::Ui;

use crate::app::AppPanel;
use crate::i18n::t;

pub fn show(ui: &mut Ui, panel: &mut AppPanel) {
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut panel.state.search_input)
                .hint_text(t("search.hint"))
                .desired_width(260.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button(t("btn.search")).clicked() || submitted {
            panel.search();
        }
        if ui.button(t("btn.find_all")).clicked() {
            panel.find_all();
        }

        ui.separator();

        if ui.button(t("btn.save")).on_hover_text(t("tip.save")).clicked() {
            panel.save();
        }
        if ui
            .button(t("btn.supersystem"))
            .on_hover_text(t("tip.supersystem"))
            .clicked()
        {
            panel.supersystem();
        }
        if ui.button(t("btn.subsystem")).on_hover_text(t("tip.subsystem")).clicked() {
            panel.subsystem();
        }

        ui.separator();

        let has_row = panel.state.selected_row.is_some();
        if ui
            .add_enabled(has_row, egui::Button::new(t("btn.load_current")))
            .on_hover_text(t("tip.load_current"))
            .clicked()
        {
            panel.load_in_current();
        }
        ui.checkbox(&mut panel.state.navigate_in_current, t("btn.navigate_current"))
            .on_hover_text(t("tip.navigate_current"));
    });
}
