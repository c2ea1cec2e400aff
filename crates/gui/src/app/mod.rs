//! Main application module

mod menus;
mod styles;

use eframe::egui;
use plm_client::{HttpTransport, MemoryHost, Session};

use crate::actions::Panel;
use crate::i18n::{self, Lang};
use crate::state::AppSettings;
use crate::ui::{dialogs, documents, result_tree, search_bar};

pub type AppPanel = Panel<HttpTransport, MemoryHost>;

/// Main application
pub struct PlmApp {
    panel: AppPanel,
    settings: AppSettings,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    last_language: Lang,
}

impl PlmApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        let transport = HttpTransport::new(settings.client.base_url());
        let session = Session::new(transport, MemoryHost::new(), &settings.client);

        styles::configure_styles(&cc.egui_ctx, settings.ui.font_size);
        i18n::set_lang(settings.ui.language);

        Self {
            panel: Panel::new(session),
            last_font_size: settings.ui.font_size,
            last_language: settings.ui.language,
            settings,
        }
    }
}

impl eframe::App for PlmApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.settings.ui.font_size);
            self.last_font_size = self.settings.ui.font_size;
        }
        if self.settings.ui.language != self.last_language {
            i18n::set_lang(self.settings.ui.language);
            self.last_language = self.settings.ui.language;
        }

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.panel);
                menus::settings_menu(ui, &mut self.panel);
            });
        });

        menus::settings_window(ctx, &mut self.panel, &mut self.settings);

        // ── Search bar and actions ───────────────────────────
        egui::TopBottomPanel::top("search_bar")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 6)))
            .show(ctx, |ui| {
                search_bar::show(ui, &mut self.panel);
            });

        // ── Left panel: open documents ───────────────────────
        egui::SidePanel::left("documents")
            .default_width(220.0)
            .width_range(160.0..=400.0)
            .resizable(true)
            .show(ctx, |ui| {
                documents::show(ui, &mut self.panel);
            });

        // ── Central panel: result tree ───────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            result_tree::show(ui, &mut self.panel);
        });

        // ── Modals ───────────────────────────────────────────
        dialogs::choice_window(ctx, &mut self.panel);
        dialogs::notice_window(ctx, &mut self.panel.state);
    }
}
