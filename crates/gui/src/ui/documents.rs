//! Open documents and their objects; clicking an object selects it for Save.

use egui::Ui;
use plm_client::{CadHost, ObjectRef};

use crate::app::AppPanel;
use crate::i18n::t;

pub fn show(ui: &mut Ui, panel: &mut AppPanel) {
    ui.heading(t("docs.title"));
    ui.separator();

    let host = panel.session.host();
    let names = host.document_names();
    if names.is_empty() {
        ui.weak(t("docs.none"));
        return;
    }
    let active = host.active_document().ok();
    let selection = host.selection().unwrap_or_default();

    let mut activate = None;
    let mut select = None;
    egui::ScrollArea::vertical()
        .id_salt("documents_scroll")
        .show(ui, |ui| {
            for doc in &names {
                let is_active = active.as_deref() == Some(doc.as_str());
                let tagged = matches!(host.document_tag(doc), Ok(Some(_)));
                ui.horizontal(|ui| {
                    let label = egui::RichText::new(doc).strong();
                    if ui.selectable_label(is_active, label).clicked() {
                        activate = Some(doc.clone());
                    }
                    if tagged {
                        ui.weak(t("docs.tagged"));
                    }
                });
                for obj in host.objects(doc).unwrap_or_default() {
                    let label = host
                        .read_object(&obj)
                        .map(|native| native.label)
                        .unwrap_or_else(|_| obj.name.clone());
                    ui.horizontal(|ui| {
                        ui.add_space(12.0);
                        if ui.selectable_label(selection.contains(&obj), label).clicked() {
                            select = Some(obj.clone());
                        }
                    });
                }
            }
        });

    if let Some(doc) = activate {
        if let Err(e) = panel.session.host_mut().activate(&doc) {
            tracing::warn!("{e}");
        }
    }
    if let Some(obj) = select {
        select_object(panel, &obj);
    }
}

fn select_object(panel: &mut AppPanel, obj: &ObjectRef) {
    let host = panel.session.host_mut();
    let result = host.activate(&obj.document).and_then(|_| host.select(obj));
    if let Err(e) = result {
        tracing::warn!("{e}");
    }
}
