use std::time::Instant;

use client_core::transfer::FieldState;
use eframe::egui;
use shared::{domain::Wallet, error::ApiError};

use crate::controller::toasts::Toasts;

pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 70, 70);
pub const OK_COLOR: egui::Color32 = egui::Color32::from_rgb(60, 170, 90);

pub fn loader(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.add(egui::Spinner::new().size(32.0));
        ui.weak("Loading...");
    });
}

/// Shows a failed request. Returns true when Retry was clicked.
pub fn error_with_retry(ui: &mut egui::Ui, error: &ApiError) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        ui.colored_label(ERROR_COLOR, "Request failed");
        ui.small(&error.message);
        ui.add_space(8.0);
        retry = ui.button("Retry").clicked();
    });
    retry
}

pub fn field_error(ui: &mut egui::Ui, state: &FieldState) {
    if let Some(message) = state.error() {
        ui.colored_label(ERROR_COLOR, egui::RichText::new(message).small());
    }
}

pub fn detail_row(ui: &mut egui::Ui, label: &str, value: impl Into<egui::WidgetText>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        ui.add_space(16.0);
        ui.label(value);
    });
}

pub fn wallet_table(ui: &mut egui::Ui, id_salt: &str, wallets: &[Wallet]) {
    if wallets.is_empty() {
        return;
    }
    egui::Grid::new(id_salt)
        .striped(true)
        .num_columns(2)
        .show(ui, |ui| {
            ui.strong("Public Key");
            ui.strong("Value");
            ui.end_row();
            for wallet in wallets {
                ui.monospace(&wallet.public_key);
                ui.label(&wallet.value);
                ui.end_row();
            }
        });
}

pub fn show_toasts(ctx: &egui::Context, toasts: &mut Toasts, now: Instant) {
    toasts.expire(now);
    if toasts.is_empty() {
        return;
    }
    let mut dismissed = None;
    egui::Area::new(egui::Id::new("dashboard_toasts"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 40.0))
        .show(ctx, |ui| {
            for (index, toast) in toasts.iter().enumerate() {
                egui::Frame::popup(&ctx.style())
                    .corner_radius(egui::CornerRadius::same(6))
                    .show(ui, |ui| {
                        if ui
                            .add(egui::Label::new(&toast.message).sense(egui::Sense::click()))
                            .clicked()
                        {
                            dismissed = Some(index);
                        }
                    });
                ui.add_space(4.0);
            }
        });
    if let Some(index) = dismissed {
        toasts.dismiss(index);
    }
}
