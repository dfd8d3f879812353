use client_core::{format::format_number, selectors, Action, AppState};
use eframe::egui;

use crate::{controller::events::UiEvent, ui::widgets};

pub fn show(ui: &mut egui::Ui, state: &AppState, port: u16, events: &mut Vec<UiEvent>) {
    ui.horizontal(|ui| {
        ui.heading("Stake Distribution");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!selectors::stake_loading(state), egui::Button::new("Reload"))
                .clicked()
            {
                events.push(UiEvent::Dispatch(Action::GetStakeDist { port }));
            }
        });
    });
    ui.separator();

    if selectors::stake_loading(state) {
        widgets::loader(ui);
        return;
    }
    if let Some(error) = &state.stake.error {
        if widgets::error_with_retry(ui, error) {
            events.push(UiEvent::Dispatch(Action::GetStakeDist { port }));
        }
        return;
    }

    let entries = selectors::stake_dist(state);
    if entries.is_empty() {
        ui.weak("No stake has been distributed yet.");
        return;
    }
    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("stake_dist")
            .striped(true)
            .num_columns(3)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                ui.strong("Public Key");
                ui.strong("Stake");
                ui.strong("Stake %");
                ui.end_row();
                for entry in entries {
                    ui.monospace(&entry.public_key);
                    ui.label(format_number(&entry.stake_t));
                    ui.label(&entry.stake_p);
                    ui.end_row();
                }
            });
    });
}
