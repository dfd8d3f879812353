use client_core::{
    format::format_number,
    selectors,
    transfer::{TransferDialog, TransferForm},
    Action, AppState, Route,
};
use eframe::egui;
use shared::domain::TransferMode;

use crate::{controller::events::UiEvent, ui::widgets};

#[derive(Default)]
pub struct TransactionsView {
    form: TransferForm,
    dialog: TransferDialog,
    show_secret: bool,
    /// Index into the agent's keys; `None` follows the newest key.
    selected_key: Option<usize>,
    add_key_open: bool,
    add_key_input: String,
}

impl TransactionsView {
    pub fn for_route(route: &Route) -> Self {
        let form = match route {
            Route::Transactions {
                value, recipient, ..
            } => TransferForm::prefilled(value.as_deref(), recipient.as_deref()),
            _ => TransferForm::new(),
        };
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState, port: u16, events: &mut Vec<UiEvent>) {
        if selectors::transactions_loading(state) {
            widgets::loader(ui);
            return;
        }
        if let Some(error) = &state.transactions.error {
            if widgets::error_with_retry(ui, error) {
                events.push(UiEvent::Dispatch(Action::GetAgent { port }));
            }
            ui.separator();
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.info_segment(ui, state);
            ui.add_space(12.0);
            self.keys_panel(ui, state, port, events);
            ui.add_space(12.0);
            self.transfer_card(ui, state, port);
        });
    }

    fn info_segment(&self, ui: &mut egui::Ui, state: &AppState) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("agent_info").num_columns(2).show(ui, |ui| {
                ui.strong("Balance");
                ui.label(format_number(&state.transactions.balance));
                ui.end_row();
                ui.strong("Stake");
                ui.label(&state.transactions.stake);
                ui.end_row();
                ui.strong("Transaction Fee");
                ui.label(&state.transactions.transaction_fee);
                ui.end_row();
            });
        });
    }

    fn keys_panel(&mut self, ui: &mut egui::Ui, state: &AppState, port: u16, events: &mut Vec<UiEvent>) {
        let keys = selectors::keys(state);
        let index = self
            .selected_key
            .filter(|index| *index < keys.len())
            .or_else(|| keys.len().checked_sub(1));

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Keys");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Add key").clicked() {
                        self.add_key_open = true;
                    }
                    if ui.button("Generate Keys").clicked() {
                        events.push(UiEvent::Dispatch(Action::GenerateKeyPair { port }));
                    }
                });
            });

            let Some(index) = index else {
                ui.weak("This agent has no keys yet.");
                return;
            };
            let key = &keys[index];

            egui::ComboBox::from_id_salt("key_picker")
                .width(ui.available_width().min(520.0))
                .selected_text(short_key(&key.public_key))
                .show_ui(ui, |ui| {
                    for (i, candidate) in keys.iter().enumerate() {
                        if ui
                            .selectable_label(i == index, short_key(&candidate.public_key))
                            .clicked()
                        {
                            self.selected_key = Some(i);
                        }
                    }
                });

            egui::Grid::new("current_key").num_columns(3).show(ui, |ui| {
                ui.strong("Public Key");
                ui.monospace(&key.public_key);
                if ui.small_button("Copy").clicked() {
                    events.push(UiEvent::Copy {
                        what: "Public key",
                        text: key.public_key.clone(),
                    });
                }
                ui.end_row();

                ui.strong("Secret Key");
                if self.show_secret {
                    ui.monospace(&key.secret_key);
                } else {
                    ui.monospace("•".repeat(key.secret_key.len().min(32)));
                }
                ui.horizontal(|ui| {
                    let toggle = if self.show_secret { "Hide" } else { "Show" };
                    if ui.small_button(toggle).clicked() {
                        self.show_secret = !self.show_secret;
                    }
                    if ui.small_button("Copy").clicked() {
                        events.push(UiEvent::Copy {
                            what: "Secret key",
                            text: key.secret_key.clone(),
                        });
                    }
                });
                ui.end_row();
            });
        });
    }

    fn transfer_card(&mut self, ui: &mut egui::Ui, state: &AppState, port: u16) {
        let fee_rate = selectors::transaction_fee(state);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.heading("Transfer");
            ui.horizontal(|ui| {
                let mut mode = self.form.mode;
                ui.radio_value(&mut mode, TransferMode::Recipient, "Transfer");
                ui.radio_value(&mut mode, TransferMode::Delegate, "Delegate");
                if mode != self.form.mode {
                    self.form.set_mode(mode);
                }
            });
            ui.add_space(6.0);

            ui.label("Value");
            let mut value = self.form.value.clone();
            let response = ui.text_edit_singleline(&mut value);
            if response.changed() {
                self.form.set_value(&value);
            }
            if response.lost_focus() {
                self.form.blur_value();
            }
            widgets::field_error(ui, &self.form.value_state);

            ui.label("Recipient's Public Key");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.form.recipient)
                    .desired_width(f32::INFINITY)
                    .font(egui::TextStyle::Monospace),
            );
            if response.lost_focus() {
                self.form.blur_recipient();
            }
            widgets::field_error(ui, &self.form.recipient_state);

            if self.form.mode == TransferMode::Delegate {
                ui.label("Validator's Public Key");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.form.validator)
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace),
                );
                if response.lost_focus() {
                    self.form.blur_validator();
                }
                widgets::field_error(ui, &self.form.validator_state);
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.strong("Total Cost");
                ui.label(format_number(self.form.total_cost(fee_rate)));
            });
            if ui
                .add_enabled(self.form.can_submit(), egui::Button::new("Submit"))
                .clicked()
            {
                self.dialog = self
                    .form
                    .submit(selectors::balance(state), fee_rate, port);
            }
        });
    }

    /// Modal windows: transfer confirmation, insufficient balance, add key.
    pub fn show_dialogs(&mut self, ctx: &egui::Context, port: u16, events: &mut Vec<UiEvent>) {
        self.transfer_dialog(ctx, events);
        self.add_key_dialog(ctx, port, events);
    }

    fn transfer_dialog(&mut self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        if !self.dialog.is_open() {
            return;
        }
        let mut answer = None;
        egui::Window::new(self.dialog.title())
            .id(egui::Id::new("transfer_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(self.dialog.message());
                ui.add_space(8.0);
                ui.horizontal(|ui| match &self.dialog {
                    TransferDialog::Confirm(_) => {
                        if ui.button("Yes").clicked() {
                            answer = Some(true);
                        }
                        if ui.button("No").clicked() {
                            answer = Some(false);
                        }
                    }
                    _ => {
                        if ui.button("OK").clicked() {
                            answer = Some(false);
                        }
                    }
                });
            });

        match answer {
            Some(true) => {
                if let Some(action) = std::mem::take(&mut self.dialog).confirm() {
                    events.push(UiEvent::Dispatch(action));
                }
                self.form = TransferForm::new();
            }
            Some(false) => self.dialog = TransferDialog::Closed,
            None => {}
        }
    }

    fn add_key_dialog(&mut self, ctx: &egui::Context, port: u16, events: &mut Vec<UiEvent>) {
        if !self.add_key_open {
            return;
        }
        let mut open = true;
        let mut submitted = false;
        let mut cancelled = false;
        egui::Window::new("Add key")
            .id(egui::Id::new("add_key_dialog"))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Pre-generated Secret Key");
                ui.add(
                    egui::TextEdit::singleline(&mut self.add_key_input)
                        .desired_width(420.0)
                        .font(egui::TextStyle::Monospace),
                );
                ui.horizontal(|ui| {
                    let ready = !self.add_key_input.trim().is_empty();
                    submitted = ui.add_enabled(ready, egui::Button::new("Add")).clicked();
                    cancelled = ui.button("Cancel").clicked();
                });
            });

        if submitted {
            events.push(UiEvent::Dispatch(Action::AddKey {
                port,
                key: self.add_key_input.trim().to_string(),
            }));
        }
        if submitted || cancelled || !open {
            self.add_key_open = false;
            self.add_key_input.clear();
        }
    }
}

fn short_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 24 {
        return key.to_string();
    }
    let head: String = chars[..12].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{head}…{tail}")
}
