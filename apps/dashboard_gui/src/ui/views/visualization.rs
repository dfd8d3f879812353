use client_core::{
    selectors::{self, NodeDetails},
    Action, AppState,
};
use eframe::egui;
use shared::domain::{Dag, SymbolType};

use crate::{
    controller::events::UiEvent,
    ui::{
        graph::{GraphLayout, NODE_RADIUS},
        widgets,
    },
};

#[derive(Default)]
pub struct VisualizationView {
    laid_out: Dag,
    layout: GraphLayout,
}

impl VisualizationView {
    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState, port: u16, events: &mut Vec<UiEvent>) {
        ui.horizontal(|ui| {
            ui.strong("Checkpoint Round Status:");
            ui.label(selectors::round_status_label(state));
            if let Some(error) = &state.visualization.round_status_error {
                ui.colored_label(widgets::ERROR_COLOR, "poll failed")
                    .on_hover_text(&error.message);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!selectors::viz_loading(state), egui::Button::new("Reload"))
                    .clicked()
                {
                    events.push(UiEvent::Dispatch(Action::GetDag { port }));
                }
            });
        });
        ui.separator();

        if selectors::viz_loading(state) {
            widgets::loader(ui);
            return;
        }
        let dag = selectors::dag(state);
        if dag.is_empty() {
            match &state.visualization.dag_error {
                Some(error) => {
                    if widgets::error_with_retry(ui, error) {
                        events.push(UiEvent::Dispatch(Action::GetDag { port }));
                    }
                }
                None => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(32.0);
                        ui.weak("The node reported an empty DAG.");
                    });
                }
            }
            return;
        }

        if *dag != self.laid_out {
            self.layout = GraphLayout::compute(dag);
            self.laid_out = dag.clone();
        }
        let selected = selectors::selected_node_id(state);

        egui::ScrollArea::both().show(ui, |ui| {
            let size = self.layout.size.max(ui.available_size());
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
            let origin = response.rect.min.to_vec2();
            let text_color = ui.visuals().text_color();

            for link in &self.layout.links {
                let from = link.from + origin;
                let to = link.to + origin;
                let span = to - from;
                let length = span.length();
                if length <= NODE_RADIUS * 2.0 {
                    continue;
                }
                let dir = span / length;
                painter.arrow(
                    from + dir * NODE_RADIUS,
                    dir * (length - NODE_RADIUS * 2.0),
                    egui::Stroke::new(1.5, link.color),
                );
            }

            for node in &self.layout.nodes {
                let center = node.center + origin;
                let highlight = selected == Some(node.id.as_str());
                match node.symbol {
                    SymbolType::Square => {
                        let rect = egui::Rect::from_center_size(center, egui::Vec2::splat(NODE_RADIUS * 2.0));
                        painter.rect_filled(rect, egui::CornerRadius::same(2), node.color);
                        if highlight {
                            painter.rect_stroke(
                                rect,
                                egui::CornerRadius::same(2),
                                egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE),
                                egui::StrokeKind::Outside,
                            );
                        }
                    }
                    SymbolType::Circle => {
                        painter.circle_filled(center, NODE_RADIUS, node.color);
                        if highlight {
                            painter.circle_stroke(
                                center,
                                NODE_RADIUS + 1.0,
                                egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE),
                            );
                        }
                    }
                }
                if let Some(label) = &node.label {
                    painter.text(
                        center - egui::vec2(0.0, NODE_RADIUS + 2.0),
                        egui::Align2::CENTER_BOTTOM,
                        label,
                        egui::FontId::proportional(11.0),
                        text_color,
                    );
                }
            }

            if response.clicked() {
                if let Some(pointer) = response.interact_pointer_pos() {
                    if let Some(id) = self.layout.hit_test(pointer - origin) {
                        events.push(UiEvent::SelectNode(Some(id.to_string())));
                    }
                }
            }
        });
    }

    pub fn show_details(
        &self,
        ctx: &egui::Context,
        state: &AppState,
        port: u16,
        events: &mut Vec<UiEvent>,
    ) {
        let Some(details) = selectors::node_details(state) else {
            return;
        };
        let mut open = true;
        let mut close_clicked = false;
        egui::Window::new(details.title())
            .id(egui::Id::new("node_details_window"))
            .collapsible(false)
            .resizable(true)
            .default_width(640.0)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().max_height(480.0).show(ui, |ui| {
                    widgets::detail_row(ui, "Identifier", details.id());
                    ui.separator();
                    if state.visualization.is_transaction_info_loading {
                        ui.spinner();
                    } else if let Some(error) = &state.visualization.transaction_info_error {
                        if widgets::error_with_retry(ui, error) {
                            events.push(UiEvent::Dispatch(Action::GetTransactionInfo {
                                port,
                                transaction_id: details.id().to_string(),
                            }));
                        }
                        return;
                    }
                    details_body(ui, &details);
                });
                ui.separator();
                close_clicked = ui.button("Close").clicked();
            });
        if !open || close_clicked {
            events.push(UiEvent::SelectNode(None));
        }
    }
}

fn details_body(ui: &mut egui::Ui, details: &NodeDetails) {
    match details {
        NodeDetails::Transaction {
            total_inputs,
            inputs,
            total_outputs,
            outputs,
            total_fees,
            stake,
            confirmed,
            ..
        } => {
            widgets::detail_row(ui, "Total Inputs", total_inputs);
            widgets::wallet_table(ui, "txn_inputs", inputs);
            widgets::detail_row(ui, "Total Outputs", total_outputs);
            widgets::wallet_table(ui, "txn_outputs", outputs);
            widgets::detail_row(ui, "Total Fees", total_fees);
            if let Some(stake) = stake {
                widgets::detail_row(ui, "Stake", stake);
            }
            let status = if *confirmed {
                egui::RichText::new("Confirmed").color(widgets::OK_COLOR)
            } else {
                egui::RichText::new("Pending").color(widgets::ERROR_COLOR)
            };
            widgets::detail_row(ui, "Status", status);
        }
        NodeDetails::Checkpoint {
            miner,
            utc_time,
            total_stake,
            height,
            nutxo,
            total_unspent_outputs,
            unspent_outputs,
            fee_rewards,
            reward_outputs,
            ..
        } => {
            let or_blank = |value: Option<u64>| value.map(|v| v.to_string()).unwrap_or_default();
            widgets::detail_row(ui, "Miner", miner);
            widgets::detail_row(ui, "UTC Time", utc_time.clone().unwrap_or_default());
            widgets::detail_row(ui, "Total Stake", total_stake);
            widgets::detail_row(ui, "Height", or_blank(*height));
            widgets::detail_row(ui, "No. of UTXO", or_blank(*nutxo));
            widgets::detail_row(ui, "Total Unspent Outputs", total_unspent_outputs);
            widgets::wallet_table(ui, "ckpt_unspent", unspent_outputs);
            widgets::detail_row(ui, "Fee Rewards", fee_rewards);
            widgets::wallet_table(ui, "ckpt_rewards", reward_outputs);
        }
        NodeDetails::Acknowledgement {
            previous,
            transaction,
            validator,
            ..
        } => {
            widgets::detail_row(ui, "Previous", previous);
            widgets::detail_row(ui, "Transaction", transaction);
            widgets::detail_row(ui, "Validator", validator);
        }
    }
}
