use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use arboard::Clipboard;
use chrono::{DateTime, Local};
use client_core::{
    selectors, Action, Effects, HttpLedgerClient, Notice, RoundStatusPoller, Route, Settings,
    Store,
};
use eframe::egui;
use shared::domain::RoundStatus;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};

use crate::{
    backend_bridge::runtime::BackendRuntime,
    controller::{
        events::UiEvent,
        orchestration::{dispatch_ui_event, entry_actions, startup_actions},
        toasts::{round_status_toast, Toasts, NOTICE_TTL, ROUND_STATUS_TOAST, ROUND_STATUS_TTL},
    },
    ui::{
        views::{stake, TransactionsView, VisualizationView},
        widgets,
    },
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Visualization,
    Transactions,
    Stake,
}

pub struct DashboardApp {
    settings: Settings,
    store: Store,
    notices: broadcast::Receiver<Notice>,
    route: Route,
    route_input: String,
    poller: Option<RoundStatusPoller>,
    toasts: Toasts,
    last_round_status: RoundStatus,
    visualization: VisualizationView,
    transactions: TransactionsView,
    last_update: Option<DateTime<Local>>,
    title_dirty: bool,
    // Dropped last so pending effect tasks see the runtime shut down.
    runtime: BackendRuntime,
}

impl DashboardApp {
    pub fn new(runtime: BackendRuntime, settings: Settings, route: Route) -> Result<Self> {
        let api = HttpLedgerClient::with_timeout(&settings.base_url, settings.request_timeout())
            .context("building ledger client")?;
        let effects = Effects::new(Arc::new(api), runtime.handle().clone())
            .with_validators(settings.validators.clone());
        let notices = effects.subscribe_notices();
        let mut store = Store::with_effects(effects);
        for action in startup_actions() {
            store.dispatch(action);
        }
        info!(base_url = %settings.base_url, %route, "dashboard started");

        let mut app = Self {
            settings,
            store,
            notices,
            route: route.clone(),
            route_input: route.to_string(),
            poller: None,
            toasts: Toasts::default(),
            last_round_status: RoundStatus::Unknown,
            visualization: VisualizationView::default(),
            transactions: TransactionsView::for_route(&route),
            last_update: None,
            title_dirty: true,
            runtime,
        };
        app.navigate(route);
        Ok(app)
    }

    fn navigate(&mut self, route: Route) {
        let port = route.port();
        if port != self.route.port() {
            self.store.select_node(self.route.port(), None);
        }

        match &route {
            Route::Visualization { .. } => {
                let running = self.poller.as_ref().map(RoundStatusPoller::port);
                if running != Some(port) {
                    self.poller = Some(RoundStatusPoller::start(
                        self.runtime.handle(),
                        port,
                        self.settings.round_status_period(),
                        self.store.sender(),
                    ));
                }
            }
            _ => self.poller = None,
        }
        if matches!(route, Route::Transactions { .. }) {
            self.transactions = TransactionsView::for_route(&route);
        }

        for action in entry_actions(&route, self.store.state()) {
            self.store.dispatch(action);
        }
        self.route_input = route.to_string();
        self.route = route;
        self.title_dirty = true;
    }

    fn page(&self) -> Page {
        match self.route {
            Route::Visualization { .. } => Page::Visualization,
            Route::Transactions { .. } => Page::Transactions,
            Route::Stake { .. } => Page::Stake,
        }
    }

    fn route_for(page: Page, port: u16) -> Route {
        match page {
            Page::Visualization => Route::Visualization { port },
            Page::Transactions => Route::Transactions {
                port,
                value: None,
                recipient: None,
            },
            Page::Stake => Route::Stake { port },
        }
    }

    fn pump(&mut self, now: Instant) {
        if self.store.drain() > 0 {
            self.last_update = Some(Local::now());
        }

        loop {
            match self.notices.try_recv() {
                Ok(notice) => self.toasts.push(notice.message, NOTICE_TTL, now),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "dropped notices");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        let current = selectors::round_status(self.store.state());
        if let Some(message) = round_status_toast(self.last_round_status, current) {
            self.toasts
                .push_keyed(ROUND_STATUS_TOAST, message, ROUND_STATUS_TTL, now);
        }
        self.last_round_status = current;
    }

    fn menu_bar(&mut self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        let port = self.route.port();
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(format!("{port} ROTRANS"));
                ui.separator();

                let mut page = self.page();
                ui.selectable_value(&mut page, Page::Visualization, "Visualization");
                ui.selectable_value(&mut page, Page::Transactions, "Transactions");
                ui.selectable_value(&mut page, Page::Stake, "Stake");
                if page != self.page() {
                    events.push(UiEvent::Navigate(Self::route_for(page, port)));
                }
                ui.separator();

                let state = self.store.state();
                let selected = selectors::root_validator(state)
                    .map(|v| v.agent_name.clone())
                    .unwrap_or_else(|| "No validators".to_string());
                egui::ComboBox::from_id_salt("root_validator")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for validator in selectors::validators(state) {
                            let active = selectors::root_validator(state) == Some(validator);
                            if ui
                                .selectable_label(
                                    active,
                                    format!("{} ({})", validator.agent_name, validator.agent_ip),
                                )
                                .clicked()
                            {
                                events.push(UiEvent::Dispatch(Action::SetRootValidator(Some(
                                    validator.clone(),
                                ))));
                            }
                        }
                    });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let go = ui.button("Go").clicked();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.route_input)
                            .desired_width(260.0)
                            .hint_text("/5001/visualization"),
                    );
                    let entered =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if go || entered {
                        match Route::parse(&self.route_input) {
                            Ok(route) => events.push(UiEvent::Navigate(route)),
                            Err(err) => events.push(UiEvent::Toast(err.to_string())),
                        }
                    }
                    if let Some(at) = self.last_update {
                        ui.weak(format!("updated {}", at.format("%H:%M:%S")));
                    }
                });
            });
        });
    }

    fn apply(&mut self, ctx: &egui::Context, events: Vec<UiEvent>, now: Instant) {
        let port = self.route.port();
        for event in events {
            let Some(event) = dispatch_ui_event(&mut self.store, port, event) else {
                continue;
            };
            match event {
                UiEvent::Navigate(route) => {
                    if route != self.route {
                        self.navigate(route);
                    }
                }
                UiEvent::Copy { what, text } => {
                    let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
                    match copied {
                        Ok(()) => self.toasts.push(format!("{what} copied"), NOTICE_TTL, now),
                        Err(err) => {
                            warn!("clipboard unavailable: {err}");
                            self.toasts
                                .push(format!("Could not copy {what}"), NOTICE_TTL, now);
                        }
                    }
                }
                UiEvent::Toast(message) => self.toasts.push(message, NOTICE_TTL, now),
                UiEvent::Dispatch(_) | UiEvent::SelectNode(_) => {}
            }
        }

        if self.title_dirty {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.route.title()));
            self.title_dirty = false;
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.pump(now);

        let mut events = Vec::new();
        self.menu_bar(ctx, &mut events);

        let port = self.route.port();
        let page = self.page();
        let state = self.store.state();
        egui::CentralPanel::default().show(ctx, |ui| match page {
            Page::Visualization => self.visualization.show(ui, state, port, &mut events),
            Page::Transactions => self.transactions.show(ui, state, port, &mut events),
            Page::Stake => stake::show(ui, state, port, &mut events),
        });
        match page {
            Page::Visualization => self.visualization.show_details(ctx, state, port, &mut events),
            Page::Transactions => self.transactions.show_dialogs(ctx, port, &mut events),
            Page::Stake => {}
        }
        widgets::show_toasts(ctx, &mut self.toasts, now);

        self.apply(ctx, events, now);
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
