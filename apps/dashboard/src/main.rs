use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    load_settings, selectors,
    transfer::{TransferDialog, TransferForm},
    Action, AppState, Effects, HttpLedgerClient, RoundStatusPoller, Route, Store,
};
use serde::Serialize;
use shared::{domain::TransferMode, error::ApiError};
use tokio::{runtime::Handle, sync::broadcast};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Headless ledger node dashboard")]
struct Cli {
    /// Settings file; `dashboard.toml` is read when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    /// Node port. Falls back to the route's port, then the configured default.
    #[arg(long)]
    port: Option<u16>,
    /// Dashboard path such as `/5001/transactions/10/<recipient>`.
    #[arg(long)]
    route: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Balance, keys, stake and fee of the node's agent.
    Agent,
    GenerateKeys,
    AddKey {
        secret_key: String,
    },
    Transfer {
        /// Defaults to the value carried by `--route`.
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        recipient: Option<String>,
        #[arg(long, value_enum, default_value_t = Mode::Recipient)]
        mode: Mode,
        #[arg(long, default_value = "")]
        validator: String,
        /// Submit without asking for confirmation.
        #[arg(long)]
        yes: bool,
    },
    Dag,
    /// Details of one node of the DAG.
    Node {
        id: String,
    },
    RoundStatus {
        /// Keep polling and print every change.
        #[arg(long)]
        watch: bool,
    },
    Stake,
    Validators,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Recipient,
    Delegate,
}

impl From<Mode> for TransferMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Recipient => TransferMode::Recipient,
            Mode::Delegate => TransferMode::Delegate,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref()).context("loading settings")?;
    if let Some(base_url) = &cli.base_url {
        settings.base_url = client_core::settings::normalize_base_url(base_url);
    }
    let route = cli
        .route
        .as_deref()
        .map(Route::parse)
        .transpose()
        .context("parsing --route")?;
    let port = cli
        .port
        .or_else(|| route.as_ref().map(Route::port))
        .unwrap_or(settings.default_port);
    info!(base_url = %settings.base_url, port, "using ledger node");

    let api = HttpLedgerClient::with_timeout(&settings.base_url, settings.request_timeout())
        .context("building ledger client")?;
    let effects = Effects::new(Arc::new(api), Handle::current())
        .with_validators(settings.validators.clone());
    let mut notices = effects.subscribe_notices();
    let mut store = Store::with_effects(effects);

    match cli.command {
        Command::Agent => {
            store.dispatch(Action::GetAgent { port });
            store.run_until(|s| !s.transactions.is_loading).await;
            check(&store.state().transactions.error)?;
            print_json(&store.state().transactions)?;
        }
        Command::GenerateKeys => {
            store.dispatch(Action::GenerateKeyPair { port });
            store.run_until(|s| !s.transactions.is_loading).await;
            check(&store.state().transactions.error)?;
            print_json(&selectors::current_key_pair(store.state()))?;
        }
        Command::AddKey { secret_key } => {
            store.dispatch(Action::AddKey {
                port,
                key: secret_key.clone(),
            });
            let mut progress = AddKeyProgress::default();
            tokio::time::timeout(
                settings.request_timeout() * 2,
                store.run_until(|s| progress.settled(s)),
            )
            .await
            .context("waiting for the key to be added")?;
            check(&store.state().transactions.error)?;
            let listed = store
                .state()
                .transactions
                .keys
                .iter()
                .any(|k| k.secret_key.trim().eq_ignore_ascii_case(secret_key.trim()));
            if !listed {
                warn!("the node accepted the key but does not list it");
            }
            print_json(&store.state().transactions.keys)?;
        }
        Command::Transfer {
            value,
            recipient,
            mode,
            validator,
            yes,
        } => {
            store.dispatch(Action::GetAgent { port });
            store.run_until(|s| !s.transactions.is_loading).await;
            check(&store.state().transactions.error)?;

            let (route_value, route_recipient) = match &route {
                Some(Route::Transactions {
                    value, recipient, ..
                }) => (value.clone(), recipient.clone()),
                _ => (None, None),
            };
            let mut form = TransferForm::prefilled(
                value.or(route_value).as_deref(),
                recipient.or(route_recipient).as_deref(),
            );
            form.blur_value();
            form.blur_recipient();
            form.set_mode(mode.into());
            if form.mode == TransferMode::Delegate {
                form.validator = validator;
                form.blur_validator();
            }
            let problems: Vec<&str> = [
                form.value_state.error(),
                form.recipient_state.error(),
                form.validator_state.error(),
            ]
            .into_iter()
            .flatten()
            .collect();
            if !problems.is_empty() {
                bail!(problems.join("\n"));
            }

            let state = store.state();
            let dialog = form.submit(
                selectors::balance(state),
                selectors::transaction_fee(state),
                port,
            );
            match &dialog {
                TransferDialog::Closed => bail!("transfer form is incomplete"),
                TransferDialog::InsufficientBalance => bail!(dialog.message()),
                TransferDialog::Confirm(order) if !yes => {
                    println!("{}", dialog.message());
                    print_json(order)?;
                    println!("re-run with --yes to submit");
                    return Ok(());
                }
                TransferDialog::Confirm(_) => {}
            }
            if let Some(action) = dialog.confirm() {
                store.dispatch(action);
                store.run_until(|s| !s.transactions.is_loading).await;
                check(&store.state().transactions.error)?;
                print_json(&store.state().transactions)?;
            }
        }
        Command::Dag => {
            store.dispatch(Action::GetDag { port });
            store.run_until(|s| !s.visualization.is_loading).await;
            check(&store.state().visualization.dag_error)?;
            print_json(&store.state().visualization.dag)?;
            println!("round status: {}", selectors::round_status_label(store.state()));
        }
        Command::Node { id } => {
            store.dispatch(Action::GetDag { port });
            store.run_until(|s| !s.visualization.is_loading).await;
            check(&store.state().visualization.dag_error)?;

            store.select_node(port, Some(id.clone()));
            store
                .run_until(|s| !s.visualization.is_transaction_info_loading)
                .await;
            check(&store.state().visualization.transaction_info_error)?;
            match selectors::node_details(store.state()) {
                Some(details) => print_json(&details)?,
                None => bail!("node {id} is not in the DAG"),
            }
        }
        Command::RoundStatus { watch } => {
            store.dispatch(Action::GetCkptRoundStatus { port });
            store
                .run_until(|s| !s.visualization.is_round_status_loading)
                .await;
            check(&store.state().visualization.round_status_error)?;
            println!("{}", selectors::round_status_label(store.state()));
            if watch {
                watch_round_status(&mut store, port, settings.round_status_period()).await?;
            }
        }
        Command::Stake => {
            store.dispatch(Action::GetStakeDist { port });
            store.run_until(|s| !s.stake.is_loading).await;
            check(&store.state().stake.error)?;
            print_json(&store.state().stake.stake_dist)?;
        }
        Command::Validators => {
            store.dispatch(Action::GetValidators);
            store.run_until(|s| !s.core.is_loading).await;
            check(&store.state().core.error)?;
            print_json(&store.state().core.validators)?;
        }
    }

    print_notices(&mut notices);
    Ok(())
}

async fn watch_round_status(
    store: &mut Store,
    port: u16,
    period: std::time::Duration,
) -> Result<()> {
    let _poller = RoundStatusPoller::start(&Handle::current(), port, period, store.sender());
    let mut last = selectors::round_status(store.state());
    let mut last_error = None;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(()),
            applied = store.next() => {
                if !applied {
                    return Ok(());
                }
                let state: &AppState = store.state();
                let error = state.visualization.round_status_error.clone();
                if error != last_error {
                    if let Some(error) = &error {
                        warn!(%error, "round status poll failed");
                    }
                    last_error = error;
                }
                let status = selectors::round_status(state);
                if status != last {
                    last = status;
                    println!("{}", selectors::round_status_label(state));
                }
            }
        }
    }
}

/// Follows an `add-key` request through its follow-up agent refresh.
#[derive(Debug, Default)]
struct AddKeyProgress {
    refreshing: bool,
}

impl AddKeyProgress {
    fn settled(&mut self, state: &AppState) -> bool {
        if state.transactions.error.is_some() {
            return true;
        }
        if state.transactions.is_loading {
            self.refreshing = true;
            return false;
        }
        self.refreshing
    }
}

fn check(error: &Option<ApiError>) -> Result<()> {
    match error {
        Some(error) => bail!("{error}"),
        None => Ok(()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_notices(notices: &mut broadcast::Receiver<client_core::Notice>) {
    while let Ok(notice) = notices.try_recv() {
        println!("{}", notice.message);
    }
}
