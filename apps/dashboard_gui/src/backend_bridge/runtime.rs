use std::thread;

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::bounded;
use tokio::{runtime::Handle, sync::oneshot};

/// A multi-thread runtime running on its own thread. Effects and the
/// round-status poller spawn onto [`BackendRuntime::handle`]. Dropping the
/// bridge shuts the runtime down.
pub struct BackendRuntime {
    handle: Handle,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl BackendRuntime {
    pub fn launch() -> Result<Self> {
        let (handle_tx, handle_rx) = bounded::<Result<Handle, String>>(1);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = thread::Builder::new()
            .name("dashboard-backend".into())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_multi_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        tracing::error!("failed to build backend runtime: {err}");
                        let _ = handle_tx.send(Err(err.to_string()));
                        return;
                    }
                };
                let _ = handle_tx.send(Ok(runtime.handle().clone()));
                runtime.block_on(async move {
                    let _ = shutdown_rx.await;
                });
                tracing::debug!("backend runtime stopped");
            })
            .context("spawning backend thread")?;

        let handle = handle_rx
            .recv()
            .context("backend thread exited before reporting its runtime")?
            .map_err(|err| anyhow!("backend worker startup failure: {err}"))?;

        Ok(Self {
            handle,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Drop for BackendRuntime {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
