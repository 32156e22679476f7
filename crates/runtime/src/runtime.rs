//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event
//! channels, and exposes a builder-based API for embedding the session.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::replication::ServerSession;
use crate::workers::SimulationWorker;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Session seed for deterministic rng; `None` draws a random one.
    pub seed: Option<u64>,
    /// Fixed auto-tick interval. `None` leaves stepping to the embedder
    /// (tests drive time explicitly through `RuntimeHandle::tick`).
    pub tick_interval: Option<Duration>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval: None,
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the authoritative simulation.
///
/// Design: the runtime owns the worker; [`RuntimeHandle`] provides a
/// cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
    ticker_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Starts a runtime over the built-in default content.
    pub fn start(config: RuntimeConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    pub async fn shutdown(self) -> Result<()> {
        if let Some(ticker) = self.ticker_handle {
            ticker.abort();
        }
        drop(self.handle);
        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    ai_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            ai_provider: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    pub fn ai_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.ai_provider = Some(Box::new(provider));
        self
    }

    /// Builds and starts the runtime. Must run inside a tokio runtime.
    pub fn build(self) -> Runtime {
        let config = self.config;
        let oracles = self.oracles.unwrap_or_else(OracleManager::default_content);
        let seed = config.seed.unwrap_or_else(rand::random);

        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let (command_tx, command_rx) = tokio::sync::mpsc::channel(config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let session = ServerSession::new(oracles, seed);
        let worker = SimulationWorker::new(session, command_rx, event_bus, self.ai_provider);
        let sim_worker_handle = tokio::spawn(worker.run());

        let ticker_handle = config.tick_interval.map(|interval| {
            let tick_handle = handle.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                let dt = interval.as_secs_f32();
                loop {
                    ticker.tick().await;
                    if tick_handle.tick(dt).await.is_err() {
                        break;
                    }
                }
            })
        });

        tracing::info!(seed, "runtime started");
        Runtime {
            handle,
            sim_worker_handle,
            ticker_handle,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
