// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};
use rocket::{
    config::LogLevel,
    data::{Limits, ToByteUnit},
};
use tokio::task::JoinHandle;
use tokio::time;

use crate::config::Config;
use crate::rendering::{ChartRenderer, QuickChartRenderer};
use crate::visualization::server::build_rocket;
use crate::visualization::SharedTelemetryState;

/// Represents a daemon task that can be started and managed
pub struct Daemon {
    tasks: Vec<JoinHandle<Result<()>>>,
    running: Arc<AtomicBool>,
    state: SharedTelemetryState,
}

impl Default for Daemon {
    fn default() -> Self {
        Self::new()
    }
}

impl Daemon {
    /// Create a new daemon instance
    pub fn new() -> Self {
        Daemon {
            tasks: Vec::new(),
            running: Arc::new(AtomicBool::new(true)),
            state: SharedTelemetryState::new(),
        }
    }

    /// Access the shared telemetry state owned by this daemon
    pub fn state(&self) -> &SharedTelemetryState {
        &self.state
    }

    /// Launch all configured tasks based on configuration
    pub async fn launch(&mut self, config: Arc<Config>) -> Result<()> {
        // Start web server if enabled
        if config.visualization.enabled {
            self.start_web_server(&config)?;
        }

        // Start heartbeat task for monitoring
        self.start_heartbeat()?;

        Ok(())
    }

    /// Start the Rocket web server
    fn start_web_server(&mut self, config: &Config) -> Result<()> {
        info!(
            "Starting web server on {}:{}",
            config.visualization.address, config.visualization.port
        );

        let figment = rocket::Config::figment()
            .merge(("ident", config.visualization.name.clone()))
            .merge(("limits", Limits::new().limit("json", 2.mebibytes())))
            .merge(("address", config.visualization.address.clone()))
            .merge(("port", config.visualization.port))
            .merge(("log_level", LogLevel::Normal));

        let renderer: Option<Arc<dyn ChartRenderer>> = if config.chart.enabled {
            let quickchart = QuickChartRenderer::from_config(&config.chart)
                .context("Failed to initialize the chart renderer")?;
            Some(Arc::new(quickchart))
        } else {
            debug!("Chart rendering disabled in configuration");
            None
        };

        let rocket = build_rocket(figment, self.state.clone(), renderer);

        let task = tokio::spawn(async move {
            let ignited = rocket.ignite().await?;
            ignited.launch().await?;
            Ok(())
        });

        self.tasks.push(task);
        Ok(())
    }

    /// Start a heartbeat task that logs system status periodically
    fn start_heartbeat(&mut self) -> Result<()> {
        debug!("Starting heartbeat monitor");

        let running = self.running.clone();
        let state = self.state.clone();
        let task = tokio::spawn(async move {
            while running.load(Ordering::SeqCst) {
                debug!(
                    "Daemon heartbeat: running, {} readings recorded",
                    state.reading_count().await
                );
                time::sleep(Duration::from_secs(60)).await;
            }
            Ok(())
        });

        self.tasks.push(task);
        Ok(())
    }

    /// Stop all running tasks
    pub fn shutdown(&self) {
        info!("Shutting down daemon tasks");
        self.running.store(false, Ordering::SeqCst);
        // Tasks should check the running flag and terminate gracefully
    }

    /// Wait for all tasks to complete
    pub async fn join(self) -> Result<()> {
        for task in self.tasks {
            if let Err(e) = task.await {
                log::error!("Task panicked: {}", e);
            }
        }
        Ok(())
    }
}
