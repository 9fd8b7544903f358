use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use hortisync_api::models::{
    ActuatorState, GaugeStatus, IrrigationSchedule, MoistureStatus, OperatingMode, PressureStatus, SensorSnapshot,
    SoilMoistureSettings, TemperatureStatus, TemperatureTarget,
};
use hortisync_control::{Greenhouse, SensorSource};

use crate::command::Intent;
use crate::settings::Settings;
use crate::simulate::SimulatedSource;

pub mod command;
pub mod settings;
pub mod simulate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statuses {
    pub temperature: TemperatureStatus,
    pub gauge: GaugeStatus,
    pub pressure: PressureStatus,
    pub moisture: MoistureStatus,
}

/// Everything the view layer renders, captured after each tick or intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFrame {
    pub snapshot: SensorSnapshot,
    pub actuators: ActuatorState,
    pub mode: OperatingMode,
    pub target: TemperatureTarget,
    pub soil: SoilMoistureSettings,
    pub schedules: Vec<IrrigationSchedule>,
    pub statuses: Statuses,
}

impl DashboardFrame {
    pub fn capture(greenhouse: &Greenhouse) -> Self {
        let snapshot = greenhouse.snapshot().clone();
        let target = greenhouse.target();
        let soil = *greenhouse.soil_settings();

        let statuses = Statuses {
            temperature: TemperatureStatus::classify(snapshot.temperature, target.celsius),
            gauge: GaugeStatus::classify(snapshot.temperature),
            pressure: PressureStatus::classify(snapshot.pressure),
            moisture: MoistureStatus::classify(snapshot.soil_moisture, &soil),
        };

        Self {
            snapshot,
            actuators: *greenhouse.actuators(),
            mode: greenhouse.mode(),
            target,
            soil,
            schedules: greenhouse.schedules().list().to_vec(),
            statuses,
        }
    }
}

/// Handle to the running tick task. Dropping it stops the timer.
pub struct ControlLoop {
    intents: mpsc::Sender<Intent>,
    frames: watch::Receiver<DashboardFrame>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Greenhouse>>,
}

impl ControlLoop {
    pub fn spawn<S>(greenhouse: Greenhouse, source: S, tick_interval: Duration) -> Self
    where
        S: SensorSource + Send + 'static,
    {
        let (intent_tx, intent_rx) = mpsc::channel(32);
        let (frame_tx, frame_rx) = watch::channel(DashboardFrame::capture(&greenhouse));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(drive(greenhouse, source, tick_interval, intent_rx, frame_tx, shutdown_rx));

        Self {
            intents: intent_tx,
            frames: frame_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    pub async fn send(&self, intent: Intent) -> Result<(), mpsc::error::SendError<Intent>> {
        self.intents.send(intent).await
    }

    pub fn frames(&self) -> watch::Receiver<DashboardFrame> {
        self.frames.clone()
    }

    pub fn latest(&self) -> DashboardFrame {
        self.frames.borrow().clone()
    }

    /// Stops the timer and hands back the final state.
    pub async fn shutdown(mut self) -> Option<Greenhouse> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        let task = self.task.take()?;
        match task.await {
            Ok(greenhouse) => Some(greenhouse),
            Err(e) => {
                tracing::error!("control loop ended abnormally: {}", e);
                None
            }
        }
    }
}

impl Drop for ControlLoop {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn drive<S>(
    mut greenhouse: Greenhouse,
    mut source: S,
    tick_interval: Duration,
    mut intents: mpsc::Receiver<Intent>,
    frames: watch::Sender<DashboardFrame>,
    mut shutdown: oneshot::Receiver<()>,
) -> Greenhouse
where
    S: SensorSource,
{
    let mut interval = time::interval_at(Instant::now() + tick_interval, tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::debug!("control loop started with {} source", source.name());

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                match greenhouse.tick(&mut source) {
                    Ok(Some(decision)) => tracing::debug!(
                        "auto control: diff {:.2}, valves {:?}, moisture override {:?}, fan {:?}{}",
                        decision.temp_diff,
                        decision.valve_action,
                        decision.moisture_override,
                        decision.fan_tier,
                        if decision.wind_capped { " (wind capped)" } else { "" },
                    ),
                    Ok(None) => {}
                    Err(e) => tracing::warn!("{} source: {}", source.name(), e),
                }
            }
            Some(intent) = intents.recv() => {
                if let Err(e) = command::apply(&mut greenhouse, intent) {
                    tracing::warn!("rejected intent: {}", e);
                }
            }
        }

        frames.send_replace(DashboardFrame::capture(&greenhouse));
    }

    tracing::debug!("control loop stopped");

    greenhouse
}

pub async fn run(settings: &Arc<Settings>) {
    tracing::info!(
        "dashboard labels: websocket port {}, mqtt broker {}",
        settings.dashboard.websocket_port,
        settings.dashboard.mqtt_broker
    );

    let mut greenhouse = Greenhouse::default();
    greenhouse.set_target_temperature(settings.control.target_temperature);
    greenhouse.set_mode(settings.control.mode);

    let fields = settings.simulation.fields.clone();
    let source = match settings.simulation.seed {
        Some(seed) => SimulatedSource::seeded(fields, seed),
        None => SimulatedSource::new(fields),
    };

    let control = ControlLoop::spawn(greenhouse, source, settings.simulation.tick_interval());
    let mut frames = control.frames();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }

                let frame = frames.borrow_and_update().clone();
                match serde_json::to_string(&frame) {
                    Ok(json) => tracing::info!("frame: {}", json),
                    Err(e) => tracing::error!("Failed to serialize frame: {}", e),
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    control.shutdown().await;
}
