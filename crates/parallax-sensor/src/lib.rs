pub mod interpreter;
pub mod matrix;
pub mod synthetic;
pub mod types;

use anyhow::Result;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

pub use interpreter::{TiltError, TiltInterpreter, DEFAULT_TILT_SENSITIVITY};
pub use types::{RotationSample, ScreenRotation, TiltVector};

/// Source of rotation-vector samples (hardware listener, replay, synthetic).
///
/// Delivery lifecycle belongs to the caller; the feed only polls.
pub trait SampleSource: Send {
    /// Poll for the next sample. Returns `None` when nothing new is
    /// available yet.
    fn poll_sample(&mut self) -> Result<Option<RotationSample>>;
}

/// Commands sent to the feed task.
enum FeedCommand {
    Recenter,
    SetSensitivity(f32),
    SetScreenRotation(ScreenRotation),
}

/// Drives a [`SampleSource`] through a [`TiltInterpreter`] on a background
/// task and publishes the latest tilt vector.
///
/// Samples are polled at a fixed rate; the first one calibrates the
/// reference orientation, every later one updates the published vector.
pub struct TiltFeed {
    tilt_rx: watch::Receiver<TiltVector>,
    command_tx: mpsc::UnboundedSender<FeedCommand>,
    _task: tokio::task::JoinHandle<()>,
}

impl TiltFeed {
    /// Spawn the polling task.
    pub fn spawn(
        source: impl SampleSource + 'static,
        interpreter: TiltInterpreter,
        sample_rate_hz: u32,
        rotation: ScreenRotation,
    ) -> Self {
        let (tilt_tx, tilt_rx) = watch::channel(TiltVector::ZERO);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(feed_loop(
            source,
            interpreter,
            sample_rate_hz,
            rotation,
            tilt_tx,
            command_rx,
        ));
        Self {
            tilt_rx,
            command_tx,
            _task: task,
        }
    }

    /// Latest published tilt vector (non-blocking).
    pub fn tilt(&self) -> TiltVector {
        *self.tilt_rx.borrow()
    }

    /// Receiver for awaiting tilt updates.
    pub fn subscribe(&self) -> watch::Receiver<TiltVector> {
        self.tilt_rx.clone()
    }

    /// Recapture the reference orientation from the next sample.
    pub fn recenter(&self) {
        let _ = self.command_tx.send(FeedCommand::Recenter);
    }

    /// Update the tilt gain. Non-positive values are rejected by the
    /// interpreter and logged.
    pub fn set_sensitivity(&self, sensitivity: f32) {
        let _ = self.command_tx.send(FeedCommand::SetSensitivity(sensitivity));
    }

    /// Inform the feed of a screen rotation change.
    pub fn set_screen_rotation(&self, rotation: ScreenRotation) {
        let _ = self
            .command_tx
            .send(FeedCommand::SetScreenRotation(rotation));
    }
}

/// Background task: poll the source, run the interpreter, publish tilt.
async fn feed_loop(
    mut source: impl SampleSource,
    mut interpreter: TiltInterpreter,
    sample_rate_hz: u32,
    mut rotation: ScreenRotation,
    tilt_tx: watch::Sender<TiltVector>,
    mut command_rx: mpsc::UnboundedReceiver<FeedCommand>,
) {
    let period = Duration::from_secs_f64(1.0 / sample_rate_hz.max(1) as f64);
    let mut ticker = tokio::time::interval(period);
    let mut sample_count: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let sample = match source.poll_sample() {
                    Ok(Some(sample)) => sample,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!(?e, "Sample source error, skipping poll");
                        continue;
                    }
                };

                if let Some(tilt) = interpreter.interpret(&sample, rotation) {
                    let _ = tilt_tx.send(tilt);
                }

                sample_count += 1;
                if sample_count % 600 == 0 {
                    debug!(sample_count, "Orientation samples processed");
                }
            }
            cmd = command_rx.recv() => {
                // All command handles dropped: the feed owner is gone.
                let Some(cmd) = cmd else { break };
                match cmd {
                    FeedCommand::Recenter => {
                        interpreter.reset();
                        info!("Tilt reference recentered");
                    }
                    FeedCommand::SetSensitivity(sensitivity) => {
                        match interpreter.set_tilt_sensitivity(sensitivity) {
                            Ok(()) => info!(sensitivity, "Tilt sensitivity updated"),
                            Err(e) => warn!(?e, "Rejected sensitivity update"),
                        }
                    }
                    FeedCommand::SetScreenRotation(new_rotation) => {
                        rotation = new_rotation;
                        debug!(?rotation, "Screen rotation updated");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticSource;
    use glam::Quat;
    use std::collections::VecDeque;
    use std::f32::consts::PI;

    /// Source that replays a fixed script of poll results.
    struct ScriptedSource {
        script: VecDeque<Result<Option<RotationSample>>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Option<RotationSample>>>) -> Self {
            Self {
                script: script.into(),
            }
        }
    }

    impl SampleSource for ScriptedSource {
        fn poll_sample(&mut self) -> Result<Option<RotationSample>> {
            self.script.pop_front().unwrap_or(Ok(None))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn feed_publishes_after_calibration() {
        let source = SyntheticSource::new(120, 0.3);
        let feed = TiltFeed::spawn(
            source,
            TiltInterpreter::new(),
            60,
            ScreenRotation::Deg0,
        );

        let mut rx = feed.subscribe();
        rx.changed().await.expect("feed task dropped its sender");

        let tilt = *rx.borrow();
        for c in [tilt.yaw, tilt.pitch, tilt.roll] {
            assert!((-1.0..=1.0).contains(&c), "component {c} out of range");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn source_errors_and_gaps_are_skipped() {
        let sample_b = RotationSample::from_quat(Quat::from_rotation_z(-0.1 * PI));
        let source = ScriptedSource::new(vec![
            Err(anyhow::anyhow!("transient sensor failure")),
            Ok(None),
            Ok(Some(RotationSample::from_quat(Quat::IDENTITY))),
            Ok(Some(sample_b)),
        ]);
        let feed = TiltFeed::spawn(
            source,
            TiltInterpreter::new(),
            60,
            ScreenRotation::Deg0,
        );

        let mut rx = feed.subscribe();
        rx.changed().await.expect("feed task dropped its sender");

        // The error and the empty poll did not consume the calibration slot:
        // the identity sample calibrated and sample B produced the delta.
        let tilt = *rx.borrow();
        assert!((tilt.yaw - 0.2).abs() < 1e-5, "yaw {}", tilt.yaw);
    }
}
