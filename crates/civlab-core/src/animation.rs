//! Traffic flow animation.
//!
//! The road visualization moves its vehicles on a fixed tick. The position
//! is display-only state: it never feeds back into banding or quizzes.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default tick period.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

/// Shortest accepted tick period.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Spacing between consecutive vehicles, in percent of the road length.
const VEHICLE_SPACING: f64 = 25.0;

/// Position after one tick at the given traffic volume, wrapping at 100.
pub fn step(position: f64, volume: f64) -> f64 {
    (position + volume / 50.0).rem_euclid(100.0)
}

/// Road lane a vehicle is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Upper,
    Lower,
}

/// Where a single vehicle is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehiclePlacement {
    /// Horizontal offset in percent of the road length.
    pub offset: f64,
    pub lane: Lane,
}

/// Placements for `count` vehicles, spaced out behind `position`.
pub fn vehicle_offsets(position: f64, count: usize) -> Vec<VehiclePlacement> {
    (0..count)
        .map(|i| VehiclePlacement {
            offset: (position + i as f64 * VEHICLE_SPACING).rem_euclid(100.0),
            lane: if i % 2 == 0 { Lane::Upper } else { Lane::Lower },
        })
        .collect()
}

/// A running flow animation.
///
/// The background task is aborted by [`FlowAnimation::stop`] or when the
/// value is dropped, so it cannot outlive its owner.
pub struct FlowAnimation {
    task: JoinHandle<()>,
    volume: watch::Sender<f64>,
    position: watch::Receiver<f64>,
}

impl FlowAnimation {
    /// Start ticking every `period`, raised to at least 1 ms. Must be called
    /// inside a tokio runtime.
    pub fn spawn(volume: f64, period: Duration) -> Self {
        let period = period.max(MIN_TICK);
        let (volume_tx, mut volume_rx) = watch::channel(volume);
        let (position_tx, position_rx) = watch::channel(0.0);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            let mut position = 0.0;
            loop {
                interval.tick().await;
                let volume = *volume_rx.borrow_and_update();
                position = step(position, volume);
                if position_tx.send(position).is_err() {
                    break;
                }
            }
            tracing::debug!("flow animation finished");
        });

        tracing::debug!(volume, period_ms = period.as_millis() as u64, "flow animation started");
        Self {
            task,
            volume: volume_tx,
            position: position_rx,
        }
    }

    /// Change the traffic volume; takes effect on the next tick.
    pub fn set_volume(&self, volume: f64) {
        self.volume.send_replace(volume);
    }

    /// Latest published position.
    pub fn position(&self) -> f64 {
        *self.position.borrow()
    }

    /// A receiver notified on every tick.
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.position.clone()
    }

    /// Stop the animation.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for FlowAnimation {
    fn drop(&mut self) {
        self.task.abort();
    }
}
