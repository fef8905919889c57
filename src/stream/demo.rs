//! Local demo source.
//!
//! Produces synthetic snapshots shaped like a real producer's: the eight
//! default metrics with a short sample window, one series per core and a
//! single multi-line info string. GPU metrics are sent as `null` windows, as
//! on a host without a GPU. Frames are serialized to JSON and go through the
//! same decoder as network frames.

use std::f64::consts::TAU;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use super::decode::{WirePoint, WireSnapshot, WireStat};
use super::{FrameSource, StreamEvent};
use crate::model::DEFAULT_METRICS;

/// Samples kept per metric window.
pub const DEMO_WINDOW: usize = 10;

const ENDPOINT: &str = "demo://local";

/// Deterministic snapshot generator.
#[derive(Debug, Clone)]
pub struct DemoGenerator {
    cores: usize,
    window: usize,
}

impl DemoGenerator {
    pub fn new(cores: usize) -> Self {
        Self {
            cores: cores.max(1),
            window: DEMO_WINDOW,
        }
    }

    /// Core count of the host, or 4 when it cannot be determined.
    pub fn for_host() -> Self {
        Self::new(thread::available_parallelism().map_or(4, |n| n.get()))
    }

    fn core_value(&self, core: usize, tick: u64) -> f64 {
        let phase = core as f64 * 0.9;
        let period = 24.0 + (core % 5) as f64 * 7.0;
        wave(tick, period, phase, 45.0)
    }

    fn cpu_value(&self, tick: u64) -> f64 {
        let total: f64 = (0..self.cores).map(|c| self.core_value(c, tick)).sum();
        total / self.cores as f64
    }

    fn metric_value(&self, id: &str, tick: u64) -> Option<f64> {
        match id {
            "cpu" => Some(self.cpu_value(tick)),
            "mem" => Some(wave(tick, 200.0, 1.0, 12.0)),
            "disk" => Some(spike(tick, 17, 6.0)),
            "net" => Some(spike(tick, 11, 3.0)),
            _ => None,
        }
    }

    /// Window of values ending at `tick`, oldest first.
    fn window_ticks(&self, tick: u64) -> impl Iterator<Item = u64> {
        let len = (tick + 1).min(self.window as u64);
        (tick + 1 - len)..=tick
    }

    pub(crate) fn frame(&self, tick: u64) -> WireSnapshot {
        let stats = DEFAULT_METRICS
            .iter()
            .map(|(id, title)| WireStat {
                id: id.to_string(),
                title: title.to_string(),
                data: self
                    .window_ticks(tick)
                    .map(|t| self.metric_value(id, t))
                    .collect(),
            })
            .collect();

        let cores = (0..self.cores)
            .map(|core| {
                self.window_ticks(tick)
                    .map(|t| WirePoint {
                        value: Some(self.core_value(core, t)),
                    })
                    .collect()
            })
            .collect();

        WireSnapshot {
            stats,
            cores,
            info: vec![self.info()],
        }
    }

    fn info(&self) -> String {
        format!(
            "OS: {} {}\nCPU: demo ({}C/{}T)\nMemory: 16.0 GB\nGPU(s): No GPU detected",
            std::env::consts::OS,
            std::env::consts::ARCH,
            self.cores,
            self.cores
        )
    }

    /// JSON text of the frame at `tick`.
    pub fn frame_text(&self, tick: u64) -> Option<String> {
        match serde_json::to_string(&self.frame(tick)) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "demo frame serialization failed");
                None
            }
        }
    }
}

/// Smooth oscillation around 50%.
fn wave(tick: u64, period: f64, phase: f64, amplitude: f64) -> f64 {
    let x = tick as f64 / period * TAU + phase;
    (50.0 + amplitude * x.sin()).clamp(0.0, 100.0)
}

/// Low baseline with a burst every `every` ticks.
fn spike(tick: u64, every: u64, baseline: f64) -> f64 {
    match tick % every {
        0 => 92.0,
        1 => 55.0,
        2 => 21.0,
        _ => baseline + (tick % 3) as f64,
    }
}

/// Frame source backed by [`DemoGenerator`].
pub struct DemoSource {
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl DemoSource {
    /// Starts emitting one frame per `interval`.
    pub fn start<F>(generator: DemoGenerator, interval: Duration, mut send: F) -> Self
    where
        F: FnMut(StreamEvent) -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let worker = thread::spawn(move || {
            if !send(StreamEvent::Opened) {
                return;
            }
            let mut tick = 0u64;
            loop {
                if let Some(text) = generator.frame_text(tick)
                    && !send(StreamEvent::Frame(text))
                {
                    return;
                }
                tick += 1;
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            send(StreamEvent::Closed);
        });

        debug!(interval_ms = interval.as_millis() as u64, "demo source started");
        Self {
            stop: Some(stop_tx),
            worker: Some(worker),
        }
    }
}

impl FrameSource for DemoSource {
    fn endpoint(&self) -> &str {
        ENDPOINT
    }

    fn close(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            debug!("demo worker panicked");
        }
    }
}

impl Drop for DemoSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::decode_snapshot;

    #[test]
    fn test_first_frame_has_single_sample() {
        let snap = decode_snapshot(&DemoGenerator::new(2).frame_text(0).unwrap()).unwrap();
        let cpu = &snap.stats[0];
        assert_eq!(cpu.id, "cpu");
        assert_eq!(cpu.samples.len(), 1);
        assert!(cpu.populated);
    }

    #[test]
    fn test_window_is_bounded() {
        let generator = DemoGenerator::new(3);
        let snap = decode_snapshot(&generator.frame_text(500).unwrap()).unwrap();
        assert!(snap.stats[0].samples.len() == DEMO_WINDOW);
        assert_eq!(snap.cores.len(), 3);
        assert!(snap.cores.iter().all(|c| c.samples.len() == DEMO_WINDOW));
    }

    #[test]
    fn test_gpu_metrics_are_unpopulated() {
        let snap = decode_snapshot(&DemoGenerator::new(1).frame_text(42).unwrap()).unwrap();
        for id in ["gpu", "gtemp", "gpower", "gmem"] {
            let metric = snap.stats.iter().find(|m| m.id == id).unwrap();
            assert!(!metric.populated, "{} should be empty", id);
        }
    }

    #[test]
    fn test_values_stay_in_range() {
        let generator = DemoGenerator::new(8);
        for tick in 0..300 {
            let snap = decode_snapshot(&generator.frame_text(tick).unwrap()).unwrap();
            for s in snap.stats.iter().flat_map(|m| m.samples.iter()) {
                assert!((0.0..=100.0).contains(&s.value));
            }
        }
    }

    #[test]
    fn test_info_is_multiline() {
        let snap = decode_snapshot(&DemoGenerator::new(2).frame_text(0).unwrap()).unwrap();
        assert_eq!(snap.info.len(), 1);
        assert_eq!(snap.info[0].lines().count(), 4);
    }

    #[test]
    fn test_source_emits_open_then_frames_and_stops() {
        let (tx, rx) = mpsc::channel::<StreamEvent>();
        let generator = DemoGenerator::new(2);
        let mut source =
            DemoSource::start(generator, Duration::from_millis(5), move |e| tx.send(e).is_ok());

        assert_eq!(rx.recv().unwrap(), StreamEvent::Opened);
        assert!(matches!(rx.recv().unwrap(), StreamEvent::Frame(_)));
        source.close();

        let rest: Vec<StreamEvent> = rx.try_iter().collect();
        assert_eq!(rest.last(), Some(&StreamEvent::Closed));
        assert_eq!(source.endpoint(), "demo://local");
    }
}
