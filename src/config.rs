use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub realtime: RealtimeConfig,
    pub nats: NatsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NatsConfig {
    pub url: String,
    /// When false the service runs without a notifier; updates are
    /// dropped with a log line instead of published.
    pub enabled: bool,
}

/// Tunables for the streaming detectors and session lifecycle.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Mean landmark movement below which a frame counts as stable.
    pub movement_threshold: f32,

    /// Consecutive stable frames required before letter classification.
    pub stable_frame_threshold: u32,

    /// Mean landmark movement above which a frame counts as moving.
    /// Higher than `movement_threshold`: word gestures involve larger
    /// displacement than pose jitter.
    pub motion_threshold: f32,

    /// Minimum buffered frames for a motion segment to count as a
    /// gesture; shorter blips are discarded as noise.
    pub min_sequence_frames: usize,

    /// Classifier confidence required before text is mutated.
    pub confidence_threshold: f32,

    /// Stability window capacity.
    pub static_window_frames: usize,

    /// Motion window capacity, roughly one second at 30 fps.
    pub dynamic_window_frames: usize,

    /// Idle time after which a session is swept.
    pub session_timeout_secs: u64,

    /// Cadence of the background sweep task.
    pub sweep_interval_secs: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            movement_threshold: 0.015,
            stable_frame_threshold: 5,
            motion_threshold: 0.03,
            min_sequence_frames: 15,
            confidence_threshold: 0.7,
            static_window_frames: 10,
            dynamic_window_frames: 30,
            session_timeout_secs: 3600,
            sweep_interval_secs: 1800,
        }
    }
}

impl Config {
    /// Load configuration: coded defaults, then an optional file, then
    /// `SIGNTEXT_*` environment overrides (double underscore separates
    /// nesting levels, e.g. `SIGNTEXT_REALTIME__CONFIDENCE_THRESHOLD`).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("service.name", "signtext")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 3000)?
            .set_default("nats.url", "nats://localhost:4222")?
            .set_default("nats.enabled", true)?
            .set_default("realtime.movement_threshold", 0.015)?
            .set_default("realtime.stable_frame_threshold", 5)?
            .set_default("realtime.motion_threshold", 0.03)?
            .set_default("realtime.min_sequence_frames", 15)?
            .set_default("realtime.confidence_threshold", 0.7)?
            .set_default("realtime.static_window_frames", 10)?
            .set_default("realtime.dynamic_window_frames", 30)?
            .set_default("realtime.session_timeout_secs", 3600)?
            .set_default("realtime.sweep_interval_secs", 1800)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("SIGNTEXT").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
