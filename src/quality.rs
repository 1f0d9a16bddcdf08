//! Adaptive quality control.
//!
//! The host measures frame performance and feeds one [`PerformanceSample`]
//! per tick. The controller steps down one [`QualityTier`] after a sustained
//! run of low scores and back up after a (longer) sustained run of high
//! scores. Any sample in the dead band between the thresholds, or on the
//! other side, resets the run so a single outlier never changes the tier.

use bevy::log::{info, warn};

use crate::config::{ConfigError, finite};

/// Frame rate treated as a perfect score.
pub const TARGET_FPS: f64 = 60.0;

/// A bundle of fidelity knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QualitySettings {
    /// Forces and integration run on every Nth scheduler callback.
    pub tick_skip: u32,
    pub enable_collisions: bool,
    pub enable_trails: bool,
    pub trail_length: usize,
}

impl QualitySettings {
    /// Trail length to record, or `None` when trails are off.
    pub fn trail_cap(&self) -> Option<usize> {
        self.enable_trails.then_some(self.trail_length)
    }
}

/// Quality tiers, best first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    #[default]
    High,
    Medium,
    Low,
    Minimal,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [
        QualityTier::High,
        QualityTier::Medium,
        QualityTier::Low,
        QualityTier::Minimal,
    ];

    /// Level number: 0 is `High`, 3 is `Minimal`.
    pub fn level(self) -> usize {
        self as usize
    }

    /// Tier for an arbitrary level, clamped to the valid range.
    pub fn from_level_clamped(level: i64) -> Self {
        let max = (Self::ALL.len() - 1) as i64;
        Self::ALL[level.clamp(0, max) as usize]
    }

    pub fn settings(self) -> QualitySettings {
        match self {
            QualityTier::High => QualitySettings {
                tick_skip: 1,
                enable_collisions: true,
                enable_trails: true,
                trail_length: 20,
            },
            QualityTier::Medium => QualitySettings {
                tick_skip: 1,
                enable_collisions: true,
                enable_trails: true,
                trail_length: 10,
            },
            QualityTier::Low => QualitySettings {
                tick_skip: 2,
                enable_collisions: false,
                enable_trails: true,
                trail_length: 5,
            },
            QualityTier::Minimal => QualitySettings {
                tick_skip: 3,
                enable_collisions: false,
                enable_trails: false,
                trail_length: 0,
            },
        }
    }

    /// Next lower tier, if any.
    pub fn degraded(self) -> Option<Self> {
        Self::ALL.get(self.level() + 1).copied()
    }

    /// Next higher tier, if any.
    pub fn upgraded(self) -> Option<Self> {
        self.level().checked_sub(1).map(|l| Self::ALL[l])
    }
}

/// One externally measured performance sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceSample {
    /// Overall score, 0 (unusable) to 100 (perfect).
    pub score: f64,
    /// Frame time in milliseconds.
    pub frame_time_ms: f64,
    /// Measured frames per second.
    pub fps: f64,
}

impl PerformanceSample {
    pub fn new(score: f64, frame_time_ms: f64, fps: f64) -> Self {
        Self {
            score,
            frame_time_ms,
            fps,
        }
    }

    /// Sample carrying only a score (sub-signals derived from it).
    pub fn from_score(score: f64) -> Self {
        let fps = TARGET_FPS * score.clamp(0.0, 100.0) / 100.0;
        let frame_time_ms = if fps > 0.0 { 1000.0 / fps } else { f64::INFINITY };
        Self::new(score, frame_time_ms, fps)
    }

    /// Derive a score from a measured frame time against [`TARGET_FPS`].
    ///
    /// NaN or negative frame times are not measurements; they produce a NaN
    /// score that [`QualityController::observe`] discards.
    pub fn from_frame_time(frame_time_ms: f64) -> Self {
        if frame_time_ms.is_nan() || frame_time_ms < 0.0 {
            return Self::new(f64::NAN, frame_time_ms, f64::NAN);
        }
        let fps = if frame_time_ms > 0.0 { 1000.0 / frame_time_ms } else { TARGET_FPS };
        let score = (fps / TARGET_FPS * 100.0).clamp(0.0, 100.0);
        Self::new(score, frame_time_ms, fps)
    }
}

/// Thresholds and window lengths for the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct QualityConfig {
    /// Scores strictly below this count toward degrading.
    pub low_threshold: f64,
    /// Scores strictly above this count toward restoring.
    pub high_threshold: f64,
    /// Consecutive low samples required to drop one tier.
    pub low_window: u32,
    /// Consecutive high samples required to restore one tier.
    pub high_window: u32,
    pub initial_tier: QualityTier,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            low_threshold: 70.0,
            high_threshold: 85.0,
            low_window: 3,
            high_window: 5,
            initial_tier: QualityTier::High,
        }
    }
}

impl QualityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("low_threshold", self.low_threshold)?;
        finite("high_threshold", self.high_threshold)?;
        if self.low_threshold >= self.high_threshold {
            return Err(ConfigError::InvertedQualityThresholds {
                low: self.low_threshold,
                high: self.high_threshold,
            });
        }
        if self.low_window == 0 {
            return Err(ConfigError::EmptyQualityWindow { name: "low" });
        }
        if self.high_window == 0 {
            return Err(ConfigError::EmptyQualityWindow { name: "high" });
        }
        Ok(())
    }
}

/// Adaptive controller with hysteresis and a tick-skip counter.
#[derive(Clone, Debug)]
pub struct QualityController {
    config: QualityConfig,
    tier: QualityTier,
    override_tier: Option<QualityTier>,
    low_run: u32,
    high_run: u32,
    tick_counter: u64,
}

impl QualityController {
    pub fn new(config: QualityConfig) -> Self {
        let tier = config.initial_tier;
        Self {
            config,
            tier,
            override_tier: None,
            low_run: 0,
            high_run: 0,
            tick_counter: 0,
        }
    }

    /// Tier in effect (override first, adaptive tier otherwise).
    pub fn tier(&self) -> QualityTier {
        self.override_tier.unwrap_or(self.tier)
    }

    /// Tier chosen by the adaptive logic alone.
    pub fn adaptive_tier(&self) -> QualityTier {
        self.tier
    }

    pub fn settings(&self) -> QualitySettings {
        self.tier().settings()
    }

    pub fn override_tier(&self) -> Option<QualityTier> {
        self.override_tier
    }

    /// Force a tier by level (clamped), or `None` to resume adaptation.
    pub fn set_override(&mut self, level: Option<i64>) {
        let tier = level.map(QualityTier::from_level_clamped);
        if tier != self.override_tier {
            match tier {
                Some(t) => info!("Quality override set to {:?}", t),
                None => info!("Quality override cleared, adaptive tier {:?}", self.tier),
            }
        }
        self.override_tier = tier;
    }

    /// Feed one sample. Returns the new effective tier if it changed.
    ///
    /// Samples keep feeding the adaptive state while an override is active
    /// so adaptation resumes from current conditions when it is cleared.
    pub fn observe(&mut self, sample: PerformanceSample) -> Option<QualityTier> {
        if !sample.score.is_finite() {
            warn!("Ignoring non-finite performance score {}", sample.score);
            return None;
        }

        let before = self.tier();

        if sample.score < self.config.low_threshold {
            self.high_run = 0;
            self.low_run += 1;
            if self.low_run >= self.config.low_window {
                self.low_run = 0;
                if let Some(lower) = self.tier.degraded() {
                    info!(
                        "Quality degraded {:?} -> {:?} (score {:.0}, {:.1} fps)",
                        self.tier, lower, sample.score, sample.fps
                    );
                    self.tier = lower;
                }
            }
        } else if sample.score > self.config.high_threshold {
            self.low_run = 0;
            self.high_run += 1;
            if self.high_run >= self.config.high_window {
                self.high_run = 0;
                if let Some(higher) = self.tier.upgraded() {
                    info!(
                        "Quality restored {:?} -> {:?} (score {:.0}, {:.1} fps)",
                        self.tier, higher, sample.score, sample.fps
                    );
                    self.tier = higher;
                }
            }
        } else {
            self.low_run = 0;
            self.high_run = 0;
        }

        let after = self.tier();
        (after != before).then_some(after)
    }

    /// Count one scheduler callback. Returns `true` when this callback should
    /// run forces and integration under the current `tick_skip`.
    pub fn should_execute(&mut self) -> bool {
        let skip = u64::from(self.settings().tick_skip.max(1));
        let execute = self.tick_counter % skip == 0;
        self.tick_counter = self.tick_counter.wrapping_add(1);
        execute
    }

    /// Restart the tick-skip cycle so the next callback executes.
    pub fn reset_tick_counter(&mut self) {
        self.tick_counter = 0;
    }
}
