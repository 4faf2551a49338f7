use super::search::SearchLimits;
use std::time::Duration;

const FALLBACK_SPEED_PX_PER_SEC: f32 = 15.0;

/// Tunables for the crawl; built from `[crawl]` in the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrawlSettings {
    pub speed_px_per_sec: f32,
    /// Extra distance scrolled after the last line leaves the top edge.
    pub trailing_margin_px: f32,
    pub fallback_duration: Duration,
    /// Rendered frames to wait before reading layout.
    pub settle_frames: u8,
    pub search: SearchLimits,
    /// Window after a completed start during which restarts and content
    /// notifications are still treated as part of the start.
    pub start_guard: Duration,
    /// Delay between a language switch and the restart, leaving time for the
    /// new content to be loaded and laid out.
    pub language_settle: Duration,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            speed_px_per_sec: 15.0,
            trailing_margin_px: 160.0,
            fallback_duration: Duration::from_millis(28_000),
            settle_frames: 2,
            search: SearchLimits::default(),
            start_guard: Duration::from_millis(100),
            language_settle: Duration::from_millis(300),
        }
    }
}

/// Result of one measurement pass. Offsets are vertical translations in
/// pixels relative to the content's natural position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrawlGeometry {
    pub content_height: f32,
    pub start_offset: f32,
    pub end_offset: f32,
    pub duration: Duration,
}

impl CrawlGeometry {
    pub fn from_measurement(
        content_height: f32,
        start_translate: f32,
        settings: &CrawlSettings,
    ) -> Self {
        let start_offset = start_translate.round();
        let end_offset = start_offset - (content_height + settings.trailing_margin_px);
        Self {
            content_height,
            start_offset,
            end_offset,
            duration: loop_duration(start_offset - end_offset, settings.speed_px_per_sec),
        }
    }

    /// Used when the target vanished mid-measurement.
    pub fn fallback(settings: &CrawlSettings) -> Self {
        Self {
            content_height: 0.0,
            start_offset: 0.0,
            end_offset: 0.0,
            duration: settings.fallback_duration.max(Duration::from_millis(1)),
        }
    }

    /// Used when layout reported no content height: keep the measured start
    /// so the margin still scrolls, but time the loop with the fixed fallback.
    pub fn degenerate(start_translate: f32, settings: &CrawlSettings) -> Self {
        let start_offset = start_translate.round();
        Self {
            content_height: 0.0,
            start_offset,
            end_offset: start_offset - settings.trailing_margin_px,
            duration: settings.fallback_duration.max(Duration::from_millis(1)),
        }
    }

    /// Reduce an elapsed time into a single loop.
    pub fn wrap(&self, elapsed: Duration) -> Duration {
        let period = self.duration.as_nanos().max(1);
        Duration::from_nanos((elapsed.as_nanos() % period) as u64)
    }

    /// Fraction of the loop completed after `elapsed`, in `[0, 1)`.
    pub fn phase_at(&self, elapsed: Duration) -> f32 {
        let period = self.duration.as_secs_f64().max(1e-3);
        (self.wrap(elapsed).as_secs_f64() / period).clamp(0.0, 1.0) as f32
    }

    pub fn offset_at(&self, phase: f32) -> f32 {
        let phase = if phase.is_finite() {
            phase.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.start_offset + (self.end_offset - self.start_offset) * phase
    }

    /// Elapsed time within the loop that corresponds to `phase`.
    pub fn elapsed_for_phase(&self, phase: f32) -> Duration {
        let phase = if phase.is_finite() {
            phase.clamp(0.0, 1.0) as f64
        } else {
            0.0
        };
        self.wrap(self.duration.mul_f64(phase))
    }
}

/// Time to scroll `distance_px` at `speed_px_per_sec`, rounded to whole
/// milliseconds and never shorter than one.
pub fn loop_duration(distance_px: f32, speed_px_per_sec: f32) -> Duration {
    let speed = if speed_px_per_sec.is_finite() && speed_px_per_sec > 0.0 {
        speed_px_per_sec
    } else {
        FALLBACK_SPEED_PX_PER_SEC
    };
    let distance = if distance_px.is_finite() {
        distance_px.abs()
    } else {
        0.0
    };
    let millis = ((distance as f64 / speed as f64) * 1000.0).round().max(1.0);
    Duration::from_millis(millis as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_follows_content_height_margin_and_speed() {
        let settings = CrawlSettings::default();
        let geometry = CrawlGeometry::from_measurement(2000.0, 720.0, &settings);
        assert_eq!(geometry.start_offset, 720.0);
        assert_eq!(geometry.end_offset, 720.0 - 2160.0);
        assert_eq!(geometry.duration, Duration::from_millis(144_000));
    }

    #[test]
    fn duration_matches_formula_across_heights() {
        let settings = CrawlSettings::default();
        for height in [1.0f32, 37.5, 480.0, 1234.0, 9000.0] {
            let geometry = CrawlGeometry::from_measurement(height, 0.0, &settings);
            let expected = (((height + 160.0) / 15.0) * 1000.0).round() as u128;
            let actual = geometry.duration.as_millis();
            assert!(
                actual.abs_diff(expected) <= 1,
                "height {height}: expected {expected}ms, got {actual}ms"
            );
        }
    }

    #[test]
    fn start_offset_is_rounded() {
        let geometry = CrawlGeometry::from_measurement(100.0, 612.6, &CrawlSettings::default());
        assert_eq!(geometry.start_offset, 613.0);
    }

    #[test]
    fn phase_wraps_and_interpolates() {
        let geometry = CrawlGeometry::from_measurement(2000.0, 0.0, &CrawlSettings::default());
        assert_eq!(geometry.phase_at(Duration::ZERO), 0.0);
        assert!((geometry.phase_at(Duration::from_millis(72_000)) - 0.5).abs() < 1e-4);
        assert!((geometry.phase_at(Duration::from_millis(144_000 + 36_000)) - 0.25).abs() < 1e-4);
        assert!((geometry.offset_at(0.5) - (-1080.0)).abs() < 1e-3);
    }

    #[test]
    fn degenerate_geometry_uses_fixed_duration() {
        let settings = CrawlSettings::default();
        let geometry = CrawlGeometry::degenerate(500.0, &settings);
        assert_eq!(geometry.duration, Duration::from_millis(28_000));
        assert_eq!(geometry.end_offset, 340.0);
    }

    #[test]
    fn invalid_speed_does_not_divide_by_zero() {
        assert_eq!(loop_duration(150.0, 0.0), Duration::from_millis(10_000));
        assert_eq!(loop_duration(0.0, 15.0), Duration::from_millis(1));
    }
}
