//! The crawl state machine.
//!
//! The controller never touches the GUI. Each entry point returns the
//! [`CrawlAction`]s the host must apply (transform, visibility, frame
//! requests, timers), and reads layout through a [`LayoutProbe`]. Measurement
//! is spread over consecutive frames: a few settle frames, one frame to read
//! the content height, then one search step per frame.

use super::document::ContentChange;
use super::frames::{FrameHandle, FrameLoop};
use super::geometry::{CrawlGeometry, CrawlSettings};
use super::search::{LayoutProbe, OffsetSearch, SearchStep};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrawlAction {
    /// Remove any translate so layout can be read at the natural position.
    ClearTransform,
    ApplyTranslate(f32),
    SetVisible(bool),
    RequestFrame(FrameHandle),
    CancelFrame(FrameHandle),
    /// Call [`CrawlController::restart_due`] with `token` after `after`.
    ScheduleRestart { token: u64, after: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasurePurpose {
    Start,
    /// Re-measure after a resize, then continue from `phase`.
    Resize { resume: bool, phase: f32 },
    /// Re-measure after structural content changes, restarting from phase 0.
    /// A paused crawl stays paused at the new start.
    Mutation { resume: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureStage {
    Settling { frames_left: u8 },
    Searching(OffsetSearch),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrawlPhase {
    Idle,
    Measuring {
        purpose: MeasurePurpose,
        stage: MeasureStage,
        content_height: f32,
    },
    Running,
    Paused,
}

#[derive(Debug)]
pub struct CrawlController {
    settings: CrawlSettings,
    phase: CrawlPhase,
    geometry: CrawlGeometry,
    /// Elapsed loop time banked while not running.
    accumulated: Duration,
    started_at: Option<Instant>,
    frames: FrameLoop,
    listening: bool,
    restart_token: u64,
    guard_until: Option<Instant>,
    translate: Option<f32>,
    visible: bool,
}

impl CrawlController {
    pub fn new(settings: CrawlSettings) -> Self {
        Self {
            geometry: CrawlGeometry::fallback(&settings),
            settings,
            phase: CrawlPhase::Idle,
            accumulated: Duration::ZERO,
            started_at: None,
            frames: FrameLoop::default(),
            listening: false,
            restart_token: 0,
            guard_until: None,
            translate: None,
            visible: false,
        }
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn geometry(&self) -> CrawlGeometry {
        self.geometry
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, CrawlPhase::Running)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, CrawlPhase::Paused)
    }

    pub fn is_measuring(&self) -> bool {
        matches!(self.phase, CrawlPhase::Measuring { .. })
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// True while a start is measuring or inside its post-start guard.
    pub fn is_initializing(&self, now: Instant) -> bool {
        matches!(
            self.phase,
            CrawlPhase::Measuring {
                purpose: MeasurePurpose::Start,
                ..
            }
        ) || self.guard_until.is_some_and(|until| now < until)
    }

    pub fn accumulated_offset_ms(&self) -> u64 {
        self.accumulated.as_millis() as u64
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frames.pending()
    }

    pub fn applied_translate(&self) -> Option<f32> {
        self.translate
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn restart_token(&self) -> u64 {
        self.restart_token
    }

    /// Loop progress in `[0, 1)` as of `now`.
    pub fn phase_at(&self, now: Instant) -> f32 {
        self.geometry.phase_at(self.elapsed(now))
    }

    /// Begin listening for resize, content and language notifications.
    pub fn attach(&mut self) {
        if !self.listening {
            debug!("Crawl attached");
        }
        self.listening = true;
    }

    /// Stop everything and ignore further notifications until re-attached.
    pub fn teardown(&mut self) -> Vec<CrawlAction> {
        let mut actions = Vec::new();
        self.stop(&mut actions);
        self.phase = CrawlPhase::Idle;
        self.accumulated = Duration::ZERO;
        self.guard_until = None;
        self.listening = false;
        self.restart_token += 1;
        self.push(CrawlAction::SetVisible(false), &mut actions);
        debug!(token = self.restart_token, "Crawl torn down");
        actions
    }

    pub fn start(&mut self, now: Instant, probe: &impl LayoutProbe) -> Vec<CrawlAction> {
        let mut actions = Vec::new();
        if !self.listening {
            debug!("Crawl start ignored: not attached");
            return actions;
        }
        if self.is_initializing(now) {
            debug!("Crawl start dropped: already initializing");
            return actions;
        }
        if !probe.is_attached() {
            debug!("Crawl start skipped: target missing");
            return actions;
        }

        self.stop(&mut actions);
        self.accumulated = Duration::ZERO;
        self.guard_until = None;
        self.begin_measure(MeasurePurpose::Start, &mut actions);
        info!(settle_frames = self.settings.settle_frames, "Crawl starting");
        actions
    }

    pub fn pause(&mut self, now: Instant) -> Vec<CrawlAction> {
        let mut actions = Vec::new();
        if !self.is_running() {
            return actions;
        }
        self.accumulated = self.geometry.wrap(self.elapsed(now));
        self.stop(&mut actions);
        self.phase = CrawlPhase::Paused;
        debug!(offset_ms = self.accumulated_offset_ms(), "Crawl paused");
        actions
    }

    pub fn resume(&mut self) -> Vec<CrawlAction> {
        let mut actions = Vec::new();
        if !self.is_paused() {
            return actions;
        }
        self.phase = CrawlPhase::Running;
        self.started_at = None;
        self.request_frame(&mut actions);
        debug!(offset_ms = self.accumulated_offset_ms(), "Crawl resumed");
        actions
    }

    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now: Instant,
        probe: &impl LayoutProbe,
    ) -> Vec<CrawlAction> {
        let mut actions = Vec::new();
        if !self.frames.accept(handle) {
            trace!(handle = handle.id(), "Ignoring stale crawl frame");
            return actions;
        }

        match self.phase {
            CrawlPhase::Measuring {
                purpose,
                stage,
                content_height,
            } => self.measure_step(purpose, stage, content_height, now, probe, &mut actions),
            CrawlPhase::Running => {
                let started = *self.started_at.get_or_insert(now);
                let elapsed = self.accumulated + now.saturating_duration_since(started);
                let offset = self.geometry.offset_at(self.geometry.phase_at(elapsed));
                self.push(CrawlAction::ApplyTranslate(offset), &mut actions);
                self.request_frame(&mut actions);
            }
            CrawlPhase::Idle | CrawlPhase::Paused => {}
        }
        actions
    }

    pub fn handle_resize(&mut self, now: Instant, probe: &impl LayoutProbe) -> Vec<CrawlAction> {
        let mut actions = Vec::new();
        if !self.listening || self.is_measuring() || self.is_initializing(now) {
            return actions;
        }
        let resume = match self.phase {
            CrawlPhase::Running => true,
            CrawlPhase::Paused => false,
            _ => return actions,
        };
        if !probe.is_attached() {
            return actions;
        }

        self.accumulated = self.geometry.wrap(self.elapsed(now));
        let phase = self.geometry.phase_at(self.accumulated);
        self.stop(&mut actions);
        self.begin_measure(MeasurePurpose::Resize { resume, phase }, &mut actions);
        debug!(phase, resume, "Crawl re-measuring after resize");
        actions
    }

    pub fn handle_content_mutation(
        &mut self,
        changes: &[ContentChange],
        now: Instant,
        probe: &impl LayoutProbe,
    ) -> Vec<CrawlAction> {
        let mut actions = Vec::new();
        if !changes.iter().any(|change| change.is_structural()) {
            trace!(changes = changes.len(), "Ignoring cosmetic crawl change");
            return actions;
        }
        if !self.listening || self.is_measuring() || self.is_initializing(now) {
            debug!(changes = changes.len(), "Crawl content change dropped");
            return actions;
        }
        let resume = match self.phase {
            CrawlPhase::Running => true,
            CrawlPhase::Paused => false,
            _ => {
                debug!(changes = changes.len(), "Crawl content change dropped");
                return actions;
            }
        };
        if !probe.is_attached() {
            return actions;
        }

        self.stop(&mut actions);
        self.accumulated = Duration::ZERO;
        self.begin_measure(MeasurePurpose::Mutation { resume }, &mut actions);
        info!(changes = changes.len(), resume, "Crawl content changed; restarting");
        actions
    }

    /// Stop and hide, then ask the host for a restart once the new language
    /// has been rendered.
    pub fn handle_language_change(&mut self, language: impl std::fmt::Display) -> Vec<CrawlAction> {
        let mut actions = Vec::new();
        if !self.listening {
            return actions;
        }
        self.stop(&mut actions);
        self.phase = CrawlPhase::Idle;
        self.accumulated = Duration::ZERO;
        self.guard_until = None;
        self.push(CrawlAction::SetVisible(false), &mut actions);
        self.push(CrawlAction::ClearTransform, &mut actions);
        self.restart_token += 1;
        actions.push(CrawlAction::ScheduleRestart {
            token: self.restart_token,
            after: self.settings.language_settle,
        });
        info!(%language, token = self.restart_token, "Crawl restart scheduled for language change");
        actions
    }

    pub fn restart_due(
        &mut self,
        token: u64,
        now: Instant,
        probe: &impl LayoutProbe,
    ) -> Vec<CrawlAction> {
        if token != self.restart_token {
            debug!(token, current = self.restart_token, "Stale crawl restart ignored");
            return Vec::new();
        }
        self.start(now, probe)
    }

    fn elapsed(&self, now: Instant) -> Duration {
        match (self.phase, self.started_at) {
            (CrawlPhase::Running, Some(started)) => {
                self.accumulated + now.saturating_duration_since(started)
            }
            _ => self.accumulated,
        }
    }

    /// Cancel the pending frame and drop the start timestamp. Leaves the
    /// phase for the caller to set.
    fn stop(&mut self, actions: &mut Vec<CrawlAction>) {
        if let Some(handle) = self.frames.cancel() {
            actions.push(CrawlAction::CancelFrame(handle));
        }
        self.started_at = None;
    }

    fn begin_measure(&mut self, purpose: MeasurePurpose, actions: &mut Vec<CrawlAction>) {
        self.push(CrawlAction::SetVisible(false), actions);
        self.push(CrawlAction::ClearTransform, actions);
        self.phase = CrawlPhase::Measuring {
            purpose,
            stage: MeasureStage::Settling {
                frames_left: self.settings.settle_frames.max(1),
            },
            content_height: 0.0,
        };
        self.request_frame(actions);
    }

    fn measure_step(
        &mut self,
        purpose: MeasurePurpose,
        stage: MeasureStage,
        content_height: f32,
        now: Instant,
        probe: &impl LayoutProbe,
        actions: &mut Vec<CrawlAction>,
    ) {
        if !probe.is_attached() {
            self.abandon_measurement(actions);
            return;
        }

        match stage {
            MeasureStage::Settling { frames_left } if frames_left > 1 => {
                self.phase = CrawlPhase::Measuring {
                    purpose,
                    stage: MeasureStage::Settling {
                        frames_left: frames_left - 1,
                    },
                    content_height,
                };
                self.request_frame(actions);
            }
            MeasureStage::Settling { .. } => {
                let height = probe
                    .content_height()
                    .filter(|height| height.is_finite())
                    .unwrap_or(0.0)
                    .max(0.0);
                self.push(CrawlAction::ApplyTranslate(0.0), actions);
                self.phase = CrawlPhase::Measuring {
                    purpose,
                    stage: MeasureStage::Searching(OffsetSearch::new(self.settings.search)),
                    content_height: height,
                };
                self.request_frame(actions);
            }
            MeasureStage::Searching(mut search) => {
                let step = search.step(probe.first_line_top(), probe.desired_top());
                match step {
                    SearchStep::Continue(translate) => {
                        self.push(CrawlAction::ApplyTranslate(translate), actions);
                        self.phase = CrawlPhase::Measuring {
                            purpose,
                            stage: MeasureStage::Searching(search),
                            content_height,
                        };
                        self.request_frame(actions);
                    }
                    _ => {
                        if matches!(step, SearchStep::Exhausted(_)) {
                            debug!(
                                iterations = search.iterations(),
                                translate = step.translate(),
                                "Crawl offset search hit its iteration cap"
                            );
                        }
                        self.finish_measurement(
                            purpose,
                            content_height,
                            step.translate(),
                            now,
                            actions,
                        );
                    }
                }
            }
        }
    }

    fn abandon_measurement(&mut self, actions: &mut Vec<CrawlAction>) {
        warn!("Crawl target disappeared while measuring; using fallback duration");
        self.geometry = CrawlGeometry::fallback(&self.settings);
        self.stop(actions);
        self.phase = CrawlPhase::Idle;
        self.accumulated = Duration::ZERO;
        self.guard_until = None;
    }

    fn finish_measurement(
        &mut self,
        purpose: MeasurePurpose,
        content_height: f32,
        translate: f32,
        now: Instant,
        actions: &mut Vec<CrawlAction>,
    ) {
        self.geometry = if content_height > 0.0 {
            CrawlGeometry::from_measurement(content_height, translate, &self.settings)
        } else {
            warn!(
                translate,
                fallback_ms = self.settings.fallback_duration.as_millis() as u64,
                "Crawl content measured zero height; using fixed duration"
            );
            CrawlGeometry::degenerate(translate, &self.settings)
        };
        info!(
            ?purpose,
            height = self.geometry.content_height,
            start = self.geometry.start_offset,
            end = self.geometry.end_offset,
            duration_ms = self.geometry.duration.as_millis() as u64,
            "Crawl measured"
        );

        self.started_at = None;
        let resume = match purpose {
            MeasurePurpose::Start => {
                self.accumulated = Duration::ZERO;
                self.guard_until = Some(now + self.settings.start_guard);
                self.push(
                    CrawlAction::ApplyTranslate(self.geometry.start_offset),
                    actions,
                );
                true
            }
            MeasurePurpose::Mutation { resume } => {
                self.accumulated = Duration::ZERO;
                self.push(
                    CrawlAction::ApplyTranslate(self.geometry.start_offset),
                    actions,
                );
                resume
            }
            MeasurePurpose::Resize { resume, phase } => {
                self.accumulated = self.geometry.elapsed_for_phase(phase);
                self.push(
                    CrawlAction::ApplyTranslate(self.geometry.offset_at(phase)),
                    actions,
                );
                resume
            }
        };
        self.push(CrawlAction::SetVisible(true), actions);

        if resume {
            self.phase = CrawlPhase::Running;
            self.request_frame(actions);
        } else {
            self.phase = CrawlPhase::Paused;
        }
    }

    fn request_frame(&mut self, actions: &mut Vec<CrawlAction>) {
        let request = self.frames.request();
        if let Some(cancelled) = request.cancelled {
            actions.push(CrawlAction::CancelFrame(cancelled));
        }
        actions.push(CrawlAction::RequestFrame(request.handle));
    }

    /// Record the transform/visibility mirror, then hand the action on.
    fn push(&mut self, action: CrawlAction, actions: &mut Vec<CrawlAction>) {
        match action {
            CrawlAction::ClearTransform => self.translate = None,
            CrawlAction::ApplyTranslate(value) => self.translate = Some(value),
            CrawlAction::SetVisible(visible) => self.visible = visible,
            _ => {}
        }
        actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::document::{AttributeKind, ContentChange};

    const FRAME: Duration = Duration::from_millis(16);

    /// Layout model: the first line sits at `translate * gain + bias`.
    struct FakeSurface {
        attached: bool,
        viewport: Option<f32>,
        window: f32,
        content: f32,
        gain: f32,
        bias: f32,
        translate: Option<f32>,
        visible: bool,
        frame_requests: usize,
    }

    impl FakeSurface {
        fn new(viewport: f32, content: f32) -> Self {
            Self {
                attached: true,
                viewport: Some(viewport),
                window: viewport,
                content,
                gain: 1.0,
                bias: 0.0,
                translate: None,
                visible: true,
                frame_requests: 0,
            }
        }

        fn apply(&mut self, actions: &[CrawlAction]) {
            for action in actions {
                match *action {
                    CrawlAction::ClearTransform => self.translate = None,
                    CrawlAction::ApplyTranslate(value) => self.translate = Some(value),
                    CrawlAction::SetVisible(visible) => self.visible = visible,
                    CrawlAction::RequestFrame(_) => self.frame_requests += 1,
                    CrawlAction::CancelFrame(_) | CrawlAction::ScheduleRestart { .. } => {}
                }
            }
        }
    }

    impl LayoutProbe for FakeSurface {
        fn is_attached(&self) -> bool {
            self.attached
        }

        fn content_height(&self) -> Option<f32> {
            self.attached.then_some(self.content)
        }

        fn viewport_height(&self) -> Option<f32> {
            self.viewport
        }

        fn window_height(&self) -> f32 {
            self.window
        }

        fn first_line_top(&self) -> Option<f32> {
            if !self.attached || self.content <= 0.0 {
                return None;
            }
            Some(self.translate.unwrap_or(0.0) * self.gain + self.bias)
        }
    }

    struct Rig {
        crawl: CrawlController,
        surface: FakeSurface,
        now: Instant,
    }

    impl Rig {
        fn new(viewport: f32, content: f32) -> Self {
            let mut crawl = CrawlController::new(CrawlSettings::default());
            crawl.attach();
            Self {
                crawl,
                surface: FakeSurface::new(viewport, content),
                now: Instant::now(),
            }
        }

        fn start(&mut self) -> Vec<CrawlAction> {
            let actions = self.crawl.start(self.now, &self.surface);
            self.surface.apply(&actions);
            actions
        }

        fn frame(&mut self, advance: Duration) -> Vec<CrawlAction> {
            self.now += advance;
            let Some(handle) = self.crawl.pending_frame() else {
                return Vec::new();
            };
            let actions = self.crawl.on_frame(handle, self.now, &self.surface);
            self.surface.apply(&actions);
            actions
        }

        /// Deliver frames until measurement finishes; returns frames used.
        fn settle(&mut self) -> usize {
            let mut frames = 0;
            while self.crawl.is_measuring() {
                self.frame(FRAME);
                frames += 1;
                assert!(frames < 64, "measurement did not finish");
            }
            frames
        }

        fn started(viewport: f32, content: f32) -> Self {
            let mut rig = Self::new(viewport, content);
            rig.start();
            rig.settle();
            rig
        }
    }

    #[test]
    fn start_measures_then_runs_from_the_bottom_edge() {
        let mut rig = Rig::new(720.0, 2000.0);
        let actions = rig.start();
        assert!(actions.contains(&CrawlAction::SetVisible(false)));
        assert!(actions.contains(&CrawlAction::ClearTransform));
        assert!(rig.crawl.is_measuring());
        assert!(!rig.surface.visible);

        rig.settle();
        assert!(rig.crawl.is_running());
        assert!(rig.surface.visible);
        let geometry = rig.crawl.geometry();
        assert_eq!(geometry.start_offset, 720.0);
        assert_eq!(geometry.duration, Duration::from_millis(144_000));
        assert_eq!(rig.surface.translate, Some(720.0));
        assert!(rig.crawl.pending_frame().is_some());
    }

    #[test]
    fn search_compensates_for_reactive_layout() {
        let mut rig = Rig::new(800.0, 1500.0);
        rig.surface.gain = 0.8;
        rig.surface.bias = 30.0;
        rig.start();
        rig.settle();

        let top = rig.surface.first_line_top().unwrap();
        assert!((top - 800.0).abs() <= 2.0, "first line settled at {top}");
    }

    #[test]
    fn measurement_waits_settle_frames_and_stays_bounded() {
        let mut rig = Rig::new(600.0, 900.0);
        // Layout that never follows the transform.
        rig.surface.gain = 0.0;
        rig.start();
        let frames = rig.settle();
        let settings = CrawlSettings::default();
        assert!(frames <= settings.settle_frames as usize + settings.search.max_iterations as usize);
        assert!(rig.crawl.is_running());
    }

    #[test]
    fn overlapping_starts_leave_one_loop() {
        let mut rig = Rig::new(720.0, 2000.0);
        rig.start();
        assert!(rig.start().is_empty());
        rig.settle();
        // Still inside the post-start guard.
        assert!(rig.start().is_empty());

        let before = rig.surface.frame_requests;
        rig.frame(FRAME);
        assert_eq!(rig.surface.frame_requests, before + 1);
        assert!(rig.crawl.is_running());
    }

    #[test]
    fn start_after_guard_restarts_cleanly() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        rig.frame(Duration::from_secs(10));
        let actions = rig.start();
        assert!(actions.iter().any(|a| matches!(a, CrawlAction::CancelFrame(_))));
        assert_eq!(rig.crawl.accumulated_offset_ms(), 0);
        rig.settle();
        rig.frame(FRAME);
        assert!(rig.crawl.phase_at(rig.now) < 1e-3);
    }

    #[test]
    fn missing_target_at_start_changes_nothing() {
        let mut rig = Rig::new(720.0, 2000.0);
        rig.surface.attached = false;
        assert!(rig.start().is_empty());
        assert_eq!(rig.crawl.phase(), CrawlPhase::Idle);
        assert_eq!(rig.crawl.pending_frame(), None);
        assert_eq!(rig.surface.frame_requests, 0);
    }

    #[test]
    fn target_lost_mid_measurement_ends_idle_with_fallback() {
        let mut rig = Rig::new(720.0, 2000.0);
        rig.start();
        rig.frame(FRAME);
        rig.surface.attached = false;
        rig.frame(FRAME);

        assert_eq!(rig.crawl.phase(), CrawlPhase::Idle);
        assert_eq!(rig.crawl.pending_frame(), None);
        assert_eq!(rig.crawl.geometry().duration, Duration::from_millis(28_000));
    }

    #[test]
    fn zero_height_content_uses_fixed_duration() {
        let mut rig = Rig::new(720.0, 0.0);
        rig.start();
        rig.settle();
        assert!(rig.crawl.is_running());
        assert_eq!(rig.crawl.geometry().duration, Duration::from_millis(28_000));
    }

    #[test]
    fn running_frames_follow_elapsed_time() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        assert_eq!(rig.surface.translate, Some(720.0));

        rig.frame(Duration::from_millis(72_000));
        let translate = rig.surface.translate.unwrap();
        assert!((translate - (720.0 - 1080.0)).abs() < 0.5, "got {translate}");

        // Wrap around: a full loop later the offset is the same.
        rig.frame(Duration::from_millis(144_000));
        let wrapped = rig.surface.translate.unwrap();
        assert!((wrapped - translate).abs() < 0.5);
    }

    #[test]
    fn resize_preserves_phase_across_new_geometry() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        rig.frame(Duration::from_millis(43_200));
        let before = rig.crawl.phase_at(rig.now);
        assert!((before - 0.3).abs() < 1e-3);

        rig.surface.viewport = Some(900.0);
        rig.surface.window = 900.0;
        rig.surface.content = 2600.0;
        let actions = rig.crawl.handle_resize(rig.now, &rig.surface);
        rig.surface.apply(&actions);
        assert!(rig.crawl.is_measuring());
        assert!(!rig.surface.visible);
        rig.settle();
        rig.frame(FRAME);

        let after = rig.crawl.phase_at(rig.now);
        let one_frame = FRAME.as_secs_f32() / rig.crawl.geometry().duration.as_secs_f32();
        assert!((after - before).abs() <= one_frame, "{before} -> {after}");
        assert!(rig.crawl.is_running());
        assert!(rig.surface.visible);
        assert_eq!(rig.crawl.geometry().start_offset, 900.0);
    }

    #[test]
    fn resize_while_paused_stays_paused() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        rig.frame(Duration::from_millis(14_400));
        rig.crawl.pause(rig.now);
        let banked = rig.crawl.accumulated_offset_ms();
        assert_eq!(rig.crawl.pending_frame(), None);

        rig.surface.viewport = Some(500.0);
        let actions = rig.crawl.handle_resize(rig.now, &rig.surface);
        rig.surface.apply(&actions);
        rig.settle();

        assert!(rig.crawl.is_paused());
        assert_eq!(rig.crawl.pending_frame(), None);
        assert!(rig.surface.visible);
        let phase = rig.crawl.phase_at(rig.now);
        assert!((phase - 0.1).abs() < 1e-3);
        assert!(rig.crawl.accumulated_offset_ms().abs_diff(banked) <= 1);
    }

    #[test]
    fn structural_change_restarts_from_phase_zero() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        rig.frame(Duration::from_secs(30));

        rig.surface.content = 2400.0;
        let actions = rig.crawl.handle_content_mutation(
            &[ContentChange::ChildList],
            rig.now,
            &rig.surface,
        );
        rig.surface.apply(&actions);
        assert_eq!(rig.crawl.accumulated_offset_ms(), 0);
        rig.settle();
        rig.frame(FRAME);

        assert_eq!(rig.surface.translate, Some(rig.crawl.geometry().start_offset));
        assert_eq!(rig.crawl.geometry().duration, Duration::from_millis(170_667));
    }

    #[test]
    fn structural_change_while_paused_remeasures_and_stays_paused() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        rig.frame(Duration::from_secs(10));
        rig.crawl.pause(rig.now);

        rig.surface.content = 4000.0;
        let actions = rig.crawl.handle_content_mutation(
            &[ContentChange::ChildList],
            rig.now,
            &rig.surface,
        );
        rig.surface.apply(&actions);
        assert!(rig.crawl.is_measuring());
        assert!(!rig.surface.visible);
        rig.settle();

        assert!(rig.crawl.is_paused());
        assert_eq!(rig.crawl.pending_frame(), None);
        assert!(rig.surface.visible);
        assert_eq!(rig.crawl.accumulated_offset_ms(), 0);
        let geometry = rig.crawl.geometry();
        assert_eq!(geometry.content_height, 4000.0);
        assert_eq!(rig.surface.translate, Some(geometry.start_offset));

        let actions = rig.crawl.resume();
        rig.surface.apply(&actions);
        rig.frame(FRAME);
        assert_eq!(rig.crawl.geometry().content_height, 4000.0);
        assert!(rig.crawl.phase_at(rig.now) < 1e-3);
    }

    #[test]
    fn requests_during_a_resize_measurement_are_dropped() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        rig.frame(Duration::from_secs(3));
        let actions = rig.crawl.handle_resize(rig.now, &rig.surface);
        rig.surface.apply(&actions);
        let measuring = rig.crawl.phase();
        assert!(matches!(
            measuring,
            CrawlPhase::Measuring {
                purpose: MeasurePurpose::Resize { .. },
                ..
            }
        ));

        assert!(rig.crawl.handle_resize(rig.now, &rig.surface).is_empty());
        assert_eq!(rig.crawl.phase(), measuring);

        let actions = rig.crawl.handle_content_mutation(
            &[ContentChange::ChildList],
            rig.now,
            &rig.surface,
        );
        assert!(actions.is_empty());
        assert_eq!(rig.crawl.phase(), measuring);

        rig.settle();
        assert!(rig.crawl.is_running());
    }

    #[test]
    fn cosmetic_changes_are_ignored() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        rig.frame(Duration::from_secs(5));
        let changes = [
            ContentChange::Attribute(AttributeKind::Style),
            ContentChange::Attribute(AttributeKind::Class),
        ];
        assert!(
            rig.crawl
                .handle_content_mutation(&changes, rig.now, &rig.surface)
                .is_empty()
        );
        assert!(rig.crawl.is_running());
    }

    #[test]
    fn changes_inside_the_start_guard_are_dropped() {
        let mut rig = Rig::started(720.0, 2000.0);
        let actions = rig.crawl.handle_content_mutation(
            &[ContentChange::CharacterData],
            rig.now,
            &rig.surface,
        );
        assert!(actions.is_empty());
        assert!(rig.crawl.is_running());
    }

    #[test]
    fn pause_cancels_the_frame_and_resume_continues() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        rig.frame(Duration::from_secs(20));
        let actions = rig.crawl.pause(rig.now);
        assert!(actions.iter().any(|a| matches!(a, CrawlAction::CancelFrame(_))));
        assert_eq!(rig.crawl.pending_frame(), None);
        assert_eq!(rig.crawl.accumulated_offset_ms(), 20_000);

        rig.now += Duration::from_secs(60);
        let actions = rig.crawl.resume();
        rig.surface.apply(&actions);
        rig.frame(FRAME);
        let phase = rig.crawl.phase_at(rig.now);
        assert!((phase - 20.0 / 144.0).abs() < 1e-3);
    }

    #[test]
    fn no_frame_is_scheduled_after_teardown() {
        let mut rig = Rig::started(720.0, 2000.0);
        let stale = rig.crawl.pending_frame().unwrap();
        let actions = rig.crawl.teardown();
        assert!(actions.contains(&CrawlAction::CancelFrame(stale)));
        assert_eq!(rig.crawl.pending_frame(), None);
        assert!(rig.crawl.on_frame(stale, rig.now, &rig.surface).is_empty());
        assert!(rig.start().is_empty());
    }

    #[test]
    fn language_change_schedules_tokened_restart() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        let actions = rig.crawl.handle_language_change("pt");
        rig.surface.apply(&actions);
        assert!(!rig.surface.visible);
        assert_eq!(rig.crawl.pending_frame(), None);
        let token = actions
            .iter()
            .find_map(|a| match a {
                CrawlAction::ScheduleRestart { token, after } => {
                    assert_eq!(*after, Duration::from_millis(300));
                    Some(*token)
                }
                _ => None,
            })
            .unwrap();

        // A second switch before the first restart fires supersedes it.
        let actions = rig.crawl.handle_language_change("en");
        rig.surface.apply(&actions);
        rig.now += Duration::from_millis(300);
        assert!(rig.crawl.restart_due(token, rig.now, &rig.surface).is_empty());

        let current = rig.crawl.restart_token();
        let actions = rig.crawl.restart_due(current, rig.now, &rig.surface);
        rig.surface.apply(&actions);
        assert!(rig.crawl.is_measuring());
        rig.settle();
        assert!(rig.crawl.is_running());
    }

    #[test]
    fn start_supersedes_a_resize_measurement() {
        let mut rig = Rig::started(720.0, 2000.0);
        rig.frame(FRAME);
        rig.frame(Duration::from_secs(3));
        let actions = rig.crawl.handle_resize(rig.now, &rig.surface);
        rig.surface.apply(&actions);
        assert!(rig.crawl.is_measuring());

        rig.start();
        assert!(matches!(
            rig.crawl.phase(),
            CrawlPhase::Measuring {
                purpose: MeasurePurpose::Start,
                ..
            }
        ));
        rig.settle();
        rig.frame(FRAME);
        assert!(rig.crawl.phase_at(rig.now) < 1e-3);
    }
}
