use super::super::state::App;
use super::Effect;
use crate::crawl::{CrawlAction, ContentChange};
use std::time::Instant;
use tracing::{debug, trace};

impl App {
    /// Mirror controller actions onto the crawl surface. Frame requests need
    /// no work here: the frame subscription follows the controller's pending
    /// handle.
    pub(super) fn apply_crawl_actions(&mut self, actions: Vec<CrawlAction>, effects: &mut Vec<Effect>) {
        if actions.is_empty() {
            return;
        }
        let surface = &mut self.crawl.surface;
        for action in actions {
            match action {
                CrawlAction::ClearTransform => surface.translate = None,
                CrawlAction::ApplyTranslate(value) => surface.translate = Some(value),
                CrawlAction::SetVisible(visible) => surface.visible = visible,
                CrawlAction::RequestFrame(handle) => {
                    trace!(handle = handle.id(), "Crawl frame requested");
                }
                CrawlAction::CancelFrame(handle) => {
                    trace!(handle = handle.id(), "Crawl frame cancelled");
                }
                CrawlAction::ScheduleRestart { token, after } => {
                    effects.push(Effect::ScheduleCrawlRestart { token, after });
                }
            }
        }
        debug_assert_eq!(surface.translate, self.crawl.controller.applied_translate());
        debug_assert_eq!(surface.visible, self.crawl.controller.visible());
        self.sync_crawl_scroll(effects);
    }

    fn sync_crawl_scroll(&mut self, effects: &mut Vec<Effect>) {
        if !self.crawl.surface.attached {
            return;
        }
        let offset = self.crawl.surface.scroll_offset();
        let unchanged = self
            .crawl
            .last_scroll
            .is_some_and(|last| (last - offset).abs() < 0.01);
        if !unchanged {
            self.crawl.last_scroll = Some(offset);
            effects.push(Effect::ScrollCrawl(offset));
        }
    }

    /// Attach the surface and controller, start measuring, and queue the
    /// soundtrack autoplay.
    pub(super) fn start_crawl(&mut self, effects: &mut Vec<Effect>) {
        self.crawl.surface.attached = true;
        self.crawl.last_scroll = None;
        self.crawl.controller.attach();
        let actions = self.crawl.controller.start(Instant::now(), &self.crawl.surface);
        self.apply_crawl_actions(actions, effects);
        self.schedule_music_autoplay(effects);
    }

    pub(super) fn teardown_crawl(&mut self, effects: &mut Vec<Effect>) {
        self.crawl.surface.attached = false;
        let actions = self.crawl.controller.teardown();
        self.apply_crawl_actions(actions, effects);
        self.crawl.last_scroll = None;
    }

    /// Forward a re-render to the controller, which ignores cosmetic changes.
    pub(super) fn notify_crawl_content(&mut self, changes: &[ContentChange], effects: &mut Vec<Effect>) {
        if changes.is_empty() || !self.template.is_crawl() {
            return;
        }
        let actions = self
            .crawl
            .controller
            .handle_content_mutation(changes, Instant::now(), &self.crawl.surface);
        self.apply_crawl_actions(actions, effects);
    }

    pub(super) fn handle_window_resized(&mut self, width: f32, height: f32, effects: &mut Vec<Effect>) {
        if (self.ui.window_width - width).abs() < f32::EPSILON
            && (self.ui.window_height - height).abs() < f32::EPSILON
        {
            return;
        }
        self.ui.window_width = width;
        self.ui.window_height = height;

        let font_size = self.crawl_font_size();
        let surface = &mut self.crawl.surface;
        surface.window_width = width;
        surface.window_height = height;
        surface.viewport_height = None;
        surface.refresh_estimate(&self.crawl.document, font_size);
        debug!(width, height, "Window resized");

        if self.template.is_crawl() {
            let actions = self
                .crawl
                .controller
                .handle_resize(Instant::now(), &self.crawl.surface);
            self.apply_crawl_actions(actions, effects);
        }
    }

    pub(super) fn handle_crawl_viewport(
        &mut self,
        viewport_height: f32,
        content_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        let viewport_changed = self
            .crawl
            .surface
            .record_viewport(viewport_height, content_height);
        if viewport_changed && self.template.is_crawl() {
            debug!(viewport_height, "Crawl viewport changed");
            let actions = self
                .crawl
                .controller
                .handle_resize(Instant::now(), &self.crawl.surface);
            self.apply_crawl_actions(actions, effects);
        }
    }

    pub(super) fn handle_crawl_frame(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let Some(handle) = self.crawl.controller.pending_frame() else {
            return;
        };
        let actions = self
            .crawl
            .controller
            .on_frame(handle, now, &self.crawl.surface);
        self.apply_crawl_actions(actions, effects);
    }

    pub(super) fn handle_crawl_restart_due(&mut self, token: u64, effects: &mut Vec<Effect>) {
        if !self.template.is_crawl() || !self.crawl.controller.is_listening() {
            return;
        }
        let actions = self
            .crawl
            .controller
            .restart_due(token, Instant::now(), &self.crawl.surface);
        self.apply_crawl_actions(actions, effects);
    }

    pub(super) fn handle_toggle_crawl_pause(&mut self, effects: &mut Vec<Effect>) {
        if !self.template.is_crawl() || self.intro.active {
            return;
        }
        let controller = &mut self.crawl.controller;
        let actions = if controller.is_running() {
            controller.pause(Instant::now())
        } else if controller.is_paused() {
            controller.resume()
        } else {
            Vec::new()
        };
        debug!(
            phase = ?self.crawl.controller.phase(),
            progress = self.crawl.controller.phase_at(Instant::now()),
            "Crawl pause toggled"
        );
        self.apply_crawl_actions(actions, effects);
    }
}

