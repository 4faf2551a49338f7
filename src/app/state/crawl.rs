use super::constants::{CRAWL_LINE_SPACING, CRAWL_MAX_WIDTH_PX, CRAWL_SIDE_PADDING_PX, TOOLBAR_HEIGHT_PX};
use crate::crawl::{CrawlController, CrawlDocument, CrawlSettings, LayoutProbe};

/// Geometry of the crawl scrollable as the app last rendered it.
///
/// The crawl column is laid out as `[lead space][content][trailing space]`
/// with a lead equal to the viewport height, so the content starts just below
/// the bottom edge. A translate `t` puts the first line `t` pixels below the
/// viewport's top, which corresponds to the scroll offset `lead - t`.
#[derive(Debug, Clone)]
pub struct CrawlSurface {
    pub(in crate::app) attached: bool,
    pub(in crate::app) visible: bool,
    pub(in crate::app) translate: Option<f32>,
    pub(in crate::app) window_width: f32,
    pub(in crate::app) window_height: f32,
    /// Viewport height reported by the scrollable, once it has been laid out.
    pub(in crate::app) viewport_height: Option<f32>,
    /// Content height derived from the scrollable's reported bounds.
    pub(in crate::app) reported_content_height: Option<f32>,
    pub(in crate::app) estimated_content_height: f32,
    pub(in crate::app) has_content: bool,
    pub(in crate::app) trailing_px: f32,
}

impl CrawlSurface {
    pub fn new(window_width: f32, window_height: f32, trailing_px: f32) -> Self {
        Self {
            attached: false,
            visible: false,
            translate: None,
            window_width,
            window_height,
            viewport_height: None,
            reported_content_height: None,
            estimated_content_height: 0.0,
            has_content: false,
            trailing_px: trailing_px.max(0.0),
        }
    }

    /// Viewport height before the scrollable reports one.
    pub fn expected_viewport_height(&self) -> f32 {
        (self.window_height - TOOLBAR_HEIGHT_PX).max(1.0)
    }

    pub fn lead_px(&self) -> f32 {
        self.viewport_height
            .filter(|height| height.is_finite() && *height > 0.0)
            .unwrap_or_else(|| self.expected_viewport_height())
    }

    pub fn text_width(&self) -> f32 {
        (self.window_width - 2.0 * CRAWL_SIDE_PADDING_PX)
            .min(CRAWL_MAX_WIDTH_PX)
            .max(1.0)
    }

    fn effective_content_height(&self) -> f32 {
        self.reported_content_height
            .unwrap_or(self.estimated_content_height)
            .max(0.0)
    }

    /// The scrolled column is `lead + content + trailing` tall and the
    /// viewport is `lead` tall.
    pub fn max_scroll(&self) -> f32 {
        (self.effective_content_height() + self.trailing_px).max(0.0)
    }

    pub fn scroll_offset(&self) -> f32 {
        let translate = self.translate.unwrap_or(0.0);
        (self.lead_px() - translate).clamp(0.0, self.max_scroll())
    }

    pub fn text_alpha(&self) -> f32 {
        if self.visible { 1.0 } else { 0.0 }
    }

    /// Re-estimate the content height for the current window width.
    pub fn refresh_estimate(&mut self, document: &CrawlDocument, font_size: f32) {
        self.has_content = !document.is_empty();
        self.estimated_content_height =
            document.estimated_height(font_size, CRAWL_LINE_SPACING, self.text_width());
        self.reported_content_height = None;
    }

    /// Record bounds reported by the scrollable. Returns true when the
    /// viewport height changed.
    pub fn record_viewport(&mut self, viewport_height: f32, content_height: f32) -> bool {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return false;
        }
        let rendered_lead = self.lead_px();
        if content_height.is_finite() {
            let content = content_height - rendered_lead - self.trailing_px;
            if content > 0.0 {
                self.reported_content_height = Some(content);
            }
        }
        let changed = self
            .viewport_height
            .is_none_or(|previous| (previous - viewport_height).abs() > 0.5);
        self.viewport_height = Some(viewport_height);
        changed
    }
}

impl LayoutProbe for CrawlSurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn content_height(&self) -> Option<f32> {
        self.attached.then(|| self.effective_content_height())
    }

    fn viewport_height(&self) -> Option<f32> {
        self.viewport_height
    }

    fn window_height(&self) -> f32 {
        self.expected_viewport_height()
    }

    fn first_line_top(&self) -> Option<f32> {
        if !self.attached || !self.has_content {
            return None;
        }
        Some(self.lead_px() - self.scroll_offset())
    }
}

pub struct CrawlState {
    pub(in crate::app) controller: CrawlController,
    pub(in crate::app) surface: CrawlSurface,
    pub(in crate::app) document: CrawlDocument,
    pub(in crate::app) last_scroll: Option<f32>,
}

impl CrawlState {
    pub fn new(settings: CrawlSettings, window_width: f32, window_height: f32) -> Self {
        let controller = CrawlController::new(settings);
        let trailing_px = controller.settings().trailing_margin_px;
        Self {
            surface: CrawlSurface::new(window_width, window_height, trailing_px),
            controller,
            document: CrawlDocument::default(),
            last_scroll: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::CrawlAction;
    use std::time::{Duration, Instant};

    fn surface() -> CrawlSurface {
        let mut surface = CrawlSurface::new(1024.0, 768.0, 160.0);
        surface.attached = true;
        surface.has_content = true;
        surface.estimated_content_height = 2000.0;
        surface
    }

    fn apply(surface: &mut CrawlSurface, actions: &[CrawlAction]) {
        for action in actions {
            match *action {
                CrawlAction::ClearTransform => surface.translate = None,
                CrawlAction::ApplyTranslate(value) => surface.translate = Some(value),
                CrawlAction::SetVisible(visible) => surface.visible = visible,
                _ => {}
            }
        }
    }

    #[test]
    fn translate_maps_onto_clamped_scroll_offset() {
        let mut surface = surface();
        let lead = surface.lead_px();
        assert_eq!(lead, 720.0);

        surface.translate = Some(lead);
        assert_eq!(surface.scroll_offset(), 0.0);
        assert_eq!(surface.first_line_top(), Some(lead));

        surface.translate = Some(lead - 2160.0);
        assert_eq!(surface.scroll_offset(), 2160.0);
        assert_eq!(surface.scroll_offset(), surface.max_scroll());

        surface.translate = Some(5000.0);
        assert_eq!(surface.scroll_offset(), 0.0);
    }

    #[test]
    fn cleared_transform_rests_the_first_line_at_the_top() {
        let mut surface = surface();
        surface.translate = None;
        assert_eq!(surface.scroll_offset(), surface.lead_px());
        assert_eq!(surface.first_line_top(), Some(0.0));
    }

    #[test]
    fn reported_bounds_replace_the_estimate() {
        let mut surface = surface();
        assert!(surface.record_viewport(700.0, 720.0 + 1500.0 + 160.0));
        assert_eq!(surface.content_height(), Some(1500.0));
        assert_eq!(surface.lead_px(), 700.0);
        assert!(!surface.record_viewport(700.0, 700.0 + 1500.0 + 160.0));
    }

    #[test]
    fn controller_settles_on_the_rendered_surface() {
        let mut surface = surface();
        let mut crawl = CrawlController::new(CrawlSettings::default());
        crawl.attach();
        let mut now = Instant::now();
        let actions = crawl.start(now, &surface);
        apply(&mut surface, &actions);
        while let Some(handle) = crawl.pending_frame() {
            now += Duration::from_millis(16);
            let actions = crawl.on_frame(handle, now, &surface);
            apply(&mut surface, &actions);
            if crawl.is_running() {
                break;
            }
        }
        assert!(crawl.is_running());
        assert_eq!(crawl.geometry().start_offset, 720.0);
        assert_eq!(surface.scroll_offset(), 0.0);
        assert_eq!(surface.text_alpha(), 1.0);
    }
}
