use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Layout constants shared by the views and the crawl surface model.
pub(crate) const TOOLBAR_HEIGHT_PX: f32 = 48.0;
pub(crate) const CRAWL_MAX_WIDTH_PX: f32 = 760.0;
pub(crate) const CRAWL_SIDE_PADDING_PX: f32 = 24.0;
pub(crate) const CRAWL_LINE_SPACING: f32 = 1.5;
pub(crate) const STANDARD_MAX_WIDTH_PX: f32 = 900.0;
pub(crate) const MIN_MUSIC_VOLUME: f32 = 0.0;
pub(crate) const MAX_MUSIC_VOLUME: f32 = 1.0;
pub(crate) static CRAWL_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("crawl-scroll"));
pub(crate) static RESUME_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("resume-scroll"));
