use crate::music::MusicPlayer;

pub struct UiState {
    pub(in crate::app) loading: bool,
    pub(in crate::app) error: Option<String>,
    pub(in crate::app) window_width: f32,
    pub(in crate::app) window_height: f32,
}

/// The "long time ago" card shown before the first crawl.
pub struct IntroState {
    pub(in crate::app) active: bool,
    pub(in crate::app) token: u64,
}

pub struct MusicState {
    pub(in crate::app) player: MusicPlayer,
    pub(in crate::app) autoplay_token: u64,
    /// Set when the intro already started the soundtrack, so the crawl's
    /// autoplay does not restart it.
    pub(in crate::app) started_by_intro: bool,
}
