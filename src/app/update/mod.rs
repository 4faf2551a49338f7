use crate::language::Language;
use std::time::Duration;

mod appearance;
mod core;
mod crawl;
mod music;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    SavePreferences,
    LoadContent(Language),
    /// Absolute vertical offset for the crawl scrollable.
    ScrollCrawl(f32),
    ScheduleCrawlRestart {
        token: u64,
        after: Duration,
    },
    ScheduleMusicAutoplay {
        token: u64,
        after: Duration,
    },
    ScheduleIntroEnd {
        token: u64,
        after: Duration,
    },
    PlayMusic {
        restart: bool,
    },
    PauseMusic,
    StopMusic,
    QuitSafely,
}
