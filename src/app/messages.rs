use crate::cv::CvBundle;
use crate::language::Language;
use crate::theme::Template;
use iced::keyboard::{Key, Modifiers};
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    TemplateSelected(Template),
    NextTemplate,
    LanguageSelected(Language),
    ToggleLanguage,
    ToggleTheme,
    ReloadContent,
    ContentLoaded {
        bundle: Box<CvBundle>,
    },
    ContentLoadFailed {
        language: Language,
        error: String,
    },
    DismissError,
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    CrawlFrame(Instant),
    CrawlViewport {
        viewport_height: f32,
        content_height: f32,
    },
    CrawlRestartDue(u64),
    ToggleCrawlPause,
    IntroFinished(u64),
    RepeatIntro,
    MusicPlay,
    MusicPause,
    MusicStop,
    MusicVolumeChanged(f32),
    MusicAutoplayDue(u64),
    SafeQuit,
}
