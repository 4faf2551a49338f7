mod constants;
mod crawl;
mod ui;

use crate::cache::Preferences;
use crate::config::AppConfig;
use crate::crawl::{ContentChange, CrawlDocument};
use crate::cv::CvBundle;
use crate::language::Language;
use crate::music::MusicPlayer;
use crate::theme::{Template, crawl_tint};
use iced::Task;
use std::path::PathBuf;

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use crawl::{CrawlState, CrawlSurface};
pub(in crate::app) use ui::{IntroState, MusicState, UiState};

/// Everything the launcher resolved before the window opens.
pub struct Launch {
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub prefs: Preferences,
    pub language: Language,
    pub template: Template,
    pub bundle: CvBundle,
}

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) data_dir: PathBuf,
    pub(super) prefs: Preferences,
    pub(super) language: Language,
    pub(super) template: Template,
    pub(super) content: CvBundle,
    pub(super) ui: UiState,
    pub(super) crawl: CrawlState,
    pub(super) intro: IntroState,
    pub(super) music: MusicState,
}

impl App {
    pub(super) fn bootstrap(launch: Launch) -> (App, Task<Message>) {
        let Launch {
            config,
            data_dir,
            mut prefs,
            language,
            template,
            bundle,
        } = launch;
        prefs.language = Some(language);

        let window_width = config.window_width;
        let window_height = config.window_height;
        let music_path = config.music_path.clone().map(PathBuf::from);
        let mut app = App {
            crawl: CrawlState::new(config.crawl_settings(), window_width, window_height),
            music: MusicState {
                player: MusicPlayer::new(music_path, config.music_volume_clamped()),
                autoplay_token: 0,
                started_by_intro: false,
            },
            ui: UiState {
                loading: false,
                error: None,
                window_width,
                window_height,
            },
            intro: IntroState {
                active: false,
                token: 0,
            },
            config,
            data_dir,
            prefs,
            language,
            template: Template::Standard,
            content: bundle,
        };
        app.rebuild_crawl_document();

        tracing::info!(
            language = %app.language,
            template = %template,
            theme = %app.prefs.theme,
            intro_seen = app.prefs.intro_seen,
            "Initialized app state"
        );

        let init_task = if template == Template::Standard {
            Task::none()
        } else {
            Task::done(Message::TemplateSelected(template))
        };
        (app, init_task)
    }

    pub(super) fn title(&self) -> String {
        self.content.window_title()
    }

    pub(super) fn crawl_font_size(&self) -> f32 {
        self.config.crawl_font_size.max(8) as f32
    }

    /// Render the crawl document for the current content and tint and report
    /// what changed. The height estimate is only refreshed for structural
    /// changes.
    pub(super) fn rebuild_crawl_document(&mut self) -> Vec<ContentChange> {
        let next = CrawlDocument::render(&self.content, crawl_tint(self.prefs.theme));
        let changes = CrawlDocument::diff(&self.crawl.document, &next);
        self.crawl.document = next;
        if changes.iter().any(|change| change.is_structural()) {
            let font_size = self.crawl_font_size();
            self.crawl
                .surface
                .refresh_estimate(&self.crawl.document, font_size);
        }
        changes
    }
}
