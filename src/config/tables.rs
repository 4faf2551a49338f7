use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    crawl: CrawlConfig,
    #[serde(default)]
    music: MusicConfig,
    #[serde(default)]
    intro: IntroConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            line_spacing: tables.appearance.line_spacing,
            crawl_font_size: tables.appearance.crawl_font_size,
            margin_horizontal: tables.appearance.margin_horizontal,
            crawl_speed: tables.crawl.speed,
            crawl_trailing_margin: tables.crawl.trailing_margin,
            crawl_fallback_duration_ms: tables.crawl.fallback_duration_ms,
            crawl_settle_frames: tables.crawl.settle_frames,
            crawl_search_iterations: tables.crawl.search_iterations,
            crawl_search_tolerance: tables.crawl.search_tolerance,
            crawl_search_max_step: tables.crawl.search_max_step,
            crawl_start_guard_ms: tables.crawl.start_guard_ms,
            crawl_language_settle_ms: tables.crawl.language_settle_ms,
            music_path: tables.music.path,
            music_volume: tables.music.volume,
            music_autoplay: tables.music.autoplay,
            music_autoplay_delay_ms: tables.music.autoplay_delay_ms,
            intro_duration_ms: tables.intro.duration_ms,
            window_width: tables.ui.window_width,
            window_height: tables.ui.window_height,
            key_toggle_crawl: tables.ui.key_toggle_crawl,
            key_toggle_language: tables.ui.key_toggle_language,
            key_toggle_theme: tables.ui.key_toggle_theme,
            key_next_template: tables.ui.key_next_template,
            key_reload: tables.ui.key_reload,
            key_repeat_intro: tables.ui.key_repeat_intro,
            key_safe_quit: tables.ui.key_safe_quit,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                line_spacing: config.line_spacing,
                crawl_font_size: config.crawl_font_size,
                margin_horizontal: config.margin_horizontal,
            },
            crawl: CrawlConfig {
                speed: config.crawl_speed,
                trailing_margin: config.crawl_trailing_margin,
                fallback_duration_ms: config.crawl_fallback_duration_ms,
                settle_frames: config.crawl_settle_frames,
                search_iterations: config.crawl_search_iterations,
                search_tolerance: config.crawl_search_tolerance,
                search_max_step: config.crawl_search_max_step,
                start_guard_ms: config.crawl_start_guard_ms,
                language_settle_ms: config.crawl_language_settle_ms,
            },
            music: MusicConfig {
                path: config.music_path.clone(),
                volume: config.music_volume,
                autoplay: config.music_autoplay,
                autoplay_delay_ms: config.music_autoplay_delay_ms,
            },
            intro: IntroConfig {
                duration_ms: config.intro_duration_ms,
            },
            ui: UiConfig {
                window_width: config.window_width,
                window_height: config.window_height,
                key_toggle_crawl: config.key_toggle_crawl.clone(),
                key_toggle_language: config.key_toggle_language.clone(),
                key_toggle_theme: config.key_toggle_theme.clone(),
                key_next_template: config.key_next_template.clone(),
                key_reload: config.key_reload.clone(),
                key_repeat_intro: config.key_repeat_intro.clone(),
                key_safe_quit: config.key_safe_quit.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    line_spacing: f32,
    #[serde(default = "defaults::default_crawl_font_size")]
    crawl_font_size: u32,
    #[serde(default = "defaults::default_margin_horizontal")]
    margin_horizontal: u16,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            crawl_font_size: defaults::default_crawl_font_size(),
            margin_horizontal: defaults::default_margin_horizontal(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct CrawlConfig {
    #[serde(default = "defaults::default_crawl_speed")]
    speed: f32,
    #[serde(default = "defaults::default_crawl_trailing_margin")]
    trailing_margin: f32,
    #[serde(default = "defaults::default_crawl_fallback_duration_ms")]
    fallback_duration_ms: u64,
    #[serde(default = "defaults::default_crawl_settle_frames")]
    settle_frames: u8,
    #[serde(default = "defaults::default_crawl_search_iterations")]
    search_iterations: u32,
    #[serde(default = "defaults::default_crawl_search_tolerance")]
    search_tolerance: f32,
    #[serde(default = "defaults::default_crawl_search_max_step")]
    search_max_step: f32,
    #[serde(default = "defaults::default_crawl_start_guard_ms")]
    start_guard_ms: u64,
    #[serde(default = "defaults::default_crawl_language_settle_ms")]
    language_settle_ms: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            speed: defaults::default_crawl_speed(),
            trailing_margin: defaults::default_crawl_trailing_margin(),
            fallback_duration_ms: defaults::default_crawl_fallback_duration_ms(),
            settle_frames: defaults::default_crawl_settle_frames(),
            search_iterations: defaults::default_crawl_search_iterations(),
            search_tolerance: defaults::default_crawl_search_tolerance(),
            search_max_step: defaults::default_crawl_search_max_step(),
            start_guard_ms: defaults::default_crawl_start_guard_ms(),
            language_settle_ms: defaults::default_crawl_language_settle_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct MusicConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default = "defaults::default_music_volume")]
    volume: f32,
    #[serde(default = "defaults::default_music_autoplay")]
    autoplay: bool,
    #[serde(default = "defaults::default_music_autoplay_delay_ms")]
    autoplay_delay_ms: u64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        MusicConfig {
            path: None,
            volume: defaults::default_music_volume(),
            autoplay: defaults::default_music_autoplay(),
            autoplay_delay_ms: defaults::default_music_autoplay_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct IntroConfig {
    #[serde(default = "defaults::default_intro_duration_ms")]
    duration_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        IntroConfig {
            duration_ms: defaults::default_intro_duration_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct UiConfig {
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_key_toggle_crawl")]
    key_toggle_crawl: String,
    #[serde(default = "defaults::default_key_toggle_language")]
    key_toggle_language: String,
    #[serde(default = "defaults::default_key_toggle_theme")]
    key_toggle_theme: String,
    #[serde(default = "defaults::default_key_next_template")]
    key_next_template: String,
    #[serde(default = "defaults::default_key_reload")]
    key_reload: String,
    #[serde(default = "defaults::default_key_repeat_intro")]
    key_repeat_intro: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    key_safe_quit: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            key_toggle_crawl: defaults::default_key_toggle_crawl(),
            key_toggle_language: defaults::default_key_toggle_language(),
            key_toggle_theme: defaults::default_key_toggle_theme(),
            key_next_template: defaults::default_key_next_template(),
            key_reload: defaults::default_key_reload(),
            key_repeat_intro: defaults::default_key_repeat_intro(),
            key_safe_quit: defaults::default_key_safe_quit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
