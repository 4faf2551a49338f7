pub(crate) fn default_font_size() -> u32 {
    16
}

pub(crate) fn default_line_spacing() -> f32 {
    1.4
}

pub(crate) fn default_crawl_font_size() -> u32 {
    26
}

pub(crate) fn default_margin_horizontal() -> u16 {
    48
}

pub(crate) fn default_crawl_speed() -> f32 {
    15.0
}

pub(crate) fn default_crawl_trailing_margin() -> f32 {
    160.0
}

pub(crate) fn default_crawl_fallback_duration_ms() -> u64 {
    28_000
}

pub(crate) fn default_crawl_settle_frames() -> u8 {
    2
}

pub(crate) fn default_crawl_search_iterations() -> u32 {
    15
}

pub(crate) fn default_crawl_search_tolerance() -> f32 {
    2.0
}

pub(crate) fn default_crawl_search_max_step() -> f32 {
    2000.0
}

pub(crate) fn default_crawl_start_guard_ms() -> u64 {
    100
}

pub(crate) fn default_crawl_language_settle_ms() -> u64 {
    300
}

pub(crate) fn default_music_volume() -> f32 {
    0.5
}

pub(crate) fn default_music_autoplay() -> bool {
    true
}

pub(crate) fn default_music_autoplay_delay_ms() -> u64 {
    1500
}

pub(crate) fn default_intro_duration_ms() -> u64 {
    5000
}

pub(crate) fn default_window_width() -> f32 {
    1024.0
}

pub(crate) fn default_window_height() -> f32 {
    768.0
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_toggle_crawl() -> String {
    "space".to_string()
}

pub(crate) fn default_key_toggle_language() -> String {
    "l".to_string()
}

pub(crate) fn default_key_toggle_theme() -> String {
    "t".to_string()
}

pub(crate) fn default_key_next_template() -> String {
    "n".to_string()
}

pub(crate) fn default_key_reload() -> String {
    "r".to_string()
}

pub(crate) fn default_key_repeat_intro() -> String {
    "i".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}
