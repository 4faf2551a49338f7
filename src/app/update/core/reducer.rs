use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use tracing::debug;

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::TemplateSelected(template) => {
                self.handle_template_selected(template, &mut effects);
            }
            Message::NextTemplate => {
                let next = self.template.next();
                self.handle_template_selected(next, &mut effects);
            }
            Message::LanguageSelected(language) => {
                self.handle_language_selected(language, &mut effects);
            }
            Message::ToggleLanguage => {
                let next = self.language.toggled();
                self.handle_language_selected(next, &mut effects);
            }
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::ReloadContent => self.handle_reload_content(&mut effects),
            Message::ContentLoaded { bundle } => self.handle_content_loaded(*bundle, &mut effects),
            Message::ContentLoadFailed { language, error } => {
                self.handle_content_load_failed(language, error);
            }
            Message::DismissError => self.ui.error = None,
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects);
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    debug!(?shortcut, "Keyboard shortcut");
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::CrawlFrame(now) => self.handle_crawl_frame(now, &mut effects),
            Message::CrawlViewport {
                viewport_height,
                content_height,
            } => self.handle_crawl_viewport(viewport_height, content_height, &mut effects),
            Message::CrawlRestartDue(token) => self.handle_crawl_restart_due(token, &mut effects),
            Message::ToggleCrawlPause => self.handle_toggle_crawl_pause(&mut effects),
            Message::IntroFinished(token) => self.handle_intro_finished(token, &mut effects),
            Message::RepeatIntro => self.handle_repeat_intro(&mut effects),
            Message::MusicPlay => effects.push(Effect::PlayMusic { restart: false }),
            Message::MusicPause => effects.push(Effect::PauseMusic),
            Message::MusicStop => self.handle_music_stop(&mut effects),
            Message::MusicVolumeChanged(volume) => self.handle_music_volume_changed(volume),
            Message::MusicAutoplayDue(token) => self.handle_music_autoplay_due(token, &mut effects),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
        }

        effects
    }
}
