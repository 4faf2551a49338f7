use super::super::state::App;
use super::Effect;
use crate::cv::CvBundle;
use crate::language::Language;
use crate::theme::Template;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_template_selected(&mut self, template: Template, effects: &mut Vec<Effect>) {
        if template == self.template {
            return;
        }
        let previous = std::mem::replace(&mut self.template, template);
        info!(from = %previous, to = %template, "Template changed");

        self.prefs.template = template;
        effects.push(Effect::SavePreferences);

        if previous.is_crawl() {
            self.leave_crawl(effects);
        }
        if template.is_crawl() {
            if self.prefs.intro_seen {
                self.start_crawl(effects);
            } else {
                self.begin_intro(effects);
            }
        }
    }

    pub(super) fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.theme = self.prefs.theme.toggled();
        debug!(theme = %self.prefs.theme, "Theme toggled");
        effects.push(Effect::SavePreferences);

        let changes = self.rebuild_crawl_document();
        self.notify_crawl_content(&changes, effects);
    }

    pub(super) fn handle_language_selected(&mut self, language: Language, effects: &mut Vec<Effect>) {
        if language == self.language && !self.ui.loading {
            return;
        }
        info!(from = %self.language, to = %language, "Language changed");
        self.language = language;
        self.prefs.language = Some(language);
        effects.push(Effect::SavePreferences);
        effects.push(Effect::LoadContent(language));

        if self.template.is_crawl() && !self.intro.active {
            let actions = self.crawl.controller.handle_language_change(language);
            self.apply_crawl_actions(actions, effects);
        }
    }

    pub(super) fn handle_reload_content(&mut self, effects: &mut Vec<Effect>) {
        debug!(language = %self.language, "Reloading content");
        effects.push(Effect::LoadContent(self.language));
    }

    pub(super) fn handle_content_loaded(&mut self, bundle: CvBundle, effects: &mut Vec<Effect>) {
        self.ui.loading = false;
        if bundle.language != self.language {
            debug!(
                loaded = %bundle.language,
                current = %self.language,
                "Discarding content for a language no longer selected"
            );
            return;
        }
        self.ui.error = None;
        self.content = bundle;

        let changes = self.rebuild_crawl_document();
        info!(language = %self.language, changes = changes.len(), "Content loaded");
        self.notify_crawl_content(&changes, effects);
    }

    pub(super) fn handle_content_load_failed(&mut self, language: Language, error: String) {
        self.ui.loading = false;
        warn!(%language, "Failed to load content: {error}");
        self.ui.error = Some(error);
        if language == self.language {
            self.language = self.content.language;
            self.prefs.language = Some(self.content.language);
        }
    }
}
