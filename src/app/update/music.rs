use super::super::state::{App, MAX_MUSIC_VOLUME, MIN_MUSIC_VOLUME};
use super::Effect;
use std::time::Duration;
use tracing::{debug, info};

impl App {
    /// Show the intro card and start the soundtrack with it.
    pub(super) fn begin_intro(&mut self, effects: &mut Vec<Effect>) {
        self.intro.active = true;
        self.intro.token += 1;
        let after = Duration::from_millis(self.config.intro_duration_ms);
        info!(token = self.intro.token, ?after, "Playing intro");
        effects.push(Effect::ScheduleIntroEnd {
            token: self.intro.token,
            after,
        });
        if self.music.player.has_track() {
            self.music.started_by_intro = true;
            effects.push(Effect::PlayMusic { restart: true });
        }
    }

    /// Everything that has to stop when the crawl template is left.
    pub(super) fn leave_crawl(&mut self, effects: &mut Vec<Effect>) {
        self.teardown_crawl(effects);
        self.intro.active = false;
        self.intro.token += 1;
        self.music.autoplay_token += 1;
        self.music.started_by_intro = false;
        effects.push(Effect::PauseMusic);
    }

    pub(super) fn schedule_music_autoplay(&mut self, effects: &mut Vec<Effect>) {
        if !self.config.music_autoplay || !self.music.player.has_track() {
            return;
        }
        if self.music.started_by_intro {
            debug!("Soundtrack already started by the intro");
            return;
        }
        self.music.autoplay_token += 1;
        effects.push(Effect::ScheduleMusicAutoplay {
            token: self.music.autoplay_token,
            after: Duration::from_millis(self.config.music_autoplay_delay_ms),
        });
    }

    pub(super) fn handle_intro_finished(&mut self, token: u64, effects: &mut Vec<Effect>) {
        if !self.intro.active || token != self.intro.token {
            debug!(token, current = self.intro.token, "Stale intro timer ignored");
            return;
        }
        self.intro.active = false;
        self.prefs.intro_seen = true;
        effects.push(Effect::SavePreferences);
        self.start_crawl(effects);
    }

    pub(super) fn handle_repeat_intro(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.intro_seen = false;
        effects.push(Effect::SavePreferences);
        self.music.started_by_intro = false;
        self.music.autoplay_token += 1;
        effects.push(Effect::StopMusic);
        if self.template.is_crawl() {
            self.teardown_crawl(effects);
            self.begin_intro(effects);
        }
    }

    pub(super) fn handle_music_stop(&mut self, effects: &mut Vec<Effect>) {
        self.music.started_by_intro = false;
        self.music.autoplay_token += 1;
        effects.push(Effect::StopMusic);
    }

    pub(super) fn handle_music_volume_changed(&mut self, volume: f32) {
        let volume = volume.clamp(MIN_MUSIC_VOLUME, MAX_MUSIC_VOLUME);
        self.music.player.set_volume(volume);
        self.config.music_volume = volume;
    }

    pub(super) fn handle_music_autoplay_due(&mut self, token: u64, effects: &mut Vec<Effect>) {
        if token != self.music.autoplay_token {
            debug!(token, current = self.music.autoplay_token, "Stale autoplay timer ignored");
            return;
        }
        if !self.template.is_crawl() || self.intro.active || self.music.player.is_playing() {
            return;
        }
        effects.push(Effect::PlayMusic { restart: false });
    }
}
