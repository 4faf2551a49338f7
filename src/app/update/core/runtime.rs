use super::super::super::messages::Message;
use super::super::super::state::{App, CRAWL_SCROLL_ID};
use super::super::Effect;
use crate::cache::save_preferences;
use crate::cv::load_cv;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;
use std::time::Duration;
use tracing::{info, warn};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SavePreferences => {
                save_preferences(&self.data_dir, &self.prefs);
                Task::none()
            }
            Effect::LoadContent(language) => {
                self.ui.loading = true;
                self.ui.error = None;
                let data_dir = self.data_dir.clone();
                info!(%language, path = %data_dir.display(), "Dispatching content load task");
                Task::perform(
                    async move {
                        match load_cv(&data_dir, language) {
                            Ok(bundle) => Message::ContentLoaded {
                                bundle: Box::new(bundle),
                            },
                            Err(err) => Message::ContentLoadFailed {
                                language,
                                error: format!("{err:#}"),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::ScrollCrawl(y) => {
                scrollable::scroll_to(CRAWL_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y })
            }
            Effect::ScheduleCrawlRestart { token, after } => {
                after_delay(token, after, Message::CrawlRestartDue)
            }
            Effect::ScheduleMusicAutoplay { token, after } => {
                after_delay(token, after, Message::MusicAutoplayDue)
            }
            Effect::ScheduleIntroEnd { token, after } => {
                after_delay(token, after, Message::IntroFinished)
            }
            Effect::PlayMusic { restart } => {
                if let Err(err) = self.music.player.play(restart) {
                    warn!("Soundtrack playback failed: {err:#}");
                }
                Task::none()
            }
            Effect::PauseMusic => {
                self.music.player.pause();
                Task::none()
            }
            Effect::StopMusic => {
                self.music.player.stop();
                Task::none()
            }
            Effect::QuitSafely => {
                save_preferences(&self.data_dir, &self.prefs);
                self.music.player.stop();
                info!("Quitting");
                iced::exit()
            }
        }
    }
}

/// Deliver `token` back as a message once `after` has elapsed.
fn after_delay(token: u64, after: Duration, to_message: fn(u64) -> Message) -> Task<Message> {
    Task::perform(
        async move {
            tokio::time::sleep(after).await;
            token
        },
        to_message,
    )
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. })
            if status == event::Status::Ignored =>
        {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
