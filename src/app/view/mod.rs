mod crawl;
mod resume;

use super::messages::Message;
use super::state::{App, MAX_MUSIC_VOLUME, MIN_MUSIC_VOLUME, TOOLBAR_HEIGHT_PX};
use crate::config::ThemeMode;
use crate::theme::{Template, Theme};
use iced::alignment::Vertical;
use iced::widget::{Row, button, column, container, horizontal_space, pick_list, row, slider, text};
use iced::{Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let body = match self.template {
            Template::Standard => self.standard_view(),
            Template::AtsFriendly => self.ats_view(),
            Template::StarWars => self.crawl_view(),
        };

        let mut layout = column![self.toolbar()].height(Length::Fill);
        if let Some(banner) = self.error_banner() {
            layout = layout.push(banner);
        }
        layout.push(body).into()
    }

    pub fn theme(&self) -> iced::Theme {
        Theme::for_view(self.prefs.theme, self.template).into()
    }

    fn toolbar(&self) -> Element<'_, Message> {
        let template_picker = pick_list(
            Template::ALL,
            Some(self.template),
            Message::TemplateSelected,
        );
        let language_toggle =
            button(text(self.language.toggled().label())).on_press(Message::ToggleLanguage);
        let theme_label = match self.prefs.theme {
            ThemeMode::Night => "Day Mode",
            ThemeMode::Day => "Night Mode",
        };
        let theme_toggle = button(theme_label).on_press(Message::ToggleTheme);
        let reload = if self.ui.loading {
            button("Loading...")
        } else {
            button("Reload").on_press(Message::ReloadContent)
        };

        let mut controls: Row<'_, Message> =
            row![template_picker, language_toggle, theme_toggle, reload]
                .spacing(10)
                .align_y(Vertical::Center);

        if self.template.is_crawl() {
            controls = controls.push(horizontal_space());
            if !self.intro.active {
                let pause_label = if self.crawl.controller.is_paused() {
                    "Resume"
                } else {
                    "Pause"
                };
                controls = controls.push(button(pause_label).on_press(Message::ToggleCrawlPause));
            }
            controls = controls.push(button("Repeat Intro").on_press(Message::RepeatIntro));
            if self.music.player.has_track() {
                controls = controls.push(self.music_controls());
            }
        }

        container(controls)
            .padding([8, 16])
            .width(Length::Fill)
            .center_y(Length::Fixed(TOOLBAR_HEIGHT_PX))
            .into()
    }

    fn music_controls(&self) -> Element<'_, Message> {
        let toggle = if self.music.player.is_playing() {
            button("Pause Music").on_press(Message::MusicPause)
        } else {
            button("Play Music").on_press(Message::MusicPlay)
        };
        row![
            toggle,
            button("Stop").on_press(Message::MusicStop),
            text(format!("{:.0}%", self.music.player.volume() * 100.0)),
            slider(
                MIN_MUSIC_VOLUME..=MAX_MUSIC_VOLUME,
                self.music.player.volume(),
                Message::MusicVolumeChanged,
            )
            .step(0.01)
            .width(Length::Fixed(120.0)),
        ]
        .spacing(8)
        .align_y(Vertical::Center)
        .into()
    }

    fn error_banner(&self) -> Option<Element<'_, Message>> {
        let error = self.ui.error.as_ref()?;
        Some(
            container(
                row![
                    text(format!("Could not load content: {error}")),
                    horizontal_space(),
                    button("Dismiss").on_press(Message::DismissError),
                ]
                .spacing(12)
                .align_y(Vertical::Center),
            )
            .padding([6, 16])
            .width(Length::Fill)
            .style(container::rounded_box)
            .into(),
        )
    }
}
