mod messages;
mod state;
mod update;
mod view;

pub use state::Launch;

use state::App;

use iced::{Size, window};

/// Open the viewer window with everything resolved at launch.
pub fn run_app(launch: Launch) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(launch.config.window_width, launch.config.window_height),
        ..window::Settings::default()
    };

    iced::application(App::title, App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(App::theme)
        .run_with(move || App::bootstrap(launch))
}
