/// Single-image viewer, the `--view <IMAGE>` mode of the executable
use iced::keyboard::{self, key, Key};
use iced::widget::{container, Image};
use iced::{window, Element, Length, Point, Size, Subscription, Task, Theme};
use std::path::Path;

use crate::imaging::preview::Preview;
use crate::launcher::open_with_system;
use crate::state::data::display_name;

/// Where the viewer window appears on screen
const VIEWER_POSITION: (f32, f32) = (100.0, 100.0);

struct Viewer {
    preview: Preview,
}

#[derive(Debug, Clone)]
enum ViewerMessage {
    Close,
}

impl Viewer {
    fn title(&self) -> String {
        format!("Image Viewer — {}", display_name(&self.preview.path))
    }

    fn update(&mut self, message: ViewerMessage) -> Task<ViewerMessage> {
        match message {
            ViewerMessage::Close => window::get_latest().and_then(window::close),
        }
    }

    fn view(&self) -> Element<ViewerMessage> {
        container(Image::new(self.preview.handle.clone()))
            .padding(10)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<ViewerMessage> {
        keyboard::on_key_press(|key, _modifiers| match key {
            Key::Named(key::Named::Escape) => Some(ViewerMessage::Close),
            _ => None,
        })
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Show `path` in its own window; blocks until the window is closed.
///
/// If the image cannot be decoded the OS default viewer gets it instead
/// and this returns right away.
pub fn run(path: &Path) -> iced::Result {
    let preview = match Preview::load(path) {
        Ok(preview) => preview,
        Err(err) => {
            log::warn!("{}, handing it to the system viewer", err);
            if let Err(err) = open_with_system(path) {
                log::error!("{}", err);
            }
            return Ok(());
        }
    };

    let (width, height) = preview.window_size();
    let settings = window::Settings {
        size: Size::new(width as f32, height as f32),
        position: window::Position::Specific(Point::new(VIEWER_POSITION.0, VIEWER_POSITION.1)),
        level: window::Level::AlwaysOnTop,
        ..window::Settings::default()
    };

    iced::application(Viewer::title, Viewer::update, Viewer::view)
        .subscription(Viewer::subscription)
        .theme(Viewer::theme)
        .window(settings)
        .run_with(move || (Viewer { preview }, Task::none()))
}
