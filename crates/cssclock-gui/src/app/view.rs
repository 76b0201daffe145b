use iced::{Element, Theme};

use super::state::{App, Message};
use crate::views::clock::render_clock;

impl App {
    pub fn title(&self) -> String {
        self.config.window.title.clone()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn view(&self) -> Element<'_, Message> {
        render_clock(self.clock.layers(), self.config.window.padding)
    }
}
