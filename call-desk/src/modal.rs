//! Overlay dialog
//!
//! A modal is just a frame: it draws its body in a centred box above the
//! page when open and draws nothing when closed. Whoever owns the dialog
//! state decides whether it is open and what closing means.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Widget},
};

pub struct Modal<'a> {
    title: &'a str,
    open: bool,
    width_percent: u16,
    height: u16,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str, open: bool) -> Self {
        Self {
            title,
            open,
            width_percent: 60,
            height: 9,
        }
    }

    pub fn size(mut self, width_percent: u16, height: u16) -> Self {
        self.width_percent = width_percent.clamp(10, 100);
        self.height = height;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Box the modal occupies inside `area`, if open
    pub fn area(&self, area: Rect) -> Option<Rect> {
        if !self.open {
            return None;
        }
        let [row] = Layout::vertical([Constraint::Length(self.height.min(area.height))])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Percentage(self.width_percent)])
            .flex(Flex::Center)
            .areas(row);
        Some(cell)
    }

    /// Clear the box and draw its border. Returns the inner area, or
    /// `None` when closed.
    pub fn render_frame(&self, frame: &mut Frame) -> Option<Rect> {
        let outer = self.area(frame.area())?;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.title))
            .title_bottom(Line::from(" Esc to close ").right_aligned());
        let inner = block.inner(outer);

        frame.render_widget(Clear, outer);
        frame.render_widget(block, outer);
        Some(inner)
    }

    /// Draw the frame with `body` inside it
    pub fn render<W: Widget>(&self, frame: &mut Frame, body: W) -> Option<Rect> {
        let inner = self.render_frame(frame)?;
        frame.render_widget(body, inner);
        Some(inner)
    }

    /// Esc closes an open modal: returns what `on_close` produced
    pub fn handle_key<M>(&self, key: &KeyEvent, on_close: impl FnOnce() -> M) -> Option<M> {
        (self.open && key.code == KeyCode::Esc).then(on_close)
    }
}
