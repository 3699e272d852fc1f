use std::io::Write;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrossTermEvent, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    style::{self, Attribute},
    terminal, ExecutableCommand, QueueableCommand,
};

use slide48::engine::{Direction, Idx};
use slide48::error::{Error, Result};

use super::colors::{self, Rgb};
use super::events::{Event, EventSource, UserInput};
use super::renderer::Renderer;
use super::view::{self, View};

const BOX_UPPER_LEFT: char = '╔';
const BOX_UPPER_RIGHT: char = '╗';
const BOX_LOWER_LEFT: char = '╚';
const BOX_LOWER_RIGHT: char = '╝';
const BOX_HORIZONTAL: char = '═';
const BOX_VERTICAL: char = '║';

/// Amount the most recently spawned tile is lightened by so it stands out.
const SPAWN_HIGHLIGHT: f32 = 0.35;

pub(crate) struct Crossterm<T: Write> {
    w: T,
    restored: bool,
}

impl<T: Write> Crossterm<T> {
    pub(crate) fn new(mut w: T) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(EnableMouseCapture)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w, restored: false })
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.w.execute(cursor::Show)?;
        self.w.execute(DisableMouseCapture)?;
        self.w.execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl<T: Write> Drop for Crossterm<T> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {}", e);
        }
    }
}

impl<T: Write> Renderer for Crossterm<T> {
    fn size_hint(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn render(&mut self, v: &View) -> Result<()> {
        let (width, height) = self.size_hint()?;
        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;

        if view::fits(width, height) {
            self.draw_header(v)?;
            self.draw_border()?;
            self.draw_tiles(v)?;
            self.draw_footer(v, width as usize)?;
        } else {
            let (min_width, min_height) = view::min_size();
            let message = format!(
                "{}, try resizing your terminal!",
                Error::TerminalTooSmall(min_width, min_height)
            );
            self.w.queue(cursor::MoveTo(0, 0))?;
            self.w.queue(style::Print(message))?;
        }

        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn recover(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {}", e);
        }
    }
}

// drawing
impl<T: Write> Crossterm<T> {
    fn print_at(&mut self, x: usize, y: usize, s: &str) -> Result<()> {
        self.w.queue(cursor::MoveTo(x as u16, y as u16))?;
        self.w.queue(style::Print(s))?;
        Ok(())
    }

    fn colors(&mut self, background: Rgb, foreground: Rgb) -> Result<()> {
        self.w.queue(style::SetBackgroundColor(background.into()))?;
        self.w.queue(style::SetForegroundColor(foreground.into()))?;
        Ok(())
    }

    fn draw_header(&mut self, v: &View) -> Result<()> {
        self.w.queue(style::SetForegroundColor(colors::TEXT.into()))?;
        self.w.queue(style::SetAttribute(Attribute::Bold))?;
        self.print_at(view::BOARD_FIXED_X_OFFSET, 0, view::TITLE)?;
        self.w.queue(style::SetAttribute(Attribute::Reset))?;
        self.w.queue(style::SetForegroundColor(colors::TEXT.into()))?;
        self.print_at(view::BOARD_FIXED_X_OFFSET, 1, &v.score_line())?;
        Ok(())
    }

    fn draw_border(&mut self) -> Result<()> {
        let (width, height) = view::board_extent();
        let (x, y) = (view::BOARD_FIXED_X_OFFSET, view::BOARD_FIXED_Y_OFFSET);
        let inner = width - 2;
        self.colors(colors::BOARD_BACKGROUND, colors::TEXT)?;

        let top = format!(
            "{}{}{}",
            BOX_UPPER_LEFT,
            BOX_HORIZONTAL.to_string().repeat(inner),
            BOX_UPPER_RIGHT
        );
        let side = format!("{}{}{}", BOX_VERTICAL, " ".repeat(inner), BOX_VERTICAL);
        let bottom = format!(
            "{}{}{}",
            BOX_LOWER_LEFT,
            BOX_HORIZONTAL.to_string().repeat(inner),
            BOX_LOWER_RIGHT
        );

        self.print_at(x, y, &top)?;
        for row in 1..height - 1 {
            self.print_at(x, y + row, &side)?;
        }
        self.print_at(x, y + height - 1, &bottom)?;
        Ok(())
    }

    fn draw_tiles(&mut self, v: &View) -> Result<()> {
        let blank = " ".repeat(view::TILE_WIDTH);
        for (y, row) in v.cells.iter().enumerate() {
            for (x, value) in row.iter().enumerate() {
                let (mut background, foreground) = colors::tile_colors(*value);
                let spawned = v.spawned == Some(Idx(x, y));
                if spawned {
                    background = background.lighten(SPAWN_HIGHLIGHT);
                }
                self.colors(background, foreground)?;
                if spawned {
                    self.w.queue(style::SetAttribute(Attribute::Bold))?;
                }

                let (tx, ty) = view::tile_origin(x, y);
                for line in 0..view::TILE_HEIGHT {
                    if line == view::TILE_HEIGHT / 2 {
                        self.print_at(tx, ty + line, &View::label(*value))?;
                    } else {
                        self.print_at(tx, ty + line, &blank)?;
                    }
                }

                if spawned {
                    self.w.queue(style::SetAttribute(Attribute::Reset))?;
                }
            }
        }
        Ok(())
    }

    fn draw_footer(&mut self, v: &View, width: usize) -> Result<()> {
        self.w.queue(style::ResetColor)?;
        self.w.queue(style::SetForegroundColor(colors::TEXT.into()))?;
        let mut y = view::below_board();
        if v.over {
            self.w.queue(style::SetAttribute(Attribute::Bold))?;
            self.print_at(view::BOARD_FIXED_X_OFFSET, y, view::GAME_OVER)?;
            self.w.queue(style::SetAttribute(Attribute::Reset))?;
            self.w.queue(style::SetForegroundColor(colors::TEXT.into()))?;
        }
        y += 1;
        for line in view::footer_lines(width) {
            self.print_at(view::BOARD_FIXED_X_OFFSET, y, &line)?;
            y += 1;
        }
        Ok(())
    }
}

/// CrosstermEvents reads keyboard, mouse and resize events from the terminal. A left button drag
/// counts as a swipe.
#[derive(Default)]
pub(crate) struct CrosstermEvents {
    drag_start: Option<(u16, u16)>,
}

impl EventSource for CrosstermEvents {
    /// Block until the next Crossterm event.
    fn next_event(&mut self) -> Result<Event> {
        loop {
            match event::read()? {
                CrossTermEvent::Key(ke) => match handle_key_event(ke) {
                    Some(input) => return Ok(Event::UserInput(input)),
                    None => continue,
                },
                CrossTermEvent::Mouse(me) => match self.handle_mouse_event(me) {
                    Some(direction) => {
                        return Ok(Event::UserInput(UserInput::Direction(direction)))
                    }
                    None => continue,
                },
                CrossTermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            };
        }
    }
}

impl CrosstermEvents {
    fn handle_mouse_event(&mut self, me: MouseEvent) -> Option<Direction> {
        match me.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = Some((me.column, me.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (column, row) = self.drag_start.take()?;
                let dx = me.column as i32 - column as i32;
                // terminal cells are roughly twice as tall as they are wide
                let dy = (me.row as i32 - row as i32) * 2;
                Direction::from_swipe(dx, dy)
            }
            _ => None,
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    if ke.kind == KeyEventKind::Release {
        return None;
    }
    match ke.code {
        KeyCode::Left | KeyCode::Char('h') => Some(UserInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(UserInput::Direction(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') => Some(UserInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(UserInput::Direction(Direction::Down)),
        KeyCode::Char('c') if ke.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UserInput::Quit)
        }
        KeyCode::Char('n') => Some(UserInput::NewGame),
        KeyCode::Char('q') | KeyCode::Esc => Some(UserInput::Quit),
        _ => None,
    }
}
