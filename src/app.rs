use slide48::engine::{Direction, Session};
use slide48::error::Result;

use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::renderer::Renderer;
use crate::tui::view::View;

/// App wires a game session to a renderer and an event source.
pub(crate) struct App<R: Renderer, E: EventSource> {
    renderer: R,
    event_source: E,
    session: Session,
}

impl<R: Renderer, E: EventSource> App<R, E> {
    pub(crate) fn new(session: Session, renderer: R, event_source: E) -> Self {
        Self {
            renderer,
            event_source,
            session,
        }
    }

    /// Run consumes the App and plays until the player quits. The renderer gets a chance to
    /// restore the terminal if anything fails along the way.
    pub(crate) fn run(mut self) -> Result<Session> {
        match self.inner_run() {
            Err(e) => {
                self.renderer.recover();
                Err(e)
            }
            Ok(_) => Ok(self.session),
        }
    }

    fn inner_run(&mut self) -> Result<()> {
        loop {
            self.renderer.render(&View::from(&self.session))?;

            match self.event_source.next_event()? {
                Event::UserInput(UserInput::Direction(d)) => self.shift(d),
                Event::UserInput(UserInput::NewGame) => self.session.new_game(),
                Event::UserInput(UserInput::Quit) => break,
                Event::Resize => {
                    let (width, height) = self.renderer.size_hint()?;
                    log::debug!("terminal resized to {} x {}", width, height);
                }
            }
        }
        log::info!("quitting with score {}", self.session.score());
        Ok(())
    }

    fn shift(&mut self, direction: Direction) {
        if self.session.submit(direction).is_some() && self.session.is_over() {
            log::info!("no moves left, press n to start over");
        }
    }
}
