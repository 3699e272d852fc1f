use slide48::engine::Direction;
use slide48::error::Result;

pub(crate) trait EventSource {
    /// Block until the next event relevant to the game.
    fn next_event(&mut self) -> Result<Event>;
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    UserInput(UserInput),
    Resize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum UserInput {
    Direction(Direction),
    NewGame,
    Quit,
}
