use rand::{Rng, RngCore};

use super::board::{Board, Score, Tile, SIZE};
use super::direction::Direction;
use super::shift::apply_move;
use super::spawn::{Spawn, TileSpawner};
use super::terminal::is_game_over;

/// Phase of a game. `Over` only goes back to `Playing` through a new game.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Phase {
    #[default]
    Playing,
    Over,
}

/// Transition summarizes an accepted move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Transition {
    pub direction: Direction,
    pub score_delta: Score,
    pub spawn: Option<Spawn>,
    pub phase: Phase,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0} +{1}", self.direction, self.score_delta)?;
        if let Some(spawn) = &self.spawn {
            write!(f, ", new tile {0}", spawn)?;
        }
        Ok(())
    }
}

/// GameState is an immutable snapshot of a game: the board, the running score and the phase.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GameState {
    board: Board,
    score: Score,
    phase: Phase,
    last_spawn: Option<Spawn>,
}

// public methods
impl GameState {
    /// Starts a game on an empty board with a single spawned tile.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_spawner(&TileSpawner::default(), rng)
    }

    /// Wraps an existing board, deriving the phase from it.
    pub fn from_board(board: Board, score: Score) -> Self {
        let phase = if is_game_over(&board) {
            Phase::Over
        } else {
            Phase::Playing
        };
        Self {
            board,
            score,
            phase,
            last_spawn: None,
        }
    }

    /// Applies `direction` and returns the resulting state. Moves that change nothing, and any
    /// move once the game is over, return an identical copy of `self`.
    pub fn submit<R: Rng + ?Sized>(&self, direction: Direction, rng: &mut R) -> GameState {
        match self.advance(direction, &TileSpawner::default(), rng) {
            Some((next, _)) => next,
            None => self.clone(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cells(&self) -> &[[Tile; SIZE]; SIZE] {
        self.board.cells()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// The tile placed by the most recent accepted move, or by game start.
    pub fn last_spawn(&self) -> Option<Spawn> {
        self.last_spawn
    }
}

// crate-private methods
impl GameState {
    pub(crate) fn with_spawner<R: Rng + ?Sized>(spawner: &TileSpawner, rng: &mut R) -> Self {
        let mut board = Board::empty();
        let last_spawn = spawner.spawn(&mut board, rng);
        Self {
            board,
            score: 0,
            phase: Phase::Playing,
            last_spawn,
        }
    }

    /// Runs one move through shift, spawn and game over detection, in that order. Returns None
    /// when the move is rejected.
    pub(crate) fn advance<R: Rng + ?Sized>(
        &self,
        direction: Direction,
        spawner: &TileSpawner,
        rng: &mut R,
    ) -> Option<(GameState, Transition)> {
        if self.phase == Phase::Over {
            return None;
        }

        let shift = apply_move(&self.board, direction);
        if !shift.moved {
            return None;
        }

        let mut board = shift.board;
        let spawn = spawner.spawn(&mut board, rng);
        // the spawned tile can fill the last gap, so detection has to see the post-spawn board
        let phase = if is_game_over(&board) {
            Phase::Over
        } else {
            Phase::Playing
        };

        let next = GameState {
            board,
            score: self.score + shift.score_delta,
            phase,
            last_spawn: spawn,
        };
        let transition = Transition {
            direction,
            score_delta: shift.score_delta,
            spawn,
            phase,
        };
        Some((next, transition))
    }
}

/// Session owns the state of one game at a time along with the random source that drives it.
pub struct Session {
    rng: Box<dyn RngCore>,
    spawner: TileSpawner,
    state: GameState,
}

impl Session {
    /// Initialize a new session using the given random number generator.
    pub fn new(mut rng: impl RngCore + 'static) -> Self {
        let spawner = TileSpawner::default();
        let state = GameState::with_spawner(&spawner, &mut rng);
        log::info!("new game started with {:?}", state.last_spawn);
        Self {
            rng: Box::new(rng),
            spawner,
            state,
        }
    }

    /// submit applies a direction and returns a Transition if the board changed. Input is
    /// ignored once the game is over.
    pub fn submit(&mut self, direction: Direction) -> Option<Transition> {
        if self.state.is_over() {
            log::debug!("ignoring {} after game over", direction);
            return None;
        }

        let Some((next, transition)) = self.state.advance(direction, &self.spawner, &mut self.rng)
        else {
            log::debug!("{} changes nothing", direction);
            return None;
        };

        log::debug!("accepted {}", transition);
        self.state = next;
        if self.state.is_over() {
            log::info!(
                "game over with score {} and max tile {}",
                self.state.score,
                self.state.board.max_tile()
            );
        }
        Some(transition)
    }

    /// Throws away the current game and starts over with an empty board and zero score.
    pub fn new_game(&mut self) {
        log::info!("new game requested at score {}", self.state.score);
        self.state = GameState::with_spawner(&self.spawner, &mut self.rng);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn cells(&self) -> &[[Tile; SIZE]; SIZE] {
        self.state.cells()
    }

    pub fn score(&self) -> Score {
        self.state.score()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: GameState) {
        self.state = state;
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::engine::board::Idx;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    /// Moving right leaves a single gap at the bottom left whose neighbours (32 and 8) can't pair
    /// with either spawn value.
    fn one_move_from_over() -> GameState {
        GameState::from_board(
            Board::from([[2, 4, 2, 4], [4, 2, 4, 2], [32, 4, 2, 4], [8, 16, 8, 0]]),
            100,
        )
    }

    #[test]
    fn new_session() {
        let session = Session::new(rng());
        assert_eq!(session.score(), 0);
        assert!(!session.is_over());
        assert_eq!(session.state().board().occupied(), 1);
        let spawn = session.state().last_spawn().unwrap();
        assert_eq!(session.state().board().get(&spawn.idx), spawn.value);
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut session = Session::new(rng());
        let state = GameState::from_board(Board::from([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]), 12);
        session.set_state(state.clone());
        assert_eq!(session.submit(Direction::Left), None);
        assert_eq!(session.submit(Direction::Up), None);
        assert_eq!(session.state(), &state);
    }

    #[test]
    fn accepted_move_scores_and_spawns() {
        let mut session = Session::new(rng());
        session.set_state(GameState::from_board(
            Board::from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]),
            8,
        ));
        let transition = session.submit(Direction::Left).unwrap();
        assert_eq!(transition.direction, Direction::Left);
        assert_eq!(transition.score_delta, 4);
        assert_eq!(transition.phase, Phase::Playing);
        assert_eq!(session.score(), 12);
        assert_eq!(session.cells()[0][0], 4);

        let spawn = transition.spawn.unwrap();
        assert_ne!(spawn.idx, Idx(0, 0));
        assert_eq!(session.state().board().occupied(), 2);
        assert_eq!(session.state().board().total(), 4 + u64::from(spawn.value));
        assert_eq!(session.state().last_spawn(), Some(spawn));
    }

    #[test]
    fn spawn_can_end_the_game() {
        let mut session = Session::new(rng());
        session.set_state(one_move_from_over());
        let transition = session.submit(Direction::Right).unwrap();
        assert_eq!(transition.spawn.unwrap().idx, Idx(0, 3));
        assert_eq!(transition.phase, Phase::Over);
        assert!(session.is_over());
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn input_after_game_over_is_ignored() {
        let mut session = Session::new(rng());
        session.set_state(one_move_from_over());
        session.submit(Direction::Right).unwrap();
        let over = session.state().clone();
        for direction in Direction::ALL {
            assert_eq!(session.submit(direction), None);
        }
        assert_eq!(session.state(), &over);
    }

    #[test]
    fn new_game_resets() {
        let mut session = Session::new(rng());
        session.set_state(one_move_from_over());
        session.submit(Direction::Right).unwrap();
        session.new_game();
        assert!(!session.is_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.state().board().occupied(), 1);
    }

    #[test]
    fn functional_submit() {
        let mut rng = rng();
        let state = GameState::from_board(Board::from([[0, 0, 2, 2], [0; 4], [0; 4], [0; 4]]), 0);
        let next = state.submit(Direction::Left, &mut rng);
        assert_eq!(next.score(), 4);
        assert_eq!(next.cells()[0][0], 4);
        assert_eq!(next.board().occupied(), 2);
        // the original snapshot is untouched
        assert_eq!(state.cells()[0], [0, 0, 2, 2]);

        let rejected = GameState::from_board(Board::from([[4, 0, 0, 0], [0; 4], [0; 4], [0; 4]]), 4);
        assert_eq!(rejected.submit(Direction::Left, &mut rng), rejected);
        assert_eq!(rejected.submit(Direction::Up, &mut rng), rejected);
    }

    #[test]
    fn from_board_detects_over() {
        let over = GameState::from_board(
            Board::from([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]),
            0,
        );
        assert_eq!(over.phase(), Phase::Over);
        assert!(over.submit(Direction::Left, &mut rng()).is_over());
    }

    #[test]
    fn same_seed_same_game() {
        let (mut a, mut b) = (Session::new(rng()), Session::new(rng()));
        for direction in Direction::ALL.iter().cycle().take(200) {
            assert_eq!(a.submit(*direction), b.submit(*direction));
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn playthrough_invariants() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut session = Session::new(SmallRng::seed_from_u64(3));
        let mut picker = SmallRng::seed_from_u64(4);
        let mut accepted = 0;
        for _ in 0..5_000 {
            if session.is_over() {
                break;
            }
            let before = session.state().clone();
            let direction = Direction::ALL[picker.gen_range(0..4)];
            match session.submit(direction) {
                Some(transition) => {
                    accepted += 1;
                    let after = session.state();
                    let spawn = transition.spawn.expect("a moved board always has a gap");
                    assert_eq!(after.score(), before.score() + transition.score_delta);
                    assert_eq!(
                        after.board().total(),
                        before.board().total() + u64::from(spawn.value)
                    );
                    assert!(after.board().occupied() <= before.board().occupied() + 1);
                    assert_eq!(after.is_over(), is_game_over(after.board()));
                }
                None => assert_eq!(session.state(), &before),
            }
        }
        assert!(accepted > 50);
        assert!(session.score() > 0);
    }
}
