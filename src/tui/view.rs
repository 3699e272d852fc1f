use textwrap::wrap;

use slide48::engine::{Idx, Score, Session, Tile, SIZE};

/// Generates a slide48 layout with legible numbers.
///
///  2048
///  Score: 1234
///
///  ╔═════════════════════════════════════╗
///  ║                                     ║
///  ║ xxxxxxxx xxxxxxxx xxxxxxxx xxxxxxxx ║
///  ║ xxxxxxxx xxxxxxxx xxxxxxxx xxxxxxxx ║
///  ║ xxxxxxxx xxxxxxxx xxxxxxxx xxxxxxxx ║
///  ║                                     ║
///  ║ xxxxxxxx xxxxxxxx xxxxxxxx xxxxxxxx ║
///  ║ xxxxxxxx xxxxxxxx xxxxxxxx xxxxxxxx ║
///  ║ xxxxxxxx xxxxxxxx xxxxxxxx xxxxxxxx ║
///  ║                                     ║
///  ║   ... two more rows of tiles ...    ║
///  ║                                     ║
///  ╚═════════════════════════════════════╝
///  Game Over!
///  footer hint, wrapped to the terminal width
///
pub(crate) const BOARD_FIXED_X_OFFSET: usize = 2;
pub(crate) const BOARD_FIXED_Y_OFFSET: usize = 3;
pub(crate) const BOARD_BORDER_WIDTH: usize = 1;
pub(crate) const BOARD_X_PADDING: usize = 1;
pub(crate) const BOARD_Y_PADDING: usize = 1;
pub(crate) const TILE_HEIGHT: usize = 3;
pub(crate) const TILE_WIDTH: usize = 8;

/// Rows reserved under the board for the game over banner and the footer.
const FOOTER_HEIGHT: usize = 4;

pub(crate) const TITLE: &str = "2048";
pub(crate) const GAME_OVER: &str = "Game Over!";
pub(crate) const FOOTER: &str =
    "Use the arrow keys, hjkl or a mouse drag to move tiles. Press n for a new game and q to quit.";

/// View is the snapshot of a session that a renderer draws.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct View {
    pub(crate) score: Score,
    pub(crate) cells: [[Tile; SIZE]; SIZE],
    pub(crate) over: bool,
    pub(crate) spawned: Option<Idx>,
}

impl From<&Session> for View {
    fn from(session: &Session) -> Self {
        let state = session.state();
        Self {
            score: state.score(),
            cells: *state.cells(),
            over: state.is_over(),
            spawned: state.last_spawn().map(|spawn| spawn.idx),
        }
    }
}

impl View {
    pub(crate) fn score_line(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Label printed in the middle row of a tile; empty cells have none.
    pub(crate) fn label(value: Tile) -> String {
        if value == 0 {
            return " ".repeat(TILE_WIDTH);
        }
        center(&value.to_string(), TILE_WIDTH)
    }
}

/// Outer size of the bordered board.
pub(crate) fn board_extent() -> (usize, usize) {
    let width = 2 * BOARD_BORDER_WIDTH + SIZE * TILE_WIDTH + (SIZE + 1) * BOARD_X_PADDING;
    let height = 2 * BOARD_BORDER_WIDTH + SIZE * TILE_HEIGHT + (SIZE + 1) * BOARD_Y_PADDING;
    (width, height)
}

/// Smallest terminal that fits the whole layout.
pub(crate) fn min_size() -> (usize, usize) {
    let (width, height) = board_extent();
    (
        width + 2 * BOARD_FIXED_X_OFFSET,
        height + BOARD_FIXED_Y_OFFSET + FOOTER_HEIGHT,
    )
}

pub(crate) fn fits(width: u16, height: u16) -> bool {
    let (min_width, min_height) = min_size();
    width as usize >= min_width && height as usize >= min_height
}

/// Top left terminal cell of the tile at column `x` and row `y` of the board.
pub(crate) fn tile_origin(x: usize, y: usize) -> (usize, usize) {
    let x_offset = BOARD_FIXED_X_OFFSET + BOARD_BORDER_WIDTH + BOARD_X_PADDING;
    let y_offset = BOARD_FIXED_Y_OFFSET + BOARD_BORDER_WIDTH + BOARD_Y_PADDING;
    (
        x_offset + (BOARD_X_PADDING + TILE_WIDTH) * x,
        y_offset + (BOARD_Y_PADDING + TILE_HEIGHT) * y,
    )
}

/// Row just below the board's bottom border.
pub(crate) fn below_board() -> usize {
    BOARD_FIXED_Y_OFFSET + board_extent().1
}

pub(crate) fn footer_lines(width: usize) -> Vec<String> {
    let width = width.saturating_sub(2 * BOARD_FIXED_X_OFFSET).max(1);
    wrap(FOOTER, width)
        .into_iter()
        .map(|line| line.to_string())
        .collect()
}

/// Pads `s` on both sides to `width`, leaning left when the padding is uneven. Strings longer
/// than `width` are returned unchanged.
pub(crate) fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}
