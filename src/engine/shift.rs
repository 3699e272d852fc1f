use super::board::{Grid, Score, Tile};
use super::direction::Direction;

/// Shift is the outcome of sliding a board in one direction, before any tile is spawned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Shift<const N: usize> {
    pub board: Grid<N>,
    pub score_delta: Score,
    /// Whether any line changed. A shift that didn't move is a no-op for the game.
    pub moved: bool,
}

/// Slides and merges every line of `board` toward `direction`. The input board is left untouched.
pub fn apply_move<const N: usize>(board: &Grid<N>, direction: Direction) -> Shift<N> {
    let mut next = *board;
    let mut score_delta = 0;
    let mut moved = false;

    for line in board.lines(direction) {
        let before = board.read_line(&line);
        let (after, gained) = collapse(&before);
        score_delta += gained;
        if after != before {
            moved = true;
            next.write_line(&line, &after);
        }
    }

    Shift {
        board: next,
        score_delta,
        moved,
    }
}

/// Collapses one line toward index 0 and returns the new line with the points it earned.
///
/// Tiles are packed first, then adjacent equal pairs merge in a single forward pass: the earliest
/// pair wins and a merged tile is never merged again within the same move. So `[2, 2, 2, 2]`
/// becomes `[4, 4, 0, 0]` rather than `[8, 0, 0, 0]`.
pub fn collapse<const N: usize>(line: &[Tile; N]) -> ([Tile; N], Score) {
    let mut packed = line
        .iter()
        .copied()
        .filter(|&t| t != 0)
        .collect::<Vec<Tile>>();
    let mut score = 0;

    let mut i = 0;
    while i + 1 < packed.len() {
        if packed[i] == packed[i + 1] {
            packed[i] *= 2;
            packed[i + 1] = 0;
            score += packed[i];
            // skip the emptied partner so the merged tile can't take part again
            i += 2;
        } else {
            i += 1;
        }
    }

    let mut collapsed = [0; N];
    for (slot, tile) in collapsed
        .iter_mut()
        .zip(packed.into_iter().filter(|&t| t != 0))
    {
        *slot = tile;
    }
    (collapsed, score)
}
