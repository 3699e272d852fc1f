use super::board::{Grid, Idx};

/// Returns true when no move can change `board`: there are no empty cells and no two
/// horizontally or vertically adjacent cells hold the same value.
pub fn is_game_over<const N: usize>(board: &Grid<N>) -> bool {
    if !board.is_full() {
        return false;
    }
    // equality is symmetric, so comparing each cell with its right and lower neighbour covers
    // every adjacent pair
    !board.indices().any(|idx| {
        let value = board.get(&idx);
        let right = idx.x() + 1 < N && board.get(&Idx(idx.x() + 1, idx.y())) == value;
        let below = idx.y() + 1 < N && board.get(&Idx(idx.x(), idx.y() + 1)) == value;
        right || below
    })
}
