use super::direction::Direction;

/// Value of a single cell; 0 marks an empty cell.
pub type Tile = u32;

pub type Score = u32;

/// Edge length of the standard board.
pub const SIZE: usize = 4;

/// Idx addresses a cell by column (x) and row (y).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Idx(pub usize, pub usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "idx({0},{1})", self.0, self.1)
    }
}

impl Idx {
    pub fn x(&self) -> usize {
        self.0
    }

    pub fn y(&self) -> usize {
        self.1
    }
}

/// Grid is a square matrix of tiles. Boards are plain values: every transition produces a new
/// one, so a grid handed out to a reader never changes underneath it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Grid<const N: usize> {
    slots: [[Tile; N]; N],
}

/// The 4x4 board the game is played on.
pub type Board = Grid<SIZE>;

impl<const N: usize> Default for Grid<N> {
    fn default() -> Self {
        Self { slots: [[0; N]; N] }
    }
}

impl<const N: usize> From<[[Tile; N]; N]> for Grid<N> {
    fn from(slots: [[Tile; N]; N]) -> Self {
        Self { slots }
    }
}

// public methods
impl<const N: usize> Grid<N> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read-only view of the cells, row-major.
    pub fn cells(&self) -> &[[Tile; N]; N] {
        &self.slots
    }

    pub fn get(&self, idx: &Idx) -> Tile {
        self.slots[idx.y()][idx.x()]
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Idx> + '_ {
        self.indices().filter(move |idx| self.get(idx) == 0)
    }

    pub fn is_full(&self) -> bool {
        self.empty_cells().next().is_none()
    }

    pub fn occupied(&self) -> usize {
        self.indices().filter(|idx| self.get(idx) != 0).count()
    }

    /// Sum of all tile values.
    pub fn total(&self) -> u64 {
        self.slots
            .iter()
            .flat_map(|row| row.iter())
            .map(|&t| u64::from(t))
            .sum()
    }

    pub fn max_tile(&self) -> Tile {
        self.slots
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }
}

// crate-private methods
impl<const N: usize> Grid<N> {
    pub(crate) fn set(&mut self, idx: &Idx, value: Tile) {
        self.slots[idx.y()][idx.x()] = value;
    }

    /// Every cell in row-major order.
    pub(crate) fn indices(&self) -> impl Iterator<Item = Idx> {
        (0..N).flat_map(|y| (0..N).map(move |x| Idx(x, y)))
    }

    pub(crate) fn lines(&self, direction: Direction) -> Lines<N> {
        Lines::new(direction)
    }

    pub(crate) fn read_line(&self, line: &[Idx; N]) -> [Tile; N] {
        std::array::from_fn(|pos| self.get(&line[pos]))
    }

    pub(crate) fn write_line(&mut self, line: &[Idx; N], values: &[Tile; N]) {
        for (idx, value) in line.iter().zip(values.iter()) {
            self.set(idx, *value);
        }
    }
}

impl<const N: usize> std::fmt::Display for Grid<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.slots {
            let cells = row
                .iter()
                .map(|t| format!("{:>5}", t))
                .collect::<Vec<String>>()
                .join(" ");
            writeln!(f, "{}", cells)?;
        }
        Ok(())
    }
}

/// Lines is an iterator over the lines of a grid as seen when moving in a given direction. Each
/// line lists its cell indices in travel order, so index 0 is the edge tiles slide toward.
pub(crate) struct Lines<const N: usize> {
    direction: Direction,
    line: usize,
}

impl<const N: usize> Lines<N> {
    fn new(direction: Direction) -> Self {
        Self { direction, line: 0 }
    }

    fn idx(&self, pos: usize) -> Idx {
        let pos = if self.direction.is_reversed() {
            N - 1 - pos
        } else {
            pos
        };
        if self.direction.is_horizontal() {
            Idx(pos, self.line)
        } else {
            Idx(self.line, pos)
        }
    }
}

impl<const N: usize> Iterator for Lines<N> {
    type Item = [Idx; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.line == N {
            return None;
        }
        let line = std::array::from_fn(|pos| self.idx(pos));
        self.line += 1;
        Some(line)
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::left(Direction::Left, [Idx(0, 1), Idx(1, 1), Idx(2, 1), Idx(3, 1)])]
    #[case::right(Direction::Right, [Idx(3, 1), Idx(2, 1), Idx(1, 1), Idx(0, 1)])]
    #[case::up(Direction::Up, [Idx(1, 0), Idx(1, 1), Idx(1, 2), Idx(1, 3)])]
    #[case::down(Direction::Down, [Idx(1, 3), Idx(1, 2), Idx(1, 1), Idx(1, 0)])]
    fn second_line_in_travel_order(#[case] direction: Direction, #[case] expected: [Idx; 4]) {
        let board = Board::empty();
        let lines = board.lines(direction).collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], expected, "lines for {}", direction);
    }

    #[test]
    fn lines_cover_every_cell_once() {
        let board = Board::empty();
        for direction in Direction::ALL {
            let mut seen = board.lines(direction).flatten().collect::<Vec<_>>();
            seen.sort_by_key(|idx| (idx.y(), idx.x()));
            assert_eq!(seen, board.indices().collect::<Vec<_>>(), "{}", direction);
        }
    }

    #[test]
    fn read_write_line() {
        let mut board = Board::from([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        let line = board.lines(Direction::Right).next().unwrap();
        assert_eq!(board.read_line(&line), [16, 8, 4, 2]);
        board.write_line(&line, &[32, 0, 0, 0]);
        assert_eq!(board.cells()[0], [0, 0, 0, 32]);
    }

    #[test]
    fn counting() {
        let board = Board::from([[2, 0, 0, 2], [0, 4, 0, 0], [0; 4], [0, 0, 0, 1024]]);
        assert_eq!(board.occupied(), 4);
        assert_eq!(board.empty_cells().count(), 12);
        assert_eq!(board.total(), 1032);
        assert_eq!(board.max_tile(), 1024);
        assert!(!board.is_full());
        assert!(Board::from([[2; 4]; 4]).is_full());
    }

    #[test]
    fn smaller_grid() {
        let grid = Grid::<2>::from([[2, 0], [0, 4]]);
        let lines = grid.lines(Direction::Up).collect::<Vec<_>>();
        assert_eq!(lines, vec![[Idx(0, 0), Idx(0, 1)], [Idx(1, 0), Idx(1, 1)]]);
        assert_eq!(grid.empty_cells().collect::<Vec<_>>(), vec![Idx(1, 0), Idx(0, 1)]);
    }
}
