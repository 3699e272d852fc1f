use rand::distributions::Distribution;
use rand::distributions::WeightedIndex;
use rand::seq::IteratorRandom;
use rand::Rng;

use super::board::{Grid, Idx, Tile};

const NEW_TILE_CHOICES: [Tile; 2] = [2, 4];
const NEW_TILE_WEIGHTS: [u8; 2] = [9, 1];

/// Spawn records where a new tile was placed and its value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Spawn {
    pub idx: Idx,
    pub value: Tile,
}

impl std::fmt::Display for Spawn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0} at {1}", self.value, self.idx)
    }
}

/// TileSpawner drops a 2 (90%) or a 4 (10%) onto a uniformly chosen empty cell. All randomness
/// comes from the caller's generator so seeded games replay exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct TileSpawner {
    new_tile_weighted_index: WeightedIndex<u8>,
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self {
            new_tile_weighted_index: WeightedIndex::new(NEW_TILE_WEIGHTS)
                .expect("NEW_TILE_WEIGHTS should never be empty"),
        }
    }
}

impl TileSpawner {
    /// Places one tile on `board`. A full board is left as is and yields None.
    pub fn spawn<const N: usize, R: Rng + ?Sized>(
        &self,
        board: &mut Grid<N>,
        rng: &mut R,
    ) -> Option<Spawn> {
        let idx = board.empty_cells().choose(&mut *rng)?;
        let value = NEW_TILE_CHOICES[self.new_tile_weighted_index.sample(rng)];
        board.set(&idx, value);
        log::trace!("spawned {} at {}", value, idx);
        Some(Spawn { idx, value })
    }
}
