use alloc::collections::BTreeSet;
use ndarray::Array2;
use rand::prelude::*;

use crate::*;

/// Scatters `config.bombs` distinct bombs over the board, never on `safe`,
/// then fills every other position with its adjacent-bomb counter.
pub(crate) fn generate_board(seed: u64, config: GameConfig, safe: Coord2) -> Array2<Cell> {
    let (width, height) = config.size;
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut bombs: BTreeSet<Coord2> = BTreeSet::new();
    while (bombs.len() as CellCount) < config.bombs {
        let pos = (rng.random_range(0..width), rng.random_range(0..height));
        // duplicate draws fall through and get retried
        if pos != safe {
            bombs.insert(pos);
        }
    }
    log::debug!("placed {} bombs on a {width}x{height} board", bombs.len());

    board_from_bombs(config.size, &bombs)
}

pub(crate) fn board_from_bombs(size: Coord2, bombs: &BTreeSet<Coord2>) -> Array2<Cell> {
    Array2::from_shape_fn((size.0 as usize, size.1 as usize), |(x, y)| {
        let pos = (x as Coord, y as Coord);
        if bombs.contains(&pos) {
            Cell::bomb()
        } else {
            let count = neighbors(pos, size)
                .filter(|adjacent| bombs.contains(adjacent))
                .count() as u8;
            Cell::counter(count)
        }
    })
}
