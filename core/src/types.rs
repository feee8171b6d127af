/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for bomb counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn area(w: Coord, h: Coord) -> CellCount {
    let w = w as CellCount;
    let h = h as CellCount;
    w.saturating_mul(h)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Moore-neighborhood coordinates of `center`, clipped at the board bounds.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS.iter().filter_map(move |&(dx, dy)| {
        let x = center.0.checked_add_signed(dx)?;
        let y = center.1.checked_add_signed(dy)?;
        (x < bounds.0 && y < bounds.1).then_some((x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbors_of_interior_cell_cover_all_eight_positions() {
        let found: Vec<_> = neighbors((1, 1), (3, 3)).collect();

        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));
    }

    #[test]
    fn neighbors_are_clipped_at_the_corners() {
        let found: Vec<_> = neighbors((0, 0), (3, 3)).collect();

        assert_eq!(found, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn neighbors_are_clipped_at_the_far_edge() {
        let found: Vec<_> = neighbors((2, 2), (3, 3)).collect();

        assert_eq!(found, [(1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn area_of_the_presets() {
        assert_eq!(area(8, 8), 64);
        assert_eq!(area(30, 16), 480);
        assert_eq!(area(255, 255), 65025);
    }
}
