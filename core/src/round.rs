use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::placement;
use crate::*;

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitBomb,
    Won,
}

impl RevealOutcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitBomb | Self::Won)
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    Toggled,
    Won,
}

/// One round of minesweeper. The board is generated lazily on the first
/// reveal, which guarantees the first revealed cell is never a bomb.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRound {
    config: GameConfig,
    seed: u64,
    board: Option<Array2<Cell>>,
    ended: bool,
    won: bool,
    flagged_bombs: CellCount,
    revealed_counters: CellCount,
}

impl GameRound {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            board: None,
            ended: false,
            won: false,
            flagged_bombs: 0,
            revealed_counters: 0,
        }
    }

    /// Round with a fixed bomb layout instead of a seeded random one.
    #[cfg(test)]
    pub(crate) fn with_bombs(size: Coord2, bombs: &[Coord2]) -> Self {
        let bombs: alloc::collections::BTreeSet<Coord2> = bombs.iter().copied().collect();
        let mut round = Self::new(
            GameConfig::new_unchecked(size, bombs.len() as CellCount),
            0,
        );
        round.board = Some(placement::board_from_bombs(size, &bombs));
        round
    }

    pub const fn config(&self) -> GameConfig {
        self.config
    }

    pub const fn is_initialized(&self) -> bool {
        self.board.is_some()
    }

    pub const fn is_ended(&self) -> bool {
        self.ended
    }

    pub const fn has_won(&self) -> bool {
        self.won
    }

    pub const fn revealed_counters(&self) -> CellCount {
        self.revealed_counters
    }

    pub const fn flagged_bombs(&self) -> CellCount {
        self.flagged_bombs
    }

    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.board.as_ref().map(|board| board[coords.to_nd_index()])
    }

    fn validate(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.config.size;
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Reveals the cell at `coords`, generating the board first if this is
    /// the opening move. A zero counter floods into its whole zero region.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate(coords)?;
        if self.ended {
            return Ok(RevealOutcome::NoChange);
        }

        let (seed, config) = (self.seed, self.config);
        let board = self
            .board
            .get_or_insert_with(|| placement::generate_board(seed, config, coords));

        let cell = &mut board[coords.to_nd_index()];
        if cell.is_bomb() {
            if cell.reveal() {
                log::debug!("bomb revealed at {coords:?}, round lost");
                self.ended = true;
                return Ok(RevealOutcome::HitBomb);
            }
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_revealed() {
            return Ok(RevealOutcome::NoChange);
        }
        let cascade = cell.reveal();
        self.revealed_counters += 1;

        if cascade {
            self.revealed_counters += Self::flood_reveal(board, config.size, coords);
        }

        if self.revealed_counters == config.safe_cells() {
            log::debug!("all safe cells revealed, round won");
            self.ended = true;
            self.won = true;
            return Ok(RevealOutcome::Won);
        }
        Ok(RevealOutcome::Revealed)
    }

    /// Worklist flood fill from a freshly revealed zero counter: opens the
    /// connected zero region plus its numeric border. Returns how many
    /// counters it revealed; each cell is revealed at most once, so the
    /// queue is bounded by the board area.
    fn flood_reveal(board: &mut Array2<Cell>, bounds: Coord2, start: Coord2) -> CellCount {
        let mut revealed = 0;
        let mut worklist: VecDeque<Coord2> = neighbors(start, bounds).collect();

        while let Some(pos) = worklist.pop_front() {
            let cell = &mut board[pos.to_nd_index()];
            if cell.is_bomb() || cell.is_revealed() {
                continue;
            }
            let cascade = cell.reveal();
            revealed += 1;
            if cascade {
                worklist.extend(neighbors(pos, bounds));
            }
        }
        revealed
    }

    /// Toggles the flag at `coords`. Flagging every bomb wins the round;
    /// flags on counters never count towards that tally.
    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate(coords)?;
        if self.ended {
            return Err(GameError::AlreadyEnded);
        }
        let board = self.board.as_mut().ok_or(GameError::BoardNotGenerated)?;

        let delta = board[coords.to_nd_index()].flag();
        self.flagged_bombs = self.flagged_bombs.saturating_add_signed(delta.into());

        if self.config.bombs > 0 && self.flagged_bombs == self.config.bombs {
            log::debug!("all bombs flagged, round won");
            self.ended = true;
            self.won = true;
            return Ok(FlagOutcome::Won);
        }
        Ok(FlagOutcome::Toggled)
    }

    /// Banner plus the all-placeholder grid, shown right after `new`.
    pub fn preview(&self) -> String {
        let (width, height) = self.config.size;
        format!(
            "New Game: {width} x {height} Bombs: {bombs}\n{self}",
            bombs = self.config.bombs
        )
    }
}

impl fmt::Display for GameRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.config.size;
        if self.ended {
            f.write_str(if self.won { "You won:\n" } else { "Game Over:\n" })?;
        }

        write!(f, "  ")?;
        for x in 0..width {
            write!(f, " {x:>2}")?;
        }
        writeln!(f)?;

        for y in 0..height {
            write!(f, "{y:>2}")?;
            for x in 0..width {
                let glyph = match &self.board {
                    Some(board) => board[[x as usize, y as usize]].glyph(),
                    None => '*',
                };
                write!(f, "  {glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
