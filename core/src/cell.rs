use serde::{Deserialize, Serialize};

/// A single board position: a bomb, or the count of bombs adjacent to it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Bomb { flagged: bool, revealed: bool },
    Counter { count: u8, flagged: bool, revealed: bool },
}

impl Cell {
    pub const fn bomb() -> Self {
        Self::Bomb {
            flagged: false,
            revealed: false,
        }
    }

    pub const fn counter(count: u8) -> Self {
        Self::Counter {
            count,
            flagged: false,
            revealed: false,
        }
    }

    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb { .. })
    }

    pub const fn is_revealed(self) -> bool {
        match self {
            Self::Bomb { revealed, .. } | Self::Counter { revealed, .. } => revealed,
        }
    }

    pub const fn is_flagged(self) -> bool {
        match self {
            Self::Bomb { flagged, .. } | Self::Counter { flagged, .. } => flagged,
        }
    }

    /// Toggles the flag and returns the delta for the running flagged-bomb
    /// tally: +1/-1 on bombs, always 0 on counters.
    pub fn flag(&mut self) -> i8 {
        match self {
            Self::Bomb { flagged, .. } => {
                *flagged = !*flagged;
                if *flagged { 1 } else { -1 }
            }
            Self::Counter { flagged, .. } => {
                *flagged = !*flagged;
                0
            }
        }
    }

    /// Marks the cell revealed. Returns true on a bomb's first reveal (the
    /// round is lost) and on a zero counter's first reveal (the caller must
    /// cascade into the neighbors). Repeated reveals are no-ops.
    pub fn reveal(&mut self) -> bool {
        match self {
            Self::Bomb { revealed, .. } if !*revealed => {
                *revealed = true;
                true
            }
            Self::Counter { count, revealed, .. } if !*revealed => {
                *revealed = true;
                *count == 0
            }
            _ => false,
        }
    }

    /// Rendering precedence: revealed beats flagged beats hidden.
    pub const fn glyph(self) -> char {
        match self {
            Self::Bomb { revealed: true, .. } => 'X',
            Self::Counter {
                revealed: true,
                count,
                ..
            } => (b'0' + count) as char,
            Self::Bomb { flagged: true, .. } | Self::Counter { flagged: true, .. } => 'F',
            _ => '*',
        }
    }
}
