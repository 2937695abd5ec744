//! Board generation and reveal engine for Minesweeper.
//!
//! A [`Board`] is built from a [`GameConfig`] (width, height, mine count), either by sampling a random
//! [`MineLayout`] or from a fixed one, and then driven through [`Board::reveal`] and [`Board::toggle_flag`]
//! until it is [`BoardState::Won`] or [`BoardState::Lost`]. Nothing here renders or performs I/O, the
//! presentation layer polls [`Board::cells`] instead.

use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// The `(width, height, mines)` triple a difficulty profile resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// At least one cell on each axis and at least one cell left without a mine.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Where the mines are, before any cell kinds have been derived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    config: GameConfig,
}

impl MineLayout {
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut mine_mask: Array2<bool> = Array2::default(nd_shape(size));
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let mines = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let mines = CellCount::try_from(mines).map_err(|_| GameError::TooManyMines)?;
        let config = GameConfig::new(size, mines)?;

        Ok(Self { mine_mask, config })
    }

    /// Picks `config.mines` distinct positions, every combination being equally likely.
    ///
    /// `config` is expected to be valid, see [`GameConfig::validate`].
    pub fn random<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let width = CellCount::from(config.size.0);
        let mut positions: Vec<CellCount> = (0..config.total_cells()).collect();
        let (chosen, _) = positions.partial_shuffle(rng, config.mines as usize);

        let mut mine_mask: Array2<bool> = Array2::default(nd_shape(config.size));
        for &index in chosen.iter() {
            let coords = ((index % width) as Coord, (index / width) as Coord);
            mine_mask[coords.to_nd_index()] = true;
        }

        Self { mine_mask, config }
    }

    pub fn game_config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        NeighborIter::new(coords, self.size())
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((y, x), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Unchanged,
    /// Every position opened by this call, the clicked one first.
    Revealed(Vec<Coord2>),
    Lost,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        use RevealOutcome::*;
        match self {
            Unchanged => false,
            Revealed(_) => true,
            Lost => true,
            Won => true,
        }
    }

    pub fn opened(&self) -> &[Coord2] {
        match self {
            Self::Revealed(opened) => opened,
            _ => &[],
        }
    }
}
