use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Both ends are terminal, a new round needs a new board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One round of play: the grid of cells plus the game-level state.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Random board, reproducible when a seed is given.
    pub fn generate(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let generator = match seed {
            Some(seed) => RandomMineGenerator::new(seed),
            None => RandomMineGenerator::from_entropy(),
        };
        Self::generate_with(config, generator)
    }

    pub fn generate_with<G: MineGenerator>(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Self::new(generator.generate(config)?)
    }

    /// Assigns every cell its kind: mines first, then the adjacency counts of everything else.
    pub fn new(mine_layout: MineLayout) -> Result<Self> {
        let config = mine_layout.game_config();
        config.validate()?;

        let mut cells: Array2<Cell> = Array2::default(nd_shape(config.size));
        for coords in mine_layout.mine_coords() {
            cells[coords.to_nd_index()].assign(CellKind::Mine)?;
        }

        let (x_end, y_end) = config.size;
        for y in 0..y_end {
            for x in 0..x_end {
                let coords = (x, y);
                if !mine_layout[coords] {
                    let count = mine_layout.adjacent_mine_count(coords);
                    cells[coords.to_nd_index()].assign(CellKind::Count(count))?;
                }
            }
        }

        log::debug!(
            "New {}x{} board with {} mines",
            config.size.0,
            config.size.1,
            config.mines
        );
        Ok(Self {
            config,
            cells,
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags, never below zero even when the player over-flags.
    pub fn remaining_mine_estimate(&self) -> CellCount {
        self.config.mines.saturating_sub(self.flagged_count)
    }

    /// Win condition: every non-mine cell is revealed, flags are irrelevant.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count == self.config.safe_cells()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        if self.contains(coords) {
            Ok(&self.cells[coords.to_nd_index()])
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        self.cell(coords).map(Cell::view)
    }

    /// Row by row from the top, what each cell looks like to the player.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), cell)| ((x as Coord, y as Coord), cell.view()))
    }

    /// Where all the mines are, only available once the round is over.
    pub fn exposed_mines(&self) -> Vec<Coord2> {
        if !self.is_finished() {
            return Vec::new();
        }
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((y, x), _)| (x as Coord, y as Coord))
            .collect()
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        if !self.contains(coords) {
            return Ok(false);
        }
        self.check_in_progress()?;

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return Ok(false);
        }

        let flagged = cell.toggle_flag()?;
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::debug!("Flag at {:?} set to {}", coords, flagged);
        Ok(flagged)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        if !self.contains(coords) {
            log::trace!("Ignoring reveal outside the board at {:?}", coords);
            return Ok(RevealOutcome::Unchanged);
        }
        self.check_in_progress()?;

        let cell = self.cells[coords.to_nd_index()];
        if cell.is_revealed() || cell.is_flagged() {
            return Ok(RevealOutcome::Unchanged);
        }

        Ok(self.reveal_single_cell(coords))
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.reveal();

        let Ok(adjacent_mines) = cell.adjacent_count() else {
            log::debug!("Mine hit at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(BoardState::Lost);
            return RevealOutcome::Lost;
        };
        self.revealed_count += 1;
        log::debug!("Reveal cell at {:?}, mine count: {}", coords, adjacent_mines);

        let mut opened = vec![coords];
        if adjacent_mines == 0 {
            self.open_zeros(coords, &mut opened);
        }

        if self.is_cleared() {
            self.end_game(BoardState::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed(opened)
        }
    }

    /// Breadth-first flood from a revealed zero: every neighbor of a zero gets revealed, zeros keep spreading.
    ///
    /// Flags do not stop the flood, mines are never touched.
    fn open_zeros(&mut self, origin: Coord2, opened: &mut Vec<Coord2>) {
        let size = self.size();
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit = VecDeque::from([origin]);

        while let Some(zero_coords) = to_visit.pop_front() {
            for visit_coords in NeighborIter::new(zero_coords, size) {
                if !visited.insert(visit_coords) {
                    continue;
                }

                let cell = &mut self.cells[visit_coords.to_nd_index()];
                let Ok(visit_adjacent_mines) = cell.adjacent_count() else {
                    continue;
                };

                if !cell.is_revealed() {
                    if cell.is_flagged() {
                        self.flagged_count -= 1;
                    }
                    cell.reveal();
                    self.revealed_count += 1;
                    opened.push(visit_coords);
                    log::trace!(
                        "Flood opened cell at {:?}, mine count: {}",
                        visit_coords,
                        visit_adjacent_mines
                    );
                }

                if visit_adjacent_mines == 0 {
                    to_visit.push_back(visit_coords);
                }
            }
        }
    }

    fn end_game(&mut self, state: BoardState) {
        if self.state.is_finished() {
            return;
        }
        log::debug!("Game ended: {:?}", state);
        self.state = state;
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
