use serde::{Deserialize, Serialize};

use crate::*;

/// What a grid position holds, fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mine,
    Count(u8),
}

/// Player-visible state of a cell, the only thing a renderer should look at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// A revealed mine, only ever the one that ended the game.
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

/// A single grid position.
///
/// Starts out unassigned, receives its [`CellKind`] exactly once during generation, and afterwards only the
/// revealed and flagged bits change.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    kind: Option<CellKind>,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub const fn kind(&self) -> Option<CellKind> {
        self.kind
    }

    pub(crate) fn assign(&mut self, kind: CellKind) -> Result<()> {
        if self.kind.is_some() {
            return Err(GameError::AlreadyAssigned);
        }
        self.kind = Some(kind);
        Ok(())
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, Some(CellKind::Mine))
    }

    pub fn adjacent_count(&self) -> Result<u8> {
        match self.kind {
            Some(CellKind::Count(count)) => Ok(count),
            Some(CellKind::Mine) => Err(GameError::MineHasNoCount),
            None => Err(GameError::UnassignedCell),
        }
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Flags stop counting once the cell is revealed.
    pub const fn is_flagged(&self) -> bool {
        self.flagged && !self.revealed
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Flips the flag and returns the new state, revealed cells can't be flagged.
    pub fn toggle_flag(&mut self) -> Result<bool> {
        if self.revealed {
            return Err(GameError::AlreadyRevealed);
        }
        self.flagged = !self.flagged;
        Ok(self.flagged)
    }

    pub fn view(&self) -> CellView {
        match (self.revealed, self.kind) {
            (true, Some(CellKind::Mine)) => CellView::Mine,
            (true, Some(CellKind::Count(count))) => CellView::Revealed(count),
            _ if self.flagged => CellView::Flagged,
            _ => CellView::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_cell_has_no_count() {
        let cell = Cell::default();

        assert_eq!(cell.kind(), None);
        assert!(!cell.is_mine());
        assert_eq!(cell.adjacent_count(), Err(GameError::UnassignedCell));
    }

    #[test]
    fn mine_cell_has_no_count() {
        let mut cell = Cell::default();
        cell.assign(CellKind::Mine).unwrap();

        assert!(cell.is_mine());
        assert_eq!(cell.adjacent_count(), Err(GameError::MineHasNoCount));
    }

    #[test]
    fn kind_is_assigned_only_once() {
        let mut cell = Cell::default();
        cell.assign(CellKind::Count(3)).unwrap();

        assert_eq!(cell.assign(CellKind::Mine), Err(GameError::AlreadyAssigned));
        assert_eq!(cell.kind(), Some(CellKind::Count(3)));
        assert_eq!(cell.adjacent_count(), Ok(3));
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut cell = Cell::default();
        cell.assign(CellKind::Count(0)).unwrap();

        cell.reveal();
        cell.reveal();

        assert!(cell.is_revealed());
        assert_eq!(cell.view(), CellView::Revealed(0));
    }

    #[test]
    fn toggle_flag_flips_until_revealed() {
        let mut cell = Cell::default();
        cell.assign(CellKind::Count(1)).unwrap();

        assert_eq!(cell.toggle_flag(), Ok(true));
        assert_eq!(cell.view(), CellView::Flagged);
        assert_eq!(cell.toggle_flag(), Ok(false));
        assert_eq!(cell.view(), CellView::Hidden);

        cell.reveal();
        assert_eq!(cell.toggle_flag(), Err(GameError::AlreadyRevealed));
        assert!(!cell.is_flagged());
    }

    #[test]
    fn flag_is_ignored_once_revealed() {
        let mut cell = Cell::default();
        cell.assign(CellKind::Count(2)).unwrap();
        cell.toggle_flag().unwrap();

        cell.reveal();

        assert!(!cell.is_flagged());
        assert_eq!(cell.view(), CellView::Revealed(2));
    }

    #[test]
    fn hidden_mine_view_does_not_leak_kind() {
        let mut cell = Cell::default();
        cell.assign(CellKind::Mine).unwrap();

        assert_eq!(cell.view(), CellView::Hidden);
        cell.reveal();
        assert_eq!(cell.view(), CellView::Mine);
    }
}
