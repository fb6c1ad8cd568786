use crate::dom::GridCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrap {
    pub horizontal: bool,
    pub vertical: bool,
}

/// How to move from one cell to another: along which axis, and whether the
/// movement runs counterwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryMove {
    pub vertical: bool,
    pub counterwise: bool,
}

/// Slide keys laid out column by column: `columns[col][row]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    columns: Vec<Vec<Option<String>>>,
}

impl Grid {
    /// Empty keys count as holes.
    pub fn new(columns: Vec<Vec<Option<String>>>) -> Self {
        let columns = columns
            .into_iter()
            .map(|column| column.into_iter().map(|key| key.filter(|k| !k.is_empty())).collect())
            .collect();
        Self { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self, col: usize) -> usize {
        self.columns.get(col).map_or(0, Vec::len)
    }

    pub fn key(&self, cell: GridCell) -> Option<&str> {
        self.columns.get(cell.col)?.get(cell.row)?.as_deref()
    }

    /// Populated cells, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (GridCell, &str)> {
        self.columns.iter().enumerate().flat_map(|(col, column)| {
            column
                .iter()
                .enumerate()
                .filter_map(move |(row, key)| key.as_deref().map(|k| (GridCell::new(col, row), k)))
        })
    }

    pub fn position_of(&self, key: &str) -> Option<GridCell> {
        self.cells().find(|(_, k)| *k == key).map(|(cell, _)| cell)
    }

    /// The populated cell next to `from` on the given axis.
    ///
    /// Moving vertically stays in the column of `from`; moving horizontally
    /// keeps the row, so a shorter neighbouring column yields `None`.
    pub fn neighbor(&self, from: GridCell, reverse: bool, vertical: bool, wrap: Wrap) -> Option<GridCell> {
        let cell = if vertical {
            let row = step(from.row, self.row_count(from.col), reverse, wrap.vertical)?;
            GridCell::new(from.col, row)
        } else {
            let col = step(from.col, self.column_count(), reverse, wrap.horizontal)?;
            GridCell::new(col, from.row)
        };
        self.key(cell).map(|_| cell)
    }

    /// Axis and direction of the shortest move from `from` to `to`.
    ///
    /// A column change moves horizontally unless the row distance is larger;
    /// on a wrapping axis the shorter way round wins, ties go the direct way.
    pub fn history_move(&self, from: GridCell, to: GridCell, wrap: Wrap) -> Option<HistoryMove> {
        if from == to {
            return None;
        }

        let (col_steps, col_counterwise) = shortest(from.col, to.col, self.column_count(), wrap.horizontal);
        let rows = self.row_count(from.col).max(self.row_count(to.col));
        let (row_steps, row_counterwise) = shortest(from.row, to.row, rows, wrap.vertical);

        let horizontal = from.col != to.col && (from.row == to.row || col_steps >= row_steps);
        Some(if horizontal {
            HistoryMove { vertical: false, counterwise: col_counterwise }
        } else {
            HistoryMove { vertical: true, counterwise: row_counterwise }
        })
    }
}

fn step(position: usize, len: usize, reverse: bool, circular: bool) -> Option<usize> {
    if position >= len {
        return None;
    }
    if reverse {
        if position > 0 {
            Some(position - 1)
        } else if circular {
            Some(len - 1)
        } else {
            None
        }
    } else if position + 1 < len {
        Some(position + 1)
    } else if circular {
        Some(0)
    } else {
        None
    }
}

// (steps, counterwise)
fn shortest(from: usize, to: usize, len: usize, circular: bool) -> (usize, bool) {
    let direct = from.abs_diff(to);
    if circular && len > direct {
        let around = len - direct;
        if around < direct {
            return (around, to > from);
        }
    }
    (direct, to < from)
}
