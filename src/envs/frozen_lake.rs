use crate::error::{LakeError, Result};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A grid coordinate. `x` grows east, `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct State {
    pub x: usize,
    pub y: usize,
}

impl State {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate in direction `a`, `None` when it would underflow.
    /// The upper grid bound is not checked here.
    pub fn offset(self, a: Action) -> Option<State> {
        let (dx, dy) = a.delta();
        Some(State {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl From<(usize, usize)> for State {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl From<State> for (usize, usize) {
    fn from(s: State) -> Self {
        (s.x, s.y)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    North,
    South,
    East,
    West,
}

impl Action {
    /// Enumeration order. Greedy selection breaks ties in favour of the earliest entry.
    pub const ALL: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::North => (0, -1),
            Action::South => (0, 1),
            Action::East => (1, 0),
            Action::West => (-1, 0),
        }
    }

    /// Directions an intended move can slip into.
    pub fn perpendicular(self) -> [Action; 2] {
        match self {
            Action::North | Action::South => [Action::East, Action::West],
            Action::East | Action::West => [Action::North, Action::South],
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Action::North => '^',
            Action::South => 'v',
            Action::East => '>',
            Action::West => '<',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Free,
    Target,
    Hole,
    Blocked,
}

impl Cell {
    pub fn is_terminal(self) -> bool {
        matches!(self, Cell::Target | Cell::Hole)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cell::Free => "free",
            Cell::Target => "target",
            Cell::Hole => "hole",
            Cell::Blocked => "blocked",
        };
        f.write_str(name)
    }
}

/// Static lake geometry.
///
/// Every coordinate carries exactly one [`Cell`] class, fixed at construction.
/// Free cells are the states of the MDP and are numbered densely in row-major
/// order so solvers can keep their tables in flat vectors.
#[derive(Debug, Clone)]
pub struct FrozenLake {
    width: usize,
    height: usize,
    start: State,
    cells: Vec<Cell>,
    free: Vec<State>,
    index: Vec<Option<usize>>,
}

impl FrozenLake {
    pub fn new(
        width: usize,
        height: usize,
        start: State,
        targets: &HashSet<State>,
        blocked: &HashSet<State>,
        holes: &HashSet<State>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LakeError::InvalidDimensions { width, height });
        }

        let mut cells = vec![Cell::Free; width * height];
        for (class, set) in [
            (Cell::Target, targets),
            (Cell::Hole, holes),
            (Cell::Blocked, blocked),
        ] {
            for &s in set {
                if s.x >= width || s.y >= height {
                    return Err(LakeError::OutOfBounds(s));
                }
                let c = &mut cells[s.y * width + s.x];
                if *c != Cell::Free {
                    return Err(LakeError::OverlappingCells {
                        state: s,
                        first: *c,
                        second: class,
                    });
                }
                *c = class;
            }
        }

        if start.x >= width || start.y >= height {
            return Err(LakeError::OutOfBounds(start));
        }
        if cells[start.y * width + start.x] != Cell::Free {
            return Err(LakeError::InvalidStart(start));
        }

        let mut free = Vec::new();
        let mut index = vec![None; width * height];
        for (y, x) in iproduct!(0..height, 0..width) {
            if cells[y * width + x] == Cell::Free {
                index[y * width + x] = Some(free.len());
                free.push(State::new(x, y));
            }
        }

        Ok(Self {
            width,
            height,
            start,
            cells,
            free,
            index,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> State {
        self.start
    }

    pub fn contains(&self, s: State) -> bool {
        s.x < self.width && s.y < self.height
    }

    /// Classification of `s`, `None` when off the grid.
    pub fn cell(&self, s: State) -> Option<Cell> {
        self.contains(s).then(|| self.cells[s.y * self.width + s.x])
    }

    pub fn is_free(&self, s: State) -> bool {
        self.cell(s) == Some(Cell::Free)
    }

    /// Free states in index order.
    pub fn states(&self) -> &[State] {
        &self.free
    }

    pub fn n_s(&self) -> usize {
        self.free.len()
    }

    pub fn n_a(&self) -> usize {
        Action::ALL.len()
    }

    /// Dense index of a free state.
    pub fn index(&self, s: State) -> Option<usize> {
        if self.contains(s) {
            self.index[s.y * self.width + s.x]
        } else {
            None
        }
    }

    /// Inverse of [`FrozenLake::index`].
    pub fn state(&self, i: usize) -> Option<State> {
        self.free.get(i).copied()
    }

    pub(crate) fn free_index(&self, s: State) -> Result<usize> {
        self.index(s).ok_or(LakeError::NotFree(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[(usize, usize)]) -> HashSet<State> {
        items.iter().copied().map(State::from).collect()
    }

    #[test]
    fn classifies_every_cell() {
        let lake = FrozenLake::new(
            3,
            2,
            State::new(0, 0),
            &set(&[(2, 1)]),
            &set(&[(1, 1)]),
            &set(&[(2, 0)]),
        )
        .unwrap();

        assert_eq!(lake.cell(State::new(0, 0)), Some(Cell::Free));
        assert_eq!(lake.cell(State::new(2, 1)), Some(Cell::Target));
        assert_eq!(lake.cell(State::new(1, 1)), Some(Cell::Blocked));
        assert_eq!(lake.cell(State::new(2, 0)), Some(Cell::Hole));
        assert_eq!(lake.cell(State::new(3, 0)), None);
        assert_eq!(
            lake.states(),
            &[State::new(0, 0), State::new(1, 0), State::new(0, 1)]
        );
    }

    #[test]
    fn index_is_a_bijection_over_free_states() {
        let lake = FrozenLake::new(
            4,
            4,
            State::new(0, 0),
            &set(&[(3, 3)]),
            &set(&[(1, 1), (2, 2)]),
            &set(&[(3, 0)]),
        )
        .unwrap();

        assert_eq!(lake.n_s(), 12);
        for (i, &s) in lake.states().iter().enumerate() {
            assert_eq!(lake.index(s), Some(i));
            assert_eq!(lake.state(i), Some(s));
        }
        assert_eq!(lake.index(State::new(1, 1)), None);
        assert_eq!(lake.index(State::new(3, 3)), None);
        assert_eq!(lake.index(State::new(9, 9)), None);
    }

    #[test]
    fn rejects_overlapping_classes() {
        let err = FrozenLake::new(
            3,
            3,
            State::new(0, 0),
            &set(&[(1, 1)]),
            &set(&[]),
            &set(&[(1, 1)]),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LakeError::OverlappingCells {
                first: Cell::Target,
                second: Cell::Hole,
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_bounds_cells() {
        let err = FrozenLake::new(
            2,
            2,
            State::new(0, 0),
            &set(&[(2, 0)]),
            &set(&[]),
            &set(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, LakeError::OutOfBounds(s) if s == State::new(2, 0)));

        let err = FrozenLake::new(2, 2, State::new(5, 5), &set(&[]), &set(&[]), &set(&[]))
            .unwrap_err();
        assert!(matches!(err, LakeError::OutOfBounds(_)));
    }

    #[test]
    fn rejects_non_free_start_and_empty_grid() {
        let err = FrozenLake::new(
            2,
            2,
            State::new(1, 1),
            &set(&[]),
            &set(&[(1, 1)]),
            &set(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, LakeError::InvalidStart(_)));

        let err = FrozenLake::new(0, 3, State::new(0, 0), &set(&[]), &set(&[]), &set(&[]))
            .unwrap_err();
        assert!(matches!(
            err,
            LakeError::InvalidDimensions {
                width: 0,
                height: 3
            }
        ));
    }

    #[test]
    fn perpendicular_directions() {
        assert_eq!(Action::North.perpendicular(), [Action::East, Action::West]);
        assert_eq!(Action::West.perpendicular(), [Action::North, Action::South]);
        assert_eq!(State::new(0, 0).offset(Action::West), None);
        assert_eq!(
            State::new(0, 0).offset(Action::South),
            Some(State::new(0, 1))
        );
    }
}
