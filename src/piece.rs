//! Piece catalog: the seven shapes as colour-coded square matrices.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cell value: 0 is empty, 1..=7 is a piece colour id.
pub type Cell = u8;

pub const EMPTY: Cell = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("invalid piece kind '{0}' (expected one of I, L, J, O, Z, S, T)")]
    InvalidKind(char),
    #[error("piece set is empty")]
    EmptySet,
}

/// Piece kinds (I, L, J, O, Z, S, T).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    Z,
    S,
    T,
}

impl PieceKind {
    pub const ALL: [Self; 7] = [Self::I, Self::L, Self::J, Self::O, Self::Z, Self::S, Self::T];

    /// Colour id written into every occupied cell of this kind.
    pub fn color_id(self) -> Cell {
        match self {
            Self::I => 1,
            Self::L => 2,
            Self::J => 3,
            Self::O => 4,
            Self::Z => 5,
            Self::S => 6,
            Self::T => 7,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::I => 'I',
            Self::L => 'L',
            Self::J => 'J',
            Self::O => 'O',
            Self::Z => 'Z',
            Self::S => 'S',
            Self::T => 'T',
        }
    }

    /// Kind for an upper-case symbol; anything outside the set is rejected.
    pub fn from_symbol(symbol: char) -> Result<Self, PieceError> {
        Self::ALL
            .into_iter()
            .find(|k| k.symbol() == symbol)
            .ok_or(PieceError::InvalidKind(symbol))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Rotation sense: clockwise is +1, counter-clockwise is -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    pub fn inverse(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Small square grid of cells; `rows[y][x]`, row 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<Cell>>,
}

impl Matrix {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Occupied cells as `(x, y, value)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != EMPTY)
                .map(move |(x, &v)| (x, y, v))
        })
    }

    /// Quarter turn in place: transpose, then mirror rows (clockwise) or
    /// flip row order (counter-clockwise).
    pub fn rotate(&mut self, rotation: Rotation) {
        let n = self.rows.len();
        for y in 0..n {
            for x in 0..y {
                let upper = self.rows[x][y];
                self.rows[x][y] = self.rows[y][x];
                self.rows[y][x] = upper;
            }
        }
        match rotation {
            Rotation::Clockwise => self.rows.iter_mut().for_each(|row| row.reverse()),
            Rotation::CounterClockwise => self.rows.reverse(),
        }
    }
}

/// Fresh matrix for `kind`; nothing is shared with previously issued pieces.
pub fn create_piece(kind: PieceKind) -> Matrix {
    let c = kind.color_id();
    let rows = match kind {
        PieceKind::I => vec![
            vec![0, c, 0, 0],
            vec![0, c, 0, 0],
            vec![0, c, 0, 0],
            vec![0, c, 0, 0],
        ],
        PieceKind::L => vec![vec![0, c, 0], vec![0, c, 0], vec![0, c, c]],
        PieceKind::J => vec![vec![0, c, 0], vec![0, c, 0], vec![c, c, 0]],
        PieceKind::O => vec![vec![c, c], vec![c, c]],
        PieceKind::Z => vec![vec![c, c, 0], vec![0, c, c], vec![0, 0, 0]],
        PieceKind::S => vec![vec![0, c, c], vec![c, c, 0], vec![0, 0, 0]],
        PieceKind::T => vec![vec![0, c, 0], vec![c, c, c], vec![0, 0, 0]],
    };
    Matrix::from_rows(rows)
}

/// Kinds eligible for spawning, e.g. parsed from `"TJLOSZI"`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSet(Vec<PieceKind>);

impl PieceSet {
    pub fn new(kinds: Vec<PieceKind>) -> Result<Self, PieceError> {
        if kinds.is_empty() {
            return Err(PieceError::EmptySet);
        }
        Ok(Self(kinds))
    }

    pub fn kinds(&self) -> &[PieceKind] {
        &self.0
    }
}

impl FromStr for PieceSet {
    type Err = PieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kinds = s
            .trim()
            .chars()
            .map(|c| PieceKind::from_symbol(c.to_ascii_uppercase()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(kinds)
    }
}

impl fmt::Display for PieceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|k| write!(f, "{k}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_uses_its_own_colour() {
        for kind in PieceKind::ALL {
            let m = create_piece(kind);
            assert_eq!(m.width(), m.height(), "{kind} should be square");
            let cells: Vec<_> = m.occupied().collect();
            assert_eq!(cells.len(), 4, "{kind} should have four blocks");
            assert!(cells.iter().all(|&(_, _, v)| v == kind.color_id()));
        }
    }

    #[test]
    fn pieces_are_independent() {
        let mut a = create_piece(PieceKind::T);
        let b = create_piece(PieceKind::T);
        a.rotate(Rotation::Clockwise);
        assert_ne!(a, b);
        assert_eq!(b, create_piece(PieceKind::T));
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        assert_eq!(PieceKind::from_symbol('X'), Err(PieceError::InvalidKind('X')));
        assert_eq!("IOQ".parse::<PieceSet>(), Err(PieceError::InvalidKind('Q')));
        assert_eq!("".parse::<PieceSet>(), Err(PieceError::EmptySet));
    }

    #[test]
    fn piece_set_parses_lowercase() {
        let set: PieceSet = "tjlOSZi".parse().unwrap();
        assert_eq!(set.to_string(), "TJLOSZI");
        assert_eq!(set.kinds().len(), 7);
        assert_eq!(set.kinds()[0], PieceKind::T);
    }

    #[test]
    fn rotate_clockwise_turns_t_right() {
        let mut m = create_piece(PieceKind::T);
        m.rotate(Rotation::Clockwise);
        assert_eq!(
            m.rows(),
            &[vec![0, 7, 0], vec![0, 7, 7], vec![0, 7, 0]]
        );
    }

    #[test]
    fn rotate_counter_clockwise_turns_t_left() {
        let mut m = create_piece(PieceKind::T);
        m.rotate(Rotation::CounterClockwise);
        assert_eq!(
            m.rows(),
            &[vec![0, 7, 0], vec![7, 7, 0], vec![0, 7, 0]]
        );
    }

    #[test]
    fn opposite_turns_cancel() {
        for kind in PieceKind::ALL {
            for rot in [Rotation::Clockwise, Rotation::CounterClockwise] {
                let mut m = create_piece(kind);
                m.rotate(rot);
                m.rotate(rot.inverse());
                assert_eq!(m, create_piece(kind));
            }
        }
    }

    #[test]
    fn four_turns_are_identity() {
        let mut m = create_piece(PieceKind::L);
        for _ in 0..4 {
            m.rotate(Rotation::Clockwise);
        }
        assert_eq!(m, create_piece(PieceKind::L));
    }
}
