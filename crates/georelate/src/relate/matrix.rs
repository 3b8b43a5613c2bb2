//! DE-9IM intersection matrix.

use std::fmt;
use std::str::FromStr;

use crate::kernel::Location;

/// Dimension value meaning "no intersection" (rendered `F`).
pub const FALSE: i8 = -1;

/// 3×3 matrix of intersection dimensions indexed by
/// `[location in A][location in B]` over Interior/Boundary/Exterior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct IntersectionMatrix {
    cells: [[i8; 3]; 3],
}

impl Default for IntersectionMatrix {
    /// All `F` except Exterior×Exterior = 2.
    fn default() -> Self {
        let mut cells = [[FALSE; 3]; 3];
        cells[2][2] = 2;
        Self { cells }
    }
}

/// Errors parsing a 9-character DE-9IM string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixParseError {
    pub input: String,
}

impl fmt::Display for MatrixParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a 9-character DE-9IM string: {:?}", self.input)
    }
}

impl std::error::Error for MatrixParseError {}

fn dimension_char(d: i8) -> char {
    match d {
        0 => '0',
        1 => '1',
        2 => '2',
        _ => 'F',
    }
}

impl IntersectionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, a: Location, b: Location) -> i8 {
        self.cells[a.index()][b.index()]
    }

    #[inline]
    pub fn set(&mut self, a: Location, b: Location, dim: i8) {
        self.cells[a.index()][b.index()] = dim;
    }

    /// Raise the cell to `dim` if it is lower.
    #[inline]
    pub fn set_at_least(&mut self, a: Location, b: Location, dim: i8) {
        let cell = &mut self.cells[a.index()][b.index()];
        if *cell < dim {
            *cell = dim;
        }
    }

    /// `set_at_least` when both locations are known.
    #[inline]
    pub fn set_at_least_if_valid(&mut self, a: Option<Location>, b: Option<Location>, dim: i8) {
        if let (Some(a), Some(b)) = (a, b) {
            self.set_at_least(a, b, dim);
        }
    }

    /// Raise every cell to the matching entry of `bounds` (`FALSE` leaves
    /// a cell unchanged).
    pub fn set_at_least_cells(&mut self, bounds: &[[i8; 3]; 3]) {
        for (row, bound_row) in self.cells.iter_mut().zip(bounds) {
            for (cell, &d) in row.iter_mut().zip(bound_row) {
                if *cell < d {
                    *cell = d;
                }
            }
        }
    }

    /// Raise cells per a 9-character pattern of `F`, `0`, `1`, `2`, `*`
    /// (`F` and `*` leave a cell unchanged).
    pub fn set_at_least_pattern(&mut self, pattern: &str) -> Result<(), MatrixParseError> {
        let dims = parse_pattern(pattern)?;
        for (i, d) in dims.into_iter().enumerate() {
            if let Some(d) = d {
                let cell = &mut self.cells[i / 3][i % 3];
                if *cell < d {
                    *cell = d;
                }
            }
        }
        Ok(())
    }

    pub fn transpose(&self) -> Self {
        let mut cells = self.cells;
        for (i, row) in cells.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.cells[j][i];
            }
        }
        Self { cells }
    }

    /// Whether this matrix satisfies a pattern of `T`, `F`, `*`, `0`, `1`, `2`.
    pub fn matches(&self, pattern: &str) -> Result<bool, MatrixParseError> {
        let chars: Vec<char> = pattern.chars().collect();
        if chars.len() != 9 {
            return Err(MatrixParseError {
                input: pattern.to_string(),
            });
        }
        let mut ok = true;
        for (i, ch) in chars.into_iter().enumerate() {
            let d = self.cells[i / 3][i % 3];
            ok &= match ch.to_ascii_uppercase() {
                '*' => true,
                'T' => d >= 0,
                'F' => d == FALSE,
                '0' => d == 0,
                '1' => d == 1,
                '2' => d == 2,
                _ => {
                    return Err(MatrixParseError {
                        input: pattern.to_string(),
                    })
                }
            };
        }
        Ok(ok)
    }
}

/// Per-cell lower bounds; `None` leaves the cell alone.
fn parse_pattern(pattern: &str) -> Result<[Option<i8>; 9], MatrixParseError> {
    let err = || MatrixParseError {
        input: pattern.to_string(),
    };
    let chars: Vec<char> = pattern.chars().collect();
    if chars.len() != 9 {
        return Err(err());
    }
    let mut out = [None; 9];
    for (slot, ch) in out.iter_mut().zip(chars) {
        *slot = match ch.to_ascii_uppercase() {
            'F' | '*' => None,
            '0' => Some(0),
            '1' => Some(1),
            '2' => Some(2),
            _ => return Err(err()),
        };
    }
    Ok(out)
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &d in row {
                write!(f, "{}", dimension_char(d))?;
            }
        }
        Ok(())
    }
}

impl FromStr for IntersectionMatrix {
    type Err = MatrixParseError;

    /// Parse a 9-character string of `F`, `0`, `1`, `2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('*') {
            return Err(MatrixParseError { input: s.to_string() });
        }
        let dims = parse_pattern(s)?;
        let mut cells = [[FALSE; 3]; 3];
        for (i, d) in dims.into_iter().enumerate() {
            cells[i / 3][i % 3] = d.unwrap_or(FALSE);
        }
        Ok(Self { cells })
    }
}

impl TryFrom<String> for IntersectionMatrix {
    type Error = MatrixParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IntersectionMatrix> for String {
    fn from(m: IntersectionMatrix) -> Self {
        m.to_string()
    }
}
