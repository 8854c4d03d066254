use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A dimension that may not be known until data is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dim {
    Known(usize),
    Unknown,
}

impl Dim {
    pub fn value(self) -> Option<usize> {
        match self {
            Dim::Known(x) => Some(x),
            Dim::Unknown => None,
        }
    }
    pub fn is_known(self) -> bool {
        matches!(self, Dim::Known(_))
    }
    /// Unifies two dimensions. Returns `Err((lhs, rhs))` when both are known
    /// and differ.
    pub fn merge(self, other: Dim) -> Result<Dim, (usize, usize)> {
        match (self, other) {
            (Dim::Known(a), Dim::Known(b)) if a != b => Err((a, b)),
            (Dim::Known(a), _) => Ok(Dim::Known(a)),
            (Dim::Unknown, b) => Ok(b),
        }
    }
}

impl From<usize> for Dim {
    fn from(value: usize) -> Self {
        Dim::Known(value)
    }
}

impl Display for Dim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dim::Known(x) => Display::fmt(x, f),
            Dim::Unknown => f.write_str("?"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape(Vec<Dim>);

impl Shape {
    pub fn new(dims: Vec<Dim>) -> Self {
        Self(dims)
    }
    pub fn known(dims: &[usize]) -> Self {
        Self(dims.iter().copied().map(Dim::Known).collect())
    }
    pub fn matrix(rows: Dim, cols: Dim) -> Self {
        Self(vec![rows, cols])
    }
    pub fn unknown_matrix() -> Self {
        Self(vec![Dim::Unknown, Dim::Unknown])
    }
    pub fn rank(&self) -> usize {
        self.0.len()
    }
    pub fn dim(&self, i: usize) -> Dim {
        self.0[i]
    }
    pub fn dims(&self) -> &[Dim] {
        &self.0
    }
    /// Concrete sizes, if every dimension is known.
    pub fn to_concrete(&self) -> Option<Vec<usize>> {
        self.0.iter().map(|d| d.value()).collect()
    }
}

impl Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            Display::fmt(d, f)?;
        }
        f.write_str("]")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseShapeError {
    pub token: String,
}

impl Display for ParseShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid dimension `{}`", self.token)
    }
}

impl std::error::Error for ParseShapeError {}

/// Accepts `2,3`, `2x3`, `[2, ?]` and the empty string for rank 0.
impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('[').unwrap_or(s);
        let s = s.strip_suffix(']').unwrap_or(s);
        if s.trim().is_empty() {
            return Ok(Shape(Vec::new()));
        }
        let mut dims = Vec::new();
        for token in s.split([',', 'x']) {
            let token = token.trim();
            let dim = match token {
                "?" | "-1" => Dim::Unknown,
                _ => token.parse::<usize>().map(Dim::Known).map_err(|_| ParseShapeError {
                    token: token.to_string(),
                })?,
            };
            dims.push(dim);
        }
        Ok(Shape(dims))
    }
}

#[test]
fn dim_merge() {
    assert_eq!(Dim::Known(3).merge(Dim::Known(3)), Ok(Dim::Known(3)));
    assert_eq!(Dim::Known(3).merge(Dim::Known(4)), Err((3, 4)));
    assert_eq!(Dim::Known(3).merge(Dim::Unknown), Ok(Dim::Known(3)));
    assert_eq!(Dim::Unknown.merge(Dim::Known(7)), Ok(Dim::Known(7)));
    assert_eq!(Dim::Unknown.merge(Dim::Unknown), Ok(Dim::Unknown));
}

#[test]
fn shape_parse_and_display() {
    let shape: Shape = "2, ?".parse().unwrap();
    assert_eq!(shape, Shape::matrix(Dim::Known(2), Dim::Unknown));
    assert_eq!(shape.to_string(), "[2, ?]");
    assert_eq!("5x10".parse::<Shape>().unwrap(), Shape::known(&[5, 10]));
    assert_eq!("[4,-1,2]".parse::<Shape>().unwrap().rank(), 3);
    assert_eq!("".parse::<Shape>().unwrap().rank(), 0);
    assert!("2,a".parse::<Shape>().is_err());
    assert_eq!(shape.to_concrete(), None);
    assert_eq!(Shape::known(&[1, 2]).to_concrete(), Some(vec![1, 2]));
}
