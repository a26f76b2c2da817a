use super::UNBOUNDED;

/// Lower/upper bounds of an attribute, parameter, or association end.
///
/// An upper bound of `-1` in the source is stored as [`UNBOUNDED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Multiplicity {
    pub lower: i64,
    pub upper: i64,
}

impl Multiplicity {
    /// Default for attributes.
    pub const ONE: Self = Self { lower: 1, upper: 1 };

    /// Default for association ends and everything else.
    pub const MANY: Self = Self {
        lower: 0,
        upper: UNBOUNDED,
    };

    /// Build from raw bounds, mapping an upper bound of `-1` to the sentinel.
    pub fn new(lower: i64, upper: i64) -> Self {
        let upper = if upper == -1 { UNBOUNDED } else { upper };
        Self { lower, upper }
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper == UNBOUNDED
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self::MANY
    }
}
