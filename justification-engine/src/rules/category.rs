use std::fmt;

/// Consequence-of-failure grade, `A` (worst) to `E` (best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CofCategory {
    A,
    B,
    C,
    D,
    E,
}

impl CofCategory {
    pub const ALL: [CofCategory; 5] = [
        CofCategory::A,
        CofCategory::B,
        CofCategory::C,
        CofCategory::D,
        CofCategory::E,
    ];

    /// Severity rank, 1 for `A` through 5 for `E`; lower is worse.
    pub fn rank(self) -> u8 {
        match self {
            CofCategory::A => 1,
            CofCategory::B => 2,
            CofCategory::C => 3,
            CofCategory::D => 4,
            CofCategory::E => 5,
        }
    }

    /// Recognizes exactly one of the five grade letters (surrounding blanks ignored).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A" => Some(CofCategory::A),
            "B" => Some(CofCategory::B),
            "C" => Some(CofCategory::C),
            "D" => Some(CofCategory::D),
            "E" => Some(CofCategory::E),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CofCategory::A => "A",
            CofCategory::B => "B",
            CofCategory::C => "C",
            CofCategory::D => "D",
            CofCategory::E => "E",
        }
    }
}

impl fmt::Display for CofCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
