use std::fmt;

/// Identifies an indirect object by number and generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    number: u32,
    generation: u16,
}

impl ObjectId {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }

    /// Build an id from the decimal text of a `<n> <g> R` match.
    pub fn from_digits(number: &str, generation: &str) -> Option<Self> {
        Some(Self::new(number.parse().ok()?, generation.parse().ok()?))
    }

    /// The `<n> <g> obj` line that opens this object's definition.
    pub fn header(&self) -> String {
        format!("{} {} obj", self.number, self.generation)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}
