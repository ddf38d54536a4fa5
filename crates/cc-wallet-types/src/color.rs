use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a color, the colored-coin asset that a coin's value is denominated in.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ColorId(u32);

impl ColorId {
    /// The color of plain, uncolored value.
    pub const UNCOLORED: Self = Self(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_uncolored(self) -> bool {
        self.0 == Self::UNCOLORED.0
    }
}

impl From<u32> for ColorId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The dominant color of a coin, along with the amount of that color it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorValue {
    pub color_id: ColorId,
    pub value: u64,
}

impl ColorValue {
    pub const fn new(color_id: ColorId, value: u64) -> Self {
        Self { color_id, value }
    }

    pub const fn uncolored(value: u64) -> Self {
        Self::new(ColorId::UNCOLORED, value)
    }

    pub const fn color_id(&self) -> ColorId {
        self.color_id
    }

    pub const fn value(&self) -> u64 {
        self.value
    }

    pub const fn is_uncolored(&self) -> bool {
        self.color_id.is_uncolored()
    }
}
