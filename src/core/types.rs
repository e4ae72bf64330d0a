//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Battlefield distance in inches
pub type Inches = f64;

/// 2D battlefield position, in inches
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: Inches,
    pub y: Inches,
}

impl Vec2 {
    pub fn new(x: Inches, y: Inches) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> Inches {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> Inches {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}
