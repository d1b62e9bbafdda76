//! Geometry helpers.

/// A point on the grid.
pub struct Point {
    x: i32,
    y: i32,
}

pub struct Marker;

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self) -> i32 {
        if self.x < 0 {
            return -self.x; // "return" again
        }
        self.x + self.y
    }

    pub fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
    }
}

pub trait Area {
    fn area(&self) -> i32;
}

/* struct Hidden { } */
const LABEL: &str = "struct Fake {}";
