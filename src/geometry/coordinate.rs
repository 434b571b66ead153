use super::Dimensions;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    #[inline]
    pub fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }

    /// Converts the coordinate into a linear index for a row-major buffer
    /// of the given dimensions.
    #[inline]
    pub fn into_index(self, dimensions: Dimensions) -> usize {
        self.y as usize * dimensions.width as usize + self.x as usize
    }
}
