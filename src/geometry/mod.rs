use serde::Serialize;

/// Integer size measured in terminal character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Region corners anchored within the terminal grid.
///
/// Both corners are inclusive: `x1` is the last column the region covers and
/// `y1` the last row. Hosts with overlapping borders share the edge cell
/// between neighbours, so two adjacent bounds may have `a.x1 == b.x0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Bounds {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Bounds {
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Bounds covering a whole screen of the given size.
    ///
    /// Returns `None` for an empty size, which has no last row or column.
    pub fn from_size(size: Size) -> Option<Self> {
        if size.is_empty() {
            return None;
        }
        Some(Self::new(0, 0, size.width - 1, size.height - 1))
    }

    pub fn width(&self) -> u32 {
        u32::from(self.x1.saturating_sub(self.x0)) + 1
    }

    pub fn height(&self) -> u32 {
        u32::from(self.y1.saturating_sub(self.y0)) + 1
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})-({},{})", self.x0, self.y0, self.x1, self.y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_size_uses_inclusive_corners() {
        let bounds = Bounds::from_size(Size::new(80, 25)).unwrap();
        assert_eq!(bounds, Bounds::new(0, 0, 79, 24));
        assert_eq!(bounds.width(), 80);
        assert_eq!(bounds.height(), 25);
    }

    #[test]
    fn from_empty_size_has_no_bounds() {
        assert!(Bounds::from_size(Size::new(0, 25)).is_none());
        assert!(Bounds::from_size(Size::new(80, 0)).is_none());
    }

    #[test]
    fn single_cell_bounds() {
        let bounds = Bounds::new(3, 4, 3, 4);
        assert_eq!(bounds.width(), 1);
        assert_eq!(bounds.height(), 1);
        assert!(bounds.contains(3, 4));
        assert!(!bounds.contains(4, 4));
    }

    #[test]
    fn display_matches_corner_notation() {
        assert_eq!(Bounds::new(0, 8, 79, 15).to_string(), "(0,8)-(79,15)");
    }
}
