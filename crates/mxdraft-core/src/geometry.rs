//! Geometry attached to cells.
//!
//! Vertices and containers carry absolute [`Bounds`]. Edges only carry the
//! relative marker; their routing is left to the consuming tool.

/// Position and size of a vertex.
///
/// For cells nested in a container the position is relative to the
/// container's origin. The engine stores the values as given.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns `true` when all four values are finite numbers.
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|value| value.is_finite())
    }

    /// Returns `true` when no value is negative.
    pub fn is_non_negative(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|value| *value >= 0.0)
    }
}

/// Geometry of a single cell, rendered as its `mxGeometry` child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Vertex geometry with position and size.
    Absolute(Bounds),
    /// Edge geometry: only the `relative="1"` marker, no position or size.
    Relative,
}

impl Geometry {
    /// Returns the bounds of an absolute geometry.
    pub fn bounds(&self) -> Option<&Bounds> {
        match self {
            Self::Absolute(bounds) => Some(bounds),
            Self::Relative => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_accessors() {
        let bounds = Bounds::new(80.0, 120.0, 30.0, 36.0);

        assert_eq!(bounds.x(), 80.0);
        assert_eq!(bounds.y(), 120.0);
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 36.0);
    }

    #[test]
    fn test_bounds_checks() {
        assert!(Bounds::new(0.0, 0.0, 30.0, 30.0).is_finite());
        assert!(Bounds::new(0.0, 0.0, 30.0, 30.0).is_non_negative());

        assert!(!Bounds::new(f64::NAN, 0.0, 30.0, 30.0).is_finite());
        assert!(!Bounds::new(0.0, 0.0, f64::INFINITY, 30.0).is_finite());
        assert!(!Bounds::new(-1.0, 0.0, 30.0, 30.0).is_non_negative());
    }

    #[test]
    fn test_geometry_bounds() {
        let bounds = Bounds::new(1.0, 2.0, 3.0, 4.0);

        assert_eq!(Geometry::Absolute(bounds).bounds(), Some(&bounds));
        assert_eq!(Geometry::Relative.bounds(), None);
    }
}
