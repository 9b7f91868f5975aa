//! Points and polygon quads in the remote viewport.

use serde::{Deserialize, Serialize};

/// A point from the viewport origin (0, 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Polygon vertices as the remote side emits them: a flat coordinate
/// list, grouped in pairs, in emission order. The polygon may be
/// non-convex. A well-formed quad has an even number of coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quad(pub Vec<f64>);

impl Quad {
    /// Number of vertices (coordinate count / 2).
    pub fn len(&self) -> usize {
        self.0.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vertices in stored order, pairing coordinates `(2i, 2i+1)`.
    ///
    /// Re-iterating re-derives the sequence from the stored data.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.chunks_exact(2).map(|pair| Point {
            x: pair[0],
            y: pair[1],
        })
    }

    /// Arithmetic mean of the vertices, or `None` for a quad with no
    /// complete vertex (the mean would divide by zero).
    pub fn center(&self) -> Option<Point> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        let (mut x, mut y) = (0.0, 0.0);
        for pt in self.vertices() {
            x += pt.x;
            y += pt.y;
        }
        Some(Point {
            x: x / n as f64,
            y: y / n as f64,
        })
    }
}
