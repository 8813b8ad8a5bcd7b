//! Hex coordinate system for the terrain grid (axial coordinates)
//!
//! Axial (q, r) with cube-coordinate support; s is always derived from
//! the q + r + s = 0 invariant, never stored.

use serde::{Deserialize, Serialize};

/// Axial hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

/// Canonical direction offsets, indexed 0..=5
///
/// The ordering is load-bearing: ring walks, direction indices, and saved
/// headings all assume this table.
const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

impl HexCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance in grid steps
    pub fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    pub fn add(&self, other: Self) -> Self {
        Self::new(self.q + other.q, self.r + other.r)
    }

    pub fn subtract(&self, other: Self) -> Self {
        Self::new(self.q - other.q, self.r - other.r)
    }

    pub fn scale(&self, factor: i32) -> Self {
        Self::new(self.q * factor, self.r * factor)
    }

    /// Get all 6 neighboring hex coordinates, in canonical direction order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        let mut out = [*self; 6];
        for (i, (dq, dr)) in DIRECTIONS.iter().enumerate() {
            out[i] = HexCoord::new(self.q + dq, self.r + dr);
        }
        out
    }

    /// Get neighbor in a specific direction (0..=5, wraps)
    pub fn neighbor(&self, direction: usize) -> HexCoord {
        let (dq, dr) = DIRECTIONS[direction % 6];
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// All hexes within `radius` (inclusive); 3r(r+1)+1 results
    pub fn range(&self, radius: u32) -> Vec<HexCoord> {
        let radius = radius as i32;
        let mut results = Vec::new();
        for q in -radius..=radius {
            for r in (-radius).max(-q - radius)..=radius.min(-q + radius) {
                results.push(HexCoord::new(self.q + q, self.r + r));
            }
        }
        results
    }

    /// Hexes at exactly `radius` distance; 6r results, or just the center
    /// for radius 0
    pub fn ring(&self, radius: u32) -> Vec<HexCoord> {
        if radius == 0 {
            return vec![*self];
        }

        let mut results = Vec::with_capacity(6 * radius as usize);
        let mut hex = self.add(HexCoord::new(-(radius as i32), radius as i32));

        for direction in 0..6 {
            for _ in 0..radius {
                results.push(hex);
                hex = hex.neighbor(direction);
            }
        }
        results
    }

    /// Rings 0..=radius concatenated, center first
    pub fn spiral(&self, radius: u32) -> Vec<HexCoord> {
        let mut results = vec![*self];
        for k in 1..=radius {
            results.extend(self.ring(k));
        }
        results
    }

    /// Interpolate between two hexes in cube space
    pub fn lerp(a: Self, b: Self, t: f32) -> (f32, f32, f32) {
        let q = a.q as f32 * (1.0 - t) + b.q as f32 * t;
        let r = a.r as f32 * (1.0 - t) + b.r as f32 * t;
        let s = a.s() as f32 * (1.0 - t) + b.s() as f32 * t;
        (q, r, s)
    }

    /// Round fractional cube coordinates to the nearest hex
    ///
    /// The component with the largest rounding error is recomputed from the
    /// other two. Tie-break order is q, then r, else s; boundary points snap
    /// according to this order and callers depend on it staying fixed.
    pub fn round(q: f32, r: f32, s: f32) -> Self {
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }

    /// Hex coordinates in a line from self to other (inclusive)
    pub fn line_to(&self, other: &Self) -> Vec<HexCoord> {
        let n = self.distance(other);
        if n == 0 {
            return vec![*self];
        }

        let mut results = Vec::with_capacity(n as usize + 1);
        for i in 0..=n {
            let t = i as f32 / n as f32;
            let (q, r, s) = Self::lerp(*self, *other, t);
            results.push(Self::round(q, r, s));
        }
        results
    }

    /// Convert to offset coordinates for display collaborators
    pub fn to_offset(&self, kind: OffsetKind) -> (i32, i32) {
        match kind {
            OffsetKind::OddR => (self.q + (self.r + (self.r & 1)) / 2, self.r),
            OffsetKind::EvenR => (self.q + (self.r - (self.r & 1)) / 2, self.r),
            OffsetKind::OddQ => (self.q, self.r + (self.q + (self.q & 1)) / 2),
            OffsetKind::EvenQ => (self.q, self.r + (self.q - (self.q & 1)) / 2),
        }
    }

    /// Create from offset coordinates
    pub fn from_offset(col: i32, row: i32, kind: OffsetKind) -> Self {
        match kind {
            OffsetKind::OddR => Self::new(col - (row + (row & 1)) / 2, row),
            OffsetKind::EvenR => Self::new(col - (row - (row & 1)) / 2, row),
            OffsetKind::OddQ => Self::new(col, row - (col + (col & 1)) / 2),
            OffsetKind::EvenQ => Self::new(col, row - (col - (col & 1)) / 2),
        }
    }
}

/// Offset-coordinate flavor used by grid-display collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetKind {
    OddR,
    EvenR,
    OddQ,
    EvenQ,
}

/// Grid orientation for pixel projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HexOrientation {
    #[default]
    Pointy,
    Flat,
}

/// Projection between hex coordinates and world pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    pub orientation: HexOrientation,
    /// Center-to-corner size in pixels
    pub size: f32,
}

impl HexLayout {
    pub fn new(orientation: HexOrientation, size: f32) -> Self {
        Self { orientation, size }
    }

    /// Hex center in world pixels
    pub fn to_pixel(&self, hex: HexCoord) -> glam::Vec2 {
        let sqrt3 = 3.0_f32.sqrt();
        let q = hex.q as f32;
        let r = hex.r as f32;

        match self.orientation {
            HexOrientation::Pointy => glam::Vec2::new(
                self.size * (sqrt3 * q + sqrt3 / 2.0 * r),
                self.size * (1.5 * r),
            ),
            HexOrientation::Flat => glam::Vec2::new(
                self.size * (1.5 * q),
                self.size * (sqrt3 / 2.0 * q + sqrt3 * r),
            ),
        }
    }

    /// Nearest hex to a world pixel position
    pub fn to_hex(&self, point: glam::Vec2) -> HexCoord {
        let sqrt3 = 3.0_f32.sqrt();

        let (q, r) = match self.orientation {
            HexOrientation::Pointy => (
                (sqrt3 / 3.0 * point.x - 1.0 / 3.0 * point.y) / self.size,
                (2.0 / 3.0 * point.y) / self.size,
            ),
            HexOrientation::Flat => (
                (2.0 / 3.0 * point.x) / self.size,
                (-1.0 / 3.0 * point.x + sqrt3 / 3.0 * point.y) / self.size,
            ),
        };

        HexCoord::round(q, r, -q - r)
    }
}
