//! Hex board geometry with cube coordinates

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Default board radius (distance from center to the outermost ring)
pub const BOARD_RADIUS: i32 = 8;

/// Cube hex coordinates (q + r + s == 0)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Hex {
    /// Board center
    pub const ORIGIN: Hex = Hex { q: 0, r: 0, s: 0 };

    /// Panics if the triple is not a valid cube coordinate.
    pub fn new(q: i32, r: i32, s: i32) -> Self {
        assert!(q + r + s == 0, "invalid cube coordinate ({q}, {r}, {s})");
        Self { q, r, s }
    }

    /// Build from axial coordinates, deriving s
    pub const fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub fn add(self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r, self.s + other.s)
    }

    pub fn scale(self, k: i32) -> Hex {
        Hex::new(self.q * k, self.r * k, self.s * k)
    }

    /// Distance between two hexes
    pub fn distance(self, other: Hex) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s - other.s).abs();
        (dq + dr + ds) / 2
    }

    /// Distance from center (0,0,0)
    pub fn distance_to_center(self) -> i32 {
        self.distance(Hex::ORIGIN)
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(self, direction: usize) -> Hex {
        self + DIRECTIONS[direction % 6]
    }

    /// All six neighbors, in `DIRECTIONS` order
    pub fn neighbors(self) -> [Hex; 6] {
        DIRECTIONS.map(|d| self + d)
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex::add(self, rhs)
    }
}

impl Mul<i32> for Hex {
    type Output = Hex;

    fn mul(self, rhs: i32) -> Hex {
        self.scale(rhs)
    }
}

/// Direction vectors in cube coordinates
/// Index: 0=N, 1=NE, 2=SE, 3=S, 4=SW, 5=NW
pub const DIRECTIONS: [Hex; 6] = [
    Hex::axial(0, -1),  // N
    Hex::axial(1, -1),  // NE
    Hex::axial(1, 0),   // SE
    Hex::axial(0, 1),   // S
    Hex::axial(-1, 1),  // SW
    Hex::axial(-1, 0),  // NW
];

/// Direction index pointing the opposite way
pub fn opposite_direction(direction: usize) -> usize {
    (direction + 3) % 6
}

// ============================================================================
// RINGS AND LINES
// ============================================================================

/// All hexes at exactly `radius` steps from `center`.
///
/// Radius 0 yields just the center and a negative radius yields nothing.
/// Otherwise the 6·radius tiles are produced by walking the six straight edges
/// of the ring, starting from the corner reached by going `radius` steps in
/// direction 4 (SW).
pub fn ring(center: Hex, radius: i32) -> Vec<Hex> {
    if radius < 0 {
        return Vec::new();
    }
    if radius == 0 {
        return vec![center];
    }

    let mut hexes = Vec::with_capacity(6 * radius as usize);
    let mut current = center + DIRECTIONS[4] * radius;
    for dir in DIRECTIONS {
        for _ in 0..radius {
            hexes.push(current);
            current = current + dir;
        }
    }
    hexes
}

/// Rings for every radius in the half-open range `[start, end)`
pub fn rings(center: Hex, start: i32, end: i32) -> Vec<Hex> {
    (start..end).flat_map(|radius| ring(center, radius)).collect()
}

/// The straight hex line from `a` to `b`, both endpoints included.
pub fn line_between(a: Hex, b: Hex) -> Vec<Hex> {
    let n = a.distance(b);
    if n == 0 {
        return vec![b];
    }

    // Nudge off exact midpoints so ties round consistently
    let (aq, ar, as_) = (a.q as f64 + 1e-6, a.r as f64 + 1e-6, a.s as f64 - 2e-6);
    let (bq, br, bs) = (b.q as f64 + 1e-6, b.r as f64 + 1e-6, b.s as f64 - 2e-6);

    let mut line: Vec<Hex> = (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            cube_round(lerp(aq, bq, t), lerp(ar, br, t), lerp(as_, bs, t))
        })
        .collect();

    // Guard against floating point drift on the final point
    if let Some(last) = line.last_mut() {
        *last = b;
    }
    line
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Round fractional cube coordinates to the nearest valid hex.
///
/// The axis with the largest rounding error is recomputed from the other two.
fn cube_round(q: f64, r: f64, s: f64) -> Hex {
    let mut rq = q.round();
    let mut rr = r.round();
    let mut rs = s.round();

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    } else {
        rs = -rq - rr;
    }

    Hex::new(rq as i32, rr as i32, rs as i32)
}
