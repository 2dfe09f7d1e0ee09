/// A catalog entry: a caller-assigned identifier and a position in 3D space.
///
/// Identifiers are carried through untouched and need not be unique.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub id: u64,
    pub coords: [f64; 3],
}

impl Point {
    pub fn new(id: u64, x: f64, y: f64, z: f64) -> Self {
        Self { id, coords: [x, y, z] }
    }

    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    pub fn z(&self) -> f64 {
        self.coords[2]
    }

    /// Squared Euclidean distance to `query`.
    #[inline]
    pub fn distance_squared(&self, query: &[f64; 3]) -> f64 {
        distance_squared(&self.coords, query)
    }
}

impl From<(u64, [f64; 3])> for Point {
    fn from((id, coords): (u64, [f64; 3])) -> Self {
        Self { id, coords }
    }
}

#[inline]
pub fn distance_squared(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Squared distance between `a` and `b` measured along a single axis, i.e. the squared
/// distance from `b` to the axis-aligned plane through `a`.
#[inline]
pub fn axis_distance_squared(a: &[f64; 3], b: &[f64; 3], axis: usize) -> f64 {
    let d = a[axis] - b[axis];
    d * d
}
