//! Facelet geometry
//!
//! Every facelet is located by two integer vectors: the position of its
//! cubie (each component in -1..=1) and the outward normal of the face it
//! sits on. `x` points toward R, `y` toward U and `z` toward F.
//!
//! Face moves, whole-cube rotations and orientation tracking all reduce to
//! quarter-turn rotations of these two vectors.

use super::Face;

/// Integer vector in cube space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec3 {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Vec3 {
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    pub const fn dot(self, other: Vec3) -> i8 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub const fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub const fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub const fn scale(self, k: i8) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }
}

/// Rotation axis of the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Through R and L
    X,
    /// Through U and D
    Y,
    /// Through F and B
    Z,
}

impl Axis {
    /// Unit vector along the positive end of the axis
    pub const fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::new(1, 0, 0),
            Axis::Y => Vec3::new(0, 1, 0),
            Axis::Z => Vec3::new(0, 0, 1),
        }
    }

    /// One clockwise quarter turn, as seen looking at the positive end
    pub const fn quarter(self, v: Vec3) -> Vec3 {
        match self {
            Axis::X => Vec3::new(v.x, v.z, -v.y),
            Axis::Y => Vec3::new(-v.z, v.y, v.x),
            Axis::Z => Vec3::new(v.y, -v.x, v.z),
        }
    }

    /// `quarters` clockwise quarter turns (taken modulo 4)
    pub fn rotate(self, v: Vec3, quarters: u8) -> Vec3 {
        (0..quarters % 4).fold(v, |v, _| self.quarter(v))
    }
}

impl Face {
    /// Outward unit normal
    pub const fn normal(self) -> Vec3 {
        match self {
            Face::Up => Vec3::new(0, 1, 0),
            Face::Down => Vec3::new(0, -1, 0),
            Face::Right => Vec3::new(1, 0, 0),
            Face::Left => Vec3::new(-1, 0, 0),
            Face::Front => Vec3::new(0, 0, 1),
            Face::Back => Vec3::new(0, 0, -1),
        }
    }

    /// Face whose normal is `n`
    pub fn from_normal(n: Vec3) -> Option<Face> {
        Face::ALL.into_iter().find(|f| f.normal() == n)
    }

    /// Axis through this face and whether the normal points along its
    /// positive end
    pub const fn axis(self) -> (Axis, bool) {
        match self {
            Face::Right => (Axis::X, true),
            Face::Left => (Axis::X, false),
            Face::Up => (Axis::Y, true),
            Face::Down => (Axis::Y, false),
            Face::Front => (Axis::Z, true),
            Face::Back => (Axis::Z, false),
        }
    }

    /// Direction of increasing column on the face's net
    const fn net_right(self) -> Vec3 {
        match self {
            Face::Up | Face::Front | Face::Down => Vec3::new(1, 0, 0),
            Face::Right => Vec3::new(0, 0, -1),
            Face::Back => Vec3::new(-1, 0, 0),
            Face::Left => Vec3::new(0, 0, 1),
        }
    }

    /// Direction of increasing row on the face's net
    const fn net_down(self) -> Vec3 {
        match self {
            Face::Up => Vec3::new(0, 0, 1),
            Face::Down => Vec3::new(0, 0, -1),
            Face::Front | Face::Right | Face::Back | Face::Left => Vec3::new(0, -1, 0),
        }
    }
}

/// Cubie position of facelet `index` on `face`
pub fn facelet_position(face: Face, index: u8) -> Vec3 {
    let row = (index / 3) as i8 - 1;
    let col = (index % 3) as i8 - 1;
    face.normal()
        .add(face.net_right().scale(col))
        .add(face.net_down().scale(row))
}

/// Inverse of [`facelet_position`]
///
/// Returns `None` when `normal` is not a face normal or `position` does not
/// lie on that face.
pub fn locate_facelet(normal: Vec3, position: Vec3) -> Option<(Face, u8)> {
    let face = Face::from_normal(normal)?;
    let offset = position.sub(normal);
    if offset.dot(normal) != 0 {
        return None;
    }
    let col = offset.dot(face.net_right()) + 1;
    let row = offset.dot(face.net_down()) + 1;
    if !(0..=2).contains(&col) || !(0..=2).contains(&row) {
        return None;
    }
    Some((face, (row * 3 + col) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turns_follow_right_hand_views() {
        // U clockwise sends F to L
        assert_eq!(Axis::Y.quarter(Face::Front.normal()), Face::Left.normal());
        // R clockwise sends F to U
        assert_eq!(Axis::X.quarter(Face::Front.normal()), Face::Up.normal());
        // F clockwise sends U to R
        assert_eq!(Axis::Z.quarter(Face::Up.normal()), Face::Right.normal());
    }

    #[test]
    fn test_four_quarters_is_identity() {
        let v = Vec3::new(1, -1, 0);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_eq!(axis.rotate(v, 4), v);
            assert_eq!(axis.rotate(axis.rotate(v, 1), 3), v);
        }
    }

    #[test]
    fn test_locate_inverts_position() {
        for face in Face::ALL {
            for index in 0..9 {
                let p = facelet_position(face, index);
                assert_eq!(locate_facelet(face.normal(), p), Some((face, index)));
            }
        }
    }

    #[test]
    fn test_shared_corner_positions() {
        // U8, F2 and R0 all sit on the up-front-right corner cubie
        let urf = Vec3::new(1, 1, 1);
        assert_eq!(facelet_position(Face::Up, 8), urf);
        assert_eq!(facelet_position(Face::Front, 2), urf);
        assert_eq!(facelet_position(Face::Right, 0), urf);
        // D0 sits under F6
        assert_eq!(facelet_position(Face::Down, 0), facelet_position(Face::Front, 6));
    }

    #[test]
    fn test_locate_rejects_off_face_points() {
        assert_eq!(locate_facelet(Vec3::new(0, 1, 0), Vec3::new(0, 0, 0)), None);
        assert_eq!(locate_facelet(Vec3::new(1, 1, 0), Vec3::new(1, 1, 0)), None);
    }
}
