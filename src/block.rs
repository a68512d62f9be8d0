use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Number of faces on a rectangular block.
pub const NFACES: usize = 6;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("unrecognized unit of measure `{0}` (expected mm, cm or m)")]
    UnknownUnit(String),
    #[error("the assembly contains no blocks")]
    EmptyAssembly,
    #[error("block {0} is not an axis-aligned box")]
    NotAxisAligned(usize),
    #[error("block {block} has {count} detected contacts, configured limit is {limit}")]
    ContactLimitExceeded {
        block: usize,
        count: usize,
        limit: usize,
    },
}

/// Measurement unit of the source model. The unit fixes the decimal
/// precision every coordinate is rounded to and the tolerance used by all
/// downstream comparisons.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum UnitSystem {
    Millimeter,
    Centimeter,
    Meter,
}

impl UnitSystem {
    /// Decimal digits kept after rounding.
    pub fn decimals(self) -> i32 {
        match self {
            UnitSystem::Millimeter => 1,
            UnitSystem::Centimeter => 2,
            UnitSystem::Meter => 4,
        }
    }

    /// Tolerance for coplanarity, overlap and point-merging tests.
    pub fn tolerance(self) -> f64 {
        10f64.powi(-self.decimals())
    }

    /// Round to the configured precision. Adding 0.0 folds -0.0 into 0.0 so
    /// rounded coordinates compare and print consistently.
    pub fn round(self, v: f64) -> f64 {
        let scale = 10f64.powi(self.decimals());
        (v * scale).round() / scale + 0.0
    }
}

impl FromStr for UnitSystem {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(UnitSystem::Millimeter),
            "cm" => Ok(UnitSystem::Centimeter),
            "m" => Ok(UnitSystem::Meter),
            other => Err(GeometryError::UnknownUnit(other.to_string())),
        }
    }
}

/// Orientation class of a block face.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum FacePlane {
    /// Normal along y (faces 0 and 2).
    Xz,
    /// Normal along x (faces 1 and 3).
    Yz,
    /// Normal along z (faces 4 and 5).
    Xy,
}

impl FacePlane {
    /// Orientation class of face index 0..=5.
    pub fn of_face(face: usize) -> Self {
        match face {
            0 | 2 => FacePlane::Xz,
            1 | 3 => FacePlane::Yz,
            _ => FacePlane::Xy,
        }
    }

    /// Coordinate axis perpendicular to the face.
    pub fn normal_axis(self) -> usize {
        match self {
            FacePlane::Xz => 1,
            FacePlane::Yz => 0,
            FacePlane::Xy => 2,
        }
    }

    /// The two axes spanning the face, in ascending axis order. Face sizes
    /// are stored along these axes.
    pub fn in_plane_axes(self) -> [usize; 2] {
        match self {
            FacePlane::Xz => [0, 2],
            FacePlane::Yz => [1, 2],
            FacePlane::Xy => [0, 1],
        }
    }

    /// The opposing face index pair carrying this orientation.
    pub fn faces(self) -> [usize; 2] {
        match self {
            FacePlane::Xz => [0, 2],
            FacePlane::Yz => [1, 3],
            FacePlane::Xy => [4, 5],
        }
    }
}

/// One planar boundary of a block.
///
/// The center coordinate on the normal axis locates the face plane; the two
/// sizes span the face along [`FacePlane::in_plane_axes`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Face {
    pub center: [f64; 3],
    pub size: [f64; 2],
}

/// Vertex loops of the six faces, as indices into the sorted vertex array.
/// Bottom ring is 0-1-2-3, top ring 4-5-6-7.
const FACE_LOOPS: [[usize; 4]; NFACES] = [
    [0, 1, 5, 4], // 0: y-min
    [0, 3, 7, 4], // 1: x-min
    [3, 2, 6, 7], // 2: y-max
    [1, 2, 6, 5], // 3: x-max
    [0, 1, 2, 3], // 4: z-min (base)
    [4, 5, 6, 7], // 5: z-max (top)
];

/// One axis-aligned rectangular solid of the wall.
///
/// Face indexing contract: 0/2 form the xz-plane pair (y-min/y-max), 1/3 the
/// yz-plane pair (x-min/x-max), 4/5 the xy-plane pair (base/top). Vertices
/// are stored in the fixed order produced by [`Block::from_vertices`]:
/// sorted by (z, y, x), then positions (2,3) and (6,7) swapped so indices
/// 0-1-2-3 and 4-5-6-7 trace the bottom and top face polygons. Vertex 0 is
/// the minimum corner and vertex 6 the maximum corner.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Block {
    pub id: usize,
    pub faces: [Face; NFACES],
    pub vertices: [[f64; 3]; 8],
    pub volume: f64,
    pub centroid: [f64; 3],
}

impl Block {
    /// Build a block from the 8 corner points measured by the CAD intake,
    /// in any order.
    ///
    /// Coordinates are rounded to the unit precision before validation. The
    /// rounded corners must form an axis-aligned box with positive extent on
    /// every axis, otherwise [`GeometryError::NotAxisAligned`] is returned.
    pub fn from_vertices(
        id: usize,
        corners: [[f64; 3]; 8],
        unit: UnitSystem,
    ) -> Result<Self, GeometryError> {
        let mut verts = corners;
        for v in &mut verts {
            for c in v.iter_mut() {
                *c = unit.round(*c);
            }
        }

        let xs = distinct_sorted(verts.map(|v| v[0]));
        let ys = distinct_sorted(verts.map(|v| v[1]));
        let zs = distinct_sorted(verts.map(|v| v[2]));
        if xs.len() != 2 || ys.len() != 2 || zs.len() != 2 {
            return Err(GeometryError::NotAxisAligned(id));
        }
        for &x in &xs {
            for &y in &ys {
                for &z in &zs {
                    if !verts.contains(&[x, y, z]) {
                        return Err(GeometryError::NotAxisAligned(id));
                    }
                }
            }
        }

        verts.sort_by(|a, b| {
            (a[2], a[1], a[0])
                .partial_cmp(&(b[2], b[1], b[0]))
                .expect("rounded coordinates are finite")
        });
        verts.swap(2, 3);
        verts.swap(6, 7);

        let (min, max) = (verts[0], verts[6]);
        let mid = [
            unit.round((min[0] + max[0]) * 0.5),
            unit.round((min[1] + max[1]) * 0.5),
            unit.round((min[2] + max[2]) * 0.5),
        ];
        let dx = unit.round(max[0] - min[0]);
        let dy = unit.round(max[1] - min[1]);
        let dz = unit.round(max[2] - min[2]);

        let faces = [
            Face {
                center: [mid[0], min[1], mid[2]],
                size: [dx, dz],
            },
            Face {
                center: [min[0], mid[1], mid[2]],
                size: [dy, dz],
            },
            Face {
                center: [mid[0], max[1], mid[2]],
                size: [dx, dz],
            },
            Face {
                center: [max[0], mid[1], mid[2]],
                size: [dy, dz],
            },
            Face {
                center: [mid[0], mid[1], min[2]],
                size: [dx, dy],
            },
            Face {
                center: [mid[0], mid[1], max[2]],
                size: [dx, dy],
            },
        ];

        Ok(Self {
            id,
            faces,
            vertices: verts,
            volume: dx * dy * dz,
            centroid: mid,
        })
    }

    /// Convenience constructor from the two opposite extreme corners.
    pub fn from_extents(
        id: usize,
        min: [f64; 3],
        max: [f64; 3],
        unit: UnitSystem,
    ) -> Result<Self, GeometryError> {
        let mut corners = [[0.0; 3]; 8];
        let mut n = 0;
        for &z in &[min[2], max[2]] {
            for &y in &[min[1], max[1]] {
                for &x in &[min[0], max[0]] {
                    corners[n] = [x, y, z];
                    n += 1;
                }
            }
        }
        Self::from_vertices(id, corners, unit)
    }

    /// Axis-aligned bounding box as (min, max) corners.
    pub fn bounds(&self) -> ([f64; 3], [f64; 3]) {
        (self.vertices[0], self.vertices[6])
    }

    /// The 4 corner points of a face, traced as a polygon loop. This is the
    /// native corner order neighbors copy when an interface is extracted.
    pub fn face_polygon(&self, face: usize) -> [[f64; 3]; 4] {
        FACE_LOOPS[face].map(|v| self.vertices[v])
    }
}

fn distinct_sorted(mut vals: [f64; 8]) -> Vec<f64> {
    vals.sort_by(|a, b| a.partial_cmp(b).expect("rounded coordinates are finite"));
    let mut out = vals.to_vec();
    out.dedup();
    out
}
