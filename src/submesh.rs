//! Per-block structured hexahedral sub-mesh.

use crate::block::Block;
use crate::interfaces::BlockInterfaces;

/// The conforming Cartesian grid of one block.
///
/// `points` holds the full product of the distinct coordinate planes in
/// ascending (z, y, x) order with x varying fastest. `cells` partitions the
/// grid into axis-aligned sub-hexahedra; each entry lists 8 point indices
/// in the fixed corner order expected by the brick-element export (the
/// cell's lower face first, then the face at the next z plane).
#[derive(Clone, Debug)]
pub struct BlockGrid {
    pub block: usize,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub zs: Vec<f64>,
    pub points: Vec<[f64; 3]>,
    pub cells: Vec<[usize; 8]>,
}

impl BlockGrid {
    pub fn npoints(&self) -> usize {
        self.points.len()
    }

    pub fn ncells(&self) -> usize {
        self.cells.len()
    }
}

/// Build the structured grid implied by a block's vertices and interfaces.
///
/// Every coordinate appearing in an interface corner contributes a cutting
/// plane on its axis; the two opposite extreme vertices contribute the
/// per-axis bounds. Duplicate values collapse by exact equality; every
/// coordinate was rounded at intake.
pub fn build_grid(block: &Block, interfaces: &BlockInterfaces) -> BlockGrid {
    let mut axes: [Vec<f64>; 3] = Default::default();
    for list in interfaces {
        for interface in list {
            for corner in &interface.corners {
                for k in 0..3 {
                    axes[k].push(corner[k]);
                }
            }
        }
    }
    for v in [block.vertices[0], block.vertices[6]] {
        for k in 0..3 {
            axes[k].push(v[k]);
        }
    }
    for vals in &mut axes {
        vals.sort_by(|a, b| a.partial_cmp(b).expect("rounded coordinates are finite"));
        vals.dedup();
    }
    let [xs, ys, zs] = axes;
    let (nx, ny, nz) = (xs.len(), ys.len(), zs.len());

    let mut points = Vec::with_capacity(nx * ny * nz);
    for &z in &zs {
        for &y in &ys {
            for &x in &xs {
                points.push([x, y, z]);
            }
        }
    }

    // Row-major walk over the (nx-1)(ny-1)(nz-1) cells. With base point
    // index b, the lower face is [b+nx, b, b+1, b+nx+1] and the upper face
    // sits one z layer (nx*ny points) above.
    let nxy = nx * ny;
    let mut cells = Vec::with_capacity((nx - 1) * (ny - 1) * (nz - 1));
    for cz in 0..nz - 1 {
        for cy in 0..ny - 1 {
            for cx in 0..nx - 1 {
                let b = (cz * ny + cy) * nx + cx;
                cells.push([
                    b + nx,
                    b,
                    b + 1,
                    b + nx + 1,
                    b + nxy + nx,
                    b + nxy,
                    b + nxy + 1,
                    b + nxy + nx + 1,
                ]);
            }
        }
    }

    BlockGrid {
        block: block.id,
        xs,
        ys,
        zs,
        points,
        cells,
    }
}
