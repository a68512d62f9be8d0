//! Identity assignment for interface corner points.

use crate::block::{Block, NFACES};
use crate::interfaces::BlockInterfaces;

/// Vertex binding tolerates 100x more deviation along y than along x and z.
/// The asymmetry is a tie-break the downstream formats were calibrated
/// against; it is isolated here so it can be corrected independently.
pub const VERTEX_BIND_Y_SLACK: f64 = 100.0;

/// Corner identities per face of one block, parallel to its interfaces.
pub type BlockPointIds = [Vec<[usize; 4]>; NFACES];

/// Assign a block-scoped integer identity to every interface corner.
///
/// Identities 1..=8 are reserved for the block's own vertices in their
/// fixed order. Corners that do not bind to a vertex draw fresh identities
/// from a single counter shared by all blocks, starting at 9, so every
/// distinct new point carries a process-wide-unique tag. A final merge pass
/// unifies coincident corners of the same block: corners are visited in
/// (face, interface, corner) order and a later corner takes the identity of
/// the earliest coincident corner outside its own interface.
///
/// # Arguments
/// * `blocks` - Block array providing the vertex coordinates.
/// * `interfaces` - Interface polygons per block, from
///   [`crate::interfaces::extract_interfaces`].
/// * `tol` - Coordinate coincidence tolerance.
///
/// # Returns
/// Per-corner identities and the final value of the identity counter. The
/// counter counts every fresh identity ever handed out; identities retired
/// by the merge pass leave gaps.
pub fn assign_point_indices(
    blocks: &[Block],
    interfaces: &[BlockInterfaces],
    tol: f64,
) -> (Vec<BlockPointIds>, usize) {
    let mut ids: Vec<BlockPointIds> = interfaces
        .iter()
        .map(|faces| std::array::from_fn(|jj| vec![[0usize; 4]; faces[jj].len()]))
        .collect();

    // Bind corners that sit on a block vertex. The scan deliberately keeps
    // going after a hit: with the loose y band two vertices can both match,
    // and the later one wins.
    for (ii, faces) in interfaces.iter().enumerate() {
        for (jj, list) in faces.iter().enumerate() {
            for (kk, interface) in list.iter().enumerate() {
                for (pp, corner) in interface.corners.iter().enumerate() {
                    for (ff, vertex) in blocks[ii].vertices.iter().enumerate() {
                        if (corner[0] - vertex[0]).abs() < tol
                            && (corner[1] - vertex[1]).abs() < VERTEX_BIND_Y_SLACK * tol
                            && (corner[2] - vertex[2]).abs() < tol
                        {
                            ids[ii][jj][kk][pp] = ff + 1;
                        }
                    }
                }
            }
        }
    }

    // Hand out fresh identities to everything still unbound.
    let mut num_points = 8usize;
    for (ii, faces) in interfaces.iter().enumerate() {
        for jj in 0..NFACES {
            for kk in 0..faces[jj].len() {
                for pp in 0..4 {
                    if ids[ii][jj][kk][pp] == 0 {
                        num_points += 1;
                        ids[ii][jj][kk][pp] = num_points;
                    }
                }
            }
        }
    }

    // Merge coincident corners within each block, earliest corner wins.
    for (ii, faces) in interfaces.iter().enumerate() {
        let mut seen: Vec<(usize, usize, [f64; 3], usize)> = Vec::new();
        for (jj, list) in faces.iter().enumerate() {
            for (kk, interface) in list.iter().enumerate() {
                for (pp, corner) in interface.corners.iter().enumerate() {
                    let hit = seen.iter().find(|&&(f, k, c, _)| {
                        (f, k) != (jj, kk)
                            && (c[0] - corner[0]).abs() < tol
                            && (c[1] - corner[1]).abs() < tol
                            && (c[2] - corner[2]).abs() < tol
                    });
                    if let Some(&(_, _, _, id)) = hit {
                        ids[ii][jj][kk][pp] = id;
                    }
                    seen.push((jj, kk, *corner, ids[ii][jj][kk][pp]));
                }
            }
        }
    }

    (ids, num_points)
}
