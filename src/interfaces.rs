//! Extraction of contact interface polygons from detected contacts.

use serde::Serialize;

use crate::block::{Block, NFACES};
use crate::connectivity::{BlockContacts, ContactRef};

/// Face index of the base (z-min) face.
pub const BASE_FACE: usize = 4;

/// Where an interface polygon came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum InterfaceSource {
    /// Copied from the matching face of a neighboring block.
    Neighbor(ContactRef),
    /// Synthesized from the block's own ground-level vertices.
    Base,
}

/// An ordered 4-point rectangle lying on one face of its host block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interface {
    pub corners: [[f64; 3]; 4],
    pub source: InterfaceSource,
}

/// Interfaces per face of one block, in contact-detection order.
pub type BlockInterfaces = [Vec<Interface>; NFACES];

/// Build every block's interface polygons.
///
/// The shared-boundary rule: the interface geometry is always the
/// *neighbor's* face polygon in its native corner order, clamped to the
/// host block's bounding box so oversized neighbor faces never extend past
/// the host. Ground-level blocks additionally get one base interface on
/// face 4, which occupies the first slot of that face's list and is exempt
/// from clamping.
pub fn extract_interfaces(
    blocks: &[Block],
    contacts: &[BlockContacts],
    tol: f64,
) -> Vec<BlockInterfaces> {
    blocks
        .iter()
        .enumerate()
        .map(|(ii, block)| {
            let (min, max) = block.bounds();
            let mut faces: BlockInterfaces = std::array::from_fn(|_| Vec::new());
            for (jj, list) in contacts[ii].iter().enumerate() {
                for &nbr in list {
                    let mut corners = blocks[nbr.block].face_polygon(nbr.face);
                    for corner in &mut corners {
                        clamp_to_bounds(corner, min, max, tol);
                    }
                    faces[jj].push(Interface {
                        corners,
                        source: InterfaceSource::Neighbor(nbr),
                    });
                }
            }
            if let Some(base) = base_interface(block) {
                faces[BASE_FACE].insert(0, base);
            }
            faces
        })
        .collect()
}

/// Snap coordinates that exceed the box by more than `tol` onto the box.
fn clamp_to_bounds(p: &mut [f64; 3], min: [f64; 3], max: [f64; 3], tol: f64) {
    for k in 0..3 {
        if p[k] - max[k] > tol {
            p[k] = max[k];
        }
        if p[k] - min[k] < -tol {
            p[k] = min[k];
        }
    }
}

/// Ground-level blocks contribute one interface built from their vertices
/// at z = 0 exactly (after rounding). A valid block has 0 or 4 of them.
fn base_interface(block: &Block) -> Option<Interface> {
    let ground: Vec<[f64; 3]> = block
        .vertices
        .iter()
        .copied()
        .filter(|v| v[2] == 0.0)
        .collect();
    if ground.len() != 4 {
        return None;
    }
    Some(Interface {
        corners: [ground[0], ground[1], ground[2], ground[3]],
        source: InterfaceSource::Base,
    })
}
