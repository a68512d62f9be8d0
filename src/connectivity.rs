use std::collections::HashSet;

use serde::Serialize;

use crate::block::{Block, Face, FacePlane, NFACES};

/// Reference to the face of a neighboring block participating in a contact.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ContactRef {
    pub block: usize,
    pub face: usize,
}

/// Detected neighbors per face of one block, in detection order.
pub type BlockContacts = [Vec<ContactRef>; NFACES];

/// Decide whether two faces of the same orientation class touch.
///
/// Touching means coplanar on the normal axis and strictly overlapping on
/// both in-plane axes, all with a tolerance-sized slack.
fn faces_touch(plane: FacePlane, a: &Face, b: &Face, tol: f64) -> bool {
    let n = plane.normal_axis();
    if (a.center[n] - b.center[n]).abs() >= tol {
        return false;
    }
    for (k, &ax) in plane.in_plane_axes().iter().enumerate() {
        if (a.center[ax] - b.center[ax]).abs() - (a.size[k] + b.size[k]) * 0.5 >= -tol {
            return false;
        }
    }
    true
}

/// Find, for every face of every block, the neighboring faces it touches.
///
/// Each ordered (block, neighbor) pair is tested independently, so both
/// sides of a physical contact discover it from their own perspective; no
/// reciprocal insertion takes place. The plane classes are scanned in the
/// order xy, yz, xz, which fixes the insertion order of every downstream
/// interface list.
///
/// # Arguments
/// * `blocks` - All blocks of the assembly.
/// * `tol` - Shared coplanarity/overlap tolerance.
///
/// # Returns
/// Per block, per face, the neighbors in detection order (no dedup, no sort).
pub fn detect_contacts(blocks: &[Block], tol: f64) -> Vec<BlockContacts> {
    let mut contacts: Vec<BlockContacts> = blocks
        .iter()
        .map(|_| std::array::from_fn(|_| Vec::new()))
        .collect();

    for plane in [FacePlane::Xy, FacePlane::Yz, FacePlane::Xz] {
        let [fa, fb] = plane.faces();
        for ii in 0..blocks.len() {
            for mm in 0..blocks.len() {
                if mm == ii {
                    continue;
                }
                for (pp, tt) in [(fa, fb), (fb, fa)] {
                    if faces_touch(plane, &blocks[ii].faces[pp], &blocks[mm].faces[tt], tol) {
                        contacts[ii][pp].push(ContactRef {
                            block: mm,
                            face: tt,
                        });
                    }
                }
            }
        }
    }

    contacts
}

/// Contact interface counts grouped by plane class.
///
/// Every undirected physical contact counts once, even though detection
/// records it on both participating blocks.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ContactSummary {
    pub xy: usize,
    pub yz: usize,
    pub xz: usize,
}

impl ContactSummary {
    pub fn total(&self) -> usize {
        self.xy + self.yz + self.xz
    }

    pub fn print(&self) {
        println!("{} contact interfaces detected in XY plane", self.xy);
        println!("{} contact interfaces detected in XZ plane", self.xz);
        println!("{} contact interfaces detected in YZ plane", self.yz);
        println!("{} total contact interfaces detected", self.total());
    }
}

/// Count distinct undirected contacts per plane class.
pub fn summarize_contacts(contacts: &[BlockContacts]) -> ContactSummary {
    let mut seen = HashSet::new();
    let mut summary = ContactSummary::default();
    for (ii, faces) in contacts.iter().enumerate() {
        for (pp, list) in faces.iter().enumerate() {
            for c in list {
                let key = if (ii, pp) < (c.block, c.face) {
                    (ii, pp, c.block, c.face)
                } else {
                    (c.block, c.face, ii, pp)
                };
                if seen.insert(key) {
                    match FacePlane::of_face(pp) {
                        FacePlane::Xy => summary.xy += 1,
                        FacePlane::Yz => summary.yz += 1,
                        FacePlane::Xz => summary.xz += 1,
                    }
                }
            }
        }
    }
    summary
}
