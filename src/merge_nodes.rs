//! Global node emission, duplicate-node merging and corner contacts.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::block::Block;
use crate::submesh::BlockGrid;

/// One emitted mesh node. Nodes are emitted per cell corner, 8 per cell, so
/// positions shared by adjacent cells appear more than once; unifying them
/// is the merge pass's job, not the emitter's.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeshNode {
    /// 1-based global id, sequential in emission order.
    pub id: usize,
    pub block: usize,
    pub coord: [f64; 3],
}

/// Two coincident nodes of one block unified by constraint.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NodeMerge {
    pub master: usize,
    pub slave: usize,
}

/// Nodes of two or more blocks meeting at a shared block corner, joined by
/// zero-length spring elements from the master to each dependent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CornerContact {
    pub master: usize,
    pub dependents: Vec<usize>,
}

fn quantize(p: [f64; 3], tol: f64) -> (i64, i64, i64) {
    (
        (p[0] / tol).round() as i64,
        (p[1] / tol).round() as i64,
        (p[2] / tol).round() as i64,
    )
}

/// Emit every cell corner of every grid as a mesh node, in block order.
///
/// # Returns
/// The node list and each block's inclusive (first, last) id range.
pub fn emit_nodes(grids: &[BlockGrid]) -> (Vec<MeshNode>, Vec<(usize, usize)>) {
    let mut nodes = Vec::new();
    let mut ranges = Vec::with_capacity(grids.len());
    for grid in grids {
        let start = nodes.len() + 1;
        for cell in &grid.cells {
            for &idx in cell {
                nodes.push(MeshNode {
                    id: nodes.len() + 1,
                    block: grid.block,
                    coord: grid.points[idx],
                });
            }
        }
        ranges.push((start, nodes.len()));
    }
    (nodes, ranges)
}

/// Pair up coincident nodes inside each block's id range.
///
/// Base-level nodes (z = 0) stay independent; they are fixed by the export
/// instead. Every coincident pair is recorded exactly once with
/// master < slave, ordered by (master, slave) within each block.
pub fn merge_duplicate_nodes(
    nodes: &[MeshNode],
    ranges: &[(usize, usize)],
    tol: f64,
) -> Vec<NodeMerge> {
    let mut merges = Vec::new();
    for &(start, end) in ranges {
        let mut groups: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
        for id in start..=end {
            let node = &nodes[id - 1];
            if node.coord[2] != 0.0 {
                groups.entry(quantize(node.coord, tol)).or_default().push(id);
            }
        }
        let mut pairs = Vec::new();
        for ids in groups.values() {
            for (i, &master) in ids.iter().enumerate() {
                for &slave in &ids[i + 1..] {
                    pairs.push(NodeMerge { master, slave });
                }
            }
        }
        pairs.sort_by_key(|m| (m.master, m.slave));
        merges.extend(pairs);
    }
    merges
}

/// Find the block corners shared by two or more blocks.
///
/// Vertices compare exactly (after rounding), not by tolerance. Each shared
/// coordinate is resolved once, on first discovery in (block, vertex,
/// neighbor, vertex) scan order; the group collects every emitted node at
/// that coordinate in emission order, the first being the master.
pub fn corner_contacts(blocks: &[Block], nodes: &[MeshNode], tol: f64) -> Vec<CornerContact> {
    let mut by_coord: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
    for node in nodes {
        by_coord
            .entry(quantize(node.coord, tol))
            .or_default()
            .push(node.id);
    }

    let mut seen: HashSet<(i64, i64, i64)> = HashSet::new();
    let mut contacts = Vec::new();
    for (ii, a) in blocks.iter().enumerate() {
        for va in &a.vertices {
            for (nn, b) in blocks.iter().enumerate() {
                if nn == ii {
                    continue;
                }
                for vb in &b.vertices {
                    if va != vb {
                        continue;
                    }
                    let key = quantize(*va, tol);
                    if !seen.insert(key) {
                        continue;
                    }
                    let ids = &by_coord[&key];
                    contacts.push(CornerContact {
                        master: ids[0],
                        dependents: ids[1..].to_vec(),
                    });
                }
            }
        }
    }
    contacts
}
