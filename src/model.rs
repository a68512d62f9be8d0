//! Pipeline orchestration: blocks in, wall model out.

use serde::Serialize;

use crate::block::{Block, GeometryError, UnitSystem};
use crate::connectivity::{detect_contacts, summarize_contacts, BlockContacts, ContactSummary};
use crate::interfaces::{extract_interfaces, BlockInterfaces};
use crate::merge_nodes::{
    corner_contacts, emit_nodes, merge_duplicate_nodes, CornerContact, MeshNode, NodeMerge,
};
use crate::point_index::{assign_point_indices, BlockPointIds};
use crate::submesh::{build_grid, BlockGrid};

/// Pipeline configuration.
#[derive(Copy, Clone, Debug)]
pub struct ModelOptions {
    pub unit: UnitSystem,
    /// Upper bound on detected contacts per block. `None` means unlimited;
    /// when set, exceeding it is a reported error, never silent truncation.
    pub max_contacts_per_block: Option<usize>,
}

impl ModelOptions {
    pub fn new(unit: UnitSystem) -> Self {
        Self {
            unit,
            max_contacts_per_block: None,
        }
    }
}

/// Every product of the pipeline, from detected contacts down to the merged
/// global node set. Writers serialize this into the analysis inputs.
pub struct WallModel {
    pub unit: UnitSystem,
    pub blocks: Vec<Block>,
    pub contacts: Vec<BlockContacts>,
    pub summary: ContactSummary,
    pub interfaces: Vec<BlockInterfaces>,
    pub point_ids: Vec<BlockPointIds>,
    /// Final value of the point-identity counter (highest identity ever
    /// assigned; merged duplicates leave gaps).
    pub num_points: usize,
    /// Largest total interface count over any single block; sizes the
    /// contact columns of the discrete-element table.
    pub max_contacts: usize,
    pub grids: Vec<BlockGrid>,
    pub nodes: Vec<MeshNode>,
    /// Inclusive (first, last) node id range per block.
    pub block_node_ranges: Vec<(usize, usize)>,
    pub merges: Vec<NodeMerge>,
    pub corner_groups: Vec<CornerContact>,
    /// Global node id of each block vertex, in vertex order.
    pub vertex_node_ids: Vec<[usize; 8]>,
}

/// Machine-readable view of the detection results.
#[derive(Serialize)]
pub struct ContactReport<'a> {
    pub summary: ContactSummary,
    pub contacts: &'a [BlockContacts],
}

impl WallModel {
    pub fn contact_report(&self) -> ContactReport<'_> {
        ContactReport {
            summary: self.summary,
            contacts: &self.contacts,
        }
    }
}

/// Run the full geometry-to-mesh pipeline.
///
/// Stages run strictly in order, each fully materializing its output:
/// contact detection, interface extraction, point indexing, per-block grid
/// construction, node emission, duplicate merging and corner-contact
/// resolution.
pub fn build_model(blocks: Vec<Block>, options: ModelOptions) -> Result<WallModel, GeometryError> {
    if blocks.is_empty() {
        return Err(GeometryError::EmptyAssembly);
    }
    let tol = options.unit.tolerance();

    let contacts = detect_contacts(&blocks, tol);
    if let Some(limit) = options.max_contacts_per_block {
        for (ii, faces) in contacts.iter().enumerate() {
            let count: usize = faces.iter().map(|list| list.len()).sum();
            if count > limit {
                return Err(GeometryError::ContactLimitExceeded {
                    block: ii,
                    count,
                    limit,
                });
            }
        }
    }
    let summary = summarize_contacts(&contacts);

    let interfaces = extract_interfaces(&blocks, &contacts, tol);
    let (point_ids, num_points) = assign_point_indices(&blocks, &interfaces, tol);
    let max_contacts = interfaces
        .iter()
        .map(|faces| faces.iter().map(|list| list.len()).sum::<usize>())
        .max()
        .unwrap_or(0);

    let grids: Vec<BlockGrid> = blocks
        .iter()
        .zip(&interfaces)
        .map(|(block, ifs)| build_grid(block, ifs))
        .collect();
    let (nodes, block_node_ranges) = emit_nodes(&grids);
    let merges = merge_duplicate_nodes(&nodes, &block_node_ranges, tol);
    let corner_groups = corner_contacts(&blocks, &nodes, tol);
    let vertex_node_ids = vertex_node_table(&blocks, &nodes, &block_node_ranges);

    Ok(WallModel {
        unit: options.unit,
        blocks,
        contacts,
        summary,
        interfaces,
        point_ids,
        num_points,
        max_contacts,
        grids,
        nodes,
        block_node_ranges,
        merges,
        corner_groups,
        vertex_node_ids,
    })
}

/// Locate each block vertex among the block's emitted nodes. Every vertex
/// is covered by exactly one cell corner, so the first match is the match.
fn vertex_node_table(
    blocks: &[Block],
    nodes: &[MeshNode],
    ranges: &[(usize, usize)],
) -> Vec<[usize; 8]> {
    blocks
        .iter()
        .zip(ranges)
        .map(|(block, &(start, end))| {
            std::array::from_fn(|pp| {
                nodes[start - 1..end]
                    .iter()
                    .find(|n| n.coord == block.vertices[pp])
                    .map(|n| n.id)
                    .unwrap_or(0)
            })
        })
        .collect()
}
