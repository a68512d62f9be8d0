use std::fs::File;
use std::io::{BufWriter, Write};

use crate::block::NFACES;
use crate::model::WallModel;

/// Material constants baked into the generated analysis scripts.
pub const BLOCK_ELASTIC_MODULUS: f64 = 2_100_000_000.0;
pub const BLOCK_POISSON_RATIO: f64 = 0.3;
pub const BLOCK_DENSITY: f64 = 0.0;
pub const SPRING_STIFFNESS: f64 = 262_500_000.0;

const BRICK_MATERIAL_TAG: usize = 1;
const SPRING_MATERIAL_TAG: usize = 3;

/// Format a number the way the downstream tools expect: integral values
/// keep one decimal digit.
fn fmt(v: f64) -> String {
    if v == v.trunc() {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

fn triple(p: [f64; 3]) -> String {
    format!("{},{},{}", fmt(p[0]), fmt(p[1]), fmt(p[2]))
}

/// Write the tab-delimited discrete-element table.
///
/// Header: `&Count &Name &BASE &C`, one `&CONTACT_i` column per contact
/// slot up to the largest per-block total, `&POINT_1` through
/// `&POINT_(2*NumPoints-1)`, then `&VOLUME`. One row per block: constant 1,
/// the synthetic type name, constant 4, the centroid, the comma-joined
/// identity 4-tuple of each interface (blank where the block has fewer
/// contacts than the widest block), the coordinate triple of every identity
/// the block references (blank where unused), and the volume.
pub fn write_liablock(path: &str, model: &WallModel) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    write!(w, "&Count\t&Name\t&BASE\t&C\t")?;
    for i in 1..=model.max_contacts {
        write!(w, "&CONTACT_{i}\t")?;
    }
    for i in 1..2 * model.num_points {
        write!(w, "&POINT_{i}\t")?;
    }
    writeln!(w, "&VOLUME")?;

    for (ii, block) in model.blocks.iter().enumerate() {
        write!(w, "1\t&BLOCK_TYPE_{}\t&4\t&{}\t", block.id, triple(block.centroid))?;

        let mut cells = Vec::new();
        for jj in 0..NFACES {
            for ids in &model.point_ids[ii][jj] {
                cells.push(format!("{}, {}, {}, {}", ids[0], ids[1], ids[2], ids[3]));
            }
        }
        for jj in 0..model.max_contacts {
            match cells.get(jj) {
                Some(cell) => write!(w, "&{cell}\t")?,
                None => write!(w, "\t")?,
            }
        }

        // Coordinates by identity: 1..=8 are the vertices, higher
        // identities are the block's own interface points.
        let mut coords: Vec<Option<[f64; 3]>> = vec![None; 2 * model.num_points];
        for (ff, vertex) in block.vertices.iter().enumerate() {
            coords[ff + 1] = Some(*vertex);
        }
        for jj in 0..NFACES {
            for (kk, interface) in model.interfaces[ii][jj].iter().enumerate() {
                for (pp, corner) in interface.corners.iter().enumerate() {
                    let id = model.point_ids[ii][jj][kk][pp];
                    if id > 8 {
                        coords[id] = Some(*corner);
                    }
                }
            }
        }
        for cell in coords.iter().skip(1) {
            match cell {
                Some(p) => write!(w, "&{}\t", triple(*p))?,
                None => write!(w, "\t")?,
            }
        }

        writeln!(w, "&{}", fmt(block.volume))?;
    }

    Ok(())
}

/// Write the structured-mesh script for the continuum analysis.
///
/// Emits every node, the two fixed material definitions, one brick element
/// per grid cell (tags continuing after the node count), fixities for every
/// base-level node, one equal-DOF constraint per resolved merge pair, one
/// zero-length spring element per corner-contact dependent, and the
/// trailing metadata (block count, node count, per-block vertex node ids).
pub fn write_opensees(path: &str, model: &WallModel) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    write!(
        w,
        "import openseespy.opensees as ops\n\nops.wipe()\n\nops.model('basic', '-ndm', 3, '-ndf', 3)\n\n"
    )?;
    write!(w, "## Definition of the geometry\n\n# Create nodes\n#\t\t tag\tX\tY\tZ\n")?;
    for node in &model.nodes {
        writeln!(
            w,
            "ops.node({},{},{},{})",
            node.id,
            fmt(node.coord[0]),
            fmt(node.coord[1]),
            fmt(node.coord[2])
        )?;
    }

    write!(w, "\n# Material Definition\n")?;
    writeln!(
        w,
        "ops.nDMaterial(\"ElasticIsotropic3D\", {BRICK_MATERIAL_TAG}, {}, {}, {})",
        fmt(BLOCK_ELASTIC_MODULUS),
        fmt(BLOCK_POISSON_RATIO),
        fmt(BLOCK_DENSITY)
    )?;
    writeln!(
        w,
        "ops.uniaxialMaterial(\"Elastic\",{SPRING_MATERIAL_TAG}, {})",
        fmt(SPRING_STIFFNESS)
    )?;

    write!(
        w,
        "\n# Create Standard Brick Elements\n#Element\ttag\tnode1\tnode2\tnode3\tnode4\tnode5\tnode6\tnode7\tnode8\tmatTag\n"
    )?;
    let mut tag = model.nodes.len();
    let mut node_id = 1usize;
    for grid in &model.grids {
        for _ in 0..grid.ncells() {
            tag += 1;
            write!(w, "ops.element(\"stdBrick\",{tag},")?;
            for _ in 0..8 {
                write!(w, "{node_id},")?;
                node_id += 1;
            }
            writeln!(w, "{BRICK_MATERIAL_TAG})")?;
        }
    }

    write!(w, "\n# Constraints Definition\n")?;
    for node in &model.nodes {
        if node.coord[2] == 0.0 {
            writeln!(w, "ops.fix({},1,1,1)", node.id)?;
        }
    }
    for merge in &model.merges {
        writeln!(w, "ops.equalDOF({},{},1,2,3)", merge.master, merge.slave)?;
    }

    write!(w, "\n\n# ZeroLength Elements definition\n")?;
    for group in &model.corner_groups {
        for &dep in &group.dependents {
            tag += 1;
            writeln!(
                w,
                "ops.element(\"zeroLength\",{tag},{},{dep},'-mat',{SPRING_MATERIAL_TAG},'-dir',1,2,3)",
                group.master
            )?;
        }
    }

    write!(w, "\nprint (\"Geometric model built\")\n\n")?;
    write!(w, "\n\nN_blocks={}", model.blocks.len())?;
    write!(w, "\nNumNodes={}", model.nodes.len())?;
    write!(w, "\nIndVertex=[")?;
    for (ii, ids) in model.vertex_node_ids.iter().enumerate() {
        write!(w, "[")?;
        for id in ids {
            write!(w, "{id},")?;
        }
        if ii + 1 == model.vertex_node_ids.len() {
            write!(w, "]")?;
        } else {
            write!(w, "],")?;
        }
    }
    write!(w, "]")?;

    Ok(())
}

/// Write the 3DEC 5.2 geometry file: one `poly brick` per block from its
/// two opposite extreme vertices.
pub fn write_threedec(path: &str, model: &WallModel) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "new")?;
    for block in &model.blocks {
        let (lo, hi) = block.bounds();
        writeln!(
            w,
            "poly brick\t{},{}\t{},{}\t{},{}",
            fmt(lo[0]),
            fmt(hi[0]),
            fmt(lo[1]),
            fmt(hi[1]),
            fmt(lo[2]),
            fmt(hi[2])
        )?;
    }
    write!(w, "plot create plot Blocks\nplot block")?;
    Ok(())
}

/// Write the detection results as pretty-printed JSON.
pub fn write_contact_report(path: &str, model: &WallModel) -> std::io::Result<()> {
    let w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(w, &model.contact_report())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}
