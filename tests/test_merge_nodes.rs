use std::collections::HashMap;

use drystack::{build_model, Block, ModelOptions, NodeMerge, UnitSystem};

const UNIT: UnitSystem = UnitSystem::Centimeter;

fn cube(id: usize, min: [f64; 3]) -> Block {
    Block::from_extents(id, min, [min[0] + 1.0, min[1] + 1.0, min[2] + 1.0], UNIT).unwrap()
}

fn support_fixture() -> Vec<Block> {
    vec![
        Block::from_extents(0, [0.0, 0.0, 0.0], [2.0, 1.0, 1.0], UNIT).unwrap(),
        cube(1, [0.0, 0.0, 1.0]),
        cube(2, [1.0, 0.0, 1.0]),
    ]
}

#[test]
fn nodes_are_emitted_per_cell_in_block_order() {
    let blocks = vec![cube(0, [0.0, 0.0, 0.0]), cube(1, [0.0, 0.0, 1.0])];
    let model = build_model(blocks, ModelOptions::new(UNIT)).unwrap();

    assert_eq!(model.nodes.len(), 16);
    assert_eq!(model.block_node_ranges, vec![(1, 8), (9, 16)]);
    // First cell of cube 0, fixed corner order.
    let coords: Vec<[f64; 3]> = model.nodes[..8].iter().map(|n| n.coord).collect();
    assert_eq!(
        coords,
        vec![
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
        ]
    );
}

#[test]
fn single_cell_blocks_need_no_equal_dof() {
    let blocks = vec![cube(0, [0.0, 0.0, 0.0]), cube(1, [0.0, 0.0, 1.0])];
    let model = build_model(blocks, ModelOptions::new(UNIT)).unwrap();
    assert!(model.merges.is_empty());
}

#[test]
fn stacked_cubes_form_four_corner_groups() {
    let blocks = vec![cube(0, [0.0, 0.0, 0.0]), cube(1, [0.0, 0.0, 1.0])];
    let model = build_model(blocks, ModelOptions::new(UNIT)).unwrap();

    assert_eq!(model.corner_groups.len(), 4);
    for group in &model.corner_groups {
        assert_eq!(group.dependents.len(), 1);
    }
    // Discovery follows cube 0's vertex order across its top ring.
    let masters: Vec<usize> = model.corner_groups.iter().map(|g| g.master).collect();
    assert_eq!(masters, vec![6, 7, 8, 5]);
    let dependents: Vec<usize> = model
        .corner_groups
        .iter()
        .map(|g| g.dependents[0])
        .collect();
    assert_eq!(dependents, vec![10, 11, 12, 9]);
}

#[test]
fn duplicates_within_a_block_merge_pairwise() {
    let model = build_model(support_fixture(), ModelOptions::new(UNIT)).unwrap();

    // The slab splits into two cells sharing the plane x = 1; the two
    // shared positions above the base level merge, the two on it do not.
    assert_eq!(
        model.merges,
        vec![
            NodeMerge {
                master: 7,
                slave: 14
            },
            NodeMerge {
                master: 8,
                slave: 13
            },
        ]
    );
}

#[test]
fn base_level_duplicates_stay_unmerged() {
    let model = build_model(support_fixture(), ModelOptions::new(UNIT)).unwrap();
    for merge in &model.merges {
        assert_ne!(model.nodes[merge.master - 1].coord[2], 0.0);
        assert_ne!(model.nodes[merge.slave - 1].coord[2], 0.0);
    }
}

#[test]
fn no_coincident_nonbase_nodes_left_unmerged() {
    let model = build_model(support_fixture(), ModelOptions::new(UNIT)).unwrap();

    for &(start, end) in &model.block_node_ranges {
        let mut groups: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
        for id in start..=end {
            let c = model.nodes[id - 1].coord;
            if c[2] != 0.0 {
                let key = (
                    (c[0] * 100.0).round() as i64,
                    (c[1] * 100.0).round() as i64,
                    (c[2] * 100.0).round() as i64,
                );
                groups.entry(key).or_default().push(id);
            }
        }
        for ids in groups.values() {
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    assert!(
                        model
                            .merges
                            .contains(&NodeMerge { master: a, slave: b }),
                        "nodes {a} and {b} coincide but never merged"
                    );
                }
            }
        }
    }
}

#[test]
fn shared_corner_collects_every_node_at_its_coordinate() {
    let model = build_model(support_fixture(), ModelOptions::new(UNIT)).unwrap();

    assert_eq!(model.corner_groups.len(), 8);
    // The corner at (1,0,1) belongs to the slab (twice, once per cell) and
    // to both cubes.
    let group = model
        .corner_groups
        .iter()
        .find(|g| model.nodes[g.master - 1].coord == [1.0, 0.0, 1.0])
        .expect("no group at (1,0,1)");
    assert_eq!(group.master, 7);
    assert_eq!(group.dependents, vec![14, 19, 26]);
}

#[test]
fn masters_precede_their_dependents() {
    let model = build_model(support_fixture(), ModelOptions::new(UNIT)).unwrap();
    for merge in &model.merges {
        assert!(merge.master < merge.slave);
    }
    for group in &model.corner_groups {
        for &dep in &group.dependents {
            assert!(group.master < dep);
        }
    }
}
