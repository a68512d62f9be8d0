use drystack::{detect_contacts, summarize_contacts, Block, ContactRef, UnitSystem};

const UNIT: UnitSystem = UnitSystem::Centimeter;

fn cube(id: usize, min: [f64; 3]) -> Block {
    Block::from_extents(id, min, [min[0] + 1.0, min[1] + 1.0, min[2] + 1.0], UNIT).unwrap()
}

#[test]
fn stacked_cubes_single_xy_contact() {
    let blocks = vec![cube(0, [0.0, 0.0, 0.0]), cube(1, [0.0, 0.0, 1.0])];
    let contacts = detect_contacts(&blocks, UNIT.tolerance());

    assert_eq!(contacts[0][5], vec![ContactRef { block: 1, face: 4 }]);
    assert_eq!(contacts[1][4], vec![ContactRef { block: 0, face: 5 }]);
    for face in [0, 1, 2, 3, 4] {
        assert!(contacts[0][face].is_empty(), "face {face} of cube 0");
    }
    for face in [0, 1, 2, 3, 5] {
        assert!(contacts[1][face].is_empty(), "face {face} of cube 1");
    }
}

#[test]
fn side_by_side_cubes_single_yz_contact() {
    let blocks = vec![cube(0, [0.0, 0.0, 0.0]), cube(1, [1.0, 0.0, 0.0])];
    let contacts = detect_contacts(&blocks, UNIT.tolerance());

    assert_eq!(contacts[0][3], vec![ContactRef { block: 1, face: 1 }]);
    assert_eq!(contacts[1][1], vec![ContactRef { block: 0, face: 3 }]);
}

#[test]
fn isolated_cube_has_no_contacts() {
    let blocks = vec![cube(0, [0.0, 0.0, 0.0])];
    let contacts = detect_contacts(&blocks, UNIT.tolerance());
    assert!(contacts[0].iter().all(|list| list.is_empty()));
    assert_eq!(summarize_contacts(&contacts).total(), 0);
}

#[test]
fn separated_cubes_do_not_touch() {
    // A gap wider than the tolerance on every axis.
    let blocks = vec![cube(0, [0.0, 0.0, 0.0]), cube(1, [1.5, 0.0, 0.0])];
    let contacts = detect_contacts(&blocks, UNIT.tolerance());
    assert!(contacts.iter().flatten().all(|list| list.is_empty()));
}

#[test]
fn touching_edges_are_not_contacts() {
    // Diagonal neighbors share an edge, not an overlapping face area.
    let blocks = vec![cube(0, [0.0, 0.0, 0.0]), cube(1, [1.0, 0.0, 1.0])];
    let contacts = detect_contacts(&blocks, UNIT.tolerance());
    assert!(contacts.iter().flatten().all(|list| list.is_empty()));
}

#[test]
fn detection_is_symmetric() {
    let blocks = vec![
        cube(0, [0.0, 0.0, 0.0]),
        cube(1, [1.0, 0.0, 0.0]),
        cube(2, [0.0, 0.0, 1.0]),
    ];
    let contacts = detect_contacts(&blocks, UNIT.tolerance());

    for (ii, faces) in contacts.iter().enumerate() {
        for (pp, list) in faces.iter().enumerate() {
            for c in list {
                let mirror = ContactRef {
                    block: ii,
                    face: pp,
                };
                assert!(
                    contacts[c.block][c.face].contains(&mirror),
                    "contact ({ii},{pp}) -> ({},{}) has no mirror",
                    c.block,
                    c.face
                );
            }
        }
    }
}

#[test]
fn l_shape_summary_counts_each_pair_once() {
    let blocks = vec![
        cube(0, [0.0, 0.0, 0.0]),
        cube(1, [1.0, 0.0, 0.0]),
        cube(2, [0.0, 0.0, 1.0]),
    ];
    let contacts = detect_contacts(&blocks, UNIT.tolerance());
    let summary = summarize_contacts(&contacts);

    assert_eq!(summary.xy, 1);
    assert_eq!(summary.yz, 1);
    assert_eq!(summary.xz, 0);
    assert_eq!(summary.total(), 2);
}

#[test]
fn partial_overlap_is_detected() {
    // Running-bond arrangement: the upper block covers half of each support.
    let support = Block::from_extents(0, [0.0, 0.0, 0.0], [2.0, 1.0, 1.0], UNIT).unwrap();
    let upper = Block::from_extents(1, [1.0, 0.0, 1.0], [3.0, 1.0, 2.0], UNIT).unwrap();
    let contacts = detect_contacts(&[support, upper], UNIT.tolerance());

    assert_eq!(contacts[0][5], vec![ContactRef { block: 1, face: 4 }]);
    assert_eq!(contacts[1][4], vec![ContactRef { block: 0, face: 5 }]);
}
