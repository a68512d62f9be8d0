pub mod block;
pub mod connectivity;
pub mod interfaces;
pub mod merge_nodes;
pub mod model;
pub mod point_index;
pub mod submesh;
pub mod write;

pub use block::{Block, Face, FacePlane, GeometryError, UnitSystem};
pub use connectivity::{
    detect_contacts, summarize_contacts, BlockContacts, ContactRef, ContactSummary,
};
pub use interfaces::{extract_interfaces, BlockInterfaces, Interface, InterfaceSource};
pub use merge_nodes::{
    corner_contacts, emit_nodes, merge_duplicate_nodes, CornerContact, MeshNode, NodeMerge,
};
pub use model::{build_model, ContactReport, ModelOptions, WallModel};
pub use point_index::{assign_point_indices, BlockPointIds, VERTEX_BIND_Y_SLACK};
pub use submesh::{build_grid, BlockGrid};
pub use write::{write_contact_report, write_liablock, write_opensees, write_threedec};
