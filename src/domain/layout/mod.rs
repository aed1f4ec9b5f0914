// src/domain/layout/mod.rs
//
// Layout Domain
//
// Grid instructions are the contract between the fold layout engine and
// the document writer. They carry geometry and borrowed card content only;
// turning them into paint operations is the writer's job.

pub mod value_objects;

pub use value_objects::{
    Block, BlockContent, CellInstruction, GridInstance, GridInstruction, Orientation, PageGeometry,
};
