//! Declaration walking: which type declarations are configuration groups.

pub mod visitor;
mod walker;

pub use visitor::Visit;
pub use walker::{
    ConfigGroup, DeclarationKind, FileDeclarations, TypeDeclaration, join_segments, walk,
};
