//! Block trees and the parser contract.
//!
//! A [`Tree`] is produced by one parse of the whole buffer and never mutated
//! afterwards; the next parse replaces it wholesale. [`NodeId`]s index the
//! tree's arena and are only meaningful against the tree that issued them.

mod parser;
pub mod sexpr;
mod tree;

pub use parser::{ParseError, ParseErrorKind, Parser};
pub use sexpr::SexprParser;
pub use tree::{Node, NodeId, NodeKind, Tree, TreeBuilder, TreeError};
