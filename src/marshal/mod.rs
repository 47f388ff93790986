//! Marshalling resolution
//!
//! - `table.rs` - closed rule table keyed by raw type string
//! - `args.rs` - per-argument resolution cascade
//! - `returns.rs` - return-type resolution cascade

pub mod args;
pub mod returns;
pub mod table;

pub use args::{resolve_arg, resolve_args, ArgKind, MarshalledArg};
pub use returns::{constructor_target, resolve_return, ResolvedReturn, ReturnKind};
pub use table::{ArgStrategy, CoverageGaps, MarshalTable, ReturnStrategy, ReturnTemplate, Wrapper};

use crate::core::{NamingConventions, TypeRegistry};

/// Read-only view the marshallers resolve against.
#[derive(Clone, Copy)]
pub struct MarshalContext<'a> {
    pub registry: &'a TypeRegistry,
    pub table: &'a MarshalTable,
    pub conventions: &'a NamingConventions,
}

impl<'a> MarshalContext<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        table: &'a MarshalTable,
        conventions: &'a NamingConventions,
    ) -> Self {
        Self { registry, table, conventions }
    }
}
