//! Core data model
//!
//! API descriptors, the naming conventions of the wrapped library, and the
//! type registry populated from them before any function is generated.

pub mod conventions;
pub mod descriptors;
pub mod registry;

pub use conventions::NamingConventions;
pub use descriptors::{ApiDescription, ArgDef, EnumDescriptor, EnumValue, FuncDef, StructDescriptor};
pub use registry::{strip_pointer, StructCategory, TypeRegistry};
