//! cimgen - Go/cgo binding generator for C API descriptions
//!
//! Consumes the enums, structs and functions an external header parser
//! extracted and emits Go wrapper source, one artifact per concern.

// Data model and marshalling
pub mod core;
pub mod marshal;

// Generation
pub mod codegen;
pub mod ffi;

pub mod errors;
pub mod frontend;
pub mod infrastructure;

// Re-export commonly used items
pub use codegen::{generate, ArtifactOptions, GeneratedBindings, GenerationContext, GenerationReport};
pub use crate::core::{ApiDescription, ArgDef, EnumDescriptor, FuncDef, NamingConventions, StructDescriptor, TypeRegistry};
pub use errors::{Diagnostic, GenError, SkipReason, Unsupported};
pub use frontend::{cli_main, load_api, Config};
pub use infrastructure::{init_logging, LogConfig, LogFormat, LogOutput};
pub use marshal::{MarshalTable, ReturnTemplate};
