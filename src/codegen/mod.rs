//! Code generation
//!
//! - `naming.rs` - symbol classification
//! - `shaper.rs` - declaration shaping and rendering
//! - `enums.rs`, `structs.rs`, `support.rs` - per-artifact renderers
//! - `emitter.rs` - generation context, emitter and report

pub mod buffer;
pub mod emitter;
pub mod enums;
pub mod naming;
pub mod shaper;
pub mod structs;
pub mod support;

pub use buffer::CodeBuffer;
pub use emitter::{
    generate, ArtifactOptions, Emitter, FunctionOutcome, FunctionState, GeneratedBindings,
    GenerationContext, GenerationReport, SkipStats,
};
pub use naming::{classify_symbol, ShapeFlags, SymbolShape};
pub use shaper::{shape_declaration, DeclKind, Declaration};
