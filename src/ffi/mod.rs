//! Native layout mirrors
//!
//! Rust-side `#[repr(C)]` definitions of the value-typed structs that the
//! generated bindings copy across the boundary.

pub mod value_types;

pub use value_types::{
    layout, CImColor, CImRect, CImVec1, CImVec2, CImVec2ih, CImVec4, Color, FieldKind,
    FieldLayout, NativeValue, Rect, ValueLayout, Vec1, Vec2, Vec2ih, Vec4, VALUE_LAYOUTS,
};
