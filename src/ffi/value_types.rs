//! Value-typed struct layouts
//!
//! The small aggregates that cross the native boundary by value. The layout
//! table drives the emitted Go mirrors; the `#[repr(C)]` types below pin the
//! same layouts on the Rust side so a size mismatch shows up in tests.

use std::mem::size_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    Short,
    /// Nested value struct, by name.
    Value(&'static str),
}

impl FieldKind {
    pub fn go_type(&self) -> &'static str {
        match *self {
            Self::Float => "float32",
            Self::Short => "int16",
            Self::Value(name) => name,
        }
    }

    pub fn c_type(&self) -> &'static str {
        match *self {
            Self::Float => "float",
            Self::Short => "short",
            Self::Value(name) => name,
        }
    }

    pub fn native_size(&self) -> usize {
        match self {
            Self::Float => size_of::<f32>(),
            Self::Short => size_of::<i16>(),
            Self::Value(name) => layout(name).map_or(0, ValueLayout::native_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub go_name: &'static str,
    pub c_name: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueLayout {
    pub name: &'static str,
    pub fields: &'static [FieldLayout],
}

impl ValueLayout {
    /// Size of the native struct. Fields within one struct share an
    /// alignment, so there is no padding to account for.
    pub fn native_size(&self) -> usize {
        self.fields.iter().map(|f| f.kind.native_size()).sum()
    }
}

const fn field(go_name: &'static str, c_name: &'static str, kind: FieldKind) -> FieldLayout {
    FieldLayout { go_name, c_name, kind }
}

/// Nested structs precede their users.
pub const VALUE_LAYOUTS: &[ValueLayout] = &[
    ValueLayout {
        name: "ImVec1",
        fields: &[field("X", "x", FieldKind::Float)],
    },
    ValueLayout {
        name: "ImVec2ih",
        fields: &[field("X", "x", FieldKind::Short), field("Y", "y", FieldKind::Short)],
    },
    ValueLayout {
        name: "ImVec2",
        fields: &[field("X", "x", FieldKind::Float), field("Y", "y", FieldKind::Float)],
    },
    ValueLayout {
        name: "ImVec4",
        fields: &[
            field("X", "x", FieldKind::Float),
            field("Y", "y", FieldKind::Float),
            field("Z", "z", FieldKind::Float),
            field("W", "w", FieldKind::Float),
        ],
    },
    ValueLayout {
        name: "ImRect",
        fields: &[
            field("Min", "Min", FieldKind::Value("ImVec2")),
            field("Max", "Max", FieldKind::Value("ImVec2")),
        ],
    },
    ValueLayout {
        name: "ImColor",
        fields: &[field("Value", "Value", FieldKind::Value("ImVec4"))],
    },
];

pub fn layout(name: &str) -> Option<&'static ValueLayout> {
    VALUE_LAYOUTS.iter().find(|l| l.name == name)
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CImVec1 {
    pub x: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CImVec2ih {
    pub x: i16,
    pub y: i16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CImVec2 {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CImVec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CImRect {
    pub min: CImVec2,
    pub max: CImVec2,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CImColor {
    pub value: CImVec4,
}

/// Conversion between a value type and its native mirror.
pub trait NativeValue: Sized {
    type Native: Copy;

    fn to_c(&self) -> Self::Native;

    fn from_c(native: Self::Native) -> Self;

    /// # Safety
    ///
    /// `ptr` must be non-null, aligned and point to an initialised value.
    unsafe fn from_c_ptr(ptr: *const Self::Native) -> Self {
        Self::from_c(*ptr)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec1 {
    pub x: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vec2ih {
    pub x: i16,
    pub y: i16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
    pub value: Vec4,
}

impl NativeValue for Vec1 {
    type Native = CImVec1;

    fn to_c(&self) -> CImVec1 {
        CImVec1 { x: self.x }
    }

    fn from_c(native: CImVec1) -> Self {
        Self { x: native.x }
    }
}

impl NativeValue for Vec2ih {
    type Native = CImVec2ih;

    fn to_c(&self) -> CImVec2ih {
        CImVec2ih { x: self.x, y: self.y }
    }

    fn from_c(native: CImVec2ih) -> Self {
        Self { x: native.x, y: native.y }
    }
}

impl NativeValue for Vec2 {
    type Native = CImVec2;

    fn to_c(&self) -> CImVec2 {
        CImVec2 { x: self.x, y: self.y }
    }

    fn from_c(native: CImVec2) -> Self {
        Self { x: native.x, y: native.y }
    }
}

impl NativeValue for Vec4 {
    type Native = CImVec4;

    fn to_c(&self) -> CImVec4 {
        CImVec4 { x: self.x, y: self.y, z: self.z, w: self.w }
    }

    fn from_c(native: CImVec4) -> Self {
        Self { x: native.x, y: native.y, z: native.z, w: native.w }
    }
}

impl NativeValue for Rect {
    type Native = CImRect;

    fn to_c(&self) -> CImRect {
        CImRect { min: self.min.to_c(), max: self.max.to_c() }
    }

    fn from_c(native: CImRect) -> Self {
        Self { min: Vec2::from_c(native.min), max: Vec2::from_c(native.max) }
    }
}

impl NativeValue for Color {
    type Native = CImColor;

    fn to_c(&self) -> CImColor {
        CImColor { value: self.value.to_c() }
    }

    fn from_c(native: CImColor) -> Self {
        Self { value: Vec4::from_c(native.value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_match_mirrors() {
        let mirrors = [
            ("ImVec1", size_of::<CImVec1>()),
            ("ImVec2ih", size_of::<CImVec2ih>()),
            ("ImVec2", size_of::<CImVec2>()),
            ("ImVec4", size_of::<CImVec4>()),
            ("ImRect", size_of::<CImRect>()),
            ("ImColor", size_of::<CImColor>()),
        ];

        assert_eq!(mirrors.len(), VALUE_LAYOUTS.len());
        for (name, size) in mirrors {
            assert_eq!(layout(name).unwrap().native_size(), size, "{}", name);
        }
    }

    #[test]
    fn test_nested_layouts_are_declared_first() {
        for (i, l) in VALUE_LAYOUTS.iter().enumerate() {
            for f in l.fields {
                if let FieldKind::Value(nested) = f.kind {
                    let pos = VALUE_LAYOUTS.iter().position(|o| o.name == nested).unwrap();
                    assert!(pos < i, "{} used before declaration", nested);
                }
            }
        }
    }

    #[test]
    fn test_rect_round_trip() {
        let rect = Rect {
            min: Vec2 { x: 1.0, y: 2.0 },
            max: Vec2 { x: 3.5, y: -4.0 },
        };
        assert_eq!(Rect::from_c(rect.to_c()), rect);
    }

    #[test]
    fn test_from_c_ptr_copies() {
        let mut native = CImColor {
            value: CImVec4 { x: 0.1, y: 0.2, z: 0.3, w: 1.0 },
        };
        let color = unsafe { Color::from_c_ptr(&native) };
        native.value.x = 9.0;

        assert_eq!(color.value.x, 0.1);
    }

    #[test]
    fn test_short_fields() {
        let v = Vec2ih { x: i16::MIN, y: i16::MAX };
        assert_eq!(Vec2ih::from_c(v.to_c()), v);
    }
}
