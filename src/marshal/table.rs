//! The closed marshalling table.
//!
//! Rules are keyed by the exact raw type string. Nothing here is inferred
//! from C grammar: a type that is not listed is unsupported unless the
//! registry recognises it as an enum or an opaque struct.

use crate::core::{ApiDescription, TypeRegistry};
use std::collections::HashMap;

/// How a scoped argument obtains its native storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    /// A package-level helper, `wrapFloat(x)`.
    Func(&'static str),
    /// A method on the argument itself, `x.wrap()`.
    Method(&'static str),
}

/// Marshalling strategy for one argument type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgStrategy {
    /// `C.c_type(x)`
    Cast { go_type: &'static str, c_type: &'static str },
    /// `(*C.c_type)(x)`
    PointerCast { go_type: &'static str, c_type: &'static str },
    /// `&x`
    AddressOf { go_type: &'static str },
    /// `x`
    Passthrough { go_type: &'static str },
    /// `x.toC()`, value-typed structs.
    ToC { go_type: &'static str },
    /// Temporary native storage acquired before the call and released
    /// (flushing back to the caller) by a deferred finisher.
    Scoped { go_type: &'static str, wrapper: Wrapper },
    /// Element-wise copy in and copy back over `[len]*go_elem`.
    FixedArray { len: usize, c_elem: &'static str, go_elem: &'static str },
}

impl ArgStrategy {
    pub fn go_type(&self) -> String {
        match self {
            Self::Cast { go_type, .. }
            | Self::PointerCast { go_type, .. }
            | Self::AddressOf { go_type }
            | Self::Passthrough { go_type }
            | Self::ToC { go_type }
            | Self::Scoped { go_type, .. } => go_type.to_string(),
            Self::FixedArray { len, go_elem, .. } => format!("[{}]*{}", len, go_elem),
        }
    }

    /// Setup statements emitted before the native call, if any.
    pub fn setup(&self, name: &str) -> Option<String> {
        match self {
            Self::Scoped { wrapper, .. } => {
                let acquire = match wrapper {
                    Wrapper::Func(func) => format!("{}({})", func, name),
                    Wrapper::Method(method) => format!("{}.{}()", name, method),
                };
                Some(format!(
                    "{name}Arg, {name}Fin := {acquire}\ndefer {name}Fin()",
                    name = name,
                    acquire = acquire
                ))
            }
            Self::FixedArray { c_elem, go_elem, .. } => Some(format!(
                "{n}Arg := make([]C.{c}, len({n}))\n\
                 for i, {n}V := range {n} {{\n\
                 \t{n}Arg[i] = C.{c}(*{n}V)\n\
                 }}\n\
                 defer func() {{\n\
                 \tfor i, {n}V := range {n}Arg {{\n\
                 \t\t*{n}[i] = {g}({n}V)\n\
                 \t}}\n\
                 }}()",
                n = name,
                c = c_elem,
                g = go_elem
            )),
            _ => None,
        }
    }

    /// Expression handed to the native call.
    pub fn call_expr(&self, name: &str) -> String {
        match self {
            Self::Cast { c_type, .. } => format!("C.{}({})", c_type, name),
            Self::PointerCast { c_type, .. } => format!("(*C.{})({})", c_type, name),
            Self::AddressOf { .. } => format!("&{}", name),
            Self::Passthrough { .. } => name.to_string(),
            Self::ToC { .. } => format!("{}.toC()", name),
            Self::Scoped { .. } => format!("{}Arg", name),
            Self::FixedArray { c_elem, .. } => format!("(*C.{})(&{}Arg[0])", c_elem, name),
        }
    }
}

/// Conversion applied to a native result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnStrategy {
    /// `call == C.bool(true)`
    BoolCompare,
    /// Owned copy of a C string.
    GoString,
    /// Plain conversion, `T(call)` or `(*T)(call)` for pointer types.
    Convert { go_type: String },
    /// `newTFromC(call)`: value copy.
    FromC { go_type: String },
    /// `newTFromCPtr(call)`: dereference, then value copy.
    FromCPtr { go_type: String },
    /// `T(unsafe.Pointer(call))`: non-owning token aliasing native memory.
    Handle { go_type: String },
}

impl ReturnStrategy {
    fn convert(go_type: &str) -> Self {
        Self::Convert { go_type: go_type.to_string() }
    }

    pub fn go_type(&self) -> &str {
        match self {
            Self::BoolCompare => "bool",
            Self::GoString => "string",
            Self::Convert { go_type }
            | Self::FromC { go_type }
            | Self::FromCPtr { go_type }
            | Self::Handle { go_type } => go_type,
        }
    }

    pub fn template(&self) -> ReturnTemplate {
        let expr = match self {
            Self::BoolCompare => format!("{} == C.bool(true)", ReturnTemplate::HOLE),
            Self::GoString => format!("C.GoString({})", ReturnTemplate::HOLE),
            Self::Convert { go_type } if go_type.starts_with('*') => {
                format!("({})({})", go_type, ReturnTemplate::HOLE)
            }
            Self::Convert { go_type } => format!("{}({})", go_type, ReturnTemplate::HOLE),
            Self::FromC { go_type } => format!("new{}FromC({})", go_type, ReturnTemplate::HOLE),
            Self::FromCPtr { go_type } => {
                format!("new{}FromCPtr({})", go_type, ReturnTemplate::HOLE)
            }
            Self::Handle { go_type } => {
                format!("{}(unsafe.Pointer({}))", go_type, ReturnTemplate::HOLE)
            }
        };
        ReturnTemplate::new(format!("return {}", expr))
    }
}

/// A single-hole statement template; the native call is substituted into
/// the hole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTemplate {
    pattern: String,
}

impl ReturnTemplate {
    pub const HOLE: &'static str = "{call}";

    pub fn new(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into() }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn fill(&self, call: &str) -> String {
        self.pattern.replacen(Self::HOLE, call, 1)
    }
}

/// Raw types the table and the registry do not cover.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CoverageGaps {
    pub arg_types: Vec<String>,
    pub return_types: Vec<String>,
}

impl CoverageGaps {
    pub fn is_empty(&self) -> bool {
        self.arg_types.is_empty() && self.return_types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.arg_types.len() + self.return_types.len()
    }
}

#[derive(Debug, Clone)]
pub struct MarshalTable {
    args: HashMap<&'static str, ArgStrategy>,
    returns: HashMap<&'static str, ReturnStrategy>,
}

impl Default for MarshalTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MarshalTable {
    pub fn builtin() -> Self {
        Self {
            args: builtin_arg_rules().into_iter().collect(),
            returns: builtin_return_rules().into_iter().collect(),
        }
    }

    pub fn arg_rule(&self, raw: &str) -> Option<&ArgStrategy> {
        self.args.get(raw)
    }

    pub fn return_rule(&self, raw: &str) -> Option<&ReturnStrategy> {
        self.returns.get(raw)
    }

    /// Argument keys, sorted.
    pub fn arg_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.args.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Return keys, sorted.
    pub fn return_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.returns.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Checks the parser's type vocabulary against the table before any
    /// function is generated.
    ///
    /// Exact opaque-struct names count as covered even though only getters
    /// can use them, so a gap list is a lower bound on skipped functions.
    pub fn coverage_gaps(&self, api: &ApiDescription, registry: &TypeRegistry) -> CoverageGaps {
        let known_by_registry =
            |ty: &str| registry.is_enum(ty) || registry.is_struct(ty) || registry.pointee_struct(ty).is_some();

        CoverageGaps {
            arg_types: api
                .arg_vocabulary()
                .into_iter()
                .filter(|&ty| self.arg_rule(ty).is_none() && !known_by_registry(ty))
                .map(str::to_string)
                .collect(),
            return_types: api
                .return_vocabulary()
                .into_iter()
                .filter(|&ty| self.return_rule(ty).is_none() && !known_by_registry(ty))
                .map(str::to_string)
                .collect(),
        }
    }
}

fn builtin_arg_rules() -> Vec<(&'static str, ArgStrategy)> {
    use ArgStrategy::*;

    let cast = |go_type, c_type| Cast { go_type, c_type };
    let scoped = |go_type, func| Scoped { go_type, wrapper: Wrapper::Func(func) };
    let wrapped = |go_type| Scoped { go_type, wrapper: Wrapper::Method("wrap") };
    let ints = |len| FixedArray { len, c_elem: "int", go_elem: "int32" };
    let floats = |len| FixedArray { len, c_elem: "float", go_elem: "float32" };

    vec![
        // strings
        ("char*", scoped("string", "wrapString")),
        ("const char*", scoped("string", "wrapString")),
        // integers
        ("short", cast("int", "short")),
        ("unsigned short", cast("uint", "ushort")),
        ("int", cast("int32", "int")),
        ("unsigned int", cast("uint32", "uint")),
        ("unsigned char", cast("uint", "uchar")),
        ("size_t", cast("uint64", "xlong")),
        ("ImS8", cast("int", "ImS8")),
        ("ImS16", cast("int", "ImS16")),
        ("ImS32", cast("int", "ImS32")),
        ("ImU8", cast("uint", "ImU8")),
        ("ImU16", cast("uint", "ImU16")),
        ("ImU32", cast("uint32", "ImU32")),
        ("ImU64", cast("uint64", "ImU64")),
        // floating point and booleans
        ("float", cast("float32", "float")),
        ("double", cast("float64", "double")),
        ("bool", cast("bool", "bool")),
        // single-value out-parameters
        ("float*", scoped("*float32", "wrapFloat")),
        ("const float*", scoped("*float32", "wrapFloat")),
        ("bool*", scoped("*bool", "wrapBool")),
        ("int*", scoped("*int32", "wrapInt32")),
        ("double*", PointerCast { go_type: "*float64", c_type: "double" }),
        ("size_t*", PointerCast { go_type: "*uint64", c_type: "xlong" }),
        ("unsigned char**", AddressOf { go_type: "*C.uchar" }),
        // fixed arrays
        ("int[2]", ints(2)),
        ("int[3]", ints(3)),
        ("int[4]", ints(4)),
        ("float[2]", floats(2)),
        ("float[3]", floats(3)),
        ("float[4]", floats(4)),
        // library scalar aliases
        ("ImWchar", cast("ImWchar", "ImWchar")),
        ("const ImWchar*", PointerCast { go_type: "*ImWchar", c_type: "ImWchar" }),
        ("ImGuiID", cast("ImGuiID", "ImGuiID")),
        ("ImTextureID", cast("ImTextureID", "ImTextureID")),
        ("ImDrawIdx", cast("ImDrawIdx", "ImDrawIdx")),
        ("ImGuiTableColumnIdx", cast("ImGuiTableColumnIdx", "ImGuiTableColumnIdx")),
        ("ImGuiTableDrawChannelIdx", cast("ImGuiTableDrawChannelIdx", "ImGuiTableDrawChannelIdx")),
        // raw bytes
        ("void*", Passthrough { go_type: "unsafe.Pointer" }),
        ("const void*", Passthrough { go_type: "unsafe.Pointer" }),
        // value-typed structs
        ("ImVec2", ToC { go_type: "ImVec2" }),
        ("const ImVec2", ToC { go_type: "ImVec2" }),
        ("ImVec2*", wrapped("*ImVec2")),
        ("const ImVec2*", wrapped("*ImVec2")),
        ("ImVec4", ToC { go_type: "ImVec4" }),
        ("const ImVec4", ToC { go_type: "ImVec4" }),
        ("ImVec4*", wrapped("*ImVec4")),
        ("const ImVec4*", wrapped("*ImVec4")),
        ("ImColor*", wrapped("*ImColor")),
        ("ImRect", ToC { go_type: "ImRect" }),
    ]
}

fn builtin_return_rules() -> Vec<(&'static str, ReturnStrategy)> {
    use ReturnStrategy::*;

    let from_c = |go_type: &str| FromC { go_type: go_type.to_string() };
    let from_c_ptr = |go_type: &str| FromCPtr { go_type: go_type.to_string() };

    vec![
        ("bool", BoolCompare),
        ("const char*", GoString),
        ("float", ReturnStrategy::convert("float32")),
        ("double", ReturnStrategy::convert("float64")),
        // Size values come back as float64; kept for compatibility with
        // existing callers.
        ("size_t", ReturnStrategy::convert("float64")),
        ("int", ReturnStrategy::convert("int")),
        ("short", ReturnStrategy::convert("int")),
        ("ImS8", ReturnStrategy::convert("int")),
        ("ImS16", ReturnStrategy::convert("int")),
        ("ImS32", ReturnStrategy::convert("int")),
        ("unsigned int", ReturnStrategy::convert("uint32")),
        ("ImU8", ReturnStrategy::convert("uint32")),
        ("ImU16", ReturnStrategy::convert("uint32")),
        ("ImU32", ReturnStrategy::convert("uint32")),
        ("ImU64", ReturnStrategy::convert("uint64")),
        ("ImGuiID", ReturnStrategy::convert("ImGuiID")),
        ("ImTextureID", ReturnStrategy::convert("ImTextureID")),
        ("ImGuiTableColumnIdx", ReturnStrategy::convert("ImGuiTableColumnIdx")),
        ("ImGuiTableDrawChannelIdx", ReturnStrategy::convert("ImGuiTableDrawChannelIdx")),
        ("const ImWchar*", ReturnStrategy::convert("*ImWchar")),
        ("void*", ReturnStrategy::convert("unsafe.Pointer")),
        ("ImVec2", from_c("ImVec2")),
        ("const ImVec2*", from_c_ptr("ImVec2")),
        ("ImVec4", from_c("ImVec4")),
        ("const ImVec4*", from_c_ptr("ImVec4")),
        ("ImRect", from_c("ImRect")),
    ]
}
