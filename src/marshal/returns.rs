//! Return marshaller
//!
//! Picks the emitted return type and the template that converts the native
//! result. Evaluated only once every argument has resolved.

use super::table::{ReturnStrategy, ReturnTemplate};
use super::MarshalContext;
use crate::core::FuncDef;
use crate::errors::{SkipReason, Unsupported};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnKind {
    Void,
    Table,
    Enum,
    /// Token aliasing native memory; not owned by the caller.
    StructPointer,
    /// Value copy built from the returned native struct.
    GetterValue,
    /// Renamed constructor producing a token for `target`.
    Constructor { target: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReturn {
    pub kind: ReturnKind,
    pub strategy: Option<ReturnStrategy>,
}

impl ResolvedReturn {
    fn void() -> Self {
        Self { kind: ReturnKind::Void, strategy: None }
    }

    fn with(kind: ReturnKind, strategy: ReturnStrategy) -> Self {
        Self { kind, strategy: Some(strategy) }
    }

    /// Emitted return type; empty for void.
    pub fn go_type(&self) -> &str {
        self.strategy.as_ref().map(ReturnStrategy::go_type).unwrap_or("")
    }

    pub fn template(&self) -> Option<ReturnTemplate> {
        self.strategy.as_ref().map(ReturnStrategy::template)
    }

    pub fn is_void(&self) -> bool {
        self.kind == ReturnKind::Void
    }
}

pub fn resolve_return(ctx: &MarshalContext<'_>, func: &FuncDef) -> Result<ResolvedReturn, SkipReason> {
    if func.returns_void() {
        return Ok(ResolvedReturn::void());
    }

    let raw = func.ret.as_str();

    if let Some(strategy) = ctx.table.return_rule(raw) {
        return Ok(ResolvedReturn::with(ReturnKind::Table, strategy.clone()));
    }

    if ctx.registry.is_enum(raw) {
        let strategy = ReturnStrategy::Convert { go_type: raw.to_string() };
        return Ok(ResolvedReturn::with(ReturnKind::Enum, strategy));
    }

    if let Some(pointee) = ctx.registry.pointee_struct(raw) {
        let strategy = ReturnStrategy::Handle { go_type: pointee.to_string() };
        return Ok(ResolvedReturn::with(ReturnKind::StructPointer, strategy));
    }

    if func.struct_getter && ctx.registry.is_struct(raw) {
        let strategy = ReturnStrategy::FromC { go_type: raw.to_string() };
        return Ok(ResolvedReturn::with(ReturnKind::GetterValue, strategy));
    }

    if func.constructor {
        let stem = ctx.conventions.leading_segment(&func.func_name);
        let target = constructor_target(ctx, stem)
            .ok_or_else(|| SkipReason::ConstructorTargetUnknown { stem: stem.to_string() })?;
        let name = format!("{}{}", ctx.conventions.constructor_name_prefix, stem);
        let strategy = ReturnStrategy::Handle { go_type: target.clone() };
        return Ok(ResolvedReturn::with(ReturnKind::Constructor { target, name }, strategy));
    }

    Err(Unsupported::Return { ty: func.ret.clone() }.into())
}

/// First `prefix + stem` naming a registered opaque struct.
pub fn constructor_target(ctx: &MarshalContext<'_>, stem: &str) -> Option<String> {
    ctx.conventions
        .constructor_prefixes
        .iter()
        .map(|prefix| format!("{}{}", prefix, stem))
        .find(|candidate| ctx.registry.is_struct(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EnumDescriptor, NamingConventions, StructDescriptor, TypeRegistry};
    use crate::marshal::MarshalTable;

    fn with_ctx<R>(f: impl FnOnce(&MarshalContext<'_>) -> R) -> R {
        let conventions = NamingConventions::default();
        let registry = TypeRegistry::build(
            &[EnumDescriptor::new("ImGuiDir_", &[("ImGuiDir_Left", 0)])],
            &[
                StructDescriptor::new("ImDrawList"),
                StructDescriptor::new("ImGuiStyle"),
                StructDescriptor::new("ImFontAtlas"),
            ],
            &conventions,
        );
        let table = MarshalTable::builtin();
        f(&MarshalContext::new(&registry, &table, &conventions))
    }

    #[test]
    fn test_void() {
        with_ctx(|ctx| {
            let ret = resolve_return(ctx, &FuncDef::new("igRender", vec![], "void")).unwrap();
            assert!(ret.is_void());
            assert_eq!(ret.go_type(), "");
            assert!(ret.template().is_none());
        });
    }

    #[test]
    fn test_table_and_enum() {
        with_ctx(|ctx| {
            let float = resolve_return(ctx, &FuncDef::new("igGetFontSize", vec![], "float")).unwrap();
            assert_eq!(float.kind, ReturnKind::Table);
            assert_eq!(float.template().unwrap().fill("C.igGetFontSize()"), "return float32(C.igGetFontSize())");

            let dir = resolve_return(ctx, &FuncDef::new("igGetDir", vec![], "ImGuiDir")).unwrap();
            assert_eq!(dir.kind, ReturnKind::Enum);
            assert_eq!(dir.template().unwrap().fill("C.igGetDir()"), "return ImGuiDir(C.igGetDir())");
        });
    }

    #[test]
    fn test_struct_pointer_aliases() {
        with_ctx(|ctx| {
            let ret = resolve_return(ctx, &FuncDef::new("igGetWindowDrawList", vec![], "ImDrawList*")).unwrap();
            assert_eq!(ret.kind, ReturnKind::StructPointer);
            assert_eq!(ret.go_type(), "ImDrawList");
            assert_eq!(
                ret.template().unwrap().fill("C.igGetWindowDrawList()"),
                "return ImDrawList(unsafe.Pointer(C.igGetWindowDrawList()))"
            );
        });
    }

    #[test]
    fn test_getter_value_requires_flag() {
        with_ctx(|ctx| {
            let getter = FuncDef::new("ImDrawList_GetStyle", vec![], "ImGuiStyle").getter();
            let ret = resolve_return(ctx, &getter).unwrap();
            assert_eq!(ret.kind, ReturnKind::GetterValue);
            assert_eq!(ret.template().unwrap().fill("C.x()"), "return newImGuiStyleFromC(C.x())");

            let plain = FuncDef::new("ImDrawList_GetStyle", vec![], "ImGuiStyle");
            let err = resolve_return(ctx, &plain).unwrap_err();
            assert_eq!(err.to_string(), "Unknown ret: ImGuiStyle");
        });
    }

    #[test]
    fn test_constructor_prefix_order() {
        with_ctx(|ctx| {
            let ctor = FuncDef::new("DrawList_DrawList", vec![], "DrawListPtr").constructor();
            let ret = resolve_return(ctx, &ctor).unwrap();
            assert_eq!(
                ret.kind,
                ReturnKind::Constructor { target: "ImDrawList".into(), name: "NewDrawList".into() }
            );

            let gui = FuncDef::new("Style_Style", vec![], "StylePtr").constructor();
            let ret = resolve_return(ctx, &gui).unwrap();
            assert_eq!(
                ret.kind,
                ReturnKind::Constructor { target: "ImGuiStyle".into(), name: "NewStyle".into() }
            );
        });
    }

    #[test]
    fn test_constructor_without_target_is_silent_skip() {
        with_ctx(|ctx| {
            let ctor = FuncDef::new("Widget_Widget", vec![], "WidgetPtr").constructor();
            let err = resolve_return(ctx, &ctor).unwrap_err();
            assert_eq!(err, SkipReason::ConstructorTargetUnknown { stem: "Widget".into() });
        });
    }

    #[test]
    fn test_constructor_with_empty_return() {
        with_ctx(|ctx| {
            let ctor = FuncDef::new("Style_Style", vec![], "").constructor();
            let ret = resolve_return(ctx, &ctor).unwrap();
            assert_eq!(
                ret.kind,
                ReturnKind::Constructor { target: "ImGuiStyle".into(), name: "NewStyle".into() }
            );
            assert_eq!(ret.go_type(), "ImGuiStyle");
        });
    }

    #[test]
    fn test_empty_return_is_not_void() {
        with_ctx(|ctx| {
            let err = resolve_return(ctx, &FuncDef::new("igMystery", vec![], "")).unwrap_err();
            assert_eq!(err, SkipReason::from(Unsupported::Return { ty: String::new() }));
        });
    }
}
