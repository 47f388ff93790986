//! Argument marshaller
//!
//! Resolves each native argument to an emitted parameter, optional setup
//! statements and the expression handed to the native call. Rules are tried
//! in a fixed priority order and the first match wins.

use super::MarshalContext;
use crate::core::{ArgDef, FuncDef};
use crate::errors::Unsupported;

/// Which rule resolved an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// First argument of a `structSetter`; bound as the method receiver.
    SetterReceiver,
    /// Opaque struct passed by name to a `structGetter`.
    GetterStruct,
    Table,
    Enum,
    /// Pointer to an opaque struct, passed as its pointer view.
    StructPointer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalledArg {
    /// Emitted parameter name, keyword-escaped.
    pub name: String,
    /// Emitted parameter type; `None` when the argument is not a parameter.
    pub go_type: Option<String>,
    pub setup: Option<String>,
    pub call: String,
    pub kind: ArgKind,
}

impl MarshalledArg {
    fn param(name: String, go_type: String, call: String, kind: ArgKind) -> Self {
        Self { name, go_type: Some(go_type), setup: None, call, kind }
    }

    /// `name type`, as it appears in a parameter list.
    pub fn param_decl(&self) -> Option<String> {
        self.go_type.as_ref().map(|ty| format!("{} {}", self.name, ty))
    }
}

pub fn resolve_arg(
    ctx: &MarshalContext<'_>,
    func: &FuncDef,
    index: usize,
    arg: &ArgDef,
) -> Result<MarshalledArg, Unsupported> {
    let name = ctx.conventions.param_name(&arg.name);
    let raw = arg.ty.as_str();

    if index == 0 && func.struct_setter {
        return Ok(MarshalledArg {
            name,
            go_type: None,
            setup: None,
            call: format!("{}.handle()", ctx.conventions.receiver_name),
            kind: ArgKind::SetterReceiver,
        });
    }

    if func.struct_getter && ctx.registry.is_struct(raw) {
        let call = format!("{}.handle()", name);
        return Ok(MarshalledArg::param(name, raw.to_string(), call, ArgKind::GetterStruct));
    }

    if let Some(rule) = ctx.table.arg_rule(raw) {
        return Ok(MarshalledArg {
            go_type: Some(rule.go_type()),
            setup: rule.setup(&name),
            call: rule.call_expr(&name),
            name,
            kind: ArgKind::Table,
        });
    }

    if ctx.registry.is_enum(raw) {
        let call = format!("C.{}({})", raw, name);
        return Ok(MarshalledArg::param(name, raw.to_string(), call, ArgKind::Enum));
    }

    if let Some(pointee) = ctx.registry.pointee_struct(raw) {
        let call = format!("{}.handle()", name);
        return Ok(MarshalledArg::param(name, pointee.to_string(), call, ArgKind::StructPointer));
    }

    Err(Unsupported::Arg { name: arg.name.clone(), ty: arg.ty.clone() })
}

/// Resolves every argument; the first unsupported one fails the function.
pub fn resolve_args(
    ctx: &MarshalContext<'_>,
    func: &FuncDef,
) -> Result<Vec<MarshalledArg>, Unsupported> {
    func.args
        .iter()
        .enumerate()
        .map(|(i, arg)| resolve_arg(ctx, func, i, arg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EnumDescriptor, NamingConventions, StructDescriptor, TypeRegistry};
    use crate::marshal::MarshalTable;

    struct Fixture {
        registry: TypeRegistry,
        table: MarshalTable,
        conventions: NamingConventions,
    }

    impl Fixture {
        fn new() -> Self {
            let conventions = NamingConventions::default();
            let registry = TypeRegistry::build(
                &[EnumDescriptor::new("ImGuiDir_", &[("ImGuiDir_Left", 0)])],
                &[StructDescriptor::new("ImDrawList"), StructDescriptor::new("ImVec2")],
                &conventions,
            );
            Self { registry, table: MarshalTable::builtin(), conventions }
        }

        fn ctx(&self) -> MarshalContext<'_> {
            MarshalContext::new(&self.registry, &self.table, &self.conventions)
        }
    }

    fn plain(args: Vec<ArgDef>) -> FuncDef {
        FuncDef::new("igSomething", args, "void")
    }

    #[test]
    fn test_table_rule() {
        let fx = Fixture::new();
        let func = plain(vec![ArgDef::new("label", "const char*")]);
        let arg = resolve_arg(&fx.ctx(), &func, 0, &func.args[0]).unwrap();

        assert_eq!(arg.kind, ArgKind::Table);
        assert_eq!(arg.param_decl().unwrap(), "label string");
        assert!(arg.setup.is_some());
        assert_eq!(arg.call, "labelArg");
    }

    #[test]
    fn test_enum_rule() {
        let fx = Fixture::new();
        let func = plain(vec![ArgDef::new("dir", "ImGuiDir")]);
        let arg = resolve_arg(&fx.ctx(), &func, 0, &func.args[0]).unwrap();

        assert_eq!(arg.kind, ArgKind::Enum);
        assert_eq!(arg.param_decl().unwrap(), "dir ImGuiDir");
        assert_eq!(arg.call, "C.ImGuiDir(dir)");
    }

    #[test]
    fn test_struct_pointer_rule() {
        let fx = Fixture::new();
        let func = plain(vec![ArgDef::new("list", "const ImDrawList*")]);
        let arg = resolve_arg(&fx.ctx(), &func, 0, &func.args[0]).unwrap();

        assert_eq!(arg.kind, ArgKind::StructPointer);
        assert_eq!(arg.param_decl().unwrap(), "list ImDrawList");
        assert_eq!(arg.call, "list.handle()");
    }

    #[test]
    fn test_getter_struct_rule_requires_flag() {
        let fx = Fixture::new();
        let getter = plain(vec![ArgDef::new("list", "ImDrawList")]).getter();
        let arg = resolve_arg(&fx.ctx(), &getter, 0, &getter.args[0]).unwrap();
        assert_eq!(arg.kind, ArgKind::GetterStruct);
        assert_eq!(arg.call, "list.handle()");

        let not_getter = plain(vec![ArgDef::new("list", "ImDrawList")]);
        assert!(resolve_arg(&fx.ctx(), &not_getter, 0, &not_getter.args[0]).is_err());
    }

    #[test]
    fn test_setter_receiver_only_first_position() {
        let fx = Fixture::new();
        let func = FuncDef::new(
            "ImDrawList_SetFlags",
            vec![ArgDef::new("self", "ImDrawList*"), ArgDef::new("flags", "int")],
            "void",
        )
        .setter();

        let args = resolve_args(&fx.ctx(), &func).unwrap();
        assert_eq!(args[0].kind, ArgKind::SetterReceiver);
        assert_eq!(args[0].param_decl(), None);
        assert_eq!(args[0].call, "self.handle()");
        assert_eq!(args[1].kind, ArgKind::Table);
    }

    #[test]
    fn test_keyword_names_escaped() {
        let fx = Fixture::new();
        let func = plain(vec![ArgDef::new("type", "int")]);
        let arg = resolve_arg(&fx.ctx(), &func, 0, &func.args[0]).unwrap();

        assert_eq!(arg.param_decl().unwrap(), "typeArg int32");
        assert_eq!(arg.call, "C.int(typeArg)");
    }

    #[test]
    fn test_unknown_stops_resolution() {
        let fx = Fixture::new();
        let func = plain(vec![ArgDef::new("a", "int"), ArgDef::new("b", "unknownType")]);
        let err = resolve_args(&fx.ctx(), &func).unwrap_err();

        assert_eq!(err, Unsupported::Arg { name: "b".into(), ty: "unknownType".into() });
        assert_eq!(err.to_string(), "Unknown arg: unknownType");
    }

    #[test]
    fn test_value_struct_is_not_a_handle() {
        let fx = Fixture::new();
        let func = plain(vec![ArgDef::new("v", "ImVec2")]).getter();
        let arg = resolve_arg(&fx.ctx(), &func, 0, &func.args[0]).unwrap();

        assert_eq!(arg.kind, ArgKind::Table);
        assert_eq!(arg.call, "v.toC()");
    }
}
