//! Support artifact: value-struct mirrors and the scoped wrap helpers that
//! generated function bodies call.

use super::buffer::{go_file_header, CodeBuffer};
use crate::core::NamingConventions;
use crate::ffi::{FieldKind, ValueLayout, VALUE_LAYOUTS};

const SCOPED_HELPERS: &str = r#"func wrapString(value string) (wrapped *C.char, finisher func()) {
	wrapped = C.CString(value)
	finisher = func() { C.free(unsafe.Pointer(wrapped)) }
	return
}

func wrapFloat(goValue *float32) (wrapped *C.float, finisher func()) {
	if goValue != nil {
		cValue := C.float(*goValue)
		wrapped = &cValue
		finisher = func() {
			*goValue = float32(cValue)
		}
	} else {
		finisher = func() {}
	}
	return
}

func wrapBool(goValue *bool) (wrapped *C.bool, finisher func()) {
	if goValue != nil {
		cValue := C.bool(*goValue)
		wrapped = &cValue
		finisher = func() {
			*goValue = bool(cValue)
		}
	} else {
		finisher = func() {}
	}
	return
}

func wrapInt32(goValue *int32) (wrapped *C.int, finisher func()) {
	if goValue != nil {
		cValue := C.int(*goValue)
		wrapped = &cValue
		finisher = func() {
			*goValue = int32(cValue)
		}
	} else {
		finisher = func() {}
	}
	return
}
"#;

/// Value structs listed in the conventions that have a known layout, in
/// layout-table order.
pub fn value_layouts(conventions: &NamingConventions) -> Vec<&'static ValueLayout> {
    VALUE_LAYOUTS
        .iter()
        .filter(|l| conventions.is_value_struct(l.name))
        .collect()
}

pub fn render_support(conventions: &NamingConventions, package: &str, includes: &[String]) -> String {
    let mut includes = includes.to_vec();
    if !includes.iter().any(|i| i == "<stdlib.h>") {
        includes.push("<stdlib.h>".to_string());
    }

    let mut buf = CodeBuffer::new();
    buf.write_block(&go_file_header(package, &includes, &["unsafe"]));

    for layout in value_layouts(conventions) {
        buf.write_block(&render_value_struct(layout));
        buf.blank();
    }
    buf.write_block(SCOPED_HELPERS);

    buf.into_string()
}

fn render_value_struct(layout: &ValueLayout) -> String {
    let name = layout.name;

    let mut buf = CodeBuffer::new();
    buf.writeln(&format!("type {} struct {{", name));
    for f in layout.fields {
        buf.writeln(&format!("\t{} {}", f.go_name, f.kind.go_type()));
    }
    buf.writeln("}");
    buf.blank();

    let to_c: Vec<String> = layout
        .fields
        .iter()
        .map(|f| match f.kind {
            FieldKind::Value(_) => format!("{}: i.{}.toC()", f.c_name, f.go_name),
            _ => format!("{}: C.{}(i.{})", f.c_name, f.kind.c_type(), f.go_name),
        })
        .collect();
    buf.writeln(&format!("func (i {}) toC() C.{} {{", name, name));
    buf.writeln(&format!("\treturn C.{}{{{}}}", name, to_c.join(", ")));
    buf.writeln("}");
    buf.blank();

    buf.writeln(&format!("func (i *{}) wrap() (out *C.{}, finisher func()) {{", name, name));
    buf.writeln("\tif i != nil {");
    buf.writeln("\t\to := i.toC()");
    buf.writeln("\t\tout = &o");
    buf.writeln("\t\tfinisher = func() {");
    buf.writeln(&format!("\t\t\t*i = new{}FromC(o)", name));
    buf.writeln("\t\t}");
    buf.writeln("\t} else {");
    buf.writeln("\t\tfinisher = func() {}");
    buf.writeln("\t}");
    buf.writeln("\treturn");
    buf.writeln("}");
    buf.blank();

    let from_c: Vec<String> = layout
        .fields
        .iter()
        .map(|f| match f.kind {
            FieldKind::Value(nested) => {
                format!("{}: new{}FromC(cvalue.{})", f.go_name, nested, f.c_name)
            }
            _ => format!("{}: {}(cvalue.{})", f.go_name, f.kind.go_type(), f.c_name),
        })
        .collect();
    buf.writeln(&format!("func new{}FromC(cvalue C.{}) {} {{", name, name, name));
    buf.writeln(&format!("\treturn {}{{{}}}", name, from_c.join(", ")));
    buf.writeln("}");
    buf.blank();

    buf.writeln(&format!("func new{}FromCPtr(cvalue *C.{}) {} {{", name, name, name));
    buf.writeln(&format!("\treturn new{}FromC(*cvalue)", name));
    buf.writeln("}");

    buf.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render() -> String {
        render_support(&NamingConventions::default(), "cimgui", &["cimgui_wrapper.h".to_string()])
    }

    #[test]
    fn test_header_includes_stdlib() {
        let out = render();
        assert!(out.contains("// #include \"cimgui_wrapper.h\"\n// #include <stdlib.h>\nimport \"C\"\nimport \"unsafe\"\n"));
    }

    #[test]
    fn test_vec2_conversions() {
        let out = render();
        assert!(out.contains("type ImVec2 struct {\n\tX float32\n\tY float32\n}\n"));
        assert!(out.contains("\treturn C.ImVec2{x: C.float(i.X), y: C.float(i.Y)}\n"));
        assert!(out.contains("\treturn ImVec2{X: float32(cvalue.x), Y: float32(cvalue.y)}\n"));
        assert!(out.contains("func newImVec2FromCPtr(cvalue *C.ImVec2) ImVec2 {\n\treturn newImVec2FromC(*cvalue)\n}"));
        assert!(out.contains("func (i *ImVec2) wrap() (out *C.ImVec2, finisher func()) {"));
    }

    #[test]
    fn test_nested_fields() {
        let out = render();
        assert!(out.contains("\treturn C.ImRect{Min: i.Min.toC(), Max: i.Max.toC()}\n"));
        assert!(out.contains("\treturn ImColor{Value: newImVec4FromC(cvalue.Value)}\n"));
    }

    #[test]
    fn test_helpers_present() {
        let out = render();
        for helper in ["wrapString", "wrapFloat", "wrapBool", "wrapInt32"] {
            assert!(out.contains(&format!("func {}(", helper)), "{}", helper);
        }
    }

    #[test]
    fn test_value_structs_follow_conventions() {
        let conventions = NamingConventions {
            value_structs: vec!["ImVec2".into(), "Unknown".into()],
            ..Default::default()
        };
        let names: Vec<_> = value_layouts(&conventions).iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["ImVec2"]);
    }
}
