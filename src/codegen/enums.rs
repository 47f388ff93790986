use super::buffer::{go_file_header, CodeBuffer};
use crate::core::{EnumDescriptor, NamingConventions};
use std::collections::HashSet;

/// One integer-backed named type per enum, one constant per value. Values
/// are copied verbatim, negatives and bit flags included. A display name
/// seen before is skipped, so only its first descriptor is emitted.
pub fn render_enums(enums: &[EnumDescriptor], conventions: &NamingConventions, package: &str) -> String {
    let mut buf = CodeBuffer::new();
    buf.write_block(&go_file_header(package, &[], &[]));

    let mut seen = HashSet::new();
    for e in enums {
        let name = conventions.enum_display_name(&e.name);
        if !seen.insert(name) {
            continue;
        }

        buf.writeln(&format!("type {} int", name));
        buf.writeln("const (");
        for v in &e.values {
            buf.writeln(&format!("\t{} = {}", v.name, v.value));
        }
        buf.writeln(")");
        buf.blank();
    }

    buf.into_string()
}
