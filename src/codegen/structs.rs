use super::buffer::{go_file_header, CodeBuffer};

/// Token type, pointer view, value view and constructor-from-value for each
/// opaque-handle struct. The token never owns what it points at.
pub fn render_structs(struct_names: &[String], package: &str, includes: &[String]) -> String {
    let imports: &[&str] = if struct_names.is_empty() { &[] } else { &["unsafe"] };

    let mut buf = CodeBuffer::new();
    buf.write_block(&go_file_header(package, includes, imports));

    for name in struct_names {
        buf.write_block(&render_handle(name));
        buf.blank();
    }

    buf.into_string()
}

fn render_handle(name: &str) -> String {
    format!(
        "type {n} uintptr\n\
         \n\
         func (data {n}) handle() *C.{n} {{\n\
         \treturn (*C.{n})(unsafe.Pointer(data))\n\
         }}\n\
         \n\
         func (data {n}) c() C.{n} {{\n\
         \treturn *(data.handle())\n\
         }}\n\
         \n\
         func new{n}FromC(cvalue C.{n}) {n} {{\n\
         \treturn {n}(unsafe.Pointer(&cvalue))\n\
         }}",
        n = name
    )
}
