//! Output text buffer shared by the artifact renderers.

/// Append-only text sink for one generated compilation unit.
#[derive(Debug, Default, Clone)]
pub struct CodeBuffer {
    output: String,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Appends a multi-line block verbatim, newline-terminated.
    pub fn write_block(&mut self, block: &str) {
        self.output.push_str(block);
        if !block.ends_with('\n') {
            self.output.push('\n');
        }
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

/// `package` clause plus the cgo preamble.
///
/// Includes starting with `<` are system headers and are kept verbatim;
/// anything else is quoted.
pub fn go_file_header(package: &str, includes: &[String], imports: &[&str]) -> String {
    let mut header = CodeBuffer::new();
    header.writeln(&format!("package {}", package));
    header.blank();

    if !includes.is_empty() {
        for include in includes {
            if include.starts_with('<') {
                header.writeln(&format!("// #include {}", include));
            } else {
                header.writeln(&format!("// #include \"{}\"", include));
            }
        }
        header.writeln("import \"C\"");
    }
    for import in imports {
        header.writeln(&format!("import \"{}\"", import));
    }
    if !includes.is_empty() || !imports.is_empty() {
        header.blank();
    }

    header.into_string()
}
