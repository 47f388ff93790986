//! Top-level generation
//!
//! Owns the per-run state: a `GenerationContext` built once from the input
//! and passed by reference, and an `Emitter` that walks the functions in
//! input order accumulating text, outcomes and diagnostics.

use super::buffer::{go_file_header, CodeBuffer};
use super::enums::render_enums;
use super::shaper::{shape_declaration, DeclKind};
use super::structs::render_structs;
use super::support::render_support;
use crate::core::{ApiDescription, FuncDef, NamingConventions, TypeRegistry};
use crate::errors::{
    find_similar_names, Diagnostic, DiagnosticCollector, GenError, SkipReason, Unsupported,
};
use crate::marshal::{resolve_args, resolve_return, CoverageGaps, MarshalContext, MarshalTable};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Maximum edit distance for "did you mean" suggestions.
const SUGGESTION_DISTANCE: usize = 3;

/// Presentation of the emitted artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOptions {
    pub package: String,
    pub structs_includes: Vec<String>,
    pub funcs_includes: Vec<String>,
    /// Also emit the value-struct support artifact.
    pub support: bool,
}

impl Default for ArtifactOptions {
    fn default() -> Self {
        Self {
            package: "cimgui".to_string(),
            structs_includes: vec!["cimgui_wrapper.h".to_string()],
            funcs_includes: vec![
                "extra_type.h".to_string(),
                "cimgui_structs_accessor.h".to_string(),
                "cimgui_wrapper.h".to_string(),
            ],
            support: true,
        }
    }
}

/// Everything generation reads. Built once per run, never mutated after.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub registry: TypeRegistry,
    pub table: MarshalTable,
    pub conventions: NamingConventions,
    pub options: ArtifactOptions,
}

impl GenerationContext {
    pub fn new(api: &ApiDescription, conventions: NamingConventions, options: ArtifactOptions) -> Self {
        let registry = TypeRegistry::build(&api.enums, &api.structs, &conventions);
        Self {
            registry,
            table: MarshalTable::builtin(),
            conventions,
            options,
        }
    }

    pub fn marshal(&self) -> MarshalContext<'_> {
        MarshalContext::new(&self.registry, &self.table, &self.conventions)
    }

    pub fn coverage_gaps(&self, api: &ApiDescription) -> CoverageGaps {
        self.table.coverage_gaps(api, &self.registry)
    }

    /// Known type names close to `ty`.
    pub fn suggestions(&self, problem: &Unsupported) -> Vec<String> {
        let (ty, keys) = match problem {
            Unsupported::Arg { ty, .. } => (ty, self.table.arg_keys()),
            Unsupported::Return { ty } => (ty, self.table.return_keys()),
        };
        let candidates = keys
            .into_iter()
            .chain(self.registry.enum_names().iter().map(String::as_str))
            .chain(self.registry.struct_names().iter().map(String::as_str));
        find_similar_names(ty, candidates, SUGGESTION_DISTANCE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBindings {
    pub enums: String,
    pub structs: String,
    pub funcs: String,
    pub support: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FunctionState {
    Emitted { name: String, shape: DeclKind },
    Skipped { reason: SkipReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionOutcome {
    pub symbol: String,
    pub outcome: FunctionState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkipStats {
    pub skipped_args: usize,
    pub skipped_returns: usize,
    pub dropped_setters: usize,
    pub unresolved_constructors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub total: usize,
    pub converted: usize,
    pub stats: SkipStats,
    pub coverage_gaps: CoverageGaps,
    pub diagnostics: Vec<Diagnostic>,
    pub functions: Vec<FunctionOutcome>,
}

impl GenerationReport {
    pub fn skipped(&self) -> usize {
        self.total - self.converted
    }

    pub fn summary_line(&self) -> String {
        format!("Convert progress: {}/{}", self.converted, self.total)
    }

    pub fn to_json(&self) -> Result<String, GenError> {
        serde_json::to_string_pretty(self).map_err(GenError::Report)
    }
}

pub struct Emitter<'a> {
    ctx: &'a GenerationContext,
    funcs: CodeBuffer,
    functions: Vec<FunctionOutcome>,
    diagnostics: DiagnosticCollector,
    stats: SkipStats,
    converted: usize,
}

impl<'a> Emitter<'a> {
    pub fn new(ctx: &'a GenerationContext) -> Self {
        Self {
            ctx,
            funcs: CodeBuffer::new(),
            functions: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
            stats: SkipStats::default(),
            converted: 0,
        }
    }

    /// Resolves, shapes and renders one function. A failure only affects
    /// this function.
    pub fn emit_function(&mut self, func: &FuncDef) {
        let ctx = self.ctx;
        let marshal = ctx.marshal();
        let shaped = resolve_args(&marshal, func)
            .map_err(SkipReason::from)
            .and_then(|args| {
                let ret = resolve_return(&marshal, func)?;
                shape_declaration(func, args, ret, &ctx.conventions)
            });

        let outcome = match shaped {
            Ok(decl) => {
                debug!(symbol = %func.func_name, name = %decl.name, shape = %decl.kind, "emitted");
                self.funcs.write_block(&decl.render());
                self.funcs.blank();
                self.converted += 1;
                FunctionState::Emitted { name: decl.name, shape: decl.kind }
            }
            Err(reason) => {
                self.record_skip(func, &reason);
                FunctionState::Skipped { reason }
            }
        };

        self.functions.push(FunctionOutcome { symbol: func.func_name.clone(), outcome });
    }

    fn record_skip(&mut self, func: &FuncDef, reason: &SkipReason) {
        match reason {
            SkipReason::Unsupported(problem) => {
                match problem {
                    Unsupported::Arg { .. } => self.stats.skipped_args += 1,
                    Unsupported::Return { .. } => self.stats.skipped_returns += 1,
                }
                warn!(symbol = %func.func_name, "{}", problem);
                let suggestions = self.ctx.suggestions(problem);
                self.diagnostics
                    .add(Diagnostic::new(&func.func_name, problem.clone()).with_suggestions(suggestions));
            }
            SkipReason::SetterNameFiltered | SkipReason::SetterWithoutReceiver => {
                self.stats.dropped_setters += 1;
                debug!(symbol = %func.func_name, %reason, "setter dropped");
            }
            SkipReason::ConstructorTargetUnknown { .. } => {
                self.stats.unresolved_constructors += 1;
                debug!(symbol = %func.func_name, %reason, "constructor dropped");
            }
        }
    }

    pub fn finish(self, api: &ApiDescription, coverage_gaps: CoverageGaps) -> (GeneratedBindings, GenerationReport) {
        let options = &self.ctx.options;
        let conventions = &self.ctx.conventions;

        let body = self.funcs.into_string();
        let imports: &[&str] = if body.contains("unsafe.") { &["unsafe"] } else { &[] };
        let mut funcs = go_file_header(&options.package, &options.funcs_includes, imports);
        funcs.push_str(&body);

        let bindings = GeneratedBindings {
            enums: render_enums(&api.enums, conventions, &options.package),
            structs: render_structs(self.ctx.registry.struct_names(), &options.package, &options.structs_includes),
            funcs,
            support: options
                .support
                .then(|| render_support(conventions, &options.package, &options.structs_includes)),
        };

        let report = GenerationReport {
            total: api.funcs.len(),
            converted: self.converted,
            stats: self.stats,
            coverage_gaps,
            diagnostics: self.diagnostics.into_diagnostics(),
            functions: self.functions,
        };

        (bindings, report)
    }
}

/// Runs the whole pipeline over one API description.
#[instrument(skip_all, fields(enums = api.enums.len(), structs = api.structs.len(), funcs = api.funcs.len()))]
pub fn generate(ctx: &GenerationContext, api: &ApiDescription) -> (GeneratedBindings, GenerationReport) {
    let gaps = ctx.coverage_gaps(api);
    if !gaps.is_empty() {
        warn!(
            arg_types = ?gaps.arg_types,
            return_types = ?gaps.return_types,
            "types not covered by the marshalling table"
        );
    }

    let mut emitter = Emitter::new(ctx);
    for func in &api.funcs {
        emitter.emit_function(func);
    }
    let (bindings, report) = emitter.finish(api, gaps);

    info!(converted = report.converted, total = report.total, "{}", report.summary_line());
    (bindings, report)
}
