//! microc-gen — tree-recursive code generator.
//!
//! Walks a [`microc_par::ast::Ast`] and emits GNU-assembler Intel-syntax
//! x86-64 text (§4.4). Expressions follow a stack-machine discipline:
//! every expression pushes its 64-bit-widened result, and every
//! statement leaves the stack pointer exactly as it found it (the one
//! exception, `return`, does not return at all). The [`scope`] table is
//! the sole source of truth for identifier-to-stack-offset mapping.

mod expr;
mod function;
mod scope;
mod stmt;

use microc_par::ast::Ast;
use microc_util::error::CodegenResult;
use scope::ScopeTable;

/// The per-function state threaded through statement and expression
/// lowering: the growing output buffer, the live scope stack, the
/// function's own label counter, and the loop-label stack that
/// `break`/`continue` resolve against.
pub(crate) struct Codegen<'ast> {
    ast: &'ast Ast,
    out: String,
    scope: ScopeTable,
    label_counter: u32,
    function_name: String,
    /// `(start, end)` label indices of each loop currently being
    /// lowered, innermost last (§4.4 "loop label scoping").
    loop_stack: Vec<(u32, u32)>,
}

impl<'ast> Codegen<'ast> {
    fn new(ast: &'ast Ast) -> Self {
        Self {
            ast,
            out: String::new(),
            scope: ScopeTable::new(),
            label_counter: 0,
            function_name: String::new(),
            loop_stack: Vec::new(),
        }
    }

    /// Appends one line of assembly, tab-indented, newline-terminated.
    fn emit(&mut self, line: impl AsRef<str>) {
        self.out.push('\t');
        self.out.push_str(line.as_ref());
        self.out.push('\n');
    }

    /// Appends a label line (no leading tab, colon-terminated).
    fn emit_label(&mut self, label: &str) {
        self.out.push_str(label);
        self.out.push_str(":\n");
    }

    /// Allocates the next label index in the current function (§4.4:
    /// "every `if` consumes one index, every `while` consumes two").
    fn next_label(&mut self) -> u32 {
        let index = self.label_counter;
        self.label_counter += 1;
        index
    }

    /// The `.<function-name><index>` label name (§4.4).
    fn label(&self, index: u32) -> String {
        format!(".{}{}", self.function_name, index)
    }
}

/// Lowers a full program to assembly text, function by function.
///
/// The first line of the output is `.intel_syntax noprefix` (§4.4); a
/// function is lowered in source order and each gets its own fresh
/// [`Codegen`] state (scope stack, label counter) per §4.4's function
/// prologue.
pub fn generate(ast: &Ast) -> CodegenResult<String> {
    let mut out = String::from("\t.intel_syntax noprefix\n");
    for &func_id in ast.children(ast.root) {
        let mut gen = Codegen::new(ast);
        gen.lower_function(func_id)?;
        out.push_str(&gen.out);
    }
    Ok(out)
}
