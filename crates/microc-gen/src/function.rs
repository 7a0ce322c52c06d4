//! Function prologue and body lowering (§4.4 "Function prologue" /
//! "Function body").

use crate::Codegen;
use microc_par::ast::{NodeId, NodeKind};
use microc_util::error::{CodegenError, CodegenResult};

/// The 32-bit System V argument registers, in parameter order. More
/// than six parameters (or call arguments) has nowhere left to go.
pub(crate) const ARG_REGS_32: [&str; 6] = ["edi", "esi", "edx", "ecx", "r8d", "r9d"];

/// The 64-bit parents of [`ARG_REGS_32`], used when popping a pushed
/// argument value straight into its destination register at a call
/// site (`pop` only ever targets a 64-bit GPR in long mode).
pub(crate) const ARG_REGS_64: [&str; 6] = ["rdi", "rsi", "rdx", "rcx", "r8", "r9"];

impl<'ast> Codegen<'ast> {
    pub(crate) fn lower_function(&mut self, func_id: NodeId) -> CodegenResult<()> {
        let children = self.ast.children(func_id);
        let (name_id, params_id, block_id) = (children[0], children[1], children[2]);
        let name = self
            .ast
            .get(name_id)
            .name
            .clone()
            .expect("function name node carries a name");

        self.function_name = name.clone();
        self.label_counter = 0;

        self.out.push_str(&format!("\t.globl {name}\n"));
        self.out.push_str(&format!("{name}:\n"));
        self.emit("push rbp");
        self.emit("mov rbp, rsp");

        self.scope.enter();

        let params = self.ast.children(params_id);
        if params.len() > ARG_REGS_32.len() {
            return Err(CodegenError::TooManyArguments(name));
        }
        for (i, &param_id) in params.iter().enumerate() {
            let param_name = self
                .ast
                .get(param_id)
                .name
                .clone()
                .expect("param node carries a name");
            let (offset, reservation) = self.scope.declare(&param_name)?;
            if let Some(line) = reservation {
                self.out.push_str(&line);
            }
            self.emit(format!(
                "mov DWORD PTR [rbp - {offset}], {}",
                ARG_REGS_32[i]
            ));
        }

        let definite_return = self.lower_block_body(block_id)?;
        if let Some(line) = self.scope.exit(!definite_return) {
            self.out.push_str(&line);
        }

        Ok(())
    }

    /// Lowers a `block`'s direct statement children without the usual
    /// `enter`/`exit` wrapping a nested block would get — used only for
    /// a function's outermost block, whose frame the prologue already
    /// entered and whose exit the caller (`lower_function`) controls.
    ///
    /// Returns whether the block is definite-return (§9 "Definite-
    /// return analysis"): `block ⇒ any child ⇒ true`.
    fn lower_block_body(&mut self, block_id: NodeId) -> CodegenResult<bool> {
        debug_assert_eq!(self.ast.kind(block_id), NodeKind::Block);
        let mut definite_return = false;
        for &stmt_id in self.ast.children(block_id) {
            if self.lower_statement(stmt_id)? {
                definite_return = true;
                break;
            }
        }
        Ok(definite_return)
    }
}
