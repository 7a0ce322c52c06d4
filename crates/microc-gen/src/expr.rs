//! Expression lowering (§4.4 "Expression lowering").
//!
//! Every expression emits code that pushes its 64-bit-widened result
//! onto the stack; writing a 32-bit register zero-extends the upper 32
//! bits of its 64-bit parent for free, so `push rax` after a `mov
//! eax, ...` always produces the documented "64-bit word holding a
//! 32-bit result in the low bytes" without an explicit extension.

use crate::function::ARG_REGS_64;
use crate::Codegen;
use microc_par::ast::{NodeId, NodeKind};
use microc_util::error::{CodegenError, CodegenResult, ScopeError};

impl<'ast> Codegen<'ast> {
    /// `top-expr (e1 … en)`: evaluate each in order, dropping every
    /// result but the last so only the final sub-expression's value
    /// remains on the stack (§3: "all but the last are evaluated for
    /// side effect"). Dropping each discarded value immediately, rather
    /// than in one bulk `add rsp` after every push, is what actually
    /// leaves the *last* value on top — a single trailing `add rsp,
    /// 8·(n-1)` would instead strand the *first* one.
    pub(crate) fn lower_top_expr(&mut self, id: NodeId) -> CodegenResult<()> {
        debug_assert_eq!(self.ast.kind(id), NodeKind::TopExpr);
        let children = self.ast.children(id);
        let last = children.len() - 1;
        for (i, &child_id) in children.iter().enumerate() {
            self.lower_expr(child_id)?;
            if i != last {
                self.emit("add rsp, 8");
            }
        }
        Ok(())
    }

    pub(crate) fn lower_expr(&mut self, id: NodeId) -> CodegenResult<()> {
        match self.ast.kind(id) {
            NodeKind::Number => {
                let value = self.ast.get(id).value.expect("number node carries a value");
                self.emit(format!("push {value}"));
                Ok(())
            }
            NodeKind::Identifier => {
                let name = self.identifier_name(id);
                let offset = self
                    .scope
                    .resolve(&name)
                    .ok_or_else(|| ScopeError::Undeclared(name.clone()))?;
                self.emit(format!("mov eax, DWORD PTR [rbp - {offset}]"));
                self.emit("push rax");
                Ok(())
            }
            NodeKind::Assign => self.lower_assign(id),
            NodeKind::Add => self.lower_arith_binary(id, "add"),
            NodeKind::Sub => self.lower_arith_binary(id, "sub"),
            NodeKind::Mul => self.lower_arith_binary(id, "imul"),
            NodeKind::BitAnd => self.lower_arith_binary(id, "and"),
            NodeKind::BitOr => self.lower_arith_binary(id, "or"),
            NodeKind::BitXor => self.lower_arith_binary(id, "xor"),
            NodeKind::Div => self.lower_div_mod(id, false),
            NodeKind::Mod => self.lower_div_mod(id, true),
            NodeKind::Eq => self.lower_comparison(id, "sete"),
            NodeKind::Ne => self.lower_comparison(id, "setne"),
            NodeKind::BitNot => self.lower_unary(id, "not eax"),
            NodeKind::Negate => self.lower_unary(id, "neg eax"),
            NodeKind::LogicalNot => self.lower_logical_not(id),
            NodeKind::Call => self.lower_call(id),
            _ => Err(CodegenError::UnexpectedNodeKind("expression")),
        }
    }

    /// `assign x rhs`: evaluate `rhs`, store its low 32 bits into `x`'s
    /// slot, and leave the full pushed value on the stack as the
    /// expression's own result (never popped) — this is what lets
    /// `x = y = e` chain without extra bookkeeping.
    fn lower_assign(&mut self, id: NodeId) -> CodegenResult<()> {
        let children = self.ast.children(id);
        let (target_id, rhs_id) = (children[0], children[1]);
        let name = self.identifier_name(target_id);
        let offset = self
            .scope
            .resolve(&name)
            .ok_or_else(|| ScopeError::Undeclared(name.clone()))?;
        self.lower_expr(rhs_id)?;
        self.emit("mov rax, QWORD PTR [rsp]");
        self.emit(format!("mov DWORD PTR [rbp - {offset}], eax"));
        Ok(())
    }

    /// `+`, `-`, `*`, `&`, `|`, `^`: eval both operands, pop right then
    /// left, apply `mnemonic eax, ebx`, push the result.
    fn lower_arith_binary(&mut self, id: NodeId, mnemonic: &str) -> CodegenResult<()> {
        let children = self.ast.children(id);
        self.lower_expr(children[0])?;
        self.lower_expr(children[1])?;
        self.emit("pop rbx");
        self.emit("pop rax");
        self.emit(format!("{mnemonic} eax, ebx"));
        self.emit("push rax");
        Ok(())
    }

    /// `/`, `%`: sign-extend the dividend into `edx:eax` via `cdq`
    /// before `idiv`; `/` keeps the quotient (`eax`), `%` the remainder
    /// (`edx`).
    fn lower_div_mod(&mut self, id: NodeId, is_mod: bool) -> CodegenResult<()> {
        let children = self.ast.children(id);
        self.lower_expr(children[0])?;
        self.lower_expr(children[1])?;
        self.emit("pop rbx");
        self.emit("pop rax");
        self.emit("cdq");
        self.emit("idiv ebx");
        if is_mod {
            self.emit("push rdx");
        } else {
            self.emit("push rax");
        }
        Ok(())
    }

    /// `==`, `!=`: compare the widened 64-bit values, materialize the
    /// flag with `sete`/`setne` into `al`, zero-extend back to `eax`.
    fn lower_comparison(&mut self, id: NodeId, set_mnemonic: &str) -> CodegenResult<()> {
        let children = self.ast.children(id);
        self.lower_expr(children[0])?;
        self.lower_expr(children[1])?;
        self.emit("pop rbx");
        self.emit("pop rax");
        self.emit("cmp rax, rbx");
        self.emit(format!("{set_mnemonic} al"));
        self.emit("movzx eax, al");
        self.emit("push rax");
        Ok(())
    }

    /// Unary `~` and `-`: pop, apply the single-operand instruction to
    /// `eax`, push.
    fn lower_unary(&mut self, id: NodeId, instruction: &str) -> CodegenResult<()> {
        let operand_id = self.ast.children(id)[0];
        self.lower_expr(operand_id)?;
        self.emit("pop rax");
        self.emit(instruction);
        self.emit("push rax");
        Ok(())
    }

    /// Unary `!`: pop, test for zero, materialize as a 0/1 `eax`.
    fn lower_logical_not(&mut self, id: NodeId) -> CodegenResult<()> {
        let operand_id = self.ast.children(id)[0];
        self.lower_expr(operand_id)?;
        self.emit("pop rax");
        self.emit("test eax, eax");
        self.emit("sete al");
        self.emit("movzx eax, al");
        self.emit("push rax");
        Ok(())
    }

    /// `call f(args)`: evaluate arguments strictly left-to-right,
    /// popping each into its destination register as soon as it
    /// finishes evaluating rather than after every argument has been
    /// pushed (§4.4 "tie-breaks and edge cases").
    fn lower_call(&mut self, id: NodeId) -> CodegenResult<()> {
        let children = self.ast.children(id);
        let (callee_id, args_id) = (children[0], children[1]);
        let callee = self.identifier_name(callee_id);
        let args = self.ast.children(args_id).to_vec();
        if args.len() > ARG_REGS_64.len() {
            return Err(CodegenError::TooManyArguments(callee));
        }
        for (i, &arg_id) in args.iter().enumerate() {
            self.lower_expr(arg_id)?;
            self.emit(format!("pop {}", ARG_REGS_64[i]));
        }
        self.emit(format!("call {callee}"));
        self.emit("push rax");
        Ok(())
    }
}
