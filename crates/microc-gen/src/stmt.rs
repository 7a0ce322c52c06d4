//! Statement lowering (§4.4 "Statement lowering").
//!
//! Every statement lowering other than `return` leaves the stack
//! pointer exactly where it found it (§8 "Stack discipline"); dead-code
//! elision after a definite return is computed compositionally as each
//! `lower_statement` call returns whether *it* is definite-return (§9
//! "Definite-return analysis").

use crate::Codegen;
use microc_par::ast::{NodeId, NodeKind};
use microc_util::error::{CodegenError, CodegenResult};

impl<'ast> Codegen<'ast> {
    /// Lowers one statement (or nested block), returning whether it is
    /// definite-return.
    pub(crate) fn lower_statement(&mut self, id: NodeId) -> CodegenResult<bool> {
        match self.ast.kind(id) {
            NodeKind::Block => self.lower_block(id),
            NodeKind::Declaration => {
                self.lower_declaration(id)?;
                Ok(false)
            }
            NodeKind::ExprStatement => {
                self.lower_expr_statement(id)?;
                Ok(false)
            }
            NodeKind::Return => {
                self.lower_return(id)?;
                Ok(true)
            }
            NodeKind::Break => {
                self.lower_break(id)?;
                Ok(false)
            }
            NodeKind::Continue => {
                self.lower_continue(id)?;
                Ok(false)
            }
            NodeKind::If => self.lower_if(id),
            NodeKind::While => {
                self.lower_while(id)?;
                Ok(false)
            }
            _ => Err(CodegenError::UnexpectedNodeKind("statement")),
        }
    }

    /// A nested `block`: fresh scope, dead-code elision, and an `add
    /// rsp` on exit unless a child was definite-return (§4.4 "block").
    fn lower_block(&mut self, id: NodeId) -> CodegenResult<bool> {
        self.scope.enter();
        let mut definite_return = false;
        for &stmt_id in self.ast.children(id) {
            if self.lower_statement(stmt_id)? {
                definite_return = true;
                break;
            }
        }
        if let Some(line) = self.scope.exit(!definite_return) {
            self.out.push_str(&line);
        }
        Ok(definite_return)
    }

    /// `declaration`: for each declarator, *declare* first (so any
    /// `sub rsp, 16` lands before the initializer's `push`, matching
    /// §4.4's literal order and avoiding a stack-offset-vs-`rsp`
    /// mismatch a reversed order would cause), then lower the
    /// initializer if present.
    fn lower_declaration(&mut self, id: NodeId) -> CodegenResult<()> {
        for &declarator_id in self.ast.children(id) {
            match self.ast.kind(declarator_id) {
                NodeKind::NoInitDeclare => {
                    let name_id = self.ast.children(declarator_id)[0];
                    let name = self.identifier_name(name_id);
                    let (_, reservation) = self.scope.declare(&name)?;
                    if let Some(line) = reservation {
                        self.out.push_str(&line);
                    }
                }
                NodeKind::InitDeclare => {
                    let children = self.ast.children(declarator_id);
                    let (name_id, init_id) = (children[0], children[1]);
                    let name = self.identifier_name(name_id);
                    let (offset, reservation) = self.scope.declare(&name)?;
                    if let Some(line) = reservation {
                        self.out.push_str(&line);
                    }
                    self.lower_expr(init_id)?;
                    self.emit("pop rax");
                    self.emit(format!("mov DWORD PTR [rbp - {offset}], eax"));
                }
                _ => return Err(CodegenError::UnexpectedNodeKind("declarator")),
            }
        }
        Ok(())
    }

    /// `expr-statement`: lower the `top-expr` if present, then drop its
    /// result — an empty `;` has no child and emits nothing.
    fn lower_expr_statement(&mut self, id: NodeId) -> CodegenResult<()> {
        if let Some(&top_expr_id) = self.ast.children(id).first() {
            self.lower_top_expr(top_expr_id)?;
            self.emit("add rsp, 8");
        }
        Ok(())
    }

    /// `return e`: lower the `top-expr` if present, pop the result into
    /// `eax`, tear down the frame, and return.
    fn lower_return(&mut self, id: NodeId) -> CodegenResult<()> {
        if let Some(&top_expr_id) = self.ast.children(id).first() {
            self.lower_top_expr(top_expr_id)?;
            self.emit("pop rax");
        }
        self.emit("mov rsp, rbp");
        self.emit("pop rbp");
        self.emit("ret");
        Ok(())
    }

    fn lower_break(&mut self, _id: NodeId) -> CodegenResult<()> {
        let (_, end) = *self
            .loop_stack
            .last()
            .ok_or(CodegenError::LoopControlOutsideLoop("break"))?;
        let label = self.label(end);
        self.emit(format!("jmp {label}"));
        Ok(())
    }

    fn lower_continue(&mut self, _id: NodeId) -> CodegenResult<()> {
        let (start, _) = *self
            .loop_stack
            .last()
            .ok_or(CodegenError::LoopControlOutsideLoop("continue"))?;
        let label = self.label(start);
        self.emit(format!("jmp {label}"));
        Ok(())
    }

    /// `if cond then [else]` (§4.4): one label for the false branch,
    /// shared with the point where an `else` (if any) begins. The `if`
    /// is definite-return iff both branches exist and are each
    /// definite-return.
    fn lower_if(&mut self, id: NodeId) -> CodegenResult<bool> {
        let children = self.ast.children(id);
        let (cond_id, then_id) = (children[0], children[1]);
        let else_id = children.get(2).copied();

        let false_label_index = self.next_label();
        self.lower_expr(cond_id)?;
        self.emit("pop rax");
        self.emit("test eax, eax");
        let false_label = self.label(false_label_index);
        self.emit(format!("je {false_label}"));
        let then_returns = self.lower_statement(then_id)?;
        self.emit_label(&false_label);

        let else_returns = match else_id {
            Some(else_id) => Some(self.lower_statement(else_id)?),
            None => None,
        };

        Ok(matches!(else_returns, Some(true)) && then_returns)
    }

    /// `while cond body` (§4.4): two labels, start and end; never
    /// definite-return even when the condition is a constant.
    fn lower_while(&mut self, id: NodeId) -> CodegenResult<()> {
        let children = self.ast.children(id);
        let (cond_id, body_id) = (children[0], children[1]);

        let start_index = self.next_label();
        let end_index = self.next_label();
        let start_label = self.label(start_index);
        let end_label = self.label(end_index);

        self.emit_label(&start_label);
        self.lower_expr(cond_id)?;
        self.emit("pop rax");
        self.emit("test eax, eax");
        self.emit(format!("je {end_label}"));

        self.loop_stack.push((start_index, end_index));
        self.lower_statement(body_id)?;
        self.loop_stack.pop();

        self.emit(format!("jmp {start_label}"));
        self.emit_label(&end_label);
        Ok(())
    }

    pub(crate) fn identifier_name(&self, id: NodeId) -> String {
        self.ast
            .get(id)
            .name
            .clone()
            .expect("identifier node carries a name")
    }
}
