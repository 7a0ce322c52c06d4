//! Statement and block parsing: `block`, `block-item`, `statement`, and
//! the balanced-parens `declarator`.

use crate::ast::{NodeId, NodeKind};
use crate::Parser;
use microc_lex::TokenKind;
use microc_util::error::ParseResult;

impl<'a> Parser<'a> {
    /// `block := "{" block-item* "}"`
    pub(crate) fn parse_block(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        self.expect(&TokenKind::LBrace, "'{'")?;
        let mut items = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.check(&TokenKind::Eof) {
                return Err(microc_util::error::ParseError::UnexpectedEof {
                    offset: self.current_span().start,
                });
            }
            items.push(self.parse_block_item()?);
        }
        self.expect(&TokenKind::RBrace, "'}'")?;
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::Block, items, span))
    }

    /// `block-item := block | statement`
    fn parse_block_item(&mut self) -> ParseResult<NodeId> {
        if self.check(&TokenKind::LBrace) {
            self.parse_block()
        } else {
            self.parse_statement()
        }
    }

    /// Either a braced `block` or a single `statement`, used by `if`
    /// and `while` bodies (`block-or-stmt` in §4.2's grammar).
    fn parse_block_or_stmt(&mut self) -> ParseResult<NodeId> {
        if self.check(&TokenKind::LBrace) {
            self.parse_block()
        } else {
            self.parse_statement()
        }
    }

    fn parse_statement(&mut self) -> ParseResult<NodeId> {
        match self.peek() {
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Break => self.parse_break_stmt(),
            TokenKind::Continue => self.parse_continue_stmt(),
            TokenKind::Int => self.parse_declaration_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_return_stmt(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        self.bump(); // "return"
        let mut children = Vec::new();
        if !self.check(&TokenKind::Semicolon) {
            children.push(self.parse_top_expr()?);
        }
        self.expect(&TokenKind::Semicolon, "';'")?;
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::Return, children, span))
    }

    fn parse_break_stmt(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        self.bump();
        self.expect(&TokenKind::Semicolon, "';'")?;
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::Break, Vec::new(), span))
    }

    fn parse_continue_stmt(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        self.bump();
        self.expect(&TokenKind::Semicolon, "';'")?;
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::Continue, Vec::new(), span))
    }

    /// `"int" declarator ( "=" assign )? ( "," declarator ( "=" assign )? )* ";"`
    fn parse_declaration_stmt(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        self.bump(); // "int"
        let mut declarators = vec![self.parse_one_declarator()?];
        while self.eat(&TokenKind::Comma) {
            declarators.push(self.parse_one_declarator()?);
        }
        self.expect(&TokenKind::Semicolon, "';'")?;
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::Declaration, declarators, span))
    }

    /// One `declarator ( "=" assign )?`, producing an `init-declare` or
    /// `no-init-declare` node.
    fn parse_one_declarator(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        let name_node = self.parse_declarator()?;
        if self.eat(&TokenKind::Assign) {
            let init = self.parse_assign()?;
            let span = start.merge(self.current_span());
            Ok(self
                .builder
                .push(NodeKind::InitDeclare, vec![name_node, init], span))
        } else {
            let span = start.merge(self.current_span());
            Ok(self
                .builder
                .push(NodeKind::NoInitDeclare, vec![name_node], span))
        }
    }

    /// `declarator := "("* IDENT ")"*`, parens must balance exactly.
    fn parse_declarator(&mut self) -> ParseResult<NodeId> {
        let mut open = 0usize;
        let open_start = self.current_span();
        while self.eat(&TokenKind::LParen) {
            open += 1;
        }
        let (name, name_span) = self.expect_ident()?;
        let name_node = self.builder.push_identifier(name, name_span);
        let mut close = 0usize;
        while self.eat(&TokenKind::RParen) {
            close += 1;
        }
        if open != close {
            return Err(microc_util::error::ParseError::UnbalancedDeclarator {
                offset: open_start.start,
            });
        }
        Ok(name_node)
    }

    /// `"if" "(" assign ")" block-or-stmt ( "else" block-or-stmt )?`
    fn parse_if_stmt(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        self.bump(); // "if"
        self.expect(&TokenKind::LParen, "'('")?;
        let cond = self.parse_assign()?;
        self.expect(&TokenKind::RParen, "')'")?;
        let then_branch = self.parse_block_or_stmt()?;
        let mut children = vec![cond, then_branch];
        if self.eat(&TokenKind::Else) {
            children.push(self.parse_block_or_stmt()?);
        }
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::If, children, span))
    }

    /// `"while" "(" assign ")" block-or-stmt`
    fn parse_while_stmt(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        self.bump(); // "while"
        self.expect(&TokenKind::LParen, "'('")?;
        let cond = self.parse_assign()?;
        self.expect(&TokenKind::RParen, "')'")?;
        let body = self.parse_block_or_stmt()?;
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::While, vec![cond, body], span))
    }

    /// `top-expr? ";"` — an empty `;` is a legal, childless statement.
    fn parse_expr_stmt(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        let mut children = Vec::new();
        if !self.check(&TokenKind::Semicolon) {
            children.push(self.parse_top_expr()?);
        }
        self.expect(&TokenKind::Semicolon, "';'")?;
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::ExprStatement, children, span))
    }
}
