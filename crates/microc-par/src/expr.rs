//! Expression parsing.
//!
//! ```text
//! top-expr       := assign ( "," assign )*
//! assign         := IDENT "=" assign | inc-or
//! inc-or         := exc-or ( "|" exc-or )*
//! exc-or         := and   ( "^" and   )*
//! and            := equality ( "&" equality )*
//! equality       := additive ( ("=="|"!=") additive )*
//! additive       := multiplicative ( ("+"|"-") multiplicative )*
//! multiplicative := unary ( ("*"|"/"|"%") unary )*
//! unary          := ( "!" | "~" | "-" )* primary
//! primary        := "(" assign ")" | NUMBER | IDENT ( "(" call-args ")" )?
//! call-args      := ( assign ( "," assign )* )?
//! ```
//!
//! `assign`'s one point of backtracking (§4.2, §9): an identifier might
//! be the start of an assignment or of a primary expression flowing
//! through `inc-or`; the parser commits only once it has peeked one
//! token past the identifier.

use crate::ast::{NodeId, NodeKind};
use crate::Parser;
use microc_lex::TokenKind;
use microc_util::error::{ParseError, ParseResult};

impl<'a> Parser<'a> {
    /// `top-expr := assign ( "," assign )*` — always wraps in a
    /// `top-expr` node, even for a single child (§3: "top-expr has ≥ 1
    /// expression children").
    pub(crate) fn parse_top_expr(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        let mut children = vec![self.parse_assign()?];
        while self.eat(&TokenKind::Comma) {
            children.push(self.parse_assign()?);
        }
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::TopExpr, children, span))
    }

    pub(crate) fn parse_assign(&mut self) -> ParseResult<NodeId> {
        if let TokenKind::Ident(_) = self.peek() {
            let snapshot = self.snapshot();
            let start = self.current_span();
            let ident_token = self.bump();
            if self.eat(&TokenKind::Assign) {
                let name = match ident_token.kind {
                    TokenKind::Ident(name) => name,
                    _ => unreachable!(),
                };
                let target = self.builder.push_identifier(name, ident_token.span);
                let value = self.parse_assign()?;
                let span = start.merge(self.current_span());
                return Ok(self.builder.push(NodeKind::Assign, vec![target, value], span));
            }
            self.restore(snapshot);
        }
        self.parse_inc_or()
    }

    fn parse_inc_or(&mut self) -> ParseResult<NodeId> {
        let mut left = self.parse_exc_or()?;
        while self.check(&TokenKind::Pipe) {
            let start = self.current_span();
            self.bump();
            let right = self.parse_exc_or()?;
            let span = start.merge(self.current_span());
            left = self.builder.push(NodeKind::BitOr, vec![left, right], span);
        }
        Ok(left)
    }

    fn parse_exc_or(&mut self) -> ParseResult<NodeId> {
        let mut left = self.parse_and()?;
        while self.check(&TokenKind::Caret) {
            let start = self.current_span();
            self.bump();
            let right = self.parse_and()?;
            let span = start.merge(self.current_span());
            left = self.builder.push(NodeKind::BitXor, vec![left, right], span);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<NodeId> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::Amp) {
            let start = self.current_span();
            self.bump();
            let right = self.parse_equality()?;
            let span = start.merge(self.current_span());
            left = self.builder.push(NodeKind::BitAnd, vec![left, right], span);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> ParseResult<NodeId> {
        let mut left = self.parse_additive()?;
        loop {
            let kind = if self.check(&TokenKind::EqEq) {
                NodeKind::Eq
            } else if self.check(&TokenKind::BangEq) {
                NodeKind::Ne
            } else {
                break;
            };
            let start = self.current_span();
            self.bump();
            let right = self.parse_additive()?;
            let span = start.merge(self.current_span());
            left = self.builder.push(kind, vec![left, right], span);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> ParseResult<NodeId> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let kind = if self.check(&TokenKind::Plus) {
                NodeKind::Add
            } else if self.check(&TokenKind::Minus) {
                NodeKind::Sub
            } else {
                break;
            };
            let start = self.current_span();
            self.bump();
            let right = self.parse_multiplicative()?;
            let span = start.merge(self.current_span());
            left = self.builder.push(kind, vec![left, right], span);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<NodeId> {
        let mut left = self.parse_unary()?;
        loop {
            let kind = if self.check(&TokenKind::Star) {
                NodeKind::Mul
            } else if self.check(&TokenKind::Slash) {
                NodeKind::Div
            } else if self.check(&TokenKind::Percent) {
                NodeKind::Mod
            } else {
                break;
            };
            let start = self.current_span();
            self.bump();
            let right = self.parse_unary()?;
            let span = start.merge(self.current_span());
            left = self.builder.push(kind, vec![left, right], span);
        }
        Ok(left)
    }

    /// `unary := ( "!" | "~" | "-" )* primary`
    fn parse_unary(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        let kind = if self.check(&TokenKind::Bang) {
            Some(NodeKind::LogicalNot)
        } else if self.check(&TokenKind::Tilde) {
            Some(NodeKind::BitNot)
        } else if self.check(&TokenKind::Minus) {
            Some(NodeKind::Negate)
        } else {
            None
        };
        match kind {
            Some(kind) => {
                self.bump();
                let operand = self.parse_unary()?;
                let span = start.merge(self.current_span());
                Ok(self.builder.push(kind, vec![operand], span))
            }
            None => self.parse_primary(),
        }
    }

    /// `primary := "(" assign ")" | NUMBER | IDENT ( "(" call-args ")" )?`
    fn parse_primary(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        match self.peek().clone() {
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_assign()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Number(value) => {
                self.bump();
                Ok(self.builder.push_number(value, start))
            }
            TokenKind::Ident(name) => {
                self.bump();
                let ident_node = self.builder.push_identifier(name, start);
                if self.check(&TokenKind::LParen) {
                    self.bump();
                    let args = self.parse_call_args()?;
                    self.expect(&TokenKind::RParen, "')'")?;
                    let span = start.merge(self.current_span());
                    Ok(self
                        .builder
                        .push(NodeKind::Call, vec![ident_node, args], span))
                } else {
                    Ok(ident_node)
                }
            }
            found => Err(ParseError::UnexpectedInPrimary {
                offset: start.start,
                found: format!("{found:?}"),
            }),
        }
    }

    /// `call-args := ( assign ( "," assign )* )?`
    fn parse_call_args(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            args.push(self.parse_assign()?);
            while self.eat(&TokenKind::Comma) {
                args.push(self.parse_assign()?);
            }
        }
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::Params, args, span))
    }
}
