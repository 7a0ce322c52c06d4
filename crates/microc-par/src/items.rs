//! Top-level items: `top-level := ( "int" function )*` and
//! `function := IDENT "(" params-def ")" block`.

use crate::ast::{NodeId, NodeKind};
use crate::Parser;
use microc_lex::TokenKind;
use microc_util::error::ParseResult;

impl<'a> Parser<'a> {
    pub(crate) fn parse_top_level(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        let mut functions = Vec::new();
        while !self.check(&TokenKind::Eof) {
            self.expect(&TokenKind::Int, "'int' (a function's return type)")?;
            functions.push(self.parse_function()?);
        }
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::TopLevel, functions, span))
    }

    fn parse_function(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        let (name, name_span) = self.expect_ident()?;
        let name_node = self.builder.push_identifier(name, name_span);

        self.expect(&TokenKind::LParen, "'('")?;
        let params = self.parse_params_def()?;
        self.expect(&TokenKind::RParen, "')'")?;

        let block = self.parse_block()?;
        let span = start.merge(self.current_span());
        Ok(self
            .builder
            .push(NodeKind::Function, vec![name_node, params, block], span))
    }

    /// `params-def := ( "int" IDENT ( "," "int" IDENT )* )?`
    fn parse_params_def(&mut self) -> ParseResult<NodeId> {
        let start = self.current_span();
        let mut params = Vec::new();
        if self.eat(&TokenKind::Int) {
            let (name, span) = self.expect_ident()?;
            params.push(self.builder.push_identifier(name, span));
            while self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::Int, "'int'")?;
                let (name, span) = self.expect_ident()?;
                params.push(self.builder.push_identifier(name, span));
            }
        }
        let span = start.merge(self.current_span());
        Ok(self.builder.push(NodeKind::Params, params, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use microc_util::span::FileId;

    #[test]
    fn empty_function_has_no_params() {
        let ast = parse("int main() { }", FileId(0)).unwrap();
        let top = ast.root;
        let func = ast.children(top)[0];
        let children = ast.children(func);
        assert_eq!(ast.kind(children[1]), NodeKind::Params);
        assert!(ast.children(children[1]).is_empty());
    }

    #[test]
    fn params_are_identifiers_in_declaration_order() {
        let ast = parse("int add(int a, int b) { return a; }", FileId(0)).unwrap();
        let func = ast.children(ast.root)[0];
        let params = ast.children(func)[1];
        let names: Vec<_> = ast
            .children(params)
            .iter()
            .map(|&id| ast.get(id).name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn two_functions_both_land_under_top_level() {
        let ast = parse("int two() { return 2; } int main() { return two(); }", FileId(0)).unwrap();
        assert_eq!(ast.children(ast.root).len(), 2);
    }

    #[test]
    fn missing_int_before_function_is_an_error() {
        let err = parse("main() { return 0; }", FileId(0)).unwrap_err();
        assert!(matches!(
            err,
            microc_util::error::ParseError::Expected { .. }
        ));
    }
}
