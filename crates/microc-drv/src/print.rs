//! Debug printers for the `--lex` and `--parse` stage selections.
//!
//! Deliberately out of scope for the core (§1): these exist only so a
//! developer can eyeball what the scanner and parser produced. Neither
//! format is part of any external contract.

use microc_lex::{Token, TokenKind};
use microc_par::ast::{Ast, NodeId, NodeKind};

/// Renders a token stream back into roughly the source text it came
/// from, one token's canonical spelling per word, space-separated.
/// Drops the `Sof`/`Eof` sentinels, which carry nothing worth printing.
pub fn print_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| spell(&t.kind))
        .collect::<Vec<_>>()
        .join(" ")
}

fn spell(kind: &TokenKind) -> Option<String> {
    let s = match kind {
        TokenKind::LParen => "(",
        TokenKind::RParen => ")",
        TokenKind::LBrace => "{",
        TokenKind::RBrace => "}",
        TokenKind::Semicolon => ";",
        TokenKind::Comma => ",",
        TokenKind::Assign => "=",
        TokenKind::EqEq => "==",
        TokenKind::BangEq => "!=",
        TokenKind::Plus => "+",
        TokenKind::Minus => "-",
        TokenKind::Star => "*",
        TokenKind::Slash => "/",
        TokenKind::Percent => "%",
        TokenKind::Bang => "!",
        TokenKind::Tilde => "~",
        TokenKind::Amp => "&",
        TokenKind::Pipe => "|",
        TokenKind::Caret => "^",
        TokenKind::Int => "int",
        TokenKind::Return => "return",
        TokenKind::If => "if",
        TokenKind::Else => "else",
        TokenKind::While => "while",
        TokenKind::Break => "break",
        TokenKind::Continue => "continue",
        TokenKind::Number(n) => return Some(n.to_string()),
        TokenKind::Ident(name) => return Some(name.clone()),
        TokenKind::Sof | TokenKind::Eof => return None,
    };
    Some(s.to_string())
}

/// Renders a syntax tree as a parenthesized s-expression, e.g.
/// `(top-level (function main (params) (block (return (top-expr 0)))))`.
/// `identifier` and `number` leaves print bare (no wrapping parens) —
/// everything else gets `(tag child...)`.
pub fn print_tree(ast: &Ast) -> String {
    let mut out = String::new();
    fmt_node(ast, ast.root, &mut out);
    out
}

fn fmt_node(ast: &Ast, id: NodeId, out: &mut String) {
    let node = ast.get(id);
    match node.kind {
        NodeKind::Identifier => {
            out.push_str(node.name.as_deref().expect("identifier carries a name"));
            return;
        }
        NodeKind::Number => {
            out.push_str(&node.value.expect("number carries a value").to_string());
            return;
        }
        _ => {}
    }

    let tag = match node.kind {
        NodeKind::TopLevel => "top-level",
        NodeKind::Function => "function",
        NodeKind::Params => "params",
        NodeKind::Block => "block",
        NodeKind::Declaration => "declaration",
        NodeKind::ExprStatement => "expr-statement",
        NodeKind::Return => "return",
        NodeKind::Break => "break",
        NodeKind::Continue => "continue",
        NodeKind::If => "if",
        NodeKind::While => "while",
        NodeKind::InitDeclare | NodeKind::NoInitDeclare => "declare",
        NodeKind::TopExpr => "top-expr",
        NodeKind::Assign => "=",
        NodeKind::Eq => "==",
        NodeKind::Ne => "!=",
        NodeKind::Add => "+",
        NodeKind::Sub => "-",
        NodeKind::Mul => "*",
        NodeKind::Div => "/",
        NodeKind::Mod => "%",
        NodeKind::BitAnd => "&",
        NodeKind::BitOr => "|",
        NodeKind::BitXor => "^",
        NodeKind::BitNot => "~",
        NodeKind::LogicalNot => "!",
        NodeKind::Negate => "neg",
        NodeKind::Call => "call",
        NodeKind::Identifier | NodeKind::Number => unreachable!("handled above"),
    };

    out.push('(');
    out.push_str(tag);
    for &child in ast.children(id) {
        out.push(' ');
        fmt_node(ast, child, out);
    }
    out.push(')');
}
