//! The syntax tree: a single `Node` variant with a discriminating
//! `NodeKind`, stored as a flat arena instead of a tree of boxed nodes
//! (§9's "Tree representation" redesign note).

use microc_util::define_idx;
use microc_util::index_vec::IndexVec;
use microc_util::span::Span;

define_idx! {
    /// Index of a [`Node`] inside an [`Ast`]'s arena.
    pub struct NodeId;
}

/// The kind tag every [`Node`] carries, grouped the way §3 groups them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    // Program-level
    TopLevel,
    Function,
    Params,
    Block,

    // Statements
    Declaration,
    ExprStatement,
    Return,
    Break,
    Continue,
    If,
    While,
    InitDeclare,
    NoInitDeclare,
    TopExpr,

    // Expressions
    Assign,
    Eq,
    Ne,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    LogicalNot,
    Negate,
    Call,
    Identifier,
    Number,
}

/// One node in the syntax tree: a kind, an optional integer payload
/// (only `Number` carries one), an optional name payload (only
/// `Identifier` carries one), and an ordered list of children.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub value: Option<u32>,
    pub name: Option<String>,
    pub children: Vec<NodeId>,
    pub span: Span,
}

impl Node {
    fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            value: None,
            name: None,
            children: Vec::new(),
            span,
        }
    }
}

/// The parsed program: an arena of [`Node`]s plus the id of the
/// `top-level` root.
#[derive(Debug)]
pub struct Ast {
    nodes: IndexVec<NodeId, Node>,
    pub root: NodeId,
}

impl Ast {
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds an [`Ast`] one node at a time. The parser owns exactly one of
/// these for the lifetime of a single `parse` call.
#[derive(Default)]
pub struct AstBuilder {
    nodes: IndexVec<NodeId, Node>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf or interior node with no payload, just children.
    pub fn push(&mut self, kind: NodeKind, children: Vec<NodeId>, span: Span) -> NodeId {
        let mut node = Node::new(kind, span);
        node.children = children;
        self.nodes.push(node)
    }

    /// A `number` leaf.
    pub fn push_number(&mut self, value: u32, span: Span) -> NodeId {
        let mut node = Node::new(NodeKind::Number, span);
        node.value = Some(value);
        self.nodes.push(node)
    }

    /// An `identifier` leaf.
    pub fn push_identifier(&mut self, name: String, span: Span) -> NodeId {
        let mut node = Node::new(NodeKind::Identifier, span);
        node.name = Some(name);
        self.nodes.push(node)
    }

    pub fn finish(self, root: NodeId) -> Ast {
        Ast {
            nodes: self.nodes,
            root,
        }
    }
}
