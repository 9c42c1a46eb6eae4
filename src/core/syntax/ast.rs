//! Arena-backed tree covering the subset of Java the walker understands.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`].
//! Locations and parent links are kept in side-tables indexed the same way,
//! so no node ever owns a reference back to its container.

use crate::core::source::Span;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Syntactic shape of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Class,
    /// Compact aggregate: header components are its implicit members.
    Record,
    Enum,
    Interface,
    /// `@interface`
    AnnotationType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub shape: TypeShape,
    pub name: String,
    /// Leading `/** */` comment, verbatim.
    pub doc: Option<String>,
    pub annotations: Vec<NodeId>,
    /// Record components first (header order), then fields (body order).
    pub members: Vec<NodeId>,
    /// Directly nested type declarations in source order.
    pub nested: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    /// Record header component.
    Component,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    /// Declared type rendered as normalized text (`Map<String, List<Integer>>`).
    pub type_signature: String,
    pub doc: Option<String>,
    pub annotations: Vec<NodeId>,
    /// A `Literal` or `Opaque` node.
    pub initializer: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationArgument {
    /// Element name; a lone unnamed value is stored as `value`.
    pub name: String,
    /// A `Literal` or `Opaque` node.
    pub value: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Name as written, possibly qualified (`com.example.ConfigData`).
    pub name: String,
    pub arguments: Vec<AnnotationArgument>,
}

impl Annotation {
    pub fn argument(&self, name: &str) -> Option<NodeId> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| arg.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Float,
    String,
    Char,
    Boolean,
    Null,
    /// Identifier path such as `MAX_SIZE` or `Defaults.PORT`.
    NamedConstant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Raw source text.
    pub text: String,
}

impl Literal {
    /// Unescaped content of a string literal or text block.
    pub fn string_content(&self) -> Option<String> {
        if self.kind != LiteralKind::String {
            return None;
        }
        if let Some(body) = self
            .text
            .strip_prefix("\"\"\"")
            .and_then(|rest| rest.strip_suffix("\"\"\""))
        {
            return Some(unescape(&strip_text_block_indent(body)));
        }
        let body = self.text.strip_prefix('"')?.strip_suffix('"')?;
        Some(unescape(body))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match (self.kind, self.text.as_str()) {
            (LiteralKind::Boolean, "true") => Some(true),
            (LiteralKind::Boolean, "false") => Some(false),
            _ => None,
        }
    }
}

/// Expression too complex to be a literal, kept as its source slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    TypeDecl(TypeDecl),
    Member(Member),
    Annotation(Annotation),
    Literal(Literal),
    Opaque(Opaque),
}

impl Node {
    fn children(&self) -> Vec<NodeId> {
        match self {
            Node::TypeDecl(decl) => decl
                .annotations
                .iter()
                .chain(&decl.members)
                .chain(&decl.nested)
                .copied()
                .collect(),
            Node::Member(member) => member
                .annotations
                .iter()
                .copied()
                .chain(member.initializer)
                .collect(),
            Node::Annotation(annotation) => {
                annotation.arguments.iter().map(|arg| arg.value).collect()
            }
            Node::Literal(_) | Node::Opaque(_) => Vec::new(),
        }
    }
}

/// Borrowed view of an expression node.
#[derive(Debug, Clone, Copy)]
pub enum ExprRef<'a> {
    Literal(&'a Literal),
    Opaque(&'a Opaque),
}

impl<'a> ExprRef<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            ExprRef::Literal(lit) => &lit.text,
            ExprRef::Opaque(opaque) => &opaque.text,
        }
    }

    pub fn literal(&self) -> Option<&'a Literal> {
        match self {
            ExprRef::Literal(lit) => Some(lit),
            ExprRef::Opaque(_) => None,
        }
    }
}

/// Structural tree of one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    spans: Vec<Span>,
    parents: Vec<Option<NodeId>>,
    roots: Vec<NodeId>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and adopt its children. Children must already be allocated.
    pub(crate) fn alloc(&mut self, node: Node, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for child in node.children() {
            self.parents[child.index()] = Some(id);
        }
        self.nodes.push(node);
        self.spans.push(span);
        self.parents.push(None);
        id
    }

    pub(crate) fn push_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    /// Top-level type declarations in source order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.spans[id.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.index()]
    }

    pub fn type_decl(&self, id: NodeId) -> Option<&TypeDecl> {
        match self.node(id) {
            Node::TypeDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn member(&self, id: NodeId) -> Option<&Member> {
        match self.node(id) {
            Node::Member(member) => Some(member),
            _ => None,
        }
    }

    pub fn annotation(&self, id: NodeId) -> Option<&Annotation> {
        match self.node(id) {
            Node::Annotation(annotation) => Some(annotation),
            _ => None,
        }
    }

    pub fn expr(&self, id: NodeId) -> Option<ExprRef<'_>> {
        match self.node(id) {
            Node::Literal(lit) => Some(ExprRef::Literal(lit)),
            Node::Opaque(opaque) => Some(ExprRef::Opaque(opaque)),
            _ => None,
        }
    }

    /// Iterate over the annotation nodes referenced by `ids`.
    pub fn annotations<'a>(
        &'a self,
        ids: &'a [NodeId],
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        ids.iter().filter_map(|id| self.annotation(*id))
    }
}

fn strip_text_block_indent(body: &str) -> String {
    // Opening delimiter is followed by a line terminator that is not content.
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);
    let indent = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    body.lines()
        .map(|line| line.get(indent..).unwrap_or("").trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('s') => out.push(' '),
            Some('u') => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(d @ '0'..='7') => {
                let mut value = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(next) if value * 8 + next <= 0o377 => {
                            value = value * 8 + next;
                            chars.next();
                        }
                        _ => break,
                    }
                }
                out.extend(char::from_u32(value));
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
