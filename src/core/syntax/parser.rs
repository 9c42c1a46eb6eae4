//! Recursive-descent recognizer for the declaration subset of Java.
//!
//! Only declarations, annotations, fields and record components are turned
//! into nodes. Method bodies, constructors, initializer blocks and enum
//! constants are recognized by bracket matching and skipped.

use crate::core::error::ParseError;
use crate::core::source::Span;
use crate::core::syntax::ast::{
    Annotation, AnnotationArgument, Literal, LiteralKind, Member, MemberKind, Node, NodeId,
    Opaque, SyntaxTree, TypeDecl, TypeShape,
};
use crate::core::syntax::lexer::{Token, TokenKind, tokenize};
use crate::core::syntax::Import;

/// Output of a successful parse.
#[derive(Debug)]
pub struct ParsedSource {
    pub package: Option<String>,
    pub imports: Vec<Import>,
    pub tree: SyntaxTree,
}

const MODIFIER_WORDS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "sealed",
    "strictfp",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "default",
];

/// Words that can never start a named constant.
const NON_CONSTANT_WORDS: &[&str] = &["new", "this", "super", "class", "switch", "instanceof"];

pub fn parse(source: &str) -> Result<ParsedSource, ParseError> {
    let tokens = tokenize(source)?;
    Parser {
        source,
        tokens,
        pos: 0,
        tree: SyntaxTree::new(),
    }
    .compilation_unit()
}

/// Modifiers and annotations preceding a declaration.
struct Modifiers {
    annotations: Vec<NodeId>,
    doc: Option<String>,
    span: Span,
}

/// Where an expression ends.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ExprContext {
    /// Annotation element value: ends at `,` or `)`.
    AnnotationElement,
    /// Field initializer: ends at `;`, or at a `,` that starts the next declarator.
    FieldInitializer,
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    tree: SyntaxTree,
}

impl<'s> Parser<'s> {
    // ============================================================
    // Token helpers
    // ============================================================

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    fn text_at(&self, offset: usize) -> &'s str {
        self.peek_at(offset).text(self.source)
    }

    fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn is_punct_at(&self, offset: usize, punct: &str) -> bool {
        let tok = self.peek_at(offset);
        tok.kind == TokenKind::Punct && tok.text(self.source) == punct
    }

    fn is_punct(&self, punct: &str) -> bool {
        self.is_punct_at(0, punct)
    }

    fn is_word_at(&self, offset: usize, word: &str) -> bool {
        let tok = self.peek_at(offset);
        tok.kind == TokenKind::Word && tok.text(self.source) == word
    }

    fn is_word(&self, word: &str) -> bool {
        self.is_word_at(0, word)
    }

    fn is_any_word_at(&self, offset: usize) -> bool {
        self.peek_at(offset).kind == TokenKind::Word
    }

    fn advance(&mut self) -> Span {
        let span = self.peek().span;
        if !self.is_eof() {
            self.pos += 1;
        }
        span
    }

    /// Span of the most recently consumed token.
    fn last_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        let span = self.peek().span;
        ParseError::new(message, span.line, span.col)
    }

    fn expect_punct(&mut self, punct: &str) -> Result<Span, ParseError> {
        if self.is_punct(punct) {
            Ok(self.advance())
        } else {
            Err(self.error_here(format!(
                "expected '{}', found '{}'",
                punct,
                self.describe_current()
            )))
        }
    }

    fn expect_word(&mut self) -> Result<(String, Span), ParseError> {
        if self.is_any_word_at(0) {
            let text = self.text_at(0).to_string();
            Ok((text, self.advance()))
        } else {
            Err(self.error_here(format!(
                "expected identifier, found '{}'",
                self.describe_current()
            )))
        }
    }

    fn describe_current(&self) -> &'s str {
        if self.is_eof() {
            "end of file"
        } else {
            self.text_at(0)
        }
    }

    /// `a.b.c`
    fn qualified_name(&mut self) -> Result<(String, Span), ParseError> {
        let (mut name, start) = self.expect_word()?;
        while self.is_punct(".") && self.is_any_word_at(1) {
            self.advance();
            let (segment, _) = self.expect_word()?;
            name.push('.');
            name.push_str(&segment);
        }
        Ok((name, start.to(self.last_span())))
    }

    // ============================================================
    // Compilation unit
    // ============================================================

    fn compilation_unit(mut self) -> Result<ParsedSource, ParseError> {
        let mut package = None;
        let mut imports = Vec::new();

        while !self.is_eof() {
            if self.is_punct(";") {
                self.advance();
                continue;
            }
            if self.is_word("import") {
                imports.push(self.import()?);
                continue;
            }

            let modifiers = self.modifiers()?;
            if self.is_word("package") {
                self.advance();
                let (name, _) = self.qualified_name()?;
                self.expect_punct(";")?;
                package = Some(name);
            } else if self.at_type_keyword() {
                let id = self.type_declaration(modifiers)?;
                self.tree.push_root(id);
            } else if self.is_word("module") || (self.is_word("open") && self.is_word_at(1, "module"))
            {
                self.skip_module()?;
            } else {
                return Err(self.error_here(format!(
                    "expected type declaration, found '{}'",
                    self.describe_current()
                )));
            }
        }

        Ok(ParsedSource {
            package,
            imports,
            tree: self.tree,
        })
    }

    fn import(&mut self) -> Result<Import, ParseError> {
        self.advance();
        let is_static = if self.is_word("static") {
            self.advance();
            true
        } else {
            false
        };
        let (path, _) = self.qualified_name()?;
        let wildcard = if self.is_punct(".") && self.is_punct_at(1, "*") {
            self.advance();
            self.advance();
            true
        } else {
            false
        };
        self.expect_punct(";")?;
        Ok(Import {
            path,
            is_static,
            wildcard,
        })
    }

    fn skip_module(&mut self) -> Result<(), ParseError> {
        while !self.is_punct("{") {
            if self.is_eof() {
                return Err(self.error_here("expected module body"));
            }
            self.advance();
        }
        self.skip_balanced("{", "}")
    }

    // ============================================================
    // Modifiers and annotations
    // ============================================================

    fn modifiers(&mut self) -> Result<Modifiers, ParseError> {
        let first = self.pos;
        let span = self.peek().span;
        let mut annotations = Vec::new();

        loop {
            if self.is_punct("@") && !self.is_word_at(1, "interface") {
                annotations.push(self.annotation()?);
            } else if self.is_word("non") && self.is_punct_at(1, "-") && self.is_word_at(2, "sealed")
            {
                self.advance();
                self.advance();
                self.advance();
            } else if self.is_any_word_at(0) && MODIFIER_WORDS.contains(&self.text_at(0)) {
                // `sealed`, `default` and friends are contextual; a following `(` or `=`
                // means the word is really a member name.
                if self.is_punct_at(1, "(") || self.is_punct_at(1, "=") || self.is_punct_at(1, ";")
                {
                    break;
                }
                self.advance();
            } else {
                break;
            }
        }

        // The doc comment usually precedes the annotations, but may sit
        // between them and the declaration itself. The nearest one wins.
        let doc = self.tokens[first..=self.pos.min(self.tokens.len() - 1)]
            .iter()
            .rev()
            .find_map(|tok| tok.doc.clone());

        Ok(Modifiers {
            annotations,
            doc,
            span,
        })
    }

    fn annotation(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect_punct("@")?;
        let (name, _) = self.qualified_name()?;
        let mut arguments = Vec::new();

        if self.is_punct("(") {
            self.advance();
            if !self.is_punct(")") {
                let is_named = self.is_any_word_at(0)
                    && self.is_punct_at(1, "=")
                    && !self.is_punct_at(2, "=");
                if is_named {
                    loop {
                        let (arg_name, _) = self.expect_word()?;
                        self.expect_punct("=")?;
                        let value = self.expression(ExprContext::AnnotationElement)?;
                        arguments.push(AnnotationArgument {
                            name: arg_name,
                            value,
                        });
                        if self.is_punct(",") {
                            self.advance();
                            continue;
                        }
                        break;
                    }
                } else {
                    let value = self.expression(ExprContext::AnnotationElement)?;
                    arguments.push(AnnotationArgument {
                        name: "value".to_string(),
                        value,
                    });
                }
            }
            self.expect_punct(")")?;
        }

        let span = start.to(self.last_span());
        Ok(self
            .tree
            .alloc(Node::Annotation(Annotation { name, arguments }), span))
    }

    /// Copy annotation nodes so another declarator can own them.
    fn duplicate_annotations(&mut self, ids: &[NodeId]) -> Vec<NodeId> {
        let mut copies = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(original) = self.tree.annotation(*id).cloned() else {
                continue;
            };
            let mut arguments = Vec::with_capacity(original.arguments.len());
            for arg in original.arguments {
                let value_span = self.tree.span(arg.value);
                let value_node = self.tree.node(arg.value).clone();
                arguments.push(AnnotationArgument {
                    name: arg.name,
                    value: self.tree.alloc(value_node, value_span),
                });
            }
            let span = self.tree.span(*id);
            copies.push(self.tree.alloc(
                Node::Annotation(Annotation {
                    name: original.name,
                    arguments,
                }),
                span,
            ));
        }
        copies
    }

    // ============================================================
    // Type declarations
    // ============================================================

    fn at_type_keyword(&self) -> bool {
        if self.is_word("class") || self.is_word("interface") || self.is_word("enum") {
            return true;
        }
        if self.is_punct("@") && self.is_word_at(1, "interface") {
            return true;
        }
        // `record` is contextual.
        self.is_word("record")
            && self.is_any_word_at(1)
            && (self.is_punct_at(2, "(") || self.is_punct_at(2, "<"))
    }

    fn type_declaration(&mut self, modifiers: Modifiers) -> Result<NodeId, ParseError> {
        let shape = if self.is_punct("@") {
            self.advance();
            TypeShape::AnnotationType
        } else {
            match self.text_at(0) {
                "class" => TypeShape::Class,
                "interface" => TypeShape::Interface,
                "enum" => TypeShape::Enum,
                _ => TypeShape::Record,
            }
        };
        self.advance();

        let (name, _) = self.expect_word()?;
        if self.is_punct("<") {
            self.skip_balanced("<", ">")?;
        }

        let mut members = Vec::new();
        if shape == TypeShape::Record {
            self.record_header(&mut members)?;
        }

        // extends / implements / permits
        while !self.is_punct("{") {
            if self.is_eof() || self.is_punct(";") || self.is_punct("}") {
                return Err(self.error_here(format!("expected body of '{}'", name)));
            }
            if self.is_punct("@") {
                self.annotation()?;
                continue;
            }
            self.advance();
        }

        let mut nested = Vec::new();
        self.type_body(shape, &mut members, &mut nested)?;

        let span = modifiers.span.to(self.last_span());
        Ok(self.tree.alloc(
            Node::TypeDecl(TypeDecl {
                shape,
                name,
                doc: modifiers.doc,
                annotations: modifiers.annotations,
                members,
                nested,
            }),
            span,
        ))
    }

    fn record_header(&mut self, members: &mut Vec<NodeId>) -> Result<(), ParseError> {
        self.expect_punct("(")?;
        while !self.is_punct(")") {
            let modifiers = self.modifiers()?;
            let type_signature = self.type_ref()?;
            let (name, name_span) = self.expect_word()?;
            members.push(self.tree.alloc(
                Node::Member(Member {
                    kind: MemberKind::Component,
                    name,
                    type_signature,
                    doc: modifiers.doc,
                    annotations: modifiers.annotations,
                    initializer: None,
                }),
                name_span,
            ));
            if self.is_punct(",") {
                self.advance();
            } else if !self.is_punct(")") {
                return Err(self.error_here(format!(
                    "expected ',' or ')' in record header, found '{}'",
                    self.describe_current()
                )));
            }
        }
        self.advance();
        Ok(())
    }

    fn type_body(
        &mut self,
        shape: TypeShape,
        members: &mut Vec<NodeId>,
        nested: &mut Vec<NodeId>,
    ) -> Result<(), ParseError> {
        self.expect_punct("{")?;
        if shape == TypeShape::Enum {
            self.enum_constants()?;
        }

        loop {
            if self.is_punct("}") {
                self.advance();
                return Ok(());
            }
            if self.is_eof() {
                return Err(self.error_here("unterminated type body"));
            }
            if self.is_punct(";") {
                self.advance();
                continue;
            }
            if self.is_punct("{") {
                self.skip_balanced("{", "}")?;
                continue;
            }
            if self.is_word("static") && self.is_punct_at(1, "{") {
                self.advance();
                self.skip_balanced("{", "}")?;
                continue;
            }

            let modifiers = self.modifiers()?;
            if self.at_type_keyword() {
                nested.push(self.type_declaration(modifiers)?);
                continue;
            }
            self.member(shape, modifiers, members)?;
        }
    }

    fn enum_constants(&mut self) -> Result<(), ParseError> {
        loop {
            if self.is_punct(";") {
                self.advance();
                return Ok(());
            }
            if self.is_punct("}") {
                return Ok(());
            }
            self.modifiers()?;
            self.expect_word()?;
            if self.is_punct("(") {
                self.skip_balanced("(", ")")?;
            }
            if self.is_punct("{") {
                self.skip_balanced("{", "}")?;
            }
            if self.is_punct(",") {
                self.advance();
            } else if !self.is_punct(";") && !self.is_punct("}") {
                return Err(self.error_here(format!(
                    "expected ',' or ';' after enum constant, found '{}'",
                    self.describe_current()
                )));
            }
        }
    }

    fn member(
        &mut self,
        shape: TypeShape,
        modifiers: Modifiers,
        members: &mut Vec<NodeId>,
    ) -> Result<(), ParseError> {
        // Generic method or constructor.
        if self.is_punct("<") {
            self.skip_balanced("<", ">")?;
        }

        // Constructor, or compact canonical constructor of a record.
        if self.is_any_word_at(0) && self.is_punct_at(1, "(") {
            self.advance();
            return self.skip_method_rest();
        }
        if shape == TypeShape::Record && self.is_any_word_at(0) && self.is_punct_at(1, "{") {
            self.advance();
            return self.skip_balanced("{", "}");
        }

        let type_signature = self.type_ref()?;
        let (name, name_span) = self.expect_word()?;
        if self.is_punct("(") {
            return self.skip_method_rest();
        }

        let first_annotations = modifiers.annotations;
        let mut declarator = Some((name, name_span));
        let mut is_first = true;
        while let Some((name, name_span)) = declarator.take() {
            let mut signature = type_signature.clone();
            while self.is_punct("[") && self.is_punct_at(1, "]") {
                self.advance();
                self.advance();
                signature.push_str("[]");
            }
            let initializer = if self.is_punct("=") {
                self.advance();
                Some(self.expression(ExprContext::FieldInitializer)?)
            } else {
                None
            };

            // One node has one parent, so later declarators get copies.
            let own_annotations = if is_first {
                first_annotations.clone()
            } else {
                self.duplicate_annotations(&first_annotations)
            };
            is_first = false;

            members.push(self.tree.alloc(
                Node::Member(Member {
                    kind: MemberKind::Field,
                    name,
                    type_signature: signature,
                    doc: modifiers.doc.clone(),
                    annotations: own_annotations,
                    initializer,
                }),
                name_span,
            ));

            if self.is_punct(",") {
                self.advance();
                declarator = Some(self.expect_word()?);
            }
        }
        self.expect_punct(";")?;
        Ok(())
    }

    /// Skip a parameter list, optional `throws`/`default` clause and body.
    fn skip_method_rest(&mut self) -> Result<(), ParseError> {
        self.skip_balanced("(", ")")?;
        loop {
            if self.is_punct(";") {
                self.advance();
                return Ok(());
            }
            if self.is_punct("{") {
                return self.skip_balanced("{", "}");
            }
            if self.is_punct("(") {
                self.skip_balanced("(", ")")?;
                continue;
            }
            if self.is_eof() || self.is_punct("}") {
                return Err(self.error_here("expected method body"));
            }
            self.advance();
        }
    }

    fn skip_balanced(&mut self, open: &str, close: &str) -> Result<(), ParseError> {
        let start = self.peek().span;
        self.expect_punct(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            if self.is_eof() {
                return Err(ParseError::new(
                    format!("unbalanced '{}'", open),
                    start.line,
                    start.col,
                ));
            }
            if self.is_punct(open) {
                depth += 1;
            } else if self.is_punct(close) {
                depth -= 1;
            }
            self.advance();
        }
        Ok(())
    }

    // ============================================================
    // Types
    // ============================================================

    /// Parse a type reference and render it as normalized text.
    fn type_ref(&mut self) -> Result<String, ParseError> {
        while self.is_punct("@") {
            self.annotation()?;
        }
        let mut out = String::new();
        loop {
            let (segment, _) = self.expect_word()?;
            out.push_str(&segment);
            if self.is_punct("<") {
                out.push_str(&self.type_arguments()?);
            }
            if self.is_punct(".") && (self.is_any_word_at(1) || self.is_punct_at(1, "@")) {
                self.advance();
                while self.is_punct("@") {
                    self.annotation()?;
                }
                out.push('.');
                continue;
            }
            break;
        }
        while self.is_punct("[") && self.is_punct_at(1, "]") {
            self.advance();
            self.advance();
            out.push_str("[]");
        }
        if self.is_punct("...") {
            self.advance();
            out.push_str("...");
        }
        Ok(out)
    }

    fn type_arguments(&mut self) -> Result<String, ParseError> {
        self.expect_punct("<")?;
        let mut out = String::from("<");
        if self.is_punct(">") {
            self.advance();
            out.push('>');
            return Ok(out);
        }
        loop {
            while self.is_punct("@") {
                self.annotation()?;
            }
            if self.is_punct("?") {
                self.advance();
                out.push('?');
                if self.is_word("extends") || self.is_word("super") {
                    out.push(' ');
                    out.push_str(self.text_at(0));
                    out.push(' ');
                    self.advance();
                    out.push_str(&self.type_ref()?);
                }
            } else {
                out.push_str(&self.type_ref()?);
            }
            while self.is_punct("&") {
                self.advance();
                out.push_str(" & ");
                out.push_str(&self.type_ref()?);
            }
            if self.is_punct(",") {
                self.advance();
                out.push_str(", ");
                continue;
            }
            self.expect_punct(">")?;
            out.push('>');
            return Ok(out);
        }
    }

    // ============================================================
    // Expressions
    // ============================================================

    /// Capture an expression lexically and classify it.
    fn expression(&mut self, context: ExprContext) -> Result<NodeId, ParseError> {
        let first = self.pos;
        let mut depth = 0usize;
        // Type argument lists (`new Pair<A, B>()`, `Util.<A, B>make()`); commas
        // inside them never end a declarator.
        let mut angle_depth = 0usize;

        loop {
            if self.is_eof() {
                return Err(self.error_here("unexpected end of file in expression"));
            }
            if depth == 0 && self.at_expression_end(context, angle_depth) {
                break;
            }
            if self.is_punct("<") && self.pos > first && self.opens_type_arguments() {
                angle_depth += 1;
            } else if self.is_punct(">") && angle_depth > 0 {
                angle_depth -= 1;
            } else if self.is_punct("(") || self.is_punct("[") || self.is_punct("{") {
                depth += 1;
            } else if self.is_punct(")") || self.is_punct("]") || self.is_punct("}") {
                if depth == 0 {
                    return Err(self.error_here(format!(
                        "unbalanced '{}' in expression",
                        self.describe_current()
                    )));
                }
                depth -= 1;
            }
            self.advance();
        }

        if self.pos == first {
            return Err(self.error_here(format!(
                "expected expression, found '{}'",
                self.describe_current()
            )));
        }

        let tokens = &self.tokens[first..self.pos];
        let start = tokens[0].span;
        let end = tokens[tokens.len() - 1].span;
        let span = start.to(end);
        let text = self.source[span.start..span.end].to_string();
        let node = match classify_literal(tokens, self.source) {
            Some(kind) => Node::Literal(Literal { kind, text }),
            None => Node::Opaque(Opaque { text }),
        };
        Ok(self.tree.alloc(node, span))
    }

    /// Whether the `<` at the cursor starts type arguments rather than a comparison:
    /// it follows a name or `.`, and only type tokens come before its matching `>`.
    fn opens_type_arguments(&self) -> bool {
        let previous = &self.tokens[self.pos - 1];
        let after_name = previous.kind == TokenKind::Word
            || (previous.kind == TokenKind::Punct && previous.text(self.source) == ".");
        if !after_name {
            return false;
        }

        let mut nesting = 0usize;
        for tok in &self.tokens[self.pos..] {
            match (tok.kind, tok.text(self.source)) {
                (TokenKind::Punct, "<") => nesting += 1,
                (TokenKind::Punct, ">") => {
                    nesting -= 1;
                    if nesting == 0 {
                        return true;
                    }
                }
                (TokenKind::Word, _) => {}
                (TokenKind::Punct, "." | "," | "?" | "&" | "[" | "]" | "@") => {}
                _ => return false,
            }
        }
        false
    }

    fn at_expression_end(&self, context: ExprContext, angle_depth: usize) -> bool {
        match context {
            ExprContext::AnnotationElement => {
                self.is_punct(")") || (angle_depth == 0 && self.is_punct(","))
            }
            ExprContext::FieldInitializer => {
                if self.is_punct(";") {
                    return true;
                }
                // `new HashMap<String, Integer>()` keeps going; `a = 1, b = 2` stops.
                angle_depth == 0
                    && self.is_punct(",")
                    && self.is_any_word_at(1)
                    && (self.is_punct_at(2, "=")
                        || self.is_punct_at(2, ",")
                        || self.is_punct_at(2, ";")
                        || self.is_punct_at(2, "["))
            }
        }
    }
}

/// Literal kind of a token run, or `None` for an opaque expression.
fn classify_literal(tokens: &[Token], source: &str) -> Option<LiteralKind> {
    let single = |tok: &Token| match tok.kind {
        TokenKind::Integer => Some(LiteralKind::Integer),
        TokenKind::Float => Some(LiteralKind::Float),
        TokenKind::String => Some(LiteralKind::String),
        TokenKind::Char => Some(LiteralKind::Char),
        TokenKind::Word => match tok.text(source) {
            "true" | "false" => Some(LiteralKind::Boolean),
            "null" => Some(LiteralKind::Null),
            word if NON_CONSTANT_WORDS.contains(&word) => None,
            _ => Some(LiteralKind::NamedConstant),
        },
        TokenKind::Punct | TokenKind::Eof => None,
    };

    match tokens {
        [tok] => single(tok),
        [sign, number]
            if sign.kind == TokenKind::Punct
                && sign.text(source) == "-"
                && matches!(number.kind, TokenKind::Integer | TokenKind::Float) =>
        {
            single(number)
        }
        _ => {
            // Qualified constant: Word (. Word)+
            let is_path = tokens.len() % 2 == 1
                && tokens.iter().enumerate().all(|(i, tok)| {
                    if i % 2 == 0 {
                        tok.kind == TokenKind::Word
                            && !NON_CONSTANT_WORDS.contains(&tok.text(source))
                    } else {
                        tok.kind == TokenKind::Punct && tok.text(source) == "."
                    }
                });
            is_path.then_some(LiteralKind::NamedConstant)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse_ok(source: &str) -> ParsedSource {
        parse(source).unwrap()
    }

    fn root_decl(parsed: &ParsedSource, index: usize) -> &TypeDecl {
        parsed.tree.type_decl(parsed.tree.roots()[index]).unwrap()
    }

    fn members(parsed: &ParsedSource, decl: &TypeDecl) -> Vec<Member> {
        decl.members
            .iter()
            .map(|id| parsed.tree.member(*id).unwrap().clone())
            .collect()
    }

    #[test]
    fn test_package_and_imports() {
        let parsed = parse_ok(
            r#"
            package com.example.net;

            import java.util.List;
            import static java.util.Objects.requireNonNull;
            import com.example.config.*;

            public class Plain {}
            "#,
        );
        assert_eq!(parsed.package.as_deref(), Some("com.example.net"));
        assert_eq!(parsed.imports.len(), 3);
        assert_eq!(parsed.imports[0].path, "java.util.List");
        assert!(parsed.imports[1].is_static);
        assert!(parsed.imports[2].wildcard);
        assert_eq!(parsed.imports[2].path, "com.example.config");
        assert_eq!(root_decl(&parsed, 0).shape, TypeShape::Class);
    }

    #[test]
    fn test_record_header_components() {
        let parsed = parse_ok(
            r#"
            @ConfigData("net")
            public record NetworkConfig(
                    @ConfigProperty(defaultValue = "8080") int port,
                    Map<String, List<Integer>> routes,
                    String... hosts) {}
            "#,
        );
        let decl = root_decl(&parsed, 0);
        assert_eq!(decl.shape, TypeShape::Record);
        assert_eq!(decl.name, "NetworkConfig");
        assert_eq!(decl.annotations.len(), 1);

        let comps = members(&parsed, decl);
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0].kind, MemberKind::Component);
        assert_eq!(comps[0].type_signature, "int");
        assert_eq!(comps[0].annotations.len(), 1);
        assert_eq!(comps[1].type_signature, "Map<String, List<Integer>>");
        assert_eq!(comps[2].type_signature, "String...");
    }

    #[test]
    fn test_annotation_arguments() {
        let parsed = parse_ok(
            r#"
            @ConfigData(value = "db", inheritPrefix = true)
            @Marker
            @Other({"a", "b"})
            class Db {}
            "#,
        );
        let decl = root_decl(&parsed, 0);
        let annotations: Vec<&Annotation> = parsed.tree.annotations(&decl.annotations).collect();
        assert_eq!(annotations.len(), 3);

        let config = annotations[0];
        assert_eq!(config.arguments.len(), 2);
        let value = parsed.tree.expr(config.argument("value").unwrap()).unwrap();
        assert_eq!(value.text(), "\"db\"");
        assert_eq!(value.literal().unwrap().kind, LiteralKind::String);
        let inherit = parsed
            .tree
            .expr(config.argument("inheritPrefix").unwrap())
            .unwrap();
        assert_eq!(inherit.literal().unwrap().as_bool(), Some(true));

        assert!(annotations[1].arguments.is_empty());

        let other = parsed.tree.expr(annotations[2].argument("value").unwrap()).unwrap();
        assert!(other.literal().is_none());
        assert_eq!(other.text(), r#"{"a", "b"}"#);
    }

    #[test]
    fn test_field_initializers_are_classified() {
        let parsed = parse_ok(
            r#"
            class Settings {
                int answer = 42;
                long negative = -7L;
                String name = "svc";
                int limit = Defaults.LIMIT;
                int computed = computeDefault();
                Map<String, Integer> map = new HashMap<String, Integer>();
                int a = 1, b = a + 2;
                static final int[] TABLE = {1, 2, 3};
            }
            "#,
        );
        let decl = root_decl(&parsed, 0);
        let fields = members(&parsed, decl);
        let init = |m: &Member| {
            let expr = parsed.tree.expr(m.initializer.unwrap()).unwrap();
            (expr.text().to_string(), expr.literal().map(|l| l.kind))
        };

        assert_eq!(fields.len(), 9);
        assert_eq!(init(&fields[0]), ("42".to_string(), Some(LiteralKind::Integer)));
        assert_eq!(init(&fields[1]), ("-7L".to_string(), Some(LiteralKind::Integer)));
        assert_eq!(init(&fields[2]), ("\"svc\"".to_string(), Some(LiteralKind::String)));
        assert_eq!(
            init(&fields[3]),
            ("Defaults.LIMIT".to_string(), Some(LiteralKind::NamedConstant))
        );
        assert_eq!(init(&fields[4]), ("computeDefault()".to_string(), None));
        assert_eq!(
            init(&fields[5]),
            ("new HashMap<String, Integer>()".to_string(), None)
        );
        assert_eq!(fields[6].name, "a");
        assert_eq!(fields[7].name, "b");
        assert_eq!(init(&fields[7]), ("a + 2".to_string(), None));
        assert_eq!(fields[8].type_signature, "int[]");
        assert_eq!(init(&fields[8]), ("{1, 2, 3}".to_string(), None));
    }

    #[test]
    fn test_methods_constructors_and_blocks_are_skipped() {
        let parsed = parse_ok(
            r#"
            public record Limits(int max) implements Comparable<Limits> {
                public Limits {
                    if (max < 0) { throw new IllegalArgumentException(); }
                }
                static { init(); }
                public static <T> T pick(T a, T b) throws Exception { return a; }
                @Override
                public int compareTo(Limits other) { return Integer.compare(max, other.max); }
                private static final int FLOOR = 0;
            }
            "#,
        );
        let decl = root_decl(&parsed, 0);
        let all = members(&parsed, decl);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "max");
        assert_eq!(all[1].name, "FLOOR");
    }

    #[test]
    fn test_nested_types_and_enums() {
        let parsed = parse_ok(
            r#"
            public sealed interface Outer permits Outer.Impl {
                enum Mode { FAST("f") { void x() {} }, SLOW("s"); Mode(String s) {} }
                @interface Marker { String value() default ""; int[] ids() default {}; }
                non-sealed class Impl implements Outer {
                    record Inner(int depth) {}
                }
            }
            "#,
        );
        let outer = root_decl(&parsed, 0);
        assert_eq!(outer.shape, TypeShape::Interface);
        assert_eq!(outer.nested.len(), 3);

        let shapes: Vec<TypeShape> = outer
            .nested
            .iter()
            .map(|id| parsed.tree.type_decl(*id).unwrap().shape)
            .collect();
        assert_eq!(
            shapes,
            vec![TypeShape::Enum, TypeShape::AnnotationType, TypeShape::Class]
        );

        let impl_decl = parsed.tree.type_decl(outer.nested[2]).unwrap();
        let inner = parsed.tree.type_decl(impl_decl.nested[0]).unwrap();
        assert_eq!(inner.name, "Inner");
        assert_eq!(parsed.tree.parent(impl_decl.nested[0]), Some(outer.nested[2]));
    }

    #[test]
    fn test_docs_attach_to_members_and_types() {
        let parsed = parse_ok(
            r#"
            /** Group doc. */
            @ConfigData
            class Group {
                /** Field doc. */
                @ConfigProperty
                int value;
                int undocumented;
            }
            "#,
        );
        let decl = root_decl(&parsed, 0);
        assert_eq!(decl.doc.as_deref(), Some("/** Group doc. */"));
        let fields = members(&parsed, decl);
        assert_eq!(fields[0].doc.as_deref(), Some("/** Field doc. */"));
        assert_eq!(fields[1].doc, None);
    }

    #[test]
    fn test_multi_declarator_annotations_are_not_shared() {
        let parsed = parse_ok("class A { @ConfigProperty int x = 1, y = 2; }");
        let decl = root_decl(&parsed, 0);
        let fields = members(&parsed, decl);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].annotations.len(), 1);
        assert_eq!(fields[1].annotations.len(), 1);
        assert_ne!(fields[0].annotations[0], fields[1].annotations[0]);
        assert_eq!(parsed.tree.parent(fields[1].annotations[0]), Some(decl.members[1]));
    }

    #[test]
    fn test_type_arguments_in_initializers_do_not_split_declarators() {
        let parsed = parse_ok(
            r#"
            class Svc {
                private final Triple<String, Integer, Long> t = new Triple<String, Integer, Long>("a", 1, 2L);
                Object made = Util.<String, Integer, Long>make(), other = null;
                boolean less = a < b, more = c > d;
            }
            "#,
        );
        let fields = members(&parsed, root_decl(&parsed, 0));
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["t", "made", "other", "less", "more"]);

        let text = |field: &Member| {
            parsed
                .tree
                .expr(field.initializer.unwrap())
                .unwrap()
                .text()
                .to_string()
        };
        assert_eq!(text(&fields[0]), r#"new Triple<String, Integer, Long>("a", 1, 2L)"#);
        assert_eq!(text(&fields[1]), "Util.<String, Integer, Long>make()");
        assert_eq!(text(&fields[2]), "null");
        assert_eq!(text(&fields[3]), "a < b");
        assert_eq!(text(&fields[4]), "c > d");
    }

    #[test]
    fn test_nearest_doc_comment_wins() {
        let parsed = parse_ok("class A { /** A */ @Deprecated /** B */ @ConfigProperty int x; }");
        let fields = members(&parsed, root_decl(&parsed, 0));
        assert_eq!(fields[0].doc.as_deref(), Some("/** B */"));
    }

    #[test]
    fn test_member_span_points_at_name() {
        let parsed = parse_ok("class A {\n    int port = 1;\n}");
        let decl = root_decl(&parsed, 0);
        let span = parsed.tree.span(decl.members[0]);
        assert_eq!((span.line, span.col), (2, 9));
    }

    #[test]
    fn test_module_info_is_skipped() {
        let parsed = parse_ok("open module com.example { requires java.base; exports a.b; }");
        assert!(parsed.tree.roots().is_empty());
    }

    #[test]
    fn test_malformed_sources_fail() {
        assert!(parse("class { }").is_err());
        assert!(parse("class A { int x = ; }").is_err());
        assert!(parse("class A { void f() { }").is_err());
        assert!(parse("int stray;").is_err());
        assert!(parse("record R(int a { }").is_err());
    }
}
