//! Visitor over [`SyntaxTree`] nodes.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! descends into children in source order. Override a method to intercept a
//! node kind; call the `walk_*` function from the override to keep descending.

use crate::core::syntax::SyntaxTree;
use crate::core::syntax::ast::{Annotation, Literal, Member, Node, NodeId, Opaque, TypeDecl};

pub trait Visit {
    fn visit_type_decl(&mut self, tree: &SyntaxTree, id: NodeId, decl: &TypeDecl) {
        let _ = id;
        walk_type_decl(self, tree, decl);
    }

    fn visit_member(&mut self, tree: &SyntaxTree, id: NodeId, member: &Member) {
        let _ = id;
        walk_member(self, tree, member);
    }

    fn visit_annotation(&mut self, tree: &SyntaxTree, id: NodeId, annotation: &Annotation) {
        let _ = id;
        walk_annotation(self, tree, annotation);
    }

    fn visit_literal(&mut self, _tree: &SyntaxTree, _id: NodeId, _literal: &Literal) {}

    fn visit_opaque(&mut self, _tree: &SyntaxTree, _id: NodeId, _opaque: &Opaque) {}
}

/// Visit every top-level declaration, depth-first pre-order.
pub fn walk_tree<V: Visit + ?Sized>(visitor: &mut V, tree: &SyntaxTree) {
    for root in tree.roots() {
        visit_node(visitor, tree, *root);
    }
}

pub fn visit_node<V: Visit + ?Sized>(visitor: &mut V, tree: &SyntaxTree, id: NodeId) {
    match tree.node(id) {
        Node::TypeDecl(decl) => visitor.visit_type_decl(tree, id, decl),
        Node::Member(member) => visitor.visit_member(tree, id, member),
        Node::Annotation(annotation) => visitor.visit_annotation(tree, id, annotation),
        Node::Literal(literal) => visitor.visit_literal(tree, id, literal),
        Node::Opaque(opaque) => visitor.visit_opaque(tree, id, opaque),
    }
}

pub fn walk_type_decl<V: Visit + ?Sized>(visitor: &mut V, tree: &SyntaxTree, decl: &TypeDecl) {
    for id in decl
        .annotations
        .iter()
        .chain(&decl.members)
        .chain(&decl.nested)
    {
        visit_node(visitor, tree, *id);
    }
}

pub fn walk_member<V: Visit + ?Sized>(visitor: &mut V, tree: &SyntaxTree, member: &Member) {
    for id in member.annotations.iter().chain(&member.initializer) {
        visit_node(visitor, tree, *id);
    }
}

pub fn walk_annotation<V: Visit + ?Sized>(
    visitor: &mut V,
    tree: &SyntaxTree,
    annotation: &Annotation,
) {
    for argument in &annotation.arguments {
        visit_node(visitor, tree, argument.value);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::syntax::{JavaSyntax, SyntaxProvider};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Visit for Recorder {
        fn visit_type_decl(&mut self, tree: &SyntaxTree, _id: NodeId, decl: &TypeDecl) {
            self.events.push(format!("type {}", decl.name));
            walk_type_decl(self, tree, decl);
        }

        fn visit_member(&mut self, tree: &SyntaxTree, _id: NodeId, member: &Member) {
            self.events.push(format!("member {}", member.name));
            walk_member(self, tree, member);
        }

        fn visit_annotation(&mut self, tree: &SyntaxTree, _id: NodeId, annotation: &Annotation) {
            self.events.push(format!("@{}", annotation.name));
            walk_annotation(self, tree, annotation);
        }

        fn visit_literal(&mut self, _tree: &SyntaxTree, _id: NodeId, literal: &Literal) {
            self.events.push(format!("lit {}", literal.text));
        }

        fn visit_opaque(&mut self, _tree: &SyntaxTree, _id: NodeId, opaque: &Opaque) {
            self.events.push(format!("expr {}", opaque.text));
        }
    }

    #[test]
    fn test_walk_is_preorder_in_source_order() {
        let unit = JavaSyntax
            .parse(
                "A.java",
                r#"
                @ConfigData("a")
                class A {
                    int first = 1;
                    class B { int inner = f(); }
                }
                class C {}
                "#
                .to_string(),
            )
            .unwrap();

        let mut recorder = Recorder::default();
        walk_tree(&mut recorder, &unit.tree);
        assert_eq!(
            recorder.events,
            vec![
                "type A",
                "@ConfigData",
                "lit \"a\"",
                "member first",
                "lit 1",
                "type B",
                "member inner",
                "expr f()",
                "type C",
            ]
        );
    }
}
