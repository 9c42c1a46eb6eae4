//! Property extraction from configuration groups.

mod docs;

use crate::config::RecognitionConfig;
use crate::core::diagnostics::DiagnosticsSink;
use crate::core::source::SourceLocation;
use crate::core::syntax::CompilationUnit;
use crate::core::syntax::ast::{Annotation, ExprRef, Member, MemberKind, NodeId};
use crate::core::walk::{TypeDeclaration, join_segments};
use crate::issues::{UnsupportedAnnotationValueIssue, UnsupportedExpressionIssue};

pub use docs::{member_documentation, param_paragraph};

/// Captured default of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValue {
    /// Literal text, or the raw expression text when `non_literal`.
    pub text: String,
    pub non_literal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    pub key: String,
    /// Member identifier as declared.
    pub name: String,
    pub type_signature: String,
    pub default: Option<DefaultValue>,
    pub documentation: Option<String>,
    pub location: SourceLocation,
    /// Qualified name of the owning group.
    pub group: String,
}

/// Properties of `decl` in member order. Empty for declarations that are not groups.
pub fn extract(
    decl: &TypeDeclaration,
    unit: &CompilationUnit,
    recognition: &RecognitionConfig,
    sink: &mut DiagnosticsSink,
) -> Vec<PropertyDeclaration> {
    let Some(group) = &decl.group else {
        return Vec::new();
    };

    let mut properties = Vec::new();
    for &member_id in &group.members {
        let Some(member) = unit.tree.member(member_id) else {
            continue;
        };
        let marker = unit
            .tree
            .annotations(&member.annotations)
            .find(|a| unit.refers_to(&a.name, &recognition.property_marker_annotation));
        let implicit = group.is_compact
            && member.kind == MemberKind::Component
            && recognition.implicit_members_mode;
        if marker.is_none() && !implicit {
            continue;
        }

        let mut extractor = MemberExtractor {
            unit,
            recognition,
            sink: &mut *sink,
        };
        let name = marker
            .and_then(|m| extractor.explicit_name(m))
            .unwrap_or_else(|| member.name.clone());
        let key = join_segments(&group.prefix, &name);
        let default = extractor.default_value(member, marker, &key);

        properties.push(PropertyDeclaration {
            documentation: member_documentation(member, decl.doc.as_deref()),
            name: member.name.clone(),
            type_signature: member.type_signature.clone(),
            default,
            location: unit.location(member_id),
            group: decl.qualified_name.clone(),
            key,
        });
    }
    properties
}

struct MemberExtractor<'a> {
    unit: &'a CompilationUnit,
    recognition: &'a RecognitionConfig,
    sink: &'a mut DiagnosticsSink,
}

impl MemberExtractor<'_> {
    /// Explicit key name from the property marker, when it is a non-empty string.
    fn explicit_name(&mut self, marker: &Annotation) -> Option<String> {
        let element = &self.recognition.key_argument_name;
        let value = marker.argument(element)?;
        let content = self
            .unit
            .tree
            .expr(value)
            .and_then(|e| e.literal())
            .and_then(|l| l.string_content());
        match content {
            Some(name) if !name.is_empty() => Some(name),
            Some(_) => None,
            None => {
                self.sink.push(UnsupportedAnnotationValueIssue {
                    location: self.unit.location(value),
                    annotation: marker.name.clone(),
                    element: element.clone(),
                    expected: "string literal",
                    found: self.expr_text(value),
                });
                None
            }
        }
    }

    /// Initializer first, then the marker's default element.
    fn default_value(
        &mut self,
        member: &Member,
        marker: Option<&Annotation>,
        key: &str,
    ) -> Option<DefaultValue> {
        if let Some(initializer) = member.initializer {
            return Some(self.capture(initializer, key, false));
        }
        let value = marker?.argument(&self.recognition.default_argument_name)?;
        Some(self.capture(value, key, true))
    }

    fn capture(&mut self, id: NodeId, key: &str, unquote_strings: bool) -> DefaultValue {
        if let Some(ExprRef::Literal(literal)) = self.unit.tree.expr(id) {
            let text = if unquote_strings {
                literal
                    .string_content()
                    .unwrap_or_else(|| literal.text.clone())
            } else {
                literal.text.clone()
            };
            return DefaultValue {
                text,
                non_literal: false,
            };
        }

        let expression = self.expr_text(id);
        self.sink.push(UnsupportedExpressionIssue {
            location: self.unit.location(id),
            key: key.to_string(),
            expression: expression.clone(),
        });
        DefaultValue {
            text: expression,
            non_literal: true,
        }
    }

    fn expr_text(&self, id: NodeId) -> String {
        self.unit
            .tree
            .expr(id)
            .map(|e| e.text().to_string())
            .unwrap_or_default()
    }
}
