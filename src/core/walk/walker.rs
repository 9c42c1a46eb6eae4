use crate::config::RecognitionConfig;
use crate::core::diagnostics::DiagnosticsSink;
use crate::core::syntax::ast::{Annotation, NodeId, TypeDecl, TypeShape};
use crate::core::syntax::{CompilationUnit, SyntaxTree};
use crate::core::walk::visitor::{Visit, walk_tree, walk_type_decl};
use crate::issues::UnsupportedAnnotationValueIssue;

/// Role of a type declaration in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// Carries the group marker.
    Group,
    Plain,
    /// `enum`
    Enumerated,
    /// `interface` or `@interface`
    InterfaceLike,
}

/// Group-specific data of a recognized declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigGroup {
    /// Resolved prefix, possibly empty. Already includes inherited segments.
    pub prefix: String,
    pub inherits: bool,
    /// Record declarations: header components are implicit properties.
    pub is_compact: bool,
    /// Candidate members in declaration order.
    pub members: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub node: NodeId,
    pub kind: DeclarationKind,
    pub shape: TypeShape,
    /// Package and enclosing type names joined by `.`.
    pub qualified_name: String,
    pub doc: Option<String>,
    pub annotations: Vec<NodeId>,
    /// Indices of directly nested declarations in [`FileDeclarations`].
    pub nested: Vec<usize>,
    /// Index of the enclosing declaration, for lookup only.
    pub enclosing: Option<usize>,
    pub group: Option<ConfigGroup>,
}

impl TypeDeclaration {
    pub fn is_group(&self) -> bool {
        self.group.is_some()
    }
}

/// Declarations of one file in depth-first pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDeclarations {
    declarations: Vec<TypeDeclaration>,
}

impl FileDeclarations {
    pub fn iter(&self) -> std::slice::Iter<'_, TypeDeclaration> {
        self.declarations.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TypeDeclaration> {
        self.declarations.get(index)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn groups(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.declarations.iter().filter(|decl| decl.is_group())
    }

    /// Nearest enclosing group of the declaration at `index`.
    pub fn enclosing_group(&self, index: usize) -> Option<&TypeDeclaration> {
        let mut current = self.declarations.get(index)?.enclosing;
        while let Some(i) = current {
            let decl = &self.declarations[i];
            if decl.is_group() {
                return Some(decl);
            }
            current = decl.enclosing;
        }
        None
    }
}

/// Collect the type declarations of `unit`, recognizing configuration groups.
pub fn walk(
    unit: &CompilationUnit,
    recognition: &RecognitionConfig,
    sink: &mut DiagnosticsSink,
) -> FileDeclarations {
    let mut walker = DeclarationWalker {
        unit,
        recognition,
        sink,
        declarations: Vec::new(),
        stack: Vec::new(),
    };
    walk_tree(&mut walker, &unit.tree);
    FileDeclarations {
        declarations: walker.declarations,
    }
}

struct DeclarationWalker<'a> {
    unit: &'a CompilationUnit,
    recognition: &'a RecognitionConfig,
    sink: &'a mut DiagnosticsSink,
    declarations: Vec<TypeDeclaration>,
    /// Indices of the declarations currently being walked.
    stack: Vec<usize>,
}

impl Visit for DeclarationWalker<'_> {
    fn visit_type_decl(&mut self, tree: &SyntaxTree, id: NodeId, decl: &TypeDecl) {
        let enclosing = self.stack.last().copied();
        let qualified_name = match (enclosing, &self.unit.package) {
            (Some(parent), _) => {
                format!("{}.{}", self.declarations[parent].qualified_name, decl.name)
            }
            (None, Some(package)) => format!("{}.{}", package, decl.name),
            (None, None) => decl.name.clone(),
        };

        let group = self.recognize_group(tree, decl, enclosing);
        let kind = match (&group, decl.shape) {
            (Some(_), _) => DeclarationKind::Group,
            (None, TypeShape::Enum) => DeclarationKind::Enumerated,
            (None, TypeShape::Interface | TypeShape::AnnotationType) => {
                DeclarationKind::InterfaceLike
            }
            (None, TypeShape::Class | TypeShape::Record) => DeclarationKind::Plain,
        };

        let index = self.declarations.len();
        self.declarations.push(TypeDeclaration {
            node: id,
            kind,
            shape: decl.shape,
            qualified_name,
            doc: decl.doc.clone(),
            annotations: decl.annotations.clone(),
            nested: Vec::new(),
            enclosing,
            group,
        });
        if let Some(parent) = enclosing {
            self.declarations[parent].nested.push(index);
        }

        self.stack.push(index);
        walk_type_decl(self, tree, decl);
        self.stack.pop();
    }
}

impl DeclarationWalker<'_> {
    fn recognize_group(
        &mut self,
        tree: &SyntaxTree,
        decl: &TypeDecl,
        enclosing: Option<usize>,
    ) -> Option<ConfigGroup> {
        let recognition = self.recognition;
        let marker = tree
            .annotations(&decl.annotations)
            .find(|a| self.unit.refers_to(&a.name, &recognition.group_marker_annotation))?;

        let own_prefix = self.string_element(tree, marker, &recognition.prefix_argument_name);
        let inherits = self.bool_element(tree, marker, &recognition.inherit_argument_name);

        let prefix = if inherits {
            let inherited = self.nearest_group_prefix(enclosing).unwrap_or_default();
            join_segments(&inherited, &own_prefix)
        } else {
            own_prefix
        };

        Some(ConfigGroup {
            prefix,
            inherits,
            is_compact: decl.shape == TypeShape::Record,
            members: decl.members.clone(),
        })
    }

    fn nearest_group_prefix(&self, mut current: Option<usize>) -> Option<String> {
        while let Some(i) = current {
            let decl = &self.declarations[i];
            if let Some(group) = &decl.group {
                return Some(group.prefix.clone());
            }
            current = decl.enclosing;
        }
        None
    }

    /// Unquoted content of a string element; empty when absent or unsupported.
    fn string_element(&mut self, tree: &SyntaxTree, marker: &Annotation, element: &str) -> String {
        let Some(value) = marker.argument(element) else {
            return String::new();
        };
        let expr = tree.expr(value);
        match expr.and_then(|e| e.literal()).and_then(|l| l.string_content()) {
            Some(content) => content,
            None => {
                self.unsupported(marker, element, value, "string literal");
                String::new()
            }
        }
    }

    fn bool_element(&mut self, tree: &SyntaxTree, marker: &Annotation, element: &str) -> bool {
        let Some(value) = marker.argument(element) else {
            return false;
        };
        let expr = tree.expr(value);
        match expr.and_then(|e| e.literal()).and_then(|l| l.as_bool()) {
            Some(flag) => flag,
            None => {
                self.unsupported(marker, element, value, "boolean literal");
                false
            }
        }
    }

    fn unsupported(
        &mut self,
        marker: &Annotation,
        element: &str,
        value: NodeId,
        expected: &'static str,
    ) {
        let found = self
            .unit
            .tree
            .expr(value)
            .map(|e| e.text().to_string())
            .unwrap_or_default();
        self.sink.push(UnsupportedAnnotationValueIssue {
            location: self.unit.location(value),
            annotation: marker.name.clone(),
            element: element.to_string(),
            expected,
            found,
        });
    }
}

/// Join two key segments with `.`, eliding empty ones.
pub fn join_segments(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{}.{}", head, tail),
    }
}
