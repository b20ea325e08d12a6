//! Declarations resolved by the front end and their template origins.

mod canonical;

use crate::location::DeclLocation;

pub use self::canonical::canonicalize;

/// Index of a [`Declaration`] inside its [`DeclTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Variable,
    Parameter,
    Field,
    Function,
    Method,
    Record,
    Enum,
    EnumConstant,
    Typedef,
    TypeAlias,
    FunctionTemplate,
    ClassTemplate,
    TypeAliasTemplate,
    Namespace,
    Other,
}

impl DeclKind {
    /// Kinds whose uses are highlighted as variables.
    pub fn is_variable(self) -> bool {
        matches!(self, DeclKind::Variable | DeclKind::Parameter)
    }

    pub fn is_callable(self) -> bool {
        matches!(self, DeclKind::Function | DeclKind::Method)
    }

    pub fn is_template(self) -> bool {
        matches!(self, DeclKind::FunctionTemplate | DeclKind::ClassTemplate | DeclKind::TypeAliasTemplate)
    }
}

/// Links from a compiler-generated declaration back to what it was
/// generated from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateOrigin {
    /// For members of an instantiated class: the member it was copied from.
    pub instantiated_from_member: Option<DeclId>,
    /// For function template specializations: the primary template.
    pub primary_template: Option<DeclId>,
    /// For member templates of an instantiated class: the member template
    /// it was copied from.
    pub instantiated_from_member_template: Option<DeclId>,
    /// For templates: the declaration the template wraps.
    pub templated_decl: Option<DeclId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    pub qualified_name: String,
    pub location: Option<DeclLocation>,
    /// Spelled parameter types, for callables only.
    pub parameter_types: Option<Vec<String>>,
    pub origin: TemplateOrigin,
}

impl Declaration {
    pub fn new(
        kind: DeclKind,
        name: impl Into<String>,
        qualified_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            qualified_name: qualified_name.into(),
            location: None,
            parameter_types: None,
            origin: TemplateOrigin::default(),
        }
    }

    pub fn at(
        mut self,
        location: DeclLocation,
    ) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_parameter_types(
        mut self,
        parameter_types: Vec<String>,
    ) -> Self {
        self.parameter_types = Some(parameter_types);
        self
    }
}

/// Arena of declarations addressed by [`DeclId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclTable {
    decls: Vec<Declaration>,
}

impl DeclTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        decl: Declaration,
    ) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    pub fn get(
        &self,
        id: DeclId,
    ) -> Option<&Declaration> {
        self.decls.get(id.0 as usize)
    }

    pub fn get_mut(
        &mut self,
        id: DeclId,
    ) -> Option<&mut Declaration> {
        self.decls.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Declaration)> + '_ {
        self.decls.iter().enumerate().map(|(i, decl)| (DeclId(i as u32), decl))
    }
}
