use clang_ast::{BareSourceLocation, Id, SourceLocation, SourceRange};
use serde::Deserialize;

pub type Node = clang_ast::Node<Clang>;

/// Typed representation of the Clang AST node kinds the walker needs.
///
/// Each variant corresponds to a Clang AST node `"kind"` value; everything
/// else lands in `Other`.
#[derive(Deserialize, Debug)]
pub enum Clang {
    NamespaceDecl(DeclData),
    CXXRecordDecl(DeclData),
    ClassTemplateDecl(DeclData),
    ClassTemplateSpecializationDecl(DeclData),
    FunctionDecl(DeclData),
    CXXMethodDecl(DeclData),
    CXXConstructorDecl(DeclData),
    CXXDestructorDecl(DeclData),
    CXXConversionDecl(DeclData),
    FunctionTemplateDecl(DeclData),
    TypeAliasTemplateDecl(DeclData),
    TypedefDecl(DeclData),
    TypeAliasDecl(DeclData),
    EnumDecl(DeclData),
    EnumConstantDecl(DeclData),
    VarDecl(DeclData),
    ParmVarDecl(DeclData),
    FieldDecl(DeclData),

    DeclRefExpr(DeclRefData),
    MemberExpr(MemberExprData),

    // `loc` and `range` must be deserialized even for unrecognized kinds:
    // `clang-ast` tracks the current file across the stream through them,
    // and skipping one leaves later nodes with the wrong file.
    Other {
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
}

/// Common data for all declaration nodes.
#[derive(Deserialize, Debug)]
pub struct DeclData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    #[serde(rename = "completeDefinition")]
    pub complete_definition: Option<bool>,
    #[serde(rename = "scopedEnumTag")]
    pub scoped_enum_tag: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<QualType>,
    /// Written base classes of a record.
    pub bases: Option<Vec<BaseSpecifier>>,
    /// Semantic parent, present when it differs from the lexical one
    /// (`void ns::f() {}`).
    #[serde(rename = "parentDeclContextId")]
    pub parent_decl_context_id: Option<Id>,
}

#[derive(Deserialize, Debug)]
pub struct BaseSpecifier {
    #[serde(rename = "type")]
    pub ty: Option<QualType>,
}

#[derive(Deserialize, Debug)]
pub struct DeclRefData {
    pub range: Option<SourceRange>,
    #[serde(rename = "referencedDecl")]
    pub referenced_decl: Option<ReferencedDecl>,
}

#[derive(Deserialize, Debug)]
pub struct MemberExprData {
    pub range: Option<SourceRange>,
    pub name: Option<String>,
    #[serde(rename = "referencedMemberDecl")]
    pub referenced_member_decl: Option<Id>,
}

/// Inline summary of a referenced declaration.
#[derive(Deserialize, Debug)]
pub struct ReferencedDecl {
    pub id: Id,
    pub kind: Option<String>,
    pub name: Option<String>,
}

/// Clang's qualified type representation.
#[derive(Deserialize, Debug)]
pub struct QualType {
    #[serde(rename = "qualType")]
    pub qual_type: Option<String>,
    /// Set when the type is spelled through a typedef or alias.
    #[serde(rename = "typeAliasDeclId")]
    pub type_alias_decl_id: Option<Id>,
}

impl DeclData {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
    pub fn is_implicit(&self) -> bool {
        self.is_implicit.unwrap_or(false)
    }
    pub fn qual_type(&self) -> Option<&str> {
        self.ty.as_ref().and_then(|t| t.qual_type.as_deref())
    }
    pub fn type_alias(&self) -> Option<Id> {
        self.ty.as_ref().and_then(|t| t.type_alias_decl_id)
    }
    pub fn base_types(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().flatten().filter_map(|base| base.ty.as_ref()?.qual_type.as_deref())
    }
}

impl Clang {
    /// Declaration payload, for declaration kinds.
    pub fn decl_data(&self) -> Option<&DeclData> {
        match self {
            Clang::NamespaceDecl(d)
            | Clang::CXXRecordDecl(d)
            | Clang::ClassTemplateDecl(d)
            | Clang::ClassTemplateSpecializationDecl(d)
            | Clang::FunctionDecl(d)
            | Clang::CXXMethodDecl(d)
            | Clang::CXXConstructorDecl(d)
            | Clang::CXXDestructorDecl(d)
            | Clang::CXXConversionDecl(d)
            | Clang::FunctionTemplateDecl(d)
            | Clang::TypeAliasTemplateDecl(d)
            | Clang::TypedefDecl(d)
            | Clang::TypeAliasDecl(d)
            | Clang::EnumDecl(d)
            | Clang::EnumConstantDecl(d)
            | Clang::VarDecl(d)
            | Clang::ParmVarDecl(d)
            | Clang::FieldDecl(d) => Some(d),
            Clang::DeclRefExpr(_)
            | Clang::MemberExpr(_)
            | Clang::Other {
                ..
            } => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Clang::FunctionDecl(_)
                | Clang::CXXMethodDecl(_)
                | Clang::CXXConstructorDecl(_)
                | Clang::CXXDestructorDecl(_)
                | Clang::CXXConversionDecl(_)
        )
    }

    /// Stable name of the node kind, used to pair members of a class
    /// template with their instantiated copies.
    pub fn kind_tag(&self) -> &'static str {
        match self {
            Clang::NamespaceDecl(_) => "NamespaceDecl",
            Clang::CXXRecordDecl(_) => "CXXRecordDecl",
            Clang::ClassTemplateDecl(_) => "ClassTemplateDecl",
            Clang::ClassTemplateSpecializationDecl(_) => "ClassTemplateSpecializationDecl",
            Clang::FunctionDecl(_) => "FunctionDecl",
            Clang::CXXMethodDecl(_) => "CXXMethodDecl",
            Clang::CXXConstructorDecl(_) => "CXXConstructorDecl",
            Clang::CXXDestructorDecl(_) => "CXXDestructorDecl",
            Clang::CXXConversionDecl(_) => "CXXConversionDecl",
            Clang::FunctionTemplateDecl(_) => "FunctionTemplateDecl",
            Clang::TypeAliasTemplateDecl(_) => "TypeAliasTemplateDecl",
            Clang::TypedefDecl(_) => "TypedefDecl",
            Clang::TypeAliasDecl(_) => "TypeAliasDecl",
            Clang::EnumDecl(_) => "EnumDecl",
            Clang::EnumConstantDecl(_) => "EnumConstantDecl",
            Clang::VarDecl(_) => "VarDecl",
            Clang::ParmVarDecl(_) => "ParmVarDecl",
            Clang::FieldDecl(_) => "FieldDecl",
            Clang::DeclRefExpr(_) => "DeclRefExpr",
            Clang::MemberExpr(_) => "MemberExpr",
            Clang::Other {
                ..
            } => "Other",
        }
    }
}

/// The location the characters were written at, falling back to the
/// expansion location when no spelling is recorded.
pub fn spelled_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.spelling_loc.as_ref().or(loc.expansion_loc.as_ref())
}
