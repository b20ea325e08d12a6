//! Semantic merge: folds resolved match events into the token index.
//!
//! The front end delivers events in traversal order. Each event is
//! dispatched to the handler for its kind; a later write to the same token
//! overwrites an earlier one.

mod handlers;

use tracing::debug;

use crate::{
    decl::{DeclId, DeclTable, canonicalize},
    error::HighlightError,
    index::{SemanticLink, TokenMap},
    location::EventLocation,
};

/// A declaration reference in an expression (`x`, `std::cout`, `func(0)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEvent {
    pub location: EventLocation,
    pub target: DeclId,
}

/// The name token of a variable or parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDeclEvent {
    pub location: EventLocation,
}

/// A spelled type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeUseEvent {
    /// Start of one named part of the type.
    pub location: EventLocation,
    pub named: NamedType,
}

/// The member name of a `.` or `->` access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAccessEvent {
    pub location: EventLocation,
    pub member: DeclId,
}

/// The named entity behind one part of a spelled type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedType {
    /// `Foo<int>`: the class the specialization names, when known.
    Specialization {
        record: Option<DeclId>,
    },
    /// A typedef or alias; links to the alias declaration itself.
    Alias(DeclId),
    Record(DeclId),
    /// Builtins and anything else without a declaration to link to.
    Unnamed,
}

impl NamedType {
    pub fn declaration(self) -> Option<DeclId> {
        match self {
            NamedType::Specialization {
                record,
            } => record,
            NamedType::Alias(id) | NamedType::Record(id) => Some(id),
            NamedType::Unnamed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    Reference(ReferenceEvent),
    VarDecl(VarDeclEvent),
    TypeUse(TypeUseEvent),
    MemberAccess(MemberAccessEvent),
}

impl MatchEvent {
    pub fn location(&self) -> &EventLocation {
        match self {
            MatchEvent::Reference(e) => &e.location,
            MatchEvent::VarDecl(e) => &e.location,
            MatchEvent::TypeUse(e) => &e.location,
            MatchEvent::MemberAccess(e) => &e.location,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            MatchEvent::Reference(_) => "declaration reference",
            MatchEvent::VarDecl(_) => "variable declaration",
            MatchEvent::TypeUse(_) => "type use",
            MatchEvent::MemberAccess(_) => "member access",
        }
    }
}

/// Read-only inputs shared by all handlers during one merge.
#[derive(Debug, Clone, Copy)]
pub struct MergeContext<'a> {
    pub primary_file: &'a str,
    pub decls: &'a DeclTable,
    /// Keep links whose target is declared in the primary file.
    pub same_file_links: bool,
}

impl<'a> MergeContext<'a> {
    pub fn new(
        primary_file: &'a str,
        decls: &'a DeclTable,
    ) -> Self {
        Self {
            primary_file,
            decls,
            same_file_links: false,
        }
    }

    pub fn with_same_file_links(
        mut self,
        enabled: bool,
    ) -> Self {
        self.same_file_links = enabled;
        self
    }

    /// Build the link for `target`, after canonicalization.
    ///
    /// Returns `None` when the authored declaration has no location or, unless
    /// same-file links are enabled, lives in the primary file.
    pub fn link_to(
        &self,
        target: DeclId,
    ) -> Option<SemanticLink> {
        let authored = canonicalize(self.decls, target);
        let decl = self.decls.get(authored)?;
        let location = decl.location.as_ref()?;
        if &*location.file == self.primary_file && !self.same_file_links {
            return None;
        }
        Some(
            SemanticLink::new(&decl.name, &decl.qualified_name, location)
                .with_parameter_types(decl.parameter_types.clone()),
        )
    }
}

/// Counters reported after a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub events: usize,
    pub outside_primary: usize,
    pub reclassified: usize,
    pub linked: usize,
    pub splits: usize,
}

/// Apply every event to `tokens`, in order. Type uses without a declaration
/// are skipped before they are located.
///
/// Fails on the first event whose spelled location in the primary file does
/// not fall on any indexed token.
pub fn merge_events<'e>(
    tokens: &mut TokenMap,
    ctx: &MergeContext<'_>,
    events: impl IntoIterator<Item = &'e MatchEvent>,
) -> Result<MergeStats, HighlightError> {
    let mut stats = MergeStats::default();
    for event in events {
        stats.events += 1;
        if let MatchEvent::TypeUse(e) = event
            && e.named.declaration().is_none()
        {
            continue;
        }
        let Some(record) = handlers::locate(tokens, ctx, event.location(), event.kind_name(), &mut stats)? else {
            continue;
        };
        match event {
            MatchEvent::Reference(e) => handlers::on_reference(record, ctx, e, &mut stats),
            MatchEvent::VarDecl(_) => handlers::on_var_decl(record, &mut stats),
            MatchEvent::TypeUse(e) => handlers::on_type_use(record, ctx, e, &mut stats),
            MatchEvent::MemberAccess(e) => handlers::on_member_access(record, ctx, e, &mut stats),
        }
    }
    debug!(
        "[merge] {} events, {} outside primary file, {} reclassified, {} linked, {} splits",
        stats.events, stats.outside_primary, stats.reclassified, stats.linked, stats.splits
    );
    Ok(stats)
}
