//! One walk over the typed Clang AST, producing the declaration table, the
//! ordered semantic events and the macro expansion sites of the primary
//! file.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    ops::Range,
    path::Path,
    sync::Arc,
};

use clang_ast::{BareSourceLocation, Id, SourceLocation, SourceRange};
use tracing::{debug, warn};

use super::{
    clang_nodes::{Clang, DeclData, DeclRefData, MemberExprData, Node, spelled_loc},
    type_names::{ScopedNames, function_result, type_names},
};
use crate::{
    decl::{DeclId, DeclKind, DeclTable, Declaration, TemplateOrigin},
    location::{DeclLocation, EventLocation, FileOffset},
    merge::{MatchEvent, MemberAccessEvent, NamedType, ReferenceEvent, TypeUseEvent, VarDeclEvent},
    preprocess::MacroExpansion,
    token::{LexicalKind, RawToken},
};

/// Everything the walk learned about the primary file.
#[derive(Debug, Default)]
pub struct AstFacts {
    pub decls: DeclTable,
    pub events: Vec<MatchEvent>,
    /// Macro expansion sites in the primary file, ordered by offset.
    pub macro_expansions: Vec<MacroExpansion>,
    /// Files whose include site is the primary file.
    pub included_headers: BTreeSet<String>,
}

/// Walk `root`. `source` and `tokens` are the primary file's text and
/// lexical stream; they locate the name tokens the AST only gives as ranges.
pub fn walk_ast(
    root: &Node,
    primary_file: &str,
    source: &str,
    tokens: &[RawToken],
) -> AstFacts {
    let mut walker = Walker::new(primary_file, source, tokens);
    walker.walk(root);
    walker.finish()
}

/// A type use whose target is looked up once every declaration is known.
#[derive(Debug)]
struct PendingTypeUse {
    location: EventLocation,
    /// The name as spelled, qualifier included.
    type_name: String,
    alias: Option<Id>,
    specialized: bool,
    /// Scope the name is looked up from.
    scope: Vec<String>,
}

#[derive(Debug)]
enum PendingEvent {
    Ready(MatchEvent),
    TypeUse(PendingTypeUse),
}

/// Memoized "is this the primary file" check; AST paths may be spelled
/// differently from the path given on the command line.
struct FileMatcher {
    primary: Arc<str>,
    known: HashMap<Arc<str>, bool>,
}

impl FileMatcher {
    fn new(primary: &str) -> Self {
        Self {
            primary: Arc::from(primary),
            known: HashMap::new(),
        }
    }

    fn is_primary(
        &mut self,
        file: &Arc<str>,
    ) -> bool {
        if file.is_empty() {
            return false;
        }
        if let Some(&known) = self.known.get(file) {
            return known;
        }
        let equivalent = paths_equivalent(file, &self.primary);
        self.known.insert(Arc::clone(file), equivalent);
        equivalent
    }

    /// `file`, rewritten to the primary file's spelling when it names it.
    fn normalize(
        &mut self,
        file: &Arc<str>,
    ) -> Arc<str> {
        if self.is_primary(file) {
            Arc::clone(&self.primary)
        } else {
            Arc::clone(file)
        }
    }
}

/// Check if two file paths refer to the same file.
fn paths_equivalent(
    a: &str,
    b: &str,
) -> bool {
    if a == b {
        return true;
    }
    match (Path::new(a).canonicalize(), Path::new(b).canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

struct Walker<'a> {
    source: &'a str,
    tokens: &'a [RawToken],
    files: FileMatcher,
    decls: DeclTable,
    ids: HashMap<Id, DeclId>,
    defined: HashSet<DeclId>,
    /// Semantic scope of the node being walked, outermost first.
    scopes: Vec<String>,
    events: Vec<PendingEvent>,
    macros: BTreeMap<usize, MacroExpansion>,
    included_headers: BTreeSet<String>,
    /// Records, enums and aliases that a spelled type can name.
    named_types: ScopedNames<NamedType>,
    class_templates: ScopedNames<DeclId>,
}

impl<'a> Walker<'a> {
    fn new(
        primary_file: &str,
        source: &'a str,
        tokens: &'a [RawToken],
    ) -> Self {
        Self {
            source,
            tokens,
            files: FileMatcher::new(primary_file),
            decls: DeclTable::new(),
            ids: HashMap::new(),
            defined: HashSet::new(),
            scopes: Vec::new(),
            events: Vec::new(),
            macros: BTreeMap::new(),
            included_headers: BTreeSet::new(),
            named_types: ScopedNames::default(),
            class_templates: ScopedNames::default(),
        }
    }

    /// The table slot for a Clang id, created empty on first sight.
    fn intern(
        &mut self,
        id: Id,
    ) -> DeclId {
        if let Some(&decl) = self.ids.get(&id) {
            return decl;
        }
        let decl = self.decls.insert(Declaration::new(DeclKind::Other, "", ""));
        self.ids.insert(id, decl);
        decl
    }

    fn walk(
        &mut self,
        node: &Node,
    ) {
        match &node.kind {
            Clang::NamespaceDecl(d) => {
                let (_, mut scope) = self.declare_scoped(node, d, DeclKind::Namespace);
                scope.push(d.name().unwrap_or("(anonymous namespace)").to_string());
                self.within(scope, |walker| walker.walk_children(node));
            },
            Clang::CXXRecordDecl(d) | Clang::ClassTemplateSpecializationDecl(d) => {
                let (id, mut scope) = self.declare_scoped(node, d, DeclKind::Record);
                if d.name().is_some() && !d.is_implicit() && matches!(node.kind, Clang::CXXRecordDecl(_)) {
                    let defines = d.complete_definition.unwrap_or(false);
                    self.register_type(id, NamedType::Record(id), defines);
                }
                self.within(scope.clone(), |walker| walker.base_type_uses(d));
                if let Some(name) = d.name() {
                    scope.push(name.to_string());
                }
                self.within(scope, |walker| walker.walk_children(node));
            },
            Clang::EnumDecl(d) => {
                let (id, mut scope) = self.declare_scoped(node, d, DeclKind::Enum);
                if d.name().is_some() {
                    self.register_type(id, NamedType::Record(id), false);
                }
                if let (Some(name), true) = (d.name(), d.scoped_enum_tag.is_some()) {
                    scope.push(name.to_string());
                }
                self.within(scope, |walker| walker.walk_children(node));
            },
            Clang::ClassTemplateDecl(d) => {
                let (template, scope) = self.declare_scoped(node, d, DeclKind::ClassTemplate);
                self.within(scope, |walker| walker.walk_children(node));
                self.link_class_template(node, template);
            },
            Clang::FunctionTemplateDecl(d) => {
                let (template, scope) = self.declare_scoped(node, d, DeclKind::FunctionTemplate);
                self.within(scope, |walker| walker.walk_children(node));
                self.link_function_template(node, template);
            },
            Clang::TypeAliasTemplateDecl(d) => {
                let (template, scope) = self.declare_scoped(node, d, DeclKind::TypeAliasTemplate);
                self.within(scope, |walker| walker.walk_children(node));
                if let Some(pattern) = node.inner.iter().find(|child| matches!(child.kind, Clang::TypeAliasDecl(_))) {
                    let pattern = self.intern(pattern.id);
                    self.set_origin(template, |origin| origin.templated_decl = Some(pattern));
                }
            },
            Clang::FunctionDecl(d)
            | Clang::CXXMethodDecl(d)
            | Clang::CXXConstructorDecl(d)
            | Clang::CXXDestructorDecl(d)
            | Clang::CXXConversionDecl(d) => {
                let kind = if matches!(node.kind, Clang::FunctionDecl(_)) {
                    DeclKind::Function
                } else {
                    DeclKind::Method
                };
                let (id, scope) = self.declare_scoped(node, d, kind);
                if let Some(decl) = self.decls.get_mut(id) {
                    decl.parameter_types = Some(parameter_types(node));
                }
                if !d.is_implicit()
                    && let Some(function_type) = d.qual_type()
                {
                    self.leading_type_uses(d, &function_result(function_type), None);
                }
                self.within(scope, |walker| walker.walk_children(node));
            },
            Clang::TypedefDecl(d) => {
                let id = self.declare(node, d, DeclKind::Typedef);
                self.register_type(id, NamedType::Alias(id), false);
                if !d.is_implicit()
                    && let Some(aliased) = d.qual_type()
                {
                    self.leading_type_uses(d, aliased, d.type_alias());
                }
                self.walk_children(node);
            },
            Clang::TypeAliasDecl(d) => {
                let id = self.declare(node, d, DeclKind::TypeAlias);
                self.register_type(id, NamedType::Alias(id), false);
                self.aliased_type_uses(d);
                self.walk_children(node);
            },
            Clang::EnumConstantDecl(d) => {
                self.declare(node, d, DeclKind::EnumConstant);
                self.walk_children(node);
            },
            Clang::VarDecl(d) | Clang::ParmVarDecl(d) => {
                let kind = if matches!(node.kind, Clang::VarDecl(_)) {
                    DeclKind::Variable
                } else {
                    DeclKind::Parameter
                };
                let (_, scope) = self.declare_scoped(node, d, kind);
                if !d.is_implicit() {
                    if d.name().is_some()
                        && let Some(loc) = &d.loc
                    {
                        let location = self.event_location(loc);
                        self.events.push(PendingEvent::Ready(MatchEvent::VarDecl(VarDeclEvent {
                            location,
                        })));
                    }
                    if let Some(spelled) = d.qual_type() {
                        self.within(scope, |walker| walker.leading_type_uses(d, spelled, d.type_alias()));
                    }
                }
                self.walk_children(node);
            },
            Clang::FieldDecl(d) => {
                self.declare(node, d, DeclKind::Field);
                if !d.is_implicit()
                    && let Some(spelled) = d.qual_type()
                {
                    self.leading_type_uses(d, spelled, d.type_alias());
                }
                self.walk_children(node);
            },
            Clang::DeclRefExpr(d) => {
                self.reference(d);
                self.walk_children(node);
            },
            Clang::MemberExpr(d) => {
                self.member_access(d);
                self.walk_children(node);
            },
            Clang::Other {
                loc,
                range,
            } => {
                if let Some(loc) = loc {
                    self.note_location(loc);
                }
                if let Some(range) = range {
                    self.note_range(range);
                }
                self.walk_children(node);
            },
        }
    }

    fn walk_children(
        &mut self,
        node: &Node,
    ) {
        for child in &node.inner {
            self.walk(child);
        }
    }

    /// Run `visit` with `scope` as the current scope.
    fn within(
        &mut self,
        scope: Vec<String>,
        visit: impl FnOnce(&mut Self),
    ) {
        let outer = std::mem::replace(&mut self.scopes, scope);
        visit(self);
        self.scopes = outer;
    }

    /// The scope a declaration belongs to. Out-of-line definitions name their
    /// semantic parent through `parentDeclContextId`; without one, a qualifier
    /// written before the name (`Foo::` in `void Foo::bar()`) is appended to
    /// the current scope.
    fn decl_scope(
        &mut self,
        data: &DeclData,
    ) -> Vec<String> {
        if let Some(parent) = data.parent_decl_context_id.and_then(|id| self.ids.get(&id).copied())
            && self.defined.contains(&parent)
            && let Some(decl) = self.decls.get(parent)
            && !decl.name.is_empty()
        {
            return decl.qualified_name.split("::").map(str::to_string).collect();
        }

        let mut scope = self.scopes.clone();
        if let Some(name_at) = data.loc.as_ref().and_then(|loc| self.primary_offset(loc)) {
            let written: Vec<String> = self.written_qualifier(name_at).into_iter().map(str::to_string).collect();
            if !scope.ends_with(&written) {
                scope.extend(written);
            }
        }
        scope
    }

    fn declare(
        &mut self,
        node: &Node,
        data: &DeclData,
        kind: DeclKind,
    ) -> DeclId {
        self.declare_scoped(node, data, kind).0
    }

    /// Fill the table slot for a declaration node and return it with the
    /// scope the declaration lives in. Nodes without a location are bare
    /// references to a declaration dumped elsewhere and leave an already
    /// filled slot alone.
    fn declare_scoped(
        &mut self,
        node: &Node,
        data: &DeclData,
        kind: DeclKind,
    ) -> (DeclId, Vec<String>) {
        let id = self.intern(node.id);
        if let Some(loc) = &data.loc {
            self.note_location(loc);
        }
        if let Some(range) = &data.range {
            self.note_range(range);
        }
        let scope = match node.kind {
            Clang::NamespaceDecl(_) => self.scopes.clone(),
            _ => self.decl_scope(data),
        };
        if data.loc.is_none() && self.defined.contains(&id) {
            return (id, scope);
        }

        let name = data.name().unwrap_or_default();
        let mut decl = Declaration::new(kind, name, qualify(&scope, name));
        if let Some(bare) = data.loc.as_ref().and_then(spelled_loc).filter(|bare| bare.line > 0) {
            decl = decl.at(DeclLocation::new(self.files.normalize(&bare.file), bare.line as u32, bare.col as u32));
        }
        if let Some(slot) = self.decls.get_mut(id) {
            decl.origin = std::mem::take(&mut slot.origin);
            *slot = decl;
        }
        self.defined.insert(id);
        (id, scope)
    }

    /// Make `decl` findable by its qualified name. A definition replaces an
    /// earlier forward declaration; otherwise the first declaration stays.
    fn register_type(
        &mut self,
        decl: DeclId,
        named: NamedType,
        defines: bool,
    ) {
        let Some(qualified_name) = self.decls.get(decl).map(|decl| decl.qualified_name.clone()) else {
            return;
        };
        if qualified_name.is_empty() {
            return;
        }
        if defines || self.named_types.get(&qualified_name).is_none() {
            self.named_types.insert(qualified_name, named);
        }
    }

    fn set_origin(
        &mut self,
        id: DeclId,
        update: impl FnOnce(&mut TemplateOrigin),
    ) {
        if let Some(decl) = self.decls.get_mut(id) {
            update(&mut decl.origin);
        }
    }

    /// The first record child of a class template is its pattern; every
    /// specialization child is an instantiation whose members map back onto
    /// the pattern's members.
    fn link_class_template(
        &mut self,
        node: &Node,
        template: DeclId,
    ) {
        let Some(pattern) = node.inner.iter().find(|child| match &child.kind {
            Clang::CXXRecordDecl(d) => !d.is_implicit(),
            _ => false,
        }) else {
            return;
        };
        let pattern_id = self.intern(pattern.id);
        self.set_origin(template, |origin| origin.templated_decl = Some(pattern_id));
        if let Some(decl) = self.decls.get(template).filter(|decl| !decl.name.is_empty()) {
            self.class_templates.insert(decl.qualified_name.clone(), template);
        }

        for specialization in &node.inner {
            if matches!(specialization.kind, Clang::ClassTemplateSpecializationDecl(_)) {
                self.link_instantiated_members(specialization, pattern);
            }
        }
    }

    /// Pair each member of `instance` with the member of `pattern` of the
    /// same kind, name and ordinal.
    fn link_instantiated_members(
        &mut self,
        instance: &Node,
        pattern: &Node,
    ) {
        let mut pattern_members: HashMap<(&'static str, &str), Vec<&Node>> = HashMap::new();
        for member in &pattern.inner {
            if let Some(key) = member_key(member) {
                pattern_members.entry(key).or_default().push(member);
            }
        }

        let mut seen: HashMap<(&'static str, &str), usize> = HashMap::new();
        for member in &instance.inner {
            let Some(key) = member_key(member) else {
                continue;
            };
            let ordinal = seen.entry(key).or_default();
            let index = *ordinal;
            *ordinal += 1;
            let Some(&source) = pattern_members.get(&key).and_then(|members| members.get(index)) else {
                continue;
            };

            let member_id = self.intern(member.id);
            let source_id = self.intern(source.id);
            if member.kind.is_callable() {
                self.set_origin(member_id, |origin| origin.instantiated_from_member = Some(source_id));
            } else {
                match member.kind {
                    Clang::FunctionTemplateDecl(_) | Clang::ClassTemplateDecl(_) => {
                        self.set_origin(member_id, |origin| origin.instantiated_from_member_template = Some(source_id));
                    },
                    Clang::CXXRecordDecl(_) => self.link_instantiated_members(member, source),
                    _ => {},
                }
            }
        }
    }

    /// The first callable child of a function template is the templated
    /// declaration; later ones are its specializations.
    fn link_function_template(
        &mut self,
        node: &Node,
        template: DeclId,
    ) {
        let mut callables = node.inner.iter().filter(|child| child.kind.is_callable());
        let Some(pattern) = callables.next() else {
            return;
        };
        let pattern = self.intern(pattern.id);
        self.set_origin(template, |origin| origin.templated_decl = Some(pattern));
        for specialization in callables {
            let specialization = self.intern(specialization.id);
            self.set_origin(specialization, |origin| origin.primary_template = Some(template));
        }
    }

    fn reference(
        &mut self,
        data: &DeclRefData,
    ) {
        let Some(range) = &data.range else {
            return;
        };
        self.note_range(range);
        let Some(referenced) = &data.referenced_decl else {
            return;
        };
        let name = referenced.name.as_deref().unwrap_or_default();
        let location = self.name_location(range, name);
        let target = self.intern(referenced.id);
        self.events.push(PendingEvent::Ready(MatchEvent::Reference(ReferenceEvent {
            location,
            target,
        })));
    }

    fn member_access(
        &mut self,
        data: &MemberExprData,
    ) {
        let Some(range) = &data.range else {
            return;
        };
        self.note_range(range);
        let Some(member) = data.referenced_member_decl else {
            return;
        };
        let name = data.name.as_deref().unwrap_or_default();
        let location = self.name_location(range, name);
        let member = self.intern(member);
        self.events.push(PendingEvent::Ready(MatchEvent::MemberAccess(MemberAccessEvent {
            location,
            member,
        })));
    }

    /// Type uses written between the start of a declaration and its name:
    /// variable, parameter and field types, callable results, typedef targets.
    fn leading_type_uses(
        &mut self,
        data: &DeclData,
        spelled: &str,
        alias: Option<Id>,
    ) {
        let (Some(loc), Some(range)) = (&data.loc, &data.range) else {
            return;
        };
        if let (Some(begin), Some(name_at)) = (self.primary_offset(&range.begin), self.primary_offset(loc)) {
            self.type_uses(spelled, alias, begin..name_at);
        }
    }

    /// `Foo` in `using Alias = Foo;`, written after the name.
    fn aliased_type_uses(
        &mut self,
        data: &DeclData,
    ) {
        let (Some(loc), Some(range), Some(spelled)) = (&data.loc, &data.range, data.qual_type()) else {
            return;
        };
        if let (Some(name_at), Some(end)) = (self.primary_offset(loc), self.primary_offset(&range.end)) {
            self.type_uses(spelled, data.type_alias(), name_at + 1..end + 1);
        }
    }

    /// Base classes, written between a record's name and its body.
    fn base_type_uses(
        &mut self,
        data: &DeclData,
    ) {
        let (Some(loc), Some(range)) = (&data.loc, &data.range) else {
            return;
        };
        let (Some(name_at), Some(end)) = (self.primary_offset(loc), self.primary_offset(&range.end)) else {
            return;
        };
        let first = self.tokens.partition_point(|token| token.offset <= name_at);
        let body = self.tokens[first..]
            .iter()
            .take_while(|token| token.offset <= end)
            .find(|token| self.source.get(token.offset..token.end()) == Some("{"))
            .map_or(end + 1, |token| token.offset);
        for spelled in data.base_types() {
            self.type_uses(spelled, None, name_at + 1..body);
        }
    }

    /// Queue a type use for every named part of `spelled` at each token in
    /// `window` that spells it. A token matches when its written qualifier is
    /// a trailing part of the spelled one; tokens followed by `::` are
    /// qualifiers themselves and never match. `alias` applies to the outer
    /// type only.
    fn type_uses(
        &mut self,
        spelled: &str,
        alias: Option<Id>,
        window: Range<usize>,
    ) {
        let tokens = self.tokens;
        let first = tokens.partition_point(|token| token.offset < window.start);
        let mut claimed: BTreeMap<usize, PendingTypeUse> = BTreeMap::new();

        for (position, name) in type_names(spelled).into_iter().enumerate() {
            let qualifier: Vec<&str> = name.qualifier().collect();
            for (index, token) in tokens.iter().enumerate().skip(first) {
                if token.offset >= window.end {
                    break;
                }
                if token.kind != LexicalKind::RawIdentifier
                    || claimed.contains_key(&token.offset)
                    || self.token_text(index) != Some(name.identifier())
                    || self.token_text(index + 1) == Some("::")
                    || !qualifier.ends_with(&self.written_qualifier(token.offset))
                {
                    continue;
                }
                claimed.insert(token.offset, PendingTypeUse {
                    location: EventLocation::plain(Arc::clone(&self.files.primary), token.offset),
                    type_name: name.spelled.to_string(),
                    alias: alias.filter(|_| position == 0 && !name.specialized),
                    specialized: name.specialized,
                    scope: self.scopes.clone(),
                });
            }
        }
        self.events.extend(claimed.into_values().map(PendingEvent::TypeUse));
    }

    fn token_text(
        &self,
        index: usize,
    ) -> Option<&'a str> {
        let token = self.tokens.get(index)?;
        self.source.get(token.offset..token.end())
    }

    /// The qualifier written before the token at `offset`, outermost first:
    /// `a`, `b` for `a::b::Foo`. Template argument lists are stepped over.
    fn written_qualifier(
        &self,
        offset: usize,
    ) -> Vec<&'a str> {
        let mut index = self.tokens.partition_point(|token| token.offset < offset);
        let mut parts = Vec::new();
        while index > 0 && self.token_text(index - 1) == Some("::") {
            index -= 1;
            if matches!(index.checked_sub(1).and_then(|close| self.token_text(close)), Some(">" | ">>")) {
                match self.opening_angle(index - 1) {
                    Some(open) => index = open,
                    None => break,
                }
            }
            let Some(previous) = index.checked_sub(1) else {
                break;
            };
            if self.tokens[previous].kind != LexicalKind::RawIdentifier {
                break;
            }
            let Some(part) = self.token_text(previous) else {
                break;
            };
            parts.push(part);
            index = previous;
        }
        parts.reverse();
        parts
    }

    /// Index of the `<` opening the argument list that `close` ends.
    fn opening_angle(
        &self,
        close: usize,
    ) -> Option<usize> {
        let mut depth = 0usize;
        for index in (0..=close).rev() {
            match self.token_text(index)? {
                ">" => depth += 1,
                ">>" => depth += 2,
                "<" => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(index);
                    }
                },
                ";" | "{" | "}" => return None,
                _ => {},
            }
        }
        None
    }

    /// Offset of `loc`'s spelling when it lies in the primary file.
    fn primary_offset(
        &mut self,
        loc: &SourceLocation,
    ) -> Option<usize> {
        let bare = spelled_loc(loc)?;
        self.files.is_primary(&bare.file).then_some(bare.offset)
    }

    /// The name token of an expression: the last identifier spelled `name`
    /// inside `range`, or the range end when it cannot be found.
    fn name_location(
        &mut self,
        range: &SourceRange,
        name: &str,
    ) -> EventLocation {
        let mut location = self.event_location(&range.end);
        if name.is_empty() {
            return location;
        }
        if let (Some(begin), Some(end)) = (self.primary_offset(&range.begin), self.primary_offset(&range.end))
            && let Some(offset) = self.find_identifier(begin, end, name)
        {
            location.spelling = Some(FileOffset::new(Arc::clone(&self.files.primary), offset));
        }
        location
    }

    /// The last identifier token spelled `name` starting in `[begin, end]`.
    fn find_identifier(
        &self,
        begin: usize,
        end: usize,
        name: &str,
    ) -> Option<usize> {
        let first = self.tokens.partition_point(|token| token.offset < begin);
        self.tokens[first..]
            .iter()
            .take_while(|token| token.offset <= end)
            .filter(|token| token.kind == LexicalKind::RawIdentifier)
            .filter(|token| self.source.get(token.offset..token.end()) == Some(name))
            .last()
            .map(|token| token.offset)
    }

    fn event_location(
        &mut self,
        loc: &SourceLocation,
    ) -> EventLocation {
        EventLocation {
            spelling: loc.spelling_loc.as_ref().map(|bare| self.file_offset(bare)),
            expansion: loc.expansion_loc.as_ref().map(|bare| self.file_offset(bare)),
        }
    }

    fn file_offset(
        &mut self,
        bare: &BareSourceLocation,
    ) -> FileOffset {
        FileOffset::new(self.files.normalize(&bare.file), bare.offset)
    }

    fn note_range(
        &mut self,
        range: &SourceRange,
    ) {
        self.note_location(&range.begin);
        self.note_location(&range.end);
    }

    /// Record include edges and macro expansion sites visible through a
    /// location.
    fn note_location(
        &mut self,
        loc: &SourceLocation,
    ) {
        for bare in [&loc.spelling_loc, &loc.expansion_loc].into_iter().flatten() {
            if let Some(included_from) = &bare.included_from
                && self.files.is_primary(&included_from.file)
            {
                self.included_headers.insert(bare.file.to_string());
            }
        }

        let (Some(spelling), Some(expansion)) = (&loc.spelling_loc, &loc.expansion_loc) else {
            return;
        };
        if expansion.is_macro_arg_expansion
            || (spelling.file == expansion.file && spelling.offset == expansion.offset)
            || !self.files.is_primary(&expansion.file)
            || self.macros.contains_key(&expansion.offset)
        {
            return;
        }
        let Some(name) = self.source.get(expansion.offset..expansion.offset + expansion.tok_len) else {
            return;
        };
        if !is_identifier(name) {
            return;
        }
        let definition = (spelling.line > 0)
            .then(|| DeclLocation::new(self.files.normalize(&spelling.file), spelling.line as u32, spelling.col as u32));
        self.macros.insert(expansion.offset, MacroExpansion {
            file: Arc::clone(&self.files.primary),
            offset: expansion.offset,
            name: name.to_string(),
            definition,
        });
    }

    fn finish(self) -> AstFacts {
        let Walker {
            decls,
            ids,
            defined,
            events: pending,
            macros,
            included_headers,
            named_types,
            class_templates,
            ..
        } = self;

        let mut events = Vec::with_capacity(pending.len());
        let mut dropped = 0usize;
        let mut unresolved_types = 0usize;
        for event in pending {
            let event = match event {
                PendingEvent::Ready(event) => event,
                PendingEvent::TypeUse(type_use) => {
                    let PendingTypeUse {
                        location,
                        type_name,
                        alias,
                        specialized,
                        scope,
                    } = type_use;
                    let named = if let Some(alias) = alias.and_then(|alias| ids.get(&alias).copied()) {
                        NamedType::Alias(alias)
                    } else if let Some(template) =
                        class_templates.resolve(&type_name, &scope).filter(|_| specialized)
                    {
                        NamedType::Specialization {
                            record: decls.get(*template).and_then(|decl| decl.origin.templated_decl),
                        }
                    } else if let Some(&named) = named_types.resolve(&type_name, &scope) {
                        named
                    } else {
                        unresolved_types += 1;
                        continue;
                    };
                    MatchEvent::TypeUse(TypeUseEvent {
                        location,
                        named,
                    })
                },
            };
            let target = match &event {
                MatchEvent::Reference(e) => Some(e.target),
                MatchEvent::MemberAccess(e) => Some(e.member),
                MatchEvent::VarDecl(_) | MatchEvent::TypeUse(_) => None,
            };
            if let Some(target) = target
                && !defined.contains(&target)
            {
                dropped += 1;
                continue;
            }
            events.push(event);
        }
        if dropped > 0 {
            warn!("Skipped {dropped} references to declarations missing from the AST dump");
        }

        debug!(
            "[ast-walk] {} declarations, {} events ({} dropped, {} unresolved type names), {} macro expansions, {} \
             included headers",
            decls.len(),
            events.len(),
            dropped,
            unresolved_types,
            macros.len(),
            included_headers.len()
        );

        AstFacts {
            decls,
            events,
            macro_expansions: macros.into_values().collect(),
            included_headers,
        }
    }
}

fn qualify(
    scope: &[String],
    name: &str,
) -> String {
    let mut qualified = scope.join("::");
    if !qualified.is_empty() {
        qualified.push_str("::");
    }
    qualified.push_str(name);
    qualified
}

/// Spelled types of the `ParmVarDecl` children of a callable.
fn parameter_types(node: &Node) -> Vec<String> {
    node.inner
        .iter()
        .filter_map(|child| match &child.kind {
            Clang::ParmVarDecl(d) => Some(d.qual_type().unwrap_or_default().to_string()),
            _ => None,
        })
        .collect()
}

fn member_key(node: &Node) -> Option<(&'static str, &str)> {
    let data = node.kind.decl_data()?;
    if data.is_implicit() {
        return None;
    }
    Some((node.kind.kind_tag(), data.name().unwrap_or_default()))
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
#[path = "../../tests/src/frontend/ast_walk_tests.rs"]
mod tests;
