//! Permission table
//!
//! Maps `(ResourceKind, Role)` to the grant set for that cell. The table is
//! built once from [`matrix::MATRIX`] and only ever handed out by shared
//! reference, so it cannot change after initialization.

pub mod matrix;

use crate::scope::{ActionToken, Scope};
use crate::types::{ResourceKind, Role, Verb};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

pub use matrix::{ResourceGrants, RoleGrants, MATRIX};

static EMPTY_GRANTS: GrantSet = GrantSet(BTreeSet::new());

static GLOBAL_TABLE: Lazy<PermissionTable> = Lazy::new(|| {
    let table = PermissionTable::from_declarations(MATRIX);
    info!(
        "Permission table initialized: {} resource kinds, {} grants",
        table.cells.len(),
        table.iter().map(|(_, _, grants)| grants.len()).sum::<usize>()
    );
    table
});

/// The action tokens a role holds for a resource kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GrantSet(BTreeSet<ActionToken>);

impl GrantSet {
    /// Shared empty set, returned for unknown or absent cells
    pub fn empty() -> &'static GrantSet {
        &EMPTY_GRANTS
    }

    pub fn contains(&self, token: &ActionToken) -> bool {
        self.0.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionToken> + '_ {
        self.0.iter().copied()
    }

    /// Whether any variant of `verb`, scoped or not, is granted
    pub fn grants_verb(&self, verb: Verb) -> bool {
        self.iter().any(|token| token.verb() == verb)
    }

    /// Whether the unscoped token for `verb` is granted
    pub fn grants_unscoped(&self, verb: Verb) -> bool {
        self.contains(&ActionToken::unscoped(verb))
    }

    /// Scoped variants of `verb`, in scope declaration order
    pub fn scoped_variants(&self, verb: Verb) -> impl Iterator<Item = ActionToken> + '_ {
        self.iter()
            .filter(move |token| token.verb() == verb && !token.is_unscoped())
    }

    /// Scope qualifiers granted for `verb`
    pub fn scopes_for(&self, verb: Verb) -> impl Iterator<Item = Scope> + '_ {
        self.scoped_variants(verb).filter_map(|token| token.scope())
    }
}

impl FromIterator<ActionToken> for GrantSet {
    fn from_iter<I: IntoIterator<Item = ActionToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Total mapping `(ResourceKind, Role) -> GrantSet`
///
/// Every resource kind has an entry for every role; cells missing from the
/// declarations hold the empty set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionTable {
    cells: BTreeMap<ResourceKind, BTreeMap<Role, GrantSet>>,
}

impl PermissionTable {
    /// Process-wide table built from the declared matrix on first use
    pub fn global() -> &'static PermissionTable {
        &GLOBAL_TABLE
    }

    /// Build a total table from declarations; later duplicates of a cell merge.
    pub fn from_declarations(declarations: &[ResourceGrants]) -> Self {
        let mut cells: BTreeMap<ResourceKind, BTreeMap<Role, GrantSet>> = ResourceKind::ALL
            .into_iter()
            .map(|kind| {
                let roles = Role::ALL
                    .into_iter()
                    .map(|role| (role, GrantSet::default()))
                    .collect();
                (kind, roles)
            })
            .collect();

        for (kind, role_grants) in declarations {
            for (role, tokens) in role_grants.iter() {
                if let Some(grants) = cells.get_mut(kind).and_then(|roles| roles.get_mut(role)) {
                    grants.0.extend(tokens.iter().copied());
                }
            }
        }

        Self { cells }
    }

    /// Grant set for a cell; never fails
    pub fn lookup(&self, kind: ResourceKind, role: Role) -> &GrantSet {
        self.cells
            .get(&kind)
            .and_then(|roles| roles.get(&role))
            .unwrap_or_else(|| GrantSet::empty())
    }

    /// Grant set for string inputs; unknown kinds or roles yield the empty set
    pub fn lookup_raw(&self, resource: &str, role: &str) -> &GrantSet {
        match (resource.parse::<ResourceKind>(), role.parse::<Role>()) {
            (Ok(kind), Ok(role)) => self.lookup(kind, role),
            _ => GrantSet::empty(),
        }
    }

    /// Capability summary: every resource kind mapped to the role's grants
    pub fn grants_for_role(&self, role: Role) -> BTreeMap<ResourceKind, GrantSet> {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, self.lookup(kind, role).clone()))
            .collect()
    }

    /// Every cell, ordered by resource kind then role
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, Role, &GrantSet)> + '_ {
        self.cells.iter().flat_map(|(kind, roles)| {
            roles.iter().map(move |(role, grants)| (*kind, *role, grants))
        })
    }
}
