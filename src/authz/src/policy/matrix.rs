//! Declared permission matrix
//!
//! The single place where role grants are written down. Each resource kind
//! lists, per role, the action tokens that role may attempt. ADMIN rows are
//! listed for capability summaries; the decision function bypasses them.

use crate::scope::{ActionToken, Scope};
use crate::types::{ResourceKind, Role, Verb};

/// Grants for one role on one resource kind
pub type RoleGrants = (Role, &'static [ActionToken]);

/// All role grants for one resource kind
pub type ResourceGrants = (ResourceKind, &'static [RoleGrants]);

/// `tokens![Read, Update / Own]` expands to a static slice of action tokens.
macro_rules! tokens {
    (@one $verb:ident / $scope:ident) => {
        ActionToken::scoped(Verb::$verb, Scope::$scope)
    };
    (@one $verb:ident) => {
        ActionToken::unscoped(Verb::$verb)
    };
    ($($verb:ident $(/ $scope:ident)?),* $(,)?) => {
        &[$(tokens!(@one $verb $(/ $scope)?)),*]
    };
}

pub const MATRIX: &[ResourceGrants] = &[
    (
        ResourceKind::Users,
        &[
            (Role::Admin, tokens![Create, Read, Update, Delete]),
            (Role::ProjectManager, tokens![Read, Update / SelfOnly]),
            (Role::ScrumMaster, tokens![Read, Update / SelfOnly]),
            (Role::Employee, tokens![Read / Team, Update / SelfOnly]),
            (Role::Client, tokens![Read / SelfOnly, Update / SelfOnly]),
        ],
    ),
    (
        ResourceKind::Projects,
        &[
            (Role::Admin, tokens![Create, Read, Update, Delete]),
            (Role::ProjectManager, tokens![Create, Read, Update / Own, Delete / Own]),
            (Role::ScrumMaster, tokens![Read / Project, Update / Project]),
            (Role::Employee, tokens![Read / Project]),
            (Role::Client, tokens![Read / Project]),
        ],
    ),
    (
        ResourceKind::Sprints,
        &[
            (Role::Admin, tokens![Create, Read, Update, Delete, Start, Complete]),
            (Role::ProjectManager, tokens![Create, Read, Update, Delete, Start, Complete]),
            (Role::ScrumMaster, tokens![Create, Read, Update, Start, Complete]),
            (Role::Employee, tokens![Read / Project]),
            (Role::Client, tokens![Read / Project]),
        ],
    ),
    (
        ResourceKind::Issues,
        &[
            (Role::Admin, tokens![Create, Read, Update, Delete]),
            (Role::ProjectManager, tokens![Create, Read, Update, Delete]),
            (Role::ScrumMaster, tokens![Create, Read, Update, Delete / Own]),
            (
                Role::Employee,
                tokens![Create, Read / Project, Update / Assigned, Delete / Own],
            ),
            (Role::Client, tokens![Create, Read / Own, Update / Own]),
        ],
    ),
    (
        ResourceKind::Comments,
        &[
            (Role::Admin, tokens![Create, Read, Update, Delete]),
            (Role::ProjectManager, tokens![Create, Read, Update / Own, Delete]),
            (Role::ScrumMaster, tokens![Create, Read, Update / Own, Delete / Own]),
            (Role::Employee, tokens![Create, Read, Update / Own, Delete / Own]),
            (Role::Client, tokens![Create, Read / Project, Update / Own, Delete / Own]),
        ],
    ),
    (
        ResourceKind::TimeEntries,
        &[
            (Role::Admin, tokens![Create, Read, Update, Delete]),
            (Role::ProjectManager, tokens![Create, Read, Update, Delete]),
            (Role::ScrumMaster, tokens![Create, Read / Team, Update / Own, Delete / Own]),
            (Role::Employee, tokens![Create, Read / Own, Update / Own, Delete / Own]),
            (Role::Client, tokens![Read / Project]),
        ],
    ),
    (
        ResourceKind::Reports,
        &[
            (Role::Admin, tokens![Create, Read, Update, Delete]),
            (Role::ProjectManager, tokens![Create, Read / All]),
            (Role::ScrumMaster, tokens![Create, Read / Team]),
            (Role::Employee, tokens![Read / SelfOnly]),
            (Role::Client, tokens![Read / Project]),
        ],
    ),
    (
        ResourceKind::Settings,
        &[
            (Role::Admin, tokens![Read, Update]),
            (Role::ProjectManager, tokens![Read]),
            (Role::ScrumMaster, tokens![Read]),
            (Role::Employee, tokens![Read]),
            (Role::Client, tokens![]),
        ],
    ),
];
