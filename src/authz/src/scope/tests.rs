/// Test suite for the scope module
///
/// Tests cover:
/// - Token parsing across every verb/scope pair
/// - Suffix ambiguity
/// - Fail-closed resolution with missing facts
/// - Concurrent access

use super::*;
use crate::types::{AccessQuery, Role, Verb};
use std::sync::Arc;
use std::thread;

fn query_with(user: &str, owner: Option<&str>, assignee: Option<&str>) -> AccessQuery {
    AccessQuery::builder()
        .role(Role::Employee)
        .user_id(user)
        .resource("issues")
        .action("read")
        .maybe_resource_owner_id(owner.map(String::from))
        .maybe_resource_assignee_id(assignee.map(String::from))
        .build()
        .unwrap()
}

// ============================================================================
// Token Parsing Tests
// ============================================================================

#[test]
fn test_every_token_round_trips() {
    for verb in Verb::ALL {
        let token = ActionToken::unscoped(verb);
        assert_eq!(token.to_string().parse::<ActionToken>().unwrap(), token);

        for scope in Scope::ALL {
            let token = ActionToken::scoped(verb, scope);
            assert_eq!(token.to_string().parse::<ActionToken>().unwrap(), token);
        }
    }
}

#[test]
fn test_no_verb_ends_with_a_suffix() {
    // A verb ending in a suffix would make `verb` and `verb_prefix + suffix` collide.
    for verb in Verb::ALL {
        for scope in Scope::ALL {
            assert!(
                !verb.as_str().ends_with(scope.suffix()),
                "verb '{}' ends with suffix '{}'",
                verb,
                scope.suffix()
            );
        }
    }
}

#[test]
fn test_each_token_matches_exactly_one_suffix() {
    for verb in Verb::ALL {
        for scope in Scope::ALL {
            let rendered = ActionToken::scoped(verb, scope).to_string();
            let matching: Vec<_> = Scope::ALL
                .into_iter()
                .filter(|s| {
                    rendered
                        .strip_suffix(s.suffix())
                        .is_some_and(|rest| rest.parse::<Verb>().is_ok())
                })
                .collect();
            assert_eq!(matching, vec![scope], "ambiguous token '{}'", rendered);
        }
    }
}

#[test]
fn test_unknown_suffix_is_rejected() {
    assert!("read_company".parse::<ActionToken>().is_err());
    assert!("read_".parse::<ActionToken>().is_err());
    assert!("read_own_all".parse::<ActionToken>().is_err());
}

// ============================================================================
// Resolution Tests
// ============================================================================

#[test]
fn test_owner_match_is_exact() {
    let resolver = ScopeResolver::new();
    let token = ActionToken::scoped(Verb::Update, Scope::Own);

    assert!(resolver.qualifies(token, &query_with("u1", Some("u1"), None)));
    assert!(!resolver.qualifies(token, &query_with("u1", Some("U1"), None)));
    assert!(!resolver.qualifies(token, &query_with("u1", Some("u10"), None)));
}

#[test]
fn test_owner_is_not_assignee() {
    let resolver = ScopeResolver::new();

    let as_assignee = query_with("u1", Some("u2"), Some("u1"));
    assert!(!resolver.scope_qualifies(Scope::Own, &as_assignee));
    assert!(resolver.scope_qualifies(Scope::Assigned, &as_assignee));

    let as_owner = query_with("u1", Some("u1"), Some("u2"));
    assert!(resolver.scope_qualifies(Scope::Own, &as_owner));
    assert!(!resolver.scope_qualifies(Scope::Assigned, &as_owner));
}

#[test]
fn test_missing_facts_fail_closed() {
    let resolver = ScopeResolver::new();
    let bare = query_with("u1", None, None);

    for scope in Scope::ALL.into_iter().filter(Scope::is_instance_bound) {
        assert!(!resolver.scope_qualifies(scope, &bare), "{:?} qualified without facts", scope);
    }
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[test]
fn test_concurrent_resolution() {
    let resolver = Arc::new(ScopeResolver::new());
    let mut handles = vec![];

    for i in 0..10 {
        let resolver = Arc::clone(&resolver);
        handles.push(thread::spawn(move || {
            let user = format!("u{}", i);
            let query = query_with(&user, Some(&user), None);
            resolver.scope_qualifies(Scope::Own, &query)
                && !resolver.scope_qualifies(Scope::Assigned, &query)
        }));
    }

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
