use std::collections::BTreeSet;

/// Roles that belong to the school's administrative group. Cards gated on
/// the group are visible to any holder of one of these roles.
pub const ADMIN_ROLES: &[&str] = &["director", "secretario", "ematp inf"];

/// Department-head role strings vary by institution ("jefe dpto", "jfe.
/// area", ...), so the card matches on either fragment.
pub const JEFE_FRAGMENTS: &[&str] = &["jfe", "jefe"];

/// Access rule attached to a dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    Exact(&'static str),
    AdminGroup,
    SubstringAny(&'static [&'static str]),
}

/// A user's normalized role tokens for one institutional context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleSet {
    tokens: BTreeSet<String>,
}

impl RoleSet {
    /// Parses a raw comma-delimited role string. Tokens are trimmed and
    /// lowercased; empty fragments are dropped, so `""` and `",,"` both
    /// yield the empty set.
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        RoleSet { tokens }
    }

    /// Comma-joined normalized form. `parse` of this string round-trips.
    pub fn to_raw(&self) -> String {
        self.tokens.iter().cloned().collect::<Vec<_>>().join(",")
    }

    pub fn matches(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn matches_substring(&self, fragment: &str) -> bool {
        self.tokens.iter().any(|t| t.contains(fragment))
    }

    pub fn matches_admin_group(&self, admin: &[&str]) -> bool {
        admin.iter().any(|a| self.tokens.contains(*a))
    }

    /// Single evaluation point for every card access rule.
    pub fn grants(&self, rule: &RequiredRole) -> bool {
        match rule {
            RequiredRole::Exact(token) => self.matches(token),
            RequiredRole::AdminGroup => self.matches_admin_group(ADMIN_ROLES),
            RequiredRole::SubstringAny(fragments) => {
                fragments.iter().any(|f| self.matches_substring(f))
            }
        }
    }
}
