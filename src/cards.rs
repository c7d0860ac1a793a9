use crate::roles::{RequiredRole, RoleSet, JEFE_FRAGMENTS};

/// A dashboard module: identity plus the rule that grants access to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDefinition {
    pub key: &'static str,
    pub rule: RequiredRole,
}

// Registry only: which cards exist and who may see them. Presentation
// order lives in DEFAULT_ORDER below and the two must not be merged.
const CATALOG: &[CardDefinition] = &[
    CardDefinition {
        key: "alumnos",
        rule: RequiredRole::AdminGroup,
    },
    CardDefinition {
        key: "personal",
        rule: RequiredRole::AdminGroup,
    },
    CardDefinition {
        key: "comunicados",
        rule: RequiredRole::AdminGroup,
    },
    CardDefinition {
        key: "materias",
        rule: RequiredRole::Exact("docente"),
    },
    CardDefinition {
        key: "calificaciones",
        rule: RequiredRole::Exact("docente"),
    },
    CardDefinition {
        key: "asistencia",
        rule: RequiredRole::Exact("preceptor"),
    },
    CardDefinition {
        key: "laboratorio",
        rule: RequiredRole::Exact("ematp inf"),
    },
    CardDefinition {
        key: "jefatura",
        rule: RequiredRole::SubstringAny(JEFE_FRAGMENTS),
    },
];

// Dashboard order shown until the user saves a preference.
const DEFAULT_ORDER: &[&str] = &[
    "materias",
    "calificaciones",
    "asistencia",
    "jefatura",
    "alumnos",
    "personal",
    "laboratorio",
    "comunicados",
];

pub fn card(key: &str) -> Option<CardDefinition> {
    CATALOG.iter().copied().find(|c| c.key == key)
}

/// Every card, in default presentation order.
pub fn catalog_cards() -> Vec<CardDefinition> {
    DEFAULT_ORDER.iter().filter_map(|key| card(key)).collect()
}

/// Cards the given roles may see, preserving catalog order. An empty
/// result is an empty dashboard, not an error.
pub fn eligible_cards(roles: &RoleSet) -> Vec<CardDefinition> {
    catalog_cards()
        .into_iter()
        .filter(|c| roles.grants(&c.rule))
        .collect()
}
