use crate::types::{Entity, ResolveError};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Nickname spellings that rankings and the stats feed disagree on
const FIRST_NAME_CORRECTIONS: &[(&str, &str)] = &[("DJ", "D.J."), ("DK", "D.K.")];

/// Per-player overrides: (first name or any, last name, canonical first name)
const PLAYER_OVERRIDES: &[(Option<&str>, &str, &str)] = &[
    // Mitchell Trubisky is "Mitch" everywhere rankings are published
    (None, "Trubisky", "Mitch"),
    (Some("OJ"), "Howard", "O.J."),
    (Some("O.J."), "Howard", "O.J."),
];

/// Name Resolver - Maps canonical player names to provider player IDs
///
/// The mapping is built incrementally while stat lines are observed and is
/// owned by the run that created it. The first ID registered for a name wins.
#[derive(Debug, Default)]
pub struct NameResolver {
    /// Map from canonical name to player ID
    ids_by_name: HashMap<String, String>,
}

impl NameResolver {
    /// Create a new empty resolver
    pub fn new() -> Self {
        Self { ids_by_name: HashMap::new() }
    }

    /// Canonicalize a raw name into "First Last"
    ///
    /// Accepts two tokens (first, last) or three tokens (first, last, suffix);
    /// the suffix is dropped. Any other token count is ambiguous.
    pub fn canonicalize(&self, raw_name: &str) -> Result<String, ResolveError> {
        let tokens: Vec<&str> = raw_name.split_whitespace().collect();
        let (first, last) = match tokens.as_slice() {
            [first, last] | [first, last, _] => (*first, *last),
            _ => {
                return Err(ResolveError::AmbiguousName {
                    raw: raw_name.to_string(),
                    tokens: tokens.len(),
                })
            }
        };

        let mut first = FIRST_NAME_CORRECTIONS
            .iter()
            .find(|(nickname, _)| *nickname == first)
            .map(|(_, canonical)| *canonical)
            .unwrap_or(first);

        let matching_override = PLAYER_OVERRIDES.iter().find(|(expected_first, expected_last, _)| {
            *expected_last == last && expected_first.map_or(true, |f| f == first)
        });
        if let Some((_, _, canonical)) = matching_override {
            first = *canonical;
        }

        Ok(format!("{first} {last}"))
    }

    /// Canonicalize, falling back to the raw name when it is ambiguous
    ///
    /// Ambiguity is a soft failure: it is logged and processing continues.
    pub fn canonicalize_or_verbatim(&self, raw_name: &str) -> String {
        match self.canonicalize(raw_name) {
            Ok(name) => name,
            Err(e) => {
                warn!("{}; using name verbatim", e);
                raw_name.to_string()
            }
        }
    }

    /// Canonical name for a provider entity
    ///
    /// Team defenses are named by team and used as-is.
    pub fn canonical_name_for(&self, entity: &Entity) -> String {
        if entity.group.is_team_defense() {
            entity.display_name.trim().to_string()
        } else {
            self.canonicalize_or_verbatim(&entity.display_name)
        }
    }

    /// Register a canonical name for a player ID. Returns false if the name was already taken.
    pub fn resolve(&mut self, canonical_name: &str, entity_id: &str) -> bool {
        if self.ids_by_name.contains_key(canonical_name) {
            return false;
        }
        debug!("Registered {} -> {}", canonical_name, entity_id);
        self.ids_by_name.insert(canonical_name.to_string(), entity_id.to_string());
        true
    }

    /// Get the player ID registered for a canonical name
    pub fn lookup(&self, canonical_name: &str) -> Result<&str, ResolveError> {
        self.ids_by_name
            .get(canonical_name)
            .map(String::as_str)
            .ok_or_else(|| ResolveError::NotFound(canonical_name.to_string()))
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.ids_by_name.len()
    }

    /// Check if resolver is empty
    pub fn is_empty(&self) -> bool {
        self.ids_by_name.is_empty()
    }
}
