use crate::types::{Entity, PositionGroup};
use std::collections::HashMap;

/// Entity metadata keyed by provider player ID
#[derive(Debug, Clone, Default)]
pub struct EntityDirectory {
    entities: HashMap<String, Entity>,
}

impl EntityDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self { entities: HashMap::new() }
    }

    /// Insert or replace an entity
    pub fn insert(&mut self, entity: Entity) {
        self.entities.insert(entity.entity_id.clone(), entity);
    }

    /// Get an entity by provider ID
    pub fn get(&self, entity_id: &str) -> Option<&Entity> {
        self.entities.get(entity_id)
    }

    /// Position group of an entity, if known
    pub fn group_of(&self, entity_id: &str) -> Option<PositionGroup> {
        self.entities.get(entity_id).map(|e| e.group)
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if directory is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<Entity> for EntityDirectory {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut directory = Self::new();
        for entity in iter {
            directory.insert(entity);
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_lookup() {
        let directory: EntityDirectory = vec![
            Entity::new("4046", "Patrick Mahomes", PositionGroup::QB),
            Entity::new("CHI", "Bears", PositionGroup::DEF),
        ]
        .into_iter()
        .collect();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("4046").unwrap().display_name, "Patrick Mahomes");
        assert_eq!(directory.group_of("CHI"), Some(PositionGroup::DEF));
        assert_eq!(directory.group_of("0000"), None);
    }
}
