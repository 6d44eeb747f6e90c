use std::collections::HashMap;

use supplytrack_core::Entity;

/// Insertion-ordered keyed table for one entity kind.
///
/// Rows are never removed, so an index into `rows` stays valid for the life
/// of the table.
#[derive(Debug)]
pub struct Table<E: Entity> {
    rows: Vec<E>,
    index: HashMap<E::Id, usize>,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E: Entity> Table<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    /// Insert a new row, or replace an existing one in place (keeping its
    /// original position in iteration order).
    pub fn upsert(&mut self, entity: E) -> &E {
        let existing = self.index.get(entity.id()).copied();
        let slot = match existing {
            Some(i) => {
                self.rows[i] = entity;
                i
            }
            None => {
                let i = self.rows.len();
                self.index.insert(entity.id().clone(), i);
                self.rows.push(entity);
                i
            }
        };
        &self.rows[slot]
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.rows.iter()
    }
}
