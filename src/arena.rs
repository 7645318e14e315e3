//! One store for every non-player sprite.
//!
//! Role collections are views over the same `Vec`, so an entity can never be
//! in a role view without also being in the "all sprites" view, and removing
//! it once removes it everywhere.

use crate::entities::{Entity, EntityId, Role};
use crate::geometry::Rect;

#[derive(Clone, Debug, Default)]
pub struct Arena {
    entities: Vec<Entity>,
    next_id: u64,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sprite and return its id.  Insertion order is update and draw order.
    pub fn spawn(&mut self, role: Role, rect: Rect, vy: i32, now_ms: u64) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            role,
            rect,
            vy,
            last_shot_ms: now_ms,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The "all sprites" view.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// A role view.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.role == role)
    }

    pub fn count(&self, role: Role) -> usize {
        self.with_role(role).count()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Remove every entity of `role` whose box overlaps `rect`; returns how many went.
    pub fn remove_overlapping(&mut self, role: Role, rect: &Rect) -> usize {
        let before = self.entities.len();
        self.entities
            .retain(|e| !(e.role == role && e.rect.overlaps(rect)));
        before - self.entities.len()
    }

    pub fn retain(&mut self, keep: impl FnMut(&Entity) -> bool) {
        self.entities.retain(keep);
    }
}
