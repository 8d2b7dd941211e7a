//! Persisted-entity adapter
//!
//! Entities live in an [`EntityStore`] that owns their names and relations.
//! The backend offers context menu actions to remove entities, start new
//! relations and remove relations, and keeps the store and the host's view
//! of the graph in step when it mutates either.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use crate::color::Color;
use crate::geometry::Vec2;
use crate::style::Content;

use super::util::select_matching;
use super::{ContextMenu, GraphBackend, GraphHost, MenuAction, Relation, RelationColoring};

pub const REMOVE_ENTITY: &str = "Remove entity";
pub const ADD_RELATION: &str = "Add relation";
pub const REMOVE_RELATION: &str = "Remove relation";

/// Name given to entities created from the graph view
pub const DEFAULT_ENTITY_NAME: &str = "entity";

/// Storage behind a [`StoreBackend`]
pub trait EntityStore {
    type Entity: Clone + Eq + Hash + fmt::Display;
    type Tag: Clone + PartialEq + fmt::Display;

    /// Display name of a stored entity
    fn name(&self, entity: &Self::Entity) -> String;

    /// Create an entity. The stored name is `name`, made unique if another
    /// entity already uses it.
    fn create(&mut self, name: &str) -> Self::Entity;

    fn delete(&mut self, entity: &Self::Entity);

    /// Stored relations sourced at `entity`
    fn relations(&self, entity: &Self::Entity) -> Vec<Relation<Self::Entity, Self::Tag>>;

    fn add_relation(&mut self, relation: Relation<Self::Entity, Self::Tag>);

    fn remove_relation(&mut self, relation: &Relation<Self::Entity, Self::Tag>);
}

/// Handle of an entity in a [`MemoryStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// In-memory [`EntityStore`]
#[derive(Debug, Clone)]
pub struct MemoryStore<P> {
    next_id: u32,
    names: BTreeMap<EntityId, String>,
    relations: Vec<Relation<EntityId, P>>,
}

impl<P> Default for MemoryStore<P> {
    fn default() -> Self {
        Self {
            next_id: 0,
            names: BTreeMap::new(),
            relations: Vec::new(),
        }
    }
}

impl<P> MemoryStore<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.names.contains_key(&entity)
    }

    /// Every stored relation, in insertion order
    pub fn all_relations(&self) -> &[Relation<EntityId, P>] {
        &self.relations
    }

    fn name_taken(&self, name: &str) -> bool {
        self.names.values().any(|n| n == name)
    }

    /// `name` if it is free, otherwise the first free `name N` for N = 1, 2, ...
    pub fn unique_name(&self, name: &str) -> String {
        if !self.name_taken(name) {
            return name.to_string();
        }
        (1..)
            .map(|n| format!("{name} {n}"))
            .find(|candidate| !self.name_taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

impl<P> EntityStore for MemoryStore<P>
where
    P: Clone + PartialEq + fmt::Display,
{
    type Entity = EntityId;
    type Tag = P;

    fn name(&self, entity: &EntityId) -> String {
        self.names.get(entity).cloned().unwrap_or_default()
    }

    fn create(&mut self, name: &str) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let name = self.unique_name(name);
        self.names.insert(id, name);
        id
    }

    fn delete(&mut self, entity: &EntityId) {
        self.names.remove(entity);
        self.relations.retain(|r| !r.involves(entity));
    }

    fn relations(&self, entity: &EntityId) -> Vec<Relation<EntityId, P>> {
        self.relations
            .iter()
            .filter(|r| r.source == *entity)
            .cloned()
            .collect()
    }

    fn add_relation(&mut self, relation: Relation<EntityId, P>) {
        if !self.relations.contains(&relation) {
            self.relations.push(relation);
        }
    }

    fn remove_relation(&mut self, relation: &Relation<EntityId, P>) {
        self.relations.retain(|r| r != relation);
    }
}

/// Backend over an [`EntityStore`]
#[derive(Debug)]
pub struct StoreBackend<S> {
    store: S,
    coloring: RelationColoring,
}

impl<S: EntityStore> StoreBackend<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            coloring: RelationColoring::default(),
        }
    }

    pub fn with_coloring(mut self, coloring: RelationColoring) -> Self {
        self.coloring = coloring;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Select the entities whose name contains `search`, ignoring case.
    /// An empty search clears the selection.
    pub fn select_by_name(&self, search: &str, host: &mut dyn GraphHost<S::Entity, S::Tag>) {
        select_matching(host, search, |entity| Some(self.store.name(entity)));
    }
}

impl<S: EntityStore> GraphBackend<S::Entity, S::Tag> for StoreBackend<S> {
    fn relations(&self, entity: &S::Entity) -> Vec<Relation<S::Entity, S::Tag>> {
        self.store.relations(entity)
    }

    fn content(&self, entity: &S::Entity) -> Content {
        Content::text(self.store.name(entity))
    }

    /// An absent tag reads as the empty string
    fn tag_tooltip(&self, tag: Option<&S::Tag>) -> String {
        tag.map(ToString::to_string).unwrap_or_default()
    }

    fn relation_color(&self, tag: &S::Tag) -> Color {
        self.coloring.color_for(tag)
    }

    fn create_entity(&mut self, position: Vec2, host: &mut dyn GraphHost<S::Entity, S::Tag>) {
        let entity = self.store.create(DEFAULT_ENTITY_NAME);
        tracing::debug!(%entity, name = %self.store.name(&entity), "created entity");
        host.add_entity(entity, position);
    }

    fn create_relation(&mut self, source: &S::Entity, target: &S::Entity, tag: S::Tag) {
        tracing::debug!(%source, %target, %tag, "created relation");
        self.store
            .add_relation(Relation::new(source.clone(), target.clone(), tag));
    }

    /// Removes every relation the host shows for `entity` (from the store and
    /// from the host), then the entity itself
    fn delete_entity(&mut self, entity: &S::Entity, host: &mut dyn GraphHost<S::Entity, S::Tag>) {
        for relation in host.find_relations(entity) {
            self.delete_relation(&relation);
            host.remove_relation(&relation);
        }
        self.store.delete(entity);
        host.remove_entity(entity);
        tracing::debug!(%entity, "deleted entity");
    }

    fn delete_relation(&mut self, relation: &Relation<S::Entity, S::Tag>) {
        tracing::debug!(
            source = %relation.source,
            target = %relation.target,
            "deleted relation"
        );
        self.store.remove_relation(relation);
    }

    fn on_entity_context_click(
        &mut self,
        entities: &[S::Entity],
        menu: &mut ContextMenu<S::Entity, S::Tag>,
    ) {
        menu.add_item(REMOVE_ENTITY, MenuAction::RemoveEntities(entities.to_vec()));
        menu.add_item(ADD_RELATION, MenuAction::AddRelation(entities.to_vec()));
    }

    fn on_relation_context_click(
        &mut self,
        relation: &Relation<S::Entity, S::Tag>,
        menu: &mut ContextMenu<S::Entity, S::Tag>,
    ) {
        menu.add_item(
            REMOVE_RELATION,
            MenuAction::RemoveRelation(relation.clone()),
        );
    }

    fn on_menu_action(
        &mut self,
        action: MenuAction<S::Entity, S::Tag>,
        host: &mut dyn GraphHost<S::Entity, S::Tag>,
    ) {
        tracing::debug!(action = action.name(), "menu action");
        match action {
            MenuAction::RemoveEntities(entities) => {
                for entity in &entities {
                    self.delete_entity(entity, host);
                }
            }
            MenuAction::AddRelation(sources) => host.init_relation(&sources),
            MenuAction::RemoveRelation(relation) => {
                self.delete_relation(&relation);
                host.remove_relation(&relation);
            }
            MenuAction::Command(command) => self.on_command(&command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::{NullHost, capture_logs};

    fn store() -> MemoryStore<String> {
        MemoryStore::new()
    }

    #[test]
    fn names_are_made_unique() {
        let mut store = store();
        let a = store.create("node");
        let b = store.create("node");
        let c = store.create("node");
        assert_eq!(store.name(&a), "node");
        assert_eq!(store.name(&b), "node 1");
        assert_eq!(store.name(&c), "node 2");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn freed_names_are_reused() {
        let mut store = store();
        let a = store.create("node");
        store.create("node");
        store.delete(&a);
        let c = store.create("node");
        assert_eq!(store.name(&c), "node");
    }

    #[test]
    fn delete_drops_relations_of_entity() {
        let mut store = store();
        let a = store.create("a");
        let b = store.create("b");
        store.add_relation(Relation::new(a, b, "x".into()));
        store.add_relation(Relation::new(b, a, "y".into()));
        store.delete(&a);
        assert!(!store.contains(a));
        assert!(store.all_relations().is_empty());
    }

    #[test]
    fn duplicate_relations_are_stored_once() {
        let mut store = store();
        let a = store.create("a");
        let b = store.create("b");
        store.add_relation(Relation::new(a, b, "x".into()));
        store.add_relation(Relation::new(a, b, "x".into()));
        store.add_relation(Relation::new(a, b, "z".into()));
        assert_eq!(store.relations(&a).len(), 2);
        assert!(store.relations(&b).is_empty());
    }

    #[test]
    fn content_is_stored_name() {
        let mut backend = StoreBackend::new(store());
        let a = backend.store_mut().create("Player");
        assert_eq!(backend.content(&a).label, "Player");
        assert_eq!(backend.entity_tooltip(&a), "Player");
    }

    #[test]
    fn absent_tag_reads_empty() {
        let backend = StoreBackend::new(store());
        assert_eq!(backend.tag_tooltip(None), "");
        assert_eq!(backend.tag_tooltip(Some(&"owns".to_string())), "owns");
    }

    #[test]
    fn menus_offer_store_actions() {
        let mut backend = StoreBackend::new(store());
        let a = backend.store_mut().create("a");
        let b = backend.store_mut().create("b");

        let mut menu = ContextMenu::new();
        backend.on_entity_context_click(&[a], &mut menu);
        let labels: Vec<&str> = menu.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, [REMOVE_ENTITY, ADD_RELATION]);

        let relation = Relation::new(a, b, "x".to_string());
        let mut menu = ContextMenu::new();
        backend.on_relation_context_click(&relation, &mut menu);
        assert_eq!(
            menu.take(REMOVE_RELATION),
            Some(MenuAction::RemoveRelation(relation))
        );
    }

    #[test]
    fn menu_actions_are_logged() {
        let mut backend = StoreBackend::new(store());
        let a = backend.store_mut().create("a");
        let logs = capture_logs(|| {
            let action = MenuAction::RemoveEntities(vec![a]);
            backend.on_menu_action(action, &mut NullHost);
        });
        assert!(logs.contains("action=\"remove_entities\""), "{logs}");
        assert!(logs.contains("deleted entity"), "{logs}");
        assert!(!backend.store().contains(a));
    }

    #[test]
    fn entity_ids_display_with_hash() {
        assert_eq!(EntityId(3).to_string(), "#3");
    }
}
