//! Graph backend contract
//!
//! A backend adapts one data model to the visualizer. It is parameterized by
//! an entity type `T` and a relation tag type `P` and answers the host's
//! questions: which entities are the roots, how entities relate, what to draw
//! for each of them. It also receives the host's events (selection changes,
//! context clicks, commands).
//!
//! Every method has a default. The defaults are side-effect free: queries
//! return empty results, mutation hooks and event handlers do nothing, so an
//! integration only overrides what its data model supports.
//!
//! Backends run inside the host's render loop. Query methods take `&self`
//! and must answer in bounded time; data that has to come from disk or the
//! network must be cached by the backend.
//!
//! # Reference adapters
//!
//! - [`MinimalBackend`]: pass-through roots, relations from a closure
//! - [`FieldBackend`]: relations from a declarative list of field accessors
//! - [`StoreBackend`]: entities living in an [`EntityStore`], with context
//!   menu actions to remove entities and relations

pub mod fields;
pub mod minimal;
pub mod store;
pub mod util;

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::Vec2;
use crate::hash_color::Palette;
use crate::measure::Measure;
use crate::render::{DrawList, compute_draw_layers};
use crate::style::{Content, DrawContext};

pub use fields::{FieldBackend, FieldDirection, RelatedField};
pub use minimal::MinimalBackend;
pub use store::{EntityStore, MemoryStore, StoreBackend};

/// A directed, tagged edge between two entities.
///
/// `(a, b, tag)` and `(b, a, tag)` are different relations, and several
/// relations with different tags may connect the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation<T, P> {
    pub source: T,
    pub target: T,
    pub tag: P,
}

impl<T, P> Relation<T, P> {
    pub fn new(source: T, target: T, tag: P) -> Self {
        Self {
            source,
            target,
            tag,
        }
    }

    /// Whether `entity` is the source or the target of this relation
    pub fn involves(&self, entity: &T) -> bool
    where
        T: PartialEq,
    {
        self.source == *entity || self.target == *entity
    }
}

/// How relation tags map to colors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RelationColoring {
    /// Every relation gets the same color
    Uniform { color: Color },
    /// Palette color hashed from the tag's display string
    Hashed { palette: Palette },
}

impl RelationColoring {
    pub fn color_for(&self, tag: &impl fmt::Display) -> Color {
        match self {
            RelationColoring::Uniform { color } => *color,
            RelationColoring::Hashed { palette } => palette.color_for_key(&tag.to_string()),
        }
    }
}

impl Default for RelationColoring {
    fn default() -> Self {
        RelationColoring::Uniform {
            color: Color::WHITE,
        }
    }
}

/// Action attached to a context menu item. The host hands the chosen action
/// back through [`GraphBackend::on_menu_action`].
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction<T, P> {
    RemoveEntities(Vec<T>),
    /// Start interactive relation creation from these entities
    AddRelation(Vec<T>),
    RemoveRelation(Relation<T, P>),
    /// Forwarded to [`GraphBackend::on_command`]
    Command(String),
}

impl<T, P> MenuAction<T, P> {
    /// Short name of the action, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            MenuAction::RemoveEntities(_) => "remove_entities",
            MenuAction::AddRelation(_) => "add_relation",
            MenuAction::RemoveRelation(_) => "remove_relation",
            MenuAction::Command(_) => "command",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<T, P> {
    pub label: String,
    pub action: MenuAction<T, P>,
}

/// Context menu being assembled for a click on entities or a relation
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu<T, P> {
    items: Vec<MenuItem<T, P>>,
}

impl<T, P> Default for ContextMenu<T, P> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T, P> ContextMenu<T, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, label: impl Into<String>, action: MenuAction<T, P>) {
        self.items.push(MenuItem {
            label: label.into(),
            action,
        });
    }

    pub fn items(&self) -> &[MenuItem<T, P>] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the action of the item labeled `label`, if there is one
    pub fn take(self, label: &str) -> Option<MenuAction<T, P>> {
        self.items
            .into_iter()
            .find(|item| item.label == label)
            .map(|item| item.action)
    }
}

/// The part of the host's graph state a backend may drive.
///
/// The host owns the visible entities and relations; backends request
/// changes through this interface instead of holding graph state themselves.
pub trait GraphHost<T, P> {
    /// Relations currently shown that involve `entity`
    fn find_relations(&self, entity: &T) -> Vec<Relation<T, P>>;

    fn add_entity(&mut self, entity: T, position: Vec2);

    fn remove_entity(&mut self, entity: &T);

    fn add_relation(&mut self, relation: Relation<T, P>);

    fn remove_relation(&mut self, relation: &Relation<T, P>);

    /// Let the user pick the targets of new relations from `sources`
    fn init_relation(&mut self, sources: &[T]);

    /// Replace the selection with the entities matching `predicate`
    fn select_entities(&mut self, predicate: &dyn Fn(&T) -> bool);
}

/// The backend contract. See the module docs.
pub trait GraphBackend<T, P>
where
    T: Clone + Eq + Hash + fmt::Display,
    P: fmt::Display,
{
    /// Turn the inspection targets into the graph's root entities.
    ///
    /// Absent or empty targets give no roots.
    fn init(&mut self, targets: Option<&[T]>) -> Vec<T> {
        targets.map(<[T]>::to_vec).unwrap_or_default()
    }

    /// Called when the host discards this backend
    fn on_destroy(&mut self) {}

    /// Relations of `entity`. Must not change backend state; an empty result
    /// means no relations were discovered.
    fn relations(&self, _entity: &T) -> Vec<Relation<T, P>> {
        Vec::new()
    }

    /// Label, icon and tooltip for `entity`
    fn content(&self, entity: &T) -> Content {
        Content::for_display(entity)
    }

    /// Draw `entity`. Override to replace the standard widget.
    fn draw_content(&self, entity: &T, ctx: &DrawContext<'_>, measure: &dyn Measure) -> DrawList {
        compute_draw_layers(&self.content(entity), ctx, measure)
    }

    fn entity_tooltip(&self, entity: &T) -> String {
        self.content(entity).tooltip
    }

    /// Tooltip for a relation tag; an absent tag reads `"null"`
    fn tag_tooltip(&self, tag: Option<&P>) -> String {
        tag.map_or_else(|| "null".to_string(), ToString::to_string)
    }

    /// Color of relations carrying `tag`
    fn relation_color(&self, _tag: &P) -> Color {
        Color::WHITE
    }

    /// The user asked for a new entity at `position`
    fn create_entity(&mut self, _position: Vec2, _host: &mut dyn GraphHost<T, P>) {}

    /// The user asked for a relation from `source` to `target`
    fn create_relation(&mut self, _source: &T, _target: &T, _tag: P) {}

    fn delete_entity(&mut self, _entity: &T, _host: &mut dyn GraphHost<T, P>) {}

    fn delete_relation(&mut self, _relation: &Relation<T, P>) {}

    /// The host's entity selection changed
    fn on_entity_selection_change(&mut self, _selection: &[T]) {}

    /// The surrounding application's own selection changed
    fn on_host_selection_change(&mut self) {}

    fn on_entity_context_click(&mut self, _entities: &[T], _menu: &mut ContextMenu<T, P>) {}

    fn on_relation_context_click(
        &mut self,
        _relation: &Relation<T, P>,
        _menu: &mut ContextMenu<T, P>,
    ) {
    }

    /// Generic command from the host
    fn on_command(&mut self, command: &str) {
        tracing::debug!(command, "unhandled command");
    }

    /// The user chose a context menu item this backend added
    fn on_menu_action(&mut self, action: MenuAction<T, P>, _host: &mut dyn GraphHost<T, P>) {
        tracing::debug!(action = action.name(), "menu action");
        if let MenuAction::Command(command) = action {
            self.on_command(&command);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::measure::FixedWidthMeasure;
    use crate::render::DrawPrimitive;
    use crate::style::StyleBundle;

    /// Backend relying on every default
    struct Defaults;

    impl GraphBackend<String, String> for Defaults {}

    /// Host that shows nothing and ignores every request
    #[derive(Default)]
    pub(super) struct NullHost;

    impl<T, P> GraphHost<T, P> for NullHost {
        fn find_relations(&self, _entity: &T) -> Vec<Relation<T, P>> {
            Vec::new()
        }
        fn add_entity(&mut self, _entity: T, _position: Vec2) {}
        fn remove_entity(&mut self, _entity: &T) {}
        fn add_relation(&mut self, _relation: Relation<T, P>) {}
        fn remove_relation(&mut self, _relation: &Relation<T, P>) {}
        fn init_relation(&mut self, _sources: &[T]) {}
        fn select_entities(&mut self, _predicate: &dyn Fn(&T) -> bool) {}
    }

    /// Log sink shared between a test and its subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a debug-level subscriber and return what it logged
    pub(super) fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn init_passes_targets_through() {
        let mut backend = Defaults;
        let targets = vec!["a".to_string(), "b".to_string()];
        assert_eq!(backend.init(Some(&targets)), targets);
    }

    #[test]
    fn init_without_targets_is_empty() {
        let mut backend = Defaults;
        assert!(backend.init(None).is_empty());
        assert!(backend.init(Some(&[])).is_empty());
    }

    #[test]
    fn queries_default_to_empty_and_white() {
        let backend = Defaults;
        let entity = "a".to_string();
        assert!(backend.relations(&entity).is_empty());
        assert_eq!(backend.relation_color(&"tag".to_string()), Color::WHITE);
        assert_eq!(backend.entity_tooltip(&entity), "a");
    }

    #[test]
    fn absent_tag_reads_null() {
        let backend = Defaults;
        assert_eq!(backend.tag_tooltip(None), "null");
        assert_eq!(backend.tag_tooltip(Some(&"owns".to_string())), "owns");
    }

    #[test]
    fn default_hooks_leave_menu_empty() {
        let mut backend = Defaults;
        let mut menu = ContextMenu::new();
        backend.on_entity_context_click(&["a".to_string()], &mut menu);
        let relation = Relation::new("a".to_string(), "b".to_string(), String::new());
        backend.on_relation_context_click(&relation, &mut menu);
        assert!(menu.is_empty());

        let mut host = NullHost;
        backend.create_entity(Vec2::ZERO, &mut host);
        backend.delete_entity(&"a".to_string(), &mut host);
        backend.on_menu_action(MenuAction::Command("noop".into()), &mut host);
    }

    #[test]
    fn draw_content_uses_content_label() {
        let backend = Defaults;
        let style = StyleBundle::light();
        let ctx = DrawContext::new(Vec2::ZERO, &style);
        let list = backend.draw_content(&"node".to_string(), &ctx, &FixedWidthMeasure::default());
        let labels: Vec<&str> = list
            .iter()
            .filter_map(|p| match p {
                DrawPrimitive::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["node"]);
    }

    #[test]
    fn relations_are_directed() {
        let forward = Relation::new(1, 2, "x");
        let backward = Relation::new(2, 1, "x");
        assert_ne!(forward, backward);
        assert!(forward.involves(&1) && forward.involves(&2));
        assert!(!forward.involves(&3));
    }

    #[test]
    fn hashed_coloring_is_stable() {
        let coloring = RelationColoring::Hashed {
            palette: Palette::Light,
        };
        assert_eq!(
            coloring.color_for(&"likes"),
            Palette::Light.color_for_key("likes")
        );
        let uniform = RelationColoring::default();
        assert_eq!(uniform.color_for(&"likes"), Color::WHITE);
    }

    #[test]
    fn menu_take_finds_item_by_label() {
        let mut menu: ContextMenu<String, String> = ContextMenu::new();
        menu.add_item("Say hi", MenuAction::Command("hi".into()));
        assert_eq!(menu.items().len(), 1);
        assert_eq!(
            menu.clone().take("Say hi"),
            Some(MenuAction::Command("hi".into()))
        );
        assert_eq!(menu.take("missing"), None);
    }

    #[test]
    fn menu_actions_have_log_names() {
        let relation = Relation::new("a".to_string(), "b".to_string(), String::new());
        let actions: [MenuAction<String, String>; 4] = [
            MenuAction::RemoveEntities(vec![]),
            MenuAction::AddRelation(vec![]),
            MenuAction::RemoveRelation(relation),
            MenuAction::Command("x".into()),
        ];
        let names: Vec<&str> = actions.iter().map(MenuAction::name).collect();
        assert_eq!(
            names.join(" "),
            "remove_entities add_relation remove_relation command"
        );
    }

    #[test]
    fn menu_dispatch_is_logged() {
        let logs = capture_logs(|| {
            let mut backend = Defaults;
            let action = MenuAction::Command("refresh".into());
            backend.on_menu_action(action, &mut NullHost);
        });
        assert!(logs.contains("menu action"), "{logs}");
        assert!(logs.contains("action=\"command\""), "{logs}");
        assert!(logs.contains("command=\"refresh\""), "{logs}");
    }
}
