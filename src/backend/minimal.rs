//! Minimal reference adapter
//!
//! Passes the inspection targets through as roots, relates entities through
//! an optional closure and tags every relation with `P::default()`.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::color::Color;

use super::{GraphBackend, Relation, RelationColoring};

type RelatedFn<T> = Box<dyn Fn(&T) -> Vec<T>>;
type SelectionSink<T> = Box<dyn FnMut(&[T])>;

pub struct MinimalBackend<T, P> {
    related: Option<RelatedFn<T>>,
    selection_sink: Option<SelectionSink<T>>,
    coloring: RelationColoring,
    _tag: PhantomData<fn() -> P>,
}

impl<T, P> Default for MinimalBackend<T, P> {
    fn default() -> Self {
        Self {
            related: None,
            selection_sink: None,
            coloring: RelationColoring::default(),
            _tag: PhantomData,
        }
    }
}

impl<T, P> MinimalBackend<T, P> {
    /// Backend without relations
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities related to a given entity. Each becomes the target of a
    /// relation sourced at that entity.
    pub fn with_related(mut self, related: impl Fn(&T) -> Vec<T> + 'static) -> Self {
        self.related = Some(Box::new(related));
        self
    }

    /// Receives the host's entity selection whenever it changes to a
    /// non-empty set
    pub fn with_selection_sink(mut self, sink: impl FnMut(&[T]) + 'static) -> Self {
        self.selection_sink = Some(Box::new(sink));
        self
    }

    pub fn with_coloring(mut self, coloring: RelationColoring) -> Self {
        self.coloring = coloring;
        self
    }

    /// Entities related to `entity`; empty without a related closure
    pub fn related_entities(&self, entity: &T) -> Vec<T> {
        match &self.related {
            Some(related) => related(entity),
            None => Vec::new(),
        }
    }
}

impl<T, P> fmt::Debug for MinimalBackend<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinimalBackend")
            .field("related", &self.related.is_some())
            .field("selection_sink", &self.selection_sink.is_some())
            .field("coloring", &self.coloring)
            .finish()
    }
}

impl<T, P> GraphBackend<T, P> for MinimalBackend<T, P>
where
    T: Clone + Eq + Hash + fmt::Display,
    P: Default + fmt::Display,
{
    fn init(&mut self, targets: Option<&[T]>) -> Vec<T> {
        let roots = targets.map(<[T]>::to_vec).unwrap_or_default();
        tracing::debug!(roots = roots.len(), "minimal backend initialized");
        roots
    }

    fn relations(&self, entity: &T) -> Vec<Relation<T, P>> {
        self.related_entities(entity)
            .into_iter()
            .map(|other| Relation::new(entity.clone(), other, P::default()))
            .collect()
    }

    fn relation_color(&self, tag: &P) -> Color {
        self.coloring.color_for(tag)
    }

    fn on_entity_selection_change(&mut self, selection: &[T]) {
        if selection.is_empty() {
            return;
        }
        if let Some(sink) = self.selection_sink.as_mut() {
            sink(selection);
        }
    }
}
