//! Field accessor adapter
//!
//! Relations come from a declarative list of named accessors supplied by the
//! integrator. A [`FieldDirection::Related`] field lists entities the owner
//! points at; a [`FieldDirection::Relating`] field lists entities pointing at
//! the owner. The field name becomes the relation tag.

use std::fmt;
use std::hash::Hash;

use crate::color::Color;

use super::{GraphBackend, Relation, RelationColoring};

/// Which way relations read from a field run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDirection {
    /// `owner -> value`
    Related,
    /// `value -> owner`
    Relating,
}

type Accessor<T> = Box<dyn Fn(&T) -> Vec<T>>;

/// One named accessor
pub struct RelatedField<T> {
    pub name: String,
    pub direction: FieldDirection,
    accessor: Accessor<T>,
}

impl<T> RelatedField<T> {
    pub fn new(
        name: impl Into<String>,
        direction: FieldDirection,
        accessor: impl Fn(&T) -> Vec<T> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            accessor: Box::new(accessor),
        }
    }

    pub fn related(name: impl Into<String>, accessor: impl Fn(&T) -> Vec<T> + 'static) -> Self {
        Self::new(name, FieldDirection::Related, accessor)
    }

    pub fn relating(name: impl Into<String>, accessor: impl Fn(&T) -> Vec<T> + 'static) -> Self {
        Self::new(name, FieldDirection::Relating, accessor)
    }

    /// Current values of this field on `owner`
    pub fn values(&self, owner: &T) -> Vec<T> {
        (self.accessor)(owner)
    }
}

impl<T> fmt::Debug for RelatedField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelatedField")
            .field("name", &self.name)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct FieldBackend<T> {
    fields: Vec<RelatedField<T>>,
    coloring: RelationColoring,
}

impl<T> FieldBackend<T> {
    pub fn new(fields: Vec<RelatedField<T>>) -> Self {
        Self {
            fields,
            coloring: RelationColoring::default(),
        }
    }

    pub fn with_coloring(mut self, coloring: RelationColoring) -> Self {
        self.coloring = coloring;
        self
    }

    pub fn fields(&self) -> &[RelatedField<T>] {
        &self.fields
    }

    fn fields_in(&self, direction: FieldDirection) -> impl Iterator<Item = &RelatedField<T>> {
        self.fields.iter().filter(move |f| f.direction == direction)
    }
}

impl<T> GraphBackend<T, String> for FieldBackend<T>
where
    T: Clone + Eq + Hash + fmt::Display,
{
    fn init(&mut self, targets: Option<&[T]>) -> Vec<T> {
        tracing::debug!(
            related = self.fields_in(FieldDirection::Related).count(),
            relating = self.fields_in(FieldDirection::Relating).count(),
            "field backend initialized"
        );
        targets.map(<[T]>::to_vec).unwrap_or_default()
    }

    /// Outgoing relations from `Related` fields first, then incoming ones
    /// from `Relating` fields, each group in field order
    fn relations(&self, entity: &T) -> Vec<Relation<T, String>> {
        let related = self.fields_in(FieldDirection::Related);
        let outgoing = related.flat_map(move |field| {
            field
                .values(entity)
                .into_iter()
                .map(move |other| Relation::new(entity.clone(), other, field.name.clone()))
        });
        let relating = self.fields_in(FieldDirection::Relating);
        let incoming = relating.flat_map(move |field| {
            field
                .values(entity)
                .into_iter()
                .map(move |other| Relation::new(other, entity.clone(), field.name.clone()))
        });
        outgoing.chain(incoming).collect()
    }

    fn relation_color(&self, tag: &String) -> Color {
        self.coloring.color_for(tag)
    }
}
