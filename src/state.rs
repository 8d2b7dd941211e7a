//! Per-entity visual state
//!
//! Three independent axes, owned by the caller:
//!
//! - exploration: `Unexplored -> Explored`, once the entity's relations were fetched
//! - selection: `Unselected <-> Selected`, toggled by the caller
//! - target: fixed at creation, true only for roots returned by `init`
//!
//! [`EntityState::draw_context`] maps them onto [`DrawContext`] flags.

use crate::geometry::Vec2;
use crate::style::{DrawContext, StyleBundle, WidgetType};

/// Visual state of one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityState {
    explored: bool,
    selected: bool,
    target: bool,
}

impl EntityState {
    /// State of a root entity returned by the backend's `init`
    pub fn root() -> Self {
        Self {
            target: true,
            ..Self::default()
        }
    }

    /// State of an entity discovered through a relation
    pub fn discovered() -> Self {
        Self::default()
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_target(&self) -> bool {
        self.target
    }

    /// Record that the entity's relations were fetched. There is no way back.
    pub fn mark_explored(&mut self) {
        self.explored = true;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn toggle_selected(&mut self) {
        self.selected = !self.selected;
    }

    /// Draw context carrying this state's flags
    pub fn draw_context<'a>(
        &self,
        position: Vec2,
        widget_type: WidgetType,
        style: &'a StyleBundle,
    ) -> DrawContext<'a> {
        DrawContext::new(position, style)
            .widget_type(widget_type)
            .selected(self.selected)
            .unexplored(!self.explored)
            .target(self.target)
    }
}
