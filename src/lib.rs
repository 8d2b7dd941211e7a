//! relgraph - Backend contract and widget layout engine for entity/relation graph visualizers.
//!
//! A backend ([`backend::GraphBackend`]) adapts any data model to the visualizer.
//! The renderer turns each entity's content and state into layered draw
//! primitives ([`render::compute_draw_layers`]), and [`hash_color`] gives
//! strings stable colors without any stored palette state.

pub mod backend;
pub mod color;
pub mod config;
pub mod geometry;
pub mod hash_color;
pub mod legend;
pub mod measure;
pub mod preview;
pub mod render;
pub mod state;
pub mod style;
