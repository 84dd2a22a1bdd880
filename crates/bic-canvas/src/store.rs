//! Canvas state store: the ordered collection of widget descriptors.
//!
//! The store exclusively owns every `Widget`. Spawning is split into
//! `stage` (allocate id + defaults, mark pending) and `commit` (append
//! once the fetch resolved), so a `remove` issued while the fetch is in
//! flight wins: the commit finds the id no longer pending and drops the
//! result instead of resurrecting the widget. The same liveness rule
//! applies to `update` — results targeting a removed id are discarded.

use bic_core::registry::RegistryEntry;
use bic_core::{Point, Size, TypeKey, Widget, WidgetId, WidgetProps};
use bic_core::{CanvasBounds, RendererKind};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A position/size mutation produced by the interaction controller.
/// Mutates exactly one widget; never touches props.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasMutation {
    Move { id: WidgetId, position: Point },
    Resize { id: WidgetId, size: Size },
}

/// A spawn that has been allocated but whose fetch has not resolved yet.
#[derive(Debug, Clone)]
pub struct Staged {
    pub id: WidgetId,
    pub type_key: TypeKey,
    pub position: Point,
    pub size: Size,
    pub renderer: RendererKind,
}

pub struct CanvasStore {
    bounds: CanvasBounds,
    widgets: Vec<Widget>,
    pending: HashSet<WidgetId>,
    last_error: Option<String>,
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new(CanvasBounds::default())
    }
}

impl CanvasStore {
    pub fn new(bounds: CanvasBounds) -> Self {
        Self {
            bounds,
            widgets: Vec::new(),
            pending: HashSet::new(),
            last_error: None,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// All widgets, in spawn order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn get(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| &w.id == id)
    }

    /// True while any spawn fetch is still in flight (loading indicator).
    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Ids staged but not yet committed.
    pub fn pending_ids(&self) -> Vec<WidgetId> {
        self.pending.iter().cloned().collect()
    }

    /// The most recent user-visible spawn error, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ─── Widget lifecycle ────────────────────────────────────────────────

    /// Allocate a spawn: fresh id, default size from the registry entry,
    /// and (absent an explicit position) a random point that keeps the
    /// default box inside the visible canvas.
    pub fn stage(
        &mut self,
        type_key: TypeKey,
        entry: &RegistryEntry,
        position: Option<Point>,
    ) -> Staged {
        let size = entry.default_size;
        let position = position.unwrap_or_else(|| self.bounds.random_position(size));
        let staged = Staged {
            id: WidgetId::generate(),
            type_key,
            position,
            size,
            renderer: entry.renderer,
        };
        self.pending.insert(staged.id.clone());
        staged
    }

    /// Append the widget for a resolved fetch. Returns `false` (and drops
    /// the props) when the spawn was removed while the fetch was pending.
    pub fn commit(&mut self, staged: Staged, props: WidgetProps) -> bool {
        if !self.pending.remove(&staged.id) {
            log::debug!(
                "dropping fetch result for {}: removed while pending",
                staged.id
            );
            return false;
        }
        debug_assert!(self.get(&staged.id).is_none(), "duplicate widget id");
        self.widgets.push(Widget {
            id: staged.id,
            type_key: staged.type_key,
            position: staged.position,
            size: staged.size,
            props,
            renderer: staged.renderer,
        });
        true
    }

    /// Abandon a staged spawn after a fetch failure and surface the error.
    pub fn abort(&mut self, staged: &Staged, error: &dyn std::fmt::Display) {
        self.pending.remove(&staged.id);
        self.last_error = Some(error.to_string());
    }

    /// Shallow-merge `patch` into the widget's props, iff it still exists.
    /// Updates targeting a removed id are silently dropped.
    pub fn update(&mut self, id: &WidgetId, patch: &Map<String, Value>) {
        let Some(widget) = self.widgets.iter_mut().find(|w| &w.id == id) else {
            log::debug!("dropping update for {id}: widget no longer exists");
            return;
        };
        match widget.props.merged(patch) {
            Ok(props) => widget.props = props,
            Err(err) => log::warn!("update for {id} rejected: {err}"),
        }
    }

    /// Delete the descriptor unconditionally. Any in-flight fetch for the
    /// id keeps running; its commit will be dropped.
    pub fn remove(&mut self, id: &WidgetId) {
        self.pending.remove(id);
        self.widgets.retain(|w| &w.id != id);
    }

    /// Apply an interaction mutation. Unknown ids are no-ops.
    pub fn apply(&mut self, mutation: CanvasMutation) {
        match mutation {
            CanvasMutation::Move { id, position } => {
                if let Some(w) = self.widgets.iter_mut().find(|w| w.id == id) {
                    w.position = position;
                }
            }
            CanvasMutation::Resize { id, size } => {
                if let Some(w) = self.widgets.iter_mut().find(|w| w.id == id) {
                    w.size = size;
                }
            }
        }
    }
}
