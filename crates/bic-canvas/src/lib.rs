//! Conversational canvas orchestrator.
//!
//! `Canvas` is the single context object tying the subsystem together:
//! the widget registry, the dataset fetch adapter, the canvas state
//! store, the pointer interaction machine, and the command dispatcher.
//! It is constructed once and passed by handle to every consumer — there
//! is no module-level mutable state.
//!
//! All mutation happens on one thread; `Canvas` is deliberately `!Send`
//! (`RefCell` interior) and suspends only while awaiting a dataset
//! fetch. Interior borrows are never held across that await, so a
//! `remove` can land between stage and commit — the store's pending-set
//! check decides who wins.

pub mod command;
pub mod interaction;
pub mod store;

pub use command::{CommandDispatcher, CommandMatcher, CommandOutcome, CommandRule, SubstringMatcher};
pub use interaction::{Hit, HitRegion, InteractionController, ListenerHook, PointerEvent};
pub use store::{CanvasMutation, CanvasStore, Staged};

use bic_core::{CanvasBounds, Point, TypeKey, UnknownComponentError, Widget, WidgetId, WidgetRegistry};
use bic_data::{DatasetAdapter, EndpointConfig, FetchError};
use serde_json::{Map, Value};
use std::cell::RefCell;
use thiserror::Error;

/// Why a spawn did not produce a widget.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    UnknownComponent(#[from] UnknownComponentError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Result of a free-text command: the feedback line to show, plus the
/// widget it spawned, if any.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub feedback: String,
    pub widget: Option<WidgetId>,
}

pub struct Canvas {
    registry: WidgetRegistry,
    adapter: DatasetAdapter,
    dispatcher: CommandDispatcher,
    store: RefCell<CanvasStore>,
    interaction: RefCell<InteractionController>,
}

impl Canvas {
    /// Canvas with the builtin registry and command rules, talking to the
    /// configured dataset endpoints.
    pub fn new(config: &EndpointConfig) -> Result<Self, FetchError> {
        Ok(Self::with_adapter(DatasetAdapter::new(config)?))
    }

    pub fn with_adapter(adapter: DatasetAdapter) -> Self {
        Self {
            registry: WidgetRegistry::builtin(),
            adapter,
            dispatcher: CommandDispatcher::builtin(),
            store: RefCell::new(CanvasStore::default()),
            interaction: RefCell::new(InteractionController::new()),
        }
    }

    pub fn with_registry(mut self, registry: WidgetRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: CommandDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_bounds(self, bounds: CanvasBounds) -> Self {
        self.store.replace(CanvasStore::new(bounds));
        self
    }

    pub fn with_listener_hook(self, hook: Box<dyn ListenerHook>) -> Self {
        self.interaction
            .replace(InteractionController::with_hook(hook));
        self
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    // ─── Widget lifecycle ────────────────────────────────────────────────

    /// Spawn a widget: resolve the registry entry, stage the descriptor,
    /// fetch + shape its dataset, then commit.
    ///
    /// A registry miss aborts before staging — no widget, and no
    /// user-visible message (only logged).
    /// A fetch failure aborts the staged spawn and surfaces the error via
    /// [`Canvas::last_error`].
    pub async fn create(
        &self,
        type_key: impl Into<TypeKey>,
        explicit: Option<Map<String, Value>>,
        position: Option<Point>,
    ) -> Result<WidgetId, CreateError> {
        let type_key = type_key.into();
        let entry = match self.registry.resolve(&type_key) {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("spawn rejected: {err}");
                return Err(err.into());
            }
        };

        let staged = self
            .store
            .borrow_mut()
            .stage(type_key, entry, position);
        let id = staged.id.clone();

        match self.adapter.fetch_props(entry, explicit.as_ref()).await {
            Ok(props) => {
                self.store.borrow_mut().commit(staged, props);
                Ok(id)
            }
            Err(err) => {
                log::warn!("spawn {id} failed: {err}");
                self.store.borrow_mut().abort(&staged, &err);
                Err(err.into())
            }
        }
    }

    /// Shallow-merge `patch` into a widget's props; dropped if the widget
    /// no longer exists.
    pub fn update(&self, id: &WidgetId, patch: &Map<String, Value>) {
        self.store.borrow_mut().update(id, patch);
    }

    /// Remove a widget. Never cancels an in-flight fetch; the store's
    /// liveness check drops the late result instead.
    pub fn remove(&self, id: &WidgetId) {
        self.store.borrow_mut().remove(id);
    }

    // ─── Pointer interactions ────────────────────────────────────────────

    /// Feed a pointer event (with the host's hit-test result, for
    /// pointer-down) through the interaction machine and apply whatever
    /// mutations it emits.
    pub fn pointer(&self, event: &PointerEvent, hit: Option<&Hit>) {
        let mutations = {
            let store = self.store.borrow();
            self.interaction.borrow_mut().handle(event, hit, &store)
        };
        let mut store = self.store.borrow_mut();
        for mutation in mutations {
            store.apply(mutation);
        }
    }

    pub fn is_interacting(&self) -> bool {
        !self.interaction.borrow().is_idle()
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Interpret a free-text command. A matching rule spawns its widget
    /// and returns the canned feedback; a fetch failure returns the error
    /// text instead; a registry miss keeps the canned feedback but spawns
    /// nothing; no match returns the fallback line.
    pub async fn dispatch(&self, input: &str) -> Dispatch {
        match self.dispatcher.interpret(input) {
            CommandOutcome::Spawn { type_key, feedback } => {
                match self.create(type_key, None, None).await {
                    Ok(id) => Dispatch {
                        feedback,
                        widget: Some(id),
                    },
                    Err(CreateError::UnknownComponent(_)) => Dispatch {
                        feedback,
                        widget: None,
                    },
                    Err(CreateError::Fetch(err)) => Dispatch {
                        feedback: err.to_string(),
                        widget: None,
                    },
                }
            }
            CommandOutcome::Fallback { feedback } => Dispatch {
                feedback,
                widget: None,
            },
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Snapshot of all widgets, in spawn order.
    pub fn widgets(&self) -> Vec<Widget> {
        self.store.borrow().widgets().to_vec()
    }

    pub fn widget(&self, id: &WidgetId) -> Option<Widget> {
        self.store.borrow().get(id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.store.borrow().is_loading()
    }

    /// Ids staged but not yet committed (per-widget loading indicators).
    pub fn pending_ids(&self) -> Vec<WidgetId> {
        self.store.borrow().pending_ids()
    }

    pub fn last_error(&self) -> Option<String> {
        self.store.borrow().last_error().map(str::to_string)
    }

    pub fn clear_error(&self) {
        self.store.borrow_mut().clear_error();
    }
}
