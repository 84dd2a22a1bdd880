//! Pointer-driven drag/resize state machine.
//!
//! An explicit FSM replaces ad hoc per-widget event handlers: at most one
//! interaction is active at any instant, and the global pointer listeners
//! (modeled by `ListenerHook`) exist exactly while the machine is not
//! `Idle` — attach on entering Dragging/Resizing, detach on pointer-up.
//!
//! Policy for a pointer-down arriving mid-interaction: ignored until
//! pointer-up. The machine never reassigns the active widget mid-gesture.
//!
//! No canvas-edge clamping is applied; widgets may be dragged or resized
//! off-screen. The only floor is `MIN_WIDGET_SIZE` during resize.

use crate::store::{CanvasMutation, CanvasStore};
use bic_core::{MIN_WIDGET_SIZE, Point, Size, WidgetId};

/// A normalized pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            Self::Down { x, y } | Self::Move { x, y } | Self::Up { x, y } => Point::new(*x, *y),
        }
    }
}

/// Which part of a widget a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    Body,
    ResizeHandle,
}

/// Hit-test result supplied by the host alongside a pointer-down.
#[derive(Debug, Clone)]
pub struct Hit {
    pub id: WidgetId,
    pub region: HitRegion,
}

/// Subscription hooks for the global pointer-move/pointer-up listeners.
/// `attach` fires on Idle → active, `detach` on active → Idle; failing to
/// pair them would leak handlers across unrelated future interactions.
pub trait ListenerHook {
    fn attach(&mut self) {}
    fn detach(&mut self) {}
}

/// Hook for hosts that manage listeners elsewhere.
pub struct NullHook;

impl ListenerHook for NullHook {}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    Dragging {
        id: WidgetId,
        /// Pointer position minus widget position, captured at pointer-down.
        pointer_offset: Point,
    },
    Resizing {
        id: WidgetId,
        initial_size: Size,
        pointer_start: Point,
    },
}

pub struct InteractionController {
    state: InteractionState,
    hook: Box<dyn ListenerHook>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::with_hook(Box::new(NullHook))
    }

    pub fn with_hook(hook: Box<dyn ListenerHook>) -> Self {
        Self {
            state: InteractionState::Idle,
            hook,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// Feed one pointer event through the machine. `hit` is only
    /// meaningful for pointer-down. Returns the mutations to apply.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        hit: Option<&Hit>,
        store: &CanvasStore,
    ) -> Vec<CanvasMutation> {
        match event {
            PointerEvent::Down { .. } => {
                if !self.is_idle() {
                    // Mid-interaction pointer-down: ignored until pointer-up.
                    return vec![];
                }
                let Some(hit) = hit else {
                    return vec![];
                };
                let Some(widget) = store.get(&hit.id) else {
                    return vec![];
                };
                let pointer = event.position();
                self.state = match hit.region {
                    HitRegion::Body => InteractionState::Dragging {
                        id: hit.id.clone(),
                        pointer_offset: Point::new(
                            pointer.x - widget.position.x,
                            pointer.y - widget.position.y,
                        ),
                    },
                    HitRegion::ResizeHandle => InteractionState::Resizing {
                        id: hit.id.clone(),
                        initial_size: widget.size,
                        pointer_start: pointer,
                    },
                };
                log::trace!("interaction start on {}: {:?}", hit.id, hit.region);
                self.hook.attach();
                vec![]
            }
            PointerEvent::Move { .. } => {
                let pointer = event.position();
                match &self.state {
                    InteractionState::Idle => vec![],
                    InteractionState::Dragging { id, pointer_offset } => {
                        vec![CanvasMutation::Move {
                            id: id.clone(),
                            position: Point::new(
                                pointer.x - pointer_offset.x,
                                pointer.y - pointer_offset.y,
                            ),
                        }]
                    }
                    InteractionState::Resizing {
                        id,
                        initial_size,
                        pointer_start,
                    } => {
                        let size = Size::new(
                            initial_size.width + (pointer.x - pointer_start.x),
                            initial_size.height + (pointer.y - pointer_start.y),
                        )
                        .clamp_min(MIN_WIDGET_SIZE);
                        vec![CanvasMutation::Resize {
                            id: id.clone(),
                            size,
                        }]
                    }
                }
            }
            PointerEvent::Up { .. } => {
                if !self.is_idle() {
                    self.state = InteractionState::Idle;
                    self.hook.detach();
                    log::trace!("interaction end");
                }
                vec![]
            }
        }
    }
}
