//! Idle/Showing state machine for one interactive chart.

use crate::data_types::{ActiveSelection, HoverEvent};
use crate::handler::{HoverHandler, TooltipUpdate};
use parking_lot::Mutex;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TooltipState {
    Idle,
    Showing,
}

struct SessionInner {
    state: TooltipState,
    hovered: Option<HoverEvent>,
    selection: ActiveSelection,
}

/// Tracks the latest hover and selection of one chart.
///
/// Events are processed synchronously; the latest one wins.
pub struct HoverSession {
    handler: HoverHandler,
    inner: Mutex<SessionInner>,
}

impl HoverSession {
    pub fn new(handler: HoverHandler, selection: ActiveSelection) -> Self {
        Self {
            handler,
            inner: Mutex::new(SessionInner {
                state: TooltipState::Idle,
                hovered: None,
                selection,
            }),
        }
    }

    pub fn state(&self) -> TooltipState {
        self.inner.lock().state
    }

    pub fn selection(&self) -> ActiveSelection {
        self.inner.lock().selection.clone()
    }

    pub fn handler(&self) -> &HoverHandler {
        &self.handler
    }

    /// Cursor moved: `None` when it left every point.
    pub fn on_hover(&self, hover: Option<HoverEvent>) -> TooltipUpdate {
        let mut inner = self.inner.lock();
        inner.hovered = hover;
        self.refresh(&mut inner)
    }

    /// Structure column selection changed; re-renders the hovered point, if any.
    pub fn on_selection_change(&self, selection: ActiveSelection) -> TooltipUpdate {
        let mut inner = self.inner.lock();
        inner.selection = selection;
        if inner.state == TooltipState::Showing {
            debug!("selection changed while showing");
            inner.state = TooltipState::Idle;
        }
        self.refresh(&mut inner)
    }

    fn refresh(&self, inner: &mut SessionInner) -> TooltipUpdate {
        let update = self
            .handler
            .assemble_tooltip(inner.hovered.as_ref(), &inner.selection);
        let next = if update.is_visible() {
            TooltipState::Showing
        } else {
            TooltipState::Idle
        };
        if next != inner.state {
            debug!(from = ?inner.state, to = ?next, "tooltip state");
            inner.state = next;
        }
        update
    }
}
