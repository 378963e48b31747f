use dioxus::prelude::*;

use crate::ui::dismiss::{DismissRegistry, OverlayToken};

/// Outside-dismiss registry shared by every control under one click root.
///
/// A [`DismissRoot`](crate::ui::components::dismiss_root::DismissRoot)
/// provides one for the whole page. Controls claim their token while a click
/// bubbles through them; the root then dispatches once and publishes the
/// closed tokens in `dismissed` for their owners to react to.
#[derive(Clone, Copy, PartialEq)]
pub struct DismissScope {
    pub registry: Signal<DismissRegistry>,
    /// Tokens closed by the latest outside click.
    pub dismissed: Signal<Vec<OverlayToken>>,
}

impl DismissScope {
    /// Creates the signals in the current scope. Not a hook; call it from
    /// inside `use_hook` or `use_context_provider`.
    pub fn new() -> Self {
        Self {
            registry: Signal::new(DismissRegistry::new()),
            dismissed: Signal::new(Vec::new()),
        }
    }

    pub fn claim(mut self, token: OverlayToken) {
        self.registry.write().claim(token);
    }

    pub fn open(mut self, token: OverlayToken) {
        self.registry.write().open(token);
    }

    pub fn close(mut self, token: OverlayToken) {
        self.registry.write().close(token);
    }

    /// Runs outside-dismiss for a click that finished bubbling.
    pub fn dispatch(mut self) {
        let closed = self.registry.write().dispatch(&[]);
        if !closed.is_empty() {
            self.dismissed.set(closed);
        }
    }
}
