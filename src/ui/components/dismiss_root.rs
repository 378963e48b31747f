use dioxus::prelude::*;

use crate::ui::state::dismiss_scope::DismissScope;

/// Page-wide click root for outside-dismiss.
///
/// Mount it once around the app so clicks anywhere on the page, not only
/// inside a table, close open filter menus and search boxes. Tables created
/// below it share its registry.
#[component]
pub fn DismissRoot(children: Element) -> Element {
    let scope = use_context_provider(DismissScope::new);

    rsx! {
        div {
            style: "min-height: 100vh;",
            onclick: move |_| scope.dispatch(),
            {children}
        }
    }
}
