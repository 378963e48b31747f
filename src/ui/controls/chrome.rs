use crate::domain::entities::filter::{FilterDescriptor, FilterFamily, SortDescriptor, SortDirection};
use crate::ui::controls::search_box::{CollapseTicket, SearchBox};
use crate::ui::dismiss::{DismissRegistry, OverlayToken};

/// Menu flag, search box and sort order shared by every filter control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlChrome {
    token: OverlayToken,
    menu_open: bool,
    search: SearchBox,
    sort: SortDirection,
}

impl Default for ControlChrome {
    fn default() -> Self {
        Self::new(SearchBox::default())
    }
}

impl ControlChrome {
    pub fn new(search: SearchBox) -> Self {
        Self {
            token: OverlayToken::next(),
            menu_open: false,
            search,
            sort: SortDirection::Ascending,
        }
    }

    pub fn token(&self) -> OverlayToken {
        self.token
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort
    }
}

/// Contract every filter control variant satisfies.
///
/// Implementors provide the field, family, reset behavior and access to
/// their [`ControlChrome`]; menu, search box, sorting and outside-dismiss
/// come for free.
pub trait FilterControl {
    fn field(&self) -> &str;
    fn family(&self) -> FilterFamily;
    fn chrome(&self) -> &ControlChrome;
    fn chrome_mut(&mut self) -> &mut ControlChrome;

    /// Drops every draft and returns the clear event for this control.
    fn reset(&mut self) -> FilterDescriptor;

    fn token(&self) -> OverlayToken {
        self.chrome().token
    }

    fn menu_open(&self) -> bool {
        self.chrome().menu_open
    }

    fn toggle_menu(&mut self, registry: &mut DismissRegistry) {
        let chrome = self.chrome_mut();
        chrome.menu_open = !chrome.menu_open;
        if chrome.menu_open {
            registry.open(chrome.token);
        } else {
            self.release_if_idle(registry);
        }
    }

    /// Takes the token out of the registry once neither the menu nor the
    /// search box is open.
    fn release_if_idle(&self, registry: &mut DismissRegistry) {
        let chrome = self.chrome();
        if !chrome.menu_open && !chrome.search.is_expanded() {
            registry.close(chrome.token);
        }
    }

    /// Flips the local order (ascending first) and returns the sort event.
    fn toggle_sort(&mut self) -> SortDescriptor {
        let direction = self.chrome().sort.toggled();
        self.chrome_mut().sort = direction;
        SortDescriptor::new(self.field(), direction)
    }

    fn search_box(&self) -> &SearchBox {
        &self.chrome().search
    }

    fn focus_search(&mut self, registry: &mut DismissRegistry) {
        let chrome = self.chrome_mut();
        chrome.search.focus();
        registry.open(chrome.token);
    }

    fn schedule_collapse(&mut self) -> Option<CollapseTicket> {
        self.chrome_mut().search.schedule_collapse()
    }

    /// Applies a scheduled collapse that is still current.
    fn expire_collapse(&mut self, ticket: CollapseTicket, registry: &mut DismissRegistry) -> bool {
        let collapsed = self.chrome_mut().search.expire(ticket);
        if collapsed {
            self.release_if_idle(registry);
        }
        collapsed
    }

    /// Outside click: close the menu and collapse the search box at once.
    fn dismiss(&mut self) {
        let chrome = self.chrome_mut();
        chrome.menu_open = false;
        if chrome.search.is_expanded() {
            chrome.search.collapse_now();
        }
    }

    fn dismiss_if_closed(&mut self, closed: &[OverlayToken]) -> bool {
        let hit = closed.contains(&self.token());
        if hit {
            self.dismiss();
        }
        hit
    }
}
