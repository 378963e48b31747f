use std::time::{Duration, Instant};

pub const COLLAPSED_WIDTH_PX: u32 = 30;
pub const DEFAULT_EXPANDED_WIDTH_PX: u32 = 200;
pub const DEFAULT_COLLAPSE_DELAY: Duration = Duration::from_millis(200);

/// The narrow-to-wide search input in a filter header.
///
/// Focus widens it at once. Blur only schedules the collapse, so a click on
/// a button inside the control (blur followed by an immediate re-focus)
/// does not make it flicker. A host with a clock drives time through
/// [`SearchBox::tick`]; a host with only a timer uses
/// [`SearchBox::schedule_collapse`] and [`SearchBox::expire`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBox {
    expanded: bool,
    collapse_at: Option<Instant>,
    scheduled: Option<CollapseTicket>,
    blurs: u64,
    expanded_width: u32,
    collapse_delay: Duration,
}

/// One timer-driven collapse. Any later focus or blur makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseTicket(u64);

impl Default for SearchBox {
    fn default() -> Self {
        Self::new(DEFAULT_EXPANDED_WIDTH_PX, DEFAULT_COLLAPSE_DELAY)
    }
}

impl SearchBox {
    pub fn new(expanded_width: u32, collapse_delay: Duration) -> Self {
        Self {
            expanded: false,
            collapse_at: None,
            scheduled: None,
            blurs: 0,
            expanded_width,
            collapse_delay,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn collapse_pending(&self) -> bool {
        self.collapse_at.is_some() || self.scheduled.is_some()
    }

    pub fn collapse_delay(&self) -> Duration {
        self.collapse_delay
    }

    pub fn focus(&mut self) {
        self.expanded = true;
        self.collapse_at = None;
        self.scheduled = None;
    }

    pub fn blur(&mut self, now: Instant) {
        if self.expanded {
            self.collapse_at = Some(now + self.collapse_delay);
        }
    }

    /// Applies a due collapse. Returns `true` when the box changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.collapse_at {
            Some(deadline) if now >= deadline => {
                self.collapse_now();
                true
            }
            _ => false,
        }
    }

    /// Blur for hosts without a clock: the caller waits
    /// [`SearchBox::collapse_delay`] and hands the ticket to
    /// [`SearchBox::expire`].
    pub fn schedule_collapse(&mut self) -> Option<CollapseTicket> {
        if !self.expanded {
            return None;
        }
        self.blurs += 1;
        let ticket = CollapseTicket(self.blurs);
        self.scheduled = Some(ticket);
        Some(ticket)
    }

    /// Collapses if `ticket` is still the latest scheduled collapse.
    pub fn expire(&mut self, ticket: CollapseTicket) -> bool {
        if self.scheduled != Some(ticket) {
            return false;
        }
        self.collapse_now();
        true
    }

    pub fn collapse_now(&mut self) {
        self.expanded = false;
        self.collapse_at = None;
        self.scheduled = None;
    }

    pub fn width(&self) -> u32 {
        if self.expanded {
            self.expanded_width
        } else {
            COLLAPSED_WIDTH_PX
        }
    }

    pub fn style(&self) -> String {
        if self.expanded {
            format!(
                "width: {}px; background: #ffffff; border: 1px solid #007BFF; transition: width 0.2s ease;",
                self.expanded_width
            )
        } else {
            format!(
                "width: {COLLAPSED_WIDTH_PX}px; background: transparent; border: none; transition: width 0.2s ease;"
            )
        }
    }
}
