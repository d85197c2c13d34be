//! Active-section tracking.
//!
//! Two independent producers feed one state cell:
//!
//! - the intersection signal, fired by the viewport observer when a section's
//!   anchor starts intersecting the (margin-shrunk) viewport;
//! - the scroll signal, recomputed on every scroll event from the anchors'
//!   top offsets.
//!
//! Neither signal has priority. Whichever callback runs last decides the
//! active section, so the two can disagree for a moment while the page is
//! moving. The scroll walk favours the later section when the reference point
//! sits between two anchors; the observer favours whatever intersected first.
//! Both behaviours are kept as-is.

use tracing::debug;

use crate::error::{PortfolioError, Result};

/// Options handed to the viewport observer for every anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    /// CSS margin shorthand, top/right/bottom/left.
    pub root_margin: String,
}

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_ROOT_MARGIN: &str = "-10% 0px -60% 0px";
/// The scroll reference sits a third of the way down the viewport.
pub const DEFAULT_REFERENCE_FRACTION: f64 = 1.0 / 3.0;

/// Which producer wrote the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Initial,
    Intersection,
    Scroll,
}

/// Page geometry and scrolling, as seen by the tracker.
///
/// The browser implementation reads `window.scrollY`, `innerHeight` and the
/// anchors' `offsetTop`; tests provide a fixed layout.
pub trait SectionHost {
    /// Top offset of the section's anchor, or `None` when it is not attached.
    fn anchor_top(&self, id: &str) -> Option<f64>;
    fn scroll_offset(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// Smooth, top-aligned scroll to the anchor. Fire-and-forget.
    fn scroll_into_view(&self, id: &str);
}

#[derive(Debug)]
pub struct SectionTracker {
    ids: Vec<String>,
    active: usize,
    last_signal: Signal,
    intersection_signal: Option<usize>,
    scroll_signal: Option<usize>,
    reference_fraction: f64,
    detached: bool,
}

impl SectionTracker {
    /// Builds a tracker over the ordered section ids. The first id is active
    /// until a signal fires.
    pub fn new<I, S>(ids: I, reference_fraction: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(PortfolioError::EmptySections);
        }
        Ok(Self {
            ids,
            active: 0,
            last_signal: Signal::Initial,
            intersection_signal: None,
            scroll_signal: None,
            reference_fraction,
            detached: false,
        })
    }

    pub fn active(&self) -> &str {
        &self.ids[self.active]
    }

    pub fn last_signal(&self) -> Signal {
        self.last_signal
    }

    pub fn intersection_signal(&self) -> Option<&str> {
        self.intersection_signal.map(|i| self.ids[i].as_str())
    }

    pub fn scroll_signal(&self) -> Option<&str> {
        self.scroll_signal.map(|i| self.ids[i].as_str())
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|s| s == id)
    }

    /// Observer callback for one anchor. Only the rising edge counts.
    /// Returns true when the active section changed.
    pub fn on_intersection(&mut self, id: &str, is_intersecting: bool) -> bool {
        if self.detached || !is_intersecting {
            return false;
        }
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        self.intersection_signal = Some(idx);
        self.set_active(idx, Signal::Intersection)
    }

    /// Scroll callback. Reads the current geometry from `host`.
    /// Returns true when the active section changed.
    pub fn on_scroll<H: SectionHost + ?Sized>(&mut self, host: &H) -> bool {
        if self.detached {
            return false;
        }
        let reference =
            scroll_reference(host.scroll_offset(), host.viewport_height(), self.reference_fraction);
        let tops: Vec<Option<f64>> = self.ids.iter().map(|id| host.anchor_top(id)).collect();
        match section_at(reference, &tops) {
            Some(idx) => {
                self.scroll_signal = Some(idx);
                self.set_active(idx, Signal::Scroll)
            }
            None => false,
        }
    }

    /// Requests a scroll to `id`. Unknown ids and a detached tracker are no-ops.
    pub fn scroll_to<H: SectionHost + ?Sized>(&self, host: &H, id: &str) {
        if self.detached || self.index_of(id).is_none() {
            return;
        }
        host.scroll_into_view(id);
    }

    /// Stops accepting signals. Events already in flight become no-ops.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    fn set_active(&mut self, idx: usize, signal: Signal) -> bool {
        self.last_signal = signal;
        if self.active == idx {
            return false;
        }
        debug!(from = %self.ids[self.active], to = %self.ids[idx], ?signal, "active section changed");
        self.active = idx;
        true
    }
}

/// Reference point used by the scroll signal.
pub fn scroll_reference(scroll_offset: f64, viewport_height: f64, fraction: f64) -> f64 {
    scroll_offset + viewport_height * fraction
}

/// Index of the last section whose top has been passed by `reference`.
/// Walks from the last section to the first and stops at the first match;
/// unattached anchors (`None`) are skipped.
pub fn section_at(reference: f64, tops: &[Option<f64>]) -> Option<usize> {
    tops.iter()
        .enumerate()
        .rev()
        .find_map(|(i, top)| top.filter(|t| reference >= *t).map(|_| i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct Layout {
        tops: HashMap<&'static str, f64>,
        scroll: f64,
        height: f64,
        scrolled_to: RefCell<Vec<String>>,
    }

    impl SectionHost for Layout {
        fn anchor_top(&self, id: &str) -> Option<f64> {
            self.tops.get(id).copied()
        }
        fn scroll_offset(&self) -> f64 {
            self.scroll
        }
        fn viewport_height(&self) -> f64 {
            self.height
        }
        fn scroll_into_view(&self, id: &str) {
            self.scrolled_to.borrow_mut().push(id.to_string());
        }
    }

    fn layout(scroll: f64) -> Layout {
        Layout {
            tops: HashMap::from([("a", 0.0), ("b", 400.0), ("c", 900.0)]),
            scroll,
            height: 600.0,
            scrolled_to: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_starts_on_first_section() {
        let t = SectionTracker::new(["a", "b", "c"], 1.0 / 3.0).unwrap();
        assert_eq!(t.active(), "a");
        assert_eq!(t.last_signal(), Signal::Initial);
    }

    #[test]
    fn test_empty_sections_rejected() {
        let err = SectionTracker::new(Vec::<String>::new(), 0.3).unwrap_err();
        assert!(matches!(err, PortfolioError::EmptySections));
    }

    #[test]
    fn test_section_at_prefers_later_section() {
        let tops = [Some(0.0), Some(400.0), Some(900.0)];
        assert_eq!(section_at(800.0, &tops), Some(1));
        assert_eq!(section_at(900.0, &tops), Some(2));
        assert_eq!(section_at(-1.0, &tops), None);
        // equal tops: the later one wins
        assert_eq!(section_at(500.0, &[Some(0.0), Some(400.0), Some(400.0)]), Some(2));
    }

    #[test]
    fn test_section_at_skips_missing_anchors() {
        assert_eq!(section_at(1000.0, &[Some(0.0), Some(400.0), None]), Some(1));
        assert_eq!(section_at(1000.0, &[None, None]), None);
    }

    #[test]
    fn test_scroll_signal_uses_viewport_third() {
        let mut t = SectionTracker::new(["a", "b", "c"], 1.0 / 3.0).unwrap();
        assert!(t.on_scroll(&layout(500.0)));
        assert_eq!(t.active(), "b");
        assert_eq!(t.scroll_signal(), Some("b"));
        assert!(!t.on_scroll(&layout(550.0)));
        assert_eq!(t.last_signal(), Signal::Scroll);
    }

    #[test]
    fn test_last_write_wins() {
        let mut t = SectionTracker::new(["a", "b", "c"], 1.0 / 3.0).unwrap();
        t.on_scroll(&layout(500.0));
        assert!(t.on_intersection("c", true));
        assert_eq!(t.active(), "c");
        t.on_scroll(&layout(500.0));
        assert_eq!(t.active(), "b");
        assert_eq!(t.intersection_signal(), Some("c"));
    }

    #[test]
    fn test_intersection_ignores_falling_edge_and_unknown_ids() {
        let mut t = SectionTracker::new(["a", "b"], 1.0 / 3.0).unwrap();
        assert!(!t.on_intersection("b", false));
        assert!(!t.on_intersection("zzz", true));
        assert_eq!(t.active(), "a");
        assert_eq!(t.intersection_signal(), None);
    }

    #[test]
    fn test_scroll_to_requests_once() {
        let t = SectionTracker::new(["a", "b", "c"], 1.0 / 3.0).unwrap();
        let l = layout(0.0);
        t.scroll_to(&l, "c");
        t.scroll_to(&l, "nope");
        assert_eq!(*l.scrolled_to.borrow(), vec!["c".to_string()]);
    }

    #[test]
    fn test_detached_tracker_is_inert() {
        let mut t = SectionTracker::new(["a", "b", "c"], 1.0 / 3.0).unwrap();
        t.detach();
        assert!(!t.on_scroll(&layout(900.0)));
        assert!(!t.on_intersection("c", true));
        let l = layout(0.0);
        t.scroll_to(&l, "b");
        assert_eq!(t.active(), "a");
        assert!(l.scrolled_to.borrow().is_empty());
    }
}
