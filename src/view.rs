//! The message list as seen by the sync loop.
//!
//! `ChatView` is the surface a render pass writes into. `MessageListView` is
//! the retained implementation the egui frame loop paints from; tests drive
//! the session against lighter fakes.

use std::collections::HashMap;

/// Seconds a bubble takes to finish its entrance animation
pub const ENTRANCE_SECS: f64 = 0.35;

/// Vertical scroll geometry of the message list, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub content_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    /// Largest reachable offset (0 when everything fits).
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn distance_from_bottom(&self) -> f32 {
        (self.max_offset() - self.offset).max(0.0)
    }

    pub fn is_near_bottom(&self, threshold: f32) -> bool {
        self.distance_from_bottom() <= threshold
    }
}

/// Which side a bubble sits on. Purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleSide {
    Own,
    Other,
}

/// One rendered message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bubble {
    pub id: u64,
    pub author: String,
    pub body: String,
    pub side: BubbleSide,
    /// Play the entrance animation. Set at most once per message id.
    pub animate: bool,
}

/// Display surface driven by `ChatSession::render`.
pub trait ChatView {
    /// Current scroll geometry, as of the last layout.
    fn scroll_metrics(&self) -> ScrollMetrics;
    /// Remove every bubble.
    fn clear(&mut self);
    /// Append a bubble below the existing ones.
    fn push_bubble(&mut self, bubble: Bubble);
    /// Scroll so the last bubble is fully visible.
    fn scroll_to_bottom(&mut self);
    /// Show or hide the "jump to bottom" button.
    fn set_jump_visible(&mut self, visible: bool);
}

/// Retained message list for the egui front end.
///
/// Scroll metrics are fed back by the painter after each frame, and scroll
/// requests are consumed by the painter on the next frame.
#[derive(Debug, Default)]
pub struct MessageListView {
    bubbles: Vec<Bubble>,
    metrics: ScrollMetrics,
    scroll_requested: bool,
    /// A scroll to the bottom was asked for and the painter has not yet
    /// reported arriving there
    pinned: bool,
    jump_visible: bool,
    /// Bubbles still entering, keyed by id. `None` until first painted.
    entering: HashMap<u64, Option<f64>>,
}

impl MessageListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn jump_visible(&self) -> bool {
        self.jump_visible
    }

    /// Take a pending scroll-to-bottom request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Record the geometry measured by the painter.
    ///
    /// A pending scroll to the bottom stays pending until the measured
    /// offset has reached the bottom.
    pub fn update_metrics(&mut self, metrics: ScrollMetrics) {
        self.metrics = metrics;
        if self.pinned && !self.scroll_requested && metrics.distance_from_bottom() < 1.0 {
            self.pinned = false;
        }
    }

    /// Geometry as last measured, ignoring any pending scroll.
    pub fn measured_metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    /// Stamp newly painted entrances with `now` and forget finished ones.
    ///
    /// Entrance state survives `clear`, so a rebuild in the middle of an
    /// animation does not restart or cut it.
    pub fn advance_entrances(&mut self, now: f64) {
        self.entering.retain(|_, started| {
            let started = *started.get_or_insert(now);
            now - started < ENTRANCE_SECS
        });
    }

    /// Entrance progress of bubble `id` in `0.0..=1.0`; 1.0 when settled.
    pub fn entrance_progress(&self, id: u64, now: f64) -> f32 {
        match self.entering.get(&id) {
            Some(Some(started)) => ((now - started) / ENTRANCE_SECS).clamp(0.0, 1.0) as f32,
            Some(None) => 0.0,
            None => 1.0,
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.entering.is_empty()
    }
}

impl ChatView for MessageListView {
    fn scroll_metrics(&self) -> ScrollMetrics {
        if self.pinned {
            // Headed for the bottom; report it as reached
            ScrollMetrics {
                offset: self.metrics.max_offset(),
                ..self.metrics
            }
        } else {
            self.metrics
        }
    }

    fn clear(&mut self) {
        self.bubbles.clear();
    }

    fn push_bubble(&mut self, bubble: Bubble) {
        if bubble.animate {
            self.entering.insert(bubble.id, None);
        }
        self.bubbles.push(bubble);
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_requested = true;
        self.pinned = true;
    }

    fn set_jump_visible(&mut self, visible: bool) {
        self.jump_visible = visible;
    }
}
