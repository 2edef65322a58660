//! Session state and the render pass that reconciles it with the view.
//!
//! `ChatSession` owns the last fetched snapshot, the entrance-animation
//! watermark, the local identity, the theme and the pending input. It is
//! owned by the UI thread; every mutation of the view goes through
//! [`ChatSession::render`].

use crate::config::Theme;
use crate::message::{Message, Outgoing};
use crate::validation;
use crate::view::{Bubble, BubbleSide, ChatView};

/// Distance from the bottom, in points, that still counts as "at the bottom"
pub const BOTTOM_THRESHOLD: f32 = 10.0;

#[derive(Debug)]
pub struct ChatSession {
    /// Last fetched snapshot, in store order
    messages: Vec<Message>,
    /// Highest id already shown with its entrance animation
    last_rendered_id: u64,
    current_user: String,
    theme: Theme,
    /// Text in the input field
    pub input: String,
}

impl ChatSession {
    pub fn new(current_user: impl Into<String>, theme: Theme) -> Self {
        Self {
            messages: Vec::new(),
            last_rendered_id: 0,
            current_user: current_user.into(),
            theme,
            input: String::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_rendered_id(&self) -> u64 {
        self.last_rendered_id
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Replace the snapshot wholesale with a fetch result and render it.
    ///
    /// An empty result (which is also what a failed fetch yields) replaces
    /// the snapshot like any other; the watermark is left alone.
    pub fn apply_snapshot<V: ChatView>(&mut self, messages: Vec<Message>, view: &mut V) {
        self.messages = messages;
        self.render(view);
    }

    /// Rebuild the view from the snapshot.
    ///
    /// Messages above the watermark are flagged for the entrance animation
    /// and raise the watermark; everything else renders still. The view is
    /// pinned to the bottom only if it was there before the rebuild.
    pub fn render<V: ChatView>(&mut self, view: &mut V) {
        // Measure before touching the view; rebuilding changes the metrics
        let was_at_bottom = view.scroll_metrics().is_near_bottom(BOTTOM_THRESHOLD);

        let watermark = self.last_rendered_id;
        view.clear();
        for message in &self.messages {
            let animate = message.id > watermark;
            if animate {
                self.last_rendered_id = self.last_rendered_id.max(message.id);
            }
            let side = if message.author == self.current_user {
                BubbleSide::Own
            } else {
                BubbleSide::Other
            };
            view.push_bubble(Bubble {
                id: message.id,
                author: message.author.clone(),
                body: message.body.clone(),
                side,
                animate,
            });
        }

        if was_at_bottom {
            view.scroll_to_bottom();
        }
    }

    /// Validate the pending input. `None` means there is nothing to send.
    ///
    /// The input is left untouched; it is cleared only once the store has
    /// accepted the message (see [`ChatSession::confirm_post`]).
    pub fn take_outgoing(&self) -> Option<Outgoing> {
        let body = validation::validate_message(&self.input).ok()?;
        Some(Outgoing {
            author: self.current_user.clone(),
            body: body.to_string(),
        })
    }

    /// Fold a post result into the session. Returns `true` when a refresh
    /// should follow.
    ///
    /// On success the input is cleared, unless the user has since typed
    /// something other than what was sent.
    pub fn confirm_post(&mut self, body: &str, ok: bool) -> bool {
        if !ok {
            return false;
        }
        if self.input.trim() == body {
            self.input.clear();
        }
        true
    }

    /// Show the jump button when scrolled away from the bottom.
    pub fn tick_visibility<V: ChatView>(&self, view: &mut V) -> bool {
        let away = !view.scroll_metrics().is_near_bottom(BOTTOM_THRESHOLD);
        view.set_jump_visible(away);
        away
    }

    pub fn jump_to_bottom<V: ChatView>(&self, view: &mut V) {
        view.scroll_to_bottom();
        view.set_jump_visible(false);
    }

    /// Change the local identity and re-render so bubble sides follow.
    pub fn set_current_user<V: ChatView>(&mut self, user: impl Into<String>, view: &mut V) {
        self.current_user = user.into();
        self.render(view);
    }

    /// Flip the theme and re-render. Returns the new theme.
    pub fn toggle_theme<V: ChatView>(&mut self, view: &mut V) -> Theme {
        self.theme = self.theme.toggled();
        self.render(view);
        self.theme
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::view::ScrollMetrics;

    /// Fixed-height rows and an instant scroll, enough to check anchoring.
    pub(crate) const ROW_HEIGHT: f32 = 40.0;

    #[derive(Debug)]
    pub(crate) struct FakeView {
        pub bubbles: Vec<Bubble>,
        pub offset: f32,
        pub viewport_height: f32,
        pub jump_visible: bool,
        pub renders: usize,
    }

    impl FakeView {
        pub fn new(viewport_height: f32) -> Self {
            Self {
                bubbles: Vec::new(),
                offset: 0.0,
                viewport_height,
                jump_visible: false,
                renders: 0,
            }
        }

        pub fn animated_ids(&self) -> Vec<u64> {
            self.bubbles.iter().filter(|b| b.animate).map(|b| b.id).collect()
        }
    }

    impl ChatView for FakeView {
        fn scroll_metrics(&self) -> ScrollMetrics {
            ScrollMetrics {
                offset: self.offset,
                content_height: self.bubbles.len() as f32 * ROW_HEIGHT,
                viewport_height: self.viewport_height,
            }
        }

        fn clear(&mut self) {
            self.renders += 1;
            self.bubbles.clear();
        }

        fn push_bubble(&mut self, bubble: Bubble) {
            self.bubbles.push(bubble);
        }

        fn scroll_to_bottom(&mut self) {
            self.offset = self.scroll_metrics().max_offset();
        }

        fn set_jump_visible(&mut self, visible: bool) {
            self.jump_visible = visible;
        }
    }

    fn conversation(ids: std::ops::RangeInclusive<u64>) -> Vec<Message> {
        ids.map(|id| {
            let author = if id % 2 == 0 { "B" } else { "A" };
            Message::new(id, author, format!("message {id}"))
        })
        .collect()
    }

    #[test]
    fn test_two_fetch_scenario() {
        let mut session = ChatSession::new("A", Theme::Light);
        let mut view = FakeView::new(400.0);

        session.apply_snapshot(vec![Message::new(1, "A", "hi")], &mut view);
        assert_eq!(view.bubbles.len(), 1);
        assert_eq!(session.last_rendered_id(), 1);
        assert_eq!(view.animated_ids(), vec![1]);

        session.apply_snapshot(
            vec![Message::new(1, "A", "hi"), Message::new(2, "B", "yo")],
            &mut view,
        );
        assert_eq!(view.bubbles.len(), 2);
        assert_eq!(view.animated_ids(), vec![2]);
        assert_eq!(session.last_rendered_id(), 2);
    }

    #[test]
    fn test_bubble_sides_follow_current_user() {
        let mut session = ChatSession::new("A", Theme::Light);
        let mut view = FakeView::new(400.0);
        session.apply_snapshot(conversation(1..=2), &mut view);

        assert_eq!(view.bubbles[0].side, BubbleSide::Own);
        assert_eq!(view.bubbles[1].side, BubbleSide::Other);

        session.set_current_user("B", &mut view);
        assert_eq!(view.bubbles[0].side, BubbleSide::Other);
        assert_eq!(view.bubbles[1].side, BubbleSide::Own);
        // Re-rendering for a new identity animates nothing
        assert!(view.animated_ids().is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut session = ChatSession::new("A", Theme::Dark);
        let mut view = FakeView::new(400.0);
        session.apply_snapshot(conversation(1..=5), &mut view);
        let first: Vec<_> = view.bubbles.iter().map(|b| (b.id, b.side)).collect();
        let watermark = session.last_rendered_id();

        session.render(&mut view);
        let second: Vec<_> = view.bubbles.iter().map(|b| (b.id, b.side)).collect();

        assert_eq!(first, second);
        assert_eq!(session.last_rendered_id(), watermark);
        assert!(view.animated_ids().is_empty());
    }

    #[test]
    fn test_watermark_never_decreases() {
        let mut session = ChatSession::new("A", Theme::Light);
        let mut view = FakeView::new(400.0);
        let snapshots = [
            conversation(1..=3),
            conversation(1..=6),
            Vec::new(),
            conversation(2..=4),
            conversation(1..=8),
            vec![Message::new(5, "A", "late edit")],
        ];

        let mut previous = session.last_rendered_id();
        for snapshot in snapshots {
            session.apply_snapshot(snapshot, &mut view);
            assert!(session.last_rendered_id() >= previous);
            previous = session.last_rendered_id();
        }
        assert_eq!(session.last_rendered_id(), 8);
    }

    #[test]
    fn test_seen_messages_never_animate_again() {
        let mut session = ChatSession::new("A", Theme::Light);
        let mut view = FakeView::new(400.0);

        session.apply_snapshot(conversation(1..=4), &mut view);
        assert_eq!(view.animated_ids(), vec![1, 2, 3, 4]);

        // Transient failure empties the list, then history comes back
        session.apply_snapshot(Vec::new(), &mut view);
        assert!(view.bubbles.is_empty());
        assert_eq!(session.last_rendered_id(), 4);

        session.apply_snapshot(conversation(1..=5), &mut view);
        assert_eq!(view.animated_ids(), vec![5]);
    }

    #[test]
    fn test_out_of_order_snapshot_animates_each_new_id_once() {
        let mut session = ChatSession::new("A", Theme::Light);
        let mut view = FakeView::new(400.0);

        session.apply_snapshot(vec![Message::new(3, "A", "c"), Message::new(2, "B", "b")], &mut view);
        assert_eq!(view.animated_ids(), vec![3, 2]);
        assert_eq!(session.last_rendered_id(), 3);
        // Order is the store's; no re-sort
        assert_eq!(view.bubbles[0].id, 3);
    }

    #[test]
    fn test_bottom_anchor_follows_new_messages() {
        let mut session = ChatSession::new("A", Theme::Light);
        let mut view = FakeView::new(200.0);

        session.apply_snapshot(conversation(1..=10), &mut view);
        assert_eq!(view.offset, view.scroll_metrics().max_offset());

        session.apply_snapshot(conversation(1..=15), &mut view);
        let metrics = view.scroll_metrics();
        assert_eq!(metrics.offset, metrics.max_offset());
        assert_eq!(metrics.offset, 15.0 * ROW_HEIGHT - 200.0);
    }

    #[test]
    fn test_reader_scrolled_up_is_not_yanked() {
        let mut session = ChatSession::new("A", Theme::Light);
        let mut view = FakeView::new(200.0);

        session.apply_snapshot(conversation(1..=10), &mut view);
        view.offset = 40.0;

        session.apply_snapshot(conversation(1..=15), &mut view);
        assert_eq!(view.offset, 40.0);
    }

    #[test]
    fn test_take_outgoing_rejects_invalid_input() {
        let mut session = ChatSession::new("A", Theme::Light);

        session.input = String::new();
        assert_eq!(session.take_outgoing(), None);

        session.input = "x".repeat(141);
        assert_eq!(session.take_outgoing(), None);
        assert_eq!(session.input.len(), 141);

        session.input = "  hello  ".into();
        assert_eq!(
            session.take_outgoing(),
            Some(Outgoing {
                author: "A".into(),
                body: "hello".into()
            })
        );
        // Validation alone never clears the input
        assert_eq!(session.input, "  hello  ");
    }

    #[test]
    fn test_confirm_post() {
        let mut session = ChatSession::new("A", Theme::Light);

        session.input = "hello".into();
        assert!(!session.confirm_post("hello", false));
        assert_eq!(session.input, "hello");

        assert!(session.confirm_post("hello", true));
        assert!(session.input.is_empty());

        // Text typed after sending survives the confirmation
        session.input = "next thought".into();
        assert!(session.confirm_post("hello", true));
        assert_eq!(session.input, "next thought");
    }

    #[test]
    fn test_tick_visibility() {
        let mut session = ChatSession::new("A", Theme::Light);
        let mut view = FakeView::new(200.0);
        session.apply_snapshot(conversation(1..=10), &mut view);

        assert!(!session.tick_visibility(&mut view));
        assert!(!view.jump_visible);

        view.offset = 0.0;
        assert!(session.tick_visibility(&mut view));
        assert!(view.jump_visible);

        session.jump_to_bottom(&mut view);
        assert!(!view.jump_visible);
        assert!(!session.tick_visibility(&mut view));
    }

    #[test]
    fn test_toggle_theme_rerenders_without_animation() {
        let mut session = ChatSession::new("A", Theme::Light);
        let mut view = FakeView::new(200.0);
        session.apply_snapshot(conversation(1..=3), &mut view);
        let renders = view.renders;

        assert_eq!(session.toggle_theme(&mut view), Theme::Dark);
        assert_eq!(session.theme(), Theme::Dark);
        assert_eq!(view.renders, renders + 1);
        assert!(view.animated_ids().is_empty());
    }
}
