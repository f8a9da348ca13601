//! Viewport element: pointer event target and drag-normalization reference.
//!
//! A [`Viewport`] is the element the controls attach to. It answers its
//! current size and routes [`PointerEvent`]s to registered
//! [`PointerListener`]s. Listeners are held weakly: a dropped listener is
//! pruned on the next dispatch instead of keeping its owner alive.
//!
//! When no element exists the viewport can fall back to a document-wide
//! target whose size comes from an injected [`SizeProvider`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use glam::Vec2;
use tracing::warn;

/// Capability to query the current size of a drawing surface.
pub trait SizeProvider {
    /// Width and height in logical pixels.
    fn current_size(&self) -> Vec2;
}

/// A size provider that always answers the same size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSize(pub Vec2);

impl SizeProvider for FixedSize {
    fn current_size(&self) -> Vec2 {
        self.0
    }
}

/// Pointer event categories a listener can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Press,
    Move,
    Release,
    ContextMenu,
}

/// A pointer event in viewport-relative coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Vec2,
}

impl PointerEvent {
    #[must_use]
    pub fn press(x: f32, y: f32) -> Self {
        Self {
            kind: PointerEventKind::Press,
            position: Vec2::new(x, y),
        }
    }

    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: PointerEventKind::Move,
            position: Vec2::new(x, y),
        }
    }

    #[must_use]
    pub fn release(x: f32, y: f32) -> Self {
        Self {
            kind: PointerEventKind::Release,
            position: Vec2::new(x, y),
        }
    }

    #[must_use]
    pub fn context_menu(x: f32, y: f32) -> Self {
        Self {
            kind: PointerEventKind::ContextMenu,
            position: Vec2::new(x, y),
        }
    }
}

/// What a listener asks the event source to do after handling an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventResponse {
    /// Let the platform's default action run.
    #[default]
    Continue,
    /// Suppress the platform's default action (e.g. the context menu).
    PreventDefault,
}

impl EventResponse {
    fn merge(self, other: EventResponse) -> EventResponse {
        if self == EventResponse::PreventDefault || other == EventResponse::PreventDefault {
            EventResponse::PreventDefault
        } else {
            EventResponse::Continue
        }
    }
}

/// Receiver of pointer events dispatched by a [`Viewport`].
pub trait PointerListener {
    fn handle_pointer(&mut self, event: &PointerEvent) -> EventResponse;
}

/// Handle returned when registering a listener; used to unregister it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

struct Registration {
    id: ListenerId,
    kind: PointerEventKind,
    listener: Weak<RefCell<dyn PointerListener>>,
}

enum SizeSource {
    /// An element with its own offset size, updated on resize.
    Element(Cell<Vec2>),
    /// The whole document; size comes from the injected provider.
    Document(Rc<dyn SizeProvider>),
}

/// Event target and size reference for pointer-driven controls.
pub struct Viewport {
    size: SizeSource,
    listeners: RefCell<Vec<Registration>>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("document", &self.is_document())
            .field("size", &self.offset_size())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Viewport {
    /// A viewport element with the given offset size.
    #[must_use]
    pub fn element(width: f32, height: f32) -> Self {
        Self::with_source(SizeSource::Element(Cell::new(Vec2::new(width, height))))
    }

    /// A document-wide viewport sized by `provider`.
    #[must_use]
    pub fn document(provider: Rc<dyn SizeProvider>) -> Self {
        Self::with_source(SizeSource::Document(provider))
    }

    fn with_source(size: SizeSource) -> Self {
        Self {
            size,
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Whether this is the document-wide fallback target.
    #[must_use]
    pub fn is_document(&self) -> bool {
        matches!(self.size, SizeSource::Document(_))
    }

    /// Current width and height of the viewport.
    #[must_use]
    pub fn offset_size(&self) -> Vec2 {
        match &self.size {
            SizeSource::Element(size) => size.get(),
            SizeSource::Document(provider) => provider.current_size(),
        }
    }

    /// Updates an element's offset size. Ignored for the document fallback,
    /// whose size always tracks its provider.
    pub fn set_offset_size(&self, width: f32, height: f32) {
        match &self.size {
            SizeSource::Element(size) => size.set(Vec2::new(width, height)),
            SizeSource::Document(_) => {
                warn!("set_offset_size ignored on document viewport");
            }
        }
    }

    /// Subscribes `listener` to events of `kind`.
    pub fn add_listener(
        &self,
        kind: PointerEventKind,
        listener: Weak<RefCell<dyn PointerListener>>,
    ) -> ListenerId {
        let id = ListenerId::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners.borrow_mut().push(Registration { id, kind, listener });
        id
    }

    /// Unsubscribes a listener. Returns `false` if the handle was unknown.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|r| r.id != id);
        listeners.len() != before
    }

    /// Number of registered listeners, including ones whose owner has been
    /// dropped but not yet pruned.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Delivers `event` to every live listener subscribed to its kind.
    ///
    /// The listener table is not borrowed while listeners run, so a listener
    /// may add or remove registrations. A listener that is already borrowed
    /// (re-entrant dispatch) is skipped.
    pub fn dispatch(&self, event: &PointerEvent) -> EventResponse {
        let targets: Vec<Rc<RefCell<dyn PointerListener>>> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|r| r.listener.strong_count() > 0);
            listeners
                .iter()
                .filter(|r| r.kind == event.kind)
                .filter_map(|r| r.listener.upgrade())
                .collect()
        };

        let mut response = EventResponse::Continue;
        for target in targets {
            match target.try_borrow_mut() {
                Ok(mut listener) => {
                    response = response.merge(listener.handle_pointer(event));
                }
                Err(_) => {
                    warn!(kind = ?event.kind, "pointer listener busy, event skipped");
                }
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<PointerEventKind>,
        prevent: bool,
    }

    impl PointerListener for Recorder {
        fn handle_pointer(&mut self, event: &PointerEvent) -> EventResponse {
            self.seen.push(event.kind);
            if self.prevent {
                EventResponse::PreventDefault
            } else {
                EventResponse::Continue
            }
        }
    }

    fn subscribe(viewport: &Viewport, rec: &Rc<RefCell<Recorder>>, kind: PointerEventKind) -> ListenerId {
        let weak: Weak<RefCell<dyn PointerListener>> = Rc::downgrade(rec) as Weak<RefCell<dyn PointerListener>>;
        viewport.add_listener(kind, weak)
    }

    #[test]
    fn test_element_size_is_mutable() {
        let viewport = Viewport::element(800.0, 600.0);
        assert_eq!(viewport.offset_size(), Vec2::new(800.0, 600.0));
        viewport.set_offset_size(1024.0, 768.0);
        assert_eq!(viewport.offset_size(), Vec2::new(1024.0, 768.0));
        assert!(!viewport.is_document());
    }

    #[test]
    fn test_document_size_tracks_provider() {
        let viewport = Viewport::document(Rc::new(FixedSize(Vec2::new(1920.0, 1080.0))));
        assert!(viewport.is_document());
        viewport.set_offset_size(1.0, 1.0);
        assert_eq!(viewport.offset_size(), Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let viewport = Viewport::element(100.0, 100.0);
        let rec = Rc::new(RefCell::new(Recorder::default()));
        subscribe(&viewport, &rec, PointerEventKind::Press);

        viewport.dispatch(&PointerEvent::moved(1.0, 1.0));
        viewport.dispatch(&PointerEvent::press(1.0, 1.0));
        assert_eq!(rec.borrow().seen, vec![PointerEventKind::Press]);
    }

    #[test]
    fn test_removed_listener_receives_nothing() {
        let viewport = Viewport::element(100.0, 100.0);
        let rec = Rc::new(RefCell::new(Recorder::default()));
        let id = subscribe(&viewport, &rec, PointerEventKind::Release);
        assert!(viewport.remove_listener(id));
        assert!(!viewport.remove_listener(id));
        viewport.dispatch(&PointerEvent::release(0.0, 0.0));
        assert!(rec.borrow().seen.is_empty());
    }

    #[test]
    fn test_dropped_listener_is_pruned() {
        let viewport = Viewport::element(100.0, 100.0);
        {
            let rec = Rc::new(RefCell::new(Recorder::default()));
            subscribe(&viewport, &rec, PointerEventKind::Move);
            assert_eq!(viewport.listener_count(), 1);
        }
        viewport.dispatch(&PointerEvent::moved(0.0, 0.0));
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_prevent_default_wins() {
        let viewport = Viewport::element(100.0, 100.0);
        let quiet = Rc::new(RefCell::new(Recorder::default()));
        let loud = Rc::new(RefCell::new(Recorder {
            prevent: true,
            ..Default::default()
        }));
        subscribe(&viewport, &quiet, PointerEventKind::ContextMenu);
        subscribe(&viewport, &loud, PointerEventKind::ContextMenu);
        let response = viewport.dispatch(&PointerEvent::context_menu(5.0, 5.0));
        assert_eq!(response, EventResponse::PreventDefault);
    }

    #[test]
    fn test_busy_listener_is_skipped() {
        let viewport = Viewport::element(100.0, 100.0);
        let rec = Rc::new(RefCell::new(Recorder::default()));
        subscribe(&viewport, &rec, PointerEventKind::Press);
        let guard = rec.borrow_mut();
        let response = viewport.dispatch(&PointerEvent::press(0.0, 0.0));
        drop(guard);
        assert_eq!(response, EventResponse::Continue);
        assert!(rec.borrow().seen.is_empty());
    }
}
