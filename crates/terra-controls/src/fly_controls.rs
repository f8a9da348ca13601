//! Fly controls: drag-to-look preview, keyboard movement and per-frame
//! integration into a camera transform.
//!
//! # Ownership
//!
//! The controls own two transforms. The *camera* receives translation and
//! rotation during [`FlyControls::update`]. The *look target* is a preview
//! proxy: while a drag is active its Euler rotation is written absolutely
//! from the drag delta, and on release that rotation is folded back into
//! the accumulated rotation vector that `update` integrates into the camera.
//!
//! # Lifecycle
//!
//! [`FlyControls::new`] subscribes to press, move, release and context-menu
//! events on the viewport and returns the controls behind
//! `Rc<RefCell<_>>`. [`FlyControls::dispose`] removes those subscriptions.
//! Host code must not hold a borrow of the controls while dispatching events
//! through the viewport.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::{Quat, Vec2, Vec3};
use tracing::{debug, trace, warn};
use winit::event::ElementState;
use winit::keyboard::PhysicalKey;

use crate::keybindings::KeyBindings;
use crate::move_state::{MoveFlag, MoveState, movement_vector, rotation_intent};
use crate::object3d::Object3D;
use crate::pose::{Pose, PoseChanged, PoseListener, PoseListeners};
use crate::viewport::{
    EventResponse, ListenerId, PointerEvent, PointerEventKind, PointerListener, SizeProvider,
    Viewport,
};

/// Default translation scale per second.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 1.0;
/// Default rotation scale per second.
pub const DEFAULT_ROLL_SPEED: f32 = 0.005;

/// Where the controls receive pointer events from.
pub enum ViewportBinding {
    /// An explicit viewport element.
    Element(Rc<Viewport>),
    /// Document-wide fallback sized by the given provider. Supported for
    /// compatibility; logs a warning.
    Document(Rc<dyn SizeProvider>),
}

/// In-progress pointer drag bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    /// Whether a drag gesture is in progress.
    pub active: bool,
    /// Pointer position at the last press (or release).
    pub anchor: Vec2,
}

/// Fly camera controller.
pub struct FlyControls {
    /// Translation scale per second.
    pub movement_speed: f32,
    /// Rotation scale per second.
    pub roll_speed: f32,
    /// When set, rotation is integrated only while a drag is active.
    pub drag_to_look: bool,
    /// When set, move forward unless back is held.
    pub auto_forward: bool,

    camera: Object3D,
    look_target: Object3D,
    viewport: Rc<Viewport>,
    subscriptions: Vec<ListenerId>,
    bindings: KeyBindings,

    move_state: MoveState,
    move_vector: Vec3,
    rotation_vector: Vec3,
    key_rotation: Vec3,
    drag: DragState,

    last_pose: Pose,
    pose_listeners: PoseListeners,
}

impl std::fmt::Debug for FlyControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlyControls")
            .field("movement_speed", &self.movement_speed)
            .field("roll_speed", &self.roll_speed)
            .field("drag_to_look", &self.drag_to_look)
            .field("auto_forward", &self.auto_forward)
            .field("camera", &self.camera)
            .field("move_vector", &self.move_vector)
            .field("rotation_vector", &self.rotation_vector)
            .field("drag", &self.drag)
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl FlyControls {
    /// Creates the controls and attaches them to the viewport.
    pub fn new(
        camera: Object3D,
        look_target: Object3D,
        binding: ViewportBinding,
    ) -> Rc<RefCell<Self>> {
        let viewport = match binding {
            ViewportBinding::Element(viewport) => viewport,
            ViewportBinding::Document(provider) => {
                warn!("no viewport element given; falling back to a document-wide target");
                Rc::new(Viewport::document(provider))
            }
        };

        let last_pose = camera.pose();
        let controls = Rc::new(RefCell::new(Self {
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            roll_speed: DEFAULT_ROLL_SPEED,
            drag_to_look: false,
            auto_forward: false,
            camera,
            look_target,
            viewport: Rc::clone(&viewport),
            subscriptions: Vec::new(),
            bindings: KeyBindings::default(),
            move_state: MoveState::new(),
            move_vector: Vec3::ZERO,
            rotation_vector: Vec3::ZERO,
            key_rotation: Vec3::ZERO,
            drag: DragState::default(),
            last_pose,
            pose_listeners: PoseListeners::default(),
        }));

        let subscriptions: Vec<ListenerId> = [
            PointerEventKind::ContextMenu,
            PointerEventKind::Move,
            PointerEventKind::Press,
            PointerEventKind::Release,
        ]
        .into_iter()
        .map(|kind| {
            let listener = Rc::downgrade(&controls) as Weak<RefCell<dyn PointerListener>>;
            viewport.add_listener(kind, listener)
        })
        .collect();

        {
            let mut this = controls.borrow_mut();
            this.subscriptions = subscriptions;
            this.update_movement_vector();
            this.update_rotation_vector();
            debug!(
                position = ?this.camera.position(),
                document = viewport.is_document(),
                "fly controls attached"
            );
        }
        controls
    }

    // ── Configuration ───────────────────────────────────────────────

    /// Sets `auto_forward` and recomputes the movement vector.
    pub fn set_auto_forward(&mut self, auto_forward: bool) {
        self.auto_forward = auto_forward;
        self.update_movement_vector();
    }

    // ── Pointer input ───────────────────────────────────────────────

    /// Starts (or re-anchors) a drag gesture.
    pub fn on_pointer_down(&mut self, position: Vec2) {
        if self.drag.active {
            trace!(?position, "drag re-anchored");
        } else {
            trace!(?position, "drag started");
        }
        self.drag.active = true;
        self.drag.anchor = position;
    }

    /// Writes the live look preview onto the look target while dragging.
    pub fn on_pointer_move(&mut self, position: Vec2) {
        if !self.drag.active {
            return;
        }
        let half = self.viewport.offset_size() * 0.5;
        if half.x == 0.0 || half.y == 0.0 {
            trace!("zero-area viewport, drag move ignored");
            return;
        }

        let yaw = -(position.x - self.drag.anchor.x) / half.x;
        let pitch = (position.y - self.drag.anchor.y) / half.y;

        let mut rotation = self.look_target.rotation();
        rotation.x = self.rotation_vector.x + pitch;
        rotation.y = self.rotation_vector.y + yaw;
        self.look_target.set_rotation(rotation);
    }

    /// Ends the drag and folds the previewed rotation into the
    /// accumulated rotation vector.
    pub fn on_pointer_up(&mut self, position: Vec2) {
        self.drag.active = false;

        let rotation = self.look_target.rotation();
        self.rotation_vector.x = rotation.x;
        self.rotation_vector.y = rotation.y;

        self.drag.anchor = position;
        trace!(rotation_vector = ?self.rotation_vector, "drag ended");
    }

    // ── Keyboard input ──────────────────────────────────────────────

    /// Applies a physical key transition. Returns `true` if the key is bound.
    pub fn on_key(&mut self, key: PhysicalKey, state: ElementState) -> bool {
        let Some(flag) = self.bindings.flag_for(key) else {
            return false;
        };
        self.set_move_flag(flag, state == ElementState::Pressed);
        true
    }

    /// Sets one intent flag and recomputes the derived vectors.
    pub fn set_move_flag(&mut self, flag: MoveFlag, on: bool) {
        if !self.move_state.set(flag, on) {
            return;
        }
        if flag.is_translation() {
            self.update_movement_vector();
        } else {
            self.update_rotation_vector();
        }
    }

    /// Releases every held flag, e.g. when the window loses focus.
    pub fn reset_input(&mut self) {
        self.move_state.clear();
        self.update_movement_vector();
        self.update_rotation_vector();
    }

    /// Recomputes the translation intent from the move state.
    pub fn update_movement_vector(&mut self) {
        self.move_vector = movement_vector(&self.move_state, self.auto_forward);
    }

    /// Recomputes the key-driven rotation intent from the move state.
    pub fn update_rotation_vector(&mut self) {
        self.key_rotation = rotation_intent(&self.move_state);
    }

    // ── Integration ─────────────────────────────────────────────────

    /// Integrates one frame of movement and rotation into the camera.
    ///
    /// `delta` is the elapsed time in seconds; negative and NaN values are
    /// treated as zero. Returns the notification emitted this frame, if the
    /// pose moved past the threshold.
    pub fn update(&mut self, delta: f32) -> Option<PoseChanged> {
        let delta = if delta > 0.0 { delta } else { 0.0 };
        let move_mult = delta * self.movement_speed;
        let rot_mult = delta * self.roll_speed;

        self.camera.translate_x(self.move_vector.x * move_mult);
        self.camera.translate_y(self.move_vector.y * move_mult);
        self.camera.translate_z(self.move_vector.z * move_mult);

        if !self.drag_to_look || self.drag.active {
            let r = self.rotation_vector + self.key_rotation;
            let step =
                Quat::from_xyzw(r.x * rot_mult, r.y * rot_mult, r.z * rot_mult, 1.0).normalize();
            self.camera.rotate_local(step);
        }

        let pose = self.camera.pose();
        if !self.last_pose.differs_from(&pose) {
            return None;
        }
        self.last_pose = pose;
        let event = PoseChanged { pose };
        trace!(position = ?pose.position, "pose changed");
        self.pose_listeners.emit(&event);
        Some(event)
    }

    // ── Notification ────────────────────────────────────────────────

    /// Subscribes to pose-change notifications.
    ///
    /// Listeners run synchronously inside [`update`](Self::update) and must
    /// not borrow the controls.
    pub fn add_pose_listener(&mut self, listener: PoseListener) -> ListenerId {
        self.pose_listeners.add(listener)
    }

    pub fn remove_pose_listener(&mut self, id: ListenerId) -> bool {
        self.pose_listeners.remove(id)
    }

    // ── Teardown ────────────────────────────────────────────────────

    /// Detaches every viewport subscription.
    pub fn dispose(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        for id in self.subscriptions.drain(..) {
            self.viewport.remove_listener(id);
        }
        debug!("fly controls disposed");
    }

    /// Whether the viewport subscriptions are still in place.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    // ── Queries ─────────────────────────────────────────────────────

    #[must_use]
    pub fn camera(&self) -> &Object3D {
        &self.camera
    }

    #[must_use]
    pub fn look_target(&self) -> &Object3D {
        &self.look_target
    }

    #[must_use]
    pub fn viewport(&self) -> &Rc<Viewport> {
        &self.viewport
    }

    #[must_use]
    pub fn move_state(&self) -> &MoveState {
        &self.move_state
    }

    #[must_use]
    pub fn move_vector(&self) -> Vec3 {
        self.move_vector
    }

    /// Drag-accumulated rotation intent (pitch, yaw, roll).
    #[must_use]
    pub fn rotation_vector(&self) -> Vec3 {
        self.rotation_vector
    }

    /// Key-driven rotation intent (pitch, yaw, roll).
    #[must_use]
    pub fn key_rotation(&self) -> Vec3 {
        self.key_rotation
    }

    #[must_use]
    pub fn drag(&self) -> DragState {
        self.drag
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Pose recorded at the last notification (or at construction).
    #[must_use]
    pub fn last_pose(&self) -> Pose {
        self.last_pose
    }
}

impl PointerListener for FlyControls {
    fn handle_pointer(&mut self, event: &PointerEvent) -> EventResponse {
        match event.kind {
            PointerEventKind::Press => self.on_pointer_down(event.position),
            PointerEventKind::Move => self.on_pointer_move(event.position),
            PointerEventKind::Release => self.on_pointer_up(event.position),
            PointerEventKind::ContextMenu => return EventResponse::PreventDefault,
        }
        EventResponse::Continue
    }
}
