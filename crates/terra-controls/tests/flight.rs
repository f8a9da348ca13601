//! End-to-end behaviour of the fly controls: input through the viewport,
//! integration through `update`, and pose-change notification.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};
use terra_controls::{
    FlyControls, MoveFlag, Object3D, PointerEvent, PoseChanged, Viewport, ViewportBinding,
};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

fn setup(camera: Object3D) -> (Rc<Viewport>, Rc<RefCell<FlyControls>>) {
    let viewport = Rc::new(Viewport::element(WIDTH, HEIGHT));
    let controls = FlyControls::new(
        camera,
        Object3D::new(),
        ViewportBinding::Element(Rc::clone(&viewport)),
    );
    (viewport, controls)
}

fn count_notifications(controls: &Rc<RefCell<FlyControls>>) -> Rc<Cell<u32>> {
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    controls
        .borrow_mut()
        .add_pose_listener(Box::new(move |_: &PoseChanged| counter.set(counter.get() + 1)));
    hits
}

#[test]
fn translation_equals_move_vector_times_speed_times_delta() {
    let (_viewport, controls) = setup(Object3D::new());
    let mut c = controls.borrow_mut();
    c.movement_speed = 12.5;
    c.set_move_flag(MoveFlag::Forward, true);
    c.set_move_flag(MoveFlag::Right, true);
    c.set_move_flag(MoveFlag::Up, true);

    let delta = 0.2;
    let expected = c.move_vector() * c.movement_speed * delta;
    c.update(delta);

    let p = c.camera().position();
    assert!(p.abs_diff_eq(expected, 1e-5), "got {p}, expected {expected}");
    assert!(p.abs_diff_eq(Vec3::new(2.5, 2.5, -2.5), 1e-5));
}

#[test]
fn translation_accumulates_over_frames() {
    let (_viewport, controls) = setup(Object3D::at(Vec3::new(0.0, 0.0, 100.0)));
    let mut c = controls.borrow_mut();
    c.movement_speed = 60.0;
    c.set_move_flag(MoveFlag::Forward, true);
    for _ in 0..60 {
        c.update(1.0 / 60.0);
    }
    assert!((c.camera().position().z - 40.0).abs() < 1e-3);
}

#[test]
fn update_zero_is_a_no_op() {
    let start = Object3D::at(Vec3::new(0.0, 0.0, 31_855.0));
    let (viewport, controls) = setup(start.clone());
    let hits = count_notifications(&controls);

    viewport.dispatch(&PointerEvent::press(100.0, 100.0));
    viewport.dispatch(&PointerEvent::moved(300.0, 250.0));
    viewport.dispatch(&PointerEvent::release(300.0, 250.0));
    controls.borrow_mut().set_move_flag(MoveFlag::Back, true);

    let mut c = controls.borrow_mut();
    for _ in 0..10 {
        assert!(c.update(0.0).is_none());
    }
    assert_eq!(c.camera().position(), start.position());
    assert_eq!(c.camera().quaternion(), start.quaternion());
    drop(c);
    assert_eq!(hits.get(), 0);
}

#[test]
fn drag_round_trip_maps_half_width_to_unit_yaw() {
    let (viewport, controls) = setup(Object3D::new());
    let half_width = WIDTH / 2.0;

    viewport.dispatch(&PointerEvent::press(100.0, 100.0));
    viewport.dispatch(&PointerEvent::moved(100.0 + half_width, 100.0));
    {
        let c = controls.borrow();
        let preview = c.look_target().rotation();
        assert_eq!(preview.y, -1.0);
        assert_eq!(preview.x, 0.0);
        assert_eq!(c.rotation_vector(), Vec3::ZERO);
    }

    viewport.dispatch(&PointerEvent::release(100.0 + half_width, 100.0));
    let c = controls.borrow();
    assert!(!c.is_dragging());
    assert_eq!(c.rotation_vector().y, -1.0);
    assert_eq!(c.rotation_vector().x, 0.0);
    assert_eq!(c.drag().anchor, Vec2::new(100.0 + half_width, 100.0));
}

#[test]
fn second_gesture_composes_on_the_first() {
    let (viewport, controls) = setup(Object3D::new());
    viewport.dispatch(&PointerEvent::press(0.0, 0.0));
    viewport.dispatch(&PointerEvent::moved(-200.0, 0.0));
    viewport.dispatch(&PointerEvent::release(-200.0, 0.0));
    assert_eq!(controls.borrow().rotation_vector().y, 0.5);

    viewport.dispatch(&PointerEvent::press(0.0, 0.0));
    viewport.dispatch(&PointerEvent::moved(-200.0, 150.0));
    viewport.dispatch(&PointerEvent::release(-200.0, 150.0));
    let r = controls.borrow().rotation_vector();
    assert!((r.y - 1.0).abs() < 1e-6);
    assert!((r.x - 0.5).abs() < 1e-6);
}

#[test]
fn rotation_vector_is_integrated_into_the_camera() {
    let (viewport, controls) = setup(Object3D::new());
    viewport.dispatch(&PointerEvent::press(0.0, 0.0));
    viewport.dispatch(&PointerEvent::moved(400.0, 0.0));
    viewport.dispatch(&PointerEvent::release(400.0, 0.0));

    let mut c = controls.borrow_mut();
    c.roll_speed = 0.5;
    assert!(c.update(0.1).is_some());
    let expected = Quat::from_xyzw(0.0, -0.05, 0.0, 1.0).normalize();
    assert!(c.camera().quaternion().abs_diff_eq(expected, 1e-6));
    // The preview target is not driven by integration.
    assert_eq!(c.look_target().rotation().y, -1.0);
}

#[test]
fn stationary_camera_emits_no_notifications() {
    let (_viewport, controls) = setup(Object3D::at(Vec3::new(0.0, 0.0, 31_855.0)));
    let hits = count_notifications(&controls);
    for _ in 0..1000 {
        controls.borrow_mut().update(1.0 / 60.0);
    }
    assert_eq!(hits.get(), 0);
}

#[test]
fn moving_camera_notifies_once_per_frame() {
    let (_viewport, controls) = setup(Object3D::new());
    let hits = count_notifications(&controls);
    {
        let mut c = controls.borrow_mut();
        c.movement_speed = 1000.0;
        c.set_auto_forward(true);
    }
    for frame in 1..=30 {
        let event = controls.borrow_mut().update(1.0 / 60.0);
        assert!(event.is_some());
        assert_eq!(hits.get(), frame);
    }
    let last = controls.borrow().last_pose();
    assert_eq!(last.position, controls.borrow().camera().position());
}

#[test]
fn sub_threshold_motion_accumulates_until_it_notifies() {
    let (_viewport, controls) = setup(Object3D::new());
    let hits = count_notifications(&controls);
    let mut c = controls.borrow_mut();
    c.movement_speed = 0.024;
    c.set_move_flag(MoveFlag::Right, true);

    // 0.0004 units per frame: the squared displacement stays below 1e-6 for
    // two frames (6.4e-7) and crosses it on the third (1.44e-6).
    assert!(c.update(1.0 / 60.0).is_none());
    assert!(c.update(1.0 / 60.0).is_none());
    assert!(c.update(1.0 / 60.0).is_some());
    assert!(c.update(1.0 / 60.0).is_none());
    drop(c);
    assert_eq!(hits.get(), 1);
}

#[test]
fn press_while_dragging_reanchors_without_folding() {
    let (viewport, controls) = setup(Object3D::new());
    viewport.dispatch(&PointerEvent::press(100.0, 100.0));
    viewport.dispatch(&PointerEvent::moved(300.0, 100.0));
    viewport.dispatch(&PointerEvent::press(500.0, 400.0));

    {
        let c = controls.borrow();
        assert!(c.is_dragging());
        assert_eq!(c.drag().anchor, Vec2::new(500.0, 400.0));
        assert_eq!(c.rotation_vector(), Vec3::ZERO);
    }

    viewport.dispatch(&PointerEvent::moved(500.0, 400.0));
    assert_eq!(controls.borrow().look_target().rotation().y, 0.0);
}

#[test]
fn disposed_controls_ignore_viewport_events() {
    let (viewport, controls) = setup(Object3D::new());
    controls.borrow_mut().dispose();
    assert_eq!(viewport.listener_count(), 0);

    viewport.dispatch(&PointerEvent::press(10.0, 10.0));
    viewport.dispatch(&PointerEvent::moved(600.0, 500.0));
    viewport.dispatch(&PointerEvent::release(600.0, 500.0));
    let response = viewport.dispatch(&PointerEvent::context_menu(0.0, 0.0));

    let c = controls.borrow();
    assert!(!c.is_dragging());
    assert_eq!(c.rotation_vector(), Vec3::ZERO);
    assert_eq!(c.look_target().rotation().y, 0.0);
    assert_eq!(response, terra_controls::EventResponse::Continue);
}

#[test]
fn unclamped_coordinates_give_large_rotation() {
    let (viewport, controls) = setup(Object3D::new());
    viewport.dispatch(&PointerEvent::press(0.0, 0.0));
    viewport.dispatch(&PointerEvent::moved(-40_000.0, 0.0));
    assert_eq!(controls.borrow().look_target().rotation().y, 100.0);
}

#[test]
fn resized_viewport_changes_drag_normalization() {
    let (viewport, controls) = setup(Object3D::new());
    viewport.set_offset_size(200.0, 100.0);
    viewport.dispatch(&PointerEvent::press(0.0, 0.0));
    viewport.dispatch(&PointerEvent::moved(100.0, 50.0));
    let r = controls.borrow().look_target().rotation();
    assert_eq!(r.y, -1.0);
    assert_eq!(r.x, 1.0);
}
