//! Terra viewer host: window and event loop, frame timing, platform
//! directories and a windowless flight mode.

use std::cell::RefCell;
use std::rc::Rc;

use terra_config::ControlsConfig;
use terra_controls::{FlyControls, Object3D, Viewport, ViewportBinding};

pub mod error;
pub mod frame_clock;
pub mod headless;
pub mod platform;
pub mod startup;
pub mod window;

pub use error::AppError;
pub use startup::StartupConfig;

/// Creates fly controls for `camera` on `viewport`, tuned from `config`.
/// `look_target` is the object a drag turns, normally the planet.
pub fn build_controls(
    config: &ControlsConfig,
    camera: Object3D,
    look_target: Object3D,
    viewport: Rc<Viewport>,
) -> Rc<RefCell<FlyControls>> {
    let controls = FlyControls::new(camera, look_target, ViewportBinding::Element(viewport));
    apply_tuning(&mut controls.borrow_mut(), config);
    controls
}

/// Copies speeds and flags from `config` onto live controls.
pub fn apply_tuning(controls: &mut FlyControls, config: &ControlsConfig) {
    controls.movement_speed = config.movement_speed;
    controls.roll_speed = config.roll_speed;
    controls.drag_to_look = config.drag_to_look;
    controls.set_auto_forward(config.auto_forward);
}
