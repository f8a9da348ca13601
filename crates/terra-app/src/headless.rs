//! Windowless scripted flight.
//!
//! Drives the controls at a fixed 60 Hz with auto-forward engaged, which is
//! enough to exercise the whole update path on machines without a display.

use std::cell::Cell;
use std::rc::Rc;

use terra_config::Config;
use terra_controls::{Pose, PoseChanged, Viewport};
use terra_scene::{FrameUniforms, Scene};
use tracing::info;

use crate::build_controls;
use crate::frame_clock::FixedStep;

/// What a headless run observed.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightReport {
    pub frames: u32,
    pub notifications: u32,
    pub final_pose: Pose,
    /// Uniforms of the last frame flown, or of the start pose for zero frames.
    pub final_uniforms: FrameUniforms,
}

/// Flies `frames` frames from the scene's start pose.
pub fn fly(config: &Config, frames: u32) -> FlightReport {
    let mut scene = Scene::build(config);
    let viewport = Rc::new(Viewport::element(
        config.window.width as f32,
        config.window.height as f32,
    ));

    let mut controls_config = config.controls.clone();
    controls_config.auto_forward = true;
    let controls = build_controls(
        &controls_config,
        scene.camera_start(),
        scene.look_target_start(),
        viewport,
    );

    let notifications = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&notifications);
    controls
        .borrow_mut()
        .add_pose_listener(Box::new(move |_: &PoseChanged| counter.set(counter.get() + 1)));

    let mut step = FixedStep::default();
    for _ in 0..frames {
        let delta = step.delta();
        controls.borrow_mut().update(delta);
        scene.follow_look_target(controls.borrow().look_target());
    }

    let mut c = controls.borrow_mut();
    let final_pose = c.camera().pose();
    let final_uniforms = scene.frame_uniforms(c.camera());
    c.dispose();

    let report = FlightReport {
        frames,
        notifications: notifications.get(),
        final_pose,
        final_uniforms,
    };
    info!(
        frames = report.frames,
        notifications = report.notifications,
        position = ?report.final_pose.position,
        "Headless flight finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_one_second_of_flight() {
        let config = Config::default();
        let report = fly(&config, 60);
        assert_eq!(report.frames, 60);
        assert_eq!(report.notifications, 60);
        let start = 6371.0 * 5.0;
        let travelled = start - report.final_pose.position.z;
        assert!((travelled - 1000.0).abs() < 0.5, "{travelled}");
        assert!(report.final_pose.position.truncate().abs_diff_eq(glam::Vec2::ZERO, 1e-3));
        let p = report.final_pose.position;
        assert_eq!(report.final_uniforms.camera.camera_pos, [p.x, p.y, p.z, 0.0]);
    }

    #[test]
    fn test_zero_frames_stays_put() {
        let report = fly(&Config::default(), 0);
        assert_eq!(report.notifications, 0);
        assert_eq!(report.final_pose.position, Vec3::new(0.0, 0.0, 6371.0 * 5.0));
        assert_eq!(report.final_uniforms.lights.len(), 4);
    }

    #[test]
    fn test_zero_speed_never_notifies() {
        let mut config = Config::default();
        config.controls.movement_speed = 0.0;
        let report = fly(&config, 120);
        assert_eq!(report.notifications, 0);
    }
}
