//! Click-to-focus: pick the body under the pointer, nudge the camera toward
//! it and show its tooltip.

use glam::{Vec2, Vec3};
use orrery_engine::{raycast, EngineContext};

use crate::bodies::Body;
use crate::motion::SimulationState;

#[derive(Debug, Clone, Copy)]
pub struct FocusController {
    /// Distance kept between the framed body and the camera.
    pub standoff: f32,
    /// Fraction of the way the camera moves per click.
    pub lerp_factor: f32,
    /// Tooltip position relative to the click, in pixels.
    pub tooltip_offset: Vec2,
}

impl Default for FocusController {
    fn default() -> Self {
        Self {
            standoff: 50.0,
            lerp_factor: 0.1,
            tooltip_offset: Vec2::new(10.0, -20.0),
        }
    }
}

/// Point `standoff` units in front of `body`, on the line back to `camera`.
pub fn framing_position(body: Vec3, camera: Vec3, standoff: f32) -> Vec3 {
    let toward_body = (body - camera).normalize_or_zero();
    body - toward_body * standoff
}

impl FocusController {
    /// Handle a click at `screen` pixels. Returns the index of the picked
    /// body, or `None` (tooltip hidden, camera untouched) on a miss.
    pub fn on_pointer_click(
        &self,
        screen: Vec2,
        bodies: &[Body],
        sim: &SimulationState,
        ctx: &mut EngineContext,
    ) -> Option<usize> {
        let ray = ctx.camera.ray_from_screen(screen);
        // Orbit indicators have no bounds, but filter to bodies anyway.
        let picked = raycast(&ray, &ctx.scene).into_iter().find_map(|hit| {
            bodies
                .iter()
                .position(|b| b.entity == Some(hit.id))
                .map(|index| (index, hit.id))
        });

        let Some((index, id)) = picked else {
            ctx.overlay.hide();
            return None;
        };
        let Some(target) = ctx.scene.position(id) else {
            ctx.overlay.hide();
            return None;
        };
        let body = &bodies[index];

        let framing = framing_position(target, ctx.camera.position, self.standoff);
        ctx.camera.position = ctx.camera.position.lerp(framing, self.lerp_factor);
        ctx.camera.look_at(target);
        ctx.controls.set_target(target);

        let percent = sim.speed_percent(index).unwrap_or(100.0);
        let anchor = screen + self.tooltip_offset;
        ctx.overlay.show(
            anchor.x,
            anchor.y,
            body.desc.name,
            vec![
                body.desc.description.to_string(),
                format!("Current Speed: {}%", percent.round()),
            ],
        );
        log::debug!("Focused {} at {:?}", body.desc.name, target);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{Color, Entity, MeshComponent, Visual};

    use crate::bodies::{BodyKind, REGISTRY};

    /// Camera at (0, 0, 200) looking down -Z, one sphere of radius 5 at the
    /// origin standing in for Earth.
    fn setup() -> (EngineContext, Vec<Body>, SimulationState) {
        let mut ctx = EngineContext::new();
        ctx.camera.position = Vec3::new(0.0, 0.0, 200.0);
        ctx.camera.look_at(Vec3::ZERO);

        let earth = BodyKind::Earth.index();
        let mut bodies: Vec<Body> = REGISTRY.iter().copied().map(Body::new).collect();
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag("Earth")
                .with_visual(Visual::Mesh(MeshComponent::sphere(5.0, Color::WHITE))),
        );
        bodies[earth].entity = Some(id);
        (ctx, bodies, SimulationState::new(&REGISTRY))
    }

    fn center(ctx: &EngineContext) -> Vec2 {
        ctx.camera.viewport() * 0.5
    }

    #[test]
    fn framing_stands_off_toward_the_camera() {
        let p = framing_position(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO, 50.0);
        assert!((p - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn clicking_a_body_focuses_it() {
        let (mut ctx, bodies, sim) = setup();
        let focus = FocusController::default();
        let click = center(&ctx);

        let picked = focus.on_pointer_click(click, &bodies, &sim, &mut ctx);
        assert_eq!(picked, Some(BodyKind::Earth.index()));

        // Framing point is (0, 0, 50); one 10% step from z = 200.
        assert!((ctx.camera.position - Vec3::new(0.0, 0.0, 185.0)).length() < 1e-3);
        assert_eq!(ctx.camera.target, Vec3::ZERO);
        assert_eq!(ctx.controls.target, Vec3::ZERO);

        assert!(ctx.overlay.visible);
        assert_eq!(ctx.overlay.title, "Earth");
        assert_eq!(ctx.overlay.x, click.x + 10.0);
        assert_eq!(ctx.overlay.y, click.y - 20.0);
        assert_eq!(ctx.overlay.lines[0], REGISTRY[BodyKind::Earth.index()].description);
        assert_eq!(ctx.overlay.lines[1], "Current Speed: 100%");
    }

    #[test]
    fn tooltip_reports_slider_percent() {
        let (mut ctx, bodies, mut sim) = setup();
        sim.set_speed_percent(BodyKind::Earth.index(), 37.0);
        FocusController::default().on_pointer_click(center(&ctx), &bodies, &sim, &mut ctx);
        assert_eq!(ctx.overlay.lines[1], "Current Speed: 37%");
    }

    #[test]
    fn repeated_clicks_keep_closing_in() {
        let (mut ctx, bodies, sim) = setup();
        let focus = FocusController::default();
        let click = center(&ctx);
        focus.on_pointer_click(click, &bodies, &sim, &mut ctx);
        let first = ctx.camera.position.z;
        focus.on_pointer_click(click, &bodies, &sim, &mut ctx);
        assert!(ctx.camera.position.z < first);
        assert!(ctx.camera.position.z > 50.0);
    }

    #[test]
    fn miss_hides_tooltip_and_leaves_camera() {
        let (mut ctx, bodies, sim) = setup();
        let focus = FocusController::default();
        focus.on_pointer_click(center(&ctx), &bodies, &sim, &mut ctx);
        ctx.camera.look_at(Vec3::new(3.0, -2.0, 0.0));
        let position = ctx.camera.position;
        let look_at = ctx.camera.target;
        let target = ctx.controls.target;

        let picked = focus.on_pointer_click(Vec2::new(5.0, 5.0), &bodies, &sim, &mut ctx);
        assert_eq!(picked, None);
        assert!(!ctx.overlay.visible);
        assert_eq!(ctx.camera.position, position);
        assert_eq!(ctx.camera.target, look_at);
        assert_eq!(ctx.controls.target, target);
    }

    #[test]
    fn non_body_entities_are_ignored() {
        let (mut ctx, mut bodies, sim) = setup();
        bodies[BodyKind::Earth.index()].entity = None;
        let picked =
            FocusController::default().on_pointer_click(center(&ctx), &bodies, &sim, &mut ctx);
        assert_eq!(picked, None);
        assert!(!ctx.overlay.visible);
    }
}
