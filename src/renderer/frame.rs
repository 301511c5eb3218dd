//! Builds one frame's triangle list from the story state

use glam::{Mat2, Vec2};

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::compose::Backdrop;
use crate::settings::Settings;
use crate::sim::icons::{CardHeart, FloatingIcon, RisingHeart};
use crate::sim::particles::{AmbientParticle, Star};
use crate::sim::scene::{Layer, card_frame, gift_frame};
use crate::sim::{BurstView, Stage, StageContainer, StoryState};
use crate::with_alpha;

/// Floating bears are drawn faintly behind the copy
const FLOATING_LAYER_OPACITY: f32 = 0.4;
const GIFT_SIZE: f32 = 192.0;
const HEART_SIZE: f32 = 24.0;
const CARD_HEART_SIZE: f32 = 20.0;
const CARD_MAX_WIDTH: f32 = 384.0;
const CARD_HEIGHT: f32 = 440.0;

/// Per-frame drawing context
struct Canvas<'a> {
    viewport: Vec2,
    settings: &'a Settings,
    segments: u32,
}

impl Canvas<'_> {
    fn center(&self) -> Vec2 {
        self.viewport / 2.0
    }

    fn percent(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x / 100.0 * self.viewport.x, y / 100.0 * self.viewport.y)
    }
}

/// Build the full triangle list for the current state, in viewport pixels
pub fn build_frame(state: &StoryState, settings: &Settings, viewport: Vec2) -> Vec<Vertex> {
    let canvas = Canvas {
        viewport,
        settings,
        segments: settings.quality.circle_segments(),
    };

    let mut vertices = Vec::with_capacity(16 * 1024);

    // Backdrop cross-fade
    if let Some(previous) = state.backdrop.previous {
        vertices.extend(backdrop(previous, &canvas));
    }
    let mut current = backdrop(state.backdrop.current, &canvas);
    shapes::fade(&mut current, state.backdrop.progress);
    vertices.extend(current);

    for container in state.containers() {
        let mut batch = stage_vertices(container, state, &canvas);
        let transition = container.transition();
        shapes::scale_about(&mut batch, canvas.center(), transition.scale);
        shapes::fade(&mut batch, transition.opacity);
        vertices.extend(batch);
    }

    vertices
}

fn backdrop(backdrop: Backdrop, canvas: &Canvas) -> Vec<Vertex> {
    let max = canvas.viewport;
    match backdrop {
        Backdrop::Night => shapes::gradient_rect(Vec2::ZERO, max, [colors::NIGHT; 4]),
        Backdrop::Blush => shapes::gradient_rect(
            Vec2::ZERO,
            max,
            [
                colors::BLUSH_PINK,
                colors::BLUSH_WHITE,
                colors::BLUSH_PURPLE,
                colors::BLUSH_WHITE,
            ],
        ),
        Backdrop::Dreamy => {
            let mut v = shapes::gradient_rect(Vec2::ZERO, max, [colors::DREAMY_EDGE; 4]);
            let reach = canvas.viewport.length() * 0.55;
            v.extend(shapes::radial_gradient(
                canvas.center(),
                reach,
                colors::DREAMY_CENTER,
                colors::DREAMY_EDGE,
                48,
            ));
            v
        }
    }
}

fn stage_vertices(container: &StageContainer, state: &StoryState, canvas: &Canvas) -> Vec<Vertex> {
    let elapsed = container.elapsed;
    let mut vertices = Vec::new();

    // The explosion plays on a white sheet
    if container.stage == Stage::MagicalExplosion {
        vertices.extend(shapes::gradient_rect(
            Vec2::ZERO,
            canvas.viewport,
            [colors::EXPLOSION_FLASH; 4],
        ));
    }

    let shaking = container.stage == Stage::NameReveal
        && !container.is_exiting()
        && state.is_shaking()
        && canvas.settings.effective_shake();

    for layer in &container.scene.layers {
        match layer {
            Layer::Sparkles { color, particles } => {
                vertices.extend(sparkles(particles, *color, elapsed, canvas));
            }
            Layer::Starfield(stars) => vertices.extend(starfield(stars, elapsed, canvas)),
            Layer::FloatingIcons(icons) => vertices.extend(floating_icons(icons, elapsed, canvas)),
            Layer::RisingHearts(hearts) => {
                let mut batch = rising_hearts(hearts, elapsed, canvas);
                if shaking {
                    shapes::translate(&mut batch, Vec2::new(0.0, -bounce(elapsed)));
                }
                vertices.extend(batch);
            }
            Layer::GiftBox => vertices.extend(gift_box(elapsed, canvas)),
            Layer::Burst(view) => vertices.extend(burst(view, elapsed, canvas)),
            Layer::MessageCard { hearts } => vertices.extend(message_card(hearts, elapsed, canvas)),
        }
    }

    vertices
}

/// Vertical hop in pixels, one bounce per second
pub fn bounce(elapsed: f32) -> f32 {
    (elapsed * std::f32::consts::PI).sin().abs() * 25.0
}

fn sparkles(particles: &[AmbientParticle], color: [f32; 4], elapsed: f32, canvas: &Canvas) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for p in particles {
        let frame = p.frame(elapsed);
        if frame.opacity <= 0.0 {
            continue;
        }
        let center = canvas.percent(p.x, p.y) + frame.offset;
        let radius = p.size / 2.0 * frame.scale;
        if canvas.settings.quality.glow_enabled() {
            vertices.extend(shapes::glow(
                center,
                p.size * 2.0 * frame.scale,
                with_alpha(color, frame.opacity * 0.5),
                canvas.segments,
            ));
        }
        vertices.extend(shapes::circle(center, radius, with_alpha(color, frame.opacity), canvas.segments));
    }
    vertices
}

fn starfield(stars: &[Star], elapsed: f32, canvas: &Canvas) -> Vec<Vertex> {
    stars
        .iter()
        .filter(|s| s.size > 0.0)
        .flat_map(|s| {
            shapes::circle(
                canvas.percent(s.x, s.y),
                s.size / 2.0,
                with_alpha(colors::STAR, s.opacity(elapsed)),
                canvas.segments / 2,
            )
        })
        .collect()
}

fn floating_icons(icons: &[FloatingIcon], elapsed: f32, canvas: &Canvas) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for icon in icons {
        let frame = icon.frame(elapsed, canvas.viewport);
        if frame.opacity <= 0.0 {
            continue;
        }
        let center = frame.pos + Vec2::splat(icon.size / 2.0);
        vertices.extend(shapes::teddy(
            center,
            icon.size,
            frame.rotation,
            frame.opacity * FLOATING_LAYER_OPACITY,
            canvas.segments,
        ));
    }
    vertices
}

fn rising_hearts(hearts: &[RisingHeart], elapsed: f32, canvas: &Canvas) -> Vec<Vertex> {
    let origin = canvas.center();
    let mut vertices = Vec::new();
    for heart in hearts {
        let frame = heart.frame(elapsed);
        if frame.opacity <= 0.0 {
            continue;
        }
        vertices.extend(shapes::heart(
            origin + frame.pos,
            HEART_SIZE,
            frame.rotation,
            with_alpha(colors::HEART, frame.opacity),
            canvas.segments,
        ));
    }
    vertices
}

fn gift_box(elapsed: f32, canvas: &Canvas) -> Vec<Vertex> {
    let mut frame = gift_frame(elapsed);
    if !canvas.settings.effective_wobble() {
        frame.rotation = 0.0;
        frame.lift = 0.0;
    }
    let half = Vec2::splat(GIFT_SIZE / 2.0);
    let center = canvas.center() + Vec2::new(0.0, -60.0 + frame.lift);
    let rot = Mat2::from_angle(frame.rotation);

    let mut vertices = shapes::rotated_rect(
        center,
        half * 1.25,
        frame.rotation,
        with_alpha(colors::GIFT_HALO, frame.halo_opacity),
    );
    vertices.extend(shapes::rotated_rect(center, half, frame.rotation, colors::GIFT_BOX));
    vertices.extend(shapes::rotated_rect(
        center,
        Vec2::new(half.x, 16.0),
        frame.rotation,
        colors::GIFT_RIBBON,
    ));
    vertices.extend(shapes::rotated_rect(
        center,
        Vec2::new(16.0, half.y),
        frame.rotation,
        colors::GIFT_RIBBON,
    ));
    let bow = center + rot * Vec2::new(0.0, -half.y);
    vertices.extend(shapes::circle(bow, 34.0, colors::GIFT_RIBBON, canvas.segments));
    vertices.extend(shapes::circle(bow, 32.0, colors::GIFT_BOW, canvas.segments));
    vertices.extend(shapes::heart(bow, 28.0, frame.rotation, colors::GIFT_BOX, canvas.segments));
    vertices
}

fn burst(view: &BurstView, elapsed: f32, canvas: &Canvas) -> Vec<Vertex> {
    let origin = canvas.center();
    let mut vertices = Vec::new();

    let glow = view.glow(elapsed);
    if glow.opacity > 0.0 {
        vertices.extend(shapes::circle(
            origin,
            glow.radius,
            with_alpha(colors::GLOW, glow.opacity),
            48,
        ));
    }

    for ray in view.rays(elapsed) {
        if ray.opacity > 0.0 {
            vertices.extend(shapes::ray(
                origin,
                ray.angle,
                ray.length,
                1.5,
                with_alpha(colors::RAY, ray.opacity),
            ));
        }
    }

    for p in &view.particles {
        let frame = p.frame(elapsed);
        if frame.opacity <= 0.0 || frame.scale <= 0.0 {
            continue;
        }
        let center = origin + frame.offset;
        if canvas.settings.quality.glow_enabled() {
            vertices.extend(shapes::glow(
                center,
                (p.size / 2.0 + 10.0) * frame.scale,
                with_alpha(p.color, frame.opacity * 0.6),
                canvas.segments,
            ));
        }
        vertices.extend(shapes::circle(
            center,
            p.size / 2.0 * frame.scale,
            with_alpha(p.color, frame.opacity),
            canvas.segments,
        ));
    }

    vertices
}

fn message_card(hearts: &[CardHeart], elapsed: f32, canvas: &Canvas) -> Vec<Vertex> {
    let frame = card_frame(elapsed);
    let width = (canvas.viewport.x * 0.9).min(CARD_MAX_WIDTH);
    let center = canvas.center();
    let min = center - Vec2::new(width, CARD_HEIGHT) / 2.0;
    let max = center + Vec2::new(width, CARD_HEIGHT) / 2.0;

    let mut vertices = shapes::rounded_rect(min - 1.0, max + 1.0, 25.0, colors::CARD_BORDER, canvas.segments);
    vertices.extend(shapes::rounded_rect(min, max, 24.0, colors::CARD, canvas.segments));
    vertices.extend(shapes::glow(
        min + Vec2::new(64.0, 48.0),
        48.0,
        with_alpha(colors::NAME_GLOW, frame.name_glow),
        canvas.segments,
    ));

    for heart in hearts {
        let h = heart.frame(elapsed);
        let pos = min + Vec2::new(h.pos.x / 100.0 * width, h.pos.y / 100.0 * CARD_HEIGHT);
        vertices.extend(shapes::heart(
            pos,
            CARD_HEART_SIZE * h.scale,
            h.rotation,
            with_alpha(colors::CARD_HEART, h.opacity),
            canvas.segments,
        ));
    }

    shapes::translate(&mut vertices, Vec2::new(0.0, frame.offset_y));
    shapes::fade(&mut vertices, frame.opacity);
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{TickInput, tick};

    const VIEWPORT: Vec2 = Vec2::new(390.0, 844.0);

    fn tap(state: &mut StoryState) {
        let input = TickInput {
            tap: true,
            ..Default::default()
        };
        tick(state, &input, SIM_DT);
    }

    fn idle(state: &mut StoryState, ticks: u32) {
        for _ in 0..ticks {
            tick(state, &TickInput::default(), SIM_DT);
        }
    }

    #[test]
    fn test_every_stage_draws() {
        let settings = Settings::default();
        let mut state = StoryState::new(10);
        idle(&mut state, 240);
        for _ in 0..6 {
            let frame = build_frame(&state, &settings, VIEWPORT);
            assert!(!frame.is_empty(), "{:?} drew nothing", state.stage());
            assert_eq!(frame.len() % 3, 0);
            tap(&mut state);
            idle(&mut state, 400);
        }
        assert_eq!(state.stage(), Stage::DreamyEnding);
    }

    #[test]
    fn test_all_vertices_finite() {
        let settings = Settings::default();
        let mut state = StoryState::new(4);
        for _ in 0..4 {
            tap(&mut state);
        }
        idle(&mut state, 60);
        let frame = build_frame(&state, &settings, VIEWPORT);
        assert!(frame.iter().all(|v| v.position.iter().all(|c| c.is_finite())));
        assert!(frame.iter().all(|v| (0.0..=1.0).contains(&v.color[3])));
    }

    #[test]
    fn test_low_quality_draws_less() {
        let mut state = StoryState::new(4);
        idle(&mut state, 240);
        let low = Settings {
            quality: crate::QualityPreset::Low,
            ..Default::default()
        };
        let high = Settings {
            quality: crate::QualityPreset::High,
            ..Default::default()
        };
        assert!(build_frame(&state, &low, VIEWPORT).len() < build_frame(&state, &high, VIEWPORT).len());
    }

    #[test]
    fn test_bounce_stays_above_rest() {
        for i in 0..100 {
            let b = bounce(i as f32 * 0.05);
            assert!((0.0..=25.0).contains(&b));
        }
    }
}
