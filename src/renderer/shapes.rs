//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in viewport pixels
//! (top-left origin, y down).

use glam::{Mat2, Vec2};
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::with_alpha;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial_gradient(center, radius, color, color, segments)
}

/// Triangle fan whose colour blends from `inner` at the centre to `outer` at the rim
pub fn radial_gradient(
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, inner));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            outer,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            outer,
        ));
    }

    vertices
}

/// Soft halo: full colour in the middle fading to transparent at the rim
pub fn glow(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial_gradient(center, radius, color, with_alpha(color, 0.0), segments)
}

/// Axis-aligned rectangle with a colour per corner (tl, tr, br, bl)
pub fn gradient_rect(min: Vec2, max: Vec2, corners: [[f32; 4]; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ],
        corners,
    );
    vertices
}

/// Solid rectangle centred on `center`, rotated by `rotation` radians
pub fn rotated_rect(center: Vec2, half: Vec2, rotation: f32, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Mat2::from_angle(rotation);
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|c| center + rot * c);

    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, corners, [color; 4]);
    vertices
}

/// Rounded rectangle (axis-aligned): a cross of two rects plus corner discs
pub fn rounded_rect(min: Vec2, max: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let r = radius.min((max.x - min.x) / 2.0).min((max.y - min.y) / 2.0);
    let mut vertices = gradient_rect(Vec2::new(min.x + r, min.y), Vec2::new(max.x - r, max.y), [color; 4]);
    vertices.extend(gradient_rect(Vec2::new(min.x, min.y + r), Vec2::new(min.x + r, max.y - r), [color; 4]));
    vertices.extend(gradient_rect(Vec2::new(max.x - r, min.y + r), Vec2::new(max.x, max.y - r), [color; 4]));
    for corner in [
        Vec2::new(min.x + r, min.y + r),
        Vec2::new(max.x - r, min.y + r),
        Vec2::new(max.x - r, max.y - r),
        Vec2::new(min.x + r, max.y - r),
    ] {
        vertices.extend(quarter_disc(corner, r, color, segments / 4 + 1, corner_start(corner, min, max)));
    }
    vertices
}

fn corner_start(corner: Vec2, min: Vec2, max: Vec2) -> f32 {
    let left = corner.x < (min.x + max.x) / 2.0;
    let top = corner.y < (min.y + max.y) / 2.0;
    match (left, top) {
        (true, true) => PI,
        (false, true) => 1.5 * PI,
        (false, false) => 0.0,
        (true, false) => 0.5 * PI,
    }
}

fn quarter_disc(center: Vec2, radius: f32, color: [f32; 4], segments: u32, start: f32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let step = 0.5 * PI / segments as f32;
    for i in 0..segments {
        let a1 = start + i as f32 * step;
        let a2 = a1 + step;
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(center.x + radius * a1.cos(), center.y + radius * a1.sin(), color));
        vertices.push(Vertex::new(center.x + radius * a2.cos(), center.y + radius * a2.sin(), color));
    }
    vertices
}

/// Thin ray from `origin` outwards, solid at the base and fading to the tip
pub fn ray(origin: Vec2, angle: f32, length: f32, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = Vec2::new(angle.cos(), angle.sin());
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let tip = origin + dir * length;
    let faded = with_alpha(color, 0.0);

    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [origin + perp, tip + perp, tip - perp, origin - perp],
        [color, faded, faded, color],
    );
    vertices
}

/// Heart: two lobes and a point, `size` is the overall width
pub fn heart(center: Vec2, size: f32, rotation: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let rot = Mat2::from_angle(rotation);
    let lobe = size * 0.27;
    let place = |p: Vec2| center + rot * (p * size);

    let mut vertices = circle(place(Vec2::new(-0.22, -0.12)), lobe, color, segments);
    vertices.extend(circle(place(Vec2::new(0.22, -0.12)), lobe, color, segments));
    // Point of the heart, y down
    let left = place(Vec2::new(-0.47, -0.02));
    let right = place(Vec2::new(0.47, -0.02));
    let tip = place(Vec2::new(0.0, 0.48));
    let top = place(Vec2::new(0.0, -0.05));
    vertices.extend([
        Vertex::new(left.x, left.y, color),
        Vertex::new(right.x, right.y, color),
        Vertex::new(tip.x, tip.y, color),
        Vertex::new(left.x, left.y, color),
        Vertex::new(top.x, top.y, color),
        Vertex::new(right.x, right.y, color),
    ]);
    vertices
}

/// Teddy bear head: ears, face and muzzle
pub fn teddy(center: Vec2, size: f32, rotation: f32, alpha: f32, segments: u32) -> Vec<Vertex> {
    let rot = Mat2::from_angle(rotation);
    let place = |p: Vec2| center + rot * (p * size);
    let fur = with_alpha(colors::TEDDY, alpha);
    let muzzle = with_alpha(colors::TEDDY_MUZZLE, alpha);
    let dark = with_alpha([0.15, 0.08, 0.04, 1.0], alpha);

    let mut vertices = circle(place(Vec2::new(-0.32, -0.3)), size * 0.16, fur, segments);
    vertices.extend(circle(place(Vec2::new(0.32, -0.3)), size * 0.16, fur, segments));
    vertices.extend(circle(center, size * 0.4, fur, segments));
    vertices.extend(circle(place(Vec2::new(0.0, 0.12)), size * 0.17, muzzle, segments));
    vertices.extend(circle(place(Vec2::new(-0.14, -0.08)), size * 0.04, dark, segments / 2));
    vertices.extend(circle(place(Vec2::new(0.14, -0.08)), size * 0.04, dark, segments / 2));
    vertices.extend(circle(place(Vec2::new(0.0, 0.07)), size * 0.05, dark, segments / 2));
    vertices
}

/// Scale a batch of vertices about a point
pub fn scale_about(vertices: &mut [Vertex], pivot: Vec2, scale: f32) {
    if scale == 1.0 {
        return;
    }
    for v in vertices {
        let p = Vec2::from(v.position);
        v.position = (pivot + (p - pivot) * scale).into();
    }
}

/// Multiply a batch's alpha by `opacity`
pub fn fade(vertices: &mut [Vertex], opacity: f32) {
    if opacity >= 1.0 {
        return;
    }
    for v in vertices {
        v.color[3] *= opacity.max(0.0);
    }
}

/// Shift a batch of vertices
pub fn translate(vertices: &mut [Vertex], offset: Vec2) {
    if offset == Vec2::ZERO {
        return;
    }
    for v in vertices {
        v.position[0] += offset.x;
        v.position[1] += offset.y;
    }
}

fn push_quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [[f32; 4]; 4]) {
    let [a, b, c, d] = corners;
    let [ca, cb, cc, cd] = colors;
    vertices.push(Vertex::new(a.x, a.y, ca));
    vertices.push(Vertex::new(b.x, b.y, cb));
    vertices.push(Vertex::new(c.x, c.y, cc));

    vertices.push(Vertex::new(a.x, a.y, ca));
    vertices.push(Vertex::new(c.x, c.y, cc));
    vertices.push(Vertex::new(d.x, d.y, cd));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let v = circle(Vec2::ZERO, 10.0, [1.0; 4], 16);
        assert_eq!(v.len(), 48);
        for vertex in &v {
            let p = Vec2::from(vertex.position);
            assert!(p.length() <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_glow_fades_to_transparent_rim() {
        let v = glow(Vec2::ZERO, 5.0, [1.0, 0.5, 0.5, 0.8], 8);
        assert_eq!(v[0].color[3], 0.8);
        assert_eq!(v[1].color[3], 0.0);
    }

    #[test]
    fn test_ray_points_along_angle() {
        let v = ray(Vec2::ZERO, 0.0, 100.0, 2.0, [1.0; 4]);
        assert_eq!(v.len(), 6);
        let max_x = v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!((max_x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_scale_and_fade() {
        let mut v = gradient_rect(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0), [[1.0; 4]; 4]);
        scale_about(&mut v, Vec2::ZERO, 2.0);
        fade(&mut v, 0.5);
        assert!(v.iter().all(|v| v.position[0].abs() == 2.0 && v.color[3] == 0.5));
    }

    #[test]
    fn test_rotated_rect_keeps_extent() {
        let v = rotated_rect(Vec2::ZERO, Vec2::new(3.0, 4.0), 0.7, [1.0; 4]);
        for vertex in &v {
            assert!((Vec2::from(vertex.position).length() - 5.0).abs() < 1e-4);
        }
    }
}
