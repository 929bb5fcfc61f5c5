//! Top-down PNG snapshot of the ocean mesh for debugging without a GPU.
//!
//! Orthographic view looking down -Y: image x follows world X, image y follows world Z.
//! Vertices are splatted back to front by height, then the Moon, Sun and the
//! Earth–Moon line are drawn on top.

use std::path::Path;

use glam::{Vec3, Vec4};
use image::{Rgba, RgbaImage};

use crate::ocean::TidalMesh;
use crate::params::{SceneLayout, SnapshotConfig};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const MOON_COLOR: Rgba<u8> = Rgba([180, 180, 180, 255]);
const SUN_COLOR: Rgba<u8> = Rgba([255, 220, 0, 255]);
const MOON_LINE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Splat radius for mesh vertices (pixels)
const SPLAT_RADIUS: i32 = 1;

/// Render the snapshot into an image buffer
pub fn render_snapshot(
    mesh: &TidalMesh,
    moon_position: Vec3,
    layout: &SceneLayout,
    config: &SnapshotConfig,
) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(config.width, config.height, BACKGROUND);
    let pixels_per_unit = config.width.min(config.height) as f32 / (2.0 * config.half_extent);

    let to_pixel = |p: Vec3| -> (f32, f32) {
        (
            config.width as f32 * 0.5 + p.x * pixels_per_unit,
            config.height as f32 * 0.5 + p.z * pixels_per_unit,
        )
    };

    // Painter's order: lowest vertices first, the upper hemisphere ends on top
    let mut order: Vec<usize> = (0..mesh.vertex_count()).collect();
    order.sort_by(|&a, &b| mesh.positions[a].y.total_cmp(&mesh.positions[b].y));

    for i in order {
        let (x, y) = to_pixel(mesh.positions[i]);
        let color = blend_over(mesh.colors[i], BACKGROUND);
        fill_disk(&mut image, x, y, SPLAT_RADIUS, color);
    }

    let earth = to_pixel(Vec3::ZERO);
    let moon = to_pixel(moon_position);
    draw_line(&mut image, earth, moon, MOON_LINE_COLOR);

    let moon_radius = (layout.moon_radius * pixels_per_unit).max(2.0) as i32;
    fill_disk(&mut image, moon.0, moon.1, moon_radius, MOON_COLOR);

    // The Sun is usually out of frame; pin its marker to the border
    let (sun_x, sun_y) = to_pixel(Vec3::from_array(layout.sun_position));
    let sun_x = sun_x.clamp(0.0, config.width as f32 - 1.0);
    let sun_y = sun_y.clamp(0.0, config.height as f32 - 1.0);
    fill_disk(&mut image, sun_x, sun_y, 6, SUN_COLOR);

    image
}

/// Render and write the snapshot as PNG
pub fn save_snapshot(
    mesh: &TidalMesh,
    moon_position: Vec3,
    layout: &SceneLayout,
    config: &SnapshotConfig,
) -> image::ImageResult<()> {
    let image = render_snapshot(mesh, moon_position, layout, config);
    image.save(Path::new(&config.output_path))
}

/// Composite a straight-alpha RGBA color over an opaque background
fn blend_over(color: Vec4, background: Rgba<u8>) -> Rgba<u8> {
    let bg = Vec4::new(
        background[0] as f32,
        background[1] as f32,
        background[2] as f32,
        255.0,
    ) / 255.0;
    let alpha = color.w.clamp(0.0, 1.0);
    let rgb = bg.lerp(color, alpha);
    Rgba([to_byte(rgb.x), to_byte(rgb.y), to_byte(rgb.z), 255])
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn fill_disk(image: &mut RgbaImage, cx: f32, cy: f32, radius: i32, color: Rgba<u8>) {
    let (cx, cy) = (cx.round() as i32, cy.round() as i32);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            put(image, cx + dx, cy + dy, color);
        }
    }
}

fn draw_line(image: &mut RgbaImage, from: (f32, f32), to: (f32, f32), color: Rgba<u8>) {
    let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()).ceil() as i32;
    for step in 0..=steps.max(1) {
        let t = step as f32 / steps.max(1) as f32;
        let x = from.0 + (to.0 - from.0) * t;
        let y = from.1 + (to.1 - from.1) * t;
        put(image, x.round() as i32, y.round() as i32, color);
    }
}

fn put(image: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}
