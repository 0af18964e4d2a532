use ssao_renderer::colors;
use ssao_renderer::prelude::*;
use ssao_renderer::render::FrameBuffer;
use ssao_renderer::ssao::{box_blur, encode_openness};
use ssao_renderer::EMPTY_DEPTH;

const SLATE: u32 = 0xFF3366CC;

fn unit_quad() -> Mesh {
    let texture = Texture::solid(2, 2, SLATE).unwrap();
    Mesh::quad(1.0, Material::shared("slate", texture))
}

/// A view where projected offsets equal the model's XY coordinates for
/// points on the z = 0 plane.
fn identity_view(size: u32) -> View {
    View::new(0.0, 0.0, 100.0, Projection::new(100.0, size, size))
}

fn triangle_face(points: [(f64, f64); 3]) -> Face {
    let material = Material::shared("white", Texture::solid(1, 1, 0xFFFFFFFF).unwrap());
    let vertices = points.map(|(x, y)| Vertex::new(Vec3::new(x, y, 0.0), Vec2::ZERO, Vec3::ZERO));
    Face::new(vertices, material)
}

#[test]
fn unit_quad_fills_its_projection() {
    let mesh = unit_quad().placed(Placement::new(200.0, Vec3::ZERO));
    let mut engine = Engine::new(RenderConfig::default()).unwrap();
    let view = engine.view();

    let stats = engine.render(&mesh);
    assert_eq!(stats.drawn, 2);
    assert_eq!(stats.culled, 0);
    assert_eq!(stats.degenerate, 0);
    assert!(stats.pixels > 0);

    let (width, height) = (engine.width(), engine.height());
    let color = engine.color_buffer();
    let depth = engine.depth_buffer();
    let mut checked = 0;
    for face in mesh.faces() {
        let triangle = face.project(&view).unwrap();
        let inv_area = 1.0 / triangle.signed_area();
        for y in 0..height {
            for x in 0..width {
                let p = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let lambda = triangle.barycentric(p, inv_area);
                if lambda.iter().all(|&w| w > 1e-6) {
                    let i = (y * width + x) as usize;
                    assert_eq!(color[i], SLATE, "pixel ({x}, {y})");
                    assert!(!depth.is_empty(x, y), "pixel ({x}, {y})");
                    checked += 1;
                }
            }
        }
    }
    assert!(checked > 1000);
}

#[test]
fn counter_clockwise_is_drawn_and_mirror_is_culled() {
    let view = identity_view(64);
    let mut color = vec![colors::BACKGROUND; 64 * 64];
    let mut depth = DepthBuffer::new(64, 64);

    let mirror = triangle_face([(0.0, 0.0), (0.0, 20.0), (20.0, 0.0)]);
    {
        let mut fb = FrameBuffer::new(&mut color, &mut depth);
        assert_eq!(mirror.draw(&view, &mut fb), DrawOutcome::Culled);
    }
    assert_eq!(depth.filled(), 0);
    assert!(depth.as_slice().iter().all(|&z| z == EMPTY_DEPTH));

    let front = triangle_face([(0.0, 0.0), (20.0, 0.0), (0.0, 20.0)]);
    let mut fb = FrameBuffer::new(&mut color, &mut depth);
    assert!(matches!(
        front.draw(&view, &mut fb),
        DrawOutcome::Drawn { pixels } if pixels > 0
    ));
}

#[test]
fn depth_updates_only_move_nearer() {
    let mut depth = DepthBuffer::new(1, 1);
    let results: Vec<bool> = [5.0, 3.0, 8.0, 1.0]
        .iter()
        .map(|&z| depth.update(0, 0, z))
        .collect();
    assert_eq!(results, [true, false, true, false]);
    assert_eq!(depth.get(0, 0), 8.0);
}

#[test]
fn negative_texture_coordinates_wrap() {
    let texture = Texture::new(8, 1, (0..8).collect()).unwrap();
    assert_eq!(texture.column(-0.25), texture.column(0.75));
}

#[test]
fn flat_depth_field_is_fully_open() {
    let mut depth = DepthBuffer::new(24, 16);
    for y in 0..16 {
        for x in 0..24 {
            depth.update(x, y, -500.0);
        }
    }
    let mut ao = AmbientOcclusion::new(24, 16, AoConfig::default());
    ao.process(&depth);
    assert!(ao.overlay().iter().all(|&p| p == encode_openness(1.0)));
    assert!(ao.overlay().iter().all(|&p| colors::alpha(p) == 0));
}

#[test]
fn empty_pixels_keep_cleared_overlay() {
    let mut depth = DepthBuffer::new(16, 16);
    depth.update(8, 8, -10.0);
    let mut ao = AmbientOcclusion::new(16, 16, AoConfig::default());
    ao.process(&depth);
    for (i, &p) in ao.overlay().iter().enumerate() {
        if i == 8 * 16 + 8 {
            continue;
        }
        assert_eq!(p, colors::OVERLAY_CLEAR);
    }
}

#[test]
fn blur_leaves_border_band_untouched() {
    let (w, h) = (12u32, 10u32);
    let mut src = vec![0u32; (w * h) as usize];
    src[0] = 0xFFFFFFFF;
    src[(5 * w + 6) as usize] = 0xFF310000;
    let mut dst = vec![0u32; src.len()];
    box_blur(&src, &mut dst, w, h, 3);

    for y in 0..h {
        for x in 0..w {
            let i = (y * w + x) as usize;
            let on_border = x < 3 || y < 3 || x >= w - 3 || y >= h - 3;
            if on_border {
                assert_eq!(dst[i], src[i], "pixel ({x}, {y})");
            }
        }
    }
}

#[test]
fn occlusion_only_mode_keeps_background_where_nothing_is_drawn() {
    let mut engine = Engine::new(RenderConfig::with_viewport(64, 48)).unwrap();
    engine.set_display_mode(DisplayMode::OcclusionOnly);
    engine.render(&unit_quad().placed(Placement::new(20.0, Vec3::ZERO)));
    assert_eq!(engine.presentation()[0], colors::BACKGROUND);
}

#[test]
fn explicit_angle_is_deterministic() {
    let mesh = unit_quad().placed(Placement::new(200.0, Vec3::ZERO));
    let mut a = Engine::new(RenderConfig::with_viewport(160, 120)).unwrap();
    let mut b = Engine::new(RenderConfig::with_viewport(160, 120)).unwrap();

    b.render(&mesh);
    b.render(&mesh);
    a.turntable_mut().set_angle(b.turntable().angle());
    b.render(&mesh);
    a.render(&mesh);

    assert_eq!(a.presentation(), b.presentation());
}
