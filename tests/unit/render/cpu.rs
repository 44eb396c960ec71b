use kurbo::Shape as _;

use super::*;
use crate::{
    features::{
        generate::FeatureRecord,
        palette::{BACKGROUNDS, FOREGROUNDS},
    },
    render::scene::build_scene,
};

fn rgba(c: Color) -> [u8; 4] {
    c.to_premul_rgba8()
}

fn three_lines() -> FeatureRecord {
    FeatureRecord::new(
        BACKGROUNDS[0],
        vec![FOREGROUNDS[1], FOREGROUNDS[4], FOREGROUNDS[7]],
    )
    .unwrap()
}

#[test]
fn paints_background_and_line_centres() {
    let f = three_lines();
    let frame = CpuRasterizer::new()
        .render(&build_scene(&f, 300, 300))
        .unwrap();

    assert_eq!((frame.width, frame.height), (300, 300));
    assert_eq!(frame.data.len(), 300 * 300 * 4);
    assert!(frame.premultiplied);

    let bg = rgba(f.background());
    assert_eq!(frame.pixel(0, 0), Some(bg));
    assert_eq!(frame.pixel(299, 299), Some(bg));
    // Between the first and second line.
    assert_eq!(frame.pixel(150, 110), Some(bg));

    for (i, y) in [75u32, 150, 225].into_iter().enumerate() {
        assert_eq!(frame.pixel(150, y), Some(rgba(f.line_colours()[i])));
    }
}

#[test]
fn line_ends_are_rounded() {
    let f = three_lines();
    let frame = CpuRasterizer::new()
        .render(&build_scene(&f, 300, 300))
        .unwrap();
    let line = rgba(f.line_colours()[0]);
    let bg = rgba(f.background());

    // Segment starts at x=100 with a 15px cap radius.
    assert_eq!(frame.pixel(90, 75), Some(line));
    assert_eq!(frame.pixel(80, 75), Some(bg));
    // Cap corners stay background.
    assert_eq!(frame.pixel(86, 62), Some(bg));
}

#[test]
fn repeated_renders_are_byte_identical() {
    let scene = build_scene(&three_lines(), 257, 131);
    let mut shared = CpuRasterizer::new();
    let a = shared.render(&scene).unwrap();
    let b = shared.render(&scene).unwrap();
    let c = CpuRasterizer::new().render(&scene).unwrap();
    assert_eq!(a.data, b.data);
    assert_eq!(a.fingerprint(), c.fingerprint());
}

#[test]
fn context_is_rebuilt_when_size_changes() {
    let f = three_lines();
    let mut r = CpuRasterizer::new();
    let small = r.render(&build_scene(&f, 64, 64)).unwrap();
    let large = r.render(&build_scene(&f, 128, 96)).unwrap();
    assert_eq!(small.data.len(), 64 * 64 * 4);
    assert_eq!((large.width, large.height), (128, 96));
    assert_eq!(large.data.len(), 128 * 96 * 4);
}

#[test]
fn unsupported_sizes_are_render_errors() {
    let f = three_lines();
    let mut r = CpuRasterizer::new();
    assert!(matches!(
        r.render(&build_scene(&f, 0, 10)),
        Err(SketchError::Render(_))
    ));
    assert!(matches!(
        r.render(&build_scene(&f, 70_000, 10)),
        Err(SketchError::Render(_))
    ));
}

#[test]
fn round_outline_extends_by_radius() {
    let line = Line::new((100.0, 50.0), (200.0, 50.0));
    let bbox = stroke_outline(line, 20.0, LineCap::Round).bounding_box();
    assert!((bbox.x0 - 90.0).abs() < 0.2);
    assert!((bbox.x1 - 210.0).abs() < 0.2);
    assert!((bbox.y0 - 40.0).abs() < 0.2);
    assert!((bbox.y1 - 60.0).abs() < 0.2);
}

#[test]
fn butt_outline_is_the_segment_rectangle() {
    let line = Line::new((100.0, 50.0), (200.0, 50.0));
    let bbox = stroke_outline(line, 20.0, LineCap::Butt).bounding_box();
    assert!((bbox.x0 - 100.0).abs() < 1e-9);
    assert!((bbox.x1 - 200.0).abs() < 1e-9);
    assert!((bbox.y0 - 40.0).abs() < 1e-9);
    assert!((bbox.y1 - 60.0).abs() < 1e-9);
}

#[test]
fn zero_length_round_segment_is_a_disc() {
    let line = Line::new((10.0, 10.0), (10.0, 10.0));
    let bbox = stroke_outline(line, 8.0, LineCap::Round).bounding_box();
    assert!((bbox.width() - 8.0).abs() < 0.2);
    assert!((bbox.height() - 8.0).abs() < 0.2);
}

#[test]
fn diagonal_outline_is_offset_along_the_normal() {
    let line = Line::new((0.0, 0.0), (10.0, 10.0));
    let path = stroke_outline(line, 2.0, LineCap::Butt);
    let first = match path.elements()[0] {
        PathEl::MoveTo(p) => p,
        ref other => panic!("unexpected first element {other:?}"),
    };
    let s = std::f64::consts::FRAC_1_SQRT_2;
    assert!((first.x + s).abs() < 1e-9);
    assert!((first.y - s).abs() < 1e-9);
}
