use super::*;
use crate::features::palette::{BACKGROUNDS, FOREGROUNDS};

fn three_lines() -> FeatureRecord {
    FeatureRecord::new(
        BACKGROUNDS[1],
        vec![FOREGROUNDS[0], FOREGROUNDS[4], FOREGROUNDS[7]],
    )
    .unwrap()
}

#[test]
fn background_fills_whole_surface_first() {
    let scene = build_scene(&three_lines(), 300, 200);
    assert_eq!(
        scene.ops[0],
        DrawOp::FillRect {
            rect: Rect::new(0.0, 0.0, 300.0, 200.0),
            color: BACKGROUNDS[1].color,
        }
    );
}

#[test]
fn three_lines_sit_at_quarters_across_middle_third() {
    let (w, h) = (900u32, 400u32);
    let scene = build_scene(&three_lines(), w, h);
    let lines: Vec<_> = scene.lines().collect();
    assert_eq!(lines.len(), 3);

    let (wf, hf) = (f64::from(w), f64::from(h));
    let expected_y = [hf / 4.0, hf / 2.0, 3.0 * hf / 4.0];
    for ((line, width, cap, _), y) in lines.iter().zip(expected_y) {
        assert_eq!(line.p0, Point::new(wf / 3.0, y));
        assert_eq!(line.p1, Point::new(2.0 * wf / 3.0, y));
        assert_eq!(*width, hf / 10.0);
        assert_eq!(*cap, LineCap::Round);
    }

    let colours: Vec<_> = lines.iter().map(|(_, _, _, c)| *c).collect();
    assert_eq!(colours, vec![FOREGROUNDS[0], FOREGROUNDS[4], FOREGROUNDS[7]]);
}

#[test]
fn geometry_scales_with_surface() {
    let f = FeatureRecord::new(BACKGROUNDS[0], vec![FOREGROUNDS[1]; 2]).unwrap();
    let small = build_scene(&f, 300, 300);
    let large = build_scene(&f, 3000, 3000);
    for ((a, wa, _, _), (b, wb, _, _)) in small.lines().zip(large.lines()) {
        assert!((b.p0.y - a.p0.y * 10.0).abs() < 1e-9);
        assert!((b.p1.x - a.p1.x * 10.0).abs() < 1e-9);
        assert!((wb - wa * 10.0).abs() < 1e-9);
    }
}

#[test]
fn scene_building_is_pure() {
    let f = three_lines();
    assert_eq!(build_scene(&f, 640, 480), build_scene(&f, 640, 480));
}
