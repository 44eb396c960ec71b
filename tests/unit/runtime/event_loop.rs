use super::*;
use crate::{
    config::SketchConfig,
    export::InMemorySink,
    host::{HeadlessHost, hash::FxHash},
    params::UrlOverrides,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn start_with(query: &str, config: SketchConfig) -> EventLoop<HeadlessHost, InMemorySink> {
    let host = HeadlessHost::new(FxHash::generate(42));
    let ctx =
        SketchContext::new(config, UrlOverrides::parse(query), host, InMemorySink::new()).unwrap();
    EventLoop::start(ctx, Viewport::new(800.0, 600.0)).unwrap()
}

fn start(query: &str) -> EventLoop<HeadlessHost, InMemorySink> {
    start_with(query, SketchConfig::default())
}

fn backing(rt: &EventLoop<HeadlessHost, InMemorySink>) -> (u32, u32) {
    rt.context().surface().unwrap().layout().backing_size()
}

#[test]
fn start_draws_at_time_zero() {
    let rt = start("");
    assert_eq!(rt.now(), Millis(0));
    assert_eq!(backing(&rt), (600, 600));
    assert_eq!(rt.context().surfaces_created(), 1);
    assert_eq!(rt.relayout_count(), 0);
}

#[test]
fn resize_waits_for_quiet_period() {
    let mut rt = start("");
    rt.post(Event::Resize(Viewport::new(300.0, 400.0)));
    rt.advance(ms(99));
    assert!(rt.resize_pending());
    assert_eq!(backing(&rt), (600, 600));

    rt.advance(ms(1));
    assert!(!rt.resize_pending());
    assert_eq!(rt.now(), Millis(100));
    assert_eq!(backing(&rt), (300, 300));
    assert_eq!(rt.relayout_count(), 1);
}

#[test]
fn resize_burst_relayouts_once_with_last_viewport() {
    let mut rt = start("");
    for (i, w) in [500.0, 420.0, 380.0, 250.0, 700.0].into_iter().enumerate() {
        if i > 0 {
            rt.advance(ms(20));
        }
        rt.post(Event::Resize(Viewport::new(w, 1000.0)));
    }
    rt.advance(ms(99));
    assert_eq!(rt.relayout_count(), 0);

    rt.advance(ms(500));
    assert_eq!(rt.relayout_count(), 1);
    assert_eq!(backing(&rt), (700, 700));
    assert_eq!(rt.context().surfaces_created(), 2);
}

#[test]
fn separated_resizes_each_relayout() {
    let mut rt = start("");
    rt.post(Event::Resize(Viewport::new(500.0, 500.0)));
    rt.advance(ms(150));
    rt.post(Event::Resize(Viewport::new(200.0, 500.0)));
    rt.advance(ms(150));
    assert_eq!(rt.relayout_count(), 2);
    assert_eq!(backing(&rt), (200, 200));
}

#[test]
fn save_key_exports_current_surface() {
    let mut rt = start("forceId=12");
    rt.post(Event::KeyPress('x'));
    rt.post(Event::KeyPress(SAVE_KEY));
    rt.advance(Duration::ZERO);

    let files = rt.context().sink().files();
    assert_eq!(files.len(), 1);
    let hash = rt.context().host().hash().to_string();
    assert_eq!(files[0].0, format!("my_fxhash_project_0012_{hash}.png"));
    assert!(rt.take_errors().is_empty());
}

#[test]
fn every_save_exports_again() {
    let mut rt = start("");
    rt.post(Event::KeyPress('s'));
    rt.post(Event::ExportRequested);
    rt.post(Event::KeyPress('S'));
    rt.settle();
    assert_eq!(rt.context().sink().files().len(), 2);
}

#[test]
fn forced_download_fires_once_across_relayouts() {
    let mut rt = start("forceDownload");
    for w in [400.0, 500.0, 600.0] {
        rt.post(Event::Resize(Viewport::new(w, w)));
        rt.advance(ms(200));
    }
    assert_eq!(rt.relayout_count(), 3);
    let ctx = rt.context();
    assert_eq!(ctx.sink().files().len(), 1);
    assert_eq!(ctx.host().parent_messages().len(), 1);
    assert_eq!(ctx.host().preview_count(), 1);
}

#[test]
fn settle_flushes_pending_resize() {
    let mut rt = start("");
    rt.advance(ms(10));
    rt.post(Event::Resize(Viewport::new(320.0, 240.0)));
    rt.settle();
    assert_eq!(rt.now(), Millis(110));
    assert_eq!(backing(&rt), (240, 240));
}

#[test]
fn handler_errors_are_kept_and_loop_continues() {
    let mut rt = start("");
    rt.post(Event::Resize(Viewport::new(80_000.0, 80_000.0)));
    rt.settle();
    let errors = rt.take_errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], SketchError::Render(_)));

    rt.post(Event::Resize(Viewport::new(100.0, 100.0)));
    rt.settle();
    assert!(rt.take_errors().is_empty());
    assert_eq!(backing(&rt), (100, 100));
}

#[test]
fn still_sketch_schedules_no_frames() {
    let mut rt = start("");
    let before = rt.context().surface().unwrap().frame().unwrap().fingerprint();
    rt.advance(ms(1000));
    assert_eq!(rt.animation_ticks(), 0);
    assert_eq!(rt.context().surfaces_created(), 1);
    assert_eq!(
        rt.context().surface().unwrap().frame().unwrap().fingerprint(),
        before
    );
}

#[test]
fn animated_sketch_redraws_every_interval() {
    let config = SketchConfig {
        animated: true,
        frame_interval_ms: 10,
        ..SketchConfig::default()
    };
    let mut rt = start_with("", config);
    assert_eq!(rt.animation_ticks(), 0);
    rt.advance(ms(35));
    assert_eq!(rt.now(), Millis(35));
    // Ticks at 10, 20 and 30 ms.
    assert_eq!(rt.animation_ticks(), 3);
    assert_eq!(rt.context().surfaces_created(), 1);
    assert_eq!(rt.context().host().preview_count(), 1);

    rt.post(Event::Resize(Viewport::new(200.0, 200.0)));
    rt.advance(ms(100));
    // Ten more ticks while the resize waits out its quiet period until 135 ms.
    assert_eq!(rt.animation_ticks(), 13);
    assert_eq!(backing(&rt), (200, 200));
    assert!(rt.take_errors().is_empty());

    rt.advance(ms(20));
    // The relayout at 135 ms restarts the cadence: 145 and 155 ms.
    assert_eq!(rt.animation_ticks(), 15);
}
