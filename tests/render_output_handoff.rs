//! Integration tests: controller → render tick → swap → output tick, driven
//! against a host-side [`RecordingSink`] and a manually-advanced clock.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use led_render_engine::color::Color;
use led_render_engine::config::{MAX_PATTERNS, RenderConfig};
use led_render_engine::controller::{LedController, PatternKind};
use led_render_engine::patterns::PatternParams;
use led_render_engine::ports::{ManualClock, RecordingSink};

type TestController = LedController<CriticalSectionRawMutex, ManualClock>;

fn make_controller(leds_per_edge: &[u16]) -> TestController {
    LedController::create(leds_per_edge, RenderConfig::default(), ManualClock::new()).unwrap()
}

// STATIC on edge 0 only; the other edges must stay dark.
#[test]
fn static_pattern_lights_only_its_edge() {
    futures_lite::future::block_on(async {
        let ctl = make_controller(&[15, 15, 15, 15]);
        ctl.set_edge_pattern(0, PatternKind::Static, Color::new(255, 0, 0, 200), 1000)
            .await
            .unwrap();

        ctl.render_tick().await;
        let mut sink = RecordingSink::new(60);
        assert!(ctl.output_tick(&mut sink).await);

        for i in 0..15 {
            assert_eq!(sink.pixel(i), Some(((255u16 * 200 / 255) as u8, 0, 0)));
        }
        for i in 15..60 {
            assert_eq!(sink.pixel(i), Some((0, 0, 0)), "edge 1..3 must stay dark");
        }
        assert_eq!(sink.refresh_count(), 1);
    });
}

// BLINK phase boundary on a different edge than the STATIC one.
#[test]
fn blink_alternates_between_edges_untouched_by_other_patterns() {
    futures_lite::future::block_on(async {
        let ctl = make_controller(&[15, 15, 15, 15]);
        ctl.set_edge_pattern(1, PatternKind::Blink, Color::new(0, 255, 0, 200), 1000)
            .await
            .unwrap();

        // Drive the clock and re-tick so pattern_time reflects elapsed time.
        advance_and_tick(&ctl, 400).await;
        let mut sink = RecordingSink::new(60);
        ctl.output_tick(&mut sink).await;
        assert_eq!(sink.pixel(15), Some((0, (255u16 * 200 / 255) as u8, 0)));

        advance_and_tick(&ctl, 300).await; // now at t=700, inside [500,1000) off phase
        let mut sink = RecordingSink::new(60);
        ctl.output_tick(&mut sink).await;
        assert_eq!(sink.pixel(15), Some((0, 0, 0)));
    });
}

// turn_off_all blanks every pixel and the output task still
// pushes exactly one frame.
#[test]
fn turn_off_all_blanks_every_edge_after_one_tick() {
    futures_lite::future::block_on(async {
        let ctl = make_controller(&[15, 15, 15, 15]);
        ctl.set_edge_pattern(0, PatternKind::Static, Color::new(1, 2, 3, 255), 1000).await.unwrap();
        ctl.set_edge_pattern(2, PatternKind::Rainbow, Color::BLACK, 5000).await.unwrap();
        ctl.render_tick().await;

        ctl.turn_off_all().await;
        ctl.render_tick().await;

        let mut sink = RecordingSink::new(60);
        assert!(ctl.output_tick(&mut sink).await);
        for i in 0..60 {
            assert_eq!(sink.pixel(i), Some((0, 0, 0)));
        }
        assert_eq!(sink.refresh_count(), 1);
    });
}

// A bounded-duration pattern retires itself mid-stream and the render loop
// stops writing it without any caller intervention.
#[test]
fn bounded_fade_retires_after_its_duration_elapses() {
    futures_lite::future::block_on(async {
        let ctl = make_controller(&[10]);
        ctl.set_edge_pattern(0, PatternKind::FadeIn, Color::new(0, 255, 255, 255), 1000)
            .await
            .unwrap();

        advance_and_tick(&ctl, 1500).await; // past the 1000ms fade duration
        let mut sink = RecordingSink::new(10);
        ctl.output_tick(&mut sink).await;
        assert_eq!(sink.pixel(0), Some((0, 0, 0)), "retired pattern leaves pixels at the cleared default");
    });
}

// A BLINK with a repeat_count retires after (on+off)*repeat ms even though
// the caller passed duration_ms=0 — the registry derives the bound.
#[test]
fn blink_with_repeat_count_retires_instead_of_blinking_forever() {
    futures_lite::future::block_on(async {
        let ctl = make_controller(&[10]);
        let params = PatternParams::Blink {
            on_color: Color::new(0, 255, 0, 255),
            on_time_ms: 100,
            off_time_ms: 100,
            repeat_count: 2, // bounded at (100+100)*2 = 400ms
        };
        let id = ctl.create_pattern(0, 0, 0, 0, params).await.unwrap();
        ctl.start_pattern(id, 0).await;

        advance_and_tick(&ctl, 50).await; // t=50, inside the first on-phase
        let mut sink = RecordingSink::new(10);
        ctl.output_tick(&mut sink).await;
        assert_eq!(sink.pixel(0), Some((0, (255u16 * 255 / 255) as u8, 0)));

        advance_and_tick(&ctl, 450).await; // t=500, past the 400ms bound
        let mut sink = RecordingSink::new(10);
        ctl.output_tick(&mut sink).await;
        assert_eq!(sink.pixel(0), Some((0, 0, 0)), "retired after its repeat-derived duration");
    });
}

// Low-level registry API reaching a pattern type set_edge_pattern cannot
// express (SHIFT), and the registry capacity boundary end to end.
#[test]
fn low_level_shift_pattern_and_registry_capacity_boundary() {
    futures_lite::future::block_on(async {
        let ctl = make_controller(&[8]);
        let mut colors = heapless::Vec::new();
        for v in [10u8, 20, 30] {
            colors.push(Color::new(v, v, v, 255)).unwrap();
        }
        let id = ctl
            .create_pattern(0, 0, 2, 0, PatternParams::Shift { colors, period_ms: 100, offset: 0 })
            .await
            .unwrap();
        ctl.start_pattern(id, 0).await;
        ctl.render_tick().await;
        let mut sink = RecordingSink::new(8);
        ctl.output_tick(&mut sink).await;
        assert!(sink.pixel(0).is_some());

        // Fill the remaining capacity and confirm the registry reports full.
        for _ in 0..(MAX_PATTERNS - 1) {
            ctl.create_pattern(0, 0, 2, 0, PatternParams::Static { color: Color::BLACK })
                .await
                .unwrap();
        }
        let overflow = ctl.create_pattern(0, 0, 2, 0, PatternParams::Static { color: Color::BLACK }).await;
        assert!(overflow.is_err());
    });
}

async fn advance_and_tick(ctl: &TestController, delta_ms: u32) {
    ctl.clock().advance(delta_ms);
    ctl.render_tick().await;
}
