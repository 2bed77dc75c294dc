//! Integration tests driving the whole pipeline through the public API.

use plotline::{
    ChartConfig, ChartEngine, DataPoint, Gesture, HoverEvent, Rect, Scale, Series, Vec2,
    nearest_index,
};

fn plot() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

fn engine(config: ChartConfig, series: Vec<Series>) -> ChartEngine {
    let mut engine = ChartEngine::new(config).unwrap();
    engine.set_plot_area(plot());
    engine.set_dataset(series);
    engine
}

#[test]
fn end_to_end_gap_dataset() {
    // one series with a gap in the middle, default tick count of 5
    let mut engine = engine(
        ChartConfig::default().with_tick_count(5),
        vec![Series::new(
            "hist",
            vec![
                DataPoint::new(1.0, 10.0),
                DataPoint::gap(2.0),
                DataPoint::new(3.0, 30.0),
            ],
        )],
    );

    let frame = engine.render().unwrap();
    assert_eq!(frame.series.len(), 1);

    // the gap splits the series into two single-point segments; the path
    // never crosses the missing value
    let geometry = &frame.series[0];
    assert_eq!(geometry.segments.len(), 2);
    assert_eq!(geometry.segments[0].len(), 1);
    assert_eq!(geometry.segments[1].len(), 1);
    assert_eq!(geometry.markers.len(), 2);

    // both axes stay within the configured tick budget
    for axis in [&frame.x_axis, &frame.y_axis] {
        assert!(axis.ticks.len() >= 2, "got {} ticks", axis.ticks.len());
        assert!(axis.ticks.len() <= 5, "got {} ticks", axis.ticks.len());
        assert_eq!(
            axis.grid_lines,
            axis.ticks.iter().map(|t| t.position).collect::<Vec<_>>()
        );
    }
}

#[test]
fn scale_roundtrip_within_epsilon() {
    let scale = Scale::linear((-40.0, 260.0), (12.5, 787.5)).unwrap();
    for i in 0..=1000 {
        let v = -40.0 + 300.0 * (i as f64 / 1000.0);
        let roundtrip = scale.inverse(scale.forward(v));
        assert!(
            (roundtrip - v).abs() < 1e-3,
            "roundtrip drifted for {v}: {roundtrip}"
        );
    }
}

#[test]
fn nice_domain_twice_equals_once() {
    for domain in [(0.13, 9.7), (0.5, 10.5), (-3.2, 47.0), (1000.0, 1234.0)] {
        let once = Scale::linear(domain, (0.0, 800.0)).unwrap().nice(5);
        let twice = once.clone().nice(5);
        assert_eq!(once.domain(), twice.domain(), "not idempotent for {domain:?}");
    }
}

#[test]
fn bisection_over_hundred_points() {
    let points: Vec<DataPoint> = (0..100).map(|i| DataPoint::new(i as f64, 1.0)).collect();

    // strictly closer to one side resolves to that side
    assert_eq!(nearest_index(&points, 41.9), Some(42));
    assert_eq!(nearest_index(&points, 42.1), Some(42));
    assert_eq!(nearest_index(&points, 42.6), Some(43));

    // exactly between i and i+1 resolves to the right neighbor
    assert_eq!(nearest_index(&points, 42.5), Some(43));
}

#[test]
fn zoom_pivot_invariant() {
    let series: Vec<Series> = vec![Series::from_tuples(
        "s",
        &(0..50).map(|i| (i as f64, (i % 7) as f64)).collect::<Vec<_>>(),
    )];
    let mut engine = engine(ChartConfig::default(), series);

    let pivot = Vec2::new(333.0, 200.0);

    // resolve the data point under the pivot before zooming
    let before = match engine.pointer_moved(pivot) {
        HoverEvent::Show(payload) => payload.entries[0].value,
        HoverEvent::Hide => panic!("expected a tooltip before zooming"),
    };

    assert!(engine.apply_gesture(Gesture::zoom(2.0, pivot)));

    let after = match engine.pointer_moved(pivot) {
        HoverEvent::Show(payload) => payload.entries[0].value,
        HoverEvent::Hide => panic!("expected a tooltip after zooming"),
    };

    // the same data point is still under the pivot
    assert_eq!(before, after);
}

#[test]
fn legend_colors_survive_series_removal() {
    let a = Series::from_tuples("a", &[(0.0, 1.0), (1.0, 2.0)]);
    let b = Series::from_tuples("b", &[(0.0, 2.0), (1.0, 3.0)]);
    let c = Series::from_tuples("c", &[(0.0, 3.0), (1.0, 4.0)]);

    let mut engine = engine(ChartConfig::default(), vec![a.clone(), b, c.clone()]);
    let first = engine.render().unwrap();

    engine.set_dataset(vec![a, c]);
    let second = engine.render().unwrap();

    assert_eq!(second.legend[0].color, first.legend[0].color);
    assert_eq!(second.legend[1].color, first.legend[2].color);
    assert_ne!(second.legend[0].color, second.legend[1].color);
}

#[test]
fn tooltip_shows_inside_and_hides_outside() {
    let mut engine = engine(
        ChartConfig::default(),
        vec![
            Series::from_tuples("supply", &[(0.0, 5.0), (1.0, 6.0), (2.0, 7.0)]),
            Series::from_tuples("demand", &[(0.0, 4.0), (1.0, 8.0), (2.0, 6.0)]),
        ],
    );
    engine.render().unwrap();

    let event = engine.pointer_moved(Vec2::new(400.0, 300.0));
    let HoverEvent::Show(payload) = event else {
        panic!("expected a combined tooltip");
    };
    // one entry per series, anchored inside the plot
    assert_eq!(payload.entries.len(), 2);
    assert!(plot().contains(payload.anchor));

    assert_eq!(engine.pointer_moved(Vec2::new(900.0, 300.0)), HoverEvent::Hide);
    assert_eq!(engine.pointer_left(), HoverEvent::Hide);
}

#[test]
fn dataset_replacement_bumps_generation() {
    let mut engine = engine(
        ChartConfig::default(),
        vec![Series::from_tuples("s", &[(0.0, 1.0), (1.0, 2.0)])],
    );
    let first = engine.render().unwrap();

    engine.set_dataset(vec![Series::from_tuples("s", &[(0.0, 9.0), (1.0, 3.0)])]);
    let second = engine.render().unwrap();

    // frames from the old dataset are identifiably stale
    assert!(second.generation > first.generation);
}

#[test]
fn reset_view_restores_unzoomed_frame() {
    let mut engine = engine(
        ChartConfig::default(),
        vec![Series::from_tuples(
            "s",
            &(0..30).map(|i| (i as f64, i as f64 * 1.5)).collect::<Vec<_>>(),
        )],
    );
    let original = engine.render().unwrap();

    engine.apply_gesture(Gesture::zoom(2.5, Vec2::new(600.0, 100.0)));
    engine.apply_gesture(Gesture::pan(Vec2::new(-120.0, 35.0)));
    let zoomed = engine.render().unwrap();
    assert_ne!(original.x_axis, zoomed.x_axis);

    engine.reset_view();
    let restored = engine.render().unwrap();
    assert_eq!(original.x_axis, restored.x_axis);
    assert_eq!(original.y_axis, restored.y_axis);
    assert_eq!(original.series, restored.series);
}
