mod common;

use board_grid::{Analyser, AnalyserParams, Series};
use common::synthetic_image::{board_image, board_positions};
use common::{approx_eq, axis_position, init_logging};

fn assert_series_matches(analyser: &Analyser, series: Series, expected: &[f32], tol: f32) {
    let lines = analyser.lines(series);
    assert_eq!(
        lines.len(),
        expected.len(),
        "series {series:?} has {} lines",
        lines.len()
    );
    let orientation = axis_position(&lines[0]).0;
    let mut positions: Vec<f32> = lines
        .iter()
        .map(|l| {
            let (vertical, pos) = axis_position(l);
            assert_eq!(vertical, orientation, "mixed orientations in {series:?}");
            pos
        })
        .collect();
    positions.sort_by(|a, b| a.total_cmp(b));
    for (got, want) in positions.iter().zip(expected) {
        assert!(
            approx_eq(*got, *want, tol),
            "series {series:?}: line at {got:.2}, expected {want:.2}; all={positions:?}"
        );
    }
}

#[test]
fn full_board_converges_to_drawn_lines() {
    init_logging();
    let image = board_image(600, 30, 30, 19);
    let expected = board_positions(30, 30, 19);

    let mut analyser = Analyser::new(AnalyserParams::default());
    analyser.reset(image).expect("non-empty image");
    analyser.analyse().expect("analysis succeeds");

    assert_series_matches(&analyser, Series::First, &expected, 1.5);
    assert_series_matches(&analyser, Series::Second, &expected, 1.5);

    let first = axis_position(&analyser.lines(Series::First)[0]).0;
    let second = axis_position(&analyser.lines(Series::Second)[0]).0;
    assert_ne!(first, second, "the two series must be perpendicular");

    let report = analyser.report();
    assert!(report.complete);
    assert!(report.boundary_coords.is_some());
    assert!(report.timings.stage_ms("hough") > 0.0);
    let json = serde_json::to_string(&report).expect("report serializes");
    assert!(json.contains("approxThetaDeg"));
}

#[test]
fn small_board_is_deterministic_across_reset() {
    init_logging();
    let image = board_image(200, 20, 20, 9);
    let params = AnalyserParams {
        board_size: 9,
        ..Default::default()
    };

    let mut analyser = Analyser::new(params);
    analyser.reset(image.clone()).unwrap();
    analyser.analyse().unwrap();
    let first_run = analyser.board_lines();
    let hough = analyser.hough_image().clone();

    analyser.reset(image.clone()).unwrap();
    analyser.analyse().unwrap();
    assert_eq!(analyser.board_lines(), first_run);

    // Injecting the accumulator of the first run gives the same grid.
    analyser.reset(image).unwrap();
    analyser.set_hough_image(hough).unwrap();
    analyser.analyse().unwrap();
    assert_eq!(analyser.board_lines(), first_run);

    let expected = board_positions(20, 20, 9);
    assert_series_matches(&analyser, Series::First, &expected, 1.5);
    assert_series_matches(&analyser, Series::Second, &expected, 1.5);
}

#[test]
fn step_by_step_growth_adds_one_line_per_series() {
    init_logging();
    let image = board_image(200, 20, 20, 9);
    let params = AnalyserParams {
        board_size: 9,
        ..Default::default()
    };

    let mut stepped = Analyser::new(params);
    stepped.reset(image).unwrap();
    stepped.compute_line_images().unwrap();
    stepped.compute_hough_image().unwrap();
    stepped.compute_initial_grid().unwrap();
    assert_eq!(stepped.lines(Series::First).len(), 5);
    let mut steps = 0;
    while stepped.lines(Series::First).len() < 9 || stepped.lines(Series::Second).len() < 9 {
        stepped.grow_grid(true).unwrap();
        steps += 1;
        assert!(steps <= 4, "growth should take one line per step");
    }
    assert_eq!(steps, 4);
    stepped.grow_grid(false).unwrap();

    let expected = board_positions(20, 20, 9);
    assert_series_matches(&stepped, Series::First, &expected, 1.5);
    assert_series_matches(&stepped, Series::Second, &expected, 1.5);
}
