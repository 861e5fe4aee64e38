//! End-to-end figure construction tests.
//!
//! Exercises the full pipeline through the public API: subplot gridding,
//! range alignment, placeholder-trace balance across finalize/cleanup,
//! and HTML export.

use approx::assert_relative_eq;
use autofig::prelude::*;

fn scatter(x: &[f64], y: &[f64]) -> Trace {
    Scatter::new().x(x).y(y).build().expect("valid scatter data").into()
}

fn cell(x: &[f64], y: &[f64]) -> SubplotCell {
    Some(vec![scatter(x, y)])
}

#[test]
fn aligned_y_ranges_are_the_union_of_member_ranges() {
    let mut figure = Figure::new();
    // two stacked subplots with different y extents
    let grid = vec![
        vec![cell(&[0.0, 1.0], &[0.0, 10.0])],
        vec![cell(&[0.0, 1.0], &[5.0, 20.0])],
    ];
    let options = SubplotOptions {
        align: Align { x: None, y: Some(AlignScheme::All) },
        ..SubplotOptions::default()
    };
    figure.subplots(grid, &options).expect("valid grid");
    figure.finalize().expect("finalize succeeds");

    let (_, y_top) = figure.subplot_axes(0, 0).expect("populated cell");
    let (_, y_bottom) = figure.subplot_axes(1, 0).expect("populated cell");

    // independent auto-ranges: [0,10] padded to [-0.5, 10.5] and
    // [5,20] padded to [4.25, 20.75]; the union applies to both members
    let top = figure.axis(y_top).expect("axis exists").range().expect("range set");
    let bottom = figure.axis(y_bottom).expect("axis exists").range().expect("range set");

    assert_relative_eq!(top.0, -0.5);
    assert_relative_eq!(top.1, 20.75);
    assert_eq!(top, bottom);

    figure.cleanup().expect("balanced placeholders");
}

#[test]
fn aligned_x_ranges_per_column() {
    let mut figure = Figure::new();
    let grid = vec![
        vec![cell(&[0.0, 4.0], &[0.0, 1.0]), cell(&[100.0, 101.0], &[0.0, 1.0])],
        vec![cell(&[2.0, 9.0], &[0.0, 1.0]), cell(&[99.0, 104.0], &[0.0, 1.0])],
    ];
    let options = SubplotOptions {
        align: Align { x: Some(AlignScheme::Each), y: None },
        ..SubplotOptions::default()
    };
    figure.subplots(grid, &options).expect("valid grid");
    figure.finalize().expect("finalize succeeds");

    let (x_top_left, _) = figure.subplot_axes(0, 0).expect("populated cell");
    let (x_bottom_left, _) = figure.subplot_axes(1, 0).expect("populated cell");
    let (x_top_right, _) = figure.subplot_axes(0, 1).expect("populated cell");

    // left column: union of [0,4] and [2,9]; x axes get no padding
    assert_eq!(figure.axis(x_top_left).expect("axis").range(), Some((0.0, 9.0)));
    assert_eq!(figure.axis(x_bottom_left).expect("axis").range(), Some((0.0, 9.0)));
    // right column is aligned independently
    assert_eq!(figure.axis(x_top_right).expect("axis").range(), Some((99.0, 104.0)));
}

#[test]
fn placeholder_balance_over_repeated_renders() {
    let mut figure = Figure::new();
    let grid = vec![
        vec![cell(&[0.0, 1.0], &[0.0, 1.0]), cell(&[0.0, 1.0], &[0.0, 1.0])],
        vec![cell(&[0.0, 1.0], &[0.0, 1.0]), None],
    ];
    figure.subplots(grid, &SubplotOptions::default()).expect("valid grid");
    assert_eq!(figure.traces().len(), 3);

    for _ in 0..3 {
        figure.finalize().expect("finalize succeeds");
        assert!(figure.traces().len() > 3);
        figure.cleanup().expect("balanced placeholders");
        assert_eq!(figure.traces().len(), 3);
    }
}

#[test]
fn y_axes_pad_five_percent_and_x_axes_do_not() {
    let mut figure = Figure::new();
    figure.add_scatter(
        Scatter::new().x(&[10.0, 30.0]).y(&[-4.0, 16.0]).build().expect("valid data"),
    );
    figure.finalize().expect("finalize succeeds");

    let x = figure.axis(AxisId::x()).expect("axis").range().expect("range");
    let y = figure.axis(AxisId::y()).expect("axis").range().expect("range");

    assert_relative_eq!(x.0, 10.0);
    assert_relative_eq!(x.1, 30.0);
    // span 20, padded by 1 on each side
    assert_relative_eq!(y.0, -5.0);
    assert_relative_eq!(y.1, 17.0);
}

#[test]
fn auto_tick_interval_is_nice() {
    let mut figure = Figure::new();
    figure.add_scatter(
        Scatter::new().x(&[0.0, 7.0]).y(&[0.0, 7.0]).build().expect("valid data"),
    );
    figure.finalize().expect("finalize succeeds");

    // x span 7 -> raw 2.33 -> interval 2
    let dtick = figure
        .axis(AxisId::x())
        .expect("axis")
        .get("dtick")
        .and_then(serde_json::Value::as_f64)
        .expect("dtick set");
    assert_relative_eq!(dtick, 2.0);
}

#[test]
fn gridded_x_title_is_a_single_floating_annotation() {
    let mut figure = Figure::new();
    let grid = vec![vec![cell(&[0.0, 1.0], &[0.0, 1.0]), cell(&[0.0, 1.0], &[0.0, 1.0])]];
    figure.subplots(grid, &SubplotOptions::default()).expect("valid grid");
    figure.set_x_title(&AxisTitle::new().name("Time").unit("s"));
    figure.finalize().expect("finalize succeeds");

    let json = figure.to_json();
    let annotations = json["layout"]["annotations"].as_array().expect("annotations");
    let x_titles: Vec<_> =
        annotations.iter().filter(|a| a["name"] == "x-title").collect();
    assert_eq!(x_titles.len(), 1);
    assert_eq!(x_titles[0]["text"], "Time [s]");
    assert_eq!(x_titles[0]["xref"], "paper");

    // the per-subplot titles are blanked, not duplicated
    let (x_left, _) = figure.subplot_axes(0, 0).expect("populated cell");
    let blanked = figure.axis(x_left).expect("axis").get("title").expect("title");
    assert_ne!(blanked["text"], "Time [s]");
}

#[test]
fn heatmap_axes_keep_equal_scale() {
    let mut figure = Figure::new();
    let heatmap = Heatmap::new()
        .z(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]])
        .origin(0.0, 0.0)
        .spacing(1.0, 1.0)
        .build()
        .expect("valid heatmap");
    figure.add_heatmap(heatmap);
    figure.finalize().expect("finalize succeeds");

    let json = figure.to_json();
    assert_eq!(json["layout"]["yaxis"]["scaleanchor"], "x");
    assert_eq!(json["layout"]["xaxis"]["constrain"], "domain");
}

#[test]
fn show_writes_document_and_removes_placeholders() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("figure.html");

    let mut figure = Figure::new();
    figure.add_scatter(
        Scatter::new().x(&[0.0, 1.0]).y(&[0.0, 1.0]).build().expect("valid data"),
    );
    let export = ExportConfig { filename: Some("spectrum".to_string()), ..Default::default() };
    figure.show_with(Some(&path), &export).expect("show succeeds");

    let html = std::fs::read_to_string(&path).expect("document written");
    assert!(html.contains("Plotly.newPlot"));
    assert!(html.contains("spectrum"));
    assert_eq!(figure.traces().len(), 1);
}

#[test]
fn merged_dict_example_from_the_merge_contract() {
    use serde_json::json;

    let base = match json!({"a": {"x": 1, "y": 2}}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    let overlay = match json!({"a": {"y": 9, "z": 3}}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };

    let result = autofig::merge::merged(&base, &overlay);
    assert_eq!(serde_json::Value::Object(result), json!({"a": {"x": 1, "y": 9, "z": 3}}));
}

#[test]
fn reader_feeds_the_figure_pipeline() {
    use std::io::Write;

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("signal.dat");
    let mut file = std::fs::File::create(&path).expect("create file");
    writeln!(file, "# t  v").expect("write");
    for i in 0..10 {
        writeln!(file, "{} {}", i, i * i).expect("write");
    }

    let files = [ColumnFile::new(&path).rescale(1.0, 0.5)];
    let mut figure = autofig::reader::plot_files(&files, &ReaderOptions::default(), &["signal"])
        .expect("read and plot");
    figure.finalize().expect("finalize succeeds");

    let (lo, hi) = figure.axis(AxisId::y()).expect("axis").range().expect("range");
    // y values 0..40.5 after rescale, padded by 5%
    assert_relative_eq!(lo, 0.0 - 0.05 * 40.5);
    assert_relative_eq!(hi, 40.5 + 0.05 * 40.5);
}
