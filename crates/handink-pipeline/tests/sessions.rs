//! Integration test: drive whole drawing sessions through the pipeline
//! with synthetic hand poses and check what comes out the other end.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::f64::consts::TAU;

use handink_pipeline::landmark::{
    INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_TIP,
};
use handink_pipeline::{
    FinalizeOptions, FinishedStroke, InkConfig, InkPipeline, Landmark, LandmarkFrame, Point,
    ScaleMapping, StrokeKind,
};

/// A hand with the given fingers (index, middle, ring, pinky) extended
/// and the index tip at `(x, y)` in normalized frame space.
fn pose(fingers: [bool; 4], x: f64, y: f64) -> LandmarkFrame {
    let mut lm = vec![Landmark::new(x, y + 0.3, 0.0); LANDMARK_COUNT];
    for (&(tip, pip), &up) in [
        (INDEX_TIP, INDEX_PIP),
        (MIDDLE_TIP, MIDDLE_PIP),
        (RING_TIP, RING_PIP),
        (PINKY_TIP, PINKY_PIP),
    ]
    .iter()
    .zip(&fingers)
    {
        lm[pip] = Landmark::new(x, y + 0.1, 0.0);
        lm[tip] = Landmark::new(x, if up { y } else { y + 0.15 }, 0.0);
    }
    lm[INDEX_TIP] = Landmark::new(x, y, 0.0);
    if !fingers[0] {
        lm[INDEX_PIP] = Landmark::new(x, y - 0.1, 0.0);
    }
    lm[THUMB_TIP] = Landmark::new(x - 0.2, y + 0.1, 0.0);
    LandmarkFrame::new(lm)
}

fn pointing(p: Point) -> LandmarkFrame {
    pose([true, false, false, false], p.x, p.y)
}

fn fist(p: Point) -> LandmarkFrame {
    pose([false, false, false, false], p.x, p.y)
}

/// Replays index-finger positions, then releases with a fist, and
/// returns every stroke emitted.
struct Session {
    pipeline: InkPipeline<ScaleMapping, fn() -> u64>,
    options: FinalizeOptions,
    strokes: Vec<FinishedStroke>,
}

impl Session {
    fn new(options: FinalizeOptions) -> Self {
        fn clock() -> u64 {
            1_700_000_000_000
        }
        let pipeline = InkPipeline::new(
            InkConfig::default(),
            ScaleMapping::new(1000.0, 1000.0, false),
            clock as fn() -> u64,
        )
        .unwrap();
        Self {
            pipeline,
            options,
            strokes: Vec::new(),
        }
    }

    fn frame(&mut self, frame: Option<&LandmarkFrame>) {
        let out = self.pipeline.process_frame(frame, &self.options);
        self.strokes.extend(out.stroke);
    }

    fn hold(&mut self, at: Point, frames: usize) {
        for _ in 0..frames {
            self.frame(Some(&pointing(at)));
        }
    }

    /// Move the fingertip from `from` to `to` in steps of about `step`
    /// normalized units.
    fn trace(&mut self, from: Point, to: Point, step: f64) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (from.distance(to) / step).ceil().max(1.0) as u32;
        for k in 1..=n {
            let t = f64::from(k) / f64::from(n);
            self.frame(Some(&pointing(from + (to - from) * t)));
        }
    }

    fn release(&mut self, at: Point) {
        self.frame(Some(&fist(at)));
    }
}

fn single(strokes: &[FinishedStroke]) -> &FinishedStroke {
    assert_eq!(strokes.len(), 1, "expected exactly one stroke: {strokes:?}");
    &strokes[0]
}

fn draw_circle(session: &mut Session, center: Point, radius: f64) {
    let at = |deg: u32| {
        let theta = TAU * f64::from(deg) / 360.0;
        center + Point::new(theta.cos(), theta.sin()) * radius
    };
    session.hold(at(0), 10);
    for deg in 1..=360 {
        session.frame(Some(&pointing(at(deg))));
    }
    session.hold(at(0), 60);
    session.release(at(0));
}

/// Trace the closed polygon through `corners`, pausing at each one.
fn draw_polygon(session: &mut Session, corners: &[Point]) {
    session.hold(corners[0], 30);
    for k in 0..corners.len() {
        let (from, to) = (corners[k], corners[(k + 1) % corners.len()]);
        session.trace(from, to, 0.005);
        session.hold(to, 30);
    }
    session.release(corners[0]);
}

#[test]
fn slow_circle_is_stored_as_ellipse() {
    let mut session = Session::new(FinalizeOptions::default());
    draw_circle(&mut session, Point::new(0.5, 0.5), 0.2);

    let stroke = single(&session.strokes);
    assert_eq!(stroke.kind, StrokeKind::Ellipse);
    assert_eq!(stroke.points.len(), 37);
    assert_eq!(stroke.points.first(), stroke.points.last());

    // Smoothing lag shrinks the circle slightly; the center stays put.
    let (sx, sy) = stroke.points[..36]
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let center = Point::new(sx / 36.0, sy / 36.0);
    assert!(center.distance(Point::new(500.0, 500.0)) < 20.0, "center {center:?}");
}

#[test]
fn circle_without_recognition_is_pen() {
    let mut session = Session::new(FinalizeOptions {
        shape_recognition: false,
        ..FinalizeOptions::default()
    });
    draw_circle(&mut session, Point::new(0.5, 0.5), 0.2);

    let stroke = single(&session.strokes);
    assert_eq!(stroke.kind, StrokeKind::Pen);
    assert!(stroke.points.len() > 4);
}

#[test]
fn traced_rectangle_is_stored_as_rectangle() {
    let corners = [
        Point::new(0.2, 0.3),
        Point::new(0.8, 0.3),
        Point::new(0.8, 0.7),
        Point::new(0.2, 0.7),
    ];
    let mut session = Session::new(FinalizeOptions::default());
    draw_polygon(&mut session, &corners);

    let stroke = single(&session.strokes);
    assert_eq!(stroke.kind, StrokeKind::Rectangle);
    assert_eq!(stroke.points.len(), 5);
    assert_eq!(stroke.points.first(), stroke.points.last());
    // Axis-aligned: consecutive corners share an x or a y.
    for w in stroke.points.windows(2) {
        assert!(
            (w[0].x - w[1].x).abs() < f64::EPSILON || (w[0].y - w[1].y).abs() < f64::EPSILON,
            "{w:?}"
        );
    }
}

#[test]
fn traced_triangle_is_stored_as_pen() {
    let corners = [
        Point::new(0.5, 0.2),
        Point::new(0.8, 0.7),
        Point::new(0.2, 0.7),
    ];
    let mut session = Session::new(FinalizeOptions::default());
    draw_polygon(&mut session, &corners);

    let stroke = single(&session.strokes);
    assert_eq!(stroke.kind, StrokeKind::Pen);
    assert_eq!(stroke.points.len(), 4);
    assert_eq!(stroke.points.first(), stroke.points.last());
    // Smoothing lag rounds each corner a little.
    for (p, corner) in stroke.points.iter().zip(&corners) {
        let vertex = Point::new(corner.x * 1000.0, corner.y * 1000.0);
        assert!(Point::new(p.x, p.y).distance(vertex) < 50.0, "{p:?} vs {vertex:?}");
    }
}

#[test]
fn straight_line_mode_overrides_shapes() {
    let mut session = Session::new(FinalizeOptions {
        straight_line_mode: true,
        ..FinalizeOptions::default()
    });
    draw_circle(&mut session, Point::new(0.5, 0.5), 0.2);

    let stroke = single(&session.strokes);
    assert_eq!(stroke.kind, StrokeKind::Line);
    assert_eq!(stroke.points.len(), 2);
}

#[test]
fn diagonal_swipe_is_a_line() {
    let mut session = Session::new(FinalizeOptions::default());
    let (from, to) = (Point::new(0.2, 0.2), Point::new(0.6, 0.5));
    session.hold(from, 10);
    session.trace(from, to, 0.005);
    session.hold(to, 40);
    session.release(to);

    let stroke = single(&session.strokes);
    assert_eq!(stroke.kind, StrokeKind::Line);
    assert_eq!(stroke.points.len(), 2);
    let chord = Point::new(stroke.points[1].x, stroke.points[1].y)
        - Point::new(stroke.points[0].x, stroke.points[0].y);
    assert!(chord.length() > 400.0, "chord {chord:?}");
}

#[test]
fn two_strokes_separated_by_hand_loss() {
    let mut session = Session::new(FinalizeOptions::default());
    let (a, b) = (Point::new(0.1, 0.2), Point::new(0.5, 0.2));
    session.hold(a, 10);
    session.trace(a, b, 0.005);
    session.hold(b, 30);
    session.frame(None);

    let (c, d) = (Point::new(0.1, 0.6), Point::new(0.1, 0.9));
    session.hold(c, 10);
    session.trace(c, d, 0.005);
    session.hold(d, 30);
    session.frame(None);

    assert_eq!(session.strokes.len(), 2);
    assert_ne!(session.strokes[0].id, session.strokes[1].id);

    // The second stroke starts where the hand reappeared, not where the
    // first one ended.
    let start = &session.strokes[1].points[0];
    assert!(Point::new(start.x, start.y).distance(Point::new(100.0, 600.0)) < 1.0);

    let diag = session.pipeline.diagnostics();
    assert_eq!(diag.strokes.total(), 2);
    assert_eq!(diag.hand_lost_frames, 2);
}

#[test]
fn brief_twitch_draws_nothing() {
    let mut session = Session::new(FinalizeOptions::default());
    session.hold(Point::new(0.5, 0.5), 3);
    session.release(Point::new(0.5, 0.5));
    assert!(session.strokes.is_empty());
    assert_eq!(session.pipeline.diagnostics().suppressed_frames, 3);
    assert_eq!(session.pipeline.diagnostics().discarded_strokes, 0);
}
