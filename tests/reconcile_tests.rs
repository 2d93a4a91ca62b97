use arctic_sky::core::Viewport;
use arctic_sky::render::{
    CirclePrimitive, Color, Element, ElementKey, LayerKind, LayerTiming, RectPrimitive,
    RenderFrame, Scene, SceneReconciler, Shape, TransitionPhase, TransitionTiming,
};

fn point(site: &str, month_index: usize, cy: f64) -> (ElementKey, Element) {
    let circle = CirclePrimitive::new(40.0 + month_index as f64 * 10.0, cy, 5.0, Color::WHITE);
    (ElementKey::point(site, month_index), Element::new(Shape::Circle(circle)))
}

fn scene(points: &[(&str, usize, f64)]) -> Scene {
    let mut scene = Scene::new(Viewport::new(200, 100), "caption");
    let background = RectPrimitive::new(0.0, 0.0, 200.0, 100.0, Color::WHITE);
    scene.insert(
        LayerKind::Background,
        ElementKey::Background,
        Element::new(Shape::Rect(background)),
    );
    for (site, month_index, cy) in points {
        let (key, element) = point(site, *month_index, *cy);
        scene.insert(LayerKind::Points, key, element);
    }
    scene
}

fn phases(frame: &RenderFrame, kind: LayerKind) -> Vec<(String, TransitionPhase)> {
    frame
        .layer(kind)
        .expect("layer")
        .items
        .iter()
        .map(|item| (item.key.to_string(), item.phase))
        .collect()
}

#[test]
fn first_draw_snaps_everything_but_points() {
    let mut reconciler = SceneReconciler::new();
    assert!(reconciler.is_first_draw());
    let frame = reconciler.reconcile(scene(&[("A", 0, 50.0)]), &TransitionTiming::default());

    let background = &frame.layer(LayerKind::Background).expect("layer").items[0];
    assert_eq!(background.phase, TransitionPhase::Enter);
    assert_eq!(background.duration_ms, 0);
    assert_eq!(background.from, background.to);

    let grown = &frame.layer(LayerKind::Points).expect("layer").items[0];
    assert_eq!(grown.phase, TransitionPhase::Enter);
    assert_eq!(grown.duration_ms, 350);
    match &grown.from.shape {
        Shape::Circle(circle) => assert_eq!(circle.radius, 0.0),
        other => panic!("unexpected shape {other:?}"),
    }
    assert_eq!(grown.from.opacity, 0.0);
    assert!(!reconciler.is_first_draw());
}

#[test]
fn keyed_diff_enters_updates_and_exits() {
    let mut reconciler = SceneReconciler::new();
    let timing = TransitionTiming::default();
    let _ = reconciler.reconcile(scene(&[("A", 0, 50.0), ("A", 1, 60.0)]), &timing);

    let frame = reconciler.reconcile(scene(&[("A", 1, 20.0), ("B", 0, 30.0)]), &timing);
    assert_eq!(
        phases(&frame, LayerKind::Points),
        vec![
            ("point:A:1".to_owned(), TransitionPhase::Update),
            ("point:B:0".to_owned(), TransitionPhase::Enter),
            ("point:A:0".to_owned(), TransitionPhase::Exit),
        ]
    );

    let items = &frame.layer(LayerKind::Points).expect("layer").items;
    let moved = &items[0];
    assert_eq!(moved.duration_ms, 350);
    match (&moved.from.shape, &moved.to.shape) {
        (Shape::Circle(from), Shape::Circle(to)) => {
            assert_eq!(from.cy, 60.0);
            assert_eq!(to.cy, 20.0);
        }
        other => panic!("unexpected shapes {other:?}"),
    }
    let leaving = &items[2];
    assert_eq!(leaving.duration_ms, 200);
    assert_eq!(leaving.to.opacity, 0.0);

    assert_eq!(frame.count(TransitionPhase::Enter), 1);
    assert_eq!(frame.count(TransitionPhase::Update), 2);
    assert_eq!(frame.count(TransitionPhase::Exit), 1);
    assert_eq!(frame.duration_ms(), 350);
}

#[test]
fn settled_scene_drops_exited_keys() {
    let mut reconciler = SceneReconciler::new();
    let timing = TransitionTiming::default();
    let _ = reconciler.reconcile(scene(&[("A", 0, 50.0), ("A", 1, 60.0)]), &timing);
    let frame = reconciler.reconcile(scene(&[("A", 1, 20.0)]), &timing);

    let settled = frame.settled();
    assert_eq!(settled.layer(LayerKind::Points).elements.len(), 1);
    assert!(settled.get(LayerKind::Points, &ElementKey::point("A", 0)).is_none());
    assert_eq!(reconciler.previous(), Some(&settled));
}

#[test]
fn sampling_midway_interpolates_retained_elements() {
    let mut reconciler = SceneReconciler::new();
    let timing = TransitionTiming {
        points: LayerTiming::uniform(100),
        ..TransitionTiming::default()
    };
    let _ = reconciler.reconcile(scene(&[("A", 0, 0.0)]), &timing);
    let frame = reconciler.reconcile(scene(&[("A", 0, 100.0)]), &timing);

    let halfway = frame.sample(50);
    match &halfway
        .get(LayerKind::Points, &ElementKey::point("A", 0))
        .expect("point")
        .shape
    {
        Shape::Circle(circle) => assert!((circle.cy - 50.0).abs() < 1e-9),
        other => panic!("unexpected shape {other:?}"),
    }
    let early = frame.sample(10);
    match &early
        .get(LayerKind::Points, &ElementKey::point("A", 0))
        .expect("point")
        .shape
    {
        Shape::Circle(circle) => assert!(circle.cy < 10.0),
        other => panic!("unexpected shape {other:?}"),
    }
}

#[test]
fn immediate_timing_never_animates() {
    let mut reconciler = SceneReconciler::new();
    let timing = TransitionTiming::immediate();
    let _ = reconciler.reconcile(scene(&[("A", 0, 0.0)]), &timing);
    let frame = reconciler.reconcile(scene(&[("B", 0, 10.0)]), &timing);
    assert_eq!(frame.duration_ms(), 0);
    assert_eq!(frame.settled().layer(LayerKind::Points).elements.len(), 1);
}

#[test]
fn reset_turns_the_next_draw_into_a_first_draw() {
    let mut reconciler = SceneReconciler::new();
    let timing = TransitionTiming::default();
    let _ = reconciler.reconcile(scene(&[("A", 0, 0.0)]), &timing);
    reconciler.reset();
    assert!(reconciler.is_first_draw());
    let frame = reconciler.reconcile(scene(&[("A", 0, 0.0)]), &timing);
    assert_eq!(frame.count(TransitionPhase::Update), 0);
}
