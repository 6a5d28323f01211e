use ink_overlay::draw::render::{CompositeMode, LineCap, LineJoin};
use ink_overlay::draw::toolbar::ToolbarCommand;
use ink_overlay::draw::{BoxHost, InkOverlay, OverlaySettings, PointerId, PointerSample, Tool};

const PEN: PointerId = PointerId(1);

fn mount(width: u32, height: u32) -> (BoxHost, InkOverlay) {
    let mut host = BoxHost::new(width, height);
    let overlay = InkOverlay::mount(&mut host, &OverlaySettings::default());
    (host, overlay)
}

fn active(width: u32, height: u32) -> (BoxHost, InkOverlay) {
    let (host, mut overlay) = mount(width, height);
    overlay.toggle_active();
    (host, overlay)
}

fn stroke(host: &BoxHost, overlay: &mut InkOverlay, points: &[(f32, f32)]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    assert!(overlay.pointer_down(host, &PointerSample::primary(PEN, first.0, first.1)));
    for point in rest {
        overlay.pointer_move(host, &PointerSample::primary(PEN, point.0, point.1));
    }
    let last = points.last().copied().unwrap_or(*first);
    overlay.pointer_up(&PointerSample::primary(PEN, last.0, last.1));
}

fn alpha(overlay: &InkOverlay, x: u32, y: u32) -> u8 {
    overlay.surface().pixel(x, y).map(|px| px[3]).unwrap_or(0)
}

fn has_ink(overlay: &InkOverlay) -> bool {
    overlay.surface().pixels().chunks_exact(4).any(|px| px[3] != 0)
}

#[test]
fn tool_sizes_are_isolated_per_tool() {
    let (_host, mut overlay) = mount(10, 10);
    assert_eq!(overlay.state().size_of(Tool::Pen), 3);
    assert_eq!(overlay.state().size_of(Tool::Pencil), 2);

    overlay.select_tool(Tool::Pencil);
    overlay.set_size(10);
    overlay.select_tool(Tool::Pen);
    assert_eq!(overlay.state().current_size(), 3);
    overlay.select_tool(Tool::Pencil);
    assert_eq!(overlay.state().current_size(), 10);

    overlay.apply(ToolbarCommand::SelectTool(Tool::Eraser));
    overlay.apply(ToolbarCommand::SetSize(250));
    assert_eq!(overlay.state().size_of(Tool::Eraser), 100);
    assert_eq!(overlay.state().size_of(Tool::Marker), 20);
    assert_eq!(overlay.state().size_of(Tool::Pencil), 10);
}

#[test]
fn inactive_overlay_never_draws() {
    let (host, mut overlay) = mount(64, 64);
    let before = overlay.surface().pixels().to_vec();

    let down = PointerSample::primary(PEN, 5.0, 5.0);
    assert!(!overlay.pointer_down(&host, &down));
    for step in 0..10 {
        let sample = PointerSample::primary(PEN, 5.0 + step as f32 * 4.0, 30.0);
        assert!(overlay.pointer_move(&host, &sample).is_none());
    }
    overlay.pointer_up(&PointerSample::primary(PEN, 50.0, 30.0));

    assert_eq!(overlay.surface().pixels(), before.as_slice());
    assert!(!overlay.input_policy().intercepts_pointer);
}

#[test]
fn resize_clears_pixels_and_keeps_round_defaults() {
    let (mut host, mut overlay) = active(100, 100);
    stroke(&host, &mut overlay, &[(10.0, 10.0), (80.0, 80.0)]);
    assert!(has_ink(&overlay));

    host.resize_container(150, 120);
    assert_eq!(overlay.pump_resizes(&host), 1);

    let surface = overlay.surface();
    assert_eq!(surface.size(), (150, 120));
    assert_eq!(surface.pixels().len(), 150 * 120 * 4);
    assert!(!has_ink(&overlay));
    assert_eq!(overlay.surface().context().line_cap, LineCap::Round);
    assert_eq!(overlay.surface().context().line_join, LineJoin::Round);

    overlay.set_size(10);
    stroke(&host, &mut overlay, &[(10.0, 10.0), (40.0, 10.0), (40.0, 40.0)]);
    // Outside both butt-capped segments, inside the rounded corner.
    assert_eq!(alpha(&overlay, 43, 7), 255);
}

#[test]
fn consecutive_segments_leave_no_gap_at_the_join() {
    let (host, mut overlay) = active(40, 40);
    stroke(&host, &mut overlay, &[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)]);

    for x in 10..=20 {
        assert_eq!(alpha(&overlay, x, 10), 255, "gap at ({x}, 10)");
    }
    for y in 10..=20 {
        assert_eq!(alpha(&overlay, 20, y), 255, "gap at (20, {y})");
    }
}

#[test]
fn pressure_only_modulates_the_pencil() {
    let (host, mut overlay) = active(64, 64);
    overlay.select_tool(Tool::Pencil);
    overlay.set_size(4);

    overlay.pointer_down(&host, &PointerSample::primary(PEN, 5.0, 5.0));
    let pencil = overlay
        .pointer_move(&host, &PointerSample::primary(PEN, 20.0, 5.0).with_pressure(0.9))
        .expect("pencil segment");
    overlay.pointer_up(&PointerSample::primary(PEN, 20.0, 5.0));
    assert!((pencil.width - 5.6).abs() < 1e-4);

    overlay.select_tool(Tool::Pen);
    overlay.set_size(4);
    overlay.pointer_down(&host, &PointerSample::primary(PEN, 5.0, 30.0));
    let pen = overlay
        .pointer_move(&host, &PointerSample::primary(PEN, 20.0, 30.0).with_pressure(0.9))
        .expect("pen segment");
    assert_eq!(pen.width, 4.0);
}

#[test]
fn eraser_makes_painted_pixels_transparent() {
    let (host, mut overlay) = active(48, 48);
    stroke(&host, &mut overlay, &[(5.0, 20.0), (35.0, 20.0)]);
    assert_eq!(alpha(&overlay, 20, 20), 255);

    overlay.select_tool(Tool::Eraser);
    overlay.pointer_down(&host, &PointerSample::primary(PEN, 5.0, 20.0));
    let segment = overlay
        .pointer_move(&host, &PointerSample::primary(PEN, 35.0, 20.0))
        .expect("eraser segment");
    overlay.pointer_up(&PointerSample::primary(PEN, 35.0, 20.0));

    assert_eq!(segment.composite, CompositeMode::DestinationOut);
    assert!(overlay
        .surface()
        .pixels()
        .chunks_exact(4)
        .all(|px| px == [0, 0, 0, 0]));
}

#[test]
fn repeated_sync_without_size_change_keeps_content() {
    let (host, mut overlay) = active(32, 32);
    stroke(&host, &mut overlay, &[(4.0, 4.0), (28.0, 28.0)]);
    let drawn = overlay.surface().pixels().to_vec();
    let resizes = overlay.resize_count();

    assert!(!overlay.synchronize_dimensions(&host));
    assert!(!overlay.synchronize_dimensions(&host));
    assert_eq!(overlay.resize_count(), resizes);
    assert_eq!(overlay.surface().pixels(), drawn.as_slice());
}

#[test]
fn client_coordinates_are_offset_by_the_surface_origin() {
    let (mut host, mut overlay) = active(40, 40);
    host.set_origin(200.0, 120.0);

    stroke(&host, &mut overlay, &[(210.0, 130.0), (230.0, 130.0)]);
    assert_eq!(alpha(&overlay, 20, 10), 255);
    assert_eq!(alpha(&overlay, 20, 30), 0);
}

#[test]
fn resize_mid_stroke_truncates_without_error() {
    let (mut host, mut overlay) = active(40, 40);
    overlay.pointer_down(&host, &PointerSample::primary(PEN, 2.0, 2.0));
    assert!(overlay
        .pointer_move(&host, &PointerSample::primary(PEN, 10.0, 2.0))
        .is_some());

    host.resize_container(40, 80);
    assert!(overlay
        .pointer_move(&host, &PointerSample::primary(PEN, 20.0, 2.0))
        .is_none());
    assert!(!has_ink(&overlay));
    assert!(overlay.pointer_up(&PointerSample::primary(PEN, 20.0, 2.0)));
    assert_eq!(overlay.captured_pointer(), None);
}

#[test]
fn growing_container_is_tracked_and_unmount_stops_tracking() {
    let (mut host, mut overlay) = mount(300, 200);
    host.resize_container(300, 1200);
    host.viewport_resized();
    overlay.pump_resizes(&host);
    assert_eq!(overlay.surface().size(), (300, 1200));

    overlay.unmount(&mut host);
    assert_eq!(host.observer_count(), 0);
    host.resize_container(300, 1400);
}

#[test]
fn bad_coordinates_never_erase_or_panic() {
    let (host, mut overlay) = active(40, 40);
    overlay.set_size(10);
    stroke(&host, &mut overlay, &[(10.0, 10.0), (14.0, 10.0)]);
    assert_eq!(overlay.surface().pixel(10, 10), Some([0, 0, 0, 255]));

    assert!(overlay.pointer_down(&host, &PointerSample::primary(PEN, 10.0, 10.0)));
    assert!(overlay
        .pointer_move(&host, &PointerSample::primary(PEN, f32::NAN, 10.0))
        .is_none());
    assert_eq!(overlay.surface().pixel(10, 10), Some([0, 0, 0, 255]));

    let far = overlay
        .pointer_move(&host, &PointerSample::primary(PEN, 3.0e9, 5.0))
        .expect("far segment is clipped, not dropped");
    assert_eq!(far.composite, CompositeMode::SourceOver);
    assert_eq!(overlay.surface().pixel(10, 10), Some([0, 0, 0, 255]));
    overlay.pointer_up(&PointerSample::primary(PEN, 3.0e9, 5.0));
}
