//! End-to-end editing scenarios driven through the public controller API.

use kurbo::{Point, Size, Vec2};
use pagecraft_core::geometry;
use pagecraft_core::palette::default_item;
use pagecraft_core::{
    AutoSaveManager, BuilderConfig, ElementContent, ElementKind, ElementPatch, FileStorage, Geometry,
    InteractionController, PointerEvent, ResizeHandle, StyleMap,
};
use std::sync::Arc;

/// xorshift64, so sweeps are reproducible.
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn raw() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            raw()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(raw()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);
    loop {
        if let Poll::Ready(out) = f.as_mut().poll(&mut cx) {
            return out;
        }
    }
}

fn press_drag_release(c: &mut InteractionController, from: Point, to: Point) {
    c.handle_pointer(PointerEvent::down(from));
    c.handle_pointer(PointerEvent::Move { position: to });
    c.handle_pointer(PointerEvent::Up { position: to });
}

#[test]
fn text_drop_snaps_to_grid() {
    let mut c = InteractionController::default();
    let id = c.drop_item(&default_item(ElementKind::Text), Point::new(137.0, 204.0)).unwrap();
    assert_eq!(c.document().get(id).unwrap().geometry, Geometry::new(140.0, 200.0, 300.0, 60.0));
}

#[test]
fn header_drop_is_full_bleed_at_top() {
    let mut c = InteractionController::default();
    for (x, y) in [(0.0, 0.0), (733.0, 912.0), (1430.0, 1990.0), (-50.0, 4000.0)] {
        let id = c.drop_item(&default_item(ElementKind::Header), Point::new(x, y)).unwrap();
        let g = c.document().get(id).unwrap().geometry;
        assert_eq!((g.x, g.y, g.width), (0.0, 0.0, 1440.0), "dropped at ({x}, {y})");
    }
}

#[test]
fn northwest_resize_examples() {
    let canvas = Size::new(1440.0, 2000.0);
    let start = Geometry::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(
        geometry::resize(start, ResizeHandle::Nw, Vec2::new(30.0, 20.0), canvas),
        Geometry::new(30.0, 20.0, 70.0, 80.0)
    );
    assert_eq!(
        geometry::resize(start, ResizeHandle::Nw, Vec2::new(60.0, 60.0), canvas),
        Geometry::new(50.0, 50.0, 50.0, 50.0)
    );
}

#[test]
fn pointer_moves_stay_on_canvas() {
    let mut rng = Rng(0x5eed_cafe);
    for _ in 0..200 {
        let mut c = InteractionController::default();
        let (w, h) = (rng.range(50.0, 600.0), rng.range(50.0, 600.0));
        let (x, y) = (rng.range(0.0, 1440.0 - w), rng.range(0.0, 2000.0 - h));
        let page = c.active_page();
        let id = c
            .create(Geometry::new(x, y, w, h), ElementContent::empty(ElementKind::Card), StyleMap::new(), page)
            .unwrap();

        let from = Point::new(x + w / 2.0, y + h / 2.0);
        let to = from + Vec2::new(rng.range(-3000.0, 3000.0), rng.range(-3000.0, 3000.0));
        press_drag_release(&mut c, from, to);

        let g = c.document().get(id).unwrap().geometry;
        assert!(g.x >= 0.0 && g.x <= 1440.0 - g.width, "{g:?}");
        assert!(g.y >= 0.0 && g.y <= 2000.0 - g.height, "{g:?}");
        assert_eq!((g.width, g.height), (w, h));
    }
}

#[test]
fn undo_all_then_redo_all_restores_sequence() {
    let mut c = InteractionController::default();
    let text = c.drop_item(&default_item(ElementKind::Text), Point::new(100.0, 100.0)).unwrap();
    c.drop_item(&default_item(ElementKind::Button), Point::new(400.0, 300.0));
    c.duplicate_selected();
    press_drag_release(&mut c, Point::new(150.0, 120.0), Point::new(350.0, 720.0));
    let mut styles = StyleMap::new();
    styles.insert("color".into(), "#ff0000".into());
    assert!(c.update(text, ElementPatch::styles(styles)));

    let expected = c.document().elements().to_vec();
    let mut undone = 0;
    while c.undo() {
        undone += 1;
    }
    assert_eq!(undone, 5);
    assert!(c.document().is_empty());
    for _ in 0..undone {
        assert!(c.redo());
    }
    assert_eq!(c.document().elements(), expected.as_slice());
    assert!(!c.redo());
}

#[test]
fn edit_after_undo_drops_redo_branch() {
    let mut c = InteractionController::default();
    c.drop_item(&default_item(ElementKind::Text), Point::new(100.0, 100.0));
    c.drop_item(&default_item(ElementKind::Image), Point::new(500.0, 500.0));
    assert!(c.undo());
    c.drop_item(&default_item(ElementKind::Icon), Point::new(800.0, 800.0));

    assert!(!c.can_redo());
    assert!(!c.redo());
    let kinds: Vec<_> = c.document().elements().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![ElementKind::Text, ElementKind::Icon]);
}

#[test]
fn duplicate_and_paste_leave_source_untouched() {
    let mut c = InteractionController::default();
    let source = c.drop_item(&default_item(ElementKind::Pricing), Point::new(1400.0, 1900.0)).unwrap();
    let before = c.document().get(source).unwrap().clone();

    let dup = c.duplicate_selected().unwrap();
    assert_eq!(c.selection().primary(), Some(dup));
    assert!(c.copy_selected());
    c.add_page(None);
    let pasted = c.paste().unwrap();

    let ids: Vec<_> = c.document().elements().iter().map(|e| e.id()).collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert!(dup != source && pasted != source && pasted != dup);
    assert_eq!(c.document().get(source), Some(&before));

    let canvas = c.canvas_size();
    for id in [dup, pasted] {
        assert!(c.document().get(id).unwrap().geometry.fits_within(canvas));
    }
}

#[test]
fn deleting_a_page_removes_only_its_elements() {
    let mut c = InteractionController::default();
    let home = c.active_page();
    let about = c.add_page(Some("About".into()));
    let mut rng = Rng(42);
    for i in 0..12 {
        let page = if i % 3 == 0 { about } else { home };
        let g = Geometry::new(rng.range(0.0, 1000.0), rng.range(0.0, 1500.0), 100.0, 100.0);
        c.create(g, ElementContent::empty(ElementKind::Text), StyleMap::new(), page);
    }
    let kept: Vec<_> = c.document().elements_on_page(home).cloned().collect();

    assert!(c.delete_page(about));
    assert_eq!(c.document().elements(), kept.as_slice());
    assert_eq!(c.active_page(), home);
}

#[test]
fn autosave_round_trips_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
    let mut autosave = AutoSaveManager::new(storage.clone());
    autosave.set_project_id("site");

    let mut c = InteractionController::new(BuilderConfig::default());
    autosave.watch(&mut c);
    c.quick_add(&default_item(ElementKind::Hero));
    c.add_page(Some("Blog".into()));
    c.drop_item(&default_item(ElementKind::Features), Point::new(300.0, 300.0));
    assert!(block_on(autosave.maybe_save(c.document())).unwrap());

    let mut reopened = AutoSaveManager::new(storage);
    let project = block_on(reopened.load("site")).unwrap();
    assert_eq!(&project, c.document());

    let mut restored = InteractionController::default();
    restored.load_document(project);
    assert!(!restored.can_undo());
    assert_eq!(restored.document().pages().len(), 2);
}
