// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use lens_lightbox::config::ViewerSettings;
use lens_lightbox::domain::{Collection, ImageRef, Point, Size};
use lens_lightbox::i18n::I18n;
use lens_lightbox::viewer::{HitTarget, PointerButton};
use lens_lightbox::{Event, HeadlessHost, Viewer};
use std::hint::black_box;
use std::time::Duration;

const COLLECTION_LEN: usize = 50;

fn open_viewer() -> Viewer<HeadlessHost> {
    let host = HeadlessHost::new()
        .with_content_size(Size::new(1280.0, 720.0))
        .with_image_layout_size(Size::new(960.0, 540.0));
    let mut viewer = Viewer::new(host, ViewerSettings::default(), I18n::default());
    let images = (0..COLLECTION_LEN)
        .map(|i| ImageRef::new(format!("photo-{i}.jpg"), format!("Photo {i}")))
        .collect();
    if let Some(collection) = Collection::new(images) {
        viewer.open_collection(collection, 0);
    }
    viewer.pump();
    viewer
}

fn navigation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewer_navigation");

    group.bench_function("navigate_through_collection", |b| {
        let mut viewer = open_viewer();
        b.iter(|| {
            for index in 0..COLLECTION_LEN {
                black_box(viewer.navigate_to(index));
                viewer.advance_time(Duration::from_millis(200));
            }
        });
    });

    group.bench_function("pan_drag", |b| {
        let mut viewer = open_viewer();
        viewer.set_zoom(3.0);
        b.iter(|| {
            viewer.handle(Event::PointerDown {
                position: Point::new(640.0, 360.0),
                button: PointerButton::Primary,
                target: HitTarget::Image,
            });
            for step in 0..100u16 {
                let offset = f32::from(step) * 7.5;
                black_box(viewer.handle(Event::PointerMoved(Point::new(
                    640.0 + offset,
                    360.0 - offset,
                ))));
            }
            viewer.handle(Event::PointerUp);
        });
    });

    group.finish();
}

criterion_group!(benches, navigation_benchmark);
criterion_main!(benches);
