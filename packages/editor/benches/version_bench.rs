use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plume_editor::{Content, Node, VersionId, VersionStore};

fn large_document(paragraphs: usize) -> Content {
    let mut content = Content::default_document();
    for i in 0..paragraphs {
        content.push(Node::element(
            "p",
            vec![
                Node::text(format!("Paragraph {} with some body text ", i)),
                Node::text("and a second run of words."),
            ],
        ));
    }
    content
}

fn deep_copy_document(c: &mut Criterion) {
    let content = large_document(500);

    c.bench_function("deep_copy_500_paragraphs", |b| {
        b.iter(|| black_box(&content).deep_copy())
    });
}

fn switch_versions(c: &mut Criterion) {
    let live = large_document(200);

    c.bench_function("select_round_trip", |b| {
        let mut store = VersionStore::bootstrap();
        let one = VersionId::from("1");
        let two = VersionId::from("2");
        b.iter(|| {
            store.select_version(black_box(&one), &live).ok();
            store.select_version(black_box(&two), &live).ok();
        })
    });
}

criterion_group!(benches, deep_copy_document, switch_versions);
criterion_main!(benches);
