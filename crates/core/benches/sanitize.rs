use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use summarist_core::{Config, PageContext, Resolver, SanitizeProfile, sanitize_with_profile};
use url::Url;

fn long_post(paragraphs: usize) -> String {
    let mut html = String::from("<article><h1>Benchmark</h1>");
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p onclick=\"track({i})\">Paragraph {i} with <strong>inline</strong> markup &amp; entities.</p>\
             <script>var n = {i};</script>"
        ));
    }
    html.push_str("</article>");
    html
}

fn bench_sanitize(c: &mut Criterion) {
    let small = std::fs::read_to_string("../../tests/fixtures/frontend_post.html").unwrap();
    let large = long_post(2000);
    let url = SanitizeProfile::default();
    let clipboard = Config::default().clipboard_profile();

    let mut group = c.benchmark_group("sanitize");

    group.bench_with_input(BenchmarkId::new("url", "fixture"), &small, |b, html| {
        b.iter(|| sanitize_with_profile(black_box(html), &url))
    });

    group.bench_with_input(BenchmarkId::new("clipboard", "2000p"), &large, |b, html| {
        b.iter(|| sanitize_with_profile(black_box(html), &clipboard))
    });

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/block_editor.html").unwrap();
    let page_url = Url::parse("https://blog.test/wp-admin/post.php?post=42&action=edit").unwrap();
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
    let config = Config::default();
    let resolver = Resolver::with_defaults(&config.fetch_config(), config.deadline()).unwrap();

    c.bench_function("page_context", |b| {
        b.iter(|| PageContext::new(black_box(&html), page_url.clone()))
    });

    let page = PageContext::new(&html, page_url);
    c.bench_function("resolve_editor_state", |b| b.iter(|| runtime.block_on(resolver.resolve(black_box(&page)))));
}

criterion_group!(benches, bench_sanitize, bench_resolve);
criterion_main!(benches);
