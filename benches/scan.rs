use criterion::{black_box, criterion_group, criterion_main, Criterion};
use include_graph::graph::DependencyGraph;
use include_graph::utils::config::ScanConfig;
use std::fs;

fn synthetic_tree(files: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let include = dir.path().join("include");
    let src = dir.path().join("src");
    fs::create_dir_all(&include).expect("mkdir include");
    fs::create_dir_all(&src).expect("mkdir src");
    for i in 0..files {
        let mut body = String::new();
        for j in 0..(i % 8) {
            body.push_str(&format!("#include \"mod{}.h\"\n", (i + j + 1) % files));
        }
        body.push_str("int value();\n");
        fs::write(include.join(format!("mod{i}.h")), &body).expect("write header");
        fs::write(src.join(format!("mod{i}.cpp")), format!("#include \"mod{i}.h\"\n{body}")).expect("write source");
    }
    dir
}

fn bench_scan(c: &mut Criterion) {
    let tree = synthetic_tree(200);
    let cfg = ScanConfig::with_root(tree.path());
    c.bench_function("build_dependency_graph_200", |b| {
        b.iter(|| {
            let graph = DependencyGraph::build(black_box(&cfg)).expect("build graph");
            black_box(graph.edges.len())
        })
    });
}

criterion_group!(name = benches; config = Criterion::default(); targets = bench_scan);
criterion_main!(benches);
