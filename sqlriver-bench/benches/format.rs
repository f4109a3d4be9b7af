use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    let simple = "select id, name from users where active = true order by name;";
    let ddl = "create table orders (id bigint primary key, user_id bigint not null references users (id), total numeric(12, 2) default 0, status text check (status in ('open', 'paid', 'void')));";

    group.bench_function("simple select", |b| {
        let options = sqlriver::Options::default();
        b.iter(|| black_box(sqlriver::format(simple, &options).unwrap()));
    });

    group.bench_function("create table", |b| {
        let options = sqlriver::Options::default();
        b.iter(|| black_box(sqlriver::format(ddl, &options).unwrap()));
    });
}

criterion_group!(benches, format);
criterion_main!(benches);
