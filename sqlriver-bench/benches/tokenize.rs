use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    let input1 = "SELECT * FROM orders WHERE status = 'open'";
    let input2 = "
        WITH derived AS (
            SELECT MAX(a) AS max_a,
               COUNT(b) AS b_num,
               user_id
            FROM events
            GROUP BY user_id
        )
        SELECT * FROM orders
        LEFT JOIN derived USING (user_id)
        ";

    group.bench_function("short statement", |b| {
        let dialect = sqlriver_core::postgres::PostgresDialect;
        b.iter(|| {
            let tokens = sqlriver_lexer::Lexer::new(&dialect, input1).tokenize().unwrap();
            black_box(tokens)
        });
    });

    group.bench_function("cte with join", |b| {
        let dialect = sqlriver_core::postgres::PostgresDialect;
        b.iter(|| {
            let tokens = sqlriver_lexer::Lexer::new(&dialect, input2).tokenize().unwrap();
            black_box(tokens)
        });
    });
}

criterion_group!(benches, tokenize);
criterion_main!(benches);
