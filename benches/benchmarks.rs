use bigrat::{BigInt, Endianness, Rational, TieBreaking};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// ---------------------------------------------------------------------------
// Input generation
// ---------------------------------------------------------------------------

/// Decimal literal of `n` digits: "1234567891234..." (1-9 repeating)
fn make_literal(n: usize) -> String {
    (0..n)
        .map(|i| char::from(b'1' + u8::try_from(i % 9).unwrap_or(0)))
        .collect()
}

fn make_int(n: usize) -> BigInt {
    make_literal(n).parse().unwrap()
}

const SIZES: [(&str, usize); 3] = [("20d", 20), ("200d", 200), ("2000d", 2000)];

// ---------------------------------------------------------------------------
// Parsing and formatting
// ---------------------------------------------------------------------------

fn bench_text(c: &mut Criterion) {
    let mut g = c.benchmark_group("text");

    for (name, digits) in SIZES {
        let literal = make_literal(digits);
        g.bench_with_input(BenchmarkId::new("parse", name), &literal, |b, s| {
            b.iter(|| BigInt::parse(black_box(s), 10).unwrap());
        });

        let value = make_int(digits);
        g.bench_with_input(BenchmarkId::new("display", name), &value, |b, v| {
            b.iter(|| black_box(v).to_string());
        });
        g.bench_with_input(BenchmarkId::new("hex", name), &value, |b, v| {
            b.iter(|| format!("{:x}", black_box(v)));
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Integer arithmetic
// ---------------------------------------------------------------------------

fn bench_integer(c: &mut Criterion) {
    let mut g = c.benchmark_group("integer");

    for (name, digits) in SIZES {
        let a = make_int(digits);
        let b = -make_int(digits / 2 + 1);

        g.bench_function(BenchmarkId::new("add", name), |bench| {
            bench.iter(|| black_box(&a) + black_box(&b));
        });
        g.bench_function(BenchmarkId::new("mul", name), |bench| {
            bench.iter(|| black_box(&a) * black_box(&b));
        });
        g.bench_function(BenchmarkId::new("div_rem", name), |bench| {
            bench.iter(|| black_box(&a).checked_div_rem(black_box(&b)).unwrap());
        });
        g.bench_function(BenchmarkId::new("gcd", name), |bench| {
            bench.iter(|| black_box(&a).gcd(black_box(&b)));
        });
        g.bench_function(BenchmarkId::new("xor", name), |bench| {
            bench.iter(|| black_box(&a) ^ black_box(&b));
        });
        g.bench_function(BenchmarkId::new("to_bytes", name), |bench| {
            bench.iter(|| black_box(&b).to_bytes(Endianness::Little));
        });
    }

    let modulus = make_int(60);
    let base = make_int(40);
    let exponent = make_int(30);
    g.bench_function("pow_mod/60d", |bench| {
        bench.iter(|| {
            black_box(&base)
                .pow_mod(black_box(&exponent), black_box(&modulus))
                .unwrap()
        });
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Rational arithmetic
// ---------------------------------------------------------------------------

fn bench_rational(c: &mut Criterion) {
    let mut g = c.benchmark_group("rational");

    let third = Rational::new(BigInt::from(1), BigInt::from(3)).unwrap();
    let sixth = Rational::new(BigInt::from(1), BigInt::from(6)).unwrap();
    let wide = Rational::new(make_int(200), make_int(150) + BigInt::from(7)).unwrap();

    g.bench_function("add/small", |bench| {
        bench.iter(|| black_box(&third) + black_box(&sixth));
    });
    g.bench_function("mul/wide", |bench| {
        bench.iter(|| black_box(&wide) * black_box(&wide));
    });
    g.bench_function("cmp/wide", |bench| {
        bench.iter(|| black_box(&wide).cmp(black_box(&third)));
    });
    g.bench_function("round/wide", |bench| {
        bench.iter(|| black_box(&wide).round(TieBreaking::ToEven));
    });
    g.bench_function("hash/wide", |bench| {
        bench.iter(|| black_box(&wide).hash_value());
    });
    g.bench_function("from_f64", |bench| {
        bench.iter(|| Rational::try_from(black_box(0.1_f64)).unwrap());
    });
    g.bench_function("to_f64/wide", |bench| {
        bench.iter(|| black_box(&wide).to_f64());
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_text, bench_integer, bench_rational);
criterion_main!(benches);
