//! Allocation-counting benchmarks for bigrat.
//!
//! Measures the number of heap allocations and total bytes allocated for each
//! operation. Run with:
//!
//! ```sh
//! cargo bench --bench alloc
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use bigrat::{BigInt, Endianness, Rational, TieBreaking};

// ---------------------------------------------------------------------------
// Counting allocator
// ---------------------------------------------------------------------------

struct CountingAllocator;

static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);
static ALLOC_BYTES: AtomicUsize = AtomicUsize::new(0);
static ACTIVE: AtomicUsize = AtomicUsize::new(0); // 0 = not counting

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if ACTIVE.load(Ordering::Relaxed) != 0 {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
            ALLOC_BYTES.fetch_add(layout.size(), Ordering::Relaxed);
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static A: CountingAllocator = CountingAllocator;

/// Reset counters, run `f`, return (result, allocs, bytes).
fn measure<F: FnOnce() -> T, T>(f: F) -> (T, usize, usize) {
    ALLOC_COUNT.store(0, Ordering::SeqCst);
    ALLOC_BYTES.store(0, Ordering::SeqCst);

    ACTIVE.store(1, Ordering::SeqCst);
    let result = f();
    ACTIVE.store(0, Ordering::SeqCst);

    let count = ALLOC_COUNT.load(Ordering::SeqCst);
    let bytes = ALLOC_BYTES.load(Ordering::SeqCst);
    (result, count, bytes)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_literal(n: usize) -> String {
    (0..n)
        .map(|i| char::from(b'1' + u8::try_from(i % 9).unwrap_or(0)))
        .collect()
}

struct Row {
    name: &'static str,
    allocs: usize,
    bytes: usize,
}

fn print_table(rows: &[Row]) {
    println!("{:<40} {:>8} {:>12}", "operation", "allocs", "bytes");
    println!("{:-<40} {:->8} {:->12}", "", "", "");
    for row in rows {
        println!("{:<40} {:>8} {:>12}", row.name, row.allocs, row.bytes);
    }
}

fn record<T>(rows: &mut Vec<Row>, name: &'static str, f: impl FnOnce() -> T) {
    let (_, allocs, bytes) = measure(f);
    rows.push(Row {
        name,
        allocs,
        bytes,
    });
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let mut rows = Vec::new();

    // -- Construction ------------------------------------------------------

    record(&mut rows, "BigInt::zero()", BigInt::zero);
    record(&mut rows, "From<i64> (-42)", || BigInt::from(-42_i64));
    record(&mut rows, "From<u128> (u128::MAX)", || BigInt::from(u128::MAX));

    let literal = make_literal(100);
    record(&mut rows, "parse (100 digits)", || {
        BigInt::parse(&literal, 10).unwrap()
    });
    let long_literal = make_literal(1000);
    record(&mut rows, "parse (1000 digits)", || {
        BigInt::parse(&long_literal, 10).unwrap()
    });

    // -- Integer arithmetic ------------------------------------------------

    let a: BigInt = literal.parse().unwrap();
    let b = -BigInt::parse(&make_literal(40), 10).unwrap();
    record(&mut rows, "add (100d + 40d)", || &a + &b);
    record(&mut rows, "mul (100d * 40d)", || &a * &b);
    record(&mut rows, "div_rem (100d / 40d)", || {
        a.checked_div_rem(&b).unwrap()
    });
    record(&mut rows, "and (100d & 40d)", || &a & &b);
    record(&mut rows, "shl 1000", || &a << 1000);
    record(&mut rows, "to_bytes (100d)", || a.to_bytes(Endianness::Big));
    record(&mut rows, "Display (100d)", || a.to_string());

    // -- Rational ----------------------------------------------------------

    let third = Rational::new(BigInt::from(1), BigInt::from(3)).unwrap();
    let sixth = Rational::new(BigInt::from(1), BigInt::from(6)).unwrap();
    record(&mut rows, "Rational::new (1/3)", || {
        Rational::new(BigInt::from(2), BigInt::from(6)).unwrap()
    });
    record(&mut rows, "add (1/3 + 1/6)", || &third + &sixth);
    record(&mut rows, "cmp (1/3 vs 1/6)", || third.cmp(&sixth));
    record(&mut rows, "round to even (1/3)", || {
        third.round(TieBreaking::ToEven)
    });
    record(&mut rows, "hash_value (1/3)", || third.hash_value());
    record(&mut rows, "TryFrom<f64> (0.1)", || Rational::try_from(0.1).unwrap());

    // -- Print -------------------------------------------------------------

    println!();
    println!("bigrat allocation report");
    println!("========================");
    println!();
    print_table(&rows);
    println!();
}
