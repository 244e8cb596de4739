use bigrat::{BigInt, Endianness, Error, Rational, TieBreaking};
use tracing_subscriber::EnvFilter;

fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn ratio(numerator: i64, denominator: i64) -> Result<Rational, Error> {
    Ok(Rational::new(
        BigInt::from(numerator),
        BigInt::from(denominator),
    )?)
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Parsing ===\n");
    for (text, base) in [("-0x1A", 0), ("1_000_000", 10), ("zz", 36), ("0b1011", 0)] {
        let value = BigInt::parse(text, base)?;
        println!("  parse({text:?}, {base}) = {value} (hex {value:#x})");
    }
    for (text, base) in [("010", 0), ("1__0", 10), ("12", 40)] {
        match BigInt::parse(text, base) {
            Ok(value) => println!("  parse({text:?}, {base}) = {value}"),
            Err(e) => println!("  parse({text:?}, {base}) failed: {e}"),
        }
    }

    println!("\n=== Floor Division ===\n");
    for (a, b) in [(7, 2), (-7, 2), (7, -2), (-7, -2)] {
        let (quotient, remainder) = BigInt::from(a).checked_div_rem(&BigInt::from(b))?;
        println!("  divmod({a}, {b}) = ({quotient}, {remainder})");
    }
    match BigInt::from(1).checked_div(&BigInt::zero()) {
        Ok(value) => println!("  1 // 0 = {value}"),
        Err(e) => println!("  1 // 0 failed ({:?}): {e}", e.kind()),
    }

    println!("\n=== Powers ===\n");
    let factorial: BigInt = (1..=30u32).map(BigInt::from).product();
    println!("  30! = {factorial}");
    println!("  2^100 = {}", BigInt::from(2).pow(100));
    println!(
        "  4^13 mod 497 = {}",
        BigInt::from(4).pow_mod(&BigInt::from(13), &BigInt::from(497))?
    );
    println!(
        "  3^-1 mod 7 = {}",
        BigInt::from(3).pow_mod(&BigInt::from(-1), &BigInt::from(7))?
    );
    println!("  gcd(7, -21) = {}", BigInt::from(7).gcd(&BigInt::from(-21)));

    println!("\n=== Byte Serialization ===\n");
    for value in [0i64, 127, 128, -128, -300] {
        let value = BigInt::from(value);
        for endianness in Endianness::ALL {
            let bytes = value.to_bytes(endianness);
            let decoded = BigInt::from_bytes(&bytes, endianness);
            let status = if decoded == value { "ok" } else { "MISMATCH" };
            println!(
                "  {value:>5} {:<17} [{}] round-trip {status}",
                endianness.to_string(),
                format_bytes(&bytes)
            );
        }
    }

    println!("\n=== Rationals ===\n");
    let sum = ratio(1, 3)? + ratio(1, 6)?;
    println!("  1/3 + 1/6 = {sum}");
    println!("  0.1 = {}", Rational::try_from(0.1)?);
    println!("  (2/3)^-3 = {}", ratio(2, 3)?.pow(-3)?);
    match ratio(1, 0) {
        Ok(value) => println!("  1/0 = {value}"),
        Err(e) => println!("  1/0 failed: {e}"),
    }

    println!("\n=== Rounding ===\n");
    for value in [ratio(5, 2)?, ratio(7, 2)?, ratio(-5, 2)?, ratio(7, 3)?] {
        let rounded: Vec<String> = TieBreaking::ALL
            .iter()
            .map(|&mode| format!("{mode}={}", value.round(mode)))
            .collect();
        println!("  {:>5}: {}", value.to_string(), rounded.join(", "));
    }
    println!("  round(1/3, 2) = {}", ratio(1, 3)?.round_digits(2));

    println!("\n=== Hashing ===\n");
    for value in [ratio(1, 2)?, ratio(-1, 1)?, Rational::from(42)] {
        println!("  hash({value}) = {}", value.hash_value());
    }
    println!("  hash(42) = {}", BigInt::from(42).hash_value());

    Ok(())
}
