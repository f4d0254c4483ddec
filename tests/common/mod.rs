#![allow(dead_code)]

use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 6] = [
    "customer_id",
    "price",
    "price_modifier",
    "payment_method",
    "datetime",
    "additional_item",
];

/// Writes `rows` cash payments of 1.00, one per minute from 2022-09-01T00:00Z.
pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;

    for i in 0..rows {
        let at = minute(i as u64);
        wtr.write_record(["c-1", "1.00", "1.0", "CASH", at.as_str(), ""])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes valid payments across every method until the file reaches `size_mb`.
pub fn generate_large_csv(path: &Path, size_mb: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    let mut rng = rand::thread_rng();
    let target_size = (size_mb * 1024 * 1024) as u64;
    let mut n: u64 = 0;

    // Check size every 5000 rows to avoid syscall overhead
    loop {
        for _ in 0..5000 {
            let (method, item) = *VALID_METHODS.choose(&mut rng).unwrap();
            let customer = rng.gen_range(1..=50).to_string();
            let cents: u32 = rng.gen_range(100..100_000);
            let price = format!("{}.{:02}", cents / 100, cents % 100);
            let at = minute(n);
            wtr.write_record([customer.as_str(), price.as_str(), "1.0", method, at.as_str(), item])?;
            n += 1;
        }
        wtr.flush()?;
        if std::fs::metadata(path)?.len() >= target_size {
            break;
        }
    }
    Ok(())
}

/// Methods whose bounds include 1.0, with additional data that satisfies them.
pub const VALID_METHODS: [(&str, &str); 12] = [
    ("CASH", ""),
    ("CASH_ON_DELIVERY", r#"{"courier":"YAMATO"}"#),
    ("VISA", r#"{"last4":"1234"}"#),
    ("MASTERCARD", r#"{"last4":"5678"}"#),
    ("AMEX", r#"{"last4":"0005"}"#),
    ("JCB", r#"{"last4":"3530"}"#),
    ("LINE_PAY", ""),
    ("PAYPAY", ""),
    ("POINTS", ""),
    ("GRAB_PAY", ""),
    ("BANK_TRANSFER", r#"{"bank":"Kasikorn","account_number":"1234567890"}"#),
    ("CHEQUE", r#"{"bank":"Bangkok Bank","cheque_number":"CH123456"}"#),
];

fn minute(n: u64) -> String {
    let day = n / (24 * 60);
    let hour = (n / 60) % 24;
    let min = n % 60;
    format!("2022-09-{:02}T{:02}:{:02}:00Z", 1 + day % 28, hour, min)
}
