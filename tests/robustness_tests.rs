use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_csv_handling() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "customer_id,price,price_modifier,payment_method,datetime,additional_item").unwrap();
    // Valid payment
    writeln!(file, "1,1.00,1.0,CASH,2022-09-01T00:00:00Z,").unwrap();
    // Unparseable timestamp
    writeln!(file, "1,1.00,1.0,CASH,last tuesday,").unwrap();
    // Additional item is not JSON
    writeln!(file, "1,1.00,1.0,VISA,2022-09-01T00:00:00Z,last4=1234").unwrap();
    // Valid payment again
    writeln!(file, "1,2.00,1.0,CASH,2022-09-01T00:30:00Z,").unwrap();

    let mut cmd = Command::new(cargo_bin!("pos-payments"));
    cmd.arg("process").arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading payment"))
        .stdout(predicate::str::contains("1,accepted,1,CASH,1.00,0,,,"))
        .stdout(predicate::str::contains("4,accepted,1,CASH,2.00,0,,,"))
        .stdout(predicate::str::contains("\n2,").not())
        .stdout(predicate::str::contains("\n3,").not());
}

#[test]
fn test_rejections_are_logged() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "customer_id,price,price_modifier,payment_method,datetime,additional_item").unwrap();
    writeln!(file, r#"1,100.00,1.0,CASH_ON_DELIVERY,2022-09-01T00:00:00Z,"{{""courier"":""yamato""}}""#).unwrap();

    let mut cmd = Command::new(cargo_bin!("pos-payments"));
    cmd.arg("process").arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Payment rejected"))
        .stdout(predicate::str::contains(
            "1,rejected,1,CASH_ON_DELIVERY,,,INVALID_AUXILIARY_DATA,courier,",
        ));
}

#[test]
fn test_blank_customer_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "customer_id,price,price_modifier,payment_method,datetime,additional_item").unwrap();
    writeln!(file, ",100.00,1.0,CASH,2022-09-01T00:00:00Z,").unwrap();

    let mut cmd = Command::new(cargo_bin!("pos-payments"));
    cmd.arg("process").arg(file.path());

    cmd.assert().success().stdout(predicate::str::contains(
        "1,rejected,,CASH,,,MISSING_CUSTOMER,customerId,",
    ));
}
