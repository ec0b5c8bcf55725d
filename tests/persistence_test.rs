#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: Buy a Cappuccino
    let mut csv1 = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv1, "type, product, cents").unwrap();
    writeln!(csv1, "order, Cappuccino, ").unwrap();
    writeln!(csv1, "coin, , 100").unwrap();

    let mut cmd1 = Command::new(cargo_bin!("coinbrew"));
    cmd1.arg(csv1.path()).arg("--db-path").arg(&db_path);

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("1,Cappuccino,"));
    assert!(stdout1.contains(",100,100,20;10;5,35,0,true"));

    // 2. Second run: Buy a Latte using the same DB path
    let mut csv2 = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv2, "type, product, cents").unwrap();
    writeln!(csv2, "order, Latte, ").unwrap();
    writeln!(csv2, "coin, , 50").unwrap();

    let mut cmd2 = Command::new(cargo_bin!("coinbrew"));
    cmd2.arg(csv2.path()).arg("--db-path").arg(&db_path);

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    // The report covers both runs and the depot carried its coins over.
    assert!(stdout2.contains("1,Cappuccino,"));
    assert!(stdout2.contains("2,Latte,"));
    let stderr2 = String::from_utf8_lossy(&output2.stderr);
    assert!(stderr2.contains("depot: 3*200 + 4*100 + 4*50 + 2*20 + 2*10 + 2*5"));
}
