// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chitieu::commands::exporter::write_transactions;
use chitieu::models::{TransactionRecord, TxType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn records() -> Vec<TransactionRecord> {
    vec![
        TransactionRecord {
            id: 1,
            amount: Decimal::new(4550, 2),
            r#type: TxType::Expense,
            description: Some("Lunch, with team".to_string()),
            category_name: "Food".to_string(),
            wallet_name: "Cash".to_string(),
            occurred_at: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
        },
        TransactionRecord {
            id: 2,
            amount: Decimal::from(2000),
            r#type: TxType::Income,
            description: None,
            category_name: "Salary".to_string(),
            wallet_name: "Bank".to_string(),
            occurred_at: NaiveDate::from_ymd_opt(2024, 3, 16)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        },
    ]
}

#[test]
fn csv_export_has_header_and_rows() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    write_transactions(&records(), "csv", &out).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["id", "date", "type", "amount", "category", "wallet", "description"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "2024-03-15 12:30:00");
    assert_eq!(&rows[0][2], "EXPENSE");
    assert_eq!(&rows[0][3], "45.50");
    assert_eq!(&rows[0][6], "Lunch, with team");
    assert_eq!(&rows[1][6], "");
}

#[test]
fn json_export_is_pretty_array() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    write_transactions(&records(), "json", &out).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed[1],
        json!({
            "id": 2,
            "date": "2024-03-16T09:00:00",
            "type": "INCOME",
            "amount": "2000",
            "category": "Salary",
            "wallet": "Bank",
            "description": null
        })
    );
}

#[test]
fn unknown_format_writes_nothing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.xml");
    assert!(write_transactions(&records(), "xml", &out).is_err());
    assert!(!out.exists());
}
