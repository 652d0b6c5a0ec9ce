// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::Field;
use logtool_ingest::{HeaderMapping, basic_cleanup, load_log, map_columns};
use rust_xlsxwriter::Workbook;
use std::io::Write;

fn write_log(suffix: &str, body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp log");
    file.write_all(body.as_bytes()).expect("write temp log");
    file
}

#[test]
fn cobb_export_loads_into_a_table() {
    let mut body = String::from(
        "Time (sec),Engine Speed (RPM),Accelerator Pedal Position (%),\"ETC Angle Actual (%)\",Boost Pressure (psi),Target Boost Pressure (psi)\n",
    );
    for i in 0..20 {
        body.push_str(&format!(
            "{:.1},{},100,95,{:.1},20.0\n",
            f64::from(i) * 0.1,
            3000 + i * 100,
            18.0 + f64::from(i) * 0.05
        ));
    }
    let file = write_log(".csv", &body);

    let raw = load_log(file.path()).expect("load csv");
    let mapping = map_columns(&raw, &HeaderMapping::default());
    assert!(mapping.missing.contains(&"Exhaust Manifold Pressure (psi)".to_string()));
    let cleaned = basic_cleanup(&mapping).expect("cleanup");

    assert_eq!(cleaned.rows_dropped, 0);
    assert_eq!(cleaned.table.len(), 20);
    for field in [
        Field::AppPct,
        Field::ThrottlePct,
        Field::BoostActualPsi,
        Field::BoostTargetPsi,
    ] {
        assert!(cleaned.table.has(field), "{field} should be mapped");
    }
    assert_eq!(cleaned.table.rpm()[19], 4900.0);
}

#[test]
fn uppercase_csv_extension_is_accepted() {
    let file = write_log(".CSV", "Time (sec),Engine Speed (RPM)\n0,800\n");
    let raw = load_log(file.path()).expect("load csv");
    assert_eq!(raw.row_count(), 1);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_log(&dir.path().join("absent.csv")).expect_err("missing file");
    assert_eq!(err.code(), "io_error");
}

const WORKBOOK_HEADERS: [&str; 4] = [
    "Time (sec)",
    "Engine Speed (RPM)",
    "Accelerator Pedal Position (%)",
    "Boost Pressure (psi)",
];

/// Rows of a short pull; row 6 has a text timestamp and row 9 a blank boost cell.
fn workbook_rows() -> Vec<[Option<f64>; 4]> {
    (0..16)
        .map(|i| {
            let time = (i != 6).then(|| f64::from(i) * 0.25);
            let boost = (i != 9).then(|| 18.0 + f64::from(i) * 0.5);
            [time, Some(3000.0 + f64::from(i) * 125.0), Some(100.0), boost]
        })
        .collect()
}

#[test]
fn xlsx_export_cleans_to_the_same_table_as_csv() {
    let dir = tempfile::tempdir().expect("temp dir");
    let xlsx_path = dir.path().join("drive.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let mut csv = WORKBOOK_HEADERS.join(",");
    csv.push('\n');
    for (col, header) in WORKBOOK_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).expect("write header");
    }
    for (idx, row) in workbook_rows().iter().enumerate() {
        let line = row
            .iter()
            .enumerate()
            .map(|(col, cell)| match (col, cell) {
                (_, Some(value)) => {
                    sheet
                        .write_number(idx as u32 + 1, col as u16, *value)
                        .expect("write number");
                    value.to_string()
                }
                (0, None) => {
                    sheet
                        .write_string(idx as u32 + 1, col as u16, "oops")
                        .expect("write text");
                    "oops".to_string()
                }
                (_, None) => String::new(),
            })
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }
    workbook.save(&xlsx_path).expect("save workbook");
    let csv_file = write_log(".csv", &csv);

    let mapping = HeaderMapping::default();
    let from_xlsx = load_log(&xlsx_path).expect("load xlsx");
    let from_csv = load_log(csv_file.path()).expect("load csv");
    assert_eq!(from_xlsx.headers, WORKBOOK_HEADERS);
    assert_eq!(from_xlsx.row_count(), 16);

    let xlsx_clean = basic_cleanup(&map_columns(&from_xlsx, &mapping)).expect("cleanup xlsx");
    let csv_clean = basic_cleanup(&map_columns(&from_csv, &mapping)).expect("cleanup csv");
    assert_eq!(xlsx_clean.rows_dropped, 1);
    assert_eq!(xlsx_clean.table.len(), 15);
    for field in [Field::TimeS, Field::Rpm, Field::AppPct, Field::BoostActualPsi] {
        let a = xlsx_clean.table.column(field).expect("xlsx column");
        let b = csv_clean.table.column(field).expect("csv column");
        assert_eq!(a.len(), b.len(), "{field}");
        assert!(
            a.iter().zip(b).all(|(x, y)| x == y || (x.is_nan() && y.is_nan())),
            "{field} differs between xlsx and csv"
        );
    }
    let boost = xlsx_clean
        .table
        .column(Field::BoostActualPsi)
        .expect("boost mapped");
    assert!(boost[8].is_nan());
}

#[test]
fn corrupt_workbook_is_rejected() {
    let file = write_log(".xlsx", "Time (sec),Engine Speed (RPM)\n0,800\n");
    let err = load_log(file.path()).expect_err("csv text is not a workbook");
    assert_eq!(err.code(), "invalid_input");
}
