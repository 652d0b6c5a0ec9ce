// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use logtool_doctor::{AnalysisConfig, analyze};
use logtool_ingest::{HeaderMapping, basic_cleanup, map_columns, parse_csv};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let Ok(raw) = parse_csv(&text) else {
        return;
    };
    let mapped = map_columns(&raw, &HeaderMapping::default());
    let Ok(cleaned) = basic_cleanup(&mapped) else {
        return;
    };
    let _ = analyze(&cleaned.table, &AnalysisConfig::default());
});
