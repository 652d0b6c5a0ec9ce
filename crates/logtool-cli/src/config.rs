// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::CliError;
use logtool_core::Field;
use logtool_doctor::AnalysisConfig;
use logtool_ingest::HeaderMapping;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Contents of a `--config` thresholds file.
///
/// Every key is optional:
///
/// ```json
/// {
///   "analysis": { "wot": { "app_thresh": 90.0 }, "include_cruise": true },
///   "headers": { "Engine Speed (RPM)": "rpm" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub analysis: AnalysisConfig,
    /// Extra raw-header to canonical-field entries layered over the FK8 table.
    pub headers: BTreeMap<String, Field>,
}

impl CliConfig {
    pub fn header_mapping(&self) -> HeaderMapping {
        self.headers
            .iter()
            .fold(HeaderMapping::fk8_cobb(), |mapping, (raw, field)| {
                mapping.with(raw.clone(), *field)
            })
    }
}

pub fn parse_config(raw: &str) -> Result<CliConfig, CliError> {
    let config: CliConfig = serde_json::from_str(raw)
        .map_err(|source| CliError::json("invalid config JSON", source))?;
    config.analysis.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<CliConfig, CliError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| CliError::io(format!("failed to read '{}'", path.display()), source))?;
    parse_config(&raw)
}
