//! Health Journal: next-period prediction from the last start date and cycle length.

use std::ops::RangeInclusive;

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::sessions::Session;
use crate::tools::{ToolHandler, ToolInput, ToolKind, ToolOutput};

pub const CYCLE_DAYS: RangeInclusive<u32> = 21..=35;
const DEFAULT_CYCLE_DAYS: u32 = 28;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CyclePrediction {
    pub next_period: NaiveDate,
    /// e.g. "March 29, 2024".
    pub display: String,
}

pub fn predict_next_period(last_period: NaiveDate, cycle_days: u32) -> Result<CyclePrediction, AppError> {
    if !CYCLE_DAYS.contains(&cycle_days) {
        return Err(AppError::Validation(format!(
            "Cycle length must be between {} and {} days",
            CYCLE_DAYS.start(),
            CYCLE_DAYS.end()
        )));
    }
    let next_period = last_period + Duration::days(i64::from(cycle_days));
    Ok(CyclePrediction {
        next_period,
        display: next_period.format("%B %d, %Y").to_string(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct JournalRequest {
    /// Defaults to today.
    last_period: Option<NaiveDate>,
    cycle_length_days: u32,
}

impl Default for JournalRequest {
    fn default() -> Self {
        Self {
            last_period: None,
            cycle_length_days: DEFAULT_CYCLE_DAYS,
        }
    }
}

pub struct HealthJournalTool;

#[async_trait]
impl ToolHandler for HealthJournalTool {
    fn kind(&self) -> ToolKind {
        ToolKind::HealthJournal
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let req: JournalRequest = input.params()?;
        let last_period = req.last_period.unwrap_or_else(|| Local::now().date_naive());
        ToolOutput::json(&predict_next_period(last_period, req.cycle_length_days)?)
    }
}
