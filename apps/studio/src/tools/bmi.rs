//! BMI calculator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::sessions::Session;
use crate::tools::{ToolHandler, ToolInput, ToolKind, ToolOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
}

impl BmiCategory {
    pub fn for_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else {
            BmiCategory::Overweight
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiReport {
    /// Rounded to two decimals.
    pub bmi: f64,
    pub category: BmiCategory,
}

pub fn compute_bmi(weight_kg: f64, height_m: f64) -> Result<BmiReport, AppError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::Validation("Weight must be greater than zero".to_string()));
    }
    if !height_m.is_finite() || height_m <= 0.0 {
        return Err(AppError::Validation("Height must be greater than zero".to_string()));
    }
    let bmi = weight_kg / (height_m * height_m);
    Ok(BmiReport {
        bmi: (bmi * 100.0).round() / 100.0,
        category: BmiCategory::for_bmi(bmi),
    })
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BmiRequest {
    weight_kg: f64,
    height_m: f64,
}

impl Default for BmiRequest {
    fn default() -> Self {
        Self {
            weight_kg: 60.0,
            height_m: 1.70,
        }
    }
}

pub struct BmiTool;

#[async_trait]
impl ToolHandler for BmiTool {
    fn kind(&self) -> ToolKind {
        ToolKind::BmiCalculator
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let req: BmiRequest = input.params()?;
        ToolOutput::json(&compute_bmi(req.weight_kg, req.height_m)?)
    }
}
