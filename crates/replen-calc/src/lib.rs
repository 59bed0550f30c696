//! # Replen Calculation Engine
//!
//! 補貨預測核心引擎：月消耗估算、逐月補貨模擬與結果彙整

pub mod aggregator;
pub mod calculator;
pub mod estimator;
pub mod simulation;

// Re-export 主要類型
pub use calculator::ProjectionCalculator;
pub use estimator::ConsumptionEstimator;
pub use simulation::{ReorderSimulator, SimulationState};

use replen_core::ProductProjection;
use serde::{Deserialize, Serialize};

/// 批次計算結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRun {
    /// 依 SKU 代碼排序的單品預測結果
    pub products: Vec<ProductProjection>,

    /// 警告信息
    pub warnings: Vec<ProjectionWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ProjectionRun {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ProjectionWarning) {
        self.warnings.push(warning);
    }
}

/// 計算警告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionWarning {
    pub code: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ProjectionWarning {
    pub fn new(code: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            code,
            message,
            severity,
        }
    }

    pub fn info(code: String, message: String) -> Self {
        Self::new(code, message, WarningSeverity::Info)
    }

    pub fn warning(code: String, message: String) -> Self {
        Self::new(code, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}

/// 單品計算結果（批次管線內部使用）
#[derive(Debug, Clone)]
pub struct ProductOutcome {
    pub projection: ProductProjection,
    pub warnings: Vec<ProjectionWarning>,
}
