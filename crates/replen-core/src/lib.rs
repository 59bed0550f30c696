//! # Replen Core
//!
//! 補貨預測引擎的核心資料模型與類型定義

pub mod baseline;
pub mod calendar;
pub mod config;
pub mod forecast;
pub mod product;
pub mod projection;

// Re-export 主要類型
pub use baseline::Baseline;
pub use calendar::WorkCalendar;
pub use config::ProjectionConfig;
pub use forecast::{Forecast, ForecastProvider, NoForecast, StaticForecastProvider};
pub use product::{month_abbreviation, month_label, ConsumptionRecord, ProductSnapshot, NO_INFORMATION};
pub use projection::{MonthProjection, ProductProjection};

/// 補貨預測錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ReplenError {
    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("單品 {code} 第 {month_index} 月模擬失敗: {detail}")]
    SimulationFailed {
        code: String,
        month_index: u32,
        detail: String,
    },

    #[error("計算錯誤: {0}")]
    CalculationError(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ReplenError>;
