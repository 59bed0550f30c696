//! # Replen — 補貨預測引擎
//!
//! 以歷史消耗、在途訂單與外部預測模型為輸入，對每個
//! SKU 產出 6 個月的逐月補貨預測：估算消耗、模擬庫存
//! 水位、計算缺口與建議訂購量，並推導請購、再訂購與
//! 到貨的里程碑日期。
//!
//! ## 快速開始
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use replen::{
//!     ConsumptionRecord, NoForecast, ProductSnapshot, ProjectionCalculator,
//!     ProjectionConfig, WorkCalendar,
//! };
//!
//! let product = ProductSnapshot::new("SKU-100", "Producto de referencia")
//!     .with_physical_stock(Decimal::from(100))
//!     .with_historical_consumption(vec![
//!         ConsumptionRecord::new(1, 2025, Decimal::from(110)),
//!         ConsumptionRecord::new(2, 2025, Decimal::from(110)),
//!         ConsumptionRecord::new(3, 2025, Decimal::from(110)),
//!     ]);
//!
//! let calculator =
//!     ProjectionCalculator::new(ProjectionConfig::default(), WorkCalendar::weekdays());
//! let run = calculator
//!     .calculate(
//!         NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
//!         &[product],
//!         &NoForecast,
//!     )
//!     .unwrap();
//!
//! assert_eq!(run.products[0].projections.len(), 6);
//! ```

pub use replen_core::{
    month_abbreviation, month_label, Baseline, ConsumptionRecord, Forecast, ForecastProvider,
    MonthProjection, NoForecast, ProductProjection, ProductSnapshot, ProjectionConfig,
    ReplenError, Result, StaticForecastProvider, WorkCalendar, NO_INFORMATION,
};

pub use replen_calc::{
    ConsumptionEstimator, ProjectionCalculator, ProjectionRun, ProjectionWarning,
    ReorderSimulator, SimulationState, WarningSeverity,
};
