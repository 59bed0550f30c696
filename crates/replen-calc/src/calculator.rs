//! 批次預測計算器
//!
//! 對整批產品快照執行預測：推導基準、逐月模擬、彙整
//! 結果。單品之間彼此獨立，以 rayon 平行計算；任一單品
//! 失敗即整批失敗，不輸出部分結果。

use chrono::NaiveDate;
use rayon::prelude::*;
use replen_core::{
    Baseline, ForecastProvider, ProductSnapshot, ProjectionConfig, Result, WorkCalendar,
};
use rust_decimal::Decimal;
use std::time::Instant;

use crate::aggregator::ResultAggregator;
use crate::simulation::ReorderSimulator;
use crate::{ProductOutcome, ProjectionRun, ProjectionWarning};

/// 批次預測計算器
pub struct ProjectionCalculator {
    config: ProjectionConfig,
    calendar: WorkCalendar,
}

impl ProjectionCalculator {
    /// 創建計算器
    pub fn new(config: ProjectionConfig, calendar: WorkCalendar) -> Self {
        Self { config, calendar }
    }

    /// 執行整批預測
    ///
    /// 無效代碼的資料列先行剔除並記為警告；其餘單品平行
    /// 計算，結果依 SKU 代碼排序。
    pub fn calculate(
        &self,
        start_date: NaiveDate,
        products: &[ProductSnapshot],
        provider: &dyn ForecastProvider,
    ) -> Result<ProjectionRun> {
        let start = Instant::now();
        tracing::info!(
            "開始批次預測: {} 個單品, 起始日 {}, 模型 {}",
            products.len(),
            start_date,
            self.config.model_version
        );

        let mut run = ProjectionRun::empty();

        let (valid, skipped): (Vec<&ProductSnapshot>, Vec<&ProductSnapshot>) =
            products.iter().partition(|p| p.has_valid_code());
        if !skipped.is_empty() {
            tracing::warn!("剔除 {} 筆無效代碼的資料列", skipped.len());
            run.add_warning(ProjectionWarning::warning(
                "batch".to_string(),
                format!("剔除 {} 筆無效代碼的資料列", skipped.len()),
            ));
        }

        let outcomes: Vec<ProductOutcome> = valid
            .par_iter()
            .map(|snapshot| self.project_product(start_date, snapshot, provider))
            .collect::<Result<Vec<_>>>()?;

        for outcome in outcomes {
            run.warnings.extend(outcome.warnings);
            run.products.push(outcome.projection);
        }
        run.products.sort_by(|a, b| a.code.cmp(&b.code));

        run.calculation_time_ms = Some(start.elapsed().as_millis());
        tracing::info!(
            "批次預測完成: {} 個單品, 耗時 {:?}",
            run.products.len(),
            start.elapsed()
        );

        Ok(run)
    }

    /// 計算單一單品的完整預測
    fn project_product(
        &self,
        start_date: NaiveDate,
        snapshot: &ProductSnapshot,
        provider: &dyn ForecastProvider,
    ) -> Result<ProductOutcome> {
        let baseline = Baseline::derive(snapshot, &self.config);

        let mut warnings = Vec::new();
        if snapshot.historical_consumption.is_empty() {
            warnings.push(ProjectionWarning::info(
                snapshot.code.clone(),
                "無歷史消耗紀錄，基準消耗為零".to_string(),
            ));
        } else if baseline.daily_consumption <= Decimal::ZERO {
            warnings.push(ProjectionWarning::info(
                snapshot.code.clone(),
                "日均消耗為零，略過里程碑日期計算".to_string(),
            ));
        }

        let months = ReorderSimulator::simulate(
            snapshot,
            &baseline,
            provider,
            &self.config,
            &self.calendar,
            start_date,
        )?;

        let projection =
            ResultAggregator::assemble(snapshot, baseline, months, &self.config, start_date);

        Ok(ProductOutcome {
            projection,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WarningSeverity;
    use replen_core::{ConsumptionRecord, NoForecast};

    fn snapshot(code: &str) -> ProductSnapshot {
        ProductSnapshot::new(code, "Producto")
            .with_physical_stock(Decimal::from(100))
            .with_historical_consumption(vec![
                ConsumptionRecord::new(1, 2025, Decimal::from(110)),
                ConsumptionRecord::new(2, 2025, Decimal::from(110)),
                ConsumptionRecord::new(3, 2025, Decimal::from(110)),
            ])
    }

    fn april_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[test]
    fn test_batch_sorted_by_code() {
        let calculator =
            ProjectionCalculator::new(ProjectionConfig::default(), WorkCalendar::weekdays());
        let products = vec![snapshot("SKU-300"), snapshot("SKU-100"), snapshot("SKU-200")];

        let run = calculator
            .calculate(april_start(), &products, &NoForecast)
            .unwrap();

        let codes: Vec<&str> = run.products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["SKU-100", "SKU-200", "SKU-300"]);
        assert!(run.calculation_time_ms.is_some());
    }

    #[test]
    fn test_invalid_codes_skipped_with_warning() {
        let calculator =
            ProjectionCalculator::new(ProjectionConfig::default(), WorkCalendar::weekdays());
        let products = vec![snapshot("SKU-100"), snapshot("   ")];

        let run = calculator
            .calculate(april_start(), &products, &NoForecast)
            .unwrap();

        assert_eq!(run.products.len(), 1);
        assert!(run
            .warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Warning && w.code == "batch"));
    }

    #[test]
    fn test_empty_history_reported_as_info() {
        let calculator =
            ProjectionCalculator::new(ProjectionConfig::default(), WorkCalendar::weekdays());
        let products = vec![ProductSnapshot::new("SKU-EMPTY", "Sin historia")];

        let run = calculator
            .calculate(april_start(), &products, &NoForecast)
            .unwrap();

        assert_eq!(run.products.len(), 1);
        assert!(run
            .warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Info && w.code == "SKU-EMPTY"));
    }

    #[test]
    fn test_each_product_has_full_horizon() {
        let calculator =
            ProjectionCalculator::new(ProjectionConfig::default(), WorkCalendar::weekdays());
        let products = vec![snapshot("SKU-100"), snapshot("SKU-200")];

        let run = calculator
            .calculate(april_start(), &products, &NoForecast)
            .unwrap();

        for product in &run.products {
            assert_eq!(product.projections.len(), 6);
            assert_eq!(product.config.model_version, "3.3-dynamic-v2");
        }
    }
}
