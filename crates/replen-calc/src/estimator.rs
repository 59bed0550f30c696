//! 月消耗估算
//!
//! 融合三種訊號：外部預測、同月歷史平均、基準消耗，
//! 再乘上近期成長趨勢係數。

use replen_core::{Baseline, ConsumptionRecord, Forecast, ProjectionConfig};
use rust_decimal::Decimal;

/// 訊號加權（依可用訊號組合選用）
const WEIGHT_FORECAST: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5
const WEIGHT_HISTORICAL: Decimal = Decimal::from_parts(3, 0, 0, false, 1); // 0.3
const WEIGHT_BASE: Decimal = Decimal::from_parts(2, 0, 0, false, 1); // 0.2
const WEIGHT_HISTORICAL_ONLY: Decimal = Decimal::from_parts(7, 0, 0, false, 1); // 0.7（搭配 0.3 基準）
const WEIGHT_FORECAST_ONLY: Decimal = Decimal::from_parts(8, 0, 0, false, 1); // 0.8（搭配 0.2 基準）

/// 成長係數的上下限
const FACTOR_FLOOR: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5
const FACTOR_CEILING: Decimal = Decimal::from_parts(15, 0, 0, false, 1); // 1.5

/// 消耗下限係數（估算值不得低於 50% 基準消耗）
const MINIMUM_RATIO: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5

/// 月消耗估算器
pub struct ConsumptionEstimator;

impl ConsumptionEstimator {
    /// 估算指定月份的消耗量
    ///
    /// 優先序：預測 + 同月歷史（0.5/0.3/0.2 搭配基準）、
    /// 僅同月歷史（0.7/0.3）、僅預測（0.8/0.2）、否則純基準。
    /// 結果乘上成長係數、以 50% 基準為下限、四捨五入到
    /// 小數兩位，且不為負。
    pub fn estimate(
        baseline: &Baseline,
        history: &[ConsumptionRecord],
        target_month: u32,
        forecast: &Forecast,
        config: &ProjectionConfig,
    ) -> Decimal {
        let days = Decimal::from(config.consumption_days_per_month);
        let base = baseline.daily_consumption * days;

        // 同月歷史平均（跨年份比對月份）
        let month_values: Vec<Decimal> = history
            .iter()
            .filter(|r| r.month == target_month)
            .map(|r| r.quantity)
            .collect();
        let historical_avg = mean(&month_values);

        // 外部預測換算為月消耗
        let forecast_value = forecast.expected().map(|daily| daily * days);

        let factor = Self::growth_factor(history);

        let blended = match (historical_avg, forecast_value) {
            (Some(historical), Some(forecast)) => {
                WEIGHT_FORECAST * forecast + WEIGHT_HISTORICAL * historical + WEIGHT_BASE * base
            }
            (Some(historical), None) => {
                WEIGHT_HISTORICAL_ONLY * historical + (Decimal::ONE - WEIGHT_HISTORICAL_ONLY) * base
            }
            (None, Some(forecast)) => {
                WEIGHT_FORECAST_ONLY * forecast + (Decimal::ONE - WEIGHT_FORECAST_ONLY) * base
            }
            (None, None) => base,
        };

        let adjusted = blended * factor;

        // 下限：50% 基準消耗，防止不合理的趨近零估算
        let minimum = base * MINIMUM_RATIO;
        adjusted.max(minimum).max(Decimal::ZERO).round_dp(2)
    }

    /// 近期成長趨勢係數
    ///
    /// 取最近 3 筆歷史中值 > 0 者；至少 2 筆才計算逐筆差
    /// 的平均相對成長率。結果一律夾在 [0.5, 1.5]；歷史筆數
    /// 不足 3 或分母為零時回傳 1.0。
    pub fn growth_factor(history: &[ConsumptionRecord]) -> Decimal {
        if history.len() < 3 {
            return Decimal::ONE;
        }

        let recent: Vec<Decimal> = history[history.len() - 3..]
            .iter()
            .map(|r| r.quantity)
            .filter(|q| *q > Decimal::ZERO)
            .collect();

        if recent.len() < 2 {
            return Decimal::ONE;
        }

        let diffs: Vec<Decimal> = recent.windows(2).map(|w| w[1] - w[0]).collect();
        let mean_diff = match mean(&diffs) {
            Some(value) => value,
            None => return Decimal::ONE,
        };

        let mean_base = match mean(&recent[..recent.len() - 1]) {
            Some(value) if value != Decimal::ZERO => value,
            _ => return Decimal::ONE,
        };

        let growth = mean_diff / mean_base;
        (Decimal::ONE + growth).clamp(FACTOR_FLOOR, FACTOR_CEILING)
    }
}

/// 算術平均；空序列回傳 `None`
fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let total: Decimal = values.iter().copied().sum();
    Some(total / Decimal::from(values.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use replen_core::ProductSnapshot;
    use rstest::rstest;

    fn constant_history(quantity: i64, months: &[(u32, i32)]) -> Vec<ConsumptionRecord> {
        months
            .iter()
            .map(|&(m, y)| ConsumptionRecord::new(m, y, Decimal::from(quantity)))
            .collect()
    }

    fn baseline_for(history: &[ConsumptionRecord]) -> Baseline {
        let snapshot = ProductSnapshot::new("SKU-EST", "Producto")
            .with_historical_consumption(history.to_vec());
        Baseline::derive(&snapshot, &ProjectionConfig::default())
    }

    #[test]
    fn test_baseline_only_when_no_signals() {
        // 歷史月份（1-3 月）與目標月（7 月）不重疊、無預測 → 純基準
        let history = constant_history(110, &[(1, 2025), (2, 2025), (3, 2025)]);
        let baseline = baseline_for(&history);

        let estimate = ConsumptionEstimator::estimate(
            &baseline,
            &history,
            7,
            &Forecast::Unavailable,
            &ProjectionConfig::default(),
        );

        // 日均 5 × 20 天 = 100
        assert_eq!(estimate, Decimal::from(100));
    }

    #[test]
    fn test_blend_forecast_and_historical() {
        // 歷史每月 800；目標 3 月的歷史平均即 800
        let history = constant_history(800, &[(3, 2024), (10, 2024), (11, 2024), (12, 2024)]);
        let baseline = baseline_for(&history);
        let config = ProjectionConfig::default();

        let forecast =
            Forecast::available(Decimal::from(50), Decimal::from(40), Decimal::from(60));
        let estimate =
            ConsumptionEstimator::estimate(&baseline, &history, 3, &forecast, &config);

        // 0.5×(50×20) + 0.3×800 + 0.2×(800/22×20) = 885.45
        let expected: Decimal = "885.45".parse().unwrap();
        assert_eq!(estimate, expected);
    }

    #[test]
    fn test_blend_historical_only() {
        let history = constant_history(800, &[(3, 2024), (10, 2024), (11, 2024), (12, 2024)]);
        let baseline = baseline_for(&history);

        let estimate = ConsumptionEstimator::estimate(
            &baseline,
            &history,
            3,
            &Forecast::Unavailable,
            &ProjectionConfig::default(),
        );

        // 0.7×800 + 0.3×(800/22×20) = 560 + 218.18 = 778.18
        let expected: Decimal = "778.18".parse().unwrap();
        assert_eq!(estimate, expected);
    }

    #[test]
    fn test_blend_forecast_only() {
        let history = constant_history(800, &[(10, 2024), (11, 2024), (12, 2024)]);
        let baseline = baseline_for(&history);

        let forecast =
            Forecast::available(Decimal::from(50), Decimal::from(40), Decimal::from(60));
        let estimate = ConsumptionEstimator::estimate(
            &baseline,
            &history,
            3,
            &forecast,
            &ProjectionConfig::default(),
        );

        // 0.8×1000 + 0.2×(800/22×20) = 800 + 145.45 = 945.45
        let expected: Decimal = "945.45".parse().unwrap();
        assert_eq!(estimate, expected);
    }

    #[test]
    fn test_floor_at_half_baseline() {
        // 同月歷史趨近零會把加權結果壓低，下限應擋在 50% 基準
        let history = vec![
            ConsumptionRecord::new(3, 2024, Decimal::ZERO),
            ConsumptionRecord::new(10, 2024, Decimal::from(800)),
            ConsumptionRecord::new(11, 2024, Decimal::from(800)),
            ConsumptionRecord::new(12, 2024, Decimal::from(800)),
        ];
        let baseline = baseline_for(&history);
        let base = baseline.daily_consumption * Decimal::from(20);

        let estimate = ConsumptionEstimator::estimate(
            &baseline,
            &history,
            3,
            &Forecast::Unavailable,
            &ProjectionConfig::default(),
        );

        assert!(estimate >= (base * Decimal::new(5, 1)).round_dp(2));
    }

    #[rstest]
    #[case(&[100, 100, 100], Decimal::ONE)] // 平盤 → 1.0
    #[case(&[100, 150, 200], Decimal::new(14, 1))] // 平均差 50 / 平均基底 125 → 1.4
    #[case(&[500, 100, 50], Decimal::new(5, 1))] // 急跌趨勢，夾在下限 0.5
    fn test_growth_factor_cases(#[case] values: &[i64], #[case] expected: Decimal) {
        let history: Vec<ConsumptionRecord> = values
            .iter()
            .enumerate()
            .map(|(i, &q)| ConsumptionRecord::new(i as u32 + 1, 2025, Decimal::from(q)))
            .collect();

        assert_eq!(ConsumptionEstimator::growth_factor(&history), expected);
    }

    #[test]
    fn test_growth_factor_requires_three_records() {
        let history = constant_history(100, &[(1, 2025), (2, 2025)]);
        assert_eq!(ConsumptionEstimator::growth_factor(&history), Decimal::ONE);
    }

    #[test]
    fn test_growth_factor_ignores_zero_values() {
        // 最近 3 筆只剩 1 筆 > 0 → 無法計算趨勢
        let history = vec![
            ConsumptionRecord::new(1, 2025, Decimal::from(80)),
            ConsumptionRecord::new(2, 2025, Decimal::ZERO),
            ConsumptionRecord::new(3, 2025, Decimal::ZERO),
            ConsumptionRecord::new(4, 2025, Decimal::from(90)),
        ];
        assert_eq!(ConsumptionEstimator::growth_factor(&history), Decimal::ONE);
    }

    #[test]
    fn test_growth_factor_clamped_to_upper_bound() {
        // 暴增趨勢，夾在上限 1.5
        let history = vec![
            ConsumptionRecord::new(1, 2025, Decimal::from(10)),
            ConsumptionRecord::new(2, 2025, Decimal::from(100)),
            ConsumptionRecord::new(3, 2025, Decimal::from(1000)),
        ];

        assert_eq!(
            ConsumptionEstimator::growth_factor(&history),
            Decimal::new(15, 1)
        );
    }
}
