//! 補貨模擬狀態機
//!
//! 逐月推進庫存水位：估算消耗、計算缺口與補貨量、
//! 推導警報與里程碑日期。狀態轉移為純函數，跨月只
//! 結轉庫存水位。

use chrono::{Datelike, Duration, Months, NaiveDate};
use replen_core::{
    month_label, Baseline, ForecastProvider, MonthProjection, ProductSnapshot, ProjectionConfig,
    ReplenError, WorkCalendar,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::estimator::ConsumptionEstimator;

/// 逐月結轉的模擬狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationState {
    /// 月初庫存（含上月補貨）
    pub stock: Decimal,
}

/// 補貨模擬器
pub struct ReorderSimulator;

impl ReorderSimulator {
    /// 在途期間的投影消耗
    pub fn consumption_before_arrival(baseline: &Baseline, config: &ProjectionConfig) -> Decimal {
        if config.transit_lead_days > 0 {
            baseline.daily_consumption * Decimal::from(config.transit_lead_days)
        } else {
            Decimal::ZERO
        }
    }

    /// 計算模擬起始狀態
    ///
    /// 起始庫存 = max(實體庫存 − 到貨前投影消耗, 0) + 在途單位總數
    pub fn initial_state(
        snapshot: &ProductSnapshot,
        baseline: &Baseline,
        config: &ProjectionConfig,
    ) -> SimulationState {
        let before_arrival = Self::consumption_before_arrival(baseline, config);
        let physical = (snapshot.physical_stock - before_arrival).max(Decimal::ZERO);

        SimulationState {
            stock: physical + snapshot.in_transit_total(),
        }
    }

    /// 執行整個預測期的逐月模擬
    ///
    /// 月份序列錨定在起始日加上在途營業日後的到貨日，
    /// 逐月遞增（月底日期自動夾擠）。
    pub fn simulate(
        snapshot: &ProductSnapshot,
        baseline: &Baseline,
        provider: &dyn ForecastProvider,
        config: &ProjectionConfig,
        calendar: &WorkCalendar,
        start_date: NaiveDate,
    ) -> replen_core::Result<Vec<MonthProjection>> {
        let anchor = if config.transit_lead_days > 0 {
            calendar.advance_business_days(start_date, config.transit_lead_days as i64)
        } else {
            start_date
        };

        let mut state = Self::initial_state(snapshot, baseline, config);
        let mut months = Vec::with_capacity(config.horizon_months as usize);

        for index in 0..config.horizon_months {
            let month_date = anchor.checked_add_months(Months::new(index)).ok_or_else(|| {
                ReplenError::SimulationFailed {
                    code: snapshot.code.clone(),
                    month_index: index,
                    detail: format!("無法自 {} 推算第 {} 個月", anchor, index),
                }
            })?;

            let (projection, next_state) =
                Self::advance(state, month_date, snapshot, baseline, provider, config);
            months.push(projection);
            state = next_state;
        }

        Ok(months)
    }

    /// 單月狀態轉移（純函數）
    ///
    /// 補貨視為當月即時入庫；提前期只反映在回報的里程碑
    /// 日期，不延遲庫存入帳。
    pub fn advance(
        state: SimulationState,
        month_date: NaiveDate,
        snapshot: &ProductSnapshot,
        baseline: &Baseline,
        provider: &dyn ForecastProvider,
        config: &ProjectionConfig,
    ) -> (MonthProjection, SimulationState) {
        let month = month_date.month();
        let year = month_date.year();

        let forecast = provider.forecast(&snapshot.code, month, year);
        if !forecast.is_available() {
            tracing::debug!(
                "單品 {} 於 {} 無外部預測，改用歷史/基準訊號",
                snapshot.code,
                month_label(month, year)
            );
        }

        let consumption = ConsumptionEstimator::estimate(
            baseline,
            &snapshot.historical_consumption,
            month,
            &forecast,
            config,
        );

        let stock_after = (state.stock - consumption).max(Decimal::ZERO);

        // 補貨目標：安全庫存與最低庫存的中點
        let target = (baseline.safety_stock + baseline.stock_minimum) / Decimal::from(2);
        let mut deficit = (target - stock_after).max(Decimal::ZERO);

        // 低於安全庫存時至少補回安全水位
        if stock_after < baseline.safety_stock {
            deficit = deficit.max(baseline.safety_stock - stock_after);
        }

        let units_per_case = snapshot.units_per_case;
        let cases_to_order = if deficit > Decimal::ZERO && units_per_case > Decimal::ZERO {
            (deficit / units_per_case).ceil().to_u32().unwrap_or(0)
        } else {
            0
        };
        let units_to_order = Decimal::from(cases_to_order) * units_per_case;

        let next_stock = stock_after + units_to_order;

        let daily = baseline.daily_consumption;
        let (coverage_days, stock_alert, reorder_date, request_date, arrival_date) =
            if daily > Decimal::ZERO {
                let max_days = Decimal::from(config.max_replenishment_days);
                let coverage = (next_stock / daily).min(max_days);

                let alarm_threshold = daily * Decimal::from(config.alarm_threshold_days());
                let alert = stock_after < alarm_threshold;

                let lead = Decimal::from(config.lead_time_days);
                let five = Decimal::from(5);
                let reorder = month_date + Duration::days(day_offset((coverage - lead).max(Decimal::ZERO)));
                let request =
                    month_date + Duration::days(day_offset((coverage - lead - five).max(Decimal::ZERO)));
                let arrival = month_date + Duration::days(day_offset((coverage - five).max(Decimal::ZERO)));

                (coverage, alert, Some(reorder), Some(request), Some(arrival))
            } else {
                (Decimal::ZERO, false, None, None, None)
            };

        let action = if cases_to_order > 0 {
            format!("Pedir {} cajas", cases_to_order)
        } else {
            "Stock suficiente".to_string()
        };

        let projection = MonthProjection {
            month: month_label(month, year),
            transit_days: config.transit_lead_days,
            opening_stock: state.stock.round_dp(2),
            estimated_consumption: consumption,
            stock_after_consumption: stock_after.round_dp(2),
            daily_consumption: daily.round_dp(2),
            safety_stock: baseline.safety_stock.round_dp(2),
            stock_minimum: baseline.stock_minimum.round_dp(2),
            reorder_point: baseline.reorder_point.round_dp(2),
            deficit: deficit.round_dp(2),
            cases_to_order,
            units_to_order: units_to_order.round_dp(2),
            in_transit_units: snapshot.in_transit_total(),
            replenishment_required: cases_to_order > 0,
            stock_alert,
            request_date,
            reorder_date,
            arrival_date,
            coverage_days: coverage_days.round_dp(2),
            action,
        };

        (projection, SimulationState { stock: next_stock })
    }
}

/// 覆蓋天數換算日期位移（向下取整）
fn day_offset(days: Decimal) -> i64 {
    days.to_i64().unwrap_or(0)
}
