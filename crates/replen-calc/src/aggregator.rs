//! 結果彙整
//!
//! 把基準數值、逐月模擬結果與起始水位整合為單品的
//! 完整預測結果，並計算報表頁首的摘要指標。

use chrono::{Duration, NaiveDate};
use replen_core::{
    Baseline, MonthProjection, ProductProjection, ProductSnapshot, ProjectionConfig,
    NO_INFORMATION,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::simulation::ReorderSimulator;

/// 結果彙整器
pub struct ResultAggregator;

impl ResultAggregator {
    /// 組裝單品完整預測結果
    pub fn assemble(
        snapshot: &ProductSnapshot,
        baseline: Baseline,
        months: Vec<MonthProjection>,
        config: &ProjectionConfig,
        start_date: NaiveDate,
    ) -> ProductProjection {
        let consumption_before_arrival =
            ReorderSimulator::consumption_before_arrival(&baseline, config);
        let physical_stock =
            (snapshot.physical_stock - consumption_before_arrival).max(Decimal::ZERO);
        let in_transit_units = snapshot.in_transit_total();
        let total_stock = physical_stock + in_transit_units;

        // 以再訂購點衡量的初始缺口
        let initial_deficit = (baseline.reorder_point - total_stock).max(Decimal::ZERO);
        let units_per_case = snapshot.units_per_case;
        let initial_cases_to_order =
            if initial_deficit > Decimal::ZERO && units_per_case > Decimal::ZERO {
                (initial_deficit / units_per_case).ceil().to_u32().unwrap_or(0)
            } else {
                0
            };
        let initial_units_to_order = Decimal::from(initial_cases_to_order) * units_per_case;

        let daily = baseline.daily_consumption;
        let (coverage_days, replenishment_frequency, replenishment_date) =
            if daily > Decimal::ZERO {
                let max_days = Decimal::from(config.max_replenishment_days);
                let coverage = (total_stock / daily).min(max_days);
                let frequency = (baseline.reorder_point / daily).min(max_days);

                let lead = Decimal::from(config.lead_time_days);
                let offset = (frequency - lead).max(Decimal::ZERO).to_i64().unwrap_or(0);
                let date = start_date + Duration::days(offset);

                (coverage, frequency, Some(date))
            } else {
                (Decimal::ZERO, Decimal::ZERO, None)
            };

        // 首張在途 PO 以曆日估到貨（沿用既有報表口徑，與
        // 模擬的營業日錨定刻意不同）
        let first_po_arrival_date = if config.transit_lead_days > 0 {
            Some(start_date + Duration::days(config.transit_lead_days as i64))
        } else {
            None
        };

        let (code, description) = Self::sanitize_identity(snapshot);

        ProductProjection {
            code,
            description,
            start_date,
            units_per_case,
            physical_stock: physical_stock.round_dp(2),
            in_transit_units: in_transit_units.round_dp(2),
            total_stock: total_stock.round_dp(2),
            baseline,
            consumption_before_arrival: consumption_before_arrival.round_dp(2),
            initial_deficit: initial_deficit.round_dp(2),
            initial_cases_to_order,
            initial_units_to_order: initial_units_to_order.round_dp(2),
            coverage_days: coverage_days.round_dp(2),
            replenishment_frequency: replenishment_frequency.round_dp(2),
            replenishment_date,
            first_po_arrival_date,
            historical_consumption: snapshot.historical_consumption.clone(),
            projections: months,
            config: config.clone(),
        }
    }

    /// 識別欄位缺值時以佔位字串輸出
    fn sanitize_identity(snapshot: &ProductSnapshot) -> (String, String) {
        let code = if snapshot.code.trim().is_empty() {
            NO_INFORMATION.to_string()
        } else {
            snapshot.code.clone()
        };
        let description = if snapshot.description.trim().is_empty() {
            NO_INFORMATION.to_string()
        } else {
            snapshot.description.clone()
        };
        (code, description)
    }
}
