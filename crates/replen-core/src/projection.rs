//! 預測結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::baseline::Baseline;
use crate::config::ProjectionConfig;
use crate::product::ConsumptionRecord;

/// 單月預測紀錄
///
/// 模擬每推進一個月產出一筆，產出後不再變動。里程碑
/// 日期在日均消耗為零時不適用，以 `None` 表示。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthProjection {
    /// 月份標籤，例如 "ABR-2025"
    pub month: String,

    /// 在途運輸天數
    pub transit_days: u32,

    /// 月初庫存
    pub opening_stock: Decimal,

    /// 估算月消耗
    pub estimated_consumption: Decimal,

    /// 消耗後庫存（下限 0）
    pub stock_after_consumption: Decimal,

    /// 日均消耗
    pub daily_consumption: Decimal,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 最低庫存
    pub stock_minimum: Decimal,

    /// 再訂購點
    pub reorder_point: Decimal,

    /// 相對補貨目標的缺口
    pub deficit: Decimal,

    /// 應訂購箱數
    pub cases_to_order: u32,

    /// 應訂購單位數（箱數 × 每箱單位數）
    pub units_to_order: Decimal,

    /// 在途單位數（已下單未到貨）
    pub in_transit_units: Decimal,

    /// 是否需要補貨
    pub replenishment_required: bool,

    /// 庫存警報（消耗後庫存低於警報門檻）
    pub stock_alert: bool,

    /// 請購日期
    pub request_date: Option<NaiveDate>,

    /// 再訂購日期
    pub reorder_date: Option<NaiveDate>,

    /// 到貨日期
    pub arrival_date: Option<NaiveDate>,

    /// 覆蓋天數（補貨後庫存可支撐的天數，有上限）
    pub coverage_days: Decimal,

    /// 建議動作，例如 "Pedir 3 cajas"
    pub action: String,
}

/// 單品完整預測結果
///
/// 識別欄位、基準數值、6 個月的逐月預測與產出時使用的
/// 配置快照；交付外部序列化層的最終形狀。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProjection {
    /// SKU 代碼
    pub code: String,

    /// 品名
    pub description: String,

    /// 預測起始日
    pub start_date: NaiveDate,

    /// 每箱單位數
    pub units_per_case: Decimal,

    /// 扣除到貨前消耗後的實體庫存
    pub physical_stock: Decimal,

    /// 在途單位總數
    pub in_transit_units: Decimal,

    /// 模擬起始總庫存（實體 + 在途）
    pub total_stock: Decimal,

    /// 基準數值
    pub baseline: Baseline,

    /// 到貨前投影消耗
    pub consumption_before_arrival: Decimal,

    /// 以再訂購點衡量的初始缺口
    pub initial_deficit: Decimal,

    /// 初始應訂購箱數
    pub initial_cases_to_order: u32,

    /// 初始應訂購單位數
    pub initial_units_to_order: Decimal,

    /// 初始覆蓋天數
    pub coverage_days: Decimal,

    /// 補貨頻率（天）
    pub replenishment_frequency: Decimal,

    /// 初始補貨日期
    pub replenishment_date: Option<NaiveDate>,

    /// 首張在途 PO 預計到貨日
    pub first_po_arrival_date: Option<NaiveDate>,

    /// 歷史月消耗（輸入回放，供報表繪製）
    pub historical_consumption: Vec<ConsumptionRecord>,

    /// 逐月預測（長度 = 預測期月數）
    pub projections: Vec<MonthProjection>,

    /// 產出本結果使用的配置快照
    pub config: ProjectionConfig,
}
