//! 產品快照模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 識別欄位缺值時的佔位字串（沿用來源系統的輸出格式）
pub const NO_INFORMATION: &str = "Sin información";

/// 月份縮寫（西班牙文，沿用來源系統的輸出格式）
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
];

/// 取得月份縮寫（month 取 1..=12）
pub fn month_abbreviation(month: u32) -> &'static str {
    let index = month.clamp(1, 12) as usize - 1;
    MONTH_ABBREVIATIONS[index]
}

/// 月份標籤，例如 "ABR-2025"
pub fn month_label(month: u32, year: i32) -> String {
    format!("{}-{}", month_abbreviation(month), year)
}

/// 單月歷史消耗紀錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    /// 月份（1-12）
    pub month: u32,

    /// 年份
    pub year: i32,

    /// 消耗量
    pub quantity: Decimal,
}

impl ConsumptionRecord {
    /// 創建新的歷史消耗紀錄
    pub fn new(month: u32, year: i32, quantity: Decimal) -> Self {
        Self {
            month,
            year,
            quantity,
        }
    }
}

/// 產品快照
///
/// 一次預測執行的唯讀輸入；數值欄位由外部載入層預先
/// 轉型完成，這裡只做防衛性正規化（每箱單位數 0 視為 1、
/// 負的在途數量視為 0）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// SKU 代碼（唯一）
    pub code: String,

    /// 品名
    pub description: String,

    /// 每箱單位數
    pub units_per_case: Decimal,

    /// 現有實體庫存
    pub physical_stock: Decimal,

    /// 歷史月消耗（依時間排序）
    pub historical_consumption: Vec<ConsumptionRecord>,

    /// 計劃員手動調整的投影消耗
    pub manual_projected_consumption: Decimal,

    /// 在途採購訂單（PO 編號 → 數量）
    pub in_transit_orders: HashMap<String, Decimal>,
}

impl ProductSnapshot {
    /// 創建新的產品快照
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            units_per_case: Decimal::ONE,
            physical_stock: Decimal::ZERO,
            historical_consumption: Vec::new(),
            manual_projected_consumption: Decimal::ZERO,
            in_transit_orders: HashMap::new(),
        }
    }

    /// 建構器模式：設置每箱單位數（0 或負數正規化為 1）
    pub fn with_units_per_case(mut self, units_per_case: Decimal) -> Self {
        self.units_per_case = if units_per_case <= Decimal::ZERO {
            Decimal::ONE
        } else {
            units_per_case
        };
        self
    }

    /// 建構器模式：設置實體庫存（負數正規化為 0）
    pub fn with_physical_stock(mut self, physical_stock: Decimal) -> Self {
        self.physical_stock = physical_stock.max(Decimal::ZERO);
        self
    }

    /// 建構器模式：設置歷史月消耗（自動依年月排序）
    pub fn with_historical_consumption(mut self, mut records: Vec<ConsumptionRecord>) -> Self {
        records.sort_by_key(|r| (r.year, r.month));
        self.historical_consumption = records;
        self
    }

    /// 添加單月歷史消耗並維持時間順序
    pub fn add_consumption(&mut self, record: ConsumptionRecord) {
        self.historical_consumption.push(record);
        self.historical_consumption.sort_by_key(|r| (r.year, r.month));
    }

    /// 建構器模式：設置手動投影消耗
    pub fn with_manual_projected_consumption(mut self, quantity: Decimal) -> Self {
        self.manual_projected_consumption = quantity;
        self
    }

    /// 建構器模式：添加在途採購訂單（負數正規化為 0）
    pub fn with_in_transit_order(mut self, po_id: impl Into<String>, quantity: Decimal) -> Self {
        self.in_transit_orders
            .insert(po_id.into(), quantity.max(Decimal::ZERO));
        self
    }

    /// 在途單位總數
    pub fn in_transit_total(&self) -> Decimal {
        self.in_transit_orders.values().copied().sum()
    }

    /// 檢查 SKU 代碼是否有效（缺碼的資料列不參與計算）
    pub fn has_valid_code(&self) -> bool {
        let code = self.code.trim();
        !code.is_empty() && code != NO_INFORMATION
    }
}
