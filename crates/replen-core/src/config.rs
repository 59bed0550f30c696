//! 補貨預測配置模型

use serde::{Deserialize, Serialize};

/// 補貨預測參數配置
///
/// 不可變配置值，以參數形式傳入各元件；同時隨每筆結果
/// 輸出，供重現與稽核。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// 每月工作天數（日均消耗的除數）
    pub working_days_per_month: u32,

    /// 每月消耗天數（月消耗估算的乘數）
    ///
    /// 與 working_days_per_month 刻意不同（除以 22、乘以 20），
    /// 沿用既有業務口徑；在產品方釐清前不得合併。
    pub consumption_days_per_month: u32,

    /// 安全庫存天數
    pub safety_stock_days: u32,

    /// 再訂購點視窗（天）
    pub reorder_window_days: u32,

    /// 補貨提前期（天）
    pub lead_time_days: u32,

    /// 庫存警報天數
    pub alarm_days: u32,

    /// 警報額外預警天數
    pub alarm_margin_days: u32,

    /// 覆蓋天數上限
    pub max_replenishment_days: u32,

    /// 預測期長度（月）
    pub horizon_months: u32,

    /// 在途運輸營業日數（操作員提供）
    pub transit_lead_days: u32,

    /// 模型版本標記（寫入輸出供稽核）
    pub model_version: String,
}

impl ProjectionConfig {
    /// 建構器模式：設置在途運輸天數
    pub fn with_transit_lead_days(mut self, days: u32) -> Self {
        self.transit_lead_days = days;
        self
    }

    /// 建構器模式：設置預測期長度
    pub fn with_horizon_months(mut self, months: u32) -> Self {
        self.horizon_months = months;
        self
    }

    /// 建構器模式：設置補貨提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 庫存警報門檻天數（警報天數 + 額外預警天數）
    pub fn alarm_threshold_days(&self) -> u32 {
        self.alarm_days + self.alarm_margin_days
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            working_days_per_month: 22,
            consumption_days_per_month: 20,
            safety_stock_days: 19,
            reorder_window_days: 44,
            lead_time_days: 20,
            alarm_days: 22,
            alarm_margin_days: 10,
            max_replenishment_days: 22,
            horizon_months: 6,
            transit_lead_days: 0,
            model_version: "3.3-dynamic-v2".to_string(),
        }
    }
}
