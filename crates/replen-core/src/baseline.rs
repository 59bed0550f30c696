//! 單品基準數值推導

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ProjectionConfig;
use crate::product::ProductSnapshot;

/// 單品基準數值
///
/// 每個 SKU 在一次預測執行中只推導一次，模擬期間唯讀。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    /// 歷史平均月消耗
    pub average_monthly_consumption: Decimal,

    /// 總月消耗（歷史平均 + 手動投影調整）
    pub total_monthly_consumption: Decimal,

    /// 日均消耗（總月消耗 / 每月工作天數）
    pub daily_consumption: Decimal,

    /// 安全庫存（日均消耗 × 安全庫存天數）
    pub safety_stock: Decimal,

    /// 最低庫存（總月消耗 + 安全庫存）
    pub stock_minimum: Decimal,

    /// 再訂購點（日均消耗 × 再訂購點視窗）
    pub reorder_point: Decimal,
}

impl Baseline {
    /// 從產品快照推導基準數值
    pub fn derive(snapshot: &ProductSnapshot, config: &ProjectionConfig) -> Self {
        let history = &snapshot.historical_consumption;
        let average_monthly_consumption = if history.is_empty() {
            Decimal::ZERO
        } else {
            let total: Decimal = history.iter().map(|r| r.quantity).sum();
            total / Decimal::from(history.len() as u64)
        };

        let total_monthly_consumption =
            average_monthly_consumption + snapshot.manual_projected_consumption;

        // 除數至少為 1，避免配置為 0 時除零
        let divisor = Decimal::from(config.working_days_per_month.max(1));
        let daily_consumption = total_monthly_consumption / divisor;

        let safety_stock = daily_consumption * Decimal::from(config.safety_stock_days);
        let stock_minimum = total_monthly_consumption + safety_stock;
        let reorder_point = daily_consumption * Decimal::from(config.reorder_window_days);

        Self {
            average_monthly_consumption,
            total_monthly_consumption,
            daily_consumption,
            safety_stock,
            stock_minimum,
            reorder_point,
        }
    }
}
