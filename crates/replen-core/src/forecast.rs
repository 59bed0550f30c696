//! 外部預測模型介面
//!
//! 統計模型視為同步呼叫的黑盒；任何解析失敗都以
//! `Forecast::Unavailable` 表達，不會中斷批次。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 單一 (SKU, 月, 年) 的外部預測結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Forecast {
    /// 有可用預測：期望值與信賴區間
    Available {
        expected_value: Decimal,
        lower_bound: Decimal,
        upper_bound: Decimal,
    },

    /// 無可用預測（查無 SKU、日期無法解析、模型未載入等）
    Unavailable,
}

impl Forecast {
    /// 創建有界的可用預測
    pub fn available(expected_value: Decimal, lower_bound: Decimal, upper_bound: Decimal) -> Self {
        Self::Available {
            expected_value,
            lower_bound,
            upper_bound,
        }
    }

    /// 檢查是否有可用預測
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// 取得期望值（若有）
    pub fn expected(&self) -> Option<Decimal> {
        match self {
            Self::Available { expected_value, .. } => Some(*expected_value),
            Self::Unavailable => None,
        }
    }
}

/// 預測提供者
///
/// 要求 `Sync`：批次計算會跨單品平行查詢。
pub trait ForecastProvider: Sync {
    /// 查詢指定 SKU 在目標 (月, 年) 的預測
    fn forecast(&self, code: &str, month: u32, year: i32) -> Forecast;
}

/// 永遠無預測的提供者（估算退化為歷史/基準訊號）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoForecast;

impl ForecastProvider for NoForecast {
    fn forecast(&self, _code: &str, _month: u32, _year: i32) -> Forecast {
        Forecast::Unavailable
    }
}

/// 以內存映射為後盾的靜態提供者
///
/// 載入層把外部模型的預測結果預先解析後注入；查無對應
/// 鍵值時回傳 `Unavailable`。
#[derive(Debug, Clone, Default)]
pub struct StaticForecastProvider {
    entries: HashMap<(String, u32, i32), Forecast>,
}

impl StaticForecastProvider {
    /// 創建空的提供者
    pub fn new() -> Self {
        Self::default()
    }

    /// 注入單筆預測
    pub fn insert(&mut self, code: impl Into<String>, month: u32, year: i32, forecast: Forecast) {
        self.entries.insert((code.into(), month, year), forecast);
    }

    /// 建構器模式：注入單筆預測
    pub fn with_entry(
        mut self,
        code: impl Into<String>,
        month: u32,
        year: i32,
        forecast: Forecast,
    ) -> Self {
        self.insert(code, month, year, forecast);
        self
    }
}

impl ForecastProvider for StaticForecastProvider {
    fn forecast(&self, code: &str, month: u32, year: i32) -> Forecast {
        self.entries
            .get(&(code.to_string(), month, year))
            .cloned()
            .unwrap_or(Forecast::Unavailable)
    }
}
