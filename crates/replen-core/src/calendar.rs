//! 工作日曆模型
//!
//! 在途運輸與補貨里程碑的營業日推算。

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 工作日曆
///
/// 預設週一到週五為營業日；節假日另行配置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkCalendar {
    /// 營業日遮罩（索引 0 = 週一, 1 = 週二, ..., 6 = 週日）
    pub working_days: [bool; 7],

    /// 節假日列表
    pub holidays: Vec<NaiveDate>,
}

impl WorkCalendar {
    /// 創建標準工作日曆（週一到週五）
    pub fn weekdays() -> Self {
        Self {
            working_days: [true, true, true, true, true, false, false],
            holidays: Vec::new(),
        }
    }

    /// 建構器模式：設置節假日
    pub fn with_holidays(mut self, holidays: Vec<NaiveDate>) -> Self {
        self.holidays = holidays;
        self.holidays.sort();
        self
    }

    /// 添加節假日
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if !self.holidays.contains(&date) {
            self.holidays.push(date);
            self.holidays.sort();
        }
    }

    /// 檢查是否為營業日
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        if self.holidays.contains(&date) {
            return false;
        }

        let weekday_index = date.weekday().num_days_from_monday() as usize;
        self.working_days[weekday_index]
    }

    /// 向前推算 n 個營業日
    ///
    /// 逐日前進，只有營業日計入天數；n 為零或負數時
    /// 直接返回起始日期。
    pub fn advance_business_days(&self, start_date: NaiveDate, days: i64) -> NaiveDate {
        let mut current = start_date;
        let mut remaining = days;

        while remaining > 0 {
            current = current.succ_opt().expect("日期溢出");
            if self.is_business_day(current) {
                remaining -= 1;
            }
        }

        current
    }
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::weekdays()
    }
}
