//! 簡單預測示例
//!
//! 兩個單品的批次預測，結果以 JSON 輸出。
//!
//! ```bash
//! cargo run --example simple_projection
//! ```

use chrono::NaiveDate;
use replen::{
    ConsumptionRecord, Forecast, ProductSnapshot, ProjectionCalculator, ProjectionConfig,
    StaticForecastProvider, WorkCalendar,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    // 穩定消耗的單品，附一張在途 PO
    let stable = ProductSnapshot::new("SKU-100", "Detergente industrial 5L")
        .with_units_per_case(Decimal::from(12))
        .with_physical_stock(Decimal::from(450))
        .with_historical_consumption(vec![
            ConsumptionRecord::new(11, 2024, Decimal::from(300)),
            ConsumptionRecord::new(12, 2024, Decimal::from(320)),
            ConsumptionRecord::new(1, 2025, Decimal::from(310)),
            ConsumptionRecord::new(2, 2025, Decimal::from(330)),
            ConsumptionRecord::new(3, 2025, Decimal::from(340)),
        ])
        .with_in_transit_order("PO-7731", Decimal::from(120));

    // 成長中的單品，外部模型覆蓋 6 月
    let growing = ProductSnapshot::new("SKU-200", "Guantes de nitrilo caja x100")
        .with_units_per_case(Decimal::from(24))
        .with_physical_stock(Decimal::from(200))
        .with_historical_consumption(vec![
            ConsumptionRecord::new(1, 2025, Decimal::from(100)),
            ConsumptionRecord::new(2, 2025, Decimal::from(140)),
            ConsumptionRecord::new(3, 2025, Decimal::from(180)),
        ]);

    let provider = StaticForecastProvider::new().with_entry(
        "SKU-200",
        6,
        2025,
        Forecast::available(Decimal::from(12), Decimal::from(9), Decimal::from(15)),
    );

    let config = ProjectionConfig::default().with_transit_lead_days(5);
    let calculator = ProjectionCalculator::new(config, WorkCalendar::weekdays());

    let start_date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    let run = calculator.calculate(start_date, &[stable, growing], &provider)?;

    for warning in &run.warnings {
        eprintln!("[{:?}] {}: {}", warning.severity, warning.code, warning.message);
    }

    println!("{}", serde_json::to_string_pretty(&run.products)?);
    Ok(())
}
