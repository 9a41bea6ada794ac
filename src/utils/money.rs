//! 金额换算：数据库以分 (i64) 存储，接口以两位小数的 Decimal 交换

use rust_decimal::prelude::*;

use crate::error::{AppError, AppResult};

const DECIMAL_PLACES: u32 = 2;

/// Decimal -> 分。超过两位小数时四舍五入 (half away from zero)。
pub fn to_cents(amount: Decimal) -> AppResult<i64> {
    let rounded = amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| AppError::ValidationError(format!("Amount out of range: {amount}")))
}

/// 分 -> Decimal，固定两位小数
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, DECIMAL_PLACES)
}

/// 单价 × 数量，溢出时报错而不是回绕
pub fn line_subtotal(unit_price_cents: i64, quantity: i32) -> AppResult<i64> {
    unit_price_cents
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| AppError::ValidationError("Order line amount out of range".to_string()))
}

/// 正价格校验 + 换算；按分四舍五入后至少 1 分
pub fn positive_price_cents(price: Decimal) -> AppResult<i64> {
    let cents = to_cents(price)?;
    if cents <= 0 {
        return Err(AppError::ValidationError(
            "Price must be at least 0.01".to_string(),
        ));
    }
    Ok(cents)
}
