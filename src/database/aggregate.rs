use sea_orm::sea_query::{Alias, Expr, Func, IntoColumnRef, SimpleExpr};

/// `CAST(SUM(col) AS bigint)`
///
/// Postgres 对 bigint 求和返回 numeric，统一转回 bigint 以便按 i64 读取。
/// 空集合时结果为 NULL，读取端用 `Option<i64>`。
pub fn sum_bigint<C: IntoColumnRef>(col: C) -> SimpleExpr {
    Func::cast_as(Expr::col(col).sum(), Alias::new("bigint")).into()
}
