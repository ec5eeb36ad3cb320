//! Tests for the typed field facade.

use super::*;
use crate::builder::{render, render_with};
use crate::config::RenderConfig;
use crate::expr::{and, case_when, not};
use chrono::{NaiveDate, TimeDelta};

fn sql(e: &dyn Expression) -> String {
    render(e).sql
}

fn age() -> Int {
    Int::new("users", "age")
}

fn name() -> Str {
    Str::new("users", "name")
}

// ==================== Construction ====================

#[test]
fn test_field_new() {
    assert_eq!(sql(&age()), "`users`.`age`");
    assert_eq!(sql(&Int::new("", "age")), "`age`");
}

#[test]
fn test_field_parse() {
    let f = Str::parse("users.email").unwrap();
    assert_eq!(sql(&f), "`users`.`email`");

    let err = Str::parse("users.bad name").unwrap_err();
    assert!(err.is_invalid_identifier());
}

#[test]
fn test_to_column_and_with_table() {
    let c = age().to_column().unwrap();
    assert_eq!(c.table(), Some("users"));
    assert_eq!(c.name(), "age");

    let moved = age().with_table("u2").unwrap();
    assert_eq!(sql(&moved), "`u2`.`age`");

    assert!(age().add(1).to_column().unwrap_err().is_not_a_column());
    assert!(age().add(1).with_table("u2").is_err());
}

#[test]
fn test_as_alias() {
    assert_eq!(sql(&age().as_alias("a")), "`users`.`age` AS `a`");
    assert_eq!(
        sql(&age().sum().as_alias("total")),
        "SUM(`users`.`age`) AS `total`"
    );
    assert_eq!(
        sql(&age().add(1).as_alias("next")),
        "(`users`.`age` + ?) AS `next`"
    );
}

// ==================== Comparisons ====================

#[test]
fn test_comparisons() {
    let stmt = render(age().eq(18).as_ref());
    assert_eq!(stmt.sql, "`users`.`age` = ?");
    assert_eq!(stmt.params, vec![Value::Int(18)]);

    assert_eq!(sql(age().neq(18).as_ref()), "`users`.`age` <> ?");
    assert_eq!(sql(age().gt(18).as_ref()), "`users`.`age` > ?");
    assert_eq!(sql(age().gte(18).as_ref()), "`users`.`age` >= ?");
    assert_eq!(sql(age().lt(18).as_ref()), "`users`.`age` < ?");
    assert_eq!(sql(age().lte(18).as_ref()), "`users`.`age` <= ?");

    let stmt = render(name().eq("bob").as_ref());
    assert_eq!(stmt.params, vec![Value::Text("bob".to_string())]);
}

#[test]
fn test_null_checks() {
    assert_eq!(sql(age().is_null().as_ref()), "`users`.`age` IS NULL");
    assert_eq!(sql(age().is_not_null().as_ref()), "`users`.`age` IS NOT NULL");
}

#[test]
fn test_in_values() {
    assert_eq!(
        sql(age().in_values([1, 2, 3]).as_ref()),
        "`users`.`age` IN (?,?,?)"
    );
    assert_eq!(sql(age().in_values([1]).as_ref()), "`users`.`age` = ?");
    assert_eq!(
        sql(age().in_values(Vec::<i64>::new()).as_ref()),
        "`users`.`age` IN (NULL)"
    );
    assert_eq!(
        sql(age().not_in([1, 2]).as_ref()),
        "`users`.`age` NOT IN (?,?)"
    );
    assert_eq!(
        sql(age().not_in(Vec::<i64>::new()).as_ref()),
        "`users`.`age` IS NOT NULL"
    );
}

#[test]
fn test_between() {
    let stmt = render(age().between(10, 20).as_ref());
    assert_eq!(stmt.sql, "`users`.`age` BETWEEN ? AND ?");
    assert_eq!(stmt.params, vec![Value::Int(10), Value::Int(20)]);

    assert_eq!(
        sql(age().not_between(10, 20).as_ref()),
        "`users`.`age` NOT BETWEEN ? AND ?"
    );
}

#[test]
fn test_optional_comparisons() {
    assert_eq!(sql(age().eq_opt(None::<i64>).as_ref()), "");
    assert_eq!(sql(age().eq_opt(Some(3)).as_ref()), "`users`.`age` = ?");
    assert_eq!(sql(age().in_values_opt(None::<Vec<i64>>).as_ref()), "");

    assert_eq!(
        sql(age().between_opt(Some(1), None::<i64>).as_ref()),
        "`users`.`age` >= ?"
    );
    assert_eq!(
        sql(age().between_opt(None::<i64>, Some(9)).as_ref()),
        "`users`.`age` <= ?"
    );
    assert_eq!(sql(age().between_opt(None::<i64>, None::<i64>).as_ref()), "");
    assert_eq!(
        sql(age().not_between_opt(Some(1), None::<i64>).as_ref()),
        "`users`.`age` < ?"
    );
}

#[test]
fn test_optional_filters_in_group() {
    let filter = and([age().gt_opt(None::<i64>), name().eq_opt(Some("x"))]);
    assert_eq!(sql(&filter), "`users`.`name` = ?");

    let filter = and([age().gt_opt(Some(1)), name().eq_opt(Some("x"))]);
    assert_eq!(sql(&filter), "(`users`.`age` > ? AND `users`.`name` = ?)");
}

#[test]
fn test_field_to_field() {
    let user_id = Int::new("users", "id");
    let order_user = Int::new("orders", "user_id");
    assert_eq!(
        sql(user_id.eq_field(&order_user).as_ref()),
        "`users`.`id` = `orders`.`user_id`"
    );
    assert_eq!(
        sql(user_id.gt_field(&order_user.add(1)).as_ref()),
        "`users`.`id` > (`orders`.`user_id` + ?)"
    );
}

#[test]
fn test_not_field_comparison() {
    assert_eq!(sql(&not(age().eq(1))), "`users`.`age` <> ?");
}

// ==================== Common functions ====================

#[test]
fn test_count_distinct_ifnull() {
    assert_eq!(sql(&age().count()), "COUNT(`users`.`age`)");
    assert_eq!(sql(&age().add(1).count()), "COUNT(`users`.`age` + ?)");
    assert_eq!(sql(&age().distinct()), "DISTINCT `users`.`age`");
    assert_eq!(sql(&age().distinct().count()), "COUNT(DISTINCT `users`.`age`)");
    assert_eq!(sql(&age().if_null(0)), "IFNULL(`users`.`age`, ?)");
}

#[test]
fn test_ordering() {
    assert_eq!(sql(&age().asc()), "`users`.`age` ASC");
    assert_eq!(sql(&age().desc()), "`users`.`age` DESC");
}

// ==================== Numeric ====================

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(sql(&age().add(1).mul(2)), "(`users`.`age` + ?) * ?");
    assert_eq!(sql(&age().mul(2).add(1)), "(`users`.`age` * ?) + ?");

    let (a, b, c, d) = (
        Int::new("", "a"),
        Int::new("", "b"),
        Int::new("", "c"),
        Int::new("", "d"),
    );
    assert_eq!(
        sql(&a.add_field(&b).modulo_field(&c.sub_field(&d))),
        "(`a` + `b`) MOD (`c` - `d`)"
    );
    assert_eq!(sql(&a.floor_div(2)), "`a` DIV ?");
    assert_eq!(sql(&a.div_field(&b)), "`a` / `b`");
}

#[test]
fn test_negation_and_functions() {
    assert_eq!(sql(&age().neg()), "-`users`.`age`");
    assert_eq!(sql(&age().add(1).neg()), "-(`users`.`age` + ?)");
    assert_eq!(sql(&age().abs()), "ABS(`users`.`age`)");
    assert_eq!(sql(&age().sub(1).abs()), "ABS(`users`.`age` - ?)");

    let stmt = render(&Float::new("", "price").round(2));
    assert_eq!(stmt.sql, "ROUND(`price`, ?)");
    assert_eq!(stmt.params, vec![Value::Int(2)]);

    assert_eq!(sql(&Float::new("", "price").floor()), "FLOOR(`price`)");
    assert_eq!(sql(&Float::new("", "price").ceil()), "CEIL(`price`)");
}

#[test]
fn test_aggregates() {
    assert_eq!(sql(age().sum().gt(100).as_ref()), "SUM(`users`.`age`) > ?");
    assert_eq!(sql(&age().avg()), "AVG(`users`.`age`)");
    assert_eq!(sql(&age().max()), "MAX(`users`.`age`)");
    assert_eq!(sql(&age().min()), "MIN(`users`.`age`)");
}

#[test]
fn test_unsigned_field() {
    let n = UInt::new("", "n");
    let stmt = render(n.add(5u64).eq(10u64).as_ref());
    assert_eq!(stmt.sql, "(`n` + ?) = ?");
    assert_eq!(stmt.params, vec![Value::UInt(5), Value::UInt(10)]);
}

// ==================== Strings ====================

#[test]
fn test_pattern_matching() {
    assert_eq!(sql(name().like("a%").as_ref()), "`users`.`name` LIKE ?");
    assert_eq!(sql(name().not_like("a%").as_ref()), "`users`.`name` NOT LIKE ?");
    assert_eq!(sql(name().regexp("^a").as_ref()), "`users`.`name` REGEXP ?");
    assert_eq!(sql(&not(name().like("a%"))), "`users`.`name` NOT LIKE ?");
}

#[test]
fn test_string_functions() {
    assert_eq!(sql(name().upper().eq("BOB").as_ref()), "UPPER(`users`.`name`) = ?");
    assert_eq!(sql(&name().lower()), "LOWER(`users`.`name`)");
    assert_eq!(sql(&name().trim()), "TRIM(`users`.`name`)");
    assert_eq!(sql(&name().length()), "CHAR_LENGTH(`users`.`name`)");
    assert_eq!(sql(&name().replace("a", "b")), "REPLACE(`users`.`name`, ?, ?)");
    assert_eq!(sql(&name().substring(1, 3)), "SUBSTRING(`users`.`name`, ?, ?)");
    assert_eq!(sql(&name().find_in_set("a,b")), "FIND_IN_SET(`users`.`name`, ?)");
}

#[test]
fn test_concat() {
    let first = Str::new("", "first");
    let last = Str::new("", "last");
    assert_eq!(sql(&first.concat(&last)), "CONCAT(`first`, `last`)");
    assert_eq!(sql(&first.concat(" ").concat(&last)), "CONCAT(CONCAT(`first`, ?), `last`)");
}

// ==================== Time ====================

#[test]
fn test_time_parts() {
    let created = Time::new("", "created_at");
    assert_eq!(sql(created.year().eq(2024).as_ref()), "YEAR(`created_at`) = ?");
    assert_eq!(sql(&created.month()), "MONTH(`created_at`)");
    assert_eq!(sql(&created.day()), "DAY(`created_at`)");
    assert_eq!(sql(&created.hour()), "HOUR(`created_at`)");
    assert_eq!(sql(&created.minute()), "MINUTE(`created_at`)");
    assert_eq!(sql(&created.second()), "SECOND(`created_at`)");
    assert_eq!(sql(&created.date()), "DATE(`created_at`)");
    assert_eq!(sql(&created.unix_timestamp()), "UNIX_TIMESTAMP(`created_at`)");
    assert_eq!(
        sql(&created.date_format("%Y-%m")),
        "DATE_FORMAT(`created_at`, ?)"
    );
}

#[test]
fn test_time_arithmetic() {
    let created = Time::new("", "created_at");
    let stmt = render(&created.add_duration(TimeDelta::seconds(90)));
    assert_eq!(stmt.sql, "DATE_ADD(`created_at`, INTERVAL ? MICROSECOND)");
    assert_eq!(stmt.params, vec![Value::Int(90_000_000)]);

    let stmt = render(&created.sub_duration(TimeDelta::milliseconds(5)));
    assert_eq!(stmt.sql, "DATE_SUB(`created_at`, INTERVAL ? MICROSECOND)");
    assert_eq!(stmt.params, vec![Value::Int(5_000)]);
}

#[test]
fn test_time_comparisons() {
    let created = Time::new("", "created_at");
    assert_eq!(sql(created.lt_field(&now()).as_ref()), "`created_at` < NOW()");
    assert_eq!(
        sql(created.gte_field(&current_timestamp()).as_ref()),
        "`created_at` >= CURRENT_TIMESTAMP"
    );

    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let stmt = render(
        created
            .between(day.and_hms_opt(0, 0, 0).unwrap(), day.and_hms_opt(23, 59, 59).unwrap())
            .as_ref(),
    );
    assert_eq!(stmt.sql, "`created_at` BETWEEN ? AND ?");
    assert!(matches!(stmt.params[0], Value::DateTime(_)));

    assert_eq!(sql(&Int::new("", "ts").from_unixtime()), "FROM_UNIXTIME(`ts`)");
}

// ==================== Bool ====================

#[test]
fn test_bool_field() {
    let active = Bool::new("", "active");
    let stmt = render(active.is_true().as_ref());
    assert_eq!(stmt.sql, "`active` = ?");
    assert_eq!(stmt.params, vec![Value::Bool(true)]);
    assert_eq!(render(active.is_false().as_ref()).params, vec![Value::Bool(false)]);
    assert_eq!(sql(&!active), "NOT `active`");
}

// ==================== CASE ====================

#[test]
fn test_case_field_in_comparison() {
    let label = case_when::<String>()
        .when(age().gte(18), "adult")
        .else_("minor");
    assert_eq!(
        sql(&label),
        "CASE WHEN (`users`.`age` >= ?) THEN ? ELSE ? END"
    );
    assert_eq!(
        sql(label.eq("adult").as_ref()),
        "CASE WHEN (`users`.`age` >= ?) THEN ? ELSE ? END = ?"
    );
}

#[test]
fn test_postgres_rendering() {
    let filter = and([age().add(1).gt(18), name().like("a%")]);
    let stmt = render_with(&filter, &RenderConfig::new().postgres());
    assert_eq!(
        stmt.sql,
        "((\"users\".\"age\" + $1) > $2 AND \"users\".\"name\" LIKE $3)"
    );
    assert_eq!(stmt.params.len(), 3);
}
