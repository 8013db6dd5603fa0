//! WHERE compilation: implicit operators, value serialization, comparison
//! operators, helpers and association keys across dialects.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use sieve::prelude::*;
use sieve::sql::attribute::Prefix;

fn sql(cond: &Condition, dialect: Dialect) -> String {
    compile_where(cond, &CompileOptions::new(dialect)).unwrap().sql
}

fn sql_with(cond: &Condition, opts: &CompileOptions) -> String {
    compile_where(cond, opts).unwrap().sql
}

fn err(cond: &Condition, dialect: Dialect) -> WhereError {
    compile_where(cond, &CompileOptions::new(dialect)).unwrap_err()
}

fn ops(op: Op, value: impl Into<Condition>) -> Condition {
    Condition::map().entry(op, value)
}

// ============================================================================
// Top level
// ============================================================================

#[test]
fn test_empty_condition() {
    assert_eq!(sql(&Condition::map(), Dialect::Postgres), "");
    assert_eq!(sql(&Condition::List(vec![]), Dialect::Postgres), "");
}

#[test]
fn test_raw_condition() {
    assert_eq!(sql(&literal("lol=1"), Dialect::TSql), "lol=1");
}

#[test]
fn test_bare_string_is_rejected() {
    let e = err(&Condition::from("lol=1"), Dialect::TSql);
    assert!(matches!(e, WhereError::MalformedCondition { .. }));
}

#[test]
fn test_undefined_value() {
    let cond = Condition::map().entry("id", Condition::Undefined);
    assert_eq!(
        err(&cond, Dialect::TSql).to_string(),
        "WHERE parameter \"id\" has invalid \"undefined\" value"
    );

    let cond = Condition::map()
        .entry("id", 1)
        .entry("user", Condition::Undefined);
    assert_eq!(
        err(&cond, Dialect::Postgres).to_string(),
        "WHERE parameter \"user\" has invalid \"undefined\" value"
    );
}

#[test]
fn test_table_prefix() {
    let cond = Condition::map().entry("id", 1);
    let opts = CompileOptions::new(Dialect::TSql).with_table_prefix("User");
    assert_eq!(sql_with(&cond, &opts), "[User].[id] = 1");
}

#[test]
fn test_raw_prefix() {
    let cond = Condition::map().entry("id", 1);

    let opts = CompileOptions::new(Dialect::Postgres).with_raw_prefix("\"yolo\".\"User\"");
    assert_eq!(sql_with(&cond, &opts), "\"yolo\".\"User\".\"id\" = 1");

    let opts = CompileOptions::new(Dialect::TSql).with_raw_prefix("[yolo].[User]");
    assert_eq!(sql_with(&cond, &opts), "[yolo].[User].[id] = 1");

    let opts = CompileOptions::new(Dialect::MariaDb).with_raw_prefix("`yolo`.`User`");
    assert_eq!(sql_with(&cond, &opts), "`yolo`.`User`.`id` = 1");
}

#[test]
fn test_where_query_keyword() {
    let cond = Condition::map().entry("name", func("LOWER", vec!["DERP".into()]));
    let out = where_query(&cond, &CompileOptions::new(Dialect::TSql)).unwrap();
    assert_snapshot!(out.sql, @"WHERE [name] = LOWER(N'DERP')");

    let out = where_query(&cond, &CompileOptions::new(Dialect::Sqlite)).unwrap();
    assert_eq!(out.sql, "WHERE `name` = LOWER('DERP')");

    let vanished = Condition::map().entry("equipment", ops(Op::NotIn, Vec::<i32>::new()));
    let out = where_query(&vanished, &CompileOptions::new(Dialect::TSql)).unwrap();
    assert_eq!(out.sql, "");
}

// ============================================================================
// Implicit operators
// ============================================================================

#[test]
fn test_implicit_equality() {
    let cond = Condition::map().entry("id", 1);
    assert_eq!(sql(&cond, Dialect::Postgres), "\"id\" = 1");
    assert_eq!(sql(&cond, Dialect::MySql), "`id` = 1");
    assert_eq!(sql(&cond, Dialect::TSql), "[id] = 1");

    let cond = Condition::map().entry("id", "1");
    assert_eq!(sql(&cond, Dialect::Postgres), "\"id\" = '1'");
    assert_eq!(sql(&cond, Dialect::TSql), "[id] = N'1'");
}

#[test]
fn test_implicit_in() {
    let cond = Condition::map().entry("id", vec![1, 2]);
    assert_eq!(sql(&cond, Dialect::TSql), "[id] IN (1, 2)");

    let cond = Condition::map().entry("id", vec!["1", "2"]);
    assert_eq!(sql(&cond, Dialect::Postgres), "\"id\" IN ('1', '2')");
    assert_eq!(sql(&cond, Dialect::TSql), "[id] IN (N'1', N'2')");
}

#[test]
fn test_implicit_boolean() {
    let cond = Condition::map().entry("active", true);
    assert_eq!(sql(&cond, Dialect::Postgres), "\"active\" = true");
    assert_eq!(sql(&cond, Dialect::TSql), "[active] = 1");
    assert_eq!(sql(&cond, Dialect::Sqlite), "`active` = 1");
}

#[test]
fn test_implicit_null() {
    let cond = Condition::map().entry("deleted", Condition::Null);
    assert_eq!(sql(&cond, Dialect::TSql), "[deleted] IS NULL");
}

#[test]
fn test_implicit_date() {
    let birthday = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
    let cond = Condition::map().entry("birthday", birthday);

    assert_eq!(
        sql(&cond, Dialect::Postgres),
        "\"birthday\" = '2021-01-01 00:00:00.000 +00:00'"
    );
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "[birthday] = '2021-01-01 00:00:00.000 +00:00'"
    );
    assert_eq!(sql(&cond, Dialect::MariaDb), "`birthday` = '2021-01-01 00:00:00.000'");
    assert_eq!(sql(&cond, Dialect::MySql), "`birthday` = '2021-01-01 00:00:00'");
    assert_eq!(sql(&cond, Dialect::Snowflake), "\"birthday\" = '2021-01-01 00:00:00'");
    assert_eq!(sql(&cond, Dialect::Db2), "\"birthday\" = '2021-01-01 00:00:00'");
}

#[test]
fn test_implicit_nested_or() {
    let cond = Condition::map().entry("name", "a project").entry(
        "id",
        ops(
            Op::Or,
            vec![Condition::from(vec![1, 2, 3]), ops(Op::Gt, 10)],
        ),
    );
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "[name] = N'a project' AND ([id] IN (1, 2, 3) OR [id] > 10)"
    );
    assert_eq!(
        sql(&cond, Dialect::Postgres),
        "\"name\" = 'a project' AND (\"id\" IN (1, 2, 3) OR \"id\" > 10)"
    );
}

#[test]
fn test_implicit_column_and_function() {
    let cond = Condition::map().entry("col1", ops(Op::Col, "col2"));
    assert_eq!(sql(&cond, Dialect::TSql), "[col1] = [col2]");

    let cond = Condition::map().entry("col1", func("UPPER", vec![col("col2")]));
    assert_eq!(sql(&cond, Dialect::Postgres), "\"col1\" = UPPER(\"col2\")");
}

// ============================================================================
// Value serialization
// ============================================================================

#[test]
fn test_null_character() {
    let cond = Condition::map().entry("name", "here is a null char: \0");
    assert_eq!(sql(&cond, Dialect::Postgres), "\"name\" = E'here is a null char: \\000'");
    assert_eq!(sql(&cond, Dialect::MySql), "`name` = 'here is a null char: \\0'");
    assert_eq!(sql(&cond, Dialect::TSql), "[name] = N'here is a null char: \0'");
    assert_eq!(sql(&cond, Dialect::Sqlite), "`name` = 'here is a null char: \0'");
}

#[test]
fn test_buffer() {
    let cond = Condition::map().entry("field", Condition::buffer("Sequelize"));
    assert_eq!(sql(&cond, Dialect::Postgres), "\"field\" = E'\\\\x53657175656c697a65'");
    assert_eq!(sql(&cond, Dialect::Sqlite), "`field` = X'53657175656c697a65'");
    assert_eq!(sql(&cond, Dialect::MySql), "`field` = X'53657175656c697a65'");
    assert_eq!(sql(&cond, Dialect::Db2), "\"field\" = BLOB('Sequelize')");
    assert_eq!(sql(&cond, Dialect::TSql), "[field] = 0x53657175656c697a65");
}

#[test]
fn test_binary_buffer_on_db2() {
    let cond = Condition::map().entry("field", Condition::buffer(vec![0xde, 0xad, 0xbe, 0xef]));
    assert_eq!(sql(&cond, Dialect::Db2), "\"field\" = BLOB(X'deadbeef')");
}

#[test]
fn test_buffer_list() {
    let cond = Condition::map().entry(
        "field",
        vec![Condition::buffer("Sequelize1"), Condition::buffer("Sequelize2")],
    );
    assert_eq!(
        sql(&cond, Dialect::MariaDb),
        "`field` IN (X'53657175656c697a6531', X'53657175656c697a6532')"
    );
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "[field] IN (0x53657175656c697a6531, 0x53657175656c697a6532)"
    );
}

#[test]
fn test_floats() {
    let cond = Condition::map().entry("score", 2.5).entry("ratio", 3.0);
    assert_eq!(sql(&cond, Dialect::Postgres), "\"score\" = 2.5 AND \"ratio\" = 3");
}

#[test]
fn test_non_finite_float_rejected() {
    let cond = Condition::map().entry("score", f64::INFINITY);
    assert!(matches!(
        err(&cond, Dialect::Postgres),
        WhereError::MalformedCondition { .. }
    ));
}

// ============================================================================
// Op.eq / Op.ne / Op.not / Op.is
// ============================================================================

#[test]
fn test_eq() {
    assert_eq!(sql(&Condition::map().entry("id", ops(Op::Eq, 1)), Dialect::TSql), "[id] = 1");
    assert_eq!(
        sql(&Condition::map().entry("deleted", ops(Op::Eq, Condition::Null)), Dialect::TSql),
        "[deleted] IS NULL"
    );
    assert_eq!(
        sql(&Condition::map().entry("deleted", ops(Op::Eq, true)), Dialect::Postgres),
        "\"deleted\" = true"
    );
    assert_eq!(
        sql(&Condition::map().entry("id", ops(Op::Eq, vec![1, 2])), Dialect::Postgres),
        "\"id\" = ARRAY[1,2]"
    );
}

#[test]
fn test_eq_operands() {
    let cases = [
        (ops(Op::Eq, ops(Op::Col, "col2")), "\"col1\" = \"col2\""),
        (ops(Op::Eq, col("col2")), "\"col1\" = \"col2\""),
        (ops(Op::Eq, literal("literal")), "\"col1\" = literal"),
        (ops(Op::Eq, func("UPPER", vec![col("col2")])), "\"col1\" = UPPER(\"col2\")"),
        (ops(Op::Eq, cast(col("col"), "string")), "\"col1\" = CAST(\"col\" AS STRING)"),
        (ops(Op::Eq, ops(Op::Any, vec![2, 3, 4])), "\"col1\" = ANY (ARRAY[2,3,4])"),
        (ops(Op::Eq, ops(Op::Any, literal("literal"))), "\"col1\" = ANY (literal)"),
        (ops(Op::Eq, ops(Op::All, vec![2, 3, 4])), "\"col1\" = ALL (ARRAY[2,3,4])"),
        (ops(Op::Eq, ops(Op::All, literal("literal"))), "\"col1\" = ALL (literal)"),
    ];
    for (value, expected) in cases {
        let cond = Condition::map().entry("col1", value);
        assert_eq!(sql(&cond, Dialect::Postgres), expected);
    }
}

#[test]
fn test_ne() {
    let cases = [
        (ops(Op::Ne, 1), "\"col1\" != 1"),
        (ops(Op::Ne, vec![1, 2]), "\"col1\" != ARRAY[1,2]"),
        (ops(Op::Ne, Condition::Null), "\"col1\" IS NOT NULL"),
        (ops(Op::Ne, true), "\"col1\" != true"),
        (ops(Op::Ne, ops(Op::Col, "col2")), "\"col1\" != \"col2\""),
        (ops(Op::Ne, literal("literal")), "\"col1\" != literal"),
        (ops(Op::Ne, ops(Op::Any, vec![2, 3, 4])), "\"col1\" != ANY (ARRAY[2,3,4])"),
        (ops(Op::Ne, ops(Op::All, literal("literal"))), "\"col1\" != ALL (literal)"),
    ];
    for (value, expected) in cases {
        let cond = Condition::map().entry("col1", value);
        assert_eq!(sql(&cond, Dialect::Postgres), expected);
    }
}

#[test]
fn test_not() {
    let cond = Condition::map().entry("deleted", ops(Op::Not, true));
    assert_eq!(sql(&cond, Dialect::Postgres), "\"deleted\" IS NOT true");
    assert_eq!(sql(&cond, Dialect::TSql), "[deleted] IS NOT 1");
    assert_eq!(sql(&cond, Dialect::Sqlite), "`deleted` IS NOT 1");

    let cond = Condition::map().entry("deleted", ops(Op::Not, Condition::Null));
    assert_eq!(sql(&cond, Dialect::TSql), "[deleted] IS NOT NULL");

    let cond = Condition::map().entry("muscles", ops(Op::Not, 3));
    assert_eq!(sql(&cond, Dialect::TSql), "[muscles] != 3");
}

#[test]
fn test_is() {
    let cond = Condition::map().entry("deleted", ops(Op::Is, false));
    assert_eq!(sql(&cond, Dialect::Postgres), "\"deleted\" IS false");

    let cond = Condition::map().entry("deleted", ops(Op::Is, "yes"));
    assert!(matches!(
        err(&cond, Dialect::Postgres),
        WhereError::MalformedCondition { .. }
    ));
}

#[test]
fn test_ordering_comparisons() {
    let cond = Condition::map().entry("rank", ops(Op::Gt, 2));
    assert_eq!(sql(&cond, Dialect::TSql), "[rank] > 2");

    let cond = Condition::map().entry("created_at", ops(Op::Lt, ops(Op::Col, "updated_at")));
    assert_eq!(sql(&cond, Dialect::TSql), "[created_at] < [updated_at]");

    let cond = Condition::map()
        .entry("a", ops(Op::Gte, 1))
        .entry("b", ops(Op::Lte, 2));
    assert_eq!(sql(&cond, Dialect::TSql), "[a] >= 1 AND [b] <= 2");
}

// ============================================================================
// Op.between / Op.in
// ============================================================================

#[test]
fn test_between_strings() {
    let cond = Condition::map().entry("date", ops(Op::Between, vec!["2013-01-01", "2013-01-11"]));
    assert_eq!(
        sql(&cond, Dialect::Postgres),
        "\"date\" BETWEEN '2013-01-01' AND '2013-01-11'"
    );
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "[date] BETWEEN N'2013-01-01' AND N'2013-01-11'"
    );

    let cond = Condition::map().entry("date", ops(Op::NotBetween, vec!["2013-01-01", "2013-01-11"]));
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "[date] NOT BETWEEN N'2013-01-01' AND N'2013-01-11'"
    );
}

#[test]
fn test_between_dates() {
    let from = Utc.with_ymd_and_hms(2013, 1, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2013, 1, 11, 0, 0, 0).unwrap();
    let cond = Condition::map().entry("date", ops(Op::Between, vec![from, to]));

    assert_eq!(
        sql(&cond, Dialect::Postgres),
        "\"date\" BETWEEN '2013-01-01 00:00:00.000 +00:00' AND '2013-01-11 00:00:00.000 +00:00'"
    );
    assert_eq!(
        sql(&cond, Dialect::MySql),
        "`date` BETWEEN '2013-01-01 00:00:00' AND '2013-01-11 00:00:00'"
    );
    assert_eq!(
        sql(&cond, Dialect::MariaDb),
        "`date` BETWEEN '2013-01-01 00:00:00.000' AND '2013-01-11 00:00:00.000'"
    );
}

#[test]
fn test_between_epoch_millis_on_date_attribute() {
    let model = ModelAttributes::new().with(AttributeMeta::new("date").with_type(DataType::TimestampTz));
    let opts = CompileOptions::new(Dialect::Postgres).with_model(Arc::new(model));
    let cond = Condition::map().entry(
        "date",
        ops(Op::Between, vec![1_356_998_400_000_i64, 1_357_862_400_000_i64]),
    );
    assert_eq!(
        sql_with(&cond, &opts),
        "\"date\" BETWEEN '2013-01-01 00:00:00.000 +00:00' AND '2013-01-11 00:00:00.000 +00:00'"
    );
}

#[test]
fn test_between_and_not_between() {
    let cond = Condition::map().entry(
        "date",
        Condition::map()
            .entry(Op::Between, vec!["2012-12-10", "2013-01-02"])
            .entry(Op::NotBetween, vec!["2013-01-04", "2013-01-20"]),
    );
    assert_snapshot!(
        sql(&cond, Dialect::TSql),
        @"([date] BETWEEN N'2012-12-10' AND N'2013-01-02' AND [date] NOT BETWEEN N'2013-01-04' AND N'2013-01-20')"
    );
}

#[test]
fn test_between_requires_two_values() {
    let cond = Condition::map().entry("date", ops(Op::Between, vec![1]));
    assert!(matches!(
        err(&cond, Dialect::Postgres),
        WhereError::MalformedCondition { .. }
    ));
}

#[test]
fn test_in() {
    let cond = Condition::map().entry("equipment", ops(Op::In, vec![1, 3]));
    assert_eq!(sql(&cond, Dialect::TSql), "[equipment] IN (1, 3)");

    let cond = Condition::map().entry("equipment", ops(Op::In, Vec::<i32>::new()));
    assert_eq!(sql(&cond, Dialect::TSql), "[equipment] IN (NULL)");

    let cond = Condition::map().entry(
        "equipment",
        ops(
            Op::In,
            literal("(select order_id from product_orders where product_id = 3)"),
        ),
    );
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "[equipment] IN (select order_id from product_orders where product_id = 3)"
    );
}

#[test]
fn test_not_in() {
    let cond = Condition::map().entry("equipment", ops(Op::NotIn, Vec::<i32>::new()));
    assert_eq!(sql(&cond, Dialect::TSql), "");

    let cond = Condition::map().entry("equipment", ops(Op::NotIn, vec![4, 19]));
    assert_eq!(sql(&cond, Dialect::TSql), "[equipment] NOT IN (4, 19)");

    let cond = Condition::map().entry(
        "equipment",
        ops(
            Op::NotIn,
            literal("(select order_id from product_orders where product_id = 3)"),
        ),
    );
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "[equipment] NOT IN (select order_id from product_orders where product_id = 3)"
    );
}

// ============================================================================
// LIKE family
// ============================================================================

#[test]
fn test_like() {
    let cond = Condition::map().entry("username", ops(Op::Like, "%swagger"));
    assert_eq!(sql(&cond, Dialect::Postgres), "\"username\" LIKE '%swagger'");
    assert_eq!(sql(&cond, Dialect::TSql), "[username] LIKE N'%swagger'");
}

#[test]
fn test_like_quantified() {
    let words = || vec!["foo", "bar", "baz"];
    let cases = [
        (Op::Like, Op::Any, "\"userId\" LIKE ANY (ARRAY['foo','bar','baz'])"),
        (Op::ILike, Op::Any, "\"userId\" ILIKE ANY (ARRAY['foo','bar','baz'])"),
        (Op::NotLike, Op::Any, "\"userId\" NOT LIKE ANY (ARRAY['foo','bar','baz'])"),
        (Op::NotILike, Op::Any, "\"userId\" NOT ILIKE ANY (ARRAY['foo','bar','baz'])"),
        (Op::Like, Op::All, "\"userId\" LIKE ALL (ARRAY['foo','bar','baz'])"),
        (Op::ILike, Op::All, "\"userId\" ILIKE ALL (ARRAY['foo','bar','baz'])"),
        (Op::NotLike, Op::All, "\"userId\" NOT LIKE ALL (ARRAY['foo','bar','baz'])"),
        (Op::NotILike, Op::All, "\"userId\" NOT ILIKE ALL (ARRAY['foo','bar','baz'])"),
    ];
    for (like, quantifier, expected) in cases {
        let cond = Condition::map().entry("userId", ops(like, ops(quantifier, words())));
        assert_eq!(sql(&cond, Dialect::Postgres), expected);
    }
}

#[test]
fn test_like_sugar() {
    let cases = [
        (Op::StartsWith, "swagger%"),
        (Op::EndsWith, "%swagger"),
        (Op::Substring, "%swagger%"),
    ];
    for (op, pattern) in cases {
        for value in [Condition::from("swagger"), literal("swagger")] {
            let cond = Condition::map().entry("username", ops(op, value));
            assert_eq!(
                sql(&cond, Dialect::Postgres),
                format!("\"username\" LIKE '{}'", pattern)
            );
            assert_eq!(
                sql(&cond, Dialect::TSql),
                format!("[username] LIKE N'{}'", pattern)
            );
        }
    }
}

#[test]
fn test_ilike_unsupported() {
    let cond = Condition::map().entry("username", ops(Op::ILike, "%a"));
    let e = err(&cond, Dialect::MySql);
    assert!(e.is_capability_error());
    assert_eq!(e.to_string(), "ILIKE is not supported by the mysql dialect");

    assert_eq!(sql(&cond, Dialect::Snowflake), "\"username\" ILIKE '%a'");
}

// ============================================================================
// REGEXP family and full-text match
// ============================================================================

#[test]
fn test_regexp() {
    let cond = Condition::map().entry("username", ops(Op::Regexp, "^sw.*r$"));
    assert_eq!(sql(&cond, Dialect::MariaDb), "`username` REGEXP '^sw.*r$'");
    assert_eq!(sql(&cond, Dialect::MySql), "`username` REGEXP '^sw.*r$'");
    assert_eq!(sql(&cond, Dialect::Snowflake), "\"username\" REGEXP '^sw.*r$'");
    assert_eq!(sql(&cond, Dialect::Postgres), "\"username\" ~ '^sw.*r$'");

    let cond = Condition::map().entry("username", ops(Op::NotRegexp, "^sw.*r$"));
    assert_eq!(sql(&cond, Dialect::MySql), "`username` NOT REGEXP '^sw.*r$'");
    assert_eq!(sql(&cond, Dialect::Postgres), "\"username\" !~ '^sw.*r$'");
}

#[test]
fn test_regexp_newline() {
    let cond = Condition::map().entry("newline", ops(Op::Regexp, "^new\nline$"));
    assert_eq!(sql(&cond, Dialect::MySql), "`newline` REGEXP '^new\\nline$'");
    assert_eq!(sql(&cond, Dialect::MariaDb), "`newline` REGEXP '^new\\nline$'");
    assert_eq!(sql(&cond, Dialect::Snowflake), "\"newline\" REGEXP '^new\nline$'");
    assert_eq!(sql(&cond, Dialect::Postgres), "\"newline\" ~ '^new\nline$'");
}

#[test]
fn test_case_insensitive_regexp() {
    let cond = Condition::map().entry("username", ops(Op::IRegexp, "^sw.*r$"));
    assert_eq!(sql(&cond, Dialect::Postgres), "\"username\" ~* '^sw.*r$'");

    let cond = Condition::map().entry("username", ops(Op::NotIRegexp, "^new\nline$"));
    assert_eq!(sql(&cond, Dialect::Postgres), "\"username\" !~* '^new\nline$'");

    assert!(err(&cond, Dialect::MySql).is_capability_error());
}

#[test]
fn test_regexp_unsupported() {
    let cond = Condition::map().entry("username", ops(Op::Regexp, "^a"));
    for dialect in [Dialect::Sqlite, Dialect::TSql, Dialect::Db2] {
        assert_eq!(
            err(&cond, dialect),
            WhereError::UnsupportedFeature {
                operator: "REGEXP".into(),
                dialect: dialect.dialect().name(),
            }
        );
    }
}

#[test]
fn test_match() {
    let cond = Condition::map().entry(
        "username",
        ops(Op::Match, func("to_tsvector", vec!["swagger".into()])),
    );
    assert_eq!(
        sql(&cond, Dialect::Postgres),
        "\"username\" @@ to_tsvector('swagger')"
    );
    assert!(err(&cond, Dialect::MySql).is_capability_error());
}

// ============================================================================
// Helpers: where(), col(), fn(), attributes
// ============================================================================

#[test]
fn test_where_helper() {
    let cond = where_value(func("lower", vec![col("name")]), Condition::Null);
    assert_eq!(sql(&cond, Dialect::TSql), "lower([name]) IS NULL");

    let cond = where_(func("SUM", vec![col("hours")]), Op::Gt, 0);
    assert_eq!(sql(&cond, Dialect::TSql), "SUM([hours]) > 0");

    let cond = where_(func("lower", vec![col("name")]), Op::Ne, Condition::Null);
    assert_eq!(sql(&cond, Dialect::TSql), "lower([name]) IS NOT NULL");

    let cond = where_(func("lower", vec![col("name")]), Op::Not, Condition::Null);
    assert_eq!(sql(&cond, Dialect::TSql), "lower([name]) IS NOT NULL");

    let cond = where_(col("hours"), Op::Between, vec![0, 5]);
    assert_eq!(sql(&cond, Dialect::TSql), "[hours] BETWEEN 0 AND 5");

    let cond = where_(literal("'hours'"), Op::Eq, "hours");
    assert_eq!(sql(&cond, Dialect::TSql), "'hours' = N'hours'");
}

#[test]
fn test_where_helper_list() {
    let cond = Condition::List(vec![
        where_(func("SUM", vec![col("hours")]), Op::Gt, 0),
        where_value(func("lower", vec![col("name")]), Condition::Null),
    ]);
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "(SUM([hours]) > 0 AND lower([name]) IS NULL)"
    );
}

#[test]
fn test_where_helper_with_attribute() {
    let attribute = AttributeMeta::new("id")
        .with_field("internal_id")
        .with_table("user");
    let cond = where_(attribute, Op::Eq, 1);
    assert_eq!(sql(&cond, Dialect::TSql), "[user].[internal_id] = 1");
}

#[test]
fn test_model_field_names() {
    let model = ModelAttributes::new().with(AttributeMeta::new("userId").with_field("user_id"));
    let opts = CompileOptions::new(Dialect::Postgres).with_model(Arc::new(model));
    let cond = Condition::map().entry("userId", 5);
    assert_eq!(sql_with(&cond, &opts), "\"user_id\" = 5");
}

#[test]
fn test_unknown_attribute() {
    let model = ModelAttributes::new().with(AttributeMeta::new("id"));
    let opts = CompileOptions::new(Dialect::Postgres).with_model(Arc::new(model));
    let cond = Condition::map().entry("nickname", "x");
    assert_eq!(
        compile_where(&cond, &opts).unwrap_err(),
        WhereError::UnknownAttribute {
            path: "nickname".into()
        }
    );
}

// ============================================================================
// Op.col and association keys
// ============================================================================

#[test]
fn test_column_references() {
    let cond = Condition::map().entry("userId", ops(Op::Col, "user.id"));
    assert_eq!(sql(&cond, Dialect::TSql), "[userId] = [user].[id]");

    let cond = Condition::map().entry("userId", ops(Op::Gt, ops(Op::Col, "user.id")));
    assert_eq!(sql(&cond, Dialect::TSql), "[userId] > [user].[id]");
}

#[test]
fn test_association_keys() {
    let cond = Condition::map().entry("$organization.id$", ops(Op::Col, "user.organizationId"));
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "[organization].[id] = [user].[organizationId]"
    );

    let cond = Condition::map().entry(
        "$offer.organization.id$",
        ops(Op::Col, "offer.user.organizationId"),
    );
    assert_eq!(
        sql(&cond, Dialect::TSql),
        "[offer->organization].[id] = [offer->user].[organizationId]"
    );
    assert_eq!(
        sql(&cond, Dialect::Postgres),
        "\"offer->organization\".\"id\" = \"offer->user\".\"organizationId\""
    );
}

#[test]
fn test_association_keys_ignore_prefix() {
    let opts = CompileOptions::new(Dialect::TSql).with_table_prefix("User");
    let cond = Condition::map()
        .entry("organization.id", 3)
        .entry("id", 1);
    assert_eq!(sql_with(&cond, &opts), "[organization].[id] = 3 AND [User].[id] = 1");
}

// ============================================================================
// Parameterized output
// ============================================================================

#[test]
fn test_parameterized() {
    let cond = Condition::map()
        .entry("name", "a project")
        .entry("id", ops(Op::Or, vec![Condition::from(vec![1, 2]), ops(Op::Gt, 10)]))
        .entry("deleted", Condition::Null);

    let out = compile_where(&cond, &CompileOptions::new(Dialect::TSql).parameterized()).unwrap();
    assert_eq!(
        out.sql,
        "[name] = @p1 AND ([id] IN (@p2, @p3) OR [id] > @p4) AND [deleted] IS NULL"
    );
    assert_eq!(
        out.binds,
        vec![
            Literal::String("a project".into()),
            Literal::Int(1),
            Literal::Int(2),
            Literal::Int(10),
        ]
    );

    let out = compile_where(&cond, &CompileOptions::new(Dialect::MySql).parameterized()).unwrap();
    assert_eq!(
        out.sql,
        "`name` = ? AND (`id` IN (?, ?) OR `id` > ?) AND `deleted` IS NULL"
    );
}

#[test]
fn test_prefix_variants_compile_identically() {
    let cond = Condition::map().entry("id", 1);
    let table = CompileOptions::new(Dialect::Postgres).with_table_prefix("User");
    let mut raw = CompileOptions::new(Dialect::Postgres);
    raw.prefix = Some(Prefix::Raw("\"User\"".into()));
    assert_eq!(sql_with(&cond, &table), sql_with(&cond, &raw));
}
