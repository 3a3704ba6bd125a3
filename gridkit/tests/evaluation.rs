//! End-to-end column evaluation over derived records.

use std::thread;

use chrono::{NaiveDate, NaiveDateTime};
use gridkit::grid::render_grid;
use gridkit::{Accessor, BuildError, ColumnBuilder, DisplayEnum, FormatError, FormatOptions, Record};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, DisplayEnum)]
enum Tier {
    #[display(name = "Gold member")]
    Gold,
    #[description("Silver (legacy)")]
    Silver,
    Bronze,
}

#[derive(Debug, Clone, Record)]
struct Account {
    #[column(name = "Account")]
    name: String,
    #[column(format = "N2")]
    balance: Decimal,
    opened: NaiveDate,
    last_login: Option<NaiveDateTime>,
    active: bool,
    tier: Tier,
    score: f64,
}

fn accounts() -> Vec<Account> {
    vec![
        Account {
            name: "Ada".to_string(),
            balance: Decimal::new(123_456_789, 3),
            opened: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            last_login: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(8, 30, 0),
            active: true,
            tier: Tier::Gold,
            score: 0.875,
        },
        Account {
            name: "Grace".to_string(),
            balance: Decimal::new(-5_000, 2),
            opened: NaiveDate::from_ymd_opt(2021, 7, 4).unwrap(),
            last_login: None,
            active: false,
            tier: Tier::Silver,
            score: 0.5,
        },
        Account {
            name: "Linus".to_string(),
            balance: Decimal::ZERO,
            opened: NaiveDate::from_ymd_opt(2022, 11, 30).unwrap(),
            last_login: None,
            active: true,
            tier: Tier::Bronze,
            score: 1.0,
        },
    ]
}

fn cell(builder: impl FnOnce(&mut ColumnBuilder<Account>), record: &Account) -> Option<String> {
    let mut columns = ColumnBuilder::new();
    builder(&mut columns);
    let columns = columns.build().unwrap();
    columns.iter().next().unwrap().render(record).unwrap()
}

#[test]
fn test_numeric_format_matches_standard_formatting() {
    let ada = &accounts()[0];
    let patterns = [
        ("N2", "123,456.79"),
        ("N0", "123,457"),
        ("F1", "123456.8"),
        ("0.0000", "123456.7890"),
        ("#,##0.0", "123,456.8"),
    ];
    for (pattern, expected) in patterns {
        let text = cell(
            |b| {
                b.bound("balance").unwrap().format(pattern);
            },
            ada,
        );
        assert_eq!(text.as_deref(), Some(expected), "pattern {pattern}");
    }
}

#[test]
fn test_percent_format_on_float() {
    let ada = &accounts()[0];
    let text = cell(
        |b| {
            b.bound("score").unwrap().format("P1");
        },
        ada,
    );
    assert_eq!(text.as_deref(), Some("87.5%"));
}

#[test]
fn test_absent_values_render_nothing() {
    let grace = &accounts()[1];
    for format in [None, Some("%Y"), Some("N2")] {
        let text = cell(
            |b| {
                let column = b.bound("last_login").unwrap();
                if let Some(format) = format {
                    column.format(format);
                }
            },
            grace,
        );
        assert_eq!(text, None);
    }
}

#[test]
fn test_date_time_default_and_pattern() {
    let ada = &accounts()[0];
    let default = cell(
        |b| {
            b.bound("last_login").unwrap();
        },
        ada,
    );
    assert_eq!(default.as_deref(), Some("2024-06-01 08:30:00"));

    let opened = cell(
        |b| {
            b.bound("opened").unwrap().format("%B %-d, %Y");
        },
        ada,
    );
    assert_eq!(opened.as_deref(), Some("January 15, 2020"));
}

#[test]
fn test_boolean_text_ignores_format() {
    let records = accounts();
    for (record, expected) in [(&records[0], "True"), (&records[1], "False")] {
        let text = cell(
            |b| {
                b.bound("active").unwrap().format("N2");
            },
            record,
        );
        assert_eq!(text.as_deref(), Some(expected));
    }
}

#[test]
fn test_enum_labels() {
    let labels: Vec<_> = accounts()
        .iter()
        .map(|a| {
            cell(
                |b| {
                    b.bound("tier").unwrap();
                },
                a,
            )
        })
        .collect();
    assert_eq!(
        labels,
        vec![
            Some("Gold member".to_string()),
            Some("Silver (legacy)".to_string()),
            Some("Bronze".to_string()),
        ]
    );
}

#[test]
fn test_footer_uses_default_conversion() {
    let mut builder = ColumnBuilder::<Account>::new();
    builder
        .bound("balance")
        .unwrap()
        .format("N4")
        .footer(|all: &[Account]| all.iter().map(|a| a.balance).sum::<Decimal>());
    builder
        .bound("opened")
        .unwrap()
        .format("%Y")
        .footer(|all: &[Account]| all.iter().filter(|a| a.active).count());
    let columns = builder.build().unwrap();

    let footers: Vec<_> = columns.iter().map(|c| c.evaluate_footer(&accounts())).collect();
    assert_eq!(
        footers,
        vec![Some("123406.789".to_string()), Some("2".to_string())]
    );
}

#[test]
fn test_class_attribute_does_not_replace_css_class() {
    let mut builder = ColumnBuilder::<Account>::new();
    builder
        .bound("balance")
        .unwrap()
        .css_class("money")
        .add_attribute("class", |a: &Account| {
            if a.balance.is_sign_negative() {
                "negative"
            } else {
                "positive"
            }
        });
    let columns = builder.build().unwrap();
    let column = columns.get("balance").unwrap();

    let attributes = column.cell_attributes(&accounts()[1]);
    assert_eq!(
        attributes,
        vec![
            ("class".to_string(), "money".to_string()),
            ("class".to_string(), "negative".to_string()),
        ]
    );
}

#[test]
fn test_invalid_pattern_is_surfaced() {
    let mut builder = ColumnBuilder::<Account>::new();
    builder.bound("balance").unwrap().format("N99");
    let columns = builder.build().unwrap();

    let err = render_grid(&columns, &accounts()).unwrap_err();
    assert!(matches!(err, FormatError::InvalidNumericPattern { .. }));
}

#[test]
fn test_build_errors() {
    let mut builder = ColumnBuilder::<Account>::new();
    assert_eq!(
        builder.bound("nope").err(),
        Some(BuildError::unknown_property("Account", "nope"))
    );

    builder.column(Account::name_accessor());
    builder.column(Account::name_accessor()).title("Again");
    assert_eq!(builder.build().unwrap_err(), BuildError::duplicate_column("name"));
}

#[test]
fn test_options_drive_defaults() {
    let options = FormatOptions::from_json(
        r#"{ "decimal_separator": ",", "group_separator": ".", "true_text": "ja", "false_text": "nee" }"#,
    )
    .unwrap();
    let mut builder = ColumnBuilder::<Account>::with_options(options);
    builder.bound("balance").unwrap();
    builder.bound("active").unwrap();
    let columns = builder.build().unwrap();

    let grid = render_grid(&columns, &accounts()[..1]).unwrap();
    let texts: Vec<_> = grid.rows[0].iter().map(|c| c.text.clone().unwrap()).collect();
    assert_eq!(texts, vec!["123.456,79", "ja"]);
}

#[test]
fn test_concurrent_evaluation() {
    let mut builder = ColumnBuilder::<Account>::new();
    builder.bound("name").unwrap();
    builder.bound("balance").unwrap();
    builder.column(Accessor::computed(|a: &Account| a.score * 100.0)).title("Score").format("F0");
    let columns = builder.build().unwrap();
    let records = accounts();
    let expected = render_grid(&columns, &records).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| render_grid(&columns, &records).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
