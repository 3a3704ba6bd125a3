//! Tests for `#[derive(DisplayEnum)]`.

use gridkit::model::TypeTag;
use gridkit::model::Value;
use gridkit::{ColumnBuilder, ColumnValue, DisplayEnum, Record};

#[derive(Debug, Clone, Copy, DisplayEnum)]
enum Stage {
    #[display(name = "Not started")]
    Draft,
    #[description("Waiting for review")]
    Review,
    #[display(name = "Shipped", description = "Left the warehouse")]
    Done,
    Archived,
}

#[derive(Record)]
struct Ticket {
    stage: Stage,
    #[column(name = "Blocked on")]
    blocked_on: Option<Stage>,
}

#[test]
fn test_enum_value_annotations() {
    let done = Stage::Done.enum_value();
    assert_eq!(done.member(), "Done");
    assert_eq!(done.display_name(), Some("Shipped"));
    assert_eq!(done.description(), Some("Left the warehouse"));
}

#[test]
fn test_label_fallbacks() {
    assert_eq!(Stage::Draft.enum_value().label(), "Not started");
    assert_eq!(Stage::Review.enum_value().label(), "Waiting for review");
    assert_eq!(Stage::Done.enum_value().label(), "Shipped");
    assert_eq!(Stage::Archived.enum_value().label(), "Archived");
}

#[test]
fn test_column_value() {
    assert_eq!(Stage::TYPE_TAG, TypeTag::Enumeration);
    assert_eq!(Stage::Archived.to_value(), Value::Enum(Stage::Archived.enum_value()));
}

#[test]
fn test_enum_columns_render_labels() {
    let mut builder = ColumnBuilder::<Ticket>::new();
    builder.bound("stage").unwrap();
    builder.bound("blocked_on").unwrap();
    let columns = builder.build().unwrap();

    let ticket = Ticket {
        stage: Stage::Review,
        blocked_on: None,
    };
    let cells: Vec<_> = columns.iter().map(|c| c.evaluate(&ticket).unwrap()).collect();
    assert_eq!(cells, vec![Some("Waiting for review".to_string()), None]);

    let ticket = Ticket {
        stage: Stage::Draft,
        blocked_on: Some(Stage::Done),
    };
    let cells: Vec<_> = columns.iter().map(|c| c.render(&ticket).unwrap()).collect();
    assert_eq!(
        cells,
        vec![Some("Not started".to_string()), Some("Shipped".to_string())]
    );
}
