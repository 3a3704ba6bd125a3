//! Sample orders shown by the demo.

use chrono::NaiveDate;
use gridkit::{ColumnBuilder, Columns, DisplayEnum, FormatOptions, Record};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, DisplayEnum)]
pub enum OrderStatus {
    #[display(name = "Awaiting payment")]
    Pending,
    #[description("Packed and on its way")]
    Shipped,
    Delivered,
    #[display(name = "Cancelled by customer")]
    Cancelled,
}

#[derive(Debug, Clone, Record)]
pub struct Order {
    #[column(name = "No.")]
    pub number: u32,
    pub customer: String,
    #[column(name = "Placed", format = "%d %b %Y")]
    pub placed: NaiveDate,
    #[column(name = "Qty")]
    pub quantity: i32,
    #[column(name = "Total", format = "N2")]
    pub total: Decimal,
    #[column(name = "Express")]
    pub express: bool,
    #[column(name = "Status")]
    pub status: OrderStatus,
    #[column(skip)]
    pub internal_note: Option<String>,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            number: 1001,
            customer: "Contoso Ltd".to_string(),
            placed: date(2024, 3, 4),
            quantity: 12,
            total: Decimal::new(149_940, 2),
            express: false,
            status: OrderStatus::Delivered,
            internal_note: None,
        },
        Order {
            number: 1002,
            customer: "Fabrikam".to_string(),
            placed: date(2024, 3, 9),
            quantity: 3,
            total: Decimal::new(8_997, 2),
            express: true,
            status: OrderStatus::Shipped,
            internal_note: Some("call before delivery".to_string()),
        },
        Order {
            number: 1003,
            customer: "Northwind Traders".to_string(),
            placed: date(2024, 3, 15),
            quantity: 0,
            total: Decimal::ZERO,
            express: false,
            status: OrderStatus::Cancelled,
            internal_note: None,
        },
        Order {
            number: 1004,
            customer: "Wide World Importers".to_string(),
            placed: date(2024, 3, 21),
            quantity: 250,
            total: Decimal::new(1_243_750, 2),
            express: true,
            status: OrderStatus::Pending,
            internal_note: None,
        },
    ]
}

/// Column set of the demo grid.
pub fn order_columns(options: FormatOptions) -> gridkit::Result<Columns<Order>> {
    let mut builder = ColumnBuilder::<Order>::with_options(options);

    builder.bound("number")?.is_header().template("#{value}");
    builder
        .bound("customer")?
        .add_attribute("title", |o: &Order| o.customer.clone());
    builder
        .bound("placed")?
        .footer(|all: &[Order]| all.len())
        .footer_class("count");
    builder
        .bound("quantity")?
        .css_class("numeric")
        .footer(|all: &[Order]| all.iter().map(|o| o.quantity).sum::<i32>());
    builder
        .bound("total")?
        .css_class("numeric")
        .footer(|all: &[Order]| all.iter().map(|o| o.total).sum::<Decimal>());
    builder
        .computed(|o: &Order| o.total.checked_div(Decimal::from(o.quantity)))
        .title("Unit price")
        .format("N2");
    builder.bound("express")?.boolean_text("Yes", "No");
    builder
        .bound("status")?
        .add_attribute("data-status", |o: &Order| o.status.enum_value().member().to_string());

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_grid_renders() {
        let columns = order_columns(FormatOptions::default()).unwrap();
        let grid = gridkit::grid::render_grid(&columns, &orders()).unwrap();

        assert_eq!(grid.headers.len(), 8);
        assert_eq!(grid.rows[0][0].text.as_deref(), Some("#1001"));
        assert_eq!(grid.rows[0][2].text.as_deref(), Some("04 Mar 2024"));
        assert_eq!(grid.rows[0][5].text.as_deref(), Some("124.95"));
        // Zero quantity has no unit price
        assert_eq!(grid.rows[2][5].text, None);
        assert_eq!(grid.rows[3][7].text.as_deref(), Some("Awaiting payment"));

        let footer = grid.footer.unwrap();
        assert_eq!(footer[2].text.as_deref(), Some("4"));
        assert_eq!(footer[3].text.as_deref(), Some("265"));
        assert_eq!(footer[4].text.as_deref(), Some("14026.87"));
    }
}
