//! One full render pass over a record collection.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::column::Columns;
use crate::error::FormatError;

/// A header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
}

/// A body cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    /// Rendered, templated text; `None` for an absent value.
    pub text: Option<String>,
    /// Whether the cell is a header cell.
    pub is_header: bool,
    /// Attributes to emit, in order. Names may repeat.
    pub attributes: Vec<(String, String)>,
}

/// A footer cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterCell {
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
}

/// Output of [`render_grid`]: plain strings, ready for a markup layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedGrid {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<RenderedCell>>,
    /// Present when at least one column has a footer aggregator.
    pub footer: Option<Vec<FooterCell>>,
}

/// Renders headers, one row per record and the footer.
///
/// The first formatting error aborts the pass.
pub fn render_grid<R>(columns: &Columns<R>, records: &[R]) -> Result<RenderedGrid, FormatError> {
    let headers = columns
        .iter()
        .map(|column| HeaderCell {
            title: column.title().to_string(),
            css_class: column.header_css_class().map(str::to_string),
        })
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| {
                    Ok(RenderedCell {
                        text: column.render(record)?,
                        is_header: column.is_header(),
                        attributes: column.cell_attributes(record),
                    })
                })
                .collect::<Result<Vec<_>, FormatError>>()
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    let footer = columns.has_footer().then(|| {
        columns
            .iter()
            .map(|column| FooterCell {
                text: column.evaluate_footer(records),
                css_class: column.footer_css_class().map(str::to_string),
            })
            .collect()
    });

    log::debug!(
        "rendered grid: {} columns, {} rows, footer: {}",
        columns.len(),
        records.len(),
        footer.is_some()
    );

    Ok(RenderedGrid {
        headers,
        rows,
        footer,
    })
}

impl RenderedGrid {
    /// Draws the grid as an aligned plain-text table.
    ///
    /// Numeric-looking cells are right-aligned; absent values are blank.
    pub fn to_text(&self) -> String {
        let body: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.text.as_deref().unwrap_or("")).collect())
            .collect();
        let footer: Option<Vec<&str>> = self
            .footer
            .as_ref()
            .map(|cells| cells.iter().map(|cell| cell.text.as_deref().unwrap_or("")).collect());

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.title.width()).collect();
        for line in body.iter().chain(footer.iter()) {
            for (width, text) in widths.iter_mut().zip(line) {
                *width = (*width).max(text.width());
            }
        }

        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");

        let mut out = String::new();
        let titles: Vec<&str> = self.headers.iter().map(|h| h.title.as_str()).collect();
        push_line(&mut out, &titles, &widths);
        out.push_str(&rule);
        out.push('\n');
        for line in &body {
            push_line(&mut out, line, &widths);
        }
        if let Some(footer) = &footer {
            out.push_str(&rule);
            out.push('\n');
            push_line(&mut out, footer, &widths);
        }
        out
    }
}

fn looks_numeric(text: &str) -> bool {
    let mut digits = false;
    for c in text.chars() {
        match c {
            '0'..='9' => digits = true,
            '-' | '+' | '.' | ',' | '%' | ' ' | 'E' | 'e' => {}
            _ => return false,
        }
    }
    digits
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(text, width)| {
            let pad = " ".repeat(width.saturating_sub(text.width()));
            if looks_numeric(text) {
                format!("{pad}{text}")
            } else {
                format!("{text}{pad}")
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnBuilder;

    struct Item {
        name: &'static str,
        stock: i32,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                name: "Bolt",
                stock: 1200,
            },
            Item {
                name: "Nut",
                stock: 35,
            },
        ]
    }

    fn columns(with_footer: bool) -> Columns<Item> {
        let mut builder = ColumnBuilder::new();
        builder.computed(|i: &Item| i.name).title("Item").is_header();
        let stock = builder
            .computed(|i: &Item| i.stock)
            .title("Stock")
            .format("N0")
            .footer_class("total");
        if with_footer {
            stock.footer(|all: &[Item]| all.iter().map(|i| i.stock).sum::<i32>());
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_render_grid_shapes() {
        let grid = render_grid(&columns(true), &items()).unwrap();

        assert_eq!(grid.headers.len(), 2);
        assert_eq!(grid.rows.len(), 2);
        assert!(grid.rows[0][0].is_header);
        assert_eq!(grid.rows[0][1].text.as_deref(), Some("1,200"));

        let footer = grid.footer.unwrap();
        assert_eq!(footer[0].text, None);
        assert_eq!(footer[1].text.as_deref(), Some("1235"));
        assert_eq!(footer[1].css_class.as_deref(), Some("total"));
    }

    #[test]
    fn test_no_footer_without_aggregators() {
        let grid = render_grid(&columns(false), &items()).unwrap();
        assert!(grid.footer.is_none());
    }

    #[test]
    fn test_to_text() {
        let grid = render_grid(&columns(true), &items()).unwrap();
        let expected = "\
Item | Stock
-----+------
Bolt | 1,200
Nut  |    35
-----+------
     |  1235
";
        assert_eq!(grid.to_text(), expected);
    }
}
