//! Fluent column construction.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use crate::accessor::Accessor;
use crate::accessor::ColumnValue;
use crate::accessor::Record;
use crate::error::BuildError;
use crate::model::Value;
use crate::options::FormatOptions;

use super::Columns;
use super::definition::ColumnAttribute;
use super::definition::ColumnDefinition;

/// Builds the column set of a grid.
///
/// Each `column` call appends a definition and returns a
/// [`ColumnPropertyBuilder`] for customising it. [`build`](Self::build)
/// freezes the definitions into [`Columns`].
///
/// # Example
///
/// ```
/// use gridkit::{Accessor, ColumnBuilder};
///
/// struct Order {
///     quantity: i32,
///     unit_price: f64,
/// }
///
/// let mut builder = ColumnBuilder::new();
/// builder
///     .column(Accessor::computed(|o: &Order| o.quantity))
///     .title("Qty")
///     .footer(|orders: &[Order]| orders.iter().map(|o| o.quantity).sum::<i32>());
/// builder
///     .column(Accessor::computed(|o: &Order| f64::from(o.quantity) * o.unit_price))
///     .title("Total")
///     .format("N2")
///     .css_class("numeric");
///
/// let columns = builder.build().unwrap();
/// assert_eq!(columns.len(), 2);
/// ```
pub struct ColumnBuilder<R> {
    options: Arc<FormatOptions>,
    columns: Vec<ColumnDefinition<R>>,
}

impl<R> Default for ColumnBuilder<R> {
    fn default() -> Self {
        Self::with_options(FormatOptions::default())
    }
}

impl<R> ColumnBuilder<R> {
    /// Creates a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose columns use the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            options: Arc::new(options),
            columns: Vec::new(),
        }
    }

    /// Adds a column read through `accessor`.
    pub fn column(&mut self, accessor: Accessor<R>) -> ColumnPropertyBuilder<'_, R> {
        let definition = ColumnDefinition::new(accessor, Arc::clone(&self.options));
        debug!(
            "adding column '{}' ({})",
            definition.key(),
            definition.declared_type()
        );
        self.columns.push(definition);
        let index = self.columns.len() - 1;
        ColumnPropertyBuilder {
            column: &mut self.columns[index],
        }
    }

    /// Adds a computed column from a closure.
    pub fn computed<T, F>(&mut self, extract: F) -> ColumnPropertyBuilder<'_, R>
    where
        R: 'static,
        T: ColumnValue,
        F: Fn(&R) -> T + Send + Sync + 'static,
    {
        self.column(Accessor::computed(extract))
    }

    /// Number of columns added so far.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column has been added.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Freezes the definitions.
    ///
    /// Fails when two columns share a non-empty key.
    pub fn build(self) -> Result<Columns<R>, BuildError> {
        {
            let mut seen = HashSet::new();
            for column in &self.columns {
                if !column.key.is_empty() && !seen.insert(column.key.as_str()) {
                    return Err(BuildError::duplicate_column(&column.key));
                }
            }
        }

        debug!("built {} columns", self.columns.len());
        Ok(Columns::new(self.columns, self.options))
    }
}

impl<R: Record> ColumnBuilder<R> {
    /// Adds a column for the record property called `name`.
    ///
    /// Fails immediately when the record has no such property.
    pub fn bound(&mut self, name: &str) -> Result<ColumnPropertyBuilder<'_, R>, BuildError> {
        let accessor = R::accessor(name)
            .ok_or_else(|| BuildError::unknown_property(R::record_name(), name))?;
        Ok(self.column(accessor))
    }
}

/// Customises one column while its builder is still open.
///
/// Every call except [`add_attribute`](Self::add_attribute) overwrites the
/// previous value; attributes accumulate.
pub struct ColumnPropertyBuilder<'a, R> {
    column: &'a mut ColumnDefinition<R>,
}

impl<R> ColumnPropertyBuilder<'_, R> {
    /// The column's key.
    pub fn key(&self) -> &str {
        &self.column.key
    }

    /// Sets the footer aggregator.
    pub fn footer<T, F>(self, aggregate: F) -> Self
    where
        R: 'static,
        T: Into<Value>,
        F: Fn(&[R]) -> T + Send + Sync + 'static,
    {
        self.column.footer = Some(Arc::new(move |records: &[R]| aggregate(records).into()));
        self
    }

    /// Sets the format pattern for row values.
    pub fn format(self, format: impl Into<String>) -> Self {
        self.column.format = Some(format.into());
        self
    }

    /// Sets the CSS class of the header cell.
    pub fn header_class(self, classes: impl Into<String>) -> Self {
        self.column.header_css_class = Some(classes.into());
        self
    }

    /// Sets the CSS class of body cells.
    pub fn css_class(self, classes: impl Into<String>) -> Self {
        self.column.css_class = Some(classes.into());
        self
    }

    /// Sets the CSS class of the footer cell.
    pub fn footer_class(self, classes: impl Into<String>) -> Self {
        self.column.footer_css_class = Some(classes.into());
        self
    }

    /// Renders body cells of this column as header cells.
    pub fn is_header(self) -> Self {
        self.column.is_header = true;
        self
    }

    /// Sets the title, replacing any title taken from property metadata.
    pub fn title(self, title: impl Into<String>) -> Self {
        self.column.title = title.into();
        self
    }

    /// Sets the cell template.
    ///
    /// The rendered value replaces the placeholder (`{value}` unless changed
    /// with [`template_placeholder`](Self::template_placeholder)).
    pub fn template(self, template: impl Into<String>) -> Self {
        self.column.template = Some(template.into());
        self
    }

    /// Sets the template placeholder.
    pub fn template_placeholder(self, placeholder: impl Into<String>) -> Self {
        self.column.template_placeholder = placeholder.into();
        self
    }

    /// Sets the texts rendered for `true` and `false`.
    pub fn boolean_text(self, true_text: impl Into<String>, false_text: impl Into<String>) -> Self {
        self.column.true_text = true_text.into();
        self.column.false_text = false_text.into();
        self
    }

    /// Appends an attribute computed per record.
    ///
    /// `class` is accepted even when a CSS class is set; both are emitted.
    pub fn add_attribute<T, F>(self, name: impl Into<String>, value: F) -> Self
    where
        R: 'static,
        T: Into<Value>,
        F: Fn(&R) -> T + Send + Sync + 'static,
    {
        self.column.attributes.push(ColumnAttribute {
            name: name.into(),
            value: Arc::new(move |record: &R| value(record).into()),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeTag;
    use crate::model::metadata::PropertyMetadata;

    struct Person {
        name: String,
        age: i32,
    }

    impl Record for Person {
        fn record_name() -> &'static str {
            "Person"
        }

        fn properties() -> &'static [PropertyMetadata] {
            const PROPERTIES: &[PropertyMetadata] = &[
                PropertyMetadata::new("name", TypeTag::Other).with_display_name("Full name"),
                PropertyMetadata::new("age", TypeTag::Integer).with_display_format("D3"),
            ];
            PROPERTIES
        }

        fn accessor(name: &str) -> Option<Accessor<Self>> {
            let properties = Self::properties();
            match name {
                "name" => Some(Accessor::property(properties[0].clone(), |p: &Person| {
                    p.name.to_value()
                })),
                "age" => Some(Accessor::property(properties[1].clone(), |p: &Person| {
                    p.age.to_value()
                })),
                _ => None,
            }
        }
    }

    fn person() -> Person {
        Person {
            name: "Ada".to_string(),
            age: 36,
        }
    }

    #[test]
    fn test_bound_column_takes_metadata() {
        let mut builder = ColumnBuilder::<Person>::new();
        builder.bound("name").unwrap();
        builder.bound("age").unwrap();
        let columns = builder.build().unwrap();

        let name = columns.get("name").unwrap();
        assert_eq!(name.title(), "Full name");
        assert_eq!(name.declared_type(), TypeTag::Other);

        let age = columns.get("age").unwrap();
        assert_eq!(age.title(), "age");
        assert_eq!(age.format(), Some("D3"));
        assert_eq!(age.evaluate(&person()).unwrap().as_deref(), Some("036"));
    }

    #[test]
    fn test_bound_unknown_property_fails() {
        let mut builder = ColumnBuilder::<Person>::new();
        let err = builder.bound("email").err().unwrap();
        assert_eq!(err, BuildError::unknown_property("Person", "email"));
    }

    #[test]
    fn test_explicit_title_overrides_metadata() {
        let mut builder = ColumnBuilder::<Person>::new();
        builder.bound("name").unwrap().title("Who");
        let columns = builder.build().unwrap();
        assert_eq!(columns.get("name").unwrap().title(), "Who");
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let mut builder = ColumnBuilder::<Person>::new();
        builder.bound("age").unwrap();
        builder.bound("age").unwrap().title("Age again");
        let err = builder.build().unwrap_err();
        assert_eq!(err, BuildError::duplicate_column("age"));
    }

    #[test]
    fn test_computed_columns_may_share_empty_key() {
        let mut builder = ColumnBuilder::<Person>::new();
        builder.computed(|p: &Person| p.age * 12).title("Months");
        builder.computed(|p: &Person| p.name.len()).title("Letters");
        let columns = builder.build().unwrap();
        let titles: Vec<_> = columns.iter().map(|c| c.title()).collect();
        assert_eq!(titles, vec!["Months", "Letters"]);
    }

    #[test]
    fn test_setters_overwrite_attributes_accumulate() {
        let mut builder = ColumnBuilder::<Person>::new();
        builder
            .bound("age")
            .unwrap()
            .format("N0")
            .format("D4")
            .css_class("a")
            .css_class("num")
            .add_attribute("class", |p: &Person| {
                if p.age > 30 { "senior" } else { "junior" }
            })
            .add_attribute("data-age", |p: &Person| p.age);
        let columns = builder.build().unwrap();
        let age = columns.get("age").unwrap();

        assert_eq!(age.format(), Some("D4"));
        assert_eq!(
            age.cell_attributes(&person()),
            vec![
                ("class".to_string(), "num".to_string()),
                ("class".to_string(), "senior".to_string()),
                ("data-age".to_string(), "36".to_string()),
            ]
        );
    }

    #[test]
    fn test_template_substitution() {
        let mut builder = ColumnBuilder::<Person>::new();
        builder
            .bound("name")
            .unwrap()
            .template("<b>$$</b> ($$)")
            .template_placeholder("$$");
        builder.bound("age").unwrap().template("{value} years");
        let columns = builder.build().unwrap();

        let name = columns.get("name").unwrap();
        assert_eq!(name.render(&person()).unwrap().as_deref(), Some("<b>Ada</b> (Ada)"));
        let age = columns.get("age").unwrap();
        assert_eq!(age.render(&person()).unwrap().as_deref(), Some("036 years"));
    }

    #[test]
    fn test_builder_options_seed_columns() {
        let options = FormatOptions::default()
            .with_boolean_text("Yes", "No")
            .with_template_placeholder("%v");
        let mut builder = ColumnBuilder::<Person>::with_options(options);
        builder.computed(|p: &Person| p.age > 18).template("[%v]");
        let columns = builder.build().unwrap();
        let adult = columns.iter().next().unwrap();
        assert_eq!(adult.render(&person()).unwrap().as_deref(), Some("[Yes]"));
    }
}
