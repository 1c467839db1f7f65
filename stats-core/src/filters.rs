//! Chart filter forms.
//!
//! A filter set describes the form fields a chart offers, captures the
//! submitted values and decides whether they can be sent to the chart
//! endpoint as query parameters.

use chrono::NaiveDate;

/// Id of the control that clears the filters and reloads the chart.
pub const RESET_ID: &str = "reset";

/// Ordered form field name -> value pairs captured from a submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterParams(Vec<(String, String)>);

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing an earlier value for the same field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// `name=value` pairs joined by `&`, each side percent-encoded.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Append the parameters to `url`, keeping any query it already has.
    pub fn append_to(&self, url: &str) -> String {
        if self.is_empty() {
            return url.to_string();
        }
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", url, separator, self.to_query_string())
    }
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`,
/// the set a browser leaves alone in a URI component.
fn encode_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = FilterParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// One input of a filter form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    /// Form field name, used as the query parameter name
    pub name: &'static str,
    /// DOM id of the input
    pub input_id: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
}

/// Markup description of a filter form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTemplate {
    pub fields: Vec<FilterField>,
    /// Id of the reset control, if the form has one
    pub reset_id: Option<&'static str>,
}

/// A validated form bound to a chart.
///
/// Each filter kind decides what "valid" means; there is no default.
pub trait ChartFilters {
    /// The form fragment to mount into the filter container.
    fn template(&self) -> FilterTemplate;

    /// Capture every submitted field, replacing the previous submission.
    fn consume_submission(&mut self, fields: FilterParams);

    /// The parameters captured by the last submission.
    fn params(&self) -> &FilterParams;

    fn is_valid(&self) -> bool;

    /// Message to show when [`ChartFilters::is_valid`] is false.
    fn error_message(&self) -> &str;
}

/// Date inputs and parameters use day-month-year.
pub const DATE_INPUT_FORMAT: &str = "dd-mm-yyyy";

pub const START_DATE_FIELD: &str = "start-date";
pub const END_DATE_FIELD: &str = "end-date";

pub const END_BEFORE_START_MESSAGE: &str = "Invalid filters, end date is lower than start date.";
pub const UNPARSEABLE_DATE_MESSAGE: &str = "Invalid filters, dates must use the dd-mm-yyyy format.";

/// Start/end date filter of the creation-date chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateRangeFilter {
    params: FilterParams,
}

impl DateRangeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.params.get(START_DATE_FIELD).and_then(parse_day_month_year)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.params.get(END_DATE_FIELD).and_then(parse_day_month_year)
    }
}

impl ChartFilters for DateRangeFilter {
    fn template(&self) -> FilterTemplate {
        FilterTemplate {
            fields: vec![
                FilterField {
                    name: START_DATE_FIELD,
                    input_id: "date-picker-start",
                    label: "From",
                    placeholder: DATE_INPUT_FORMAT,
                },
                FilterField {
                    name: END_DATE_FIELD,
                    input_id: "date-picker-end",
                    label: "To",
                    placeholder: DATE_INPUT_FORMAT,
                },
            ],
            reset_id: Some(RESET_ID),
        }
    }

    fn consume_submission(&mut self, fields: FilterParams) {
        self.params = fields;
    }

    fn params(&self) -> &FilterParams {
        &self.params
    }

    fn is_valid(&self) -> bool {
        match (self.start_date(), self.end_date()) {
            (Some(start), Some(end)) => start < end,
            _ => false,
        }
    }

    fn error_message(&self) -> &str {
        if self.start_date().is_some() && self.end_date().is_some() {
            END_BEFORE_START_MESSAGE
        } else {
            UNPARSEABLE_DATE_MESSAGE
        }
    }
}

/// Reverse a `dd-mm-yyyy` string into ISO `yyyy-mm-dd`.
pub fn to_iso_format(date: &str) -> String {
    date.trim().split('-').rev().collect::<Vec<_>>().join("-")
}

/// Parse a `dd-mm-yyyy` date by way of its ISO form.
pub fn parse_day_month_year(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&to_iso_format(date), "%Y-%m-%d").ok()
}

/// Every filter kind a chart can own.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSet {
    DateRange(DateRangeFilter),
}

impl ChartFilters for FilterSet {
    fn template(&self) -> FilterTemplate {
        match self {
            FilterSet::DateRange(f) => f.template(),
        }
    }

    fn consume_submission(&mut self, fields: FilterParams) {
        match self {
            FilterSet::DateRange(f) => f.consume_submission(fields),
        }
    }

    fn params(&self) -> &FilterParams {
        match self {
            FilterSet::DateRange(f) => f.params(),
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            FilterSet::DateRange(f) => f.is_valid(),
        }
    }

    fn error_message(&self) -> &str {
        match self {
            FilterSet::DateRange(f) => f.error_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        let params: FilterParams = [(START_DATE_FIELD, "01-01-2023"), (END_DATE_FIELD, "02-01-2023")]
            .into_iter()
            .collect();
        assert_eq!(params.to_query_string(), "start-date=01-01-2023&end-date=02-01-2023");
        assert_eq!(
            params.append_to("/stats/charts/creation-date/"),
            "/stats/charts/creation-date/?start-date=01-01-2023&end-date=02-01-2023"
        );
        assert_eq!(
            params.append_to("/charts/?lang=en"),
            "/charts/?lang=en&start-date=01-01-2023&end-date=02-01-2023"
        );
        assert_eq!(FilterParams::new().append_to("/charts/"), "/charts/");

        let awkward: FilterParams = [("q", "a b&c=d/é")].into_iter().collect();
        assert_eq!(awkward.to_query_string(), "q=a%20b%26c%3Dd%2F%C3%A9");
    }

    fn submit(start: &str, end: &str) -> DateRangeFilter {
        let mut filter = DateRangeFilter::new();
        filter.consume_submission(
            [(START_DATE_FIELD, start), (END_DATE_FIELD, end)]
                .into_iter()
                .collect(),
        );
        filter
    }

    #[test]
    fn test_to_iso_format() {
        assert_eq!(to_iso_format("01-02-2023"), "2023-02-01");
        assert_eq!(
            parse_day_month_year("31-12-2022"),
            NaiveDate::from_ymd_opt(2022, 12, 31)
        );
        assert_eq!(parse_day_month_year("2022/12/31"), None);
        assert_eq!(parse_day_month_year("31-02-2022"), None);
    }

    #[test]
    fn test_end_before_start_is_invalid() {
        let filter = submit("01-02-2023", "01-01-2023");
        assert!(!filter.is_valid());
        assert_eq!(filter.error_message(), END_BEFORE_START_MESSAGE);
    }

    #[test]
    fn test_equal_dates_are_invalid() {
        let filter = submit("15-06-2023", "15-06-2023");
        assert!(!filter.is_valid());
        assert_eq!(filter.error_message(), END_BEFORE_START_MESSAGE);
    }

    #[test]
    fn test_start_before_end_is_valid() {
        let filter = submit("01-01-2023", "02-01-2023");
        assert!(filter.is_valid());
        assert_eq!(filter.params().get(START_DATE_FIELD), Some("01-01-2023"));
    }

    #[test]
    fn test_missing_or_garbled_dates_are_invalid() {
        let filter = submit("", "02-01-2023");
        assert!(!filter.is_valid());
        assert_eq!(filter.error_message(), UNPARSEABLE_DATE_MESSAGE);

        let filter = DateRangeFilter::new();
        assert!(!filter.is_valid());
    }

    #[test]
    fn test_submission_replaces_previous_params() {
        let mut filter = submit("01-01-2023", "02-01-2023");
        filter.consume_submission(FilterParams::new());
        assert!(filter.params().is_empty());
    }

    #[test]
    fn test_filter_params_keep_order_and_replace() {
        let mut params = FilterParams::new();
        params.insert("b", "1");
        params.insert("a", "2");
        params.insert("b", "3");
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, vec![("b", "3"), ("a", "2")]);
    }

    #[test]
    fn test_date_template_has_reset() {
        let set = FilterSet::DateRange(DateRangeFilter::new());
        let template = set.template();
        assert_eq!(template.reset_id, Some(RESET_ID));
        let names: Vec<&str> = template.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec![START_DATE_FIELD, END_DATE_FIELD]);
    }
}
