//! Shared behaviour of filters reading one request field

use crate::filter::config::FilterConfig;
use crate::filter::params::{ParamValue, RequestParams, UrlParameters};
use crate::filter::state::{FilterState, FilterValue};

/// Name, configuration and the generic single-value extraction every widget
/// builds on.
#[derive(Debug, Clone)]
pub struct SingleRequestValue {
    name: String,
    config: FilterConfig,
}

impl SingleRequestValue {
    pub fn new(name: impl Into<String>, config: FilterConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn request_field(&self) -> &str {
        &self.config.request_field
    }

    /// Absent or empty ⇒ inactive. Otherwise active with the raw value echoed
    /// back as url parameters. Empty list entries are dropped.
    pub fn state(&self, params: &dyn RequestParams) -> FilterState {
        let value = match params.get(self.request_field()) {
            Some(value) if !value.is_empty() => value,
            _ => return FilterState::inactive(),
        };

        let value = match value {
            ParamValue::List(values) => {
                ParamValue::List(values.into_iter().filter(|v| !v.is_empty()).collect())
            }
            single => single,
        };

        let mut url_parameters = UrlParameters::new();
        url_parameters.insert(self.request_field().to_string(), value.clone());

        FilterState::active_with(FilterValue::from(value), url_parameters)
    }
}

/// Longest leading numeric prefix as `f64`, `0.0` when there is none or the
/// result is not finite.
pub(crate) fn lenient_f64(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    // exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Leading digits as `u32`, `None` when there are none or they overflow
pub(crate) fn lenient_u32(raw: &str) -> Option<u32> {
    let s = raw.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits: &str = &s[..s.bytes().take_while(u8::is_ascii_digit).count()];
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::params::QueryParams;

    fn filter() -> SingleRequestValue {
        SingleRequestValue::new("color", FilterConfig::new("choice", "color"))
    }

    #[test]
    fn test_absent_or_empty_is_inactive() {
        let filter = filter();
        assert!(!filter.state(&QueryParams::new()).active);
        assert!(!filter.state(&QueryParams::parse("color=")).active);
        assert!(!filter.state(&QueryParams::parse("color[]=")).active);
        assert!(!filter.state(&QueryParams::parse("other=red")).active);
    }

    #[test]
    fn test_present_value_is_echoed() {
        let state = filter().state(&QueryParams::parse("color=red"));

        assert!(state.active);
        assert_eq!(state.value, FilterValue::Single("red".into()));
        assert_eq!(state.url_parameters.get("color"), Some(&ParamValue::from("red")));
    }

    #[test]
    fn test_list_drops_empty_entries() {
        let state = filter().state(&QueryParams::parse("color[]=red&color[]=&color[]=blue"));

        assert!(state.active);
        assert_eq!(
            state.value,
            FilterValue::List(vec!["red".to_string(), "blue".to_string()])
        );
    }

    #[test]
    fn test_lenient_f64() {
        assert_eq!(lenient_f64("10"), 10.0);
        assert_eq!(lenient_f64(" -2.5"), -2.5);
        assert_eq!(lenient_f64("10.5abc"), 10.5);
        assert_eq!(lenient_f64(".5"), 0.5);
        assert_eq!(lenient_f64("1e3"), 1000.0);
        assert_eq!(lenient_f64("1e"), 1.0);
        assert_eq!(lenient_f64("abc"), 0.0);
        assert_eq!(lenient_f64(""), 0.0);
        assert_eq!(lenient_f64("-"), 0.0);
        assert_eq!(lenient_f64("inf"), 0.0);
        assert_eq!(lenient_f64("NaN"), 0.0);
        assert_eq!(lenient_f64("1e999"), 0.0);
    }

    #[test]
    fn test_lenient_u32() {
        assert_eq!(lenient_u32("3"), Some(3));
        assert_eq!(lenient_u32("3abc"), Some(3));
        assert_eq!(lenient_u32("+7"), Some(7));
        assert_eq!(lenient_u32("abc"), None);
        assert_eq!(lenient_u32("-1"), None);
        assert_eq!(lenient_u32("99999999999"), None);
    }
}
