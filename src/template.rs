pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";

pub(crate) mod filters {
    use chrono::NaiveDateTime;

    /// Nutrient amounts: whole numbers without a decimal, otherwise one
    /// decimal place.
    #[askama::filter_fn]
    pub fn amount(value: &f64, _values: &dyn askama::Values) -> askama::Result<String> {
        if (value - value.round()).abs() < 0.05 {
            Ok(format!("{}", value.round() as i64))
        } else {
            Ok(format!("{value:.1}"))
        }
    }

    #[askama::filter_fn]
    pub fn date(value: &NaiveDateTime, _values: &dyn askama::Values) -> askama::Result<String> {
        Ok(value.format("%b %-d, %Y").to_string())
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;
