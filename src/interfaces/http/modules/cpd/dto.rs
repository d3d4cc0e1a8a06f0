//! CPD entry DTOs

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCpdEntryRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,
    #[validate(range(min = 0.0, max = 1000.0, message = "hours must be between 0 and 1000"))]
    pub hours: f64,
    pub date_completed: NaiveDate,
    #[validate(length(max = 200, message = "provider must be at most 200 characters"))]
    pub provider: Option<String>,
    #[validate(url(message = "certificateUrl must be a valid URL"))]
    pub certificate_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateCpdEntryRequest {
        CreateCpdEntryRequest {
            title: "Advanced Trauma Life Support".to_string(),
            description: None,
            category: "Course".to_string(),
            hours: 16.0,
            date_completed: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            provider: Some("Royal College".to_string()),
            certificate_url: None,
        }
    }

    #[test]
    fn accepts_zero_hours() {
        let mut req = valid();
        req.hours = 0.0;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_negative_hours_and_bad_url() {
        let mut req = valid();
        req.hours = -0.5;
        req.certificate_url = Some("not a url".to_string());
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("hours"));
        assert!(errors.field_errors().contains_key("certificate_url"));
    }
}
