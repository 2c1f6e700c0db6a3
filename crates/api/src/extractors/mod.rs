//! Request extractors that validate before the handler runs.

mod validated_json;
mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;

use common::AppError;
use validator::{ValidationError, ValidationErrors};

/// Collapse validator output into a single client-facing message.
fn first_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    // HashMap order is random; report the same field every time.
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .into_iter()
        .find_map(|(field, errors)| {
            errors.first().map(|error| match &error.message {
                Some(msg) => msg.to_string(),
                None => default_message(&field, error),
            })
        })
        .unwrap_or_else(|| "Validation failed".to_string());

    AppError::validation(message)
}

fn default_message(field: &str, error: &ValidationError) -> String {
    match (error.code.as_ref(), error.params.get("min"), error.params.get("max")) {
        ("range", Some(min), Some(max)) => format!("{field} must be between {min} and {max}"),
        _ => format!("{field} is invalid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::MAX_PAGE_TAKE;
    use validator::Validate;

    #[derive(Validate)]
    struct Window {
        #[validate(range(min = 1, max = MAX_PAGE_TAKE))]
        take: i64,
        #[validate(length(min = 1))]
        name: String,
    }

    fn message(window: Window) -> String {
        first_error(window.validate().unwrap_err()).user_message()
    }

    #[test]
    fn test_range_message_names_bounds() {
        let window = Window {
            take: MAX_PAGE_TAKE + 1,
            name: "ok".to_string(),
        };
        assert_eq!(message(window), "take must be between 1 and 100");
    }

    #[test]
    fn test_fallback_message_and_field_order() {
        let window = Window {
            take: 0,
            name: String::new(),
        };
        assert_eq!(message(window), "name is invalid");
    }
}
