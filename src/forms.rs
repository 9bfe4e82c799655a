//! Ready-made forms for the auth screens, wired with the same rules and
//! error copy the screens show.

use crate::core::rule::{FieldRule, FormConfig};
use crate::core::validators::{self, AuthField};
use crate::state::form::Form;

/// Email + password sign-in. Messages distinguish missing from malformed
/// input, so both rules compute their copy from the value.
pub fn login() -> Form {
    Form::new(
        [("email", ""), ("password", "")],
        FormConfig::new()
            .with_rule(
                "email",
                FieldRule::new()
                    .required()
                    .validate_text(validators::is_email_valid)
                    .message_with(|value, _| {
                        email_message(value.as_text().unwrap_or_default())
                    }),
            )
            .with_rule(
                "password",
                FieldRule::new()
                    .required()
                    .validate_text(validators::is_password_valid)
                    .message_with(|value, _| {
                        validators::field_message(
                            AuthField::Password,
                            value.as_text().unwrap_or_default(),
                            None,
                        )
                        .unwrap_or("Password must be at least 6 characters")
                        .to_string()
                    }),
            ),
    )
}

/// Account creation. Password agreement is not part of the field rules; the
/// screen runs [`sync_password_confirmation`] after password edits instead.
pub fn registration() -> Form {
    Form::new(
        [
            ("fullName", ""),
            ("email", ""),
            ("username", ""),
            ("password", ""),
            ("confirmPassword", ""),
        ],
        FormConfig::new()
            .with_rule(
                "fullName",
                FieldRule::new()
                    .required()
                    .validate_text(validators::is_name_valid)
                    .message("Please enter a valid name"),
            )
            .with_rule(
                "email",
                FieldRule::new()
                    .required()
                    .validate_text(validators::is_email_valid)
                    .message("Please enter a valid email address"),
            )
            .with_rule(
                "username",
                FieldRule::new()
                    .required()
                    .validate_text(|text| text.chars().count() >= 3)
                    .message("Username must be at least 3 characters"),
            )
            .with_rule(
                "password",
                FieldRule::new()
                    .required()
                    .validate_text(validators::is_password_valid)
                    .message("Password must be at least 6 characters"),
            )
            .with_rule(
                "confirmPassword",
                FieldRule::new()
                    .required()
                    .validate_text(|text| text.chars().count() >= 6)
                    .message("Please confirm your password"),
            ),
    )
}

/// Single email field for requesting a reset link.
pub fn password_reset() -> Form {
    Form::new(
        [("email", "")],
        FormConfig::new().with_rule(
            "email",
            FieldRule::new()
                .required()
                .validate_text(validators::is_email_valid)
                .message_with(|value, _| email_message(value.as_text().unwrap_or_default())),
        ),
    )
}

/// Cross-field check the registration screen runs whenever either password
/// field changes: once both are non-empty, inject or clear the mismatch
/// error on the confirmation field.
pub fn sync_password_confirmation(form: &mut Form) {
    let password = form.text("password").unwrap_or_default().to_string();
    let confirmation = form.text("confirmPassword").unwrap_or_default().to_string();
    if password.is_empty() || confirmation.is_empty() {
        return;
    }

    if validators::passwords_match(&password, &confirmation) {
        form.set_error("confirmPassword", "");
    } else {
        form.set_error("confirmPassword", "Passwords do not match");
    }
}

fn email_message(value: &str) -> String {
    validators::field_message(AuthField::Email, value, None)
        .unwrap_or("Please enter a valid email address")
        .to_string()
}
