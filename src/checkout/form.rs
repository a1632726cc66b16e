//! Checkout Form
//!
//! Buyer details collected before payment. Validation is category-aware:
//! see [`RequiredFields`].

use std::{
    fmt::{self, Display, Formatter},
    sync::LazyLock,
};

use regex::Regex;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::CartLine,
    checkout::rules::{Field, RequiredFields},
};

/// Minimum nickname length, in characters.
pub const NICK_MIN_CHARS: usize = 3;

/// Minimum password length, in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Indonesian mobile number: `+62`, `62` or `0`, then `8`, a non-zero digit
/// and 6 to 9 further digits.
static WHATSAPP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
    Regex::new(r"^(\+62|62|0)8[1-9][0-9]{6,9}$").expect("valid whatsapp pattern")
});

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutFormData {
    /// In-game nickname
    pub nick: String,

    /// Account password
    pub password: String,

    /// WhatsApp number
    pub whatsapp: String,
}

impl CheckoutFormData {
    /// Value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Nick => &self.nick,
            Field::Password => &self.password,
            Field::Whatsapp => &self.whatsapp,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Nick => &mut self.nick,
            Field::Password => &mut self.password,
            Field::Whatsapp => &mut self.whatsapp,
        }
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field is empty.
    #[error("is required")]
    Required,

    /// The field is shorter than `min` characters.
    #[error("must be at least {min} characters")]
    TooShort {
        /// Minimum length in characters
        min: usize,
    },

    /// The field does not match the expected shape.
    #[error("has an invalid format")]
    InvalidFormat,
}

/// Per-field validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(SmallVec<[(Field, FieldError); 3]>);

impl FieldErrors {
    /// No errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `error` against `field`, replacing any earlier error.
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.clear(field);
        self.0.push((field, error));
    }

    /// Error recorded against `field`.
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, error)| *error)
    }

    /// Forget the error recorded against `field`.
    pub fn clear(&mut self, field: Field) {
        self.0.retain(|(candidate, _)| *candidate != field);
    }

    /// Recorded errors, in validation order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().copied()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field} {error}")?;
        }

        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validated buyer details, ready for payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    /// In-game nickname
    pub nick: String,

    /// Account password, present only when the cart requires one
    pub password: Option<String>,

    /// WhatsApp number with all whitespace removed
    pub whatsapp: String,
}

/// Strip every whitespace character from a phone number.
pub fn normalize_whatsapp(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn check_length(value: &str, min: usize) -> Option<FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        Some(FieldError::Required)
    } else if trimmed.chars().count() < min {
        Some(FieldError::TooShort { min })
    } else {
        None
    }
}

fn check_whatsapp(value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        return Some(FieldError::Required);
    }

    if WHATSAPP_PATTERN.is_match(&normalize_whatsapp(value)) {
        None
    } else {
        Some(FieldError::InvalidFormat)
    }
}

/// Validate `data` for a checkout of `lines`.
///
/// The password is only checked, and only carried into the result, when the
/// cart contains a category that requires it.
///
/// # Errors
///
/// Returns the [`FieldErrors`] of every failing field.
pub fn validate(
    data: &CheckoutFormData,
    lines: &[CartLine],
) -> Result<CheckoutDetails, FieldErrors> {
    let required = RequiredFields::for_lines(lines);
    let mut errors = FieldErrors::new();

    for field in Field::ALL {
        if !required.contains(field) {
            continue;
        }

        let value = data.get(field);
        let error = match field {
            Field::Nick => check_length(value, NICK_MIN_CHARS),
            Field::Password => check_length(value, PASSWORD_MIN_CHARS),
            Field::Whatsapp => check_whatsapp(value),
        };

        if let Some(error) = error {
            errors.insert(field, error);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CheckoutDetails {
        nick: data.nick.clone(),
        password: required
            .contains(Field::Password)
            .then(|| data.password.clone()),
        whatsapp: normalize_whatsapp(&data.whatsapp),
    })
}

/// Form state: current input plus the errors of the last submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    data: CheckoutFormData,
    errors: FieldErrors,
}

impl CheckoutForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled with `data`.
    pub fn with_data(data: CheckoutFormData) -> Self {
        Self {
            data,
            errors: FieldErrors::new(),
        }
    }

    /// Current input.
    pub fn data(&self) -> &CheckoutFormData {
        &self.data
    }

    /// Errors from the last submission that have not been edited away.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Whether the password input should be shown for `lines`.
    pub fn password_required(lines: &[CartLine]) -> bool {
        RequiredFields::for_lines(lines).contains(Field::Password)
    }

    /// Replace the value of `field`, clearing its error.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.data.get_mut(field) = value.into();
        self.errors.clear(field);
    }

    /// Validate the form for `lines`, keeping the errors for display.
    ///
    /// # Errors
    ///
    /// Returns the [`FieldErrors`] of every failing field.
    pub fn submit(&mut self, lines: &[CartLine]) -> Result<CheckoutDetails, FieldErrors> {
        validate(&self.data, lines).inspect_err(|errors| self.errors = errors.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        cart::{Cart, tests::product},
        products::ProductCategory,
    };
    use testresult::TestResult;

    use super::*;

    fn cart_of(category: ProductCategory) -> Cart {
        let mut cart = Cart::new();
        cart.add(product("p", 15_000, category));
        cart
    }

    fn form(nick: &str, password: &str, whatsapp: &str) -> CheckoutFormData {
        CheckoutFormData {
            nick: nick.to_string(),
            password: password.to_string(),
            whatsapp: whatsapp.to_string(),
        }
    }

    #[test]
    fn short_nick_fails_alone_when_password_not_needed() -> TestResult {
        let cart = cart_of(ProductCategory::Items);

        let errors = validate(&form("ab", "", "081234567890"), cart.lines())
            .err()
            .ok_or("nick should fail")?;

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Nick), Some(FieldError::TooShort { min: 3 }));

        Ok(())
    }

    #[test]
    fn short_password_fails_alone_for_login_products() -> TestResult {
        let cart = cart_of(ProductCategory::RobuxLogin);

        let errors = validate(&form("abc", "12345", "081234567890"), cart.lines())
            .err()
            .ok_or("password should fail")?;

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Password), Some(FieldError::TooShort { min: 6 }));

        Ok(())
    }

    #[test]
    fn bad_whatsapp_fails_alone_for_any_cart() -> TestResult {
        for category in ProductCategory::ALL {
            let cart = cart_of(category);

            let errors = validate(&form("abc", "123456", "12345"), cart.lines())
                .err()
                .ok_or("whatsapp should fail")?;

            assert_eq!(errors.len(), 1, "{category}");
            assert_eq!(errors.get(Field::Whatsapp), Some(FieldError::InvalidFormat));
        }

        Ok(())
    }

    #[test]
    fn blank_fields_are_required() -> TestResult {
        let cart = cart_of(ProductCategory::Joki);

        let errors = validate(&form("   ", "", " "), cart.lines())
            .err()
            .ok_or("all should fail")?;

        for field in Field::ALL {
            assert_eq!(errors.get(field), Some(FieldError::Required), "{field}");
        }

        Ok(())
    }

    #[test]
    fn whatsapp_prefixes_and_lengths() {
        let accepted = ["081234567", "+6281234567890", "6281234567", "0812 3456 7890"];
        let rejected = [
            "0801234567",
            "08123456",
            "081234567890123",
            "+6191234567",
            "0812-3456-789",
        ];

        for number in accepted {
            assert_eq!(check_whatsapp(number), None, "{number} should pass");
        }

        for number in rejected {
            assert_eq!(
                check_whatsapp(number),
                Some(FieldError::InvalidFormat),
                "{number} should fail"
            );
        }
    }

    #[test]
    fn valid_submission_normalizes_whatsapp_and_omits_unneeded_password() -> TestResult {
        let cart = cart_of(ProductCategory::Items);

        let details = validate(&form("builder", "ignored", "0812 3456 7890"), cart.lines())?;

        assert_eq!(details.whatsapp, "081234567890");
        assert_eq!(details.password, None);

        Ok(())
    }

    #[test]
    fn valid_submission_keeps_required_password() -> TestResult {
        let cart = cart_of(ProductCategory::Joki);

        let details = validate(&form("builder", "secret1", "081234567890"), cart.lines())?;

        assert_eq!(details.password.as_deref(), Some("secret1"));

        Ok(())
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let cart = cart_of(ProductCategory::RobuxLogin);
        let mut form = CheckoutForm::with_data(form("ab", "1", "x"));

        assert!(form.submit(cart.lines()).is_err());
        assert_eq!(form.errors().len(), 3);

        form.set(Field::Nick, "a");

        assert_eq!(form.errors().get(Field::Nick), None);
        assert_eq!(form.errors().len(), 2);
    }

    #[test]
    fn errors_display_per_field() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Nick, FieldError::TooShort { min: 3 });
        errors.insert(Field::Whatsapp, FieldError::InvalidFormat);

        assert_eq!(
            errors.to_string(),
            "nick must be at least 3 characters; whatsapp has an invalid format"
        );
    }
}
