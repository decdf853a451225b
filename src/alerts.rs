use regex::Regex;
use thiserror::Error;

use crate::models::AlertRegistration;

/// Wards that accept alert subscriptions.
pub const WARDS: [&str; 22] = [
    "Kadavanthra",
    "Elamkulam",
    "Vennala",
    "Palarivattom",
    "Kaloor",
    "Panampilly Nagar",
    "Kochi Central",
    "Fort Kochi",
    "Mattancherry",
    "Edappally",
    "Thrikkakara",
    "Kalamassery",
    "Maradu",
    "Thripunithura",
    "Ernakulam North",
    "Ernakulam South",
    "Pachalam",
    "Palluruthy",
    "Vaduthala",
    "Vyttila",
    "Cheranalloor",
    "Vypeen",
];

/// Flood-risk percentages a subscriber may choose from.
pub const THRESHOLD_OPTIONS: [u8; 5] = [75, 80, 85, 90, 95];
pub const DEFAULT_THRESHOLD: u8 = 75;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\+?\d[\d \-]*\d$";

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("unknown ward {0:?}; run `floodcast alerts wards` for the list")]
    UnknownWard(String),

    #[error("invalid email address {0:?}")]
    Email(String),

    #[error("invalid phone number {0:?}")]
    Phone(String),

    #[error("threshold must be one of 75, 80, 85, 90, 95 (got {0})")]
    Threshold(u8),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Alert subscription as entered by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct AlertForm {
    pub name: String,
    pub ward: String,
    pub email: String,
    pub phone: String,
    pub threshold: Option<u8>,
    pub send_test: bool,
}

impl AlertForm {
    /// Check every field and produce the payload the service expects.
    ///
    /// The ward is matched case-insensitively and replaced by its canonical name.
    pub fn validate(&self) -> Result<AlertRegistration, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Missing("name"));
        }

        let ward = canonical_ward(&self.ward)?;

        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::Missing("email"));
        }
        if !Regex::new(EMAIL_PATTERN)?.is_match(email) {
            return Err(ValidationError::Email(email.to_string()));
        }

        // optional; an empty phone is sent as ""
        let phone = self.phone.trim();
        if !phone.is_empty() {
            validate_phone(phone)?;
        }

        let threshold = self.threshold.unwrap_or(DEFAULT_THRESHOLD);
        if !THRESHOLD_OPTIONS.contains(&threshold) {
            return Err(ValidationError::Threshold(threshold));
        }

        Ok(AlertRegistration {
            name: name.to_string(),
            ward: ward.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            threshold,
            send_test: self.send_test.then_some(true),
        })
    }
}

/// Case-insensitive lookup in [`WARDS`].
pub fn canonical_ward(input: &str) -> Result<&'static str, ValidationError> {
    let wanted = input.trim();
    if wanted.is_empty() {
        return Err(ValidationError::Missing("ward"));
    }
    WARDS
        .iter()
        .find(|w| w.eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| ValidationError::UnknownWard(wanted.to_string()))
}

/// Optional leading `+`, then digits separated by spaces or dashes; 7 to 15 digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if Regex::new(PHONE_PATTERN)?.is_match(phone) && (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::Phone(phone.to_string()))
    }
}

/// Wards in alphabetical order, as offered in the subscription form.
pub fn sorted_wards() -> Vec<&'static str> {
    let mut wards = WARDS.to_vec();
    wards.sort_unstable();
    wards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AlertForm {
        AlertForm {
            name: "Asha Menon".into(),
            ward: "vennala".into(),
            email: "asha@example.com".into(),
            phone: "+91 98470-12345".into(),
            threshold: Some(85),
            send_test: false,
        }
    }

    #[test]
    fn test_valid_form() {
        let reg = form().validate().unwrap();
        assert_eq!(reg.ward, "Vennala");
        assert_eq!(reg.threshold, 85);
        assert_eq!(reg.send_test, None);
    }

    #[test]
    fn test_default_threshold_and_send_test() {
        let mut f = form();
        f.threshold = None;
        f.send_test = true;
        let reg = f.validate().unwrap();
        assert_eq!(reg.threshold, 75);
        assert_eq!(reg.send_test, Some(true));
    }

    #[test]
    fn test_rejects_each_field() {
        let mut f = form();
        f.name = "  ".into();
        assert_eq!(f.validate(), Err(ValidationError::Missing("name")));

        let mut f = form();
        f.ward = "Atlantis".into();
        assert_eq!(f.validate(), Err(ValidationError::UnknownWard("Atlantis".into())));

        let mut f = form();
        f.email = "asha.example.com".into();
        assert!(matches!(f.validate(), Err(ValidationError::Email(_))));

        let mut f = form();
        f.phone = "12-ab".into();
        assert!(matches!(f.validate(), Err(ValidationError::Phone(_))));

        let mut f = form();
        f.threshold = Some(70);
        assert_eq!(f.validate(), Err(ValidationError::Threshold(70)));
    }

    #[test]
    fn test_email_only_subscription() {
        let mut f = form();
        f.phone = "  ".into();
        let reg = f.validate().unwrap();
        assert_eq!(reg.phone, "");
        assert_eq!(reg.email, "asha@example.com");
    }

    #[test]
    fn test_phone_digit_count() {
        assert!(validate_phone("0484-2351554").is_ok());
        assert!(validate_phone("123456").is_err());
        assert!(validate_phone("+1234567890123456").is_err());
    }

    #[test]
    fn test_sorted_wards() {
        let wards = sorted_wards();
        assert_eq!(wards.len(), 22);
        assert_eq!(wards[0], "Cheranalloor");
        assert_eq!(wards[21], "Vyttila");
    }
}
