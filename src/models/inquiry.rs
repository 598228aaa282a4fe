use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

/// Raw booking form values, exactly as submitted by the page or the JSON API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryForm {
    #[validate(length(min = 1, message = "Name is required"))]
    #[serde(deserialize_with = "string_or_null")]
    pub name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        regex(path = *EMAIL_RE, message = "Invalid email address")
    )]
    #[serde(deserialize_with = "string_or_null")]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    #[serde(deserialize_with = "string_or_null")]
    pub phone: String,
    #[serde(deserialize_with = "string_or_null")]
    pub check_in: String,
    #[serde(deserialize_with = "string_or_null")]
    pub check_out: String,
    #[serde(deserialize_with = "string_or_number")]
    pub guests: String,
    #[serde(deserialize_with = "string_or_null")]
    pub message: String,
}

impl InquiryForm {
    /// Copy with surrounding whitespace removed from every field but `message`.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            check_in: self.check_in.trim().to_string(),
            check_out: self.check_out.trim().to_string(),
            guests: self.guests.trim().to_string(),
            message: self.message.clone(),
        }
    }

    /// Checks every field rule against `today` and returns the typed inquiry.
    ///
    /// All failing fields are reported at once, one message per field.
    pub fn validate_at(&self, today: NaiveDate) -> Result<ValidInquiry, FieldErrors> {
        let form = self.trimmed();

        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(e),
        };

        let check_in = match parse_date(&form.check_in) {
            DateField::Missing => {
                errors.insert("checkIn", "Check-in date is required");
                None
            }
            DateField::Invalid => {
                errors.insert("checkIn", "Check-in date is invalid");
                None
            }
            DateField::Date(date) if date < today => {
                errors.insert("checkIn", "Check-in date cannot be in the past");
                Some(date)
            }
            DateField::Date(date) => Some(date),
        };

        let check_out = match parse_date(&form.check_out) {
            DateField::Missing => {
                errors.insert("checkOut", "Check-out date is required");
                None
            }
            DateField::Invalid => {
                errors.insert("checkOut", "Check-out date is invalid");
                None
            }
            DateField::Date(date) => {
                // Only compared once a check-in date has been chosen.
                if check_in.is_some_and(|check_in| date <= check_in) {
                    errors.insert("checkOut", "Check-out must be after check-in");
                }
                Some(date)
            }
        };

        let guests = if form.guests.is_empty() {
            errors.insert("guests", "Number of guests is required");
            None
        } else {
            // Exactly one of the select values; "+2" or "02" do not count.
            let parsed = (GuestCount::MIN..=GuestCount::MAX)
                .find(|n| n.to_string() == form.guests)
                .and_then(GuestCount::new);
            if parsed.is_none() {
                errors.insert("guests", "Number of guests must be between 1 and 10");
            }
            parsed
        };

        match (check_in, check_out, guests) {
            (Some(check_in), Some(check_out), Some(guests)) if errors.is_empty() => {
                Ok(ValidInquiry {
                    name: form.name,
                    email: form.email,
                    phone: form.phone,
                    check_in,
                    check_out,
                    guests,
                    message: form.message,
                })
            }
            _ => Err(errors),
        }
    }
}

enum DateField {
    Missing,
    Invalid,
    Date(NaiveDate),
}

fn parse_date(value: &str) -> DateField {
    if value.is_empty() {
        return DateField::Missing;
    }
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => DateField::Date(date),
        Err(_) => DateField::Invalid,
    }
}

/// Treats an explicit JSON `null` like a missing field.
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `"2"` from an HTML select as well as `2` from a JSON body.
/// Fractional numbers pass through as text and fail the range rule.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or an integer")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

/// Number of guests, one of 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GuestCount(u8);

impl GuestCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(count: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&count).then_some(Self(count))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for GuestCount {
    type Error = String;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        Self::new(count).ok_or_else(|| {
            format!(
                "guest count {count} outside {}..={}",
                GuestCount::MIN,
                GuestCount::MAX
            )
        })
    }
}

impl From<GuestCount> for u8 {
    fn from(count: GuestCount) -> u8 {
        count.0
    }
}

/// Form values that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: GuestCount,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
}

impl InquiryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InquiryStatus::Pending => "pending",
        }
    }
}

/// The record written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: GuestCount,
    pub message: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

impl BookingInquiry {
    /// Builds a pending record; stay dates become timestamps at UTC midnight.
    pub fn pending(inquiry: ValidInquiry, created_at: DateTime<Utc>) -> Self {
        Self {
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            check_in: start_of_day(inquiry.check_in),
            check_out: start_of_day(inquiry.check_out),
            guests: inquiry.guests,
            message: inquiry.message,
            status: InquiryStatus::Pending,
            created_at,
        }
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// One message per failing field, keyed by the form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Keeps the first message recorded for a field.
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, errs) in errors.field_errors() {
            // A missing value also fails the address check; report it as missing.
            let error = errs
                .iter()
                .find(|e| e.code == "length")
                .or_else(|| errs.first());
            if let Some(error) = error {
                let message = error
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| error.code.to_string());
                out.insert(&field.to_string(), &message);
            }
        }
        out
    }
}
