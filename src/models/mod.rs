pub mod inquiry;

pub use inquiry::{BookingInquiry, FieldErrors, GuestCount, InquiryForm, InquiryStatus, ValidInquiry};
