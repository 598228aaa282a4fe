//! Server-rendered booking page.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::form::{BookingForm, SubmitStatus, SUCCESS_NOTICE_SECS};
use crate::models::GuestCount;

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn booking_page(form: &BookingForm, now: DateTime<Utc>) -> String {
    let today = now.date_naive().format("%Y-%m-%d").to_string();
    let values = form.values();
    let errors = form.errors();

    let field_error = |field: &str| -> String {
        errors
            .get(field)
            .map(|msg| format!(r#"<p class="field-error" id="{field}-error">{}</p>"#, escape(msg)))
            .unwrap_or_default()
    };

    let check_out_min = if values.check_in.is_empty() {
        today.clone()
    } else {
        escape(&values.check_in)
    };

    let mut guest_options = String::from(r#"<option value="">Select number of guests</option>"#);
    for n in GuestCount::MIN..=GuestCount::MAX {
        let selected = if values.guests == n.to_string() { " selected" } else { "" };
        let label = if n == 1 { "Guest" } else { "Guests" };
        let _ = write!(guest_options, r#"<option value="{n}"{selected}>{n} {label}</option>"#);
    }

    let notice = match form.status_at(now) {
        SubmitStatus::Success => format!(
            r#"<div class="notice success" role="status" data-dismiss-after-ms="{}">
  <p>Booking inquiry submitted successfully!</p>
  <p>We'll get back to you shortly to confirm your reservation.</p>
</div>"#,
            SUCCESS_NOTICE_SECS * 1000
        ),
        SubmitStatus::Error => r#"<div class="notice error" role="alert">
  <p>Error submitting booking inquiry.</p>
  <p>Please try again or contact us directly.</p>
</div>"#
            .to_string(),
        SubmitStatus::Idle => String::new(),
    };

    let (disabled, button_label) = if form.is_submitting() {
        (" disabled", "Submitting...")
    } else {
        ("", "Submit Booking Inquiry")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Book Your Stay</title>
</head>
<body>
<h1>Book Your Stay</h1>
<p>Fill out the form below to inquire about availability and make your reservation</p>
<form id="booking-form" method="post" action="/booking">
  <label for="name">Full Name *</label>
  <input type="text" id="name" name="name" value="{name}" required>
  {name_error}
  <label for="email">Email Address *</label>
  <input type="email" id="email" name="email" value="{email}" required>
  {email_error}
  <label for="phone">Phone Number *</label>
  <input type="tel" id="phone" name="phone" value="{phone}" required>
  {phone_error}
  <label for="checkIn">Check-in Date *</label>
  <input type="date" id="checkIn" name="checkIn" value="{check_in}" min="{today}" required>
  {check_in_error}
  <label for="checkOut">Check-out Date *</label>
  <input type="date" id="checkOut" name="checkOut" value="{check_out}" min="{check_out_min}" required>
  {check_out_error}
  <label for="guests">Number of Guests *</label>
  <select id="guests" name="guests" required>{guest_options}</select>
  {guests_error}
  <label for="message">Additional Message</label>
  <textarea id="message" name="message" rows="4">{message}</textarea>
  <button type="submit" id="submit"{disabled}>{button_label}</button>
  {notice}
</form>
<script>
document.getElementById("booking-form").addEventListener("submit", function () {{
  var button = document.getElementById("submit");
  button.disabled = true;
  button.textContent = "Submitting...";
}});
document.querySelectorAll("[data-dismiss-after-ms]").forEach(function (el) {{
  setTimeout(function () {{ el.remove(); }}, Number(el.dataset.dismissAfterMs));
}});
</script>
</body>
</html>
"#,
        name = escape(&values.name),
        name_error = field_error("name"),
        email = escape(&values.email),
        email_error = field_error("email"),
        phone = escape(&values.phone),
        phone_error = field_error("phone"),
        check_in = escape(&values.check_in),
        check_in_error = field_error("checkIn"),
        check_out = escape(&values.check_out),
        check_out_error = field_error("checkOut"),
        guests_error = field_error("guests"),
        message = escape(&values.message),
    )
}
