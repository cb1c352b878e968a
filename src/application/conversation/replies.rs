//! Reply texts for the booking dialog.
//!
//! All customer-facing copy lives here so the engine stays logic-only.
//! Formatting follows WhatsApp conventions (`*bold*`).

use chrono::NaiveDate;

use crate::domain::booking::Booking;
use crate::domain::conversation::DateOption;
use crate::domain::foundation::{BookingId, PhoneNumber, ServiceCode};
use crate::domain::slot::Slot;

/// How many bookings the "all bookings" admin view renders before truncating.
const ADMIN_LIST_CAP: usize = 20;

pub fn welcome() -> String {
    let service = ServiceCode::Haircut;
    format!(
        "Welcome to *Salon Booking System*! 👋\n\n\
         Please choose a service:\n\
         1️⃣ {} (${} - {} min)\n\n\
         Reply with *1* to select {}.",
        service.name(),
        service.price_usd(),
        service.duration_minutes(),
        service.name()
    )
}

pub fn invalid_service() -> String {
    "❌ Invalid selection. Please reply with *1* for Haircut.".to_string()
}

pub fn date_menu(dates: &[DateOption]) -> String {
    let mut message = String::from("Great! Please select a date:\n\n");
    for (index, option) in dates.iter().enumerate() {
        message.push_str(&format!("{}️⃣ {}\n", index + 1, option.label));
    }
    message.push_str("\nReply with the number (1-7).");
    message
}

pub fn invalid_date() -> String {
    "❌ Invalid date selection. Please reply with a number between 1-7.".to_string()
}

pub fn no_slots_for_date() -> String {
    "❌ No available slots for this date. Please select another date or type \"Hi\" to restart."
        .to_string()
}

pub fn slots_menu(date_label: &str, slots: &[Slot]) -> String {
    let mut message = format!("Available times for *{}*:\n\n", date_label);
    for (index, slot) in slots.iter().enumerate() {
        message.push_str(&format!("{}️⃣ {}\n", index + 1, slot.time.format("%H:%M")));
    }
    message.push_str("\nReply with the number to book.");
    message
}

pub fn invalid_time() -> String {
    "❌ Invalid time selection. Please reply with a valid number.".to_string()
}

pub fn ask_name() -> String {
    "Perfect! Please provide your full name:".to_string()
}

pub fn empty_name() -> String {
    "❌ Please provide your full name to continue.".to_string()
}

pub fn confirm_phone(name: &str, phone: &PhoneNumber) -> String {
    format!(
        "Thanks *{}*! Your number is *{}*. Is this correct?\n\n\
         Reply *YES* to confirm or provide correct number.",
        name, phone
    )
}

pub fn booking_confirmed(booking: &Booking) -> String {
    format!(
        "✅ *Booking Confirmed!*\n\n\
         📅 Date: {}\n\
         ⏰ Time: {}\n\
         💇 Service: {}\n\
         👤 Name: {}\n\
         📱 Phone: {}\n\n\
         *Booking ID:* {}\n\n\
         We'll send you a reminder 1 hour before your appointment.\n\n\
         To cancel, reply: *CANCEL {}*",
        booking.date,
        booking.time.format("%H:%M"),
        booking.service,
        booking.customer_name,
        booking.phone,
        booking.id,
        booking.id
    )
}

pub fn booking_failed(reason: &str) -> String {
    format!("❌ Booking failed: {}\n\nPlease type \"Hi\" to try again.", reason)
}

pub fn cancel_success(id: &BookingId) -> String {
    format!("✅ Booking {} has been cancelled successfully.", id)
}

pub fn cancel_failed(reason: &str) -> String {
    format!("❌ {}", reason)
}

pub fn admin_menu() -> String {
    "🔐 *Admin Panel*\n\n\
     Select option:\n\
     1️⃣ View Today's Bookings\n\
     2️⃣ View Tomorrow's Bookings\n\
     3️⃣ Block Time Slot\n\
     4️⃣ View All Bookings\n\
     5️⃣ Exit Admin\n\n\
     Reply with the number."
        .to_string()
}

pub fn invalid_admin_secret() -> String {
    "❌ Invalid admin password.".to_string()
}

pub fn invalid_admin_option() -> String {
    "❌ Invalid option. Please select 1-5.".to_string()
}

pub fn admin_block_slot_stub() -> String {
    "Feature coming soon! Type number to see menu again.".to_string()
}

pub fn admin_exited() -> String {
    "Exited admin panel. Type \"Hi\" to start booking.".to_string()
}

pub fn no_bookings_for_day(title: &str, date: NaiveDate) -> String {
    format!("📊 No bookings for {} ({})", title, date)
}

pub fn no_bookings_at_all() -> String {
    "📊 No bookings found.".to_string()
}

pub fn day_bookings(title: &str, date: NaiveDate, bookings: &[Booking]) -> String {
    let mut message = format!("📊 *{}'s Bookings* ({}):\n\n", title, date);
    for (index, booking) in bookings.iter().enumerate() {
        message.push_str(&format!(
            "{}. {} - {} ({})\n   Service: {}\n\n",
            index + 1,
            booking.time.format("%H:%M"),
            booking.customer_name,
            booking.id,
            booking.service
        ));
    }
    message.push_str(&format!("Total: {} bookings", bookings.len()));
    message
}

pub fn all_bookings(bookings: &[Booking]) -> String {
    let mut message = String::from("📊 *All Upcoming Bookings*:\n\n");
    for (index, booking) in bookings.iter().take(ADMIN_LIST_CAP).enumerate() {
        message.push_str(&format!(
            "{}. {} {}\n   {} - {}\n   ID: {}\n\n",
            index + 1,
            booking.date,
            booking.time.format("%H:%M"),
            booking.customer_name,
            booking.service,
            booking.id
        ));
    }
    if bookings.len() > ADMIN_LIST_CAP {
        message.push_str(&format!(
            "\n... and {} more bookings",
            bookings.len() - ADMIN_LIST_CAP
        ));
    }
    message
}

pub fn reminder(booking: &Booking) -> String {
    format!(
        "🔔 *Reminder!*\n\n\
         Your appointment is in 1 hour:\n\
         ⏰ Time: {}\n\
         💇 Service: {}\n\
         👤 Name: {}\n\n\
         See you soon! 😊\n\n\
         To cancel, reply: *CANCEL {}*",
        booking.time.format("%H:%M"),
        booking.service,
        booking.customer_name,
        booking.id
    )
}

pub fn something_went_wrong() -> String {
    "❌ Sorry, something went wrong. Please try again or type \"Hi\" to restart.".to_string()
}
