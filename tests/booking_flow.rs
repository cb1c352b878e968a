//! End-to-end flow over in-memory adapters: populate slots, hold the whole
//! booking dialog, then remind and cancel.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use secrecy::SecretString;

use bookline::adapters::storage::{
    InMemoryBookingStore, InMemoryConversationStore, InMemorySlotStore,
};
use bookline::adapters::whatsapp::RecordingGateway;
use bookline::application::{
    BookingManager, ConversationEngine, ReminderScheduler, ReminderSchedulerConfig,
    SlotInitializer, SlotInitializerConfig,
};
use bookline::domain::booking::BookingStatus;
use bookline::domain::foundation::{BookingId, PhoneNumber};
use bookline::ports::{BookingStore, MessageKind, SlotStore};

struct World {
    slots: Arc<InMemorySlotStore>,
    bookings: Arc<InMemoryBookingStore>,
    manager: Arc<BookingManager<InMemorySlotStore, InMemoryBookingStore>>,
    engine: ConversationEngine<
        InMemorySlotStore,
        InMemoryBookingStore,
        InMemoryConversationStore,
        RecordingGateway,
    >,
    gateway: Arc<RecordingGateway>,
}

async fn world() -> World {
    let slots = Arc::new(InMemorySlotStore::new());
    let bookings = Arc::new(InMemoryBookingStore::new());
    let gateway = Arc::new(RecordingGateway::new());
    let manager = Arc::new(BookingManager::new(Arc::clone(&slots), Arc::clone(&bookings)));
    let engine = ConversationEngine::new(
        Arc::clone(&manager),
        Arc::new(InMemoryConversationStore::new()),
        Arc::clone(&gateway),
        SecretString::new("sesame".to_string()),
    );

    let initializer = SlotInitializer::new(Arc::clone(&slots), SlotInitializerConfig::default());
    initializer.tick_from(today()).await.unwrap();

    World {
        slots,
        bookings,
        manager,
        engine,
        gateway,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn customer() -> PhoneNumber {
    PhoneNumber::new("15550001111").unwrap()
}

async fn say(world: &World, text: &str) {
    world.engine.handle(customer(), text, MessageKind::Text).await;
}

async fn book_first_slot(world: &World) -> BookingId {
    say(world, "Hi").await;
    say(world, "1").await;
    say(world, "1").await;
    say(world, "1").await;
    say(world, "Ada Lovelace").await;
    say(world, "yes").await;
    let bookings = world.bookings.list_all().await.unwrap();
    assert_eq!(bookings.len(), 1);
    bookings[0].id.clone()
}

#[tokio::test]
async fn dialog_books_a_slot_and_marks_it_taken() {
    let world = world().await;

    let id = book_first_slot(&world).await;

    assert_eq!(id.as_str(), "BK00001");
    let day = world.slots.slots_for_date(today()).await.unwrap();
    let taken: Vec<_> = day.iter().filter(|slot| !slot.is_available()).collect();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].booking_ref, Some(id));
    assert!(world
        .gateway
        .last_body()
        .await
        .unwrap()
        .contains("Booking Confirmed"));
}

#[tokio::test]
async fn booked_slot_disappears_from_the_next_customers_menu() {
    let world = world().await;
    book_first_slot(&world).await;

    let other = PhoneNumber::new("15559998888").unwrap();
    world.engine.handle(other.clone(), "Hi", MessageKind::Text).await;
    world.engine.handle(other.clone(), "1", MessageKind::Text).await;
    world.engine.handle(other, "1", MessageKind::Text).await;

    let menu = world.gateway.last_body().await.unwrap();
    assert!(menu.contains("Available times"));
    assert!(menu.contains("1️⃣ 09:30"));
    assert!(!menu.contains("09:00"));
}

#[tokio::test]
async fn reminder_fires_once_an_hour_before_the_appointment() {
    let world = world().await;
    let id = book_first_slot(&world).await;
    let booking = world.bookings.get(&id).await.unwrap().unwrap();

    let scheduler = ReminderScheduler::new(
        Arc::clone(&world.bookings),
        Arc::clone(&world.gateway),
        ReminderSchedulerConfig {
            dispatch_pause: Duration::ZERO,
            ..ReminderSchedulerConfig::default()
        },
    );
    let hour_before = booking.start_time() - ChronoDuration::minutes(60);
    scheduler.tick_at(hour_before).await.unwrap();
    scheduler.tick_at(hour_before).await.unwrap();

    let reminded = world.bookings.get(&id).await.unwrap().unwrap();
    assert_eq!(reminded.status, BookingStatus::Reminded);
    let reminders: Vec<_> = world
        .gateway
        .sent()
        .await
        .into_iter()
        .filter(|(_, body)| body.contains("Reminder!"))
        .collect();
    assert_eq!(reminders.len(), 1);
}

#[tokio::test]
async fn cancellation_frees_the_slot_for_rebooking() {
    let world = world().await;
    let id = book_first_slot(&world).await;

    say(&world, &format!("cancel {id}")).await;

    let cancelled = world.bookings.get(&id).await.unwrap().unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    let available = world.manager.list_available_slots(today()).await.unwrap();
    assert_eq!(available.len(), 18);

    // A second cancel finds nothing to free.
    say(&world, &format!("cancel {id}")).await;
    assert!(world.gateway.last_body().await.unwrap().contains("not found"));
}
