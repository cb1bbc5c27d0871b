//! Timetable Common – schedule model, calendar engines and the REST client
//! shared by the web dashboard and the command-line companion.

pub mod api;
pub mod calendar;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod form;
pub mod layout;
pub mod loader;
pub mod mutation;
pub mod periods;
pub mod permissions;
pub mod protocol;
pub mod session;
pub mod stats;

pub use error::ScheduleError;
pub use event::CalendarEvent;
pub use session::Session;
