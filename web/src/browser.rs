//! Browser boundary: the stored session token and the local calendar date.
//!
//! Everything else in the front end receives these values as arguments.

use chrono::NaiveDate;

use timetable_common::Session;

/// `localStorage` key the sign-in flow writes the bearer token to.
pub const TOKEN_KEY: &str = "token";

/// Session built from the token in `localStorage`.
///
/// Read on every request so that signing in or out in another tab is
/// picked up without a reload.  Off the browser there is no session.
pub fn session() -> Session {
    #[cfg(feature = "hydrate")]
    {
        let token = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten());
        Session::new(token)
    }

    #[cfg(not(feature = "hydrate"))]
    {
        Session::anonymous()
    }
}

/// Today in the viewer's time zone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
