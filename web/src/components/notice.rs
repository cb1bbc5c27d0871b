//! Transient success / error banners.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use leptos::prelude::*;

/// Banners disappear on their own after this long.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

static NEXT_NOTICE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Show `message` and schedule its removal.
pub fn notify(notices: RwSignal<Vec<Notice>>, kind: NoticeKind, message: impl Into<String>) {
    let id = NEXT_NOTICE_ID.fetch_add(1, Ordering::Relaxed);
    notices.update(|n| {
        n.push(Notice {
            id,
            kind,
            message: message.into(),
        })
    });
    set_timeout(move || dismiss(notices, id), NOTICE_TTL);
}

pub fn dismiss(notices: RwSignal<Vec<Notice>>, id: u64) {
    notices.update(|n| n.retain(|notice| notice.id != id));
}

/// Stack of active banners, each dismissible by hand.
#[component]
pub fn NoticeStack(notices: RwSignal<Vec<Notice>>) -> impl IntoView {
    view! {
        <div class="notice-stack" role="status">
            <For
                each=move || notices.get()
                key=|n| n.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class()>
                            <span class="notice-text">{notice.message}</span>
                            <button
                                class="notice-close"
                                aria-label="Dismiss"
                                on:click=move |_| dismiss(notices, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
