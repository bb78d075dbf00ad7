//! Transient notifications.
//!
//! Every failure in the app degrades to one of these or to a redirect; there
//! is no fatal state.

use std::time::Duration;

use leptos::*;

const DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

impl NoticeKind {
    fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
            NoticeKind::Warning => "notice notice-warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    notices: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u32>,
}

impl Notifier {
    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into());
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.push(NoticeKind::Warning, text.into());
    }

    pub fn dismiss(&self, id: u32) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }

    fn push(&self, kind: NoticeKind, text: String) {
        let id = self.next_id.get_untracked();
        self.next_id.update(|n| *n += 1);
        self.notices.update(|list| list.push(Notice { id, kind, text }));

        let this = *self;
        leptos::set_timeout(move || this.dismiss(id), DISMISS_AFTER);
    }
}

pub fn provide_notifier() -> Notifier {
    let notifier = Notifier {
        notices: create_rw_signal(Vec::new()),
        next_id: create_rw_signal(0),
    };
    provide_context(notifier);
    notifier
}

pub fn use_notifier() -> Notifier {
    expect_context::<Notifier>()
}

/// Fixed overlay listing the live notices.
#[component]
pub fn NotificationArea() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="notices">
            {move || {
                notifier
                    .notices
                    .get()
                    .into_iter()
                    .map(|notice| {
                        let id = notice.id;
                        view! {
                            <div class=notice.kind.css_class()>
                                <span>{notice.text}</span>
                                <button on:click=move |_| notifier.dismiss(id)>"×"</button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
