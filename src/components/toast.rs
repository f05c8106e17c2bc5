// Toast notification host: wraps page content with a notification region.

use super::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
            ToastLevel::Info => "info",
        }
    }
}

/// A transient notification to surface in the toast region.
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Wrap child markup with the toast notification region. The region is
/// always present so client-side scripts have a stable mount point.
pub fn render_host(children: &str, toasts: &[Toast]) -> String {
    let mut out = String::from("<div class=\"toast-host\">");
    out.push_str("<div class=\"toast-region\" aria-live=\"polite\">");
    for toast in toasts {
        out.push_str(&format!(
            "<div class=\"toast toast-{}\">{}</div>",
            toast.level.as_str(),
            escape_html(&toast.message)
        ));
    }
    out.push_str("</div>");
    out.push_str(children);
    out.push_str("</div>");
    out
}
