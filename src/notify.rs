//! Toast 通知
//!
//! 通知总线作为显式上下文传给 [`crate::view::TaskBoard`]，不使用全局状态。

use std::time::{Duration, Instant};

use uuid::Uuid;

/// 默认显示时长
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
    Info,
}

impl ToastVariant {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "✓",
            ToastVariant::Error => "✗",
            ToastVariant::Info => "ℹ",
        }
    }
}

/// 待发送的通知（尚未分配 ID）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToast {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    /// None 使用默认时长；Some(ZERO) 表示不自动消失
    pub duration: Option<Duration>,
}

impl NewToast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ToastVariant::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ToastVariant::Error, title, description)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ToastVariant::Info, title, description)
    }

    fn new(variant: ToastVariant, title: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            title: title.into(),
            description: (!description.is_empty()).then_some(description),
            variant,
            duration: None,
        }
    }
}

/// 已显示的通知
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub duration: Duration,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now.saturating_duration_since(self.shown_at) >= self.duration
    }
}

/// 通知总线
pub trait NotificationBus {
    /// 显示一条通知，返回其 ID
    fn add_toast(&mut self, toast: NewToast) -> String;

    fn remove_toast(&mut self, id: &str);
}

fn new_toast_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

/// 内存中的通知队列
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// 移除已到期的通知，返回移除数量
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        before - self.toasts.len()
    }
}

impl NotificationBus for ToastQueue {
    fn add_toast(&mut self, toast: NewToast) -> String {
        let id = new_toast_id();
        self.toasts.push(Toast {
            id: id.clone(),
            title: toast.title,
            description: toast.description,
            variant: toast.variant,
            duration: toast.duration.unwrap_or(DEFAULT_TOAST_DURATION),
            shown_at: Instant::now(),
        });
        id
    }

    fn remove_toast(&mut self, id: &str) {
        self.toasts.retain(|t| t.id != id);
    }
}

/// 直接打印到终端，用于命令行
#[derive(Debug, Default)]
pub struct ConsoleBus;

impl NotificationBus for ConsoleBus {
    fn add_toast(&mut self, toast: NewToast) -> String {
        let line = match &toast.description {
            Some(desc) => format!("{} {}: {}", toast.variant.icon(), toast.title, desc),
            None => format!("{} {}", toast.variant.icon(), toast.title),
        };
        match toast.variant {
            ToastVariant::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        new_toast_id()
    }

    fn remove_toast(&mut self, _id: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut queue = ToastQueue::new();
        let id = queue.add_toast(NewToast::success("Success", "Task created successfully"));
        assert_eq!(id.len(), 9);
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].duration, DEFAULT_TOAST_DURATION);

        queue.remove_toast(&id);
        assert!(queue.toasts().is_empty());
    }

    #[test]
    fn test_empty_description_is_absent() {
        let toast = NewToast::info("Heads up", "");
        assert_eq!(toast.description, None);
    }

    #[test]
    fn test_prune_expired() {
        let mut queue = ToastQueue::new();
        queue.add_toast(NewToast::error("Delete Failed", "try again"));
        let mut sticky = NewToast::info("Sticky", "");
        sticky.duration = Some(Duration::ZERO);
        queue.add_toast(sticky);

        let shown = queue.toasts()[0].shown_at;
        assert_eq!(queue.prune_expired(shown + Duration::from_millis(100)), 0);
        assert_eq!(queue.prune_expired(shown + Duration::from_secs(3)), 1);
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].title, "Sticky");
    }
}
