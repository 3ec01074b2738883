//! Transient user notifications.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    /// Oldest toasts beyond this are dropped.
    pub const MAX_VISIBLE: usize = 4;

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message.into())
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message.into())
    }

    fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, kind, message });
        if self.items.len() > Self::MAX_VISIBLE {
            self.items.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    #[must_use]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_dismiss() {
        let mut toasts = Toasts::default();
        let first = toasts.success("Folder created successfully");
        let second = toasts.error("Error deleting folder");
        assert_ne!(first, second);
        toasts.dismiss(first);
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].kind, ToastKind::Error);
    }

    #[test]
    fn keeps_only_recent() {
        let mut toasts = Toasts::default();
        for i in 0..6 {
            toasts.success(format!("toast {i}"));
        }
        assert_eq!(toasts.items().len(), Toasts::MAX_VISIBLE);
        assert_eq!(toasts.items()[0].message, "toast 2");
    }
}
