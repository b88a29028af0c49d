//! Transient user-visible messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

pub(crate) const PROPERTY_SAVED: &str = "Bien ajouté au patrimoine !";
pub(crate) const PROPERTY_DELETED: &str = "Bien supprimé";
pub(crate) const INCOME_REQUIRED: &str = "Veuillez entrer vos revenus";
pub(crate) const LINK_SENT: &str = "Lien de connexion envoyé !";
