//! Messages exchanged with the UI panel.
//!
//! Both directions are JSON objects tagged by a kebab-case `type` field:
//!
//! ```json
//! {"type": "load-groups", "collectionId": "VariableCollectionId:1:2"}
//! {"type": "groups-loaded", "groups": [...], "totalVariables": 42}
//! ```
//!
//! [`Controller`] answers each [`UiMessage`] with a [`Reply`].

mod controller;

pub use controller::{collection_summaries, Controller};

use crate::config::Preferences;
use crate::grouping::GroupSummary;
use crate::model::Mode;
use crate::pipeline::CreateTableRequest;
use serde::{Deserialize, Serialize};

/// UI → core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    LoadCollections,
    #[serde(rename_all = "camelCase")]
    LoadGroups {
        collection_id: String,
    },
    CreateTable(CreateTableRequest),
    SaveSettings {
        settings: Preferences,
    },
    Cancel,
}

/// Core → UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CoreMessage {
    CollectionsLoaded {
        collections: Vec<CollectionSummary>,
    },
    #[serde(rename_all = "camelCase")]
    GroupsLoaded {
        groups: Vec<GroupSummary>,
        total_variables: usize,
    },
    SettingsLoaded {
        settings: Preferences,
    },
    Error {
        message: String,
    },
}

/// A collection as offered for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub id: String,
    pub name: String,
    pub modes: Vec<Mode>,
    pub variable_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast shown by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Whether the host may dismiss it on its own
    pub auto_close: bool,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            auto_close: true,
        }
    }

    /// Errors stay until the user dismisses them.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            auto_close: false,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Everything produced in response to one UI message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub messages: Vec<CoreMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    /// The plugin should close after delivering this reply
    pub close: bool,
}

impl Reply {
    #[must_use]
    pub fn message(message: CoreMessage) -> Self {
        Self {
            messages: vec![message],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn close() -> Self {
        Self {
            close: true,
            ..Self::default()
        }
    }

    /// Error toast plus an `error` message for the panel.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            notification: Some(Notification::error(message.clone())),
            messages: vec![CoreMessage::Error { message }],
            close: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableTheme;

    #[test]
    fn test_ui_message_tags() {
        let msg: UiMessage =
            serde_json::from_str(r#"{"type":"load-groups","collectionId":"c1"}"#).unwrap();
        assert_eq!(
            msg,
            UiMessage::LoadGroups {
                collection_id: "c1".into()
            }
        );

        let msg: UiMessage = serde_json::from_str(r#"{"type":"cancel"}"#).unwrap();
        assert_eq!(msg, UiMessage::Cancel);
    }

    #[test]
    fn test_create_table_message_flattens_request() {
        let msg: UiMessage = serde_json::from_str(
            r#"{"type":"create-table","collectionId":"c1","collectionName":"Core",
                "modes":["m1"],"groups":["color"],"showSwatches":false}"#,
        )
        .unwrap();
        let UiMessage::CreateTable(request) = msg else {
            panic!("expected create-table");
        };
        assert_eq!(request.collection_name, "Core");
        assert_eq!(request.show_swatches, Some(false));
        assert_eq!(request.table_theme, None);
    }

    #[test]
    fn test_save_settings_uses_preference_shape() {
        let msg: UiMessage = serde_json::from_str(
            r#"{"type":"save-settings","settings":{"tableTheme":"light","showDevToken":false,"showSwatches":true}}"#,
        )
        .unwrap();
        let UiMessage::SaveSettings { settings } = msg else {
            panic!("expected save-settings");
        };
        assert_eq!(settings.table_theme, TableTheme::Light);
        assert!(!settings.show_dev_token);
    }

    #[test]
    fn test_core_message_serialization() {
        let json = serde_json::to_value(CoreMessage::GroupsLoaded {
            groups: vec![],
            total_variables: 3,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "groups-loaded", "groups": [], "totalVariables": 3})
        );

        let json = serde_json::to_value(CoreMessage::Error {
            message: "boom".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "error", "message": "boom"}));
    }

    #[test]
    fn test_error_reply_does_not_close() {
        let reply = Reply::error("nope");
        assert!(!reply.close);
        assert!(reply.notification.as_ref().is_some_and(Notification::is_error));
        assert_eq!(reply.notification.map(|n| n.auto_close), Some(false));
    }
}
