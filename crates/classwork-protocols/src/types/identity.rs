//! Identity metadata attached to every constructed instance.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Link from an instance to the instance that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    pub class_name: String,
    pub instance_id: Uuid,
}

/// Framework-owned identity of an instance.
///
/// Filled in by the instantiation service; callers never set it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub class_name: String,
    pub instance_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentLink>,
}

impl Identity {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            instance_id: Uuid::new_v4(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: &Identity) -> Self {
        self.parent = Some(ParentLink {
            class_name: parent.class_name.clone(),
            instance_id: parent.instance_id,
        });
        self
    }
}
