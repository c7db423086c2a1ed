use serde::{Deserialize, Serialize};

/// Subject recorded as the actor of audited mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    actor_id: String,
    display_name: String,
}

impl ActorIdentity {
    /// Creates an actor identity from its id and display name.
    #[must_use]
    pub fn new(actor_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Returns the stable actor identifier.
    #[must_use]
    pub fn actor_id(&self) -> &str {
        self.actor_id.as_str()
    }

    /// Returns the human-readable actor name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}

impl Default for ActorIdentity {
    fn default() -> Self {
        Self::new("1", "Super Admin")
    }
}
