//! Actor Context Port - Who is asking for an output.

use crate::domain::catalog::Actor;

/// Port exposing the current user, if any.
pub trait ActorContext: Send + Sync {
    fn current_actor(&self) -> Option<Actor>;
}
