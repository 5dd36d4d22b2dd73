//! Fixed actor context, for batch jobs and the CLI.

use crate::domain::catalog::Actor;
use crate::ports::ActorContext;

/// Always reports the same actor (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticActorContext {
    actor: Option<Actor>,
}

impl StaticActorContext {
    pub fn new(actor: Option<Actor>) -> Self {
        Self { actor }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl ActorContext for StaticActorContext {
    fn current_actor(&self) -> Option<Actor> {
        self.actor.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_configured_actor() {
        let context = StaticActorContext::new(Some(Actor::new("admin", vec!["ROLE_ADMINISTRATOR".into()])));
        assert!(context.current_actor().unwrap().is_admin());
        assert!(StaticActorContext::anonymous().current_actor().is_none());
    }
}
