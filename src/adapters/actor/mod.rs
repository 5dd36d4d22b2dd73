//! Actor adapters - `ActorContext` implementations.

mod static_actor_context;

pub use static_actor_context::StaticActorContext;
