//! Business logic for the Genie chat sample app.
//!
//! This crate defines the "ports" the infrastructure layer implements
//! (session store, Genie conversation client, statement executor) plus
//! the pieces that use them: the conversation history, the chat sink
//! abstraction, and the attachment-translation turn logic. It depends
//! only on `geniechat-types` -- never on HTTP or UI crates.

pub mod genie;
pub mod history;
pub mod sink;
pub mod store;
pub mod turn;
