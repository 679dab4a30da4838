//! Client-side state: the session and profile stores and their persistence.
//!
//! Both stores are explicit shared objects (`Arc`) with get/set/subscribe.
//! Only these types mutate authentication state; everything else reads it.

pub mod observer;
pub mod profile;
pub mod session;
pub mod vault;

pub use observer::{SubscriptionId, Subscribers};
pub use profile::{PostageBatchStatus, Profile, ProfileStore};
pub use session::{Session, SessionStore};
pub use vault::{persist_session, KeychainVault, MemoryVault, TokenVault, VaultError};
