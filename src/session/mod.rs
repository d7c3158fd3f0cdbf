/*!
 * Session state for one user interaction.
 *
 * The session owns nothing but the latest translation result; its lifecycle
 * belongs to the embedding surface, which drops the store when the session
 * ends.
 */

pub use self::store::{SessionEntry, SessionResultStore};

pub mod store;
