use crate::state::Character;

/// Character refresh and chat-room synchronisation provided by the host.
pub trait SessionOracle: Send + Sync {
    /// Rebuilds the character after its appearance changed.
    ///
    /// `push` requests that the new appearance be sent to the server.
    fn refresh(&self, character: &Character, push: bool);

    /// Broadcasts the character's appearance to the current chat room.
    fn sync_chat_room(&self, character: &Character);

    /// Current host time in milliseconds, used for timer locks.
    fn now_ms(&self) -> u64;

    /// Generates a lock password of `len` characters.
    fn random_password(&self, len: usize) -> String;
}
