//! [`wheel_core::SessionOracle`] that records refreshes instead of talking to a server.
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use wheel_core::{Character, SessionOracle};

/// Something the engine asked the session to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Refresh { character: u32, push: bool },
    ChatRoomSync { character: u32 },
}

/// SessionOracle implementation keeping an in-memory event log
#[derive(Default)]
pub struct SessionOracleImpl {
    events: Mutex<Vec<SessionEvent>>,
    /// Frozen clock, if set.
    clock_ms: Option<u64>,
}

impl SessionOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose clock always reads `now_ms`.
    pub fn with_clock(now_ms: u64) -> Self {
        Self {
            clock_ms: Some(now_ms),
            ..Self::default()
        }
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<SessionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Removes and returns the recorded events.
    pub fn drain(&self) -> Vec<SessionEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    fn push(&self, event: SessionEvent) {
        tracing::trace!(?event, "session event");
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl SessionOracle for SessionOracleImpl {
    fn refresh(&self, character: &Character, push: bool) {
        self.push(SessionEvent::Refresh {
            character: character.id,
            push,
        });
    }

    fn sync_chat_room(&self, character: &Character) {
        self.push(SessionEvent::ChatRoomSync {
            character: character.id,
        });
    }

    fn now_ms(&self) -> u64 {
        self.clock_ms.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
                .unwrap_or_default()
        })
    }

    fn random_password(&self, len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len)
            .map(|_| char::from(rng.gen_range(b'A'..=b'Z')))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_recorded_in_order() {
        let session = SessionOracleImpl::with_clock(42);
        let character = Character::player(7, "Alice", 100);

        session.refresh(&character, true);
        session.sync_chat_room(&character);

        assert_eq!(session.now_ms(), 42);
        assert_eq!(
            session.drain(),
            vec![
                SessionEvent::Refresh { character: 7, push: true },
                SessionEvent::ChatRoomSync { character: 7 },
            ]
        );
        assert!(session.events().is_empty());
    }

    #[test]
    fn passwords_are_uppercase_letters() {
        let password = SessionOracleImpl::new().random_password(8);
        assert_eq!(password.len(), 8);
        assert!(password.chars().all(|c| c.is_ascii_uppercase()));
    }
}
