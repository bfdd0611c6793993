use time::OffsetDateTime;
use tokio::sync::watch;

use enocean_api::StateUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwitchState {
    pub is_on: bool,
    /// Time of the last decoded telegram, `None` until the first one arrives
    pub updated_at: Option<OffsetDateTime>,
}

/// Last-write-wins switch state.
///
/// Only the decode path writes; everything else reads or subscribes.
#[derive(Debug)]
pub struct StateCell {
    tx: watch::Sender<SwitchState>,
}

impl StateCell {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SwitchState::default());
        Self { tx }
    }

    pub fn get(&self) -> SwitchState {
        *self.tx.borrow()
    }

    pub fn is_on(&self) -> bool {
        self.tx.borrow().is_on
    }

    pub fn subscribe(&self) -> watch::Receiver<SwitchState> {
        self.tx.subscribe()
    }

    /// Stores a decoded update; subscribers are notified on every update,
    /// even when the value did not change.
    pub(crate) fn apply(&self, update: StateUpdate) {
        self.tx.send_replace(SwitchState {
            is_on: update.is_on,
            updated_at: Some(OffsetDateTime::now_utc()),
        });
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use enocean_api::Channel;

    use super::*;

    fn update(is_on: bool) -> StateUpdate {
        StateUpdate {
            channel: Channel::ALL,
            is_on,
        }
    }

    #[test]
    fn test_initial_state() {
        let cell = StateCell::new();
        assert!(!cell.is_on());
        assert_eq!(cell.get().updated_at, None);
    }

    #[test]
    fn test_last_write_wins() {
        let cell = StateCell::new();

        cell.apply(update(true));
        cell.apply(update(false));
        cell.apply(update(true));

        assert!(cell.is_on());
        assert!(cell.get().updated_at.is_some());
    }

    #[tokio::test]
    async fn test_subscribers_see_refresh() {
        let cell = StateCell::new();
        let mut rx = cell.subscribe();

        cell.apply(update(false));
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_on);

        cell.apply(update(true));
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_on);
    }
}
