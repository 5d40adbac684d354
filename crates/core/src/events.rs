//! Board notifications.
//!
//! Every committed state change is announced as a [`BoardEvent`]. Listeners
//! subscribe either to one [`EventKind`] or to everything, and are called in
//! subscription order. Payloads are owned copies, so a listener can keep
//! them without holding on to the board.
//!
//! Listeners receive `&BoardEvent` while the board is mutably borrowed, so
//! they cannot call back into it.

use std::fmt;

use crate::piece::MovableTetrisPiece;
use crate::snapshot::BoardSnapshot;
use crate::types::PieceShape;

/// Which notification an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NewGame,
    BoardUpdate,
    CurrentPieceUpdate,
    NextPieceUpdate,
    RowFilled,
    GameOver,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::NewGame => "new-game",
            EventKind::BoardUpdate => "board-update",
            EventKind::CurrentPieceUpdate => "current-piece-update",
            EventKind::NextPieceUpdate => "next-piece-update",
            EventKind::RowFilled => "row-filled",
            EventKind::GameOver => "game-over",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A new game started; carries the first piece.
    NewGame(MovableTetrisPiece),
    /// Grid and current piece changed.
    BoardUpdate(BoardSnapshot),
    /// Current piece changed (`None` once it froze with no successor).
    CurrentPieceUpdate(Option<MovableTetrisPiece>),
    /// The previewed next shape was redrawn.
    NextPieceUpdate(PieceShape),
    /// A freeze completed this many rows (1-4).
    RowFilled(u8),
    /// The game ended.
    GameOver(bool),
}

impl BoardEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            BoardEvent::NewGame(_) => EventKind::NewGame,
            BoardEvent::BoardUpdate(_) => EventKind::BoardUpdate,
            BoardEvent::CurrentPieceUpdate(_) => EventKind::CurrentPieceUpdate,
            BoardEvent::NextPieceUpdate(_) => EventKind::NextPieceUpdate,
            BoardEvent::RowFilled(_) => EventKind::RowFilled,
            BoardEvent::GameOver(_) => EventKind::GameOver,
        }
    }
}

/// Anything that can consume board events.
pub trait BoardListener {
    fn on_event(&mut self, event: &BoardEvent);
}

impl<F> BoardListener for F
where
    F: FnMut(&BoardEvent),
{
    fn on_event(&mut self, event: &BoardEvent) {
        self(event)
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    /// `None` listens to every kind.
    kind: Option<EventKind>,
    listener: Box<dyn BoardListener>,
}

/// Subscriber registry and dispatcher.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to one kind of event.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        listener: impl BoardListener + 'static,
    ) -> SubscriptionId {
        self.insert(Some(kind), Box::new(listener))
    }

    /// Listen to every event.
    pub fn subscribe_all(&mut self, listener: impl BoardListener + 'static) -> SubscriptionId {
        self.insert(None, Box::new(listener))
    }

    fn insert(
        &mut self,
        kind: Option<EventKind>,
        listener: Box<dyn BoardListener>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, kind, listener });
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Whether any subscriber would receive an event of this kind.
    ///
    /// Lets the board skip building payloads nobody reads.
    pub fn wants(&self, kind: EventKind) -> bool {
        self.subscribers
            .iter()
            .any(|s| s.kind.map_or(true, |k| k == kind))
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver an event to every interested subscriber, in subscription order.
    pub fn emit(&mut self, event: &BoardEvent) {
        let kind = event.kind();
        for sub in &mut self.subscribers {
            if sub.kind.map_or(true, |k| k == kind) {
                sub.listener.on_event(event);
            }
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
