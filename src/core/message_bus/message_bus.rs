//=========================================================================
// Message Bus
//=========================================================================
//
// Per-tick typed message queues between the game and its collaborators.
//
// Architecture:
//   Game → push(AudioCue)     ┐
//   Game → push(ShareRequest) ┴→ HashMap<TypeId, Vec<M>>
//                                   ↓
//   AudioSystem / ShareSystem ← drain<M>() (single consumer)
//                                   ↓
//   GlobalSystems ────────────→ clear_all() at tick boundary
//
// Ordering: messages of one type are delivered in push order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Public API ==========================================================

/// Marker trait for types that can be sent through the MessageBus.
///
/// Automatically implemented for all types that are Send + 'static.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=========================================================================

/// Typed message queues, one `Vec` per message type.
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    /// Creates a new empty message bus.
    pub fn new() -> Self {
        MessageBus {
            queues: HashMap::new(),
        }
    }

    //--- Message Operations -----------------------------------------------

    /// Appends a message to the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        self.queue_mut::<M>().push(msg);
    }

    /// Removes and returns all queued messages of type `M`, in push order.
    ///
    /// Leaves an empty queue with its capacity intact.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        match self
            .queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
        {
            Some(queue) => queue.drain(..).collect(),
            None => Vec::new(),
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns true if there are any messages of type M queued.
    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    /// Returns the number of messages of type M currently queued.
    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map(|v| v.len()).unwrap_or(0)
    }

    /// Clears all messages of type M, preserving allocated capacity.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, preserving entries and capacity.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    /// Total number of queued messages across all types.
    pub fn total_pending(&self) -> usize {
        self.queues.values().map(|q| q.len()).sum()
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }

    fn queue_mut<M: Message>(&mut self) -> &mut Vec<M> {
        let boxed = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        // Entries are keyed by TypeId::of::<M>() and only ever hold Vec<M>.
        match boxed.as_any_mut().downcast_mut::<Vec<M>>() {
            Some(queue) => queue,
            None => unreachable!("MessageBus queue keyed by a foreign TypeId"),
        }
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
