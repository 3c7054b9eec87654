//! Event bus for garden notifications.
//!
//! The simulation publishes what happened during each tick; renderers, sound
//! and the headless runner drain the bus at their own pace.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use garden_common::{GridCoord, PestId};

use crate::gardener::TimeDirection;

/// Event types that can be sent through the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GardenEvent {
    /// A seed was sown
    Planted {
        /// Cell
        coord: GridCoord,
    },
    /// A mature plant was collected
    Harvested {
        /// Cell
        coord: GridCoord,
        /// Score after the harvest
        score: u64,
    },
    /// The gardener pulled a weed
    WeedRemoved {
        /// Cell
        coord: GridCoord,
    },
    /// A weed appeared on a planted cell
    WeedSprouted {
        /// Cell
        coord: GridCoord,
    },
    /// A plant reached maturity by natural growth
    PlantMatured {
        /// Cell
        coord: GridCoord,
    },
    /// A mature plant withered
    PlantWithered {
        /// Cell
        coord: GridCoord,
    },
    /// The time ability fired
    TimeShifted {
        /// Accelerate or reverse
        direction: TimeDirection,
        /// Center cell of the affected block
        center: GridCoord,
        /// Energy left afterwards
        energy: f32,
    },
    /// A pest appeared
    PestSpawned {
        /// Pest ID
        pest: PestId,
        /// Cell
        coord: GridCoord,
    },
    /// A pest destroyed a plant
    PestAtePlant {
        /// Pest ID
        pest: PestId,
        /// Cell
        coord: GridCoord,
    },
    /// A pest's lifespan ran out
    PestExpired {
        /// Pest ID
        pest: PestId,
    },
}

/// Smallest capacity a bus is created with.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Event bus for broadcasting events to subscribers.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<GardenEvent>,
    /// Receiver for collecting events
    receiver: Receiver<GardenEvent>,
    /// Channel capacity
    capacity: usize,
    /// Events lost because the bus was full
    dropped: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
            dropped: 0,
        }
    }

    /// Creates a bus sized for a grid.
    ///
    /// A single tick can publish up to two events per cell, so the bus holds at
    /// least one full tick's worth.
    #[must_use]
    pub fn for_grid(width: u32, height: u32) -> Self {
        let cells = width as usize * height as usize;
        Self::new(cells.saturating_mul(2).max(DEFAULT_EVENT_CAPACITY))
    }

    /// Publishes an event to the bus.
    ///
    /// Never blocks. When the bus is full the event is dropped and counted.
    pub fn publish(&mut self, event: GardenEvent) {
        if let Err(TrySendError::Full(event) | TrySendError::Disconnected(event)) =
            self.sender.try_send(event)
        {
            self.dropped += 1;
            warn!(
                "Event bus full ({} pending), dropped {event:?}",
                self.capacity
            );
        }
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<GardenEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of events dropped since the bus was created.
    #[must_use]
    pub const fn dropped_count(&self) -> u64 {
        self.dropped
    }
}
