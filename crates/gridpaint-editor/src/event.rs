//! Buffered editor events for the visuals that depend on placement.
//!
//! Placement never draws anything itself. It records what changed on an
//! [`EventBus`], and the host drains or delivers the events after each input
//! event so that entity sprites, the underlay, the overlay and the linkage
//! lines can refresh. Each event kind has its own [`EventBuffer`] ring buffer
//! with a configurable capacity.
//!
//! # Suppression
//!
//! Event kinds can be suppressed via [`EventBus::suppress`], which prevents
//! any allocation or recording for that kind.

use gridpaint_core::direction::{Direction, DirectionType};
use gridpaint_core::geometry::{GridPosition, PixelPosition};
use gridpaint_core::id::EntityId;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A visual refresh request emitted by the placement preview or the commit
/// protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    // -- Committed entities --
    EntityCreated {
        entity: EntityId,
    },
    EntityChanged {
        entity: EntityId,
    },
    /// The entity is already gone from the blueprint.
    EntityRemoved {
        entity: EntityId,
        name: String,
        position: GridPosition,
    },
    NeighborsRedrawn {
        entities: Vec<EntityId>,
    },
    /// Make a freshly created entity's area visualization visible.
    AreaVisualizationShown {
        entity: EntityId,
    },
    OverlayRefreshed,

    // -- Preview --
    PreviewRedrawn {
        direction: Direction,
        direction_type: DirectionType,
    },
    PreviewAreaCreated {
        name: String,
        position: PixelPosition,
    },
    PreviewAreaMoved {
        position: PixelPosition,
    },
    PreviewAreaDestroyed,
    RelatedAreasActivated {
        name: String,
    },
    RelatedAreasDeactivated,

    // -- Underground linkage lines --
    LinkageLinesUpdated {
        name: String,
        position: GridPosition,
        /// Direction in which the overlay looks for the partner.
        search_direction: Direction,
        /// Direction the drawn line points.
        line_direction: Direction,
    },
    LinkageLinesMoved {
        position: PixelPosition,
    },
    LinkageLinesHidden,
}

/// Which [`EditorEvent`] variant an event is. Buffers, listeners and
/// suppression are all keyed by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorEventKind {
    EntityCreated,
    EntityChanged,
    EntityRemoved,
    NeighborsRedrawn,
    AreaVisualizationShown,
    OverlayRefreshed,
    PreviewRedrawn,
    PreviewAreaCreated,
    PreviewAreaMoved,
    PreviewAreaDestroyed,
    RelatedAreasActivated,
    RelatedAreasDeactivated,
    LinkageLinesUpdated,
    LinkageLinesMoved,
    LinkageLinesHidden,
}

const EVENT_KIND_COUNT: usize = 15;

impl EditorEvent {
    pub fn kind(&self) -> EditorEventKind {
        match self {
            EditorEvent::EntityCreated { .. } => EditorEventKind::EntityCreated,
            EditorEvent::EntityChanged { .. } => EditorEventKind::EntityChanged,
            EditorEvent::EntityRemoved { .. } => EditorEventKind::EntityRemoved,
            EditorEvent::NeighborsRedrawn { .. } => EditorEventKind::NeighborsRedrawn,
            EditorEvent::AreaVisualizationShown { .. } => EditorEventKind::AreaVisualizationShown,
            EditorEvent::OverlayRefreshed => EditorEventKind::OverlayRefreshed,
            EditorEvent::PreviewRedrawn { .. } => EditorEventKind::PreviewRedrawn,
            EditorEvent::PreviewAreaCreated { .. } => EditorEventKind::PreviewAreaCreated,
            EditorEvent::PreviewAreaMoved { .. } => EditorEventKind::PreviewAreaMoved,
            EditorEvent::PreviewAreaDestroyed => EditorEventKind::PreviewAreaDestroyed,
            EditorEvent::RelatedAreasActivated { .. } => EditorEventKind::RelatedAreasActivated,
            EditorEvent::RelatedAreasDeactivated => EditorEventKind::RelatedAreasDeactivated,
            EditorEvent::LinkageLinesUpdated { .. } => EditorEventKind::LinkageLinesUpdated,
            EditorEvent::LinkageLinesMoved { .. } => EditorEventKind::LinkageLinesMoved,
            EditorEvent::LinkageLinesHidden => EditorEventKind::LinkageLinesHidden,
        }
    }
}

impl EditorEventKind {
    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// EventBuffer
// ---------------------------------------------------------------------------

/// An event tagged with its emission order across all kinds.
#[derive(Debug, Clone)]
struct Sequenced {
    seq: u64,
    event: EditorEvent,
}

/// Bounded history of one event kind. Writing to a full buffer overwrites
/// its oldest entry.
#[derive(Debug)]
pub struct EventBuffer {
    slots: Vec<Option<Sequenced>>,
    head: usize,
    len: usize,
    /// Writes since creation, overwritten ones included.
    total_written: u64,
}

impl EventBuffer {
    /// `capacity` is at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
            total_written: 0,
        }
    }

    fn push(&mut self, seq: u64, event: EditorEvent) {
        self.slots[self.head] = Some(Sequenced { seq, event });
        self.head = (self.head + 1) % self.capacity();
        if self.len < self.capacity() {
            self.len += 1;
        }
        self.total_written += 1;
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Events overwritten before anyone read them.
    pub fn dropped_count(&self) -> u64 {
        self.total_written.saturating_sub(self.capacity() as u64)
    }

    fn sequenced(&self) -> impl Iterator<Item = &Sequenced> {
        // Once wrapped, the slot at `head` is the oldest.
        let start = if self.len < self.capacity() { 0 } else { self.head };
        (0..self.len).filter_map(move |i| self.slots[(start + i) % self.capacity()].as_ref())
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EditorEvent> {
        self.sequenced().map(|s| &s.event)
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Observer for one event kind.
pub type PassiveListener = Box<dyn FnMut(&EditorEvent)>;

/// Holds one ring buffer per event kind, passive listeners, and suppression
/// flags.
pub struct EventBus {
    buffers: [Option<EventBuffer>; EVENT_KIND_COUNT],
    suppressed: [bool; EVENT_KIND_COUNT],
    listeners: [Vec<PassiveListener>; EVENT_KIND_COUNT],
    default_capacity: usize,
    next_seq: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("buffers", &self.buffers)
            .field("suppressed", &self.suppressed)
            .field("default_capacity", &self.default_capacity)
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Buffers are allocated on first emit, each holding `default_capacity`
    /// events.
    pub fn new(default_capacity: usize) -> Self {
        Self {
            buffers: Default::default(),
            suppressed: [false; EVENT_KIND_COUNT],
            listeners: std::array::from_fn(|_| Vec::new()),
            default_capacity,
            next_seq: 0,
        }
    }

    /// Drop every future event of `kind` at emit time.
    pub fn suppress(&mut self, kind: EditorEventKind) {
        self.suppressed[kind.index()] = true;
        self.buffers[kind.index()] = None;
    }

    pub fn is_suppressed(&self, kind: EditorEventKind) -> bool {
        self.suppressed[kind.index()]
    }

    pub fn emit(&mut self, event: EditorEvent) {
        let idx = event.kind().index();
        if self.suppressed[idx] {
            return;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let capacity = self.default_capacity;
        self.buffers[idx]
            .get_or_insert_with(|| EventBuffer::new(capacity))
            .push(seq, event);
    }

    /// Listeners of one kind run in registration order.
    pub fn on_passive(&mut self, kind: EditorEventKind, listener: PassiveListener) {
        self.listeners[kind.index()].push(listener);
    }

    /// Deliver all buffered events to their kind's listeners, oldest first,
    /// then clear the buffers.
    pub fn deliver(&mut self) {
        for idx in 0..EVENT_KIND_COUNT {
            let Some(buffer) = self.buffers[idx].as_mut() else {
                continue;
            };
            if buffer.is_empty() {
                continue;
            }

            let events: Vec<EditorEvent> = buffer.iter().cloned().collect();
            buffer.clear();
            for listener in &mut self.listeners[idx] {
                for event in &events {
                    listener(event);
                }
            }
        }
    }

    /// Buffered events of every kind in emission order, without clearing.
    pub fn pending(&self) -> Vec<&EditorEvent> {
        let mut all: Vec<&Sequenced> = self
            .buffers
            .iter()
            .flatten()
            .flat_map(|b| b.sequenced())
            .collect();
        all.sort_by_key(|s| s.seq);
        all.into_iter().map(|s| &s.event).collect()
    }

    /// Take every buffered event in emission order, leaving the buffers empty.
    /// Listeners are not invoked.
    pub fn drain(&mut self) -> Vec<EditorEvent> {
        let events: Vec<EditorEvent> = self.pending().into_iter().cloned().collect();
        self.clear_all();
        events
    }

    pub fn buffer(&self, kind: EditorEventKind) -> Option<&EventBuffer> {
        self.buffers[kind.index()].as_ref()
    }

    /// Count of events currently buffered for a kind.
    pub fn buffered_count(&self, kind: EditorEventKind) -> usize {
        self.buffers[kind.index()].as_ref().map_or(0, |b| b.len())
    }

    /// Emitted events of `kind`, overwritten ones included.
    pub fn total_emitted(&self, kind: EditorEventKind) -> u64 {
        self.buffers[kind.index()]
            .as_ref()
            .map_or(0, |b| b.total_written())
    }

    /// Empty every buffer. Listeners and suppression stay.
    pub fn clear_all(&mut self) {
        for buffer in self.buffers.iter_mut().flatten() {
            buffer.clear();
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
