//! Per-viewer emulated bar sessions.
//!
//! The registry is the only owner of session state. Every externally visible
//! effect of a change goes out as a packet through the transport.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use bossbar_domain::{BarTitle, EntityHandle, Location, RelocationSnapshot, ViewerId};
use bossbar_protocol::{EntityPacket, OutboundPacket, WireDialect};

use crate::entities::FakeEntity;
use crate::infrastructure::ports::{PacketTransport, PendingTask, ProtocolVersionPort};

/// First client-side entity id handed out. Kept far above the ids a server
/// assigns to real entities.
const FIRST_ENTITY_ID: i32 = 0x7F00_0000;

/// Hands out entity handles in increasing order.
#[derive(Debug)]
pub struct EntityHandleAllocator {
    next: AtomicI32,
}

impl EntityHandleAllocator {
    pub fn new() -> Self {
        Self::starting_at(FIRST_ENTITY_ID)
    }

    pub fn starting_at(first: i32) -> Self {
        Self {
            next: AtomicI32::new(first),
        }
    }

    pub fn allocate(&self) -> EntityHandle {
        EntityHandle::new(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for EntityHandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// One viewer's emulated bar.
#[derive(Debug)]
pub struct EmulatedBarSession {
    pub viewer: ViewerId,
    pub entity: EntityHandle,
    /// Wire layout of the viewer when the entity was spawned.
    pub dialect: WireDialect,
    /// Health drained per second for a countdown bar.
    pub countdown: Option<f32>,
    title: BarTitle,
    health: f32,
    /// Countdown tick.
    pending: Option<PendingTask>,
    relocation: Option<PendingRelocation>,
}

/// Scheduled re-spawn together with the state it will restore.
#[derive(Debug)]
struct PendingRelocation {
    snapshot: RelocationSnapshot,
    _task: PendingTask,
}

impl EmulatedBarSession {
    pub fn title(&self) -> &BarTitle {
        &self.title
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    /// A pending re-spawn restores the new title too.
    pub fn set_title(&mut self, title: BarTitle) {
        if let Some(relocation) = &mut self.relocation {
            relocation.snapshot.title = title.clone();
        }
        self.title = title;
    }

    /// A pending re-spawn restores the new health too.
    pub fn set_health(&mut self, health: f32) {
        if let Some(relocation) = &mut self.relocation {
            relocation.snapshot.health = health;
        }
        self.health = health;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the countdown task; the previous one is cancelled.
    pub fn set_pending(&mut self, task: Option<PendingTask>) {
        self.pending = task;
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            viewer: self.viewer,
            entity: self.entity,
            title: self.title.clone(),
            health: self.health,
            dialect: self.dialect,
            countdown: self.countdown,
            has_pending: self.has_pending(),
            relocating: self.relocation.is_some(),
        }
    }
}

/// Read-only copy of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub viewer: ViewerId,
    pub entity: EntityHandle,
    pub title: BarTitle,
    pub health: f32,
    pub dialect: WireDialect,
    pub countdown: Option<f32>,
    /// A countdown tick is scheduled.
    pub has_pending: bool,
    /// A re-spawn after relocation is scheduled.
    pub relocating: bool,
}

/// Map from viewer to its emulated bar.
pub struct SessionRegistry {
    sessions: DashMap<ViewerId, EmulatedBarSession>,
    entity_ids: EntityHandleAllocator,
    builder: FakeEntity,
    transport: Arc<dyn PacketTransport>,
    versions: Arc<dyn ProtocolVersionPort>,
}

impl SessionRegistry {
    pub fn new(
        builder: FakeEntity,
        transport: Arc<dyn PacketTransport>,
        versions: Arc<dyn ProtocolVersionPort>,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            entity_ids: EntityHandleAllocator::new(),
            builder,
            transport,
            versions,
        }
    }

    pub fn builder(&self) -> &FakeEntity {
        &self.builder
    }

    pub fn contains(&self, viewer: ViewerId) -> bool {
        self.sessions.contains_key(&viewer)
    }

    pub fn get(&self, viewer: ViewerId) -> Option<SessionView> {
        self.sessions.get(&viewer).map(|session| session.view())
    }

    /// Existing session for `viewer`, or a new one spawned at `spawn_at`.
    ///
    /// `title` and `health` only apply to a new session.
    pub fn get_or_create(
        &self,
        viewer: ViewerId,
        title: BarTitle,
        health: f32,
        spawn_at: Location,
    ) -> SessionView {
        let (view, spawn) = match self.sessions.entry(viewer) {
            Entry::Occupied(entry) => (entry.get().view(), None),
            Entry::Vacant(entry) => {
                let dialect = WireDialect::for_version(self.versions.protocol_version(viewer));
                let entity = self.entity_ids.allocate();
                let health = self.builder.clamp_health(health);
                let packet = self
                    .builder
                    .spawn(dialect, entity, spawn_at, &title, health);
                let session = EmulatedBarSession {
                    viewer,
                    entity,
                    title,
                    health,
                    dialect,
                    countdown: None,
                    pending: None,
                    relocation: None,
                };
                let view = session.view();
                entry.insert(session);
                (view, Some(OutboundPacket::new(dialect, packet)))
            }
        };

        if let Some(packet) = spawn {
            tracing::debug!(viewer = %viewer, entity = %view.entity, "Emulated bar spawned");
            self.transport.send(viewer, packet);
        }
        view
    }

    /// Mutate an existing session in place.
    pub fn update<R>(
        &self,
        viewer: ViewerId,
        f: impl FnOnce(&mut EmulatedBarSession) -> R,
    ) -> Option<R> {
        self.sessions.get_mut(&viewer).map(|mut session| f(&mut session))
    }

    /// Record a scheduled re-spawn, replacing any earlier one. Returns false
    /// when the viewer has no session.
    pub fn set_relocation(
        &self,
        viewer: ViewerId,
        snapshot: RelocationSnapshot,
        task: PendingTask,
    ) -> bool {
        self.update(viewer, |session| {
            session.relocation = Some(PendingRelocation {
                snapshot,
                _task: task,
            });
        })
        .is_some()
    }

    /// Latest state a pending re-spawn should restore, clearing it.
    pub fn take_relocation(&self, viewer: ViewerId) -> Option<RelocationSnapshot> {
        self.update(viewer, |session| session.relocation.take())
            .flatten()
            .map(|relocation| relocation.snapshot)
    }

    /// Destroy the viewer's entity and spawn a fresh one at `spawn_at` with
    /// `title` and `health`. The session and its countdown are kept.
    /// Returns false when the viewer has no session.
    pub fn respawn(
        &self,
        viewer: ViewerId,
        title: BarTitle,
        health: f32,
        spawn_at: Location,
    ) -> bool {
        let packets = self.sessions.get_mut(&viewer).map(|mut session| {
            let despawn = self.builder.despawn(session.entity);
            session.entity = self.entity_ids.allocate();
            session.title = title;
            session.health = self.builder.clamp_health(health);
            session.relocation = None;
            let spawn = self.builder.spawn(
                session.dialect,
                session.entity,
                spawn_at,
                &session.title,
                session.health,
            );
            (
                OutboundPacket::new(session.dialect, despawn),
                OutboundPacket::new(session.dialect, spawn),
                session.entity,
            )
        });

        let Some((despawn, spawn, entity)) = packets else {
            return false;
        };
        self.transport.send(viewer, despawn);
        self.transport.send(viewer, spawn);
        tracing::debug!(viewer = %viewer, entity = %entity, "Emulated bar re-spawned");
        true
    }

    /// Returns false when the viewer has no session.
    pub fn set_pending(&self, viewer: ViewerId, task: Option<PendingTask>) -> bool {
        self.update(viewer, |session| session.set_pending(task))
            .is_some()
    }

    /// Despawn and discard the viewer's session. Any pending action is
    /// cancelled.
    pub fn remove(&self, viewer: ViewerId) -> bool {
        let Some((_, session)) = self.sessions.remove(&viewer) else {
            return false;
        };

        let packet = self.builder.despawn(session.entity);
        self.transport
            .send(viewer, OutboundPacket::new(session.dialect, packet));
        tracing::debug!(viewer = %viewer, entity = %session.entity, "Emulated bar removed");
        true
    }

    pub fn viewers(&self) -> Vec<ViewerId> {
        let mut viewers: Vec<ViewerId> = self.sessions.iter().map(|s| *s.key()).collect();
        viewers.sort();
        viewers
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Send a packet in the session's wire layout. Returns false when the
    /// viewer has no session.
    pub fn send(&self, viewer: ViewerId, packet: EntityPacket) -> bool {
        let Some(dialect) = self.sessions.get(&viewer).map(|s| s.dialect) else {
            return false;
        };
        self.transport.send(viewer, OutboundPacket::new(dialect, packet));
        true
    }

    /// Send the current title and health.
    pub fn send_status(&self, viewer: ViewerId) -> bool {
        let Some(packet) = self.sessions.get(&viewer).map(|s| {
            OutboundPacket::new(
                s.dialect,
                self.builder.status(s.dialect, s.entity, &s.title, s.health),
            )
        }) else {
            return false;
        };
        self.transport.send(viewer, packet);
        true
    }

    pub fn send_teleport(&self, viewer: ViewerId, position: Location) -> bool {
        let Some(packet) = self.sessions.get(&viewer).map(|s| {
            OutboundPacket::new(s.dialect, self.builder.teleport(s.entity, position))
        }) else {
            return false;
        };
        self.transport.send(viewer, packet);
        true
    }

    /// Remove every session, despawning each entity. Returns how many were
    /// removed.
    pub fn clear(&self) -> usize {
        self.viewers()
            .into_iter()
            .filter(|viewer| self.remove(*viewer))
            .count()
    }
}
