//! Capability-dependent operations and the registry that picks their implementation.
//!
//! Each capability-sensitive operation (allocating multisample storage, mapping a
//! buffer, ...) is described by a marker type implementing [`Operation`]. For each
//! operation the [`StrategyRegistry`] holds a priority-ordered list of
//! interchangeable implementations, each guarded by a predicate over the probed
//! [`Capabilities`]. The first time an operation is dispatched against a context,
//! the highest-priority entry whose predicate holds is selected and memoized;
//! every later dispatch for that context reuses it, even if the descriptor it was
//! chosen from would now say otherwise.

mod buffer;
mod multisample;
mod texture_storage;

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, warn};
use opengl_bindings::types::GLuint;
use parking_lot::RwLock;

use crate::capability::{Capabilities, CapabilityProbe};
use crate::config::RegistryConfig;
use crate::context::ContextKey;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::handle::Handle;

pub use buffer::{
    BufferAccess, BufferAccessStrategy, BufferClear, BufferClearStrategy, BufferStorage,
    BufferStorageStrategy, LegacyBufferAccess, NamedBufferAccess, NamedBufferClear,
    NamedBufferStorage, TargetBufferClear, TargetBufferStorage,
};
pub use multisample::{
    Multisample, MultisampleStorage, MultisampleStorageStrategy, TexImageMultisample, TexStorageMultisample,
    TextureStorageMultisampleDsa,
};
pub use texture_storage::{
    TexImageLevels, TexStorage, TextureStorage, TextureStorageDsa, TextureStorageStrategy,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OperationKind {
    MultisampleStorage,
    TextureStorage,
    BufferAccess,
    BufferStorage,
    BufferClear,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::MultisampleStorage => "multisample storage",
            OperationKind::TextureStorage => "texture storage",
            OperationKind::BufferAccess => "buffer access",
            OperationKind::BufferStorage => "buffer storage",
            OperationKind::BufferClear => "buffer clear",
        })
    }
}

mod private {
    pub trait Sealed {}
}

/// Ties an [`OperationKind`] to the trait its strategies implement.
///
/// The set of operations is closed; the trait is sealed.
pub trait Operation: private::Sealed + Sized + 'static {
    const KIND: OperationKind;
    type Strategy: ?Sized + Send + Sync + 'static;

    #[doc(hidden)]
    fn table(registry: &StrategyRegistry) -> &StrategyTable<Self>;
}

pub type Predicate = Arc<dyn Fn(&Capabilities) -> bool + Send + Sync>;

struct StrategyEntry<O: Operation> {
    name: &'static str,
    priority: i32,
    predicate: Predicate,
    implementation: Arc<O::Strategy>,
}

enum Selection<O: Operation> {
    Resolved {
        name: &'static str,
        strategy: Arc<O::Strategy>,
    },
    Unsupported,
}

/// Where an `(operation, context)` pair stands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Unresolved,
    Resolved(&'static str),
    Unsupported,
}

/// Entries for one operation, sorted by descending priority, and the strategy
/// memoized for each context.
pub struct StrategyTable<O: Operation> {
    entries: RwLock<Vec<StrategyEntry<O>>>,
    selections: DashMap<ContextKey, Selection<O>>,
}

impl<O: Operation> Default for StrategyTable<O> {
    fn default() -> Self {
        StrategyTable {
            entries: RwLock::new(Vec::new()),
            selections: DashMap::new(),
        }
    }
}

impl<O: Operation> StrategyTable<O> {
    fn names(&self) -> Vec<(&'static str, i32)> {
        self.entries
            .read()
            .iter()
            .map(|entry| (entry.name, entry.priority))
            .collect()
    }

    fn state(&self, key: ContextKey) -> SelectionState {
        match self.selections.get(&key).as_deref() {
            None => SelectionState::Unresolved,
            Some(Selection::Resolved { name, .. }) => SelectionState::Resolved(*name),
            Some(Selection::Unsupported) => SelectionState::Unsupported,
        }
    }

    fn select(&self, capabilities: &Capabilities) -> Selection<O> {
        // Snapshot first; predicates run unlocked and may register more entries
        let candidates: Vec<_> = self
            .entries
            .read()
            .iter()
            .map(|entry| {
                (
                    entry.name,
                    Arc::clone(&entry.predicate),
                    Arc::clone(&entry.implementation),
                )
            })
            .collect();

        match candidates
            .into_iter()
            .find(|(_, predicate, _)| predicate(capabilities))
        {
            Some((name, _, strategy)) => Selection::Resolved { name, strategy },
            None => Selection::Unsupported,
        }
    }
}

fn unpack<O: Operation>(selection: &Selection<O>, key: ContextKey) -> Result<Arc<O::Strategy>> {
    match selection {
        Selection::Resolved { strategy, .. } => Ok(Arc::clone(strategy)),
        Selection::Unsupported => Err(Error::UnsupportedOperation {
            operation: O::KIND,
            context: key,
        }),
    }
}

/// Strategy tables for every operation plus the capability probe they select from.
///
/// Shared between contexts (typically behind an `Arc`); the tables and memo are
/// the only state guarded here, native calls are never made under a lock.
#[derive(Default)]
pub struct StrategyRegistry {
    probe: CapabilityProbe,
    multisample_storage: StrategyTable<MultisampleStorage>,
    texture_storage: StrategyTable<TextureStorage>,
    buffer_access: StrategyTable<BufferAccess>,
    buffer_storage: StrategyTable<BufferStorage>,
    buffer_clear: StrategyTable<BufferClear>,
}

static_assertions::assert_impl_all!(StrategyRegistry: Send, Sync);

impl StrategyRegistry {
    /// An empty registry; every dispatch fails until strategies are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in strategies that `config` leaves enabled.
    pub fn with_defaults(config: &RegistryConfig) -> Result<Self> {
        let registry = StrategyRegistry::new();
        multisample::register_defaults(&registry, config)?;
        texture_storage::register_defaults(&registry, config)?;
        buffer::register_defaults(&registry, config)?;
        Ok(registry)
    }

    pub fn probe(&self) -> &CapabilityProbe {
        &self.probe
    }

    /// Adds a strategy for `O`.
    ///
    /// Only `priority` orders entries; two entries with the same priority for
    /// the same operation are rejected with [`Error::AmbiguousStrategy`].
    /// `predicate` is evaluated without any registry lock held, so it may call
    /// back into the registry.
    pub fn register<O, P>(
        &self,
        name: &'static str,
        priority: i32,
        predicate: P,
        implementation: Arc<O::Strategy>,
    ) -> Result<()>
    where
        O: Operation,
        P: Fn(&Capabilities) -> bool + Send + Sync + 'static,
    {
        let mut entries = O::table(self).entries.write();

        if let Some(existing) = entries.iter().find(|entry| entry.priority == priority) {
            return Err(Error::AmbiguousStrategy {
                operation: O::KIND,
                priority,
                existing: existing.name,
                rejected: name,
            });
        }

        let position = entries
            .iter()
            .position(|entry| entry.priority < priority)
            .unwrap_or(entries.len());
        entries.insert(
            position,
            StrategyEntry {
                name,
                priority,
                predicate: Arc::new(predicate),
                implementation,
            },
        );
        debug!("registered {} strategy {} at priority {}", O::KIND, name, priority);
        Ok(())
    }

    /// Names of the strategies registered for `kind`, highest priority first.
    pub fn strategies(&self, kind: OperationKind) -> Vec<(&'static str, i32)> {
        match kind {
            OperationKind::MultisampleStorage => self.multisample_storage.names(),
            OperationKind::TextureStorage => self.texture_storage.names(),
            OperationKind::BufferAccess => self.buffer_access.names(),
            OperationKind::BufferStorage => self.buffer_storage.names(),
            OperationKind::BufferClear => self.buffer_clear.names(),
        }
    }

    pub fn state(&self, kind: OperationKind, key: ContextKey) -> SelectionState {
        match kind {
            OperationKind::MultisampleStorage => self.multisample_storage.state(key),
            OperationKind::TextureStorage => self.texture_storage.state(key),
            OperationKind::BufferAccess => self.buffer_access.state(key),
            OperationKind::BufferStorage => self.buffer_storage.state(key),
            OperationKind::BufferClear => self.buffer_clear.state(key),
        }
    }

    /// Returns the strategy selected for `O` in context `key`, selecting and
    /// memoizing it on first use.
    pub fn resolve<O: Operation>(&self, key: ContextKey, gl: &dyn Driver) -> Result<Arc<O::Strategy>> {
        let table = O::table(self);
        if let Some(selection) = table.selections.get(&key) {
            return unpack::<O>(selection.value(), key);
        }

        let capabilities = self.probe.probe(key, gl)?;
        let selection = table.select(&capabilities);
        match &selection {
            Selection::Resolved { name, .. } => {
                debug!("selected {} strategy {} for {}", O::KIND, name, key)
            }
            Selection::Unsupported => {
                warn!("no {} strategy is supported by {}", O::KIND, key)
            }
        }

        // A concurrent first dispatch may have won the race; keep its choice.
        let selection = table.selections.entry(key).or_insert(selection);
        unpack::<O>(selection.value(), key)
    }

    /// Validates `handle`, resolves the strategy for `O` and hands both to `call`.
    /// The result of `call` is returned unchanged.
    pub fn dispatch<O, R, F>(
        &self,
        key: ContextKey,
        gl: &dyn Driver,
        handle: &Handle,
        call: F,
    ) -> Result<R>
    where
        O: Operation,
        F: FnOnce(&O::Strategy, GLuint) -> Result<R>,
    {
        let id = handle.id()?;
        let strategy = self.resolve::<O>(key, gl)?;
        call(&strategy, id)
    }

    /// Drops everything cached for `key`: the capability descriptor and every
    /// memoized selection.
    pub fn forget(&self, key: ContextKey) {
        self.probe.forget(key);
        self.multisample_storage.selections.remove(&key);
        self.texture_storage.selections.remove(&key);
        self.buffer_access.selections.remove(&key);
        self.buffer_storage.selections.remove(&key);
        self.buffer_clear.selections.remove(&key);
    }
}
