use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use opengl_bindings::types::GLuint;
use opengl_bindings::Gl;

use crate::capability::Capabilities;
use crate::config::RegistryConfig;
use crate::driver::Driver;
use crate::error::Result;
use crate::handle::Handle;
use crate::strategy::{Operation, StrategyRegistry};

/// Identifies one live GL context for the capability cache and strategy memo.
///
/// Keys must not be reused for a different context while the old one's
/// entries are still cached; [`ContextKey::unique`] never repeats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ContextKey(u64);

impl ContextKey {
    pub const fn new(raw: u64) -> ContextKey {
        ContextKey(raw)
    }

    pub fn unique() -> ContextKey {
        static NEXT: AtomicU64 = AtomicU64::new(1 << 32);
        ContextKey(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "context #{}", self.0)
    }
}

/// A driver table bound to one GL context, plus the registry that picks
/// strategies for it.
///
/// Only one thread may issue calls for a context at a time, so a `Context` can
/// be moved between threads but not shared.
pub struct Context<D: Driver = Gl> {
    key: ContextKey,
    driver: D,
    registry: Arc<StrategyRegistry>,
    _not_sync: PhantomData<Cell<()>>,
}

static_assertions::assert_not_impl_any!(Context<Gl>: Sync);

impl<D: Driver> Context<D> {
    pub fn new(driver: D, key: ContextKey, registry: Arc<StrategyRegistry>) -> Self {
        Context {
            key,
            driver,
            registry,
            _not_sync: PhantomData,
        }
    }

    /// A context with a fresh key and a private registry holding the built-in
    /// strategies, filtered by [`RegistryConfig::from_env`].
    pub fn with_defaults(driver: D) -> Result<Self> {
        let registry = StrategyRegistry::with_defaults(&RegistryConfig::from_env())?;
        Ok(Context::new(driver, ContextKey::unique(), Arc::new(registry)))
    }

    pub fn key(&self) -> ContextKey {
        self.key
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn registry(&self) -> &Arc<StrategyRegistry> {
        &self.registry
    }

    /// The probed capability descriptor, querying the driver on first use.
    pub fn capabilities(&self) -> Result<Arc<Capabilities>> {
        self.registry.probe().probe(self.key, &self.driver)
    }

    /// Runs `call` with the strategy selected for `O` in this context.
    pub fn dispatch<O, R>(
        &self,
        handle: &Handle,
        call: impl FnOnce(&O::Strategy, &dyn Driver, GLuint) -> Result<R>,
    ) -> Result<R>
    where
        O: Operation,
    {
        let gl: &dyn Driver = &self.driver;
        self.registry
            .dispatch::<O, R, _>(self.key, gl, handle, |strategy, id| call(strategy, gl, id))
    }
}

impl<D: Driver> Drop for Context<D> {
    fn drop(&mut self) {
        debug!("dropping {}", self.key);
        self.registry.forget(self.key);
    }
}
