//! Per-context discovery of optional driver features.
//!
//! A [`Capabilities`] descriptor is computed the first time a context is probed
//! and never again for that [`ContextKey`]; the strategy registry consults it
//! once per operation to pick an implementation.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use indexmap::IndexSet;
use log::debug;
use opengl_bindings::types::GLuint;
use opengl_bindings::{EXTENSIONS, MAJOR_VERSION, MINOR_VERSION, NUM_EXTENSIONS, VERSION};

use crate::context::ContextKey;
use crate::driver::{Driver, EntryPoint};
use crate::error::{Error, Result};

/// A GL version encoded as `major * 100 + minor * 10`, so 4.3 is `GlVersion(430)`.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlVersion(pub i32);

impl GlVersion {
    pub const fn new(major: i32, minor: i32) -> GlVersion {
        GlVersion(major * 100 + minor * 10)
    }

    pub const fn major(self) -> i32 {
        self.0 / 100
    }

    pub const fn minor(self) -> i32 {
        (self.0 % 100) / 10
    }

    pub const fn at_least(self, major: i32, minor: i32) -> bool {
        self.0 >= major * 100 + minor * 10
    }

    /// The `#version` line matching this context.
    pub const fn glsl_header(self) -> &'static str {
        match self {
            GlVersion(110) => "#version 110\n",
            GlVersion(120) => "#version 120\n",
            GlVersion(130) => "#version 130\n",
            GlVersion(140) => "#version 140\n",
            GlVersion(150) => "#version 150\n",
            GlVersion(330) => "#version 330 core\n",
            GlVersion(400) => "#version 400 core\n",
            GlVersion(410) => "#version 410 core\n",
            GlVersion(420) => "#version 420 core\n",
            GlVersion(430..=499) => "#version 430 core\n",
            GlVersion(310..=329) => "#version 140\n",
            _ => "#version 130\n",
        }
    }

    fn query(gl: &dyn Driver) -> Result<GlVersion> {
        let major = gl.get_integer(MAJOR_VERSION);
        let minor = gl.get_integer(MINOR_VERSION);
        if major != 0 {
            return Ok(GlVersion::new(major, minor));
        }

        // GL 2.x has no MAJOR_VERSION; the string starts with "<major>.<minor>"
        let version = gl.get_string(VERSION).ok_or(Error::NoActiveContext)?;
        let mut parts = version
            .split(|c: char| c == '.' || c.is_whitespace())
            .take(2)
            .map(|part| part.parse::<i32>().unwrap_or(0));
        let major = parts.next().unwrap_or(0);
        let minor = parts.next().unwrap_or(0);
        if major == 0 {
            return Err(Error::NoActiveContext);
        }
        Ok(GlVersion::new(major, minor))
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

/// What a context can do, frozen at probe time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub key: ContextKey,
    pub version: GlVersion,
    pub texture_multisample: bool,
    pub texture_storage: bool,
    pub texture_storage_multisample: bool,
    pub buffer_storage: bool,
    pub direct_state_access: bool,
    /// `glNamedBufferStorage`; needs both DSA and buffer storage.
    pub named_buffer_storage: bool,
    pub map_buffer_range: bool,
    pub copy_buffer: bool,
    pub clear_buffer: bool,
    extensions: IndexSet<String>,
}

impl Capabilities {
    /// A descriptor with nothing optional available. Mostly useful for tests and
    /// for building synthetic descriptors field by field.
    pub fn baseline(key: ContextKey, version: GlVersion) -> Capabilities {
        Capabilities {
            key,
            version,
            texture_multisample: false,
            texture_storage: false,
            texture_storage_multisample: false,
            buffer_storage: false,
            direct_state_access: false,
            named_buffer_storage: false,
            map_buffer_range: false,
            copy_buffer: false,
            clear_buffer: false,
            extensions: IndexSet::new(),
        }
    }

    pub fn query(key: ContextKey, gl: &dyn Driver) -> Result<Capabilities> {
        let version = GlVersion::query(gl)?;
        let extensions = query_extensions(gl);

        let has = |major, minor, extension: &str, entry| {
            (version.at_least(major, minor) || extensions.contains(extension))
                && gl.is_loaded(entry)
        };

        let direct_state_access = has(
            4,
            5,
            "GL_ARB_direct_state_access",
            EntryPoint::NamedBufferData,
        ) && gl.is_loaded(EntryPoint::TextureStorage2D)
            && gl.is_loaded(EntryPoint::TextureStorage3D)
            && gl.is_loaded(EntryPoint::TextureStorage2DMultisample);

        let buffer_storage = has(4, 4, "GL_ARB_buffer_storage", EntryPoint::BufferStorage);
        let named_buffer_storage =
            direct_state_access && buffer_storage && gl.is_loaded(EntryPoint::NamedBufferStorage);
        let texture_multisample = has(
            3,
            2,
            "GL_ARB_texture_multisample",
            EntryPoint::TexImage2DMultisample,
        );
        let texture_storage = has(4, 2, "GL_ARB_texture_storage", EntryPoint::TexStorage2D)
            && gl.is_loaded(EntryPoint::TexStorage3D);
        let texture_storage_multisample = has(
            4,
            3,
            "GL_ARB_texture_storage_multisample",
            EntryPoint::TexStorage2DMultisample,
        );
        let map_buffer_range = has(3, 0, "GL_ARB_map_buffer_range", EntryPoint::MapBufferRange);
        let copy_buffer = has(3, 1, "GL_ARB_copy_buffer", EntryPoint::CopyBufferSubData);
        let clear_buffer = has(
            4,
            3,
            "GL_ARB_clear_buffer_object",
            EntryPoint::ClearBufferData,
        );

        let capabilities = Capabilities {
            key,
            version,
            texture_multisample,
            texture_storage,
            texture_storage_multisample,
            buffer_storage,
            direct_state_access,
            named_buffer_storage,
            map_buffer_range,
            copy_buffer,
            clear_buffer,
            extensions,
        };
        Ok(capabilities)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn with_extension(mut self, name: impl Into<String>) -> Capabilities {
        self.extensions.insert(name.into());
        self
    }
}

fn query_extensions(gl: &dyn Driver) -> IndexSet<String> {
    let count = gl.get_integer(NUM_EXTENSIONS);
    let mut extensions = IndexSet::new();

    for i in 0..count.max(0) {
        if let Some(name) = gl.get_string_i(EXTENSIONS, i as GLuint) {
            extensions.insert(name);
        }
    }

    // Pre-3.0 drivers only expose the space separated list
    if extensions.is_empty() {
        if let Some(list) = gl.get_string(EXTENSIONS) {
            extensions.extend(list.split_whitespace().map(str::to_owned));
        }
    }
    extensions
}

/// Caches one [`Capabilities`] per context key.
#[derive(Default)]
pub struct CapabilityProbe {
    cache: DashMap<ContextKey, Arc<Capabilities>>,
}

impl CapabilityProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached descriptor for `key`, querying the driver only the
    /// first time. A failed query is not cached.
    pub fn probe(&self, key: ContextKey, gl: &dyn Driver) -> Result<Arc<Capabilities>> {
        if let Some(cached) = self.cache.get(&key) {
            return Ok(Arc::clone(&cached));
        }

        let capabilities = Arc::new(Capabilities::query(key, gl)?);
        debug!(
            "probed {}: GL {}, multisample storage: {}, texture storage: {}, dsa: {}, buffer storage: {}",
            key,
            capabilities.version,
            capabilities.texture_storage_multisample,
            capabilities.texture_storage,
            capabilities.direct_state_access,
            capabilities.buffer_storage,
        );

        // Another thread may have probed the same key meanwhile; the first result wins.
        let entry = self.cache.entry(key).or_insert(capabilities);
        Ok(Arc::clone(&entry))
    }

    pub fn cached(&self, key: ContextKey) -> Option<Arc<Capabilities>> {
        self.cache.get(&key).map(|entry| Arc::clone(&entry))
    }

    pub fn forget(&self, key: ContextKey) -> bool {
        self.cache.remove(&key).is_some()
    }
}
