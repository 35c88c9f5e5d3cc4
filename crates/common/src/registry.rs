//! Component registry and enumeration
//!
//! Components are registered explicitly with their factory and metadata
//! instead of being discovered through runtime type introspection. The
//! "specializes" relation between entries forms a DAG rooted at
//! [`crate::COMPONENT_ROOT`]; enumeration walks that graph depth-first.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::{Error, Result};
use crate::exclude::ExclusionPolicy;
use crate::page::PageNode;
use crate::params::Params;

/// Builds one component instance from its construction parameters
pub type Factory = fn(&Params) -> Result<PageNode>;

/// Registry entry for a single component
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    /// Unique qualified name, e.g. `form.checkbox`
    pub qualified: &'static str,
    /// Display name, e.g. `checkbox`
    pub name: &'static str,
    /// Containing module, e.g. `form`
    pub module: &'static str,
    /// Qualified names of the entries this one specializes
    pub bases: &'static [&'static str],
    /// Missing on abstract bases; they participate in traversal only
    pub factory: Option<Factory>,
}

impl ComponentSpec {
    pub fn concrete(
        qualified: &'static str,
        name: &'static str,
        module: &'static str,
        bases: &'static [&'static str],
        factory: Factory,
    ) -> Self {
        Self {
            qualified,
            name,
            module,
            bases,
            factory: Some(factory),
        }
    }

    pub fn abstract_base(
        qualified: &'static str,
        name: &'static str,
        module: &'static str,
        bases: &'static [&'static str],
    ) -> Self {
        Self {
            qualified,
            name,
            module,
            bases,
            factory: None,
        }
    }

    pub fn is_concrete(&self) -> bool {
        self.factory.is_some()
    }
}

/// Component registry
///
/// Children are kept in registration order, so enumeration is
/// deterministic for a given registration sequence.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<&'static str, ComponentSpec>,
    children: HashMap<&'static str, Vec<&'static str>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: ComponentSpec) -> Result<()> {
        if self.entries.contains_key(spec.qualified) {
            return Err(Error::AlreadyRegistered(spec.qualified.to_string()));
        }
        for base in spec.bases {
            self.children.entry(*base).or_default().push(spec.qualified);
        }
        self.entries.insert(spec.qualified, spec);
        Ok(())
    }

    pub fn get(&self, qualified: &str) -> Option<&ComponentSpec> {
        self.entries.get(qualified)
    }

    pub fn contains(&self, qualified: &str) -> bool {
        self.entries.contains_key(qualified)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enumerate concrete components reachable from `root`, depth-first.
    ///
    /// Exclusion filters output membership only: an excluded entry's
    /// children are still visited. A node reachable through several base
    /// paths is emitted at most once, at its first visit.
    pub fn enumerate(&self, root: &str, policy: &ExclusionPolicy) -> Result<Vec<&ComponentSpec>> {
        if !self.entries.contains_key(root) {
            return Err(Error::UnknownRoot(root.to_string()));
        }
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.walk(root, policy, &mut seen, &mut out);
        Ok(out)
    }

    fn walk<'a>(
        &'a self,
        base: &str,
        policy: &ExclusionPolicy,
        seen: &mut HashSet<&'a str>,
        out: &mut Vec<&'a ComponentSpec>,
    ) {
        let Some(children) = self.children.get(base) else {
            return;
        };
        for qualified in children {
            let Some(spec) = self.entries.get(qualified) else {
                continue;
            };
            if !seen.insert(spec.qualified) {
                continue;
            }
            if spec.is_concrete() && !policy.excludes(spec) {
                out.push(spec);
            }
            self.walk(spec.qualified, policy, seen, out);
        }
    }
}

static GLOBAL: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

/// Register a component into the process-wide registry
pub fn register_global(spec: ComponentSpec) -> Result<()> {
    GLOBAL.write().register(spec)
}

/// Read access to the process-wide registry
pub fn global() -> RwLockReadGuard<'static, Registry> {
    GLOBAL.read()
}
