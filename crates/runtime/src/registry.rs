// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use oxrdf::{NamedNodeRef, NamedOrBlankNode};
use parking_lot::RwLock;

use crate::domain::DomainType;
use crate::{
    GraphSource, MaterializeError, NodeHandle, ValidationContext, ValidationError,
    ValidationOutcome, Validator,
};

/// Creates the wrapper of a domain type for one node.
pub type Factory<T> = Arc<dyn Fn(NodeHandle) -> Arc<T> + Send + Sync>;

/// Maps domain types to the factories that materialize them,
/// and holds the default validator.
///
/// Shared as `Arc<Registry>`;
/// every materialized instance keeps a reference to the registry it came from,
/// to materialize the objects it links to.
pub struct Registry {
    /// [`TypeId`] of `dyn Domain` -> `Factory<dyn Domain>`
    factories: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
    validator: RwLock<Option<Arc<dyn Validator>>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("factories", &self.factories.read().len())
            .field("validator", &self.validator.read().is_some())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
            validator: RwLock::new(None),
        }
    }

    /// Registers the factory for the domain type `T`.
    /// A previously registered factory for `T` is replaced.
    pub fn register<T, F>(&self, factory: F)
    where
        T: DomainType + ?Sized,
        F: Fn(NodeHandle) -> Arc<T> + Send + Sync + 'static,
    {
        let factory: Factory<T> = Arc::new(factory);
        let previous = self
            .factories
            .write()
            .insert(TypeId::of::<T>(), Box::new(factory));
        if previous.is_some() {
            tracing::debug!("Replaced the factory for {}", T::NAME);
        } else {
            tracing::trace!("Registered a factory for {}", T::NAME);
        }
    }

    #[must_use]
    pub fn is_registered<T: DomainType + ?Sized>(&self) -> bool {
        self.factories.read().contains_key(&TypeId::of::<T>())
    }

    fn factory<T: DomainType + ?Sized>(&self) -> Option<Factory<T>> {
        self.factories
            .read()
            .get(&TypeId::of::<T>())
            .and_then(|factory| factory.downcast_ref::<Factory<T>>())
            .map(Arc::clone)
    }

    /// Materializes `node` as an instance of the domain type `T`.
    ///
    /// If no factory for `T` is registered yet,
    /// [`DomainType::install`] gets a chance to register one first.
    ///
    /// # Errors
    ///
    /// If no factory for `T` is registered, even after installing it.
    pub fn materialize<T: DomainType + ?Sized>(
        self: &Arc<Self>,
        node: NamedOrBlankNode,
        graph: Arc<dyn GraphSource>,
    ) -> Result<Arc<T>, MaterializeError> {
        let factory = if let Some(factory) = self.factory::<T>() {
            factory
        } else {
            tracing::debug!("Installing the default factory for {}", T::NAME);
            T::install(self);
            self.factory::<T>()
                .ok_or(MaterializeError::NoFactoryRegistered {
                    domain_type: T::NAME,
                })?
        };
        Ok(factory(NodeHandle::new(node, graph, Arc::clone(self))))
    }

    /// Materializes `node` as an instance of the domain type `T`,
    /// and returns it only if the node conforms to its shapes.
    ///
    /// # Errors
    ///
    /// - no factory for `T` is registered (see [`Self::materialize`])
    /// - there is no validator to use
    /// - the validator failed
    /// - the node does not conform;
    ///   the instance is dropped in that case
    pub fn materialize_validated<T: DomainType + ?Sized>(
        self: &Arc<Self>,
        node: NamedOrBlankNode,
        graph: Arc<dyn GraphSource>,
        ctx: &ValidationContext,
    ) -> Result<Arc<T>, MaterializeError> {
        let validator = self.resolve_validator(ctx)?;
        let instance = self.materialize::<T>(node.clone(), Arc::clone(&graph))?;
        let class = NamedNodeRef::new_unchecked(T::CLASS_IRI);
        match validator.validate_as(&*graph, node.as_ref(), class)? {
            ValidationOutcome::Conforms => Ok(instance),
            ValidationOutcome::Violations(violations) => {
                tracing::debug!(
                    "{node} does not conform to {}; {} violation(s)",
                    T::NAME,
                    violations.len()
                );
                Err(MaterializeError::Validation(violations))
            }
        }
    }

    /// Sets the validator used with [`ValidationContext::UseRegistered`],
    /// replacing any previous one.
    pub fn set_validator(&self, validator: Arc<dyn Validator>) {
        *self.validator.write() = Some(validator);
    }

    pub fn clear_validator(&self) {
        *self.validator.write() = None;
    }

    #[must_use]
    pub fn validator(&self) -> Option<Arc<dyn Validator>> {
        self.validator.read().clone()
    }

    /// Returns the validator `ctx` asks for.
    ///
    /// # Errors
    ///
    /// If `ctx` asks for the registered validator, and there is none.
    pub fn resolve_validator(
        &self,
        ctx: &ValidationContext,
    ) -> Result<Arc<dyn Validator>, ValidationError> {
        match ctx {
            ValidationContext::UseRegistered => {
                self.validator().ok_or(ValidationError::NoValidatorRegistered)
            }
            ValidationContext::With(validator) => Ok(Arc::clone(validator)),
        }
    }
}
