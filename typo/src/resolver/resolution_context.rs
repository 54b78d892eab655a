//! Per-descent state of the resolver
//!
//! A context carries the generic bindings of the aggregate currently being
//! expanded, the nesting depth, and a human readable path used in log output.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::constants::RecursionDepth;
use crate::descriptor::{Classifier, TypeDescriptor};

/// Generic slot to concrete argument
type Bindings = HashMap<String, TypeDescriptor>;

#[derive(Debug, Clone, Default)]
pub(super) struct ResolutionContext {
    /// Bindings of the innermost parametrized aggregate or union
    bindings:    Arc<Bindings>,
    /// Nesting depth from the root descriptor
    depth:       RecursionDepth,
    /// Location in the root type (e.g. `.items[].owner`)
    path_prefix: String,
}

impl ResolutionContext {
    pub(super) fn root() -> Self {
        Self::default()
    }

    pub(super) const fn depth(&self) -> RecursionDepth {
        self.depth
    }

    pub(super) fn path(&self) -> &str {
        if self.path_prefix.is_empty() {
            "<root>"
        } else {
            &self.path_prefix
        }
    }

    /// Child context for an element, field, or map value sharing the current
    /// bindings
    ///
    /// The accessor should include its punctuation (`.field`, `[]`, `{}`).
    pub(super) fn descend(&self, accessor: &str) -> Self {
        Self {
            bindings:    Arc::clone(&self.bindings),
            depth:       self.depth.increment(),
            path_prefix: format!("{}{accessor}", self.path_prefix),
        }
    }

    /// Child context for the body of a parametrized type
    ///
    /// `arguments` must already be substituted against this context.
    pub(super) fn enter(&self, parameters: &[String], arguments: &[TypeDescriptor]) -> Self {
        if parameters.len() != arguments.len() {
            debug!(
                path = %self.path(),
                parameters = parameters.len(),
                arguments = arguments.len(),
                "Type argument count does not match parameters - unbound slots resolve to generic objects"
            );
        }
        let bindings = parameters
            .iter()
            .cloned()
            .zip(arguments.iter().cloned())
            .collect::<Bindings>();
        Self {
            bindings:    Arc::new(bindings),
            depth:       self.depth.increment(),
            path_prefix: self.path_prefix.clone(),
        }
    }

    /// Replace generic slots in `descriptor` with the bound arguments
    ///
    /// Substitution is structural: it reaches collection elements, map values,
    /// and nested type arguments. A nullable slot makes the bound argument
    /// nullable too.
    pub(super) fn substitute(&self, descriptor: &TypeDescriptor) -> TypeDescriptor {
        if self.bindings.is_empty() {
            return descriptor.clone();
        }
        let classifier = match &descriptor.classifier {
            Classifier::GenericParameter(slot) => {
                if let Some(bound) = self.bindings.get(slot) {
                    let mut bound = bound.clone();
                    bound.nullable |= descriptor.nullable;
                    return bound;
                }
                descriptor.classifier.clone()
            }
            Classifier::Collection(element) => {
                Classifier::Collection(Box::new(self.substitute(element)))
            }
            Classifier::Map(value) => Classifier::Map(Box::new(self.substitute(value))),
            other => other.clone(),
        };
        TypeDescriptor {
            classifier,
            nullable: descriptor.nullable,
            type_arguments: descriptor
                .type_arguments
                .iter()
                .map(|argument| self.substitute(argument))
                .collect(),
        }
    }
}
