//! Transform configuration: in-code options and the host's JSON loader config.

use crate::registry::ComponentRegistry;
use htmlvue_core::{DirectiveSet, MarkupMode, TextTransform};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied preprocessing hook, optionally paired with a component registry.
pub enum Transform {
    /// A bare text-to-text function applied before parsing.
    Transformer(Box<dyn TextTransform>),
    /// An optional text function plus sub-components to import and register.
    WithComponents {
        /// Text function applied before parsing, if any.
        transformer: Option<Box<dyn TextTransform>>,
        /// Components registered in the emitted script block.
        components: ComponentRegistry,
    },
}

impl Transform {
    /// Wrap a preprocessing function.
    pub fn transformer<T: TextTransform + 'static>(transform: T) -> Self {
        Self::Transformer(Box::new(transform))
    }

    /// Register components without preprocessing.
    pub fn components(components: ComponentRegistry) -> Self {
        Self::WithComponents {
            transformer: None,
            components,
        }
    }

    /// The preprocessing function, if configured.
    pub fn text_transform(&self) -> Option<&dyn TextTransform> {
        match self {
            Transform::Transformer(transform) => Some(transform.as_ref()),
            Transform::WithComponents { transformer, .. } => transformer.as_deref(),
        }
    }

    /// The component registry, if configured.
    pub fn registry(&self) -> Option<&ComponentRegistry> {
        match self {
            Transform::Transformer(_) => None,
            Transform::WithComponents { components, .. } => Some(components),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Transformer(_) => f.debug_tuple("Transformer").field(&"<fn>").finish(),
            Transform::WithComponents {
                transformer,
                components,
            } => f
                .debug_struct("WithComponents")
                .field("transformer", &transformer.as_ref().map(|_| "<fn>"))
                .field("components", components)
                .finish(),
        }
    }
}

/// Options for a single transform invocation.
#[derive(Debug, Default)]
pub struct TransformOptions {
    /// Directives injected on the resolved root.
    pub directives: DirectiveSet,
    /// Parse/serialize mode.
    pub mode: MarkupMode,
    /// Optional preprocessing hook and component registry.
    pub transform: Option<Transform>,
}

impl TransformOptions {
    /// Options with the given mode and nothing else enabled.
    pub fn with_mode(mode: MarkupMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// The preprocessing function, if configured.
    pub fn text_transform(&self) -> Option<&dyn TextTransform> {
        self.transform.as_ref().and_then(Transform::text_transform)
    }

    /// The component registry, if configured.
    pub fn registry(&self) -> Option<&ComponentRegistry> {
        self.transform.as_ref().and_then(Transform::registry)
    }
}

/// Loader options as the host passes them (JSON-shaped, all optional).
///
/// A preprocessing function cannot cross this boundary; hosts apply it
/// before handing the source over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderConfig {
    /// Add `v-once` to the root.
    #[serde(default, alias = "v_once")]
    pub v_once: bool,
    /// Add `v-pre` to the root.
    #[serde(default, alias = "v_pre")]
    pub v_pre: bool,
    /// Parse/serialize mode.
    #[serde(default)]
    pub mode: MarkupMode,
    /// Sub-components to import and register, in order.
    #[serde(default, skip_serializing_if = "ComponentRegistry::is_empty")]
    pub components: ComponentRegistry,
}

impl LoaderConfig {
    /// Parse a loader config from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Directive flags requested by this config.
    pub fn directives(&self) -> DirectiveSet {
        DirectiveSet {
            once: self.v_once,
            pre: self.v_pre,
        }
    }

    /// Convert into transform options, attaching `transformer` if given.
    pub fn into_options(self, transformer: Option<Box<dyn TextTransform>>) -> TransformOptions {
        let directives = self.directives();
        let transform = match (transformer, self.components.is_empty()) {
            (None, true) => None,
            (Some(transformer), true) => Some(Transform::Transformer(transformer)),
            (transformer, false) => Some(Transform::WithComponents {
                transformer,
                components: self.components,
            }),
        };

        TransformOptions {
            directives,
            mode: self.mode,
            transform,
        }
    }
}
