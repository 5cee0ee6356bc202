#![deny(missing_docs)]
//! Node.js bindings that surface htmlvue's Rust implementation to build-tool loaders.

use htmlvue_vue::{ComponentRegistry, HtmlvueError, LoaderConfig, MarkupMode};
use napi::bindgen_prelude::*;
use napi_derive::napi;

/// The reusable transformer and its batch API.
pub mod transformer;
/// NAPI-exposed data structures.
pub mod types;

pub use transformer::HtmlvueTransformer;
pub use types::*;

/// Transforms one markup fragment into Vue component source.
///
/// Throws when faithful-mode parsing fails or the options are invalid.
#[napi]
pub fn transform(source: String, config: Option<TransformerConfig>) -> Result<String> {
    let options = loader_config(config)?.into_options(None);
    htmlvue_vue::transform(&source, &options).map_err(convert_error)
}

/// Converts the JS-facing config into the loader config.
pub(crate) fn loader_config(config: Option<TransformerConfig>) -> Result<LoaderConfig> {
    let cfg = config.unwrap_or_default();

    let mode = match cfg.mode {
        Some(mode) => serde_json::from_value::<MarkupMode>(serde_json::Value::String(mode.clone()))
            .map_err(|_| {
                Error::new(
                    Status::InvalidArg,
                    format!("Unknown mode '{}': expected \"permissive\" or \"faithful\"", mode),
                )
            })?,
        None => MarkupMode::default(),
    };

    let components = match cfg.components {
        Some(value) => serde_json::from_value::<ComponentRegistry>(value).map_err(|e| {
            Error::new(
                Status::InvalidArg,
                format!("Invalid components map: {}", e),
            )
        })?,
        None => ComponentRegistry::new(),
    };

    Ok(LoaderConfig {
        v_once: cfg.v_once.unwrap_or(false),
        v_pre: cfg.v_pre.unwrap_or(false),
        mode,
        components,
    })
}

fn convert_error(err: HtmlvueError) -> Error {
    match err {
        HtmlvueError::MalformedMarkup(e) => Error::new(Status::InvalidArg, e.to_string()),
        HtmlvueError::Preprocessing(e) => {
            Error::from_reason(format!("Preprocessing error: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transforms_with_default_config() {
        let output = transform("<div>Hello world</div>".to_string(), None).unwrap();
        assert_eq!(output, "<template><div>Hello world</div></template>");
    }

    #[test]
    fn config_flags_and_components_flow_through() {
        let config = TransformerConfig {
            v_once: Some(true),
            v_pre: Some(true),
            mode: Some("faithful".to_string()),
            components: Some(json!({ "Foo": "./foo.vue" })),
        };
        let output = transform(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_string(),
            Some(config),
        )
        .unwrap();
        assert_eq!(
            output,
            "<template><svg xmlns=\"http://www.w3.org/2000/svg\" v-pre=\"true\" v-once=\"true\"/></template>\n<script>\nimport Foo from './foo.vue';\nexport default { components: { Foo } };\n</script>"
        );
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let config = TransformerConfig {
            mode: Some("strict".to_string()),
            ..TransformerConfig::default()
        };
        let err = loader_config(Some(config)).unwrap_err();
        assert_eq!(err.status, Status::InvalidArg);
    }

    #[test]
    fn non_string_component_module_is_rejected() {
        let config = TransformerConfig {
            components: Some(json!({ "Foo": 42 })),
            ..TransformerConfig::default()
        };
        assert!(loader_config(Some(config)).is_err());
    }

    #[test]
    fn component_order_survives_json_conversion() {
        let config = TransformerConfig {
            components: Some(json!({ "Zed": "./z.vue", "Amy": "./a.vue" })),
            ..TransformerConfig::default()
        };
        let loader = loader_config(Some(config)).unwrap();
        assert_eq!(loader.components.names().collect::<Vec<_>>(), ["Zed", "Amy"]);
    }

    #[test]
    fn malformed_markup_maps_to_invalid_arg() {
        let config = TransformerConfig {
            mode: Some("faithful".to_string()),
            ..TransformerConfig::default()
        };
        let err = transform("<a><b></a>".to_string(), Some(config)).unwrap_err();
        assert_eq!(err.status, Status::InvalidArg);
    }

    #[test]
    fn transformer_class_reuses_its_config() {
        let transformer = HtmlvueTransformer::new(Some(TransformerConfig {
            v_once: Some(true),
            ..TransformerConfig::default()
        }))
        .unwrap();
        assert_eq!(
            transformer.transform(" ".to_string()).unwrap(),
            "<template><div v-once=\"true\"></div></template>"
        );
        assert_eq!(
            transformer.transform("<p>x</p>".to_string()).unwrap(),
            "<template><p v-once=\"true\">x</p></template>"
        );
    }
}
