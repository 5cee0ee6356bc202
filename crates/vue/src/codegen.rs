//! Vue single-file component code generation.
//!
//! The output is a `<template>` block holding the serialized root, optionally
//! followed by a `<script>` block that imports and registers sub-components.

use crate::registry::ComponentRegistry;
use std::fmt::Write as FmtWrite;

/// Converts a Rust string to a single-quoted JavaScript string literal.
///
/// # Examples
///
/// ```
/// use htmlvue_vue::codegen::js_string_literal;
///
/// assert_eq!(js_string_literal("./foo.vue"), "'./foo.vue'");
/// assert_eq!(js_string_literal("it's"), "'it\\'s'");
/// assert_eq!(js_string_literal("a\\b\nc"), "'a\\\\b\\nc'");
/// ```
pub fn js_string_literal(value: &str) -> String {
    // serde_json only produces double-quoted literals; imports use single quotes.
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Wraps serialized root markup in a `<template>` block.
///
/// ```
/// use htmlvue_vue::codegen::template_block;
///
/// assert_eq!(template_block("<div></div>"), "<template><div></div></template>");
/// ```
pub fn template_block(root_markup: &str) -> String {
    format!("<template>{root_markup}</template>")
}

/// Emits the component registration `<script>` block.
///
/// Returns `None` for an empty registry: no script block is produced then.
pub fn script_block(registry: &ComponentRegistry) -> Option<String> {
    if registry.is_empty() {
        return None;
    }

    let mut out = String::from("<script>\n");
    for entry in registry {
        let _ = writeln!(
            out,
            "import {} from {};",
            entry.name,
            js_string_literal(&entry.module)
        );
    }
    let names = registry.names().collect::<Vec<_>>().join(", ");
    let _ = writeln!(out, "export default {{ components: {{ {names} }} }};");
    out.push_str("</script>");

    log::debug!("registering {} component(s)", registry.len());
    Some(out)
}

/// Assembles the final component source from root markup and an optional registry.
pub fn component_source(root_markup: &str, registry: Option<&ComponentRegistry>) -> String {
    let mut out = template_block(root_markup);
    if let Some(script) = registry.and_then(script_block) {
        out.push('\n');
        out.push_str(&script);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_has_no_script() {
        assert_eq!(script_block(&ComponentRegistry::new()), None);
        assert_eq!(
            component_source("<p></p>", Some(&ComponentRegistry::new())),
            "<template><p></p></template>"
        );
        assert_eq!(component_source("<p></p>", None), "<template><p></p></template>");
    }

    #[test]
    fn single_component_registration() {
        let registry: ComponentRegistry = [("Foo", "./foo.vue")].into_iter().collect();
        assert_eq!(
            script_block(&registry).unwrap(),
            "<script>\nimport Foo from './foo.vue';\nexport default { components: { Foo } };\n</script>"
        );
    }

    #[test]
    fn registration_keeps_insertion_order() {
        let registry: ComponentRegistry = [("Zed", "@/z.vue"), ("Amy", "@/a.vue")]
            .into_iter()
            .collect();
        let script = script_block(&registry).unwrap();
        let zed = script.find("import Zed").unwrap();
        let amy = script.find("import Amy").unwrap();
        assert!(zed < amy, "{script}");
        assert!(script.contains("components: { Zed, Amy }"), "{script}");
    }

    #[test]
    fn module_specifiers_are_escaped() {
        let registry: ComponentRegistry = [("Odd", "./it's.vue")].into_iter().collect();
        assert!(
            script_block(&registry)
                .unwrap()
                .contains("import Odd from './it\\'s.vue';")
        );
    }

    #[test]
    fn script_follows_template_on_its_own_line() {
        let registry: ComponentRegistry = [("Foo", "./foo.vue")].into_iter().collect();
        let source = component_source("<div><Foo></Foo></div>", Some(&registry));
        assert!(source.starts_with("<template><div><Foo></Foo></div></template>\n<script>\n"));
        assert!(source.ends_with("</script>"));
    }
}
