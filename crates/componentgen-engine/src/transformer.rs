//! Component name transformers.
//!
//! A transformer maps a component's declared display name to its output
//! path segment. Transformers are looked up by the identifier carried in
//! the Generation Request; an unregistered identifier fails the run before
//! any archive is touched.

use componentgen_core::error::{GenerateError, Result};
use std::collections::HashMap;

pub trait ComponentNameTransformer: Send + Sync {
    fn transform(&self, name: &str) -> String;
}

/// "Image Banner" -> "image-banner"
pub struct HyphenatedTransformer;

impl ComponentNameTransformer for HyphenatedTransformer {
    fn transform(&self, name: &str) -> String {
        words(name).join("-")
    }
}

/// "Image Banner" -> "imageBanner"
pub struct CamelCaseTransformer;

impl ComponentNameTransformer for CamelCaseTransformer {
    fn transform(&self, name: &str) -> String {
        let mut out = String::new();
        for (i, word) in words(name).iter().enumerate() {
            if i == 0 {
                out.push_str(word);
            } else {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
        }
        out
    }
}

/// "Image Banner" -> "imagebanner"
pub struct LowerCaseTransformer;

impl ComponentNameTransformer for LowerCaseTransformer {
    fn transform(&self, name: &str) -> String {
        words(name).concat()
    }
}

fn words(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_lowercase())
        .collect()
}

pub struct TransformerRegistry {
    transformers: HashMap<String, Box<dyn ComponentNameTransformer>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self {
            transformers: HashMap::new(),
        }
    }

    /// Registry preloaded with the built-in transformers.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("hyphenated", Box::new(HyphenatedTransformer));
        registry.register("camel-case", Box::new(CamelCaseTransformer));
        registry.register("lower-case", Box::new(LowerCaseTransformer));
        registry
    }

    pub fn register(&mut self, name: &str, transformer: Box<dyn ComponentNameTransformer>) {
        self.transformers.insert(name.to_string(), transformer);
    }

    /// Lookup that fails the run when the identifier is unregistered.
    pub fn require(&self, name: &str) -> Result<&dyn ComponentNameTransformer> {
        self.transformers
            .get(name)
            .map(|t| t.as_ref())
            .ok_or_else(|| GenerateError::TransformerNotFound(name.to_string()))
    }
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenated() {
        assert_eq!(HyphenatedTransformer.transform("Image Banner"), "image-banner");
        assert_eq!(HyphenatedTransformer.transform("FAQ  List"), "faq-list");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(CamelCaseTransformer.transform("Image Banner"), "imageBanner");
        assert_eq!(CamelCaseTransformer.transform("teaser"), "teaser");
    }

    #[test]
    fn test_lower_case() {
        assert_eq!(LowerCaseTransformer.transform("Image Banner"), "imagebanner");
    }

    #[test]
    fn test_require_unknown_transformer_fails() {
        let registry = TransformerRegistry::builtin();
        let err = registry.require("pascal-case").err().unwrap();
        match err {
            GenerateError::TransformerNotFound(name) => assert_eq!(name, "pascal-case"),
            other => panic!("expected TransformerNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = TransformerRegistry::builtin();
        for name in ["hyphenated", "camel-case", "lower-case"] {
            assert!(registry.require(name).is_ok(), "missing builtin {}", name);
        }
    }
}
