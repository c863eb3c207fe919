//! Design-token documents and the randomized edits applied to them.
//!
//! Each [`TokenKind`] has a fixed shape that is checked when the file is
//! loaded. A mutation rewrites exactly one leaf and the whole document is
//! written back pretty-printed with its key order intact.

use crate::domain::model::{Mutation, TokenKind};
use crate::domain::ports::{RandomSource, Storage};
use crate::utils::error::{DesignCodeError, Result};
use serde_json::{Map, Value};
use std::path::Path;

pub const FONT_SIZES: &[&str] = &[
    "0.75rem", "0.875rem", "1rem", "1.125rem", "1.25rem", "1.5rem", "2rem", "2.5rem", "3rem",
];
pub const FONT_WEIGHTS: &[u64] = &[300, 400, 500, 600, 700];
pub const LINE_HEIGHTS: &[&str] = &["1.2", "1.4", "1.5", "1.6", "1.75"];
pub const TYPOGRAPHY_PROPERTIES: &[&str] = &["fontSize", "fontWeight", "lineHeight"];
pub const SPACING_PX: &[u64] = &[2, 4, 6, 8, 10, 12, 16, 20, 24, 32, 40, 48, 64];
pub const RADIUS_PX: &[u64] = &[2, 4, 6, 8, 12, 16, 24, 9999];
pub const PADDING_PX: &[u64] = &[4, 8, 12, 16, 20, 24];
pub const GENERIC_PX: &[u64] = &[1, 2, 4, 8, 12, 16];

/// A parsed token file whose shape matched its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    kind: TokenKind,
    root: Map<String, Value>,
}

impl TokenDocument {
    pub fn parse(kind: TokenKind, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| DesignCodeError::format(kind.file_name(), e.to_string()))?;
        Self::from_value(kind, value)
    }

    pub fn from_value(kind: TokenKind, value: Value) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(shape_error(kind, "top level must be an object"));
        };
        if root.is_empty() {
            return Err(shape_error(kind, "document has no tokens"));
        }

        for (key, value) in &root {
            match (kind, value) {
                (TokenKind::Spacing, v) if is_scalar(v) => {}
                (TokenKind::Colors, v) if is_scalar(v) => {}
                (TokenKind::Colors | TokenKind::Components, Value::Object(group)) => {
                    if group.is_empty() {
                        return Err(shape_error(kind, format!("'{}' has no entries", key)));
                    }
                    check_scalars(kind, key, group)?;
                }
                (TokenKind::Typography, Value::Object(group)) => check_scalars(kind, key, group)?,
                (TokenKind::Spacing, _) => {
                    return Err(shape_error(kind, format!("'{}' must be a scalar", key)))
                }
                (TokenKind::Colors, _) => {
                    return Err(shape_error(
                        kind,
                        format!("'{}' must be a scalar or an object of scalars", key),
                    ))
                }
                (TokenKind::Typography | TokenKind::Components, _) => {
                    return Err(shape_error(kind, format!("'{}' must be an object", key)))
                }
            }
        }

        Ok(Self { kind, root })
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Two-space indented JSON followed by a newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.root)?;
        out.push('\n');
        Ok(out)
    }

    /// Rewrites one randomly chosen leaf.
    pub fn mutate<R: RandomSource>(&mut self, rng: &mut R) -> Mutation {
        let key = pick_key(&self.root, rng);
        let kind = self.kind;

        match kind {
            TokenKind::Colors => {
                let sub = match self.root.get(&key) {
                    Some(Value::Object(group)) => Some(pick_key(group, rng)),
                    _ => None,
                };
                let value = Value::String(random_hex_color(rng));
                match sub {
                    Some(sub) => {
                        let previous = nested_insert(&mut self.root, &key, &sub, value.clone());
                        Mutation { kind, path: vec![key, sub], previous, value }
                    }
                    None => {
                        let previous = self.root.insert(key.clone(), value.clone());
                        Mutation { kind, path: vec![key], previous, value }
                    }
                }
            }
            TokenKind::Typography => {
                let prop = choose(rng, TYPOGRAPHY_PROPERTIES);
                let value = match prop {
                    "fontSize" => Value::String(choose(rng, FONT_SIZES).to_string()),
                    "fontWeight" => Value::from(choose(rng, FONT_WEIGHTS)),
                    _ => Value::String(choose(rng, LINE_HEIGHTS).to_string()),
                };
                let previous = nested_insert(&mut self.root, &key, prop, value.clone());
                Mutation { kind, path: vec![key, prop.to_string()], previous, value }
            }
            TokenKind::Spacing => {
                let value = Value::String(px(choose(rng, SPACING_PX)));
                let previous = self.root.insert(key.clone(), value.clone());
                Mutation { kind, path: vec![key], previous, value }
            }
            TokenKind::Components => {
                let prop = match self.root.get(&key) {
                    Some(Value::Object(group)) => pick_key(group, rng),
                    _ => unreachable!("component shape is checked on load"),
                };
                let value = Value::String(component_value(&prop, rng));
                let previous = nested_insert(&mut self.root, &key, &prop, value.clone());
                Mutation { kind, path: vec![key, prop], previous, value }
            }
        }
    }
}

/// Loads `<tokens_dir>/<file>`, applies one mutation and writes the file back.
pub async fn mutate_file<S, R>(
    storage: &S,
    tokens_dir: &Path,
    kind: TokenKind,
    rng: &mut R,
) -> Result<Mutation>
where
    S: Storage,
    R: RandomSource,
{
    let path = tokens_dir.join(kind.file_name());
    let bytes = storage.read_file(&path).await?;
    let content = String::from_utf8(bytes).map_err(|e| {
        DesignCodeError::format(path.display().to_string(), format!("not UTF-8: {}", e))
    })?;

    let mut document = TokenDocument::parse(kind, &content).map_err(|e| match e {
        DesignCodeError::FormatError { message, .. } => {
            DesignCodeError::format(path.display().to_string(), message)
        }
        other => other,
    })?;
    let mutation = document.mutate(rng);

    storage
        .write_file(&path, document.to_pretty_json()?.as_bytes())
        .await?;
    tracing::debug!(
        "{}: {} {:?} -> {}",
        kind,
        mutation.pointer(),
        mutation.previous,
        mutation.value
    );
    Ok(mutation)
}

pub fn random_hex_color<R: RandomSource>(rng: &mut R) -> String {
    format!("#{:06x}", rng.uniform_int(0, 0xFF_FFFF))
}

/// CSS box-shadow with a black rgba color. Alpha is drawn in hundredths.
pub fn random_shadow<R: RandomSource>(rng: &mut R) -> String {
    let x = rng.uniform_int(0, 4);
    let y = rng.uniform_int(1, 8);
    let blur = rng.uniform_int(4, 24);
    let alpha = rng.uniform_int(4, 20);
    format!("{}px {}px {}px rgba(0,0,0,{})", x, y, blur, hundredths(alpha))
}

pub fn component_value<R: RandomSource>(property: &str, rng: &mut R) -> String {
    let property = property.to_lowercase();
    if property.contains("radius") {
        px(choose(rng, RADIUS_PX))
    } else if property.contains("shadow") {
        random_shadow(rng)
    } else if property.contains("padding") || property.contains("gap") {
        px(choose(rng, PADDING_PX))
    } else {
        px(choose(rng, GENERIC_PX))
    }
}

fn px(n: u64) -> String {
    format!("{}px", n)
}

// 10 -> "0.1", 4 -> "0.04", 15 -> "0.15"
fn hundredths(n: u64) -> String {
    let text = format!("{}.{:02}", n / 100, n % 100);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn choose<R: RandomSource, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.uniform_int(0, items.len() as u64 - 1) as usize]
}

fn pick_key<R: RandomSource>(map: &Map<String, Value>, rng: &mut R) -> String {
    let index = rng.uniform_int(0, map.len() as u64 - 1) as usize;
    map.keys().nth(index).cloned().unwrap_or_default()
}

fn nested_insert(
    root: &mut Map<String, Value>,
    key: &str,
    prop: &str,
    value: Value,
) -> Option<Value> {
    match root.get_mut(key) {
        Some(Value::Object(group)) => group.insert(prop.to_string(), value),
        _ => None,
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn check_scalars(kind: TokenKind, key: &str, group: &Map<String, Value>) -> Result<()> {
    match group.iter().find(|(_, v)| !is_scalar(v)) {
        Some((sub, _)) => Err(shape_error(
            kind,
            format!("'{}.{}' must be a scalar", key, sub),
        )),
        None => Ok(()),
    }
}

fn shape_error(kind: TokenKind, message: impl Into<String>) -> DesignCodeError {
    DesignCodeError::format(kind.file_name(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{LocalStorage, StdRandom};
    use regex::Regex;
    use serde_json::json;
    use tempfile::TempDir;

    /// Returns leaf paths whose value differs between two documents.
    fn changed_leaves(before: &Value, after: &Value) -> Vec<String> {
        fn walk(prefix: &str, a: Option<&Value>, b: Option<&Value>, out: &mut Vec<String>) {
            match (a, b) {
                (Some(Value::Object(x)), Some(Value::Object(y))) => {
                    let keys: std::collections::BTreeSet<&String> = x.keys().chain(y.keys()).collect();
                    for k in keys {
                        walk(&format!("{}/{}", prefix, k), x.get(k), y.get(k), out);
                    }
                }
                (x, y) if x != y => out.push(prefix.to_string()),
                _ => {}
            }
        }
        let mut out = Vec::new();
        walk("", Some(before), Some(after), &mut out);
        out
    }

    fn sample(kind: TokenKind) -> Value {
        match kind {
            TokenKind::Colors => json!({
                "primary": {"500": "#3b82f6", "600": "#2563eb"},
                "background": "#ffffff",
                "text": {"default": "#111827"}
            }),
            TokenKind::Typography => json!({
                "heading": {"fontSize": "2rem", "fontWeight": 700, "lineHeight": "1.2"},
                "body": {"fontSize": "1rem", "fontWeight": 400, "lineHeight": "1.5"}
            }),
            TokenKind::Spacing => json!({"sm": "4px", "md": "8px", "lg": "16px"}),
            TokenKind::Components => json!({
                "button": {"borderRadius": "6px", "paddingX": "16px", "boxShadow": "0px 1px 2px rgba(0,0,0,0.05)"},
                "card": {"gap": "12px", "borderWidth": "1px"}
            }),
        }
    }

    fn in_domain(kind: TokenKind, mutation: &Mutation) -> bool {
        let px_in = |set: &[u64], v: &Value| set.iter().any(|n| v.as_str() == Some(px(*n).as_str()));
        let value = &mutation.value;
        let leaf = mutation.path.last().map(String::as_str).unwrap_or_default();
        match kind {
            TokenKind::Colors => Regex::new(r"^#[0-9a-f]{6}$")
                .unwrap()
                .is_match(value.as_str().unwrap_or_default()),
            TokenKind::Typography => match leaf {
                "fontSize" => FONT_SIZES.iter().any(|s| value.as_str() == Some(*s)),
                "fontWeight" => FONT_WEIGHTS.iter().any(|w| value.as_u64() == Some(*w)),
                "lineHeight" => LINE_HEIGHTS.iter().any(|s| value.as_str() == Some(*s)),
                _ => false,
            },
            TokenKind::Spacing => px_in(SPACING_PX, value),
            TokenKind::Components => {
                let lower = leaf.to_lowercase();
                if lower.contains("radius") {
                    px_in(RADIUS_PX, value)
                } else if lower.contains("shadow") {
                    value.as_str().is_some_and(|s| s.contains("rgba(0,0,0,"))
                } else if lower.contains("padding") || lower.contains("gap") {
                    px_in(PADDING_PX, value)
                } else {
                    px_in(GENERIC_PX, value)
                }
            }
        }
    }

    #[test]
    fn test_each_mutation_rewrites_one_leaf_within_its_domain() {
        let mut rng = StdRandom::seeded(11);
        for kind in TokenKind::ALL {
            let mut doc = TokenDocument::from_value(kind, sample(kind)).unwrap();
            for _ in 0..200 {
                let before = doc.clone().into_value();
                let mutation = doc.mutate(&mut rng);
                let after = doc.clone().into_value();

                let pointer = format!("/{}", mutation.path.join("/"));
                assert_eq!(after.pointer(&pointer), Some(&mutation.value), "{kind}");
                assert!(in_domain(kind, &mutation), "{kind}: {mutation:?}");

                // A redraw may land on the value already stored there.
                let changed = changed_leaves(&before, &after);
                if mutation.previous.as_ref() == Some(&mutation.value) {
                    assert!(changed.is_empty(), "{kind}: {changed:?}");
                } else {
                    assert_eq!(changed, vec![pointer], "{kind}");
                }

                let reparsed = TokenDocument::parse(kind, &doc.to_pretty_json().unwrap()).unwrap();
                assert_eq!(reparsed, doc);
            }
        }
    }

    #[test]
    fn test_spacing_scenario() {
        let mut rng = StdRandom::seeded(5);
        let px_re = Regex::new(r"^\d+px$").unwrap();
        let original = json!({"sm": "4px", "md": "8px"});

        let mut doc = TokenDocument::from_value(TokenKind::Spacing, original.clone()).unwrap();
        let mutation = doc.mutate(&mut rng);
        let map = doc.as_map();

        let changed = &mutation.path[0];
        let other = if changed == "sm" { "md" } else { "sm" };
        assert!(px_re.is_match(map[changed].as_str().unwrap()));
        assert_eq!(map[other], original[other]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_value_domains() {
        let mut rng = StdRandom::seeded(99);
        let color_re = Regex::new(r"^#[0-9a-f]{6}$").unwrap();
        let shadow_re =
            Regex::new(r"^[0-4]px [1-8]px (\d+)px rgba\(0,0,0,0\.(\d{1,2})\)$").unwrap();

        for _ in 0..500 {
            assert!(color_re.is_match(&random_hex_color(&mut rng)));

            let shadow = random_shadow(&mut rng);
            let caps = shadow_re.captures(&shadow).expect(&shadow);
            let blur: u64 = caps[1].parse().unwrap();
            assert!((4..=24).contains(&blur));
            let alpha: f64 = format!("0.{}", &caps[2]).parse().unwrap();
            assert!((0.04..=0.2).contains(&alpha), "{shadow}");
            assert!(!caps[2].ends_with('0'), "{shadow}");

            let radius = component_value("borderRadius", &mut rng);
            assert!(RADIUS_PX.iter().any(|n| px(*n) == radius));
            let gap = component_value("rowGap", &mut rng);
            assert!(PADDING_PX.iter().any(|n| px(*n) == gap));
            let padding = component_value("PaddingY", &mut rng);
            assert!(PADDING_PX.iter().any(|n| px(*n) == padding));
            let width = component_value("borderWidth", &mut rng);
            assert!(GENERIC_PX.iter().any(|n| px(*n) == width));
        }
    }

    #[test]
    fn test_hundredths() {
        assert_eq!(hundredths(4), "0.04");
        assert_eq!(hundredths(10), "0.1");
        assert_eq!(hundredths(15), "0.15");
        assert_eq!(hundredths(20), "0.2");
    }

    #[test]
    fn test_typography_inserts_missing_property() {
        let mut rng = StdRandom::seeded(3);
        let mut doc =
            TokenDocument::from_value(TokenKind::Typography, json!({"caption": {}})).unwrap();
        let mutation = doc.mutate(&mut rng);

        assert_eq!(mutation.previous, None);
        assert!(TYPOGRAPHY_PROPERTIES.contains(&mutation.path[1].as_str()));
        assert_eq!(doc.as_map()["caption"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_shape_validation() {
        let bad = [
            (TokenKind::Spacing, json!(["4px"])),
            (TokenKind::Spacing, json!({})),
            (TokenKind::Spacing, json!({"sm": {"value": "4px"}})),
            (TokenKind::Colors, json!({"primary": {}})),
            (TokenKind::Colors, json!({"primary": {"500": {"deep": "#000000"}}})),
            (TokenKind::Colors, json!({"primary": ["#000000"]})),
            (TokenKind::Typography, json!({"body": "1rem"})),
            (TokenKind::Components, json!({"button": {}})),
            (TokenKind::Components, json!({"button": "6px"})),
        ];
        for (kind, value) in bad {
            let err = TokenDocument::from_value(kind, value.clone()).unwrap_err();
            assert!(
                matches!(err, DesignCodeError::FormatError { .. }),
                "{kind} accepted {value}"
            );
        }

        let err = TokenDocument::parse(TokenKind::Colors, "{not json").unwrap_err();
        assert!(matches!(err, DesignCodeError::FormatError { .. }));
    }

    #[test]
    fn test_pretty_json_keeps_key_order() {
        let doc = TokenDocument::parse(TokenKind::Spacing, r#"{"xl": "32px", "a": "2px"}"#).unwrap();
        assert_eq!(doc.kind(), TokenKind::Spacing);
        assert_eq!(
            doc.to_pretty_json().unwrap(),
            "{\n  \"xl\": \"32px\",\n  \"a\": \"2px\"\n}\n"
        );
    }

    #[tokio::test]
    async fn test_mutate_file_rewrites_only_its_file() {
        let dir = TempDir::new().unwrap();
        let tokens = dir.path().join("design_tokens");
        std::fs::create_dir_all(&tokens).unwrap();
        for kind in TokenKind::ALL {
            std::fs::write(
                tokens.join(kind.file_name()),
                serde_json::to_string_pretty(&sample(kind)).unwrap(),
            )
            .unwrap();
        }
        let before: Vec<String> = TokenKind::ALL
            .iter()
            .map(|k| std::fs::read_to_string(tokens.join(k.file_name())).unwrap())
            .collect();

        let storage = LocalStorage::new(dir.path());
        let mut rng = StdRandom::seeded(8);
        let mutation = mutate_file(&storage, Path::new("design_tokens"), TokenKind::Spacing, &mut rng)
            .await
            .unwrap();
        assert_eq!(mutation.kind, TokenKind::Spacing);

        for (kind, old) in TokenKind::ALL.iter().zip(before) {
            let now = std::fs::read_to_string(tokens.join(kind.file_name())).unwrap();
            if *kind != TokenKind::Spacing {
                assert_eq!(now, old);
            } else {
                let value: Value = serde_json::from_str(&now).unwrap();
                assert!(value.is_object());
            }
        }
    }

    #[tokio::test]
    async fn test_mutate_file_errors() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let mut rng = StdRandom::seeded(1);

        let missing = mutate_file(&storage, Path::new("design_tokens"), TokenKind::Colors, &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(missing, DesignCodeError::IoError(_)));

        std::fs::create_dir_all(dir.path().join("design_tokens")).unwrap();
        std::fs::write(dir.path().join("design_tokens/colors.json"), "[1, 2]").unwrap();
        let malformed = mutate_file(&storage, Path::new("design_tokens"), TokenKind::Colors, &mut rng)
            .await
            .unwrap_err();
        match malformed {
            DesignCodeError::FormatError { path, .. } => assert!(path.ends_with("colors.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
