use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |node, part| node.get(part))
}

/// CLDR category for `count`. Japanese has no singular form.
fn plural_category(lang: &str, count: u64) -> &'static str {
    match (lang, count) {
        ("ja", _) => "other",
        (_, 1) => "one",
        _ => "other",
    }
}

fn pick_template<'a>(value: &'a Value, lang: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<&'a str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(forms) => {
            let count = args
                .and_then(|m| m.get("count"))
                .and_then(|raw| raw.parse::<u64>().ok());
            count
                .and_then(|n| forms.get(plural_category(lang, n)))
                .or_else(|| forms.get("other"))
                .and_then(Value::as_str)
        }
        _ => None,
    }
}

fn render_value(value: &Value, lang: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = pick_template(value, lang, args)?.to_string();
    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{{{k}}}}}"), v);
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    with_bundle(|bundle| {
        lookup(&bundle.translations, key)
            .and_then(|v| render_value(v, &bundle.lang, args))
            .or_else(|| {
                lookup(&bundle.fallback, key).and_then(|v| render_value(v, &bundle.lang, args))
            })
    })
}

/// Translate `key` in the active language, falling back to Japanese and
/// then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate `key`, substituting `{name}` / `{{name}}` placeholders.
/// A `count` argument selects the plural form when the entry has several.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_forms_follow_language() {
        let value = serde_json::json!({"one": "{count} spot", "other": "{count} spots"});
        let mut args = BTreeMap::new();
        args.insert("count", "1");
        assert_eq!(render_value(&value, "en", Some(&args)).unwrap(), "1 spot");
        assert_eq!(render_value(&value, "ja", Some(&args)).unwrap(), "1 spots");
        args.insert("count", "12");
        assert_eq!(render_value(&value, "en", Some(&args)).unwrap(), "12 spots");
    }

    #[test]
    fn interpolation_handles_braced_forms() {
        let value = Value::String("{name}! {{name}}!".into());
        let mut args = BTreeMap::new();
        args.insert("name", "田貫湖");
        assert_eq!(
            render_value(&value, "ja", Some(&args)).unwrap(),
            "田貫湖! 田貫湖!"
        );
    }

    #[test]
    fn missing_key_echoes_key() {
        assert_eq!(t("no.such.key"), "no.such.key");
        assert_eq!(t("nav.prizes"), "景品");
    }
}
