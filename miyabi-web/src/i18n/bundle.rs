use crate::i18n::locales::{is_supported, load_translations};
use serde_json::Value;
use std::cell::RefCell;

/// Locale used when nothing was saved.
pub const DEFAULT_LANG: &str = "ja";
/// localStorage key holding the chosen locale.
pub const LOCALE_KEY: &str = "miyabi.locale";

pub struct I18nBundle {
    pub lang: String,
    pub translations: Value,
    pub fallback: Value,
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    if !is_supported(lang) {
        return None;
    }
    let fallback = load_translations(DEFAULT_LANG)?;
    let translations = load_translations(lang)?;

    Some(I18nBundle {
        lang: lang.to_string(),
        translations,
        fallback,
    })
}

fn empty_bundle() -> I18nBundle {
    I18nBundle {
        lang: DEFAULT_LANG.to_string(),
        translations: Value::Object(serde_json::Map::new()),
        fallback: Value::Object(serde_json::Map::new()),
    }
}

fn saved_lang() -> String {
    #[cfg(all(not(test), target_arch = "wasm32"))]
    {
        use gloo::storage::{LocalStorage, Storage};
        LocalStorage::get::<String>(LOCALE_KEY).unwrap_or_else(|_| DEFAULT_LANG.to_string())
    }

    #[cfg(any(test, not(target_arch = "wasm32")))]
    {
        DEFAULT_LANG.to_string()
    }
}

thread_local! {
    pub(super) static CURRENT: RefCell<I18nBundle> = RefCell::new({
        let initial = saved_lang();
        build_bundle(&initial)
            .or_else(|| build_bundle(DEFAULT_LANG))
            .unwrap_or_else(empty_bundle)
    });
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Switch the active language.
///
/// Updates `<html lang>` and remembers the choice in localStorage.
/// Unsupported codes are ignored.
pub fn set_lang(lang: &str) {
    let Some(bundle) = build_bundle(lang) else {
        log::warn!("unsupported locale {lang}");
        return;
    };
    CURRENT.with(|cell| cell.replace(bundle));
    #[cfg(target_arch = "wasm32")]
    {
        use gloo::storage::{LocalStorage, Storage};
        if let Some(el) = crate::dom::document().and_then(|doc| doc.document_element()) {
            let _ = el.set_attribute("lang", lang);
        }
        if let Err(err) = LocalStorage::set(LOCALE_KEY, lang) {
            log::warn!("could not save locale: {err}");
        }
    }
}

/// Code of the active language.
#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_bundle_loads_requested_locale() {
        let bundle = build_bundle("en").expect("bundle should load");
        assert_eq!(bundle.lang, "en");
        assert!(bundle.translations.is_object());
        assert!(bundle.fallback.is_object());
    }

    #[test]
    fn unsupported_locale_is_rejected() {
        assert!(build_bundle("klingon").is_none());
    }

    #[test]
    fn defaults_to_japanese() {
        assert_eq!(current_lang(), DEFAULT_LANG);
    }
}
