mod bundle;
mod locales;
mod render;

pub use bundle::{DEFAULT_LANG, I18nBundle, LOCALE_KEY, current_lang, set_lang};
pub use locales::{LocaleMeta, locales};
pub use render::{t, tr};
