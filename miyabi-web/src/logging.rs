//! `log` backend that writes to the browser console.
use log::{Level, Log, Metadata, Record};

struct ConsoleLogger {
    max: Level,
}

static LOGGER: ConsoleLogger = ConsoleLogger {
    max: if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    },
};

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        #[cfg(target_arch = "wasm32")]
        {
            let msg = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::info_1(&msg),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!(
        "[{} {}] {}",
        record.level(),
        record.target(),
        record.args()
    )
}

/// Install the console logger. Later calls are no-ops.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LOGGER.max.to_level_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_carry_level_and_target() {
        let line = format_record(
            &Record::builder()
                .level(Level::Warn)
                .target("miyabi_web::storage")
                .args(format_args!("quota exceeded"))
                .build(),
        );
        assert_eq!(line, "[WARN miyabi_web::storage] quota exceeded");
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        assert!(log::max_level() >= log::LevelFilter::Info);
    }
}
