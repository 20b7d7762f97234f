use futures::executor::block_on;
use miyabi_core::{Catalog, StampSet};
use miyabi_web::pages::{
    intro::{IntroPage, IntroPageProps},
    locations::{LocationsPage, LocationsPageProps},
    prizes::{PrizesPage, PrizesPageProps},
    scanner::{ScannerPage, ScannerPageProps},
    stamp_book::{StampBookPage, StampBookPageProps},
};
use std::rc::Rc;
use yew::{Callback, LocalServerRenderer};

fn catalog() -> Rc<Catalog> {
    Rc::new(Catalog::load_from_static().expect("bundled catalog"))
}

fn stamps(ids: &[u32]) -> StampSet {
    ids.iter().copied().collect()
}

#[test]
fn intro_page_shows_shop_and_start() {
    let html = block_on(
        LocalServerRenderer::<IntroPage>::with_props(IntroPageProps {
            on_start: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("美容室オークラ"));
    assert!(html.contains("これからもよろしくスタンプラリー"));
    assert!(html.contains("START"));
}

#[test]
fn stamp_book_seals_only_collected_tiles() {
    let props = StampBookPageProps {
        catalog: catalog(),
        stamps: stamps(&[1, 5]),
        on_select: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<StampBookPage>::with_props(props).render());
    assert_eq!(html.matches("data-stamped=\"true\"").count(), 2);
    assert_eq!(html.matches("data-stamped=\"false\"").count(), 10);
    assert_eq!(html.matches("祝・到達").count(), 2);
    assert_eq!(html.matches(">未押印<").count(), 10);
    assert!(!html.contains("Collect<"));
    assert!(html.contains("aria-valuenow=\"2\""));
    assert!(html.contains("aria-valuemax=\"12\""));
    assert!(html.contains(">01<"));
    assert!(html.contains(">12<"));
}

#[test]
fn locations_list_every_spot_with_check_marks() {
    let props = LocationsPageProps {
        catalog: catalog(),
        stamps: stamps(&[3]),
        on_select: Callback::noop(),
        on_open_map: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LocationsPage>::with_props(props).render());
    assert!(html.contains("スポット一覧"));
    assert!(html.contains("全12箇所"));
    assert_eq!(html.matches("data-testid=\"stamped-check\"").count(), 1);
    assert_eq!(html.matches("grayscale").count(), 11);
    assert!(html.contains("#03"));
}

#[test]
fn prizes_lock_until_threshold() {
    let props = PrizesPageProps {
        catalog: catalog(),
        stamps: stamps(&[1, 2, 3]),
    };
    let html = block_on(LocalServerRenderer::<PrizesPage>::with_props(props).render());
    assert_eq!(html.matches("data-locked=\"false\"").count(), 1);
    assert_eq!(html.matches("LOCKED").count(), 3);
    assert_eq!(html.matches("景品と交換する").count(), 1);
    assert_eq!(html.matches("スタンプを集めて交換").count(), 3);
    for remaining in ["あと 0個", "あと 3個", "あと 6個", "あと 9個"] {
        assert!(html.contains(remaining), "missing {remaining}");
    }
}

#[test]
fn scanner_shows_hint_and_demo_button() {
    let idle = block_on(
        LocalServerRenderer::<ScannerPage>::with_props(ScannerPageProps {
            scanning: false,
            on_scan: Callback::noop(),
            on_close: Callback::noop(),
        })
        .render(),
    );
    assert!(idle.contains("QRコードをフレームに合わせてください"));
    assert!(idle.contains("デモスキャン実行"));
    assert!(idle.contains("<video"));

    let busy = block_on(
        LocalServerRenderer::<ScannerPage>::with_props(ScannerPageProps {
            scanning: true,
            on_scan: Callback::noop(),
            on_close: Callback::noop(),
        })
        .render(),
    );
    assert!(busy.contains("読み取り中..."));
    assert!(busy.contains("aria-busy=\"true\""));
}

#[test]
fn pages_follow_english_locale() {
    miyabi_web::i18n::set_lang("en");
    let props = LocationsPageProps {
        catalog: catalog(),
        stamps: StampSet::new(),
        on_select: Callback::noop(),
        on_open_map: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LocationsPage>::with_props(props).render());
    assert!(html.contains("12 spots"));
}
