use futures::executor::block_on;
use miyabi_core::{Catalog, Checkpoint, FortuneResult};
use miyabi_web::app::App;
use miyabi_web::components::ui::{
    CheckpointDetail, FortuneCard, LoadingOverlay, StampAction, checkpoint_detail, fortune_result,
    stamp_action,
};
use yew::{Callback, LocalServerRenderer};

fn checkpoint(id: u32) -> Checkpoint {
    Catalog::load_from_static()
        .expect("bundled catalog")
        .checkpoint(id)
        .cloned()
        .expect("checkpoint exists")
}

#[test]
fn app_opens_on_intro() {
    let html = block_on(LocalServerRenderer::<App>::new().render());
    assert!(html.contains("data-testid=\"intro-screen\""));
    assert!(html.contains("START"));
    assert!(!html.contains("aria-label=\"メインナビゲーション\""));
    assert!(html.contains("id=\"rally-status\""));
}

#[test]
fn detail_sheet_lists_contact_rows() {
    let cp = checkpoint(1);
    let props = checkpoint_detail::Props {
        checkpoint: cp.clone(),
        stamped: false,
        on_close: Callback::noop(),
        on_open_map: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<CheckpointDetail>::with_props(props).render());
    assert!(html.contains("SPOT 01"));
    for label in ["住所", "営業時間", "電話番号", "マップで見る"] {
        assert!(html.contains(label), "missing {label}");
    }
    assert!(html.contains(&cp.address));
    assert!(!html.contains("獲得済み"));
}

#[test]
fn detail_sheet_marks_collected_spots() {
    let props = checkpoint_detail::Props {
        checkpoint: checkpoint(2),
        stamped: true,
        on_close: Callback::noop(),
        on_open_map: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<CheckpointDetail>::with_props(props).render());
    assert!(html.contains("SPOT 02"));
    assert!(html.contains("獲得済み"));
}

#[test]
fn stamp_action_waits_for_tap() {
    let cp = checkpoint(4);
    let props = stamp_action::Props {
        checkpoint: cp.clone(),
        on_stamp: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<StampAction>::with_props(props).render());
    assert!(html.contains("CHECKPOINT FOUND"));
    assert!(html.contains(&cp.name));
    assert!(html.contains("TAP TO STAMP"));
    assert!(!html.contains("祝・到達"));
}

#[test]
fn fortune_card_spells_out_text() {
    let props = fortune_result::Props {
        result: FortuneResult {
            text: "大吉".into(),
            checkpoint: checkpoint(1),
        },
        on_close: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<FortuneCard>::with_props(props).render());
    assert!(html.contains("Celebration"));
    assert!(html.contains("aria-label=\"大吉\""));
    assert_eq!(html.matches("class=\"animate-letter\"").count(), 2);
    assert!(html.contains("閉じる"));
}

#[test]
fn loading_overlay_reads_fortune() {
    let html = block_on(LocalServerRenderer::<LoadingOverlay>::new().render());
    assert!(html.contains("運勢を読み解き中..."));
    assert!(html.contains("role=\"status\""));
}
