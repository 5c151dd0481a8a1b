#![cfg(target_arch = "wasm32")]

use complexwonder_compute::Plotter;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn plotter_builds_on_first_tick() {
    let mut plotter = Plotter::new("default", 40, 30).unwrap();
    assert!(plotter.tick());
    assert!(!plotter.tick());
    assert_eq!(plotter.vertex_count(), 8 * 6 * 6);
    assert_eq!(plotter.positions().length(), plotter.vertex_count() * 2);
    assert_eq!(plotter.colors().length(), plotter.vertex_count() * 4);
}

#[wasm_bindgen_test]
fn plotter_rejects_bad_expression() {
    let mut plotter = Plotter::new("default", 40, 30).unwrap();
    assert!(plotter.commit_expression("z+*2").is_err());
    assert_eq!(plotter.expression(), "z");
    assert!(plotter.commit_expression("z^2").is_ok());
    assert_eq!(plotter.expression(), "z^2");
}

#[wasm_bindgen_test]
fn plotter_dispatches_json_events() {
    let mut plotter = Plotter::new("wide", 40, 30).unwrap();
    plotter.tick();
    plotter
        .dispatch(r#"{"type":"Zoom","factor":2.0}"#)
        .unwrap();
    assert!(plotter.tick());
    assert!(plotter.dispatch(r#"{"type":"Zoom","factor":0}"#).is_err());
}

#[wasm_bindgen_test]
fn unknown_config_is_an_error() {
    assert!(Plotter::new("nope", 10, 10).is_err());
}

#[wasm_bindgen_test]
fn oversized_canvas_is_an_error() {
    assert!(Plotter::new("default", u32::MAX, u32::MAX).is_err());
    let mut plotter = Plotter::new("default", 40, 30).unwrap();
    assert!(plotter.resize(u32::MAX, u32::MAX).is_err());
    assert!(plotter.resize(80, 60).is_ok());
}
