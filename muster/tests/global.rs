//! A process-wide registry placed in a static by the caller.

use lazy_static::lazy_static;
use muster::{FragmentPayload, Registry, testing::RecordingConsumer};
use std::thread;

mod common;
use common::{arrow_fragment, core_fragment, utils_fragment};

lazy_static! {
    static ref PAGE: Registry<FragmentPayload> = Registry::builder()
        .name("page")
        .capacity(3)
        .build();
}

#[test]
fn test_fragments_from_threads_converge_on_static_registry() {
    let loaders: Vec<_> = [core_fragment, arrow_fragment, utils_fragment]
        .into_iter()
        .map(|build| thread::spawn(move || PAGE.submit(build()).unwrap()))
        .collect();

    let recorder = RecordingConsumer::new();
    PAGE.install(recorder.clone()).unwrap();

    for loader in loaders {
        loader.join().unwrap();
    }

    let mut groups: Vec<String> = recorder
        .payloads()
        .iter()
        .flat_map(|p: &FragmentPayload| p.keys().map(ToString::to_string).collect::<Vec<_>>())
        .collect();
    groups.sort();
    assert_eq!(
        groups,
        vec![
            "polars_arrow",
            "polars_compute",
            "polars_core",
            "polars_utils"
        ]
    );
    assert_eq!(PAGE.delivered(), 3);
    assert!(PAGE.install(RecordingConsumer::new()).is_err());
}
