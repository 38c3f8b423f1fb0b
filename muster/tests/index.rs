use muster::{FragmentPayload, ImplementorIndex, LoggingConsumer, Registry, TracingConsumer};

mod common;
use common::{core_fragment, markup, payload};

#[test]
fn test_index_appends_same_group_across_fragments() {
    let registry = Registry::<FragmentPayload>::new();
    let index = ImplementorIndex::new();

    registry.submit(core_fragment()).unwrap();
    registry.install(index.clone()).unwrap();
    registry
        .submit(payload(&[("polars_core", &["impl Deref for ChunkedArray<T>"])]))
        .unwrap();

    let merged = index.group("polars_core").unwrap();
    assert_eq!(
        markup(&merged),
        vec![
            "impl Deref for GroupPositions",
            "impl Deref for Series",
            "impl<K, T> Deref for Logical<K, T>",
            "impl Deref for ChunkedArray<T>",
        ]
    );
    assert_eq!(index.payloads_received(), 2);
}

#[test]
fn test_wrapped_index_still_receives_everything() {
    let registry = Registry::<FragmentPayload>::builder()
        .name("wrapped")
        .capacity(2)
        .build();
    let index = ImplementorIndex::new();

    registry.submit(core_fragment()).unwrap();
    registry
        .install(TracingConsumer::new(
            LoggingConsumer::named("deref-index", index.clone()),
            "wrapped",
        ))
        .unwrap();
    registry
        .submit(payload(&[("polars_ops", &["impl Deref for Wrap<T>"])]))
        .unwrap();

    let groups: Vec<String> = index.groups().iter().map(ToString::to_string).collect();
    assert_eq!(groups, vec!["polars_core", "polars_ops"]);
}
