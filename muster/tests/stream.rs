use futures::StreamExt;
use muster::{
    FragmentPayload, Registry,
    consumers::{ChannelClosed, channel},
};

mod common;
use common::{arrow_fragment, core_fragment};

#[tokio::test]
async fn test_async_renderer_receives_buffered_then_live() {
    let registry = Registry::<FragmentPayload>::new();
    registry.submit(core_fragment()).unwrap();

    let (consumer, mut stream) = channel();
    registry.install(consumer).unwrap();
    registry.submit(arrow_fragment()).unwrap();

    let first = stream.next().await.unwrap();
    let second = stream.next().await.unwrap();
    assert!(first.contains("polars_core"));
    assert!(second.contains("polars_arrow"));
}

#[tokio::test]
async fn test_dropped_stream_surfaces_as_delivery_error() {
    let registry = Registry::<FragmentPayload>::new();
    let (consumer, stream) = channel();
    registry.install(consumer).unwrap();
    drop(stream);

    let err = registry.submit(core_fragment()).unwrap_err();
    let muster::DeliveryError::Consumer(source) = err;
    assert!(source.downcast_ref::<ChannelClosed>().is_some());
}
