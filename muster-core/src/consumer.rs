//! # Consumer
//!
//! The receiving end of a registry. A consumer is installed once and is then
//! handed every payload the registry has seen, each as a discrete unit.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|payload: FragmentPayload| { ... }`
//! 2. **Fallible closure**: `|payload: FragmentPayload| -> Result<(), MyError> { ... }`
//! 3. **Struct implementation**: `impl Consumer<FragmentPayload> for MyIndex`

use crate::{error::BoxError, message::Message};

/// Conversion of a consumer's return value into a delivery result.
///
/// # Default Implementations
///
/// - `()` → delivered
/// - `Result<(), E>` → delivered, or the error boxed
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid consumer return type",
    label = "consumers must return `()` or `Result<(), E>`",
    note = "The error type of a fallible consumer must convert into `BoxError`."
)]
pub trait IntoConsumeResult {
    /// Convert the output into a delivery result.
    fn into_consume_result(self) -> Result<(), BoxError>;
}

impl IntoConsumeResult for () {
    fn into_consume_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoConsumeResult for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_consume_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

/// The single subscriber a registry delivers payloads to.
///
/// Consumers take `&self`: a registry may call them from whichever thread
/// triggered a delivery, so any state they accumulate lives behind interior
/// mutability.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot consume payloads of type `{P}`",
    label = "missing `Consumer<{P}>` implementation",
    note = "Implement `Consumer<{P}>` or pass a closure `Fn({P})`."
)]
pub trait Consumer<P: Message>: Send + Sync + 'static {
    /// Receive one payload.
    fn consume(&self, payload: P) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<P, F, R> Consumer<P> for F
where
    P: Message,
    F: Fn(P) -> R + Send + Sync + 'static,
    R: IntoConsumeResult,
{
    fn consume(&self, payload: P) -> Result<(), BoxError> {
        (self)(payload).into_consume_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_unit_closure_is_consumer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let consumer = move |payload: String| sink.lock().unwrap().push(payload);

        consumer.consume("first".to_string()).unwrap();
        consumer.consume("second".to_string()).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_fallible_closure_boxes_error() {
        let consumer = |payload: String| -> Result<(), std::io::Error> {
            if payload.is_empty() {
                Err(std::io::Error::other("empty payload"))
            } else {
                Ok(())
            }
        };

        assert!(consumer.consume("ok".to_string()).is_ok());
        let err = consumer.consume(String::new()).unwrap_err();
        assert_eq!(err.to_string(), "empty payload");
    }

    #[test]
    fn test_trait_object() {
        let consumer: Box<dyn Consumer<String>> = Box::new(|_payload: String| {});
        assert!(consumer.consume("boxed".to_string()).is_ok());
    }
}
