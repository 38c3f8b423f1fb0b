//! Message trait for payload types.

/// A marker trait for payloads that can travel through a registry.
///
/// Payloads must be `Send + 'static` so a registry holding them can be
/// shared across threads.
///
/// # Example
///
/// ```rust,ignore
/// struct SearchShard { entries: Vec<String> }
///
/// impl Message for SearchShard {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + 'static`",
    note = "Payloads handed to a Muster registry must be sendable and static."
)]
pub trait Message: Send + 'static {}

impl Message for () {}
impl Message for bool {}
impl Message for u32 {}
impl Message for u64 {}
impl Message for usize {}
impl Message for i32 {}
impl Message for i64 {}
impl Message for String {}
impl Message for &'static str {}
impl<T: Message> Message for Box<T> {}
impl<T: Message + Sync> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
