use shared::ActionError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<(), ActionError>>>>;

/// Asynchronous handler passed down as a prop.
///
/// Unlike `yew::Callback`, the caller gets a future back and can await the
/// outcome: `Ok(())` when the work succeeded, `Err` with the failure otherwise.
/// Equality is pointer identity, same as `Callback`.
pub struct AsyncCallback<IN> {
    inner: Rc<dyn Fn(IN) -> HandlerFuture>,
}

impl<IN> AsyncCallback<IN> {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(IN) -> Fut + 'static,
        Fut: Future<Output = Result<(), ActionError>> + 'static,
    {
        Self {
            inner: Rc::new(move |input| Box::pin(handler(input)) as HandlerFuture),
        }
    }

    pub fn call(&self, input: IN) -> HandlerFuture {
        (self.inner)(input)
    }
}

impl<IN> Clone for AsyncCallback<IN> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<IN> PartialEq for AsyncCallback<IN> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<IN> fmt::Debug for AsyncCallback<IN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncCallback<_>")
    }
}
