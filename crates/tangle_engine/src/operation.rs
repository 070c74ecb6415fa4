//! Operations: first-class `(value) -> LaTeX` renderers.

use std::fmt;
use std::sync::Arc;

use crate::random::RandomSource;
use crate::representations::same_number;

pub type RenderFn = dyn Fn(u64, &mut dyn RandomSource) -> String + Send + Sync;

/// One way of writing an integer as a LaTeX fragment.
///
/// Cloning is cheap (shared closure), and the name is carried along for
/// logging and tests.
#[derive(Clone)]
pub struct Operation {
    name: &'static str,
    render: Arc<RenderFn>,
}

impl Operation {
    pub fn new<F>(name: &'static str, render: F) -> Self
    where
        F: Fn(u64, &mut dyn RandomSource) -> String + Send + Sync + 'static,
    {
        Self {
            name,
            render: Arc::new(render),
        }
    }

    /// The literal decimal rendering.
    pub fn identity() -> Self {
        Self::new(IDENTITY, |n, _| same_number(n))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn render(&self, n: u64, rng: &mut dyn RandomSource) -> String {
        (self.render)(n, rng)
    }

    /// Returns a new operation that post-processes this one's output.
    pub fn map<F>(self, post: F) -> Self
    where
        F: Fn(String, &mut dyn RandomSource) -> String + Send + Sync + 'static,
    {
        let name = self.name;
        Self::new(name, move |n, rng| {
            let rendered = self.render(n, rng);
            post(rendered, rng)
        })
    }
}

pub const IDENTITY: &str = "same_number";

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Operation").field(&self.name).finish()
    }
}
