//! Ordered fallback chain.
//!
//! A list of named constructors tried in priority order. The first success wins and
//! later constructors are never invoked. If every constructor fails, all failures are
//! returned in order so the caller can report each tier.

/// One failed attempt: tier label plus its error.
#[derive(Debug)]
pub struct Attempt<E> {
    pub label: &'static str,
    pub error: E,
}

/// Result of a successful chain run.
#[derive(Debug)]
pub struct Chosen<T> {
    pub index: usize,
    pub label: &'static str,
    pub value: T,
}

type Step<'a, T, E> = (&'static str, Box<dyn FnOnce() -> Result<T, E> + 'a>);

pub struct FallbackChain<'a, T, E> {
    steps: Vec<Step<'a, T, E>>,
}

impl<'a, T, E> Default for FallbackChain<'a, T, E> {
    fn default() -> Self { Self { steps: Vec::new() } }
}

impl<'a, T, E> FallbackChain<'a, T, E> {
    pub fn new() -> Self { Self::default() }

    pub fn then(mut self, label: &'static str, step: impl FnOnce() -> Result<T, E> + 'a) -> Self {
        self.steps.push((label, Box::new(step)));
        self
    }

    /// Run steps in order. `on_fail` sees each failure as it happens.
    pub fn run_with(self, mut on_fail: impl FnMut(&Attempt<E>)) -> Result<Chosen<T>, Vec<Attempt<E>>> {
        let mut failures = Vec::with_capacity(self.steps.len());
        for (index, (label, step)) in self.steps.into_iter().enumerate() {
            match step() {
                Ok(value) => return Ok(Chosen { index, label, value }),
                Err(error) => {
                    let attempt = Attempt { label, error };
                    on_fail(&attempt);
                    failures.push(attempt);
                }
            }
        }
        Err(failures)
    }

    pub fn run(self) -> Result<Chosen<T>, Vec<Attempt<E>>> { self.run_with(|_| {}) }
}
