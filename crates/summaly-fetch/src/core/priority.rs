/// The winning content of a prioritized reduction and the priority it won at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrioritizedValue<T> {
    content: T,
    priority: u8,
}

impl<T> PrioritizedValue<T> {
    pub fn new(priority: u8, content: T) -> Self {
        Self { content, priority }
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn into_content(self) -> T {
        self.content
    }

    /// Fold one candidate into the current best.
    ///
    /// An absent candidate never displaces anything. A present one wins if
    /// its priority is at least the current priority, so equal priorities
    /// resolve to the later candidate.
    #[must_use]
    pub fn offer(current: Option<Self>, priority: u8, content: Option<T>) -> Option<Self> {
        match (current, content) {
            (Some(best), Some(_)) if priority < best.priority => Some(best),
            (_, Some(content)) => Some(Self::new(priority, content)),
            (best, None) => best,
        }
    }

    /// Reduce an ordered list of `(priority, content)` candidates.
    ///
    /// Returns the highest-priority present candidate; ties go to the last
    /// one in iteration order. `None` if every candidate is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use summaly_fetch::PrioritizedValue;
    ///
    /// let best = PrioritizedValue::reduce([
    ///     (1, Some("header")),
    ///     (3, None),
    ///     (2, Some("first")),
    ///     (2, Some("second")),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(*best.content(), "second");
    /// assert_eq!(best.priority(), 2);
    /// ```
    pub fn reduce<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = (u8, Option<T>)>,
    {
        candidates
            .into_iter()
            .fold(None, |best, (priority, content)| Self::offer(best, priority, content))
    }
}
