use std::fmt;

/// Run-level crawl state machine
///
/// `Running` moves to exactly one stop state (`BudgetExhausted` or
/// `FrontierEmpty`), which then moves to `Done`. Both stop states are normal
/// completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// The main loop is pulling URLs from the frontier
    Running,

    /// The page budget has been spent
    BudgetExhausted,

    /// No URLs are left to fetch
    FrontierEmpty,

    /// Terminal state; results have been collected
    Done,
}

impl CrawlPhase {
    /// Returns true if the phase allows moving to `next`
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Running, Self::BudgetExhausted)
                | (Self::Running, Self::FrontierEmpty)
                | (Self::BudgetExhausted, Self::Done)
                | (Self::FrontierEmpty, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::BudgetExhausted => "budget_exhausted",
            Self::FrontierEmpty => "frontier_empty",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
