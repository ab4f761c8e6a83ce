use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence number attached to every dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Decides which completions may overwrite the visible outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionPolicy {
    /// Every completion overwrites the slot, so the last one to finish is shown.
    #[default]
    LastCompletion,
    /// Only the completion of the most recent dispatch is applied.
    LatestDispatch,
}

/// Single outcome slot shared by a controller's dispatches.
#[derive(Debug, Clone)]
pub struct OutcomeSlot<O> {
    outcome: O,
    latest: RequestToken,
    policy: CompletionPolicy,
}

impl<O: Default> OutcomeSlot<O> {
    pub fn new(policy: CompletionPolicy) -> Self {
        Self {
            outcome: O::default(),
            latest: RequestToken::default(),
            policy,
        }
    }
}

impl<O> OutcomeSlot<O> {
    pub fn outcome(&self) -> &O {
        &self.outcome
    }

    pub fn latest(&self) -> RequestToken {
        self.latest
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    /// Issues the next token and shows `pending` straight away.
    pub fn begin(&mut self, pending: O) -> RequestToken {
        self.latest = RequestToken(self.latest.0 + 1);
        self.outcome = pending;
        self.latest
    }

    /// Overwrites the outcome without issuing a request.
    pub fn replace(&mut self, outcome: O) {
        self.outcome = outcome;
    }

    /// Applies a completion if the policy allows it. Returns whether it was applied.
    pub fn settle(&mut self, token: RequestToken, outcome: O) -> bool {
        let accepted = match self.policy {
            CompletionPolicy::LastCompletion => true,
            CompletionPolicy::LatestDispatch => token == self.latest,
        };
        if accepted {
            self.outcome = outcome;
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase_per_dispatch() {
        let mut slot: OutcomeSlot<u8> = OutcomeSlot::new(CompletionPolicy::LastCompletion);
        let first = slot.begin(1);
        let second = slot.begin(2);
        assert!(second > first);
        assert_eq!(slot.latest(), second);
        assert_eq!(*slot.outcome(), 2);
    }

    #[test]
    fn last_completion_applies_stale_tokens() {
        let mut slot: OutcomeSlot<u8> = OutcomeSlot::new(CompletionPolicy::LastCompletion);
        let first = slot.begin(0);
        let second = slot.begin(0);
        assert!(slot.settle(second, 2));
        assert!(slot.settle(first, 1));
        assert_eq!(*slot.outcome(), 1);
    }

    #[test]
    fn latest_dispatch_discards_stale_tokens() {
        let mut slot: OutcomeSlot<u8> = OutcomeSlot::new(CompletionPolicy::LatestDispatch);
        let first = slot.begin(0);
        let second = slot.begin(0);
        assert!(slot.settle(second, 2));
        assert!(!slot.settle(first, 1));
        assert_eq!(*slot.outcome(), 2);
    }
}
