use shared::models::{TallySnapshot, Team, VoteFilter};
use tokio::sync::watch;
use tracing::debug;

/// One watch channel per filter. Each channel carries the size of the
/// matching record set and only wakes subscribers when that size changes.
#[derive(Debug)]
pub struct LiveCounts {
    all: watch::Sender<u64>,
    red: watch::Sender<u64>,
    blue: watch::Sender<u64>,
}

impl Default for LiveCounts {
    fn default() -> Self {
        Self::new(TallySnapshot::default())
    }
}

impl LiveCounts {
    pub fn new(initial: TallySnapshot) -> Self {
        let (all, _) = watch::channel(initial.total_count);
        let (red, _) = watch::channel(initial.red_count);
        let (blue, _) = watch::channel(initial.blue_count);
        Self { all, red, blue }
    }

    fn sender(&self, filter: VoteFilter) -> &watch::Sender<u64> {
        match filter {
            VoteFilter::All => &self.all,
            VoteFilter::Team(Team::Red) => &self.red,
            VoteFilter::Team(Team::Blue) => &self.blue,
        }
    }

    /// Pushes fresh counts to every channel whose value grew.
    ///
    /// Votes are append-only, so a count lower than the one already published
    /// comes from a read that finished late and is ignored.
    pub fn publish(&self, counts: TallySnapshot) {
        for filter in VoteFilter::ALL {
            let count = counts.count(filter);
            let changed = self.sender(filter).send_if_modified(|current| {
                if count <= *current {
                    return false;
                }
                *current = count;
                true
            });
            if changed {
                debug!(%filter, count, "Live count changed");
            }
        }
    }

    pub fn current(&self) -> TallySnapshot {
        VoteFilter::ALL
            .into_iter()
            .fold(TallySnapshot::default(), |snapshot, filter| {
                snapshot.with_count(filter, *self.sender(filter).borrow())
            })
    }

    pub fn subscribe(&self, filter: VoteFilter) -> Subscription {
        Subscription {
            filter,
            rx: self.sender(filter).subscribe(),
            primed: false,
        }
    }

    /// Live subscriptions across all three filters.
    pub fn subscriber_count(&self) -> usize {
        VoteFilter::ALL
            .into_iter()
            .map(|filter| self.sender(filter).receiver_count())
            .sum()
    }
}

/// A standing count query. Yields the current size first, then every change.
/// Dropping the handle unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    filter: VoteFilter,
    rx: watch::Receiver<u64>,
    primed: bool,
}

impl Subscription {
    pub fn filter(&self) -> VoteFilter {
        self.filter
    }

    /// Next count for this filter, or `None` once the store has shut down.
    ///
    /// Cancel safe: it can sit in a `select!` next to other subscriptions.
    pub async fn next(&mut self) -> Option<u64> {
        if !self.primed {
            self.primed = true;
            return Some(*self.rx.borrow_and_update());
        }
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    pub fn unsubscribe(self) {
        debug!(filter = %self.filter, "Unsubscribed");
    }
}
