use shared::models::{TallySnapshot, Team, VoteFilter};
use tokio::select;
use tracing::debug;

use crate::live::Subscription;
use crate::store::VoteStore;

/// The three count subscriptions behind one viewer.
///
/// Each subscription fires on its own, so a yielded snapshot can briefly mix
/// a fresh total with stale team counts (or the reverse). Dropping the feed
/// unsubscribes all three.
#[derive(Debug)]
pub struct TallyFeed {
    total: Subscription,
    red: Subscription,
    blue: Subscription,
    snapshot: TallySnapshot,
    started: bool,
}

impl TallyFeed {
    pub fn open<S: VoteStore + ?Sized>(store: &S) -> Self {
        Self {
            total: store.subscribe(VoteFilter::All),
            red: store.subscribe(VoteFilter::Team(Team::Red)),
            blue: store.subscribe(VoteFilter::Team(Team::Blue)),
            snapshot: TallySnapshot::default(),
            started: false,
        }
    }

    pub fn snapshot(&self) -> TallySnapshot {
        self.snapshot
    }

    /// First call returns once all three initial counts are in. Later calls
    /// return after whichever count changes next. `None` means the store
    /// went away.
    pub async fn next(&mut self) -> Option<TallySnapshot> {
        if !self.started {
            self.started = true;
            let total = self.total.next().await?;
            let red = self.red.next().await?;
            let blue = self.blue.next().await?;
            self.snapshot = TallySnapshot::new(red, blue, total);
            return Some(self.snapshot);
        }

        let (filter, count) = select! {
            count = self.total.next() => (VoteFilter::All, count?),
            count = self.red.next() => (VoteFilter::Team(Team::Red), count?),
            count = self.blue.next() => (VoteFilter::Team(Team::Blue), count?),
        };
        self.snapshot = self.snapshot.with_count(filter, count);
        debug!(%filter, count, "Tally feed update");
        Some(self.snapshot)
    }

    pub fn close(self) {
        self.total.unsubscribe();
        self.red.unsubscribe();
        self.blue.unsubscribe();
    }
}
