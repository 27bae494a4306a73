//! Lowest common ancestor of two commits
//!
//! The split point of a merge is the common ancestor closest to both tips.
//!
//! ## Algorithm
//!
//! 1. Breadth-first walk from each tip over both parent edges, recording the
//!    shortest distance from the tip to every ancestor (a commit is its own
//!    ancestor at distance 0).
//! 2. Commits reached from both sides are common ancestors.
//! 3. A common ancestor that is a proper ancestor of another common ancestor
//!    cannot be lowest and is marked STALE.
//! 4. Among the remaining candidates pick the smallest combined distance, then
//!    the smallest larger single-side distance, then the smallest ID.
//!
//! Every step is symmetric in the two tips, so `lca(a, b) == lca(b, a)`.
//!
//! ## Debug Logging
//!
//! Build with `--features debug_merge` to trace the traversal through
//! `tracing` at debug level.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Traversal tracing, compiled in only with the `debug_merge` feature
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b100; // proper ancestor of another common ancestor
        const RESULT = 0b1000; // common ancestor
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Finds the lowest common ancestor of two commits
///
/// The commit loader abstracts over where commits live (object store, cache,
/// in-memory test graph); it is called once per visited commit and side.
pub struct LCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> LCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// The lowest common ancestor of `source` and `target`, or `None` if
    /// their histories are disjoint
    pub fn find_lowest_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let source_distances = self.ancestor_distances(source_commit_id)?;
        let target_distances = self.ancestor_distances(target_commit_id)?;

        let mut ancestors_states = HashMap::<ObjectId, VisitState>::new();
        for oid in source_distances.keys() {
            *ancestors_states.entry(oid.clone()).or_insert(VisitState::NONE) |=
                VisitState::VISITED_FROM_SOURCE;
        }
        for oid in target_distances.keys() {
            *ancestors_states.entry(oid.clone()).or_insert(VisitState::NONE) |=
                VisitState::VISITED_FROM_TARGET;
        }

        let common_ancestors = ancestors_states
            .iter_mut()
            .filter(|(_, state)| state.contains(VisitState::VISITED_FROM_BOTH))
            .map(|(oid, state)| {
                *state |= VisitState::RESULT;
                oid.clone()
            })
            .collect::<Vec<_>>();

        if common_ancestors.is_empty() {
            debug_log!("no common ancestor for {} and {}", source_commit_id, target_commit_id);
            return Ok(None);
        }

        self.mark_stale_ancestors(&common_ancestors, &mut ancestors_states)?;

        debug_log!(
            "ancestor states: {}",
            ancestors_states
                .iter()
                .filter(|(_, state)| state.contains(VisitState::RESULT))
                .map(|(oid, state)| format!("{}: {}", oid.to_short_oid(), state))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let lowest = common_ancestors
            .into_iter()
            .filter(|oid| {
                !ancestors_states
                    .get(oid)
                    .copied()
                    .unwrap_or(VisitState::NONE)
                    .contains(VisitState::STALE)
            })
            .min_by_key(|oid| {
                let source_distance = source_distances.get(oid).copied().unwrap_or(usize::MAX);
                let target_distance = target_distances.get(oid).copied().unwrap_or(usize::MAX);
                (
                    source_distance.saturating_add(target_distance),
                    source_distance.max(target_distance),
                    oid.clone(),
                )
            });

        debug_log!("lowest common ancestor: {:?}", lowest);

        Ok(lowest)
    }

    /// Shortest distance from `tip` to each of its ancestors, `tip` included
    fn ancestor_distances(&self, tip: &ObjectId) -> anyhow::Result<HashMap<ObjectId, usize>> {
        let mut distances = HashMap::from([(tip.clone(), 0)]);
        let mut queue = VecDeque::from([(tip.clone(), 0usize)]);

        while let Some((commit_id, distance)) = queue.pop_front() {
            let commit = (self.commit_loader)(&commit_id)?;

            for parent_id in commit.parents {
                if !distances.contains_key(&parent_id) {
                    distances.insert(parent_id.clone(), distance + 1);
                    queue.push_back((parent_id, distance + 1));
                }
            }
        }

        Ok(distances)
    }

    /// Mark every common ancestor that is reachable from another one
    fn mark_stale_ancestors(
        &self,
        common_ancestors: &[ObjectId],
        ancestors_states: &mut HashMap<ObjectId, VisitState>,
    ) -> anyhow::Result<()> {
        // a commit in `walked` is a proper ancestor of some common ancestor,
        // and so are all of its own ancestors
        let mut walked = HashSet::<ObjectId>::new();

        for common_ancestor in common_ancestors {
            let mut queue = (self.commit_loader)(common_ancestor)?
                .parents
                .into_iter()
                .collect::<VecDeque<_>>();

            while let Some(commit_id) = queue.pop_front() {
                if !walked.insert(commit_id.clone()) {
                    continue;
                }

                if let Some(state) = ancestors_states.get_mut(&commit_id)
                    && state.contains(VisitState::RESULT)
                {
                    debug_log!("{} is stale", commit_id.to_short_oid());
                    *state |= VisitState::STALE;
                }

                queue.extend((self.commit_loader)(&commit_id)?.parents);
            }
        }

        Ok(())
    }
}
