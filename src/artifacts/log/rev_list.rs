use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Lazy first-parent history, newest first
///
/// Merge commits contribute only their first parent, so the walk always ends
/// at the root commit after a finite number of steps.
pub struct RevList<'r> {
    repository: &'r Repository,
    next_oid: Option<ObjectId>,
}

impl<'r> RevList<'r> {
    pub fn starting_at(repository: &'r Repository, oid: ObjectId) -> Self {
        RevList {
            repository,
            next_oid: Some(oid),
        }
    }

    pub fn from_revision(repository: &'r Repository, revision: &Revision) -> anyhow::Result<Self> {
        let oid = revision.resolve(repository)?;

        Ok(Self::starting_at(repository, oid))
    }
}

impl Iterator for RevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next_oid.take()?;

        // a missing commit is yielded once and ends the walk
        let commit = match self.repository.database().load_commit(&oid) {
            Ok(commit) => commit,
            Err(error) => return Some(Err(error)),
        };
        self.next_oid = commit.parent().cloned();

        Some(Ok((oid, commit)))
    }
}
