use crate::areas::repository::Repository;
use crate::artifacts::branch::REF_ALIASES;
use crate::artifacts::core::errors::StateError;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;

/// A way of naming a commit on the command line
///
/// - `HEAD` (or its alias `@`): the current commit
/// - a full 40-character commit ID
/// - an abbreviated commit ID: any non-empty hex prefix naming exactly one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Head,
    CommitId(String),
}

impl Revision {
    pub fn parse(revision: &str) -> Revision {
        let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);

        if resolved_name == "HEAD" {
            Revision::Head
        } else {
            Revision::CommitId(resolved_name.to_string())
        }
    }

    /// Resolve to the ID of an existing commit
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Head => repository.refs().read_head(),
            Revision::CommitId(id) => Self::resolve_oid(id, repository),
        }
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        if oid_str.is_empty()
            || oid_str.len() > OBJECT_ID_LENGTH
            || !oid_str.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(StateError::NoSuchCommit(oid_str.to_string()).into());
        }

        if oid_str.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(oid_str.to_string())?;
            return if Self::is_commit(&oid, repository) {
                Ok(oid)
            } else {
                Err(StateError::NoSuchCommit(oid_str.to_string()).into())
            };
        }

        let mut commit_matches = repository
            .database()
            .find_objects_by_prefix(oid_str)?
            .into_iter()
            .filter(|oid| Self::is_commit(oid, repository))
            .collect::<Vec<_>>();

        match commit_matches.len() {
            0 => Err(StateError::NoSuchCommit(oid_str.to_string()).into()),
            1 => Ok(commit_matches.remove(0)),
            _ => Err(StateError::AmbiguousCommit {
                prefix: oid_str.to_string(),
                candidates: commit_matches
                    .iter()
                    .map(|oid| oid.to_short_oid())
                    .collect(),
            }
            .into()),
        }
    }

    fn is_commit(oid: &ObjectId, repository: &Repository) -> bool {
        repository.database().exists(oid)
            && repository
                .database()
                .get_object_type(oid)
                .map(|object_type| object_type == ObjectType::Commit)
                .unwrap_or(false)
    }
}
