/// Why a working file blocks a checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConflictType {
    /// The target commit would write over an untracked file
    UntrackedOverwritten,
    /// The target commit would delete a file that is untracked
    UntrackedRemoved,
}

impl ConflictType {
    pub fn get_conflict_type(target_tracks_file: bool) -> ConflictType {
        if target_tracks_file {
            ConflictType::UntrackedOverwritten
        } else {
            ConflictType::UntrackedRemoved
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConflictType::UntrackedOverwritten => "untracked file would be overwritten",
            ConflictType::UntrackedRemoved => "untracked file would be removed",
        }
    }
}
