use crate::areas::repository::Repository;
use crate::artifacts::core::errors::StateError;

impl Repository {
    /// Pretty-print the object whose ID starts with `object_id`
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        let candidates = self.database().find_objects_by_prefix(object_id)?;

        let object_id = match candidates.as_slice() {
            [] => return Err(StateError::NoSuchCommit(object_id.to_string()).into()),
            [object_id] => object_id.clone(),
            _ => {
                return Err(StateError::AmbiguousCommit {
                    prefix: object_id.to_string(),
                    candidates: candidates.iter().map(ToString::to_string).collect(),
                }
                .into());
            }
        };

        let object = self.database().parse_object(&object_id)?;
        tracing::debug!(oid = %object_id, object_type = %object.object_type(), "printing object");
        write!(self.writer(), "{}", object.display())?;

        Ok(())
    }
}
