use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub fn hash_object(&mut self, file_name: &str, write: bool) -> anyhow::Result<()> {
        let blob = self.workspace().parse_blob(file_name)?;
        let object_id = blob.object_id()?;

        writeln!(self.writer(), "{}", object_id)?;

        // store as a compressed object file only when asked to
        if !write {
            return Ok(());
        }

        self.database().store(&blob)?;

        Ok(())
    }
}
