use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::tree_at;
use crate::artifacts::diff::tree_diff::TreeDiff;
use crate::artifacts::objects::change::Change;
use crate::error::Result;

impl Repository {
    /// Changes turning the tree at `from` into the tree at `to`
    ///
    /// A missing `from` is the empty tree, a missing `to` is HEAD.
    pub fn diff(&self, from: Option<&str>, to: Option<&str>) -> Result<Vec<Change>> {
        let from = from.map(|rev| self.resolve_revision(rev)).transpose()?;
        let to = match to {
            Some(rev) => self.resolve_revision(rev)?,
            None => self.head()?,
        };

        let old = tree_at(&self.database, from.as_ref())?;
        let new = tree_at(&self.database, Some(&to))?;
        Ok(TreeDiff::new(&old, &new).changes())
    }

    /// Staged changes relative to HEAD, in `(locale, key)` order
    pub fn diff_staged(&self) -> Result<Vec<Change>> {
        let head = self.head_tree()?;
        Ok(TreeDiff::new(&head, &self.working_tree).changes())
    }
}
