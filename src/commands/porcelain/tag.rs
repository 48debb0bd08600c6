use crate::areas::refs::Tag;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};
use crate::events::Event;

#[derive(Debug, Clone, Default)]
pub struct TagOptions {
    /// Revision to tag; defaults to HEAD
    pub target: Option<String>,
    pub message: Option<String>,
    pub signed: bool,
}

impl Repository {
    /// Create an immutable tag, returning the tagged commit
    pub fn tag(&mut self, name: &str, options: TagOptions) -> Result<ObjectId> {
        let tag_name = Self::parse_branch_name(name)?;
        if self.refs.tag(&tag_name).is_some() {
            return Err(VcsError::DuplicateTag(name.to_string()));
        }

        let commit = match options.target.as_deref() {
            Some(target) => self.resolve_revision(target)?,
            None => self.head()?,
        };

        let timestamp = self.now();
        self.refs.create_tag(Tag::new(
            tag_name,
            commit.clone(),
            self.config.author.clone(),
            timestamp,
            options.message,
            options.signed,
        ))?;

        tracing::info!(tag = name, commit = %commit.to_short_oid(), "created tag");
        self.emit(Event::TagCreate {
            name: name.to_string(),
            commit: commit.clone(),
        });
        Ok(commit)
    }

    pub fn tags(&self) -> Vec<&Tag> {
        self.refs.tags().collect()
    }
}
