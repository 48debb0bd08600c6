use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, Utc};
use derive_new::new;

/// Walks a commit's parent chain, newest first
#[derive(Clone, new)]
pub struct RevList<'d> {
    database: &'d Database,
    current_commit_oid: Option<ObjectId>,
}

impl<'d> RevList<'d> {
    pub fn starting_at(database: &'d Database, start: &ObjectId) -> Self {
        Self::new(database, Some(start.clone()))
    }

    /// Commits from the start back to `stop` (exclusive), newest first
    pub fn until(self, stop: Option<&ObjectId>) -> impl Iterator<Item = &'d Commit> {
        let stop = stop.cloned();
        self.take_while(move |commit| Some(commit.hash()) != stop.as_ref())
    }
}

impl<'d> Iterator for RevList<'d> {
    type Item = &'d Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        // a missing commit ends the walk
        let commit = self.database.load(&commit_oid)?;
        self.current_commit_oid = commit.parent().cloned();
        Some(commit)
    }
}

/// Commit filter for `log`
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub since: Option<DateTime<Utc>>,
    pub author: Option<String>,
}

impl LogFilter {
    /// `author` matches either the author name or the email
    pub fn matches(&self, commit: &Commit) -> bool {
        let recent_enough = self.since.is_none_or(|since| commit.timestamp() >= since);
        let by_author = self.author.as_deref().is_none_or(|author| {
            commit.author().name() == author || commit.author().email() == author
        });

        recent_enough && by_author
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::working_tree::WorkingTree;
    use crate::artifacts::objects::commit::Author;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn store_chain(database: &mut Database, authors: &[&str]) -> Vec<ObjectId> {
        let mut chain: Vec<ObjectId> = Vec::new();
        for (i, name) in authors.iter().enumerate() {
            let author = Author::new(
                name.to_string(),
                format!("{name}@example.com"),
                DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(i as i64),
            );
            let commit = Commit::new(
                chain.last().cloned(),
                author,
                format!("commit {i}"),
                vec![],
                WorkingTree::new().tree_hash(),
            );
            chain.push(database.store(commit));
        }
        chain
    }

    #[test]
    fn walks_newest_first_to_the_root() {
        let mut database = Database::new();
        let chain = store_chain(&mut database, &["ada", "ada", "grace"]);

        let walked = RevList::starting_at(&database, &chain[2])
            .map(|c| c.hash().clone())
            .collect::<Vec<_>>();
        assert_eq!(walked, vec![chain[2].clone(), chain[1].clone(), chain[0].clone()]);
    }

    #[test]
    fn stops_before_the_given_commit() {
        let mut database = Database::new();
        let chain = store_chain(&mut database, &["ada", "ada", "grace"]);

        let walked = RevList::starting_at(&database, &chain[2]).until(Some(&chain[0])).count();
        assert_eq!(walked, 2);
    }

    #[test]
    fn filters_by_author_and_time() {
        let mut database = Database::new();
        let chain = store_chain(&mut database, &["ada", "grace", "grace"]);
        let filter = LogFilter {
            since: Some(DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(2)),
            author: Some("grace@example.com".into()),
        };

        let matching = RevList::starting_at(&database, &chain[2])
            .filter(|c| filter.matches(c))
            .map(|c| c.message().to_string())
            .collect::<Vec<_>>();
        assert_eq!(matching, vec!["commit 2"]);
    }
}
