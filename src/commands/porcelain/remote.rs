use crate::areas::remotes::Remote;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::porcelain::merge::{MergeOptions, MergeOutcome};
use crate::error::{Result, VcsError};
use crate::events::Event;

pub const DEFAULT_REMOTE: &str = "origin";

impl Repository {
    pub fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
        self.remotes
            .add(Remote::new(name.to_string(), url.to_string()))?;

        tracing::info!(remote = name, url, "added remote");
        self.emit(Event::RemoteAdd {
            name: name.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    /// Refresh a remote's branch heads through the transport
    ///
    /// Reported heads that do not exist locally are ignored. Nothing changes until the
    /// transport answers, so dropping the future leaves the repository untouched.
    pub async fn fetch(&mut self, remote: Option<&str>) -> Result<()> {
        let name = remote.unwrap_or(DEFAULT_REMOTE);
        let snapshot = self.remotes.get(name)?.clone();
        let transport = self.transport();

        tracing::debug!(remote = name, url = %snapshot.url, "fetching");
        let reported = transport
            .fetch(&snapshot)
            .await
            .map_err(VcsError::Transport)?;

        let fetched_at = self.now();
        let known = reported
            .unwrap_or_default()
            .into_iter()
            .filter(|(branch, head)| {
                let known = self.database.contains(head);
                if !known {
                    tracing::warn!(
                        remote = name,
                        branch,
                        head = %head,
                        "ignoring unknown remote head"
                    );
                }
                known
            })
            .collect::<Vec<_>>();

        let remote = self.remotes.get_mut(name)?;
        remote.branches.extend(known);
        remote.last_fetch = Some(fetched_at);

        tracing::info!(remote = name, branches = remote.branches.len(), "fetch complete");
        self.emit(Event::FetchComplete {
            remote: name.to_string(),
        });
        Ok(())
    }

    /// Publish a local branch head to a remote
    ///
    /// Defaults to `origin` and the current branch. Sets the branch's upstream when it
    /// has none. Returns the pushed head.
    pub async fn push(&mut self, remote: Option<&str>, branch: Option<&str>) -> Result<ObjectId> {
        let name = remote.unwrap_or(DEFAULT_REMOTE);
        let branch_name = match branch {
            Some(branch) => Self::parse_branch_name(branch)?,
            None => self
                .current_branch()
                .cloned()
                .ok_or_else(|| VcsError::InvalidTarget("HEAD".to_string()))?,
        };
        let head = self
            .refs
            .branch(&branch_name)
            .map(|b| b.head.clone())
            .ok_or_else(|| VcsError::InvalidTarget(branch_name.to_string()))?;
        let snapshot = self.remotes.get(name)?.clone();
        let transport = self.transport();

        tracing::debug!(
            remote = name,
            branch = %branch_name,
            head = %head.to_short_oid(),
            "pushing"
        );
        transport
            .push(&snapshot, branch_name.as_ref(), &head)
            .await
            .map_err(VcsError::Transport)?;

        let remote = self.remotes.get_mut(name)?;
        remote
            .branches
            .insert(branch_name.to_string(), head.clone());
        let tracking = remote.tracking_name(branch_name.as_ref());

        if let Some(local) = self.refs.branch_mut(&branch_name) {
            if local.upstream.is_none() {
                local.upstream = Some(tracking);
            }
        }

        tracing::info!(
            remote = name,
            branch = %branch_name,
            head = %head.to_short_oid(),
            "push complete"
        );
        self.emit(Event::PushComplete {
            remote: name.to_string(),
            branch: branch_name.to_string(),
            head: head.clone(),
        });
        Ok(head)
    }

    /// Fetch, then merge `<remote>/<branch>` into HEAD
    ///
    /// The branch defaults to the current one.
    pub async fn pull(
        &mut self,
        remote: Option<&str>,
        branch: Option<&str>,
    ) -> Result<MergeOutcome> {
        let name = remote.unwrap_or(DEFAULT_REMOTE).to_string();
        let branch = match branch {
            Some(branch) => branch.to_string(),
            None => self
                .current_branch()
                .map(ToString::to_string)
                .ok_or_else(|| VcsError::InvalidTarget("HEAD".to_string()))?,
        };

        self.fetch(Some(&name)).await?;

        let tracking = format!("{name}/{branch}");
        let outcome = self.merge(&tracking, MergeOptions::default())?;

        tracing::info!(remote = %name, branch = %branch, "pull complete");
        self.emit(Event::PullComplete {
            remote: name,
            branch,
        });
        Ok(outcome)
    }
}
