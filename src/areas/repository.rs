//! Repository aggregate root
//!
//! Owns the object database, the working directory handle, the staging
//! area, and the branch table. There is no ambient global: every command
//! loads the persisted state, operates on this value, and saves it back.
//!
//! The persisted state object is a single canonical text file:
//!
//! ```text
//! current <branch-name>
//! branch <fingerprint> <branch-name>
//! staged <fingerprint> <file-name>
//! removed <file-name>
//! ```
//!
//! Fingerprints precede names so file and branch names may contain spaces.
//! The file is replaced through a temp-file rename, never written in place.

use crate::areas::REPOSITORY_DIR;
use crate::areas::database::Database;
use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::commit::CommitNode;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use fake::rand;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the serialized repository-state object inside the repository dir
const STATE_FILE: &str = "state";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    staging: Arc<Mutex<Staging>>,
    branches: RefCell<BranchTable>,
}

impl Repository {
    /// Build a repository value from already-loaded parts
    pub fn assemble(
        path: Box<Path>,
        writer: Box<dyn std::io::Write>,
        staging: Staging,
        branches: BranchTable,
    ) -> Self {
        let database = Database::new(path.join(REPOSITORY_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone());

        Repository {
            path,
            writer: RefCell::new(writer),
            database,
            workspace,
            staging: Arc::new(Mutex::new(staging)),
            branches: RefCell::new(branches),
        }
    }

    pub fn is_initialized(path: &Path) -> bool {
        path.join(REPOSITORY_DIR).exists()
    }

    /// Load the persisted repository state from a working directory
    pub fn load(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?.into_boxed_path();
        if !Self::is_initialized(&path) {
            return Err(UserError::RepositoryMissing.into());
        }

        let database = Database::new(path.join(REPOSITORY_DIR).into_boxed_path());
        let state_path = path.join(REPOSITORY_DIR).join(STATE_FILE);
        let content = std::fs::read_to_string(&state_path).with_context(|| {
            format!("Unable to read repository state {}", state_path.display())
        })?;

        let mut branches = BTreeMap::new();
        let mut current = None;
        let mut staging = Staging::new();

        for line in content.lines() {
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix("current ") {
                current = Some(BranchName::try_parse(name.to_string())?);
            } else if let Some(rest) = line.strip_prefix("branch ") {
                let (oid, name) = rest
                    .split_once(' ')
                    .context("Invalid repository state: invalid branch line")?;
                branches.insert(
                    BranchName::try_parse(name.to_string())?,
                    ObjectId::try_parse(oid.to_string())?,
                );
            } else if let Some(rest) = line.strip_prefix("staged ") {
                let (oid, name) = rest
                    .split_once(' ')
                    .context("Invalid repository state: invalid staged line")?;
                let blob = database.load_staged_blob(&ObjectId::try_parse(oid.to_string())?)?;
                staging.stage_add(name.to_string(), blob);
            } else if let Some(name) = line.strip_prefix("removed ") {
                staging.mark_removed(name.to_string());
            } else {
                anyhow::bail!("Invalid repository state line {:?}", line);
            }
        }

        let current = current.context("Invalid repository state: missing current branch")?;
        let branches = BranchTable::from_parts(branches, current)?;

        Ok(Self::assemble(path, writer, staging, branches))
    }

    /// Persist the whole repository state, atomically
    pub async fn save(&self) -> anyhow::Result<()> {
        let staging = self.staging.lock().await;
        let branches = self.branches.borrow();

        let mut lines = vec![format!("current {}", branches.current())];
        for (name, oid) in branches.iter() {
            lines.push(format!("branch {} {}", oid, name));
        }
        for (name, blob) in staging.additions() {
            lines.push(format!("staged {} {}", blob.fingerprint()?, name));
        }
        for name in staging.removals() {
            lines.push(format!("removed {}", name));
        }
        lines.push(String::new());

        let state_path = self.repository_path().join(STATE_FILE);
        let temp_path = self
            .repository_path()
            .join(format!("tmp-state-{}", rand::random::<u32>()));

        std::fs::write(&temp_path, lines.join("\n")).with_context(|| {
            format!("Unable to write repository state {}", temp_path.display())
        })?;
        std::fs::rename(&temp_path, &state_path).with_context(|| {
            format!("Unable to rename repository state to {}", state_path.display())
        })?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn staging(&self) -> Arc<Mutex<Staging>> {
        self.staging.clone()
    }

    pub fn branches(&self) -> Ref<'_, BranchTable> {
        self.branches.borrow()
    }

    pub fn branches_mut(&self) -> RefMut<'_, BranchTable> {
        self.branches.borrow_mut()
    }

    /// Fingerprint of the commit the current branch points at
    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        Ok(self.branches.borrow().head_oid()?.clone())
    }

    /// The commit the current branch points at
    pub fn head_commit(&self) -> anyhow::Result<CommitNode> {
        self.database.load_commit(&self.head_oid()?)
    }
}
