//! Shared helpers for integration tests

use git2::{Oid, Repository, Signature};
use std::fs;
use std::path::Path;

/// Initialise an empty repository in `path`
pub fn init_repo(path: &Path) -> Repository {
    Repository::init(path).expect("failed to init repository")
}

/// Write a file into the working tree and add it to the index
pub fn stage(repo: &Repository, rel: &str, contents: &[u8]) {
    let path = repo.workdir().unwrap().join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(rel)).unwrap();
    index.write().unwrap();
}

/// Commit whatever is in the index on top of HEAD
pub fn commit(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Test User", "test@example.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("failed to commit")
}
