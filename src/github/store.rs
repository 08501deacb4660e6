use crate::github::types::Repository;
use std::collections::HashMap;

/// Repositories from the most recent organization fetch, keyed by id and
/// iterable in API response order. Replaced wholesale on every fetch; a
/// lookup miss is an expected outcome, not an error.
///
/// Ids are keyed as strings so that lookups coming from rendered rows never
/// disagree with the numeric ids in the response body.
#[derive(Debug, Default)]
pub struct RepoStore {
    order: Vec<String>,
    by_id: HashMap<String, Repository>,
}

impl RepoStore {
    pub fn from_repositories(repositories: Vec<Repository>) -> Self {
        let mut order = Vec::with_capacity(repositories.len());
        let mut by_id = HashMap::with_capacity(repositories.len());

        for repository in repositories {
            let id = repository.id.to_string();
            if by_id.insert(id.clone(), repository).is_none() {
                order.push(id);
            }
        }

        Self { order, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Repository> {
        self.by_id.get(id)
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Repository> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
