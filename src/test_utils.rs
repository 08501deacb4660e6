#![cfg(test)]

use crate::github::types::{Contributor, Repository};

pub fn make_repo(id: u64, name: &str) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        description: Some(format!("{name} description")),
        forks: 3,
        updated_at: "2020-01-01T00:00:00Z".to_string(),
        contributors_url: format!("https://api.example.test/repos/org/{name}/contributors"),
    }
}

pub fn make_contributor(login: &str, contributions: u64) -> Contributor {
    Contributor {
        login: login.to_string(),
        avatar_url: format!("https://avatars.example.test/{login}"),
        contributions,
    }
}
