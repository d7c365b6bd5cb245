//! Voter set

use super::user::User;
use serde::{Deserialize, Deserializer, Serialize};

/// Users who have upvoted a question or answer.
///
/// Keeps server order and never holds two entries for the same identity;
/// duplicates in a server payload collapse onto the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VoterSet(Vec<User>);

impl VoterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut set = Self::new();
        for user in users {
            set.insert(user);
        }
        set
    }

    /// Insert a voter, returning false if they were already present
    pub fn insert(&mut self, user: User) -> bool {
        if self.contains(&user) {
            return false;
        }
        self.0.push(user);
        true
    }

    pub fn contains(&self, user: &User) -> bool {
        self.0.iter().any(|voter| voter.is_same_as(user))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for VoterSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<User>::deserialize(deserializer).map(Self::from_users)
    }
}

impl FromIterator<User> for VoterSet {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self::from_users(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut voters = VoterSet::new();
        assert!(voters.insert(User::new("a", "a@example.com")));
        assert!(!voters.insert(User::new("a2", "a@example.com")));
        assert_eq!(voters.len(), 1);
    }

    #[test]
    fn test_deserialize_collapses_duplicates() {
        let voters: VoterSet = serde_json::from_str(
            r#"[{"username":"a","email":"a@x.io"},{"username":"b","email":"b@x.io"},{"username":"a","email":"a@x.io"}]"#,
        )
        .unwrap();
        assert_eq!(voters.len(), 2);
        let names: Vec<_> = voters.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_serialize_as_plain_list() {
        let voters = VoterSet::from_users([User::new("a", "a@x.io")]);
        assert_eq!(
            serde_json::to_string(&voters).unwrap(),
            r#"[{"username":"a","email":"a@x.io"}]"#
        );
    }
}
