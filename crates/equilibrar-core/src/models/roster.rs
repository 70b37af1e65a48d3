use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use super::client::ClientProfile;
use super::user::{AccountStatus, Role, User, UserId};

/// A roster entry: staff carry a plain [`User`], clients carry their full
/// program profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Member {
    Client(ClientProfile),
    Staff(User),
}

impl Member {
    pub fn user(&self) -> &User {
        match self {
            Member::Staff(user) => user,
            Member::Client(client) => &client.user,
        }
    }

    fn user_mut(&mut self) -> &mut User {
        match self {
            Member::Staff(user) => user,
            Member::Client(client) => &mut client.user,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Member::Staff(user) => user.role,
            Member::Client(_) => Role::Client,
        }
    }

    pub fn as_client(&self) -> Option<&ClientProfile> {
        match self {
            Member::Client(client) => Some(client),
            Member::Staff(_) => None,
        }
    }
}

/// Ordered in-memory list of users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.members.iter().map(Member::user)
    }

    pub fn find(&self, id: &UserId) -> Option<&Member> {
        self.members.iter().find(|m| &m.user().id == id)
    }

    /// Case-insensitive lookup by email address.
    pub fn find_by_email(&self, email: &str) -> Option<&Member> {
        let email = email.trim();
        self.members
            .iter()
            .find(|m| m.user().email.eq_ignore_ascii_case(email))
    }

    pub fn get(&self, id: &UserId) -> Result<&Member, CoreError> {
        self.find(id)
            .ok_or_else(|| CoreError::UnknownUser(id.to_string()))
    }

    pub fn client(&self, id: &UserId) -> Result<&ClientProfile, CoreError> {
        self.get(id)?
            .as_client()
            .ok_or_else(|| CoreError::UnknownUser(id.to_string()))
    }

    pub fn client_mut(&mut self, id: &UserId) -> Result<&mut ClientProfile, CoreError> {
        self.members
            .iter_mut()
            .find_map(|m| match m {
                Member::Client(c) if &c.user.id == id => Some(c),
                _ => None,
            })
            .ok_or_else(|| CoreError::UnknownUser(id.to_string()))
    }

    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &User> {
        self.members
            .iter()
            .filter(move |m| m.role() == role)
            .map(Member::user)
    }

    pub fn clients(&self) -> impl Iterator<Item = &ClientProfile> {
        self.members.iter().filter_map(Member::as_client)
    }

    /// Clients in roster order. An empty client list is a fixture error,
    /// never a state to render.
    pub fn require_clients(&self) -> Result<Vec<&ClientProfile>, CoreError> {
        let clients: Vec<_> = self.clients().collect();
        if clients.is_empty() {
            return Err(CoreError::EmptyRole(Role::Client));
        }
        Ok(clients)
    }

    /// Flip a user's status, returning the new value.
    pub fn toggle_status(&mut self, id: &UserId) -> Result<AccountStatus, CoreError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| &m.user().id == id)
            .ok_or_else(|| CoreError::UnknownUser(id.to_string()))?;
        let user = member.user_mut();
        user.status = user.status.toggle();
        Ok(user.status)
    }

    pub fn insert(&mut self, member: Member) -> Result<(), CoreError> {
        let id = &member.user().id;
        if self.find(id).is_some() {
            return Err(CoreError::DuplicateUser(id.to_string()));
        }
        if self.find_by_email(&member.user().email).is_some() {
            return Err(CoreError::DuplicateUser(member.user().email.clone()));
        }
        if let Member::Client(client) = &member {
            client.validate()?;
        }
        self.members.push(member);
        Ok(())
    }

    /// Validate every client profile in the roster.
    pub fn validate(&self) -> Result<(), CoreError> {
        for client in self.clients() {
            client.validate()?;
        }
        for member in &self.members {
            if let Member::Staff(user) = member
                && user.role == Role::Client
            {
                return Err(CoreError::MissingField(format!(
                    "{}: client without program profile",
                    user.id
                )));
            }
        }
        Ok(())
    }
}
