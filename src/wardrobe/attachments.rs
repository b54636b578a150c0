use std::collections::HashMap;

use glam::Vec3;

use crate::host::{ActorId, AttachPoint, UserId};

/// The model instance a user currently wears
#[derive(Debug, Clone, PartialEq)]
pub struct WornItem {
    pub actor: ActorId,
    pub wearable_id: String,
    pub attach_point: AttachPoint,
    /// Local scale last pushed to the host
    pub scale: Vec3,
}

/// Result of looking a user up in [`AttachmentState`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wearing<'a> {
    Worn(&'a WornItem),
    Unworn,
}

impl<'a> Wearing<'a> {
    pub fn item(self) -> Option<&'a WornItem> {
        match self {
            Wearing::Worn(item) => Some(item),
            Wearing::Unworn => None,
        }
    }

    pub fn is_worn(self) -> bool {
        matches!(self, Wearing::Worn(_))
    }
}

/// At most one worn item per user
#[derive(Debug, Default)]
pub struct AttachmentState {
    worn: HashMap<UserId, WornItem>,
}

impl AttachmentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, user: UserId) -> Wearing<'_> {
        match self.worn.get(&user) {
            Some(item) => Wearing::Worn(item),
            None => Wearing::Unworn,
        }
    }

    pub(crate) fn get_mut(&mut self, user: UserId) -> Option<&mut WornItem> {
        self.worn.get_mut(&user)
    }

    /// Store `item` for `user`, handing back whatever it displaced
    pub(crate) fn insert(&mut self, user: UserId, item: WornItem) -> Option<WornItem> {
        self.worn.insert(user, item)
    }

    pub(crate) fn take(&mut self, user: UserId) -> Option<WornItem> {
        self.worn.remove(&user)
    }

    pub(crate) fn drain(&mut self) -> Vec<(UserId, WornItem)> {
        self.worn.drain().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserId, &WornItem)> {
        self.worn.iter().map(|(user, item)| (*user, item))
    }

    pub fn len(&self) -> usize {
        self.worn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worn.is_empty()
    }
}
