//! Service account lookup and state directory ownership.

use std::io;

use camino::Utf8Path;
use nix::unistd::{Uid, User, chown};

/// Host identity operations needed before daemons start.
pub trait ServiceIdentity: Send + Sync {
    /// Returns the uid of `user`, or `None` when the account is unknown or
    /// the lookup fails.
    fn lookup_uid(&self, user: &str) -> Option<u32>;

    /// Hands ownership of `path` to `uid`, leaving the group untouched.
    fn chown(&self, path: &Utf8Path, uid: u32) -> io::Result<()>;
}

/// Identity backend using the system user database.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIdentity;

impl ServiceIdentity for SystemIdentity {
    fn lookup_uid(&self, user: &str) -> Option<u32> {
        User::from_name(user)
            .ok()
            .flatten()
            .map(|account| account.uid.as_raw())
    }

    fn chown(&self, path: &Utf8Path, uid: u32) -> io::Result<()> {
        chown(path.as_std_path(), Some(Uid::from_raw(uid)), None).map_err(io::Error::from)
    }
}
