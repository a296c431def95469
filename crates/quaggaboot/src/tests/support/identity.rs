//! Mock service identity for ownership scenarios.

use std::io;

use camino::Utf8Path;
use mockall::mock;

use crate::ServiceIdentity;

mock! {
    pub Identity {}
    impl ServiceIdentity for Identity {
        fn lookup_uid(&self, user: &str) -> Option<u32>;
        fn chown(&self, path: &Utf8Path, uid: u32) -> io::Result<()>;
    }
}
