//! File descriptors as unique resources.

use std::os::unix::io::{AsRawFd, RawFd};

use crate::resource::UniqueResource;

/// The descriptor value POSIX calls return on failure.
pub const INVALID_FD: RawFd = -1;

/// An owned descriptor, closed with `close(2)` on drop.
pub type UniqueFd = UniqueResource<RawFd, fn(&mut RawFd)>;

fn close_fd(fd: &mut RawFd) {
    // SAFETY: the holder owns `fd` and closes it at most once.
    if unsafe { libc::close(*fd) } != 0 {
        warn_event!(fd = *fd, error = %std::io::Error::last_os_error(), "close failed");
    }
}

/// Takes ownership of `fd`. A holder over [`INVALID_FD`] starts disarmed.
///
/// ```rust
/// use warden::posix::{unique_fd, INVALID_FD};
///
/// let fd = unique_fd(INVALID_FD);
/// assert!(!fd.is_active());
/// ```
#[inline]
pub fn unique_fd(fd: RawFd) -> UniqueFd {
    UniqueResource::checked(fd, INVALID_FD, close_fd as fn(&mut RawFd))
}

impl AsRawFd for UniqueFd {
    #[inline]
    fn as_raw_fd(&self) -> RawFd {
        *self.get()
    }
}
