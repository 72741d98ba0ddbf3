//! The identity of the local host: its own name, its domain, and reverse lookups of addresses.

use libc::c_char;
use socket2::SockAddr;

use std::ffi::{CStr, CString, NulError};
use std::io;
use std::net::SocketAddr;
use std::ptr;

pub use libc::{NI_NAMEREQD, NI_NUMERICHOST};

/// Host names are limited to 255 bytes, plus the terminating NUL.
const NAME_BUFFER: usize = 256;

/// An error from one of the host identity functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The system call failed.
    #[error("system call failed: {0}")]
    Io(#[from] io::Error),

    /// The name did not fit into the buffer.
    #[error("name is too large to fit in {0} bytes")]
    NameTooLong(usize),

    /// The name contains a NUL byte.
    #[error("name contains a NUL byte")]
    InvalidName(#[from] NulError),

    /// `getnameinfo` failed.
    #[error("{message}")]
    Lookup {
        /// The `EAI_*` code.
        code: i32,

        /// The `gai_strerror` text for the code.
        message: String,
    },
}

/// Get the name of the local host.
pub fn gethostname() -> Result<String, Error> {
    let mut buf = vec![0u8; NAME_BUFFER];
    let ret = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<c_char>(), buf.len()) };

    if ret != 0 {
        return Err(io::Error::last_os_error().into());
    }

    until_nul(&buf)
}

/// Get the NIS domain name of the local host.
#[cfg(target_os = "linux")]
pub fn getdomainname() -> Result<String, Error> {
    let mut buf = vec![0u8; NAME_BUFFER];
    let ret = unsafe { libc::getdomainname(buf.as_mut_ptr().cast::<c_char>(), buf.len()) };

    if ret != 0 {
        return Err(io::Error::last_os_error().into());
    }

    until_nul(&buf)
}

/// Set the name of the local host.
///
/// This usually needs elevated privileges.
pub fn sethostname(name: &str) -> Result<(), Error> {
    let len = name.len();
    let name = CString::new(name)?;
    let ret = unsafe { libc::sethostname(name.as_ptr(), len as _) };

    if ret != 0 {
        return Err(io::Error::last_os_error().into());
    }

    tracing::debug!(host = ?name, "set host name");
    Ok(())
}

/// Find the host name for a socket address.
///
/// `flags` is a combination of the `NI_*` flags, such as [`NI_NAMEREQD`].
pub fn getnameinfo(addr: &SocketAddr, flags: i32) -> Result<String, Error> {
    let addr = SockAddr::from(*addr);
    let mut host = vec![0u8; libc::NI_MAXHOST as usize];

    let ret = unsafe {
        libc::getnameinfo(
            addr.as_ptr().cast::<libc::sockaddr>(),
            addr.len(),
            host.as_mut_ptr().cast::<c_char>(),
            host.len() as _,
            ptr::null_mut(),
            0,
            flags,
        )
    };

    if ret != 0 {
        let message = unsafe { CStr::from_ptr(libc::gai_strerror(ret)) }
            .to_string_lossy()
            .into_owned();
        tracing::debug!(code = ret, %message, "reverse lookup failed");
        return Err(Error::Lookup { code: ret, message });
    }

    until_nul(&host)
}

/// Take the string up to the first NUL in `buf`.
fn until_nul(buf: &[u8]) -> Result<String, Error> {
    let name = CStr::from_bytes_until_nul(buf).map_err(|_| Error::NameTooLong(buf.len()))?;
    Ok(name.to_string_lossy().into_owned())
}
