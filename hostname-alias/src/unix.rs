//! Implementation of `lookup` for Unix systems.
//!
//! This goes through the C library's `netdb.h` interface, so the answer honors the system's
//! configured sources (`nsswitch.conf` and friends). Differences from calling it directly:
//!
//! - The host record is copied into owned memory before anything else can touch the buffer
//!   that backs it.
//! - The error code is returned as a value rather than left in the global `h_errno`.

use super::{HostRecord, ResolutionFailed, HOST_NOT_FOUND};

use libc::{c_char, c_int, hostent};

use std::ffi::{CStr, CString};
use std::iter;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ptr;

extern "C" {
    fn hstrerror(code: c_int) -> *const c_char;
}

pub(super) fn lookup(name: &str) -> Result<HostRecord, ResolutionFailed> {
    // A C string cannot carry the name, so no host can have it.
    let c_name = match CString::new(name) {
        Ok(c_name) => c_name,
        Err(_) => {
            tracing::debug!(host = name, "host name contains a NUL byte");
            return Err(ResolutionFailed::from_code(HOST_NOT_FOUND));
        }
    };

    match query(&c_name) {
        Ok(record) => {
            tracing::debug!(
                host = name,
                canonical = record.name(),
                aliases = record.aliases().len(),
                addresses = record.addresses().len(),
                "resolved host"
            );
            Ok(record)
        }
        Err(code) => {
            tracing::debug!(host = name, code, "host lookup failed");
            Err(ResolutionFailed::from_code(code))
        }
    }
}

/// Get the `hstrerror` text for the given code.
pub(super) fn describe(code: i32) -> String {
    let message = unsafe { hstrerror(code) };

    if message.is_null() {
        return format!("Unknown resolver error {}", code);
    }

    // hstrerror returns a pointer to static storage.
    unsafe { CStr::from_ptr(message) }
        .to_string_lossy()
        .into_owned()
}

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))] {
        use super::NETDB_INTERNAL;

        use std::mem::MaybeUninit;

        extern "C" {
            fn gethostbyname_r(
                name: *const c_char,
                ret: *mut hostent,
                buf: *mut c_char,
                buflen: libc::size_t,
                result: *mut *mut hostent,
                h_errnop: *mut c_int,
            ) -> c_int;
        }

        /// The first buffer size we try for the record's strings and arrays.
        const INITIAL_BUFFER: usize = 1024;

        /// We stop growing the buffer past this size.
        const MAX_BUFFER: usize = 64 * 1024;

        fn query(name: &CStr) -> Result<HostRecord, c_int> {
            query_with_buffer(name, INITIAL_BUFFER)
        }

        /// Run the reentrant lookup, growing the scratch buffer from `initial` bytes until the
        /// record fits.
        fn query_with_buffer(name: &CStr, initial: usize) -> Result<HostRecord, c_int> {
            let mut buf: Vec<c_char> = vec![0; initial];

            loop {
                let mut ent = MaybeUninit::<hostent>::uninit();
                let mut result: *mut hostent = ptr::null_mut();
                let mut h_errno: c_int = 0;

                let ret = unsafe {
                    gethostbyname_r(
                        name.as_ptr(),
                        ent.as_mut_ptr(),
                        buf.as_mut_ptr(),
                        buf.len(),
                        &mut result,
                        &mut h_errno,
                    )
                };

                if ret == libc::ERANGE && buf.len() < MAX_BUFFER {
                    let len = buf.len() * 2;
                    buf.resize(len, 0);
                    continue;
                }

                if result.is_null() {
                    return Err(match h_errno {
                        0 => NETDB_INTERNAL,
                        code => code,
                    });
                }

                // `result` points at `ent`, whose strings live in `buf`. Both are still alive.
                return Ok(unsafe { copy_record(&*result) });
            }
        }
    } else if #[cfg(target_vendor = "apple")] {
        use std::sync::{Mutex, PoisonError};

        extern "C" {
            fn gethostbyname(name: *const c_char) -> *mut hostent;

            #[link_name = "h_errno"]
            static mut H_ERRNO: c_int;
        }

        /// `gethostbyname` shares one static record and one `h_errno` across the process.
        static LOCK: Mutex<()> = Mutex::new(());

        /// Run the classic lookup while holding the process-wide lock.
        fn query(name: &CStr) -> Result<HostRecord, c_int> {
            let _guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);

            unsafe {
                let ent = gethostbyname(name.as_ptr());

                if ent.is_null() {
                    Err(ptr::addr_of!(H_ERRNO).read())
                } else {
                    Ok(copy_record(&*ent))
                }
            }
        }
    } else {
        compile_error! {
            "hostname-alias has no host lookup for this platform"
        }
    }
}

/// Copy everything we need out of a `hostent`.
///
/// # Safety
///
/// `ent` must be a record filled in by the C library, with its backing storage still alive.
unsafe fn copy_record(ent: &hostent) -> HostRecord {
    let name = if ent.h_name.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ent.h_name).to_string_lossy().into_owned()
    };

    let aliases = null_terminated(ent.h_aliases)
        .map(|alias| unsafe { CStr::from_ptr(alias) }.to_string_lossy().into_owned())
        .collect();

    let addresses = null_terminated(ent.h_addr_list)
        .filter_map(|addr| unsafe { decode_address(ent.h_addrtype, ent.h_length, addr) })
        .collect();

    HostRecord::new(name, aliases, addresses)
}

/// Walk a NULL-terminated array of pointers.
///
/// # Safety
///
/// `list` must be null or point to an array that ends with a null pointer.
unsafe fn null_terminated(list: *mut *mut c_char) -> impl Iterator<Item = *mut c_char> {
    let mut index = 0;

    iter::from_fn(move || {
        if list.is_null() {
            return None;
        }

        let entry = unsafe { *list.add(index) };
        if entry.is_null() {
            None
        } else {
            index += 1;
            Some(entry)
        }
    })
}

/// Parse a raw address from `h_addr_list`.
///
/// # Safety
///
/// `addr` must point to at least `len` readable bytes.
unsafe fn decode_address(family: c_int, len: c_int, addr: *const c_char) -> Option<IpAddr> {
    match (family, len) {
        (libc::AF_INET, 4) => {
            let mut bytes = [0u8; 4];
            ptr::copy_nonoverlapping(addr.cast::<u8>(), bytes.as_mut_ptr(), bytes.len());
            Some(IpAddr::V4(Ipv4Addr::from(bytes)))
        }
        (libc::AF_INET6, 16) => {
            let mut bytes = [0u8; 16];
            ptr::copy_nonoverlapping(addr.cast::<u8>(), bytes.as_mut_ptr(), bytes.len());
            Some(IpAddr::V6(Ipv6Addr::from(bytes)))
        }
        _ => None,
    }
}

#[cfg(all(test, any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
mod tests {
    use super::*;

    #[test]
    fn small_buffer_grows_to_fit() {
        let name = CString::new("localhost").unwrap();

        let grown = query_with_buffer(&name, 16).unwrap();
        let default = query(&name).unwrap();

        assert_eq!(grown, default);
        assert!(!grown.addresses().is_empty());
    }

    #[test]
    fn buffer_growth_stops_at_the_limit() {
        let name = CString::new("localhost").unwrap();

        // Starting at the limit leaves no room to grow, but localhost still fits.
        let record = query_with_buffer(&name, MAX_BUFFER).unwrap();
        assert_eq!(record, query(&name).unwrap());
    }
}
