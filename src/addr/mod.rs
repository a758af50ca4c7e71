//! Address values and their native forms.
//!
//! `IpAddress` is the tagged value the formatters work on:
//! - `Unspecified` — no family (`AF_UNSPEC`)
//! - `V4` — Internet Protocol version 4
//! - `V6` — Internet Protocol version 6
//! - `Invalid` — a family tag nothing here understands, kept so that
//!   garbage read from a raw `sockaddr` can still be reported

mod ipv4;
mod ipv6;
pub use self::ipv4::SocketAddrV4;
pub use self::ipv6::SocketAddrV6;

use crate::error::AddrError;

/// Address families an `IpAddress` can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
	Unspecified,
	Ipv4,
	Ipv6,
}

impl Family {
	/// Returns the libc constant for this address family.
	#[inline]
	pub fn raw(self) -> libc::c_int {
		match self {
			Family::Unspecified => libc::AF_UNSPEC,
			Family::Ipv4 => libc::AF_INET,
			Family::Ipv6 => libc::AF_INET6,
		}
	}

	/// Maps a raw family tag back to a `Family`.
	pub fn from_raw(family: libc::sa_family_t) -> Result<Self, AddrError> {
		match family as libc::c_int {
			libc::AF_UNSPEC => Ok(Family::Unspecified),
			libc::AF_INET => Ok(Family::Ipv4),
			libc::AF_INET6 => Ok(Family::Ipv6),
			_ => Err(AddrError::UnknownFamily { family }),
		}
	}
}

/*
  ┌─────────────┬───────────┬───────────────┐
  │ Family      │ Constant  │ Value (Linux) │
  ├─────────────┼───────────┼───────────────┤
  │ Unspecified │ AF_UNSPEC │ 0             │
  ├─────────────┼───────────┼───────────────┤
  │ Ipv4        │ AF_INET   │ 2             │
  ├─────────────┼───────────┼───────────────┤
  │ Ipv6        │ AF_INET6  │ 10            │
  └─────────────┴───────────┴───────────────┘
*/

/// An IP address (with port), or the lack of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IpAddress {
	#[default]
	Unspecified,
	V4(SocketAddrV4),
	V6(SocketAddrV6),
	/// Family tag outside AF_UNSPEC/AF_INET/AF_INET6.
	Invalid(libc::sa_family_t),
}

impl IpAddress {
	/// The address with no family.
	pub const fn unspecified() -> Self {
		IpAddress::Unspecified
	}

	/// Returns the raw family tag, whatever it is.
	pub fn raw_family(&self) -> libc::sa_family_t {
		match self {
			IpAddress::Unspecified => libc::AF_UNSPEC as libc::sa_family_t,
			IpAddress::V4(_) => libc::AF_INET as libc::sa_family_t,
			IpAddress::V6(_) => libc::AF_INET6 as libc::sa_family_t,
			IpAddress::Invalid(family) => *family,
		}
	}

	/// Returns the family, or `UnknownFamily` for a corrupt tag.
	///
	/// `Invalid` is always an error, even when its tag happens to name a
	/// known family: it carries no address bytes.
	pub fn family(&self) -> Result<Family, AddrError> {
		match self {
			IpAddress::Unspecified => Ok(Family::Unspecified),
			IpAddress::V4(_) => Ok(Family::Ipv4),
			IpAddress::V6(_) => Ok(Family::Ipv6),
			IpAddress::Invalid(family) => Err(AddrError::UnknownFamily { family: *family }),
		}
	}

	/// Returns the port field as stored, in network byte order.
	///
	/// Unspecified and unknown families have no port; callers should treat
	/// `NotAddressable` as "no port" rather than a failure.
	pub fn port_network_order(&self) -> Result<u16, AddrError> {
		match self {
			IpAddress::V4(v4) => Ok(v4.nport()),
			IpAddress::V6(v6) => Ok(v6.nport()),
			IpAddress::Unspecified | IpAddress::Invalid(_) => {
				Err(AddrError::NotAddressable { family: self.raw_family() })
			}
		}
	}

	/// Returns the port in host byte order.
	pub fn port_host_order(&self) -> Result<u16, AddrError> {
		self.port_network_order().map(u16::from_be)
	}

	/// Returns a copy with the port set from a network byte order value.
	///
	/// An address without a port comes back unchanged. That is logged, not
	/// asserted: the address may have come straight from untrusted input.
	pub fn with_port_network_order(self, nport: u16) -> Self {
		match self {
			IpAddress::V4(v4) => IpAddress::V4(v4.with_nport(nport)),
			IpAddress::V6(v6) => IpAddress::V6(v6.with_nport(nport)),
			IpAddress::Unspecified | IpAddress::Invalid(_) => {
				log::warn!(
					"will not set port {} on address without one (family {})",
					u16::from_be(nport),
					self.raw_family()
				);
				self
			}
		}
	}

	/// Returns a copy with the port set from a host byte order value.
	pub fn with_port_host_order(self, port: u16) -> Self {
		self.with_port_network_order(port.to_be())
	}

	/// Borrows the address bytes: 4 for IPv4, 16 for IPv6, none otherwise.
	pub fn raw_bytes(&self) -> &[u8] {
		match self {
			IpAddress::V4(v4) => v4.octets(),
			IpAddress::V6(v6) => v6.octets(),
			IpAddress::Unspecified | IpAddress::Invalid(_) => &[],
		}
	}

	/// Size of the native sockaddr for this family; 0 when there is none.
	pub fn native_length(&self) -> usize {
		match self {
			IpAddress::V4(_) => std::mem::size_of::<libc::sockaddr_in>(),
			IpAddress::V6(_) => std::mem::size_of::<libc::sockaddr_in6>(),
			IpAddress::Unspecified | IpAddress::Invalid(_) => 0,
		}
	}

	/// Builds the native sockaddr for this address.
	///
	/// Returns `None` when the family has no native form.
	pub fn socket_view(&self) -> Option<SockAddr> {
		match self {
			IpAddress::V4(v4) => Some(SockAddr::V4(v4.to_raw())),
			IpAddress::V6(v6) => Some(SockAddr::V6(v6.to_raw())),
			IpAddress::Unspecified | IpAddress::Invalid(_) => None,
		}
	}
}

impl From<SocketAddrV4> for IpAddress {
	fn from(addr: SocketAddrV4) -> Self {
		IpAddress::V4(addr)
	}
}

impl From<SocketAddrV6> for IpAddress {
	fn from(addr: SocketAddrV6) -> Self {
		IpAddress::V6(addr)
	}
}

/// Native sockaddr for an `IpAddress`, ready to hand to socket calls.
#[derive(Clone, Copy)]
pub enum SockAddr {
	V4(libc::sockaddr_in),
	V6(libc::sockaddr_in6),
}

impl SockAddr {
	/// Pointer to the generic sockaddr header. Valid while `self` is.
	pub fn as_ptr(&self) -> *const libc::sockaddr {
		match self {
			SockAddr::V4(raw) => raw as *const _ as *const libc::sockaddr,
			SockAddr::V6(raw) => raw as *const _ as *const libc::sockaddr,
		}
	}

	/// Size of the native struct, as the `len` argument of socket calls.
	pub fn socklen(&self) -> libc::socklen_t {
		let len = match self {
			SockAddr::V4(_) => std::mem::size_of::<libc::sockaddr_in>(),
			SockAddr::V6(_) => std::mem::size_of::<libc::sockaddr_in6>(),
		};
		len as libc::socklen_t
	}

	/// Family tag stored in the native struct.
	pub fn family(&self) -> libc::sa_family_t {
		match self {
			SockAddr::V4(raw) => raw.sin_family,
			SockAddr::V6(raw) => raw.sin6_family,
		}
	}

	fn call<F, R>(&self, f: F) -> R
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R,
	{
		f(self.as_ptr(), self.socklen())
	}
}

/// Trait for address types that can be converted to raw sockaddr for syscalls.
pub trait ToSockAddr {
	/// Calls the provided closure with a pointer to the raw sockaddr and its size.
	/// Returns None if the address has no native form.
	fn with_raw<F, R>(&self, f: F) -> Option<R>
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R;
}

/*
The closure keeps the sockaddr on this stack frame for exactly as long as
the callee needs the pointer:

    addr.with_raw(|ptr, len| unsafe { libc::connect(fd, ptr, len) })
*/

impl ToSockAddr for SocketAddrV4 {
	fn with_raw<F, R>(&self, f: F) -> Option<R>
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R,
	{
		Some(SockAddr::V4(self.to_raw()).call(f))
	}
}

impl ToSockAddr for SocketAddrV6 {
	fn with_raw<F, R>(&self, f: F) -> Option<R>
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R,
	{
		Some(SockAddr::V6(self.to_raw()).call(f))
	}
}

impl ToSockAddr for IpAddress {
	fn with_raw<F, R>(&self, f: F) -> Option<R>
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R,
	{
		match self {
			IpAddress::V4(v4) => v4.with_raw(f),
			IpAddress::V6(v6) => v6.with_raw(f),
			IpAddress::Unspecified | IpAddress::Invalid(_) => None,
		}
	}
}

/// Trait for address types that can be created from raw sockaddr.
pub trait FromSockAddr: Sized {
	/// Creates address from raw sockaddr storage.
	///
	/// # Safety
	/// `addr` must point to at least `len` readable bytes.
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self>;
}

impl FromSockAddr for SocketAddrV4 {
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self> {
		if len < std::mem::size_of::<libc::sockaddr_in>() as libc::socklen_t {
			return None;
		}
		let raw = unsafe { std::ptr::read_unaligned(addr as *const libc::sockaddr_in) };
		if raw.sin_family != libc::AF_INET as libc::sa_family_t {
			return None;
		}
		Some(Self::from_raw(&raw))
	}
}

impl FromSockAddr for SocketAddrV6 {
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self> {
		if len < std::mem::size_of::<libc::sockaddr_in6>() as libc::socklen_t {
			return None;
		}
		let raw = unsafe { std::ptr::read_unaligned(addr as *const libc::sockaddr_in6) };
		if raw.sin6_family != libc::AF_INET6 as libc::sa_family_t {
			return None;
		}
		Some(Self::from_raw(&raw))
	}
}

impl FromSockAddr for IpAddress {
	/// Unknown families are kept as `Invalid` rather than rejected; only a
	/// buffer too short for its own family yields `None`.
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self> {
		if len < std::mem::size_of::<libc::sa_family_t>() as libc::socklen_t {
			return None;
		}
		let family = unsafe {
			std::ptr::read_unaligned(std::ptr::addr_of!((*addr).sa_family))
		};
		match Family::from_raw(family) {
			Ok(Family::Unspecified) => Some(IpAddress::Unspecified),
			Ok(Family::Ipv4) => unsafe { SocketAddrV4::from_sockaddr(addr, len) }.map(IpAddress::V4),
			Ok(Family::Ipv6) => unsafe { SocketAddrV6::from_sockaddr(addr, len) }.map(IpAddress::V6),
			Err(_) => Some(IpAddress::Invalid(family)),
		}
	}
}
