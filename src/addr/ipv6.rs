/// IPv6 endpoint (address + port + scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketAddrV6 {
	ip: [u8; 16],
	/// Port in network byte order.
	nport: u16,
	/// Scope ID for link-local addresses (identifies network interface).
	/// Usually 0 unless using link-local addresses like fe80::.
	scope_id: u32,
}

impl SocketAddrV6 {
	/// Creates a new IPv6 endpoint. `port` is in host byte order.
	pub fn new(ip: [u8; 16], port: u16) -> Self {
		Self { ip, nport: port.to_be(), scope_id: 0 }
	}

	/// Creates with explicit scope ID.
	///
	/// Use for link-local addresses (fe80::) where you need to specify the interface.
	pub fn with_scope(ip: [u8; 16], port: u16, scope_id: u32) -> Self {
		Self { ip, nport: port.to_be(), scope_id }
	}

	/// Creates from eight 16-bit groups, most significant first.
	pub fn from_segments(segments: [u16; 8], port: u16) -> Self {
		let mut ip = [0u8; 16];
		for (chunk, seg) in ip.chunks_exact_mut(2).zip(segments) {
			chunk.copy_from_slice(&seg.to_be_bytes());
		}
		Self::new(ip, port)
	}

	/// Returns the IP bytes.
	pub fn ip(&self) -> [u8; 16] {
		self.ip
	}

	/// Borrows the IP bytes.
	pub fn octets(&self) -> &[u8; 16] {
		&self.ip
	}

	/// Returns the eight 16-bit groups.
	pub fn segments(&self) -> [u16; 8] {
		let mut segments = [0u16; 8];
		for (seg, chunk) in segments.iter_mut().zip(self.ip.chunks_exact(2)) {
			*seg = u16::from_be_bytes([chunk[0], chunk[1]]);
		}
		segments
	}

	/// Returns the port in host byte order.
	pub fn port(&self) -> u16 {
		u16::from_be(self.nport)
	}

	/// Returns the port exactly as stored, in network byte order.
	pub fn nport(&self) -> u16 {
		self.nport
	}

	/// Returns the scope ID.
	pub fn scope_id(&self) -> u32 {
		self.scope_id
	}

	pub(crate) fn with_nport(mut self, nport: u16) -> Self {
		self.nport = nport;
		self
	}

	/// Converts to the raw sockaddr_in6 for syscalls.
	pub(crate) fn to_raw(&self) -> libc::sockaddr_in6 {
		let mut raw: libc::sockaddr_in6 = unsafe { std::mem::zeroed() };
		raw.sin6_family = libc::AF_INET6 as libc::sa_family_t;
		raw.sin6_port = self.nport;
		raw.sin6_addr.s6_addr = self.ip;
		raw.sin6_scope_id = self.scope_id;
		raw
	}

	/// Creates from raw sockaddr_in6.
	pub(crate) fn from_raw(raw: &libc::sockaddr_in6) -> Self {
		Self {
			ip: raw.sin6_addr.s6_addr,
			nport: raw.sin6_port,
			scope_id: raw.sin6_scope_id,
		}
	}
}

/*
Same pattern as V4, bigger address:
- 16 bytes for IP address, 2 bytes for port
- sin6_flowinfo: traffic class and flow label, left at 0
- sin6_scope_id: link-local scope
*/

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn segments_are_big_endian() {
		let addr = SocketAddrV6::from_segments([0x2001, 0xdb8, 0, 0, 0, 0, 0, 1], 0);
		assert_eq!(&addr.ip()[..4], &[0x20, 0x01, 0x0d, 0xb8]);
		assert_eq!(addr.ip()[15], 1);
		assert_eq!(addr.segments(), [0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]);
	}

	#[test]
	fn raw_round_trip_keeps_scope() {
		let addr = SocketAddrV6::with_scope([0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1], 53, 3);
		let raw = addr.to_raw();
		assert_eq!(raw.sin6_family, libc::AF_INET6 as libc::sa_family_t);
		assert_eq!(u16::from_be(raw.sin6_port), 53);
		assert_eq!(SocketAddrV6::from_raw(&raw), addr);
	}
}
