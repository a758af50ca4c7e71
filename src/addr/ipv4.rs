/// IPv4 endpoint (address + port).
///
/// The port is kept in network byte order, the same way `sockaddr_in`
/// stores it, so the native form is a plain field copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketAddrV4 {
	ip: [u8; 4],
	nport: u16,
}

impl SocketAddrV4 {
	/// Creates a new IPv4 endpoint. `port` is in host byte order.
	pub fn new(ip: [u8; 4], port: u16) -> Self {
		Self { ip, nport: port.to_be() }
	}

	/// Creates from an IP tuple and port.
	/// Example: `SocketAddrV4::from_octets((192, 0, 2, 1), 443)`
	pub fn from_octets(ip: (u8, u8, u8, u8), port: u16) -> Self {
		Self::new([ip.0, ip.1, ip.2, ip.3], port)
	}

	/// Creates from raw sockaddr_in.
	pub(crate) fn from_raw(raw: &libc::sockaddr_in) -> Self {
		Self {
			ip: raw.sin_addr.s_addr.to_ne_bytes(),
			nport: raw.sin_port,
		}
	}

	/// Returns the IP bytes.
	pub fn ip(&self) -> [u8; 4] {
		self.ip
	}

	/// Borrows the IP bytes.
	pub fn octets(&self) -> &[u8; 4] {
		&self.ip
	}

	/// Returns the port in host byte order.
	pub fn port(&self) -> u16 {
		u16::from_be(self.nport)
	}

	/// Returns the port exactly as stored, in network byte order.
	pub fn nport(&self) -> u16 {
		self.nport
	}

	pub(crate) fn with_nport(mut self, nport: u16) -> Self {
		self.nport = nport;
		self
	}

	/// Converts to the raw sockaddr_in for syscalls.
	pub(crate) fn to_raw(&self) -> libc::sockaddr_in {
		let mut raw: libc::sockaddr_in = unsafe { std::mem::zeroed() };
		raw.sin_family = libc::AF_INET as libc::sa_family_t;
		raw.sin_port = self.nport;
		raw.sin_addr.s_addr = u32::from_ne_bytes(self.ip);
		raw
	}
}

/*
sockaddr_in is 16 bytes on Linux:
  - sin_family: AF_INET (2)
  - sin_port:   port, big-endian
  - sin_addr:   4 address bytes, already in wire order
  - sin_zero:   padding up to sizeof(sockaddr)
Starting from zeroed() keeps the padding clean without naming it.
*/

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn port_is_stored_big_endian() {
		let addr = SocketAddrV4::new([192, 0, 2, 1], 443);
		assert_eq!(addr.port(), 443);
		assert_eq!(addr.nport(), 443u16.to_be());
		assert_eq!(addr.nport().to_ne_bytes(), [0x01, 0xbb]);
	}

	#[test]
	fn raw_round_trip() {
		let addr = SocketAddrV4::from_octets((10, 1, 2, 3), 8080);
		let raw = addr.to_raw();
		assert_eq!(raw.sin_family, libc::AF_INET as libc::sa_family_t);
		assert_eq!(raw.sin_addr.s_addr.to_ne_bytes(), [10, 1, 2, 3]);
		assert_eq!(SocketAddrV4::from_raw(&raw), addr);
	}
}
