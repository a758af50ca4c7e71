//! Address text.
//!
//! Four renderings, each written into any `core::fmt::Write` sink:
//! - raw — every group, no `::`, caller-chosen separator
//! - canonical — RFC 5952 text
//! - sensitive — canonical, or `<ip-address>` when the privacy policy says so
//! - reversed — the `IN-ADDR.ARPA.` / `IP6.ARPA.` reverse DNS name
//!
//! Bad input never fails a render; it comes out as placeholder text.

mod privacy;
mod zeros;

pub use self::privacy::{LogConfig, LogIpSwitch, PrivacyPolicy};
pub use self::zeros::{MIN_ZERO_GROUPS, ZeroRun, zeros_to_skip};

use std::fmt::{self, Write};
use crate::addr::IpAddress;

pub const NONE: &str = "<none>";
pub const UNSPECIFIED: &str = "<unspecified>";
pub const INVALID: &str = "<invalid>";
pub const REDACTED: &str = "<ip-address>";

const IPV4_SEP: char = '.';
const IPV6_SEP: char = ':';

/// Capacity of `AddressStr`: eight `ffff` groups and seven separators of up
/// to four UTF-8 bytes each.
pub const ADDRESS_STR_LEN: usize = 8 * 4 + 7 * 4;

/// Capacity of `ReversedStr`: sixteen `x.x.` labels plus the suffix.
pub const REVERSED_STR_LEN: usize = 16 * 4 + "IP6.ARPA.".len();

/// Bounded string holding raw, canonical or sensitive text.
pub type AddressStr = heapless::String<ADDRESS_STR_LEN>;

/// Bounded string holding a reverse DNS name.
pub type ReversedStr = heapless::String<REVERSED_STR_LEN>;

fn write_ipv4<W: Write + ?Sized>(out: &mut W, octets: &[u8; 4], sep: char) -> fmt::Result {
	for (i, octet) in octets.iter().enumerate() {
		if i > 0 {
			out.write_char(sep)?;
		}
		write!(out, "{}", octet)?;
	}
	Ok(())
}

fn write_ipv6<W: Write + ?Sized>(
	out: &mut W,
	ip: &[u8; 16],
	sep: char,
	skip: Option<ZeroRun>,
) -> fmt::Result {
	let mut need_sep = false;
	let mut offset = 0;
	while offset < ip.len() {
		match skip {
			Some(run) if run.offset == offset => {
				out.write_char(sep)?;
				out.write_char(sep)?;
				need_sep = false;
				offset += run.len;
			}
			_ => {
				if need_sep {
					out.write_char(sep)?;
				}
				write!(out, "{:x}", u16::from_be_bytes([ip[offset], ip[offset + 1]]))?;
				need_sep = true;
				offset += 2;
			}
		}
	}
	Ok(())
}

/// Writes every byte group of the address, uncompressed.
///
/// `sep` replaces the family's usual separator (`.` or `:`). Only meant for
/// addresses already known to be good: an unknown family trips a debug
/// assertion, and release builds log it and print `<invalid>`.
pub fn write_raw<W: Write + ?Sized>(
	out: &mut W,
	address: Option<&IpAddress>,
	sep: Option<char>,
) -> fmt::Result {
	let Some(address) = address else {
		return out.write_str(NONE);
	};
	match address {
		IpAddress::V4(v4) => write_ipv4(out, v4.octets(), sep.unwrap_or(IPV4_SEP)),
		IpAddress::V6(v6) => write_ipv6(out, v6.octets(), sep.unwrap_or(IPV6_SEP), None),
		IpAddress::Unspecified => out.write_str(UNSPECIFIED),
		IpAddress::Invalid(family) => {
			if cfg!(debug_assertions) {
				panic!("raw text for address with unknown family {}", family);
			}
			log::error!("raw text for address with unknown family {}", family);
			out.write_str(INVALID)
		}
	}
}

fn write_cooked<W: Write + ?Sized>(
	out: &mut W,
	address: Option<&IpAddress>,
	redact: bool,
) -> fmt::Result {
	// a missing address gives nothing away
	let Some(address) = address else {
		return out.write_str(NONE);
	};
	if redact {
		return out.write_str(REDACTED);
	}
	match address {
		IpAddress::V4(v4) => write_ipv4(out, v4.octets(), IPV4_SEP),
		IpAddress::V6(v6) => {
			let ip = v6.octets();
			write_ipv6(out, ip, IPV6_SEP, zeros_to_skip(ip))
		}
		IpAddress::Unspecified => out.write_str(UNSPECIFIED),
		IpAddress::Invalid(_) => out.write_str(INVALID),
	}
}

/// Writes RFC 5952 text: dotted quad for IPv4, compressed hex for IPv6.
pub fn write_canonical<W: Write + ?Sized>(out: &mut W, address: Option<&IpAddress>) -> fmt::Result {
	write_cooked(out, address, false)
}

/// Writes canonical text, or `<ip-address>` when `policy` redacts addresses.
pub fn write_sensitive<W, P>(out: &mut W, address: Option<&IpAddress>, policy: &P) -> fmt::Result
where
	W: Write + ?Sized,
	P: PrivacyPolicy + ?Sized,
{
	write_cooked(out, address, policy.redact_addresses())
}

/// Writes the reverse DNS name of the address.
pub fn write_reversed<W: Write + ?Sized>(out: &mut W, address: Option<&IpAddress>) -> fmt::Result {
	let Some(address) = address else {
		return out.write_str(NONE);
	};
	match address {
		IpAddress::V4(v4) => {
			for byte in v4.octets().iter().rev() {
				write!(out, "{}.", byte)?;
			}
			out.write_str("IN-ADDR.ARPA.")
		}
		IpAddress::V6(v6) => {
			for byte in v6.octets().iter().rev() {
				write!(out, "{:x}.{:x}.", byte & 0xf, byte >> 4)?;
			}
			out.write_str("IP6.ARPA.")
		}
		IpAddress::Unspecified => out.write_str(UNSPECIFIED),
		IpAddress::Invalid(_) => out.write_str(INVALID),
	}
}

/*
Reverse names, low nibble first within each byte:
  192.0.2.1    -> 1.2.0.192.IN-ADDR.ARPA.
  2001:db8::1  -> 1.0.0.0. ... 8.b.d.0.1.0.0.2.IP6.ARPA.
*/

// The buffers below are sized for the longest text of their mode, so the
// writes into them cannot run out of room.

pub fn str_raw(address: Option<&IpAddress>, sep: Option<char>) -> AddressStr {
	let mut buf = AddressStr::new();
	let written = write_raw(&mut buf, address, sep);
	debug_assert!(written.is_ok(), "address text overflowed its buffer");
	buf
}

pub fn str_canonical(address: Option<&IpAddress>) -> AddressStr {
	let mut buf = AddressStr::new();
	let written = write_canonical(&mut buf, address);
	debug_assert!(written.is_ok(), "address text overflowed its buffer");
	buf
}

pub fn str_sensitive<P: PrivacyPolicy + ?Sized>(address: Option<&IpAddress>, policy: &P) -> AddressStr {
	let mut buf = AddressStr::new();
	let written = write_sensitive(&mut buf, address, policy);
	debug_assert!(written.is_ok(), "address text overflowed its buffer");
	buf
}

pub fn str_reversed(address: Option<&IpAddress>) -> ReversedStr {
	let mut buf = ReversedStr::new();
	let written = write_reversed(&mut buf, address);
	debug_assert!(written.is_ok(), "address text overflowed its buffer");
	buf
}

/// Canonical text of an address.
pub fn ipstr(address: &IpAddress) -> AddressStr {
	str_canonical(Some(address))
}

/// Canonical text of an address, unless `policy` redacts it.
pub fn sensitive_ipstr<P: PrivacyPolicy + ?Sized>(address: &IpAddress, policy: &P) -> AddressStr {
	str_sensitive(Some(address), policy)
}

impl fmt::Display for IpAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_canonical(f, Some(self))
	}
}

/// `Display` adapter for raw text. See [`IpAddress::display_raw`].
#[derive(Debug, Clone, Copy)]
pub struct Raw<'a> {
	address: &'a IpAddress,
	sep: Option<char>,
}

impl fmt::Display for Raw<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_raw(f, Some(self.address), self.sep)
	}
}

/// `Display` adapter for sensitive text. See [`IpAddress::display_sensitive`].
pub struct Sensitive<'a, P: ?Sized> {
	address: &'a IpAddress,
	policy: &'a P,
}

impl<P: PrivacyPolicy + ?Sized> fmt::Display for Sensitive<'_, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_sensitive(f, Some(self.address), self.policy)
	}
}

/// `Display` adapter for the reverse DNS name. See [`IpAddress::display_reversed`].
#[derive(Debug, Clone, Copy)]
pub struct Reversed<'a> {
	address: &'a IpAddress,
}

impl fmt::Display for Reversed<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_reversed(f, Some(self.address))
	}
}

impl IpAddress {
	/// Raw text, e.g. `2001:db8:0:0:0:0:0:1`.
	pub fn display_raw(&self, sep: Option<char>) -> Raw<'_> {
		Raw { address: self, sep }
	}

	/// Canonical or redacted text, e.g. in `log::info!("peer {}", ...)`.
	pub fn display_sensitive<'a, P: PrivacyPolicy + ?Sized>(&'a self, policy: &'a P) -> Sensitive<'a, P> {
		Sensitive { address: self, policy }
	}

	/// Reverse DNS name, e.g. `1.2.0.192.IN-ADDR.ARPA.`.
	pub fn display_reversed(&self) -> Reversed<'_> {
		Reversed { address: self }
	}
}
