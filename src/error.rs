/// Address access and formatting errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
	#[error("address family {} has no port", family_to_str(*.family))]
	NotAddressable { family: libc::sa_family_t },

	#[error("unknown address family {family}")]
	UnknownFamily { family: libc::sa_family_t },

	#[error("text does not fit in the output buffer")]
	Capacity,
}

/// Converts an address family to a human-readable string.
fn family_to_str(family: libc::sa_family_t) -> String {
	match family as libc::c_int {
		libc::AF_UNSPEC => "AF_UNSPEC".into(),
		libc::AF_INET => "AF_INET".into(),
		libc::AF_INET6 => "AF_INET6".into(),
		_ => family.to_string(),
	}
}

impl From<std::fmt::Error> for AddrError {
	fn from(_: std::fmt::Error) -> Self {
		AddrError::Capacity
	}
}

impl From<AddrError> for std::io::Error {
	fn from(err: AddrError) -> Self {
		let kind = match &err {
			AddrError::NotAddressable { .. } => std::io::ErrorKind::AddrNotAvailable,
			AddrError::UnknownFamily { .. } => std::io::ErrorKind::InvalidInput,
			AddrError::Capacity => std::io::ErrorKind::OutOfMemory,
		};
		std::io::Error::new(kind, err)
	}
}
